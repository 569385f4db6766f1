// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Error type shared by every fallible calendar operation.

/// Error type for all fallible operations in this crate.
///
/// All variants are value errors: the caller receives them through a
/// `Result` and nothing is clamped or substituted on its behalf.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CalendarError {
    /// A civil date or time-of-day component is out of range.
    #[error("invalid civil date-time {year:04}-{month:02}-{day:02} {hour:02}:{minute:02}:{second:02}")]
    InvalidDate {
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
    },

    /// The date falls in the ten days dropped by the 1582 Gregorian reform.
    #[error("{year:04}-{month:02}-{day:02} does not exist (dropped by the Gregorian reform)")]
    NonexistentDate { year: i32, month: u32, day: u32 },

    /// ΔT was requested outside the validated polynomial domain.
    #[error("ΔT is only defined for years -1999..=3000 (got {year})")]
    DeltaTOutOfRange { year: i32 },

    /// The vernal-equinox polynomial was requested outside its domain.
    #[error("vernal equinox is only defined for years -8000..=8000 (got {year})")]
    EquinoxOutOfRange { year: i32 },

    /// A leap month was requested for a lunar year that has none.
    #[error("lunar year {year} is not a leap year")]
    NotALeapYear { year: i32 },

    /// A leap month was requested, but the year's leap month is a different one.
    #[error("month {month} is not the leap month of lunar year {year} (leap month is {leap_month})")]
    NotTheLeapMonth {
        year: i32,
        month: u32,
        leap_month: u32,
    },

    /// The lunar day exceeds the length of that particular month.
    #[error("lunar day {day} is out of range (month has {max} days)")]
    DayOutOfRange { day: u32, max: u32 },

    /// Lunar month numbers run 1..=12.
    #[error("invalid lunar month: {month} (must be 1..=12)")]
    InvalidLunarMonth { month: u32 },

    /// Sexagenary cycle positions run 0..=59.
    #[error("invalid sexagenary cycle index: {index} (must be 0..=59)")]
    InvalidCycleIndex { index: u8 },

    /// Month slot ordinals run 0..=14.
    #[error("invalid month ordinal: {ordinal} (must be 0..=14)")]
    InvalidMonthOrdinal { ordinal: u32 },

    /// No new moon of the search window could be aligned with the winter solstice.
    #[error("could not align new moons with the winter solstice of {year}")]
    MonthAlignment { year: i32 },
}
