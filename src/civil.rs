// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Civil calendar dates and their Julian Day numbers.
//!
//! Dates on or before 1582-10-04 are read on the Julian calendar, dates on or
//! after 1582-10-15 on the Gregorian calendar. The ten days in between do not
//! exist and are rejected with [`CalendarError::NonexistentDate`]. Years use
//! astronomical numbering (year 0 is 1 BC).

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};

use crate::error::CalendarError;
use crate::instant::round_to;
use crate::JulianDay;

/// First Julian Day number (noon-referenced) of the Gregorian calendar.
const GREGORIAN_ADOPTION_JDN: i64 = 2_299_161;

const MS_PER_DAY: i64 = 86_400_000;

/// Which calendar is in force for a given date.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Reckoning {
    Julian,
    Gregorian,
}

fn reckoning(year: i32, month: u32, day: u32) -> Result<Reckoning, CalendarError> {
    match (year, month, day) {
        d if d <= (1582, 10, 4) => Ok(Reckoning::Julian),
        d if d >= (1582, 10, 15) => Ok(Reckoning::Gregorian),
        _ => Err(CalendarError::NonexistentDate { year, month, day }),
    }
}

fn is_leap_year(year: i32, reckoning: Reckoning) -> bool {
    match reckoning {
        Reckoning::Julian => year.rem_euclid(4) == 0,
        Reckoning::Gregorian => {
            (year.rem_euclid(4) == 0 && year.rem_euclid(100) != 0) || year.rem_euclid(400) == 0
        }
    }
}

fn days_in_month(year: i32, month: u32, reckoning: Reckoning) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        _ if is_leap_year(year, reckoning) => 29,
        _ => 28,
    }
}

/// A validated civil date and wall-clock time with millisecond resolution.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "RawCivilDateTime")
)]
pub struct CivilDateTime {
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
    second: u32,
    millisecond: u32,
}

/// Unchecked fields as they arrive from a deserializer.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawCivilDateTime {
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
    second: u32,
    #[serde(default)]
    millisecond: u32,
}

#[cfg(feature = "serde")]
impl TryFrom<RawCivilDateTime> for CivilDateTime {
    type Error = CalendarError;

    fn try_from(raw: RawCivilDateTime) -> Result<Self, Self::Error> {
        Self::with_millis(
            raw.year,
            raw.month,
            raw.day,
            raw.hour,
            raw.minute,
            raw.second,
            raw.millisecond,
        )
    }
}

impl CivilDateTime {
    /// Build a date-time at whole-second resolution.
    pub fn new(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
    ) -> Result<Self, CalendarError> {
        Self::with_millis(year, month, day, hour, minute, second, 0)
    }

    /// Midnight at the start of the given date.
    pub fn date(year: i32, month: u32, day: u32) -> Result<Self, CalendarError> {
        Self::new(year, month, day, 0, 0, 0)
    }

    /// Build a date-time including milliseconds.
    pub fn with_millis(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
        millisecond: u32,
    ) -> Result<Self, CalendarError> {
        let invalid = CalendarError::InvalidDate {
            year,
            month,
            day,
            hour,
            minute,
            second,
        };
        if !(1..=12).contains(&month) || day == 0 {
            return Err(invalid);
        }
        let calendar = reckoning(year, month, day)?;
        if day > days_in_month(year, month, calendar)
            || hour >= 24
            || minute >= 60
            || second >= 60
            || millisecond >= 1000
        {
            return Err(invalid);
        }
        Ok(Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
            millisecond,
        })
    }

    pub const fn year(&self) -> i32 {
        self.year
    }

    pub const fn month(&self) -> u32 {
        self.month
    }

    pub const fn day(&self) -> u32 {
        self.day
    }

    pub const fn hour(&self) -> u32 {
        self.hour
    }

    pub const fn minute(&self) -> u32 {
        self.minute
    }

    pub const fn second(&self) -> u32 {
        self.second
    }

    pub const fn millisecond(&self) -> u32 {
        self.millisecond
    }

    /// Julian Day number (noon-referenced integer) of the date part.
    fn day_number(&self) -> i64 {
        let a = (14 - self.month as i64) / 12;
        let y = self.year as i64 + 4800 - a;
        let m = self.month as i64 + 12 * a - 3;
        let base = self.day as i64 + (153 * m + 2) / 5 + 365 * y + y.div_euclid(4);
        match self.reckoning() {
            Reckoning::Julian => base - 32_083,
            Reckoning::Gregorian => base - y.div_euclid(100) + y.div_euclid(400) - 32_045,
        }
    }

    /// Calendar in force; a constructed value never lies in the reform gap.
    fn reckoning(&self) -> Reckoning {
        if (self.year, self.month, self.day) <= (1582, 10, 4) {
            Reckoning::Julian
        } else {
            Reckoning::Gregorian
        }
    }

    /// Fraction of the civil day elapsed since midnight.
    fn day_fraction(&self) -> f64 {
        self.hour as f64 / 24.0
            + self.minute as f64 / 1_440.0
            + (self.second as f64 + self.millisecond as f64 / 1_000.0) / 86_400.0
    }

    /// Continuous Julian Day of this date-time, rounded to ten decimals.
    pub fn to_julian_day(&self) -> JulianDay {
        JulianDay::new(round_to(
            self.day_number() as f64 - 0.5 + self.day_fraction(),
            10,
        ))
    }

    /// Inverse of [`to_julian_day`](Self::to_julian_day), rounded to the
    /// nearest millisecond.
    pub fn from_julian_day(jd: JulianDay) -> Self {
        let total_ms = ((jd.value() + 0.5) * MS_PER_DAY as f64).round() as i64;
        let z = total_ms.div_euclid(MS_PER_DAY);
        let ms_of_day = total_ms.rem_euclid(MS_PER_DAY);

        let a = if z < GREGORIAN_ADOPTION_JDN {
            z as f64
        } else {
            let alpha = ((z as f64 - 1_867_216.25) / 36_524.25).floor();
            z as f64 + 1.0 + alpha - (alpha / 4.0).floor()
        };
        let b = a + 1524.0;
        let c = ((b - 122.1) / 365.25).floor();
        let d = (365.25 * c).floor();
        let e = ((b - d) / 30.6001).floor();

        let day = (b - d - (30.6001 * e).floor()) as u32;
        let month = if e < 14.0 { e as u32 - 1 } else { e as u32 - 13 };
        let year = if month > 2 { c as i32 - 4716 } else { c as i32 - 4715 };

        let ms = ms_of_day as u32;
        Self {
            year,
            month,
            day,
            hour: ms / 3_600_000,
            minute: ms / 60_000 % 60,
            second: ms / 1_000 % 60,
            millisecond: ms % 1_000,
        }
    }

    /// The same date-time as a chrono value, if it lies on the Gregorian
    /// calendar. chrono is proleptic Gregorian, so Julian-calendar dates have
    /// no faithful counterpart there.
    pub fn to_naive_datetime(&self) -> Option<NaiveDateTime> {
        if self.reckoning() != Reckoning::Gregorian {
            return None;
        }
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)?.and_hms_milli_opt(
            self.hour,
            self.minute,
            self.second,
            self.millisecond,
        )
    }
}

impl TryFrom<NaiveDateTime> for CivilDateTime {
    type Error = CalendarError;

    fn try_from(dt: NaiveDateTime) -> Result<Self, Self::Error> {
        let (year, month, day) = (dt.year(), dt.month(), dt.day());
        if (year, month, day) < (1582, 10, 15) {
            return Err(CalendarError::InvalidDate {
                year,
                month,
                day,
                hour: dt.hour(),
                minute: dt.minute(),
                second: dt.second(),
            });
        }
        Self::with_millis(
            year,
            month,
            day,
            dt.hour(),
            dt.minute(),
            dt.second(),
            dt.nanosecond() / 1_000_000,
        )
    }
}

impl std::fmt::Display for CivilDateTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )?;
        if self.millisecond != 0 {
            write!(f, ".{:03}", self.millisecond)?;
        }
        Ok(())
    }
}

/// Julian Day of a civil date-time.
///
/// ```
/// use lunisolar::julian_day;
///
/// let jd = julian_day(2021, 12, 6, 12, 0, 0, 0).unwrap();
/// assert_eq!(jd.value(), 2_459_555.0);
/// ```
pub fn julian_day(
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
    second: u32,
    millisecond: u32,
) -> Result<JulianDay, CalendarError> {
    CivilDateTime::with_millis(year, month, day, hour, minute, second, millisecond)
        .map(|dt| dt.to_julian_day())
}

/// Civil date-time of a Julian Day.
pub fn calendar_from_julian_day(jd: JulianDay) -> CivilDateTime {
    CivilDateTime::from_julian_day(jd)
}
