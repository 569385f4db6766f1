// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Lunar month numbering around one winter solstice.
//!
//! A [`LunarYearTable`] holds sixteen consecutive new moons, the first being
//! the new moon of the month that contains the prior winter solstice (the
//! 11th month), and a [`MonthCode`] for each of the fifteen months they
//! bound. When thirteen new moons fall between two winter solstices, the
//! first month that contains no principal term is intercalary and takes the
//! number of the month before it.
//!
//! A table answers for the months from its first slot up to, not including,
//! the month of the next winter solstice. That month opens the next table, so
//! every lunar month is numbered by exactly one table.
//!
//! Month boundaries are compared as civil day numbers in the calendar's zone,
//! see [`Time::<JD>::day_number`](crate::Time::day_number).

use qtty::Days;

use crate::civil::{calendar_from_julian_day, CivilDateTime};
use crate::delta_t::delta_t_days;
use crate::error::CalendarError;
use crate::new_moon::{reference_month_index, true_new_moon, NEW_MOON_WINDOW};
use crate::sexagenary::{year_pillar, GanZhi};
use crate::solar_term::principal_terms_since_winter_solstice;
use crate::{JulianDay, JulianEphemerisDay};

/// Number of month slots in a table.
pub const MONTH_SLOTS: usize = 15;

/// Name of a month slot: ordinal 0 is the 11th month of the previous lunar
/// year, 1 the 12th, 2 the 1st month, and so on. A leap month shares the
/// ordinal of the month it follows.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "RawMonthCode")
)]
pub struct MonthCode {
    ordinal: u32,
    leap: bool,
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawMonthCode {
    ordinal: u32,
    leap: bool,
}

#[cfg(feature = "serde")]
impl TryFrom<RawMonthCode> for MonthCode {
    type Error = CalendarError;

    fn try_from(raw: RawMonthCode) -> Result<Self, Self::Error> {
        if raw.ordinal as usize >= MONTH_SLOTS {
            return Err(CalendarError::InvalidMonthOrdinal {
                ordinal: raw.ordinal,
            });
        }
        Ok(Self {
            ordinal: raw.ordinal,
            leap: raw.leap,
        })
    }
}

impl MonthCode {
    pub const fn regular(ordinal: u32) -> Self {
        Self {
            ordinal,
            leap: false,
        }
    }

    /// The intercalary month inserted after `ordinal`.
    pub const fn leap(ordinal: u32) -> Self {
        Self {
            ordinal,
            leap: true,
        }
    }

    pub const fn ordinal(&self) -> u32 {
        self.ordinal
    }

    pub const fn is_leap(&self) -> bool {
        self.leap
    }

    /// Calendar month number, 1..=12.
    pub const fn month(&self) -> u32 {
        (self.ordinal + 10) % 12 + 1
    }

    /// Lunar year of this month relative to the table's year.
    pub const fn year_offset(&self) -> i32 {
        (self.ordinal as i32 - 2).div_euclid(12)
    }

    /// Numeric code: the ordinal, plus one half for a leap month.
    pub fn value(&self) -> f64 {
        self.ordinal as f64 + if self.leap { 0.5 } else { 0.0 }
    }
}

/// A date on the Chinese lunisolar calendar.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LunarDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub is_leap_month: bool,
}

impl LunarDate {
    /// Year pillar of the lunar year.
    pub const fn year_pillar(&self) -> GanZhi {
        year_pillar(self.year)
    }
}

impl std::fmt::Display for LunarDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let leap = if self.is_leap_month { "闰" } else { "" };
        write!(f, "{}-{}{:02}-{:02}", self.year, leap, self.month, self.day)
    }
}

/// Twenty consecutive true new moons starting near 1 November of the
/// previous year, with ΔT removed.
///
/// ΔT is sampled at the civil month of each new moon, counted from January
/// of `year`, so a new moon shared by two adjacent windows gets the same
/// instant in both.
pub fn new_moon_window(year: i32) -> Result<[JulianDay; NEW_MOON_WINDOW], CalendarError> {
    let november = CivilDateTime::date(year - 1, 11, 1)?.to_julian_day();
    let kn = reference_month_index(JulianEphemerisDay::new(november.value()));

    let mut window = [JulianDay::new(0.0); NEW_MOON_WINDOW];
    for (i, slot) in window.iter_mut().enumerate() {
        let dynamical = true_new_moon(kn + i as i64);
        let civil = calendar_from_julian_day(JulianDay::new(dynamical.value()));
        let month = (civil.year() - year) * 12 + civil.month() as i32;
        let universal = dynamical - delta_t_days(year, month)?;
        *slot = JulianDay::new(universal.value()).rounded(10);
    }
    Ok(window)
}

/// Sixteen new moons re-indexed so that slot 0 starts the month containing
/// the winter solstice `dongzhi`, days taken `utc_offset` east of UT.
pub fn new_moons_since_winter_solstice(
    year: i32,
    dongzhi: JulianDay,
    utc_offset: Days,
) -> Result<[JulianDay; 16], CalendarError> {
    let window = new_moon_window(year)?;
    let first_after = first_new_moon_after(&window[..NEW_MOON_WINDOW - 1], dongzhi, utc_offset)
        .filter(|&j| j > 0)
        .ok_or(CalendarError::MonthAlignment { year })?;

    window
        .get(first_after - 1..first_after + 15)
        .and_then(|s| <[JulianDay; 16]>::try_from(s).ok())
        .ok_or(CalendarError::MonthAlignment { year })
}

/// Index of the first new moon on a later local day than `term`.
fn first_new_moon_after(new_moons: &[JulianDay], term: JulianDay, utc_offset: Days) -> Option<usize> {
    let term_day = term.day_number(utc_offset);
    new_moons
        .iter()
        .position(|nm| nm.day_number(utc_offset) > term_day)
}

/// New moons and month codes for the lunar months around one winter
/// solstice, with day boundaries taken in a zone `utc_offset` east of UT.
#[derive(Debug, Clone, PartialEq)]
pub struct LunarYearTable {
    year: i32,
    utc_offset: Days,
    new_moons: [JulianDay; 16],
    month_codes: [MonthCode; MONTH_SLOTS],
    /// Slot of the month containing the winter solstice of `year`.
    closing: usize,
}

impl LunarYearTable {
    /// Build the table for the lunar months between the winter solstices of
    /// `year - 1` and `year`.
    pub fn new(year: i32, utc_offset: Days) -> Result<Self, CalendarError> {
        let principal = principal_terms_since_winter_solstice(year)?;
        let new_moons = new_moons_since_winter_solstice(year, principal[0], utc_offset)?;
        let day = |jd: JulianDay| jd.day_number(utc_offset);

        let closing = first_new_moon_after(&new_moons, principal[12], utc_offset)
            .and_then(|j| j.checked_sub(1))
            .filter(|j| (12..=13).contains(j))
            .ok_or(CalendarError::MonthAlignment { year })?;

        // Thirteen months between the solstices: one of months 1..=12 holds
        // none of the eleven principal terms strictly between them.
        let leap_slot = if closing == 13 {
            let lacks_principal_term = |slot: usize| {
                let (open, close) = (day(new_moons[slot]), day(new_moons[slot + 1]));
                !principal.iter().any(|&qi| (open..close).contains(&day(qi)))
            };
            let found = (1..closing).find(|&j| lacks_principal_term(j));
            Some(found.ok_or(CalendarError::MonthAlignment { year })?)
        } else {
            None
        };

        let month_codes = std::array::from_fn(|i| match leap_slot {
            Some(leap) if i == leap => MonthCode::leap(i as u32 - 1),
            Some(leap) if i > leap => MonthCode::regular(i as u32 - 1),
            _ => MonthCode::regular(i as u32),
        });

        Ok(Self {
            year,
            utc_offset,
            new_moons,
            month_codes,
            closing,
        })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn new_moons(&self) -> &[JulianDay; 16] {
        &self.new_moons
    }

    pub fn month_codes(&self) -> &[MonthCode; MONTH_SLOTS] {
        &self.month_codes
    }

    /// Slot of the 11th month of `year`, which opens the next table.
    pub fn closing_slot(&self) -> usize {
        self.closing
    }

    /// Local day number on which slot `i` begins.
    fn first_day(&self, slot: usize) -> i64 {
        self.new_moons[slot].day_number(self.utc_offset)
    }

    /// Slot holding the leap month, if the table has one.
    pub fn leap_slot(&self) -> Option<usize> {
        (1..self.closing).find(|&j| self.month_codes[j].is_leap())
    }

    /// Leap month among months 1..=10 of `year`, if any.
    pub fn leap_month(&self) -> Option<u32> {
        self.leap_slot()
            .filter(|&slot| slot >= 3)
            .map(|slot| slot as u32 - 2)
    }

    /// Leap 11th or 12th month of `year - 1`, which this table numbers.
    pub fn previous_year_leap_month(&self) -> Option<u32> {
        self.leap_slot()
            .filter(|&slot| slot <= 2)
            .map(|slot| slot as u32 + 10)
    }

    /// Length in days of every month slot.
    pub fn month_lengths(&self) -> [u32; MONTH_SLOTS] {
        std::array::from_fn(|i| self.month_length(i))
    }

    /// Length in days of the month in `slot`.
    pub fn month_length(&self, slot: usize) -> u32 {
        (self.first_day(slot + 1) - self.first_day(slot)) as u32
    }

    /// Slot of lunar `month` of lunar year `year`, if this table numbers it.
    ///
    /// A table numbers months 11 and 12 of `self.year() - 1` and months
    /// 1..=10 of `self.year()`, plus the leap month among them.
    pub fn slot_of(&self, year: i32, month: u32, is_leap: bool) -> Option<usize> {
        if !(1..=12).contains(&month) {
            return None;
        }
        let ordinal = (year - self.year) * 12 + month as i32 + 1;
        if !(0..=11).contains(&ordinal) {
            return None;
        }
        let wanted = MonthCode {
            ordinal: ordinal as u32,
            leap: is_leap,
        };
        (0..self.closing).find(|&j| self.month_codes[j] == wanted)
    }

    /// Local midnight starting day `day` of the month in `slot`.
    pub fn civil_day(&self, slot: usize, day: u32) -> Result<JulianDay, CalendarError> {
        let max = self.month_length(slot);
        if day == 0 || day > max {
            return Err(CalendarError::DayOutOfRange { day, max });
        }
        Ok(JulianDay::from_day_number(self.first_day(slot) + day as i64 - 1))
    }

    /// Whether local day number `n` precedes the first month of the table.
    pub fn starts_after(&self, n: i64) -> bool {
        n < self.first_day(0)
    }

    /// Whether local day number `n` falls in or after the closing month.
    pub fn ends_before(&self, n: i64) -> bool {
        n >= self.first_day(self.closing)
    }

    /// Lunar date of local day number `n`, if the table numbers its month.
    pub fn lunar_date(&self, n: i64) -> Option<LunarDate> {
        let slot = (0..self.closing).find(|&i| self.first_day(i) <= n && n < self.first_day(i + 1))?;
        let code = self.month_codes[slot];
        Some(LunarDate {
            year: self.year + code.year_offset(),
            month: code.month(),
            day: (n - self.first_day(slot) + 1) as u32,
            is_leap_month: code.is_leap(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn china() -> Days {
        Days::new(8.0 / 24.0)
    }

    fn table(year: i32) -> LunarYearTable {
        LunarYearTable::new(year, china()).unwrap()
    }

    fn civil(jd: JulianDay) -> (i32, u32, u32) {
        let dt = crate::calendar_from_julian_day(jd);
        (dt.year(), dt.month(), dt.day())
    }

    #[test]
    fn month_code_projection() {
        assert_eq!(MonthCode::regular(0).month(), 11);
        assert_eq!(MonthCode::regular(1).month(), 12);
        assert_eq!(MonthCode::regular(2).month(), 1);
        assert_eq!(MonthCode::regular(13).month(), 12);
        assert_eq!(MonthCode::regular(14).month(), 1);
        assert_eq!(MonthCode::regular(1).year_offset(), -1);
        assert_eq!(MonthCode::regular(13).year_offset(), 0);
        assert_eq!(MonthCode::regular(14).year_offset(), 1);
        assert_eq!(MonthCode::leap(5).value(), 5.5);
    }

    fn slot(t: &LunarYearTable, year: i32, month: u32, leap: bool) -> usize {
        t.slot_of(year, month, leap).unwrap()
    }

    fn first_of(t: &LunarYearTable, year: i32, month: u32, leap: bool) -> (i32, u32, u32) {
        civil(t.civil_day(slot(t, year, month, leap), 1).unwrap())
    }

    #[test]
    fn known_leap_months() {
        assert_eq!(table(2017).leap_month(), Some(6));
        assert_eq!(table(2020).leap_month(), Some(4));
        assert_eq!(table(2023).leap_month(), Some(2));
        assert_eq!(table(2021).leap_month(), None);
        assert_eq!(table(2022).leap_month(), None);
    }

    #[test]
    fn leap_month_start_dates() {
        assert_eq!(first_of(&table(2020), 2020, 4, true), (2020, 5, 23));
        assert_eq!(first_of(&table(2017), 2017, 6, true), (2017, 7, 23));
        assert_eq!(first_of(&table(2023), 2023, 2, true), (2023, 3, 22));
    }

    #[test]
    fn leap_eleventh_month_of_2033_is_numbered_by_the_next_table() {
        assert_eq!(table(2033).leap_slot(), None);
        let t = table(2034);
        assert_eq!(t.leap_slot(), Some(1));
        assert_eq!(t.previous_year_leap_month(), Some(11));
        assert_eq!(t.leap_month(), None);
        assert_eq!(first_of(&t, 2033, 11, false), (2033, 11, 22));
        assert_eq!(first_of(&t, 2033, 11, true), (2033, 12, 22));
        assert_eq!(first_of(&t, 2033, 12, false), (2034, 1, 20));
        assert_eq!(first_of(&t, 2034, 1, false), (2034, 2, 19));
    }

    #[test]
    fn adjacent_tables_share_their_boundary_month() {
        for year in [1000, 1582, 1850, 2033, 2034, 2500, 2999] {
            let t = table(year);
            let next = table(year + 1);
            assert_eq!(t.new_moons()[t.closing_slot()], next.new_moons()[0], "{year}");
        }
    }

    #[test]
    fn new_year_dates() {
        assert_eq!(first_of(&table(2021), 2021, 1, false), (2021, 2, 12));
        assert_eq!(first_of(&table(2020), 2020, 1, false), (2020, 1, 25));
        assert_eq!(first_of(&table(2023), 2023, 1, false), (2023, 1, 22));
    }

    #[test]
    fn lunar_to_civil_reference() {
        let t = table(2020);
        assert_eq!(civil(t.civil_day(slot(&t, 2020, 4, false), 14).unwrap()), (2020, 5, 6));
        assert_eq!(civil(t.civil_day(slot(&t, 2020, 4, true), 14).unwrap()), (2020, 6, 5));
    }

    #[test]
    fn month_days_reference() {
        // The 12th month of 2018 lives in the 2019 table.
        let t = table(2019);
        assert_eq!(t.month_length(slot(&t, 2018, 12, false)), 30);
        assert_eq!(table(2018).slot_of(2018, 12, false), None);
    }

    #[test]
    fn month_lengths_are_29_or_30() {
        for year in [1600, 1800, 1900, 1984, 2000, 2017, 2020, 2033, 2100, 2500] {
            let t = table(year);
            for len in t.month_lengths() {
                assert!(len == 29 || len == 30, "{year}: {len}");
            }
            let leaps = t.month_codes().iter().filter(|c| c.is_leap()).count();
            assert!(leaps <= 1, "{year}: {leaps} leap months");
        }
    }

    #[test]
    fn closing_slot_follows_the_leap() {
        assert_eq!(table(2020).closing_slot(), 13);
        assert_eq!(table(2021).closing_slot(), 12);
        let t = table(2020);
        assert_eq!(t.month_codes()[t.closing_slot()], MonthCode::regular(12));
    }

    #[test]
    fn slot_lookup_misses() {
        let t = table(2021);
        assert_eq!(t.slot_of(2021, 4, true), None);
        assert_eq!(t.slot_of(2021, 13, false), None);
        assert_eq!(t.slot_of(2021, 11, false), None);
        assert_eq!(t.slot_of(2020, 11, false), Some(0));
        let t = table(2020);
        assert_eq!(t.slot_of(2020, 5, true), None);
        assert_eq!(t.slot_of(2020, 4, true), Some(6));
    }

    #[test]
    fn day_out_of_range_reports_month_length() {
        let t = table(2021);
        let s = slot(&t, 2021, 1, false);
        let len = t.month_length(s);
        assert_eq!(
            t.civil_day(s, len + 1),
            Err(CalendarError::DayOutOfRange { day: len + 1, max: len })
        );
        assert!(t.civil_day(s, 0).is_err());
    }

    #[test]
    fn lunar_date_lookup() {
        let t = table(2021);
        let n = crate::julian_day(2021, 2, 12, 0, 0, 0, 0)
            .unwrap()
            .day_number(Days::new(0.0));
        let ld = t.lunar_date(n).unwrap();
        assert_eq!(
            ld,
            LunarDate {
                year: 2021,
                month: 1,
                day: 1,
                is_leap_month: false
            }
        );
        assert_eq!(ld.to_string(), "2021-01-01");
        let closing = t.new_moons()[t.closing_slot()].day_number(china());
        assert!(t.ends_before(closing));
        assert!(t.lunar_date(closing).is_none());
        assert!(t.lunar_date(closing - 1).is_some());
    }

    #[test]
    fn window_is_aligned_on_the_solstice_month() {
        let qi = principal_terms_since_winter_solstice(2021).unwrap();
        let nm = new_moons_since_winter_solstice(2021, qi[0], china()).unwrap();
        assert!(nm[0].day_number(china()) <= qi[0].day_number(china()));
        assert!(nm[1].day_number(china()) > qi[0].day_number(china()));
    }

    #[test]
    fn solstice_and_new_moon_on_one_ut_day_split_in_zone() {
        // Dongzhi 2033 is Dec 21 at 21:4x local; the next new moon is
        // Dec 22 at 02:4x local, the same UT day.
        let qi = principal_terms_since_winter_solstice(2034).unwrap();
        let nm = new_moons_since_winter_solstice(2034, qi[0], china()).unwrap();
        assert_eq!(civil(nm[0] + china()), (2033, 11, 22));
        assert_eq!(civil(nm[1] + china()), (2033, 12, 22));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserialize_rejects_out_of_table_ordinal() {
        let code: MonthCode = serde_json::from_str(r#"{"ordinal":5,"leap":true}"#).unwrap();
        assert_eq!(code, MonthCode::leap(5));
        let err = serde_json::from_str::<MonthCode>(r#"{"ordinal":15,"leap":false}"#).unwrap_err();
        assert!(err.to_string().contains("invalid month ordinal"), "{err}");
    }
}
