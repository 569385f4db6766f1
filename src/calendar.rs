// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! The conversion facade.
//!
//! [`ChineseCalendar`] ties the engines together and memoises everything
//! that depends on a year only: lunar year tables, sectional terms and the
//! yearly solar-term listing. Civil date-times passed in and returned are
//! wall-clock times in the configured zone.

use std::sync::Arc;

use crate::cache::YearCache;
use crate::civil::{calendar_from_julian_day, CivilDateTime};
use crate::config::CalendarConfig;
use crate::error::CalendarError;
use crate::month_table::{LunarDate, LunarYearTable};
use crate::sexagenary::{four_pillars_with, FourPillars};
use crate::solar_term::{minor_terms_since_lichun, year_solar_terms, SolarTerm};
use crate::JulianDay;

/// One solar term of a yearly listing.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolarTermItem {
    pub term: SolarTerm,
    /// Instant on the universal axis.
    pub instant: JulianDay,
    /// The same instant on the configured zone's wall clock.
    pub local: CivilDateTime,
}

impl std::fmt::Display for SolarTermItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.term, self.local)
    }
}

/// Everything the calendar knows about one civil day.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DayInfo {
    pub date: CivilDateTime,
    pub lunar: LunarDate,
    pub pillars: FourPillars,
    /// Solar term whose instant falls on this civil day, if any.
    pub solar_term: Option<SolarTerm>,
}

impl DayInfo {
    pub fn zodiac_name(&self) -> &'static str {
        self.lunar.year_pillar().zodiac_name()
    }
}

/// Chinese lunisolar calendar with per-year caches.
///
/// ```
/// use lunisolar::{ChineseCalendar, CivilDateTime};
///
/// let cal = ChineseCalendar::default();
/// let lunar = cal
///     .gregorian_to_lunar(&CivilDateTime::date(2021, 2, 12).unwrap())
///     .unwrap();
/// assert_eq!((lunar.year, lunar.month, lunar.day), (2021, 1, 1));
/// ```
#[derive(Debug)]
pub struct ChineseCalendar {
    config: CalendarConfig,
    tables: YearCache<Arc<LunarYearTable>>,
    minor_terms: YearCache<[JulianDay; 16]>,
    solar_terms: YearCache<Arc<Vec<SolarTermItem>>>,
}

impl Default for ChineseCalendar {
    fn default() -> Self {
        Self::new(CalendarConfig::default())
    }
}

impl ChineseCalendar {
    pub fn new(config: CalendarConfig) -> Self {
        Self {
            config,
            tables: YearCache::new("lunar-year-table"),
            minor_terms: YearCache::new("minor-terms"),
            solar_terms: YearCache::new("solar-terms"),
        }
    }

    pub fn config(&self) -> &CalendarConfig {
        &self.config
    }

    /// Lunar year table of `year`.
    pub fn year_table(&self, year: i32) -> Result<Arc<LunarYearTable>, CalendarError> {
        self.tables.get_or_try_insert_with(year, || {
            LunarYearTable::new(year, self.config.utc_offset()).map(Arc::new)
        })
    }

    /// Lunar date of the civil day containing `date`.
    pub fn gregorian_to_lunar(&self, date: &CivilDateTime) -> Result<LunarDate, CalendarError> {
        let today = date.to_julian_day().day_number(qtty::Days::new(0.0));
        let mut year = date.year();
        let mut table = self.year_table(year)?;
        if table.starts_after(today) {
            year -= 1;
            table = self.year_table(year)?;
        } else if table.ends_before(today) {
            year += 1;
            table = self.year_table(year)?;
        }
        table
            .lunar_date(today)
            .ok_or(CalendarError::MonthAlignment { year })
    }

    /// Table and slot of a lunar month. Months 11 and 12 of `year`, and a
    /// leap month after either, are numbered by the table of `year + 1`.
    fn month_slot(
        &self,
        year: i32,
        month: u32,
        is_leap_month: bool,
    ) -> Result<(Arc<LunarYearTable>, usize), CalendarError> {
        if !(1..=12).contains(&month) {
            return Err(CalendarError::InvalidLunarMonth { month });
        }
        let table = if month >= 11 {
            self.year_table(year + 1)?
        } else {
            self.year_table(year)?
        };
        if let Some(slot) = table.slot_of(year, month, is_leap_month) {
            return Ok((table, slot));
        }
        if !is_leap_month {
            return Err(CalendarError::MonthAlignment { year });
        }
        match self.leap_month(year)? {
            None => Err(CalendarError::NotALeapYear { year }),
            Some(leap_month) => Err(CalendarError::NotTheLeapMonth {
                year,
                month,
                leap_month,
            }),
        }
    }

    /// Civil date (local midnight) of a lunar date.
    pub fn lunar_to_gregorian(
        &self,
        year: i32,
        month: u32,
        day: u32,
        is_leap_month: bool,
    ) -> Result<CivilDateTime, CalendarError> {
        let (table, slot) = self.month_slot(year, month, is_leap_month)?;
        Ok(calendar_from_julian_day(table.civil_day(slot, day)?))
    }

    /// Number of days of a lunar month.
    pub fn lunar_month_days(
        &self,
        year: i32,
        month: u32,
        is_leap_month: bool,
    ) -> Result<u32, CalendarError> {
        let (table, slot) = self.month_slot(year, month, is_leap_month)?;
        Ok(table.month_length(slot))
    }

    /// Leap month of lunar `year`, if it has one.
    pub fn leap_month(&self, year: i32) -> Result<Option<u32>, CalendarError> {
        match self.year_table(year)?.leap_month() {
            Some(month) => Ok(Some(month)),
            None => Ok(self.year_table(year + 1)?.previous_year_leap_month()),
        }
    }

    /// The 26 solar terms from the winter solstice of `year - 1` to the
    /// Xiaohan of `year + 1`.
    pub fn solar_terms(&self, year: i32) -> Result<Arc<Vec<SolarTermItem>>, CalendarError> {
        self.solar_terms.get_or_try_insert_with(year, || {
            let offset = self.config.utc_offset();
            let items: Vec<SolarTermItem> = year_solar_terms(year)?
                .into_iter()
                .map(|(term, instant)| SolarTermItem {
                    term,
                    instant,
                    local: calendar_from_julian_day(instant + offset),
                })
                .collect();
            Ok(Arc::new(items))
        })
    }

    /// Year, month, day and hour pillars of `date`.
    pub fn sexagenary_cycle(&self, date: &CivilDateTime) -> Result<FourPillars, CalendarError> {
        four_pillars_with(
            date,
            self.config.utc_offset(),
            self.config.night_zi_hour,
            |year| {
                self.minor_terms
                    .get_or_try_insert_with(year, || minor_terms_since_lichun(year))
            },
        )
    }

    /// Solar term falling on the civil day of `date`.
    pub fn solar_term_on(&self, date: &CivilDateTime) -> Result<Option<SolarTerm>, CalendarError> {
        let same_day = |local: &CivilDateTime| {
            (local.year(), local.month(), local.day()) == (date.year(), date.month(), date.day())
        };
        Ok(self
            .solar_terms(date.year())?
            .iter()
            .find(|item| same_day(&item.local))
            .map(|item| item.term))
    }

    /// Lunar date, pillars and solar term of the civil day of `date`,
    /// computed in parallel.
    pub fn day_info(&self, date: &CivilDateTime) -> Result<DayInfo, CalendarError> {
        let (lunar, (pillars, solar_term)) = rayon::join(
            || self.gregorian_to_lunar(date),
            || rayon::join(|| self.sexagenary_cycle(date), || self.solar_term_on(date)),
        );
        Ok(DayInfo {
            date: *date,
            lunar: lunar?,
            pillars: pillars?,
            solar_term: solar_term?,
        })
    }
}
