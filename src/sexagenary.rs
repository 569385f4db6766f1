// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Sexagenary (干支) pillars of years, months, days and two-hour periods.
//!
//! Each pillar is a position in the 60-step cycle formed by pairing the ten
//! heavenly stems with the twelve earthly branches. The four cycles run
//! independently:
//!
//! | Pillar | Changes at | Anchor |
//! |--------|------------|--------|
//! | year   | Lichun (立春), by civil day | `(year + 4736) mod 60` |
//! | month  | each sectional term (节), by civil day | `(year + 4712)·12 + n + 50` |
//! | day    | 23:00 local time | `⌊JD + 0.5 + 1/24⌋ + 49` |
//! | hour   | odd hours | `⌊12·(JD + 0.5 + 1/24)⌋ + 48` |
//!
//! With the night-Zi convention (夜子时) the hour from 23:00 to midnight
//! keeps the current day's pillar.

use qtty::Days;

use crate::civil::CivilDateTime;
use crate::error::CalendarError;
use crate::solar_term::minor_terms_since_lichun;
use crate::JulianDay;

/// 甲 乙 丙 丁 戊 己 庚 辛 壬 癸
pub const HEAVENLY_STEMS: [&str; 10] = ["甲", "乙", "丙", "丁", "戊", "己", "庚", "辛", "壬", "癸"];

/// 子 丑 寅 卯 辰 巳 午 未 申 酉 戌 亥
pub const EARTHLY_BRANCHES: [&str; 12] = [
    "子", "丑", "寅", "卯", "辰", "巳", "午", "未", "申", "酉", "戌", "亥",
];

/// Zodiac animals, one per earthly branch.
pub const ZODIAC_ANIMALS: [&str; 12] = [
    "鼠", "牛", "虎", "兔", "龙", "蛇", "马", "羊", "猴", "鸡", "狗", "猪",
];

/// A position in the sexagenary cycle.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "u8", into = "u8")
)]
pub struct GanZhi(u8);

impl GanZhi {
    /// Position `index` of the cycle, taken modulo 60.
    #[inline]
    pub const fn from_cycle_index(index: i64) -> Self {
        Self(index.rem_euclid(60) as u8)
    }

    /// The pillar with the given stem and branch. Stems and branches of
    /// different parity never pair up.
    pub fn from_stem_branch(stem: u8, branch: u8) -> Option<Self> {
        if stem >= 10 || branch >= 12 || stem % 2 != branch % 2 {
            return None;
        }
        Some(Self::from_cycle_index(6 * stem as i64 - 5 * branch as i64))
    }

    #[inline]
    pub const fn cycle_index(&self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn stem_index(&self) -> u8 {
        self.0 % 10
    }

    #[inline]
    pub const fn branch_index(&self) -> u8 {
        self.0 % 12
    }

    pub const fn stem_name(&self) -> &'static str {
        HEAVENLY_STEMS[self.stem_index() as usize]
    }

    pub const fn branch_name(&self) -> &'static str {
        EARTHLY_BRANCHES[self.branch_index() as usize]
    }

    pub const fn zodiac_name(&self) -> &'static str {
        ZODIAC_ANIMALS[self.branch_index() as usize]
    }

    /// The pillar one step earlier in the cycle.
    #[inline]
    pub const fn previous(&self) -> Self {
        Self::from_cycle_index(self.0 as i64 - 1)
    }
}

impl TryFrom<u8> for GanZhi {
    type Error = CalendarError;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        if index < 60 {
            Ok(Self(index))
        } else {
            Err(CalendarError::InvalidCycleIndex { index })
        }
    }
}

impl From<GanZhi> for u8 {
    fn from(gz: GanZhi) -> u8 {
        gz.0
    }
}

impl std::fmt::Display for GanZhi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.stem_name(), self.branch_name())
    }
}

/// Year, month, day and hour pillars of one instant.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FourPillars {
    pub year: GanZhi,
    pub month: GanZhi,
    pub day: GanZhi,
    pub hour: GanZhi,
}

impl std::fmt::Display for FourPillars {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {} {}", self.year, self.month, self.day, self.hour)
    }
}

/// Year pillar of a (solar or lunar) year number.
#[inline]
pub const fn year_pillar(year: i32) -> GanZhi {
    GanZhi::from_cycle_index(year as i64 + 4712 + 24)
}

/// Month pillar of the `n`-th sectional month after the Xiaohan that closes
/// `year - 1` (n = 1 is the Lichun month).
#[inline]
pub const fn month_pillar(year: i32, n: i64) -> GanZhi {
    GanZhi::from_cycle_index((year as i64 + 4712) * 12 + (n - 1) + 50)
}

/// Julian Day shifted so that the day number changes at 23:00.
#[inline]
fn zi_shifted(jd: JulianDay) -> f64 {
    let jdn = jd.value() + 0.5;
    jdn.floor() + ((jdn - jdn.floor()) * 86_400.0 + 3_600.0) / 86_400.0
}

/// Day pillar; `jd` is read as local wall-clock time.
#[inline]
pub fn day_pillar(jd: JulianDay) -> GanZhi {
    GanZhi::from_cycle_index((zi_shifted(jd) + 49.0).floor() as i64)
}

/// Two-hour pillar; `jd` is read as local wall-clock time.
#[inline]
pub fn hour_pillar(jd: JulianDay) -> GanZhi {
    GanZhi::from_cycle_index((zi_shifted(jd) * 12.0 + 48.0).floor() as i64)
}

/// Four pillars of the local date-time `local`.
///
/// `utc_offset` places the sectional terms on local days; `minor_terms`
/// supplies [`minor_terms_since_lichun`] for a year, possibly from a cache.
pub fn four_pillars_with<F>(
    local: &CivilDateTime,
    utc_offset: Days,
    night_zi_hour: bool,
    mut minor_terms: F,
) -> Result<FourPillars, CalendarError>
where
    F: FnMut(i32) -> Result<[JulianDay; 16], CalendarError>,
{
    let jd = local.to_julian_day();
    let today = jd.day_number(Days::new(0.0));

    let mut year = local.year();
    let mut jie = minor_terms(year)?;
    if today < jie[1].day_number(utc_offset) {
        year -= 1;
        jie = minor_terms(year)?;
    }

    let next = jie
        .iter()
        .position(|t| t.day_number(utc_offset) > today)
        .ok_or(CalendarError::MonthAlignment { year })?;

    let mut day = day_pillar(jd);
    if night_zi_hour && local.hour() >= 23 {
        day = day.previous();
    }

    Ok(FourPillars {
        year: year_pillar(year),
        month: month_pillar(year, next as i64 - 1),
        day,
        hour: hour_pillar(jd),
    })
}

/// Four pillars of `local`, computing the sectional terms directly.
pub fn four_pillars(
    local: &CivilDateTime,
    utc_offset: Days,
    night_zi_hour: bool,
) -> Result<FourPillars, CalendarError> {
    four_pillars_with(local, utc_offset, night_zi_hour, minor_terms_since_lichun)
}
