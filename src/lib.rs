// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Chinese lunisolar calendar
//!
//! Conversion between civil (Gregorian / proleptic Julian) dates and the
//! Chinese lunisolar calendar, built on astronomical computations of the
//! 24 solar terms and of true new moons.
//!
//! # Core types
//!
//! - [`ChineseCalendar`]: the conversion facade, with per-year caches.
//! - [`CivilDateTime`]: a validated civil date-time.
//! - [`LunarDate`]: a date on the lunisolar calendar.
//! - [`FourPillars`] / [`GanZhi`]: sexagenary year, month, day and hour pillars.
//! - [`SolarTerm`]: the 24 solar terms, from Chunfen (春分).
//! - [`Time<S>`]: an instant on the day axis named by a [`TimeScale`] marker.
//!
//! # Time scales
//!
//! | Marker | Scale |
//! |--------|-------|
//! | [`JD`] | Julian Day, civil axis |
//! | [`JDE`] | Julian Ephemeris Day, dynamical axis |
//! | [`MJD`] | Modified Julian Date |
//!
//! # Pipeline
//!
//! ```text
//! civil date ─► julian_day ─┐
//!                           ├─► LunarYearTable ─► LunarDate
//! vernal_equinox ─► terms ──┤
//! true_new_moon ─► window ──┘
//! ```
//!
//! Solar terms and new moons are first computed on the [`JDE`] axis and
//! moved to [`JD`] by subtracting ΔT ([`delta_t`]). Day boundaries are
//! decided in the zone of [`CalendarConfig`], China Standard Time by default.
//!
//! ```
//! use lunisolar::{ChineseCalendar, CivilDateTime};
//!
//! let cal = ChineseCalendar::default();
//! let date = CivilDateTime::date(2020, 5, 6).unwrap();
//! let lunar = cal.gregorian_to_lunar(&date).unwrap();
//! assert_eq!(lunar.to_string(), "2020-04-14");
//! ```

mod cache;
mod calendar;
mod civil;
mod config;
pub mod delta_t;
mod error;
pub(crate) mod instant;
mod julian_date_ext;
pub mod month_table;
pub mod new_moon;
pub mod perturbation;
pub(crate) mod scales;
pub mod sexagenary;
pub mod solar_term;

// ── Re-exports ────────────────────────────────────────────────────────────

pub use cache::YearCache;
pub use calendar::{ChineseCalendar, DayInfo, SolarTermItem};
pub use civil::{calendar_from_julian_day, julian_day, CivilDateTime};
pub use config::{CalendarConfig, CHINA_UTC_OFFSET_SECONDS};
pub use delta_t::delta_t;
pub use error::CalendarError;
pub use instant::{Time, TimeScale};
pub use julian_date_ext::J2000;
pub use month_table::{LunarDate, LunarYearTable, MonthCode};
pub use scales::{JD, JDE, MJD};
pub use sexagenary::{FourPillars, GanZhi};
pub use solar_term::SolarTerm;

// ── Type aliases ──────────────────────────────────────────────────────────

/// Julian Day on the civil axis.
///
/// This is a type alias for [`Time<JD>`].
pub type JulianDay = Time<JD>;

/// Julian Ephemeris Day, the dynamical axis of the solar and lunar series.
///
/// This is a type alias for [`Time<JDE>`].
pub type JulianEphemerisDay = Time<JDE>;

/// Modified Julian Date, `JD − 2 400 000.5`.
///
/// This is a type alias for [`Time<MJD>`].
pub type ModifiedJulianDate = Time<MJD>;
