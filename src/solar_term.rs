// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! # Solar terms
//!
//! The 24 solar terms divide the apparent path of the Sun into 15° steps,
//! starting from the vernal equinox (春分). For each year the engine builds
//! 26 consecutive instants so that a whole civil year is always covered:
//!
//! 1. the mean vernal equinox from Meeus' millennium polynomials (ch. 27);
//! 2. the tropical-year length as the distance to the following equinox;
//! 3. for each 15° step, the time offset obtained from the closed-form
//!    true-anomaly relation of a Kepler ellipse whose eccentricity and
//!    perihelion longitude drift slowly with time;
//! 4. optionally, the planetary [`perturbation`] and ΔT, which turn the mean
//!    dynamical instants ([`JDE`]) into civil instants ([`JD`]).
//!
//! Every instant is rounded to ten decimals of a day.

use std::f64::consts::PI;
use std::ops::RangeInclusive;

use qtty::Days;
use tracing::warn;

use crate::delta_t::delta_t_days;
use crate::error::CalendarError;
use crate::instant::{Time, TimeScale};
use crate::perturbation::perturbation;
use crate::scales::{JD, JDE};
use crate::{JulianDay, JulianEphemerisDay};

/// Number of instants in a [`SolarTermSet`]: 24 terms plus two that spill into
/// the following year.
pub const TERMS_PER_SET: usize = 26;

/// Names of the 24 solar terms, in vernal-equinox order.
pub const SOLAR_TERM_NAMES: [&str; 24] = [
    "春分", "清明", "谷雨", "立夏", "小满", "芒种", "夏至", "小暑", "大暑", "立秋", "处暑", "白露",
    "秋分", "寒露", "霜降", "立冬", "小雪", "大雪", "冬至", "小寒", "大寒", "立春", "雨水", "惊蛰",
];

/// One of the 24 solar terms, numbered from the vernal equinox.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SolarTerm {
    Chunfen,
    Qingming,
    Guyu,
    Lixia,
    Xiaoman,
    Mangzhong,
    Xiazhi,
    Xiaoshu,
    Dashu,
    Liqiu,
    Chushu,
    Bailu,
    Qiufen,
    Hanlu,
    Shuangjiang,
    Lidong,
    Xiaoxue,
    Daxue,
    Dongzhi,
    Xiaohan,
    Dahan,
    Lichun,
    Yushui,
    Jingzhe,
}

impl SolarTerm {
    /// All terms in vernal-equinox order.
    pub const ALL: [SolarTerm; 24] = [
        SolarTerm::Chunfen,
        SolarTerm::Qingming,
        SolarTerm::Guyu,
        SolarTerm::Lixia,
        SolarTerm::Xiaoman,
        SolarTerm::Mangzhong,
        SolarTerm::Xiazhi,
        SolarTerm::Xiaoshu,
        SolarTerm::Dashu,
        SolarTerm::Liqiu,
        SolarTerm::Chushu,
        SolarTerm::Bailu,
        SolarTerm::Qiufen,
        SolarTerm::Hanlu,
        SolarTerm::Shuangjiang,
        SolarTerm::Lidong,
        SolarTerm::Xiaoxue,
        SolarTerm::Daxue,
        SolarTerm::Dongzhi,
        SolarTerm::Xiaohan,
        SolarTerm::Dahan,
        SolarTerm::Lichun,
        SolarTerm::Yushui,
        SolarTerm::Jingzhe,
    ];

    /// Term at position `index` (taken modulo 24).
    #[inline]
    pub const fn from_index(index: usize) -> Self {
        Self::ALL[index % 24]
    }

    /// Position counted from the vernal equinox, 0..=23.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Chinese name of the term.
    #[inline]
    pub const fn name(self) -> &'static str {
        SOLAR_TERM_NAMES[self as usize]
    }

    /// Principal terms (中气) sit at even positions and decide month numbering;
    /// the odd positions are the sectional terms (节) that open each month.
    #[inline]
    pub const fn is_principal(self) -> bool {
        self.index() % 2 == 0
    }
}

impl std::fmt::Display for SolarTerm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Years over which the equinox polynomials were fitted.
const EQUINOX_FIT: RangeInclusive<i32> = -1000..=3000;

/// Mean instant of the March equinox of `year`.
///
/// The polynomial is most accurate between −1000 and 3000; outside that range
/// it is extrapolated with a warning, and it is refused beyond ±8000.
pub fn vernal_equinox(year: i32) -> Result<JulianEphemerisDay, CalendarError> {
    let jde = equinox_polynomial(year)?;
    if !EQUINOX_FIT.contains(&year) {
        warn!(year, "vernal equinox extrapolated outside -1000..=3000; accuracy degrades");
    }
    Ok(jde)
}

fn equinox_polynomial(year: i32) -> Result<JulianEphemerisDay, CalendarError> {
    if !(-8000..=8000).contains(&year) {
        return Err(CalendarError::EquinoxOutOfRange { year });
    }

    let jde = if (1000..=3000).contains(&year) {
        let m = (year as f64 - 2000.0) / 1000.0;
        2_451_623.809_84 + 365_242.374_04 * m + 0.051_69 * m.powi(2)
            - 0.004_11 * m.powi(3)
            - 0.000_57 * m.powi(4)
    } else {
        let m = year as f64 / 1000.0;
        1_721_139.291_89 + 365_242.137_4 * m + 0.061_34 * m.powi(2) + 0.001_11 * m.powi(3)
            - 0.000_71 * m.powi(4)
    };

    Ok(JulianEphemerisDay::new(jde).rounded(10))
}

/// Time since the equinox at which the Sun reaches each 15° step.
fn anomaly_offsets(year: i32, equinox: JulianEphemerisDay, tropical_year: Days) -> [f64; 26] {
    let t = equinox.julian_millennia().value();
    let e = 0.016_708_634_2 - 0.000_420_365_4 * t - 0.000_012_673_4 * t.powi(2)
        + 0.000_000_144_4 * t.powi(3)
        - 0.000_000_000_2 * t.powi(4)
        + 0.000_000_000_3 * t.powi(5);

    // Longitude of perihelion, degrees.
    let tt = year as f64 / 1000.0;
    let perihelion = (111.255_869_39 - 17.011_993_451_833_3 * tt - 0.044_091_890_166_673 * tt.powi(2)
        - 4.373_561_666_613_45e-4 * tt.powi(3)
        + 8.167_166_666_023_86e-6 * tt.powi(4))
    .to_radians();

    let step = 2.0 * PI / 24.0;
    let ty = tropical_year.value();
    let shape = ((1.0 - e) / (1.0 + e)).sqrt();

    let mut offsets = [0.0; 26];
    for (i, offset) in offsets.iter_mut().enumerate() {
        let mut theta = step * i as f64 + perihelion;
        let mut turns = 0.0;
        if theta > PI && theta <= 3.0 * PI {
            theta = 2.0 * PI - theta;
            turns = 1.0;
        } else if theta > 3.0 * PI {
            theta = 4.0 * PI - theta;
            turns = 2.0;
        }

        let eccentric = 2.0 * (shape * (theta / 2.0).tan()).atan();
        let kepler = e * (1.0 - e * e).sqrt() * theta.sin() / (1.0 + e * theta.cos());
        let f = (eccentric - kepler) * ty / (2.0 * PI);

        *offset = if turns > 0.0 { turns * ty - f } else { f };
    }
    offsets
}

/// ΔT sampling month for the term at `index`: two terms per month, from March.
#[inline]
fn delta_t_month(index: usize) -> i32 {
    (index as i32 + 1) / 2 + 3
}

/// Mean instant plus perturbation minus ΔT.
fn adjust(year: i32, index: usize, mean: JulianEphemerisDay) -> Result<JulianDay, CalendarError> {
    let civil = mean + perturbation(mean) - delta_t_days(year, delta_t_month(index))?;
    Ok(JulianDay::new(civil.value()).rounded(10))
}

/// 26 consecutive solar-term instants of one year, starting at the vernal
/// equinox.
///
/// On the [`JDE`] scale the instants are the unperturbed mean terms; on the
/// [`JD`] scale they carry the perturbation correction and ΔT has been
/// removed.
#[derive(Debug, Clone, PartialEq)]
pub struct SolarTermSet<S: TimeScale> {
    year: i32,
    instants: [Time<S>; TERMS_PER_SET],
}

impl<S: TimeScale> SolarTermSet<S> {
    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn instants(&self) -> &[Time<S>; TERMS_PER_SET] {
        &self.instants
    }

    /// Instant at position `index` (0 = vernal equinox), if `index < 26`.
    pub fn get(&self, index: usize) -> Option<Time<S>> {
        self.instants.get(index).copied()
    }

    /// Pairs each instant with its term.
    pub fn iter(&self) -> impl Iterator<Item = (SolarTerm, Time<S>)> + '_ {
        self.instants
            .iter()
            .enumerate()
            .map(|(i, &t)| (SolarTerm::from_index(i), t))
    }
}

impl SolarTermSet<JDE> {
    /// Unperturbed mean solar terms of `year`.
    ///
    /// Logs a single warning when either bounding equinox is extrapolated.
    pub fn mean(year: i32) -> Result<Self, CalendarError> {
        let equinox = equinox_polynomial(year)?;
        let tropical_year = equinox_polynomial(year + 1)? - equinox;
        if !EQUINOX_FIT.contains(&year) || !EQUINOX_FIT.contains(&(year + 1)) {
            warn!(year, "solar terms extrapolated outside -1000..=3000; accuracy degrades");
        }
        let offsets = anomaly_offsets(year, equinox, tropical_year);

        let first = offsets[0];
        let instants = offsets.map(|f| (equinox + Days::new(f - first)).rounded(10));
        Ok(Self { year, instants })
    }
}

impl SolarTermSet<JD> {
    /// Solar terms of `year` corrected for perturbation and ΔT.
    pub fn adjusted(year: i32) -> Result<Self, CalendarError> {
        let mean = SolarTermSet::<JDE>::mean(year)?;
        let mut instants = [JulianDay::new(0.0); TERMS_PER_SET];
        for (i, slot) in instants.iter_mut().enumerate() {
            *slot = adjust(year, i, mean.instants[i])?;
        }
        Ok(Self { year, instants })
    }
}

/// Adjusted instants of `year` for the positions in `range`, in order.
///
/// Positions past the end of the set are ignored.
pub fn adjusted_solar_terms(
    year: i32,
    range: RangeInclusive<usize>,
) -> Result<Vec<JulianDay>, CalendarError> {
    let mean = SolarTermSet::<JDE>::mean(year)?;
    range
        .filter(|&i| i < TERMS_PER_SET)
        .map(|i| adjust(year, i, mean.instants[i]))
        .collect()
}

/// The prior year's terms from the winter solstice to the Jingzhe, positions
/// 18..=23.
pub fn last_year_solar_terms(year: i32) -> Result<Vec<JulianDay>, CalendarError> {
    adjusted_solar_terms(year - 1, 18..=23)
}

/// Sixteen consecutive principal terms (中气) starting at the winter
/// solstice of `year - 1`.
///
/// Entry 0 is the prior winter solstice and entry 12 the winter solstice of
/// `year`.
pub fn principal_terms_since_winter_solstice(year: i32) -> Result<[JulianDay; 16], CalendarError> {
    interleave(year, 0)
}

/// Sixteen consecutive sectional terms (节) starting at the Xiaohan of `year`.
///
/// Entry 1 is the Lichun (立春) of `year`, at which the year pillar changes.
pub fn minor_terms_since_lichun(year: i32) -> Result<[JulianDay; 16], CalendarError> {
    interleave(year, 1)
}

/// Every other term, `parity` selecting principal (0) or sectional (1)
/// positions: three from the prior year's tail, then thirteen from `year`.
fn interleave(year: i32, parity: usize) -> Result<[JulianDay; 16], CalendarError> {
    let last = last_year_solar_terms(year)?;
    let current = SolarTermSet::<JD>::adjusted(year)?;

    let mut out = [JulianDay::new(0.0); 16];
    let tail = last.iter().skip(parity).step_by(2);
    let head = current.instants().iter().skip(parity).step_by(2);
    for (slot, jd) in out.iter_mut().zip(tail.chain(head)) {
        *slot = *jd;
    }
    Ok(out)
}

/// The 26 terms shown for a civil year: the prior year's winter solstice
/// through the Xiaohan that opens the next year.
pub fn year_solar_terms(year: i32) -> Result<Vec<(SolarTerm, JulianDay)>, CalendarError> {
    let mut jds = last_year_solar_terms(year)?;
    jds.extend(adjusted_solar_terms(year, 0..=19)?);
    Ok(jds
        .into_iter()
        .enumerate()
        .map(|(i, jd)| (SolarTerm::from_index(i + 18), jd))
        .collect())
}
