// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! True new moons (Meeus, *Astronomical Algorithms*, ch. 49).
//!
//! Lunations are counted from the first mean new moon of 2000
//! (2000-01-06 ~14:20 TT, `k = 0`). The mean phase is refined by a small
//! secular polynomial, then by the periodic terms in the Sun's and the Moon's
//! mean anomalies, the Moon's argument of latitude and the longitude of the
//! ascending node, and finally by the fourteen planetary arguments.

use qtty::{Days, Simplify};

use crate::JulianEphemerisDay;

/// Mean new moon with `k = 0`.
pub const LUNATION_EPOCH: JulianEphemerisDay = JulianEphemerisDay::new(2_451_550.097_650_462_8);

/// Mean synodic month.
pub const SYNODIC_MONTH: Days = Days::new(29.530_588_853);

/// Number of consecutive lunations kept around a year for month mapping.
pub const NEW_MOON_WINDOW: usize = 20;

/// Periodic terms of the new-moon correction as
/// `(coefficient, power of E, n·M', n·M, n·F, n·Ω)`.
#[rustfmt::skip]
const PHASE_TERMS: [(f64, i32, f64, f64, f64, f64); 25] = [
    (-0.407_20, 0, 1.0, 0.0, 0.0, 0.0),
    ( 0.172_41, 1, 0.0, 1.0, 0.0, 0.0),
    ( 0.016_08, 0, 2.0, 0.0, 0.0, 0.0),
    ( 0.010_39, 0, 0.0, 0.0, 2.0, 0.0),
    ( 0.007_39, 1, 1.0, -1.0, 0.0, 0.0),
    (-0.005_14, 1, 1.0, 1.0, 0.0, 0.0),
    ( 0.002_08, 2, 0.0, 2.0, 0.0, 0.0),
    (-0.001_11, 0, 1.0, 0.0, -2.0, 0.0),
    (-0.000_57, 0, 1.0, 0.0, 2.0, 0.0),
    ( 0.000_56, 1, 2.0, 1.0, 0.0, 0.0),
    (-0.000_42, 0, 3.0, 0.0, 0.0, 0.0),
    ( 0.000_42, 1, 0.0, 1.0, 2.0, 0.0),
    ( 0.000_38, 1, 0.0, 1.0, -2.0, 0.0),
    (-0.000_24, 1, 2.0, -1.0, 0.0, 0.0),
    (-0.000_17, 0, 0.0, 0.0, 0.0, 1.0),
    (-0.000_07, 0, 1.0, 2.0, 0.0, 0.0),
    ( 0.000_04, 0, 2.0, 0.0, -2.0, 0.0),
    ( 0.000_04, 0, 0.0, 3.0, 0.0, 0.0),
    ( 0.000_03, 0, 1.0, 1.0, -2.0, 0.0),
    ( 0.000_03, 0, 2.0, 0.0, 2.0, 0.0),
    (-0.000_03, 0, 1.0, 1.0, 2.0, 0.0),
    ( 0.000_03, 0, 1.0, -1.0, 2.0, 0.0),
    (-0.000_02, 0, 1.0, -1.0, -2.0, 0.0),
    (-0.000_02, 0, 3.0, 1.0, 0.0, 0.0),
    ( 0.000_02, 0, 4.0, 0.0, 0.0, 0.0),
];

/// Planetary arguments as `(coefficient, A₀ (°), rate per lunation (°))`.
/// The first one also carries `−0.009173·T²`.
#[rustfmt::skip]
const PLANETARY_TERMS: [(f64, f64, f64); 14] = [
    (0.000_325, 299.77,  0.107_408), (0.000_165, 251.88,  0.016_321),
    (0.000_164, 251.83, 26.651_886), (0.000_126, 349.42, 36.412_478),
    (0.000_110,  84.66, 18.206_239), (0.000_062, 141.74, 53.303_771),
    (0.000_060, 207.14,  2.453_732), (0.000_056, 154.84,  7.306_860),
    (0.000_047,  34.52, 27.261_239), (0.000_042, 207.19,  0.121_824),
    (0.000_040, 291.34,  1.844_379), (0.000_037, 161.72, 24.198_154),
    (0.000_035, 239.56, 25.513_099), (0.000_023, 331.55,  3.592_518),
];

/// Mean (uncorrected) new moon of lunation `k`.
#[inline]
pub fn estimated_new_moon(k: i64) -> JulianEphemerisDay {
    LUNATION_EPOCH + SYNODIC_MONTH * k as f64
}

/// Lunation index `k` of the mean new moon at or before `jd`.
#[inline]
pub fn reference_month_index(jd: JulianEphemerisDay) -> i64 {
    ((jd - LUNATION_EPOCH) / SYNODIC_MONTH).simplify().value().floor() as i64
}

/// Instant of the true new moon of lunation `k`, on the dynamical axis.
pub fn true_new_moon(k: i64) -> JulianEphemerisDay {
    let nme = estimated_new_moon(k);
    let kf = k as f64;
    let t = nme.julian_centuries().value();
    let (t2, t3, t4) = (t * t, t * t * t, t * t * t * t);

    let mean_phase = nme.value() + 0.000_133_7 * t2 - 0.000_000_15 * t3 + 0.000_000_000_73 * t4;

    // Sun's mean anomaly, Moon's mean anomaly, argument of latitude, node.
    let m = 2.5534 + 29.105_356_69 * kf - 0.000_021_8 * t2 - 0.000_000_11 * t3;
    let ms = 201.5643 + 385.816_935_28 * kf + 0.010_743_8 * t2 + 0.000_012_39 * t3
        - 0.000_000_058 * t4;
    let f = 160.7108 + 390.670_502_74 * kf - 0.001_634_1 * t2 - 0.000_002_27 * t3
        + 0.000_000_011 * t4;
    let omega = 124.7746 - 1.563_755_8 * kf + 0.002_069_1 * t2 + 0.000_002_15 * t3;

    // Decreasing eccentricity of the Earth's orbit.
    let e = 1.0 - 0.002_516 * t - 0.000_007_4 * t2;

    let periodic: f64 = PHASE_TERMS
        .iter()
        .map(|&(coeff, e_power, n_ms, n_m, n_f, n_omega)| {
            let arg = n_ms * ms + n_m * m + n_f * f + n_omega * omega;
            coeff * e.powi(e_power) * arg.to_radians().sin()
        })
        .sum();

    let planetary: f64 = PLANETARY_TERMS
        .iter()
        .enumerate()
        .map(|(i, &(coeff, a0, rate))| {
            let secular = if i == 0 { -0.009_173 * t2 } else { 0.0 };
            coeff * (a0 + rate * kf + secular).to_radians().sin()
        })
        .sum();

    JulianEphemerisDay::new(mean_phase + periodic + planetary).rounded(10)
}
