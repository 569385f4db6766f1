// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! # ΔT (Delta T): dynamical minus universal time
//!
//! This module implements the piecewise polynomial expressions for
//! **ΔT = TT − UT** published by Espenak & Meeus for the *Five Millennium
//! Canon of Solar Eclipses* (NASA/TP-2006-214141), keyed by civil year and
//! month.
//!
//! ## Integration with the calendar engines
//!
//! The solar-term and new-moon series produce instants on the dynamical
//! [`JDE`](super::JDE) axis. ΔT, converted to days with [`delta_t_days`], is
//! subtracted from those instants before any day-boundary comparison.
//!
//! ## Lunar acceleration correction
//!
//! The polynomials assume a secular lunar acceleration of −26″/cy², whereas
//! the ELP-2000/82 lunar theory uses −25.858″/cy². Outside 1955–2005 (where
//! ΔT was measured independently of any lunar ephemeris) the correction
//! `c = −0.000012932·(y − 1955)²` seconds is added.
//!
//! ## Valid Time Range
//! Years −1999 ..= 3000. Outside that range the functions return
//! [`CalendarError::DeltaTOutOfRange`]; nothing is clamped.

use qtty::{Day, Days, Seconds};

use crate::error::CalendarError;

/// First year covered by the polynomials.
pub const DELTA_T_MIN_YEAR: i32 = -1999;
/// Last year covered by the polynomials.
pub const DELTA_T_MAX_YEAR: i32 = 3000;

/// Evaluate `c[0] + c[1]·t + c[2]·t² + …` by Horner's rule.
#[inline]
fn horner(t: f64, coeffs: &[f64]) -> f64 {
    coeffs.iter().rev().fold(0.0, |acc, &c| acc * t + c)
}

/// Long-term parabola `−20 + 32·u²`, u in centuries since 1820.
#[inline]
fn long_term_parabola(y: f64) -> f64 {
    let u = (y - 1820.0) / 100.0;
    -20.0 + 32.0 * u * u
}

// ------------------------------------------------------------------------------------
// ΔT Approximation Sections by Era
// ------------------------------------------------------------------------------------

/// **Years 500 BCE – 500 CE**
#[inline]
fn delta_t_antiquity(y: f64) -> f64 {
    const C: [f64; 7] = [
        10_583.6,
        -1_014.41,
        33.783_11,
        -5.952_053,
        -0.179_845_2,
        0.022_174_192,
        0.009_031_652_1,
    ];
    horner(y / 100.0, &C)
}

/// **Years 500 – 1600**
#[inline]
fn delta_t_medieval(y: f64) -> f64 {
    const C: [f64; 7] = [
        1_574.2,
        -556.01,
        71.234_72,
        0.319_781,
        -0.850_346_3,
        -0.005_050_998,
        0.008_357_207_3,
    ];
    horner((y - 1000.0) / 100.0, &C)
}

/// **Years 1600 – 1900**, telescopic era.
#[inline]
fn delta_t_telescopic(year: i32, y: f64) -> f64 {
    match year {
        ..=1699 => horner(y - 1600.0, &[120.0, -0.9808, -0.01532, 1.0 / 7_129.0]),
        ..=1799 => horner(
            y - 1700.0,
            &[8.83, 0.1603, -0.005_928_5, 0.000_133_36, -1.0 / 1_174_000.0],
        ),
        ..=1859 => horner(
            y - 1800.0,
            &[
                13.72,
                -0.332_447,
                0.006_861_2,
                0.004_111_6,
                -0.000_374_36,
                0.000_012_127_2,
                -0.000_000_169_9,
                0.000_000_000_875,
            ],
        ),
        _ => horner(
            y - 1860.0,
            &[
                7.62,
                0.5737,
                -0.251_754,
                0.016_806_68,
                -0.000_447_362_4,
                1.0 / 233_174.0,
            ],
        ),
    }
}

/// **Years 1900 – 2005**, instrumental era.
#[inline]
fn delta_t_modern(year: i32, y: f64) -> f64 {
    match year {
        ..=1919 => horner(
            y - 1900.0,
            &[-2.79, 1.494_119, -0.059_893_9, 0.006_196_6, -0.000_197],
        ),
        ..=1940 => horner(y - 1920.0, &[21.2, 0.844_93, -0.0761, 0.002_093_6]),
        ..=1960 => horner(y - 1950.0, &[29.07, 0.407, -1.0 / 233.0, 1.0 / 2_547.0]),
        ..=1985 => horner(y - 1975.0, &[45.45, 1.067, -1.0 / 260.0, -1.0 / 718.0]),
        _ => horner(
            y - 2000.0,
            &[
                63.86,
                0.3345,
                -0.060_374,
                0.001_727_5,
                0.000_651_814,
                0.000_023_735_99,
            ],
        ),
    }
}

/// **Years 2005 onward**, extrapolated.
#[inline]
fn delta_t_future(year: i32, y: f64) -> f64 {
    match year {
        ..=2049 => horner(y - 2000.0, &[62.92, 0.322_17, 0.005_589]),
        ..=2149 => long_term_parabola(y) - 0.5628 * (2150.0 - y),
        _ => long_term_parabola(y),
    }
}

/// Returns **ΔT** for the given civil year and month.
///
/// `month` is an ordinal counted from January of `year`; values outside
/// `1..=12` are accepted and shift the evaluation epoch into the neighbouring
/// year while keeping `year`'s polynomial, which is how the solar-term and
/// new-moon engines sample ΔT across a year boundary.
pub fn delta_t(year: i32, month: i32) -> Result<Seconds, CalendarError> {
    if !(DELTA_T_MIN_YEAR..=DELTA_T_MAX_YEAR).contains(&year) {
        return Err(CalendarError::DeltaTOutOfRange { year });
    }

    let y = year as f64 + (month as f64 - 0.5) / 12.0;

    let mut dt = match year {
        ..=-500 => long_term_parabola(year as f64),
        ..=499 => delta_t_antiquity(y),
        ..=1599 => delta_t_medieval(y),
        ..=1899 => delta_t_telescopic(year, y),
        ..=2004 => delta_t_modern(year, y),
        _ => delta_t_future(year, y),
    };

    if !(1955..2005).contains(&year) {
        dt += -0.000_012_932 * (y - 1955.0) * (y - 1955.0);
    }

    Ok(Seconds::new(dt))
}

/// ΔT expressed in days.
#[inline]
pub fn delta_t_days(year: i32, month: i32) -> Result<Days, CalendarError> {
    Ok(delta_t(year, month)?.to::<Day>())
}

/// ΔT expressed in minutes.
#[inline]
pub fn delta_t_minutes(year: i32, month: i32) -> Result<f64, CalendarError> {
    Ok(delta_t(year, month)?.value() / 60.0)
}
