// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Planetary perturbation of the equinox and solstice instants.
//!
//! Meeus, *Astronomical Algorithms*, ch. 27: the mean instant of a solar term
//! is shifted by `0.00001·S / Δλ` days, where
//!
//! ```text
//! S  = Σ A·cos(B + C·T)            (24 terms, B and C in degrees)
//! Δλ = 1 + 0.0334·cos W + 0.0007·cos 2W
//! W  = 35999.373·T − 2.47          (degrees)
//! ```
//!
//! and `T` is counted in Julian centuries from J2000.0.

use qtty::Days;

use crate::JulianEphemerisDay;

/// Amplitude, phase (°) and rate (°/century) of each periodic term.
#[rustfmt::skip]
const TERMS: [(f64, f64, f64); 24] = [
    (485.0, 324.96,   1_934.136), (203.0, 337.23,  32_964.467),
    (199.0, 342.08,      20.186), (182.0,  27.85, 445_267.112),
    (156.0,  73.14,  45_036.886), (136.0, 171.52,  22_518.443),
    ( 77.0, 222.54,  65_928.934), ( 74.0, 296.72,   3_034.906),
    ( 70.0, 243.58,   9_037.513), ( 58.0, 119.81,  33_718.147),
    ( 52.0, 297.17,     150.678), ( 50.0,  21.02,   2_281.226),
    ( 45.0, 247.54,  29_929.562), ( 44.0, 325.15,  31_555.956),
    ( 29.0,  60.93,   4_443.417), ( 18.0, 155.12,  67_555.328),
    ( 17.0, 288.79,   4_562.452), ( 16.0, 198.04,  62_894.029),
    ( 14.0, 199.76,  31_436.921), ( 12.0,  95.39,  14_577.848),
    ( 12.0, 287.11,  31_931.756), ( 12.0, 320.81,  34_777.259),
    (  9.0, 227.73,   1_222.114), (  8.0,  15.45,  16_859.074),
];

/// Perturbation correction, in days, to add to a mean solar-term instant.
pub fn perturbation(jde: JulianEphemerisDay) -> Days {
    let t = jde.julian_centuries().value();

    let s: f64 = TERMS
        .iter()
        .map(|&(a, b, c)| a * (b + c * t).to_radians().cos())
        .sum();

    let w = (35_999.373 * t - 2.47).to_radians();
    let l = 1.0 + 0.0334 * w.cos() + 0.0007 * (2.0 * w).cos();

    Days::new(0.000_01 * s / l)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perturbation_reference_value() {
        let p = perturbation(JulianEphemerisDay::new(2_298_519.0));
        assert!((p - Days::new(-0.005_614_174_9)).abs() < Days::new(1e-9));
    }

    #[test]
    fn perturbation_is_bounded() {
        // Σ|A| = 1978 and Δλ ≥ 0.9673.
        for k in 0..200 {
            let jde = JulianEphemerisDay::new(2_000_000.0 + 3_652.5 * k as f64);
            assert!(perturbation(jde).abs() < Days::new(0.0216));
        }
    }
}
