// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Day-axis markers.
//!
//! | Marker | Axis | Zero point (JD) |
//! |--------|------|-----------------|
//! | [`JD`] | civil Julian Day, the calendar axis | 0 |
//! | [`JDE`] | Julian Ephemeris Day, axis of the orbital series | 0 |
//! | [`MJD`] | Modified Julian Date | 2 400 000.5 |
//!
//! A civil date-time converted with [`julian_day`](crate::julian_day) lands
//! on [`JD`] unchanged: wall-clock time in the calendar zone is not moved to
//! UT first, and the zone offset is applied only at day-boundary comparisons.

use qtty::Days;

use super::instant::{Time, TimeScale};

/// Civil Julian Day.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct JD;

/// Julian Ephemeris Day.
///
/// Same origin as [`JD`]; values on this axis still include ΔT. ΔT depends
/// on the civil year and month (see [`delta_t`](crate::delta_t)), so the
/// solar-term and new-moon engines remove it themselves when they hand an
/// instant over to [`JD`].
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct JDE;

/// Modified Julian Date: days since 1858-11-17 00:00.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MJD;

impl TimeScale for JD {
    const LABEL: &'static str = "JD";
    const EPOCH: Days = Days::new(0.0);
}

impl TimeScale for JDE {
    const LABEL: &'static str = "JDE";
    const EPOCH: Days = Days::new(0.0);
}

impl TimeScale for MJD {
    const LABEL: &'static str = "MJD";
    const EPOCH: Days = Days::new(2_400_000.5);
}

/// `From` in both directions for each listed pair of axes.
macro_rules! convert_between {
    ($($a:ty => $b:ty),+ $(,)?) => {
        $(
            impl From<Time<$a>> for Time<$b> {
                #[inline]
                fn from(t: Time<$a>) -> Self {
                    t.to()
                }
            }

            impl From<Time<$b>> for Time<$a> {
                #[inline]
                fn from(t: Time<$b>) -> Self {
                    t.to()
                }
            }
        )+
    };
}

convert_between!(JD => JDE, JD => MJD, JDE => MJD);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mjd_zero_is_1858_11_17() {
        let jd: Time<JD> = Time::<MJD>::new(0.0).into();
        assert_eq!(jd.value(), 2_400_000.5);
        let dt = crate::calendar_from_julian_day(jd);
        assert_eq!((dt.year(), dt.month(), dt.day()), (1858, 11, 17));
    }

    #[test]
    fn jde_is_numerically_jd() {
        let jde = Time::<JDE>::new(2_459_293.899_717_597_3);
        let jd: Time<JD> = jde.into();
        assert_eq!(jd.value(), jde.value());
    }
}
