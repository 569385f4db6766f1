// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Epoch arithmetic and civil day numbers.

use qtty::*;

use super::instant::{Time, TimeScale};
use super::scales::{JD, MJD};

/// J2000.0: 2000-01-01 12:00.
pub const J2000: Time<JD> = Time::new(2_451_545.0);

const DAYS_PER_CENTURY: Days = Days::new(36_525.0);
const DAYS_PER_MILLENNIUM: Days = Days::new(365_250.0);

impl<S: TimeScale> Time<S> {
    #[inline]
    fn since_j2000(&self) -> Days {
        self.to::<JD>() - J2000
    }

    /// Julian centuries since J2000.0.
    #[inline]
    pub fn julian_centuries(&self) -> Centuries {
        Centuries::new((self.since_j2000() / DAYS_PER_CENTURY).simplify().value())
    }

    /// Julian millennia since J2000.0.
    #[inline]
    pub fn julian_millennia(&self) -> Millennia {
        Millennia::new((self.since_j2000() / DAYS_PER_MILLENNIUM).simplify().value())
    }
}

impl Time<JD> {
    /// Number of the civil day containing this instant, seen from a zone
    /// `offset` ahead of the instant's own clock.
    ///
    /// Julian Days begin at noon; the extra half day moves the boundary to
    /// midnight. Month and day boundaries are decided on these integers,
    /// never on raw instants.
    #[inline]
    pub fn day_number(&self, offset: Days) -> i64 {
        (self.value() + 0.5 + offset.value()).floor() as i64
    }

    /// Midnight opening civil day `n`.
    #[inline]
    pub fn from_day_number(n: i64) -> Self {
        Self::new(n as f64 - 0.5)
    }

    #[inline]
    pub fn to_mjd(&self) -> Time<MJD> {
        self.to()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scales::JDE;

    #[test]
    fn centuries_and_millennia() {
        let t = Time::<JDE>::new(2_451_545.0 + 365_250.0);
        assert!((t.julian_millennia() - Millennia::new(1.0)).abs() < Millennia::new(1e-12));
        assert!((t.julian_centuries() - Centuries::new(10.0)).abs() < Centuries::new(1e-12));
        assert_eq!(J2000.julian_centuries().value(), 0.0);
    }

    #[test]
    fn day_number_changes_at_midnight() {
        let zero = Days::new(0.0);
        // 2021-12-06 00:00 is JD 2459554.5.
        assert_eq!(Time::<JD>::new(2_459_554.5).day_number(zero), 2_459_555);
        assert_eq!(Time::<JD>::new(2_459_555.499).day_number(zero), 2_459_555);
        assert_eq!(Time::<JD>::new(2_459_555.5).day_number(zero), 2_459_556);
        // 20:00 UT is already the next day at UTC+8.
        let evening = Time::<JD>::new(2_459_555.333_4);
        assert_eq!(evening.day_number(Days::new(8.0 / 24.0)), 2_459_556);
    }

    #[test]
    fn midnight_of_a_day_number() {
        let midnight = Time::<JD>::from_day_number(2_459_555);
        assert_eq!(midnight.value(), 2_459_554.5);
        assert_eq!(midnight.day_number(Days::new(0.0)), 2_459_555);
        assert_eq!(midnight.to_mjd().value(), 59_554.0);
    }
}
