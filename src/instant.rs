// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Instants on a typed day axis.
//!
//! A [`Time<S>`] is a count of [`Days`] whose zero point and meaning are
//! fixed by the marker `S`. The solar-term and new-moon series produce
//! [`JDE`](super::JDE) values; after ΔT has been removed they become
//! [`JD`](super::JD) values, and only those are ever compared against civil
//! days. Mixing the two is a type error.

use std::cmp::Ordering;
use std::fmt;
use std::marker::PhantomData;
use std::ops::{Add, Sub};

use qtty::Days;

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A day axis: a label and the Julian Day of its zero point.
pub trait TimeScale: Copy + fmt::Debug + PartialEq + 'static {
    /// Short name used when formatting.
    const LABEL: &'static str;

    /// Julian Day at which values on this axis are zero.
    const EPOCH: Days;
}

/// A point on the day axis `S`.
pub struct Time<S: TimeScale> {
    days: Days,
    scale: PhantomData<S>,
}

impl<S: TimeScale> Time<S> {
    #[inline]
    pub const fn new(value: f64) -> Self {
        Self::from_days(Days::new(value))
    }

    #[inline]
    pub const fn from_days(days: Days) -> Self {
        Self {
            days,
            scale: PhantomData,
        }
    }

    /// Days since the axis' zero point.
    #[inline]
    pub const fn quantity(&self) -> Days {
        self.days
    }

    #[inline]
    pub const fn value(&self) -> f64 {
        self.days.value()
    }

    /// The same instant on axis `T`.
    #[inline]
    pub fn to<T: TimeScale>(&self) -> Time<T> {
        Time::from_days(self.days + S::EPOCH - T::EPOCH)
    }

    /// This instant with its value rounded to `decimals` digits of a day.
    ///
    /// Published solar-term and new-moon instants use ten digits (≈ 9 µs), so
    /// series noise never reaches a day-boundary comparison.
    #[inline]
    pub fn rounded(self, decimals: i32) -> Self {
        Self::new(round_to(self.value(), decimals))
    }
}

/// `x` rounded half away from zero to `decimals` decimal digits.
#[inline]
pub(crate) fn round_to(x: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (x * scale).round() / scale
}

impl<S: TimeScale> Clone for Time<S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S: TimeScale> Copy for Time<S> {}

impl<S: TimeScale> PartialEq for Time<S> {
    fn eq(&self, other: &Self) -> bool {
        self.days == other.days
    }
}

impl<S: TimeScale> PartialOrd for Time<S> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.days.partial_cmp(&other.days)
    }
}

impl<S: TimeScale> fmt::Debug for Time<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Time<{}>({})", S::LABEL, self.value())
    }
}

impl<S: TimeScale> fmt::Display for Time<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", S::LABEL, self.value())
    }
}

impl<S: TimeScale> Add<Days> for Time<S> {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Days) -> Self {
        Self::from_days(self.days + rhs)
    }
}

impl<S: TimeScale> Sub<Days> for Time<S> {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Days) -> Self {
        Self::from_days(self.days - rhs)
    }
}

/// Elapsed days between two instants of the same axis.
impl<S: TimeScale> Sub for Time<S> {
    type Output = Days;

    #[inline]
    fn sub(self, rhs: Self) -> Days {
        self.days - rhs.days
    }
}

// Serialised as the bare number of days; the axis is carried by the type.

#[cfg(feature = "serde")]
impl<S: TimeScale> Serialize for Time<S> {
    fn serialize<Ser: Serializer>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error> {
        self.value().serialize(serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de, S: TimeScale> Deserialize<'de> for Time<S> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        f64::deserialize(deserializer).map(Self::new)
    }
}
