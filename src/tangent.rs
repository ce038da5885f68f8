// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Instants carrying a generic elapsed-time tangent.
//!
//! Propagators that differentiate through time (dual numbers, Taylor
//! algebras, …) need the elapsed seconds to be of their own numeric type.
//! [`TangentInstant`] keeps the exact [`Instant`] for everything involving
//! calendars and leap seconds and stores the extra elapsed time as a `T`:
//!
//! ```text
//! time = anchor + tangent
//! ```
//!
//! Only [`Elapsed::value`] leaves the algebra; scale lookups always run on
//! the concrete instant.

use crate::datetime::CalendarDateTime;
use crate::instant::Instant;
use crate::offset::ExactOffset;
use crate::scales::TimeScale;
use std::fmt::Debug;
use std::ops::{Add, Neg, Sub};

/// Numeric type used for elapsed seconds in a [`TangentInstant`].
pub trait Elapsed:
    Copy + Debug + PartialEq + Add<Output = Self> + Sub<Output = Self> + Neg<Output = Self>
{
    /// Zero elapsed time.
    fn zero() -> Self;

    /// Constant element equal to `offset`, in seconds.
    fn from_offset(offset: ExactOffset) -> Self;

    /// Real part, in seconds.
    fn value(&self) -> f64;
}

impl Elapsed for f64 {
    #[inline]
    fn zero() -> Self {
        0.0
    }

    #[inline]
    fn from_offset(offset: ExactOffset) -> Self {
        offset.to_seconds_f64()
    }

    #[inline]
    fn value(&self) -> f64 {
        *self
    }
}

/// Exact anchor instant plus an elapsed-seconds tangent.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TangentInstant<T: Elapsed> {
    anchor: Instant,
    tangent: T,
}

impl<T: Elapsed> TangentInstant<T> {
    /// Wrap an instant with a zero tangent.
    pub fn new(anchor: Instant) -> Self {
        Self::with_tangent(anchor, T::zero())
    }

    pub fn with_tangent(anchor: Instant, tangent: T) -> Self {
        Self { anchor, tangent }
    }

    /// Exact part, without the tangent.
    #[inline]
    pub fn anchor(&self) -> Instant {
        self.anchor
    }

    #[inline]
    pub fn tangent(&self) -> T {
        self.tangent
    }

    /// Concrete instant, the tangent's real part folded in.
    pub fn instant(&self) -> Instant {
        self.anchor + ExactOffset::from_seconds_f64(self.tangent.value())
    }

    /// Shift by `dt` seconds. The anchor is left untouched.
    pub fn shifted_by(&self, dt: T) -> Self {
        Self::with_tangent(self.anchor, self.tangent + dt)
    }

    /// Elapsed seconds from `other` to `self`.
    ///
    /// Anchors are subtracted exactly before entering `T`, so close tangent
    /// instants far from J2000 keep their precision.
    pub fn duration_from(&self, other: &Self) -> T {
        T::from_offset(self.anchor.duration_from(other.anchor)) + (self.tangent - other.tangent)
    }

    /// Reading in `scale` of the concrete instant.
    pub fn to_calendar<S: TimeScale + ?Sized>(&self, scale: &S) -> CalendarDateTime {
        self.instant().to_calendar(scale)
    }
}

impl<T: Elapsed> From<Instant> for TangentInstant<T> {
    fn from(anchor: Instant) -> Self {
        Self::new(anchor)
    }
}
