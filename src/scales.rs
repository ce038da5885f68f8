// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Time scales.
//!
//! A time scale tells how its clocks read at a given physical [`Instant`]:
//! [`TimeScale::offset_from_tai`] is the scale reading minus the TAI reading
//! at that instant. The inverse direction,
//! [`TimeScale::offset_to_tai`], starts from a *reading* (date and time in
//! the scale) and returns the offset to add to the same reading taken as
//! TAI.
//!
//! # Constant-offset scales
//!
//! | Marker | Description | Reading − TAI |
//! |--------|-------------|---------------|
//! | [`TAI`] | International Atomic Time | 0 |
//! | [`TT`] | Terrestrial Time | +32.184 s |
//! | [`GPS`] | GPS Time | −19 s |
//! | [`GST`] | Galileo System Time | −19 s |
//! | [`QZSS`] | Quasi-Zenith Satellite System time | −19 s |
//! | [`NavIC`] | Indian regional navigation time | −19 s |
//! | [`BDT`] | BeiDou Time | −33 s |
//!
//! # Relativistic scales
//!
//! | Marker | Description |
//! |--------|-------------|
//! | [`TCG`] | Geocentric Coordinate Time (linear drift from TT) |
//! | [`TDB`] | Barycentric Dynamical Time (periodic terms around TT) |
//! | [`TCB`] | Barycentric Coordinate Time (linear drift from TDB) |
//!
//! The irregular UTC scale and GLONASS time, which is tied to it, are
//! [`UtcScale`](crate::UtcScale) and [`GlonassScale`](crate::GlonassScale).

use crate::clock::ClockTime;
use crate::date::CalendarDate;
use crate::instant::Instant;
use crate::offset::ExactOffset;
use std::fmt::Debug;

// ═══════════════════════════════════════════════════════════════════════════
// TimeScale trait
// ═══════════════════════════════════════════════════════════════════════════

/// Relation between a clock and TAI.
///
/// Only [`name`](TimeScale::name) and
/// [`offset_from_tai`](TimeScale::offset_from_tai) are required. Scales
/// whose clocks never leap keep the defaults of the leap-aware queries.
pub trait TimeScale: Debug + Send + Sync {
    /// Short label such as `"TT"` or `"UTC"`.
    fn name(&self) -> &'static str;

    /// Scale reading minus TAI reading at `instant`.
    fn offset_from_tai(&self, instant: Instant) -> ExactOffset;

    /// Offset to add to the reading `date`/`time` (interpreted as TAI) to
    /// obtain the instant it denotes in this scale.
    ///
    /// The default solves `offset = −offset_from_tai(reading + offset)` by
    /// eight fixed-point iterations, which is plenty for any scale drifting
    /// slowly against TAI.
    fn offset_to_tai(&self, date: CalendarDate, time: ClockTime) -> ExactOffset {
        let reference = Instant::tai_reading(date, time);
        let mut offset = ExactOffset::ZERO;
        for _ in 0..8 {
            offset = -self.offset_from_tai(reference + offset);
        }
        offset
    }

    /// Length in seconds of the minute containing `instant`.
    fn minute_duration(&self, _instant: Instant) -> u8 {
        60
    }

    /// Whether `instant` falls inside a leap, where readings exceed 60 s.
    fn inside_leap(&self, _instant: Instant) -> bool {
        false
    }

    /// Size of the leap in effect around `instant`.
    fn leap_at(&self, _instant: Instant) -> ExactOffset {
        ExactOffset::ZERO
    }
}

impl<S: TimeScale + ?Sized> TimeScale for &S {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn offset_from_tai(&self, instant: Instant) -> ExactOffset {
        (**self).offset_from_tai(instant)
    }

    fn offset_to_tai(&self, date: CalendarDate, time: ClockTime) -> ExactOffset {
        (**self).offset_to_tai(date, time)
    }

    fn minute_duration(&self, instant: Instant) -> u8 {
        (**self).minute_duration(instant)
    }

    fn inside_leap(&self, instant: Instant) -> bool {
        (**self).inside_leap(instant)
    }

    fn leap_at(&self, instant: Instant) -> ExactOffset {
        (**self).leap_at(instant)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Constant-offset scales (generated by macro)
// ═══════════════════════════════════════════════════════════════════════════

/// Generate a zero-sized marker whose reading differs from TAI by a fixed
/// `(seconds, attoseconds)` offset.
macro_rules! constant_offset_scale {
    ($(#[$meta:meta])* $name:ident, $label:literal, $seconds:expr, $attos:expr) => {
        $(#[$meta])*
        #[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
        pub struct $name;

        impl $name {
            /// Reading minus TAI reading.
            pub const OFFSET: ExactOffset = ExactOffset::new($seconds, $attos);
        }

        impl TimeScale for $name {
            #[inline]
            fn name(&self) -> &'static str {
                $label
            }

            #[inline]
            fn offset_from_tai(&self, _instant: Instant) -> ExactOffset {
                Self::OFFSET
            }

            #[inline]
            fn offset_to_tai(&self, _date: CalendarDate, _time: ClockTime) -> ExactOffset {
                -Self::OFFSET
            }
        }
    };
}

constant_offset_scale!(
    /// International Atomic Time, the uniform reference of this crate.
    TAI, "TAI", 0, 0
);

constant_offset_scale!(
    /// Terrestrial Time: `TT = TAI + 32.184 s`.
    TT, "TT", 32, 184_000_000_000_000_000
);

constant_offset_scale!(
    /// GPS Time: `GPS = TAI − 19 s`, aligned with UTC at 1980-01-06.
    GPS, "GPS", -19, 0
);

constant_offset_scale!(
    /// Galileo System Time, steered to GPS Time.
    GST, "GST", -19, 0
);

constant_offset_scale!(
    /// Quasi-Zenith Satellite System time, steered to GPS Time.
    QZSS, "QZSS", -19, 0
);

constant_offset_scale!(
    /// NavIC (IRNSS) system time, steered to GPS Time.
    NavIC, "NavIC", -19, 0
);

constant_offset_scale!(
    /// BeiDou Time, aligned with UTC at 2006-01-01: `BDT = TAI − 33 s`.
    BDT, "BDT", -33, 0
);

// ═══════════════════════════════════════════════════════════════════════════
// Relativistic scales
// ═══════════════════════════════════════════════════════════════════════════

/// IAU defining constant L_G (IAU 2000 Resolution B1.9): `dTT/dTCG = 1 − L_G`.
const L_G: f64 = 6.969_290_134e-10;

/// IAU defining constant L_B (IAU 2006 Resolution B3).
const L_B: f64 = 1.550_519_768e-8;

/// TDB₀ (IAU 2006 Resolution B3), in seconds.
const TDB_0: f64 = -6.55e-5;

/// TCG and TCB agree with TT at 1977-01-01T00:00:00 TAI
/// (1977-01-01T00:00:32.184 TT).
const COORDINATE_TIME_ORIGIN: Instant = Instant::from_epoch_offset(ExactOffset::new(
    -8_400 * 86_400 - 43_200,
    0,
));

/// Seconds in a Julian century.
const JULIAN_CENTURY_SECONDS: f64 = 36_525.0 * 86_400.0;

/// Geocentric Coordinate Time, the coordinate time of the GCRS.
///
/// ```text
/// TCG − TT = L_G / (1 − L_G) × (t − T₀)
/// ```
///
/// with T₀ = 1977-01-01T00:00:00 TAI.
///
/// ## References
/// * IAU 2000 Resolution B1.9
/// * IERS Conventions (2010), §1.2
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct TCG;

impl TimeScale for TCG {
    fn name(&self) -> &'static str {
        "TCG"
    }

    fn offset_from_tai(&self, instant: Instant) -> ExactOffset {
        let elapsed = instant.duration_from(COORDINATE_TIME_ORIGIN);
        TT::OFFSET + elapsed.multiply_f64(L_G / (1.0 - L_G))
    }
}

/// Compute TDB − TT in seconds using the Fairhead & Bretagnon (1990)
/// leading terms. Accuracy: better than 30 μs for |t| < 100 centuries.
///
/// `t` is in Julian centuries of TT from J2000.0.
fn tdb_minus_tt_seconds(t: f64) -> f64 {
    // Earth's mean anomaly (radians)
    let m_e = (357.5291092 + 35999.0502909 * t).to_radians();
    // Mean anomaly of Jupiter (radians)
    let m_j = (246.4512 + 3035.2335 * t).to_radians();
    // Mean elongation of the Moon from the Sun (radians)
    let d = (297.8502042 + 445267.1115168 * t).to_radians();
    // Mean longitude of lunar ascending node (radians)
    let om = (125.0445550 - 1934.1362091 * t).to_radians();

    0.001_657 * (m_e + 0.01671 * m_e.sin()).sin()
        + 0.000_022 * (d - m_e).sin()
        + 0.000_014 * (2.0 * d).sin()
        + 0.000_005 * m_j.sin()
        + 0.000_005 * om.sin()
}

/// Barycentric Dynamical Time.
///
/// TDB stays within ≈1.7 ms of TT; the periodic difference follows the
/// Fairhead & Bretagnon (1990) leading terms, as recommended by USNO
/// Circular 179 eq. 2.6.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct TDB;

impl TimeScale for TDB {
    fn name(&self) -> &'static str {
        "TDB"
    }

    fn offset_from_tai(&self, instant: Instant) -> ExactOffset {
        // TT seconds since J2000.0
        let tt_seconds = (instant.epoch_offset() + TT::OFFSET).to_seconds_f64();
        let t = tt_seconds / JULIAN_CENTURY_SECONDS;
        TT::OFFSET + ExactOffset::from_seconds_f64(tdb_minus_tt_seconds(t))
    }
}

/// Barycentric Coordinate Time, the coordinate time of the BCRS.
///
/// ```text
/// TCB − TDB = L_B / (1 − L_B) × (t − T₀) − TDB₀
/// ```
///
/// ## References
/// * IAU 2006 Resolution B3
/// * IERS Conventions (2010), §1.2
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct TCB;

impl TimeScale for TCB {
    fn name(&self) -> &'static str {
        "TCB"
    }

    fn offset_from_tai(&self, instant: Instant) -> ExactOffset {
        let elapsed = instant.duration_from(COORDINATE_TIME_ORIGIN);
        TDB.offset_from_tai(instant) + elapsed.multiply_f64(L_B / (1.0 - L_B))
            - ExactOffset::from_seconds_f64(TDB_0)
    }
}
