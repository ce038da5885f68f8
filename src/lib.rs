// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Attosecond-exact instants, calendars and time scales.
//!
//! An [`Instant`] is an exact [`ExactOffset`] (whole seconds plus
//! attoseconds) from 2000-01-01T12:00:00 TAI. Time scales only say how their
//! clocks *read* at an instant, so converting between scales never loses
//! precision and the physical duration between two instants does not depend
//! on the scale they were read in.
//!
//! # Core types
//!
//! - [`ExactOffset`]: signed duration with attosecond resolution, NaN and
//!   infinities.
//! - [`CalendarDate`]: Julian/Gregorian calendar date.
//! - [`ClockTime`]: time of day with optional UTC offset, seconds up to 62
//!   for leap readings.
//! - [`CalendarDateTime`]: a clock reading, date and time together.
//! - [`Instant`]: physical point in time.
//! - [`TimeScale`]: trait mapping instants to readings and back.
//! - [`TangentInstant`]: instant plus a generic elapsed-seconds tangent.
//!
//! # Time scales
//!
//! | Scale | Type |
//! |-------|------|
//! | International Atomic Time | [`TAI`] |
//! | Terrestrial Time | [`TT`] |
//! | GPS, Galileo, QZSS, NavIC, BeiDou | [`GPS`], [`GST`], [`QZSS`], [`NavIC`], [`BDT`] |
//! | Geocentric / Barycentric Coordinate Time | [`TCG`], [`TCB`] |
//! | Barycentric Dynamical Time | [`TDB`] |
//! | Coordinated Universal Time | [`UtcScale`] |
//! | GLONASS Time | [`GlonassScale`] |
//!
//! # UTC
//!
//! [`UtcScale`] is built from a table of [`OffsetModel`] rows, typically read
//! from an IERS leap-second file, or from the embedded history with
//! [`UtcScale::with_default_history`]. Readings inside a leap go past
//! `23:59:59`:
//!
//! ```
//! use attochron::{ExactOffset, Instant, UtcScale};
//!
//! let utc = UtcScale::with_default_history()?;
//! let before = Instant::parse("2016-12-31T23:59:59", &utc)?;
//! let leap = before + ExactOffset::SECOND;
//! assert_eq!(leap.format(&utc, 3), "2016-12-31T23:59:60.000");
//! # Ok::<(), attochron::TimeError>(())
//! ```
//!
//! # Features
//!
//! - `serde`: `Serialize`/`Deserialize` for the value types.

pub(crate) mod clock;
pub(crate) mod date;
pub(crate) mod datetime;
pub(crate) mod error;
pub(crate) mod instant;
pub(crate) mod offset;
pub(crate) mod scales;
pub(crate) mod tangent;
pub(crate) mod utc;

// ── Re-exports ────────────────────────────────────────────────────────────

pub use clock::ClockTime;
pub use date::CalendarDate;
pub use datetime::CalendarDateTime;
pub use error::{TimeError, TimeResult};
pub use instant::Instant;
pub use offset::{ExactOffset, TimeUnit};
pub use scales::{TimeScale, BDT, GPS, GST, NavIC, QZSS, TAI, TCB, TCG, TDB, TT};
pub use tangent::{Elapsed, TangentInstant};
pub use utc::{default_leap_second_history, GlonassScale, LeapEntry, OffsetModel, UtcScale};
