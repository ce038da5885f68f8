// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Scale-independent physical instants.
//!
//! [`Instant`] stores a single [`ExactOffset`] measured from the internal
//! epoch 2000-01-01T12:00:00 TAI along the uniform TAI axis. Nothing about
//! time scales is stored: the same instant reads differently in UTC, TT or
//! GPS time, and the conversions go through a [`TimeScale`]:
//!
//! ```text
//! reading ──offset_to_tai──▶ Instant ──offset_from_tai──▶ reading
//! ```
//!
//! Two kinds of differences exist and must not be confused:
//!
//! - [`Instant::duration_from`] is the physical elapsed time, identical in
//!   every scale;
//! - [`Instant::offset_from`] is the difference between clock readings in a
//!   given scale, which for UTC differs from the former across a leap.
//!
//! [`Instant::PAST_INFINITY`] and [`Instant::FUTURE_INFINITY`] are ordinary
//! values: they compare like any other instant and absorb finite shifts.

use crate::clock::{out_of_range_seconds, ClockTime};
use crate::date::CalendarDate;
use crate::datetime::CalendarDateTime;
use crate::error::TimeResult;
use crate::offset::ExactOffset;
use crate::scales::{TimeScale, BDT, GPS, GST, TAI, TT};
use crate::utc::UtcScale;
use chrono::{DateTime, Utc};
use qtty::{Centuries, Days};
use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};

/// Seconds from the internal epoch (noon) back to midnight.
const HALF_DAY: ExactOffset = ExactOffset::new(43_200, 0);

/// One Besselian year (tropical year at B1900) in seconds.
const BESSELIAN_YEAR_SECONDS: f64 = 365.242_198_781 * 86_400.0;

/// One Julian year in seconds.
const JULIAN_YEAR_SECONDS: f64 = 365.25 * 86_400.0;

/// One Julian century in seconds.
const JULIAN_CENTURY_SECONDS: f64 = 36_525.0 * 86_400.0;

// ═══════════════════════════════════════════════════════════════════════════
// Instant
// ═══════════════════════════════════════════════════════════════════════════

/// A physical instant.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Instant {
    offset: ExactOffset,
}

impl Instant {
    /// Sentinel before every other instant.
    pub const PAST_INFINITY: Self = Self::from_epoch_offset(ExactOffset::NEGATIVE_INFINITY);

    /// Sentinel after every other instant.
    pub const FUTURE_INFINITY: Self = Self::from_epoch_offset(ExactOffset::POSITIVE_INFINITY);

    // ── constructors ──────────────────────────────────────────────────

    /// Instant `offset` after 2000-01-01T12:00:00 TAI.
    #[inline]
    pub const fn from_epoch_offset(offset: ExactOffset) -> Self {
        Self { offset }
    }

    /// Instant denoted by `reading` in `scale`.
    pub fn from_calendar<S: TimeScale + ?Sized>(reading: &CalendarDateTime, scale: &S) -> Self {
        Self::from_components(reading.date(), reading.time(), scale)
    }

    /// Instant denoted by the date and time of day in `scale`.
    pub fn from_components<S: TimeScale + ?Sized>(
        date: CalendarDate,
        time: ClockTime,
        scale: &S,
    ) -> Self {
        Self::tai_reading(date, time) + scale.offset_to_tai(date, time)
    }

    /// Parse an ISO-8601 reading (see [`CalendarDateTime::parse`]) in `scale`.
    pub fn parse<S: TimeScale + ?Sized>(text: &str, scale: &S) -> TimeResult<Self> {
        Ok(Self::from_calendar(&CalendarDateTime::parse(text)?, scale))
    }

    /// The reading taken as TAI, UTC offset applied.
    pub(crate) fn tai_reading(date: CalendarDate, time: ClockTime) -> Self {
        Self::from_epoch_offset(
            ExactOffset::DAY * date.j2000_day() + time.seconds_in_utc_day() - HALF_DAY,
        )
    }

    /// Noon of Julian day `jd` in `scale`, shifted by `seconds_since_noon`.
    pub fn from_julian_day<S: TimeScale + ?Sized>(
        jd: i64,
        seconds_since_noon: ExactOffset,
        scale: &S,
    ) -> Self {
        let date = CalendarDate::JULIAN_EPOCH.shifted_by_days(jd);
        Self::from_components(date, ClockTime::H12, scale).shifted_by(seconds_since_noon)
    }

    /// Modified Julian day `mjd` plus `seconds_in_day` in `scale`.
    ///
    /// `seconds_in_day` may reach past 86 400 only when the last minute of
    /// that day is lengthened by a leap in `scale`.
    pub fn from_modified_julian_day<S: TimeScale + ?Sized>(
        mjd: i64,
        seconds_in_day: ExactOffset,
        scale: &S,
    ) -> TimeResult<Self> {
        let date = CalendarDate::from_mjd(mjd);
        if seconds_in_day < ExactOffset::DAY || seconds_in_day.is_nan() {
            let time = ClockTime::from_second_in_day(seconds_in_day)?;
            return Ok(Self::from_components(date, time, scale));
        }
        let second = seconds_in_day - ExactOffset::new(86_340, 0);
        let candidate = Self::from_components(date, ClockTime::new(23, 59, second)?, scale);
        let limit = ExactOffset::new(i64::from(scale.minute_duration(candidate)), 0);
        if second < limit {
            Ok(candidate)
        } else {
            Err(out_of_range_seconds(second, limit))
        }
    }

    /// Instant of a UTC `chrono` timestamp, leap seconds included.
    pub fn from_utc(datetime: DateTime<Utc>, utc: &UtcScale) -> Self {
        Self::from_calendar(&CalendarDateTime::from_naive(datetime.naive_utc()), utc)
    }

    // ── named epochs ──────────────────────────────────────────────────

    /// J2000.0: 2000-01-01T12:00:00 TT.
    pub fn j2000_epoch() -> Self {
        Self::from_components(CalendarDate::J2000_EPOCH, ClockTime::H12, &TT)
    }

    /// Origin of Julian days: -4712-01-01T12:00:00 TT.
    pub fn julian_epoch() -> Self {
        Self::from_components(CalendarDate::JULIAN_EPOCH, ClockTime::H12, &TT)
    }

    /// Origin of modified Julian days: 1858-11-17T00:00:00 TT.
    pub fn modified_julian_epoch() -> Self {
        Self::from_components(CalendarDate::MODIFIED_JULIAN_EPOCH, ClockTime::H00, &TT)
    }

    /// 1950-01-01T00:00:00 TT.
    pub fn fifties_epoch() -> Self {
        Self::from_components(CalendarDate::FIFTIES_EPOCH, ClockTime::H00, &TT)
    }

    /// Default CCSDS time code epoch: 1958-01-01T00:00:00 TAI.
    pub fn ccsds_epoch() -> Self {
        Self::from_components(CalendarDate::CCSDS_EPOCH, ClockTime::H00, &TAI)
    }

    /// Galileo System Time origin: 1999-08-22T00:00:00 GST.
    pub fn galileo_epoch() -> Self {
        Self::from_components(CalendarDate::GALILEO_EPOCH, ClockTime::H00, &GST)
    }

    /// GPS Time origin: 1980-01-06T00:00:00 GPS.
    pub fn gps_epoch() -> Self {
        Self::from_components(CalendarDate::GPS_EPOCH, ClockTime::H00, &GPS)
    }

    /// BeiDou Time origin: 2006-01-01T00:00:00 BDT.
    pub fn beidou_epoch() -> Self {
        Self::from_components(CalendarDate::BEIDOU_EPOCH, ClockTime::H00, &BDT)
    }

    /// 1970-01-01T00:00:00 TT.
    pub fn java_epoch() -> Self {
        Self::from_components(CalendarDate::JAVA_EPOCH, ClockTime::H00, &TT)
    }

    /// Besselian epoch, e.g. `1950.0` for B1950.0.
    ///
    /// Built from floating-point years, so only accurate to the microsecond.
    pub fn besselian_epoch(epoch: f64) -> Self {
        let seconds = BESSELIAN_YEAR_SECONDS * (epoch - 1900.0) + 86_400.0 * (0.31352 - 36_525.0);
        Self::j2000_epoch() + ExactOffset::from_seconds_f64(seconds)
    }

    /// Julian epoch, e.g. `2000.0` for J2000.0.
    pub fn julian_epoch_year(epoch: f64) -> Self {
        Self::j2000_epoch() + ExactOffset::from_seconds_f64(JULIAN_YEAR_SECONDS * (epoch - 2000.0))
    }

    // ── accessors ─────────────────────────────────────────────────────

    /// Offset from 2000-01-01T12:00:00 TAI.
    #[inline]
    pub const fn epoch_offset(&self) -> ExactOffset {
        self.offset
    }

    #[inline]
    pub const fn is_nan(&self) -> bool {
        self.offset.is_nan()
    }

    // ── arithmetic ────────────────────────────────────────────────────

    /// Instant `dt` later, whatever the scale.
    #[inline]
    pub fn shifted_by(&self, dt: ExactOffset) -> Self {
        Self::from_epoch_offset(self.offset + dt)
    }

    /// Physical elapsed time from `other` to `self`.
    #[inline]
    pub fn duration_from(&self, other: Self) -> ExactOffset {
        self.offset - other.offset
    }

    /// Difference between the readings of `self` and `other` in `scale`.
    ///
    /// Equal to [`duration_from`](Self::duration_from) for uniform scales;
    /// for UTC the leaps in between are not counted.
    pub fn offset_from<S: TimeScale + ?Sized>(&self, other: Self, scale: &S) -> ExactOffset {
        (self.offset + scale.offset_from_tai(*self)) - (other.offset + scale.offset_from_tai(other))
    }

    /// Reading in `first` minus reading in `second`, at this instant.
    pub fn time_scales_offset<A, B>(&self, first: &A, second: &B) -> ExactOffset
    where
        A: TimeScale + ?Sized,
        B: TimeScale + ?Sized,
    {
        first.offset_from_tai(*self) - second.offset_from_tai(*self)
    }

    /// Strictly between the two boundaries, given in either order.
    pub fn is_between(&self, boundary: Self, other_boundary: Self) -> bool {
        let (start, end) = if boundary < other_boundary {
            (boundary, other_boundary)
        } else {
            (other_boundary, boundary)
        };
        start < *self && *self < end
    }

    /// Between the two boundaries or equal to one of them.
    pub fn is_between_or_equal_to(&self, boundary: Self, other_boundary: Self) -> bool {
        self.is_between(boundary, other_boundary) || *self == boundary || *self == other_boundary
    }

    /// Earlier of the two instants.
    #[inline]
    pub fn min(self, other: Self) -> Self {
        if other < self {
            other
        } else {
            self
        }
    }

    /// Later of the two instants.
    #[inline]
    pub fn max(self, other: Self) -> Self {
        if other > self {
            other
        } else {
            self
        }
    }

    // ── readings ──────────────────────────────────────────────────────

    /// Date and time of day displayed in `scale` at this instant.
    ///
    /// Inside a UTC leap the seconds exceed 60. Past and future infinity
    /// read as the first and last representable dates; a NaN instant reads
    /// as `2000-01-01T12:00:NaN`.
    pub fn to_calendar<S: TimeScale + ?Sized>(&self, scale: &S) -> CalendarDateTime {
        if self.offset.is_infinite() {
            return infinite_reading(self.offset.is_negative());
        }
        let reading = self.offset + scale.offset_from_tai(*self);
        if reading.is_nan() {
            let time = ClockTime::raw(12, 0, ExactOffset::NAN, 0);
            return CalendarDateTime::new(CalendarDate::J2000_EPOCH, time);
        }
        if reading.is_infinite() {
            return infinite_reading(reading.is_negative());
        }
        let shifted = reading + HALF_DAY;
        let day = shifted.seconds().div_euclid(86_400);
        let second_in_day = shifted - ExactOffset::DAY * day;
        let leap = if scale.inside_leap(*self) {
            scale.leap_at(*self)
        } else {
            ExactOffset::ZERO
        };
        let minute_duration = scale.minute_duration(*self);
        let time = ClockTime::from_second_in_day_with_leap(second_in_day, leap, minute_duration)
            .unwrap_or_else(|_| ClockTime::split_standard_day(second_in_day, ExactOffset::ZERO));
        CalendarDateTime::new(CalendarDate::from_j2000_day(day), time)
    }

    /// Reading in `scale`, displayed on a local clock `minutes_from_utc`
    /// ahead.
    ///
    /// Only hours and minutes move; the seconds field is kept as is so leap
    /// readings survive the shift.
    pub fn to_calendar_with_offset<S: TimeScale + ?Sized>(
        &self,
        scale: &S,
        minutes_from_utc: i32,
    ) -> TimeResult<CalendarDateTime> {
        let base = self.to_calendar(scale);
        let time = base.time();
        let minute = time.minute() as i32 + minutes_from_utc;
        let hour = time.hour() as i32 + minute.div_euclid(60);
        let day_shift = hour.div_euclid(24);
        let local = ClockTime::with_utc_offset(
            hour.rem_euclid(24) as u32,
            minute.rem_euclid(60) as u32,
            time.second(),
            minutes_from_utc,
        )?;
        Ok(CalendarDateTime::new(
            base.date().shifted_by_days(i64::from(day_shift)),
            local,
        ))
    }

    /// `YYYY-MM-DDThh:mm:ss.fff` in `scale`, rounded without displaying a
    /// nonexistent seconds value.
    pub fn format<S: TimeScale + ?Sized>(&self, scale: &S, fraction_digits: usize) -> String {
        self.to_calendar(scale)
            .format_without_utc_offset(scale.minute_duration(*self), fraction_digits)
    }

    /// RFC-3339 text of the UTC reading.
    pub fn to_rfc3339(&self, utc: &UtcScale) -> String {
        self.to_calendar(utc).to_rfc3339()
    }

    /// UTC `chrono` timestamp; `None` outside `chrono`'s range or for NaN.
    pub fn to_utc(&self, utc: &UtcScale) -> Option<DateTime<Utc>> {
        self.to_calendar(utc).to_naive().map(|naive| naive.and_utc())
    }

    /// Julian day of the reading in `scale`.
    pub fn julian_day<S: TimeScale + ?Sized>(&self, scale: &S) -> Days {
        let origin = CalendarDateTime::new(CalendarDate::JULIAN_EPOCH, ClockTime::H12);
        Days::new(in_days(self.to_calendar(scale).offset_from(&origin)))
    }

    /// Modified Julian day of the reading in `scale`.
    pub fn modified_julian_day<S: TimeScale + ?Sized>(&self, scale: &S) -> Days {
        let origin = CalendarDateTime::from(CalendarDate::MODIFIED_JULIAN_EPOCH);
        Days::new(in_days(self.to_calendar(scale).offset_from(&origin)))
    }

    /// Julian centuries of TT since J2000.0 (used by precession, nutation
    /// and sidereal time models).
    pub fn julian_centuries(&self) -> Centuries {
        let tt_seconds = (self.offset + TT::OFFSET).to_seconds_f64();
        Centuries::new(tt_seconds / JULIAN_CENTURY_SECONDS)
    }
}

fn infinite_reading(negative: bool) -> CalendarDateTime {
    if negative {
        CalendarDateTime::new(CalendarDate::min_epoch(), ClockTime::H00)
    } else {
        let last = ClockTime::raw(23, 59, ExactOffset::new(59, 999_000_000_000_000_000), 0);
        CalendarDateTime::new(CalendarDate::max_epoch(), last)
    }
}

/// Days as `f64`, whole days kept apart from the fraction.
fn in_days(offset: ExactOffset) -> f64 {
    if !offset.is_finite() {
        return offset.to_seconds_f64() / 86_400.0;
    }
    let whole = offset.seconds().div_euclid(86_400);
    let rest = offset - ExactOffset::DAY * whole;
    whole as f64 + rest.to_seconds_f64() / 86_400.0
}

// ═══════════════════════════════════════════════════════════════════════════
// Trait implementations
// ═══════════════════════════════════════════════════════════════════════════

// ── Display ───────────────────────────────────────────────────────────────

impl fmt::Display for Instant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TAI {}", self.format(&TAI, f.precision().unwrap_or(3)))
    }
}

// ── Arithmetic ────────────────────────────────────────────────────────────

impl Add<ExactOffset> for Instant {
    type Output = Self;
    #[inline]
    fn add(self, rhs: ExactOffset) -> Self::Output {
        self.shifted_by(rhs)
    }
}

impl AddAssign<ExactOffset> for Instant {
    #[inline]
    fn add_assign(&mut self, rhs: ExactOffset) {
        self.offset += rhs;
    }
}

impl Sub<ExactOffset> for Instant {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: ExactOffset) -> Self::Output {
        self.shifted_by(-rhs)
    }
}

impl SubAssign<ExactOffset> for Instant {
    #[inline]
    fn sub_assign(&mut self, rhs: ExactOffset) {
        self.offset -= rhs;
    }
}

impl Sub for Instant {
    type Output = ExactOffset;
    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        self.duration_from(rhs)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════
