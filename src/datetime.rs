// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Calendar date and clock time pairs.
//!
//! A [`CalendarDateTime`] is what a clock in some time scale displays. It
//! knows nothing about scales: differences between two readings are
//! *apparent* (leap-free) offsets, and converting to a physical instant
//! requires a [`TimeScale`](crate::TimeScale) through
//! [`Instant::from_calendar`](crate::Instant::from_calendar).

use crate::clock::ClockTime;
use crate::date::CalendarDate;
use crate::error::{TimeError, TimeResult};
use crate::offset::{ExactOffset, TimeUnit};
use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// `chrono`'s day number (from 0001-01-01, counted as day 1) of 2000-01-01.
const CE_DAYS_AT_J2000: i64 = 730_120;

/// Attoseconds per nanosecond.
const ATTOS_PER_NANO: u64 = 1_000_000_000;

/// A calendar date with a time of day.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CalendarDateTime {
    date: CalendarDate,
    time: ClockTime,
}

impl CalendarDateTime {
    #[inline]
    pub const fn new(date: CalendarDate, time: ClockTime) -> Self {
        Self { date, time }
    }

    /// Build a UTC-labelled reading from its fields.
    pub fn from_fields(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: ExactOffset,
    ) -> TimeResult<Self> {
        Ok(Self::new(
            CalendarDate::new(year, month, day)?,
            ClockTime::new(hour, minute, second)?,
        ))
    }

    #[inline]
    pub const fn date(&self) -> CalendarDate {
        self.date
    }

    #[inline]
    pub const fn time(&self) -> ClockTime {
        self.time
    }

    // ── apparent offsets ──────────────────────────────────────────────

    /// Clock-reading difference `self − other`, counting every day as
    /// 86 400 s and honouring both UTC offsets.
    ///
    /// This is not a physical duration: across a leap second the two
    /// differ.
    pub fn offset_from(&self, other: &Self) -> ExactOffset {
        ExactOffset::DAY * self.date.days_from(&other.date)
            + (self.time.seconds_in_utc_day() - other.time.seconds_in_utc_day())
    }

    /// [`offset_from`](Self::offset_from) as floating-point seconds.
    pub fn offset_seconds(&self, other: &Self) -> f64 {
        self.offset_from(other).to_seconds_f64()
    }

    /// [`offset_from`](Self::offset_from) rounded to a whole count of `unit`.
    pub fn offset_in_units(&self, other: &Self, unit: TimeUnit) -> i64 {
        self.offset_from(other).rounded_units(unit)
    }

    /// Reading shifted by `dt` on the apparent axis (86 400 s days, no
    /// leap), keeping the UTC offset.
    ///
    /// A non-finite shift yields a NaN seconds field.
    pub fn shifted_by(&self, dt: ExactOffset) -> Self {
        let mut seconds = self.time.seconds_in_local_day() + dt;
        if !seconds.is_finite() {
            let time = ClockTime::raw(0, 0, ExactOffset::NAN, self.time.minutes_from_utc());
            return Self::new(self.date, time);
        }
        let day_shift = seconds.seconds().div_euclid(86_400);
        seconds -= ExactOffset::DAY * day_shift;
        let split = ClockTime::split_standard_day(seconds, ExactOffset::ZERO);
        let time = ClockTime::raw(
            split.hour() as u8,
            split.minute() as u8,
            split.second(),
            self.time.minutes_from_utc(),
        );
        Self::new(self.date.shifted_by_days(day_shift), time)
    }

    /// Carry the seconds into the next minute when rounding them to
    /// `fraction_digits` would display `minute_duration` (e.g. `60.000`
    /// outside a leap, or `61.000` inside one).
    ///
    /// The rollover propagates through hour, day, month and year. Readings
    /// that do not need it are returned unchanged; rounding itself is left
    /// to the formatter.
    pub fn round_if_needed(&self, minute_duration: u8, fraction_digits: usize) -> Self {
        let rounded = self.time.second().round_to_digits(fraction_digits);
        if rounded < ExactOffset::new(i64::from(minute_duration), 0) || rounded.is_nan() {
            return *self;
        }
        let mut date = self.date;
        let mut hour = self.time.hour();
        let mut minute = self.time.minute() + 1;
        if minute > 59 {
            minute = 0;
            hour += 1;
            if hour > 23 {
                hour = 0;
                date = date.shifted_by_days(1);
            }
        }
        let time = ClockTime::raw(
            hour as u8,
            minute as u8,
            ExactOffset::ZERO,
            self.time.minutes_from_utc(),
        );
        Self::new(date, time)
    }

    // ── text ──────────────────────────────────────────────────────────

    /// Parse `date[Ttime]`; the date may use any form accepted by
    /// [`CalendarDate::parse`] and the time any form accepted by
    /// [`ClockTime::parse`]. A missing time means midnight UTC.
    pub fn parse(text: &str) -> TimeResult<Self> {
        let s = text.trim();
        match s.split_once('T') {
            Some((date, time)) => Ok(Self::new(
                CalendarDate::parse(date)?,
                ClockTime::parse(time)?,
            )),
            None => Ok(Self::new(CalendarDate::parse(s)?, ClockTime::H00)),
        }
    }

    /// `YYYY-MM-DDThh:mm:ss.fff+hh:mm`, rounded without ever displaying
    /// `minute_duration` as the seconds field.
    pub fn format(&self, minute_duration: u8, fraction_digits: usize) -> String {
        let rounded = self.round_if_needed(minute_duration, fraction_digits);
        format!("{}T{}", rounded.date, rounded.time.format(fraction_digits))
    }

    /// Same as [`format`](Self::format) without the UTC offset.
    pub fn format_without_utc_offset(&self, minute_duration: u8, fraction_digits: usize) -> String {
        let rounded = self.round_if_needed(minute_duration, fraction_digits);
        format!(
            "{}T{}",
            rounded.date,
            rounded.time.format_without_utc_offset(fraction_digits)
        )
    }

    /// RFC-3339 rendering: exact seconds with trailing zeros removed, `Z`
    /// for UTC and `±hh:mm` otherwise.
    pub fn to_rfc3339(&self) -> String {
        let time = if self.time.seconds_in_local_day().is_zero() {
            "00:00:00".to_string()
        } else {
            format!(
                "{:02}:{:02}:{}",
                self.time.hour(),
                self.time.minute(),
                self.time.second().format_decimal(None, 2)
            )
        };
        let zone = if self.time.minutes_from_utc() == 0 {
            "Z".to_string()
        } else {
            self.time.utc_offset_suffix()
        };
        format!("{}T{time}{zone}", self.date)
    }

    // ── chrono interop ────────────────────────────────────────────────

    /// Reading from a `chrono` naive date-time, taken as UTC.
    ///
    /// `chrono` counts days in the proleptic Gregorian calendar; the day is
    /// matched by number, so dates before 1582-10-15 come out in the Julian
    /// calendar used here. `chrono` leap seconds (nanoseconds ≥ 10⁹) become
    /// `hh:mm:60.xxx`.
    pub fn from_naive(value: NaiveDateTime) -> Self {
        let day = i64::from(value.date().num_days_from_ce()) - CE_DAYS_AT_J2000;
        let nanos = value.nanosecond();
        let second = ExactOffset::new(
            i64::from(value.second()),
            i64::from(nanos) * ATTOS_PER_NANO as i64,
        );
        let time = ClockTime::raw(value.hour() as u8, value.minute() as u8, second, 0);
        Self::new(CalendarDate::from_j2000_day(day), time)
    }

    /// Local reading as a `chrono` naive date-time, the UTC offset dropped.
    ///
    /// Sub-nanosecond digits are truncated. `None` for NaN seconds, for
    /// readings past `hh:mm:60.999…` and outside `chrono`'s range.
    pub fn to_naive(&self) -> Option<NaiveDateTime> {
        let ce_day = i32::try_from(self.date.j2000_day() + CE_DAYS_AT_J2000).ok()?;
        let date = NaiveDate::from_num_days_from_ce_opt(ce_day)?;
        let second = self.time.second();
        if !second.is_finite() {
            return None;
        }
        let nanos = (second.attoseconds() / ATTOS_PER_NANO) as u32;
        let (whole, nanos) = match second.seconds() {
            s @ 0..=59 => (s as u32, nanos),
            60 => (59, nanos + 1_000_000_000),
            _ => return None,
        };
        let time = NaiveTime::from_hms_nano_opt(self.time.hour(), self.time.minute(), whole, nanos)?;
        Some(NaiveDateTime::new(date, time))
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Trait implementations
// ═══════════════════════════════════════════════════════════════════════════

impl PartialOrd for CalendarDateTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match self.date.cmp(&other.date) {
            Ordering::Equal => self.time.partial_cmp(&other.time),
            ordering => Some(ordering),
        }
    }
}

impl fmt::Display for CalendarDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}T{}", self.date, self.time)
    }
}

impl FromStr for CalendarDateTime {
    type Err = TimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<CalendarDate> for CalendarDateTime {
    fn from(date: CalendarDate) -> Self {
        Self::new(date, ClockTime::H00)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════
