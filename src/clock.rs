// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Time of day, able to hold leap-lengthened minutes.
//!
//! A [`ClockTime`] is a local reading `hh:mm:ss.sss…` plus the fixed offset
//! (in minutes) between that local clock and UTC. The offset only affects
//! display and the conversion to seconds in the UTC day; it does not change
//! which physical instant is meant once combined with a date and a scale.
//!
//! Seconds normally lie in `[0, 60)`, but readings inside a leap second such
//! as `23:59:60.25` are legal: the general constructors accept seconds up to
//! (excluding) 62, and the leap-aware constructor
//! [`ClockTime::from_second_in_day_with_leap`] checks the reading against the
//! actual minute length reported by the time scale.

use crate::date::fixed_digits;
use crate::error::{TimeError, TimeResult};
use crate::offset::ExactOffset;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Upper bound (exclusive) of the seconds field outside leap-aware checks.
const MAX_SECONDS: ExactOffset = ExactOffset::new(62, 0);

/// Largest accepted `|minutes_from_utc|`.
const MAX_UTC_OFFSET_MINUTES: i32 = 1_439;

/// A time of day.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClockTime {
    hour: u8,
    minute: u8,
    second: ExactOffset,
    minutes_from_utc: i32,
}

impl ClockTime {
    /// Midnight, UTC.
    pub const H00: Self = Self::raw(0, 0, ExactOffset::ZERO, 0);
    /// Noon, UTC.
    pub const H12: Self = Self::raw(12, 0, ExactOffset::ZERO, 0);

    pub(crate) const fn raw(
        hour: u8,
        minute: u8,
        second: ExactOffset,
        minutes_from_utc: i32,
    ) -> Self {
        Self {
            hour,
            minute,
            second,
            minutes_from_utc,
        }
    }

    // ── constructors ──────────────────────────────────────────────────

    /// Build a UTC reading from hour (0..=23), minute (0..=59) and second
    /// (`[0, 62)`).
    pub fn new(hour: u32, minute: u32, second: ExactOffset) -> TimeResult<Self> {
        Self::with_utc_offset(hour, minute, second, 0)
    }

    /// Build a reading from floating-point seconds. The seconds are
    /// converted with [`ExactOffset::from_seconds_f64`], which is lossy.
    pub fn from_hms_f64(hour: u32, minute: u32, second: f64) -> TimeResult<Self> {
        Self::new(hour, minute, ExactOffset::from_seconds_f64(second))
    }

    /// Build a local reading `minutes_from_utc` minutes ahead of UTC.
    ///
    /// A NaN `second` is accepted and propagates to every derived value.
    pub fn with_utc_offset(
        hour: u32,
        minute: u32,
        second: ExactOffset,
        minutes_from_utc: i32,
    ) -> TimeResult<Self> {
        if hour > 23 {
            return Err(TimeError::out_of_range("hour", i64::from(hour), 0, 23));
        }
        if minute > 59 {
            return Err(TimeError::out_of_range("minute", i64::from(minute), 0, 59));
        }
        if second < ExactOffset::ZERO || second >= MAX_SECONDS {
            return Err(out_of_range_seconds(second, MAX_SECONDS));
        }
        check_utc_offset(minutes_from_utc)?;
        Ok(Self::raw(hour as u8, minute as u8, second, minutes_from_utc))
    }

    /// Build a UTC reading from the seconds elapsed since midnight.
    ///
    /// Values in `[86400, 86401)` are read as a leap second,
    /// `23:59:60.xxx`.
    pub fn from_second_in_day(second_in_day: ExactOffset) -> TimeResult<Self> {
        if second_in_day < ExactOffset::ZERO || second_in_day >= ExactOffset::DAY_WITH_POSITIVE_LEAP
        {
            return Err(out_of_range_seconds(
                second_in_day,
                ExactOffset::DAY_WITH_POSITIVE_LEAP,
            ));
        }
        if second_in_day >= ExactOffset::DAY {
            let second = second_in_day - ExactOffset::new(86_340, 0);
            return Ok(Self::raw(23, 59, second, 0));
        }
        Ok(Self::split_standard_day(second_in_day, ExactOffset::ZERO))
    }

    /// Build a UTC reading from the seconds of a *standard* (leap-free) day
    /// plus the part of a leap already elapsed, checked against the length
    /// of the current minute.
    ///
    /// This is how instants falling inside a leap are rendered: the reading
    /// `23:59:60.5` is the standard second `86399.5` plus a leap of one
    /// second, in a minute lasting 61 seconds. A reading at or beyond
    /// `minute_duration` is rejected instead of being wrapped.
    pub fn from_second_in_day_with_leap(
        second_in_standard_day: ExactOffset,
        leap: ExactOffset,
        minute_duration: u8,
    ) -> TimeResult<Self> {
        if second_in_standard_day < ExactOffset::ZERO || second_in_standard_day > ExactOffset::DAY
        {
            return Err(out_of_range_seconds(second_in_standard_day, ExactOffset::DAY));
        }
        let limit = ExactOffset::new(i64::from(minute_duration), 0);
        let time = Self::split_standard_day(second_in_standard_day, leap);
        if time.second < ExactOffset::ZERO || time.second >= limit {
            return Err(out_of_range_seconds(time.second, limit));
        }
        Ok(time)
    }

    pub(crate) fn split_standard_day(second_in_day: ExactOffset, leap: ExactOffset) -> Self {
        if second_in_day.is_nan() {
            return Self::raw(0, 0, ExactOffset::NAN, 0);
        }
        let whole = second_in_day.seconds();
        let fraction = ExactOffset::new(0, second_in_day.attoseconds() as i64);
        // a standard second of exactly 86400 still belongs to the last minute
        let whole = whole.min(86_399);
        let carry = second_in_day.seconds() - whole;
        let hour = whole / 3_600;
        let minute = (whole % 3_600) / 60;
        let second = ExactOffset::new(whole % 60 + carry, 0) + fraction + leap;
        Self::raw(hour as u8, minute as u8, second, 0)
    }

    /// Same reading relabelled with another UTC offset.
    pub fn with_minutes_from_utc(&self, minutes_from_utc: i32) -> TimeResult<Self> {
        check_utc_offset(minutes_from_utc)?;
        Ok(Self {
            minutes_from_utc,
            ..*self
        })
    }

    // ── accessors ─────────────────────────────────────────────────────

    #[inline]
    pub const fn hour(&self) -> u32 {
        self.hour as u32
    }

    #[inline]
    pub const fn minute(&self) -> u32 {
        self.minute as u32
    }

    #[inline]
    pub const fn second(&self) -> ExactOffset {
        self.second
    }

    #[inline]
    pub const fn minutes_from_utc(&self) -> i32 {
        self.minutes_from_utc
    }

    /// Seconds elapsed since local midnight.
    pub fn seconds_in_local_day(&self) -> ExactOffset {
        ExactOffset::new(i64::from(self.hour) * 3_600 + i64::from(self.minute) * 60, 0)
            + self.second
    }

    /// Seconds elapsed since UTC midnight; may fall outside `[0, 86400)`
    /// when the UTC offset moves the reading to the neighbouring day.
    pub fn seconds_in_utc_day(&self) -> ExactOffset {
        self.seconds_in_local_day() - ExactOffset::MINUTE * i64::from(self.minutes_from_utc)
    }

    // ── text ──────────────────────────────────────────────────────────

    /// Parse an ISO-8601 time of day.
    ///
    /// Accepted: `hh:mm:ss[.fff]`, `hhmmss[.fff]`, `hh:mm`, `hhmm`, with
    /// `,` allowed as decimal mark, followed by an optional zone
    /// designator `Z`, `±hh`, `±hh:mm` or `±hhmm`.
    pub fn parse(text: &str) -> TimeResult<Self> {
        let err = || TimeError::unparsable("time of day", text);
        let s = text.trim();
        if !s.is_ascii() {
            return Err(err());
        }

        let (body, minutes_from_utc) = if let Some(body) = s.strip_suffix('Z') {
            (body, 0)
        } else if let Some(pos) = s.find(['+', '-']) {
            let (body, zone) = s.split_at(pos);
            (body, parse_zone(zone).ok_or_else(err)?)
        } else {
            (s, 0)
        };

        let (hh, mm, ss) = if body.contains(':') {
            let parts: Vec<&str> = body.split(':').collect();
            match parts.as_slice() {
                [h, m] => (*h, *m, None),
                [h, m, sec] => (*h, *m, Some(*sec)),
                _ => return Err(err()),
            }
        } else if body.len() == 4 {
            (&body[..2], &body[2..], None)
        } else if body.len() > 4 {
            (&body[..2], &body[2..4], Some(&body[4..]))
        } else {
            return Err(err());
        };

        let hour = fixed_digits(hh, 2).ok_or_else(err)?;
        let minute = fixed_digits(mm, 2).ok_or_else(err)?;
        let second = match ss {
            None => ExactOffset::ZERO,
            Some(sec) => parse_seconds_field(sec).ok_or_else(err)?,
        };
        Self::with_utc_offset(hour, minute, second, minutes_from_utc)
    }

    /// `hh:mm:ss` with exactly `fraction_digits` rounded decimals, followed
    /// by the UTC offset as `+hh:mm`.
    pub fn format(&self, fraction_digits: usize) -> String {
        format!(
            "{}{}",
            self.format_without_utc_offset(fraction_digits),
            self.utc_offset_suffix()
        )
    }

    /// `hh:mm:ss` with exactly `fraction_digits` rounded decimals.
    ///
    /// Rounding may display a value equal to the minute length; use
    /// [`CalendarDateTime::round_if_needed`](crate::CalendarDateTime::round_if_needed)
    /// beforehand to carry it into the next minute.
    pub fn format_without_utc_offset(&self, fraction_digits: usize) -> String {
        format!(
            "{:02}:{:02}:{}",
            self.hour,
            self.minute,
            self.second.format_decimal(Some(fraction_digits), 2)
        )
    }

    /// UTC offset as `+hh:mm` / `-hh:mm`.
    pub(crate) fn utc_offset_suffix(&self) -> String {
        // sign handled separately, zero has none
        let sign = if self.minutes_from_utc < 0 { '-' } else { '+' };
        let magnitude = self.minutes_from_utc.unsigned_abs();
        format!("{sign}{:02}:{:02}", magnitude / 60, magnitude % 60)
    }
}

fn check_utc_offset(minutes_from_utc: i32) -> TimeResult<()> {
    if minutes_from_utc.abs() > MAX_UTC_OFFSET_MINUTES {
        return Err(TimeError::out_of_range(
            "minutes from UTC",
            i64::from(minutes_from_utc),
            -i64::from(MAX_UTC_OFFSET_MINUTES),
            i64::from(MAX_UTC_OFFSET_MINUTES),
        ));
    }
    Ok(())
}

pub(crate) fn out_of_range_seconds(second: ExactOffset, limit: ExactOffset) -> TimeError {
    TimeError::OutOfRangeSeconds {
        second: second.to_string(),
        limit: limit.to_string(),
    }
}

/// `ss` or `ss.fff` / `ss,fff`: two integer digits and a non-empty fraction.
fn parse_seconds_field(field: &str) -> Option<ExactOffset> {
    let (whole, fraction) = match field.find(['.', ',']) {
        Some(pos) => (&field[..pos], Some(&field[pos + 1..])),
        None => (field, None),
    };
    fixed_digits(whole, 2)?;
    if let Some(fraction) = fraction {
        if fraction.is_empty() || !fraction.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
    }
    ExactOffset::parse(field).ok()
}

/// `±hh`, `±hh:mm` or `±hhmm`, returned in minutes.
fn parse_zone(zone: &str) -> Option<i32> {
    let (sign, digits) = match zone.as_bytes().first()? {
        b'+' => (1, &zone[1..]),
        b'-' => (-1, &zone[1..]),
        _ => return None,
    };
    let (hh, mm) = match digits.len() {
        2 => (digits, None),
        4 => (&digits[..2], Some(&digits[2..])),
        5 if digits.as_bytes()[2] == b':' => (&digits[..2], Some(&digits[3..])),
        _ => return None,
    };
    let hours = fixed_digits(hh, 2)? as i32;
    let minutes = match mm {
        Some(mm) => fixed_digits(mm, 2)? as i32,
        None => 0,
    };
    if minutes > 59 {
        return None;
    }
    Some(sign * (hours * 60 + minutes))
}

// ═══════════════════════════════════════════════════════════════════════════
// Trait implementations
// ═══════════════════════════════════════════════════════════════════════════

impl PartialOrd for ClockTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        let by_utc = self
            .seconds_in_utc_day()
            .partial_cmp(&other.seconds_in_utc_day())?;
        Some(
            by_utc
                .then(self.minutes_from_utc.cmp(&other.minutes_from_utc))
                .then((self.hour, self.minute).cmp(&(other.hour, other.minute))),
        )
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{}{}",
            self.hour,
            self.minute,
            self.second.format_decimal(None, 2),
            self.utc_offset_suffix()
        )
    }
}

impl FromStr for ClockTime {
    type Err = TimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════
