// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Error types for calendar, clock and time-scale operations.
//!
//! Every failure in this crate is a local value error: a bad date stays bad,
//! so nothing is retried. Callers receive a [`TimeError`] carrying the
//! offending values.
//!
//! | Variant | Raised by |
//! |---------|-----------|
//! | [`InvalidCalendarDate`](TimeError::InvalidCalendarDate) | y/m/d validation, calendar-reform gap |
//! | [`InvalidDayNumber`](TimeError::InvalidDayNumber) | ordinal and week-date construction |
//! | [`OutOfRangeSeconds`](TimeError::OutOfRangeSeconds) | seconds beyond the minute (or day) length |
//! | [`OutOfRangeField`](TimeError::OutOfRangeField) | hour, minute, week, UTC offset bounds |
//! | [`UnparsableText`](TimeError::UnparsableText) | ISO-8601 / RFC-3339 / decimal parsing |
//! | [`NoLeapSecondHistory`](TimeError::NoLeapSecondHistory) | empty [`UtcScale`](crate::UtcScale) table |

use thiserror::Error;

/// Unified error type for the crate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimeError {
    /// Month or day out of range, non-existent leap day, or a date inside
    /// the 1582-10-05..=1582-10-14 Gregorian reform gap.
    #[error("invalid calendar date {year:04}-{month:02}-{day:02}")]
    InvalidCalendarDate { year: i32, month: i32, day: i32 },

    /// Day-of-year (or week-date) that does not exist in the given year.
    #[error("invalid day number {day} in year {year}")]
    InvalidDayNumber { year: i32, day: i32 },

    /// Seconds value at or beyond the admissible limit.
    #[error("out of range seconds number: {second} (must be in [0, {limit}))")]
    OutOfRangeSeconds { second: String, limit: String },

    /// Generic bounded field (hour, minute, week, UTC offset...).
    #[error("{field} value {value} out of range [{min}, {max}]")]
    OutOfRangeField {
        field: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },

    /// Text that does not match any accepted format.
    #[error("unable to parse {kind} from \"{text}\"")]
    UnparsableText { kind: &'static str, text: String },

    /// A UTC scale cannot be built without at least one offset row.
    #[error("no leap second history available to build a UTC scale")]
    NoLeapSecondHistory,
}

impl TimeError {
    pub(crate) fn unparsable(kind: &'static str, text: &str) -> Self {
        TimeError::UnparsableText {
            kind,
            text: text.to_string(),
        }
    }

    pub(crate) fn out_of_range(field: &'static str, value: i64, min: i64, max: i64) -> Self {
        TimeError::OutOfRangeField {
            field,
            value,
            min,
            max,
        }
    }
}

/// Convenience alias used by every fallible function of the crate.
pub type TimeResult<T> = Result<T, TimeError>;
