// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Calendar dates indexed by their day offset from 2000-01-01.
//!
//! A [`CalendarDate`] is a validated `(year, month, day)` triple using
//! astronomical year numbering (year `0` is 1 BC, year `-1` is 2 BC, ...).
//! Dates from 1582-10-15 onwards follow the Gregorian calendar; earlier dates
//! follow the Julian calendar, proleptically before year 1. The ten days
//! 1582-10-05..=1582-10-14 skipped by the Gregorian reform do not exist.
//!
//! All day arithmetic is done on the integer **J2000 day** (days elapsed
//! since 2000-01-01), computed with era/cycle integer algorithms, so it is
//! exact arbitrarily far from the epoch.

use crate::error::{TimeError, TimeResult};
use std::fmt;
use std::str::FromStr;

/// J2000 day of 1582-10-15, first day of the Gregorian calendar.
const GREGORIAN_START: i64 = -152_384;

/// J2000 day of the Modified Julian Day epoch (1858-11-17).
const MJD_TO_J2000: i64 = -51_544;

/// A calendar date.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CalendarDate {
    year: i32,
    month: u8,
    day: u8,
}

impl CalendarDate {
    /// Julian period start, -4712-01-01 (Julian calendar).
    pub const JULIAN_EPOCH: Self = Self::raw(-4712, 1, 1);
    /// Modified Julian Day epoch, 1858-11-17.
    pub const MODIFIED_JULIAN_EPOCH: Self = Self::raw(1858, 11, 17);
    /// 1950-01-01.
    pub const FIFTIES_EPOCH: Self = Self::raw(1950, 1, 1);
    /// CCSDS recommended epoch, 1958-01-01.
    pub const CCSDS_EPOCH: Self = Self::raw(1958, 1, 1);
    /// 1970-01-01.
    pub const JAVA_EPOCH: Self = Self::raw(1970, 1, 1);
    /// GPS (and QZSS, NavIC) week zero, 1980-01-06.
    pub const GPS_EPOCH: Self = Self::raw(1980, 1, 6);
    /// Galileo system time start, 1999-08-22.
    pub const GALILEO_EPOCH: Self = Self::raw(1999, 8, 22);
    /// 2000-01-01, day zero of the J2000 day count.
    pub const J2000_EPOCH: Self = Self::raw(2000, 1, 1);
    /// BeiDou time start, 2006-01-01.
    pub const BEIDOU_EPOCH: Self = Self::raw(2006, 1, 1);

    pub(crate) const fn raw(year: i32, month: u8, day: u8) -> Self {
        Self { year, month, day }
    }

    // ── constructors ──────────────────────────────────────────────────

    /// Build a date from year, month (1..=12) and day (1..=31).
    pub fn new(year: i32, month: u32, day: u32) -> TimeResult<Self> {
        let invalid = || TimeError::InvalidCalendarDate {
            year,
            month: month as i32,
            day: day as i32,
        };
        if !(1..=12).contains(&month) || day < 1 {
            return Err(invalid());
        }
        let candidate = Self::raw(year, month as u8, day as u8);
        if day > 31 {
            return Err(invalid());
        }
        // round-trip through the day number rejects Feb 30, Feb 29 of common
        // years and the reform gap in one check
        if Self::from_j2000_day(candidate.j2000_day()) != candidate {
            return Err(invalid());
        }
        Ok(candidate)
    }

    /// Build a date from its day offset relative to 2000-01-01.
    pub fn from_j2000_day(j2000_day: i64) -> Self {
        if j2000_day >= GREGORIAN_START {
            gregorian_from_days(j2000_day)
        } else {
            julian_from_days(j2000_day)
        }
    }

    /// Build a date from a Modified Julian Day number.
    pub fn from_mjd(mjd: i64) -> Self {
        Self::from_j2000_day(mjd + MJD_TO_J2000)
    }

    /// Build a date from a year and a day of year (1..=365, or 366 in leap years).
    pub fn from_day_of_year(year: i32, day_of_year: u32) -> TimeResult<Self> {
        let invalid = || TimeError::InvalidDayNumber {
            year,
            day: day_of_year as i32,
        };
        if day_of_year < 1 {
            return Err(invalid());
        }
        let first = Self::raw(year, 1, 1).j2000_day();
        let date = Self::from_j2000_day(first + i64::from(day_of_year) - 1);
        if date.year != year {
            return Err(invalid());
        }
        Ok(date)
    }

    /// Build a date from ISO-8601 week components.
    ///
    /// Week 1 is the week containing January 4th; `day_of_week` runs from
    /// 1 (Monday) to 7 (Sunday). The week-based year may differ from the
    /// calendar year near year boundaries.
    pub fn from_week(week_year: i32, week: u32, day_of_week: u32) -> TimeResult<Self> {
        if !(1..=7).contains(&day_of_week) {
            return Err(TimeError::out_of_range(
                "day of week",
                i64::from(day_of_week),
                1,
                7,
            ));
        }
        let jan4 = Self::raw(week_year, 1, 4);
        let first_monday = jan4.j2000_day() - i64::from(jan4.day_of_week()) + 1;
        let date = Self::from_j2000_day(
            first_monday + (i64::from(week) - 1) * 7 + i64::from(day_of_week) - 1,
        );
        if week < 1 || date.week_year() != week_year {
            return Err(TimeError::out_of_range("week", i64::from(week), 1, 53));
        }
        Ok(date)
    }

    /// Earliest date reachable from an `i32` day count, used as calendar
    /// reading of the past infinity.
    pub fn min_epoch() -> Self {
        Self::from_j2000_day(i64::from(i32::MIN))
    }

    /// Latest date reachable from an `i32` day count, used as calendar
    /// reading of the future infinity.
    pub fn max_epoch() -> Self {
        Self::from_j2000_day(i64::from(i32::MAX))
    }

    // ── accessors ─────────────────────────────────────────────────────

    #[inline]
    pub const fn year(&self) -> i32 {
        self.year
    }

    #[inline]
    pub const fn month(&self) -> u32 {
        self.month as u32
    }

    #[inline]
    pub const fn day(&self) -> u32 {
        self.day as u32
    }

    /// Days elapsed since 2000-01-01 (negative before).
    pub fn j2000_day(&self) -> i64 {
        let (y, m, d) = (i64::from(self.year), i64::from(self.month), i64::from(self.day));
        let gregorian = gregorian_days(y, m, d);
        if gregorian >= GREGORIAN_START {
            gregorian
        } else {
            julian_days(y, m, d)
        }
    }

    /// Modified Julian Day number.
    pub fn mjd(&self) -> i64 {
        self.j2000_day() - MJD_TO_J2000
    }

    /// Day of week, 1 for Monday up to 7 for Sunday.
    pub fn day_of_week(&self) -> u32 {
        // 2000-01-01 was a Saturday
        ((self.j2000_day() + 5).rem_euclid(7) + 1) as u32
    }

    /// Day of year, 1-based.
    pub fn day_of_year(&self) -> u32 {
        (self.j2000_day() - Self::raw(self.year, 1, 1).j2000_day() + 1) as u32
    }

    /// ISO-8601 week-based year.
    pub fn week_year(&self) -> i32 {
        let thursday = self.j2000_day() - i64::from(self.day_of_week()) + 4;
        Self::from_j2000_day(thursday).year
    }

    /// ISO-8601 week number (1..=53).
    pub fn calendar_week(&self) -> u32 {
        let thursday = Self::from_j2000_day(self.j2000_day() - i64::from(self.day_of_week()) + 4);
        (thursday.day_of_year() - 1) / 7 + 1
    }

    /// Whether `year` has a February 29th in this crate's calendar.
    pub fn is_leap_year(year: i32) -> bool {
        if year < 1583 {
            year.rem_euclid(4) == 0
        } else {
            (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
        }
    }

    // ── arithmetic ────────────────────────────────────────────────────

    /// Date `days` days later (earlier if negative).
    pub fn shifted_by_days(&self, days: i64) -> Self {
        Self::from_j2000_day(self.j2000_day() + days)
    }

    /// Signed number of days from `other` to `self`.
    pub fn days_from(&self, other: &Self) -> i64 {
        self.j2000_day() - other.j2000_day()
    }

    // ── text ──────────────────────────────────────────────────────────

    /// Parse an ISO-8601 calendar date.
    ///
    /// Accepted forms (extended and basic): `YYYY-MM-DD`, `YYYYMMDD`,
    /// ordinal `YYYY-DDD`, `YYYYDDD`, and week dates `YYYY-Www-D`,
    /// `YYYYWwwD`. Years may carry a sign; signed or extended forms may use
    /// more than four year digits.
    pub fn parse(text: &str) -> TimeResult<Self> {
        let err = || TimeError::unparsable("calendar date", text);
        let s = text.trim();
        if !s.is_ascii() {
            return Err(err());
        }
        let (sign, body) = match s.as_bytes().first() {
            Some(b'-') => (-1i64, &s[1..]),
            Some(b'+') => (1i64, &s[1..]),
            _ => (1i64, s),
        };
        let signed = sign < 0 || s.starts_with('+');

        let year_of = |digits: &str| -> TimeResult<i32> {
            if digits.len() < 4 && !(signed && digits.len() >= 3) {
                return Err(err());
            }
            let value = parse_digits(digits).ok_or_else(err)?;
            i32::try_from(sign * value).map_err(|_| err())
        };

        if body.contains('-') {
            let parts: Vec<&str> = body.split('-').collect();
            match parts.as_slice() {
                [y, w, d] if w.starts_with('W') => {
                    let week = fixed_digits(&w[1..], 2).ok_or_else(err)?;
                    let dow = fixed_digits(d, 1).ok_or_else(err)?;
                    Self::from_week(year_of(y)?, week, dow)
                }
                [y, m, d] => {
                    let month = fixed_digits(m, 2).ok_or_else(err)?;
                    let day = fixed_digits(d, 2).ok_or_else(err)?;
                    Self::new(year_of(y)?, month, day)
                }
                [y, ordinal] => {
                    let doy = fixed_digits(ordinal, 3).ok_or_else(err)?;
                    Self::from_day_of_year(year_of(y)?, doy)
                }
                _ => Err(err()),
            }
        } else if let Some(w) = body.find('W') {
            // basic week date YYYYWwwD
            let (y, rest) = body.split_at(w);
            if rest.len() != 4 {
                return Err(err());
            }
            let week = fixed_digits(&rest[1..3], 2).ok_or_else(err)?;
            let dow = fixed_digits(&rest[3..], 1).ok_or_else(err)?;
            Self::from_week(year_of(y)?, week, dow)
        } else {
            match body.len() {
                8 => {
                    let month = fixed_digits(&body[4..6], 2).ok_or_else(err)?;
                    let day = fixed_digits(&body[6..], 2).ok_or_else(err)?;
                    Self::new(year_of(&body[..4])?, month, day)
                }
                7 => {
                    let doy = fixed_digits(&body[4..], 3).ok_or_else(err)?;
                    Self::from_day_of_year(year_of(&body[..4])?, doy)
                }
                _ => Err(err()),
            }
        }
    }
}

/// Parse an all-ASCII-digit string.
pub(crate) fn parse_digits(digits: &str) -> Option<i64> {
    if digits.is_empty() || digits.len() > 18 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Parse a string of exactly `width` ASCII digits.
pub(crate) fn fixed_digits(digits: &str, width: usize) -> Option<u32> {
    if digits.len() != width {
        return None;
    }
    parse_digits(digits).map(|v| v as u32)
}

// ── day-count algorithms ──────────────────────────────────────────────────
//
// Years are shifted to start on March 1st so the leap day is the last day
// of the shifted year; `153 * m + 2) / 5` gives the cumulative days of the
// shifted months (31, 30, 31, 30, 31, 31, 30, 31, 30, 31, 31, 28/29).

fn shifted_day_of_year(m: i64, d: i64) -> i64 {
    let mp = (m + 9) % 12;
    (153 * mp + 2) / 5 + d - 1
}

fn gregorian_days(y: i64, m: i64, d: i64) -> i64 {
    let y = if m <= 2 { y - 1 } else { y };
    let era = y.div_euclid(400);
    let yoe = y - era * 400;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + shifted_day_of_year(m, d);
    era * 146_097 + doe - 730_425
}

fn julian_days(y: i64, m: i64, d: i64) -> i64 {
    let y = if m <= 2 { y - 1 } else { y };
    let era = y.div_euclid(4);
    let yoe = y - era * 4;
    era * 1_461 + yoe * 365 + shifted_day_of_year(m, d) - 730_427
}

fn month_day_from_shifted(doy: i64) -> (i64, i64) {
    let mp = (5 * doy + 2) / 153;
    let d = doy - (153 * mp + 2) / 5 + 1;
    let m = if mp < 10 { mp + 3 } else { mp - 9 };
    (m, d)
}

fn to_date(y: i64, m: i64, d: i64) -> CalendarDate {
    let y = if m <= 2 { y + 1 } else { y };
    // years beyond the i32 range clamp
    let year = y.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32;
    CalendarDate::raw(year, m as u8, d as u8)
}

fn gregorian_from_days(n: i64) -> CalendarDate {
    let z = n + 730_425;
    let era = z.div_euclid(146_097);
    let doe = z - era * 146_097;
    let yoe = (doe - doe / 1_460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let (m, d) = month_day_from_shifted(doy);
    to_date(yoe + era * 400, m, d)
}

fn julian_from_days(n: i64) -> CalendarDate {
    let z = n + 730_427;
    let era = z.div_euclid(1_461);
    let doe = z - era * 1_461;
    let yoe = (doe - doe / 1_460) / 365;
    let doy = doe - 365 * yoe;
    let (m, d) = month_day_from_shifted(doy);
    to_date(yoe + era * 4, m, d)
}

// ═══════════════════════════════════════════════════════════════════════════
// Trait implementations
// ═══════════════════════════════════════════════════════════════════════════

impl PartialOrd for CalendarDate {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CalendarDate {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.j2000_day().cmp(&other.j2000_day())
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

impl FromStr for CalendarDate {
    type Err = TimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════
