// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Coordinated Universal Time and the scales tied to it.
//!
//! UTC follows TAI through a table of offset regimes. From 1972 onward each
//! regime is a whole number of seconds; between 1961 and 1972 UTC drifted
//! linearly against TAI, and each regime is a reference offset plus a slope
//! in nanoseconds per day:
//!
//! ```text
//! TAI − UTC = offset + (MJD − MJD_ref) × slope
//! ```
//!
//! Passing from one regime to the next inserts (or removes) a *leap*: the
//! old rule's clock reaches midnight, then the reading keeps counting past
//! `23:59:60` until the new rule catches up.
//!
//! [`UtcScale::new`] derives an immutable, time-sorted [`LeapEntry`] table
//! from the caller's [`OffsetModel`] rows. When those rows start after 1968
//! the 1961–1968 linear regimes, which most published leap-second files
//! omit, are merged in first. Lookups are binary searches; the scale is
//! `Send + Sync` and is shared by reference or [`Arc`].
//!
//! ## References
//! * IERS Bulletin C and `Leap_Second.dat`
//! * USNO `tai-utc.dat` (1961–1972 linear regimes)

use crate::clock::ClockTime;
use crate::date::CalendarDate;
use crate::error::{TimeError, TimeResult};
use crate::instant::Instant;
use crate::offset::{ExactOffset, TimeUnit};
use crate::scales::TimeScale;
use std::sync::Arc;
use tracing::debug;

/// Nanoseconds in a standard day, the denominator of the drift slopes.
const NANOS_PER_DAY: i64 = 86_400_000_000_000;

/// Regimes appended in front of tables starting after this year.
const LAST_LINEAR_HISTORY_YEAR: i32 = 1968;

// ═══════════════════════════════════════════════════════════════════════════
// Offset rows
// ═══════════════════════════════════════════════════════════════════════════

/// One `TAI − UTC` regime, as published.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OffsetModel {
    start: CalendarDate,
    mjd_ref: i32,
    offset: ExactOffset,
    slope_nanos_per_day: i32,
}

impl OffsetModel {
    /// Linear regime starting at UTC midnight of `start`.
    pub const fn linear(
        start: CalendarDate,
        mjd_ref: i32,
        offset: ExactOffset,
        slope_nanos_per_day: i32,
    ) -> Self {
        Self {
            start,
            mjd_ref,
            offset,
            slope_nanos_per_day,
        }
    }

    /// Constant regime (whole-second leaps since 1972).
    pub const fn constant(start: CalendarDate, offset: ExactOffset) -> Self {
        Self::linear(start, 0, offset, 0)
    }

    #[inline]
    pub const fn start(&self) -> CalendarDate {
        self.start
    }

    #[inline]
    pub const fn mjd_ref(&self) -> i32 {
        self.mjd_ref
    }

    #[inline]
    pub const fn offset(&self) -> ExactOffset {
        self.offset
    }

    #[inline]
    pub const fn slope_nanos_per_day(&self) -> i32 {
        self.slope_nanos_per_day
    }
}

/// `ss.fffffff` as an exact offset from whole seconds and 10⁻⁷ s units.
const fn tenth_micros(seconds: i64, tenth_micros: i64) -> ExactOffset {
    ExactOffset::new(seconds, tenth_micros * 100_000_000_000)
}

/// Linear regimes from 1961 to 1972 (USNO `tai-utc.dat`).
const LINEAR_HISTORY: [OffsetModel; 13] = [
    OffsetModel::linear(CalendarDate::raw(1961, 1, 1), 37_300, tenth_micros(1, 4_228_180), 1_296_000),
    OffsetModel::linear(CalendarDate::raw(1961, 8, 1), 37_300, tenth_micros(1, 3_728_180), 1_296_000),
    OffsetModel::linear(CalendarDate::raw(1962, 1, 1), 37_665, tenth_micros(1, 8_458_580), 1_123_200),
    OffsetModel::linear(CalendarDate::raw(1963, 11, 1), 37_665, tenth_micros(1, 9_458_580), 1_123_200),
    OffsetModel::linear(CalendarDate::raw(1964, 1, 1), 38_761, tenth_micros(3, 2_401_300), 1_296_000),
    OffsetModel::linear(CalendarDate::raw(1964, 4, 1), 38_761, tenth_micros(3, 3_401_300), 1_296_000),
    OffsetModel::linear(CalendarDate::raw(1964, 9, 1), 38_761, tenth_micros(3, 4_401_300), 1_296_000),
    OffsetModel::linear(CalendarDate::raw(1965, 1, 1), 38_761, tenth_micros(3, 5_401_300), 1_296_000),
    OffsetModel::linear(CalendarDate::raw(1965, 3, 1), 38_761, tenth_micros(3, 6_401_300), 1_296_000),
    OffsetModel::linear(CalendarDate::raw(1965, 7, 1), 38_761, tenth_micros(3, 7_401_300), 1_296_000),
    OffsetModel::linear(CalendarDate::raw(1965, 9, 1), 38_761, tenth_micros(3, 8_401_300), 1_296_000),
    OffsetModel::linear(CalendarDate::raw(1966, 1, 1), 39_126, tenth_micros(4, 3_131_700), 2_592_000),
    OffsetModel::linear(CalendarDate::raw(1968, 2, 1), 39_126, tenth_micros(4, 2_131_700), 2_592_000),
];

/// Whole-second regimes from 1972 to 2017 (IERS `Leap_Second.dat`).
const LEAP_SECOND_HISTORY: [(i32, u8, i64); 28] = [
    (1972, 1, 10),
    (1972, 7, 11),
    (1973, 1, 12),
    (1974, 1, 13),
    (1975, 1, 14),
    (1976, 1, 15),
    (1977, 1, 16),
    (1978, 1, 17),
    (1979, 1, 18),
    (1980, 1, 19),
    (1981, 7, 20),
    (1982, 7, 21),
    (1983, 7, 22),
    (1985, 7, 23),
    (1988, 1, 24),
    (1990, 1, 25),
    (1991, 1, 26),
    (1992, 7, 27),
    (1993, 7, 28),
    (1994, 7, 29),
    (1996, 1, 30),
    (1997, 7, 31),
    (1999, 1, 32),
    (2006, 1, 33),
    (2009, 1, 34),
    (2012, 7, 35),
    (2015, 7, 36),
    (2017, 1, 37),
];

/// The 1972–2017 leap-second table as [`OffsetModel`] rows.
pub fn default_leap_second_history() -> Vec<OffsetModel> {
    LEAP_SECOND_HISTORY
        .iter()
        .map(|&(year, month, seconds)| {
            OffsetModel::constant(CalendarDate::raw(year, month, 1), ExactOffset::new(seconds, 0))
        })
        .collect()
}

// ═══════════════════════════════════════════════════════════════════════════
// Derived table rows
// ═══════════════════════════════════════════════════════════════════════════

/// One row of the derived UTC table.
///
/// The row applies from [`leap_start`](Self::leap_start), the instant the
/// previous rule's clock reads midnight of the row's start date. Readings
/// are inside the leap until [`validity_start`](Self::validity_start).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct LeapEntry {
    leap_start: Instant,
    validity_start: Instant,
    mjd: i64,
    leap: ExactOffset,
    offset: ExactOffset,
    mjd_ref: i32,
    slope_nanos_per_day: i32,
    reference: Instant,
}

impl LeapEntry {
    #[inline]
    pub const fn leap_start(&self) -> Instant {
        self.leap_start
    }

    /// Instant the row's own clock first reads midnight of its start date.
    #[inline]
    pub const fn validity_start(&self) -> Instant {
        self.validity_start
    }

    /// Modified Julian day of the row's start date.
    #[inline]
    pub const fn mjd(&self) -> i64 {
        self.mjd
    }

    /// Leap size in UTC seconds; negative when the regime change skipped
    /// readings.
    #[inline]
    pub const fn leap(&self) -> ExactOffset {
        self.leap
    }

    #[inline]
    pub const fn offset(&self) -> ExactOffset {
        self.offset
    }

    #[inline]
    pub const fn mjd_ref(&self) -> i32 {
        self.mjd_ref
    }

    #[inline]
    pub const fn slope_nanos_per_day(&self) -> i32 {
        self.slope_nanos_per_day
    }

    /// Instant the UTC clock read midnight of `mjd_ref` under this rule.
    #[inline]
    pub const fn reference(&self) -> Instant {
        self.reference
    }

    /// `TAI − UTC` at a physical instant.
    ///
    /// The drift is counted in UTC days while `instant` advances in TAI
    /// seconds, hence the `slope / (day + slope)` ratio.
    pub fn offset_at_instant(&self, instant: Instant) -> ExactOffset {
        if self.slope_nanos_per_day == 0 {
            return self.offset;
        }
        let slope = i64::from(self.slope_nanos_per_day);
        self.offset
            + instant
                .duration_from(self.reference)
                .multiply_ratio(slope, NANOS_PER_DAY + slope)
    }

    /// `TAI − UTC` at a UTC reading.
    pub fn offset_at_calendar(&self, date: CalendarDate, time: ClockTime) -> ExactOffset {
        if self.slope_nanos_per_day == 0 {
            return self.offset;
        }
        let days = date.mjd() - i64::from(self.mjd_ref);
        let elapsed = ExactOffset::DAY * days + time.seconds_in_utc_day();
        self.offset
            + elapsed.multiply_ratio(i64::from(self.slope_nanos_per_day), NANOS_PER_DAY)
    }

    /// Whole seconds the leap adds to the last minute, rounded up.
    fn extra_seconds(&self) -> i64 {
        self.leap.seconds() + i64::from(self.leap.attoseconds() > 0)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// UtcScale
// ═══════════════════════════════════════════════════════════════════════════

/// Coordinated Universal Time.
#[derive(Debug, Clone, PartialEq)]
pub struct UtcScale {
    entries: Vec<LeapEntry>,
}

impl UtcScale {
    /// Build the scale from offset rows given in any order.
    ///
    /// Tables starting after 1968 are completed with the 1961–1968 linear
    /// regimes. Fails with [`TimeError::NoLeapSecondHistory`] on an empty
    /// table.
    pub fn new(models: Vec<OffsetModel>) -> TimeResult<Self> {
        Self::build(models, true)
    }

    /// Build the scale from exactly the given rows, never adding the
    /// 1961–1968 regimes. Instants before the first row read UTC ≡ TAI.
    pub fn without_linear_history(models: Vec<OffsetModel>) -> TimeResult<Self> {
        Self::build(models, false)
    }

    /// Scale from the embedded 1972–2017 leap-second table, completed with
    /// the 1961–1968 linear regimes.
    pub fn with_default_history() -> TimeResult<Self> {
        Self::new(default_leap_second_history())
    }

    fn build(mut models: Vec<OffsetModel>, complete_history: bool) -> TimeResult<Self> {
        if models.is_empty() {
            return Err(TimeError::NoLeapSecondHistory);
        }
        models.sort_by_key(|model| model.start);

        let spliced = complete_history && models[0].start.year() > LAST_LINEAR_HISTORY_YEAR;
        if spliced {
            models = LINEAR_HISTORY.into_iter().chain(models).collect();
        }

        let mut entries: Vec<LeapEntry> = Vec::with_capacity(models.len());
        for model in &models {
            let entry = derive_entry(model, entries.last());
            entries.push(entry);
        }

        let scale = Self { entries };
        debug!(
            rows = scale.entries.len(),
            spliced_linear_history = spliced,
            first_leap = %scale.first_known_leap_second(),
            last_leap = %scale.last_known_leap_second(),
            "built UTC-TAI offset table"
        );
        Ok(scale)
    }

    /// Derived rows, sorted by start.
    #[inline]
    pub fn entries(&self) -> &[LeapEntry] {
        &self.entries
    }

    /// Start of the earliest known regime change.
    pub fn first_known_leap_second(&self) -> Instant {
        self.entries
            .first()
            .map_or(Instant::PAST_INFINITY, |entry| entry.leap_start)
    }

    /// Start of the latest known regime change.
    pub fn last_known_leap_second(&self) -> Instant {
        self.entries
            .last()
            .map_or(Instant::PAST_INFINITY, |entry| entry.leap_start)
    }

    /// Index of the first row starting after `instant`.
    fn upper_index(&self, instant: Instant) -> usize {
        self.entries
            .partition_point(|entry| entry.leap_start <= instant)
    }

    /// Row in effect at `instant`, if any.
    fn entry_at(&self, instant: Instant) -> Option<&LeapEntry> {
        match self.upper_index(instant) {
            0 => None,
            index => self.entries.get(index - 1),
        }
    }
}

/// Derive a table row from its model and the row before it.
fn derive_entry(model: &OffsetModel, previous: Option<&LeapEntry>) -> LeapEntry {
    let date = model.start;
    let mjd = date.mjd();
    let slope = i64::from(model.slope_nanos_per_day);

    // offset of the old rule when its clock reaches the new start date
    let previous_offset = previous.map_or(ExactOffset::ZERO, |entry| {
        entry.offset_at_calendar(date, ClockTime::H00)
    });
    let midnight = Instant::tai_reading(date, ClockTime::H00);
    let leap_start = midnight + previous_offset;

    let drift = ExactOffset::from_value((mjd - i64::from(model.mjd_ref)) * slope, TimeUnit::Nanosecond);
    // the new rule's clock reads midnight exactly at `leap_end`
    let leap_end = midnight + (model.offset + drift);
    // the leap lasts `leap_end - leap_start` TAI seconds, counted in UTC seconds
    let leap = (leap_end - leap_start).multiply_ratio(NANOS_PER_DAY, NANOS_PER_DAY + slope);

    let reference_date = CalendarDate::from_mjd(i64::from(model.mjd_ref));
    let reference = Instant::tai_reading(reference_date, ClockTime::H00) + model.offset;

    LeapEntry {
        leap_start,
        validity_start: leap_end,
        mjd,
        leap,
        offset: model.offset,
        mjd_ref: model.mjd_ref,
        slope_nanos_per_day: model.slope_nanos_per_day,
        reference,
    }
}

impl TimeScale for UtcScale {
    fn name(&self) -> &'static str {
        "UTC"
    }

    /// Zero before the first known row.
    fn offset_from_tai(&self, instant: Instant) -> ExactOffset {
        self.entry_at(instant)
            .map_or(ExactOffset::ZERO, |entry| -entry.offset_at_instant(instant))
    }

    fn offset_to_tai(&self, date: CalendarDate, time: ClockTime) -> ExactOffset {
        // seconds are left out so 23:59:60.x stays on its own day
        let minute_in_day =
            i64::from(time.hour()) * 60 + i64::from(time.minute()) - i64::from(time.minutes_from_utc());
        let mjd = date.mjd() + minute_in_day.div_euclid(1_440);
        match self.entries.partition_point(|entry| entry.mjd <= mjd) {
            0 => ExactOffset::ZERO,
            index => self.entries[index - 1].offset_at_calendar(date, time),
        }
    }

    /// 60 plus the leap rounded up to whole seconds, inside a leap or in
    /// the minute before one. Leaps are not whole seconds before 1972, so
    /// the value is a bound rather than an exact length there.
    fn minute_duration(&self, instant: Instant) -> u8 {
        let index = self.upper_index(instant);
        if index > 0 && instant < self.entries[index - 1].validity_start {
            return minute_length(&self.entries[index - 1]);
        }
        match self.entries.get(index) {
            Some(next) if next.leap_start.duration_from(instant) <= ExactOffset::MINUTE => {
                minute_length(next)
            }
            _ => 60,
        }
    }

    fn inside_leap(&self, instant: Instant) -> bool {
        self.entry_at(instant)
            .is_some_and(|entry| instant < entry.validity_start)
    }

    fn leap_at(&self, instant: Instant) -> ExactOffset {
        self.entry_at(instant)
            .map_or(ExactOffset::ZERO, |entry| entry.leap)
    }
}

fn minute_length(entry: &LeapEntry) -> u8 {
    (60 + entry.extra_seconds()).clamp(0, i64::from(u8::MAX)) as u8
}

// ═══════════════════════════════════════════════════════════════════════════
// GLONASS
// ═══════════════════════════════════════════════════════════════════════════

/// GLONASS system time: UTC(SU) plus three hours, leaps included.
#[derive(Debug, Clone)]
pub struct GlonassScale {
    utc: Arc<UtcScale>,
}

/// Moscow offset of GLONASS time.
const GLONASS_SHIFT: ExactOffset = ExactOffset::new(10_800, 0);

impl GlonassScale {
    pub fn new(utc: Arc<UtcScale>) -> Self {
        Self { utc }
    }

    /// The UTC scale this one follows.
    pub fn utc(&self) -> &UtcScale {
        &self.utc
    }
}

impl TimeScale for GlonassScale {
    fn name(&self) -> &'static str {
        "GLONASS"
    }

    fn offset_from_tai(&self, instant: Instant) -> ExactOffset {
        self.utc.offset_from_tai(instant) + GLONASS_SHIFT
    }

    fn offset_to_tai(&self, date: CalendarDate, time: ClockTime) -> ExactOffset {
        // move the reading back to UTC by hours only, keeping leap seconds
        let hour = time.hour() as i32 - 3;
        let (date, hour) = if hour < 0 {
            (date.shifted_by_days(-1), hour + 24)
        } else {
            (date, hour)
        };
        let utc_time = ClockTime::raw(
            hour as u8,
            time.minute() as u8,
            time.second(),
            time.minutes_from_utc(),
        );
        self.utc.offset_to_tai(date, utc_time) - GLONASS_SHIFT
    }

    fn minute_duration(&self, instant: Instant) -> u8 {
        self.utc.minute_duration(instant)
    }

    fn inside_leap(&self, instant: Instant) -> bool {
        self.utc.inside_leap(instant)
    }

    fn leap_at(&self, instant: Instant) -> ExactOffset {
        self.utc.leap_at(instant)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datetime::CalendarDateTime;
    use crate::scales::TAI;

    fn secs(text: &str) -> ExactOffset {
        ExactOffset::parse(text).unwrap()
    }

    fn utc() -> UtcScale {
        UtcScale::with_default_history().unwrap()
    }

    fn at(text: &str, scale: &impl TimeScale) -> Instant {
        Instant::parse(text, scale).unwrap()
    }

    #[test]
    fn empty_history_is_rejected() {
        assert_eq!(UtcScale::new(Vec::new()), Err(TimeError::NoLeapSecondHistory));
        assert_eq!(
            UtcScale::without_linear_history(Vec::new()),
            Err(TimeError::NoLeapSecondHistory)
        );
    }

    #[test]
    fn linear_history_is_spliced_in_front() {
        let scale = utc();
        assert_eq!(scale.entries().len(), 13 + 28);
        assert_eq!(scale.entries()[0].mjd(), 37_300);
        assert_eq!(scale.entries()[13].offset(), ExactOffset::new(10, 0));
        assert!(scale
            .entries()
            .windows(2)
            .all(|pair| pair[0].leap_start() < pair[1].leap_start() && pair[0].mjd() < pair[1].mjd()));

        let own_history = vec![OffsetModel::linear(
            CalendarDate::new(1962, 1, 1).unwrap(),
            37_665,
            secs("1.8458580"),
            1_123_200,
        )];
        assert_eq!(UtcScale::new(own_history).unwrap().entries().len(), 1);
    }

    #[test]
    fn rows_are_sorted_before_derivation() {
        let mut rows = default_leap_second_history();
        rows.reverse();
        assert_eq!(UtcScale::new(rows).unwrap(), utc());
    }

    #[test]
    fn linear_regime_value_on_1966_01_02() {
        let scale = utc();
        let t = at("1966-01-02", &scale);
        assert_eq!(scale.offset_from_tai(t), secs("-4.315762"));
        assert_eq!(t.to_calendar(&scale), CalendarDateTime::parse("1966-01-02").unwrap());
    }

    #[test]
    fn linear_regimes_match_published_values() {
        let scale = utc();
        let t = at("1970-01-01", &scale);
        assert_eq!(scale.offset_from_tai(t), secs("-8.000082"));
        let leap_1972 = scale.entries()[13].leap();
        assert!((leap_1972.to_seconds_f64() - 0.107_758).abs() < 1e-3, "{leap_1972}");
    }

    #[test]
    fn prehistory_reads_as_tai() {
        let scale = utc();
        let t = at("1960-06-01T12:00:00", &TAI);
        assert!(scale.offset_from_tai(t).is_zero());

        let recent_only = UtcScale::without_linear_history(default_leap_second_history()).unwrap();
        let t1965 = at("1965-06-01", &TAI);
        assert!(recent_only.offset_from_tai(t1965).is_zero());
        assert!(!scale.offset_from_tai(t1965).is_zero());
        let after = at("1980-06-01", &recent_only);
        assert_eq!(recent_only.offset_from_tai(after), ExactOffset::new(-19, 0));
    }

    #[test]
    fn leap_second_arithmetic() {
        let scale = utc();
        let before = at("2005-12-31T23:59:59", &scale);
        let after = at("2006-01-01T00:00:00", &scale);
        assert_eq!(after.offset_from(before, &scale), ExactOffset::SECOND);
        assert_eq!(after.duration_from(before), ExactOffset::new(2, 0));
    }

    #[test]
    fn readings_inside_a_leap() {
        let scale = utc();
        let t = at("2005-12-31T23:59:59", &scale) + secs("1.5");
        assert!(scale.inside_leap(t));
        assert_eq!(scale.leap_at(t), ExactOffset::SECOND);
        assert_eq!(scale.minute_duration(t), 61);
        let reading = t.to_calendar(&scale);
        assert_eq!(reading, CalendarDateTime::parse("2005-12-31T23:59:60.5").unwrap());
        assert_eq!(Instant::from_calendar(&reading, &scale), t);
        assert_eq!(t.to_rfc3339(&scale), "2005-12-31T23:59:60.5Z");

        let edge = at("2005-12-31T23:59:60.9996", &scale);
        assert_eq!(edge.format(&scale, 3), "2006-01-01T00:00:00.000");
        assert_eq!(edge.format(&scale, 4), "2005-12-31T23:59:60.9996");
    }

    #[test]
    fn minute_duration_around_a_leap() {
        let scale = utc();
        assert_eq!(scale.minute_duration(at("2005-12-31T23:59:00", &scale)), 61);
        assert_eq!(scale.minute_duration(at("2005-12-31T23:58:59.999", &scale)), 60);
        assert_eq!(scale.minute_duration(at("2006-01-01T00:00:00", &scale)), 60);
        assert_eq!(scale.minute_duration(at("2005-06-30T23:59:30", &scale)), 60);
        assert!(!scale.inside_leap(at("2006-01-01T00:00:00", &scale)));
        assert_eq!(scale.leap_at(at("1985-01-01", &scale)), ExactOffset::SECOND);
    }

    #[test]
    fn no_sixty_outside_a_leap() {
        let scale = utc();
        let t = at("2005-06-30T23:59:59.9999", &scale);
        assert_eq!(t.format(&scale, 3), "2005-07-01T00:00:00.000");
        let rounded = t.to_calendar(&scale).round_if_needed(60, 3);
        assert!(!rounded.to_string().contains("60.000"));
    }

    #[test]
    fn readings_round_trip_after_every_leap() {
        let scale = utc();
        let tolerance = ExactOffset::new(0, 10);
        for entry in scale.entries() {
            for delay in [secs("0.25"), secs("1000"), ExactOffset::DAY * 30] {
                let t = entry.validity_start() + delay;
                let reading = t.to_calendar(&scale);
                let back = Instant::from_calendar(&reading, &scale);
                assert!(
                    back.duration_from(t).abs() <= tolerance,
                    "{reading} does not round trip: {}",
                    back.duration_from(t)
                );
            }
        }
    }

    #[test]
    fn fractional_leaps_end_on_the_new_midnight() {
        let scale = utc();
        let tolerance = ExactOffset::new(0, 10);
        let linear = scale
            .entries()
            .iter()
            .filter(|entry| entry.slope_nanos_per_day() != 0);
        for entry in linear {
            if entry.leap() > ExactOffset::ZERO {
                let midnight = CalendarDateTime::from(CalendarDate::from_mjd(entry.mjd()));
                assert_eq!(entry.validity_start().to_calendar(&scale), midnight);
                assert!(!scale.inside_leap(entry.validity_start()));
            }
            for delay in [
                ExactOffset::ZERO,
                ExactOffset::NANOSECOND,
                ExactOffset::MICROSECOND,
                ExactOffset::MILLISECOND,
            ] {
                let t = entry.validity_start() + delay;
                let reading = t.to_calendar(&scale);
                let back = Instant::from_calendar(&reading, &scale);
                assert!(
                    back.duration_from(t).abs() <= tolerance,
                    "{reading} does not round trip: {}",
                    back.duration_from(t)
                );
            }
        }
    }

    #[test]
    fn first_linear_leap_reading() {
        let scale = utc();
        let first = scale.entries()[0];
        assert_eq!(first.validity_start() - first.leap_start(), secs("1.422818"));
        let t = first.validity_start() + ExactOffset::MILLISECOND;
        let reading = t.to_calendar(&scale);
        assert_eq!(reading.date(), CalendarDate::new(1961, 1, 1).unwrap());
        assert!(reading.time().seconds_in_utc_day() < ExactOffset::MILLISECOND);
        assert!(reading.time().seconds_in_utc_day() > ExactOffset::new(0, 999_999_000_000_000));
    }

    #[test]
    fn constant_rows_round_trip_exactly() {
        let scale = utc();
        for text in ["1972-01-01T00:00:00", "1999-01-01T12:34:56.789", "2017-01-01T00:00:00"] {
            let reading = CalendarDateTime::parse(text).unwrap();
            let t = Instant::from_calendar(&reading, &scale);
            assert_eq!(t.to_calendar(&scale), reading);
        }
    }

    #[test]
    fn known_leap_bounds() {
        let scale = utc();
        assert!(scale.first_known_leap_second() < scale.last_known_leap_second());
        let last = scale.last_known_leap_second();
        assert_eq!(
            (last + ExactOffset::SECOND).to_calendar(&scale),
            CalendarDateTime::parse("2017-01-01").unwrap()
        );
    }

    #[test]
    fn glonass_is_utc_plus_three_hours() {
        let utc = Arc::new(utc());
        let glonass = GlonassScale::new(Arc::clone(&utc));
        let t = at("2010-03-04T05:06:07", utc.as_ref());
        assert_eq!(
            t.to_calendar(&glonass),
            CalendarDateTime::parse("2010-03-04T08:06:07").unwrap()
        );
        assert_eq!(at("2010-03-04T08:06:07", &glonass), t);

        let leap = at("2005-12-31T23:59:60.5", utc.as_ref());
        assert_eq!(at("2006-01-01T02:59:60.5", &glonass), leap);
        assert_eq!(
            leap.to_calendar(&glonass),
            CalendarDateTime::parse("2006-01-01T02:59:60.5").unwrap()
        );
        assert_eq!(glonass.minute_duration(leap), 61);
        assert_eq!(glonass.name(), "GLONASS");
    }

    #[test]
    fn scale_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<UtcScale>();
        assert_send_sync::<GlonassScale>();
    }
}
