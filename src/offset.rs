// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Fixed-point signed time offsets with attosecond resolution.
//!
//! [`ExactOffset`] stores a whole number of seconds plus a non-negative
//! fraction in attoseconds (10⁻¹⁸ s). Negative values are normalised like
//! floor division: `-0.25 s` is stored as `seconds = -1`,
//! `attoseconds = 750_000_000_000_000_000`.
//!
//! All arithmetic is carried out on the total attosecond count in `i128`,
//! which holds every finite value exactly (`|i64::MIN| × 10¹⁸ < 2¹²⁷`), so
//! additions, subtractions and integer multiplications never lose precision.
//! The only lossy paths are the explicit float conversions
//! ([`ExactOffset::from_seconds_f64`], [`ExactOffset::to_seconds_f64`]).
//!
//! Three non-finite values share the out-of-range fraction marker
//! `attoseconds = u64::MAX`:
//!
//! | Value | `seconds` |
//! |-------|-----------|
//! | [`ExactOffset::NAN`] | `0` |
//! | [`ExactOffset::POSITIVE_INFINITY`] | `i64::MAX` |
//! | [`ExactOffset::NEGATIVE_INFINITY`] | `i64::MIN` |
//!
//! NaN propagates through every operation and is unordered against any
//! other value. Infinities absorb finite shifts, and arithmetic that
//! overflows the `i64` seconds range saturates to the matching infinity
//! (use [`ExactOffset::checked_add`] to detect that case explicitly).

use crate::error::{TimeError, TimeResult};
use qtty::Seconds;
use std::cmp::Ordering;
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};
use std::str::FromStr;

/// Attoseconds in one second.
pub(crate) const ATTOS_PER_SECOND: u64 = 1_000_000_000_000_000_000;
const A: i128 = ATTOS_PER_SECOND as i128;

/// Fraction marker shared by NaN and the two infinities.
const NON_FINITE: u64 = u64::MAX;

const MAX_TOTAL: i128 = (i64::MAX as i128) * A + (A - 1);
const MIN_TOTAL: i128 = (i64::MIN as i128) * A;

/// Units accepted by [`ExactOffset::from_value`] and
/// [`ExactOffset::rounded_units`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum TimeUnit {
    Day,
    Hour,
    Minute,
    Second,
    Millisecond,
    Microsecond,
    Nanosecond,
    Picosecond,
    Femtosecond,
    Attosecond,
}

impl TimeUnit {
    /// Length of one unit in attoseconds.
    pub const fn attoseconds(self) -> i128 {
        match self {
            TimeUnit::Day => 86_400 * A,
            TimeUnit::Hour => 3_600 * A,
            TimeUnit::Minute => 60 * A,
            TimeUnit::Second => A,
            TimeUnit::Millisecond => 1_000_000_000_000_000,
            TimeUnit::Microsecond => 1_000_000_000_000,
            TimeUnit::Nanosecond => 1_000_000_000,
            TimeUnit::Picosecond => 1_000_000,
            TimeUnit::Femtosecond => 1_000,
            TimeUnit::Attosecond => 1,
        }
    }
}

/// Signed duration (or offset between instants) with attosecond resolution.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExactOffset {
    seconds: i64,
    attoseconds: u64,
}

impl ExactOffset {
    pub const ZERO: Self = Self::raw(0, 0);
    pub const ATTOSECOND: Self = Self::raw(0, 1);
    pub const FEMTOSECOND: Self = Self::raw(0, 1_000);
    pub const PICOSECOND: Self = Self::raw(0, 1_000_000);
    pub const NANOSECOND: Self = Self::raw(0, 1_000_000_000);
    pub const MICROSECOND: Self = Self::raw(0, 1_000_000_000_000);
    pub const MILLISECOND: Self = Self::raw(0, 1_000_000_000_000_000);
    pub const SECOND: Self = Self::raw(1, 0);
    pub const MINUTE: Self = Self::raw(60, 0);
    pub const HOUR: Self = Self::raw(3_600, 0);
    pub const DAY: Self = Self::raw(86_400, 0);
    /// Length of a UTC day ending with a positive leap second.
    pub const DAY_WITH_POSITIVE_LEAP: Self = Self::raw(86_401, 0);

    /// Not-a-number: propagates through arithmetic, unordered.
    pub const NAN: Self = Self::raw(0, NON_FINITE);
    pub const POSITIVE_INFINITY: Self = Self::raw(i64::MAX, NON_FINITE);
    pub const NEGATIVE_INFINITY: Self = Self::raw(i64::MIN, NON_FINITE);

    const fn raw(seconds: i64, attoseconds: u64) -> Self {
        Self {
            seconds,
            attoseconds,
        }
    }

    // ── constructors ──────────────────────────────────────────────────

    /// Build from a possibly denormalised `(seconds, attoseconds)` pair.
    ///
    /// `attoseconds` may be negative or exceed one second; the pair is
    /// normalised so that the fraction lies in `[0, 10¹⁸)`.
    pub const fn new(seconds: i64, attoseconds: i64) -> Self {
        Self::from_total(seconds as i128 * A + attoseconds as i128)
    }

    /// Build from an integer count of `unit`.
    ///
    /// Saturates to an infinity if the product leaves the representable range.
    pub fn from_value(value: i64, unit: TimeUnit) -> Self {
        match (value as i128).checked_mul(unit.attoseconds()) {
            Some(total) => Self::from_total(total),
            None if value < 0 => Self::NEGATIVE_INFINITY,
            None => Self::POSITIVE_INFINITY,
        }
    }

    /// Build from floating-point seconds. This is a lossy conversion.
    pub fn from_seconds_f64(value: f64) -> Self {
        if value.is_nan() {
            return Self::NAN;
        }
        // 2^63: first float whose floor no longer fits in i64
        const LIMIT: f64 = 9_223_372_036_854_775_808.0;
        if value >= LIMIT {
            return Self::POSITIVE_INFINITY;
        }
        if value < -LIMIT {
            return Self::NEGATIVE_INFINITY;
        }
        let whole = value.floor();
        // exact by Sterbenz lemma
        let fraction = value - whole;
        let attos = (fraction * ATTOS_PER_SECOND as f64).round() as i128;
        Self::from_total(whole as i128 * A + attos)
    }

    /// Parse an exact decimal number of seconds such as `"-12.000000000000000001"`
    /// or `"1.5e-3"`. Both `.` and `,` are accepted as decimal separator.
    ///
    /// Digits beyond attosecond resolution are rounded half-up. `NaN`,
    /// `Infinity` and `-Infinity` are recognised.
    pub fn parse(text: &str) -> TimeResult<Self> {
        let err = || TimeError::unparsable("decimal seconds", text);
        let trimmed = text.trim();
        let (negative, body) = match trimmed.as_bytes().first() {
            Some(b'-') => (true, &trimmed[1..]),
            Some(b'+') => (false, &trimmed[1..]),
            _ => (false, trimmed),
        };
        match body {
            "NaN" => return Ok(Self::NAN),
            "Infinity" | "inf" => {
                return Ok(if negative {
                    Self::NEGATIVE_INFINITY
                } else {
                    Self::POSITIVE_INFINITY
                })
            }
            _ => {}
        }

        const MANTISSA_LIMIT: u128 = 1_000_000_000_000_000_000_000_000_000_000_000_000; // 1e36
        let mut mantissa: u128 = 0;
        let mut exponent: i64 = 0;
        let mut digits = 0usize;
        let mut after_point = false;
        let mut bytes = body.bytes().peekable();

        while let Some(&b) = bytes.peek() {
            match b {
                b'0'..=b'9' => {
                    digits += 1;
                    if mantissa < MANTISSA_LIMIT {
                        mantissa = mantissa * 10 + u128::from(b - b'0');
                        if after_point {
                            exponent -= 1;
                        }
                    } else if !after_point {
                        exponent += 1;
                    }
                    bytes.next();
                }
                b'.' | b',' if !after_point => {
                    after_point = true;
                    bytes.next();
                }
                _ => break,
            }
        }
        if digits == 0 {
            return Err(err());
        }

        if let Some(b'e' | b'E') = bytes.peek() {
            bytes.next();
            let exp_negative = match bytes.peek() {
                Some(b'-') => {
                    bytes.next();
                    true
                }
                Some(b'+') => {
                    bytes.next();
                    false
                }
                _ => false,
            };
            let mut exp_value: i64 = 0;
            let mut exp_digits = 0usize;
            while let Some(&b) = bytes.peek() {
                if !b.is_ascii_digit() {
                    break;
                }
                exp_value = (exp_value * 10 + i64::from(b - b'0')).min(1_000_000);
                exp_digits += 1;
                bytes.next();
            }
            if exp_digits == 0 {
                return Err(err());
            }
            exponent += if exp_negative { -exp_value } else { exp_value };
        }
        if bytes.next().is_some() {
            return Err(err());
        }

        // total attoseconds = mantissa × 10^(exponent + 18)
        let shift = exponent + 18;
        let magnitude: Option<u128> = if mantissa == 0 {
            Some(0)
        } else if shift >= 0 {
            if shift > 38 {
                None
            } else {
                mantissa.checked_mul(10u128.pow(shift as u32))
            }
        } else if -shift > 38 {
            Some(0)
        } else {
            let divisor = 10u128.pow((-shift) as u32);
            let quotient = mantissa / divisor;
            let remainder = mantissa % divisor;
            Some(if 2 * remainder >= divisor {
                quotient + 1
            } else {
                quotient
            })
        };

        Ok(match magnitude {
            Some(m) if m <= MAX_TOTAL as u128 => {
                let total = m as i128;
                Self::from_total(if negative { -total } else { total })
            }
            _ if negative => Self::NEGATIVE_INFINITY,
            _ => Self::POSITIVE_INFINITY,
        })
    }

    /// Normalise a total attosecond count, saturating out-of-range values.
    pub(crate) const fn from_total(total: i128) -> Self {
        if total > MAX_TOTAL {
            Self::POSITIVE_INFINITY
        } else if total < MIN_TOTAL {
            Self::NEGATIVE_INFINITY
        } else {
            Self::raw(total.div_euclid(A) as i64, total.rem_euclid(A) as u64)
        }
    }

    // ── accessors ─────────────────────────────────────────────────────

    /// Whole seconds (floor of the represented value).
    #[inline]
    pub const fn seconds(&self) -> i64 {
        self.seconds
    }

    /// Fractional part in attoseconds, always in `[0, 10¹⁸)` for finite values.
    #[inline]
    pub const fn attoseconds(&self) -> u64 {
        self.attoseconds
    }

    #[inline]
    pub const fn is_nan(&self) -> bool {
        self.attoseconds == NON_FINITE && self.seconds == 0
    }

    #[inline]
    pub const fn is_infinite(&self) -> bool {
        self.attoseconds == NON_FINITE && self.seconds != 0
    }

    #[inline]
    pub const fn is_finite(&self) -> bool {
        self.attoseconds != NON_FINITE
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.seconds == 0 && self.attoseconds == 0
    }

    /// True for values strictly below zero (including negative infinity).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.seconds < 0
    }

    /// Total attosecond count of a finite value.
    #[inline]
    pub(crate) const fn total(&self) -> i128 {
        self.seconds as i128 * A + self.attoseconds as i128
    }

    /// Ordering key: infinities map to the `i128` extremes.
    fn key(&self) -> i128 {
        if self.is_finite() {
            self.total()
        } else if self.seconds < 0 {
            i128::MIN
        } else {
            i128::MAX
        }
    }

    // ── arithmetic ────────────────────────────────────────────────────

    /// Exact sum; `None` if the finite result overflows the seconds range.
    pub fn checked_add(self, other: Self) -> Option<Self> {
        match self.non_finite_sum(other) {
            Some(special) => Some(special),
            None => {
                let total = self.total() + other.total();
                (MIN_TOTAL..=MAX_TOTAL)
                    .contains(&total)
                    .then(|| Self::from_total(total))
            }
        }
    }

    /// Exact difference; `None` if the finite result overflows the seconds range.
    pub fn checked_sub(self, other: Self) -> Option<Self> {
        self.checked_add(other.negate())
    }

    /// Result of a sum involving at least one non-finite operand.
    fn non_finite_sum(self, other: Self) -> Option<Self> {
        if self.is_nan() || other.is_nan() {
            Some(Self::NAN)
        } else if self.is_infinite() && other.is_infinite() {
            Some(if self == other { self } else { Self::NAN })
        } else if self.is_infinite() {
            Some(self)
        } else if other.is_infinite() {
            Some(other)
        } else {
            None
        }
    }

    /// Exact sum, saturating to an infinity on overflow.
    pub fn add(self, other: Self) -> Self {
        match self.non_finite_sum(other) {
            Some(special) => special,
            None => Self::from_total(self.total() + other.total()),
        }
    }

    /// Exact difference, saturating to an infinity on overflow.
    pub fn subtract(self, other: Self) -> Self {
        self.add(other.negate())
    }

    pub fn negate(self) -> Self {
        if self.is_nan() {
            self
        } else if self.is_infinite() {
            if self.seconds < 0 {
                Self::POSITIVE_INFINITY
            } else {
                Self::NEGATIVE_INFINITY
            }
        } else {
            Self::from_total(-self.total())
        }
    }

    pub fn abs(self) -> Self {
        if self.is_negative() {
            self.negate()
        } else {
            self
        }
    }

    /// Exact multiplication by an integer.
    pub fn multiply(self, factor: i64) -> Self {
        if self.is_nan() {
            return self;
        }
        if self.is_infinite() {
            return match factor.cmp(&0) {
                Ordering::Equal => Self::NAN,
                Ordering::Greater => self,
                Ordering::Less => self.negate(),
            };
        }
        match self.total().checked_mul(factor as i128) {
            Some(total) => Self::from_total(total),
            None if self.is_negative() != (factor < 0) => Self::NEGATIVE_INFINITY,
            None => Self::POSITIVE_INFINITY,
        }
    }

    /// Division by an integer, rounded toward negative infinity at the
    /// attosecond level.
    pub fn divide(self, divisor: i64) -> Self {
        self.multiply_ratio(1, divisor)
    }

    /// Computes `self × numerator / denominator` without intermediate
    /// rounding; the single final rounding is toward negative infinity.
    pub fn multiply_ratio(self, numerator: i64, denominator: i64) -> Self {
        if denominator == 0 {
            return if self.is_nan() || self.is_zero() || numerator == 0 {
                Self::NAN
            } else if self.is_negative() != (numerator < 0) {
                Self::NEGATIVE_INFINITY
            } else {
                Self::POSITIVE_INFINITY
            };
        }
        let (numerator, denominator) = if denominator < 0 {
            (-(numerator as i128), -(denominator as i128))
        } else {
            (numerator as i128, denominator as i128)
        };
        if !self.is_finite() {
            return match numerator.cmp(&0) {
                Ordering::Equal => Self::NAN,
                Ordering::Greater => self,
                Ordering::Less => self.negate(),
            };
        }
        let total = self.total();
        let quotient = total.div_euclid(denominator);
        let remainder = total.rem_euclid(denominator);
        // remainder < denominator ≤ 2^63, so this product fits in i128
        let tail = (remainder * numerator).div_euclid(denominator);
        match quotient
            .checked_mul(numerator)
            .and_then(|head| head.checked_add(tail))
        {
            Some(result) => Self::from_total(result),
            None if (quotient < 0) != (numerator < 0) => Self::NEGATIVE_INFINITY,
            None => Self::POSITIVE_INFINITY,
        }
    }

    /// Multiplication by a floating-point factor.
    ///
    /// The integer part of the factor is applied exactly; only the
    /// fractional part goes through `f64`.
    pub fn multiply_f64(self, factor: f64) -> Self {
        if factor.is_nan() {
            return Self::NAN;
        }
        if factor.is_infinite() {
            return if self.is_nan() || self.is_zero() {
                Self::NAN
            } else if (factor > 0.0) != self.is_negative() {
                Self::POSITIVE_INFINITY
            } else {
                Self::NEGATIVE_INFINITY
            };
        }
        let whole = factor.trunc();
        if whole.abs() >= 9.0e18 {
            return Self::from_seconds_f64(self.to_seconds_f64() * factor);
        }
        let exact = self.multiply(whole as i64);
        let fraction = factor - whole;
        if fraction == 0.0 {
            exact
        } else {
            exact.add(Self::from_seconds_f64(self.to_seconds_f64() * fraction))
        }
    }

    // ── conversions ───────────────────────────────────────────────────

    /// Approximate value in seconds. This is a lossy conversion.
    pub fn to_seconds_f64(&self) -> f64 {
        if self.is_nan() {
            f64::NAN
        } else if self.is_infinite() {
            if self.seconds < 0 {
                f64::NEG_INFINITY
            } else {
                f64::INFINITY
            }
        } else {
            self.seconds as f64 + self.attoseconds as f64 / ATTOS_PER_SECOND as f64
        }
    }

    /// Value as a typed [`Seconds`] quantity.
    pub fn to_quantity(&self) -> Seconds {
        Seconds::new(self.to_seconds_f64())
    }

    /// Value rounded to the nearest integer count of `unit` (ties toward
    /// positive infinity).
    ///
    /// NaN maps to `0`; infinities and out-of-range values clamp to the
    /// `i64` extremes.
    pub fn rounded_units(&self, unit: TimeUnit) -> i64 {
        if self.is_nan() {
            return 0;
        }
        if self.is_infinite() {
            return if self.seconds < 0 { i64::MIN } else { i64::MAX };
        }
        let size = unit.attoseconds();
        let rounded = (self.total() + size / 2).div_euclid(size);
        rounded.clamp(i64::MIN as i128, i64::MAX as i128) as i64
    }

    /// Round to `digits` fractional decimal digits (ties toward positive
    /// infinity). Non-finite values are returned unchanged.
    pub fn round_to_digits(&self, digits: usize) -> Self {
        if !self.is_finite() || digits >= 18 {
            return *self;
        }
        let step = 10i128.pow((18 - digits) as u32);
        Self::from_total((self.total() + step / 2).div_euclid(step) * step)
    }

    /// Render as a decimal string, `int_width` being the minimum number of
    /// integer digits (zero padded).
    ///
    /// With `digits = Some(n)` the fraction is rounded half-up on the
    /// magnitude and printed with exactly `n` digits; with `None` it is
    /// printed exactly, trailing zeros removed.
    pub(crate) fn format_decimal(&self, digits: Option<usize>, int_width: usize) -> String {
        if self.is_nan() {
            return "NaN".to_string();
        }
        if self.is_infinite() {
            return if self.seconds < 0 {
                "-Infinity".to_string()
            } else {
                "Infinity".to_string()
            };
        }
        let total = self.total();
        let negative = total < 0;
        let magnitude = total.unsigned_abs();
        let mut integer = magnitude / A as u128;
        let fraction = magnitude % A as u128;
        let sign = |integer: u128, fraction_is_zero: bool| {
            if negative && !(integer == 0 && fraction_is_zero) {
                "-"
            } else {
                ""
            }
        };
        match digits {
            Some(n) => {
                let n = n.min(18);
                let step = 10u128.pow((18 - n) as u32);
                let mut scaled = (fraction + step / 2) / step;
                if scaled == 10u128.pow(n as u32) {
                    integer += 1;
                    scaled = 0;
                }
                let sign = sign(integer, scaled == 0);
                if n == 0 {
                    format!("{sign}{integer:0int_width$}")
                } else {
                    format!("{sign}{integer:0int_width$}.{scaled:0n$}")
                }
            }
            None => {
                let sign = sign(integer, fraction == 0);
                if fraction == 0 {
                    format!("{sign}{integer:0int_width$}")
                } else {
                    let padded = format!("{fraction:018}");
                    format!("{sign}{integer:0int_width$}.{}", padded.trim_end_matches('0'))
                }
            }
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Trait implementations
// ═══════════════════════════════════════════════════════════════════════════

impl PartialOrd for ExactOffset {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        // NaN is unordered, even against itself; `==` stays bitwise
        if self.is_nan() || other.is_nan() {
            return None;
        }
        Some(self.key().cmp(&other.key()))
    }
}

impl Default for ExactOffset {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Display for ExactOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_decimal(f.precision(), 1))
    }
}

impl FromStr for ExactOffset {
    type Err = TimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<Seconds> for ExactOffset {
    fn from(seconds: Seconds) -> Self {
        Self::from_seconds_f64(seconds.value())
    }
}

impl From<ExactOffset> for Seconds {
    fn from(offset: ExactOffset) -> Self {
        offset.to_quantity()
    }
}

impl Add for ExactOffset {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        ExactOffset::add(self, rhs)
    }
}

impl AddAssign for ExactOffset {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = ExactOffset::add(*self, rhs);
    }
}

impl Sub for ExactOffset {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        self.subtract(rhs)
    }
}

impl SubAssign for ExactOffset {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        *self = self.subtract(rhs);
    }
}

impl Neg for ExactOffset {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self::Output {
        self.negate()
    }
}

impl Mul<i64> for ExactOffset {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: i64) -> Self::Output {
        self.multiply(rhs)
    }
}

impl Sum for ExactOffset {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, ExactOffset::add)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_values_are_floor_normalised() {
        let o = ExactOffset::new(0, -250_000_000_000_000_000);
        assert_eq!(o.seconds(), -1);
        assert_eq!(o.attoseconds(), 750_000_000_000_000_000);
        assert_eq!(o.to_seconds_f64(), -0.25);

        let o = ExactOffset::new(3, 2_500_000_000_000_000_000);
        assert_eq!(o.seconds(), 5);
        assert_eq!(o.attoseconds(), 500_000_000_000_000_000);
    }

    #[test]
    fn parse_is_exact() {
        let o = ExactOffset::parse("0.000000000000000001").unwrap();
        assert_eq!(o, ExactOffset::ATTOSECOND);

        let o = ExactOffset::parse("-1.5").unwrap();
        assert_eq!(o, ExactOffset::new(-2, 500_000_000_000_000_000));

        let o: ExactOffset = "1,25e2".parse().unwrap();
        assert_eq!(o, ExactOffset::new(125, 0));

        let o = ExactOffset::parse("4.3131700").unwrap();
        assert_eq!(o, ExactOffset::new(4, 313_170_000_000_000_000));

        // rounding past attosecond resolution
        let o = ExactOffset::parse("0.0000000000000000015").unwrap();
        assert_eq!(o, ExactOffset::new(0, 2));
    }

    #[test]
    fn parse_special_and_invalid() {
        assert!(ExactOffset::parse("NaN").unwrap().is_nan());
        assert_eq!(
            ExactOffset::parse("-Infinity").unwrap(),
            ExactOffset::NEGATIVE_INFINITY
        );
        assert_eq!(
            ExactOffset::parse("1e30").unwrap(),
            ExactOffset::POSITIVE_INFINITY
        );
        assert!(ExactOffset::parse("").is_err());
        assert!(ExactOffset::parse("1.2.3").is_err());
        assert!(ExactOffset::parse("12s").is_err());
        assert!(ExactOffset::parse("1e").is_err());
    }

    #[test]
    fn repeated_tenths_do_not_drift() {
        let tenth = ExactOffset::parse("0.1").unwrap();
        let sum: ExactOffset = std::iter::repeat(tenth).take(10_000).sum();
        assert_eq!(sum, ExactOffset::from_value(1_000, TimeUnit::Second));

        let from_float = ExactOffset::from_seconds_f64(0.1);
        let mut acc = ExactOffset::ZERO;
        for _ in 0..10_000 {
            acc += from_float;
        }
        let error = (acc - ExactOffset::new(1_000, 0)).abs();
        assert!(error <= ExactOffset::new(0, 10_000));
    }

    #[test]
    fn integer_multiplication_and_division() {
        let day = ExactOffset::DAY;
        assert_eq!(day * 36_525, ExactOffset::new(3_155_760_000, 0));
        assert_eq!(
            ExactOffset::new(1, 0).divide(3),
            ExactOffset::new(0, 333_333_333_333_333_333)
        );
        assert_eq!(
            ExactOffset::new(-1, 0).divide(3),
            ExactOffset::new(-1, 666_666_666_666_666_666)
        );
        assert_eq!(
            ExactOffset::new(86_400, 2_592_000_000_000_000)
                .multiply_ratio(2_592_000, 86_400_000_000_000 + 2_592_000),
            ExactOffset::new(0, 2_592_000_000_000_000)
        );
    }

    #[test]
    fn fractional_multiplication() {
        let o = ExactOffset::new(10, 0).multiply_f64(2.5);
        assert_eq!(o, ExactOffset::new(25, 0));
        assert!(ExactOffset::SECOND.multiply_f64(f64::NAN).is_nan());
    }

    #[test]
    fn nan_propagates_and_is_unordered() {
        let nan = ExactOffset::NAN;
        assert!((nan + ExactOffset::SECOND).is_nan());
        assert!((ExactOffset::SECOND - nan).is_nan());
        assert!((nan * 3).is_nan());
        assert!(!(nan < ExactOffset::ZERO));
        assert!(!(nan > ExactOffset::ZERO));
        assert!(!(nan == ExactOffset::ZERO));
        assert_eq!(nan, ExactOffset::NAN);
        assert_eq!(nan.partial_cmp(&ExactOffset::NAN), None);
        assert!(!(nan <= ExactOffset::NAN) && !(nan >= ExactOffset::NAN));
        assert!(!(nan < ExactOffset::NAN) && !(nan > ExactOffset::NAN));
        assert!(nan.to_seconds_f64().is_nan());
        assert_eq!(nan.to_string(), "NaN");
    }

    #[test]
    fn infinities_absorb_and_saturate() {
        let inf = ExactOffset::POSITIVE_INFINITY;
        assert_eq!(inf + ExactOffset::DAY, inf);
        assert_eq!(ExactOffset::NEGATIVE_INFINITY - ExactOffset::DAY, -inf);
        assert!((inf + ExactOffset::NEGATIVE_INFINITY).is_nan());
        assert!(ExactOffset::NEGATIVE_INFINITY < ExactOffset::new(i64::MIN, 0));
        assert!(inf > ExactOffset::new(i64::MAX, 999));

        let big = ExactOffset::new(i64::MAX, 0);
        assert_eq!(big + ExactOffset::SECOND, inf);
        assert_eq!(big.checked_add(ExactOffset::SECOND), None);
        assert_eq!(
            big.checked_sub(ExactOffset::SECOND),
            Some(ExactOffset::new(i64::MAX - 1, 0))
        );
        assert_eq!(ExactOffset::DAY * i64::MAX, inf);
    }

    #[test]
    fn rounded_units() {
        let o = ExactOffset::parse("1.0005").unwrap();
        assert_eq!(o.rounded_units(TimeUnit::Millisecond), 1_001);
        assert_eq!(o.rounded_units(TimeUnit::Second), 1);
        let o = ExactOffset::parse("-1.5").unwrap();
        assert_eq!(o.rounded_units(TimeUnit::Second), -1);
        assert_eq!(
            ExactOffset::from_value(3, TimeUnit::Day).rounded_units(TimeUnit::Hour),
            72
        );
        assert_eq!(ExactOffset::NAN.rounded_units(TimeUnit::Second), 0);
    }

    #[test]
    fn display_formats() {
        assert_eq!(ExactOffset::parse("1.5").unwrap().to_string(), "1.5");
        assert_eq!(ExactOffset::parse("-0.25").unwrap().to_string(), "-0.25");
        assert_eq!(ExactOffset::ZERO.to_string(), "0");
        assert_eq!(
            format!("{:.3}", ExactOffset::parse("59.9996").unwrap()),
            "60.000"
        );
        assert_eq!(
            format!("{:.2}", ExactOffset::parse("-0.001").unwrap()),
            "0.00"
        );
        assert_eq!(ExactOffset::NEGATIVE_INFINITY.to_string(), "-Infinity");
    }

    #[test]
    fn float_round_trip_is_close() {
        let o = ExactOffset::from_seconds_f64(-12.345);
        assert!((o.to_seconds_f64() + 12.345).abs() < 1e-12);
        assert_eq!(o.seconds(), -13);
        let q: Seconds = ExactOffset::new(3, 0).into();
        assert_eq!(q, Seconds::new(3.0));
    }

    #[test]
    fn round_to_digits_rounds_half_up() {
        let o = ExactOffset::parse("59.9995").unwrap();
        assert_eq!(o.round_to_digits(3), ExactOffset::new(60, 0));
        let o = ExactOffset::parse("12.3444").unwrap();
        assert_eq!(
            o.round_to_digits(3),
            ExactOffset::parse("12.344").unwrap()
        );
    }
}
