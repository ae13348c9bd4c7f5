//! # Fixed-Point Amounts
//!
//! Exact decimal arithmetic for salaries, totals and ratios.
//!
//! - `Amount` stores hundredths in a `u64`: two fractional digits, never negative
//! - `RaiseFactor` is an exact positive decimal multiplier (`mantissa / 10^scale`)
//! - Every rescale to two digits rounds half-up
//! - Integer arithmetic only; overflow saturates at `u64::MAX` hundredths

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Fractional digits carried by an `Amount`.
pub const AMOUNT_SCALE: u32 = 2;

/// Largest number of significant digits kept from decimal text.
///
/// Fractional digits past this are truncated; integer digits past it are out of range.
const MAX_DIGITS: u32 = 38;

// =============================================================================
// PARSE ERRORS
// =============================================================================

/// Errors produced when decimal text cannot become an `Amount` or `RaiseFactor`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecimalError {
    #[error("empty decimal")]
    Empty,

    #[error("invalid decimal '{0}'")]
    Malformed(String),

    #[error("negative amount '{0}'")]
    Negative(String),

    #[error("decimal '{0}' is out of range")]
    OutOfRange(String),

    #[error("factor '{0}' must be greater than zero")]
    NotPositive(String),
}

// =============================================================================
// DECIMAL TEXT
// =============================================================================

/// A parsed decimal literal: `(-1)^negative * mantissa / 10^scale`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Decimal {
    negative: bool,
    mantissa: u128,
    scale: u32,
}

/// Parse `[+-]digits[.digits][(e|E)[+-]digits]`.
fn parse_decimal(text: &str) -> Result<Decimal, DecimalError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(DecimalError::Empty);
    }
    let malformed = || DecimalError::Malformed(trimmed.to_string());
    let out_of_range = || DecimalError::OutOfRange(trimmed.to_string());

    let (negative, unsigned) = match trimmed.as_bytes()[0] {
        b'-' => (true, &trimmed[1..]),
        b'+' => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let (body, exponent) = match unsigned.find(['e', 'E']) {
        Some(pos) => {
            let exp: i32 = unsigned[pos + 1..].parse().map_err(|_| malformed())?;
            (&unsigned[..pos], exp)
        }
        None => (unsigned, 0),
    };

    let (int_part, frac_part) = match body.split_once('.') {
        Some((i, f)) => (i, f),
        None => (body, ""),
    };

    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    let no_digits = int_part.is_empty() && frac_part.is_empty();
    if no_digits || !all_digits(int_part) || !all_digits(frac_part) {
        return Err(malformed());
    }

    let digits = format!("{int_part}{frac_part}");
    let significant = digits.trim_start_matches('0');
    let mut scale =
        i64::try_from(frac_part.len()).map_err(|_| out_of_range())? - i64::from(exponent);

    let kept = significant.len().min(MAX_DIGITS as usize);
    let dropped = i64::try_from(significant.len() - kept).map_err(|_| out_of_range())?;
    if dropped > scale {
        return Err(out_of_range());
    }
    scale -= dropped;

    let kept = &significant[..kept];
    let mut mantissa: u128 = if kept.is_empty() {
        0
    } else {
        kept.parse().map_err(|_| out_of_range())?
    };

    if scale < 0 {
        let shift = u32::try_from(-scale).map_err(|_| out_of_range())?;
        mantissa = pow10(shift)
            .and_then(|p| mantissa.checked_mul(p))
            .ok_or_else(out_of_range)?;
        scale = 0;
    } else if scale > i64::from(MAX_DIGITS) {
        // Digits below 10^-38 are truncated.
        let excess = scale - i64::from(MAX_DIGITS);
        mantissa = u32::try_from(excess)
            .ok()
            .and_then(pow10)
            .map_or(0, |p| mantissa / p);
        scale = i64::from(MAX_DIGITS);
    }
    let scale = u32::try_from(scale).map_err(|_| out_of_range())?;

    Ok(Decimal {
        negative,
        mantissa,
        scale,
    })
}

fn pow10(exp: u32) -> Option<u128> {
    10u128.checked_pow(exp)
}

/// `numerator / denominator` rounded half-up. `denominator` must be non-zero.
fn div_round_half_up(numerator: u128, denominator: u128) -> u128 {
    let quotient = numerator / denominator;
    let remainder = numerator % denominator;
    if remainder.saturating_mul(2) >= denominator {
        quotient.saturating_add(1)
    } else {
        quotient
    }
}

fn saturate(value: u128) -> u64 {
    u64::try_from(value).unwrap_or(u64::MAX)
}

// =============================================================================
// AMOUNT
// =============================================================================

/// A non-negative decimal with exactly two fractional digits.
///
/// Used for salaries, salary totals and minimum-wage multiples.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct Amount(u64);

impl Amount {
    pub const ZERO: Self = Self(0);

    /// Create an amount from a count of hundredths (`123` is `1.23`).
    #[must_use]
    pub const fn from_hundredths(hundredths: u64) -> Self {
        Self(hundredths)
    }

    /// Raw count of hundredths.
    #[must_use]
    pub const fn hundredths(self) -> u64 {
        self.0
    }

    /// Integer part.
    #[must_use]
    pub const fn units(self) -> u64 {
        self.0 / 100
    }

    /// Fractional part in hundredths (`0..=99`).
    #[must_use]
    pub const fn cents(self) -> u64 {
        self.0 % 100
    }

    /// Parse decimal text, rounding half-up to two fractional digits.
    ///
    /// `"-0"` is accepted as zero; any other negative value is rejected.
    pub fn parse(text: &str) -> Result<Self, DecimalError> {
        let decimal = parse_decimal(text)?;
        if decimal.negative && decimal.mantissa != 0 {
            return Err(DecimalError::Negative(text.trim().to_string()));
        }

        let hundredths = if decimal.scale <= AMOUNT_SCALE {
            pow10(AMOUNT_SCALE - decimal.scale).and_then(|p| decimal.mantissa.checked_mul(p))
        } else {
            pow10(decimal.scale - AMOUNT_SCALE).map(|p| div_round_half_up(decimal.mantissa, p))
        };

        hundredths
            .and_then(|h| u64::try_from(h).ok())
            .map(Self)
            .ok_or_else(|| DecimalError::OutOfRange(text.trim().to_string()))
    }

    /// Saturating addition.
    #[must_use]
    pub const fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }

    /// Multiply by `factor`, rounding half-up to two digits.
    ///
    /// The factor's integer and fractional parts are applied separately so a
    /// long mantissa never overflows. When `amount * fraction` would not fit,
    /// the fraction is shortened one digit at a time (half-up) until it does.
    #[must_use]
    pub fn scale_by(self, factor: RaiseFactor) -> Self {
        let Some(divisor) = pow10(factor.scale) else {
            return Self(u64::MAX);
        };
        let amount = u128::from(self.0);
        let whole = amount.saturating_mul(factor.mantissa / divisor);

        let mut fraction = factor.mantissa % divisor;
        let mut scale = factor.scale;
        while scale > 0 && amount.checked_mul(fraction).is_none() {
            fraction = div_round_half_up(fraction, 10);
            scale -= 1;
        }
        let part = match (amount.checked_mul(fraction), pow10(scale)) {
            (Some(product), Some(d)) => div_round_half_up(product, d),
            _ => return Self(u64::MAX),
        };

        Self(saturate(whole.saturating_add(part)))
    }

    /// `self / base` rounded half-up to two digits, or `None` when `base` is zero.
    #[must_use]
    pub fn ratio(self, base: Self) -> Option<Self> {
        if base.0 == 0 {
            return None;
        }
        let numerator = u128::from(self.0) * 100;
        Some(Self(saturate(div_round_half_up(
            numerator,
            u128::from(base.0),
        ))))
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.units(), self.cents())
    }
}

impl FromStr for Amount {
    type Err = DecimalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Amount {
    type Error = DecimalError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Amount> for String {
    fn from(amount: Amount) -> Self {
        amount.to_string()
    }
}

impl std::iter::Sum for Amount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Self::saturating_add)
    }
}

// =============================================================================
// RAISE FACTOR
// =============================================================================

/// An exact, strictly positive decimal multiplier (`1.10` is a 10% raise).
///
/// Trailing fractional zeros are normalized away, so `1.10 == 1.1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RaiseFactor {
    mantissa: u128,
    scale: u32,
}

impl RaiseFactor {
    /// The identity multiplier.
    pub const ONE: Self = Self::from_normalized(1, 0);

    /// Build from an already-normalized `mantissa / 10^scale`.
    pub(crate) const fn from_normalized(mantissa: u128, scale: u32) -> Self {
        Self { mantissa, scale }
    }

    /// Parse decimal text; zero and negative factors are rejected.
    pub fn parse(text: &str) -> Result<Self, DecimalError> {
        let decimal = parse_decimal(text)?;
        if decimal.negative || decimal.mantissa == 0 {
            return Err(DecimalError::NotPositive(text.trim().to_string()));
        }

        let mut mantissa = decimal.mantissa;
        let mut scale = decimal.scale;
        while scale > 0 && mantissa % 10 == 0 {
            mantissa /= 10;
            scale -= 1;
        }
        Ok(Self { mantissa, scale })
    }
}

impl fmt::Display for RaiseFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.mantissa.to_string();
        let scale = self.scale as usize;
        if scale == 0 {
            return f.write_str(&digits);
        }
        let padded = format!("{digits:0>width$}", width = scale + 1);
        let (int_part, frac_part) = padded.split_at(padded.len() - scale);
        write!(f, "{int_part}.{frac_part}")
    }
}

impl FromStr for RaiseFactor {
    type Err = DecimalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for RaiseFactor {
    type Error = DecimalError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<RaiseFactor> for String {
    fn from(factor: RaiseFactor) -> Self {
        factor.to_string()
    }
}

// =============================================================================
// TESTS
// =============================================================================
