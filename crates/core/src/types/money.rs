//! Monetary amounts in integer minor units.
//!
//! All cart and checkout arithmetic happens in minor units (paise) so that
//! subtotals are exact and the only rounding point is rate application
//! (GST), which rounds half-up to the nearest minor unit. Display and
//! checkout must share that single rounding rule or the order summary and
//! the stored order disagree by a paisa.

use core::fmt;
use core::iter::Sum;
use core::ops::{Add, AddAssign};

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Money`] value.
#[derive(thiserror::Error, Debug, Clone)]
pub enum MoneyError {
    /// The input string is empty.
    #[error("amount cannot be empty")]
    Empty,
    /// The input is not a valid decimal number.
    #[error("amount is not a valid decimal: {0}")]
    NotANumber(String),
    /// The amount is negative.
    #[error("amount cannot be negative")]
    Negative,
    /// The amount has sub-minor-unit precision.
    #[error("amount must have at most {max} decimal places")]
    TooPrecise {
        /// Maximum number of decimal places.
        max: u32,
    },
    /// The amount does not fit in a 64-bit minor-unit count.
    #[error("amount is out of range")]
    OutOfRange,
}

/// A monetary amount stored as a count of minor units (paise).
///
/// ## Examples
///
/// ```
/// use foodiehub_core::Money;
///
/// let price = Money::parse("40.00").unwrap();
/// assert_eq!(price.minor_units(), 4000);
/// assert_eq!(price.to_string(), "₹40.00");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// The zero amount.
    pub const ZERO: Self = Self(0);

    /// Number of minor units per major unit (paise per rupee).
    pub const MINOR_UNITS_PER_MAJOR: i64 = 100;

    /// Number of decimal places in the minor unit.
    pub const DECIMAL_PLACES: u32 = 2;

    /// Create an amount from a count of minor units.
    #[must_use]
    pub const fn from_minor_units(minor: i64) -> Self {
        Self(minor)
    }

    /// Get the amount as a count of minor units.
    #[must_use]
    pub const fn minor_units(&self) -> i64 {
        self.0
    }

    /// Whether this amount is zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Parse an amount from a decimal string in major units (e.g. `"40.00"`).
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty, not a decimal number,
    /// negative, more precise than the minor unit, or out of range.
    pub fn parse(s: &str) -> Result<Self, MoneyError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(MoneyError::Empty);
        }

        let amount: Decimal = trimmed
            .parse()
            .map_err(|_| MoneyError::NotANumber(trimmed.to_owned()))?;

        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(MoneyError::Negative);
        }

        let minor = amount * Decimal::from(Self::MINOR_UNITS_PER_MAJOR);
        if !minor.fract().is_zero() {
            return Err(MoneyError::TooPrecise {
                max: Self::DECIMAL_PLACES,
            });
        }

        minor
            .to_i64()
            .map(Self)
            .ok_or(MoneyError::OutOfRange)
    }

    /// Multiply by a line quantity.
    #[must_use]
    pub const fn times(self, quantity: u32) -> Self {
        Self(self.0 * quantity as i64)
    }

    /// Apply a fractional rate (e.g. a 5% tax rate as `0.05`) and round
    /// half-up to the nearest minor unit.
    ///
    /// Saturates at `i64::MAX` minor units if the product is out of range.
    #[must_use]
    pub fn apply_rate(self, rate: Decimal) -> Self {
        let product = Decimal::from(self.0) * rate;
        let rounded = product.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
        Self(rounded.to_i64().unwrap_or(i64::MAX))
    }

    /// Checked addition, `None` on overflow.
    #[must_use]
    pub const fn checked_add(self, other: Self) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(minor) => Some(Self(minor)),
            None => None,
        }
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let minor = self.0.unsigned_abs();
        let per_major = Self::MINOR_UNITS_PER_MAJOR.unsigned_abs();
        write!(
            f,
            "{sign}₹{}.{:02}",
            minor / per_major,
            minor % per_major
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn rate(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_parse_valid_amounts() {
        assert_eq!(Money::parse("40.00").unwrap().minor_units(), 4000);
        assert_eq!(Money::parse("40").unwrap().minor_units(), 4000);
        assert_eq!(Money::parse("0.05").unwrap().minor_units(), 5);
        assert_eq!(Money::parse("0").unwrap().minor_units(), 0);
        assert_eq!(Money::parse(" 12.50 ").unwrap().minor_units(), 1250);
    }

    #[test]
    fn test_parse_empty() {
        assert!(matches!(Money::parse(""), Err(MoneyError::Empty)));
        assert!(matches!(Money::parse("   "), Err(MoneyError::Empty)));
    }

    #[test]
    fn test_parse_not_a_number() {
        assert!(matches!(
            Money::parse("forty"),
            Err(MoneyError::NotANumber(_))
        ));
    }

    #[test]
    fn test_parse_negative() {
        assert!(matches!(Money::parse("-1.00"), Err(MoneyError::Negative)));
    }

    #[test]
    fn test_parse_too_precise() {
        assert!(matches!(
            Money::parse("1.005"),
            Err(MoneyError::TooPrecise { max: 2 })
        ));
    }

    #[test]
    fn test_times() {
        let price = Money::from_minor_units(100);
        assert_eq!(price.times(5).minor_units(), 500);
        assert_eq!(price.times(0).minor_units(), 0);
    }

    #[test]
    fn test_apply_rate_rounds_half_up() {
        // 500 × 0.05 = 25 exactly
        assert_eq!(
            Money::from_minor_units(500).apply_rate(rate("0.05")),
            Money::from_minor_units(25)
        );
        // 50 × 0.05 = 2.5, rounds up to 3
        assert_eq!(
            Money::from_minor_units(50).apply_rate(rate("0.05")),
            Money::from_minor_units(3)
        );
        // 49 × 0.05 = 2.45, rounds down to 2
        assert_eq!(
            Money::from_minor_units(49).apply_rate(rate("0.05")),
            Money::from_minor_units(2)
        );
        // zero rate
        assert_eq!(
            Money::from_minor_units(999).apply_rate(rate("0")),
            Money::ZERO
        );
    }

    #[test]
    fn test_sum_and_add() {
        let total: Money = [100, 250, 50]
            .into_iter()
            .map(Money::from_minor_units)
            .sum();
        assert_eq!(total, Money::from_minor_units(400));

        let mut running = Money::ZERO;
        running += Money::from_minor_units(42);
        assert_eq!(running + Money::from_minor_units(8), Money::from_minor_units(50));
    }

    #[test]
    fn test_checked_add_overflow() {
        let max = Money::from_minor_units(i64::MAX);
        assert!(max.checked_add(Money::from_minor_units(1)).is_none());
        assert_eq!(
            Money::from_minor_units(1).checked_add(Money::from_minor_units(2)),
            Some(Money::from_minor_units(3))
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_minor_units(4000).to_string(), "₹40.00");
        assert_eq!(Money::from_minor_units(5).to_string(), "₹0.05");
        assert_eq!(Money::from_minor_units(0).to_string(), "₹0.00");
        assert_eq!(Money::from_minor_units(-250).to_string(), "-₹2.50");
    }

    #[test]
    fn test_serde_roundtrip() {
        let amount = Money::from_minor_units(1250);
        let json = serde_json::to_string(&amount).unwrap();
        assert_eq!(json, "1250");

        let parsed: Money = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, amount);
    }
}
