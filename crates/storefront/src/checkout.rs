//! Order total computation.
//!
//! A stateless derivation over the cart subtotal and two policy values:
//! a flat delivery fee (waived for an empty cart) and a GST rate applied
//! to the subtotal. Rounding is half-up to the minor unit, the same rule
//! [`Money::apply_rate`] uses everywhere, so the order summary and the
//! stored order always agree.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use foodiehub_core::Money;

use crate::cart::store::CartSnapshot;

/// External pricing policy applied at checkout display time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutPolicy {
    /// Flat delivery fee, applied only when the cart is non-empty.
    pub delivery_fee: Money,
    /// GST rate as a fraction (5% is `0.05`).
    pub tax_rate: Decimal,
}

impl Default for CheckoutPolicy {
    /// The launch pricing: ₹40 delivery, 5% GST.
    fn default() -> Self {
        Self {
            delivery_fee: Money::from_minor_units(4000),
            tax_rate: Decimal::new(5, 2),
        }
    }
}

/// The amounts shown on the order summary card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderTotals {
    pub subtotal: Money,
    pub delivery_fee: Money,
    pub tax: Money,
    pub grand_total: Money,
}

impl OrderTotals {
    /// Compute checkout totals for a cart subtotal.
    ///
    /// `item_count` gates the delivery fee: an empty cart pays neither
    /// fee nor tax on anything, so every component is zero.
    #[must_use]
    pub fn compute(subtotal: Money, item_count: u64, policy: &CheckoutPolicy) -> Self {
        let delivery_fee = if item_count > 0 {
            policy.delivery_fee
        } else {
            Money::ZERO
        };
        let tax = subtotal.apply_rate(policy.tax_rate);

        Self {
            subtotal,
            delivery_fee,
            tax,
            grand_total: subtotal + delivery_fee + tax,
        }
    }

    /// Compute checkout totals straight from a cart snapshot.
    #[must_use]
    pub fn for_snapshot(snapshot: &CartSnapshot, policy: &CheckoutPolicy) -> Self {
        Self::compute(snapshot.subtotal, snapshot.item_count, policy)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn policy(fee_minor: i64, rate: &str) -> CheckoutPolicy {
        CheckoutPolicy {
            delivery_fee: Money::from_minor_units(fee_minor),
            tax_rate: rate.parse().unwrap(),
        }
    }

    #[test]
    fn test_grand_total_scenario() {
        // subtotal 500, fee 40, 5% GST -> tax 25, grand total 565
        let totals = OrderTotals::compute(Money::from_minor_units(500), 5, &policy(40, "0.05"));

        assert_eq!(totals.delivery_fee, Money::from_minor_units(40));
        assert_eq!(totals.tax, Money::from_minor_units(25));
        assert_eq!(totals.grand_total, Money::from_minor_units(565));
    }

    #[test]
    fn test_empty_cart_pays_nothing() {
        let totals = OrderTotals::compute(Money::ZERO, 0, &policy(40, "0.05"));

        assert_eq!(totals.subtotal, Money::ZERO);
        assert_eq!(totals.delivery_fee, Money::ZERO);
        assert_eq!(totals.tax, Money::ZERO);
        assert_eq!(totals.grand_total, Money::ZERO);
    }

    #[test]
    fn test_tax_rounds_half_up() {
        // 50 × 0.05 = 2.5 -> 3
        let totals = OrderTotals::compute(Money::from_minor_units(50), 1, &policy(0, "0.05"));
        assert_eq!(totals.tax, Money::from_minor_units(3));
        assert_eq!(totals.grand_total, Money::from_minor_units(53));
    }

    #[test]
    fn test_for_snapshot_matches_compute() {
        let snapshot = CartSnapshot {
            items: Vec::new(),
            item_count: 3,
            subtotal: Money::from_minor_units(45000),
        };
        let policy = CheckoutPolicy::default();

        assert_eq!(
            OrderTotals::for_snapshot(&snapshot, &policy),
            OrderTotals::compute(Money::from_minor_units(45000), 3, &policy)
        );
    }

    #[test]
    fn test_default_policy_is_launch_pricing() {
        let policy = CheckoutPolicy::default();
        assert_eq!(policy.delivery_fee, Money::from_minor_units(4000));
        assert_eq!(policy.tax_rate, Decimal::new(5, 2));
    }
}
