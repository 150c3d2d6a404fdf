//! # Cart Totals
//!
//! The one piece of real arithmetic in the register: turning lines, a
//! discount and a tax rate into the five numbers shown on screen.
//!
//! ## Order of Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  lines ──► subtotal = Σ unit_price × quantity                           │
//! │                │                                                        │
//! │                ▼                                                        │
//! │  discount ──► discount_amount  (fixed: cents │ percentage: bps of sub) │
//! │                │   clamped to [0, subtotal]                             │
//! │                ▼                                                        │
//! │            taxable = subtotal - discount_amount                         │
//! │                │                                                        │
//! │  tax rate ──► tax_amount = taxable × rate                               │
//! │                │                                                        │
//! │                ▼                                                        │
//! │            total = taxable + tax_amount                                 │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Totals are never cached on the cart. Every accessor calls
//! [`calculate_cart_totals`] on the current state.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::cart::CartLine;
use crate::money::Money;
use crate::types::{DiscountSpec, TaxRate};

/// Snapshot of derived cart totals.
///
/// `total == subtotal - discount_amount + tax_amount` always holds, with
/// `Money`'s saturating operators: a cart priced past `i64::MAX` cents
/// reports `i64::MAX`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    pub subtotal: Money,
    pub discount_amount: Money,
    pub taxable_amount: Money,
    pub tax_amount: Money,
    pub total: Money,
    pub item_count: i64,
}

/// Computes totals for a set of lines.
///
/// A discount larger than the subtotal (a fixed amount above it, or a
/// percentage above 100%) is capped at the subtotal, and a negative one
/// is raised to zero, so neither the taxable amount nor the total can go
/// below zero for non-negative prices.
pub fn calculate_cart_totals(
    lines: &[CartLine],
    discount: &DiscountSpec,
    tax_rate: TaxRate,
) -> CartTotals {
    let subtotal: Money = lines.iter().map(CartLine::line_total).sum();

    let discount_amount = discount
        .raw_amount(subtotal)
        .clamp_between(Money::zero(), subtotal);

    // Line totals saturate, so the subtotal may already sit at i64::MAX
    let taxable_amount = subtotal.saturating_sub(discount_amount);
    let tax_amount = taxable_amount.calculate_tax(tax_rate);
    let total = taxable_amount.saturating_add(tax_amount);

    let item_count = lines
        .iter()
        .fold(0i64, |count, line| count.saturating_add(line.quantity));

    CartTotals {
        subtotal,
        discount_amount,
        taxable_amount,
        tax_amount,
        total,
        item_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CatalogProduct;

    fn line(id: &str, price_cents: i64, quantity: i64) -> CartLine {
        let product = CatalogProduct::new(id, format!("Product {}", id), Money::from_cents(price_cents));
        let mut line = CartLine::from_product(&product);
        line.quantity = quantity;
        line
    }

    fn sample_lines() -> Vec<CartLine> {
        vec![line("P1", 1000, 2), line("P2", 500, 3)]
    }

    #[test]
    fn test_percentage_discount_then_tax() {
        let totals = calculate_cart_totals(
            &sample_lines(),
            &DiscountSpec::percentage_bps(1000),
            TaxRate::from_bps(1800),
        );

        assert_eq!(totals.subtotal.cents(), 3500);
        assert_eq!(totals.discount_amount.cents(), 350);
        assert_eq!(totals.taxable_amount.cents(), 3150);
        assert_eq!(totals.tax_amount.cents(), 567);
        assert_eq!(totals.total.cents(), 3717);
        assert_eq!(totals.item_count, 5);
    }

    #[test]
    fn test_fixed_discount_then_tax() {
        let totals = calculate_cart_totals(
            &sample_lines(),
            &DiscountSpec::fixed(Money::from_cents(500)),
            TaxRate::from_bps(1800),
        );

        assert_eq!(totals.discount_amount.cents(), 500);
        assert_eq!(totals.taxable_amount.cents(), 3000);
        assert_eq!(totals.tax_amount.cents(), 540);
        assert_eq!(totals.total.cents(), 3540);
    }

    #[test]
    fn test_empty_lines_are_all_zero() {
        let totals = calculate_cart_totals(&[], &DiscountSpec::default(), TaxRate::from_bps(1800));
        assert_eq!(totals, CartTotals::default());
    }

    #[test]
    fn test_discount_capped_at_subtotal() {
        let lines = sample_lines();

        let over_percentage =
            calculate_cart_totals(&lines, &DiscountSpec::percentage_bps(15_000), TaxRate::from_bps(1800));
        assert_eq!(over_percentage.discount_amount.cents(), 3500);
        assert_eq!(over_percentage.total.cents(), 0);

        let over_fixed = calculate_cart_totals(
            &lines,
            &DiscountSpec::fixed(Money::from_cents(9999)),
            TaxRate::from_bps(1800),
        );
        assert_eq!(over_fixed.discount_amount.cents(), 3500);
        assert_eq!(over_fixed.tax_amount.cents(), 0);
        assert_eq!(over_fixed.total.cents(), 0);
    }

    #[test]
    fn test_negative_fixed_discount_ignored() {
        let totals = calculate_cart_totals(
            &sample_lines(),
            &DiscountSpec::fixed(Money::from_cents(-500)),
            TaxRate::zero(),
        );
        assert_eq!(totals.discount_amount.cents(), 0);
        assert_eq!(totals.total.cents(), 3500);
    }

    #[test]
    fn test_total_identity_holds() {
        let rates = [0, 825, 1800, 2500];
        let discounts = [
            DiscountSpec::default(),
            DiscountSpec::fixed(Money::from_cents(123)),
            DiscountSpec::percentage_bps(333),
            DiscountSpec::percentage_bps(20_000),
        ];

        for bps in rates {
            for discount in &discounts {
                let t = calculate_cart_totals(&sample_lines(), discount, TaxRate::from_bps(bps));
                assert_eq!(t.total, t.subtotal - t.discount_amount + t.tax_amount);
                assert_eq!(t.taxable_amount, t.subtotal - t.discount_amount);
            }
        }
    }

    #[test]
    fn test_absurd_quantity_saturates() {
        let lines = vec![line("P1", 1000, i64::MAX)];
        let max = Money::from_cents(i64::MAX);

        let totals = calculate_cart_totals(&lines, &DiscountSpec::default(), TaxRate::from_bps(1800));
        assert_eq!(totals.subtotal, max);
        assert_eq!(totals.discount_amount, Money::zero());
        assert_eq!(totals.taxable_amount, max);
        assert_eq!(totals.tax_amount, max.calculate_tax(TaxRate::from_bps(1800)));
        assert_eq!(totals.total, max);
        assert_eq!(totals.item_count, i64::MAX);

        let discounted =
            calculate_cart_totals(&lines, &DiscountSpec::percentage_bps(1000), TaxRate::from_bps(1800));
        assert_eq!(discounted.discount_amount, max.portion_bps(1000));
        assert_eq!(discounted.total, max);
        assert_eq!(
            discounted.total,
            discounted.subtotal - discounted.discount_amount + discounted.tax_amount
        );
    }

    #[test]
    fn test_absurd_negative_price_saturates() {
        let lines = vec![line("P1", -1000, i64::MAX)];
        let min = Money::from_cents(i64::MIN);

        let totals = calculate_cart_totals(&lines, &DiscountSpec::default(), TaxRate::from_bps(1800));
        assert_eq!(totals.subtotal, min);
        assert_eq!(totals.discount_amount, Money::zero());
        assert_eq!(totals.total, min);
    }
}
