//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004         ❌ WRONG!                     │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    3500 - 350 = 3150 cents                                              │
//! │    3150 * 1800 bps / 10000 = 567 cents     ✅ exactly 5.67              │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use till_core::money::Money;
//!
//! let price = Money::from_cents(1099); // $10.99
//! let doubled = price * 2;             // $21.98
//! let total = price + Money::from_cents(500);
//! assert_eq!(total.cents(), 1599);
//! assert_eq!(doubled.cents(), 2198);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

use crate::types::TaxRate;

/// Basis points in 100%.
pub const BPS_SCALE: i128 = 10_000;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: a garbage-in negative price must still produce
///   a number, never a panic
/// - **Single field tuple struct**: Zero-cost abstraction over i64
///
/// ## Where Money Flows
/// ```text
/// CatalogProduct.unit_price ──► CartLine.unit_price ──► CartLine::line_total()
///                                                              │
///                         Cart subtotal ◄──────────────────────┘
///                              │
///                              ├──► discount_amount ──► taxable_amount
///                              │                              │
///                              │                    calculate_tax(rate)
///                              ▼                              │
///                         OrderRequest.total ◄────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ```rust
    /// use till_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // Represents $10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from major and minor units (dollars and cents).
    ///
    /// ```rust
    /// use till_core::money::Money;
    ///
    /// assert_eq!(Money::from_major_minor(10, 99).cents(), 1099);
    /// assert_eq!(Money::from_major_minor(-5, 50).cents(), -550);
    /// ```
    ///
    /// For negative amounts only the major unit carries the sign:
    /// `from_major_minor(-5, 50)` is -$5.50, not -$4.50.
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (dollars) portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Calculates tax on this amount.
    ///
    /// ## Implementation
    /// Integer math with half-up rounding: `(amount * bps + 5000) / 10000`.
    /// i128 keeps large carts from overflowing the intermediate product.
    ///
    /// ```rust
    /// use till_core::money::Money;
    /// use till_core::types::TaxRate;
    ///
    /// let taxable = Money::from_cents(3150); // $31.50
    /// let rate = TaxRate::from_bps(1800);    // 18%
    ///
    /// assert_eq!(taxable.calculate_tax(rate).cents(), 567);
    /// ```
    ///
    /// ## User Workflow
    /// ```text
    /// Taxable amount: $31.50
    ///      │
    ///      ▼
    /// calculate_tax(18%) ← THIS FUNCTION
    ///      │
    ///      ▼
    /// Tax: $5.67 ──► Grand Total: $37.17
    /// ```
    pub fn calculate_tax(&self, rate: TaxRate) -> Money {
        self.portion_bps(rate.bps())
    }

    /// Returns `bps / 10000` of this amount, rounded half-up to the cent.
    ///
    /// Used for percentage discounts: 10% of $35.00 is `portion_bps(1000)`.
    ///
    /// ```rust
    /// use till_core::money::Money;
    ///
    /// let subtotal = Money::from_cents(3500);
    /// assert_eq!(subtotal.portion_bps(1000).cents(), 350);
    /// ```
    pub fn portion_bps(&self, bps: u32) -> Money {
        let scaled = (self.0 as i128 * bps as i128 + BPS_SCALE / 2) / BPS_SCALE;
        Money::from_cents(clamp_i128(scaled))
    }

    /// Multiplies money by a quantity.
    ///
    /// Saturates at `i64::MAX`/`i64::MIN`: quantities are not bounded in the
    /// cart core, and the arithmetic operators saturate too, so an absurd
    /// quantity pins the totals at the limit instead of overflowing.
    ///
    /// ```rust
    /// use till_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(299); // $2.99
    /// assert_eq!(unit_price.multiply_quantity(3).cents(), 897);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }

    /// Saturating addition.
    #[inline]
    pub const fn saturating_add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }

    /// Saturating subtraction.
    #[inline]
    pub const fn saturating_sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }

    /// Clamps the value into `[min, max]`.
    ///
    /// Unlike `Ord::clamp` this never panics: when `max < min`, `min` wins.
    #[inline]
    pub fn clamp_between(self, min: Money, max: Money) -> Money {
        if self > max {
            if max < min {
                min
            } else {
                max
            }
        } else if self < min {
            min
        } else {
            self
        }
    }
}

fn clamp_i128(value: i128) -> i64 {
    if value > i64::MAX as i128 {
        i64::MAX
    } else if value < i64::MIN as i128 {
        i64::MIN
    } else {
        value as i64
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Debug-friendly display. The wire format is always plain cents.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            self.dollars().abs(),
            self.cents_part()
        )
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

// Operators saturate like `multiply_quantity` and `Sum`, so no chain of
// cart arithmetic can panic or wrap.

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        self.saturating_add(other)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        *self = self.saturating_add(other);
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        self.saturating_sub(other)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        *self = self.saturating_sub(other);
    }
}

/// Multiplication by i64 (for quantity calculations).
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        self.multiply_quantity(qty)
    }
}

/// Saturating sum, so summing line totals never panics.
impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Money::saturating_add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.dollars(), 10);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_from_major_minor() {
        assert_eq!(Money::from_major_minor(10, 99).cents(), 1099);
        assert_eq!(Money::from_major_minor(-5, 50).cents(), -550);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(3717)), "$37.17");
        assert_eq!(format!("{}", Money::from_cents(500)), "$5.00");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-$5.50");
        assert_eq!(format!("{}", Money::from_cents(0)), "$0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!((a * 3).cents(), 3000);
    }

    #[test]
    fn test_tax_exact() {
        // $31.50 at 18% = $5.67 exactly
        let tax = Money::from_cents(3150).calculate_tax(TaxRate::from_bps(1800));
        assert_eq!(tax.cents(), 567);

        // $30.00 at 18% = $5.40
        let tax = Money::from_cents(3000).calculate_tax(TaxRate::from_bps(1800));
        assert_eq!(tax.cents(), 540);
    }

    #[test]
    fn test_tax_rounds_half_up() {
        // $10.00 at 8.25% = $0.825 → $0.83
        let tax = Money::from_cents(1000).calculate_tax(TaxRate::from_bps(825));
        assert_eq!(tax.cents(), 83);

        // $0.10 at 8% = $0.008 → $0.01
        let tax = Money::from_cents(10).calculate_tax(TaxRate::from_bps(800));
        assert_eq!(tax.cents(), 1);
    }

    #[test]
    fn test_portion_bps() {
        let subtotal = Money::from_cents(3500);
        assert_eq!(subtotal.portion_bps(1000).cents(), 350); // 10%
        assert_eq!(subtotal.portion_bps(10_000).cents(), 3500); // 100%
        assert_eq!(subtotal.portion_bps(0).cents(), 0);
        assert_eq!(subtotal.portion_bps(15_000).cents(), 5250); // 150%, unclamped here
    }

    #[test]
    fn test_multiply_quantity_saturates() {
        assert_eq!(Money::from_cents(299).multiply_quantity(3).cents(), 897);
        assert_eq!(Money::from_cents(i64::MAX).multiply_quantity(2).cents(), i64::MAX);
    }

    #[test]
    fn test_operators_saturate() {
        let max = Money::from_cents(i64::MAX);
        let min = Money::from_cents(i64::MIN);
        let tax = Money::from_cents(567);

        assert_eq!(max + tax, max);
        assert_eq!(min - tax, min);

        let mut total = max;
        total += tax;
        assert_eq!(total, max);

        let mut owed = min;
        owed -= tax;
        assert_eq!(owed, min);
    }

    #[test]
    fn test_sum_of_lines() {
        let total: Money = [2000, 1500].into_iter().map(Money::from_cents).sum();
        assert_eq!(total.cents(), 3500);
    }

    #[test]
    fn test_clamp_between() {
        let zero = Money::zero();
        let cap = Money::from_cents(3500);

        assert_eq!(Money::from_cents(500).clamp_between(zero, cap).cents(), 500);
        assert_eq!(Money::from_cents(5000).clamp_between(zero, cap).cents(), 3500);
        assert_eq!(Money::from_cents(-10).clamp_between(zero, cap).cents(), 0);

        // Negative cap (garbage prices): the floor wins
        let negative_cap = Money::from_cents(-100);
        assert_eq!(Money::from_cents(50).clamp_between(zero, negative_cap).cents(), 0);
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Money::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_positive());
        assert!(!zero.is_negative());

        assert!(Money::from_cents(100).is_positive());
        assert!(Money::from_cents(-100).is_negative());
    }
}
