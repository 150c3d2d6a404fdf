//! # Domain Types
//!
//! Value types shared by the cart, the totals engine and checkout.
//!
//! ## Type Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │ CatalogProduct  │   │  DiscountSpec   │   │   CustomerRef   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  product_id     │   │  amount         │   │  id             │       │
//! │  │  name           │   │  kind           │   │  name           │       │
//! │  │  unit_price     │   │   fixed: cents  │   └─────────────────┘       │
//! │  │  sku?, image?   │   │   pct:   bps    │                             │
//! │  └─────────────────┘   └─────────────────┘                             │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │    TaxRate      │   │ PaymentMethod   │                             │
//! │  │  ─────────────  │   │  ─────────────  │                             │
//! │  │  bps (u32)      │   │  Cash (default) │                             │
//! │  │  1800 = 18%     │   │  Card/Upi/Wallet│                             │
//! │  └─────────────────┘   └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000, so 1800 bps is the fraction 0.18.
/// Integer bps keep tax math exact on integer cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Creates a tax rate from a percentage (18.0 → 1800 bps).
    pub fn from_percentage(pct: f64) -> Self {
        TaxRate((pct * 100.0).round().max(0.0) as u32)
    }

    /// Creates a tax rate from a fraction (0.18 → 1800 bps).
    pub fn from_fraction(fraction: f64) -> Self {
        TaxRate((fraction * 10_000.0).round().max(0.0) as u32)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero tax rate.
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }

    /// Checks if tax rate is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::zero()
    }
}

// =============================================================================
// Catalog Product
// =============================================================================

/// The product shape handed over by the catalog when a cashier picks an item.
///
/// The cart copies these fields into a `CartLine`; it never reads the
/// catalog again, so later price edits do not touch an open sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CatalogProduct {
    pub product_id: String,
    pub name: String,
    pub unit_price: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub sku: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub image: Option<String>,
}

impl CatalogProduct {
    /// Creates a product with no sku or image.
    pub fn new(product_id: impl Into<String>, name: impl Into<String>, unit_price: Money) -> Self {
        CatalogProduct {
            product_id: product_id.into(),
            name: name.into(),
            unit_price,
            sku: None,
            image: None,
        }
    }

    /// Attaches a SKU.
    pub fn with_sku(mut self, sku: impl Into<String>) -> Self {
        self.sku = Some(sku.into());
        self
    }

    /// Attaches an image URL.
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }
}

// =============================================================================
// Customer Reference
// =============================================================================

/// Weak reference to a customer record owned by the customer service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CustomerRef {
    pub id: String,
    pub name: String,
}

impl CustomerRef {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        CustomerRef {
            id: id.into(),
            name: name.into(),
        }
    }
}

// =============================================================================
// Payment Method
// =============================================================================

/// How the customer intends to pay. Carried on the order request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    #[default]
    Cash,
    Card,
    Upi,
    Wallet,
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PaymentMethod::Cash => "CASH",
            PaymentMethod::Card => "CARD",
            PaymentMethod::Upi => "UPI",
            PaymentMethod::Wallet => "WALLET",
        };
        f.write_str(name)
    }
}

impl std::str::FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "cash" => Ok(PaymentMethod::Cash),
            "card" => Ok(PaymentMethod::Card),
            "upi" => Ok(PaymentMethod::Upi),
            "wallet" => Ok(PaymentMethod::Wallet),
            _ => Err(format!("Unknown payment method: {}", s)),
        }
    }
}

// =============================================================================
// Discount
// =============================================================================

/// Whether a discount amount is money or a share of the subtotal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum DiscountKind {
    /// `amount` is in cents.
    #[default]
    Fixed,
    /// `amount` is in basis points of the subtotal (1000 = 10%).
    Percentage,
}

impl std::str::FromStr for DiscountKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fixed" => Ok(DiscountKind::Fixed),
            "percentage" | "percent" | "pct" => Ok(DiscountKind::Percentage),
            _ => Err(format!("Unknown discount kind: {}", s)),
        }
    }
}

/// A cart-level discount.
///
/// The default (and the result of clearing) is `{ amount: 0, kind: fixed }`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DiscountSpec {
    pub amount: i64,
    pub kind: DiscountKind,
}

impl DiscountSpec {
    /// A flat amount off the subtotal.
    pub const fn fixed(amount: Money) -> Self {
        DiscountSpec {
            amount: amount.cents(),
            kind: DiscountKind::Fixed,
        }
    }

    /// A share of the subtotal, in basis points.
    pub const fn percentage_bps(bps: i64) -> Self {
        DiscountSpec {
            amount: bps,
            kind: DiscountKind::Percentage,
        }
    }

    /// A share of the subtotal, in percent (10.0 → 1000 bps).
    pub fn percentage(pct: f64) -> Self {
        DiscountSpec::percentage_bps((pct * 100.0).round() as i64)
    }

    /// True for the cleared `{0, fixed}` state.
    pub fn is_none(&self) -> bool {
        *self == DiscountSpec::default()
    }

    /// The requested discount before clamping.
    ///
    /// Negative percentage amounts are treated as zero; negative fixed
    /// amounts pass through and are clamped by the totals engine.
    pub fn raw_amount(&self, subtotal: Money) -> Money {
        match self.kind {
            DiscountKind::Fixed => Money::from_cents(self.amount),
            DiscountKind::Percentage => {
                let bps = u32::try_from(self.amount.max(0)).unwrap_or(u32::MAX);
                subtotal.portion_bps(bps)
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
