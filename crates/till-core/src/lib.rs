//! # till-core: Pure Cart Logic for Till POS
//!
//! The cart pricing engine of the register: lines, discounts, tax and the
//! derived totals, as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Till POS Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Register (apps/register)                        │   │
//! │  │    console ──► commands ──► RegisterSession                     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ till-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   money   │  │   cart    │  │  totals   │  │ checkout  │  │   │
//! │  │   │   Money   │  │   Cart    │  │ CartTotals│  │OrderRequest│ │   │
//! │  │   │  TaxRate  │  │ CartLine  │  │ calculate │  │ OrderLine │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              till-db (cart snapshot storage)                    │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Value types (TaxRate, DiscountSpec, CatalogProduct, ...)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`cart`] - The cart and its operations
//! - [`totals`] - Subtotal → discount → tax → total
//! - [`checkout`] - Order request built from a cart
//! - [`error`] - Domain error types
//! - [`validation`] - Command-boundary input checks
//!
//! ## Example Usage
//!
//! ```rust
//! use till_core::{Cart, CatalogProduct, DiscountSpec, Money, TaxRate};
//!
//! let mut cart = Cart::new(TaxRate::from_bps(1800)); // 18%
//! let chai = CatalogProduct::new("P1", "Masala Chai", Money::from_cents(1000));
//! let samosa = CatalogProduct::new("P2", "Samosa", Money::from_cents(500));
//!
//! cart.add_item(&chai);
//! cart.add_item(&chai);
//! cart.add_item(&samosa);
//! cart.update_quantity("P2", 3);
//! cart.set_discount(DiscountSpec::percentage_bps(1000)); // 10%
//!
//! assert_eq!(cart.subtotal().cents(), 3500);
//! assert_eq!(cart.discount_amount().cents(), 350);
//! assert_eq!(cart.tax().cents(), 567);
//! assert_eq!(cart.total().cents(), 3717);
//! assert_eq!(cart.item_count(), 5);
//! ```

pub mod cart;
pub mod checkout;
pub mod error;
pub mod money;
pub mod totals;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartLine};
pub use checkout::{OrderLine, OrderRequest};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use totals::{calculate_cart_totals, CartTotals};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Largest quantity accepted at the command boundary.
///
/// Prevents accidental over-ordering (typing 1000 instead of 10).
/// The cart itself does not enforce it.
pub const MAX_ITEM_QUANTITY: i64 = 999;

/// Highest unit price, in cents, accepted at the command boundary
/// ($10,000,000.00).
pub const MAX_UNIT_PRICE_CENTS: i64 = 1_000_000_000;

/// Longest sale note accepted at the command boundary.
pub const MAX_NOTES_LENGTH: usize = 500;
