//! # Cart
//!
//! The in-progress sale: lines, an optional customer, one discount, the tax
//! rate, the chosen payment method and free-text notes.
//!
//! ## Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  Cashier Action           Cart Method               Effect              │
//! │  ──────────────           ───────────               ──────              │
//! │                                                                         │
//! │  Pick product ──────────► add_item() ─────────────► qty+1 or new line  │
//! │  Type quantity ─────────► update_quantity() ──────► qty=n, n≤0 removes │
//! │  Press + / - ───────────► increment / decrement ──► ±1, 1→0 removes   │
//! │  Click remove ──────────► remove_item() ──────────► line gone          │
//! │  Attach customer ───────► set_customer() ─────────► totals unchanged   │
//! │  Apply discount ────────► set_discount() ─────────► totals re-derived  │
//! │  New sale / cancel ─────► clear() ────────────────► empty, tax kept    │
//! │                                                                         │
//! │  NOTE: none of these fail. Input checks live at the command boundary.  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Lifecycle
//! empty → accumulating → (checked out | abandoned) → empty

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::totals::{calculate_cart_totals, CartTotals};
use crate::types::{CatalogProduct, CustomerRef, DiscountSpec, PaymentMethod, TaxRate};

/// One product in the cart.
///
/// Name and price are frozen from the catalog when the line is created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub product_id: String,
    pub name: String,
    pub unit_price: Money,
    pub quantity: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub sku: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub image: Option<String>,
}

impl CartLine {
    /// Creates a line with quantity 1.
    pub fn from_product(product: &CatalogProduct) -> Self {
        CartLine {
            product_id: product.product_id.clone(),
            name: product.name.clone(),
            unit_price: product.unit_price,
            quantity: 1,
            sku: product.sku.clone(),
            image: product.image.clone(),
        }
    }

    /// Extended price (unit price × quantity).
    pub fn line_total(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }
}

/// The shopping cart.
///
/// ## Invariants
/// - At most one line per `product_id`
/// - Every line has quantity ≥ 1 (operations that would reach 0 delete)
/// - Totals are derived, never stored
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    lines: Vec<CartLine>,
    #[serde(default)]
    customer: Option<CustomerRef>,
    #[serde(default)]
    discount: DiscountSpec,
    #[serde(default)]
    tax_rate: TaxRate,
    #[serde(default)]
    payment_method: PaymentMethod,
    #[serde(default)]
    notes: String,
}

impl Cart {
    /// Creates an empty cart taxed at `tax_rate`.
    pub fn new(tax_rate: TaxRate) -> Self {
        Cart {
            tax_rate,
            ..Cart::default()
        }
    }

    // =========================================================================
    // Line Operations
    // =========================================================================

    /// Adds one unit of a product.
    ///
    /// If the product is already in the cart its quantity goes up by exactly
    /// one; the stored name and price are left as they were.
    pub fn add_item(&mut self, product: &CatalogProduct) {
        match self.line_mut(&product.product_id) {
            Some(line) => line.quantity = line.quantity.saturating_add(1),
            None => self.lines.push(CartLine::from_product(product)),
        }
    }

    /// Removes the line for `product_id`. Absent ids are ignored.
    pub fn remove_item(&mut self, product_id: &str) {
        self.lines.retain(|line| line.product_id != product_id);
    }

    /// Sets a line's quantity. `quantity <= 0` removes the line.
    pub fn update_quantity(&mut self, product_id: &str, quantity: i64) {
        if quantity <= 0 {
            self.remove_item(product_id);
            return;
        }

        if let Some(line) = self.line_mut(product_id) {
            line.quantity = quantity;
        }
    }

    /// Adds one to a line's quantity.
    pub fn increment_quantity(&mut self, product_id: &str) {
        if let Some(line) = self.line_mut(product_id) {
            line.quantity = line.quantity.saturating_add(1);
        }
    }

    /// Takes one from a line's quantity; a line at 1 is removed.
    pub fn decrement_quantity(&mut self, product_id: &str) {
        let Some(line) = self.line_mut(product_id) else {
            return;
        };

        if line.quantity <= 1 {
            self.remove_item(product_id);
        } else {
            line.quantity -= 1;
        }
    }

    /// Restores the line invariants on a cart that did not come from the
    /// operations above (a decoded snapshot, for instance).
    ///
    /// Lines with quantity ≤ 0 are dropped and repeated `product_id`s are
    /// folded into the first line, summing quantities as `add_item` would.
    /// Returns `true` if anything changed.
    pub fn normalize_lines(&mut self) -> bool {
        let mut merged: Vec<CartLine> = Vec::with_capacity(self.lines.len());
        let mut changed = false;

        for line in self.lines.drain(..) {
            if line.quantity <= 0 {
                changed = true;
                continue;
            }

            match merged.iter_mut().find(|m| m.product_id == line.product_id) {
                Some(existing) => {
                    existing.quantity = existing.quantity.saturating_add(line.quantity);
                    changed = true;
                }
                None => merged.push(line),
            }
        }

        self.lines = merged;
        changed
    }

    // =========================================================================
    // Sale Attributes
    // =========================================================================

    pub fn set_customer(&mut self, customer: Option<CustomerRef>) {
        self.customer = customer;
    }

    pub fn set_discount(&mut self, discount: DiscountSpec) {
        self.discount = discount;
    }

    /// Resets the discount to `{ amount: 0, kind: fixed }`.
    pub fn clear_discount(&mut self) {
        self.discount = DiscountSpec::default();
    }

    pub fn set_tax_rate(&mut self, tax_rate: TaxRate) {
        self.tax_rate = tax_rate;
    }

    pub fn set_payment_method(&mut self, method: PaymentMethod) {
        self.payment_method = method;
    }

    pub fn set_notes(&mut self, notes: impl Into<String>) {
        self.notes = notes.into();
    }

    /// Resets the cart to empty. The tax rate is kept.
    pub fn clear(&mut self) {
        *self = Cart::new(self.tax_rate);
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn line(&self, product_id: &str) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.product_id == product_id)
    }

    pub fn customer(&self) -> Option<&CustomerRef> {
        self.customer.as_ref()
    }

    pub fn discount(&self) -> DiscountSpec {
        self.discount
    }

    pub fn tax_rate(&self) -> TaxRate {
        self.tax_rate
    }

    pub fn payment_method(&self) -> PaymentMethod {
        self.payment_method
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    // =========================================================================
    // Derived Totals
    // =========================================================================

    /// All derived totals in one pass.
    pub fn totals(&self) -> CartTotals {
        calculate_cart_totals(&self.lines, &self.discount, self.tax_rate)
    }

    pub fn subtotal(&self) -> Money {
        self.totals().subtotal
    }

    pub fn discount_amount(&self) -> Money {
        self.totals().discount_amount
    }

    pub fn tax(&self) -> Money {
        self.totals().tax_amount
    }

    pub fn total(&self) -> Money {
        self.totals().total
    }

    /// Total quantity across all lines (not the number of lines).
    pub fn item_count(&self) -> i64 {
        self.totals().item_count
    }

    fn line_mut(&mut self, product_id: &str) -> Option<&mut CartLine> {
        self.lines.iter_mut().find(|line| line.product_id == product_id)
    }
}
