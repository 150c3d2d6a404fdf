//! # Checkout
//!
//! Builds the order-creation request handed to the order service once the
//! cashier takes payment.
//!
//! ## Snapshot Pattern
//! Every line carries its name and unit price as they were in the cart, and
//! the request carries the totals exactly as the cart derived them. The order
//! service never re-prices.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::cart::{Cart, CartLine};
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{DiscountKind, PaymentMethod};

/// One order line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    pub product_id: String,
    pub product_name: String,
    pub quantity: i64,
    pub unit_price: Money,
    pub line_total: Money,
}

impl From<&CartLine> for OrderLine {
    fn from(line: &CartLine) -> Self {
        OrderLine {
            product_id: line.product_id.clone(),
            product_name: line.name.clone(),
            quantity: line.quantity,
            unit_price: line.unit_price,
            line_total: line.line_total(),
        }
    }
}

/// Order-creation request for the order service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    pub lines: Vec<OrderLine>,
    pub subtotal: Money,
    pub discount_amount: Money,
    /// Basis points, only for percentage discounts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub discount_percentage: Option<i64>,
    pub tax_amount: Money,
    pub total: Money,
    pub payment_method: PaymentMethod,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub customer_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub notes: Option<String>,
}

impl OrderRequest {
    /// Builds the request from the current cart.
    ///
    /// ## Errors
    /// - [`CoreError::EmptyCart`] when the cart has no lines
    pub fn from_cart(cart: &Cart) -> CoreResult<Self> {
        if cart.is_empty() {
            return Err(CoreError::EmptyCart);
        }

        let totals = cart.totals();
        let discount = cart.discount();

        let discount_percentage = match discount.kind {
            DiscountKind::Percentage => Some(discount.amount),
            DiscountKind::Fixed => None,
        };

        let notes = cart.notes().trim();

        Ok(OrderRequest {
            lines: cart.lines().iter().map(OrderLine::from).collect(),
            subtotal: totals.subtotal,
            discount_amount: totals.discount_amount,
            discount_percentage,
            tax_amount: totals.tax_amount,
            total: totals.total,
            payment_method: cart.payment_method(),
            customer_id: cart.customer().map(|c| c.id.clone()),
            notes: (!notes.is_empty()).then(|| notes.to_string()),
        })
    }
}
