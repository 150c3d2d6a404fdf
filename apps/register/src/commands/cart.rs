//! # Cart Commands
//!
//! Register commands for cart manipulation.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐     ┌──────────┐       │
//! │  │  Empty   │────►│ In Cart  │────►│ Checkout │────►│  Empty   │       │
//! │  │  Cart    │     │          │     │ (order)  │     │  Cart    │       │
//! │  └──────────┘     └──────────┘     └──────────┘     └──────────┘       │
//! │                        │                                                │
//! │                   add_to_cart        set_customer                      │
//! │                   update_cart_item   set_discount / clear_discount     │
//! │                   increment / decrement                                │
//! │                   remove_from_cart   set_notes / set_payment_method    │
//! │                        │                                                │
//! │                        ▼                                                │
//! │                   clear_cart ──────────────────────► (back to empty)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every command returns the whole cart with freshly derived totals, so the
//! caller never has to recompute anything.

use serde::Serialize;
use tracing::debug;

use crate::error::ApiError;
use crate::state::RegisterSession;
use till_core::validation::{
    validate_discount, validate_notes, validate_price, validate_product_id,
    validate_product_name, validate_quantity,
};
use till_core::{
    Cart, CartLine, CartTotals, CatalogProduct, CustomerRef, DiscountSpec, PaymentMethod,
    ValidationError,
};

/// Cart response including lines, adjustments and totals.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub lines: Vec<CartLine>,
    pub customer: Option<CustomerRef>,
    pub discount: DiscountSpec,
    pub payment_method: PaymentMethod,
    pub notes: String,
    pub totals: CartTotals,
}

impl From<&Cart> for CartResponse {
    fn from(cart: &Cart) -> Self {
        CartResponse {
            lines: cart.lines().to_vec(),
            customer: cart.customer().cloned(),
            discount: cart.discount(),
            payment_method: cart.payment_method(),
            notes: cart.notes().to_string(),
            totals: cart.totals(),
        }
    }
}

/// Gets the current cart contents.
pub fn get_cart(session: &RegisterSession) -> CartResponse {
    debug!("get_cart command");
    session.with_cart(|c| CartResponse::from(c))
}

/// Adds one unit of a product to the cart.
///
/// ## Behavior
/// - If product already in cart: quantity increases by one
/// - If product not in cart: added as a new line with quantity 1
/// - A line already at 999 is rejected
/// - Name and price are frozen at the time the line is created
pub fn add_to_cart(
    session: &mut RegisterSession,
    product: CatalogProduct,
) -> Result<CartResponse, ApiError> {
    debug!(product_id = %product.product_id, "add_to_cart command");

    validate_product_id(&product.product_id)?;
    validate_product_name(&product.name)?;
    validate_price(product.unit_price)?;
    ensure_room_for_one(session, &product.product_id)?;

    Ok(session.with_cart_mut(|c| {
        c.add_item(&product);
        CartResponse::from(&*c)
    }))
}

/// Sets the quantity of a line.
///
/// ## Behavior
/// - Quantity ≤ 0: removes the line
/// - Quantity > 999: rejected
/// - Unknown product: no change
pub fn update_cart_item(
    session: &mut RegisterSession,
    product_id: &str,
    quantity: i64,
) -> Result<CartResponse, ApiError> {
    debug!(product_id = %product_id, quantity = %quantity, "update_cart_item command");

    validate_quantity(quantity)?;

    Ok(session.with_cart_mut(|c| {
        c.update_quantity(product_id, quantity);
        CartResponse::from(&*c)
    }))
}

/// Adds one to a line's quantity. A line already at 999 is rejected.
pub fn increment_cart_item(
    session: &mut RegisterSession,
    product_id: &str,
) -> Result<CartResponse, ApiError> {
    debug!(product_id = %product_id, "increment_cart_item command");

    ensure_room_for_one(session, product_id)?;

    Ok(session.with_cart_mut(|c| {
        c.increment_quantity(product_id);
        CartResponse::from(&*c)
    }))
}

/// Takes one from a line's quantity, removing the line at 1.
pub fn decrement_cart_item(session: &mut RegisterSession, product_id: &str) -> CartResponse {
    debug!(product_id = %product_id, "decrement_cart_item command");

    session.with_cart_mut(|c| {
        c.decrement_quantity(product_id);
        CartResponse::from(&*c)
    })
}

/// Removes a line from the cart.
pub fn remove_from_cart(session: &mut RegisterSession, product_id: &str) -> CartResponse {
    debug!(product_id = %product_id, "remove_from_cart command");

    session.with_cart_mut(|c| {
        c.remove_item(product_id);
        CartResponse::from(&*c)
    })
}

/// Attaches or detaches a customer.
pub fn set_customer(
    session: &mut RegisterSession,
    customer: Option<CustomerRef>,
) -> Result<CartResponse, ApiError> {
    debug!(customer = ?customer.as_ref().map(|c| &c.id), "set_customer command");

    if let Some(customer) = &customer {
        if customer.id.trim().is_empty() {
            return Err(ValidationError::Required {
                field: "customer id".to_string(),
            }
            .into());
        }
    }

    Ok(session.with_cart_mut(|c| {
        c.set_customer(customer);
        CartResponse::from(&*c)
    }))
}

/// Replaces the discount.
pub fn set_discount(
    session: &mut RegisterSession,
    discount: DiscountSpec,
) -> Result<CartResponse, ApiError> {
    debug!(amount = discount.amount, kind = ?discount.kind, "set_discount command");

    validate_discount(&discount)?;

    Ok(session.with_cart_mut(|c| {
        c.set_discount(discount);
        CartResponse::from(&*c)
    }))
}

/// Resets the discount to none.
pub fn clear_discount(session: &mut RegisterSession) -> CartResponse {
    debug!("clear_discount command");

    session.with_cart_mut(|c| {
        c.clear_discount();
        CartResponse::from(&*c)
    })
}

/// Replaces the sale notes.
pub fn set_notes(session: &mut RegisterSession, notes: &str) -> Result<CartResponse, ApiError> {
    debug!(len = notes.len(), "set_notes command");

    validate_notes(notes)?;

    Ok(session.with_cart_mut(|c| {
        c.set_notes(notes);
        CartResponse::from(&*c)
    }))
}

/// Selects how the customer will pay.
pub fn set_payment_method(session: &mut RegisterSession, method: PaymentMethod) -> CartResponse {
    debug!(method = %method, "set_payment_method command");

    session.with_cart_mut(|c| {
        c.set_payment_method(method);
        CartResponse::from(&*c)
    })
}

/// Clears all lines and adjustments from the cart.
///
/// ## When Used
/// - Cashier cancels the sale
/// - After checkout (new transaction)
pub fn clear_cart(session: &mut RegisterSession) -> CartResponse {
    debug!("clear_cart command");

    session.with_cart_mut(|c| {
        c.clear();
        CartResponse::from(&*c)
    })
}

/// One more unit must keep the line within MAX_ITEM_QUANTITY.
fn ensure_room_for_one(session: &RegisterSession, product_id: &str) -> Result<(), ValidationError> {
    let current = session.with_cart(|c| c.line(product_id).map_or(0, |line| line.quantity));
    validate_quantity(current.saturating_add(1))
}
