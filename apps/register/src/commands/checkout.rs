//! # Checkout Command
//!
//! Turns the cart into an order request and starts a fresh cart.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  checkout()                                                            │
//! │       │                                                                 │
//! │       ├── cart empty? ──► ApiError (CART_ERROR), cart untouched        │
//! │       │                                                                 │
//! │       ├── OrderRequest::from_cart(&cart)                               │
//! │       │     lines, subtotal, discount, tax, total, payment method      │
//! │       │                                                                 │
//! │       ├── cart.clear() (snapshot queued)                               │
//! │       │                                                                 │
//! │       └── return OrderRequest ──► caller submits to the order API      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::{debug, info};

use crate::error::ApiError;
use crate::state::RegisterSession;
use till_core::OrderRequest;

/// Builds the order for the current cart and resets the cart.
pub fn checkout(session: &mut RegisterSession) -> Result<OrderRequest, ApiError> {
    debug!("checkout command");

    let order = session.with_cart(OrderRequest::from_cart)?;

    session.with_cart_mut(|c| c.clear());

    info!(
        lines = order.lines.len(),
        total = %order.total,
        payment_method = %order.payment_method,
        "Checkout complete, cart cleared"
    );

    Ok(order)
}
