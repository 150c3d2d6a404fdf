//! # Commands Module
//!
//! All operations the register front end can invoke.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs       ◄─── You are here (exports)
//! ├── cart.rs      ◄─── Cart manipulation
//! ├── checkout.rs  ◄─── Order request + reset
//! └── config.rs    ◄─── Configuration retrieval
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  Console line: "add P-1 10.00 Masala Chai"                              │
//! │         │                                                               │
//! │         │ (console::parse_line)                                         │
//! │         ▼                                                               │
//! │  fn add_to_cart(                                                        │
//! │      session: &mut RegisterSession,  ◄── Owned by the console loop     │
//! │      product: CatalogProduct,        ◄── From the parsed line          │
//! │  ) -> Result<CartResponse, ApiError>                                    │
//! │         │                                                               │
//! │         │ (JSON serialization)                                          │
//! │         ▼                                                               │
//! │  stdout: {"lines":[...],"totals":{...}}                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod cart;
pub mod checkout;
pub mod config;
