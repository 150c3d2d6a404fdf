//! # State Module
//!
//! Manages the register's runtime state.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     RegisterSession                             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                              │                                          │
//! │          ┌──────────────────┼──────────────────┐                       │
//! │          ▼                  ▼                  ▼                        │
//! │  ┌──────────────┐  ┌──────────────────┐  ┌──────────────────┐          │
//! │  │ Config       │  │  Cart (owned)    │  │ SnapshotWriter   │          │
//! │  │              │  │                  │  │ Handle           │          │
//! │  │  store_name  │  │  lines, discount │  │  watch::Sender   │          │
//! │  │  tax_rate    │  │  customer, notes │  │  + writer task   │          │
//! │  │  db path     │  │                  │  │                  │          │
//! │  └──────────────┘  └──────────────────┘  └──────────────────┘          │
//! │                                                                         │
//! │  OWNERSHIP:                                                            │
//! │  • Config: read-only after load                                        │
//! │  • Cart: mutated only through RegisterSession::with_cart_mut           │
//! │  • Writer: receives a copy after every mutation, never blocks          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod session;
mod snapshot;

pub use config::{RegisterConfig, DEFAULT_CART_KEY, DEFAULT_TAX_RATE_BPS};
pub use session::RegisterSession;
pub use snapshot::{SnapshotWriter, SnapshotWriterHandle};
