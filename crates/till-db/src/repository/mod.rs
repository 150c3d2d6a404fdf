//! # Repository Module
//!
//! Database repository implementations for Till POS.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  RegisterSession                                                        │
//! │       │                                                                 │
//! │       │  db.cart_snapshots().load("pos-cart")                           │
//! │       ▼                                                                 │
//! │  CartSnapshotRepository                                                 │
//! │  ├── save(&self, key, cart)                                             │
//! │  ├── load(&self, key)                                                   │
//! │  └── delete(&self, key)                                                 │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod cart_snapshot;
