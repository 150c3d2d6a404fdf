//! # Register Session
//!
//! Owns the one active cart and everything needed to keep it.
//!
//! ## Session Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Register Session                                     │
//! │                                                                         │
//! │  open(config)                                                          │
//! │  ├── persist_cart = false ──► empty cart, no database                  │
//! │  └── persist_cart = true                                               │
//! │      ├── Database::new(till.db)                                        │
//! │      ├── cart_snapshots().load(key)                                    │
//! │      │   ├── Some(stored) ──► restore lines, discount, customer, ...   │
//! │      │   │                    (duplicate / zero-quantity lines fixed)  │
//! │      │   ├── None         ──► empty cart                               │
//! │      │   └── corrupt      ──► warn, empty cart                         │
//! │      └── SnapshotWriterHandle::spawn(...)                              │
//! │                                                                         │
//! │  with_cart_mut(|cart| ...) ──► mutate, then publish to the writer      │
//! │                                                                         │
//! │  close() ──► flush writer, close pool                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The session is owned by whoever drives the register (the console loop or
//! a test), so commands take `&mut RegisterSession` and no lock is needed.

use tracing::{info, warn};

use super::config::RegisterConfig;
use super::snapshot::SnapshotWriterHandle;
use crate::error::ApiError;
use till_core::Cart;
use till_db::{Database, DbConfig, DbError};

/// The register's live state: configuration, cart and persistence.
#[derive(Debug)]
pub struct RegisterSession {
    config: RegisterConfig,
    cart: Cart,
    db: Option<Database>,
    writer: Option<SnapshotWriterHandle>,
}

impl RegisterSession {
    /// Opens a session, restoring the saved cart when persistence is on.
    pub async fn open(config: RegisterConfig) -> Result<Self, ApiError> {
        if !config.persist_cart {
            info!("Cart persistence disabled");
            return Ok(Self::in_memory(config));
        }

        let db_path = config.resolve_database_path()?;
        info!(?db_path, "Database path determined");

        let db = Database::new(DbConfig::new(db_path)).await?;
        Self::with_database(config, db).await
    }

    /// Creates a session that keeps the cart in memory only.
    pub fn in_memory(config: RegisterConfig) -> Self {
        let cart = Cart::new(config.tax_rate());
        RegisterSession {
            config,
            cart,
            db: None,
            writer: None,
        }
    }

    /// Creates a persistent session on an already-open database.
    ///
    /// The configured tax rate always wins over the one stored with the cart,
    /// and a stored cart that breaks the line invariants is repaired. Either
    /// correction is written back.
    pub async fn with_database(config: RegisterConfig, db: Database) -> Result<Self, ApiError> {
        let key = config.cart_storage_key.clone();

        let mut cart = match db.cart_snapshots().load(&key).await {
            Ok(Some(stored)) => {
                info!(
                    key = %key,
                    lines = stored.cart.lines().len(),
                    saved_at = %stored.saved_at,
                    "Restored saved cart"
                );
                stored.cart
            }
            Ok(None) => Cart::new(config.tax_rate()),
            Err(DbError::CorruptSnapshot { reason, .. }) => {
                warn!(key = %key, reason = %reason, "Discarding unreadable saved cart");
                Cart::new(config.tax_rate())
            }
            Err(e) => return Err(e.into()),
        };
        let repaired = cart.normalize_lines();
        if repaired {
            warn!(key = %key, lines = cart.lines().len(), "Repaired saved cart lines");
        }

        let stored_rate = cart.tax_rate();
        cart.set_tax_rate(config.tax_rate());

        let writer = SnapshotWriterHandle::spawn(db.clone(), key, cart.clone());
        if repaired || stored_rate != cart.tax_rate() {
            writer.publish(&cart);
        }

        Ok(RegisterSession {
            config,
            cart,
            db: Some(db),
            writer: Some(writer),
        })
    }

    /// Returns the configuration.
    pub fn config(&self) -> &RegisterConfig {
        &self.config
    }

    /// Returns the current cart.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Whether mutations are being written to disk.
    pub fn is_persistent(&self) -> bool {
        self.writer.is_some()
    }

    /// Executes a function with read access to the cart.
    pub fn with_cart<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Cart) -> R,
    {
        f(&self.cart)
    }

    /// Executes a function with write access to the cart, then queues a snapshot.
    pub fn with_cart_mut<F, R>(&mut self, f: F) -> R
    where
        F: FnOnce(&mut Cart) -> R,
    {
        let result = f(&mut self.cart);

        if let Some(writer) = &self.writer {
            writer.publish(&self.cart);
        }

        result
    }

    /// Flushes the last snapshot and releases the database.
    pub async fn close(self) {
        if let Some(writer) = self.writer {
            writer.shutdown().await;
        }

        if let Some(db) = self.db {
            db.close().await;
        }

        info!("Register session closed");
    }
}
