//! # Cart Snapshot Repository
//!
//! Durable storage for the in-progress cart, keyed by a storage key
//! (`"pos-cart"` by default).
//!
//! ## Snapshot Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Cart mutation ──► SnapshotWriter ──► save(key, cart)                   │
//! │                                          │                              │
//! │                                          ▼                              │
//! │                          cart_snapshots (one row per key, upserted)     │
//! │                                          │                              │
//! │  Register restart ◄── load(key) ◄────────┘                              │
//! │                                                                         │
//! │  Cart cleared / checked out ──► delete(key)                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The payload is the cart's JSON form. Totals are never stored; they are
//! recomputed from the restored lines.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::SqlitePool;
use tracing::{debug, warn};

use crate::error::{DbError, DbResult};
use till_core::Cart;

/// A cart read back from storage together with the time it was written.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredCart {
    pub cart: Cart,
    pub saved_at: DateTime<Utc>,
}

/// Repository for cart snapshot operations.
#[derive(Debug, Clone)]
pub struct CartSnapshotRepository {
    pool: SqlitePool,
}

impl CartSnapshotRepository {
    /// Creates a new CartSnapshotRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CartSnapshotRepository { pool }
    }

    /// Writes the cart under `key`, replacing any previous snapshot.
    pub async fn save(&self, key: &str, cart: &Cart) -> DbResult<()> {
        let payload = serde_json::to_string(cart)?;
        let now = Utc::now();

        sqlx::query(
            r#"
            INSERT INTO cart_snapshots (storage_key, payload, saved_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(storage_key) DO UPDATE SET
                payload = excluded.payload,
                saved_at = excluded.saved_at
            "#,
        )
        .bind(key)
        .bind(&payload)
        .bind(now)
        .execute(&self.pool)
        .await?;

        debug!(
            key = %key,
            lines = cart.lines().len(),
            bytes = payload.len(),
            "Saved cart snapshot"
        );
        Ok(())
    }

    /// Reads the snapshot stored under `key`.
    ///
    /// ## Returns
    /// * `Ok(Some(StoredCart))` - Snapshot found and decoded
    /// * `Ok(None)` - Nothing stored under this key
    /// * `Err(DbError::CorruptSnapshot)` - Row exists but the payload is unreadable
    pub async fn load(&self, key: &str) -> DbResult<Option<StoredCart>> {
        let row: Option<(String, DateTime<Utc>)> = sqlx::query_as(
            r#"
            SELECT payload, saved_at
            FROM cart_snapshots
            WHERE storage_key = ?1
            "#,
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await?;

        let Some((payload, saved_at)) = row else {
            debug!(key = %key, "No cart snapshot stored");
            return Ok(None);
        };

        let cart: Cart = serde_json::from_str(&payload).map_err(|e| {
            warn!(key = %key, error = %e, "Cart snapshot payload is unreadable");
            DbError::corrupt(key, e)
        })?;

        debug!(key = %key, lines = cart.lines().len(), "Loaded cart snapshot");
        Ok(Some(StoredCart { cart, saved_at }))
    }

    /// Removes the snapshot stored under `key`.
    ///
    /// Returns `true` if a row was deleted.
    pub async fn delete(&self, key: &str) -> DbResult<bool> {
        let result = sqlx::query("DELETE FROM cart_snapshots WHERE storage_key = ?1")
            .bind(key)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
