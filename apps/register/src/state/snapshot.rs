//! # Snapshot Writer
//!
//! Persists the cart in the background so commands never wait on disk.
//!
//! ## Write Path
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Fire-and-Forget Persistence                          │
//! │                                                                         │
//! │  Command mutates cart                                                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  handle.publish(&cart) ──► watch::Sender<Cart> (latest value only)     │
//! │       │                           │                                     │
//! │   returns at once                 ▼                                     │
//! │                           SnapshotWriter::run (tokio task)              │
//! │                           ├── changed().await                           │
//! │                           ├── borrow_and_update().clone()               │
//! │                           ├── fresh cart? ──► delete(key)               │
//! │                           └── otherwise   ──► save(key, &cart)          │
//! │                                                                         │
//! │  Bursts collapse: ten quick edits may produce one write, and the       │
//! │  stored snapshot is always the most recent cart.                       │
//! │                                                                         │
//! │  shutdown(): drop the sender → writer saves any unseen value → exits   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A failed save is logged and the writer keeps going; the next mutation
//! writes the full cart again.

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use till_core::Cart;
use till_db::Database;

// =============================================================================
// Snapshot Writer
// =============================================================================

/// Background task that saves every published cart under one storage key.
pub struct SnapshotWriter {
    db: Database,
    key: String,
    cart_rx: watch::Receiver<Cart>,
}

/// Handle for publishing carts to a running [`SnapshotWriter`].
#[derive(Debug)]
pub struct SnapshotWriterHandle {
    cart_tx: watch::Sender<Cart>,
    task: JoinHandle<()>,
}

impl SnapshotWriter {
    /// Creates a writer seeded with `initial`, which counts as already stored.
    pub fn new(
        db: Database,
        key: impl Into<String>,
        initial: Cart,
    ) -> (Self, watch::Sender<Cart>) {
        let (cart_tx, cart_rx) = watch::channel(initial);

        let writer = SnapshotWriter {
            db,
            key: key.into(),
            cart_rx,
        };

        (writer, cart_tx)
    }

    /// Runs until every sender is gone, saving each new cart.
    pub async fn run(mut self) {
        info!(key = %self.key, "Snapshot writer starting");

        // Ok while the sender lives, and once more for a value sent just before it dropped
        while self.cart_rx.changed().await.is_ok() {
            let cart = self.cart_rx.borrow_and_update().clone();
            let repo = self.db.cart_snapshots();

            // A cleared or checked-out cart leaves nothing to restore
            if cart == Cart::new(cart.tax_rate()) {
                match repo.delete(&self.key).await {
                    Ok(removed) => debug!(key = %self.key, removed, "Cart snapshot cleared"),
                    Err(e) => warn!(key = %self.key, error = %e, "Failed to clear cart snapshot"),
                }
                continue;
            }

            match repo.save(&self.key, &cart).await {
                Ok(()) => debug!(key = %self.key, total = %cart.total(), "Cart snapshot written"),
                Err(e) => warn!(key = %self.key, error = %e, "Failed to write cart snapshot"),
            }
        }

        info!(key = %self.key, "Snapshot writer stopped");
    }
}

impl SnapshotWriterHandle {
    /// Spawns a writer task on the current runtime.
    pub fn spawn(db: Database, key: impl Into<String>, initial: Cart) -> Self {
        let (writer, cart_tx) = SnapshotWriter::new(db, key, initial);
        let task = tokio::spawn(writer.run());

        SnapshotWriterHandle { cart_tx, task }
    }

    /// Queues the cart for saving. Never blocks and never fails.
    pub fn publish(&self, cart: &Cart) {
        self.cart_tx.send_replace(cart.clone());
    }

    /// Flushes the last published cart and waits for the writer to exit.
    pub async fn shutdown(self) {
        drop(self.cart_tx);

        if let Err(e) = self.task.await {
            warn!(error = %e, "Snapshot writer task ended abnormally");
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
