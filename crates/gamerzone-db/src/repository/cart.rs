//! # Cart Repository
//!
//! Raw document access for per-user carts.
//!
//! One cart per user, keyed by the user's id:
//! `carts/{userId} = { userId, items: [{productId, quantity}], updatedAt }`.
//!
//! Only product ids and quantities are persisted. Names, prices, and stock
//! are reconciled against the live catalog on every load, so a price change
//! never leaves a stale snapshot in anyone's cart.
//!
//! Writes are whole-document replaces and there is no version token on the
//! document, so two concurrent mutations for the same user race with
//! last-write-wins semantics.

use serde_json::{json, Value};
use sqlx::SqlitePool;
use tracing::debug;

use crate::doc::{i64_field, str_field};
use crate::store::DocStore;
use gamerzone_core::{CartEntry, CoreResult};

/// Collection name for cart documents.
pub const COLLECTION: &str = "carts";

/// Repository for raw cart documents.
#[derive(Debug, Clone)]
pub struct CartRepository {
    store: DocStore,
}

impl CartRepository {
    /// Creates a new CartRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CartRepository {
            store: DocStore::new(pool),
        }
    }

    /// Reads the persisted cart entries for a user.
    ///
    /// A missing document is an empty cart, never an error. Entries with a
    /// blank productId or non-positive quantity are dropped on read.
    pub async fn get_entries(&self, user_id: &str) -> CoreResult<Vec<CartEntry>> {
        let Some(body) = self.store.get(COLLECTION, user_id).await? else {
            return Ok(Vec::new());
        };

        let items = body
            .get("items")
            .and_then(Value::as_array)
            .map(|entries| {
                entries
                    .iter()
                    .map(|e| CartEntry {
                        product_id: str_field(e, "productId"),
                        quantity: i64_field(e, "quantity"),
                    })
                    .filter(|e| !e.product_id.is_empty() && e.quantity > 0)
                    .collect()
            })
            .unwrap_or_default();

        Ok(items)
    }

    /// Replaces the user's cart document with the given entries.
    pub async fn save_entries(&self, user_id: &str, entries: &[CartEntry]) -> CoreResult<()> {
        let items: Vec<Value> = entries
            .iter()
            .map(|e| {
                json!({
                    "productId": e.product_id,
                    "quantity": e.quantity,
                })
            })
            .collect();

        let body = json!({
            "userId": user_id,
            "items": items,
            "updatedAt": chrono::Utc::now().timestamp_millis(),
        });

        self.store.set(COLLECTION, user_id, &body).await?;

        debug!(user_id = %user_id, lines = entries.len(), "Saved cart");
        Ok(())
    }

    /// Deletes the user's cart document. Idempotent.
    pub async fn delete(&self, user_id: &str) -> CoreResult<()> {
        self.store.delete(COLLECTION, user_id).await?;
        debug!(user_id = %user_id, "Cleared cart");
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
