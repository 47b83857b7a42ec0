//! # Document Store
//!
//! A collection-based JSON document store over SQLite.
//!
//! ## Data Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      documents table                                    │
//! │                                                                         │
//! │  collection      id             body                                    │
//! │  ───────────     ────────────   ─────────────────────────────────────   │
//! │  products        8c1f…          {"name":"PlayStation 5","price":…}      │
//! │  carts           user-42        {"userId":"user-42","items":[…]}        │
//! │  orders          1b9a…          {"userId":"user-42","total":…}          │
//! │  discountCodes   77d0…          {"code":"GAMER20","isActive":true}      │
//! │  users           user-42        {"email":"…","role":"USER"}             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The access surface deliberately mirrors a remote document database:
//! get/set/delete a single document, list a collection, and query by field
//! equality. There are no joins and no multi-document transactions; every
//! call is one independent round trip. `set` is always a whole-document
//! replace.
//!
//! ## Why runtime-bound queries
//! The schema is a single generic table, so the compile-checked query macros
//! buy nothing here; the runtime API keeps the store free of prepared
//! metadata.

use chrono::Utc;
use serde_json::Value;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use crate::error::DbResult;

/// One document as returned by collection scans and queries.
#[derive(Debug, Clone)]
pub struct Document {
    pub id: String,
    pub body: Value,
}

/// Handle to the document store. Cheap to clone (shares the pool).
#[derive(Debug, Clone)]
pub struct DocStore {
    pool: SqlitePool,
}

impl DocStore {
    pub fn new(pool: SqlitePool) -> Self {
        DocStore { pool }
    }

    /// Generates a store-assigned document id.
    pub fn assign_id() -> String {
        Uuid::new_v4().to_string()
    }

    /// Fetches a single document, or `None` if it does not exist.
    pub async fn get(&self, collection: &str, id: &str) -> DbResult<Option<Value>> {
        let body: Option<String> = sqlx::query_scalar(
            "SELECT body FROM documents WHERE collection = ?1 AND id = ?2",
        )
        .bind(collection)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match body {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Writes a document, replacing the entire body if it already exists.
    pub async fn set(&self, collection: &str, id: &str, body: &Value) -> DbResult<()> {
        let raw = body.to_string();
        let now = Utc::now().timestamp_millis();

        sqlx::query(
            r#"
            INSERT INTO documents (collection, id, body, updated_at)
            VALUES (?1, ?2, ?3, ?4)
            ON CONFLICT (collection, id)
            DO UPDATE SET body = excluded.body, updated_at = excluded.updated_at
            "#,
        )
        .bind(collection)
        .bind(id)
        .bind(raw)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Deletes a document. Deleting a missing document is not an error.
    pub async fn delete(&self, collection: &str, id: &str) -> DbResult<()> {
        sqlx::query("DELETE FROM documents WHERE collection = ?1 AND id = ?2")
            .bind(collection)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Lists every document in a collection.
    pub async fn list(&self, collection: &str) -> DbResult<Vec<Document>> {
        let rows = sqlx::query(
            "SELECT id, body FROM documents WHERE collection = ?1 ORDER BY id",
        )
        .bind(collection)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|row| {
                let id: String = row.get("id");
                let raw: String = row.get("body");
                Ok(Document {
                    id,
                    body: serde_json::from_str(&raw)?,
                })
            })
            .collect()
    }

    /// Queries a collection for documents whose top-level `field` equals the
    /// given string value.
    pub async fn query_eq(
        &self,
        collection: &str,
        field: &str,
        value: &str,
    ) -> DbResult<Vec<Document>> {
        let path = format!("$.{field}");

        let rows = sqlx::query(
            r#"
            SELECT id, body FROM documents
            WHERE collection = ?1 AND json_extract(body, ?2) = ?3
            ORDER BY id
            "#,
        )
        .bind(collection)
        .bind(path)
        .bind(value)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|row| {
                let id: String = row.get("id");
                let raw: String = row.get("body");
                Ok(Document {
                    id,
                    body: serde_json::from_str(&raw)?,
                })
            })
            .collect()
    }

    /// Counts the documents in a collection.
    pub async fn count(&self, collection: &str) -> DbResult<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM documents WHERE collection = ?1")
                .bind(collection)
                .fetch_one(&self.pool)
                .await?;

        Ok(count)
    }

    /// Conditionally decrements a numeric field inside a document body.
    ///
    /// The decrement applies only if the field is still `>= amount` at write
    /// time, closing the read-then-write race on counters like product
    /// stock. Returns `false` when the condition (or the document) no longer
    /// holds; the caller decides how to report that.
    pub async fn decrement_if_at_least(
        &self,
        collection: &str,
        id: &str,
        field: &str,
        amount: i64,
    ) -> DbResult<bool> {
        let path = format!("$.{field}");
        let now = Utc::now().timestamp_millis();

        let result = sqlx::query(
            r#"
            UPDATE documents
            SET body = json_set(body, ?3, json_extract(body, ?3) - ?4),
                updated_at = ?5
            WHERE collection = ?1
              AND id = ?2
              AND CAST(json_extract(body, ?3) AS INTEGER) >= ?4
            "#,
        )
        .bind(collection)
        .bind(id)
        .bind(path)
        .bind(amount)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use serde_json::json;

    async fn store() -> DocStore {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        DocStore::new(db.pool().clone())
    }

    #[tokio::test]
    async fn test_get_missing_is_none() {
        let store = store().await;
        assert!(store.get("products", "nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_set_then_get_roundtrip() {
        let store = store().await;
        let body = json!({ "name": "PS5", "price": 599990.0, "stock": 10 });

        store.set("products", "p1", &body).await.unwrap();
        let read = store.get("products", "p1").await.unwrap().unwrap();
        assert_eq!(read, body);
    }

    #[tokio::test]
    async fn test_set_replaces_whole_document() {
        let store = store().await;
        store
            .set("carts", "u1", &json!({ "items": [1, 2, 3], "extra": true }))
            .await
            .unwrap();
        store
            .set("carts", "u1", &json!({ "items": [] }))
            .await
            .unwrap();

        let read = store.get("carts", "u1").await.unwrap().unwrap();
        assert!(read.get("extra").is_none()); // replace, not merge
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let store = store().await;
        store.set("carts", "u1", &json!({})).await.unwrap();
        store.delete("carts", "u1").await.unwrap();
        store.delete("carts", "u1").await.unwrap(); // second delete: no error
        assert!(store.get("carts", "u1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_query_eq_filters_by_field() {
        let store = store().await;
        store
            .set("orders", "o1", &json!({ "userId": "u1", "total": 10.0 }))
            .await
            .unwrap();
        store
            .set("orders", "o2", &json!({ "userId": "u2", "total": 20.0 }))
            .await
            .unwrap();
        store
            .set("orders", "o3", &json!({ "userId": "u1", "total": 30.0 }))
            .await
            .unwrap();

        let docs = store.query_eq("orders", "userId", "u1").await.unwrap();
        assert_eq!(docs.len(), 2);
        assert!(docs.iter().all(|d| d.body["userId"] == "u1"));
    }

    #[tokio::test]
    async fn test_collections_are_isolated() {
        let store = store().await;
        store.set("products", "x", &json!({ "a": 1 })).await.unwrap();
        store.set("orders", "x", &json!({ "b": 2 })).await.unwrap();

        assert_eq!(store.count("products").await.unwrap(), 1);
        assert_eq!(store.count("orders").await.unwrap(), 1);
        let product = store.get("products", "x").await.unwrap().unwrap();
        assert!(product.get("b").is_none());
    }

    #[tokio::test]
    async fn test_conditional_decrement() {
        let store = store().await;
        store
            .set("products", "p1", &json!({ "name": "PS5", "stock": 3 }))
            .await
            .unwrap();

        // 3 - 2 = 1: allowed
        assert!(store
            .decrement_if_at_least("products", "p1", "stock", 2)
            .await
            .unwrap());
        // 1 - 2: refused, stock unchanged
        assert!(!store
            .decrement_if_at_least("products", "p1", "stock", 2)
            .await
            .unwrap());

        let read = store.get("products", "p1").await.unwrap().unwrap();
        assert_eq!(read["stock"], json!(1));
        // untouched fields survive the json_set
        assert_eq!(read["name"], json!("PS5"));
    }

    #[tokio::test]
    async fn test_conditional_decrement_missing_doc() {
        let store = store().await;
        assert!(!store
            .decrement_if_at_least("products", "ghost", "stock", 1)
            .await
            .unwrap());
    }
}
