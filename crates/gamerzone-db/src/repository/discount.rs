//! # Discount Registry
//!
//! Access to the `discountCodes` collection.
//!
//! ## Validation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      validate("  gamer20 ")                             │
//! │                                                                         │
//! │  normalize: trim + uppercase ──► "GAMER20"                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  query_eq(discountCodes, code, "GAMER20")                               │
//! │       │                                                                 │
//! │       ├── no document ──────────────► Ok(None)                          │
//! │       │                                                                 │
//! │       └── document ──► is_valid()? ──┬── yes ──► Ok(Some(code))         │
//! │                        (pure, core)  └── no  ──► Ok(None)               │
//! │                                                                         │
//! │  Errors escape only for transport failures; "no such code" and          │
//! │  "expired code" are both just None.                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde_json::{json, Value};
use sqlx::SqlitePool;
use tracing::debug;

use crate::doc::{bool_field_or, f64_field, i64_field, i64_field_or, str_field};
use crate::store::DocStore;
use gamerzone_core::validation::{normalize_code, validate_discount_code};
use gamerzone_core::{CoreError, CoreResult, DiscountCode};

/// Collection name for discount-code documents.
pub const COLLECTION: &str = "discountCodes";

/// Repository for the discount-code registry.
#[derive(Debug, Clone)]
pub struct DiscountRepository {
    store: DocStore,
}

impl DiscountRepository {
    /// Creates a new DiscountRepository.
    pub fn new(pool: SqlitePool) -> Self {
        DiscountRepository {
            store: DocStore::new(pool),
        }
    }

    /// Looks up a code and checks its validity.
    ///
    /// Returns `Ok(None)` both when the code is unknown and when it exists
    /// but fails the validity predicate (inactive, exhausted, expired).
    /// Errors are reserved for transport failures so callers can distinguish
    /// "bad code" from "registry unreachable".
    pub async fn validate(&self, code: &str) -> CoreResult<Option<DiscountCode>> {
        let normalized = normalize_code(code);
        if normalized.is_empty() {
            return Ok(None);
        }

        let docs = self.store.query_eq(COLLECTION, "code", &normalized).await?;

        let Some(doc) = docs.first() else {
            debug!(code = %normalized, "Discount code not in registry");
            return Ok(None);
        };

        let discount = body_to_discount(&doc.id, &doc.body);
        if discount.is_valid() {
            debug!(code = %normalized, percentage = discount.discount_percentage, "Discount code valid");
            Ok(Some(discount))
        } else {
            debug!(code = %normalized, "Discount code present but invalid");
            Ok(None)
        }
    }

    /// Bumps the usage counter after a successful checkout.
    ///
    /// Read-then-write; a missing document is a no-op success (the code may
    /// have been deleted between validation and checkout).
    pub async fn increment_usage(&self, discount_id: &str) -> CoreResult<()> {
        let Some(body) = self.store.get(COLLECTION, discount_id).await? else {
            debug!(discount_id = %discount_id, "Usage increment skipped, code gone");
            return Ok(());
        };

        let mut discount = body_to_discount(discount_id, &body);
        discount.usage_count += 1;

        self.store
            .set(COLLECTION, discount_id, &discount_to_body(&discount))
            .await?;

        debug!(discount_id = %discount_id, usage_count = discount.usage_count, "Incremented code usage");
        Ok(())
    }

    /// Lists every registered code, valid or not.
    pub async fn get_all(&self) -> CoreResult<Vec<DiscountCode>> {
        let docs = self.store.list(COLLECTION).await?;

        Ok(docs
            .iter()
            .map(|d| body_to_discount(&d.id, &d.body))
            .collect())
    }

    /// Registers a new code with a store-assigned id. Returns the new id.
    ///
    /// The code is normalized before storage so lookups are exact matches.
    ///
    /// ## Errors
    /// * `Validation` - Blank code or a percentage outside 0–100
    pub async fn create(&self, discount: &DiscountCode) -> CoreResult<String> {
        let id = DocStore::assign_id();
        let mut discount = discount.clone();
        discount.code = normalize_code(&discount.code);
        validate_discount_code(&discount)?;

        self.store
            .set(COLLECTION, &id, &discount_to_body(&discount))
            .await?;

        debug!(discount_id = %id, code = %discount.code, "Created discount code");
        Ok(id)
    }

    /// Replaces a registered code document.
    ///
    /// ## Errors
    /// * `InvalidArgument` - The discount carries no id
    /// * `Validation` - Blank code or a percentage outside 0–100
    pub async fn update(&self, discount: &DiscountCode) -> CoreResult<()> {
        if discount.id.is_empty() {
            return Err(CoreError::InvalidArgument(
                "cannot update a discount code without an id".to_string(),
            ));
        }

        let mut discount = discount.clone();
        discount.code = normalize_code(&discount.code);
        validate_discount_code(&discount)?;

        self.store
            .set(COLLECTION, &discount.id, &discount_to_body(&discount))
            .await?;

        Ok(())
    }

    /// Deletes a registered code. Deleting a missing code is not an error.
    pub async fn delete(&self, discount_id: &str) -> CoreResult<()> {
        self.store.delete(COLLECTION, discount_id).await?;
        Ok(())
    }
}

// =============================================================================
// Document Mapping
// =============================================================================

fn body_to_discount(id: &str, body: &Value) -> DiscountCode {
    DiscountCode {
        id: id.to_string(),
        code: str_field(body, "code"),
        discount_percentage: f64_field(body, "discountPercentage"),
        // A code written without the flag is active; only an explicit
        // `false` deactivates it.
        is_active: bool_field_or(body, "isActive", true),
        description: str_field(body, "description"),
        expiration_date: str_field(body, "expirationDate"),
        // Absent limit means unlimited.
        usage_limit: i64_field_or(body, "usageLimit", -1),
        usage_count: i64_field(body, "usageCount"),
    }
}

fn discount_to_body(discount: &DiscountCode) -> Value {
    json!({
        "code": discount.code,
        "discountPercentage": discount.discount_percentage,
        "isActive": discount.is_active,
        "description": discount.description,
        "expirationDate": discount.expiration_date,
        "usageLimit": discount.usage_limit,
        "usageCount": discount.usage_count,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    async fn repo() -> DiscountRepository {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.discounts()
    }

    fn active_code(code: &str, pct: f64) -> DiscountCode {
        DiscountCode {
            id: String::new(),
            code: code.to_string(),
            discount_percentage: pct,
            is_active: true,
            description: String::new(),
            expiration_date: String::new(),
            usage_limit: -1,
            usage_count: 0,
        }
    }

    #[tokio::test]
    async fn test_validate_normalizes_input() {
        let repo = repo().await;
        repo.create(&active_code("GAMER20", 20.0)).await.unwrap();

        let found = repo.validate("  gamer20 ").await.unwrap();
        assert_eq!(found.unwrap().discount_percentage, 20.0);
    }

    #[tokio::test]
    async fn test_validate_unknown_code_is_none() {
        let repo = repo().await;
        assert!(repo.validate("NOPE").await.unwrap().is_none());
        assert!(repo.validate("   ").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_validate_rejects_inactive() {
        let repo = repo().await;
        let mut code = active_code("GAMER10", 10.0);
        code.is_active = false;
        repo.create(&code).await.unwrap();

        assert!(repo.validate("GAMER10").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_validate_rejects_expired_yesterday() {
        let repo = repo().await;
        let mut code = active_code("OLD", 15.0);
        let yesterday = chrono::Utc::now().date_naive() - chrono::Days::new(1);
        code.expiration_date = yesterday.format("%Y-%m-%d").to_string();
        repo.create(&code).await.unwrap();

        assert!(repo.validate("OLD").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_validate_rejects_exhausted_limit() {
        let repo = repo().await;
        let mut code = active_code("LIMITED", 5.0);
        code.usage_limit = 2;
        code.usage_count = 2;
        repo.create(&code).await.unwrap();

        assert!(repo.validate("LIMITED").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_increment_usage_bumps_counter() {
        let repo = repo().await;
        let id = repo.create(&active_code("GAMER10", 10.0)).await.unwrap();

        repo.increment_usage(&id).await.unwrap();
        repo.increment_usage(&id).await.unwrap();

        let all = repo.get_all().await.unwrap();
        assert_eq!(all[0].usage_count, 2);
    }

    #[tokio::test]
    async fn test_increment_usage_missing_is_noop() {
        let repo = repo().await;
        repo.increment_usage("ghost").await.unwrap();
    }

    #[tokio::test]
    async fn test_create_rejects_out_of_range_percentage() {
        let repo = repo().await;

        let err = repo.create(&active_code("MEGA", 120.0)).await.unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));

        // rejected write left the registry empty
        assert!(repo.get_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_rejects_blank_code() {
        let repo = repo().await;
        let err = repo.create(&active_code("   ", 10.0)).await.unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[tokio::test]
    async fn test_absent_active_flag_means_active() {
        // A document written by other tooling without the isActive field.
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let store = DocStore::new(db.pool().clone());
        store
            .set(
                COLLECTION,
                "d1",
                &serde_json::json!({ "code": "LEGACY", "discountPercentage": 15.0 }),
            )
            .await
            .unwrap();

        let found = db.discounts().validate("LEGACY").await.unwrap();
        assert_eq!(found.unwrap().discount_percentage, 15.0);
    }

    #[tokio::test]
    async fn test_create_uppercases_code() {
        let repo = repo().await;
        repo.create(&active_code("duoc50", 50.0)).await.unwrap();

        assert!(repo.validate("DUOC50").await.unwrap().is_some());
    }
}
