//! # User Repository
//!
//! Access to the `users` collection. User documents are keyed by the user's
//! id (the session identity), not a store-assigned uuid, so profile reads
//! are a single point lookup.

use serde_json::{json, Value};
use sqlx::SqlitePool;
use tracing::debug;

use crate::doc::{i64_field, str_field};
use crate::store::DocStore;
use gamerzone_core::{CoreError, CoreResult, User, UserRole};

/// Collection name for user documents.
pub const COLLECTION: &str = "users";

/// Repository for user records.
#[derive(Debug, Clone)]
pub struct UserRepository {
    store: DocStore,
}

impl UserRepository {
    /// Creates a new UserRepository.
    pub fn new(pool: SqlitePool) -> Self {
        UserRepository {
            store: DocStore::new(pool),
        }
    }

    /// Fetches one user record.
    ///
    /// ## Errors
    /// * `NotFound` - No record for that id
    pub async fn get_by_id(&self, user_id: &str) -> CoreResult<User> {
        let body = self
            .store
            .get(COLLECTION, user_id)
            .await?
            .ok_or_else(|| CoreError::not_found("User", user_id))?;

        Ok(body_to_user(user_id, &body))
    }

    /// Writes a user record under its own id.
    ///
    /// ## Errors
    /// * `InvalidArgument` - The user carries no id
    pub async fn save(&self, user: &User) -> CoreResult<()> {
        if user.id.is_empty() {
            return Err(CoreError::InvalidArgument(
                "cannot save a user without an id".to_string(),
            ));
        }

        self.store
            .set(COLLECTION, &user.id, &user_to_body(user))
            .await?;

        debug!(user_id = %user.id, "Saved user record");
        Ok(())
    }

    /// Deletes a user record. Idempotent.
    pub async fn delete(&self, user_id: &str) -> CoreResult<()> {
        self.store.delete(COLLECTION, user_id).await?;
        Ok(())
    }
}

// =============================================================================
// Document Mapping
// =============================================================================

fn body_to_user(id: &str, body: &Value) -> User {
    User {
        id: id.to_string(),
        email: str_field(body, "email"),
        full_name: str_field(body, "fullName"),
        phone: str_field(body, "phone"),
        address: str_field(body, "address"),
        role: UserRole::parse(&str_field(body, "role")),
        created_at: i64_field(body, "createdAt"),
    }
}

fn user_to_body(user: &User) -> Value {
    json!({
        "email": user.email,
        "fullName": user.full_name,
        "phone": user.phone,
        "address": user.address,
        "role": user.role.as_str(),
        "createdAt": user.created_at,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
