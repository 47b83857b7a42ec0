//! # Session Identity
//!
//! The identity boundary for the storefront.
//!
//! Identity is always passed in explicitly: the view state takes a
//! [`SessionProvider`] instead of reading some ambient global, so tests can
//! swap in any identity they like and the checkout path has exactly one
//! place to ask "who is buying?".

use gamerzone_core::User;
use tokio::sync::RwLock;

/// An asynchronous source of the current user identity.
///
/// Implementations may hit a token cache, a keychain, or nothing at all;
/// callers only see "maybe a user".
#[allow(async_fn_in_trait)]
pub trait SessionProvider {
    /// The id of the signed-in user, if any.
    async fn current_user_id(&self) -> Option<String>;

    /// The full signed-in user record, if any.
    async fn current_user(&self) -> Option<User>;
}

/// In-memory session, the only implementation the storefront needs.
///
/// Holds at most one signed-in user. `save` replaces any previous identity;
/// `clear` signs out.
#[derive(Debug, Default)]
pub struct MemorySession {
    user: RwLock<Option<User>>,
}

impl MemorySession {
    /// Creates a signed-out session.
    pub fn new() -> Self {
        MemorySession {
            user: RwLock::new(None),
        }
    }

    /// Creates a session already signed in as `user`.
    pub fn signed_in(user: User) -> Self {
        MemorySession {
            user: RwLock::new(Some(user)),
        }
    }

    /// Signs in, replacing any previous identity.
    pub async fn save(&self, user: User) {
        *self.user.write().await = Some(user);
    }

    /// Signs out.
    pub async fn clear(&self) {
        *self.user.write().await = None;
    }
}

impl SessionProvider for MemorySession {
    async fn current_user_id(&self) -> Option<String> {
        self.user.read().await.as_ref().map(|u| u.id.clone())
    }

    async fn current_user(&self) -> Option<User> {
        self.user.read().await.clone()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use gamerzone_core::UserRole;

    fn user(id: &str) -> User {
        User {
            id: id.to_string(),
            email: format!("{id}@duocuc.cl"),
            full_name: "Alex Rojas".to_string(),
            phone: String::new(),
            address: String::new(),
            role: UserRole::User,
            created_at: 0,
        }
    }

    #[tokio::test]
    async fn test_signed_out_by_default() {
        let session = MemorySession::new();
        assert!(session.current_user_id().await.is_none());
        assert!(session.current_user().await.is_none());
    }

    #[tokio::test]
    async fn test_save_then_read() {
        let session = MemorySession::new();
        session.save(user("u1")).await;

        assert_eq!(session.current_user_id().await.as_deref(), Some("u1"));
        assert_eq!(session.current_user().await.unwrap().id, "u1");
    }

    #[tokio::test]
    async fn test_save_replaces_identity() {
        let session = MemorySession::signed_in(user("u1"));
        session.save(user("u2")).await;

        assert_eq!(session.current_user_id().await.as_deref(), Some("u2"));
    }

    #[tokio::test]
    async fn test_clear_signs_out() {
        let session = MemorySession::signed_in(user("u1"));
        session.clear().await;

        assert!(session.current_user_id().await.is_none());
    }
}
