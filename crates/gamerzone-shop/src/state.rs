//! # Cart View State
//!
//! The state holder between the UI and the cart engine. Owns the visible
//! cart (lines and totals), the applied discount, a recoverable discount
//! error slot, and the last completed order.
//!
//! ## Discount Resolution
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    apply_discount_code(code)                            │
//! │                                                                         │
//! │  Discount Registry (authoritative)                                      │
//! │       │                                                                 │
//! │       ├── valid code ───────────────► apply registry percentage         │
//! │       │                                                                 │
//! │       ├── unknown/invalid code ──┐                                      │
//! │       │                          ▼                                      │
//! │       │                  legacy fixed table                             │
//! │       │                  (GAMER10/GAMER20/DUOC50)                       │
//! │       │                          │                                      │
//! │       │                          ├── hit ──► apply fixed percentage     │
//! │       │                          └── miss ─► recoverable error, 0%      │
//! │       │                                                                 │
//! │       └── registry unreachable ──► same legacy-table fallback           │
//! │                                     (offline mode)                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A registry code that validates successfully always wins; the fixed table
//! never overrides it.

use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::engine::CartEngine;
use crate::session::SessionProvider;
use gamerzone_core::validation::{fallback_percentage, normalize_code};
use gamerzone_core::{compute_totals, CartLine, CoreError, CoreResult, Order};
use gamerzone_db::{Database, DiscountRepository, UserRepository};

/// The discount currently applied to the cart.
///
/// `discount_id` is present only for registry-backed codes; legacy
/// fixed-table codes have no registry document and therefore no usage
/// counter to bump at checkout.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppliedDiscount {
    pub discount_id: Option<String>,
    pub code: String,
    pub percentage: f64,
}

/// Everything the cart screen renders.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartUiState {
    pub items: Vec<CartLine>,
    pub subtotal: f64,
    pub discount: f64,
    pub discount_percentage: f64,
    pub total: f64,
    pub applied_code: Option<AppliedDiscount>,
    /// Recoverable message for a rejected discount code. Cleared on the
    /// next successful apply or removal.
    pub discount_error: Option<String>,
    /// The most recently completed order, for the confirmation screen.
    pub last_order: Option<Order>,
}

impl CartUiState {
    fn recompute(&mut self) {
        let pct = self
            .applied_code
            .as_ref()
            .map(|d| d.percentage)
            .unwrap_or(0.0);
        let totals = compute_totals(&self.items, pct);

        self.subtotal = totals.subtotal;
        self.discount = totals.discount;
        self.discount_percentage = totals.discount_percentage;
        self.total = totals.total;
    }
}

/// The per-session cart state holder.
///
/// All mutations resolve the acting user from the session provider; nothing
/// here reads ambient identity.
#[derive(Debug)]
pub struct CartState<S: SessionProvider> {
    engine: CartEngine,
    discounts: DiscountRepository,
    users: UserRepository,
    session: S,
    state: Mutex<CartUiState>,
}

impl<S: SessionProvider> CartState<S> {
    /// Creates a view state over the given database and identity source.
    pub fn new(db: &Database, session: S) -> Self {
        CartState {
            engine: CartEngine::new(db),
            discounts: db.discounts(),
            users: db.users(),
            session,
            state: Mutex::new(CartUiState::default()),
        }
    }

    /// Returns a copy of the current view state.
    pub async fn snapshot(&self) -> CartUiState {
        self.state.lock().await.clone()
    }

    /// Reloads the cart from the store and recomputes totals.
    pub async fn refresh(&self) -> CoreResult<CartUiState> {
        let user_id = self.user_id().await?;
        let items = self.engine.load(&user_id).await?;

        let mut state = self.state.lock().await;
        state.items = items;
        state.recompute();
        Ok(state.clone())
    }

    /// Adds a product to the signed-in user's cart.
    pub async fn add_to_cart(&self, product_id: &str, quantity: i64) -> CoreResult<CartUiState> {
        let user_id = self.user_id().await?;
        let items = self.engine.add_to_cart(&user_id, product_id, quantity).await?;
        self.replace_items(items).await
    }

    /// Sets the quantity of a cart line; below 1 removes it.
    pub async fn update_quantity(
        &self,
        product_id: &str,
        new_quantity: i64,
    ) -> CoreResult<CartUiState> {
        let user_id = self.user_id().await?;
        let items = self
            .engine
            .update_quantity(&user_id, product_id, new_quantity)
            .await?;
        self.replace_items(items).await
    }

    /// Removes a product from the cart.
    pub async fn remove_from_cart(&self, product_id: &str) -> CoreResult<CartUiState> {
        let user_id = self.user_id().await?;
        let items = self.engine.remove_from_cart(&user_id, product_id).await?;
        self.replace_items(items).await
    }

    /// Empties the cart, keeping any applied discount.
    pub async fn clear_cart(&self) -> CoreResult<CartUiState> {
        let user_id = self.user_id().await?;
        self.engine.clear_cart(&user_id).await?;
        self.replace_items(Vec::new()).await
    }

    /// Applies a discount code to the cart.
    ///
    /// The registry is authoritative; the legacy fixed table covers codes
    /// the registry does not know and keeps discounts working when the
    /// registry is unreachable. A rejected code is not an error: it clears
    /// any applied discount and leaves a message in `discount_error`.
    pub async fn apply_discount_code(&self, code: &str) -> CoreResult<CartUiState> {
        let normalized = normalize_code(code);

        let applied = match self.discounts.validate(&normalized).await {
            Ok(Some(registered)) => Some(AppliedDiscount {
                discount_id: Some(registered.id.clone()),
                code: registered.code.clone(),
                percentage: registered.discount_percentage,
            }),
            Ok(None) => fallback_percentage(&normalized).map(|pct| AppliedDiscount {
                discount_id: None,
                code: normalized.clone(),
                percentage: pct,
            }),
            Err(err) if err.is_transient() => {
                warn!(code = %normalized, error = %err, "Discount registry unreachable, using fixed table");
                fallback_percentage(&normalized).map(|pct| AppliedDiscount {
                    discount_id: None,
                    code: normalized.clone(),
                    percentage: pct,
                })
            }
            Err(err) => return Err(err),
        };

        let mut state = self.state.lock().await;
        match applied {
            Some(discount) => {
                debug!(code = %discount.code, percentage = discount.percentage, "Applied discount");
                state.applied_code = Some(discount);
                state.discount_error = None;
            }
            None => {
                state.applied_code = None;
                state.discount_error = Some("Código de descuento inválido o expirado".to_string());
            }
        }
        state.recompute();
        Ok(state.clone())
    }

    /// Clears the applied discount and recomputes at 0%.
    pub async fn remove_discount(&self) -> CoreResult<CartUiState> {
        let mut state = self.state.lock().await;
        state.applied_code = None;
        state.discount_error = None;
        state.recompute();
        Ok(state.clone())
    }

    /// Runs checkout for the signed-in user.
    ///
    /// Resolves identity from the session, loads the user record, delegates
    /// to the engine, and bumps the registry usage counter for a
    /// registry-backed code. A failed usage bump is tolerated: the order
    /// already exists and the counter is advisory.
    ///
    /// ## Errors
    /// * `Unauthenticated` - No signed-in user
    /// * Everything [`CartEngine::checkout`] can return
    pub async fn checkout(&self) -> CoreResult<Order> {
        let user_id = self.user_id().await?;
        let user = self.users.get_by_id(&user_id).await?;

        let (code, percentage, discount_id) = {
            let state = self.state.lock().await;
            match &state.applied_code {
                Some(d) => (Some(d.code.clone()), d.percentage, d.discount_id.clone()),
                None => (None, 0.0, None),
            }
        };

        let order = self
            .engine
            .checkout(&user_id, &user, code, percentage)
            .await?;

        if let Some(discount_id) = discount_id {
            if let Err(err) = self.discounts.increment_usage(&discount_id).await {
                warn!(discount_id = %discount_id, error = %err, "Usage increment failed after checkout");
            }
        }

        let mut state = self.state.lock().await;
        *state = CartUiState {
            last_order: Some(order.clone()),
            ..CartUiState::default()
        };

        Ok(order)
    }

    async fn user_id(&self) -> CoreResult<String> {
        self.session
            .current_user_id()
            .await
            .ok_or(CoreError::Unauthenticated)
    }

    async fn replace_items(&self, items: Vec<CartLine>) -> CoreResult<CartUiState> {
        let mut state = self.state.lock().await;
        state.items = items;
        state.recompute();
        Ok(state.clone())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::MemorySession;
    use gamerzone_core::{DiscountCode, Product, User, UserRole};
    use gamerzone_db::DbConfig;

    async fn db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    fn buyer() -> User {
        User {
            id: "u1".to_string(),
            email: "alex@duocuc.cl".to_string(),
            full_name: "Alex Rojas".to_string(),
            phone: String::new(),
            address: String::new(),
            role: UserRole::User,
            created_at: 0,
        }
    }

    async fn signed_in_state(db: &Database) -> CartState<MemorySession> {
        db.users().save(&buyer()).await.unwrap();
        CartState::new(db, MemorySession::signed_in(buyer()))
    }

    async fn seed_product(db: &Database, name: &str, price: f64, stock: i64) -> String {
        db.products()
            .create(&Product {
                id: String::new(),
                name: name.to_string(),
                price,
                category: "Juegos".to_string(),
                description: String::new(),
                image_url: String::new(),
                stock,
                rating: 4.0,
                review_count: 1,
            })
            .await
            .unwrap()
    }

    fn registry_code(code: &str, pct: f64) -> DiscountCode {
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
    async fn test_totals_recompute_on_apply() {
        // 2×100 + 1×50 = 250; at 10%: discount 25, total 225.
        let db = db().await;
        let state = signed_in_state(&db).await;
        let p1 = seed_product(&db, "PS5", 100.0, 10).await;
        let p2 = seed_product(&db, "Game", 50.0, 10).await;
        db.discounts().create(&registry_code("GAMER10", 10.0)).await.unwrap();

        state.add_to_cart(&p1, 2).await.unwrap();
        state.add_to_cart(&p2, 1).await.unwrap();

        let ui = state.apply_discount_code("GAMER10").await.unwrap();
        assert_eq!(ui.subtotal, 250.0);
        assert_eq!(ui.discount, 25.0);
        assert_eq!(ui.total, 225.0);
        assert!(ui.discount_error.is_none());
        assert_eq!(ui.applied_code.as_ref().unwrap().percentage, 10.0);
    }

    #[tokio::test]
    async fn test_registry_overrides_fixed_table() {
        // GAMER20 exists in the fixed table at 20%, but the registry says
        // 15%. The registry wins.
        let db = db().await;
        let state = signed_in_state(&db).await;
        let p1 = seed_product(&db, "PS5", 100.0, 10).await;
        let id = db
            .discounts()
            .create(&registry_code("GAMER20", 15.0))
            .await
            .unwrap();

        state.add_to_cart(&p1, 1).await.unwrap();
        let ui = state.apply_discount_code("gamer20").await.unwrap();

        let applied = ui.applied_code.unwrap();
        assert_eq!(applied.percentage, 15.0);
        assert_eq!(applied.discount_id.as_deref(), Some(id.as_str()));
    }

    #[tokio::test]
    async fn test_fixed_table_covers_registry_miss() {
        // Empty registry: DUOC50 still works through the fixed table, with
        // no registry id to bump.
        let db = db().await;
        let state = signed_in_state(&db).await;
        let p1 = seed_product(&db, "PS5", 100.0, 10).await;

        state.add_to_cart(&p1, 2).await.unwrap();
        let ui = state.apply_discount_code(" duoc50 ").await.unwrap();

        let applied = ui.applied_code.unwrap();
        assert_eq!(applied.code, "DUOC50");
        assert_eq!(applied.percentage, 50.0);
        assert!(applied.discount_id.is_none());
        assert_eq!(ui.total, 100.0);
    }

    #[tokio::test]
    async fn test_unknown_code_sets_recoverable_error() {
        let db = db().await;
        let state = signed_in_state(&db).await;
        let p1 = seed_product(&db, "PS5", 100.0, 10).await;
        db.discounts().create(&registry_code("GAMER10", 10.0)).await.unwrap();

        state.add_to_cart(&p1, 1).await.unwrap();
        state.apply_discount_code("GAMER10").await.unwrap();

        // A bad code clears the previous discount and recomputes at 0%.
        let ui = state.apply_discount_code("NOPE123").await.unwrap();
        assert!(ui.applied_code.is_none());
        assert!(ui.discount_error.is_some());
        assert_eq!(ui.discount, 0.0);
        assert_eq!(ui.total, 100.0);
    }

    #[tokio::test]
    async fn test_remove_discount_recomputes() {
        let db = db().await;
        let state = signed_in_state(&db).await;
        let p1 = seed_product(&db, "PS5", 100.0, 10).await;

        state.add_to_cart(&p1, 1).await.unwrap();
        state.apply_discount_code("GAMER20").await.unwrap();

        let ui = state.remove_discount().await.unwrap();
        assert!(ui.applied_code.is_none());
        assert_eq!(ui.discount_percentage, 0.0);
        assert_eq!(ui.total, 100.0);
    }

    #[tokio::test]
    async fn test_checkout_requires_session() {
        let db = db().await;
        let state = CartState::new(&db, MemorySession::new());

        let err = state.checkout().await.unwrap_err();
        assert!(matches!(err, CoreError::Unauthenticated));
    }

    #[tokio::test]
    async fn test_checkout_bumps_usage_and_resets() {
        let db = db().await;
        let state = signed_in_state(&db).await;
        let p1 = seed_product(&db, "PS5", 100.0, 10).await;
        db.discounts().create(&registry_code("GAMER10", 10.0)).await.unwrap();

        state.add_to_cart(&p1, 2).await.unwrap();
        state.apply_discount_code("GAMER10").await.unwrap();

        let order = state.checkout().await.unwrap();
        assert_eq!(order.total, 180.0);

        // usage counter advanced
        let codes = db.discounts().get_all().await.unwrap();
        assert_eq!(codes[0].usage_count, 1);

        // state reset around the completed order
        let ui = state.snapshot().await;
        assert!(ui.items.is_empty());
        assert!(ui.applied_code.is_none());
        assert_eq!(ui.last_order.unwrap().id, order.id);

        // store-side cart cleared, stock decremented
        assert!(state.refresh().await.unwrap().items.is_empty());
        assert_eq!(db.products().get_by_id(&p1).await.unwrap().stock, 8);
    }

    #[tokio::test]
    async fn test_fixed_table_code_skips_usage_bump() {
        let db = db().await;
        let state = signed_in_state(&db).await;
        let p1 = seed_product(&db, "PS5", 100.0, 10).await;
        db.discounts().create(&registry_code("GAMER10", 10.0)).await.unwrap();

        state.add_to_cart(&p1, 1).await.unwrap();
        // DUOC50 comes from the fixed table, not the registry.
        state.apply_discount_code("DUOC50").await.unwrap();
        state.checkout().await.unwrap();

        let codes = db.discounts().get_all().await.unwrap();
        assert_eq!(codes[0].usage_count, 0);
    }

    #[tokio::test]
    async fn test_empty_cart_checkout_surfaces_empty_cart() {
        let db = db().await;
        let state = signed_in_state(&db).await;

        let err = state.checkout().await.unwrap_err();
        assert!(matches!(err, CoreError::EmptyCart));
    }
}
