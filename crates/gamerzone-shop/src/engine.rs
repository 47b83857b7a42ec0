//! # Cart Engine
//!
//! Per-user cart mutations and checkout against the document store.
//!
//! ## Persistence Shape
//! Carts persist only product references and quantities; every load joins
//! them back against the live catalog:
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        load(user_id)                                    │
//! │                                                                         │
//! │  carts/{userId} ──► [{productId: p1, quantity: 2},                      │
//! │                      {productId: p9, quantity: 1}]                      │
//! │       │                                                                 │
//! │       ▼  resolve each entry against products/                           │
//! │                                                                         │
//! │  p1 ──► Product ──► CartLine { name, unitPrice, availableStock, qty=2 } │
//! │  p9 ──► (deleted) ─► line silently dropped                              │
//! │                                                                         │
//! │  Result: only lines whose product still exists, priced live.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Checkout Sequence
//! ```text
//! load ─► EmptyCart gate ─► re-validate stock per line (abort before any
//! write) ─► totals ─► persist Order ─► decrement stock per line ─► clear
//! cart ─► Order
//! ```
//! There is no multi-document transaction in the store, so a failure after
//! the order write leaves the order persisted with stock or cart cleanup
//! incomplete. Accepted gap.
//!
//! ## Concurrency
//! Cart writes are whole-document replaces with no version token. Two
//! concurrent mutations for the same user can lose updates (last write
//! wins); see `concurrent_saves_last_write_wins` in the tests.

use tracing::{debug, info, warn};

use gamerzone_core::validation::validate_quantity;
use gamerzone_core::{
    compute_totals, today_string, CartEntry, CartLine, CoreError, CoreResult, Order, OrderStatus,
    User,
};
use gamerzone_db::{CartRepository, Database, OrderRepository, ProductRepository};

/// Orchestrates cart reads, mutations, and checkout for one store.
///
/// Cheap to clone; all clones share the underlying pool.
#[derive(Debug, Clone)]
pub struct CartEngine {
    products: ProductRepository,
    carts: CartRepository,
    orders: OrderRepository,
}

impl CartEngine {
    /// Creates an engine over the given database.
    pub fn new(db: &Database) -> Self {
        CartEngine {
            products: db.products(),
            carts: db.carts(),
            orders: db.orders(),
        }
    }

    /// Loads a user's cart, reconciled against the live catalog.
    ///
    /// Entries whose product no longer resolves are silently dropped; the
    /// products may have been retired since the cart was written. Any other
    /// store failure propagates. A missing cart document is an empty cart.
    pub async fn load(&self, user_id: &str) -> CoreResult<Vec<CartLine>> {
        let entries = self.carts.get_entries(user_id).await?;
        self.resolve(entries).await
    }

    /// Adds `quantity` units of a product to the user's cart.
    ///
    /// Upserts by productId: adding a product already in the cart increases
    /// its quantity. The combined quantity is gated against live stock.
    ///
    /// ## Errors
    /// * `Validation` - Quantity below 1
    /// * `NotFound` - No such product
    /// * `InsufficientStock` - `existing + quantity` exceeds live stock;
    ///   the persisted quantity is left unchanged
    pub async fn add_to_cart(
        &self,
        user_id: &str,
        product_id: &str,
        quantity: i64,
    ) -> CoreResult<Vec<CartLine>> {
        validate_quantity(quantity)?;

        let product = self.products.get_by_id(product_id).await?;
        let mut entries = self.carts.get_entries(user_id).await?;

        let existing = entries
            .iter()
            .find(|e| e.product_id == product_id)
            .map(|e| e.quantity)
            .unwrap_or(0);
        let requested = existing + quantity;

        if !product.has_stock_for(requested) {
            return Err(CoreError::insufficient_stock(
                &product.name,
                product.stock,
                requested,
            ));
        }

        match entries.iter_mut().find(|e| e.product_id == product_id) {
            Some(entry) => entry.quantity = requested,
            None => entries.push(CartEntry::new(product_id, quantity)),
        }

        self.carts.save_entries(user_id, &entries).await?;

        debug!(user_id = %user_id, product_id = %product_id, quantity = requested, "Added to cart");
        self.resolve(entries).await
    }

    /// Sets the quantity of a product already in the cart.
    ///
    /// A quantity below 1 delegates to [`CartEngine::remove_from_cart`].
    ///
    /// ## Errors
    /// * `NotFound` - The product is not in the cart
    /// * `InsufficientStock` - The new quantity exceeds live stock
    pub async fn update_quantity(
        &self,
        user_id: &str,
        product_id: &str,
        new_quantity: i64,
    ) -> CoreResult<Vec<CartLine>> {
        if new_quantity < 1 {
            return self.remove_from_cart(user_id, product_id).await;
        }

        let mut entries = self.carts.get_entries(user_id).await?;
        let Some(entry) = entries.iter_mut().find(|e| e.product_id == product_id) else {
            return Err(CoreError::not_found("Cart item", product_id));
        };

        let product = self.products.get_by_id(product_id).await?;
        if !product.has_stock_for(new_quantity) {
            return Err(CoreError::insufficient_stock(
                &product.name,
                product.stock,
                new_quantity,
            ));
        }

        entry.quantity = new_quantity;
        self.carts.save_entries(user_id, &entries).await?;

        debug!(user_id = %user_id, product_id = %product_id, quantity = new_quantity, "Updated quantity");
        self.resolve(entries).await
    }

    /// Removes a product from the cart. Idempotent: removing a product that
    /// is not in the cart persists the cart unchanged.
    pub async fn remove_from_cart(
        &self,
        user_id: &str,
        product_id: &str,
    ) -> CoreResult<Vec<CartLine>> {
        let mut entries = self.carts.get_entries(user_id).await?;
        entries.retain(|e| e.product_id != product_id);

        self.carts.save_entries(user_id, &entries).await?;

        debug!(user_id = %user_id, product_id = %product_id, "Removed from cart");
        self.resolve(entries).await
    }

    /// Deletes the user's cart document.
    pub async fn clear_cart(&self, user_id: &str) -> CoreResult<()> {
        self.carts.delete(user_id).await
    }

    /// Turns the cart into an order.
    ///
    /// Re-validates every line against live stock before the first write;
    /// the first offending product aborts the whole checkout. After the
    /// order is persisted, stock is decremented per line and the cart is
    /// cleared last.
    ///
    /// ## Errors
    /// * `EmptyCart` - Nothing to buy; no writes performed
    /// * `InsufficientStock` - A line exceeds live stock; no writes performed
    pub async fn checkout(
        &self,
        user_id: &str,
        user: &User,
        discount_code: Option<String>,
        discount_percentage: f64,
    ) -> CoreResult<Order> {
        let lines = self.load(user_id).await?;
        if lines.is_empty() {
            return Err(CoreError::EmptyCart);
        }

        // Stock gate across the whole cart before any write.
        for line in &lines {
            if line.quantity > line.available_stock {
                return Err(CoreError::insufficient_stock(
                    &line.product_name,
                    line.available_stock,
                    line.quantity,
                ));
            }
        }

        let totals = compute_totals(&lines, discount_percentage);

        let mut order = Order {
            id: String::new(),
            user_id: user_id.to_string(),
            user_name: user.full_name.clone(),
            user_email: user.email.clone(),
            items: lines.clone(),
            subtotal: totals.subtotal,
            discount: totals.discount,
            total: totals.total,
            date: chrono::Utc::now().timestamp_millis(),
            status: OrderStatus::Completed,
            discount_code,
        };

        order.id = self.orders.create(&order).await?;

        info!(
            order_id = %order.id,
            user_id = %user_id,
            total = order.total,
            date = %today_string(),
            "Checkout completed"
        );

        // Post-order effects. A failure here leaves the order persisted
        // with cleanup incomplete (no rollback in the store).
        for line in &lines {
            if let Err(err) = self
                .products
                .decrease_stock(&line.product_id, line.quantity)
                .await
            {
                warn!(
                    order_id = %order.id,
                    product_id = %line.product_id,
                    error = %err,
                    "Stock decrement failed after order creation"
                );
                return Err(err);
            }
        }

        self.carts.delete(user_id).await?;

        Ok(order)
    }

    /// Joins persisted entries against the live catalog, dropping entries
    /// whose product no longer exists.
    async fn resolve(&self, entries: Vec<CartEntry>) -> CoreResult<Vec<CartLine>> {
        let mut lines = Vec::with_capacity(entries.len());

        for entry in entries {
            match self.products.get_by_id(&entry.product_id).await {
                Ok(product) => lines.push(CartLine::from_product(&product, entry.quantity)),
                Err(CoreError::NotFound { .. }) => {
                    debug!(product_id = %entry.product_id, "Dropping cart line for missing product");
                }
                Err(other) => return Err(other),
            }
        }

        Ok(lines)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
