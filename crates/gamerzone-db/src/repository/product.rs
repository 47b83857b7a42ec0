//! # Product Repository
//!
//! Catalog access over the `products` collection.
//!
//! ## Key Operations
//! - Catalog reads (all, by id, by category, distinct categories)
//! - Admin CRUD
//! - Conditional stock decrement at checkout
//!
//! ## Stock Decrement
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │              decrease_stock(product_id, quantity)                       │
//! │                                                                         │
//! │  UPDATE ... SET stock = stock - qty WHERE stock >= qty                  │
//! │       │                                                                 │
//! │       ├── 1 row touched ──► Ok(())                                      │
//! │       │                                                                 │
//! │       └── 0 rows touched ──► fresh read                                 │
//! │               ├── document gone ──► NotFound                            │
//! │               └── stock too low ──► InsufficientStock { available }     │
//! │                                                                         │
//! │  The condition rides inside the UPDATE, so two buyers racing on the     │
//! │  last unit cannot both win: one decrements, the other reads back the    │
//! │  real remaining stock for its error.                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde_json::{json, Value};
use sqlx::SqlitePool;
use tracing::debug;

use crate::doc::{f64_field, i64_field, str_field};
use crate::store::DocStore;
use gamerzone_core::validation::validate_product;
use gamerzone_core::{CoreError, CoreResult, Product};

/// Collection name for product documents.
pub const COLLECTION: &str = "products";

/// Repository for product catalog operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = ProductRepository::new(pool);
///
/// let catalog = repo.get_all().await?;
/// let consoles = repo.get_by_category("Consolas").await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    store: DocStore,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository {
            store: DocStore::new(pool),
        }
    }

    /// Fetches one product by id.
    ///
    /// ## Errors
    /// * `NotFound` - No document with that id in the catalog
    pub async fn get_by_id(&self, product_id: &str) -> CoreResult<Product> {
        let body = self
            .store
            .get(COLLECTION, product_id)
            .await?
            .ok_or_else(|| CoreError::not_found("Product", product_id))?;

        Ok(body_to_product(product_id, &body))
    }

    /// Lists the whole catalog.
    pub async fn get_all(&self) -> CoreResult<Vec<Product>> {
        let docs = self.store.list(COLLECTION).await?;

        debug!(count = docs.len(), "Loaded product catalog");

        Ok(docs
            .iter()
            .map(|d| body_to_product(&d.id, &d.body))
            .collect())
    }

    /// Lists products in one category.
    pub async fn get_by_category(&self, category: &str) -> CoreResult<Vec<Product>> {
        let docs = self.store.query_eq(COLLECTION, "category", category).await?;

        Ok(docs
            .iter()
            .map(|d| body_to_product(&d.id, &d.body))
            .collect())
    }

    /// Returns the distinct category names in ascending order.
    pub async fn get_categories(&self) -> CoreResult<Vec<String>> {
        let docs = self.store.list(COLLECTION).await?;

        let mut categories: Vec<String> = docs
            .iter()
            .map(|d| str_field(&d.body, "category"))
            .filter(|c| !c.is_empty())
            .collect();

        categories.sort();
        categories.dedup();

        Ok(categories)
    }

    /// Creates a product with a store-assigned id. Returns the new id.
    ///
    /// ## Errors
    /// * `Validation` - Blank name, negative price/stock/reviewCount, or a
    ///   rating outside 0–5
    pub async fn create(&self, product: &Product) -> CoreResult<String> {
        validate_product(product)?;

        let id = DocStore::assign_id();
        self.store
            .set(COLLECTION, &id, &product_to_body(product))
            .await?;

        debug!(product_id = %id, name = %product.name, "Created product");
        Ok(id)
    }

    /// Replaces a product document.
    ///
    /// ## Errors
    /// * `InvalidArgument` - The product carries no id
    /// * `Validation` - Field values outside the data-model ranges
    pub async fn update(&self, product: &Product) -> CoreResult<()> {
        if product.id.is_empty() {
            return Err(CoreError::InvalidArgument(
                "cannot update a product without an id".to_string(),
            ));
        }
        validate_product(product)?;

        self.store
            .set(COLLECTION, &product.id, &product_to_body(product))
            .await?;

        Ok(())
    }

    /// Deletes a product. Deleting a missing product is not an error.
    pub async fn delete(&self, product_id: &str) -> CoreResult<()> {
        self.store.delete(COLLECTION, product_id).await?;
        Ok(())
    }

    /// Decrements a product's stock by the purchased quantity.
    ///
    /// The decrement is conditional: it only applies while
    /// `stock >= quantity` holds at write time. A losing racer gets an
    /// `InsufficientStock` built from a fresh read rather than its stale
    /// snapshot.
    ///
    /// ## Errors
    /// * `NotFound` - Product vanished from the catalog
    /// * `InsufficientStock` - Remaining stock cannot cover the quantity
    pub async fn decrease_stock(&self, product_id: &str, quantity: i64) -> CoreResult<()> {
        let applied = self
            .store
            .decrement_if_at_least(COLLECTION, product_id, "stock", quantity)
            .await?;

        if applied {
            debug!(product_id = %product_id, quantity, "Decremented stock");
            return Ok(());
        }

        // Refused write: rebuild the error from current state.
        let product = self.get_by_id(product_id).await?;
        Err(CoreError::insufficient_stock(
            &product.name,
            product.stock,
            quantity,
        ))
    }
}

// =============================================================================
// Document Mapping
// =============================================================================

/// Maps a stored body to a Product. Schema-on-read: numeric fields accept
/// integer or float JSON, absent fields fall back to their zero values.
fn body_to_product(id: &str, body: &Value) -> Product {
    Product {
        id: id.to_string(),
        name: str_field(body, "name"),
        price: f64_field(body, "price"),
        category: str_field(body, "category"),
        description: str_field(body, "description"),
        image_url: str_field(body, "imageUrl"),
        stock: i64_field(body, "stock"),
        rating: f64_field(body, "rating"),
        review_count: i64_field(body, "reviewCount"),
    }
}

/// Maps a Product to its stored body. The id lives in the document key,
/// never in the body.
fn product_to_body(product: &Product) -> Value {
    json!({
        "name": product.name,
        "price": product.price,
        "category": product.category,
        "description": product.description,
        "imageUrl": product.image_url,
        "stock": product.stock,
        "rating": product.rating,
        "reviewCount": product.review_count,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use serde_json::json;

    async fn repo() -> ProductRepository {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.products()
    }

    fn sample(name: &str, category: &str, price: f64, stock: i64) -> Product {
        Product {
            id: String::new(),
            name: name.to_string(),
            price,
            category: category.to_string(),
            description: format!("{name} description"),
            image_url: String::new(),
            stock,
            rating: 4.5,
            review_count: 10,
        }
    }

    #[tokio::test]
    async fn test_create_then_get_by_id() {
        let repo = repo().await;
        let id = repo
            .create(&sample("PlayStation 5", "Consolas", 599990.0, 10))
            .await
            .unwrap();

        let product = repo.get_by_id(&id).await.unwrap();
        assert_eq!(product.id, id);
        assert_eq!(product.name, "PlayStation 5");
        assert_eq!(product.stock, 10);
    }

    #[tokio::test]
    async fn test_get_by_id_missing_is_not_found() {
        let repo = repo().await;
        let err = repo.get_by_id("ghost").await.unwrap_err();
        assert!(matches!(err, CoreError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_get_by_category_filters() {
        let repo = repo().await;
        repo.create(&sample("PS5", "Consolas", 1.0, 1)).await.unwrap();
        repo.create(&sample("Elden Ring", "Juegos", 1.0, 1)).await.unwrap();
        repo.create(&sample("Xbox Series X", "Consolas", 1.0, 1))
            .await
            .unwrap();

        let consoles = repo.get_by_category("Consolas").await.unwrap();
        assert_eq!(consoles.len(), 2);
        assert!(consoles.iter().all(|p| p.category == "Consolas"));
    }

    #[tokio::test]
    async fn test_categories_distinct_and_sorted() {
        let repo = repo().await;
        for category in ["B", "A", "A", "C"] {
            repo.create(&sample("x", category, 1.0, 1)).await.unwrap();
        }

        let categories = repo.get_categories().await.unwrap();
        assert_eq!(categories, vec!["A", "B", "C"]);
    }

    #[tokio::test]
    async fn test_create_rejects_out_of_range_fields() {
        let repo = repo().await;

        let mut bad = sample("Headset", "Accesorios", -50.0, -3);
        bad.rating = 9.5;
        bad.review_count = -1;

        let err = repo.create(&bad).await.unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));

        // rejected write left the catalog empty
        assert!(repo.get_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_rejects_negative_price() {
        let repo = repo().await;
        let id = repo.create(&sample("PS5", "Consolas", 599990.0, 10)).await.unwrap();

        let mut updated = sample("PS5", "Consolas", -1.0, 10);
        updated.id = id.clone();

        let err = repo.update(&updated).await.unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
        assert_eq!(repo.get_by_id(&id).await.unwrap().price, 599990.0);
    }

    #[tokio::test]
    async fn test_update_requires_id() {
        let repo = repo().await;
        let err = repo.update(&sample("PS5", "Consolas", 1.0, 1)).await.unwrap_err();
        assert!(matches!(err, CoreError::InvalidArgument(_)));
    }

    #[tokio::test]
    async fn test_decrease_stock_happy_path() {
        let repo = repo().await;
        let id = repo.create(&sample("PS5", "Consolas", 1.0, 5)).await.unwrap();

        repo.decrease_stock(&id, 3).await.unwrap();
        assert_eq!(repo.get_by_id(&id).await.unwrap().stock, 2);
    }

    #[tokio::test]
    async fn test_decrease_stock_insufficient_reports_available() {
        let repo = repo().await;
        let id = repo.create(&sample("PS5", "Consolas", 1.0, 3)).await.unwrap();

        let err = repo.decrease_stock(&id, 4).await.unwrap_err();
        match err {
            CoreError::InsufficientStock {
                available,
                requested,
                ..
            } => {
                assert_eq!(available, 3);
                assert_eq!(requested, 4);
            }
            other => panic!("expected InsufficientStock, got {other:?}"),
        }

        // refused decrement left stock untouched
        assert_eq!(repo.get_by_id(&id).await.unwrap().stock, 3);
    }

    #[tokio::test]
    async fn test_decrease_stock_missing_product() {
        let repo = repo().await;
        let err = repo.decrease_stock("ghost", 1).await.unwrap_err();
        assert!(matches!(err, CoreError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_reads_coerce_integer_prices() {
        // A document written by other tooling with an integer price and a
        // float stock.
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let store = DocStore::new(db.pool().clone());
        store
            .set(
                COLLECTION,
                "p1",
                &json!({ "name": "Headset", "price": 59990, "stock": 4.0 }),
            )
            .await
            .unwrap();

        let product = db.products().get_by_id("p1").await.unwrap();
        assert_eq!(product.price, 59990.0);
        assert_eq!(product.stock, 4);
        assert_eq!(product.rating, 0.0); // absent field
    }
}
