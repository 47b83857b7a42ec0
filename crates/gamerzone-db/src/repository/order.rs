//! # Order Ledger
//!
//! Append-only access to the `orders` collection.
//!
//! Orders are written exactly once, at checkout, and never updated. The
//! ledger reads back a user's history newest-first.

use serde_json::{json, Value};
use sqlx::SqlitePool;
use tracing::debug;

use crate::doc::{f64_field, i64_field, opt_str_field, str_field};
use crate::store::DocStore;
use gamerzone_core::{CartLine, CoreResult, Order, OrderStatus};

/// Collection name for order documents.
pub const COLLECTION: &str = "orders";

/// Repository for the order ledger.
#[derive(Debug, Clone)]
pub struct OrderRepository {
    store: DocStore,
}

impl OrderRepository {
    /// Creates a new OrderRepository.
    pub fn new(pool: SqlitePool) -> Self {
        OrderRepository {
            store: DocStore::new(pool),
        }
    }

    /// Persists an order snapshot. Returns the store-assigned id.
    pub async fn create(&self, order: &Order) -> CoreResult<String> {
        let id = DocStore::assign_id();
        self.store.set(COLLECTION, &id, &order_to_body(order)).await?;

        debug!(order_id = %id, user_id = %order.user_id, total = order.total, "Created order");
        Ok(id)
    }

    /// Lists a user's orders, newest first.
    pub async fn list_for_user(&self, user_id: &str) -> CoreResult<Vec<Order>> {
        let docs = self.store.query_eq(COLLECTION, "userId", user_id).await?;

        let mut orders: Vec<Order> = docs
            .iter()
            .map(|d| body_to_order(&d.id, &d.body))
            .collect();

        orders.sort_by(|a, b| b.date.cmp(&a.date));

        Ok(orders)
    }
}

// =============================================================================
// Document Mapping
// =============================================================================

fn order_to_body(order: &Order) -> Value {
    let items: Vec<Value> = order
        .items
        .iter()
        .map(|line| {
            json!({
                "productId": line.product_id,
                "productName": line.product_name,
                "productImage": line.product_image,
                "quantity": line.quantity,
                "unitPrice": line.unit_price,
                "availableStock": line.available_stock,
            })
        })
        .collect();

    json!({
        "userId": order.user_id,
        "userName": order.user_name,
        "userEmail": order.user_email,
        "items": items,
        "subtotal": order.subtotal,
        "discount": order.discount,
        "total": order.total,
        "date": order.date,
        "status": order.status.as_str(),
        "discountCode": order.discount_code,
    })
}

fn body_to_order(id: &str, body: &Value) -> Order {
    let items = body
        .get("items")
        .and_then(Value::as_array)
        .map(|lines| lines.iter().map(body_to_line).collect())
        .unwrap_or_default();

    Order {
        id: id.to_string(),
        user_id: str_field(body, "userId"),
        user_name: str_field(body, "userName"),
        user_email: str_field(body, "userEmail"),
        items,
        subtotal: f64_field(body, "subtotal"),
        discount: f64_field(body, "discount"),
        total: f64_field(body, "total"),
        date: i64_field(body, "date"),
        status: OrderStatus::parse(&str_field(body, "status")),
        discount_code: opt_str_field(body, "discountCode"),
    }
}

fn body_to_line(body: &Value) -> CartLine {
    CartLine {
        product_id: str_field(body, "productId"),
        product_name: str_field(body, "productName"),
        product_image: str_field(body, "productImage"),
        quantity: i64_field(body, "quantity"),
        unit_price: f64_field(body, "unitPrice"),
        available_stock: i64_field(body, "availableStock"),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
