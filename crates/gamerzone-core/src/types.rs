//! # Domain Types
//!
//! Core domain types used throughout the Gamer Zone storefront.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │    CartLine     │   │     Order       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  product_id(FK) │   │  id             │       │
//! │  │  price (f64)    │   │  unit_price     │   │  items snapshot │       │
//! │  │  stock          │   │  quantity       │   │  subtotal/total │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  DiscountCode   │   │   OrderStatus   │   │    UserRole     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  code (unique)  │   │  Completed      │   │  User           │       │
//! │  │  percentage     │   │  Cancelled      │   │  Admin          │       │
//! │  │  usage limit    │   │  Pending        │   └─────────────────┘       │
//! │  └─────────────────┘   └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Stored Enums
//! `OrderStatus` and `UserRole` are persisted as their uppercase string
//! names. Parsing is total: an unrecognized stored value falls back to the
//! enum's default instead of failing the whole document.

use serde::{Deserialize, Serialize};

// =============================================================================
// Product
// =============================================================================

/// A catalog product.
///
/// `stock` is the only field mutated in place (by checkout); everything else
/// changes via full-document replace in the Product Store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique identifier, assigned by the store on creation.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Unit price. Non-negative.
    pub price: f64,

    /// Catalog category (e.g. "Consolas", "Juegos", "Accesorios").
    pub category: String,

    /// Marketing description.
    pub description: String,

    /// Reference to the product image (opaque to the core).
    pub image_url: String,

    /// Units available. Non-negative; decremented by checkout.
    pub stock: i64,

    /// Average review rating, 0–5.
    pub rating: f64,

    /// Number of reviews behind the rating.
    pub review_count: i64,
}

impl Product {
    /// Whether `quantity` units can currently be sold.
    pub fn has_stock_for(&self, quantity: i64) -> bool {
        self.stock >= quantity
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The persisted shape of one cart entry: just the product reference and a
/// quantity. Everything else is resolved from the live Product Store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartEntry {
    pub product_id: String,
    pub quantity: i64,
}

impl CartEntry {
    pub fn new(product_id: impl Into<String>, quantity: i64) -> Self {
        CartEntry {
            product_id: product_id.into(),
            quantity,
        }
    }
}

/// A reconciled cart line: a [`CartEntry`] joined against the live product.
///
/// The name/image/price/stock fields are a snapshot taken at the last read
/// and may go stale between reads; every mutation and the checkout path
/// re-validate against live product data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    /// Foreign reference to the product (not owned by the cart).
    pub product_id: String,

    /// Product name at last read.
    pub product_name: String,

    /// Product image reference at last read.
    pub product_image: String,

    /// Units in the cart. Positive.
    pub quantity: i64,

    /// Unit price at last read.
    pub unit_price: f64,

    /// Live stock at last read.
    pub available_stock: i64,
}

impl CartLine {
    /// Builds a line from a persisted entry and the live product it resolved
    /// to.
    pub fn from_product(product: &Product, quantity: i64) -> Self {
        CartLine {
            product_id: product.id.clone(),
            product_name: product.name.clone(),
            product_image: product.image_url.clone(),
            quantity,
            unit_price: product.price,
            available_stock: product.stock,
        }
    }

    /// Line subtotal: quantity × unit price.
    pub fn subtotal(&self) -> f64 {
        self.quantity as f64 * self.unit_price
    }
}

// =============================================================================
// Discount Code
// =============================================================================

/// A redeemable discount code.
///
/// Discounts are strictly percentages of the cart subtotal; fixed amounts
/// are not modeled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscountCode {
    /// Store-assigned identifier.
    pub id: String,

    /// The code itself (e.g. "GAMER20"). Matched case-insensitively.
    pub code: String,

    /// Percentage off the subtotal, 0–100.
    pub discount_percentage: f64,

    /// Whether the code can currently be redeemed.
    pub is_active: bool,

    /// Admin-facing description.
    pub description: String,

    /// Expiration date as "YYYY-MM-DD" (lexicographically comparable).
    /// Empty string means no expiration.
    pub expiration_date: String,

    /// Maximum redemptions. -1 means unlimited.
    pub usage_limit: i64,

    /// Redemptions so far. Monotonically incremented.
    pub usage_count: i64,
}

impl DiscountCode {
    /// Validity as a pure function of the code's fields and a given date.
    ///
    /// `today` must be formatted "YYYY-MM-DD" so the expiration comparison
    /// can stay lexicographic.
    pub fn is_valid_on(&self, today: &str) -> bool {
        if !self.is_active {
            return false;
        }

        if self.usage_limit >= 0 && self.usage_count >= self.usage_limit {
            return false;
        }

        if !self.expiration_date.is_empty() && self.expiration_date.as_str() < today {
            return false;
        }

        true
    }

    /// Validity against the current UTC date.
    pub fn is_valid(&self) -> bool {
        self.is_valid_on(&today_string())
    }
}

/// Current UTC date formatted "YYYY-MM-DD".
pub fn today_string() -> String {
    chrono::Utc::now().format("%Y-%m-%d").to_string()
}

// =============================================================================
// Order
// =============================================================================

/// The status of a completed order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// Order went through checkout. The only status the current checkout
    /// path produces.
    Completed,
    /// Order was cancelled after the fact.
    Cancelled,
    /// Order awaiting completion.
    Pending,
}

impl OrderStatus {
    /// Stored string name for the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Completed => "COMPLETED",
            OrderStatus::Cancelled => "CANCELLED",
            OrderStatus::Pending => "PENDING",
        }
    }

    /// Parses a stored status string. Unrecognized values fall back to
    /// [`OrderStatus::Completed`] rather than failing the document.
    pub fn parse(value: &str) -> Self {
        match value {
            "COMPLETED" => OrderStatus::Completed,
            "CANCELLED" => OrderStatus::Cancelled,
            "PENDING" => OrderStatus::Pending,
            _ => OrderStatus::Completed,
        }
    }
}

impl Default for OrderStatus {
    fn default() -> Self {
        OrderStatus::Completed
    }
}

/// A completed purchase. Immutable once created; the Order Ledger is
/// append-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Store-assigned identifier.
    pub id: String,

    /// The purchasing user.
    pub user_id: String,

    /// User name, denormalized at purchase time.
    pub user_name: String,

    /// User email, denormalized at purchase time.
    pub user_email: String,

    /// Snapshot of the validated cart lines at time of purchase.
    pub items: Vec<CartLine>,

    /// Sum of line subtotals.
    pub subtotal: f64,

    /// Discount amount (not percentage) applied to the subtotal.
    pub discount: f64,

    /// subtotal − discount.
    pub total: f64,

    /// Creation timestamp, epoch milliseconds.
    pub date: i64,

    /// Order status. Checkout always produces Completed.
    pub status: OrderStatus,

    /// The discount code redeemed, if any.
    pub discount_code: Option<String>,
}

// =============================================================================
// User
// =============================================================================

/// User role, stored as its uppercase name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    User,
    Admin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::User => "USER",
            UserRole::Admin => "ADMIN",
        }
    }

    /// Parses a stored role string, falling back to [`UserRole::User`].
    pub fn parse(value: &str) -> Self {
        match value {
            "ADMIN" => UserRole::Admin,
            _ => UserRole::User,
        }
    }
}

impl Default for UserRole {
    fn default() -> Self {
        UserRole::User
    }
}

/// A registered user. Only the fields the storefront core needs; credential
/// handling lives outside this workspace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub full_name: String,
    pub phone: String,
    pub address: String,
    pub role: UserRole,
    /// Registration timestamp, epoch milliseconds.
    pub created_at: i64,
}

// =============================================================================
// Unit Tests
// =============================================================================
