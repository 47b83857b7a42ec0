//! # gamerzone-db: Document Store Layer for Gamer Zone
//!
//! This crate provides persistence for the Gamer Zone storefront.
//! Entities live as JSON documents in a SQLite-backed store accessed
//! with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Gamer Zone Data Flow                              │
//! │                                                                         │
//! │  Shop flow (CartEngine / CartState)                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   gamerzone-db (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐   │   │
//! │  │   │   Database    │    │  Repositories │    │   DocStore   │   │   │
//! │  │   │   (pool.rs)   │    │ (product.rs,  │    │  (store.rs)  │   │   │
//! │  │   │               │    │  cart.rs, …)  │    │              │   │   │
//! │  │   │ SqlitePool    │◄───│ ProductRepo   │◄───│ get/set/     │   │   │
//! │  │   │ Connection    │    │ CartRepo      │    │ delete/      │   │   │
//! │  │   │ Management    │    │ OrderRepo     │    │ query_eq     │   │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘   │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │        SQLite: documents(collection, id, body JSON)             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`store`] - The generic JSON document store
//! - [`doc`] - Schema-on-read field accessors
//! - [`error`] - Store error types
//! - [`repository`] - Per-collection repositories
//!
//! ## Usage
//!
//! ```rust,ignore
//! use gamerzone_db::{Database, DbConfig};
//!
//! let config = DbConfig::new("path/to/gamerzone.db");
//! let db = Database::new(config).await?;
//!
//! let catalog = db.products().get_all().await?;
//! let cart = db.carts().get_cart("user-42").await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod doc;
pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use store::{DocStore, Document};

// Repository re-exports for convenience
pub use repository::cart::CartRepository;
pub use repository::discount::DiscountRepository;
pub use repository::order::OrderRepository;
pub use repository::product::ProductRepository;
pub use repository::user::UserRepository;
