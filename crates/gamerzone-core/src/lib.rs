//! # gamerzone-core: Pure Business Logic for the Gamer Zone storefront
//!
//! This crate is the **heart** of the storefront. It contains all business
//! logic as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Gamer Zone Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 gamerzone-shop (orchestration)                  │   │
//! │  │    Cart Engine ──► Cart View State ──► Session / FX             │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ gamerzone-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │  totals   │  │   error   │  │ validation│  │   │
//! │  │   │  Product  │  │ subtotal/ │  │ CoreError │  │   rules   │  │   │
//! │  │   │  CartLine │  │ discount/ │  │ taxonomy  │  │  fallback │  │   │
//! │  │   │  Order    │  │   total   │  │           │  │   codes   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DOCUMENT STORE • NO NETWORK • PURE FUNCTIONS     │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                gamerzone-db (document store layer)              │   │
//! │  │        carts / products / orders / discountCodes / users        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, CartLine, Order, DiscountCode, ...)
//! - [`totals`] - Cart subtotal/discount/total arithmetic
//! - [`error`] - Domain error taxonomy
//! - [`validation`] - Business rule validation and the legacy code table
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Document store, network, file system access is FORBIDDEN here
//! 3. **Explicit Errors**: All errors are typed, never strings or panics
//! 4. **Total parsing**: Stored enum strings parse with a fallback default

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod totals;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use gamerzone_core::Product` instead of
// `use gamerzone_core::types::Product`.

pub use error::{CoreError, CoreResult, ValidationError};
pub use totals::{compute_totals, CartTotals};
pub use types::*;
