//! # Error Types
//!
//! Domain-specific error types for gamerzone-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  gamerzone-core errors (this file)                                      │
//! │  ├── CoreError        - Domain errors (the full taxonomy)               │
//! │  └── ValidationError  - Input validation failures                       │
//! │                                                                         │
//! │  gamerzone-db errors (separate crate)                                   │
//! │  └── DbError          - Store operation failures                        │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError ← DbError (wrapped as Transient)     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (product name, available stock, etc.)
//! 3. Errors are enum variants, never String
//! 4. Every public operation returns a Result; nothing throws across a
//!    component boundary

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Domain errors surfaced by every storefront component.
///
/// Recoverable variants (insufficient stock, empty cart, invalid code input)
/// map to inline UI messages; [`CoreError::Transient`] maps to a dismissible
/// retry banner.
#[derive(Debug, Error)]
pub enum CoreError {
    /// An entity (product, user, cart line, discount code) is absent.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Requested quantity exceeds live stock.
    ///
    /// Carries the available quantity so the UI can say
    /// "Only 3 left in stock" rather than a bare failure.
    #[error("Insufficient stock for {product}: available {available}, requested {requested}")]
    InsufficientStock {
        product: String,
        available: i64,
        requested: i64,
    },

    /// Malformed input, e.g. an empty id on update.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Checkout attempted with no cart lines.
    #[error("Cart is empty")]
    EmptyCart,

    /// No resolvable user identity from the session context.
    #[error("No authenticated user")]
    Unauthenticated,

    /// Input validation failure (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Network/store failure. Retryable.
    #[error("Store operation failed: {0}")]
    Transient(String),
}

impl CoreError {
    /// Creates a NotFound error for a given entity type and id.
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        CoreError::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Creates an InsufficientStock error naming the offending product.
    pub fn insufficient_stock(
        product: impl Into<String>,
        available: i64,
        requested: i64,
    ) -> Self {
        CoreError::InsufficientStock {
            product: product.into(),
            available,
            requested,
        }
    }

    /// Whether the failure is retryable (network/store trouble) rather than
    /// a business-rule rejection.
    pub fn is_transient(&self) -> bool {
        matches!(self, CoreError::Transient(_))
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Used for early validation before business logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must be zero or greater.
    #[error("{field} must not be negative")]
    MustBeNonNegative { field: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
