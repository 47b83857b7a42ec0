//! # Business Rule Validation
//!
//! Input validation run before anything touches the document store, plus the
//! legacy fixed discount-code table.
//!
//! ## Validation Strategy
//! Validate early, return typed errors. Repositories call these before
//! writes; the engine calls [`validate_quantity`] before cart mutations.

use crate::error::ValidationError;
use crate::types::{DiscountCode, Product};

// =============================================================================
// Legacy Fixed Discount Codes
// =============================================================================

/// The original launch-promo codes, kept as an offline fallback.
///
/// The registry-backed path is authoritative: these are consulted only when
/// a code is absent from the registry or the registry is unreachable. They
/// never override a successfully validated registry code.
pub const FALLBACK_CODES: &[(&str, f64)] =
    &[("GAMER10", 10.0), ("GAMER20", 20.0), ("DUOC50", 50.0)];

/// Looks up a code in the legacy fixed table. Expects a normalized code.
pub fn fallback_percentage(code: &str) -> Option<f64> {
    FALLBACK_CODES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, pct)| *pct)
}

/// Normalizes user-entered codes for lookup: trimmed and uppercased.
pub fn normalize_code(code: &str) -> String {
    code.trim().to_uppercase()
}

// =============================================================================
// Field Validation
// =============================================================================

/// Validates a product before create/update.
pub fn validate_product(product: &Product) -> Result<(), ValidationError> {
    if product.name.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if product.price < 0.0 {
        return Err(ValidationError::MustBeNonNegative {
            field: "price".to_string(),
        });
    }

    if product.stock < 0 {
        return Err(ValidationError::MustBeNonNegative {
            field: "stock".to_string(),
        });
    }

    if !(0.0..=5.0).contains(&product.rating) {
        return Err(ValidationError::OutOfRange {
            field: "rating".to_string(),
            min: 0,
            max: 5,
        });
    }

    if product.review_count < 0 {
        return Err(ValidationError::MustBeNonNegative {
            field: "reviewCount".to_string(),
        });
    }

    Ok(())
}

/// Validates a cart mutation quantity.
pub fn validate_quantity(quantity: i64) -> Result<(), ValidationError> {
    if quantity < 1 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }
    Ok(())
}

/// Validates a discount code before create/update.
pub fn validate_discount_code(code: &DiscountCode) -> Result<(), ValidationError> {
    if code.code.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "code".to_string(),
        });
    }

    if !(0.0..=100.0).contains(&code.discount_percentage) {
        return Err(ValidationError::OutOfRange {
            field: "discountPercentage".to_string(),
            min: 0,
            max: 100,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
