//! # Cart Totals
//!
//! Pure arithmetic for cart pricing. The invariants:
//!
//! - `subtotal == Σ(line.unit_price × line.quantity)`
//! - `discount == subtotal × pct / 100` for `pct ∈ [0, 100]`, else 0
//! - `total == subtotal − discount`
//!
//! Kept here (not in the engine) so the math is testable without any store.

use serde::{Deserialize, Serialize};

use crate::types::CartLine;

/// Cart totals summary, recomputed after every cart or discount mutation.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    pub subtotal: f64,
    pub discount: f64,
    pub discount_percentage: f64,
    pub total: f64,
}

/// Sum of line subtotals.
pub fn cart_subtotal(items: &[CartLine]) -> f64 {
    items.iter().map(CartLine::subtotal).sum()
}

/// Computes subtotal/discount/total for a cart at a given discount
/// percentage. Percentages outside (0, 100] apply no discount.
pub fn compute_totals(items: &[CartLine], discount_percentage: f64) -> CartTotals {
    let subtotal = cart_subtotal(items);

    let discount = if discount_percentage > 0.0 && discount_percentage <= 100.0 {
        subtotal * (discount_percentage / 100.0)
    } else {
        0.0
    };

    CartTotals {
        subtotal,
        discount,
        discount_percentage,
        total: subtotal - discount,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn line(id: &str, quantity: i64, unit_price: f64) -> CartLine {
        CartLine {
            product_id: id.to_string(),
            product_name: format!("Product {id}"),
            product_image: String::new(),
            quantity,
            unit_price,
            available_stock: 100,
        }
    }

    #[test]
    fn test_subtotal_sums_lines() {
        let items = vec![line("p1", 2, 100.0), line("p2", 1, 50.0)];
        assert_eq!(cart_subtotal(&items), 250.0);
    }

    #[test]
    fn test_ten_percent_off_two_fifty() {
        // {p1: qty 2 @ $100, p2: qty 1 @ $50} with a 10% code
        let items = vec![line("p1", 2, 100.0), line("p2", 1, 50.0)];
        let totals = compute_totals(&items, 10.0);

        assert_eq!(totals.subtotal, 250.0);
        assert_eq!(totals.discount, 25.0);
        assert_eq!(totals.total, 225.0);
    }

    #[test]
    fn test_zero_percent_is_no_discount() {
        let items = vec![line("p1", 3, 10.0)];
        let totals = compute_totals(&items, 0.0);

        assert_eq!(totals.subtotal, 30.0);
        assert_eq!(totals.discount, 0.0);
        assert_eq!(totals.total, 30.0);
    }

    #[test]
    fn test_hundred_percent_makes_total_zero() {
        let items = vec![line("p1", 1, 42.0)];
        let totals = compute_totals(&items, 100.0);

        assert_eq!(totals.discount, 42.0);
        assert_eq!(totals.total, 0.0);
    }

    #[test]
    fn test_total_equals_subtotal_minus_discount() {
        let items = vec![line("p1", 4, 19.99), line("p2", 2, 7.5)];
        for pct in [0.0, 10.0, 33.0, 50.0, 100.0] {
            let totals = compute_totals(&items, pct);
            assert_eq!(totals.total, totals.subtotal - totals.discount);
        }
    }

    #[test]
    fn test_empty_cart_totals_are_zero() {
        let totals = compute_totals(&[], 20.0);
        assert_eq!(totals.subtotal, 0.0);
        assert_eq!(totals.discount, 0.0);
        assert_eq!(totals.total, 0.0);
    }
}
