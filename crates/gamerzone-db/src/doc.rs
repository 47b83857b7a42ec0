//! # Schema-on-read Field Access
//!
//! Defensive accessors for JSON document bodies.
//!
//! The store has no schema: a price written as `599990` by one client may be
//! read back where another wrote `599990.0`, and third-party tooling can
//! leave fields absent entirely. Every accessor here therefore coerces
//! integer/float representations to the canonical type and falls back to a
//! default instead of failing the whole document.

use serde_json::Value;

/// String field; absent or non-string ⇒ empty string.
pub fn str_field(doc: &Value, key: &str) -> String {
    doc.get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// Optional string field; absent, null, or non-string ⇒ None.
pub fn opt_str_field(doc: &Value, key: &str) -> Option<String> {
    doc.get(key).and_then(Value::as_str).map(str::to_string)
}

/// Numeric field as f64. Accepts integer or floating-point JSON numbers;
/// anything else ⇒ 0.0.
pub fn f64_field(doc: &Value, key: &str) -> f64 {
    doc.get(key).and_then(Value::as_f64).unwrap_or(0.0)
}

/// Numeric field as i64. Accepts integer JSON directly and truncates
/// floating-point representations; anything else ⇒ the given default.
pub fn i64_field_or(doc: &Value, key: &str, default: i64) -> i64 {
    match doc.get(key) {
        Some(v) => v
            .as_i64()
            .or_else(|| v.as_f64().map(|f| f as i64))
            .unwrap_or(default),
        None => default,
    }
}

/// Numeric field as i64, defaulting to zero.
pub fn i64_field(doc: &Value, key: &str) -> i64 {
    i64_field_or(doc, key, 0)
}

/// Boolean field with a default for absent/non-boolean values.
pub fn bool_field_or(doc: &Value, key: &str, default: bool) -> bool {
    doc.get(key).and_then(Value::as_bool).unwrap_or(default)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_f64_accepts_int_and_float() {
        let doc = json!({ "a": 599990, "b": 599990.0, "c": "oops" });
        assert_eq!(f64_field(&doc, "a"), 599990.0);
        assert_eq!(f64_field(&doc, "b"), 599990.0);
        assert_eq!(f64_field(&doc, "c"), 0.0);
        assert_eq!(f64_field(&doc, "missing"), 0.0);
    }

    #[test]
    fn test_i64_accepts_int_and_float() {
        let doc = json!({ "stock": 10.0, "reviews": 1250, "bad": [1] });
        assert_eq!(i64_field(&doc, "stock"), 10);
        assert_eq!(i64_field(&doc, "reviews"), 1250);
        assert_eq!(i64_field(&doc, "bad"), 0);
        assert_eq!(i64_field(&doc, "missing"), 0);
    }

    #[test]
    fn test_i64_custom_default() {
        let doc = json!({});
        assert_eq!(i64_field_or(&doc, "usageLimit", -1), -1);
    }

    #[test]
    fn test_str_fields() {
        let doc = json!({ "name": "PS5", "code": null });
        assert_eq!(str_field(&doc, "name"), "PS5");
        assert_eq!(str_field(&doc, "code"), "");
        assert_eq!(opt_str_field(&doc, "name").as_deref(), Some("PS5"));
        assert_eq!(opt_str_field(&doc, "code"), None);
        assert_eq!(opt_str_field(&doc, "missing"), None);
    }

    #[test]
    fn test_bool_default() {
        let doc = json!({ "isActive": false });
        assert!(!bool_field_or(&doc, "isActive", true));
        assert!(bool_field_or(&doc, "missing", true));
    }
}
