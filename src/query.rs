//! List filters to query-string pairs.

use serde_json::Value;

/// Convert one filter value to its query-string form. `None` means "omit the key".
pub fn filter_value_to_param(v: &Value) -> Option<String> {
    match v {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Array(_) | Value::Object(_) => Some(v.to_string()),
    }
}

/// Flatten filters into ordered `(key, value)` pairs, dropping null values.
/// Encoding happens when the pairs are appended to the URL.
pub fn filters_to_pairs(filters: &[(String, Value)]) -> Vec<(String, String)> {
    filters
        .iter()
        .filter_map(|(k, v)| filter_value_to_param(v).map(|s| (k.clone(), s)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn nulls_are_dropped_and_order_kept() {
        let filters = vec![
            ("search".to_string(), json!("test")),
            ("room".to_string(), Value::Null),
            ("status".to_string(), json!("active")),
        ];
        assert_eq!(
            filters_to_pairs(&filters),
            vec![
                ("search".to_string(), "test".to_string()),
                ("status".to_string(), "active".to_string()),
            ]
        );
    }

    #[test]
    fn scalars_and_objects_are_stringified() {
        assert_eq!(filter_value_to_param(&json!(true)).as_deref(), Some("true"));
        assert_eq!(filter_value_to_param(&json!(42)).as_deref(), Some("42"));
        assert_eq!(filter_value_to_param(&json!(1.5)).as_deref(), Some("1.5"));
        assert_eq!(
            filter_value_to_param(&json!({"key": "value"})).as_deref(),
            Some(r#"{"key":"value"}"#)
        );
        assert_eq!(filter_value_to_param(&json!([1, 2])).as_deref(), Some("[1,2]"));
    }
}
