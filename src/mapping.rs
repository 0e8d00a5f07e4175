//! Field-level helpers for request/response mappers.

use serde_json::{Map, Value};

/// Rename keys of a JSON object in place. Missing keys are skipped; an existing
/// target key is overwritten.
pub fn rename_keys(obj: &mut Map<String, Value>, renames: &[(&str, &str)]) {
    for (from, to) in renames {
        if let Some(v) = obj.remove(*from) {
            obj.insert((*to).to_string(), v);
        }
    }
}

/// Backend ids arrive as numbers or strings; entities keep them as strings.
pub fn id_to_string(v: &Value) -> Option<String> {
    match v {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Numeric string ids go back to the backend as numbers; everything else is unchanged.
/// Empty strings become null (an unselected dropdown).
pub fn id_to_number(v: Value) -> Value {
    match v {
        Value::String(s) if s.is_empty() => Value::Null,
        Value::String(s) => match s.parse::<i64>() {
            Ok(n) => Value::Number(n.into()),
            Err(_) => Value::String(s),
        },
        other => other,
    }
}

/// Stringify the id-like keys of an object (see [`id_to_string`]).
pub fn stringify_ids(obj: &mut Map<String, Value>, keys: &[&str]) {
    for key in keys {
        if let Some(v) = obj.get_mut(*key) {
            if let Some(s) = id_to_string(v) {
                *v = Value::String(s);
            }
        }
    }
}

/// Convert the id-like keys of an object to numbers (see [`id_to_number`]).
pub fn numeric_ids(obj: &mut Map<String, Value>, keys: &[&str]) {
    for key in keys {
        if let Some(v) = obj.remove(*key) {
            obj.insert((*key).to_string(), id_to_number(v));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn renames_present_keys_only() {
        let mut obj = json!({"name": "x", "keep": 1}).as_object().cloned().unwrap();
        rename_keys(&mut obj, &[("name", "title"), ("missing", "other")]);
        assert_eq!(Value::Object(obj), json!({"title": "x", "keep": 1}));
    }

    #[test]
    fn id_conversions() {
        assert_eq!(id_to_string(&json!(12)).as_deref(), Some("12"));
        assert_eq!(id_to_string(&json!("ab")).as_deref(), Some("ab"));
        assert_eq!(id_to_string(&json!(null)), None);
        assert_eq!(id_to_number(json!("12")), json!(12));
        assert_eq!(id_to_number(json!("x1")), json!("x1"));
        assert_eq!(id_to_number(json!("")), Value::Null);
    }

    #[test]
    fn object_id_helpers() {
        let mut obj = json!({"id": 5, "group_id": "7", "name": "n"}).as_object().cloned().unwrap();
        stringify_ids(&mut obj, &["id"]);
        numeric_ids(&mut obj, &["group_id", "absent"]);
        assert_eq!(Value::Object(obj), json!({"id": "5", "group_id": 7, "name": "n"}));
    }
}
