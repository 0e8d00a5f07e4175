//! Per-entity configurations for the OGS administration API.
//!
//! Each module holds the entity type, its wire mappers and a `config()` builder.
//! Nothing here performs I/O except the async service overrides, which go through
//! the [`ApiClient`](crate::client::ApiClient) they are handed.

pub mod activities;
pub mod devices;
pub mod groups;
pub mod permissions;
pub mod roles;
pub mod rooms;
pub mod staff;
pub mod students;

use crate::error::ApiError;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// Run `edit` on a raw backend object, then decode it into the entity type.
pub(crate) fn decode_with<T, F>(raw: Value, edit: F) -> Result<T, ApiError>
where
    T: DeserializeOwned,
    F: FnOnce(&mut Map<String, Value>),
{
    let mut raw = raw;
    if let Value::Object(ref mut obj) = raw {
        edit(obj);
    }
    Ok(serde_json::from_value(raw)?)
}

/// Display text for an optional field; `-` when missing or blank.
pub(crate) fn or_dash(s: &Option<String>) -> String {
    match s.as_deref() {
        Some(v) if !v.trim().is_empty() => v.to_string(),
        _ => "-".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::validate;

    #[test]
    fn every_entity_config_is_valid() {
        validate(&activities::config()).unwrap();
        validate(&devices::config()).unwrap();
        validate(&groups::config()).unwrap();
        validate(&permissions::config()).unwrap();
        validate(&roles::config()).unwrap();
        validate(&rooms::config()).unwrap();
        validate(&staff::config()).unwrap();
        validate(&students::config()).unwrap();
    }

    #[test]
    fn or_dash_handles_blank() {
        assert_eq!(or_dash(&None), "-");
        assert_eq!(or_dash(&Some("  ".into())), "-");
        assert_eq!(or_dash(&Some("x".into())), "x");
    }
}
