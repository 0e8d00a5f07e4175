//! Config validation: endpoint templates and form consistency.

use crate::config::types::{EntityConfig, ID_PLACEHOLDER};
use crate::error::ConfigError;
use std::collections::HashSet;

pub fn validate<T>(config: &EntityConfig<T>) -> Result<(), ConfigError> {
    let entity = config.name.plural.as_str();
    if config.name.singular.trim().is_empty() || entity.trim().is_empty() {
        return Err(ConfigError::Validation("entity name must not be empty".into()));
    }

    let base = config.api.base_path.as_str();
    if !base.starts_with('/') {
        return Err(ConfigError::InvalidEndpoint {
            entity: entity.to_string(),
            operation: "base_path",
            reason: format!("'{}' must start with '/'", base),
        });
    }
    if base.contains(ID_PLACEHOLDER) {
        return Err(ConfigError::InvalidEndpoint {
            entity: entity.to_string(),
            operation: "base_path",
            reason: format!("'{}' must not contain {}", base, ID_PLACEHOLDER),
        });
    }

    let endpoints = &config.api.endpoints;
    for (operation, template) in [
        ("get", &endpoints.get),
        ("update", &endpoints.update),
        ("delete", &endpoints.delete),
    ] {
        if let Some(t) = template {
            if !t.contains(ID_PLACEHOLDER) {
                return Err(ConfigError::InvalidEndpoint {
                    entity: entity.to_string(),
                    operation,
                    reason: format!("'{}' is missing {}", t, ID_PLACEHOLDER),
                });
            }
        }
    }
    for (operation, template) in [("list", &endpoints.list), ("create", &endpoints.create)] {
        if let Some(t) = template {
            if t.trim().is_empty() {
                return Err(ConfigError::InvalidEndpoint {
                    entity: entity.to_string(),
                    operation,
                    reason: "empty endpoint".into(),
                });
            }
        }
    }

    let mut names = HashSet::new();
    for field in config.form.fields() {
        if !names.insert(field.name.as_str()) {
            return Err(ConfigError::DuplicateField(format!("{}.{}", entity, field.name)));
        }
        if field.field_type.takes_options() && field.options.is_none() {
            return Err(ConfigError::Validation(format!(
                "{}.{}: select fields need options",
                entity, field.name
            )));
        }
    }

    Ok(())
}
