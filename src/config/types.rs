//! Entity configuration: the declarative description of one managed resource.

use crate::config::form::FormConfig;
use crate::config::service::{Hooks, ServiceOverrides};
use crate::config::view::{DetailConfig, ListConfig};
use serde::{Deserialize, Serialize};

/// Placeholder substituted literally in item endpoint templates.
pub const ID_PLACEHOLDER: &str = "{id}";

/// Partial entity as sent to / received from forms.
pub type Payload = serde_json::Map<String, serde_json::Value>;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityName {
    pub singular: String,
    pub plural: String,
}

impl EntityName {
    pub fn new(singular: impl Into<String>, plural: impl Into<String>) -> Self {
        EntityName {
            singular: singular.into(),
            plural: plural.into(),
        }
    }
}

/// Visual tokens. Not used by the service layer.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    pub primary: String,
    #[serde(default)]
    pub gradient: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
}

impl Theme {
    pub fn new(primary: impl Into<String>) -> Self {
        Theme {
            primary: primary.into(),
            gradient: None,
            icon: None,
        }
    }

    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn gradient(mut self, gradient: impl Into<String>) -> Self {
        self.gradient = Some(gradient.into());
        self
    }
}

/// Per-operation endpoint overrides. Item templates may contain `{id}`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoints {
    #[serde(default)]
    pub list: Option<String>,
    #[serde(default)]
    pub get: Option<String>,
    #[serde(default)]
    pub create: Option<String>,
    #[serde(default)]
    pub update: Option<String>,
    #[serde(default)]
    pub delete: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_path: String,
    #[serde(default)]
    pub endpoints: Endpoints,
    /// Static query parameters sent with every list call, before caller filters.
    #[serde(default)]
    pub list_params: Vec<(String, String)>,
}

impl ApiConfig {
    pub fn new(base_path: impl Into<String>) -> Self {
        ApiConfig {
            base_path: base_path.into(),
            endpoints: Endpoints::default(),
            list_params: Vec::new(),
        }
    }

    pub fn list_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.list_params.push((key.into(), value.into()));
        self
    }

    pub fn endpoints(mut self, endpoints: Endpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    pub fn list_path(&self) -> String {
        self.endpoints.list.clone().unwrap_or_else(|| self.base_path.clone())
    }

    pub fn create_path(&self) -> String {
        self.endpoints.create.clone().unwrap_or_else(|| self.base_path.clone())
    }

    pub fn get_path(&self, id: &str) -> String {
        self.item_path(self.endpoints.get.as_deref(), id)
    }

    pub fn update_path(&self, id: &str) -> String {
        self.item_path(self.endpoints.update.as_deref(), id)
    }

    pub fn delete_path(&self, id: &str) -> String {
        self.item_path(self.endpoints.delete.as_deref(), id)
    }

    fn item_path(&self, template: Option<&str>, id: &str) -> String {
        match template {
            Some(t) => t.replace(ID_PLACEHOLDER, id),
            None => format!("{}/{}", self.base_path.trim_end_matches('/'), id),
        }
    }
}

/// User-facing strings for buttons, modals and confirmations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Labels {
    pub create_button: String,
    pub edit_button: String,
    pub delete_button: String,
    pub create_modal_title: String,
    pub edit_modal_title: String,
    pub detail_modal_title: String,
    pub delete_confirmation: String,
}

impl Labels {
    pub fn for_entity(name: &EntityName) -> Self {
        Labels {
            create_button: format!("New {}", name.singular),
            edit_button: "Edit".into(),
            delete_button: "Delete".into(),
            create_modal_title: format!("Create {}", name.singular),
            edit_modal_title: format!("Edit {}", name.singular),
            detail_modal_title: format!("{} details", name.singular),
            delete_confirmation: format!(
                "Do you really want to delete this {}? This cannot be undone.",
                name.singular
            ),
        }
    }
}

/// Immutable description of one resource type. Build once, share behind an `Arc`.
pub struct EntityConfig<T> {
    pub name: EntityName,
    pub theme: Theme,
    pub api: ApiConfig,
    pub form: FormConfig,
    pub detail: DetailConfig<T>,
    pub list: ListConfig<T>,
    pub service: ServiceOverrides<T>,
    pub hooks: Hooks<T>,
    pub labels: Labels,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_paths_fall_back_to_base_path() {
        let api = ApiConfig::new("/api/items");
        assert_eq!(api.list_path(), "/api/items");
        assert_eq!(api.create_path(), "/api/items");
        assert_eq!(api.get_path("7"), "/api/items/7");
        assert_eq!(api.update_path("7"), "/api/items/7");
        assert_eq!(api.delete_path("7"), "/api/items/7");
    }

    #[test]
    fn overrides_substitute_id_literally() {
        let api = ApiConfig::new("/api/items").endpoints(Endpoints {
            get: Some("/api/items/{id}/full".into()),
            delete: Some("/api/archive?item={id}".into()),
            list: Some("/api/items/search".into()),
            ..Endpoints::default()
        });
        assert_eq!(api.get_path("a b"), "/api/items/a b/full");
        assert_eq!(api.delete_path("3"), "/api/archive?item=3");
        assert_eq!(api.list_path(), "/api/items/search");
        assert_eq!(api.update_path("3"), "/api/items/3");
    }

    #[test]
    fn labels_use_singular_name() {
        let labels = Labels::for_entity(&EntityName::new("Room", "Rooms"));
        assert_eq!(labels.create_modal_title, "Create Room");
        assert!(labels.delete_confirmation.contains("Room"));
    }
}
