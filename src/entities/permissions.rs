//! Permissions: `resource:action` pairs assigned to roles.

use crate::client::ApiClient;
use crate::config::*;
use crate::entities::decode_with;
use crate::error::ApiError;
use crate::mapping::stringify_ids;
use crate::response::unwrap_data;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const BASE_PATH: &str = "/api/auth/permissions";

pub const RESOURCES: &[&str] = &[
    "users", "roles", "permissions", "students", "groups", "rooms", "activities", "devices", "staff", "feedback",
];
pub const ACTIONS: &[&str] = &["read", "create", "update", "delete", "manage"];

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Permission {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub resource: String,
    pub action: String,
}

impl Permission {
    pub fn label(&self) -> String {
        format!("{}:{}", self.resource, self.action)
    }
}

pub fn map_response(raw: Value) -> Result<Permission, ApiError> {
    decode_with(raw, |obj| {
        stringify_ids(obj, &["id"]);
        if !obj.contains_key("name") {
            let resource = obj.get("resource").and_then(Value::as_str).unwrap_or_default();
            let action = obj.get("action").and_then(Value::as_str).unwrap_or_default();
            obj.insert("name".into(), Value::String(format!("{}:{}", resource, action)));
        }
    })
}

/// The single-permission endpoint wraps its payload as `{ status, data: { permission } }`.
async fn fetch_permission(client: ApiClient, args: Value) -> Result<Value, ApiError> {
    let id = match &args {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    let response = client.get(&format!("{}/{}", BASE_PATH, id), &[]).await?;
    let mut inner = unwrap_data(response.unwrap_or(Value::Null));
    if let Some(p) = inner.get_mut("permission").map(Value::take) {
        inner = p;
    }
    let permission = map_response(inner)?;
    Ok(serde_json::to_value(permission)?)
}

fn options(values: &[&str]) -> Vec<SelectOption> {
    values.iter().map(|v| SelectOption::new(*v, *v)).collect()
}

pub fn config() -> EntityConfig<Permission> {
    let name = EntityName::new("Permission", "Permissions");

    let mut form = FormConfig::new(vec![FormSection::new(
        "Permission",
        vec![
            FormField::new("name", "Name", FieldType::Text).required(),
            FormField::new("description", "Description", FieldType::Textarea),
            FormField::new("resource", "Resource", FieldType::Select)
                .required()
                .options(FieldOptions::Static(options(RESOURCES))),
            FormField::new("action", "Action", FieldType::Select)
                .required()
                .options(FieldOptions::Static(options(ACTIONS))),
        ],
    )]);
    form.transform_before_submit = Some(std::sync::Arc::new(|mut v: Payload| {
        let blank = v.get("name").and_then(Value::as_str).map(|s| s.trim().is_empty()).unwrap_or(true);
        if blank {
            let resource = v.get("resource").and_then(Value::as_str).unwrap_or_default().to_string();
            let action = v.get("action").and_then(Value::as_str).unwrap_or_default().to_string();
            v.insert("name".into(), Value::String(format!("{}:{}", resource, action)));
        }
        v
    }));

    let mut header = DetailHeader::new(display(|p: &Permission| p.name.clone()));
    header.subtitle = Some(display(Permission::label));
    let detail = DetailConfig {
        header,
        sections: vec![DetailSection::new(
            "Details",
            vec![
                DetailItem::new("Resource", |p: &Permission| p.resource.clone()),
                DetailItem::new("Action", |p: &Permission| p.action.clone()),
                DetailItem::new("Description", |p: &Permission| p.description.clone()),
            ],
        )],
    };

    let mut item = ListItem::new(display(|p: &Permission| p.name.clone()));
    item.subtitle = Some(display(Permission::label));
    item.description = Some(display(|p: &Permission| p.description.clone()));
    let mut list = ListConfig::new("Permissions", item);
    list.search_strategy = SearchStrategy::Frontend;
    list.filters = vec![FilterDescriptor::new("resource", "Resource", FilterKind::Dropdown, options(RESOURCES))];
    list.info = Some(InfoBanner {
        title: "System permissions".into(),
        message: "Permissions are assigned to roles; changes apply to every user holding the role.".into(),
    });

    EntityConfig {
        labels: Labels::for_entity(&name),
        name,
        theme: Theme::new("#DC2626").icon("key"),
        api: ApiConfig::new(BASE_PATH),
        form,
        detail,
        list,
        service: ServiceOverrides::default()
            .map_response(map_response)
            .custom_method(GET_ONE_METHOD, fetch_permission),
        hooks: Hooks::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn name_defaults_to_label() {
        let p = map_response(json!({"id": 9, "resource": "rooms", "action": "read"})).unwrap();
        assert_eq!(p.id, "9");
        assert_eq!(p.name, "rooms:read");
        assert_eq!(p.label(), "rooms:read");
    }

    #[test]
    fn submit_fills_blank_name() {
        let form = config().form;
        let values = json!({"name": " ", "resource": "staff", "action": "manage"});
        let out = form.prepare_submit(values.as_object().cloned().unwrap());
        assert_eq!(out["name"], "staff:manage");
    }

    #[test]
    fn get_one_is_custom() {
        let c = config();
        assert!(c.service.custom_methods.contains_key(GET_ONE_METHOD));
    }
}
