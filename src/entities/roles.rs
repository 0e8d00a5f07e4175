//! Roles and their permission sets.

use crate::client::ApiClient;
use crate::config::*;
use crate::entities::decode_with;
use crate::entities::permissions::{self, Permission};
use crate::error::ApiError;
use crate::mapping::stringify_ids;
use crate::response::normalize_list;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const BASE_PATH: &str = "/api/auth/roles";
/// Custom method: `getPermissions(role_id)` -> `[Permission]`.
pub const GET_PERMISSIONS: &str = "getPermissions";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Role {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub permissions: Vec<Permission>,
}

impl Role {
    pub fn is_system_role(&self) -> bool {
        matches!(self.name.to_lowercase().as_str(), "admin" | "teacher" | "guardian")
    }
}

pub fn map_response(raw: Value) -> Result<Role, ApiError> {
    decode_with(raw, |obj| {
        stringify_ids(obj, &["id"]);
        if let Some(Value::Array(perms)) = obj.get_mut("permissions") {
            for p in perms.iter_mut() {
                if let Value::Object(po) = p {
                    stringify_ids(po, &["id"]);
                }
            }
        }
    })
}

pub fn map_request(data: Payload) -> Value {
    let mut obj = data;
    obj.remove("id");
    obj.remove("permissions");
    Value::Object(obj)
}

async fn fetch_role_permissions(client: ApiClient, args: Value) -> Result<Value, ApiError> {
    let id = match &args {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    let response = client.get(&format!("{}/{}/permissions", BASE_PATH, id), &[]).await?;
    let page = normalize_list(response, "Permissions");
    let perms = page
        .items
        .into_iter()
        .map(permissions::map_response)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(serde_json::to_value(perms)?)
}

pub fn config() -> EntityConfig<Role> {
    let name = EntityName::new("Role", "Roles");

    let form = FormConfig::new(vec![FormSection::new(
        "Role",
        vec![
            FormField::new("name", "Name", FieldType::Text).required(),
            FormField::new("description", "Description", FieldType::Textarea),
        ],
    )]);

    let mut header = DetailHeader::new(display(|r: &Role| r.name.clone()));
    header.subtitle = Some(display(|r: &Role| r.description.clone()));
    header.badges = Some(badges(|r: &Role| {
        let mut out = vec![Badge::new(format!("{} permissions", r.permissions.len()), "purple")];
        if r.is_system_role() {
            out.push(Badge::new("System", "gray"));
        }
        out
    }));
    let detail = DetailConfig {
        header,
        sections: vec![DetailSection::new(
            "Permissions",
            vec![DetailItem::new("Assigned", |r: &Role| {
                if r.permissions.is_empty() {
                    "-".to_string()
                } else {
                    r.permissions.iter().map(Permission::label).collect::<Vec<_>>().join(", ")
                }
            })],
        )],
    };

    let mut item = ListItem::new(display(|r: &Role| r.name.clone()));
    item.description = Some(display(|r: &Role| r.description.clone()));
    let mut list = ListConfig::new("Roles", item);
    list.search_strategy = SearchStrategy::Frontend;

    EntityConfig {
        labels: Labels::for_entity(&name),
        name,
        theme: Theme::new("#7C3AED").icon("shield"),
        api: ApiConfig::new(BASE_PATH),
        form,
        detail,
        list,
        service: ServiceOverrides::default()
            .map_response(map_response)
            .map_request(map_request)
            .custom_method(GET_PERMISSIONS, fetch_role_permissions),
        hooks: Hooks::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn nested_permission_ids_are_strings() {
        let r = map_response(json!({
            "id": 1,
            "name": "Admin",
            "permissions": [{"id": 4, "name": "users:manage", "resource": "users", "action": "manage"}]
        }))
        .unwrap();
        assert_eq!(r.permissions[0].id, "4");
        assert!(r.is_system_role());
        let d = config().detail.resolve(&r);
        assert_eq!(d.sections[0].1[0].1, "users:manage");
    }

    #[test]
    fn request_drops_permissions() {
        let data = json!({"id": "1", "name": "x", "permissions": []});
        assert_eq!(map_request(data.as_object().cloned().unwrap()), json!({"name": "x"}));
    }
}
