//! Staff members. A staff record points at a person; creating one sends the
//! person's data nested under `person`.

use crate::client::ApiClient;
use crate::config::*;
use crate::entities::{decode_with, or_dash};
use crate::error::ApiError;
use crate::mapping::stringify_ids;
use crate::response::unwrap_data;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::LazyLock;

pub const BASE_PATH: &str = "/api/staff";

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern"));

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Staff {
    pub id: String,
    #[serde(default)]
    pub person_id: Option<String>,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub specialization: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub is_teacher: bool,
    #[serde(default)]
    pub staff_notes: Option<String>,
}

impl Staff {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name).trim().to_string()
    }
}

/// Flattens `{ person: { first_name, ... } }` onto the staff record.
pub fn map_response(raw: Value) -> Result<Staff, ApiError> {
    decode_with(raw, |obj| {
        if let Some(Value::Object(person)) = obj.remove("person") {
            for (key, value) in person {
                match key.as_str() {
                    "id" => {
                        obj.entry("person_id").or_insert(value);
                    }
                    _ => {
                        obj.entry(key).or_insert(value);
                    }
                }
            }
        }
        stringify_ids(obj, &["id", "person_id"]);
    })
}

pub fn map_request(data: Payload) -> Value {
    let mut obj = data;
    obj.remove("id");
    obj.remove("person_id");
    Value::Object(obj)
}

fn str_field(data: &Payload, key: &str) -> Value {
    data.get(key).cloned().unwrap_or(Value::Null)
}

/// Body for `POST /api/staff`: person data nested, staff data at top level.
pub fn create_body(data: &Payload) -> Value {
    json!({
        "person": {
            "first_name": str_field(data, "first_name"),
            "last_name": str_field(data, "last_name"),
            "email": str_field(data, "email"),
        },
        "is_teacher": data.get("is_teacher").and_then(Value::as_bool).unwrap_or(false),
        "specialization": str_field(data, "specialization"),
        "staff_notes": str_field(data, "staff_notes"),
    })
}

async fn create_staff(client: ApiClient, data: Payload, _token: Option<String>) -> Result<Staff, ApiError> {
    let body = create_body(&data);
    tracing::debug!(entity = "Staff", "creating staff member with nested person");
    let response = client.post(BASE_PATH, &body).await?;
    map_response(unwrap_data(response.unwrap_or(Value::Null)))
}

pub fn validate_email(v: &Value) -> Option<String> {
    let s = v.as_str().unwrap_or_default().trim();
    if s.is_empty() {
        return None;
    }
    if EMAIL.is_match(s) {
        None
    } else {
        Some("Enter a valid email address".into())
    }
}

fn staff_badges(s: &Staff) -> Vec<Badge> {
    let mut out = Vec::new();
    if s.is_teacher {
        out.push(Badge::new("Teacher", "blue"));
    }
    if let Some(role) = s.role.as_deref().filter(|r| !r.is_empty()) {
        out.push(Badge::new(role, "gray"));
    }
    out
}

pub fn config() -> EntityConfig<Staff> {
    let name = EntityName::new("Staff member", "Staff");

    let mut form = FormConfig::new(vec![
        FormSection::new(
            "Person",
            vec![
                FormField::new("first_name", "First name", FieldType::Text).required(),
                FormField::new("last_name", "Last name", FieldType::Text).required(),
                FormField::new("email", "Email", FieldType::Email).validation(validate_email),
            ],
        )
        .columns(2),
        FormSection::new(
            "Staff",
            vec![
                FormField::new("is_teacher", "Teacher", FieldType::Checkbox),
                FormField::new("specialization", "Specialization", FieldType::Text),
                FormField::new("staff_notes", "Notes", FieldType::Textarea),
            ],
        ),
    ]);
    let mut defaults = Payload::new();
    defaults.insert("is_teacher".into(), Value::Bool(false));
    form.default_values = Some(defaults);

    let mut header = DetailHeader::new(display(Staff::full_name));
    header.subtitle = Some(display(|s: &Staff| or_dash(&s.specialization)));
    header.badges = Some(badges(staff_badges));
    let detail = DetailConfig {
        header,
        sections: vec![
            DetailSection::new(
                "Person",
                vec![
                    DetailItem::new("Name", Staff::full_name),
                    DetailItem::new("Email", |s: &Staff| or_dash(&s.email)),
                ],
            ),
            DetailSection::new(
                "Staff",
                vec![
                    DetailItem::new("Specialization", |s: &Staff| or_dash(&s.specialization)),
                    DetailItem::new("Notes", |s: &Staff| or_dash(&s.staff_notes)),
                ],
            ),
        ],
    };

    let mut item = ListItem::new(display(Staff::full_name));
    item.subtitle = Some(display(|s: &Staff| or_dash(&s.specialization)));
    item.description = Some(display(|s: &Staff| or_dash(&s.email)));
    item.badges = Some(badges(staff_badges));
    let mut list = ListConfig::new("Staff", item);
    list.search_placeholder = "Search staff...".into();
    list.search_strategy = SearchStrategy::Frontend;
    list.filters = vec![FilterDescriptor::new(
        "is_teacher",
        "Type",
        FilterKind::Buttons,
        vec![SelectOption::new("true", "Teachers"), SelectOption::new("false", "Other staff")],
    )];

    EntityConfig {
        labels: Labels::for_entity(&name),
        name,
        theme: Theme::new("#2563EB").icon("identification"),
        api: ApiConfig::new(BASE_PATH),
        form,
        detail,
        list,
        service: ServiceOverrides::default()
            .map_response(map_response)
            .map_request(map_request)
            .create(create_staff),
        hooks: Hooks::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn person_is_flattened() {
        let s = map_response(json!({
            "id": 11,
            "is_teacher": true,
            "specialization": "Math",
            "person": {"id": 40, "first_name": "Anna", "last_name": "Berg", "email": "anna@ogs.de"}
        }))
        .unwrap();
        assert_eq!(s.id, "11");
        assert_eq!(s.person_id.as_deref(), Some("40"));
        assert_eq!(s.full_name(), "Anna Berg");
        assert_eq!(staff_badges(&s)[0].label, "Teacher");
    }

    #[test]
    fn create_body_nests_person() {
        let data = json!({"first_name": "Anna", "last_name": "Berg", "email": "anna@ogs.de", "is_teacher": true});
        let body = create_body(data.as_object().unwrap());
        assert_eq!(body["person"]["first_name"], "Anna");
        assert_eq!(body["person"]["email"], "anna@ogs.de");
        assert_eq!(body["is_teacher"], true);
        assert_eq!(body["staff_notes"], Value::Null);
        assert!(body.get("first_name").is_none());
    }

    #[test]
    fn email_validation() {
        assert_eq!(validate_email(&json!("")), None);
        assert_eq!(validate_email(&json!("a@b.de")), None);
        assert!(validate_email(&json!("not-an-email")).is_some());
        assert!(validate_email(&json!("two@@ogs.de")).is_some());
        assert!(validate_email(&json!("a b@ogs.de")).is_some());
    }

    #[test]
    fn create_is_overridden() {
        assert!(config().service.create.is_some());
    }
}
