//! Students: class, group, current location and guardian contact.

use crate::config::*;
use crate::entities::{decode_with, or_dash};
use crate::mapping::{numeric_ids, rename_keys, stringify_ids};
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::LazyLock;

/// Backend field -> entity field.
const RESPONSE_RENAMES: &[(&str, &str)] = &[
    ("last_name", "second_name"),
    ("name_lg", "guardian_name"),
    ("contact_lg", "guardian_contact"),
];

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern"));
static PHONE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\+?[0-9 /()-]{6,}$").expect("phone pattern"));

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Location {
    #[default]
    Home,
    House,
    Wc,
    SchoolYard,
    Bus,
    #[serde(other)]
    Unknown,
}

impl Location {
    pub fn label(&self) -> &'static str {
        match self {
            Location::Home => "At home",
            Location::House => "In house",
            Location::Wc => "Restroom",
            Location::SchoolYard => "School yard",
            Location::Bus => "Bus",
            Location::Unknown => "Unknown",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            Location::Home => "gray",
            Location::House => "green",
            Location::Wc => "blue",
            Location::SchoolYard => "yellow",
            Location::Bus => "orange",
            Location::Unknown => "red",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Student {
    pub id: String,
    pub first_name: String,
    pub second_name: String,
    pub school_class: String,
    #[serde(default)]
    pub group_id: Option<String>,
    #[serde(default)]
    pub group_name: Option<String>,
    #[serde(default)]
    pub location: Location,
    #[serde(default)]
    pub guardian_name: Option<String>,
    #[serde(default)]
    pub guardian_contact: Option<String>,
    #[serde(default)]
    pub bus: bool,
}

impl Student {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.second_name).trim().to_string()
    }
}

pub fn map_response(raw: Value) -> Result<Student, crate::error::ApiError> {
    decode_with(raw, |obj| {
        rename_keys(obj, RESPONSE_RENAMES);
        stringify_ids(obj, &["id", "group_id"]);
    })
}

pub fn map_request(data: Payload) -> Value {
    let mut obj = data;
    obj.remove("id");
    obj.remove("group_name");
    let reverse: Vec<(&str, &str)> = RESPONSE_RENAMES.iter().map(|(a, b)| (*b, *a)).collect();
    rename_keys(&mut obj, &reverse);
    numeric_ids(&mut obj, &["group_id"]);
    Value::Object(obj)
}

/// Guardian contact must look like an email address or a phone number.
pub fn validate_contact(v: &Value) -> Option<String> {
    let s = v.as_str()?.trim();
    if EMAIL.is_match(s) || PHONE.is_match(s) {
        None
    } else {
        Some("Enter an email address or phone number".into())
    }
}

fn location_options() -> Vec<SelectOption> {
    [Location::Home, Location::House, Location::Wc, Location::SchoolYard, Location::Bus]
        .iter()
        .map(|l| {
            let value = serde_json::to_value(l)
                .ok()
                .and_then(|v| v.as_str().map(String::from))
                .unwrap_or_default();
            SelectOption::new(value, l.label())
        })
        .collect()
}

fn location_badge(s: &Student) -> Vec<Badge> {
    let mut out = vec![Badge::new(s.location.label(), s.location.color())];
    if s.bus {
        out.push(Badge::new("Bus child", "orange"));
    }
    out
}

pub fn config() -> EntityConfig<Student> {
    let name = EntityName::new("Student", "Students");

    let form = FormConfig::new(vec![
        FormSection::new(
            "Personal data",
            vec![
                FormField::new("first_name", "First name", FieldType::Text).required(),
                FormField::new("second_name", "Last name", FieldType::Text).required(),
                FormField::new("school_class", "Class", FieldType::Text)
                    .required()
                    .placeholder("e.g. 3a"),
                FormField::new(
                    "group_id",
                    "Group",
                    FieldType::Custom {
                        component: "group-select".into(),
                    },
                ),
                FormField::new("bus", "Takes the bus", FieldType::Checkbox),
            ],
        )
        .columns(2),
        FormSection::new(
            "Guardian",
            vec![
                FormField::new("guardian_name", "Name", FieldType::Text),
                FormField::new("guardian_contact", "Contact", FieldType::Text)
                    .help_text("Email address or phone number")
                    .validation(validate_contact),
            ],
        ),
    ]);

    let mut header = DetailHeader::new(display(Student::full_name));
    header.subtitle = Some(display(|s: &Student| format!("Class {}", s.school_class)));
    header.badges = Some(badges(location_badge));

    let detail = DetailConfig {
        header,
        sections: vec![
            DetailSection::new(
                "Personal data",
                vec![
                    DetailItem::new("First name", |s: &Student| s.first_name.clone()),
                    DetailItem::new("Last name", |s: &Student| s.second_name.clone()),
                    DetailItem::new("Class", |s: &Student| s.school_class.clone()),
                    DetailItem::new("Group", |s: &Student| or_dash(&s.group_name)),
                    DetailItem::new("Location", |s: &Student| s.location.label().to_string()),
                ],
            ),
            DetailSection::new(
                "Guardian",
                vec![
                    DetailItem::new("Name", |s: &Student| or_dash(&s.guardian_name)),
                    DetailItem::new("Contact", |s: &Student| or_dash(&s.guardian_contact)),
                ],
            ),
        ],
    };

    let mut item = ListItem::new(display(Student::full_name));
    item.subtitle = Some(display(|s: &Student| {
        format!("Class {} · {}", s.school_class, or_dash(&s.group_name))
    }));
    item.badges = Some(badges(location_badge));
    let mut list = ListConfig::new("Students", item);
    list.description = "Manage students, their groups and guardians".into();
    list.search_placeholder = "Search by name...".into();
    list.min_search_length = 2;
    list.filters = vec![FilterDescriptor::new("location", "Location", FilterKind::Buttons, location_options())];

    EntityConfig {
        labels: Labels::for_entity(&name),
        name,
        theme: Theme::new("#5080D8").icon("users"),
        api: ApiConfig::new("/api/students"),
        form,
        detail,
        list,
        service: ServiceOverrides::default()
            .map_response(map_response)
            .map_request(map_request),
        hooks: Hooks::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn maps_backend_fields() {
        let s = map_response(json!({
            "id": 12,
            "first_name": "Lena",
            "last_name": "Koch",
            "school_class": "2b",
            "group_id": 4,
            "group_name": "Eulen",
            "location": "school_yard",
            "name_lg": "Petra Koch",
            "contact_lg": "petra@example.org"
        }))
        .unwrap();
        assert_eq!(s.id, "12");
        assert_eq!(s.second_name, "Koch");
        assert_eq!(s.group_id.as_deref(), Some("4"));
        assert_eq!(s.location, Location::SchoolYard);
        assert_eq!(s.guardian_contact.as_deref(), Some("petra@example.org"));
        assert_eq!(s.full_name(), "Lena Koch");
    }

    #[test]
    fn unknown_location_does_not_fail() {
        let s = map_response(json!({
            "id": "1", "first_name": "A", "last_name": "B", "school_class": "1a", "location": "moon"
        }))
        .unwrap();
        assert_eq!(s.location, Location::Unknown);
    }

    #[test]
    fn request_uses_backend_names() {
        let data = json!({"id": "3", "first_name": "Lena", "second_name": "Koch", "group_id": "4", "guardian_name": "P"});
        let body = map_request(data.as_object().cloned().unwrap());
        assert_eq!(body, json!({"first_name": "Lena", "last_name": "Koch", "group_id": 4, "name_lg": "P"}));
    }

    #[test]
    fn contact_validation() {
        assert_eq!(validate_contact(&json!("a@b.de")), None);
        assert_eq!(validate_contact(&json!("+49 170 1234567")), None);
        assert!(validate_contact(&json!("call me")).is_some());
    }

    #[test]
    fn detail_shows_location_badge() {
        let s = map_response(json!({
            "id": 1, "first_name": "A", "last_name": "B", "school_class": "1a", "location": "bus", "bus": true
        }))
        .unwrap();
        let d = config().detail.resolve(&s);
        assert_eq!(d.subtitle.as_deref(), Some("Class 1a"));
        assert_eq!(d.badges.len(), 2);
        assert_eq!(d.badges[0].label, "Bus");
    }

    #[test]
    fn location_filter_uses_wire_values() {
        let opts = location_options();
        assert_eq!(opts[3].value, "school_yard");
        assert_eq!(opts.len(), 5);
    }
}
