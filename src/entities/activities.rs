//! Activities (AGs): category, supervisor and participant limit.
//!
//! The backend calls the limit `max_participants`; the entity and forms use
//! `max_participant`.

use crate::config::*;
use crate::entities::{decode_with, or_dash};
use crate::error::ApiError;
use crate::lookup::KeywordTable;
use crate::mapping::{numeric_ids, rename_keys, stringify_ids};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const MAX_PARTICIPANTS: u32 = 500;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub id: String,
    pub name: String,
    pub max_participant: u32,
    #[serde(default)]
    pub is_open: bool,
    #[serde(default)]
    pub category_id: Option<String>,
    #[serde(default)]
    pub category_name: Option<String>,
    #[serde(default)]
    pub supervisor_id: Option<String>,
    #[serde(default)]
    pub supervisor_name: Option<String>,
    #[serde(default)]
    pub participant_count: u32,
}

impl Activity {
    pub fn free_places(&self) -> u32 {
        self.max_participant.saturating_sub(self.participant_count)
    }
}

pub fn category_emojis() -> KeywordTable {
    KeywordTable::new(
        &[
            ("sport", "⚽"),
            ("fußball", "⚽"),
            ("basketball", "🏀"),
            ("schwimmen", "🏊"),
            ("tanz", "💃"),
            ("kunst", "🎨"),
            ("basteln", "✂️"),
            ("musik", "🎵"),
            ("chor", "🎤"),
            ("theater", "🎭"),
            ("natur", "🌿"),
            ("garten", "🌻"),
            ("kochen", "🍳"),
            ("backen", "🧁"),
            ("computer", "💻"),
            ("programmieren", "👩‍💻"),
            ("lesen", "📚"),
            ("hausaufgaben", "📝"),
            ("spiel", "🎲"),
            ("brettspiel", "♟️"),
        ],
        "🎯",
    )
}

pub fn map_response(raw: Value) -> Result<Activity, ApiError> {
    decode_with(raw, |obj| {
        rename_keys(obj, &[("max_participants", "max_participant")]);
        stringify_ids(obj, &["id", "category_id", "supervisor_id"]);
    })
}

pub fn map_request(data: Payload) -> Value {
    let mut obj = data;
    for key in ["id", "category_name", "supervisor_name", "participant_count"] {
        obj.remove(key);
    }
    rename_keys(&mut obj, &[("max_participant", "max_participants")]);
    numeric_ids(&mut obj, &["category_id", "supervisor_id"]);
    Value::Object(obj)
}

pub fn validate_max_participant(v: &Value) -> Option<String> {
    let n = match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match n {
        Some(n) if n >= 1.0 && n <= MAX_PARTICIPANTS as f64 => None,
        _ => Some(format!("Participants must be between 1 and {}", MAX_PARTICIPANTS)),
    }
}

fn validate_form(values: &Payload) -> Option<FieldErrors> {
    let mut errors = FieldErrors::new();
    let name_len = values.get("name").and_then(Value::as_str).map(|s| s.trim().chars().count()).unwrap_or(0);
    if name_len > 100 {
        errors.insert("name".into(), "Name must be at most 100 characters".into());
    }
    if errors.is_empty() {
        None
    } else {
        Some(errors)
    }
}

fn activity_badges(a: &Activity) -> Vec<Badge> {
    let open = if a.is_open {
        Badge::new("Open", "green")
    } else {
        Badge::new("Closed", "gray")
    };
    vec![open, Badge::new(format!("{}/{}", a.participant_count, a.max_participant), "blue")]
}

fn category_emoji(a: &Activity) -> String {
    category_emojis()
        .lookup(a.category_name.as_deref().unwrap_or(&a.name))
        .to_string()
}

pub fn config() -> EntityConfig<Activity> {
    let name = EntityName::new("Activity", "Activities");

    let mut form = FormConfig::new(vec![
        FormSection::new(
            "Activity",
            vec![
                FormField::new("name", "Name", FieldType::Text).required(),
                FormField::new("max_participant", "Max. participants", FieldType::number(Some(1.0), Some(MAX_PARTICIPANTS as f64)))
                    .required()
                    .validation(validate_max_participant),
                FormField::new("is_open", "Open for registration", FieldType::Checkbox),
            ],
        )
        .columns(2),
        FormSection::new(
            "Assignment",
            vec![
                FormField::new("category_id", "Category", FieldType::Custom { component: "category-select".into() }),
                FormField::new("supervisor_id", "Supervisor", FieldType::Custom { component: "staff-select".into() }),
            ],
        ),
    ]);
    let mut defaults = Payload::new();
    defaults.insert("max_participant".into(), Value::from(20));
    defaults.insert("is_open".into(), Value::Bool(true));
    form.default_values = Some(defaults);
    form.validate = Some(std::sync::Arc::new(validate_form));

    let mut header = DetailHeader::new(display(|a: &Activity| a.name.clone()));
    header.subtitle = Some(display(|a: &Activity| or_dash(&a.category_name)));
    header.avatar = Some(display(category_emoji));
    header.badges = Some(badges(activity_badges));
    let detail = DetailConfig {
        header,
        sections: vec![
            DetailSection::new(
                "Participants",
                vec![
                    DetailItem::new("Maximum", |a: &Activity| a.max_participant.to_string()),
                    DetailItem::new("Registered", |a: &Activity| a.participant_count.to_string()),
                    DetailItem::new("Free places", |a: &Activity| a.free_places().to_string()),
                ],
            ),
            DetailSection::new(
                "Assignment",
                vec![
                    DetailItem::new("Category", |a: &Activity| or_dash(&a.category_name)),
                    DetailItem::new("Supervisor", |a: &Activity| or_dash(&a.supervisor_name)),
                ],
            ),
        ],
    };

    let mut item = ListItem::new(display(|a: &Activity| a.name.clone()));
    item.subtitle = Some(display(|a: &Activity| or_dash(&a.supervisor_name)));
    item.avatar = Some(display(category_emoji));
    item.badges = Some(badges(activity_badges));
    let mut list = ListConfig::new("Activities", item);
    list.description = "Afternoon activities and their participants".into();
    list.search_placeholder = "Search activities...".into();
    list.search_strategy = SearchStrategy::Frontend;
    list.filters = vec![FilterDescriptor::new(
        "is_open",
        "Status",
        FilterKind::Buttons,
        vec![SelectOption::new("true", "Open"), SelectOption::new("false", "Closed")],
    )];

    EntityConfig {
        labels: Labels::for_entity(&name),
        name,
        theme: Theme::new("#F59E0B").icon("puzzle"),
        api: ApiConfig::new("/api/activities"),
        form,
        detail,
        list,
        service: ServiceOverrides::default()
            .map_response(map_response)
            .map_request(map_request),
        hooks: Hooks::default().before_create(|mut data: Payload| async move {
            if let Some(Value::String(name)) = data.get_mut("name") {
                *name = name.trim().to_string();
            }
            Ok(data)
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn participant_limit_is_renamed_both_ways() {
        let a = map_response(json!({
            "id": 2, "name": "Fußball", "max_participants": 18, "category_id": 5, "participant_count": 20
        }))
        .unwrap();
        assert_eq!(a.max_participant, 18);
        assert_eq!(a.category_id.as_deref(), Some("5"));
        assert_eq!(a.free_places(), 0);

        let body = map_request(json!({"name": "Chor", "max_participant": 12, "category_id": "3"}).as_object().cloned().unwrap());
        assert_eq!(body, json!({"name": "Chor", "max_participants": 12, "category_id": 3}));
    }

    #[test]
    fn participant_validation() {
        assert_eq!(validate_max_participant(&json!(12)), None);
        assert_eq!(validate_max_participant(&json!("40")), None);
        assert!(validate_max_participant(&json!(0)).is_some());
        assert!(validate_max_participant(&json!(501)).is_some());
        assert!(validate_max_participant(&json!(true)).is_some());
    }

    #[test]
    fn form_check_combines_rules() {
        let form = config().form;
        let long = "x".repeat(101);
        let errors = form
            .check(json!({"name": long, "max_participant": 0}).as_object().unwrap())
            .unwrap_err();
        assert!(errors.contains_key("name"));
        assert!(errors.contains_key("max_participant"));
        assert!(form.check(json!({"name": "Chor", "max_participant": 10}).as_object().unwrap()).is_ok());
    }

    #[test]
    fn emoji_uses_category_then_name() {
        let mut a = map_response(json!({"id": 1, "name": "Brettspiel-Runde", "max_participants": 8})).unwrap();
        assert_eq!(category_emoji(&a), "♟️");
        a.category_name = Some("Musik & Chor".into());
        assert_eq!(category_emoji(&a), "🎵");
    }
}
