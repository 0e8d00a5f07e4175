//! Groups: a room, a representative and the supervising staff.

use crate::client::ApiClient;
use crate::config::*;
use crate::entities::{decode_with, or_dash};
use crate::error::ApiError;
use crate::mapping::{id_to_string, numeric_ids, stringify_ids};
use crate::response::normalize_list;
use futures_util::FutureExt;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

const BASE_PATH: &str = "/api/groups";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub room_id: Option<String>,
    #[serde(default)]
    pub room_name: Option<String>,
    #[serde(default)]
    pub representative_id: Option<String>,
    #[serde(default)]
    pub representative_name: Option<String>,
    #[serde(default)]
    pub student_count: u32,
    #[serde(default)]
    pub supervisor_ids: Vec<String>,
}

pub fn map_response(raw: Value) -> Result<Group, ApiError> {
    decode_with(raw, |obj| {
        stringify_ids(obj, &["id", "room_id", "representative_id"]);
        if let Some(Value::Array(ids)) = obj.get_mut("supervisor_ids") {
            *ids = ids.iter().filter_map(id_to_string).map(Value::String).collect();
        }
    })
}

pub fn map_request(data: Payload) -> Value {
    let mut obj = data;
    for key in ["id", "room_name", "representative_name", "student_count"] {
        obj.remove(key);
    }
    numeric_ids(&mut obj, &["room_id", "representative_id"]);
    if let Some(Value::Array(ids)) = obj.remove("supervisor_ids") {
        let ids: Vec<Value> = ids.into_iter().map(crate::mapping::id_to_number).collect();
        obj.insert("supervisor_ids".into(), Value::Array(ids));
    }
    Value::Object(obj)
}

/// Group dropdown options fetched from the backend on demand.
pub fn select_options(client: ApiClient) -> FieldOptions {
    FieldOptions::Loader(Arc::new(move || {
        let client = client.clone();
        async move {
            let response = client.get(BASE_PATH, &[]).await?;
            let page = normalize_list(response, "Groups");
            let options: Vec<SelectOption> = page
                .items
                .iter()
                .filter_map(|g| {
                    let id = g.get("id").and_then(id_to_string)?;
                    let name = g.get("name").and_then(Value::as_str)?;
                    Some(SelectOption::new(id, name))
                })
                .collect();
            Ok::<_, ApiError>(options)
        }
        .boxed()
    }))
}

pub fn config() -> EntityConfig<Group> {
    let name = EntityName::new("Group", "Groups");

    let form = FormConfig::new(vec![FormSection::new(
        "Group",
        vec![
            FormField::new("name", "Name", FieldType::Text).required(),
            FormField::new("room_id", "Room", FieldType::Custom { component: "room-select".into() }),
            FormField::new(
                "representative_id",
                "Representative",
                FieldType::Custom {
                    component: "staff-select".into(),
                },
            ),
            FormField::new(
                "supervisor_ids",
                "Supervisors",
                FieldType::Custom {
                    component: "staff-multiselect".into(),
                },
            ),
        ],
    )]);

    let mut header = DetailHeader::new(display(|g: &Group| g.name.clone()));
    header.subtitle = Some(display(|g: &Group| format!("{} students", g.student_count)));
    let detail = DetailConfig {
        header,
        sections: vec![DetailSection::new(
            "Details",
            vec![
                DetailItem::new("Room", |g: &Group| or_dash(&g.room_name)),
                DetailItem::new("Representative", |g: &Group| or_dash(&g.representative_name)),
                DetailItem::new("Supervisors", |g: &Group| g.supervisor_ids.len().to_string()),
            ],
        )],
    };

    let mut item = ListItem::new(display(|g: &Group| g.name.clone()));
    item.subtitle = Some(display(|g: &Group| or_dash(&g.room_name)));
    item.badges = Some(badges(|g: &Group| vec![Badge::new(format!("{} students", g.student_count), "blue")]));
    let mut list = ListConfig::new("Groups", item);
    list.description = "OGS groups with room and supervisors".into();
    list.search_placeholder = "Search groups...".into();
    list.search_strategy = SearchStrategy::Frontend;

    EntityConfig {
        labels: Labels::for_entity(&name),
        name,
        theme: Theme::new("#10B981").icon("user-group"),
        api: ApiConfig::new(BASE_PATH),
        form,
        detail,
        list,
        service: ServiceOverrides::default()
            .map_response(map_response)
            .map_request(map_request),
        hooks: Hooks::default(),
    }
}
