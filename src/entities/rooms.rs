//! Rooms: building, floor, capacity and category.

use crate::config::*;
use crate::entities::{decode_with, or_dash};
use crate::error::ApiError;
use crate::lookup::KeywordTable;
use crate::mapping::stringify_ids;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub building: Option<String>,
    #[serde(default)]
    pub floor: i32,
    #[serde(default)]
    pub capacity: u32,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub is_occupied: bool,
}

pub const CATEGORIES: &[&str] = &[
    "Klassenzimmer",
    "Gruppenraum",
    "Sporthalle",
    "Sport",
    "Kunst",
    "Musik",
    "Naturwissenschaften",
    "Computer",
    "Bibliothek",
    "Mensa",
    "Werkraum",
    "Außenbereich",
];

pub fn category_emojis() -> KeywordTable {
    KeywordTable::new(
        &[
            ("klassenzimmer", "📚"),
            ("gruppenraum", "🧩"),
            ("sporthalle", "🏟️"),
            ("sport", "⚽"),
            ("turn", "🤸"),
            ("kunst", "🎨"),
            ("musik", "🎵"),
            ("naturwissenschaft", "🔬"),
            ("labor", "🧪"),
            ("computer", "💻"),
            ("bibliothek", "📖"),
            ("mensa", "🍽️"),
            ("werk", "🔧"),
            ("außen", "🌳"),
            ("hof", "🌳"),
        ],
        "🏫",
    )
}

pub fn floor_label(floor: i32) -> String {
    match floor {
        0 => "Ground floor".to_string(),
        f if f < 0 => format!("Basement {}", -f),
        f => format!("Floor {}", f),
    }
}

pub fn map_response(raw: Value) -> Result<Room, ApiError> {
    decode_with(raw, |obj| {
        stringify_ids(obj, &["id"]);
        if let Some(Value::String(name)) = obj.remove("room_name") {
            obj.entry("name").or_insert(Value::String(name));
        }
    })
}

pub fn map_request(data: Payload) -> Value {
    let mut obj = data;
    obj.remove("id");
    obj.remove("is_occupied");
    if let Some(name) = obj.remove("name") {
        obj.insert("room_name".into(), name);
    }
    Value::Object(obj)
}

fn validate_capacity(v: &Value) -> Option<String> {
    match v.as_f64() {
        Some(n) if n < 1.0 => Some("Capacity must be at least 1".into()),
        Some(n) if n > 200.0 => Some("Capacity must be at most 200".into()),
        Some(_) => None,
        None => Some("Capacity must be a number".into()),
    }
}

fn room_badges(r: &Room) -> Vec<Badge> {
    let status = if r.is_occupied {
        Badge::new("Occupied", "red")
    } else {
        Badge::new("Free", "green")
    };
    vec![status, Badge::new(r.category.clone(), r.color.clone().unwrap_or_else(|| "gray".into()))]
}

pub fn config() -> EntityConfig<Room> {
    let name = EntityName::new("Room", "Rooms");
    let category_options: Vec<SelectOption> = CATEGORIES.iter().map(|c| SelectOption::new(*c, *c)).collect();

    let mut form = FormConfig::new(vec![
        FormSection::new(
            "Room",
            vec![
                FormField::new("name", "Name", FieldType::Text).required(),
                FormField::new("category", "Category", FieldType::Select)
                    .required()
                    .options(FieldOptions::Static(category_options.clone())),
                FormField::new("capacity", "Capacity", FieldType::number(Some(1.0), Some(200.0)))
                    .required()
                    .validation(validate_capacity),
            ],
        )
        .columns(2),
        FormSection::new(
            "Location",
            vec![
                FormField::new("building", "Building", FieldType::Text),
                FormField::new("floor", "Floor", FieldType::number(Some(-3.0), Some(20.0))),
                FormField::new("color", "Color", FieldType::Custom { component: "color-picker".into() }),
            ],
        ),
    ]);
    let mut defaults = Payload::new();
    defaults.insert("floor".into(), Value::from(0));
    defaults.insert("capacity".into(), Value::from(25));
    form.default_values = Some(defaults);

    let mut header = DetailHeader::new(display(|r: &Room| r.name.clone()));
    header.subtitle = Some(display(|r: &Room| r.category.clone()));
    header.avatar = Some(display(|r: &Room| category_emojis().lookup(&r.category).to_string()));
    header.badges = Some(badges(room_badges));
    let detail = DetailConfig {
        header,
        sections: vec![DetailSection::new(
            "Details",
            vec![
                DetailItem::new("Building", |r: &Room| or_dash(&r.building)),
                DetailItem::new("Floor", |r: &Room| floor_label(r.floor)),
                DetailItem::new("Capacity", |r: &Room| r.capacity.to_string()),
                DetailItem::new("Category", |r: &Room| r.category.clone()),
            ],
        )],
    };

    let mut item = ListItem::new(display(|r: &Room| r.name.clone()));
    item.subtitle = Some(display(|r: &Room| format!("{} · {}", or_dash(&r.building), floor_label(r.floor))));
    item.description = Some(display(|r: &Room| r.category.clone()));
    item.avatar = Some(display(|r: &Room| category_emojis().lookup(&r.category).to_string()));
    item.badges = Some(badges(room_badges));
    let mut list = ListConfig::new("Rooms", item);
    list.description = "Rooms and their current occupancy".into();
    list.search_placeholder = "Search rooms...".into();
    list.search_strategy = SearchStrategy::Frontend;
    list.min_search_length = 1;
    list.filters = vec![FilterDescriptor::new("category", "Category", FilterKind::Grid, category_options)];

    EntityConfig {
        labels: Labels::for_entity(&name),
        name,
        theme: Theme::new("#4F46E5").icon("building"),
        api: ApiConfig::new("/api/rooms"),
        form,
        detail,
        list,
        service: ServiceOverrides::default()
            .map_response(map_response)
            .map_request(map_request),
        hooks: Hooks::default(),
    }
}
