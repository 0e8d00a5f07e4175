//! IoT devices (RFID readers and the like) registered with the backend.

use crate::config::*;
use crate::entities::{decode_with, or_dash};
use crate::error::ApiError;
use crate::mapping::stringify_ids;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceStatus {
    Active,
    #[default]
    Inactive,
    Maintenance,
    Offline,
}

impl DeviceStatus {
    pub fn label(&self) -> &'static str {
        match self {
            DeviceStatus::Active => "Active",
            DeviceStatus::Inactive => "Inactive",
            DeviceStatus::Maintenance => "Maintenance",
            DeviceStatus::Offline => "Offline",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            DeviceStatus::Active => "green",
            DeviceStatus::Inactive => "gray",
            DeviceStatus::Maintenance => "yellow",
            DeviceStatus::Offline => "red",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Device {
    pub id: String,
    pub device_id: String,
    pub device_type: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub status: DeviceStatus,
    #[serde(default)]
    pub last_seen: Option<DateTime<Utc>>,
    /// Only returned once, right after registration.
    #[serde(default)]
    pub api_key: Option<String>,
}

impl Device {
    pub fn display_name(&self) -> String {
        match self.name.as_deref() {
            Some(n) if !n.trim().is_empty() => n.to_string(),
            _ => self.device_id.clone(),
        }
    }

    /// Human-readable age of `last_seen` relative to `now`.
    pub fn last_seen_label(&self, now: DateTime<Utc>) -> String {
        let Some(seen) = self.last_seen else {
            return "never".to_string();
        };
        let minutes = (now - seen).num_minutes();
        match minutes {
            m if m < 1 => "just now".to_string(),
            m if m < 60 => format!("{} min ago", m),
            m if m < 60 * 24 => format!("{} h ago", m / 60),
            m => format!("{} days ago", m / (60 * 24)),
        }
    }
}

pub const DEVICE_TYPES: &[&str] = &["rfid_reader", "temperature_sensor", "display"];

pub fn map_response(raw: Value) -> Result<Device, ApiError> {
    decode_with(raw, |obj| {
        stringify_ids(obj, &["id"]);
        if obj.get("last_seen").map(|v| v.as_str() == Some("")).unwrap_or(false) {
            obj.insert("last_seen".into(), Value::Null);
        }
    })
}

pub fn map_request(data: Payload) -> Value {
    let mut obj = data;
    for key in ["id", "last_seen", "api_key"] {
        obj.remove(key);
    }
    Value::Object(obj)
}

fn validate_device_id(v: &Value) -> Option<String> {
    let s = v.as_str().unwrap_or_default();
    if s.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_') {
        None
    } else {
        Some("Only letters, digits, '-' and '_' are allowed".into())
    }
}

fn status_badge(d: &Device) -> Vec<Badge> {
    vec![Badge::new(d.status.label(), d.status.color())]
}

pub fn config() -> EntityConfig<Device> {
    let name = EntityName::new("Device", "Devices");
    let type_options: Vec<SelectOption> = DEVICE_TYPES.iter().map(|t| SelectOption::new(*t, *t)).collect();
    let status_options: Vec<SelectOption> = [
        DeviceStatus::Active,
        DeviceStatus::Inactive,
        DeviceStatus::Maintenance,
        DeviceStatus::Offline,
    ]
    .iter()
    .map(|s| SelectOption::new(s.label().to_lowercase(), s.label()))
    .collect();

    let form = FormConfig::new(vec![FormSection::new(
        "Device",
        vec![
            FormField::new("device_id", "Device ID", FieldType::Text)
                .required()
                .validation(validate_device_id),
            FormField::new("device_type", "Type", FieldType::Select)
                .required()
                .options(FieldOptions::Static(type_options)),
            FormField::new("name", "Name", FieldType::Text),
            FormField::new("status", "Status", FieldType::Select).options(FieldOptions::Static(status_options.clone())),
        ],
    )]);

    let mut header = DetailHeader::new(display(Device::display_name));
    header.subtitle = Some(display(|d: &Device| d.device_type.clone()));
    header.badges = Some(badges(status_badge));
    let detail = DetailConfig {
        header,
        sections: vec![DetailSection::new(
            "Device",
            vec![
                DetailItem::new("Device ID", |d: &Device| d.device_id.clone()),
                DetailItem::new("Type", |d: &Device| d.device_type.clone()),
                DetailItem::new("Last seen", |d: &Device| d.last_seen_label(Utc::now())),
                DetailItem::new("API key", |d: &Device| or_dash(&d.api_key)),
            ],
        )],
    };

    let mut item = ListItem::new(display(Device::display_name));
    item.subtitle = Some(display(|d: &Device| format!("{} · {}", d.device_type, d.device_id)));
    item.badges = Some(badges(status_badge));
    let mut list = ListConfig::new("Devices", item);
    list.description = "Registered IoT devices".into();
    list.search_placeholder = "Search devices...".into();
    list.search_strategy = SearchStrategy::Frontend;
    list.filters = vec![FilterDescriptor::new("status", "Status", FilterKind::Buttons, status_options)];
    list.info = Some(InfoBanner {
        title: "API keys".into(),
        message: "A device's API key is shown only once, right after registration.".into(),
    });

    EntityConfig {
        labels: Labels::for_entity(&name),
        name,
        theme: Theme::new("#0EA5E9").icon("cpu-chip"),
        api: ApiConfig::new("/api/iot").list_param("include_inactive", "true"),
        form,
        detail,
        list,
        service: ServiceOverrides::default()
            .map_response(map_response)
            .map_request(map_request),
        hooks: Hooks::default(),
    }
}
