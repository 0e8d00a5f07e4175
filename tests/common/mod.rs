#![allow(dead_code)]

use ogs_crud::config::*;
use ogs_crud::{ApiClient, StaticToken};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use wiremock::MockServer;

pub const TOKEN: &str = "test-token";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    pub name: String,
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn client(server: &MockServer) -> ApiClient {
    init_tracing();
    ApiClient::new(&server.uri(), Arc::new(StaticToken::new(TOKEN))).unwrap()
}

/// Minimal config for `/api/items` without mappers or hooks.
pub fn item_config() -> EntityConfig<Item> {
    let name = EntityName::new("Item", "Items");
    EntityConfig {
        labels: Labels::for_entity(&name),
        name,
        theme: Theme::new("#000000"),
        api: ApiConfig::new("/api/items"),
        form: FormConfig::new(vec![FormSection::new(
            "Item",
            vec![FormField::new("name", "Name", FieldType::Text).required()],
        )]),
        detail: DetailConfig {
            header: DetailHeader::new(display(|i: &Item| i.name.clone())),
            sections: Vec::new(),
        },
        list: ListConfig::new("Items", ListItem::new(display(|i: &Item| i.name.clone()))),
        service: ServiceOverrides::default(),
        hooks: Hooks::default(),
    }
}

pub fn payload(v: serde_json::Value) -> Payload {
    v.as_object().cloned().unwrap()
}
