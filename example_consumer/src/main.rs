//! Example consumer: lists one OGS entity through ogs-crud.
//!
//! Run from repo root: `cargo run -p example-consumer -- rooms [search]`
//! Needs `OGS_API_URL` (and usually `OGS_API_TOKEN`) in the environment or `.env`.

use ogs_crud::entities::{activities, devices, groups, rooms, staff, students};
use ogs_crud::{create_crud_service, ApiClient, ClientSettings, EntityConfig};
use serde::de::DeserializeOwned;
use serde_json::Value;

async fn list<T>(config: EntityConfig<T>, client: ApiClient, search: Option<String>) -> Result<(), Box<dyn std::error::Error>>
where
    T: DeserializeOwned + Send + Sync + 'static,
{
    let service = create_crud_service(config, client);
    let filters: Vec<(String, Value)> = search
        .as_deref()
        .map(|s| service.config().list.search_filters(s))
        .unwrap_or_default();
    let page = service.get_list(&filters).await?;
    let items = match search.as_deref() {
        Some(s) => service.config().list.search(page.data, s),
        None => page.data,
    };
    for item in &items {
        let title = (service.config().list.item.title)(item);
        let subtitle = service
            .config()
            .list
            .item
            .subtitle
            .as_ref()
            .map(|f| f(item))
            .unwrap_or_default();
        println!("{:<32} {}", title, subtitle);
    }
    tracing::info!(
        entity = %service.config().name.plural,
        shown = items.len(),
        total = page.pagination.total_records,
        "listed"
    );
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("ogs_crud=info,example_consumer=info")),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let entity = args.next().unwrap_or_else(|| "students".into());
    let search = args.next();

    let settings = ClientSettings::from_env()?;
    let client = ApiClient::from_settings(&settings)?;
    tracing::info!(base_url = %client.base_url(), entity = %entity, "connecting");

    match entity.as_str() {
        "students" => list(students::config(), client, search).await,
        "rooms" => list(rooms::config(), client, search).await,
        "groups" => list(groups::config(), client, search).await,
        "activities" => list(activities::config(), client, search).await,
        "devices" => list(devices::config(), client, search).await,
        "staff" => list(staff::config(), client, search).await,
        other => Err(format!("unknown entity '{}'", other).into()),
    }
}
