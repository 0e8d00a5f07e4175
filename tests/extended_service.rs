mod common;

use common::{client, item_config, payload, Item};
use ogs_crud::config::*;
use ogs_crud::{create_extended_service, ApiClient, ApiError, CrudApi, PaginatedResponse};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn without_custom_methods_calls_pass_through() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/items"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": "1", "name": "a"}])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/items"))
        .and(body_json(json!({"name": "b"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"data": {"id": "2", "name": "b"}})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/items/1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let service = create_extended_service(item_config(), client(&server));
    assert_eq!(service.method_names().count(), 0);
    assert_eq!(service.get_list(&[]).await.unwrap().data.len(), 1);
    assert_eq!(service.create(payload(json!({"name": "b"}))).await.unwrap().id, "2");
    service.delete("1").await.unwrap();
}

#[tokio::test]
async fn call_invokes_named_method() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/items/3/archive"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"archived": true})))
        .expect(2)
        .mount(&server)
        .await;

    let mut config = item_config();
    config.service = ServiceOverrides::default().custom_method("archive", |client: ApiClient, args: Value| async move {
        let id = args["id"].as_str().unwrap_or_default().to_string();
        let response = client.post(&format!("/api/items/{}/archive", id), &json!({})).await?;
        Ok(response.unwrap_or(Value::Null))
    });

    let service = create_extended_service(config, client(&server));
    assert!(service.has_method("archive"));
    let out = service.call("archive", json!({"id": "3"})).await.unwrap();
    assert_eq!(out, json!({"archived": true}));

    #[derive(serde::Deserialize)]
    struct Archived {
        archived: bool,
    }
    let typed: Archived = service.call_as("archive", json!({"id": "3"})).await.unwrap();
    assert!(typed.archived);
}

#[tokio::test]
async fn unknown_method_is_an_error() {
    let server = MockServer::start().await;
    let service = create_extended_service(item_config(), client(&server));
    match service.call("nope", Value::Null).await.unwrap_err() {
        ApiError::UnknownMethod(name) => assert_eq!(name, "nope"),
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn custom_method_shadows_standard_operation() {
    let server = MockServer::start().await;
    let before_calls = Arc::new(AtomicUsize::new(0));

    let mut config = item_config();
    config.service = ServiceOverrides::default()
        .custom_method(CREATE_METHOD, |_client: ApiClient, args: Value| async move {
            Ok(json!({"id": "custom", "name": args["name"]}))
        })
        .custom_method(GET_LIST_METHOD, |_client: ApiClient, args: Value| async move {
            let page = PaginatedResponse {
                data: vec![json!({"id": "1", "name": args["search"]})],
                pagination: ogs_crud::Pagination::single_page(1),
            };
            Ok(serde_json::to_value(page)?)
        })
        .custom_method(UPDATE_METHOD, |_client: ApiClient, args: Value| async move {
            Ok(json!({"id": args["id"], "name": args["data"]["name"]}))
        });
    let counter = before_calls.clone();
    config.hooks = Hooks::default().before_create(move |data: Payload| {
        let counter = counter.clone();
        async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(data)
        }
    });

    let service = create_extended_service(config, client(&server));
    let created = service.create(payload(json!({"name": "n"}))).await.unwrap();
    assert_eq!(created, Item { id: "custom".into(), name: "n".into() });
    assert_eq!(before_calls.load(Ordering::SeqCst), 0);

    let page = service.get_list(&[("search".to_string(), json!("q"))]).await.unwrap();
    assert_eq!(page.data[0].name, "q");

    let updated = service.update("8", payload(json!({"name": "u"}))).await.unwrap();
    assert_eq!(updated, Item { id: "8".into(), name: "u".into() });

    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn shadowed_delete_receives_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/items/soft-delete"))
        .and(body_json(json!({"id": "5"})))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let mut config = item_config();
    config.service = ServiceOverrides::default().custom_method(DELETE_METHOD, |client: ApiClient, args: Value| async move {
        client.post("/api/items/soft-delete", &json!({ "id": args })).await?;
        Ok(Value::Null)
    });

    let service = create_extended_service(config, client(&server));
    let api: &dyn CrudApi<Item> = &service;
    api.delete("5").await.unwrap();
}
