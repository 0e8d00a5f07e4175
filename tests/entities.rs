mod common;

use common::{client, payload};
use ogs_crud::entities::{devices, groups, permissions, roles, staff, students};
use ogs_crud::{create_crud_service, create_extended_service};
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn group_options_load_from_backend() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/groups"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": [{"id": 1, "name": "Eulen"}, {"id": 2, "name": "Füchse"}, {"name": "no id"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let options = groups::select_options(client(&server)).resolve().await.unwrap();
    let pairs: Vec<(String, String)> = options.into_iter().map(|o| (o.value, o.label)).collect();
    assert_eq!(
        pairs,
        vec![("1".to_string(), "Eulen".to_string()), ("2".to_string(), "Füchse".to_string())]
    );
}

#[tokio::test]
async fn role_permissions_custom_method() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/auth/roles/4/permissions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"id": 1, "resource": "rooms", "action": "read"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let service = create_extended_service(roles::config(), client(&server));
    let perms: Vec<permissions::Permission> = service.call_as(roles::GET_PERMISSIONS, json!("4")).await.unwrap();
    assert_eq!(perms.len(), 1);
    assert_eq!(perms[0].id, "1");
    assert_eq!(perms[0].name, "rooms:read");
}

#[tokio::test]
async fn permission_get_one_unwraps_nested_payload() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/auth/permissions/9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "data": {"permission": {"id": 9, "name": "Manage staff", "resource": "staff", "action": "manage"}}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let service = create_crud_service(permissions::config(), client(&server));
    let p = service.get_one("9").await.unwrap();
    assert_eq!(p.id, "9");
    assert_eq!(p.name, "Manage staff");
    assert_eq!(p.label(), "staff:manage");
}

#[tokio::test]
async fn staff_create_nests_person() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/staff"))
        .and(body_json(json!({
            "person": {"first_name": "Anna", "last_name": "Berg", "email": "anna@ogs.de"},
            "is_teacher": true,
            "specialization": "Math",
            "staff_notes": null
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "data": {
                "id": 12,
                "is_teacher": true,
                "specialization": "Math",
                "person": {"id": 30, "first_name": "Anna", "last_name": "Berg", "email": "anna@ogs.de"}
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let service = create_crud_service(staff::config(), client(&server));
    let created = service
        .create(payload(json!({
            "first_name": "Anna",
            "last_name": "Berg",
            "email": "anna@ogs.de",
            "is_teacher": true,
            "specialization": "Math"
        })))
        .await
        .unwrap();
    assert_eq!(created.id, "12");
    assert_eq!(created.person_id.as_deref(), Some("30"));
    assert!(created.is_teacher);
}

#[tokio::test]
async fn device_list_sends_static_params() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/iot"))
        .and(query_param("include_inactive", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "device_id": "rfid-01", "device_type": "rfid_reader", "status": "active"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let service = create_crud_service(devices::config(), client(&server));
    let page = service.get_list(&[]).await.unwrap();
    assert_eq!(page.data[0].status, devices::DeviceStatus::Active);
}

#[tokio::test]
async fn student_update_maps_both_directions() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/students/3"))
        .and(body_json(json!({
            "first_name": "Mia",
            "last_name": "Klein",
            "school_class": "2b",
            "group_id": 4
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"id": 3, "first_name": "Mia", "last_name": "Klein", "school_class": "2b", "group_id": 4, "location": "house"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let service = create_crud_service(students::config(), client(&server));
    let s = service
        .update(
            "3",
            payload(json!({
                "id": "3",
                "first_name": "Mia",
                "second_name": "Klein",
                "school_class": "2b",
                "group_id": "4",
                "group_name": "Eulen"
            })),
        )
        .await
        .unwrap();
    assert_eq!(s.second_name, "Klein");
    assert_eq!(s.group_id.as_deref(), Some("4"));
    assert_eq!(s.location, students::Location::House);
}
