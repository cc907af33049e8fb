// libs/directory-cell/tests/directory_test.rs
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use directory_cell::router::directory_routes;
use directory_cell::services::directory::DirectoryService;
use shared_config::AppConfig;
use shared_models::Department;

fn config_for(mock_server: &MockServer) -> AppConfig {
    AppConfig {
        supabase_url: mock_server.uri(),
        supabase_anon_key: "test-key".to_string(),
        gemini_api_key: String::new(),
        gemini_base_url: String::new(),
    }
}

fn doctor_row(id: i64, name: &str, department: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "department": department,
        "image": "",
        "experience": 12,
        "rating": 4.7,
    })
}

#[tokio::test]
async fn populated_roster_is_filtered_in_memory() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/doctors"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            doctor_row(1, "Dr. Ahmet Yılmaz", "Kardiyoloji"),
            doctor_row(2, "Dr. Ayşe Demir", "Nöroloji"),
        ])))
        .mount(&mock_server)
        .await;

    let service = DirectoryService::new(&config_for(&mock_server));

    let all = service.list_doctors(None).await.unwrap();
    assert_eq!(all.len(), 2);

    let neurologists = service.list_doctors(Some(Department::Neurology)).await.unwrap();
    assert_eq!(neurologists.len(), 1);
    assert_eq!(neurologists[0].id, 2);
}

#[tokio::test]
async fn empty_roster_triggers_seeding() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/doctors"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&mock_server)
        .await;

    // The seed insert returns the stored roster with assigned ids.
    let seeded: Vec<Value> = (1..=7)
        .map(|i| doctor_row(i, &format!("Dr. Seed {}", i), "Kardiyoloji"))
        .collect();
    Mock::given(method("POST"))
        .and(path("/rest/v1/doctors"))
        .respond_with(ResponseTemplate::new(201).set_body_json(seeded))
        .expect(1)
        .mount(&mock_server)
        .await;

    let service = DirectoryService::new(&config_for(&mock_server));
    let doctors = service.list_doctors(None).await.unwrap();
    assert_eq!(doctors.len(), 7);
}

#[tokio::test]
async fn unknown_department_label_degrades_to_empty_list() {
    let mock_server = MockServer::start().await;

    // No store call should be made for a label outside the enumeration.
    Mock::given(method("GET"))
        .and(path("/rest/v1/doctors"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let app = directory_routes(Arc::new(config_for(&mock_server)));
    let response = app
        .oneshot(
            Request::builder()
                .uri("/doctors?department=Astroloji")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["total"], 0);
    assert_eq!(body["doctors"], json!([]));
}

#[tokio::test]
async fn store_failure_degrades_to_empty_list() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/doctors"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let app = directory_routes(Arc::new(config_for(&mock_server)));
    let response = app
        .oneshot(Request::builder().uri("/doctors").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["total"], 0);
}

#[tokio::test]
async fn slot_endpoint_serves_the_daily_template() {
    let mock_server = MockServer::start().await;

    let app = directory_routes(Arc::new(config_for(&mock_server)));
    let response = app
        .oneshot(Request::builder().uri("/slots").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(body["total"], 13);
    let slots = body["slots"].as_array().unwrap();
    let unavailable: Vec<&str> = slots
        .iter()
        .filter(|s| s["available"] == false)
        .map(|s| s["time"].as_str().unwrap())
        .collect();
    assert_eq!(unavailable, vec!["10:00", "11:30", "15:30"]);
}
