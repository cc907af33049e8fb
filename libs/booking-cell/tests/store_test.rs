// libs/booking-cell/tests/store_test.rs
use assert_matches::assert_matches;
use chrono::NaiveDate;
use serde_json::json;
use uuid::Uuid;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

use booking_cell::models::{AppointmentDraft, AppointmentStatus, StatusChange, StoreError};
use booking_cell::store::{AppointmentStore, SupabaseAppointmentStore};
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

fn draft() -> AppointmentDraft {
    AppointmentDraft {
        doctor_id: 3,
        doctor_name: "Dr. Zeynep Arslan".to_string(),
        department: Department::Pediatrics,
        patient_name: "Elif Kaya".to_string(),
        patient_tc: "12345678901".to_string(),
        patient_age: "7".to_string(),
        date: NaiveDate::from_ymd_opt(2025, 7, 1).unwrap(),
        time: "13:30".to_string(),
        symptoms: Some("ateş".to_string()),
    }
}

fn stored_row(id: Uuid, status: &str) -> serde_json::Value {
    json!({
        "id": id,
        "doctor_id": 3,
        "doctor_name": "Dr. Zeynep Arslan",
        "department": "Çocuk Sağlığı",
        "patient_name": "Elif Kaya",
        "patient_tc": "12345678901",
        "patient_age": "7",
        "date": "2025-07-01",
        "time": "13:30",
        "status": status,
        "symptoms": "ateş",
    })
}

#[tokio::test]
async fn create_writes_pending_row_and_returns_it() {
    let mock_server = MockServer::start().await;
    let id = Uuid::new_v4();

    Mock::given(method("POST"))
        .and(path("/rest/v1/appointments"))
        .and(header("Prefer", "return=representation"))
        .and(body_partial_json(json!({
            "status": "pending",
            "department": "Çocuk Sağlığı",
            "patient_tc": "12345678901",
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([stored_row(id, "pending")])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let store = SupabaseAppointmentStore::new(&config_for(&mock_server));
    let appointment = store.create(draft()).await.unwrap();

    assert_eq!(appointment.id, id);
    assert_eq!(appointment.status, AppointmentStatus::Pending);
    assert_eq!(appointment.department, Department::Pediatrics);
}

#[tokio::test]
async fn update_status_patches_one_field() {
    let mock_server = MockServer::start().await;
    let id = Uuid::new_v4();

    Mock::given(method("PATCH"))
        .and(path("/rest/v1/appointments"))
        .and(query_param("id", format!("eq.{}", id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([stored_row(id, "confirmed")])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let store = SupabaseAppointmentStore::new(&config_for(&mock_server));
    let updated = store.update_status(id, StatusChange::Confirmed).await.unwrap();

    assert_eq!(updated.status, AppointmentStatus::Confirmed);

    // The PATCH body must carry only the status field.
    let requests: Vec<Request> = mock_server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(body, json!({ "status": "confirmed" }));
}

#[tokio::test]
async fn update_status_unknown_id_is_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/rest/v1/appointments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    let store = SupabaseAppointmentStore::new(&config_for(&mock_server));
    let err = store
        .update_status(Uuid::new_v4(), StatusChange::Cancelled)
        .await
        .unwrap_err();

    assert_matches!(err, StoreError::NotFound);
}

#[tokio::test]
async fn list_for_patient_filters_by_tc() {
    let mock_server = MockServer::start().await;
    let id = Uuid::new_v4();

    Mock::given(method("GET"))
        .and(path("/rest/v1/appointments"))
        .and(query_param("patient_tc", "eq.12345678901"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([stored_row(id, "pending")])))
        .mount(&mock_server)
        .await;

    let store = SupabaseAppointmentStore::new(&config_for(&mock_server));
    let appointments = store.list_for_patient("12345678901").await.unwrap();

    assert_eq!(appointments.len(), 1);
    assert_eq!(appointments[0].patient_name, "Elif Kaya");
}
