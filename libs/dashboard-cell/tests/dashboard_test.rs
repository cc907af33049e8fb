// libs/dashboard-cell/tests/dashboard_test.rs
use std::collections::HashMap;
use std::sync::Arc;

use assert_matches::assert_matches;
use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::NaiveDate;
use serde_json::{json, Value};
use tokio::sync::Mutex;
use tower::ServiceExt;
use uuid::Uuid;

use booking_cell::models::{
    Appointment, AppointmentDraft, AppointmentStatus, StatusChange, StoreError,
};
use booking_cell::store::AppointmentStore;
use dashboard_cell::models::{filter_appointments, DashboardStats};
use dashboard_cell::router::routes_with;
use dashboard_cell::services::DashboardService;
use shared_models::Department;

fn appointment(age: &str, department: Department, status: AppointmentStatus) -> Appointment {
    Appointment {
        id: Uuid::new_v4(),
        doctor_id: 1,
        doctor_name: "Dr. Ahmet Yılmaz".to_string(),
        department,
        patient_name: "Ayşe Yılmaz".to_string(),
        patient_tc: "12345678901".to_string(),
        patient_age: age.to_string(),
        date: NaiveDate::from_ymd_opt(2025, 6, 10).unwrap(),
        time: "09:00".to_string(),
        status,
        symptoms: None,
    }
}

#[test]
fn age_brackets_match_the_reference_distribution() {
    let appointments: Vec<Appointment> = ["10", "25", "45", "70", "17"]
        .iter()
        .map(|age| appointment(age, Department::Cardiology, AppointmentStatus::Pending))
        .collect();

    let stats = DashboardStats::from_appointments(
        &appointments,
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
    );

    let brackets: HashMap<&str, usize> = stats
        .age_brackets
        .iter()
        .map(|b| (b.name, b.count))
        .collect();
    assert_eq!(brackets["0-18"], 2);
    assert_eq!(brackets["19-35"], 1);
    assert_eq!(brackets["36-60"], 1);
    assert_eq!(brackets["60+"], 1);
}

#[test]
fn unparsable_age_lands_in_lowest_bracket_and_zero_rows_are_omitted() {
    let appointments = vec![
        appointment("abc", Department::Neurology, AppointmentStatus::Pending),
        appointment("", Department::Neurology, AppointmentStatus::Pending),
    ];

    let stats = DashboardStats::from_appointments(
        &appointments,
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
    );

    assert_eq!(stats.total, 2);
    assert_eq!(stats.age_brackets.len(), 1);
    assert_eq!(stats.age_brackets[0].name, "0-18");
    assert_eq!(stats.age_brackets[0].count, 2);
}

#[test]
fn department_histogram_is_zero_filled() {
    let appointments = vec![appointment(
        "30",
        Department::Dermatology,
        AppointmentStatus::Pending,
    )];

    let stats = DashboardStats::from_appointments(
        &appointments,
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
    );

    assert_eq!(stats.departments.len(), Department::ALL.len());
    for row in &stats.departments {
        let expected = if row.department == Department::Dermatology { 1 } else { 0 };
        assert_eq!(row.count, expected, "{}", row.department);
    }
}

#[test]
fn counts_split_by_status_and_date() {
    let today = NaiveDate::from_ymd_opt(2025, 6, 10).unwrap();
    let mut other_day = appointment("30", Department::Cardiology, AppointmentStatus::Completed);
    other_day.date = NaiveDate::from_ymd_opt(2025, 6, 9).unwrap();

    let appointments = vec![
        appointment("30", Department::Cardiology, AppointmentStatus::Pending),
        appointment("30", Department::Cardiology, AppointmentStatus::Confirmed),
        other_day,
    ];

    let stats = DashboardStats::from_appointments(&appointments, today);
    assert_eq!(stats.total, 3);
    assert_eq!(stats.pending, 1);
    assert_eq!(stats.completed, 1);
    assert_eq!(stats.today, 2);
}

#[test]
fn filter_matches_patient_or_doctor_name_case_insensitively() {
    let mut by_doctor = appointment("30", Department::Cardiology, AppointmentStatus::Pending);
    by_doctor.doctor_name = "Dr. Zeynep Arslan".to_string();
    by_doctor.patient_name = "Mehmet Demir".to_string();

    let appointments = vec![
        appointment("30", Department::Cardiology, AppointmentStatus::Pending),
        by_doctor,
    ];

    assert_eq!(filter_appointments(&appointments, "ayşe").len(), 1);
    assert_eq!(filter_appointments(&appointments, "ZEYNEP").len(), 1);
    assert_eq!(filter_appointments(&appointments, "yok böyle biri").len(), 0);
}

// ==============================================================================
// STATUS UPDATE SEMANTICS
// ==============================================================================

struct MemoryStore {
    rows: Mutex<HashMap<Uuid, Appointment>>,
}

impl MemoryStore {
    fn with(rows: Vec<Appointment>) -> Self {
        Self {
            rows: Mutex::new(rows.into_iter().map(|a| (a.id, a)).collect()),
        }
    }
}

#[async_trait]
impl AppointmentStore for MemoryStore {
    async fn create(&self, _draft: AppointmentDraft) -> Result<Appointment, StoreError> {
        Err(StoreError::DatabaseError("not used here".to_string()))
    }

    async fn get(&self, id: Uuid) -> Result<Appointment, StoreError> {
        let rows = self.rows.lock().await;
        rows.get(&id).cloned().ok_or(StoreError::NotFound)
    }

    async fn list_all(&self) -> Result<Vec<Appointment>, StoreError> {
        let rows = self.rows.lock().await;
        Ok(rows.values().cloned().collect())
    }

    async fn list_for_patient(&self, tc: &str) -> Result<Vec<Appointment>, StoreError> {
        let rows = self.rows.lock().await;
        Ok(rows.values().filter(|a| a.patient_tc == tc).cloned().collect())
    }

    async fn update_status(
        &self,
        id: Uuid,
        change: StatusChange,
    ) -> Result<Appointment, StoreError> {
        let mut rows = self.rows.lock().await;
        let row = rows.get_mut(&id).ok_or(StoreError::NotFound)?;
        row.status = change.as_status();
        Ok(row.clone())
    }
}

#[tokio::test]
async fn pending_appointment_can_be_confirmed() {
    let pending = appointment("30", Department::Cardiology, AppointmentStatus::Pending);
    let id = pending.id;
    let service = DashboardService::new(Arc::new(MemoryStore::with(vec![pending])));

    let updated = service.update_status(id, StatusChange::Confirmed).await.unwrap();
    assert_eq!(updated.status, AppointmentStatus::Confirmed);
    assert_eq!(updated.id, id);
}

#[tokio::test]
async fn decided_appointment_refuses_another_decision() {
    let confirmed = appointment("30", Department::Cardiology, AppointmentStatus::Confirmed);
    let id = confirmed.id;
    let store = Arc::new(MemoryStore::with(vec![confirmed]));
    let service = DashboardService::new(store.clone());

    let err = service.update_status(id, StatusChange::Cancelled).await.unwrap_err();
    assert_matches!(err, dashboard_cell::models::DashboardError::NotPending(_));

    // No side effects on refusal.
    let row = store.get(id).await.unwrap();
    assert_eq!(row.status, AppointmentStatus::Confirmed);
}

#[tokio::test]
async fn unknown_id_fails_with_not_found() {
    let service = DashboardService::new(Arc::new(MemoryStore::with(Vec::new())));

    let err = service
        .update_status(Uuid::new_v4(), StatusChange::Confirmed)
        .await
        .unwrap_err();
    assert_matches!(err, dashboard_cell::models::DashboardError::NotFound);
}

#[tokio::test]
async fn status_update_endpoint_returns_the_updated_record() {
    let pending = appointment("30", Department::Cardiology, AppointmentStatus::Pending);
    let id = pending.id;
    let service = Arc::new(DashboardService::new(Arc::new(MemoryStore::with(vec![pending]))));
    let app = routes_with(service);

    let response = app
        .oneshot(
            Request::builder()
                .method("PATCH")
                .uri(format!("/appointments/{}/status", id))
                .header("content-type", "application/json")
                .body(Body::from(json!({ "status": "cancelled" }).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["appointment"]["status"], "cancelled");
    assert_eq!(body["appointment"]["id"], id.to_string());
}
