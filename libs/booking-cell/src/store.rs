// libs/booking-cell/src/store.rs
use async_trait::async_trait;
use reqwest::Method;
use serde_json::{json, Value};
use tracing::{debug, info};
use uuid::Uuid;

use shared_config::AppConfig;
use shared_database::supabase::SupabaseClient;

use crate::models::{Appointment, AppointmentDraft, StatusChange, StoreError};

/// Contract between the booking flow and the durable appointment store:
/// one create call per committed booking, one update call per admin status
/// change, both independent single-row operations.
#[async_trait]
pub trait AppointmentStore: Send + Sync {
    /// Persist a draft with status `pending`; the store assigns the id.
    async fn create(&self, draft: AppointmentDraft) -> Result<Appointment, StoreError>;

    async fn get(&self, id: Uuid) -> Result<Appointment, StoreError>;

    async fn list_all(&self) -> Result<Vec<Appointment>, StoreError>;

    async fn list_for_patient(&self, tc: &str) -> Result<Vec<Appointment>, StoreError>;

    /// Single-field status update keyed by id. Last write wins; an unknown
    /// id fails with no side effects.
    async fn update_status(
        &self,
        id: Uuid,
        change: StatusChange,
    ) -> Result<Appointment, StoreError>;
}

pub struct SupabaseAppointmentStore {
    supabase: SupabaseClient,
}

impl SupabaseAppointmentStore {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            supabase: SupabaseClient::new(config),
        }
    }
}

#[async_trait]
impl AppointmentStore for SupabaseAppointmentStore {
    async fn create(&self, draft: AppointmentDraft) -> Result<Appointment, StoreError> {
        debug!(
            "Creating appointment for {} with doctor {}",
            draft.patient_name, draft.doctor_name
        );

        let row = json!({
            "doctor_id": draft.doctor_id,
            "doctor_name": draft.doctor_name,
            "department": draft.department,
            "patient_name": draft.patient_name,
            "patient_tc": draft.patient_tc,
            "patient_age": draft.patient_age,
            "date": draft.date.format("%Y-%m-%d").to_string(),
            "time": draft.time,
            "status": "pending",
            "symptoms": draft.symptoms,
        });

        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            "Prefer",
            reqwest::header::HeaderValue::from_static("return=representation"),
        );

        let result: Vec<Value> = self
            .supabase
            .request_with_headers(Method::POST, "/rest/v1/appointments", Some(row), Some(headers))
            .await
            .map_err(|e| StoreError::DatabaseError(e.to_string()))?;

        let created = result
            .into_iter()
            .next()
            .ok_or_else(|| StoreError::DatabaseError("Failed to create appointment".to_string()))?;

        let appointment: Appointment = serde_json::from_value(created).map_err(|e| {
            StoreError::DatabaseError(format!("Failed to parse created appointment: {}", e))
        })?;

        info!("Appointment {} created with status pending", appointment.id);
        Ok(appointment)
    }

    async fn get(&self, id: Uuid) -> Result<Appointment, StoreError> {
        let path = format!("/rest/v1/appointments?id=eq.{}&select=*", id);
        let result: Vec<Value> = self
            .supabase
            .request(Method::GET, &path, None)
            .await
            .map_err(|e| StoreError::DatabaseError(e.to_string()))?;

        let row = result.into_iter().next().ok_or(StoreError::NotFound)?;
        serde_json::from_value(row)
            .map_err(|e| StoreError::DatabaseError(format!("Failed to parse appointment: {}", e)))
    }

    async fn list_all(&self) -> Result<Vec<Appointment>, StoreError> {
        let result: Vec<Value> = self
            .supabase
            .request(Method::GET, "/rest/v1/appointments?select=*&order=date.desc", None)
            .await
            .map_err(|e| StoreError::DatabaseError(e.to_string()))?;

        parse_rows(result)
    }

    async fn list_for_patient(&self, tc: &str) -> Result<Vec<Appointment>, StoreError> {
        let path = format!(
            "/rest/v1/appointments?patient_tc=eq.{}&select=*&order=date.desc",
            tc
        );
        let result: Vec<Value> = self
            .supabase
            .request(Method::GET, &path, None)
            .await
            .map_err(|e| StoreError::DatabaseError(e.to_string()))?;

        parse_rows(result)
    }

    async fn update_status(
        &self,
        id: Uuid,
        change: StatusChange,
    ) -> Result<Appointment, StoreError> {
        debug!("Updating appointment {} status to {}", id, change.as_status());

        let path = format!("/rest/v1/appointments?id=eq.{}", id);
        let body = json!({ "status": change.as_status().to_string() });

        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            "Prefer",
            reqwest::header::HeaderValue::from_static("return=representation"),
        );

        let result: Vec<Value> = self
            .supabase
            .request_with_headers(Method::PATCH, &path, Some(body), Some(headers))
            .await
            .map_err(|e| StoreError::DatabaseError(e.to_string()))?;

        // PostgREST returns the updated rows; an unknown id matches nothing.
        let updated = result.into_iter().next().ok_or(StoreError::NotFound)?;

        serde_json::from_value(updated).map_err(|e| {
            StoreError::DatabaseError(format!("Failed to parse updated appointment: {}", e))
        })
    }
}

fn parse_rows(rows: Vec<Value>) -> Result<Vec<Appointment>, StoreError> {
    rows.into_iter()
        .map(serde_json::from_value)
        .collect::<Result<Vec<Appointment>, _>>()
        .map_err(|e| StoreError::DatabaseError(format!("Failed to parse appointments: {}", e)))
}
