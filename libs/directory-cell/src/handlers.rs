// libs/directory-cell/src/handlers.rs
use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::warn;

use shared_config::AppConfig;
use shared_models::{AppError, Department};

use crate::services::directory::DirectoryService;

#[derive(Debug, Deserialize)]
pub struct DoctorQueryParams {
    pub department: Option<String>,
}

/// List doctors, optionally filtered by department label. Unknown labels and
/// store failures degrade to an empty list so the booking flow can render.
pub async fn list_doctors(
    State(state): State<Arc<AppConfig>>,
    Query(params): Query<DoctorQueryParams>,
) -> Result<Json<Value>, AppError> {
    let department = match params.department.as_deref() {
        None | Some("") => None,
        Some(label) => match Department::from_label(label) {
            Some(dept) => Some(dept),
            None => {
                warn!("Unknown department filter: {}", label);
                return Ok(Json(json!({ "doctors": [], "total": 0 })));
            }
        },
    };

    let service = DirectoryService::new(&state);
    let doctors = match service.list_doctors(department).await {
        Ok(doctors) => doctors,
        Err(e) => {
            warn!("Doctor listing failed, returning empty roster: {}", e);
            Vec::new()
        }
    };

    Ok(Json(json!({
        "total": doctors.len(),
        "doctors": doctors,
    })))
}

pub async fn list_time_slots(
    State(state): State<Arc<AppConfig>>,
) -> Result<Json<Value>, AppError> {
    let service = DirectoryService::new(&state);
    let slots = service.time_slots();

    Ok(Json(json!({
        "total": slots.len(),
        "slots": slots,
    })))
}
