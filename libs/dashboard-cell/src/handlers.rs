// libs/dashboard-cell/src/handlers.rs
use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use uuid::Uuid;

use booking_cell::models::StatusChange;
use shared_models::AppError;

use crate::models::DashboardError;
use crate::services::DashboardService;

fn map_error(e: DashboardError) -> AppError {
    match e {
        DashboardError::NotFound => AppError::NotFound(e.to_string()),
        DashboardError::NotPending(_) => AppError::ValidationError(e.to_string()),
        DashboardError::StoreError(msg) => AppError::Database(msg),
    }
}

#[derive(Debug, Deserialize)]
pub struct AppointmentQueryParams {
    pub search: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct StatusUpdateRequest {
    pub status: StatusChange,
}

pub async fn get_stats(
    State(service): State<Arc<DashboardService>>,
) -> Result<Json<Value>, AppError> {
    let stats = service.stats().await.map_err(map_error)?;
    Ok(Json(json!({ "stats": stats })))
}

pub async fn list_appointments(
    State(service): State<Arc<DashboardService>>,
    Query(params): Query<AppointmentQueryParams>,
) -> Result<Json<Value>, AppError> {
    let appointments = service
        .appointments(params.search.as_deref())
        .await
        .map_err(map_error)?;

    Ok(Json(json!({
        "total": appointments.len(),
        "appointments": appointments,
    })))
}

/// Returns the updated record so the admin table can patch its row in
/// place instead of re-fetching the whole list.
pub async fn update_status(
    State(service): State<Arc<DashboardService>>,
    Path(id): Path<Uuid>,
    Json(request): Json<StatusUpdateRequest>,
) -> Result<Json<Value>, AppError> {
    let updated = service
        .update_status(id, request.status)
        .await
        .map_err(map_error)?;

    Ok(Json(json!({ "appointment": updated })))
}
