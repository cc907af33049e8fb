// libs/booking-cell/src/handlers.rs
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use shared_models::{AppError, Department};

use crate::models::{BookingError, PatientInfoEdit};
use crate::router::BookingApiState;

fn map_error(e: BookingError) -> AppError {
    match e {
        BookingError::SessionNotFound => AppError::NotFound(e.to_string()),
        BookingError::CommitInFlight => AppError::Conflict(e.to_string()),
        BookingError::StoreError(msg) => AppError::Database(msg),
        BookingError::InvalidTransition { .. } => AppError::BadRequest(e.to_string()),
        BookingError::DoctorListPending
        | BookingError::DoctorNotInList
        | BookingError::DateInPast
        | BookingError::SlotUnavailable(_)
        | BookingError::LockedFieldEdit
        | BookingError::IncompleteForm(_) => AppError::ValidationError(e.to_string()),
    }
}

// ==============================================================================
// REQUEST BODIES
// ==============================================================================

#[derive(Debug, Deserialize)]
pub struct OpenSessionRequest {
    /// Auth token of a signed-in patient; pre-fills and locks the patient
    /// fields for this booking session.
    pub auth_token: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct DepartmentRequest {
    pub department: String,
}

#[derive(Debug, Deserialize)]
pub struct DoctorRequest {
    pub doctor_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct DateRequest {
    pub date: NaiveDate,
}

#[derive(Debug, Deserialize)]
pub struct SlotRequest {
    pub time: String,
}

// ==============================================================================
// SESSION HANDLERS
// ==============================================================================

pub async fn open_session(
    State(state): State<BookingApiState>,
    Json(request): Json<OpenSessionRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let locked = match request.auth_token {
        Some(token) => state
            .auth_sessions
            .get(&token)
            .ok_or_else(|| AppError::Auth("Unknown session token".to_string()))?
            .identity,
        None => None,
    };

    let id = state.service.open(locked).await;
    let snapshot = state.service.snapshot(id).await.map_err(map_error)?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "session_id": id, "state": snapshot })),
    ))
}

pub async fn get_session(
    State(state): State<BookingApiState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let snapshot = state.service.snapshot(id).await.map_err(map_error)?;
    Ok(Json(json!({ "state": snapshot })))
}

pub async fn choose_department(
    State(state): State<BookingApiState>,
    Path(id): Path<Uuid>,
    Json(request): Json<DepartmentRequest>,
) -> Result<Json<Value>, AppError> {
    let department = Department::from_label(&request.department)
        .ok_or_else(|| AppError::BadRequest(format!("Unknown department: {}", request.department)))?;

    let snapshot = state
        .service
        .choose_department(id, department)
        .await
        .map_err(map_error)?;
    Ok(Json(json!({ "state": snapshot })))
}

pub async fn choose_doctor(
    State(state): State<BookingApiState>,
    Path(id): Path<Uuid>,
    Json(request): Json<DoctorRequest>,
) -> Result<Json<Value>, AppError> {
    let snapshot = state
        .service
        .choose_doctor(id, request.doctor_id)
        .await
        .map_err(map_error)?;
    Ok(Json(json!({ "state": snapshot })))
}

pub async fn set_date(
    State(state): State<BookingApiState>,
    Path(id): Path<Uuid>,
    Json(request): Json<DateRequest>,
) -> Result<Json<Value>, AppError> {
    let snapshot = state
        .service
        .set_date(id, request.date)
        .await
        .map_err(map_error)?;
    Ok(Json(json!({ "state": snapshot })))
}

pub async fn set_slot(
    State(state): State<BookingApiState>,
    Path(id): Path<Uuid>,
    Json(request): Json<SlotRequest>,
) -> Result<Json<Value>, AppError> {
    let snapshot = state
        .service
        .set_slot(id, request.time)
        .await
        .map_err(map_error)?;
    Ok(Json(json!({ "state": snapshot })))
}

pub async fn edit_info(
    State(state): State<BookingApiState>,
    Path(id): Path<Uuid>,
    Json(edit): Json<PatientInfoEdit>,
) -> Result<Json<Value>, AppError> {
    let snapshot = state.service.edit_info(id, edit).await.map_err(map_error)?;
    Ok(Json(json!({ "state": snapshot })))
}

/// Advance through the validation gate and issue the commit. Retrying after
/// a failed commit goes through this same handler; a commit already in
/// flight is rejected with 409.
pub async fn confirm(
    State(state): State<BookingApiState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let snapshot = state.service.confirm(id).await.map_err(map_error)?;
    Ok(Json(json!({ "state": snapshot })))
}

pub async fn back(
    State(state): State<BookingApiState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let snapshot = state.service.back(id).await.map_err(map_error)?;
    Ok(Json(json!({ "state": snapshot })))
}

pub async fn restart(
    State(state): State<BookingApiState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let snapshot = state.service.restart(id).await.map_err(map_error)?;
    Ok(Json(json!({ "state": snapshot })))
}

/// Appointment history for the profile view.
pub async fn patient_appointments(
    State(state): State<BookingApiState>,
    Path(tc): Path<String>,
) -> Result<Json<Value>, AppError> {
    let appointments = state
        .store
        .list_for_patient(&tc)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

    Ok(Json(json!({
        "total": appointments.len(),
        "appointments": appointments,
    })))
}
