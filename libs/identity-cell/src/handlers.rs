// libs/identity-cell/src/handlers.rs
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use tracing::debug;
use uuid::Uuid;

use shared_models::{AppError, AuthSession, PatientIdentity, Role};

use crate::models::{AdminLoginRequest, IdentityError, LoginRequest, RegisterPatientRequest};
use crate::router::IdentityState;
use crate::services::identity::IdentityService;

fn map_error(e: IdentityError) -> AppError {
    match e {
        IdentityError::DuplicateIdentity => AppError::Conflict(e.to_string()),
        IdentityError::InvalidCredentials => AppError::Auth(e.to_string()),
        IdentityError::NotFound => AppError::NotFound(e.to_string()),
        IdentityError::ValidationError(msg) => AppError::ValidationError(msg),
        IdentityError::DatabaseError(msg) => AppError::Database(msg),
    }
}

pub async fn register(
    State(state): State<IdentityState>,
    Json(request): Json<RegisterPatientRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let service = IdentityService::new(&state.config);
    let patient = service.register(request).await.map_err(map_error)?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "patient": patient,
        })),
    ))
}

pub async fn login(
    State(state): State<IdentityState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<Value>, AppError> {
    let service = IdentityService::new(&state.config);
    let patient = service
        .login(&request.tc, &request.password)
        .await
        .map_err(map_error)?;

    let session = AuthSession::authenticated(
        Role::Patient,
        PatientIdentity {
            name: patient.name.clone(),
            tc: patient.tc.clone(),
            age: patient.age.clone(),
        },
    );
    let token = state.sessions.insert(session);

    Ok(Json(json!({
        "token": token,
        "role": Role::Patient,
        "patient": patient,
    })))
}

pub async fn admin_login(
    State(state): State<IdentityState>,
    Json(request): Json<AdminLoginRequest>,
) -> Result<Json<Value>, AppError> {
    let service = IdentityService::new(&state.config);
    service
        .admin_login(&request.username, &request.password)
        .map_err(map_error)?;

    let token = state.sessions.insert(AuthSession::admin());

    Ok(Json(json!({
        "token": token,
        "role": Role::Admin,
    })))
}

pub async fn logout(
    State(state): State<IdentityState>,
    Path(token): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let cleared = state.sessions.clear(&token);
    debug!("Logout for session {} (cleared: {})", token, cleared);

    Ok(Json(json!({ "cleared": cleared })))
}

/// Profile view for the signed-in patient, medical history included.
pub async fn get_profile(
    State(state): State<IdentityState>,
    Path(token): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let session = state
        .sessions
        .get(&token)
        .ok_or_else(|| AppError::Auth("Unknown session".to_string()))?;

    let identity = session
        .identity
        .ok_or_else(|| AppError::Auth("Session has no patient identity".to_string()))?;

    let service = IdentityService::new(&state.config);
    let patient = service.get_patient(&identity.tc).await.map_err(map_error)?;

    Ok(Json(json!({ "patient": patient })))
}
