// libs/oracle-cell/src/handlers.rs
use axum::{extract::State, Json};
use serde_json::{json, Value};
use std::sync::Arc;

use shared_config::AppConfig;
use shared_models::AppError;

use crate::models::{LabRequest, OracleError, TriageRequest};
use crate::services::{LabOracle, TriageOracle};

fn map_error(e: OracleError) -> AppError {
    match e {
        OracleError::EmptyInput | OracleError::InvalidImage(_) => {
            AppError::ValidationError(e.to_string())
        }
        OracleError::NotConfigured
        | OracleError::ExternalService(_)
        | OracleError::SchemaMismatch(_) => AppError::ExternalService(e.to_string()),
    }
}

pub async fn triage(
    State(config): State<Arc<AppConfig>>,
    Json(request): Json<TriageRequest>,
) -> Result<Json<Value>, AppError> {
    let oracle = TriageOracle::new(&config);
    let suggestion = oracle.suggest(&request.symptoms).await.map_err(map_error)?;

    Ok(Json(json!({ "suggestion": suggestion })))
}

pub async fn interpret_lab(
    State(config): State<Arc<AppConfig>>,
    Json(request): Json<LabRequest>,
) -> Result<Json<Value>, AppError> {
    let oracle = LabOracle::new(&config);
    let analysis = oracle
        .interpret(&request.text, request.image_base64.as_deref())
        .await
        .map_err(map_error)?;

    Ok(Json(json!({ "analysis": analysis })))
}
