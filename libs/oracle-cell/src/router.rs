// libs/oracle-cell/src/router.rs
use axum::{routing::post, Router};
use std::sync::Arc;

use shared_config::AppConfig;

use crate::handlers;

pub fn oracle_routes(config: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/triage", post(handlers::triage))
        .route("/lab", post(handlers::interpret_lab))
        .with_state(config)
}
