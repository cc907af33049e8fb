// libs/identity-cell/src/router.rs
use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use shared_config::AppConfig;

use crate::handlers;
use crate::services::session::SessionStore;

#[derive(Clone)]
pub struct IdentityState {
    pub config: Arc<AppConfig>,
    pub sessions: Arc<SessionStore>,
}

pub fn identity_routes(config: Arc<AppConfig>, sessions: Arc<SessionStore>) -> Router {
    let state = IdentityState { config, sessions };

    Router::new()
        .route("/register", post(handlers::register))
        .route("/login", post(handlers::login))
        .route("/admin/login", post(handlers::admin_login))
        .route("/logout/{token}", post(handlers::logout))
        .route("/profile/{token}", get(handlers::get_profile))
        .with_state(state)
}
