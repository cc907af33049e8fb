use std::sync::Arc;

use axum::{
    Router,
    routing::get,
};

use booking_cell::router::booking_routes;
use dashboard_cell::router::dashboard_routes;
use directory_cell::router::directory_routes;
use identity_cell::router::identity_routes;
use identity_cell::services::session::SessionStore;
use oracle_cell::router::oracle_routes;
use shared_config::AppConfig;

pub fn create_router(state: Arc<AppConfig>) -> Router {
    // One session store shared between identity (login/logout) and booking
    // (locked patient prefill).
    let sessions = Arc::new(SessionStore::new());

    Router::new()
        .route("/", get(|| async { "Klinik API is running!" }))
        .nest("/directory", directory_routes(state.clone()))
        .nest("/identity", identity_routes(state.clone(), sessions.clone()))
        .nest("/booking", booking_routes(state.clone(), sessions))
        .nest("/oracle", oracle_routes(state.clone()))
        .nest("/dashboard", dashboard_routes(state))
}
