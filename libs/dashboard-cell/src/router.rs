// libs/dashboard-cell/src/router.rs
use axum::{
    routing::{get, patch},
    Router,
};
use std::sync::Arc;

use booking_cell::store::{AppointmentStore, SupabaseAppointmentStore};
use shared_config::AppConfig;

use crate::handlers;
use crate::services::DashboardService;

pub fn dashboard_routes(config: Arc<AppConfig>) -> Router {
    let store: Arc<dyn AppointmentStore> = Arc::new(SupabaseAppointmentStore::new(&config));
    routes_with(Arc::new(DashboardService::new(store)))
}

/// Router over a pre-built service; tests inject an in-memory store here.
pub fn routes_with(service: Arc<DashboardService>) -> Router {
    Router::new()
        .route("/stats", get(handlers::get_stats))
        .route("/appointments", get(handlers::list_appointments))
        .route("/appointments/{id}/status", patch(handlers::update_status))
        .with_state(service)
}
