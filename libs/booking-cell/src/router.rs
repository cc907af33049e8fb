// libs/booking-cell/src/router.rs
use axum::{
    routing::{get, patch, post},
    Router,
};
use std::sync::Arc;

use identity_cell::services::session::SessionStore;
use shared_config::AppConfig;

use crate::handlers;
use crate::services::BookingSessionService;
use crate::store::{AppointmentStore, SupabaseAppointmentStore};
use directory_cell::services::directory::DirectoryService;

#[derive(Clone)]
pub struct BookingApiState {
    pub service: Arc<BookingSessionService>,
    pub store: Arc<dyn AppointmentStore>,
    pub auth_sessions: Arc<SessionStore>,
}

pub fn booking_routes(config: Arc<AppConfig>, auth_sessions: Arc<SessionStore>) -> Router {
    let store: Arc<dyn AppointmentStore> = Arc::new(SupabaseAppointmentStore::new(&config));
    let directory = Arc::new(DirectoryService::new(&config));
    let service = Arc::new(BookingSessionService::new(store.clone(), directory));

    routes_with(service, store, auth_sessions)
}

/// Router over pre-built parts; tests inject an in-memory store here.
pub fn routes_with(
    service: Arc<BookingSessionService>,
    store: Arc<dyn AppointmentStore>,
    auth_sessions: Arc<SessionStore>,
) -> Router {
    let state = BookingApiState {
        service,
        store,
        auth_sessions,
    };

    Router::new()
        .route("/sessions", post(handlers::open_session))
        .route("/sessions/{id}", get(handlers::get_session))
        .route("/sessions/{id}/department", post(handlers::choose_department))
        .route("/sessions/{id}/doctor", post(handlers::choose_doctor))
        .route("/sessions/{id}/date", post(handlers::set_date))
        .route("/sessions/{id}/slot", post(handlers::set_slot))
        .route("/sessions/{id}/info", patch(handlers::edit_info))
        .route("/sessions/{id}/confirm", post(handlers::confirm))
        .route("/sessions/{id}/back", post(handlers::back))
        .route("/sessions/{id}/restart", post(handlers::restart))
        .route(
            "/appointments/patient/{tc}",
            get(handlers::patient_appointments),
        )
        .with_state(state)
}
