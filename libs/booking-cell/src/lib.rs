// libs/booking-cell/src/lib.rs
pub mod handlers;
pub mod machine;
pub mod models;
pub mod router;
pub mod services;
pub mod store;

pub use machine::{BookingContext, BookingEvent, BookingState, CommitPhase, DoctorList};
pub use models::{
    Appointment, AppointmentDraft, AppointmentStatus, BookingError, PatientInfo, PatientInfoEdit,
    StatusChange, StoreError,
};
pub use router::booking_routes;
pub use services::BookingSessionService;
pub use store::{AppointmentStore, SupabaseAppointmentStore};
