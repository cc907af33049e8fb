// libs/booking-cell/src/models.rs
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use shared_models::Department;

// ==============================================================================
// APPOINTMENT MODELS
// ==============================================================================

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
    /// Produced outside this system; tolerated read-side, never written here.
    Completed,
    Cancelled,
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppointmentStatus::Pending => write!(f, "pending"),
            AppointmentStatus::Confirmed => write!(f, "confirmed"),
            AppointmentStatus::Completed => write!(f, "completed"),
            AppointmentStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// The durable record. Once created, everything except `status` is immutable.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Appointment {
    pub id: Uuid,
    pub doctor_id: i64,
    pub doctor_name: String,
    pub department: Department,
    pub patient_name: String,
    pub patient_tc: String,
    pub patient_age: String,
    pub date: NaiveDate,
    pub time: String,
    pub status: AppointmentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symptoms: Option<String>,
}

/// A fully-formed appointment before the store has assigned an identifier.
/// Commit always writes it with status `pending`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppointmentDraft {
    pub doctor_id: i64,
    pub doctor_name: String,
    pub department: Department,
    pub patient_name: String,
    pub patient_tc: String,
    pub patient_age: String,
    pub date: NaiveDate,
    pub time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symptoms: Option<String>,
}

/// Admin status changes are restricted to this pair; `completed` is not a
/// transition this system issues.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StatusChange {
    Confirmed,
    Cancelled,
}

impl StatusChange {
    pub fn as_status(self) -> AppointmentStatus {
        match self {
            StatusChange::Confirmed => AppointmentStatus::Confirmed,
            StatusChange::Cancelled => AppointmentStatus::Cancelled,
        }
    }
}

// ==============================================================================
// BOOKING SESSION MODELS
// ==============================================================================

/// Patient-supplied fields collected during a booking session. Transient;
/// validated at the ScheduleAndInfo gate, never re-validated at commit time.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PatientInfo {
    pub name: String,
    pub tc: String,
    pub age: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symptoms: Option<String>,
}

/// Partial edit of the patient form; absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PatientInfoEdit {
    pub name: Option<String>,
    pub tc: Option<String>,
    pub age: Option<String>,
    pub symptoms: Option<String>,
}

// ==============================================================================
// ERROR TYPES
// ==============================================================================

#[derive(Debug, Clone, thiserror::Error)]
pub enum BookingError {
    #[error("Event {event} is not valid in state {state}")]
    InvalidTransition {
        state: &'static str,
        event: &'static str,
    },

    #[error("Doctor list for the selected department has not loaded yet")]
    DoctorListPending,

    #[error("Selected doctor is not in the fetched list for this department")]
    DoctorNotInList,

    #[error("Appointment date must be today or later")]
    DateInPast,

    #[error("Time slot {0} is not offerable")]
    SlotUnavailable(String),

    #[error("Patient identity fields are locked for a signed-in session")]
    LockedFieldEdit,

    #[error("Booking form incomplete: {0}")]
    IncompleteForm(String),

    #[error("A commit for this session is already in flight")]
    CommitInFlight,

    #[error("Booking session not found")]
    SessionNotFound,

    #[error("Appointment store error: {0}")]
    StoreError(String),
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum StoreError {
    #[error("Appointment not found")]
    NotFound,

    #[error("Database error: {0}")]
    DatabaseError(String),
}
