// libs/dashboard-cell/src/models.rs
use chrono::NaiveDate;
use serde::Serialize;

use booking_cell::models::{Appointment, AppointmentStatus};
use shared_models::Department;

// ==============================================================================
// SNAPSHOT MODELS
// ==============================================================================

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DepartmentCount {
    pub department: Department,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AgeBracket {
    pub name: &'static str,
    pub count: usize,
}

/// One pass over the appointment list; recomputed per request, nothing is
/// cached or incrementally maintained.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DashboardStats {
    pub total: usize,
    pub pending: usize,
    pub completed: usize,
    pub today: usize,
    /// Zero-filled across every department, in enum order.
    pub departments: Vec<DepartmentCount>,
    /// Zero-count brackets are omitted; `total` still counts their absentees.
    pub age_brackets: Vec<AgeBracket>,
}

struct BracketSpec {
    name: &'static str,
    min: i64,
    max: i64,
}

const BRACKETS: [BracketSpec; 4] = [
    BracketSpec { name: "0-18", min: 0, max: 18 },
    BracketSpec { name: "19-35", min: 19, max: 35 },
    BracketSpec { name: "36-60", min: 36, max: 60 },
    BracketSpec { name: "60+", min: 61, max: i64::MAX },
];

impl DashboardStats {
    pub fn from_appointments(appointments: &[Appointment], today: NaiveDate) -> Self {
        let total = appointments.len();
        let pending = appointments
            .iter()
            .filter(|a| a.status == AppointmentStatus::Pending)
            .count();
        let completed = appointments
            .iter()
            .filter(|a| a.status == AppointmentStatus::Completed)
            .count();
        let today_count = appointments.iter().filter(|a| a.date == today).count();

        let departments = Department::ALL
            .iter()
            .map(|&department| DepartmentCount {
                department,
                count: appointments
                    .iter()
                    .filter(|a| a.department == department)
                    .count(),
            })
            .collect();

        let mut bracket_counts = [0usize; BRACKETS.len()];
        for appointment in appointments {
            // Unparsable or missing ages land in the lowest bracket.
            let age = appointment.patient_age.trim().parse::<i64>().unwrap_or(0);
            if let Some(i) = BRACKETS.iter().position(|b| age >= b.min && age <= b.max) {
                bracket_counts[i] += 1;
            }
        }
        let age_brackets = BRACKETS
            .iter()
            .zip(bracket_counts)
            .filter(|(_, count)| *count > 0)
            .map(|(spec, count)| AgeBracket {
                name: spec.name,
                count,
            })
            .collect();

        Self {
            total,
            pending,
            completed,
            today: today_count,
            departments,
            age_brackets,
        }
    }
}

/// Case-insensitive substring match on patient or doctor name, as typed
/// into the admin table's search box.
pub fn filter_appointments<'a>(appointments: &'a [Appointment], query: &str) -> Vec<&'a Appointment> {
    let needle = query.to_lowercase();
    appointments
        .iter()
        .filter(|a| {
            a.patient_name.to_lowercase().contains(&needle)
                || a.doctor_name.to_lowercase().contains(&needle)
        })
        .collect()
}

// ==============================================================================
// ERROR TYPES
// ==============================================================================

#[derive(Debug, Clone, thiserror::Error)]
pub enum DashboardError {
    #[error("Appointment not found")]
    NotFound,

    #[error("Only pending appointments can be {0}")]
    NotPending(String),

    #[error("Appointment store error: {0}")]
    StoreError(String),
}
