use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed set of clinic specialties. The wire labels match the columns the
/// hosted store was created with, so they stay in Turkish.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Department {
    #[serde(rename = "Kardiyoloji")]
    Cardiology,
    #[serde(rename = "Dahiliye")]
    InternalMedicine,
    #[serde(rename = "Ortopedi")]
    Orthopedics,
    #[serde(rename = "Çocuk Sağlığı")]
    Pediatrics,
    #[serde(rename = "Cildiye")]
    Dermatology,
    #[serde(rename = "Nöroloji")]
    Neurology,
    #[serde(rename = "Kulak Burun Boğaz")]
    Ent,
    #[serde(rename = "Genel Cerrahi")]
    GeneralSurgery,
}

impl Department {
    /// Fixed iteration order, used for zero-filled histogram rows.
    pub const ALL: [Department; 8] = [
        Department::Cardiology,
        Department::InternalMedicine,
        Department::Orthopedics,
        Department::Pediatrics,
        Department::Dermatology,
        Department::Neurology,
        Department::Ent,
        Department::GeneralSurgery,
    ];

    /// Triage falls back to internal medicine when the oracle is unsure.
    pub fn fallback() -> Self {
        Department::InternalMedicine
    }

    pub fn label(&self) -> &'static str {
        match self {
            Department::Cardiology => "Kardiyoloji",
            Department::InternalMedicine => "Dahiliye",
            Department::Orthopedics => "Ortopedi",
            Department::Pediatrics => "Çocuk Sağlığı",
            Department::Dermatology => "Cildiye",
            Department::Neurology => "Nöroloji",
            Department::Ent => "Kulak Burun Boğaz",
            Department::GeneralSurgery => "Genel Cerrahi",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Department::ALL.iter().copied().find(|d| d.label() == label)
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
