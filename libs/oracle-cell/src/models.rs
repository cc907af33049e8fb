// libs/oracle-cell/src/models.rs
use serde::{Deserialize, Serialize};

use shared_models::Department;

// ==============================================================================
// TRIAGE MODELS
// ==============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct TriageRequest {
    pub symptoms: String,
}

/// Department suggestion produced by the triage oracle. `department`
/// deserializes from the enumerated wire labels, so an off-list suggestion
/// fails schema validation instead of leaking through.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TriageSuggestion {
    pub department: Department,
    pub reasoning: String,
}

// ==============================================================================
// LAB INTERPRETATION MODELS
// ==============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct LabRequest {
    #[serde(default)]
    pub text: String,
    /// Raw base64 JPEG, with or without a data-URL prefix.
    #[serde(default)]
    pub image_base64: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum FindingStatus {
    #[serde(rename = "Normal")]
    Normal,
    #[serde(rename = "Yüksek")]
    High,
    #[serde(rename = "Düşük")]
    Low,
    #[serde(rename = "Kritik")]
    Critical,
}

impl FindingStatus {
    pub const LABELS: [&'static str; 4] = ["Normal", "Yüksek", "Düşük", "Kritik"];
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LabFinding {
    pub parameter_name: String,
    pub value: String,
    pub status: FindingStatus,
    pub interpretation: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LabAnalysis {
    pub summary: String,
    pub findings: Vec<LabFinding>,
    pub dietary_advice: String,
}

// ==============================================================================
// ERROR TYPES
// ==============================================================================

#[derive(Debug, thiserror::Error)]
pub enum OracleError {
    #[error("Input is empty")]
    EmptyInput,

    #[error("AI oracle is not configured")]
    NotConfigured,

    #[error("Image payload is not valid base64: {0}")]
    InvalidImage(String),

    #[error("AI call failed: {0}")]
    ExternalService(String),

    #[error("AI response did not match the expected schema: {0}")]
    SchemaMismatch(String),
}
