// libs/identity-cell/src/models.rs
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BodyPart {
    Head,
    Neck,
    Chest,
    Heart,
    Stomach,
    LeftArm,
    RightArm,
    LeftLeg,
    RightLeg,
    General,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ConditionStatus {
    Chronic,
    Active,
    Healed,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MedicalHistory {
    pub condition: String,
    pub diagnosed_date: String,
    pub status: ConditionStatus,
    pub notes: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_part: Option<BodyPart>,
}

/// Patient account row. Field names match the hosted store's columns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Patient {
    pub id: Uuid,
    pub name: String,
    pub tc: String,
    #[serde(default)]
    pub email: String,
    #[serde(skip_serializing)]
    pub password: Option<String>,
    pub age: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub blood_type: String,
    #[serde(default)]
    pub weight: String,
    #[serde(default)]
    pub height: String,
    #[serde(default)]
    pub conditions: Vec<MedicalHistory>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterPatientRequest {
    pub name: String,
    pub tc: String,
    pub email: String,
    pub password: String,
    pub age: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub blood_type: String,
    #[serde(default)]
    pub weight: String,
    #[serde(default)]
    pub height: String,
    #[serde(default)]
    pub conditions: Vec<MedicalHistory>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub tc: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AdminLoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum IdentityError {
    /// Registration against an already-used national identifier. Kept
    /// distinct from generic failure so callers can surface the right
    /// message.
    #[error("A patient with this national identifier is already registered")]
    DuplicateIdentity,

    #[error("National identifier or password is incorrect")]
    InvalidCredentials,

    #[error("Patient not found")]
    NotFound,

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}
