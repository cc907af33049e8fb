use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Who a session acts as. Stored alongside the session token instead of the
/// ambient role flags the legacy client kept in local storage.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Patient,
    Admin,
}

/// Identity fields the booking flow pre-fills for a signed-in patient.
/// These are locked for the lifetime of the booking session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PatientIdentity {
    pub name: String,
    pub tc: String,
    pub age: String,
}

/// Explicit session object: created once at login, passed by reference into
/// the routing layer, cleared on logout. Never read back from ambient state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSession {
    pub token: Uuid,
    pub role: Role,
    pub identity: Option<PatientIdentity>,
}

impl AuthSession {
    pub fn authenticated(role: Role, identity: PatientIdentity) -> Self {
        Self {
            token: Uuid::new_v4(),
            role,
            identity: Some(identity),
        }
    }

    pub fn admin() -> Self {
        Self {
            token: Uuid::new_v4(),
            role: Role::Admin,
            identity: None,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}
