// libs/identity-cell/src/services/identity.rs
use reqwest::Method;
use serde_json::{json, Value};
use tracing::{debug, info};

use shared_config::AppConfig;
use shared_database::supabase::SupabaseClient;

use crate::models::{IdentityError, Patient, RegisterPatientRequest};

// Demo admin credentials carried over from the legacy client. Not a
// security model; see the non-goals in DESIGN.md.
const ADMIN_USERNAME: &str = "admin";
const ADMIN_PASSWORD: &str = "1234";

pub struct IdentityService {
    supabase: SupabaseClient,
}

impl IdentityService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            supabase: SupabaseClient::new(config),
        }
    }

    /// Register a new patient. A national identifier already present in the
    /// store always fails with `DuplicateIdentity`, never a generic error.
    pub async fn register(
        &self,
        request: RegisterPatientRequest,
    ) -> Result<Patient, IdentityError> {
        debug!("Registering patient with tc ending {}", tail(&request.tc));

        if request.name.trim().is_empty() {
            return Err(IdentityError::ValidationError("Name must not be empty".to_string()));
        }

        let check_path = format!("/rest/v1/patients?tc=eq.{}&select=id", request.tc);
        let existing: Vec<Value> = self
            .supabase
            .request(Method::GET, &check_path, None)
            .await
            .map_err(|e| IdentityError::DatabaseError(e.to_string()))?;

        if !existing.is_empty() {
            return Err(IdentityError::DuplicateIdentity);
        }

        let patient_data = json!({
            "name": request.name,
            "tc": request.tc,
            "email": request.email,
            "password": request.password,
            "age": request.age,
            "image": request.image,
            "blood_type": request.blood_type,
            "weight": request.weight,
            "height": request.height,
            "conditions": request.conditions,
        });

        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            "Prefer",
            reqwest::header::HeaderValue::from_static("return=representation"),
        );

        let result: Vec<Value> = self
            .supabase
            .request_with_headers(
                Method::POST,
                "/rest/v1/patients",
                Some(patient_data),
                Some(headers),
            )
            .await
            .map_err(|e| IdentityError::DatabaseError(e.to_string()))?;

        let row = result
            .into_iter()
            .next()
            .ok_or_else(|| IdentityError::DatabaseError("Failed to create patient".to_string()))?;

        let patient: Patient = serde_json::from_value(row)
            .map_err(|e| IdentityError::DatabaseError(format!("Failed to parse patient: {}", e)))?;

        info!("Patient {} registered", patient.id);
        Ok(patient)
    }

    /// Shared-secret login: equality match performed by the store query.
    pub async fn login(&self, tc: &str, password: &str) -> Result<Patient, IdentityError> {
        debug!("Login attempt for tc ending {}", tail(tc));

        let path = format!(
            "/rest/v1/patients?tc=eq.{}&password=eq.{}&select=*",
            tc, password
        );
        let result: Vec<Value> = self
            .supabase
            .request(Method::GET, &path, None)
            .await
            .map_err(|e| IdentityError::DatabaseError(e.to_string()))?;

        let row = result
            .into_iter()
            .next()
            .ok_or(IdentityError::InvalidCredentials)?;

        serde_json::from_value(row)
            .map_err(|e| IdentityError::DatabaseError(format!("Failed to parse patient: {}", e)))
    }

    pub fn admin_login(&self, username: &str, password: &str) -> Result<(), IdentityError> {
        if username == ADMIN_USERNAME && password == ADMIN_PASSWORD {
            Ok(())
        } else {
            Err(IdentityError::InvalidCredentials)
        }
    }

    /// Fetch a patient record (profile view, medical history included).
    pub async fn get_patient(&self, tc: &str) -> Result<Patient, IdentityError> {
        let path = format!("/rest/v1/patients?tc=eq.{}&select=*", tc);
        let result: Vec<Value> = self
            .supabase
            .request(Method::GET, &path, None)
            .await
            .map_err(|e| IdentityError::DatabaseError(e.to_string()))?;

        let row = result.into_iter().next().ok_or(IdentityError::NotFound)?;

        serde_json::from_value(row)
            .map_err(|e| IdentityError::DatabaseError(format!("Failed to parse patient: {}", e)))
    }
}

/// Last two characters of the identifier, for log lines. Counted in chars,
/// not bytes; the HTTP layer accepts arbitrary strings here.
fn tail(tc: &str) -> String {
    let skip = tc.chars().count().saturating_sub(2);
    tc.chars().skip(skip).collect()
}
