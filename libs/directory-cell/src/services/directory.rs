// libs/directory-cell/src/services/directory.rs
use reqwest::Method;
use serde_json::{json, Value};
use tracing::{debug, info, warn};

use shared_config::AppConfig;
use shared_database::supabase::SupabaseClient;
use shared_models::Department;

use crate::models::{daily_slot_template, seed_roster, DirectoryError, Doctor, TimeSlot};

pub struct DirectoryService {
    supabase: SupabaseClient,
}

impl DirectoryService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            supabase: SupabaseClient::new(config),
        }
    }

    /// List doctors, optionally filtered by department. Seeds the default
    /// roster when the backing table is empty, matching the legacy behavior
    /// of the hosted store.
    pub async fn list_doctors(
        &self,
        department: Option<Department>,
    ) -> Result<Vec<Doctor>, DirectoryError> {
        let all = self.fetch_or_seed().await?;

        Ok(match department {
            Some(dept) => all.into_iter().filter(|d| d.department == dept).collect(),
            None => all,
        })
    }

    /// The fixed daily slot template; not date-specific in this design.
    pub fn time_slots(&self) -> Vec<TimeSlot> {
        daily_slot_template()
    }

    async fn fetch_or_seed(&self) -> Result<Vec<Doctor>, DirectoryError> {
        debug!("Fetching doctor roster");

        let result: Vec<Value> = self
            .supabase
            .request(Method::GET, "/rest/v1/doctors?select=*", None)
            .await
            .map_err(|e| DirectoryError::DatabaseError(e.to_string()))?;

        if !result.is_empty() {
            return parse_doctors(result);
        }

        info!("Doctor roster empty, seeding default entries");
        self.seed_defaults().await
    }

    async fn seed_defaults(&self) -> Result<Vec<Doctor>, DirectoryError> {
        let roster = seed_roster();

        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            "Prefer",
            reqwest::header::HeaderValue::from_static("return=representation"),
        );

        let result: Vec<Value> = self
            .supabase
            .request_with_headers(
                Method::POST,
                "/rest/v1/doctors",
                Some(json!(roster)),
                Some(headers),
            )
            .await
            .map_err(|e| {
                warn!("Seeding doctor roster failed: {}", e);
                DirectoryError::DatabaseError(e.to_string())
            })?;

        parse_doctors(result)
    }
}

fn parse_doctors(rows: Vec<Value>) -> Result<Vec<Doctor>, DirectoryError> {
    rows.into_iter()
        .map(serde_json::from_value)
        .collect::<Result<Vec<Doctor>, _>>()
        .map_err(|e| DirectoryError::DatabaseError(format!("Failed to parse doctors: {}", e)))
}
