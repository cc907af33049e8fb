// libs/oracle-cell/src/services/gemini.rs
use reqwest::{header, Client};
use serde_json::Value;
use tracing::{debug, error};

use shared_config::AppConfig;

use crate::models::OracleError;

/// Thin client for the Gemini `generateContent` REST endpoint. Callers
/// supply the full request body (contents plus generation config) and get
/// back the first candidate's text part.
pub struct GeminiClient {
    http_client: Client,
    api_key: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            http_client: Client::new(),
            api_key: config.gemini_api_key.clone(),
            base_url: config.gemini_base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty() && !self.base_url.is_empty()
    }

    pub async fn generate(&self, model: &str, body: Value) -> Result<String, OracleError> {
        if !self.is_configured() {
            return Err(OracleError::NotConfigured);
        }

        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, model
        );
        debug!("Calling Gemini model {}", model);

        let response = self
            .http_client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .header(header::CONTENT_TYPE, "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| OracleError::ExternalService(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            error!("Gemini API error {}: {}", status, error_text);
            return Err(OracleError::ExternalService(format!(
                "Gemini API returned {}",
                status
            )));
        }

        let payload: Value = response
            .json()
            .await
            .map_err(|e| OracleError::ExternalService(e.to_string()))?;

        payload["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .map(|text| text.to_string())
            .ok_or_else(|| {
                OracleError::SchemaMismatch("response has no candidate text".to_string())
            })
    }
}
