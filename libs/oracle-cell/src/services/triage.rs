// libs/oracle-cell/src/services/triage.rs
use serde_json::json;
use tracing::{info, warn};

use shared_config::AppConfig;
use shared_models::Department;

use crate::models::{OracleError, TriageSuggestion};
use crate::services::gemini::GeminiClient;

const TRIAGE_MODEL: &str = "gemini-3-flash-preview";

/// Maps free-text symptoms to one of the enumerated departments. The model
/// is constrained to the department labels by a response schema and
/// instructed to fall back to Dahiliye when unsure; the reply is validated
/// locally on top of that.
pub struct TriageOracle {
    client: GeminiClient,
}

impl TriageOracle {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: GeminiClient::new(config),
        }
    }

    pub async fn suggest(&self, symptoms: &str) -> Result<TriageSuggestion, OracleError> {
        let symptoms = symptoms.trim();
        if symptoms.is_empty() {
            return Err(OracleError::EmptyInput);
        }

        let labels: Vec<&str> = Department::ALL.iter().map(|d| d.label()).collect();
        let prompt = format!(
            "Hasta şu semptomları belirtiyor: \"{}\". \
             Aşağıdaki departman listesinden bu hasta için EN UYGUN olanı seç. \
             Eğer emin değilsen '{}' seç.\n\n\
             Departman Listesi: {}\n\n\
             Yanıtı JSON formatında ver.",
            symptoms,
            Department::fallback().label(),
            labels.join(", "),
        );

        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": {
                    "type": "OBJECT",
                    "properties": {
                        "department": { "type": "STRING", "enum": labels },
                        "reasoning": {
                            "type": "STRING",
                            "description": "Short explanation in Turkish why this department was chosen."
                        }
                    },
                    "required": ["department", "reasoning"]
                }
            }
        });

        let text = self.client.generate(TRIAGE_MODEL, body).await?;

        let suggestion: TriageSuggestion = serde_json::from_str(&text).map_err(|e| {
            warn!("Triage reply failed schema validation: {}", e);
            OracleError::SchemaMismatch(e.to_string())
        })?;

        info!("Triage suggested department {}", suggestion.department);
        Ok(suggestion)
    }
}
