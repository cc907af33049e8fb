// libs/oracle-cell/src/services/lab.rs
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde_json::{json, Value};
use tracing::{info, warn};

use shared_config::AppConfig;

use crate::models::{FindingStatus, LabAnalysis, OracleError};
use crate::services::gemini::GeminiClient;

const LAB_MODEL: &str = "gemini-2.5-flash";

/// Interprets lab results supplied as text, an image, or both. The image
/// travels as inline base64 JPEG; any data-URL prefix is stripped first.
pub struct LabOracle {
    client: GeminiClient,
}

impl LabOracle {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: GeminiClient::new(config),
        }
    }

    pub async fn interpret(
        &self,
        text: &str,
        image_base64: Option<&str>,
    ) -> Result<LabAnalysis, OracleError> {
        let text = text.trim();
        let image = match image_base64 {
            Some(raw) => Some(strip_data_url(raw)?),
            None => None,
        };
        if text.is_empty() && image.is_none() {
            return Err(OracleError::EmptyInput);
        }

        let prompt = format!(
            "Aşağıdaki tahlil sonuçlarını (metin ve/veya görsel) tıbbi standartlara \
             göre analiz et: \"{}\".\n\n\
             Lütfen bu değerleri incele:\n\
             1. Genel bir özet yap (Hasta sağlıklı mı, dikkat çeken bir şey var mı?).\n\
             2. Tespit edilen her bir değeri (Parametre) tek tek listele. Değerin \
             Normal, Yüksek, Düşük veya Kritik olup olmadığını belirle.\n\
             3. Beslenme veya yaşam tarzı tavsiyesi ver.\n\n\
             Yanıtı sadece Türkçe olarak ve JSON formatında ver.",
            text,
        );

        let mut parts = vec![json!({ "text": prompt })];
        if let Some(data) = image {
            parts.push(json!({
                "inlineData": { "mimeType": "image/jpeg", "data": data }
            }));
        }

        let body = json!({
            "contents": [{ "parts": parts }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": lab_response_schema(),
            }
        });

        let reply = self.client.generate(LAB_MODEL, body).await?;

        let analysis: LabAnalysis = serde_json::from_str(&reply).map_err(|e| {
            warn!("Lab reply failed schema validation: {}", e);
            OracleError::SchemaMismatch(e.to_string())
        })?;

        info!("Lab analysis produced {} findings", analysis.findings.len());
        Ok(analysis)
    }
}

/// Accepts `data:image/jpeg;base64,<payload>` or a bare payload, and
/// verifies the payload actually decodes.
fn strip_data_url(raw: &str) -> Result<String, OracleError> {
    let payload = match raw.split_once(',') {
        Some((_, rest)) => rest,
        None => raw,
    };
    BASE64
        .decode(payload)
        .map_err(|e| OracleError::InvalidImage(e.to_string()))?;
    Ok(payload.to_string())
}

fn lab_response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "summary": { "type": "STRING", "description": "Genel sağlık durumu özeti." },
            "findings": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "parameterName": { "type": "STRING", "description": "Örn: Hemoglobin, Demir, WBC" },
                        "value": { "type": "STRING", "description": "Örn: 14.5 g/dL" },
                        "status": { "type": "STRING", "enum": FindingStatus::LABELS },
                        "interpretation": { "type": "STRING", "description": "Bu değerin anlamı." }
                    },
                    "required": ["parameterName", "value", "status", "interpretation"]
                }
            },
            "dietaryAdvice": { "type": "STRING", "description": "Beslenme ve yaşam tarzı önerileri." }
        },
        "required": ["summary", "findings", "dietaryAdvice"]
    })
}
