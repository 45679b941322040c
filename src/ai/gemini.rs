//! `GeminiEngine` — Generative Language REST API backend.
//!
//! Calls the `generateContent` endpoint of a Gemini-compatible service.  All
//! connection details (`base_url`, `api_key`, `model`, `timeout_secs`) come
//! from [`AiConfig`]; nothing is hardcoded, so the engine also works against
//! local proxies speaking the same wire format.

use async_trait::async_trait;

use crate::ai::engine::{AiEngine, AiTaskError};
use crate::ai::prompt;
use crate::config::AiConfig;
use crate::source::EncodedPayload;

// ---------------------------------------------------------------------------
// GeminiEngine
// ---------------------------------------------------------------------------

/// Production [`AiEngine`] speaking the Generative Language `generateContent`
/// wire format.
///
/// The HTTP client carries the per-request timeout from
/// `AiConfig::timeout_secs`, so a hung service call resolves as
/// [`AiTaskError::Timeout`] instead of blocking a pipeline run forever.
pub struct GeminiEngine {
    client: reqwest::Client,
    config: AiConfig,
}

impl GeminiEngine {
    /// Build a `GeminiEngine` from application config.
    ///
    /// A default (no-timeout) client is used as a last-resort fallback if the
    /// builder fails (should never happen in practice).
    pub fn from_config(config: &AiConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            config: config.clone(),
        }
    }

    fn request_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url, self.config.model
        )
    }

    /// POST one `generateContent` request with the given `parts` array and
    /// return the first candidate's text.
    ///
    /// The `x-goog-api-key` header is attached **only** when
    /// `config.api_key` is `Some(key)` and `key` is non-empty — safe for
    /// local proxies that require no authentication.
    async fn generate(&self, parts: serde_json::Value) -> Result<String, AiTaskError> {
        let body = serde_json::json!({
            "contents": [ { "parts": parts } ],
            "generationConfig": { "temperature": self.config.temperature }
        });

        let mut req = self.client.post(self.request_url()).json(&body);

        let key = self.config.api_key.as_deref().unwrap_or("");
        if !key.is_empty() {
            req = req.header("x-goog-api-key", key);
        }

        let response = req.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(AiTaskError::Service(format!(
                "service returned HTTP {status}"
            )));
        }

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| AiTaskError::Validation(e.to_string()))?;

        let text = json["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .ok_or_else(|| AiTaskError::Validation("response contained no text".into()))?
            .trim()
            .to_string();

        if text.is_empty() {
            return Err(AiTaskError::Validation("response text was empty".into()));
        }

        Ok(text)
    }
}

#[async_trait]
impl AiEngine for GeminiEngine {
    /// Transcribe an encoded media payload.
    ///
    /// The payload travels as an `inline_data` part (MIME type + base64
    /// bytes) alongside the transcription instruction.
    async fn transcribe(&self, payload: &EncodedPayload) -> Result<String, AiTaskError> {
        let parts = serde_json::json!([
            { "text": prompt::TRANSCRIBE_INSTRUCTION },
            { "inline_data": { "mime_type": payload.mime, "data": payload.data } }
        ]);
        self.generate(parts).await
    }

    async fn translate(&self, text: &str, target_language: &str) -> Result<String, AiTaskError> {
        let parts = serde_json::json!([ { "text": prompt::translate(text, target_language) } ]);
        self.generate(parts).await
    }

    async fn transliterate(
        &self,
        text: &str,
        target_script: &str,
    ) -> Result<String, AiTaskError> {
        let parts = serde_json::json!([ { "text": prompt::transliterate(text, target_script) } ]);
        self.generate(parts).await
    }

    async fn summarize(&self, text: &str) -> Result<String, AiTaskError> {
        let parts = serde_json::json!([ { "text": prompt::summarize(text) } ]);
        self.generate(parts).await
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn make_config(api_key: Option<&str>) -> AiConfig {
        AiConfig {
            base_url: "http://localhost:8787".into(),
            api_key: api_key.map(|s| s.to_string()),
            model: "gemini-2.0-flash".into(),
            temperature: 0.2,
            timeout_secs: 5,
        }
    }

    #[test]
    fn from_config_builds_without_panic() {
        let _engine = GeminiEngine::from_config(&make_config(None));
    }

    #[test]
    fn from_config_accepts_empty_api_key() {
        let _engine = GeminiEngine::from_config(&make_config(Some("")));
    }

    #[test]
    fn request_url_joins_base_and_model() {
        let engine = GeminiEngine::from_config(&make_config(None));
        assert_eq!(
            engine.request_url(),
            "http://localhost:8787/v1beta/models/gemini-2.0-flash:generateContent"
        );
    }

    /// Verify that `GeminiEngine` is object-safe (usable as `dyn AiEngine`).
    #[test]
    fn engine_is_object_safe() {
        let engine: Box<dyn AiEngine> = Box::new(GeminiEngine::from_config(&make_config(None)));
        drop(engine);
    }
}
