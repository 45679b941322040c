//! Core `AiEngine` trait and error taxonomy.
//!
//! # Overview
//!
//! [`AiEngine`] is the uniform interface the pipeline uses for all four AI
//! operations.  It is object-safe and `Send + Sync` so it can be held behind
//! an `Arc<dyn AiEngine>` and shared across spawned tasks.
//!
//! Every call either fully succeeds or fully fails with [`AiTaskError`];
//! there are no partial or streamed results, and no retries at this layer.
//!
//! [`MockAiEngine`] (available under `#[cfg(test)]`) is a configurable stub
//! with call counters and artificial delays — used to unit-test the pipeline
//! without a network backend.

use async_trait::async_trait;
use thiserror::Error;

use crate::source::EncodedPayload;

// ---------------------------------------------------------------------------
// AiTaskError
// ---------------------------------------------------------------------------

/// Errors that can arise from a single AI operation.
#[derive(Debug, Clone, Error)]
pub enum AiTaskError {
    /// The request did not complete within the configured timeout.
    #[error("AI request timed out")]
    Timeout,

    /// Transport failure or an unsuccessful response from the service.
    #[error("AI service error: {0}")]
    Service(String),

    /// The response arrived but could not be interpreted (malformed JSON,
    /// missing or empty text).
    #[error("invalid AI response: {0}")]
    Validation(String),
}

impl From<reqwest::Error> for AiTaskError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            AiTaskError::Timeout
        } else {
            AiTaskError::Service(e.to_string())
        }
    }
}

// ---------------------------------------------------------------------------
// AiEngine trait
// ---------------------------------------------------------------------------

/// Object-safe, thread-safe interface over the four AI operations.
///
/// Implementations must be `Send + Sync` so they can be held behind an
/// `Arc<dyn AiEngine>` and called from any task.
///
/// # Contract
///
/// - Calls are side-effect-free from the caller's perspective and idempotent:
///   repeating a call with the same arguments yields a structurally
///   equivalent result (content may vary — the service is non-deterministic).
/// - Retry policy, if any, belongs to the caller; implementations never retry.
#[async_trait]
pub trait AiEngine: Send + Sync {
    /// Generate a transcript from an encoded audio/video payload.
    async fn transcribe(&self, payload: &EncodedPayload) -> Result<String, AiTaskError>;

    /// Translate `text` into `target_language` (a catalog language name).
    async fn translate(&self, text: &str, target_language: &str) -> Result<String, AiTaskError>;

    /// Transliterate `text` into `target_script` (e.g. `"Devanagari"`).
    async fn transliterate(&self, text: &str, target_script: &str)
        -> Result<String, AiTaskError>;

    /// Produce a concise summary of `text`.
    async fn summarize(&self, text: &str) -> Result<String, AiTaskError>;
}

// Compile-time assertion: Box<dyn AiEngine> must be constructible.
const _: fn() = || {
    fn _assert_object_safe(_: Box<dyn AiEngine>) {}
};

// ---------------------------------------------------------------------------
// MockAiEngine  (test-only)
// ---------------------------------------------------------------------------

/// A test double with configurable per-operation outcomes, artificial delays,
/// and atomic call counters.
///
/// Successful transcription echoes the decoded payload bytes as UTF-8, and
/// the text operations echo their parameters
/// (`translate → "[<language>] <text>"`, `transliterate → "[<script>] <text>"`,
/// `summarize → "summary: <text>"`) — so tests can tell concurrent runs apart
/// and assert which arguments each call was issued with.
#[cfg(test)]
pub struct MockAiEngine {
    transcribe_error: Option<AiTaskError>,
    fail_translate: bool,
    fail_transliterate: bool,
    fail_summarize: bool,
    transcribe_delay: std::time::Duration,
    translate_delay: std::time::Duration,
    transliterate_delay: std::time::Duration,
    summarize_delay: std::time::Duration,
    n_transcribe: std::sync::atomic::AtomicUsize,
    n_translate: std::sync::atomic::AtomicUsize,
    n_transliterate: std::sync::atomic::AtomicUsize,
    n_summarize: std::sync::atomic::AtomicUsize,
}

#[cfg(test)]
impl MockAiEngine {
    /// All four operations succeed; transcription returns the payload bytes
    /// decoded as UTF-8.
    pub fn ok() -> Self {
        Self {
            transcribe_error: None,
            fail_translate: false,
            fail_transliterate: false,
            fail_summarize: false,
            transcribe_delay: std::time::Duration::ZERO,
            translate_delay: std::time::Duration::ZERO,
            transliterate_delay: std::time::Duration::ZERO,
            summarize_delay: std::time::Duration::ZERO,
            n_transcribe: std::sync::atomic::AtomicUsize::new(0),
            n_translate: std::sync::atomic::AtomicUsize::new(0),
            n_transliterate: std::sync::atomic::AtomicUsize::new(0),
            n_summarize: std::sync::atomic::AtomicUsize::new(0),
        }
    }

    /// Transcription fails with the given error.
    pub fn failing_transcribe(error: AiTaskError) -> Self {
        let mut mock = Self::ok();
        mock.transcribe_error = Some(error);
        mock
    }

    pub fn fail_translate(mut self) -> Self {
        self.fail_translate = true;
        self
    }

    pub fn fail_transliterate(mut self) -> Self {
        self.fail_transliterate = true;
        self
    }

    pub fn fail_summarize(mut self) -> Self {
        self.fail_summarize = true;
        self
    }

    pub fn with_transcribe_delay(mut self, delay: std::time::Duration) -> Self {
        self.transcribe_delay = delay;
        self
    }

    pub fn with_translate_delay(mut self, delay: std::time::Duration) -> Self {
        self.translate_delay = delay;
        self
    }

    pub fn with_transliterate_delay(mut self, delay: std::time::Duration) -> Self {
        self.transliterate_delay = delay;
        self
    }

    pub fn with_summarize_delay(mut self, delay: std::time::Duration) -> Self {
        self.summarize_delay = delay;
        self
    }

    pub fn transcribe_calls(&self) -> usize {
        self.n_transcribe.load(std::sync::atomic::Ordering::SeqCst)
    }

    pub fn translate_calls(&self) -> usize {
        self.n_translate.load(std::sync::atomic::Ordering::SeqCst)
    }

    pub fn transliterate_calls(&self) -> usize {
        self.n_transliterate.load(std::sync::atomic::Ordering::SeqCst)
    }

    pub fn summarize_calls(&self) -> usize {
        self.n_summarize.load(std::sync::atomic::Ordering::SeqCst)
    }
}

#[cfg(test)]
#[async_trait]
impl AiEngine for MockAiEngine {
    async fn transcribe(&self, payload: &EncodedPayload) -> Result<String, AiTaskError> {
        use base64::{engine::general_purpose::STANDARD, Engine as _};

        self.n_transcribe
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        tokio::time::sleep(self.transcribe_delay).await;
        if let Some(error) = &self.transcribe_error {
            return Err(error.clone());
        }
        let bytes = STANDARD.decode(&payload.data).unwrap_or_default();
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    async fn translate(&self, text: &str, target_language: &str) -> Result<String, AiTaskError> {
        self.n_translate
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        tokio::time::sleep(self.translate_delay).await;
        if self.fail_translate {
            return Err(AiTaskError::Service("mock translate failure".into()));
        }
        Ok(format!("[{target_language}] {text}"))
    }

    async fn transliterate(
        &self,
        text: &str,
        target_script: &str,
    ) -> Result<String, AiTaskError> {
        self.n_transliterate
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        tokio::time::sleep(self.transliterate_delay).await;
        if self.fail_transliterate {
            return Err(AiTaskError::Service("mock transliterate failure".into()));
        }
        Ok(format!("[{target_script}] {text}"))
    }

    async fn summarize(&self, text: &str) -> Result<String, AiTaskError> {
        self.n_summarize
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        tokio::time::sleep(self.summarize_delay).await;
        if self.fail_summarize {
            return Err(AiTaskError::Service("mock summarize failure".into()));
        }
        Ok(format!("summary: {text}"))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn payload() -> EncodedPayload {
        EncodedPayload {
            mime: "audio/wav".into(),
            data: "YWJj".into(), // base64("abc")
        }
    }

    #[tokio::test]
    async fn mock_ok_echoes_decoded_payload() {
        let engine = MockAiEngine::ok();
        assert_eq!(engine.transcribe(&payload()).await.unwrap(), "abc");
        assert_eq!(engine.transcribe_calls(), 1);
    }

    #[tokio::test]
    async fn mock_failing_transcribe_returns_error() {
        let engine = MockAiEngine::failing_transcribe(AiTaskError::Timeout);
        let err = engine.transcribe(&payload()).await.unwrap_err();
        assert!(matches!(err, AiTaskError::Timeout));
    }

    #[tokio::test]
    async fn mock_text_tasks_echo_their_parameters() {
        let engine = MockAiEngine::ok();
        assert_eq!(
            engine.translate("Hello", "Hindi").await.unwrap(),
            "[Hindi] Hello"
        );
        assert_eq!(
            engine.transliterate("Hello", "Devanagari").await.unwrap(),
            "[Devanagari] Hello"
        );
        assert_eq!(engine.summarize("Hello").await.unwrap(), "summary: Hello");
        assert_eq!(engine.translate_calls(), 1);
        assert_eq!(engine.transliterate_calls(), 1);
        assert_eq!(engine.summarize_calls(), 1);
    }

    #[tokio::test]
    async fn mock_fail_flags_fail_only_their_operation() {
        let engine = MockAiEngine::ok().fail_translate();
        assert!(engine.translate("a", "Hindi").await.is_err());
        assert!(engine.transliterate("a", "Devanagari").await.is_ok());
        assert!(engine.summarize("a").await.is_ok());
    }

    #[test]
    fn error_display_strings() {
        assert_eq!(AiTaskError::Timeout.to_string(), "AI request timed out");
        assert!(AiTaskError::Service("boom".into())
            .to_string()
            .contains("boom"));
    }

    /// If this test compiles, the trait is object-safe.
    #[test]
    fn box_dyn_ai_engine_compiles() {
        let _: Box<dyn AiEngine> = Box::new(MockAiEngine::ok());
    }
}
