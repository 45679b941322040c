//! Generative-AI task layer for VoiceScribe.
//!
//! This module provides:
//! * [`AiEngine`] — async trait exposing the four AI operations
//!   (transcribe, translate, transliterate, summarize).
//! * [`GeminiEngine`] — Generative Language REST API backend.
//! * Prompt builders for each operation ([`prompt`]).
//! * [`AiTaskError`] — error variants for AI operations.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use voicescribe::ai::{AiEngine, GeminiEngine};
//! use voicescribe::config::AppConfig;
//! use voicescribe::source::Source;
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = AppConfig::default();
//!     let engine = GeminiEngine::from_config(&config.ai);
//!
//!     let source = Source::from_file("meeting.mp3").unwrap();
//!     let payload = source.encode().await.unwrap();
//!
//!     let transcript = engine.transcribe(&payload).await.unwrap();
//!     let translation = engine.translate(&transcript, "Hindi").await.unwrap();
//!     println!("{translation}");
//! }
//! ```

pub mod engine;
pub mod gemini;
pub mod prompt;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use engine::{AiEngine, AiTaskError};
pub use gemini::GeminiEngine;

// test-only re-export so the pipeline test module can import MockAiEngine
// without `use voicescribe::ai::engine::MockAiEngine`.
#[cfg(test)]
pub use engine::MockAiEngine;
