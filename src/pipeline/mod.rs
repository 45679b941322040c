//! Pipeline orchestration module for VoiceScribe.
//!
//! This module wires the two-stage workflow — transcription, then the
//! concurrent translate/transliterate/summarize fan-out — and exposes the
//! shared state that the presentation layer reads.
//!
//! # Architecture
//!
//! ```text
//! ScribeCommand (mpsc)
//!        │
//!        ▼
//! ScribeOrchestrator::run()  ← async tokio task
//!        │
//!        ├─ AcceptSource   → encode → transcribe → fan-out (×3, concurrent)
//!        │
//!        └─ LanguageChanged → fan-out (translate + transliterate only)
//!
//! SharedState (Arc<Mutex<ScribeState>>) ←─── snapshot() read by the frontend
//! ```
//!
//! # Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use tokio::sync::mpsc;
//! use voicescribe::ai::{AiEngine, GeminiEngine};
//! use voicescribe::config::AppConfig;
//! use voicescribe::pipeline::{new_shared_state, ScribeCommand, ScribeOrchestrator};
//! use voicescribe::source::Source;
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = AppConfig::default();
//!     let state = new_shared_state(&config.default_language);
//!     let ai: Arc<dyn AiEngine> = Arc::new(GeminiEngine::from_config(&config.ai));
//!
//!     let orchestrator = ScribeOrchestrator::new(state.clone(), ai);
//!     let (command_tx, command_rx) = mpsc::channel(16);
//!     tokio::spawn(orchestrator.run(command_rx));
//!
//!     let source = Source::from_file("meeting.mp3").unwrap();
//!     command_tx.send(ScribeCommand::AcceptSource(source)).await.unwrap();
//!
//!     // ...poll state.lock().unwrap().snapshot() until the run settles
//! }
//! ```

pub mod runner;
pub mod state;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use runner::{ScribeCommand, ScribeOrchestrator};
pub use state::{
    new_shared_state, Notice, RunPhase, ScribeSnapshot, ScribeState, SharedState, SourceId,
};
