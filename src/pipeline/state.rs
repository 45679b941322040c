//! Run state machine and the derived state store.
//!
//! [`RunPhase`] tracks where the current pipeline run is in the two-stage
//! workflow.  [`ScribeState`] is the single source of truth for everything
//! the presentation layer needs: the four result fields, the two loading
//! flags, the selected language, and the last failure notice.
//!
//! The orchestrator is the only writer; the presentation layer reads
//! immutable [`ScribeSnapshot`]s via [`ScribeState::snapshot`].
//!
//! [`SharedState`] is a type alias for `Arc<Mutex<ScribeState>>` — cheap to
//! clone and safe to share across tasks.

use std::sync::{Arc, Mutex};

use crate::language;

// ---------------------------------------------------------------------------
// SourceId
// ---------------------------------------------------------------------------

/// Identity token of an accepted source, assigned monotonically by the
/// orchestrator.  `0` means no source has been accepted yet.
///
/// Every state write belonging to a run carries the run's `SourceId` and is
/// dropped when it no longer matches the current one — this is how results
/// from superseded runs are discarded.
pub type SourceId = u64;

// ---------------------------------------------------------------------------
// RunPhase
// ---------------------------------------------------------------------------

/// Phase of the current pipeline run.
///
/// The state machine transitions are:
///
/// ```text
/// Idle ──source accepted──▶ Transcribing
///                           ──transcription ok───▶ AwaitingDownstream
///                           ──transcription err──▶ TranscribeFailed (terminal)
/// AwaitingDownstream ──all three settled, all ok───▶ DownstreamComplete
///                    ──all three settled, any err─▶ DownstreamPartialFailure
/// DownstreamComplete / DownstreamPartialFailure
///                    ──language changed──▶ AwaitingDownstream (fan-out only)
/// any phase ──new source accepted──▶ Transcribing (prior run superseded)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    /// No source has been accepted yet.
    Idle,

    /// Stage 1 — the transcription call is in flight.
    Transcribing,

    /// Stage 1 failed; no downstream call was or will be issued.  Terminal
    /// for this run — the user must submit a new source.
    TranscribeFailed,

    /// Stage 2 — the transcript is present and the three downstream calls
    /// are in flight.
    AwaitingDownstream,

    /// All three downstream calls succeeded.
    DownstreamComplete,

    /// All three downstream calls settled and at least one failed.
    /// Succeeded fields stay populated; failed fields stay absent.
    DownstreamPartialFailure,
}

impl RunPhase {
    /// Returns `true` while AI work is in flight for the current run.
    pub fn is_busy(&self) -> bool {
        matches!(self, RunPhase::Transcribing | RunPhase::AwaitingDownstream)
    }

    /// A short human-readable label suitable for status output.
    pub fn label(&self) -> &'static str {
        match self {
            RunPhase::Idle => "Idle",
            RunPhase::Transcribing => "Transcribing",
            RunPhase::TranscribeFailed => "Transcription failed",
            RunPhase::AwaitingDownstream => "Processing",
            RunPhase::DownstreamComplete => "Done",
            RunPhase::DownstreamPartialFailure => "Done (partial)",
        }
    }
}

impl Default for RunPhase {
    fn default() -> Self {
        RunPhase::Idle
    }
}

// ---------------------------------------------------------------------------
// Notice
// ---------------------------------------------------------------------------

/// Non-blocking, user-visible failure notice (title + description).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub description: String,
}

impl Notice {
    /// Stage-1 failure notice.
    pub fn transcription_failed() -> Self {
        Self {
            title: "Transcription Failed".into(),
            description: "Could not generate transcript from the provided file.".into(),
        }
    }

    /// Consolidated Stage-2 failure notice (partial or full).
    pub fn processing_error() -> Self {
        Self {
            title: "Processing Error".into(),
            description: "One or more AI tasks failed after transcription.".into(),
        }
    }
}

// ---------------------------------------------------------------------------
// ScribeState
// ---------------------------------------------------------------------------

/// Shared pipeline state — the single source of truth for the presentation
/// layer.
///
/// Held behind [`SharedState`] (`Arc<Mutex<ScribeState>>`).  Mutated only by
/// the orchestrator's transition actions, each a single short critical
/// section; never hold the lock across an `.await` point.
#[derive(Debug)]
pub struct ScribeState {
    /// Phase of the current run.
    pub phase: RunPhase,

    /// Identity token of the current source (`0` before the first one).
    pub source_id: SourceId,

    /// Selected target language name.  The script is derived from this on
    /// every read — see [`ScribeState::script`].
    pub language: String,

    /// Transcript of the current source, once Stage 1 succeeds.
    pub transcript: Option<String>,

    /// Translation into the selected language.
    pub translation: Option<String>,

    /// Transliteration into the selected language's script.
    pub transliteration: Option<String>,

    /// Summary of the transcript.
    pub summary: Option<String>,

    /// `true` while the transcription call (Stage 1) is in flight.
    pub transcribing: bool,

    /// `true` while any downstream call (Stage 2) has not yet settled.
    pub post_processing: bool,

    /// Last failure notice, cleared when a new source is accepted.
    pub notice: Option<Notice>,
}

impl ScribeState {
    /// Create a fresh state with the given language selection.
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            phase: RunPhase::Idle,
            source_id: 0,
            language: language.into(),
            transcript: None,
            translation: None,
            transliteration: None,
            summary: None,
            transcribing: false,
            post_processing: false,
            notice: None,
        }
    }

    /// Writing script for the selected language, recomputed from the catalog
    /// on every call.  Unknown names resolve to the Latin script.
    pub fn script(&self) -> &'static str {
        language::script_for(&self.language)
    }

    /// Immutable snapshot for the presentation layer.
    pub fn snapshot(&self) -> ScribeSnapshot {
        ScribeSnapshot {
            phase: self.phase,
            language: self.language.clone(),
            script: self.script(),
            transcript: self.transcript.clone(),
            translation: self.translation.clone(),
            transliteration: self.transliteration.clone(),
            summary: self.summary.clone(),
            transcribing: self.transcribing,
            post_processing: self.post_processing,
            notice: self.notice.clone(),
        }
    }
}

impl Default for ScribeState {
    fn default() -> Self {
        Self::new(language::default_language())
    }
}

// ---------------------------------------------------------------------------
// ScribeSnapshot
// ---------------------------------------------------------------------------

/// Read-only view of [`ScribeState`] handed to the presentation layer.
#[derive(Debug, Clone)]
pub struct ScribeSnapshot {
    pub phase: RunPhase,
    pub language: String,
    pub script: &'static str,
    pub transcript: Option<String>,
    pub translation: Option<String>,
    pub transliteration: Option<String>,
    pub summary: Option<String>,
    pub transcribing: bool,
    pub post_processing: bool,
    pub notice: Option<Notice>,
}

// ---------------------------------------------------------------------------
// SharedState
// ---------------------------------------------------------------------------

/// Thread-safe handle to [`ScribeState`].
///
/// Cheap to clone (`Arc` clone).  Lock with `.lock().unwrap()` for a short
/// critical section; do **not** hold the lock across `.await` points.
pub type SharedState = Arc<Mutex<ScribeState>>;

/// Construct a new [`SharedState`] with the given language selection.
pub fn new_shared_state(language: impl Into<String>) -> SharedState {
    Arc::new(Mutex::new(ScribeState::new(language)))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // ---- RunPhase ---

    #[test]
    fn busy_phases() {
        assert!(!RunPhase::Idle.is_busy());
        assert!(RunPhase::Transcribing.is_busy());
        assert!(RunPhase::AwaitingDownstream.is_busy());
        assert!(!RunPhase::TranscribeFailed.is_busy());
        assert!(!RunPhase::DownstreamComplete.is_busy());
        assert!(!RunPhase::DownstreamPartialFailure.is_busy());
    }

    #[test]
    fn labels_are_non_empty() {
        for phase in [
            RunPhase::Idle,
            RunPhase::Transcribing,
            RunPhase::TranscribeFailed,
            RunPhase::AwaitingDownstream,
            RunPhase::DownstreamComplete,
            RunPhase::DownstreamPartialFailure,
        ] {
            assert!(!phase.label().is_empty());
        }
    }

    #[test]
    fn default_phase_is_idle() {
        assert_eq!(RunPhase::default(), RunPhase::Idle);
    }

    // ---- Notice ---

    #[test]
    fn notice_wording() {
        let n = Notice::transcription_failed();
        assert_eq!(n.title, "Transcription Failed");
        assert!(n.description.contains("transcript"));

        let n = Notice::processing_error();
        assert_eq!(n.title, "Processing Error");
        assert!(n.description.contains("after transcription"));
    }

    // ---- ScribeState ---

    #[test]
    fn fresh_state_is_empty_and_idle() {
        let st = ScribeState::default();
        assert_eq!(st.phase, RunPhase::Idle);
        assert_eq!(st.source_id, 0);
        assert!(st.transcript.is_none());
        assert!(st.translation.is_none());
        assert!(st.transliteration.is_none());
        assert!(st.summary.is_none());
        assert!(!st.transcribing);
        assert!(!st.post_processing);
        assert!(st.notice.is_none());
    }

    #[test]
    fn script_is_derived_from_language() {
        let mut st = ScribeState::new("Hindi");
        assert_eq!(st.script(), "Devanagari");

        st.language = "Telugu".into();
        assert_eq!(st.script(), "Telugu");
    }

    #[test]
    fn unknown_language_snapshot_falls_back_to_latin() {
        let st = ScribeState::new("Klingon");
        assert_eq!(st.snapshot().script, "Latin");
    }

    #[test]
    fn snapshot_mirrors_state() {
        let mut st = ScribeState::new("Hindi");
        st.transcript = Some("Hello".into());
        st.transcribing = false;
        st.post_processing = true;
        st.phase = RunPhase::AwaitingDownstream;

        let snap = st.snapshot();
        assert_eq!(snap.phase, RunPhase::AwaitingDownstream);
        assert_eq!(snap.transcript.as_deref(), Some("Hello"));
        assert!(snap.post_processing);
        assert_eq!(snap.language, "Hindi");
        assert_eq!(snap.script, "Devanagari");
    }

    // ---- SharedState ---

    #[test]
    fn shared_state_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SharedState>();
    }

    #[test]
    fn shared_state_can_be_cloned_and_mutated() {
        let state = new_shared_state("English");
        let state2 = Arc::clone(&state);

        state.lock().unwrap().phase = RunPhase::Transcribing;
        assert_eq!(state2.lock().unwrap().phase, RunPhase::Transcribing);
    }
}
