//! Pipeline orchestrator — drives the full source → transcript → fan-out loop.
//!
//! [`ScribeOrchestrator`] owns the only write access to the [`SharedState`]
//! and exposes the two presentation-layer entry points: a new source being
//! accepted and a language change.
//!
//! # Pipeline flow
//!
//! ```text
//! ScribeCommand::AcceptSource(source)
//!   └─▶ assign SourceId, clear results, set transcribing  [Transcribing]
//!         └─▶ encode → AiEngine::transcribe
//!               ├─ Err → notice "Transcription Failed"    [TranscribeFailed]
//!               └─ Ok  → write transcript                 [AwaitingDownstream]
//!                     └─▶ translate ─┐
//!                         transliterate ─┼─ concurrent, each writes its own
//!                         summarize ─┘   field as soon as it resolves
//!                           └─▶ all settled:
//!                               all ok  → [DownstreamComplete]
//!                               any err → notice "Processing Error"
//!                                         [DownstreamPartialFailure]
//!
//! ScribeCommand::LanguageChanged(name)
//!   └─▶ re-issue translate + transliterate for the present transcript
//!       (transcription and summary are not re-run)
//! ```
//!
//! # Supersession
//!
//! Starting a new run never aborts in-flight futures.  Instead, every state
//! write re-checks at write time that its run's [`SourceId`] is still the
//! current one — and, for the language-parameterized fields, that the
//! selected language is still the one the call was issued with.  Results
//! arriving for a stale (id, language) version are dropped on arrival.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::mpsc;

use crate::ai::AiEngine;
use crate::language;
use crate::source::Source;

use super::state::{Notice, RunPhase, SharedState, SourceId};

// ---------------------------------------------------------------------------
// ScribeCommand
// ---------------------------------------------------------------------------

/// Commands sent from the presentation layer to the orchestrator.
///
/// These are the only two ways state mutation can be requested from outside.
#[derive(Debug)]
pub enum ScribeCommand {
    /// A new upload or completed recording was accepted.
    AcceptSource(Source),
    /// The user selected a different target language.
    LanguageChanged(String),
}

// ---------------------------------------------------------------------------
// ScribeOrchestrator
// ---------------------------------------------------------------------------

/// Drives the complete two-stage pipeline.
///
/// Cheap to clone — clones share the state, the AI backend, and the source
/// id sequence.  Create with [`ScribeOrchestrator::new`], then either call
/// [`run`](Self::run) inside a tokio task and feed it [`ScribeCommand`]s, or
/// invoke [`start`](Self::start) / [`set_language`](Self::set_language)
/// directly.
#[derive(Clone)]
pub struct ScribeOrchestrator {
    state: SharedState,
    ai: Arc<dyn AiEngine>,
    seq: Arc<AtomicU64>,
}

impl ScribeOrchestrator {
    /// Create a new orchestrator.
    ///
    /// # Arguments
    ///
    /// * `state` — shared pipeline state (also read by the presentation layer).
    /// * `ai`    — AI backend executing the four operations.
    pub fn new(state: SharedState, ai: Arc<dyn AiEngine>) -> Self {
        Self {
            state,
            ai,
            seq: Arc::new(AtomicU64::new(0)),
        }
    }

    // -----------------------------------------------------------------------
    // Command loop
    // -----------------------------------------------------------------------

    /// Run the orchestrator until `command_rx` is closed.
    ///
    /// Each command dispatches without awaiting the work it starts, so new
    /// commands are processed while runs are still in flight — that is what
    /// makes supersession reachable at all.
    pub async fn run(self, mut command_rx: mpsc::Receiver<ScribeCommand>) {
        while let Some(cmd) = command_rx.recv().await {
            match cmd {
                ScribeCommand::AcceptSource(source) => {
                    self.start(source);
                }
                ScribeCommand::LanguageChanged(language) => {
                    self.set_language(&language);
                }
            }
        }

        log::info!("pipeline: command channel closed, orchestrator shutting down");
    }

    // -----------------------------------------------------------------------
    // Entry points
    // -----------------------------------------------------------------------

    /// Accept a new source and start a pipeline run for it.
    ///
    /// Assigns the next [`SourceId`] and makes it current, which supersedes
    /// any run still in flight: the old run's pending results will fail the
    /// write-time id check and be discarded.  Returns the new run's id.
    pub fn start(&self, source: Source) -> SourceId {
        let id = self.seq.fetch_add(1, Ordering::SeqCst) + 1;
        log::debug!(
            "pipeline: accepted {} source as run {id}",
            source.kind().label()
        );

        {
            let mut st = self.state.lock().unwrap();
            st.source_id = id;
            st.phase = RunPhase::Transcribing;
            st.transcript = None;
            st.translation = None;
            st.transliteration = None;
            st.summary = None;
            st.transcribing = true;
            st.post_processing = false;
            st.notice = None;
        }

        let this = self.clone();
        tokio::spawn(async move {
            this.run_stage_one(id, source).await;
        });

        id
    }

    /// Change the selected target language.
    ///
    /// When a transcript is present and Stage 1 is not running, this clears
    /// the translation/transliteration fields and re-issues that pair for
    /// the new language — the transcript and summary are reused as-is.
    /// Pending results for the old language are discarded by the write-time
    /// version check.
    pub fn set_language(&self, language: &str) {
        let refresh = {
            let mut st = self.state.lock().unwrap();
            st.language = language.to_string();

            match st.transcript.clone() {
                Some(transcript) if !st.transcribing => {
                    st.translation = None;
                    st.transliteration = None;
                    st.post_processing = true;
                    st.phase = RunPhase::AwaitingDownstream;
                    Some((st.source_id, transcript))
                }
                _ => None,
            }
        };

        if let Some((id, transcript)) = refresh {
            log::debug!("pipeline: language changed to {language}, refreshing run {id}");

            let this = self.clone();
            let language = language.to_string();
            tokio::spawn(async move {
                this.fan_out(id, language, transcript, false).await;
            });
        }
    }

    // -----------------------------------------------------------------------
    // Stage 1 — transcription
    // -----------------------------------------------------------------------

    /// Encode the source and run the transcription call.
    ///
    /// On success this issues Stage 2 parameterized by the language selected
    /// at that moment.  On any failure the run terminates with the
    /// "Transcription Failed" notice; no downstream call is issued.
    async fn run_stage_one(&self, id: SourceId, source: Source) {
        let payload = match source.encode().await {
            Ok(payload) => payload,
            Err(e) => {
                self.fail_transcription(id, e.to_string());
                return;
            }
        };

        log::debug!("pipeline: run {id} transcribing {} payload", payload.mime);

        let transcript = match self.ai.transcribe(&payload).await {
            Ok(text) => text,
            Err(e) => {
                self.fail_transcription(id, e.to_string());
                return;
            }
        };

        let language = {
            let mut st = self.state.lock().unwrap();
            if st.source_id != id {
                log::debug!("pipeline: dropping superseded transcript (run {id})");
                return;
            }
            st.transcript = Some(transcript.clone());
            st.transcribing = false;
            st.post_processing = true;
            st.phase = RunPhase::AwaitingDownstream;
            st.language.clone()
        };

        self.fan_out(id, language, transcript, true).await;
    }

    fn fail_transcription(&self, id: SourceId, reason: String) {
        log::error!("pipeline: transcription failed (run {id}): {reason}");

        let mut st = self.state.lock().unwrap();
        if st.source_id != id {
            return;
        }
        st.transcribing = false;
        st.phase = RunPhase::TranscribeFailed;
        st.notice = Some(Notice::transcription_failed());
    }

    // -----------------------------------------------------------------------
    // Stage 2 — concurrent fan-out
    // -----------------------------------------------------------------------

    /// Issue the downstream calls for `(id, language)` and settle the run.
    ///
    /// The three calls run concurrently; each success writes its field the
    /// moment it resolves, so the fields populate independently and possibly
    /// out of order.  Translation and transliteration writes are gated on
    /// the (id, language) version; the summary does not depend on the
    /// language and is gated on the id alone.  `include_summary` is false
    /// for language refreshes, where the existing summary is kept.
    async fn fan_out(&self, id: SourceId, language: String, transcript: String, include_summary: bool) {
        let script = language::script_for(&language);

        let translate = async {
            match self.ai.translate(&transcript, &language).await {
                Ok(text) => {
                    let mut st = self.state.lock().unwrap();
                    if st.source_id == id && st.language == language {
                        st.translation = Some(text);
                    } else {
                        log::debug!("pipeline: dropping stale translation (run {id})");
                    }
                    true
                }
                Err(e) => {
                    log::warn!("pipeline: translation failed (run {id}): {e}");
                    false
                }
            }
        };

        let transliterate = async {
            match self.ai.transliterate(&transcript, script).await {
                Ok(text) => {
                    let mut st = self.state.lock().unwrap();
                    if st.source_id == id && st.language == language {
                        st.transliteration = Some(text);
                    } else {
                        log::debug!("pipeline: dropping stale transliteration (run {id})");
                    }
                    true
                }
                Err(e) => {
                    log::warn!("pipeline: transliteration failed (run {id}): {e}");
                    false
                }
            }
        };

        let summarize = async {
            if !include_summary {
                return true;
            }
            match self.ai.summarize(&transcript).await {
                Ok(text) => {
                    let mut st = self.state.lock().unwrap();
                    if st.source_id == id {
                        st.summary = Some(text);
                    } else {
                        log::debug!("pipeline: dropping superseded summary (run {id})");
                    }
                    true
                }
                Err(e) => {
                    log::warn!("pipeline: summarization failed (run {id}): {e}");
                    false
                }
            }
        };

        let (translated, transliterated, summarized) =
            tokio::join!(translate, transliterate, summarize);

        // Settle: only the fan-out matching the current (id, language)
        // version may clear the flag and report the outcome.
        let mut st = self.state.lock().unwrap();
        if st.source_id != id || st.language != language {
            log::debug!("pipeline: run {id} superseded before downstream settle");
            return;
        }

        st.post_processing = false;
        if translated && transliterated && summarized {
            st.phase = RunPhase::DownstreamComplete;
        } else {
            st.phase = RunPhase::DownstreamPartialFailure;
            st.notice = Some(Notice::processing_error());
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
