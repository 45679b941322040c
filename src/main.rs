//! Application entry point — VoiceScribe CLI.
//!
//! # Startup sequence
//!
//! 1. Parse CLI arguments.
//! 2. Initialise logging.
//! 3. Load [`AppConfig`] from disk (returns default on first run); the
//!    `GEMINI_API_KEY` environment variable overrides the configured key.
//! 4. Create the tokio runtime.
//! 5. Build the [`GeminiEngine`], the shared state, and the orchestrator.
//! 6. Accept the media file and poll state snapshots until the run settles.
//! 7. Print the four artifacts (absent fields are reported as unavailable).

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context};
use clap::Parser;

use voicescribe::{
    ai::{AiEngine, GeminiEngine},
    config::AppConfig,
    language,
    pipeline::{new_shared_state, RunPhase, ScribeOrchestrator, ScribeSnapshot, SharedState},
    source::Source,
};

// ---------------------------------------------------------------------------
// CLI arguments
// ---------------------------------------------------------------------------

/// Transcribe, translate, transliterate, and summarize an audio/video file.
#[derive(Debug, Parser)]
#[command(name = "voicescribe", version, about)]
struct Args {
    /// Audio or video file to process.
    media: Option<PathBuf>,

    /// Target language for translation and transliteration.
    #[arg(short, long)]
    language: Option<String>,

    /// List the supported target languages and exit.
    #[arg(long)]
    list_languages: bool,
}

// ---------------------------------------------------------------------------
// main
// ---------------------------------------------------------------------------

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if args.list_languages {
        for l in language::LANGUAGES {
            println!("{:<10} ({} script)", l.name, l.script);
        }
        return Ok(());
    }

    let Some(media) = args.media else {
        bail!("no media file given — see --help");
    };

    let mut config = AppConfig::load().unwrap_or_else(|e| {
        log::warn!("Failed to load config ({e}); using defaults");
        AppConfig::default()
    });

    if config.ai.api_key.is_none() {
        config.ai.api_key = std::env::var("GEMINI_API_KEY").ok();
    }

    let selected = args
        .language
        .unwrap_or_else(|| config.default_language.clone());
    if language::find_language(&selected).is_none() {
        log::warn!("Unknown language {selected:?}; transliteration will use the Latin script");
    }

    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to create tokio runtime")?;

    let snapshot = rt.block_on(process(&config, &selected, &media))?;
    print_results(&snapshot);

    if snapshot.phase == RunPhase::TranscribeFailed {
        std::process::exit(1);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Pipeline driver
// ---------------------------------------------------------------------------

/// Accept `media` and poll the shared state until the run settles.
async fn process(
    config: &AppConfig,
    selected: &str,
    media: &PathBuf,
) -> anyhow::Result<ScribeSnapshot> {
    let state = new_shared_state(selected);
    let ai: Arc<dyn AiEngine> = Arc::new(GeminiEngine::from_config(&config.ai));
    let orchestrator = ScribeOrchestrator::new(Arc::clone(&state), ai);

    let source =
        Source::from_file(media).with_context(|| format!("cannot accept {}", media.display()))?;
    log::info!(
        "Processing {} ({} / {})",
        media.display(),
        source.kind().label(),
        source.mime()
    );

    orchestrator.start(source);
    Ok(watch(&state).await)
}

/// Poll snapshots until the current run leaves its busy phases, reporting
/// phase changes on the way.
async fn watch(state: &SharedState) -> ScribeSnapshot {
    let mut last_phase = RunPhase::Idle;
    loop {
        let snapshot = state.lock().unwrap().snapshot();

        if snapshot.phase != last_phase {
            log::info!("{}", snapshot.phase.label());
            last_phase = snapshot.phase;
        }

        if !snapshot.phase.is_busy() && snapshot.phase != RunPhase::Idle {
            return snapshot;
        }

        tokio::time::sleep(Duration::from_millis(150)).await;
    }
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

fn print_results(snapshot: &ScribeSnapshot) {
    if let Some(notice) = &snapshot.notice {
        eprintln!("{}: {}", notice.title, notice.description);
    }

    print_section("Transcript", snapshot.transcript.as_deref());
    print_section(
        &format!("Translation ({})", snapshot.language),
        snapshot.translation.as_deref(),
    );
    print_section(
        &format!("Transliteration ({})", snapshot.script),
        snapshot.transliteration.as_deref(),
    );
    print_section("Summary", snapshot.summary.as_deref());
}

fn print_section(title: &str, content: Option<&str>) {
    println!("\n=== {title} ===");
    println!("{}", content.unwrap_or("(not available)"));
}
