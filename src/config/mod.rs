//! Configuration module for VoiceScribe.
//!
//! Provides `AppConfig` (top-level settings), the `AiConfig` sub-config for
//! the generative-AI backend, `AppPaths` for cross-platform config
//! directories, and TOML persistence via `AppConfig::load` / `AppConfig::save`.

pub mod paths;
pub mod settings;

pub use paths::AppPaths;
pub use settings::{AiConfig, AppConfig};
