//! Application settings structs, defaults and TOML persistence.
//!
//! All structs implement `Serialize`, `Deserialize`, `Default` and `Clone`
//! so they can be round-tripped through TOML files and shared across threads.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::AppPaths;
use crate::language;

// ---------------------------------------------------------------------------
// AiConfig
// ---------------------------------------------------------------------------

/// Settings for the generative-AI backend that executes all four tasks
/// (transcription, translation, transliteration, summarization).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiConfig {
    /// Base URL of the Generative Language API endpoint.
    pub base_url: String,
    /// API key — `None` when supplied via the `GEMINI_API_KEY` environment
    /// variable instead, or when talking to an unauthenticated proxy.
    pub api_key: Option<String>,
    /// Model identifier sent to the API (e.g. `"gemini-2.0-flash"`).
    pub model: String,
    /// Sampling temperature (0.0 – 1.0).  Lower = more deterministic.
    pub temperature: f32,
    /// Maximum seconds to wait for a single AI response before timing out.
    pub timeout_secs: u64,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://generativelanguage.googleapis.com".into(),
            api_key: None,
            model: "gemini-2.0-flash".into(),
            temperature: 0.2,
            timeout_secs: 60,
        }
    }
}

// ---------------------------------------------------------------------------
// AppConfig  (top-level)
// ---------------------------------------------------------------------------

/// Top-level application configuration, serialised as `settings.toml`.
///
/// # Persistence
///
/// ```rust,no_run
/// use voicescribe::config::AppConfig;
///
/// // Load (returns Default when file is missing)
/// let config = AppConfig::load().unwrap();
///
/// // Modify and save
/// // config.save().unwrap();
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Language selected at startup.  Must name a catalog entry for script
    /// resolution; unknown names fall back to the Latin script.
    pub default_language: String,
    /// Generative-AI backend settings.
    pub ai: AiConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_language: language::default_language().into(),
            ai: AiConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the platform-appropriate `settings.toml`.
    ///
    /// Returns `Ok(AppConfig::default())` when the file does not exist yet
    /// (first-run scenario) so callers never need to special-case a missing
    /// file.
    pub fn load() -> Result<Self> {
        Self::load_from(&AppPaths::new().settings_file)
    }

    /// Load from an explicit path (useful for tests).
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to the platform-appropriate `settings.toml`,
    /// creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&AppPaths::new().settings_file)
    }

    /// Save to an explicit path (useful for tests).
    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    /// Verify that a default `AppConfig` can be serialised to TOML and
    /// deserialised back without any data loss.
    #[test]
    fn round_trip_toml() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("settings.toml");

        let original = AppConfig::default();
        original.save_to(&path).expect("save");

        let loaded = AppConfig::load_from(&path).expect("load");

        assert_eq!(original.default_language, loaded.default_language);
        assert_eq!(original.ai.base_url, loaded.ai.base_url);
        assert_eq!(original.ai.api_key, loaded.ai.api_key);
        assert_eq!(original.ai.model, loaded.ai.model);
        assert_eq!(original.ai.temperature, loaded.ai.temperature);
        assert_eq!(original.ai.timeout_secs, loaded.ai.timeout_secs);
    }

    /// `load_from` on a non-existent path must return `Default` without error.
    #[test]
    fn load_missing_returns_default() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("nonexistent.toml");

        let config = AppConfig::load_from(&path).expect("should not error");
        let default = AppConfig::default();

        assert_eq!(config.default_language, default.default_language);
        assert_eq!(config.ai.model, default.ai.model);
        assert_eq!(config.ai.base_url, default.ai.base_url);
    }

    #[test]
    fn default_values() {
        let cfg = AppConfig::default();

        assert_eq!(cfg.default_language, "English");
        assert_eq!(cfg.ai.base_url, "https://generativelanguage.googleapis.com");
        assert_eq!(cfg.ai.model, "gemini-2.0-flash");
        assert_eq!(cfg.ai.timeout_secs, 60);
        assert!(cfg.ai.api_key.is_none());
    }

    /// Verify that modified non-default values survive a round trip.
    #[test]
    fn round_trip_modified_values() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("modified.toml");

        let mut cfg = AppConfig::default();
        cfg.default_language = "Hindi".into();
        cfg.ai.base_url = "http://localhost:8787".into();
        cfg.ai.api_key = Some("test-key".into());
        cfg.ai.model = "gemini-2.0-pro".into();
        cfg.ai.timeout_secs = 30;

        cfg.save_to(&path).expect("save");
        let loaded = AppConfig::load_from(&path).expect("load");

        assert_eq!(loaded.default_language, "Hindi");
        assert_eq!(loaded.ai.base_url, "http://localhost:8787");
        assert_eq!(loaded.ai.api_key, Some("test-key".into()));
        assert_eq!(loaded.ai.model, "gemini-2.0-pro");
        assert_eq!(loaded.ai.timeout_secs, 30);
    }
}
