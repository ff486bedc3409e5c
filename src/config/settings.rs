//! Application settings structs, defaults and TOML persistence.
//!
//! All structs implement `Serialize`, `Deserialize`, `Default` and `Clone`
//! so they can be round-tripped through TOML files and handed to the
//! pipeline tasks.

use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

const APP_NAME: &str = "lexicon-builder";

/// Platform location of `settings.toml`:
///
/// * Windows: `%APPDATA%\lexicon-builder\settings.toml`
/// * macOS:   `~/Library/Application Support/lexicon-builder/settings.toml`
/// * Linux:   `~/.config/lexicon-builder/settings.toml`
///
/// Falls back to `./lexicon-builder/settings.toml` when the platform has no
/// config directory.
pub fn default_settings_file() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
        .join("settings.toml")
}

// ---------------------------------------------------------------------------
// MorphologyConfig
// ---------------------------------------------------------------------------

/// Settings for the external morphological analysis service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MorphologyConfig {
    /// Base URL of the analyser; requests go to `{base_url}/api/analyse`.
    pub base_url: String,
    /// Maximum seconds to wait for a single analysis response.
    pub timeout_secs: u64,
    /// Maximum number of analysis requests in flight at once, batch-wide.
    pub concurrency: usize,
}

impl Default for MorphologyConfig {
    fn default() -> Self {
        Self {
            base_url: "https://morph.smc.org.in".into(),
            timeout_secs: 30,
            concurrency: 10,
        }
    }
}

// ---------------------------------------------------------------------------
// SourceConfig
// ---------------------------------------------------------------------------

/// Where the input word list comes from.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Word list file, one word per line.
    pub path: PathBuf,
    /// Maximum number of words read from `path`.
    pub word_limit: usize,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("malayalam_words.txt"),
            word_limit: 100_000,
        }
    }
}

// ---------------------------------------------------------------------------
// OutputConfig
// ---------------------------------------------------------------------------

/// Destinations of the result files.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Enrichment result (`enrich` command output, `tag` command input).
    pub path: PathBuf,
    /// Layman-tagged copy of the result (`tag` command output).
    pub tagged_path: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("analysis_results.json"),
            tagged_path: PathBuf::from("lexicons_with_layman.json"),
        }
    }
}

// ---------------------------------------------------------------------------
// AppConfig  (top-level)
// ---------------------------------------------------------------------------

/// Top-level application configuration, serialised as `settings.toml`.
///
/// ```rust,no_run
/// use lexicon_builder::config::AppConfig;
///
/// // Load (returns Default when file is missing)
/// let config = AppConfig::load().unwrap();
/// assert!(config.morphology.concurrency >= 1);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Morphology service settings.
    pub morphology: MorphologyConfig,
    /// Input word list settings.
    pub source: SourceConfig,
    /// Result file settings.
    pub output: OutputConfig,
}

impl AppConfig {
    /// Load configuration from the platform-appropriate `settings.toml`.
    ///
    /// Returns `Ok(AppConfig::default())` when the file does not exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&default_settings_file())
    }

    /// Load from an explicit path.
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save to an explicit path, creating parent directories as needed.
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
