//! Configuration module for the lexicon builder.
//!
//! Provides `AppConfig` (top-level settings), sub-configs for the morphology
//! service, the word source and the result files, and TOML persistence via
//! `AppConfig::load` / `AppConfig::save_to` against the platform
//! `settings.toml` ([`default_settings_file`]).

pub mod settings;

pub use settings::{default_settings_file, AppConfig, MorphologyConfig, OutputConfig, SourceConfig};
