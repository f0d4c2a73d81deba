//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars.
//!
//! Config lives at `~/.mangabatch/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{LevelFilter, debug, info, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct MangaBatchConfig {
    #[serde(default)]
    pub reporting: ReportingConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Translation key → template overrides.
    #[serde(default)]
    pub messages: HashMap<String, String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ReportingConfig {
    pub report_chapter_actions: Option<bool>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub file: Option<PathBuf>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_REPORT_CHAPTER_ACTIONS: bool = false;
pub const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Info;

pub const ENV_REPORT_CHAPTER_ACTIONS: &str = "MANGABATCH_REPORT_CHAPTER_ACTIONS";
pub const ENV_LOG_LEVEL: &str = "MANGABATCH_LOG_LEVEL";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub report_chapter_actions: bool,
    pub log_level: LevelFilter,
    pub log_file: Option<PathBuf>,
    pub messages: HashMap<String, String>,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        resolve(&MangaBatchConfig::default())
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.mangabatch/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".mangabatch").join("config.toml"))
}

/// Load config from `~/.mangabatch/config.toml`.
pub fn load_config() -> Result<MangaBatchConfig, ConfigError> {
    match config_path() {
        Some(path) => load_config_from(&path),
        None => {
            warn!("Could not determine home directory, using default config");
            Ok(MangaBatchConfig::default())
        }
    }
}

/// Load config from `path`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `MangaBatchConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config_from(path: &Path) -> Result<MangaBatchConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(MangaBatchConfig::default());
    }

    let contents = fs::read_to_string(path)?;
    let config: MangaBatchConfig = toml::from_str(&contents)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# mangabatch configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars.

# [reporting]
# Also show a success/error notification for download, delete,
# mark-as-read and mark-as-unread. Library actions are always reported.
# report_chapter_actions = false     # Or set MANGABATCH_REPORT_CHAPTER_ACTIONS

# [logging]
# level = "info"                     # "off", "error", "warn", "info", "debug", "trace"
# file = "/tmp/mangabatch.log"       # Defaults to stderr

# [messages]
# Fluent patterns; "{{count}}" is accepted for "{ $count }".
# "manga.action.library.remove.label.success_one" = "Removed { $count } manga"
# "manga.action.library.remove.label.success_other" = "Removed { $count } mangas"
"#;

    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Resolve the final config by collapsing: defaults → config file → env vars.
pub fn resolve(config: &MangaBatchConfig) -> ResolvedConfig {
    resolve_with_env(config, |name| std::env::var(name).ok())
}

/// Same as [`resolve`], reading overrides through `env` instead of the
/// process environment.
pub fn resolve_with_env(
    config: &MangaBatchConfig,
    env: impl Fn(&str) -> Option<String>,
) -> ResolvedConfig {
    // Chapter reporting: env → config → default
    let report_chapter_actions = env(ENV_REPORT_CHAPTER_ACTIONS)
        .and_then(|v| parse_bool(&v))
        .or(config.reporting.report_chapter_actions)
        .unwrap_or(DEFAULT_REPORT_CHAPTER_ACTIONS);

    // Log level: env → config → default. Unparseable values fall through.
    let log_level = env(ENV_LOG_LEVEL)
        .or_else(|| config.logging.level.clone())
        .and_then(|level| match level.parse::<LevelFilter>() {
            Ok(filter) => Some(filter),
            Err(_) => {
                warn!("Ignoring unknown log level {level:?}");
                None
            }
        })
        .unwrap_or(DEFAULT_LOG_LEVEL);

    ResolvedConfig {
        report_chapter_actions,
        log_level,
        log_file: config.logging.file.clone(),
        messages: config.messages.clone(),
    }
}
