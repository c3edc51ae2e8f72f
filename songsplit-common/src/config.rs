//! Configuration loading and resolution
//!
//! Effective values are resolved in this priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable (handled by the CLI layer)
//! 3. TOML config file
//! 4. Compiled default (fallback)

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Compiled defaults used when neither CLI, ENV nor TOML provide a value
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledDefaults {
    pub silence_threshold_db: f64,
    pub min_silence_duration_ms: i64,
    pub chunk_size_ms: i64,
    pub ffmpeg_path: String,
    pub log_level: String,
}

impl Default for CompiledDefaults {
    fn default() -> Self {
        Self {
            silence_threshold_db: -50.0,
            min_silence_duration_ms: 1000,
            chunk_size_ms: 100,
            ffmpeg_path: "ffmpeg".to_string(),
            log_level: "warn".to_string(),
        }
    }
}

/// Logging section of the TOML file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// tracing filter directive, e.g. "info" or "songsplit=debug"
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: CompiledDefaults::default().log_level,
        }
    }
}

/// Contents of `config.toml`
///
/// Every field is optional; absent fields fall through to compiled defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub silence_threshold: Option<f64>,
    pub min_silence_duration: Option<i64>,
    pub chunk_size: Option<i64>,
    pub output_format: Option<String>,
    pub ffmpeg_path: Option<String>,
    pub logging: LoggingConfig,
}

/// Platform config file location (`<config_dir>/songsplit/config.toml`)
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("songsplit").join("config.toml"))
}

/// Parse a TOML config file
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Read {} failed: {}", path.display(), e)))?;
    toml::from_str(&content).map_err(|e| {
        // toml renders a multi-line snippet; keep the location line only
        let location = e.to_string().lines().next().unwrap_or_default().to_string();
        Error::Config(format!(
            "Parse {} failed: {} ({})",
            path.display(),
            e.message(),
            location
        ))
    })
}

/// Locate and load the TOML config
///
/// An explicitly requested file must exist. The platform default file is
/// optional: when it is missing, defaults are returned.
pub fn resolve_toml_config(explicit: Option<&Path>) -> Result<TomlConfig> {
    if let Some(path) = explicit {
        if !path.is_file() {
            return Err(Error::Config(format!(
                "Config file not found: {}",
                path.display()
            )));
        }
        return load_toml_config(path);
    }

    match default_config_path() {
        Some(path) if path.is_file() => load_toml_config(&path),
        Some(path) => {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            Ok(TomlConfig::default())
        }
        None => Ok(TomlConfig::default()),
    }
}

/// Pick the first value present: CLI/ENV, then TOML, then the compiled default
pub fn resolve_value<T>(cli_or_env: Option<T>, toml: Option<T>, default: T) -> T {
    cli_or_env.or(toml).unwrap_or(default)
}
