//! Run configuration resolution for songsplit
//!
//! **Priority:** CLI → ENV → TOML → compiled defaults
//!
//! CLI and ENV are merged by the argument parser before reaching this module,
//! so a value present in [`CliOverrides`] already wins over the TOML file.

use std::path::PathBuf;

use songsplit_common::config::{resolve_value, CompiledDefaults, TomlConfig};

use crate::error::SplitResult;
use crate::models::{OutputFormat, SplitParameters};

/// Values given on the command line (or through their environment variables)
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub input: PathBuf,
    pub silence_threshold: Option<f64>,
    pub min_silence_duration: Option<i64>,
    pub chunk_size: Option<i64>,
    pub output_format: Option<OutputFormat>,
    pub ffmpeg_path: Option<String>,
    pub output_dir: Option<PathBuf>,
    pub dry_run: bool,
}

/// Fully resolved configuration of one run
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub input: PathBuf,
    pub params: SplitParameters,
    /// Directory for exported songs; the input's directory when `None`
    pub output_dir: Option<PathBuf>,
    pub ffmpeg_path: String,
    /// Compute and report spans without writing files
    pub dry_run: bool,
}

impl RunConfig {
    /// Configuration with compiled defaults for `input`
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            params: SplitParameters::default(),
            output_dir: None,
            ffmpeg_path: CompiledDefaults::default().ffmpeg_path,
            dry_run: false,
        }
    }
}

/// Merge CLI/ENV overrides with the TOML file and compiled defaults
///
/// Ranges are not checked here; see [`SplitParameters::validate`].
/// Fails only when the TOML file names an unknown output format.
pub fn resolve_run_config(cli: CliOverrides, toml: &TomlConfig) -> SplitResult<RunConfig> {
    let defaults = SplitParameters::default();

    let toml_format = toml
        .output_format
        .as_deref()
        .map(str::parse::<OutputFormat>)
        .transpose()?;

    let params = SplitParameters {
        silence_threshold_db: resolve_value(
            cli.silence_threshold,
            toml.silence_threshold,
            defaults.silence_threshold_db,
        ),
        min_silence_duration_ms: resolve_value(
            cli.min_silence_duration,
            toml.min_silence_duration,
            defaults.min_silence_duration_ms,
        ),
        chunk_size_ms: resolve_value(cli.chunk_size, toml.chunk_size, defaults.chunk_size_ms),
        output_format: resolve_value(cli.output_format, toml_format, defaults.output_format),
    };

    Ok(RunConfig {
        input: cli.input,
        params,
        output_dir: cli.output_dir,
        ffmpeg_path: resolve_value(
            cli.ffmpeg_path,
            toml.ffmpeg_path.clone(),
            CompiledDefaults::default().ffmpeg_path,
        ),
        dry_run: cli.dry_run,
    })
}
