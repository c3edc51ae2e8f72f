//! Segmentation parameters

use serde::{Deserialize, Serialize};
use songsplit_common::config::CompiledDefaults;
use std::fmt;
use std::str::FromStr;

use crate::error::{SplitError, SplitResult};

/// Container/codec for exported songs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Wav,
    Mp3,
    Ogg,
}

impl OutputFormat {
    /// File extension without the leading dot
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Wav => "wav",
            OutputFormat::Mp3 => "mp3",
            OutputFormat::Ogg => "ogg",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for OutputFormat {
    type Err = SplitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "wav" => Ok(OutputFormat::Wav),
            "mp3" => Ok(OutputFormat::Mp3),
            "ogg" => Ok(OutputFormat::Ogg),
            other => Err(SplitError::InvalidParameter(format!(
                "output format must be one of wav, mp3, ogg (got '{}')",
                other
            ))),
        }
    }
}

/// Effective silence-segmentation parameters for one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplitParameters {
    /// Loudness (dBFS) at or below which a chunk is quiet (default: -50)
    pub silence_threshold_db: f64,

    /// Minimum quiet run that counts as a song boundary (default: 1000ms)
    pub min_silence_duration_ms: i64,

    /// Analysis window size (default: 100ms)
    pub chunk_size_ms: i64,

    /// Format of exported songs (default: wav)
    pub output_format: OutputFormat,
}

impl Default for SplitParameters {
    fn default() -> Self {
        let defaults = CompiledDefaults::default();
        Self {
            silence_threshold_db: defaults.silence_threshold_db,
            min_silence_duration_ms: defaults.min_silence_duration_ms,
            chunk_size_ms: defaults.chunk_size_ms,
            output_format: OutputFormat::default(),
        }
    }
}

impl SplitParameters {
    /// Check ranges before any decoding starts
    pub fn validate(&self) -> SplitResult<()> {
        validate_window(self.chunk_size_ms, self.min_silence_duration_ms)?;
        if self.silence_threshold_db.is_nan() {
            return Err(SplitError::InvalidParameter(
                "silence threshold must be a number".to_string(),
            ));
        }
        Ok(())
    }
}

/// Shared range check for chunk size and minimum silence duration
pub(crate) fn validate_window(chunk_size_ms: i64, min_silence_ms: i64) -> SplitResult<()> {
    if chunk_size_ms <= 0 {
        return Err(SplitError::InvalidParameter(format!(
            "chunk size must be > 0 ms (got {})",
            chunk_size_ms
        )));
    }
    if min_silence_ms < 0 {
        return Err(SplitError::InvalidParameter(format!(
            "minimum silence duration must be >= 0 ms (got {})",
            min_silence_ms
        )));
    }
    Ok(())
}
