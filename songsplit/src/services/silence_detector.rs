//! Silence detection for song boundary detection
//!
//! The track is scanned in consecutive windows of `chunk_size_ms` (the last
//! window may be shorter). A window is quiet when its loudness is at or
//! below the threshold. Consecutive quiet windows form a run; a run is a
//! [`SilenceInterval`] only when it lasts at least `min_silence_ms`.

use crate::error::{SplitError, SplitResult};
use crate::models::parameters::validate_window;
use crate::models::{LoudnessSource, SilenceInterval, SplitParameters};

/// Consecutive analysis windows `[start, end)` covering `[0, total_ms)`
pub(crate) fn analysis_windows(
    total_ms: u64,
    chunk_size_ms: u64,
) -> impl Iterator<Item = (u64, u64)> {
    (0..total_ms)
        .step_by(chunk_size_ms as usize)
        .map(move |start| (start, (start + chunk_size_ms).min(total_ms)))
}

/// Silence detector
#[derive(Debug, Clone, PartialEq)]
pub struct SilenceDetector {
    /// Silence threshold in dBFS (default: -50dB)
    threshold_db: f64,

    /// Minimum silence duration in milliseconds (default: 1000ms)
    min_silence_ms: i64,

    /// Analysis window in milliseconds (default: 100ms)
    chunk_size_ms: i64,
}

impl SilenceDetector {
    /// Create new silence detector with defaults
    pub fn new() -> Self {
        Self::from_parameters(&SplitParameters::default())
    }

    /// Detector configured from run parameters
    pub fn from_parameters(params: &SplitParameters) -> Self {
        Self {
            threshold_db: params.silence_threshold_db,
            min_silence_ms: params.min_silence_duration_ms,
            chunk_size_ms: params.chunk_size_ms,
        }
    }

    /// Set silence threshold in dBFS; more negative is stricter
    pub fn with_threshold_db(mut self, threshold_db: f64) -> Self {
        self.threshold_db = threshold_db;
        self
    }

    /// Set minimum silence duration
    pub fn with_min_silence_ms(mut self, min_silence_ms: i64) -> Self {
        self.min_silence_ms = min_silence_ms;
        self
    }

    /// Set analysis window size
    pub fn with_chunk_size_ms(mut self, chunk_size_ms: i64) -> Self {
        self.chunk_size_ms = chunk_size_ms;
        self
    }

    /// Whether a window of `source` is quiet
    pub(crate) fn is_quiet<S: LoudnessSource + ?Sized>(
        &self,
        source: &S,
        start_ms: u64,
        end_ms: u64,
    ) -> bool {
        source.loudness_db(start_ms, end_ms) <= self.threshold_db
    }

    /// Validate parameters and the track, returning (total_ms, chunk_ms, min_ms)
    pub(crate) fn checked_window<S: LoudnessSource + ?Sized>(
        &self,
        source: &S,
    ) -> SplitResult<(u64, u64, u64)> {
        validate_window(self.chunk_size_ms, self.min_silence_ms)?;
        if self.threshold_db.is_nan() {
            return Err(SplitError::InvalidParameter(
                "silence threshold must be a number".to_string(),
            ));
        }

        let total_ms = source.duration_ms();
        if total_ms == 0 {
            return Err(SplitError::EmptyTrack);
        }

        Ok((total_ms, self.chunk_size_ms as u64, self.min_silence_ms as u64))
    }

    /// Detect silence intervals
    ///
    /// Returns intervals in ascending order, non-overlapping, each at least
    /// `min_silence_ms` long. A run touching the start of the track begins
    /// at 0; a run touching the end finishes at the track duration.
    pub fn detect<S: LoudnessSource + ?Sized>(
        &self,
        source: &S,
    ) -> SplitResult<Vec<SilenceInterval>> {
        let (total_ms, chunk_ms, min_ms) = self.checked_window(source)?;

        let mut intervals = Vec::new();
        let mut run_start: Option<u64> = None;

        for (start, end) in analysis_windows(total_ms, chunk_ms) {
            if self.is_quiet(source, start, end) {
                if run_start.is_none() {
                    run_start = Some(start);
                }
            } else if let Some(silence_start) = run_start.take() {
                if start - silence_start >= min_ms {
                    intervals.push(SilenceInterval::new(silence_start, start));
                }
            }
        }

        // Silence running to the end of the track
        if let Some(silence_start) = run_start {
            if total_ms - silence_start >= min_ms {
                intervals.push(SilenceInterval::new(silence_start, total_ms));
            }
        }

        Ok(intervals)
    }
}

impl Default for SilenceDetector {
    fn default() -> Self {
        Self::new()
    }
}

/// Detect silence intervals in `source`
///
/// Fails with `InvalidParameter` when `chunk_size_ms <= 0` or
/// `min_silence_ms < 0`, and with `EmptyTrack` for a zero-length source.
pub fn detect<S: LoudnessSource + ?Sized>(
    source: &S,
    threshold_db: f64,
    min_silence_ms: i64,
    chunk_size_ms: i64,
) -> SplitResult<Vec<SilenceInterval>> {
    SilenceDetector::new()
        .with_threshold_db(threshold_db)
        .with_min_silence_ms(min_silence_ms)
        .with_chunk_size_ms(chunk_size_ms)
        .detect(source)
}
