//! Decoded audio and loudness access
//!
//! Loudness of a window is the RMS of every interleaved sample in it,
//! expressed in dBFS as `20 * log10(rms)`. A window of digital silence
//! has loudness `-inf`, so it is quiet for every finite threshold.

use crate::error::{SplitError, SplitResult};

/// Anything the silence detector can measure loudness on
pub trait LoudnessSource {
    /// Total length in milliseconds
    fn duration_ms(&self) -> u64;

    /// Loudness in dBFS of the half-open range `[start_ms, end_ms)`
    fn loudness_db(&self, start_ms: u64, end_ms: u64) -> f64;
}

/// Root mean square of a sample block (0.0 for an empty block)
pub fn calculate_rms(samples: &[f32]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }

    let sum_squares: f64 = samples.iter().map(|&s| (s as f64) * (s as f64)).sum();
    (sum_squares / samples.len() as f64).sqrt()
}

/// Convert linear amplitude to dBFS
pub fn linear_to_db(linear: f64) -> f64 {
    if linear <= 0.0 {
        f64::NEG_INFINITY
    } else {
        20.0 * linear.log10()
    }
}

/// Convert dBFS to linear amplitude
pub fn db_to_linear(db: f64) -> f64 {
    10.0_f64.powf(db / 20.0)
}

/// Decoded PCM held fully in memory
#[derive(Debug, Clone)]
pub struct AudioTrack {
    /// Interleaved samples, range [-1.0, 1.0]
    samples: Vec<f32>,
    sample_rate: u32,
    channels: usize,
}

impl AudioTrack {
    /// Wrap interleaved samples
    pub fn new(samples: Vec<f32>, sample_rate: u32, channels: usize) -> SplitResult<Self> {
        if sample_rate == 0 {
            return Err(SplitError::InvalidParameter(
                "sample rate must be > 0".to_string(),
            ));
        }
        if channels == 0 {
            return Err(SplitError::InvalidParameter(
                "channel count must be > 0".to_string(),
            ));
        }
        if samples.len() % channels != 0 {
            return Err(SplitError::InvalidParameter(format!(
                "{} samples do not divide into {} channels",
                samples.len(),
                channels
            )));
        }

        Ok(Self {
            samples,
            sample_rate,
            channels,
        })
    }

    /// Single-channel convenience constructor
    pub fn from_mono(samples: Vec<f32>, sample_rate: u32) -> SplitResult<Self> {
        Self::new(samples, sample_rate, 1)
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Number of PCM frames (samples per channel)
    pub fn frames(&self) -> usize {
        self.samples.len() / self.channels
    }

    /// All interleaved samples
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    /// Length in whole milliseconds (truncated)
    pub fn total_duration_ms(&self) -> u64 {
        self.frames() as u64 * 1000 / self.sample_rate as u64
    }

    /// Frame index of a millisecond offset, clamped to the track
    fn frame_at_ms(&self, ms: u64) -> usize {
        let frame = ms as u128 * self.sample_rate as u128 / 1000;
        frame.min(self.frames() as u128) as usize
    }

    /// Interleaved samples of `[start_ms, end_ms)`
    pub fn slice(&self, start_ms: u64, end_ms: u64) -> &[f32] {
        let start = self.frame_at_ms(start_ms);
        let end = self.frame_at_ms(end_ms).max(start);
        &self.samples[start * self.channels..end * self.channels]
    }
}

impl LoudnessSource for AudioTrack {
    fn duration_ms(&self) -> u64 {
        self.total_duration_ms()
    }

    fn loudness_db(&self, start_ms: u64, end_ms: u64) -> f64 {
        linear_to_db(calculate_rms(self.slice(start_ms, end_ms)))
    }
}

/// Piecewise-constant loudness description
///
/// Each region holds a fixed level; windows straddling regions average
/// their power (mean square), matching what RMS over PCM would report.
/// Gaps between regions are digital silence.
#[derive(Debug, Clone, Default)]
pub struct LoudnessProfile {
    duration_ms: u64,
    /// (start_ms, end_ms, level_db), ascending, non-overlapping
    regions: Vec<(u64, u64, f64)>,
}

impl LoudnessProfile {
    /// Profile of `duration_ms` that is entirely digital silence
    pub fn silent(duration_ms: u64) -> Self {
        Self {
            duration_ms,
            regions: Vec::new(),
        }
    }

    /// Add a region at `level_db`; regions must be added in ascending order
    pub fn with_region(mut self, start_ms: u64, end_ms: u64, level_db: f64) -> Self {
        let end_ms = end_ms.min(self.duration_ms);
        if end_ms > start_ms {
            self.regions.push((start_ms, end_ms, level_db));
        }
        self
    }
}

impl LoudnessSource for LoudnessProfile {
    fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    fn loudness_db(&self, start_ms: u64, end_ms: u64) -> f64 {
        let end_ms = end_ms.min(self.duration_ms);
        if end_ms <= start_ms {
            return f64::NEG_INFINITY;
        }

        let weighted_power: f64 = self
            .regions
            .iter()
            .map(|&(s, e, db)| {
                let overlap = e.min(end_ms).saturating_sub(s.max(start_ms));
                overlap as f64 * db_to_linear(db).powi(2)
            })
            .sum();

        let mean_power = weighted_power / (end_ms - start_ms) as f64;
        linear_to_db(mean_power.sqrt())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rms_calculation() {
        // Sine wave with amplitude 1.0 has RMS 1/sqrt(2)
        let samples: Vec<f32> = (0..100)
            .map(|i| (2.0 * std::f32::consts::PI * i as f32 / 100.0).sin())
            .collect();

        let rms = calculate_rms(&samples);
        assert!((rms - std::f64::consts::FRAC_1_SQRT_2).abs() < 0.01);
    }

    #[test]
    fn test_db_conversion() {
        let linear = db_to_linear(-60.0);
        assert!((linear - 0.001).abs() < 1e-6);
        assert!((linear_to_db(linear) + 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_digital_silence_is_negative_infinity() {
        assert_eq!(linear_to_db(0.0), f64::NEG_INFINITY);
        assert_eq!(calculate_rms(&[]), 0.0);
    }

    #[test]
    fn test_duration_truncates() {
        // 44100 frames at 44.1kHz = 1000ms; one extra frame does not add a ms
        let track = AudioTrack::from_mono(vec![0.0; 44_101], 44_100).unwrap();
        assert_eq!(track.total_duration_ms(), 1000);
    }

    #[test]
    fn test_stereo_frames_and_slice() {
        // 2 channels, 1000 frames at 1kHz: one frame per ms
        let samples: Vec<f32> = (0..2000).map(|i| i as f32).collect();
        let track = AudioTrack::new(samples, 1000, 2).unwrap();

        assert_eq!(track.frames(), 1000);
        assert_eq!(track.total_duration_ms(), 1000);

        let slice = track.slice(10, 12);
        assert_eq!(slice, &[20.0, 21.0, 22.0, 23.0]);

        // Past the end clamps
        assert!(track.slice(2000, 3000).is_empty());
    }

    #[test]
    fn test_rejects_ragged_channels() {
        let result = AudioTrack::new(vec![0.0; 3], 44_100, 2);
        assert!(matches!(result, Err(SplitError::InvalidParameter(_))));
    }

    #[test]
    fn test_track_loudness_of_constant_signal() {
        let track = AudioTrack::from_mono(vec![0.5; 8_000], 8_000).unwrap();
        let db = track.loudness_db(0, 100);
        // 20*log10(0.5) ~= -6.02
        assert!((db + 6.0206).abs() < 0.001);
    }

    #[test]
    fn test_profile_region_levels() {
        let profile = LoudnessProfile::silent(3000).with_region(1000, 2000, -10.0);

        assert_eq!(profile.loudness_db(0, 1000), f64::NEG_INFINITY);
        assert!((profile.loudness_db(1000, 1100) + 10.0).abs() < 1e-9);
        assert_eq!(profile.loudness_db(2000, 3000), f64::NEG_INFINITY);
    }

    #[test]
    fn test_profile_straddling_window_averages_power() {
        let profile = LoudnessProfile::silent(200).with_region(0, 100, 0.0);
        // Half the window at full scale: mean power 0.5 -> ~-3.01 dB
        let db = profile.loudness_db(50, 150);
        assert!((db + 3.0103).abs() < 0.001);
    }
}
