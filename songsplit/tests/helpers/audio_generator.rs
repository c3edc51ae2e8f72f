//! Audio Test Fixture Generator
//!
//! Builds WAV files out of alternating tone and silence parts

use std::path::{Path, PathBuf};

/// One stretch of generated audio
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Part {
    /// 440Hz sine at the given peak amplitude (0.0..=1.0)
    Tone { ms: u64, amplitude: f32 },
    /// Digital silence
    Silence { ms: u64 },
}

impl Part {
    pub fn tone(ms: u64) -> Self {
        Part::Tone { ms, amplitude: 0.3 }
    }

    pub fn silence(ms: u64) -> Self {
        Part::Silence { ms }
    }

    fn ms(&self) -> u64 {
        match *self {
            Part::Tone { ms, .. } | Part::Silence { ms } => ms,
        }
    }
}

/// Configuration for generated audio
#[derive(Debug, Clone)]
pub struct AudioConfig {
    pub sample_rate: u32,
    pub channels: u16,
    pub parts: Vec<Part>,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            sample_rate: 8000,
            channels: 2,
            parts: vec![Part::tone(2000)],
        }
    }
}

impl AudioConfig {
    pub fn with_parts(parts: Vec<Part>) -> Self {
        Self {
            parts,
            ..Default::default()
        }
    }

    pub fn total_ms(&self) -> u64 {
        self.parts.iter().map(Part::ms).sum()
    }
}

/// Generate a 16-bit PCM WAV file from `config.parts`
pub fn generate_test_wav(path: &Path, config: &AudioConfig) -> anyhow::Result<PathBuf> {
    let spec = hound::WavSpec {
        channels: config.channels,
        sample_rate: config.sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut writer = hound::WavWriter::create(path, spec)?;
    let mut frame_index: u64 = 0;

    for part in &config.parts {
        let frames = part.ms() * config.sample_rate as u64 / 1000;
        for _ in 0..frames {
            let sample = match *part {
                Part::Silence { .. } => 0,
                Part::Tone { amplitude, .. } => {
                    let t = frame_index as f32 / config.sample_rate as f32;
                    let wave = (2.0 * std::f32::consts::PI * 440.0 * t).sin();
                    (amplitude * wave * i16::MAX as f32) as i16
                }
            };
            for _ in 0..config.channels {
                writer.write_sample(sample)?;
            }
            frame_index += 1;
        }
    }

    writer.finalize()?;
    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_generate_wav_with_silence() {
        let temp_dir = TempDir::new().unwrap();
        let wav_path = temp_dir.path().join("test_silence.wav");

        let config = AudioConfig::with_parts(vec![Part::tone(1000), Part::silence(500)]);
        generate_test_wav(&wav_path, &config).unwrap();

        let reader = hound::WavReader::open(&wav_path).unwrap();
        assert_eq!(reader.spec().channels, 2);
        assert_eq!(reader.duration(), 12_000);
        assert_eq!(config.total_ms(), 1500);
    }
}
