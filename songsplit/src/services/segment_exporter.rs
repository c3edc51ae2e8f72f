//! Song export
//!
//! WAV is written directly as 16-bit PCM. MP3 and OGG go through the
//! `ffmpeg` executable: the slice is written to a scratch WAV first and
//! ffmpeg encodes it to the target path.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::error::{SplitError, SplitResult};
use crate::models::{AudioTrack, ContentSpan, OutputFormat};

/// Writes one content span to one file
pub trait SegmentExporter {
    fn export(
        &self,
        track: &AudioTrack,
        span: &ContentSpan,
        path: &Path,
        format: OutputFormat,
    ) -> SplitResult<()>;
}

/// `<dir>/<input_stem><NN>.<ext>` with NN the 2-digit zero-padded index
pub fn output_path(
    input: &Path,
    output_dir: Option<&Path>,
    index: usize,
    format: OutputFormat,
) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let dir = output_dir
        .map(Path::to_path_buf)
        .or_else(|| input.parent().map(Path::to_path_buf))
        .unwrap_or_default();

    dir.join(format!("{}{:02}.{}", stem, index, format.extension()))
}

/// Write interleaved f32 samples as 16-bit PCM WAV
pub fn write_wav(
    path: &Path,
    samples: &[f32],
    sample_rate: u32,
    channels: usize,
) -> Result<(), hound::Error> {
    let spec = hound::WavSpec {
        channels: channels as u16,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut writer = hound::WavWriter::create(path, spec)?;
    for &sample in samples {
        writer.write_sample((sample.clamp(-1.0, 1.0) * i16::MAX as f32) as i16)?;
    }
    writer.finalize()
}

/// File exporter for WAV, MP3 and OGG
#[derive(Debug, Clone)]
pub struct FileExporter {
    ffmpeg_path: String,
}

impl FileExporter {
    pub fn new(ffmpeg_path: impl Into<String>) -> Self {
        Self {
            ffmpeg_path: ffmpeg_path.into(),
        }
    }

    fn encode_with_ffmpeg(
        &self,
        wav: &Path,
        output: &Path,
        format: OutputFormat,
    ) -> Result<(), String> {
        let codec = match format {
            OutputFormat::Mp3 => "libmp3lame",
            OutputFormat::Ogg => "libvorbis",
            OutputFormat::Wav => "pcm_s16le",
        };

        tracing::debug!(
            input = %wav.display(),
            output = %output.display(),
            codec,
            "Encoding with ffmpeg"
        );

        let result = Command::new(&self.ffmpeg_path)
            .args(["-y", "-loglevel", "error", "-i"])
            .arg(wav)
            .args(["-c:a", codec])
            .arg(output)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| format!("failed to run {}: {}", self.ffmpeg_path, e))?;

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr);
            return Err(format!(
                "ffmpeg exited with code {:?}: {}",
                result.status.code(),
                stderr.trim()
            ));
        }

        Ok(())
    }
}

impl Default for FileExporter {
    fn default() -> Self {
        Self::new("ffmpeg")
    }
}

impl SegmentExporter for FileExporter {
    fn export(
        &self,
        track: &AudioTrack,
        span: &ContentSpan,
        path: &Path,
        format: OutputFormat,
    ) -> SplitResult<()> {
        let failure = |reason: String| SplitError::ExportFailure {
            index: span.index,
            path: path.to_path_buf(),
            reason,
        };

        let samples = track.slice(span.start_ms, span.end_ms);

        match format {
            OutputFormat::Wav => {
                write_wav(path, samples, track.sample_rate(), track.channels())
                    .map_err(|e| failure(e.to_string()))?;
            }
            OutputFormat::Mp3 | OutputFormat::Ogg => {
                let scratch = tempfile::Builder::new()
                    .prefix("songsplit-")
                    .suffix(".wav")
                    .tempfile()
                    .map_err(|e| failure(e.to_string()))?;
                write_wav(scratch.path(), samples, track.sample_rate(), track.channels())
                    .map_err(|e| failure(e.to_string()))?;
                self.encode_with_ffmpeg(scratch.path(), path, format)
                    .map_err(failure)?;
            }
        }

        Ok(())
    }
}
