//! Audio Decoding Utilities
//!
//! **Purpose:** Decode an audio file to an in-memory interleaved f32 [`AudioTrack`]
//!
//! Uses symphonia for format-agnostic decoding (MP3, FLAC, AAC, WAV, OGG, etc.)

use std::path::Path;
use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::{DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

use crate::error::{SplitError, SplitResult};
use crate::models::AudioTrack;

/// Decode an audio file to interleaved f32 PCM
///
/// **Algorithm:**
/// 1. Open file and probe format using symphonia
/// 2. Find default audio track
/// 3. Create decoder for track codec
/// 4. Decode all packets, copying each into an interleaved sample buffer
///
/// Corrupt packets are skipped with a warning; anything that prevents
/// reading the stream at all is a `DecodeFailure`.
pub fn decode_audio_file(file_path: &Path) -> SplitResult<AudioTrack> {
    tracing::debug!(path = %file_path.display(), "Decoding audio file");

    let fail = |what: &str, e: &dyn std::fmt::Display| {
        SplitError::DecodeFailure(format!("{} {}: {}", what, file_path.display(), e))
    };

    let file = std::fs::File::open(file_path).map_err(|e| fail("Failed to open", &e))?;
    let mss = MediaSourceStream::new(Box::new(file), Default::default());

    // Create format hint from file extension
    let mut hint = Hint::new();
    if let Some(extension) = file_path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(extension);
    }

    let probed = symphonia::default::get_probe()
        .format(&hint, mss, &FormatOptions::default(), &MetadataOptions::default())
        .map_err(|e| fail("Unsupported format in", &e))?;

    let mut format = probed.format;

    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or_else(|| SplitError::DecodeFailure("No audio track found in file".to_string()))?;

    let track_id = track.id;
    let sample_rate = track
        .codec_params
        .sample_rate
        .ok_or_else(|| SplitError::DecodeFailure("Sample rate unknown".to_string()))?;
    let mut channels = track.codec_params.channels.map(|c| c.count()).unwrap_or(0);

    let mut decoder = symphonia::default::get_codecs()
        .make(&track.codec_params, &DecoderOptions::default())
        .map_err(|e| fail("Failed to create decoder for", &e))?;

    let mut all_samples: Vec<f32> = Vec::new();
    let mut sample_buf: Option<SampleBuffer<f32>> = None;
    let mut skipped_packets = 0usize;

    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            Err(SymphoniaError::IoError(e)) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
                // End of stream
                break;
            }
            Err(SymphoniaError::ResetRequired) => break,
            Err(e) => return Err(fail("Error reading packet in", &e)),
        };

        if packet.track_id() != track_id {
            continue;
        }

        let decoded = match decoder.decode(&packet) {
            Ok(decoded) => decoded,
            Err(SymphoniaError::DecodeError(e)) => {
                skipped_packets += 1;
                tracing::warn!(path = %file_path.display(), error = e, "Skipping corrupt packet");
                continue;
            }
            Err(e) => return Err(fail("Failed to decode packet in", &e)),
        };

        let spec = *decoded.spec();
        channels = spec.channels.count();

        let buf = sample_buf
            .get_or_insert_with(|| SampleBuffer::new(decoded.capacity() as u64, spec));
        if buf.capacity() < decoded.capacity() * channels {
            *buf = SampleBuffer::new(decoded.capacity() as u64, spec);
        }
        buf.copy_interleaved_ref(decoded);
        all_samples.extend_from_slice(buf.samples());
    }

    if channels == 0 {
        return Err(SplitError::DecodeFailure("Channels unknown".to_string()));
    }

    tracing::debug!(
        path = %file_path.display(),
        sample_rate,
        channels,
        total_samples = all_samples.len(),
        skipped_packets,
        "Audio decoding complete"
    );

    AudioTrack::new(all_samples, sample_rate, channels)
        .map_err(|e| SplitError::DecodeFailure(e.to_string()))
}
