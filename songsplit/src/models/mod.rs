//! Data models for songsplit

pub mod audio_track;
pub mod parameters;
pub mod segment;

pub use audio_track::{AudioTrack, LoudnessProfile, LoudnessSource};
pub use parameters::{OutputFormat, SplitParameters};
pub use segment::{ContentSpan, SilenceInterval};
