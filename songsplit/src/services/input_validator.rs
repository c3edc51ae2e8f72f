//! Pre-flight input checks
//!
//! Runs before any decoding. The MIME type is guessed from the file
//! extension only; content is not sniffed, so a mislabelled file passes
//! here and fails later at decode.

use std::path::Path;

use crate::error::{SplitError, SplitResult};

/// Guess a MIME type from the file extension (case-insensitive)
pub fn guess_mime_type(path: &Path) -> Option<mime::Mime> {
    mime_guess::from_path(path).first()
}

/// Whether the guessed MIME type is `audio/*`
pub fn is_audio_file(path: &Path) -> bool {
    guess_mime_type(path).is_some_and(|m| m.type_() == mime::AUDIO)
}

/// Validate the input path
///
/// Fails with `InputNotFound` when the path is missing or not a regular
/// file, then with `InvalidFormat` when it does not look like audio.
pub fn validate_input(path: &Path) -> SplitResult<()> {
    if !path.is_file() {
        return Err(SplitError::InputNotFound(path.to_path_buf()));
    }

    if !is_audio_file(path) {
        return Err(SplitError::InvalidFormat(path.to_path_buf()));
    }

    Ok(())
}
