//! Error types for songsplit
//!
//! Pre-flight errors (`InputNotFound`, `InvalidFormat`) carry fixed messages
//! since they are printed verbatim as the single line of output of a failed run.

use std::path::PathBuf;
use thiserror::Error;

/// Segmentation pipeline error
#[derive(Debug, Error)]
pub enum SplitError {
    /// Input path does not exist or is not a regular file
    #[error("Input file not found")]
    InputNotFound(PathBuf),

    /// Input MIME type (guessed from its extension) is not audio/*
    #[error("Invalid input file format")]
    InvalidFormat(PathBuf),

    /// Threshold, duration, chunk size or output format out of range
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Decoded audio has zero length
    #[error("Decoded audio track is empty")]
    EmptyTrack,

    /// Unsupported container/codec or corrupt data
    #[error("Failed to decode audio: {0}")]
    DecodeFailure(String),

    /// One segment could not be written
    #[error("Failed to export song {index} to {}: {reason}", path.display())]
    ExportFailure {
        index: usize,
        path: PathBuf,
        reason: String,
    },

    /// Configuration file problem
    #[error(transparent)]
    Config(#[from] songsplit_common::Error),
}

/// Result type for pipeline operations
pub type SplitResult<T> = Result<T, SplitError>;
