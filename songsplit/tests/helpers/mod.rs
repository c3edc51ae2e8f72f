//! Test Helper Utilities
//!
//! Shared utilities for testing songsplit

#![allow(dead_code, unused_imports)]

pub mod audio_generator;
pub mod log_capture;

pub use audio_generator::{generate_test_wav, AudioConfig, Part};
pub use log_capture::LogCapture;
