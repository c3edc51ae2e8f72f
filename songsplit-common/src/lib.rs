//! # songsplit common library
//!
//! Shared code for the songsplit workspace:
//! - Error type for configuration loading
//! - TOML configuration file loading and resolution
//! - Duration formatting for segment reports

pub mod config;
pub mod error;
pub mod human_time;

pub use error::{Error, Result};
