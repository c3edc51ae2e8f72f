//! songsplit library interface
//!
//! Splits one long recording into songs separated by silence.
//! Exposes public APIs for the binary and integration testing.

pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;
pub mod workflow;

pub use crate::error::{SplitError, SplitResult};
pub use crate::workflow::pipeline::{Pipeline, SplitOutcome};
