//! Split workflow
//!
//! decode → detect silence → build spans → report + export

pub mod pipeline;

pub use pipeline::{segment_track, Pipeline, Segmentation, SplitOutcome};
