//! Silence intervals and content spans (half-open millisecond ranges)

use serde::{Deserialize, Serialize};

/// Maximal quiet run that qualifies as a song boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SilenceInterval {
    pub start_ms: u64,
    pub end_ms: u64,
}

impl SilenceInterval {
    pub fn new(start_ms: u64, end_ms: u64) -> Self {
        Self { start_ms, end_ms }
    }

    pub fn duration_ms(&self) -> u64 {
        self.end_ms - self.start_ms
    }
}

/// One candidate song
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentSpan {
    /// 1-based position in the span sequence
    pub index: usize,
    pub start_ms: u64,
    pub end_ms: u64,
}

impl ContentSpan {
    pub fn new(index: usize, start_ms: u64, end_ms: u64) -> Self {
        Self {
            index,
            start_ms,
            end_ms,
        }
    }

    pub fn duration_ms(&self) -> u64 {
        self.end_ms - self.start_ms
    }
}
