//! Song report rendering
//!
//! A pure 1:1 projection of content spans; no reordering, no filtering.

use serde::Serialize;
use songsplit_common::human_time::format_timestamp_ms;
use std::fmt::Write as _;

use crate::models::ContentSpan;

/// Report header line
pub const REPORT_HEADER: &str = "Song Report:";

/// One report row per content span
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SegmentReportEntry {
    pub song_number: usize,
    pub start: String,
    pub end: String,
    pub duration: String,
    pub start_ms: u64,
    pub end_ms: u64,
    pub duration_ms: u64,
}

impl SegmentReportEntry {
    fn from_span(span: &ContentSpan) -> Self {
        let duration_ms = span.duration_ms();
        Self {
            song_number: span.index,
            start: format_timestamp_ms(span.start_ms),
            end: format_timestamp_ms(span.end_ms),
            duration: format_timestamp_ms(duration_ms),
            start_ms: span.start_ms,
            end_ms: span.end_ms,
            duration_ms,
        }
    }
}

/// Map spans to report entries
pub fn format(spans: &[ContentSpan]) -> Vec<SegmentReportEntry> {
    spans.iter().map(SegmentReportEntry::from_span).collect()
}

/// Text report: header, then `Song {n}: Start = .., End = .., Duration = ..`
pub fn render_text(entries: &[SegmentReportEntry]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", REPORT_HEADER);
    for entry in entries {
        let _ = writeln!(
            out,
            "Song {}: Start = {}, End = {}, Duration = {}",
            entry.song_number, entry.start, entry.end, entry.duration
        );
    }
    out
}

/// Pretty-printed JSON array of entries
pub fn render_json(entries: &[SegmentReportEntry]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(entries)
}
