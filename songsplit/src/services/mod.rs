//! Services for songsplit
//!
//! Pure segmentation core (silence detection, span building, report
//! formatting) plus the input and export collaborators around it.

pub mod input_validator;
pub mod report_formatter;
pub mod segment_builder;
pub mod segment_exporter;
pub mod silence_detector;

pub use report_formatter::SegmentReportEntry;
pub use segment_builder::{build_spans, detect_nonsilent};
pub use segment_exporter::{FileExporter, SegmentExporter};
pub use silence_detector::{detect, SilenceDetector};
