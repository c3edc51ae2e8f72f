//! Pipeline Orchestrator
//!
//! One synchronous pass over a single input file:
//! - **Phase 0**: Pre-flight (input exists, looks like audio, parameters in range)
//! - **Phase 1**: Decode to an in-memory [`AudioTrack`]
//! - **Phase 2**: Silence detection and span derivation (pure)
//! - **Phase 3**: Best-effort export of each span
//!
//! # Error Handling
//! - Pre-flight and decode errors abort the run before anything is written
//! - Export errors are isolated per song and collected in the outcome
//!
//! # Example
//! ```rust,ignore
//! let pipeline = Pipeline::new(RunConfig::new("live_set.mp3"));
//! pipeline.preflight()?;
//! let outcome = pipeline.process()?;
//! ```

use std::path::PathBuf;
use tracing::{debug, error, info};

use crate::config::RunConfig;
use crate::error::{SplitError, SplitResult};
use crate::models::{AudioTrack, ContentSpan, SilenceInterval};
use crate::services::input_validator::validate_input;
use crate::services::report_formatter::{self, SegmentReportEntry};
use crate::services::segment_builder::build_spans;
use crate::services::segment_exporter::{output_path, FileExporter, SegmentExporter};
use crate::services::silence_detector::SilenceDetector;
use crate::utils::audio_decoder::decode_audio_file;

/// Spans of one track, before any export
#[derive(Debug, Clone, PartialEq)]
pub struct Segmentation {
    pub total_duration_ms: u64,
    pub silences: Vec<SilenceInterval>,
    pub spans: Vec<ContentSpan>,
}

/// Result of a full run
#[derive(Debug)]
pub struct SplitOutcome {
    pub segmentation: Segmentation,
    /// One entry per span, ascending by song number
    pub report: Vec<SegmentReportEntry>,
    /// Files written successfully, ascending by song number
    pub exported: Vec<PathBuf>,
    /// Per-song export failures (`SplitError::ExportFailure`)
    pub failures: Vec<SplitError>,
}

impl SplitOutcome {
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}

/// Segment a decoded track with the given detector
pub fn segment_track(track: &AudioTrack, detector: &SilenceDetector) -> SplitResult<Segmentation> {
    let silences = detector.detect(track)?;
    let total_duration_ms = track.total_duration_ms();
    let spans = build_spans(total_duration_ms, &silences);

    Ok(Segmentation {
        total_duration_ms,
        silences,
        spans,
    })
}

/// Pipeline orchestrator
pub struct Pipeline<E: SegmentExporter = FileExporter> {
    config: RunConfig,
    exporter: E,
}

impl Pipeline<FileExporter> {
    /// Pipeline exporting through [`FileExporter`]
    pub fn new(config: RunConfig) -> Self {
        let exporter = FileExporter::new(config.ffmpeg_path.clone());
        Self { config, exporter }
    }
}

impl<E: SegmentExporter> Pipeline<E> {
    /// Pipeline with a custom exporter
    pub fn with_exporter(config: RunConfig, exporter: E) -> Self {
        Self { config, exporter }
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Phase 0: checks that need no decoding
    pub fn preflight(&self) -> SplitResult<()> {
        validate_input(&self.config.input)?;
        self.config.params.validate()?;
        Ok(())
    }

    /// Phases 1-3; call [`Pipeline::preflight`] first
    pub fn process(&self) -> SplitResult<SplitOutcome> {
        let input = &self.config.input;
        info!(path = %input.display(), "Splitting audio file");

        // Phase 1: Decode
        let track = decode_audio_file(input)?;
        info!(
            duration_ms = track.total_duration_ms(),
            sample_rate = track.sample_rate(),
            channels = track.channels(),
            "Decoded audio"
        );

        // Phase 2: Detect silence, derive spans
        let detector = SilenceDetector::from_parameters(&self.config.params);
        let segmentation = segment_track(&track, &detector)?;
        for silence in &segmentation.silences {
            debug!(start_ms = silence.start_ms, end_ms = silence.end_ms, "Silence interval");
        }
        info!(
            silences = segmentation.silences.len(),
            songs = segmentation.spans.len(),
            "Segmentation complete"
        );

        let report = report_formatter::format(&segmentation.spans);

        // Phase 3: Export
        let (exported, failures) = if self.config.dry_run {
            info!("Dry run, skipping export");
            (Vec::new(), Vec::new())
        } else {
            self.export_all(&track, &segmentation.spans)
        };

        Ok(SplitOutcome {
            segmentation,
            report,
            exported,
            failures,
        })
    }

    /// Preflight then process
    pub fn run(&self) -> SplitResult<SplitOutcome> {
        self.preflight()?;
        self.process()
    }

    /// Export every span; a failure does not stop the remaining songs
    fn export_all(
        &self,
        track: &AudioTrack,
        spans: &[ContentSpan],
    ) -> (Vec<PathBuf>, Vec<SplitError>) {
        let format = self.config.params.output_format;
        let mut exported = Vec::with_capacity(spans.len());
        let mut failures = Vec::new();

        for span in spans {
            let path = output_path(
                &self.config.input,
                self.config.output_dir.as_deref(),
                span.index,
                format,
            );

            match self.exporter.export(track, span, &path, format) {
                Ok(()) => {
                    debug!(song = span.index, path = %path.display(), "Exported song");
                    exported.push(path);
                }
                Err(e) => {
                    error!(song = span.index, error = %e, "Export failed");
                    failures.push(e);
                }
            }
        }

        info!(
            exported = exported.len(),
            failed = failures.len(),
            "Export complete"
        );

        (exported, failures)
    }
}
