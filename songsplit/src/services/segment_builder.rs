//! Song span derivation
//!
//! Songs are the gaps between qualifying silence intervals. Two formulations
//! are provided and must agree for every input:
//! - [`build_spans`]: complement of an already detected silence sequence
//! - [`detect_nonsilent`]: direct slicing of non-silent runs from the source

use crate::error::SplitResult;
use crate::models::{ContentSpan, LoudnessSource, SilenceInterval};
use crate::services::silence_detector::{analysis_windows, SilenceDetector};

/// Convert silence intervals to content spans
///
/// **Algorithm:**
/// - Walk the silences in ascending order with a cursor starting at 0
/// - Content before a silence becomes a span; the cursor jumps past the silence
/// - Whatever follows the last silence becomes the final span
/// - No silence: the entire track is one span
/// - Silence over the entire track: no spans
pub fn build_spans(total_duration_ms: u64, silences: &[SilenceInterval]) -> Vec<ContentSpan> {
    let mut spans = Vec::new();
    let mut cursor = 0u64;

    for silence in silences {
        if silence.start_ms > cursor {
            spans.push(ContentSpan::new(spans.len() + 1, cursor, silence.start_ms));
        }
        cursor = cursor.max(silence.end_ms);
    }

    if cursor < total_duration_ms {
        spans.push(ContentSpan::new(spans.len() + 1, cursor, total_duration_ms));
    }

    spans
}

/// Slice non-silent runs directly from the source
///
/// Quiet runs shorter than the detector's minimum are kept inside the
/// surrounding content rather than splitting it.
pub fn detect_nonsilent<S: LoudnessSource + ?Sized>(
    source: &S,
    detector: &SilenceDetector,
) -> SplitResult<Vec<ContentSpan>> {
    let (total_ms, chunk_ms, min_ms) = detector.checked_window(source)?;

    let mut spans = Vec::new();
    let mut content_start: Option<u64> = None;
    let mut quiet_start: Option<u64> = None;

    for (start, end) in analysis_windows(total_ms, chunk_ms) {
        if detector.is_quiet(source, start, end) {
            if quiet_start.is_none() {
                quiet_start = Some(start);
            }
            continue;
        }

        match quiet_start.take() {
            // Long quiet run: close the song before it, start a new one here
            Some(q) if start - q >= min_ms => {
                if let Some(c) = content_start.take() {
                    spans.push(ContentSpan::new(spans.len() + 1, c, q));
                }
                content_start = Some(start);
            }
            // Short quiet run folds into content
            Some(q) => {
                content_start = content_start.or(Some(q));
            }
            None => {
                content_start = content_start.or(Some(start));
            }
        }
    }

    match quiet_start {
        Some(q) if total_ms - q >= min_ms => {
            if let Some(c) = content_start {
                spans.push(ContentSpan::new(spans.len() + 1, c, q));
            }
        }
        Some(q) => {
            let c = content_start.unwrap_or(q);
            spans.push(ContentSpan::new(spans.len() + 1, c, total_ms));
        }
        None => {
            if let Some(c) = content_start {
                spans.push(ContentSpan::new(spans.len() + 1, c, total_ms));
            }
        }
    }

    Ok(spans)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LoudnessProfile;

    fn spans_of(spans: &[ContentSpan]) -> Vec<(usize, u64, u64)> {
        spans.iter().map(|s| (s.index, s.start_ms, s.end_ms)).collect()
    }

    #[test]
    fn test_no_silence_is_one_span() {
        let spans = build_spans(5000, &[]);
        assert_eq!(spans_of(&spans), vec![(1, 0, 5000)]);
    }

    #[test]
    fn test_full_silence_is_no_span() {
        let spans = build_spans(5000, &[SilenceInterval::new(0, 5000)]);
        assert!(spans.is_empty());
    }

    #[test]
    fn test_leading_and_trailing_silence_trimmed() {
        let silences = [
            SilenceInterval::new(0, 1000),
            SilenceInterval::new(3000, 4000),
            SilenceInterval::new(6000, 10_000),
        ];
        let spans = build_spans(10_000, &silences);
        assert_eq!(spans_of(&spans), vec![(1, 1000, 3000), (2, 4000, 6000)]);
    }

    #[test]
    fn test_content_at_both_ends() {
        let silences = [SilenceInterval::new(2000, 3000)];
        let spans = build_spans(5000, &silences);
        assert_eq!(spans_of(&spans), vec![(1, 0, 2000), (2, 3000, 5000)]);
    }

    #[test]
    fn test_adjacent_silences_do_not_create_empty_span() {
        let silences = [
            SilenceInterval::new(1000, 2000),
            SilenceInterval::new(2000, 3000),
        ];
        let spans = build_spans(4000, &silences);
        assert_eq!(spans_of(&spans), vec![(1, 0, 1000), (2, 3000, 4000)]);
    }

    #[test]
    fn test_overlapping_silences_use_furthest_end() {
        let silences = [
            SilenceInterval::new(1000, 2500),
            SilenceInterval::new(2000, 2200),
        ];
        let spans = build_spans(4000, &silences);
        assert_eq!(spans_of(&spans), vec![(1, 0, 1000), (2, 2500, 4000)]);
    }

    #[test]
    fn test_detect_nonsilent_folds_short_quiet_run() {
        let profile = LoudnessProfile::silent(6000)
            .with_region(0, 2000, -10.0)
            .with_region(3000, 6000, -10.0);
        let detector = SilenceDetector::new().with_min_silence_ms(1500);

        let spans = detect_nonsilent(&profile, &detector).unwrap();
        assert_eq!(spans_of(&spans), vec![(1, 0, 6000)]);
    }

    #[test]
    fn test_detect_nonsilent_short_leading_quiet_is_content() {
        let profile = LoudnessProfile::silent(3000).with_region(500, 3000, -10.0);
        let detector = SilenceDetector::new();

        let spans = detect_nonsilent(&profile, &detector).unwrap();
        assert_eq!(spans_of(&spans), vec![(1, 0, 3000)]);
    }

    #[test]
    fn test_detect_nonsilent_all_silent() {
        let profile = LoudnessProfile::silent(3000);
        let spans = detect_nonsilent(&profile, &SilenceDetector::new()).unwrap();
        assert!(spans.is_empty());
    }

    #[test]
    fn test_formulations_agree_on_mixed_profile() {
        let profile = LoudnessProfile::silent(12_000)
            .with_region(300, 2000, -20.0)
            .with_region(2400, 5000, -20.0)
            .with_region(7000, 11_500, -20.0);
        let detector = SilenceDetector::new();

        let silences = detector.detect(&profile).unwrap();
        let by_complement = build_spans(12_000, &silences);
        let by_slicing = detect_nonsilent(&profile, &detector).unwrap();

        assert_eq!(by_complement, by_slicing);
        assert_eq!(
            spans_of(&by_complement),
            vec![(1, 0, 5000), (2, 7000, 12_000)]
        );
    }
}
