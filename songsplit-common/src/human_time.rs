//! Human-readable time formatting for segment reports
//!
//! Report timestamps use a fixed `H:MM:SS.ffffff` layout: hours unpadded,
//! minutes and seconds two digits, six fractional (microsecond) digits.

const MICROS_PER_MILLI: u64 = 1_000;
const MICROS_PER_SECOND: u64 = 1_000_000;
const SECONDS_PER_MINUTE: u64 = 60;
const SECONDS_PER_HOUR: u64 = 3_600;

/// Format a millisecond offset or duration as `H:MM:SS.ffffff`.
///
/// # Examples
///
/// ```
/// use songsplit_common::human_time::format_timestamp_ms;
///
/// assert_eq!(format_timestamp_ms(0), "0:00:00.000000");
/// assert_eq!(format_timestamp_ms(2_000), "0:00:02.000000");
/// assert_eq!(format_timestamp_ms(61_250), "0:01:01.250000");
/// assert_eq!(format_timestamp_ms(3_723_004), "1:02:03.004000");
/// ```
pub fn format_timestamp_ms(ms: u64) -> String {
    format_timestamp_us(ms.saturating_mul(MICROS_PER_MILLI))
}

/// Format a microsecond offset as `H:MM:SS.ffffff`.
pub fn format_timestamp_us(us: u64) -> String {
    let total_seconds = us / MICROS_PER_SECOND;
    let micros = us % MICROS_PER_SECOND;

    let hours = total_seconds / SECONDS_PER_HOUR;
    let minutes = (total_seconds % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE;
    let seconds = total_seconds % SECONDS_PER_MINUTE;

    format!("{}:{:02}:{:02}.{:06}", hours, minutes, seconds, micros)
}
