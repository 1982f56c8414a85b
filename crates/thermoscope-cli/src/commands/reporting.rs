//! Shared human-readable output helpers.

use colored::Colorize;
use thermoscope_core::ChannelTiming;

use super::json_output::{warning_codes, JsonWarning};

/// Print a non-fatal warning on stderr.
pub(crate) fn print_warning(message: &str) {
    eprintln!("{} {}", "warning:".yellow().bold(), message);
}

/// Warning for a capture that ended mid-frame.
pub(crate) fn truncation_warning(message: String) -> JsonWarning {
    JsonWarning::new(warning_codes::TRUNCATED_CAPTURE, message)
}

/// Warning for an event whose end could not be confirmed, if applicable.
pub(crate) fn unconfirmed_offset_warning(name: &str, timing: &ChannelTiming) -> Option<JsonWarning> {
    timing.detection.is_low_confidence().then(|| {
        JsonWarning::new(
            warning_codes::UNCONFIRMED_OFFSET,
            format!(
                "{}: event end not confirmed by a sustained low run; end is the last sample of the capture",
                name
            ),
        )
        .with_channel(name)
    })
}

/// One-line event summary for a channel.
///
/// `start=<i> (<us> us), end=<i> (<us> us), dur=<ms> ms`, or `not found`.
pub(crate) fn format_event(timing: &ChannelTiming) -> String {
    match (
        timing.detection.span(),
        timing.start_us,
        timing.end_us,
        timing.duration_ms,
    ) {
        (Some((s, e)), Some(start_us), Some(end_us), Some(dur_ms)) => {
            let mut line = format!(
                "start={} ({:.1} us), end={} ({:.1} us), dur={:.3} ms",
                s, start_us, e, end_us, dur_ms
            );
            if timing.detection.is_low_confidence() {
                line.push_str(" [end unconfirmed]");
            }
            line
        }
        _ => "not found".to_string(),
    }
}

/// Threshold summary for a channel.
pub(crate) fn format_threshold(timing: &ChannelTiming, k: f64) -> String {
    format!(
        "noise_floor={:.3}  thr={:.3}  k={}",
        timing.detection.noise_floor, timing.detection.threshold, k
    )
}
