//! Per-channel event timing and left/right skew.

use serde::{Deserialize, Serialize};

use crate::capture::StereoCapture;
use crate::config::TimingConfig;
use crate::detect::DetectionResult;
use crate::envelope::rms_envelope;
use crate::error::{CaptureError, CaptureResult};

/// Detection outcome for one channel, with times derived from the indices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelTiming {
    /// Raw detection result.
    #[serde(flatten)]
    pub detection: DetectionResult,
    /// Event start in microseconds from the start of the capture.
    pub start_us: Option<f64>,
    /// Event end in microseconds from the start of the capture.
    pub end_us: Option<f64>,
    /// Event duration in milliseconds.
    pub duration_ms: Option<f64>,
}

impl ChannelTiming {
    fn new(detection: DetectionResult, sample_rate: u32) -> Self {
        let fs = sample_rate as f64;
        let span = detection.span();
        Self {
            detection,
            start_us: span.map(|(s, _)| s as f64 / fs * 1e6),
            end_us: span.map(|(_, e)| e as f64 / fs * 1e6),
            duration_ms: span.map(|(s, e)| (e - s) as f64 / fs * 1e3),
        }
    }
}

/// Timing analysis of a stereo capture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimingReport {
    /// Number of stereo frames analyzed.
    pub num_frames: usize,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Capture duration in milliseconds.
    pub duration_ms: f64,
    /// RMS window in samples.
    pub window_samples: usize,
    /// RMS window in microseconds, after rounding to whole samples.
    pub window_us: f64,
    /// Noise estimation window in samples.
    pub noise_window_samples: usize,
    /// Debounce hold in samples.
    pub hold_samples: usize,
    /// Threshold multiplier.
    pub threshold_multiplier: f64,
    /// Left channel result.
    pub left: ChannelTiming,
    /// Right channel result.
    pub right: ChannelTiming,
    /// Right start minus left start, in microseconds, when both were found.
    pub start_diff_us: Option<f64>,
}

/// Runs envelope extraction and event location on both channels.
///
/// The envelope window and locator come from `config`.
///
/// # Errors
/// Fails if `config` is invalid, or if the capture was decoded at a different
/// rate than `config.sample_rate`.
pub fn analyze_timing(capture: &StereoCapture, config: &TimingConfig) -> CaptureResult<TimingReport> {
    let locator = config.locator()?;
    let fs = locator.sample_rate();
    if capture.sample_rate != fs {
        return Err(CaptureError::invalid_param(
            "sample_rate",
            format!(
                "capture was decoded at {} Hz but timing is configured for {} Hz",
                capture.sample_rate, fs
            ),
        ));
    }

    let win = config.window_samples();

    let left = locator.locate(&rms_envelope(&capture.left, win));
    let right = locator.locate(&rms_envelope(&capture.right, win));

    let start_diff_us = match (left.start_index, right.start_index) {
        (Some(l), Some(r)) => Some((r as f64 - l as f64) / fs as f64 * 1e6),
        _ => None,
    };

    Ok(TimingReport {
        num_frames: capture.num_frames(),
        sample_rate: fs,
        duration_ms: capture.duration_seconds() * 1e3,
        window_samples: win,
        window_us: win as f64 / fs as f64 * 1e6,
        noise_window_samples: locator.noise_window(),
        hold_samples: locator.hold(),
        threshold_multiplier: locator.k(),
        left: ChannelTiming::new(left, fs),
        right: ChannelTiming::new(right, fs),
        start_diff_us,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Quiet noise with a tone burst on `[start, start + len)`.
    fn burst(num: usize, start: usize, len: usize) -> Vec<i16> {
        (0..num)
            .map(|i| {
                if i >= start && i < start + len {
                    if i % 2 == 0 {
                        8000
                    } else {
                        -8000
                    }
                } else if i % 3 == 0 {
                    20
                } else {
                    -20
                }
            })
            .collect()
    }

    fn config() -> TimingConfig {
        TimingConfig {
            sample_rate: 1_000_000,
            window_us: 20.0,
            noise_ms: 1.0,
            threshold_multiplier: 6.0,
            hold_us: 50.0,
            ..TimingConfig::default()
        }
    }

    #[test]
    fn test_left_right_skew() {
        let capture = StereoCapture {
            left: burst(10_000, 3000, 2000),
            right: burst(10_000, 3125, 2000),
            sample_rate: 1_000_000,
        };

        let report = analyze_timing(&capture, &config()).unwrap();

        assert_eq!(report.num_frames, 10_000);
        assert_eq!(report.window_samples, 20);
        assert_eq!(report.hold_samples, 50);

        let left_start = report.left.detection.start_index.unwrap();
        let right_start = report.right.detection.start_index.unwrap();
        // The centered window leads the burst by half a window.
        assert!((2985..=3000).contains(&left_start), "left start {left_start}");
        assert_eq!(right_start - left_start, 125);

        let diff = report.start_diff_us.unwrap();
        assert!((diff - 125.0).abs() < 1e-9);

        assert!(report.left.detection.offset_confirmed);
        let dur = report.left.duration_ms.unwrap();
        assert!((dur - 2.0).abs() < 0.05, "duration {dur}");
    }

    #[test]
    fn test_missing_channel_has_no_skew() {
        let capture = StereoCapture {
            left: burst(10_000, 3000, 2000),
            right: burst(10_000, 0, 0),
            sample_rate: 1_000_000,
        };

        let report = analyze_timing(&capture, &config()).unwrap();

        assert!(report.left.detection.is_found());
        assert!(!report.right.detection.is_found());
        assert_eq!(report.right.start_us, None);
        assert_eq!(report.right.duration_ms, None);
        assert_eq!(report.start_diff_us, None);
    }

    #[test]
    fn test_empty_capture() {
        let capture = StereoCapture {
            left: vec![],
            right: vec![],
            sample_rate: 1_000_000,
        };
        let report = analyze_timing(&capture, &config()).unwrap();
        assert_eq!(report.num_frames, 0);
        assert!(!report.left.detection.is_found());
        assert!(!report.right.detection.is_found());
        assert_eq!(report.duration_ms, 0.0);
    }

    #[test]
    fn test_report_serializes_flat_detection() {
        let capture = StereoCapture {
            left: burst(6000, 2000, 1000),
            right: burst(6000, 0, 0),
            sample_rate: 1_000_000,
        };
        let report = analyze_timing(&capture, &config()).unwrap();
        let json = serde_json::to_value(&report).unwrap();

        assert!(json["left"]["start_index"].is_u64());
        assert!(json["left"]["noise_floor"].is_f64());
        assert!(json["right"]["start_index"].is_null());
        assert!(json["start_diff_us"].is_null());
    }

    #[test]
    fn test_rate_mismatch_is_rejected() {
        let capture = StereoCapture {
            left: burst(100, 0, 0),
            right: burst(100, 0, 0),
            sample_rate: 48_000,
        };
        let err = analyze_timing(&capture, &config()).unwrap_err();
        assert_eq!(err.code(), "CAPTURE_003");
    }

    #[test]
    fn test_huge_window_does_not_panic() {
        let capture = StereoCapture {
            left: burst(100, 0, 0),
            right: burst(100, 0, 0),
            sample_rate: 1_000_000,
        };
        let config = TimingConfig {
            window_us: 1e30,
            ..config()
        };
        let report = analyze_timing(&capture, &config).unwrap();
        assert_eq!(report.window_samples, usize::MAX);
        assert!(!report.left.detection.is_found());
    }

    #[test]
    fn test_bad_multiplier_fails_fast() {
        let capture = StereoCapture {
            left: burst(100, 0, 0),
            right: burst(100, 0, 0),
            sample_rate: 1_000_000,
        };
        let config = TimingConfig {
            threshold_multiplier: -1.0,
            ..config()
        };
        assert!(analyze_timing(&capture, &config).is_err());
    }
}
