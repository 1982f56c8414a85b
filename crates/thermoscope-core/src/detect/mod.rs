//! Transient event location on an RMS envelope.
//!
//! The threshold adapts to the capture: the median envelope level over an
//! initial quiet window, times a multiplier. An event starts at the first run
//! of `hold` samples above the threshold and ends at the first following run
//! of `hold` samples below it. When no such low run occurs the event is taken
//! to extend to the last sample, and the result is marked unconfirmed.

mod debounce;


use serde::{Deserialize, Serialize};

use crate::error::{CaptureError, CaptureResult};

pub use debounce::{OffsetState, OffsetTracker, OnsetState, OnsetTracker};

/// Added to the noise median so silent captures still get a positive threshold.
pub const NOISE_EPSILON: f64 = 1e-9;

/// Outcome of event location on one channel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DetectionResult {
    /// First sample of the event, or `None` if no event was found.
    pub start_index: Option<usize>,
    /// First sample after the event, or `None` if no event was found.
    pub end_index: Option<usize>,
    /// Median envelope level of the noise window, plus [`NOISE_EPSILON`].
    pub noise_floor: f64,
    /// Detection threshold (`noise_floor * k`).
    pub threshold: f64,
    /// Whether `end_index` was confirmed by a sustained low run. `false` when
    /// the event ran to the end of the capture, or when nothing was found.
    pub offset_confirmed: bool,
}

impl DetectionResult {
    fn not_found(noise_floor: f64, threshold: f64) -> Self {
        Self {
            start_index: None,
            end_index: None,
            noise_floor,
            threshold,
            offset_confirmed: false,
        }
    }

    /// Whether an event was found.
    pub fn is_found(&self) -> bool {
        self.start_index.is_some()
    }

    /// `(start, end)` when an event was found.
    pub fn span(&self) -> Option<(usize, usize)> {
        self.start_index.zip(self.end_index)
    }

    /// An event whose end fell back to the last sample without a confirmed
    /// low run. Such end times are a lower bound, not a measurement.
    pub fn is_low_confidence(&self) -> bool {
        self.is_found() && !self.offset_confirmed
    }
}

/// Converts a duration in milliseconds to a sample count of at least 1.
pub fn samples_for_ms(ms: f64, sample_rate: u32) -> usize {
    let samples = (ms * sample_rate as f64 / 1000.0).round();
    if samples.is_finite() && samples > 1.0 {
        samples as usize
    } else {
        1
    }
}

/// Median of `values`; the mean of the two middle values for even lengths.
///
/// Returns 0.0 for an empty slice.
pub fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

/// Locates the first sustained event in an envelope.
#[derive(Debug, Clone)]
pub struct EventLocator {
    sample_rate: u32,
    noise_window: usize,
    hold: usize,
    k: f64,
}

impl EventLocator {
    /// Creates a locator.
    ///
    /// `noise_ms` and `hold_ms` are converted to at least one sample each.
    ///
    /// # Errors
    /// Fails if `sample_rate` is zero or `k` is not a finite value above zero.
    pub fn new(sample_rate: u32, noise_ms: f64, k: f64, hold_ms: f64) -> CaptureResult<Self> {
        if sample_rate == 0 {
            return Err(CaptureError::InvalidSampleRate { rate: 0.0 });
        }
        if !(k.is_finite() && k > 0.0) {
            return Err(CaptureError::InvalidThresholdMultiplier { k });
        }

        Ok(Self {
            sample_rate,
            noise_window: samples_for_ms(noise_ms, sample_rate),
            hold: samples_for_ms(hold_ms, sample_rate),
            k,
        })
    }

    /// Sample rate in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Noise estimation window, in samples.
    pub fn noise_window(&self) -> usize {
        self.noise_window
    }

    /// Debounce hold, in samples.
    pub fn hold(&self) -> usize {
        self.hold
    }

    /// Threshold multiplier.
    pub fn k(&self) -> f64 {
        self.k
    }

    /// Noise floor and threshold for an envelope.
    pub fn threshold_for(&self, envelope: &[f64]) -> (f64, f64) {
        let window = &envelope[..self.noise_window.min(envelope.len())];
        let noise_floor = median(window) + NOISE_EPSILON;
        (noise_floor, noise_floor * self.k)
    }

    /// Runs onset and offset detection over `envelope`.
    pub fn locate(&self, envelope: &[f64]) -> DetectionResult {
        let (noise_floor, threshold) = self.threshold_for(envelope);

        let mut onset = OnsetTracker::new(self.hold);
        let start = envelope
            .iter()
            .enumerate()
            .find_map(|(i, &v)| onset.push(i, v > threshold));

        let Some(start) = start else {
            return DetectionResult::not_found(noise_floor, threshold);
        };

        let mut offset = OffsetTracker::new(self.hold);
        let end = envelope
            .iter()
            .enumerate()
            .skip(start)
            .find_map(|(i, &v)| offset.push(i, v > threshold));

        let (end_index, offset_confirmed) = match end {
            Some(end) => (end, true),
            None => (envelope.len() - 1, false),
        };

        DetectionResult {
            start_index: Some(start),
            end_index: Some(end_index),
            noise_floor,
            threshold,
            offset_confirmed,
        }
    }
}
