//! Conversion and timing configuration.
//!
//! Defaults match the acquisition rig: captures land in `output/adc_data/`
//! and are sampled at 1 MHz.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::detect::EventLocator;
use crate::envelope::window_samples;
use crate::error::{CaptureError, CaptureResult};
use crate::wav::WavFormat;

/// Default raw capture path.
pub const DEFAULT_INPUT_PATH: &str = "output/adc_data/adc_dump.bin";
/// Default WAV output path.
pub const DEFAULT_OUTPUT_PATH: &str = "output/adc_data/adc_dump.wav";
/// Default capture sample rate in Hz.
pub const DEFAULT_SAMPLE_RATE: u32 = 1_000_000;
/// Default target rate for resampling conversion, in Hz.
pub const DEFAULT_OUTPUT_RATE: u32 = 48_000;
/// Default RMS window in microseconds.
pub const DEFAULT_WINDOW_US: f64 = 200.0;
/// Default noise estimation window in milliseconds.
pub const DEFAULT_NOISE_MS: f64 = 5.0;
/// Default threshold multiplier over the noise floor.
pub const DEFAULT_THRESHOLD_MULTIPLIER: f64 = 6.0;
/// Default debounce hold in microseconds.
pub const DEFAULT_HOLD_US: f64 = 200.0;

/// Settings for converting a raw capture to WAV.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConvertConfig {
    /// Raw capture to read.
    pub input_path: PathBuf,
    /// WAV file to write.
    pub output_path: PathBuf,
    /// Sample rate of the capture in Hz.
    pub sample_rate: u32,
    /// Resample to this rate before writing; `None` keeps the capture rate.
    pub output_rate: Option<u32>,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from(DEFAULT_INPUT_PATH),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            sample_rate: DEFAULT_SAMPLE_RATE,
            output_rate: None,
        }
    }
}

impl ConvertConfig {
    /// Rate written to the WAV header.
    pub fn target_rate(&self) -> u32 {
        self.output_rate.unwrap_or(self.sample_rate)
    }

    /// Checks that all rates are positive and that the rate written to the
    /// WAV header fits its 32-bit byte rate field.
    pub fn validate(&self) -> CaptureResult<()> {
        if self.sample_rate == 0 || self.output_rate == Some(0) {
            return Err(CaptureError::InvalidSampleRate { rate: 0.0 });
        }
        let target = self.target_rate();
        if WavFormat::stereo(target).byte_rate().is_none() {
            return Err(CaptureError::InvalidSampleRate {
                rate: target as f64,
            });
        }
        Ok(())
    }
}

/// Settings for event timing detection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimingConfig {
    /// Raw capture to read.
    pub input_path: PathBuf,
    /// Sample rate of the capture in Hz.
    pub sample_rate: u32,
    /// RMS window in microseconds.
    pub window_us: f64,
    /// Noise estimation window from the start of the capture, in milliseconds.
    pub noise_ms: f64,
    /// Threshold multiplier over the noise floor.
    pub threshold_multiplier: f64,
    /// Time the envelope must stay above (or below) threshold, in microseconds.
    pub hold_us: f64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from(DEFAULT_INPUT_PATH),
            sample_rate: DEFAULT_SAMPLE_RATE,
            window_us: DEFAULT_WINDOW_US,
            noise_ms: DEFAULT_NOISE_MS,
            threshold_multiplier: DEFAULT_THRESHOLD_MULTIPLIER,
            hold_us: DEFAULT_HOLD_US,
        }
    }
}

impl TimingConfig {
    /// Hold duration in milliseconds.
    pub fn hold_ms(&self) -> f64 {
        self.hold_us / 1000.0
    }

    /// RMS window in samples at the configured rate.
    pub fn window_samples(&self) -> usize {
        window_samples(self.window_us, self.sample_rate)
    }

    /// Builds the event locator for this configuration.
    pub fn locator(&self) -> CaptureResult<EventLocator> {
        EventLocator::new(
            self.sample_rate,
            self.noise_ms,
            self.threshold_multiplier,
            self.hold_ms(),
        )
    }

    /// Rejects settings that would silently produce meaningless results.
    ///
    /// Window and hold durations are floored rather than rejected; see
    /// [`window_samples`] and [`crate::detect::samples_for_ms`].
    pub fn validate(&self) -> CaptureResult<()> {
        self.locator().map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_timing_defaults() {
        let config = TimingConfig::default();
        assert_eq!(config.input_path, PathBuf::from("output/adc_data/adc_dump.bin"));
        assert_eq!(config.sample_rate, 1_000_000);
        assert_eq!(config.window_samples(), 200);
        assert!((config.hold_ms() - 0.2).abs() < 1e-12);

        let locator = config.locator().unwrap();
        assert_eq!(locator.hold(), 200);
        assert_eq!(locator.noise_window(), 5000);
    }

    #[test]
    fn test_timing_validate_rejects_nonpositive_multiplier() {
        let config = TimingConfig {
            threshold_multiplier: 0.0,
            ..TimingConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(CaptureError::InvalidThresholdMultiplier { .. })
        ));
    }

    #[test]
    fn test_timing_validate_rejects_zero_rate() {
        let config = TimingConfig {
            sample_rate: 0,
            ..TimingConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_convert_target_rate() {
        let mut config = ConvertConfig::default();
        assert_eq!(config.target_rate(), 1_000_000);
        config.output_rate = Some(48_000);
        assert_eq!(config.target_rate(), 48_000);
        assert!(config.validate().is_ok());

        config.output_rate = Some(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_convert_rejects_rate_overflowing_header() {
        let native = ConvertConfig {
            sample_rate: 2_000_000_000,
            ..ConvertConfig::default()
        };
        assert!(matches!(
            native.validate(),
            Err(CaptureError::InvalidSampleRate { .. })
        ));

        let resampled = ConvertConfig {
            output_rate: Some(2_000_000_000),
            ..ConvertConfig::default()
        };
        assert!(resampled.validate().is_err());

        // Only the written rate has to fit the header.
        let downsampled = ConvertConfig {
            sample_rate: 2_000_000_000,
            output_rate: Some(48_000),
            ..ConvertConfig::default()
        };
        assert!(downsampled.validate().is_ok());
    }

    #[test]
    fn test_convert_config_serializes() {
        let config = ConvertConfig::default();
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["sample_rate"], 1_000_000);
        assert_eq!(json["output_path"], "output/adc_data/adc_dump.wav");
        assert!(json["output_rate"].is_null());
    }
}
