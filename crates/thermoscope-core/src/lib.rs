//! Thermoscope Core
//!
//! Decoding, conversion, and event timing for dual-channel ADC captures from
//! a thermophone emitter/receiver rig.
//!
//! # Overview
//!
//! The acquisition device writes raw frames of two big-endian 16-bit samples
//! (left, right). This crate turns those bytes into channels, writes them as
//! interleaved 16-bit stereo WAV (optionally resampled), and measures when a
//! transient event starts and ends on each channel:
//!
//! - **Decoding** - big-endian frames to `i16` channels, trailing partial
//!   frames discarded
//! - **Encoding** - little-endian interleaved PCM in a canonical WAV container
//! - **Resampling** - duration-preserving linear interpolation
//! - **Envelope** - centered moving RMS
//! - **Detection** - adaptive noise-floor threshold with hold-based debounce
//!
//! Everything operates on in-memory buffers; file access is limited to
//! [`wav::save_wav`].
//!
//! # Example
//!
//! ```ignore
//! use thermoscope_core::{analyze_timing, decode_capture, TimingConfig};
//!
//! let raw = std::fs::read("output/adc_data/adc_dump.bin")?;
//! let decoded = decode_capture(&raw, 1_000_000);
//! let report = analyze_timing(&decoded.capture, &TimingConfig::default())?;
//!
//! if let Some(diff) = report.start_diff_us {
//!     println!("start diff (R-L): {diff:.1} us");
//! }
//! ```
//!
//! # Crate Structure
//!
//! - [`capture`] - Raw frame decoding
//! - [`wav`] - PCM interleaving and WAV writing
//! - [`resample`] - Linear resampler
//! - [`envelope`] - Moving RMS envelope
//! - [`detect`] - Noise floor, debounce state machines, and event location
//! - [`timing`] - Per-channel timing report and left/right skew
//! - [`config`] - Conversion and timing settings

pub mod capture;
pub mod config;
pub mod detect;
pub mod envelope;
pub mod error;
pub mod resample;
pub mod timing;
pub mod wav;

// Re-export main types at crate root
pub use capture::{decode_capture, DecodeOutcome, StereoCapture, FRAME_SIZE};
pub use config::{ConvertConfig, TimingConfig};
pub use detect::{DetectionResult, EventLocator};
pub use error::{CaptureError, CaptureResult};
pub use resample::resample_linear;
pub use timing::{analyze_timing, ChannelTiming, TimingReport};
pub use wav::{WavFormat, WavResult};

/// Encodes a capture as WAV, resampling first when `output_rate` differs
/// from the capture rate.
pub fn encode_capture(capture: &StereoCapture, output_rate: Option<u32>) -> CaptureResult<WavResult> {
    let in_rate = capture.sample_rate;
    match output_rate {
        Some(rate) if rate != in_rate => {
            let left = resample_linear(&capture.left, in_rate, rate)?;
            let right = resample_linear(&capture.right, in_rate, rate)?;
            WavResult::from_stereo(&left, &right, rate)
        }
        _ => WavResult::from_stereo(&capture.left, &capture.right, in_rate),
    }
}

/// Decodes, optionally resamples, and encodes a raw capture as WAV.
///
/// Returns the decode outcome alongside the encoded file so callers can
/// surface truncation notices.
pub fn convert_capture(raw: &[u8], config: &ConvertConfig) -> CaptureResult<(DecodeOutcome, WavResult)> {
    config.validate()?;

    let decoded = decode_capture(raw, config.sample_rate);
    let wav = encode_capture(&decoded.capture, config.output_rate)?;

    Ok((decoded, wav))
}
