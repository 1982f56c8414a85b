//! Thermoscope End-to-End Test Infrastructure
//!
//! Integration tests for the full capture pipeline:
//!
//! - Conversion: raw capture file -> WAV file, read back with `hound`
//! - Timing: raw capture file -> per-channel event report
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p thermoscope-tests
//! ```

pub mod fixtures;

pub use fixtures::{encode_raw, plateau, read_wav, tone_burst, write_capture};
