//! JSON output types for machine-readable CLI output.
//!
//! Every command accepts `--json`; the documents below are printed to stdout
//! instead of the colored human summary.

use serde::{Deserialize, Serialize};
use thermoscope_core::TimingReport;

/// Error codes for CLI operations.
///
/// These codes are stable and can be used for programmatic error handling.
pub mod error_codes {
    /// File could not be read
    pub const FILE_READ: &str = "CLI_001";
    /// File could not be written
    pub const FILE_WRITE: &str = "CLI_002";
    /// Invalid rate, multiplier, or other parameter
    pub const INVALID_PARAMETER: &str = "CLI_003";
}

/// Warning codes for CLI operations.
pub mod warning_codes {
    /// Capture ended mid-frame and was truncated
    pub const TRUNCATED_CAPTURE: &str = "CLI_W001";
    /// Event end fell back to the last sample without a confirmed low run
    pub const UNCONFIRMED_OFFSET: &str = "CLI_W002";
}

/// A structured error in JSON output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JsonError {
    /// Stable error code (e.g., "CLI_001", "CAPTURE_002")
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// File path (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl JsonError {
    /// Creates a new error with code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            file: None,
        }
    }

    /// Sets the file path for this error.
    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }
}

/// A structured warning in JSON output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JsonWarning {
    /// Stable warning code (e.g., "CLI_W001")
    pub code: String,
    /// Human-readable warning message
    pub message: String,
    /// Channel the warning refers to ("L" or "R"), if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
}

impl JsonWarning {
    /// Creates a new warning with code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            channel: None,
        }
    }

    /// Sets the channel for this warning.
    pub fn with_channel(mut self, channel: impl Into<String>) -> Self {
        self.channel = Some(channel.into());
        self
    }
}

/// JSON output for the `convert` and `bin2wav` commands.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConvertOutput {
    /// Whether the WAV file was written
    pub success: bool,
    /// Errors encountered
    pub errors: Vec<JsonError>,
    /// Non-fatal warnings
    pub warnings: Vec<JsonWarning>,
    /// Conversion details (on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<ConvertResult>,
}

/// Conversion details.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConvertResult {
    /// Raw capture path
    pub input: String,
    /// WAV output path
    pub output: String,
    /// Channel count
    pub channels: u16,
    /// Bits per sample
    pub bits_per_sample: u16,
    /// Capture sample rate in Hz
    pub source_rate: u32,
    /// Frames decoded from the capture
    pub source_frames: usize,
    /// WAV sample rate in Hz
    pub sample_rate: u32,
    /// Frames written
    pub frames: usize,
    /// Duration of the written audio in seconds
    pub duration_seconds: f64,
    /// PCM payload size in bytes
    pub bytes: usize,
    /// BLAKE3 hash of the PCM payload
    pub pcm_hash: String,
    /// Trailing capture bytes discarded
    pub discarded_bytes: usize,
}

impl ConvertOutput {
    /// Creates a successful convert output.
    pub fn success(result: ConvertResult, warnings: Vec<JsonWarning>) -> Self {
        Self {
            success: true,
            errors: Vec::new(),
            warnings,
            result: Some(result),
        }
    }

    /// Creates a failed convert output.
    pub fn failure(errors: Vec<JsonError>, warnings: Vec<JsonWarning>) -> Self {
        Self {
            success: false,
            errors,
            warnings,
            result: None,
        }
    }
}

/// JSON output for the `timing` command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimingOutput {
    /// Whether analysis ran (true even when no event was found)
    pub success: bool,
    /// Errors encountered
    pub errors: Vec<JsonError>,
    /// Non-fatal warnings
    pub warnings: Vec<JsonWarning>,
    /// Timing details (on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<TimingResult>,
}

/// Timing details.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimingResult {
    /// Raw capture path
    pub input: String,
    /// Analysis report
    #[serde(flatten)]
    pub report: TimingReport,
}

impl TimingOutput {
    /// Creates a successful timing output.
    pub fn success(result: TimingResult, warnings: Vec<JsonWarning>) -> Self {
        Self {
            success: true,
            errors: Vec::new(),
            warnings,
            result: Some(result),
        }
    }

    /// Creates a failed timing output.
    pub fn failure(errors: Vec<JsonError>, warnings: Vec<JsonWarning>) -> Self {
        Self {
            success: false,
            errors,
            warnings,
            result: None,
        }
    }
}
