//! Error types for capture processing.

use thiserror::Error;

/// Result type for capture operations.
pub type CaptureResult<T> = Result<T, CaptureError>;

/// Errors that can occur while decoding, converting, or analyzing a capture.
///
/// Absence of a detectable event is not an error; see
/// [`DetectionResult`](crate::detect::DetectionResult).
#[derive(Debug, Error)]
pub enum CaptureError {
    /// Invalid sample rate.
    #[error("invalid sample rate: {rate} Hz")]
    InvalidSampleRate {
        /// The invalid sample rate.
        rate: f64,
    },

    /// Invalid threshold multiplier.
    #[error("invalid threshold multiplier: {k} (must be a finite value > 0)")]
    InvalidThresholdMultiplier {
        /// The rejected multiplier.
        k: f64,
    },

    /// Invalid parameter value.
    #[error("invalid parameter '{name}': {message}")]
    InvalidParameter {
        /// Parameter name.
        name: String,
        /// Error message.
        message: String,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CaptureError {
    /// Creates an invalid parameter error.
    pub fn invalid_param(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Stable error code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            CaptureError::InvalidSampleRate { .. } => "CAPTURE_001",
            CaptureError::InvalidThresholdMultiplier { .. } => "CAPTURE_002",
            CaptureError::InvalidParameter { .. } => "CAPTURE_003",
            CaptureError::Io(_) => "CAPTURE_004",
        }
    }
}
