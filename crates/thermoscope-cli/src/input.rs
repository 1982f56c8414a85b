//! Raw capture loading.
//!
//! Reads a capture file once and decodes it, keeping the source path for
//! reporting.

use std::path::{Path, PathBuf};

use thermoscope_core::{decode_capture, DecodeOutcome};

/// A decoded capture together with where it came from.
#[derive(Debug)]
pub struct LoadedCapture {
    /// Path the capture was read from.
    pub path: PathBuf,
    /// Decoded channels and truncation details.
    pub decoded: DecodeOutcome,
}

impl LoadedCapture {
    /// Truncation warning to show the user, if the file ended mid-frame.
    pub fn truncation_warning(&self) -> Option<String> {
        self.decoded.truncation_notice()
    }
}

/// Errors that can occur while loading a capture.
#[derive(Debug)]
pub enum InputError {
    /// File could not be read.
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl std::fmt::Display for InputError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputError::FileRead { path, source } => {
                write!(f, "failed to read file '{}': {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for InputError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            InputError::FileRead { source, .. } => Some(source),
        }
    }
}

/// Reads and decodes a raw capture file.
///
/// # Example
/// ```no_run
/// use std::path::Path;
/// use thermoscope_cli::input::load_capture;
///
/// let loaded = load_capture(Path::new("output/adc_data/adc_dump.bin"), 1_000_000).unwrap();
/// println!("{} frames", loaded.decoded.capture.num_frames());
/// ```
pub fn load_capture(path: &Path, sample_rate: u32) -> Result<LoadedCapture, InputError> {
    let raw = std::fs::read(path).map_err(|e| InputError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(LoadedCapture {
        path: path.to_path_buf(),
        decoded: decode_capture(&raw, sample_rate),
    })
}
