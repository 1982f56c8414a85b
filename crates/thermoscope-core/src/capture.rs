//! Raw ADC capture decoding.
//!
//! The acquisition device streams stereo frames of four bytes each:
//! `[L_high, L_low, R_high, R_low]`. Each channel is a big-endian 16-bit
//! two's-complement sample.

use byteorder::{BigEndian, ByteOrder};

/// Bytes per stereo frame (two channels, 16 bits each).
pub const FRAME_SIZE: usize = 4;

/// A decoded stereo capture.
///
/// `left` and `right` always have the same length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StereoCapture {
    /// Left channel samples.
    pub left: Vec<i16>,
    /// Right channel samples.
    pub right: Vec<i16>,
    /// Sample rate in Hz. Metadata only, never derived from the bytes.
    pub sample_rate: u32,
}

impl StereoCapture {
    /// Number of stereo frames.
    pub fn num_frames(&self) -> usize {
        self.left.len()
    }

    /// Duration in seconds.
    pub fn duration_seconds(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.num_frames() as f64 / self.sample_rate as f64
    }

    /// Whether the capture holds no frames.
    pub fn is_empty(&self) -> bool {
        self.left.is_empty()
    }
}

/// Result of decoding a raw capture buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeOutcome {
    /// The decoded channels.
    pub capture: StereoCapture,
    /// Size of the input buffer in bytes.
    pub input_bytes: usize,
    /// Trailing bytes dropped because they did not form a whole frame.
    pub discarded_bytes: usize,
}

impl DecodeOutcome {
    /// Whether the input had to be truncated to a whole number of frames.
    pub fn was_truncated(&self) -> bool {
        self.discarded_bytes > 0
    }

    /// Human-readable truncation notice, if any.
    pub fn truncation_notice(&self) -> Option<String> {
        self.was_truncated().then(|| {
            format!(
                "Input size {} bytes is not a multiple of frame size {}. Trimming to {}.",
                self.input_bytes,
                FRAME_SIZE,
                self.input_bytes - self.discarded_bytes
            )
        })
    }
}

/// Decodes a raw capture into left and right channels.
///
/// A trailing partial frame is discarded and reported through
/// [`DecodeOutcome::discarded_bytes`]. Empty input yields empty channels.
pub fn decode_capture(raw: &[u8], sample_rate: u32) -> DecodeOutcome {
    let num_frames = raw.len() / FRAME_SIZE;
    let usable = num_frames * FRAME_SIZE;

    let mut left = Vec::with_capacity(num_frames);
    let mut right = Vec::with_capacity(num_frames);

    for frame in raw[..usable].chunks_exact(FRAME_SIZE) {
        left.push(BigEndian::read_i16(&frame[0..2]));
        right.push(BigEndian::read_i16(&frame[2..4]));
    }

    DecodeOutcome {
        capture: StereoCapture {
            left,
            right,
            sample_rate,
        },
        input_bytes: raw.len(),
        discarded_bytes: raw.len() - usable,
    }
}
