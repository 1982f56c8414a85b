//! Container layout for converted captures.

/// Size of the canonical RIFF/WAVE header written before the payload.
pub const HEADER_SIZE: usize = 44;

/// Channel count of every converted capture.
pub const CHANNELS: u16 = 2;

/// Sample width of every converted capture.
pub const BITS_PER_SAMPLE: u16 = 16;

/// Format fields written to the `fmt ` chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavFormat {
    /// Number of channels.
    pub channels: u16,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Bits per sample.
    pub bits_per_sample: u16,
}

impl WavFormat {
    /// Interleaved 16-bit stereo at `sample_rate`.
    pub fn stereo(sample_rate: u32) -> Self {
        Self {
            channels: CHANNELS,
            sample_rate,
            bits_per_sample: BITS_PER_SAMPLE,
        }
    }

    /// Bytes per stereo frame.
    pub fn block_align(&self) -> u16 {
        self.channels * (self.bits_per_sample / 8)
    }

    /// Payload bytes per second of audio, or `None` if it does not fit the
    /// 32-bit header field.
    pub fn byte_rate(&self) -> Option<u32> {
        self.sample_rate.checked_mul(u32::from(self.block_align()))
    }

    /// Whole frames contained in a payload of `payload_len` bytes.
    pub fn frames_in(&self, payload_len: usize) -> usize {
        match self.block_align() {
            0 => 0,
            align => payload_len / usize::from(align),
        }
    }
}
