//! Encoded WAV result type.

use std::io;
use std::path::Path;

use crate::error::CaptureResult;

use super::format::WavFormat;
use super::writer::{interleave_pcm16, save_wav, write_wav_to_vec};

/// An encoded stereo WAV file.
#[derive(Debug)]
pub struct WavResult {
    /// Complete WAV file bytes.
    pub wav_data: Vec<u8>,
    /// BLAKE3 hash of the PCM payload only.
    pub pcm_hash: String,
    /// Container format.
    pub format: WavFormat,
    /// Number of stereo frames written.
    pub num_frames: usize,
}

impl WavResult {
    /// Encodes two channels into a WAV file.
    ///
    /// The frame count is `min(left.len(), right.len())`.
    ///
    /// # Errors
    /// Fails with [`CaptureError::Io`](crate::error::CaptureError::Io) when the
    /// payload exceeds 4 GiB or the byte rate overflows the header field.
    pub fn from_stereo(left: &[i16], right: &[i16], sample_rate: u32) -> CaptureResult<Self> {
        let pcm = interleave_pcm16(left, right);
        let pcm_hash = blake3::hash(&pcm).to_hex().to_string();
        let format = WavFormat::stereo(sample_rate);
        let wav_data = write_wav_to_vec(&format, &pcm)?;

        Ok(Self {
            wav_data,
            pcm_hash,
            num_frames: format.frames_in(pcm.len()),
            format,
        })
    }

    /// Writes the file to `path`, creating parent directories.
    pub fn save(&self, path: &Path) -> io::Result<()> {
        save_wav(path, &self.wav_data)
    }

    /// Size of the PCM payload in bytes.
    pub fn payload_bytes(&self) -> usize {
        self.num_frames * usize::from(self.format.block_align())
    }

    /// Returns the duration in seconds.
    pub fn duration_seconds(&self) -> f64 {
        if self.format.sample_rate == 0 {
            return 0.0;
        }
        self.num_frames as f64 / self.format.sample_rate as f64
    }
}
