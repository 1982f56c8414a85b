//! Reading the PCM payload back out of an encoded WAV buffer.

use byteorder::{ByteOrder, LittleEndian};

use super::format::HEADER_SIZE;

/// `(id, body)` pairs of the chunks following the `RIFF....WAVE` preamble.
struct Chunks<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Iterator for Chunks<'a> {
    type Item = (&'a [u8], &'a [u8]);

    fn next(&mut self) -> Option<Self::Item> {
        let header = self.data.get(self.pos..self.pos.checked_add(8)?)?;
        let size = LittleEndian::read_u32(&header[4..8]) as usize;
        let start = self.pos + 8;
        let body = self.data.get(start..start.checked_add(size)?)?;

        // Odd-sized chunks carry one pad byte.
        self.pos = start + size + (size & 1);
        Some((&header[..4], body))
    }
}

/// Returns the `data` chunk of a WAV buffer.
///
/// `None` if the buffer is not RIFF/WAVE, has no `data` chunk, or a chunk
/// runs past the end of the buffer.
pub fn extract_pcm_data(wav_data: &[u8]) -> Option<&[u8]> {
    if wav_data.len() < HEADER_SIZE || &wav_data[0..4] != b"RIFF" || &wav_data[8..12] != b"WAVE" {
        return None;
    }

    Chunks {
        data: wav_data,
        pos: 12,
    }
    .find(|(id, _)| *id == b"data")
    .map(|(_, body)| body)
}

/// BLAKE3 hex digest of the `data` chunk, ignoring the header.
pub fn compute_pcm_hash(wav_data: &[u8]) -> Option<String> {
    extract_pcm_data(wav_data).map(|pcm| blake3::hash(pcm).to_hex().to_string())
}
