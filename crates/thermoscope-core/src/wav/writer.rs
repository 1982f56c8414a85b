//! Core WAV writing and PCM interleaving functions.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use byteorder::{ByteOrder, LittleEndian};

use super::format::{WavFormat, HEADER_SIZE};

/// Writes a complete WAV file to a writer.
///
/// The payload is written verbatim after a canonical 44-byte header.
pub fn write_wav<W: Write>(writer: &mut W, format: &WavFormat, pcm_data: &[u8]) -> io::Result<()> {
    let data_size = u32::try_from(pcm_data.len()).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "PCM payload exceeds the 4 GiB WAV limit",
        )
    })?;
    let byte_rate = format.byte_rate().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("sample rate {} Hz overflows the WAV byte rate field", format.sample_rate),
        )
    })?;
    let file_size = data_size.checked_add(36).ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "PCM payload exceeds the 4 GiB WAV limit",
        )
    })?;

    // RIFF header
    writer.write_all(b"RIFF")?;
    writer.write_all(&file_size.to_le_bytes())?;
    writer.write_all(b"WAVE")?;

    // fmt chunk
    writer.write_all(b"fmt ")?;
    writer.write_all(&16u32.to_le_bytes())?; // Chunk size (16 for PCM)
    writer.write_all(&1u16.to_le_bytes())?; // Audio format (1 = PCM)
    writer.write_all(&format.channels.to_le_bytes())?;
    writer.write_all(&format.sample_rate.to_le_bytes())?;
    writer.write_all(&byte_rate.to_le_bytes())?;
    writer.write_all(&format.block_align().to_le_bytes())?;
    writer.write_all(&format.bits_per_sample.to_le_bytes())?;

    // data chunk
    writer.write_all(b"data")?;
    writer.write_all(&data_size.to_le_bytes())?;
    writer.write_all(pcm_data)?;

    Ok(())
}

/// Writes a WAV file to a byte vector.
///
/// Fails only when the payload or rate does not fit the header fields.
pub fn write_wav_to_vec(format: &WavFormat, pcm_data: &[u8]) -> io::Result<Vec<u8>> {
    let mut buffer = Vec::with_capacity(HEADER_SIZE + pcm_data.len());
    write_wav(&mut buffer, format, pcm_data)?;
    Ok(buffer)
}

/// Saves encoded WAV bytes to disk, creating parent directories as needed.
pub fn save_wav(path: &Path, wav_data: &[u8]) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let mut file = io::BufWriter::new(fs::File::create(path)?);
    file.write_all(wav_data)?;
    file.flush()
}

/// Interleaves two channels into 16-bit little-endian PCM bytes.
///
/// The output holds `min(left.len(), right.len())` frames of
/// `[L_low, L_high, R_low, R_high]`; the tail of the longer channel is dropped.
pub fn interleave_pcm16(left: &[i16], right: &[i16]) -> Vec<u8> {
    let len = left.len().min(right.len());
    let mut pcm = vec![0u8; len * 4]; // 2 channels * 2 bytes per sample

    for ((frame, &l), &r) in pcm.chunks_exact_mut(4).zip(left).zip(right) {
        LittleEndian::write_i16(&mut frame[0..2], l);
        LittleEndian::write_i16(&mut frame[2..4], r);
    }

    pcm
}
