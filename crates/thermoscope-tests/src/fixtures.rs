//! Synthetic capture fixtures.
//!
//! Captures are generated in memory and written in the device's big-endian
//! frame layout, so tests exercise the same decode path as real dumps.

use std::path::{Path, PathBuf};

/// Encodes two channels as `[L_high, L_low, R_high, R_low]` frames.
///
/// The frame count is the shorter channel's length.
pub fn encode_raw(left: &[i16], right: &[i16]) -> Vec<u8> {
    left.iter()
        .zip(right)
        .flat_map(|(l, r)| {
            let [lh, ll] = l.to_be_bytes();
            let [rh, rl] = r.to_be_bytes();
            [lh, ll, rh, rl]
        })
        .collect()
}

/// Constant `quiet` level with `loud` on `[start, start + len)`.
pub fn plateau(num: usize, quiet: i16, loud: i16, start: usize, len: usize) -> Vec<i16> {
    (0..num)
        .map(|i| if i >= start && i < start + len { loud } else { quiet })
        .collect()
}

/// Low alternating noise with a full-swing square burst on `[start, start + len)`.
pub fn tone_burst(num: usize, start: usize, len: usize) -> Vec<i16> {
    (0..num)
        .map(|i| {
            let sign = if i % 2 == 0 { 1 } else { -1 };
            if i >= start && i < start + len {
                sign * 12_000
            } else {
                sign * 15
            }
        })
        .collect()
}

/// Writes `raw` followed by `trailing` garbage bytes to `dir/name`.
pub fn write_capture(dir: &Path, name: &str, raw: &[u8], trailing: usize) -> PathBuf {
    let mut bytes = raw.to_vec();
    bytes.extend(std::iter::repeat(0x5A).take(trailing));

    let path = dir.join(name);
    std::fs::write(&path, bytes).expect("failed to write capture fixture");
    path
}

/// Reads a 16-bit WAV file, returning its spec and deinterleaved channels.
pub fn read_wav(path: &Path) -> (hound::WavSpec, Vec<i16>, Vec<i16>) {
    let reader = hound::WavReader::open(path).expect("failed to open WAV");
    let spec = reader.spec();
    let samples: Vec<i16> = reader
        .into_samples::<i16>()
        .collect::<Result<_, _>>()
        .expect("failed to read WAV samples");

    let left = samples.iter().step_by(2).copied().collect();
    let right = samples.iter().skip(1).step_by(2).copied().collect();
    (spec, left, right)
}
