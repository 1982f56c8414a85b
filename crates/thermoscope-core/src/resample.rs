//! Linear-interpolation resampling.
//!
//! Input and output grids both cover the half-open interval `[0, duration)`:
//! input sample `i` sits at `i * duration / n_in`, output sample `j` at
//! `j * duration / n_out`. Output points past the last input time hold the
//! last input value.

use crate::error::{CaptureError, CaptureResult};

/// Number of output samples that preserves the input duration.
///
/// `round(n_in / in_rate * out_rate)`, rounding ties to even.
pub fn resampled_len(n_in: usize, in_rate: u32, out_rate: u32) -> usize {
    if in_rate == 0 {
        return 0;
    }
    let duration = n_in as f64 / in_rate as f64;
    (duration * out_rate as f64).round_ties_even().max(0.0) as usize
}

/// Resamples one channel from `in_rate` to `out_rate`.
///
/// When either the input or the output has at most one sample, the result is
/// a zero-filled buffer of the output length.
///
/// # Errors
/// Returns [`CaptureError::InvalidSampleRate`] if either rate is zero.
pub fn resample_linear(samples: &[i16], in_rate: u32, out_rate: u32) -> CaptureResult<Vec<i16>> {
    for rate in [in_rate, out_rate] {
        if rate == 0 {
            return Err(CaptureError::InvalidSampleRate { rate: rate as f64 });
        }
    }

    let n_in = samples.len();
    let n_out = resampled_len(n_in, in_rate, out_rate);

    if n_out <= 1 || n_in <= 1 {
        return Ok(vec![0; n_out]);
    }

    if n_out == n_in {
        return Ok(samples.to_vec());
    }

    // Output index j maps to input position j * n_in / n_out.
    let step = n_in as f64 / n_out as f64;
    let last = n_in - 1;

    let mut out = vec![0i16; n_out];
    for (j, slot) in out.iter_mut().enumerate() {
        let pos = j as f64 * step;
        let idx = pos.floor() as usize;

        let value = if idx >= last {
            samples[last] as f64
        } else {
            let frac = pos - idx as f64;
            let a = samples[idx] as f64;
            let b = samples[idx + 1] as f64;
            a + (b - a) * frac
        };

        *slot = quantize(value);
    }

    Ok(out)
}

/// Rounds to the nearest integer (ties to even) and saturates to `i16`.
fn quantize(value: f64) -> i16 {
    value
        .round_ties_even()
        .clamp(i16::MIN as f64, i16::MAX as f64) as i16
}
