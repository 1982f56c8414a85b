//! Moving RMS energy envelope.
//!
//! The envelope is the square root of a centered moving average of squared
//! amplitude. The averaging window matches a "same"-length convolution with a
//! box kernel: sample `i` averages `x[i - win/2 ..= i - win/2 + win - 1]`,
//! treating samples outside the signal as zero and always dividing by `win`.

/// Smallest usable window, in samples.
pub const MIN_WINDOW: usize = 3;

/// Converts a window duration in microseconds to samples.
///
/// `max(3, floor(window_us * sample_rate / 1e6))`. Non-finite or negative
/// durations fall back to the minimum window.
pub fn window_samples(window_us: f64, sample_rate: u32) -> usize {
    let samples = (window_us * sample_rate as f64 / 1e6).floor();
    if samples.is_finite() && samples > MIN_WINDOW as f64 {
        samples as usize
    } else {
        MIN_WINDOW
    }
}

/// Computes the RMS envelope of a channel.
///
/// The output always has the same length as `samples`. `win` is raised to
/// [`MIN_WINDOW`] if smaller.
pub fn rms_envelope(samples: &[i16], win: usize) -> Vec<f64> {
    let win = win.max(MIN_WINDOW);
    let n = samples.len();

    // Squares of i16 fit in u32, so u64 prefix sums stay exact.
    let mut prefix = vec![0u64; n + 1];
    for (i, &s) in samples.iter().enumerate() {
        let v = s as i64;
        prefix[i + 1] = prefix[i] + (v * v) as u64;
    }

    let left = win / 2;
    let scale = 1.0 / win as f64;
    let mut env = vec![0.0f64; n];

    for (i, slot) in env.iter_mut().enumerate() {
        let lo = i.saturating_sub(left);
        let hi = i.saturating_add(win - left).min(n); // exclusive
        if lo >= hi {
            continue;
        }
        let energy = (prefix[hi] - prefix[lo]) as f64 * scale;
        *slot = energy.sqrt();
    }

    env
}
