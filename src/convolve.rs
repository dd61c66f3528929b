//! Software reference model of the accelerator's convolution.
//!
//! This is the acceptance oracle for the hardware path: the drained
//! `y_result` stream of a run is expected to match this function applied to
//! the same logical input and coefficient data.

use alloc::vec::Vec;

use crate::config::TapSet;

/// Computes the expected output sequence for `input` filtered by `taps`.
///
/// `output[n] = Σ_{k} input[n - k] * taps[k]`, with positions before the
/// start of the signal treated as zero. Products are accumulated in `i64`,
/// which cannot overflow as long as the sum of absolute products per output
/// stays below `i64::MAX`; with `|tap| < 2^20` that holds for the full
/// `i32` sample range.
pub fn convolve(input: &[i32], taps: &TapSet) -> Vec<i64> {
    let taps = taps.as_slice();
    let mut output = Vec::with_capacity(input.len());
    for n in 0..input.len() {
        let mut acc: i64 = 0;
        for (k, &tap) in taps.iter().enumerate() {
            // Zero-padding: positions before the first sample contribute
            // nothing.
            if let Some(j) = n.checked_sub(k) {
                acc += i64::from(input[j]) * i64::from(tap);
            }
        }
        output.push(acc);
    }
    output
}
