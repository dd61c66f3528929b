//! Static parameters of the FIR accelerator instance and per-run
//! configuration.
//!
//! The coefficient count and pipeline depth are fixed by the synthesized
//! hardware; everything here mirrors that instance so the driver never
//! hard-codes a bare literal at a call site.

use crate::err::FirError;

/// Number of tap coefficients the accelerator instance is built with.
pub const TAP_COUNT: usize = 11;

/// Pipeline latency of the accelerator, in samples.
///
/// This many input positions must be fed before the first valid output can
/// be drained. A run's `data_len` must exceed it.
pub const PRIMING_DEPTH: usize = 3;

/// Ordered coefficient set for one filter session.
///
/// `taps[0]` multiplies the most recent sample; the set is immutable once
/// built and is written to the hardware in index order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TapSet([i32; TAP_COUNT]);

impl TapSet {
    pub const fn new(taps: [i32; TAP_COUNT]) -> Self {
        Self(taps)
    }

    /// Builds a tap set from a slice, rejecting any length other than
    /// [`TAP_COUNT`].
    pub fn from_slice(taps: &[i32]) -> Result<Self, FirError> {
        if taps.len() != TAP_COUNT {
            return Err(FirError::TapCountMismatch {
                expected: TAP_COUNT,
                actual: taps.len(),
            });
        }
        let mut set = [0; TAP_COUNT];
        set.copy_from_slice(taps);
        Ok(Self(set))
    }

    pub fn as_slice(&self) -> &[i32] {
        &self.0
    }
}

impl From<[i32; TAP_COUNT]> for TapSet {
    fn from(taps: [i32; TAP_COUNT]) -> Self {
        Self(taps)
    }
}

/// Configuration written to the accelerator before a streaming run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FirConfig {
    /// Tap count programmed into the hardware; always [`TAP_COUNT`] for this
    /// instance.
    pub tap_num: usize,
    /// Number of input positions to stream in one run.
    pub data_len: usize,
}

impl FirConfig {
    pub const fn new(data_len: usize) -> Self {
        Self {
            tap_num: TAP_COUNT,
            data_len,
        }
    }

    /// Checks the run invariants before any register is touched.
    pub fn validate(&self) -> Result<(), FirError> {
        if self.data_len <= PRIMING_DEPTH {
            return Err(FirError::DataLenTooShort {
                data_len: self.data_len,
                min: PRIMING_DEPTH + 1,
            });
        }
        if self.tap_num != TAP_COUNT {
            return Err(FirError::TapCountMismatch {
                expected: TAP_COUNT,
                actual: self.tap_num,
            });
        }
        Ok(())
    }
}
