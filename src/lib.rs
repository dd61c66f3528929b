//! Register-level driver for a memory-mapped FIR filter accelerator.
//!
//! The accelerator exposes its control, configuration, coefficient, input
//! and result registers through MMIO, plus a separate trace register that an
//! external bus observer watches. The crate keeps the register descriptions
//! and the streaming protocol in typed Rust so higher layers never deal with
//! raw offsets or inline sentinel literals.
//!
//! The interesting part is the streaming handshake: the pipeline has a fixed
//! latency of [`PRIMING_DEPTH`] samples, so a run primes it with the first
//! input positions, then overlaps draining one result with feeding the next
//! position, and brackets the phases with markers on the trace register.
//! All transfer is software-paced register access; there is no interrupt or
//! DMA path.
//!
//! [`convolve`] is the software model of the same filter and serves as the
//! acceptance oracle for the drained hardware stream.

#![cfg_attr(not(test), no_std)]

extern crate alloc;
#[macro_use]
extern crate log;

mod config;
mod convolve;
mod err;
mod port;
mod registers;
mod stream;

use alloc::vec::Vec;

pub use config::{FirConfig, TapSet, PRIMING_DEPTH, TAP_COUNT};
pub use convolve::convolve;
pub use err::FirError;
pub use port::{MmioPort, RegisterPort};
pub use registers::consts::{ControlWord, Marker};
pub use registers::{FirRegisters, TraceRegisters};

/// Driver facade for one FIR accelerator instance.
///
/// Owning the port by value makes the non-reentrancy requirement of the
/// protocol a borrow-checker fact: one `&mut self` covers the whole
/// configure, load, stream sequence, so no second run can interleave on the
/// same register set.
pub struct FirAccel<P: RegisterPort> {
    port: P,
    config: Option<FirConfig>,
}

impl<P: RegisterPort> FirAccel<P> {
    pub fn new(port: P) -> Self {
        Self { port, config: None }
    }

    /// Programs the tap count and run length for the next streaming run.
    ///
    /// Fails before touching any register if `data_len` does not exceed the
    /// pipeline priming depth.
    pub fn configure(&mut self, data_len: usize) -> Result<(), FirError> {
        let config = FirConfig::new(data_len);
        config.validate()?;

        debug!(
            "configuring: tap_num={} data_len={}",
            config.tap_num, config.data_len
        );
        self.port.write_tap_num(config.tap_num as u32);
        self.port.write_data_len(config.data_len as u32);
        self.config = Some(config);
        Ok(())
    }

    /// Loads the coefficient set in index order, `taps[0]` pairing with the
    /// most recent sample.
    ///
    /// Any previously loaded set is fully overwritten; there is no
    /// incremental update.
    pub fn load_taps(&mut self, taps: &TapSet) {
        for (i, &tap) in taps.as_slice().iter().enumerate() {
            self.port.write_coeff(i, tap as u32);
        }
        debug!("loaded {} tap coefficients", taps.as_slice().len());
    }

    /// Executes one streaming run and returns the drained output samples.
    ///
    /// Requires a prior successful [`configure`](Self::configure). The run
    /// drains `data_len - PRIMING_DEPTH` samples; the final
    /// [`PRIMING_DEPTH`] outputs stay in the pipeline, matching the
    /// hardware protocol.
    pub fn run_stream(&mut self) -> Result<Vec<u32>, FirError> {
        let config = self.config.ok_or(FirError::NotConfigured)?;
        stream::run_stream(&mut self.port, &config)
    }

    /// Polls the control register until it reports [`ControlWord::Done`],
    /// giving up after `max_spins` reads.
    pub fn wait_done(&mut self, max_spins: usize) -> Result<(), FirError> {
        stream::wait_done(&mut self.port, max_spins)
    }

    /// Direct access to the underlying port, for inspection in tests and
    /// for out-of-protocol pokes during bring-up.
    pub fn port_mut(&mut self) -> &mut P {
        &mut self.port
    }

    /// Releases the underlying port.
    pub fn into_port(self) -> P {
        self.port
    }
}
