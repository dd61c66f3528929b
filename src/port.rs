//! Register-port seam between the protocol driver and the hardware.

use core::ptr::NonNull;

use tock_registers::interfaces::{Readable, Writeable};

use crate::registers::{FirRegisters, TraceRegisters};

/// Synchronous access to the accelerator's semantic register surface.
///
/// Every access takes immediate hardware-visible effect; there is no
/// buffering and no error path at this layer. The streaming protocol is
/// written against this trait so it can be exercised against recorded or
/// simulated register files as well as real MMIO.
pub trait RegisterPort {
    fn read_control(&mut self) -> u32;
    fn write_control(&mut self, value: u32);
    fn write_tap_num(&mut self, value: u32);
    fn write_data_len(&mut self, value: u32);
    /// The caller must keep `index` below [`crate::TAP_COUNT`].
    fn write_coeff(&mut self, index: usize, value: u32);
    fn write_x_index(&mut self, value: u32);
    fn read_y_result(&mut self) -> u32;
    fn write_trace(&mut self, value: u32);
}

/// [`RegisterPort`] backed by the memory-mapped register files.
pub struct MmioPort {
    fir: FirRegisters,
    trace: TraceRegisters,
}

impl MmioPort {
    /// Create a port over the mapped accelerator block and trace window.
    ///
    /// # Safety
    ///
    /// Both pointers must be valid, correctly aligned mappings of the FIR
    /// register file and the trace output register, and must remain valid
    /// for the lifetime of the returned port.
    pub const unsafe fn new(fir_base: NonNull<u8>, trace_base: NonNull<u8>) -> Self {
        Self {
            fir: unsafe { FirRegisters::new(fir_base) },
            trace: unsafe { TraceRegisters::new(trace_base) },
        }
    }
}

impl RegisterPort for MmioPort {
    fn read_control(&mut self) -> u32 {
        self.fir.control.get()
    }

    fn write_control(&mut self, value: u32) {
        self.fir.control.set(value);
    }

    fn write_tap_num(&mut self, value: u32) {
        self.fir.tap_num.set(value);
    }

    fn write_data_len(&mut self, value: u32) {
        self.fir.data_len.set(value);
    }

    fn write_coeff(&mut self, index: usize, value: u32) {
        self.fir.coeff[index].set(value);
    }

    fn write_x_index(&mut self, value: u32) {
        self.fir.x_index.set(value);
    }

    fn read_y_result(&mut self) -> u32 {
        self.fir.y_result.get()
    }

    fn write_trace(&mut self, value: u32) {
        self.trace.data.set(value);
    }
}
