//! Memory-mapped register definitions for the FIR accelerator.
//!
//! The register layout is described using [`tock_registers`], which provides
//! a safe and zero-cost abstraction over volatile MMIO access. The
//! accelerator block and the trace output window live in separate address
//! ranges, so each gets its own register file and typed facade; code that
//! drives the hardware goes through these instead of scattering raw offsets.

use core::{ops::Deref, ptr::NonNull};

use tock_registers::{
    register_structs,
    registers::{ReadOnly, ReadWrite, WriteOnly},
};

use crate::config::TAP_COUNT;

pub mod consts;

register_structs! {
    /// Register file of the FIR accelerator block.
    pub FirRegistersRaw {
        (0x0000 => pub control: ReadWrite<u32>),
        (0x0004 => _reserved0),
        (0x0010 => pub data_len: WriteOnly<u32>),
        (0x0014 => pub tap_num: WriteOnly<u32>),
        (0x0018 => _reserved1),
        (0x0040 => pub coeff: [WriteOnly<u32>; TAP_COUNT]),
        (0x006C => _reserved2),
        (0x0080 => pub x_index: WriteOnly<u32>),
        (0x0084 => pub y_result: ReadOnly<u32>),
        (0x0088 => @END),
    }
}

register_structs! {
    /// Trace output window observed by the external logic analyzer.
    pub TraceRegistersRaw {
        (0x0000 => pub data: WriteOnly<u32>),
        (0x0004 => @END),
    }
}

/// Typed view of the FIR accelerator register file.
pub struct FirRegisters {
    base: NonNull<FirRegistersRaw>,
}

unsafe impl Send for FirRegisters {}

impl FirRegisters {
    /// Create a new facade over the accelerator MMIO region.
    ///
    /// # Safety
    ///
    /// The caller must ensure the provided pointer is a valid mapping of the
    /// FIR register file for the lifetime of the returned object.
    pub const unsafe fn new(base_addr: NonNull<u8>) -> Self {
        Self {
            base: base_addr.cast(),
        }
    }
}

impl Deref for FirRegisters {
    type Target = FirRegistersRaw;

    fn deref(&self) -> &Self::Target {
        unsafe { self.base.as_ref() }
    }
}

/// Typed view of the trace output register.
pub struct TraceRegisters {
    base: NonNull<TraceRegistersRaw>,
}

unsafe impl Send for TraceRegisters {}

impl TraceRegisters {
    /// Create a new facade over the trace MMIO region.
    ///
    /// # Safety
    ///
    /// The caller must ensure the provided pointer is a valid mapping of the
    /// trace output register for the lifetime of the returned object.
    pub const unsafe fn new(base_addr: NonNull<u8>) -> Self {
        Self {
            base: base_addr.cast(),
        }
    }
}

impl Deref for TraceRegisters {
    type Target = TraceRegistersRaw;

    fn deref(&self) -> &Self::Target {
        unsafe { self.base.as_ref() }
    }
}
