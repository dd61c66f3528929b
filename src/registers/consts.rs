//! The protocol alphabet: control-register words and trace markers.
//!
//! These are the only magic numbers in the handshake. The control sentinel
//! decides the rearm-vs-cold-start branch at run entry; the markers are
//! written to the trace register purely so an external bus observer can
//! delimit the protocol phases.

/// Values the driver exchanges with the accelerator control register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ControlWord {
    /// Reported before the accelerator has ever run.
    Idle = 0,
    /// Written by the driver to start a run.
    Start = 1,
    /// Reported by the hardware once a run has completed.
    Done = 4,
}

impl ControlWord {
    pub const fn bits(self) -> u32 {
        self as u32
    }

    pub const fn from_bits(raw: u32) -> Option<Self> {
        match raw {
            0 => Some(Self::Idle),
            1 => Some(Self::Start),
            4 => Some(Self::Done),
            _ => None,
        }
    }
}

/// Phase markers emitted on the trace register.
///
/// They carry no sample data; drained results are interleaved between
/// `Primed` and `Complete`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum Marker {
    /// Run entered on an accelerator that has not completed a previous run.
    ColdStart = 0xABFF_0000,
    /// Pipeline priming finished; the overlap loop starts next.
    Primed = 0xAB43_0000,
    /// Final sample drained; the run is over.
    Complete = 0xAB47_0000,
}

impl Marker {
    pub const fn bits(self) -> u32 {
        self as u32
    }
}
