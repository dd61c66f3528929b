//! The streaming handshake for one accelerator run.
//!
//! The accelerator has a fixed pipeline latency of [`PRIMING_DEPTH`]
//! samples, so a run first feeds that many input positions without draining
//! anything, then overlaps one drain with one feed per iteration. Phase
//! boundaries are published on the trace register so an external bus
//! observer can delimit the run. The ordering here is load-bearing: draining
//! before feeding keeps fed positions and drained results aligned under the
//! fixed latency, and getting it wrong corrupts the stream without any
//! reported error.

use alloc::vec::Vec;

use crate::config::{FirConfig, PRIMING_DEPTH};
use crate::err::FirError;
use crate::port::RegisterPort;
use crate::registers::consts::{ControlWord, Marker};

/// Executes one complete streaming run and returns the drained samples.
///
/// The run is strictly linear: rearm-or-cold-start, priming, overlap loop,
/// completion marker. Nothing is written to any register if the config is
/// invalid.
pub(crate) fn run_stream<P: RegisterPort>(
    port: &mut P,
    config: &FirConfig,
) -> Result<Vec<u32>, FirError> {
    config.validate()?;

    // A finished accelerator is rearmed silently; a cold one gets the
    // cold-start marker instead so the trace shows which path was taken.
    let ctrl = port.read_control();
    if ctrl == ControlWord::Done.bits() {
        debug!("control=0x{:x}, rearming for another run", ctrl);
        port.write_control(ControlWord::Start.bits());
    } else {
        debug!("control=0x{:x}, cold start", ctrl);
        port.write_trace(Marker::ColdStart.bits());
    }

    // The pipeline needs PRIMING_DEPTH inputs before any output is valid.
    for i in 0..PRIMING_DEPTH {
        port.write_x_index(i as u32);
    }
    port.write_trace(Marker::Primed.bits());

    // Drain the result produced from the previous round's input, then feed
    // the next position.
    let mut drained = Vec::with_capacity(config.data_len - PRIMING_DEPTH);
    for i in PRIMING_DEPTH..config.data_len {
        let y = port.read_y_result();
        port.write_trace(y);
        drained.push(y);
        port.write_x_index(i as u32);
    }

    port.write_trace(Marker::Complete.bits());
    debug!("run complete, {} samples drained", drained.len());
    Ok(drained)
}

/// Busy-waits until the control register reports [`ControlWord::Done`].
///
/// The streaming protocol itself is software-paced and never waits on the
/// hardware; this bounded poll is for callers that want to confirm a
/// previous run finished before rearming, instead of blocking forever on a
/// stalled accelerator.
pub(crate) fn wait_done<P: RegisterPort>(port: &mut P, max_spins: usize) -> Result<(), FirError> {
    for _ in 0..max_spins {
        if port.read_control() == ControlWord::Done.bits() {
            return Ok(());
        }
        core::hint::spin_loop();
    }
    error!(
        "control register never reached 0x{:x} within {} polls",
        ControlWord::Done.bits(),
        max_spins
    );
    Err(FirError::Timeout)
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::*;
    use crate::config::FirConfig;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Access {
        ReadControl,
        WriteControl(u32),
        WriteX(u32),
        ReadY,
        WriteTrace(u32),
    }

    /// Records every register access and serves scripted values, so tests
    /// can assert on the exact protocol sequence.
    #[derive(Default)]
    struct RecordingPort {
        control: u32,
        next_y: u32,
        log: Vec<Access>,
    }

    impl RegisterPort for RecordingPort {
        fn read_control(&mut self) -> u32 {
            self.log.push(Access::ReadControl);
            self.control
        }

        fn write_control(&mut self, value: u32) {
            self.log.push(Access::WriteControl(value));
            self.control = value;
        }

        fn write_tap_num(&mut self, _value: u32) {
            unreachable!("run_stream must not touch the config registers");
        }

        fn write_data_len(&mut self, _value: u32) {
            unreachable!("run_stream must not touch the config registers");
        }

        fn write_coeff(&mut self, _index: usize, _value: u32) {
            unreachable!("run_stream must not touch the coefficient registers");
        }

        fn write_x_index(&mut self, value: u32) {
            self.log.push(Access::WriteX(value));
        }

        fn read_y_result(&mut self) -> u32 {
            self.log.push(Access::ReadY);
            let y = self.next_y;
            self.next_y = self.next_y.wrapping_add(100);
            y
        }

        fn write_trace(&mut self, value: u32) {
            self.log.push(Access::WriteTrace(value));
        }
    }

    fn markers(log: &[Access]) -> Vec<u32> {
        let sentinels = [
            Marker::ColdStart.bits(),
            Marker::Primed.bits(),
            Marker::Complete.bits(),
        ];
        log.iter()
            .filter_map(|a| match a {
                Access::WriteTrace(v) if sentinels.contains(v) => Some(*v),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn primes_exactly_three_positions_before_any_drain() {
        let mut port = RecordingPort::default();
        run_stream(&mut port, &FirConfig::new(8)).unwrap();

        let first_read = port
            .log
            .iter()
            .position(|a| *a == Access::ReadY)
            .expect("streaming phase must drain");
        let x_before: Vec<_> = port.log[..first_read]
            .iter()
            .filter_map(|a| match a {
                Access::WriteX(v) => Some(*v),
                _ => None,
            })
            .collect();
        assert_eq!(x_before, [0, 1, 2]);
    }

    #[test]
    fn overlap_loop_interleaves_one_drain_per_feed() {
        let mut port = RecordingPort::default();
        let drained = run_stream(&mut port, &FirConfig::new(10)).unwrap();
        assert_eq!(drained.len(), 10 - PRIMING_DEPTH);

        // After the priming marker: strict read, trace-forward, write
        // triplets for every remaining position, then the final marker.
        let primed_at = port
            .log
            .iter()
            .position(|a| *a == Access::WriteTrace(Marker::Primed.bits()))
            .unwrap();
        let tail = &port.log[primed_at + 1..];
        for (pair, i) in tail.chunks(3).zip(PRIMING_DEPTH as u32..) {
            if pair.len() < 3 {
                assert_eq!(pair, [Access::WriteTrace(Marker::Complete.bits())]);
                break;
            }
            assert_eq!(pair[0], Access::ReadY);
            assert!(matches!(pair[1], Access::WriteTrace(_)));
            assert_eq!(pair[2], Access::WriteX(i));
        }
    }

    #[test]
    fn cold_start_writes_marker_and_never_rearms() {
        let mut port = RecordingPort {
            control: ControlWord::Idle.bits(),
            ..Default::default()
        };
        run_stream(&mut port, &FirConfig::new(6)).unwrap();

        assert_eq!(
            markers(&port.log),
            [
                Marker::ColdStart.bits(),
                Marker::Primed.bits(),
                Marker::Complete.bits()
            ]
        );
        assert!(!port
            .log
            .iter()
            .any(|a| matches!(a, Access::WriteControl(_))));
    }

    #[test]
    fn finished_accelerator_is_rearmed_without_cold_start_marker() {
        let mut port = RecordingPort {
            control: ControlWord::Done.bits(),
            ..Default::default()
        };
        run_stream(&mut port, &FirConfig::new(6)).unwrap();

        assert_eq!(
            markers(&port.log),
            [Marker::Primed.bits(), Marker::Complete.bits()]
        );
        assert!(port
            .log
            .contains(&Access::WriteControl(ControlWord::Start.bits())));
    }

    #[test]
    fn short_run_is_rejected_before_any_register_access() {
        let mut port = RecordingPort::default();
        let err = run_stream(&mut port, &FirConfig::new(2)).unwrap_err();
        assert_eq!(
            err,
            FirError::DataLenTooShort {
                data_len: 2,
                min: PRIMING_DEPTH + 1
            }
        );
        assert!(port.log.is_empty());
    }

    #[test]
    fn drained_samples_match_the_y_stream() {
        let mut port = RecordingPort::default();
        let drained = run_stream(&mut port, &FirConfig::new(7)).unwrap();
        assert_eq!(drained, [0, 100, 200, 300]);
    }

    #[test]
    fn wait_done_observes_the_completion_sentinel() {
        let mut port = RecordingPort {
            control: ControlWord::Done.bits(),
            ..Default::default()
        };
        assert_eq!(wait_done(&mut port, 16), Ok(()));
    }

    #[test]
    fn wait_done_times_out_on_a_stalled_accelerator() {
        let mut port = RecordingPort {
            control: ControlWord::Start.bits(),
            ..Default::default()
        };
        assert_eq!(wait_done(&mut port, 16), Err(FirError::Timeout));
        assert_eq!(
            port.log.iter().filter(|a| **a == Access::ReadControl).count(),
            16
        );
    }
}
