//! Hysteresis valve controller.
//!
//! Keeps chamber CO2 inside a dead band: the valve is closed while the
//! concentration sits strictly inside `(low, high)` and open otherwise.
//! Both boundary values open the valve — the band is open on both ends,
//! and that exact inequality is load-bearing for the chamber's setpoint.
//!
//! The band check itself is stateless.  An optional minimum-dwell policy
//! can be layered on top to stop the valve chattering when the
//! concentration oscillates right at a boundary; it is disabled by
//! default so the shipped behaviour is exactly the bare band check.

use serde::{Deserialize, Serialize};

/// Command for the binary CO2 valve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValveCommand {
    /// Energise the valve (inject CO2).
    Open,
    /// De-energise the valve.  Safe state.
    Closed,
}

impl ValveCommand {
    /// Label used in logs and the console readout.
    pub fn label(self) -> &'static str {
        match self {
            Self::Open => "OPEN",
            Self::Closed => "CLOSED",
        }
    }
}

/// The CO2 dead band in ppm.  Immutable for the process lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlBand {
    pub low: u32,
    pub high: u32,
}

impl ControlBand {
    /// True iff `co2_ppm` lies strictly inside the band.
    pub fn contains(self, co2_ppm: u32) -> bool {
        self.low < co2_ppm && co2_ppm < self.high
    }
}

/// Map a concentration to a valve command.  Pure and stateless:
/// `Closed` iff `low < co2_ppm < high`, `Open` otherwise (including at
/// both boundaries).
pub fn decide(co2_ppm: u32, band: ControlBand) -> ValveCommand {
    if band.contains(co2_ppm) {
        ValveCommand::Closed
    } else {
        ValveCommand::Open
    }
}

/// Stateful wrapper around [`decide`] adding the optional dwell policy.
#[derive(Debug)]
pub struct HysteresisController {
    band: ControlBand,
    /// Minimum cycles a command is held before it may flip.  0 = off.
    min_dwell_cycles: u32,
    last: Option<ValveCommand>,
    cycles_held: u32,
}

impl HysteresisController {
    pub fn new(band: ControlBand) -> Self {
        Self {
            band,
            min_dwell_cycles: 0,
            last: None,
            cycles_held: 0,
        }
    }

    /// Enable the minimum-dwell debounce.  A command issued now is held
    /// for at least `cycles` further cycles before the controller will
    /// flip it, even if the band check disagrees in between.
    pub fn with_min_dwell(mut self, cycles: u32) -> Self {
        self.min_dwell_cycles = cycles;
        self
    }

    pub fn band(&self) -> ControlBand {
        self.band
    }

    /// The most recently issued command, if any.
    pub fn last_command(&self) -> Option<ValveCommand> {
        self.last
    }

    /// Compute the command for the latest concentration.
    /// With dwell disabled this is exactly [`decide`] each cycle.
    pub fn update(&mut self, co2_ppm: u32) -> ValveCommand {
        let target = decide(co2_ppm, self.band);
        let issued = match self.last {
            Some(current) if current != target && self.cycles_held < self.min_dwell_cycles => {
                current
            }
            _ => target,
        };
        if self.last == Some(issued) {
            self.cycles_held = self.cycles_held.saturating_add(1);
        } else {
            self.last = Some(issued);
            self.cycles_held = 0;
        }
        issued
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BAND: ControlBand = ControlBand { low: 420, high: 510 };

    #[test]
    fn inside_band_closes_valve() {
        assert_eq!(decide(421, BAND), ValveCommand::Closed);
        assert_eq!(decide(465, BAND), ValveCommand::Closed);
        assert_eq!(decide(509, BAND), ValveCommand::Closed);
    }

    #[test]
    fn outside_band_opens_valve() {
        assert_eq!(decide(0, BAND), ValveCommand::Open);
        assert_eq!(decide(419, BAND), ValveCommand::Open);
        assert_eq!(decide(511, BAND), ValveCommand::Open);
        assert_eq!(decide(600, BAND), ValveCommand::Open);
    }

    #[test]
    fn both_boundaries_open_valve() {
        // Band is open on both ends; == low and == high must both open.
        assert_eq!(decide(420, BAND), ValveCommand::Open);
        assert_eq!(decide(510, BAND), ValveCommand::Open);
    }

    #[test]
    fn controller_without_dwell_tracks_decide_exactly() {
        let mut c = HysteresisController::new(BAND);
        for co2 in [419, 420, 465, 509, 510, 600, 465, 420] {
            assert_eq!(c.update(co2), decide(co2, BAND), "co2={co2}");
        }
    }

    #[test]
    fn dwell_holds_command_through_boundary_chatter() {
        let mut c = HysteresisController::new(BAND).with_min_dwell(3);
        assert_eq!(c.update(600), ValveCommand::Open);
        // Chatter across the high boundary: held open for 3 cycles.
        assert_eq!(c.update(509), ValveCommand::Open);
        assert_eq!(c.update(510), ValveCommand::Open);
        assert_eq!(c.update(509), ValveCommand::Open);
        // Dwell satisfied; now the band check takes over again.
        assert_eq!(c.update(509), ValveCommand::Closed);
    }

    #[test]
    fn dwell_does_not_delay_the_first_command() {
        let mut c = HysteresisController::new(BAND).with_min_dwell(5);
        assert_eq!(c.last_command(), None);
        assert_eq!(c.update(465), ValveCommand::Closed);
        assert_eq!(c.last_command(), Some(ValveCommand::Closed));
    }
}
