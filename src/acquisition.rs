//! Acquisition-control loop.
//!
//! [`AcquisitionService`] owns the parser, window and controller and
//! orchestrates one cycle per sensor line:
//!
//! ```text
//!  Transport ──▶ FrameParser ──▶ HysteresisController ──▶ Valve
//!                     │
//!                     ├──▶ SlidingWindow ──(every plot_interval)──▶ TrendRenderer
//!                     └──▶ PersistenceSink
//! ```
//!
//! Nothing in a cycle is fatal: timeouts and parse faults skip the cycle,
//! valve and sink failures are logged and the loop continues.  Only the
//! shutdown flag ends the loop, at which point the valve is driven to its
//! safe state (closed).

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use log::{debug, info, warn};

use crate::config::ChamberConfig;
use crate::control::{HysteresisController, ValveCommand};
use crate::error::{ParseError, TransportError};
use crate::ports::{PersistenceSink, Transport, TrendRenderer, Valve};
use crate::protocol::FrameParser;
use crate::window::SlidingWindow;

/// What one cycle of the loop did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// A valid reading was processed and this command was issued.
    Sampled(ValveCommand),
    /// The line did not parse; no state was touched.
    ParseFault(ParseError),
    /// No line arrived in time; no state was touched.
    Timeout,
}

/// The acquisition-control service.
pub struct AcquisitionService {
    parser: FrameParser,
    window: SlidingWindow,
    controller: HysteresisController,
    read_timeout: Duration,
    plot_interval: usize,
    samples: u64,
    parse_faults: u64,
}

impl AcquisitionService {
    pub fn new(config: &ChamberConfig) -> Self {
        Self {
            parser: FrameParser::new(),
            window: SlidingWindow::new(config.window_capacity),
            controller: HysteresisController::new(config.band())
                .with_min_dwell(config.min_dwell_cycles),
            read_timeout: config.read_timeout(),
            plot_interval: config.plot_interval,
            samples: 0,
            parse_faults: 0,
        }
    }

    /// Run until `shutdown` is set, then drive the valve closed.
    pub fn run(
        &mut self,
        transport: &mut impl Transport,
        valve: &mut impl Valve,
        sink: &mut impl PersistenceSink,
        renderer: &mut impl TrendRenderer,
        shutdown: &AtomicBool,
    ) {
        let band = self.controller.band();
        info!(
            "acquisition started: band ({}, {}) ppm, window {} readings, redraw every {}",
            band.low,
            band.high,
            self.window.capacity(),
            self.plot_interval,
        );

        while !shutdown.load(Ordering::Relaxed) {
            self.cycle(transport, valve, sink, renderer);
        }

        info!(
            "shutdown requested after {} samples ({} parse faults); closing valve",
            self.samples, self.parse_faults,
        );
        if let Err(e) = valve.set(ValveCommand::Closed) {
            warn!("failed to close valve on shutdown: {e}");
        }
    }

    /// Execute one read → parse → decide → persist → maybe-render cycle.
    pub fn cycle(
        &mut self,
        transport: &mut impl Transport,
        valve: &mut impl Valve,
        sink: &mut impl PersistenceSink,
        renderer: &mut impl TrendRenderer,
    ) -> CycleOutcome {
        let raw = match transport.read_line(self.read_timeout) {
            Ok(line) => line,
            Err(TransportError::Timeout) => {
                debug!("no frame within {:?}", self.read_timeout);
                return CycleOutcome::Timeout;
            }
            Err(e) => {
                warn!("transport read failed: {e}");
                return CycleOutcome::Timeout;
            }
        };

        let reading = match self.parser.parse(&raw) {
            Ok(r) => r,
            Err(e) => {
                self.parse_faults += 1;
                warn!("dropped frame ({e}): {:?}", String::from_utf8_lossy(&raw));
                return CycleOutcome::ParseFault(e);
            }
        };

        let previous = self.controller.last_command();
        let command = self.controller.update(reading.co2_ppm);
        if let Err(e) = valve.set(command) {
            warn!("valve write failed: {e}");
        }
        if previous != Some(command) {
            info!("valve {} at {} ppm", command.label(), reading.co2_ppm);
        }

        info!(
            "CO2 {:>5} ppm | cell {:>6.1} C | RH {:>5.1} % | {}",
            reading.co2_ppm,
            reading.temperature_c,
            reading.humidity_pct,
            reading.timestamp.format("%Y-%m-%d %H:%M:%S"),
        );

        self.window.push(reading);
        if let Err(e) = sink.append(&reading) {
            warn!("reading not persisted: {e}");
        }

        self.samples += 1;
        // Redraw once enough history has accumulated.  The fill gate is
        // clamped so a plot interval larger than the window still renders.
        let fill_gate = self.plot_interval.min(self.window.capacity());
        if self.samples % self.plot_interval as u64 == 0 && self.window.len() >= fill_gate {
            renderer.render(&self.window.snapshot());
        }

        CycleOutcome::Sampled(command)
    }

    /// Readings processed since startup.
    pub fn samples(&self) -> u64 {
        self.samples
    }

    /// Frames dropped as unparseable since startup.
    pub fn parse_faults(&self) -> u64 {
        self.parse_faults
    }

    /// The trend window (snapshot it before handing anything out).
    pub fn window(&self) -> &SlidingWindow {
        &self.window
    }
}
