//! Port traits — the boundary between the acquisition core and the world.
//!
//! ```text
//!   Transport ──▶ AcquisitionService ──▶ Valve / PersistenceSink / TrendRenderer
//! ```
//!
//! Concrete adapters (serial UART, GPIO valve, CSV file, console) live in
//! [`crate::adapters`].  The service consumes them via generics, so the
//! core never touches hardware directly and the whole loop runs against
//! mocks in tests.

use std::time::Duration;

use crate::control::ValveCommand;
use crate::error::{ActuatorError, PersistError, TransportError};
use crate::protocol::Reading;

// ───────────────────────────────────────────────────────────────
// Transport port (sensor → core)
// ───────────────────────────────────────────────────────────────

/// Line-delimited byte source, typically a serial link.
pub trait Transport {
    /// Block until one line (delimiter stripped) arrives or `timeout`
    /// elapses.  A timeout is an expected, non-fatal outcome; the loop
    /// simply tries again.
    fn read_line(&mut self, timeout: Duration) -> Result<Vec<u8>, TransportError>;
}

// ───────────────────────────────────────────────────────────────
// Valve port (core → actuator)
// ───────────────────────────────────────────────────────────────

/// Single binary output driving the CO2 valve.  No feedback channel.
pub trait Valve {
    /// Drive the valve.  Failures are surfaced but must not stop
    /// acquisition.
    fn set(&mut self, command: ValveCommand) -> Result<(), ActuatorError>;
}

// ───────────────────────────────────────────────────────────────
// Persistence port (core → durable log)
// ───────────────────────────────────────────────────────────────

/// Append-only record sink, one record per successful reading.
pub trait PersistenceSink {
    /// Append a reading.  A failed append loses one record; it must not
    /// stop acquisition.
    fn append(&mut self, reading: &Reading) -> Result<(), PersistError>;
}

// ───────────────────────────────────────────────────────────────
// Render port (core → trend display)
// ───────────────────────────────────────────────────────────────

/// Consumer of the rolling window for live trend display.
pub trait TrendRenderer {
    /// Redraw from a full window snapshot (not just new points).
    /// The slice is a detached copy; the renderer may hold onto it.
    fn render(&mut self, snapshot: &[Reading]);
}
