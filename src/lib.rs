//! CO2 environment chamber controller.
//!
//! Samples a CozIR CO2/temperature/humidity sensor over a serial link,
//! drives the chamber's CO2 valve under a hysteresis policy, logs every
//! valid reading to CSV and keeps a rolling window for trend display.
//!
//! The acquisition core is pure logic behind port traits; all hardware
//! lives in [`adapters`], so the whole loop runs against mocks on the
//! host.  See `Transport`, `Valve`, `PersistenceSink` and
//! `TrendRenderer` in [`ports`].

#![deny(unused_must_use)]

pub mod acquisition;
pub mod adapters;
pub mod config;
pub mod control;
pub mod error;
pub mod ports;
pub mod protocol;
pub mod window;
