//! Adapters — concrete implementations of the port traits.
//!
//! | Adapter    | Implements      | Connects to                    |
//! |------------|-----------------|--------------------------------|
//! | `serial`   | Transport       | Pi UART via rppal              |
//! | `valve`    | Valve           | GPIO relay via rppal           |
//! | `csv_sink` | PersistenceSink | Append-only CSV file           |
//! | `console`  | TrendRenderer   | Terminal trend summary         |
//!
//! The hardware-facing adapters require the `rpi` feature; the file and
//! console adapters build everywhere so host tests can exercise them.

pub mod console;
pub mod csv_sink;
#[cfg(feature = "rpi")]
pub mod serial;
#[cfg(feature = "rpi")]
pub mod valve;
