//! Append-only CSV persistence sink.
//!
//! One row per valid reading, `timestamp,humidity,temperature,co2`, in
//! arrival order.  The file is opened in append mode so restarts extend
//! the existing log, and every row is flushed immediately — losing at
//! most the in-flight record on power failure.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;

use log::info;

use crate::error::PersistError;
use crate::ports::PersistenceSink;
use crate::protocol::Reading;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// CSV file sink.
pub struct CsvSink {
    file: File,
}

impl CsvSink {
    /// Open (or create) the log file, creating parent directories.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, PersistError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        info!("logging readings to {}", path.display());
        Ok(Self { file })
    }
}

impl PersistenceSink for CsvSink {
    fn append(&mut self, reading: &Reading) -> Result<(), PersistError> {
        writeln!(
            self.file,
            "{},{:.1},{:.1},{}",
            reading.timestamp.format(TIMESTAMP_FORMAT),
            reading.humidity_pct,
            reading.temperature_c,
            reading.co2_ppm,
        )?;
        self.file.flush()?;
        Ok(())
    }
}
