//! System configuration parameters
//!
//! All tunable parameters for the chamber controller.  Values can be
//! overridden by pointing the binary at a JSON config file; otherwise the
//! defaults below (which match the deployed chamber) are used.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::control::ControlBand;
use crate::error::ConfigError;

/// Core system configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChamberConfig {
    // --- Serial link ---
    /// Serial device carrying the sensor's line-delimited output.
    pub serial_device: String,
    /// Baud rate (CozIR default is 9600 8N1).
    pub baud_rate: u32,
    /// Per-cycle read timeout in milliseconds.
    pub read_timeout_ms: u64,

    // --- CO2 control band ---
    /// Valve closes strictly above this concentration (ppm).
    pub band_low_ppm: u32,
    /// Valve opens again at or above this concentration (ppm).
    pub band_high_ppm: u32,
    /// Minimum cycles a valve command is held before it may flip.
    /// 0 disables debouncing (the valve follows the band check exactly).
    pub min_dwell_cycles: u32,

    // --- Trend window ---
    /// Number of recent readings retained for trend display.
    pub window_capacity: usize,
    /// Redraw the trend view every this many successful readings.
    pub plot_interval: usize,

    // --- Actuator ---
    /// BCM number of the GPIO pin driving the CO2 valve relay.
    pub valve_pin: u8,

    // --- Persistence ---
    /// Append-only CSV log of every valid reading.
    pub csv_path: String,
}

impl Default for ChamberConfig {
    fn default() -> Self {
        Self {
            // Serial
            serial_device: "/dev/ttyS0".into(),
            baud_rate: 9600,
            read_timeout_ms: 1000,

            // Control band
            band_low_ppm: 420,
            band_high_ppm: 510,
            min_dwell_cycles: 0,

            // Trend window
            window_capacity: 60,
            plot_interval: 10,

            // Actuator (physical pin 31 on the Pi header)
            valve_pin: 6,

            // Persistence
            csv_path: "/home/cnce/chamber_log.csv".into(),
        }
    }
}

impl ChamberConfig {
    /// Load and validate configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text).map_err(|_| ConfigError::Malformed)?;
        config.validate()?;
        Ok(config)
    }

    /// Range-check every field.  Rejects rather than clamps, so a bad
    /// config file cannot silently run the chamber with a wrong band.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.serial_device.is_empty() {
            return Err(ConfigError::Invalid("serial_device must not be empty"));
        }
        if self.baud_rate == 0 {
            return Err(ConfigError::Invalid("baud_rate must be non-zero"));
        }
        if self.read_timeout_ms == 0 {
            return Err(ConfigError::Invalid("read_timeout_ms must be non-zero"));
        }
        if self.band_low_ppm >= self.band_high_ppm {
            return Err(ConfigError::Invalid("band_low_ppm must be below band_high_ppm"));
        }
        if self.window_capacity == 0 {
            return Err(ConfigError::Invalid("window_capacity must be at least 1"));
        }
        if self.plot_interval == 0 {
            return Err(ConfigError::Invalid("plot_interval must be at least 1"));
        }
        if self.csv_path.is_empty() {
            return Err(ConfigError::Invalid("csv_path must not be empty"));
        }
        Ok(())
    }

    /// The CO2 control band as a value type for the controller.
    pub fn band(&self) -> ControlBand {
        ControlBand {
            low: self.band_low_ppm,
            high: self.band_high_ppm,
        }
    }

    /// Per-cycle read timeout as a `Duration`.
    pub fn read_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.read_timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_sane() {
        let c = ChamberConfig::default();
        assert!(c.validate().is_ok());
        assert!(c.band_low_ppm < c.band_high_ppm);
        assert!(c.window_capacity >= c.plot_interval);
        assert_eq!(c.baud_rate, 9600);
        assert_eq!(c.min_dwell_cycles, 0, "debounce must be off by default");
    }

    #[test]
    fn serde_roundtrip() {
        let c = ChamberConfig::default();
        let json = serde_json::to_string(&c).unwrap();
        let c2: ChamberConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(c.serial_device, c2.serial_device);
        assert_eq!(c.band_low_ppm, c2.band_low_ppm);
        assert_eq!(c.band_high_ppm, c2.band_high_ppm);
        assert_eq!(c.window_capacity, c2.window_capacity);
    }

    #[test]
    fn partial_json_fills_in_defaults() {
        let c: ChamberConfig = serde_json::from_str(r#"{"band_high_ppm": 600}"#).unwrap();
        assert_eq!(c.band_high_ppm, 600);
        assert_eq!(c.band_low_ppm, 420);
        assert_eq!(c.window_capacity, 60);
    }

    #[test]
    fn inverted_band_is_rejected() {
        let c = ChamberConfig {
            band_low_ppm: 510,
            band_high_ppm: 420,
            ..ChamberConfig::default()
        };
        assert_eq!(
            c.validate(),
            Err(ConfigError::Invalid("band_low_ppm must be below band_high_ppm"))
        );
    }

    #[test]
    fn zero_capacity_is_rejected() {
        let c = ChamberConfig {
            window_capacity: 0,
            ..ChamberConfig::default()
        };
        assert!(c.validate().is_err());
    }

    #[test]
    fn zero_plot_interval_is_rejected() {
        let c = ChamberConfig {
            plot_interval: 0,
            ..ChamberConfig::default()
        };
        assert!(c.validate().is_err());
    }

    #[test]
    fn band_helper_matches_fields() {
        let c = ChamberConfig::default();
        let band = c.band();
        assert_eq!(band.low, 420);
        assert_eq!(band.high, 510);
    }
}
