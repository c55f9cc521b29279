//! GPIO valve driver.
//!
//! The CO2 valve relay hangs off a single GPIO line: high = open
//! (injecting), low = closed.  The pin is driven low at construction so
//! the chamber starts in the safe state regardless of prior pin history.

use log::debug;
use rppal::gpio::{Gpio, OutputPin};

use crate::control::ValveCommand;
use crate::error::ActuatorError;
use crate::ports::Valve;

/// Binary valve actuator on a GPIO pin (BCM numbering).
pub struct GpioValve {
    pin: OutputPin,
}

impl GpioValve {
    pub fn open(bcm_pin: u8) -> Result<Self, ActuatorError> {
        let gpio = Gpio::new().map_err(|_| ActuatorError::Unavailable)?;
        let pin = gpio
            .get(bcm_pin)
            .map_err(|_| ActuatorError::Unavailable)?
            .into_output_low();
        debug!("valve relay on GPIO{bcm_pin}, initialised closed");
        Ok(Self { pin })
    }
}

impl Valve for GpioValve {
    fn set(&mut self, command: ValveCommand) -> Result<(), ActuatorError> {
        match command {
            ValveCommand::Open => self.pin.set_high(),
            ValveCommand::Closed => self.pin.set_low(),
        }
        Ok(())
    }
}

impl Drop for GpioValve {
    fn drop(&mut self) {
        // Never leave the chamber injecting after the process dies.
        self.pin.set_low();
    }
}
