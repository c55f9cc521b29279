//! UART transport adapter.
//!
//! Reads the sensor's 9600 8N1 line stream through rppal's UART driver.
//! Bytes are accumulated across calls so a frame split over two reads is
//! not lost; `read_line` hands back one delimiter-stripped line at a time.

use std::time::{Duration, Instant};

use log::debug;
use rppal::uart::{Parity, Queue, Uart};

use crate::error::TransportError;
use crate::ports::Transport;

/// Serial transport over the Pi's UART.
pub struct UartTransport {
    uart: Uart,
    pending: Vec<u8>,
}

impl UartTransport {
    /// Open `device` (e.g. `/dev/ttyS0`) at `baud_rate`, 8N1.
    pub fn open(device: &str, baud_rate: u32) -> Result<Self, TransportError> {
        let mut uart =
            Uart::with_path(device, baud_rate, Parity::None, 8, 1).map_err(map_uart_err)?;
        // Stale bytes from before startup would parse as a torn frame.
        uart.flush(Queue::Input).map_err(map_uart_err)?;
        debug!("opened {device} at {baud_rate} baud");
        Ok(Self {
            uart,
            pending: Vec::new(),
        })
    }

    fn take_line(&mut self) -> Option<Vec<u8>> {
        let pos = self.pending.iter().position(|&b| b == b'\n')?;
        let mut line: Vec<u8> = self.pending.drain(..=pos).collect();
        while line.last().is_some_and(|&b| b == b'\n' || b == b'\r') {
            line.pop();
        }
        Some(line)
    }
}

impl Transport for UartTransport {
    fn read_line(&mut self, timeout: Duration) -> Result<Vec<u8>, TransportError> {
        let deadline = Instant::now() + timeout;
        loop {
            if let Some(line) = self.take_line() {
                return Ok(line);
            }
            let now = Instant::now();
            if now >= deadline {
                return Err(TransportError::Timeout);
            }
            self.uart
                .set_read_mode(0, deadline - now)
                .map_err(map_uart_err)?;
            let mut chunk = [0u8; 64];
            let n = self.uart.read(&mut chunk).map_err(map_uart_err)?;
            if n == 0 {
                // VMIN=0/VTIME expired with nothing buffered.
                return Err(TransportError::Timeout);
            }
            self.pending.extend_from_slice(&chunk[..n]);
        }
    }
}

fn map_uart_err(e: rppal::uart::Error) -> TransportError {
    match e {
        rppal::uart::Error::Io(io) => TransportError::Io(io.kind()),
        _ => TransportError::Closed,
    }
}
