//! Chamber controller — main entry point.
//!
//! Wires the Raspberry Pi adapters (UART sensor link, GPIO valve relay,
//! CSV log, console trend view) into the acquisition service and runs it
//! until SIGINT/SIGTERM.
//!
//! Usage: `co2chamber [config.json]` — defaults are used when no config
//! file is given.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::{Context, Result};
use log::info;

use co2chamber::acquisition::AcquisitionService;
use co2chamber::adapters::console::ConsoleRenderer;
use co2chamber::adapters::csv_sink::CsvSink;
use co2chamber::adapters::serial::UartTransport;
use co2chamber::adapters::valve::GpioValve;
use co2chamber::config::ChamberConfig;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    info!("co2chamber v{}", env!("CARGO_PKG_VERSION"));

    // ── Configuration ─────────────────────────────────────────
    let config = match std::env::args().nth(1) {
        Some(path) => {
            let config =
                ChamberConfig::load(&path).with_context(|| format!("loading config {path}"))?;
            info!("config loaded from {path}");
            config
        }
        None => {
            info!("no config file given, using defaults");
            ChamberConfig::default()
        }
    };
    config.validate().context("validating config")?;

    // ── Shutdown signal ───────────────────────────────────────
    let shutdown = Arc::new(AtomicBool::new(false));
    {
        let shutdown = Arc::clone(&shutdown);
        ctrlc::set_handler(move || {
            shutdown.store(true, Ordering::Relaxed);
        })
        .context("installing signal handler")?;
    }

    // ── Adapters ──────────────────────────────────────────────
    let mut transport = UartTransport::open(&config.serial_device, config.baud_rate)
        .with_context(|| format!("opening {}", config.serial_device))?;
    let mut valve = GpioValve::open(config.valve_pin)
        .with_context(|| format!("claiming GPIO{}", config.valve_pin))?;
    let mut sink =
        CsvSink::open(&config.csv_path).with_context(|| format!("opening {}", config.csv_path))?;
    let mut renderer = ConsoleRenderer::new();

    // ── Run ───────────────────────────────────────────────────
    let mut service = AcquisitionService::new(&config);
    service.run(&mut transport, &mut valve, &mut sink, &mut renderer, &shutdown);

    info!("exited cleanly");
    Ok(())
}
