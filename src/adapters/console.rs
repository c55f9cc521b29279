//! Console trend renderer.
//!
//! Stands in for the chamber's plotting surface when running headless:
//! on every redraw it logs a min/mean/max summary of each series over the
//! current window, plus the span the window covers.

use log::info;

use crate::ports::TrendRenderer;
use crate::protocol::Reading;

#[derive(Default)]
pub struct ConsoleRenderer;

impl ConsoleRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl TrendRenderer for ConsoleRenderer {
    fn render(&mut self, snapshot: &[Reading]) {
        let (Some(first), Some(last)) = (snapshot.first(), snapshot.last()) else {
            return;
        };

        let co2 = summarise(snapshot.iter().map(|r| f64::from(r.co2_ppm)));
        let temp = summarise(snapshot.iter().map(|r| r.temperature_c));
        let hum = summarise(snapshot.iter().map(|r| r.humidity_pct));

        info!(
            "TREND | {} readings, {} .. {}",
            snapshot.len(),
            first.timestamp.format("%H:%M:%S"),
            last.timestamp.format("%H:%M:%S"),
        );
        info!("TREND | CO2  ppm  min {:>6.0}  mean {:>6.0}  max {:>6.0}", co2.0, co2.1, co2.2);
        info!("TREND | temp C    min {:>6.1}  mean {:>6.1}  max {:>6.1}", temp.0, temp.1, temp.2);
        info!("TREND | RH   %    min {:>6.1}  mean {:>6.1}  max {:>6.1}", hum.0, hum.1, hum.2);
    }
}

/// (min, mean, max) over a non-empty series.
fn summarise(values: impl Iterator<Item = f64>) -> (f64, f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    let mut sum = 0.0;
    let mut count = 0u32;
    for v in values {
        min = min.min(v);
        max = max.max(v);
        sum += v;
        count += 1;
    }
    (min, sum / f64::from(count.max(1)), max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Local;

    #[test]
    fn summary_over_known_series() {
        let (min, mean, max) = summarise([400.0, 500.0, 600.0].into_iter());
        assert_eq!(min, 400.0);
        assert_eq!(mean, 500.0);
        assert_eq!(max, 600.0);
    }

    #[test]
    fn empty_snapshot_is_a_no_op() {
        ConsoleRenderer::new().render(&[]);
    }

    #[test]
    fn renders_without_panicking() {
        let snapshot: Vec<Reading> = (0..5)
            .map(|i| Reading {
                timestamp: Local::now(),
                humidity_pct: 45.0,
                temperature_c: 21.0,
                co2_ppm: 420 + i,
            })
            .collect();
        ConsoleRenderer::new().render(&snapshot);
    }
}
