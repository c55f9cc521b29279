//! Rolling window of recent readings for trend display.
//!
//! Fixed-capacity FIFO: once full, each push evicts the oldest entry.
//! The window is exclusively owned by the acquisition loop; the renderer
//! only ever sees a cloned snapshot, never a live handle.

use std::collections::VecDeque;

use crate::protocol::Reading;

/// Insertion-ordered buffer of the most recent readings.
#[derive(Debug)]
pub struct SlidingWindow {
    buf: VecDeque<Reading>,
    capacity: usize,
}

impl SlidingWindow {
    /// Create a window holding at most `capacity` readings.
    /// Capacity is fixed for the lifetime of the window and must be
    /// at least 1 (enforced by config validation).
    pub fn new(capacity: usize) -> Self {
        Self {
            buf: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a reading, evicting the oldest if the window is full.
    /// Always succeeds; O(1) amortised.
    pub fn push(&mut self, reading: Reading) {
        if self.buf.len() == self.capacity {
            self.buf.pop_front();
        }
        self.buf.push_back(reading);
    }

    /// An owned copy of the window contents in arrival order,
    /// suitable for handing to the renderer.
    pub fn snapshot(&self) -> Vec<Reading> {
        self.buf.iter().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Local;

    fn reading(co2_ppm: u32) -> Reading {
        Reading {
            timestamp: Local::now(),
            humidity_pct: 45.0,
            temperature_c: 21.0,
            co2_ppm,
        }
    }

    #[test]
    fn fills_up_to_capacity() {
        let mut w = SlidingWindow::new(3);
        assert!(w.is_empty());
        w.push(reading(1));
        w.push(reading(2));
        assert_eq!(w.len(), 2);
        w.push(reading(3));
        assert_eq!(w.len(), 3);
    }

    #[test]
    fn evicts_oldest_first() {
        let mut w = SlidingWindow::new(3);
        for co2 in 1..=5 {
            w.push(reading(co2));
        }
        assert_eq!(w.len(), 3);
        let snap: Vec<u32> = w.snapshot().iter().map(|r| r.co2_ppm).collect();
        assert_eq!(snap, vec![3, 4, 5]);
    }

    #[test]
    fn snapshot_preserves_arrival_order() {
        let mut w = SlidingWindow::new(10);
        for co2 in [7, 3, 9, 1] {
            w.push(reading(co2));
        }
        let snap: Vec<u32> = w.snapshot().iter().map(|r| r.co2_ppm).collect();
        assert_eq!(snap, vec![7, 3, 9, 1]);
    }

    #[test]
    fn snapshot_is_detached_from_the_window() {
        let mut w = SlidingWindow::new(2);
        w.push(reading(1));
        let snap = w.snapshot();
        w.push(reading(2));
        w.push(reading(3));
        assert_eq!(snap.len(), 1);
        assert_eq!(snap[0].co2_ppm, 1);
    }

    #[test]
    fn capacity_one_keeps_only_the_latest() {
        let mut w = SlidingWindow::new(1);
        w.push(reading(1));
        w.push(reading(2));
        assert_eq!(w.len(), 1);
        assert_eq!(w.snapshot()[0].co2_ppm, 2);
    }
}
