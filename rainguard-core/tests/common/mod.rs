//! Common test utilities for integration tests
//!
//! Provides a deterministic rain-gauge simulator: a tip counter that rises in
//! bursts, sits still in dry spells, and occasionally overflows.

#![allow(dead_code)]

use rainguard_core::{Sample, Timestamp};

/// Start of simulated time (2023-11-14T22:13:20Z)
pub const T0: Timestamp = 1_700_000_000;

/// Simulated tipping-bucket gauge
pub struct GaugeSimulator {
    counter: f64,
    timestamp: Timestamp,
    /// Counter value at which the station wraps to zero
    overflow_at: f64,
    seed: u32,
    /// Rain that actually fell, independent of counter wraps
    fallen: f64,
}

impl GaugeSimulator {
    /// Create a simulator starting at `T0` with an empty counter
    pub fn new(overflow_at: f64) -> Self {
        Self {
            counter: 0.0,
            timestamp: T0,
            overflow_at,
            seed: 42,
            fallen: 0.0,
        }
    }

    /// Produce `count` readings `interval` seconds apart
    ///
    /// Each step adds 0.0 (dry), or 0.1-0.5 in steps of one 0.1 tip.
    pub fn readings(&mut self, count: usize, interval: i64) -> Vec<Sample> {
        let mut out = Vec::with_capacity(count);
        for _ in 0..count {
            self.timestamp += interval;
            let tips = self.random_int(0, 6);
            let amount = tips as f64 * 0.1;
            self.fallen += amount;
            self.counter += amount;
            if self.counter >= self.overflow_at {
                self.counter -= self.overflow_at;
            }
            out.push(Sample::new(round2(self.counter), self.timestamp));
        }
        out
    }

    /// Total rain produced so far
    pub fn fallen(&self) -> f64 {
        round2(self.fallen)
    }

    /// Timestamp of the newest reading
    pub fn now(&self) -> Timestamp {
        self.timestamp
    }

    fn random_int(&mut self, min: u32, max: u32) -> u32 {
        self.seed = self.seed.wrapping_mul(1664525).wrapping_add(1013904223);
        let uniform = (self.seed >> 8) as f32 / (1u32 << 24) as f32;
        min + (uniform * (max - min) as f32) as u32
    }
}

/// Round to two decimals, as reported amounts are
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Assert two rain amounts match to reporting precision
#[macro_export]
macro_rules! assert_rain_eq {
    ($actual:expr, $expected:expr) => {{
        let (actual, expected): (f64, f64) = ($actual, $expected);
        assert!(
            (actual - expected).abs() < 1e-9,
            "Expected {} mm of rain, got {}", expected, actual
        );
    }};
}
