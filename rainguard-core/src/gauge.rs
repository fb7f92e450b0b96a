//! Hourly and daily rain from one gauge channel
//!
//! Stations are usually asked for two figures: rain in the last hour and rain
//! in the last 24 hours. [`RainGauge`] feeds every reading into two
//! [`SampleWindow`]s that share a single clock, so both windows evict against
//! the same "now".
//!
//! ```rust
//! use rainguard_core::gauge::RainGauge;
//! use rainguard_core::time::FixedClock;
//!
//! let t0 = 1_700_000_000;
//! let mut gauge = RainGauge::new(FixedClock::new(t0));
//!
//! gauge.record(100.0, t0);
//! gauge.clock_mut().advance(2 * 3600);
//! gauge.record(104.5, t0 + 2 * 3600);
//!
//! // The first reading fell out of the hourly window but not the daily one
//! assert_eq!(gauge.rain_last_hour(), 0.0);
//! assert_eq!(gauge.rain_last_24h(), 4.5);
//! ```

use alloc::collections::VecDeque;

use crate::config::GaugeConfig;
use crate::history::{DuplicatePolicy, Sample, SampleWindow};
use crate::store::SampleStore;
use crate::time::{TimeSource, Timestamp};

/// Hourly and daily rain windows driven by one clock
#[derive(Debug, Clone)]
pub struct RainGauge<C, S = VecDeque<Sample>> {
    hourly: SampleWindow<S>,
    daily: SampleWindow<S>,
    clock: C,
}

impl<C: TimeSource> RainGauge<C> {
    /// Create a gauge with the default 60 minute and 24 hour windows
    pub fn new(clock: C) -> Self {
        Self::from_config(&GaugeConfig::default(), clock)
    }

    /// Create a gauge from a configuration (not validated)
    pub fn from_config(config: &GaugeConfig, clock: C) -> Self {
        Self {
            hourly: SampleWindow::from_config(&config.hourly()),
            daily: SampleWindow::from_config(&config.daily()),
            clock,
        }
    }
}

impl<C: TimeSource, S: SampleStore> RainGauge<C, S> {
    /// Create a gauge over caller-provided stores
    ///
    /// Typically two [`FixedStore`](crate::store::FixedStore)s sized for
    /// their windows.
    pub fn with_stores(config: &GaugeConfig, hourly: S, daily: S, clock: C) -> Self {
        let policy: DuplicatePolicy = config.duplicate_policy;
        Self {
            hourly: SampleWindow::with_store(config.hourly_minutes, hourly).with_policy(policy),
            daily: SampleWindow::with_store(config.daily_minutes, daily).with_policy(policy),
            clock,
        }
    }

    /// Feed one reading to both windows
    ///
    /// Returns `true` if the daily window stored it. Both windows apply the
    /// same policy, but an empty hourly window compares against the empty
    /// sentinel while the daily one may still hold older samples, so the two
    /// can disagree.
    pub fn record(&mut self, value: f64, timestamp: Timestamp) -> bool {
        let now = self.clock.now();
        self.hourly.add_measurement_at(value, timestamp, now);
        self.daily.add_measurement_at(value, timestamp, now)
    }

    /// Evict stale samples from both windows without a new reading
    pub fn cleanup(&mut self) {
        let now = self.clock.now();
        self.hourly.cleanup_at(now);
        self.daily.cleanup_at(now);
    }

    /// Rain accumulated in the short window
    pub fn rain_last_hour(&self) -> f64 {
        self.hourly.rain_amount()
    }

    /// Rain accumulated in the long window
    pub fn rain_last_24h(&self) -> f64 {
        self.daily.rain_amount()
    }

    /// Drop all samples from both windows
    pub fn clear(&mut self) {
        self.hourly.clear();
        self.daily.clear();
    }

    /// Short window
    pub fn hourly(&self) -> &SampleWindow<S> {
        &self.hourly
    }

    /// Long window
    pub fn daily(&self) -> &SampleWindow<S> {
        &self.daily
    }

    /// Clock used for eviction
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Mutable access to the clock
    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::SECONDS_PER_HOUR;
    use crate::store::FixedStore;
    use crate::time::FixedClock;

    const T0: Timestamp = 1_700_000_000;

    /// One reading per 15 minutes, the counter rising 0.5 each time
    fn feed_steady(gauge: &mut RainGauge<FixedClock>, readings: i64) {
        for i in 0..readings {
            let ts = T0 + i * 900;
            gauge.clock_mut().set(ts);
            gauge.record(10.0 + 0.5 * i as f64, ts);
        }
    }

    #[test]
    fn windows_diverge_over_time() {
        let mut gauge = RainGauge::new(FixedClock::new(T0));
        // 3 hours of readings
        feed_steady(&mut gauge, 13);

        // Hourly keeps readings at t-60..t (5 samples, 4 steps of 0.5)
        assert_eq!(gauge.hourly().len(), 5);
        assert_eq!(gauge.rain_last_hour(), 2.0);
        // Daily keeps everything: 12 steps of 0.5
        assert_eq!(gauge.daily().len(), 13);
        assert_eq!(gauge.rain_last_24h(), 6.0);
    }

    #[test]
    fn daily_sees_reset_hourly_does_not() {
        let mut gauge = RainGauge::new(FixedClock::new(T0));
        gauge.record(50.0, T0);
        gauge.record(52.0, T0 + 600);

        gauge.clock_mut().advance(2 * SECONDS_PER_HOUR);
        // Station restarted its counter
        gauge.record(1.0, T0 + 2 * SECONDS_PER_HOUR);
        gauge.clock_mut().advance(600);
        gauge.record(1.5, T0 + 2 * SECONDS_PER_HOUR + 600);

        assert_eq!(gauge.rain_last_hour(), 0.5);
        // 2.0 before the reset, 1.0 for the reset, 0.5 after
        assert_eq!(gauge.rain_last_24h(), 3.5);
    }

    #[test]
    fn cleanup_without_readings() {
        let mut gauge = RainGauge::new(FixedClock::new(T0));
        gauge.record(1.0, T0);
        gauge.record(2.0, T0 + 60);

        gauge.clock_mut().advance(25 * SECONDS_PER_HOUR);
        assert_eq!(gauge.daily().len(), 2);
        gauge.cleanup();
        assert!(gauge.hourly().is_empty());
        assert!(gauge.daily().is_empty());
    }

    #[test]
    fn clear_empties_both_windows() {
        let mut gauge = RainGauge::new(FixedClock::new(T0));
        feed_steady(&mut gauge, 4);
        gauge.clear();
        assert!(gauge.hourly().is_empty());
        assert!(gauge.daily().is_empty());
    }

    #[test]
    fn fixed_stores() {
        let config = GaugeConfig::default();
        let mut gauge = RainGauge::with_stores(
            &config,
            FixedStore::<8>::new(),
            FixedStore::<8>::new(),
            FixedClock::new(T0),
        );
        gauge.record(1.0, T0);
        gauge.record(3.0, T0 + 60);
        assert_eq!(gauge.rain_last_24h(), 2.0);
        assert_eq!(gauge.daily().store().capacity(), 8);
    }
}
