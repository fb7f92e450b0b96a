//! Sliding-Window Counter History
//!
//! ## Overview
//!
//! Rain gauges report an absolute tip counter, not a per-interval amount. To
//! answer "how much rain in the last hour" we keep the counter readings of the
//! last hour and reduce them to an accumulated delta. The counter is
//! monotonic only within one epoch: it restarts near zero when the station
//! overflows its register, loses power, or is reset by the user.
//!
//! This module provides:
//! - [`Sample`]: one `(value, timestamp)` reading
//! - [`SampleWindow`]: the window logic, with "now" passed in explicitly
//! - [`SensorHistory`]: a window that owns its [`TimeSource`]
//!
//! ## Ingestion
//!
//! Each new reading is compared with the most recently stored one (or with
//! `(0.0, 0)` when the window is empty) and filtered by a
//! [`DuplicatePolicy`]. Eviction then runs unconditionally:
//!
//! ```text
//! cutoff = now - max_age_seconds
//!
//!   ┌────────┬────────┬────────┬────────┐
//!   │ t-180  │ t-120  │ t-60   │   t    │     max_age = 120 s
//!   └────────┴────────┴────────┴────────┘
//!      ✗ popped  ✓ stop (t-120 >= cutoff)
//! ```
//!
//! Eviction is a single forward scan from the oldest sample that stops at the
//! first sample inside the window. **Callers must feed readings in
//! non-decreasing timestamp order.** A late, out-of-order sample is not moved
//! into place; it stays where it was appended and may shield older samples
//! behind it from eviction, or be evicted early itself.
//!
//! ## Reduction
//!
//! [`SampleWindow::rain_amount`] walks consecutive pairs once:
//!
//! ```text
//! values:  10 ──► 15 ──► 2 ──► 6
//! delta:      +5     +2     +4        = 11.0
//!                  (reset: the counter restarted, so the
//!                   new reading is all rain since the reset)
//! ```
//!
//! Each step depends only on the previous value. The total is rounded to two
//! decimal places.
//!
//! ## Usage Example
//!
//! ```rust
//! use rainguard_core::history::SensorHistory;
//! use rainguard_core::time::FixedClock;
//!
//! let now = 1_700_000_000;
//! let mut history = SensorHistory::new(60, FixedClock::new(now));
//!
//! history.add_measurement(10.0, now - 120);
//! history.add_measurement(15.0, now - 60);
//! history.add_measurement(2.0, now); // counter reset
//!
//! assert_eq!(history.rain_amount(), 7.0);
//! ```

use alloc::collections::VecDeque;
use alloc::vec::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::config::HistoryConfig;
use crate::constants::{MIN_SAMPLES_FOR_AMOUNT, RAIN_AMOUNT_DECIMALS, SECONDS_PER_MINUTE};
use crate::store::SampleStore;
use crate::time::{TimeSource, Timestamp};

/// Single counter reading with timestamp
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Sample {
    /// Raw counter value reported by the gauge
    pub value: f64,
    /// Seconds since the Unix epoch, as supplied by the caller
    pub timestamp: Timestamp,
}

impl Sample {
    /// Create a sample
    pub const fn new(value: f64, timestamp: Timestamp) -> Self {
        Self { value, timestamp }
    }
}

impl From<(f64, Timestamp)> for Sample {
    fn from((value, timestamp): (f64, Timestamp)) -> Self {
        Self { value, timestamp }
    }
}

impl From<Sample> for (f64, Timestamp) {
    fn from(sample: Sample) -> Self {
        (sample.value, sample.timestamp)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Sample {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "({}, t={})", self.value, self.timestamp)
    }
}

/// Rule deciding whether a new reading is stored
///
/// Both rules compare against the newest stored sample, or against `(0.0, 0)`
/// when the window is empty. So a first reading with value `0.0` or
/// timestamp `0` is dropped under [`RequireBothChanged`](Self::RequireBothChanged).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DuplicatePolicy {
    /// Store only when the timestamp AND the value both differ from the last
    /// sample.
    ///
    /// Readings taken while no rain falls repeat the counter value, so this
    /// keeps only the points where the counter moved. A window where nothing
    /// moved still reports `0.0`.
    #[default]
    RequireBothChanged,

    /// Drop only exact repeats (same value AND same timestamp). A change in
    /// either field is stored.
    RejectExactRepeat,
}

impl DuplicatePolicy {
    /// Check whether `candidate` may follow `last`
    pub fn accepts(self, last: &Sample, candidate: &Sample) -> bool {
        let time_changed = candidate.timestamp != last.timestamp;
        let value_changed = candidate.value != last.value;

        match self {
            Self::RequireBothChanged => time_changed && value_changed,
            Self::RejectExactRepeat => time_changed || value_changed,
        }
    }
}

/// Placeholder compared against when the window is empty
const EMPTY_SENTINEL: Sample = Sample::new(0.0, 0);

/// Round to a fixed number of decimal places
///
/// Rounds the exact binary value of `value`, not the product
/// `value * 10^decimals`, which may already have been rounded onto a half.
/// So `2.675` (stored as `2.67499999...`) becomes `2.67`. True halves go to
/// the even neighbour: `0.125` becomes `0.12`.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    // Exact for decimals <= 22
    let factor = (0..decimals).fold(1.0f64, |f, _| f * 10.0);

    let scaled = value * factor;
    let nearest = libm::round(scaled);
    let frac = scaled - nearest;
    if libm::fabs(frac) != 0.5 {
        return nearest / factor;
    }

    // `scaled` landed on a half; the product error decides which side the
    // exact value is on.
    let err = libm::fma(value, factor, -scaled);
    let other = nearest + 2.0 * frac;
    let rounded = if err == 0.0 {
        if libm::fmod(nearest, 2.0) == 0.0 { nearest } else { other }
    } else if (err > 0.0) == (frac > 0.0) {
        other
    } else {
        nearest
    };
    rounded / factor
}

/// Reset-aware accumulated delta over consecutive counter readings
///
/// A drop in value is read as a counter restart, contributing the new
/// reading itself. Fewer than two readings yield `0.0`. The result is rounded
/// to two decimal places.
pub fn accumulated_delta<'a, I>(samples: I) -> f64
where
    I: IntoIterator<Item = &'a Sample>,
{
    let mut iter = samples.into_iter();
    let Some(first) = iter.next() else {
        return 0.0;
    };

    let mut prev = first.value;
    let mut total = 0.0;
    let mut transitions = 0usize;

    for sample in iter {
        let cur = sample.value;
        if cur >= prev {
            total += cur - prev;
        } else {
            log_debug!(
                "counter reset at t={}: {} -> {}",
                sample.timestamp,
                prev,
                cur
            );
            total += cur;
        }
        prev = cur;
        transitions += 1;
    }

    if transitions + 1 < MIN_SAMPLES_FOR_AMOUNT {
        return 0.0;
    }

    round_to(total, RAIN_AMOUNT_DECIMALS)
}

/// Time-windowed counter history with an explicit notion of "now"
///
/// This is the clock-free core of [`SensorHistory`]. Use it directly when one
/// clock drives several windows (see [`RainGauge`](crate::gauge::RainGauge)).
///
/// ## Thread Safety
///
/// No internal locking. One writer per instance; wrap it in a mutex or keep
/// it inside the task that polls the sensor.
#[derive(Debug, Clone)]
pub struct SampleWindow<S = VecDeque<Sample>> {
    max_age_seconds: i64,
    policy: DuplicatePolicy,
    samples: S,
}

impl SampleWindow<VecDeque<Sample>> {
    /// Create an empty window holding `max_age_minutes` of history
    ///
    /// The length is not validated. Zero or negative windows evict
    /// everything on the next ingestion; see [`HistoryConfig::validate`].
    pub fn new(max_age_minutes: i64) -> Self {
        Self::with_store(max_age_minutes, VecDeque::new())
    }

    /// Create an empty window from a configuration
    pub fn from_config(config: &HistoryConfig) -> Self {
        Self::new(config.max_age_minutes).with_policy(config.duplicate_policy)
    }
}

impl<S: SampleStore> SampleWindow<S> {
    /// Create a window over a caller-provided store
    ///
    /// Existing contents of `store` are kept as-is and are evicted on the
    /// next ingestion or cleanup like any other sample.
    pub fn with_store(max_age_minutes: i64, store: S) -> Self {
        Self {
            max_age_seconds: max_age_minutes.saturating_mul(SECONDS_PER_MINUTE),
            policy: DuplicatePolicy::default(),
            samples: store,
        }
    }

    /// Replace the duplicate policy
    pub fn with_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Ingest a reading, then evict samples older than `now - max_age`
    ///
    /// Returns `true` if the reading was stored. A stored reading may still
    /// be evicted right away if it is already outside the window.
    pub fn add_measurement_at(&mut self, value: f64, timestamp: Timestamp, now: Timestamp) -> bool {
        let candidate = Sample::new(value, timestamp);
        let last = self.samples.back().copied().unwrap_or(EMPTY_SENTINEL);

        let stored = self.policy.accepts(&last, &candidate);
        if stored {
            log_trace!("stored sample {} at t={}", value, timestamp);
            self.samples.push_back(candidate);
        } else {
            log_debug!(
                "dropped sample {} at t={} (last: {} at t={})",
                value,
                timestamp,
                last.value,
                last.timestamp
            );
        }

        self.cleanup_at(now);
        stored
    }

    /// Evict samples with `timestamp < now - max_age_seconds`
    ///
    /// Scans from the oldest sample and stops at the first one inside the
    /// window. Returns the number of evicted samples.
    pub fn cleanup_at(&mut self, now: Timestamp) -> usize {
        let cutoff = now.saturating_sub(self.max_age_seconds);
        let mut evicted = 0;

        while let Some(oldest) = self.samples.front() {
            if oldest.timestamp >= cutoff {
                break;
            }
            self.samples.pop_front();
            evicted += 1;
        }

        if evicted > 0 {
            log_trace!("evicted {} samples older than t={}", evicted, cutoff);
        }
        evicted
    }

    /// Snapshot of the retained samples, oldest first
    pub fn data(&self) -> Vec<Sample> {
        self.samples.iter().copied().collect()
    }

    /// Iterate retained samples, oldest first
    pub fn iter(&self) -> impl Iterator<Item = &Sample> + '_ {
        self.samples.iter()
    }

    /// Oldest and newest retained samples, `(None, None)` when empty
    pub fn oldest_and_newest(&self) -> (Option<Sample>, Option<Sample>) {
        (self.samples.front().copied(), self.samples.back().copied())
    }

    /// Drop all samples
    pub fn clear(&mut self) {
        self.samples.clear();
    }

    /// Reset-aware rain accumulated over the retained samples
    ///
    /// Reduces the samples currently held; it does not evict first, so call
    /// [`cleanup_at`](Self::cleanup_at) if time moved since the last ingestion.
    pub fn rain_amount(&self) -> f64 {
        accumulated_delta(self.samples.iter())
    }

    /// Number of retained samples
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Check if no samples are retained
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Window length in seconds
    pub fn max_age_seconds(&self) -> i64 {
        self.max_age_seconds
    }

    /// Active duplicate policy
    pub fn policy(&self) -> DuplicatePolicy {
        self.policy
    }

    /// Underlying storage
    pub fn store(&self) -> &S {
        &self.samples
    }
}

/// Time-windowed counter history that reads "now" from its own clock
///
/// ## Type Parameters
///
/// - `C`: the [`TimeSource`] consulted on every ingestion and cleanup
/// - `S`: sample storage, `VecDeque<Sample>` unless a
///   [`FixedStore`](crate::store::FixedStore) is supplied
///
/// ## Example
///
/// ```rust
/// use rainguard_core::history::SensorHistory;
/// use rainguard_core::time::FixedClock;
///
/// let now = 1_700_000_000;
/// let mut history = SensorHistory::new(2, FixedClock::new(now));
/// assert_eq!(history.oldest_and_newest(), (None, None));
///
/// history.add_measurement(12.1, now - 180); // stored, then evicted by age
/// history.add_measurement(12.1, now - 120);
/// history.add_measurement(12.4, now - 60);
/// history.add_measurement(12.7, now);
///
/// let (oldest, newest) = history.oldest_and_newest();
/// assert_eq!(oldest.map(|s| s.timestamp), Some(now - 120));
/// assert_eq!(newest.map(|s| s.value), Some(12.7));
/// ```
#[derive(Debug, Clone)]
pub struct SensorHistory<C, S = VecDeque<Sample>> {
    window: SampleWindow<S>,
    clock: C,
}

impl<C: TimeSource> SensorHistory<C> {
    /// Create an empty history holding `max_age_minutes` of samples
    ///
    /// Never fails and does not validate the window length.
    pub fn new(max_age_minutes: i64, clock: C) -> Self {
        Self {
            window: SampleWindow::new(max_age_minutes),
            clock,
        }
    }

    /// Create an empty history from a configuration
    pub fn from_config(config: &HistoryConfig, clock: C) -> Self {
        Self {
            window: SampleWindow::from_config(config),
            clock,
        }
    }
}

#[cfg(feature = "std")]
impl SensorHistory<crate::time::SystemClock> {
    /// Create a history evicting against the system wall clock
    pub fn with_system_clock(max_age_minutes: i64) -> Self {
        Self::new(max_age_minutes, crate::time::SystemClock)
    }
}

impl<C: TimeSource, S: SampleStore> SensorHistory<C, S> {
    /// Create a history over a caller-provided store
    pub fn with_store(max_age_minutes: i64, store: S, clock: C) -> Self {
        Self {
            window: SampleWindow::with_store(max_age_minutes, store),
            clock,
        }
    }

    /// Replace the duplicate policy
    pub fn with_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.window = self.window.with_policy(policy);
        self
    }

    /// Ingest a reading, then evict samples outside the window
    ///
    /// Readings must arrive in non-decreasing timestamp order; see the
    /// module docs. Returns `true` if the reading was stored.
    pub fn add_measurement(&mut self, value: f64, timestamp: Timestamp) -> bool {
        let now = self.clock.now();
        self.window.add_measurement_at(value, timestamp, now)
    }

    /// Evict samples older than `clock.now() - max_age_seconds`
    ///
    /// Runs after every ingestion; call it directly to age out samples
    /// between readings. Returns the number of evicted samples.
    pub fn cleanup(&mut self) -> usize {
        let now = self.clock.now();
        self.window.cleanup_at(now)
    }

    /// Snapshot of the retained samples, oldest first
    pub fn data(&self) -> Vec<Sample> {
        self.window.data()
    }

    /// Iterate retained samples, oldest first
    pub fn iter(&self) -> impl Iterator<Item = &Sample> + '_ {
        self.window.iter()
    }

    /// Oldest and newest retained samples, `(None, None)` when empty
    pub fn oldest_and_newest(&self) -> (Option<Sample>, Option<Sample>) {
        self.window.oldest_and_newest()
    }

    /// Drop all samples
    pub fn clear(&mut self) {
        self.window.clear();
    }

    /// Reset-aware rain accumulated over the retained samples
    pub fn rain_amount(&self) -> f64 {
        self.window.rain_amount()
    }

    /// Number of retained samples
    pub fn len(&self) -> usize {
        self.window.len()
    }

    /// Check if no samples are retained
    pub fn is_empty(&self) -> bool {
        self.window.is_empty()
    }

    /// Window length in seconds
    pub fn max_age_seconds(&self) -> i64 {
        self.window.max_age_seconds()
    }

    /// Active duplicate policy
    pub fn policy(&self) -> DuplicatePolicy {
        self.window.policy()
    }

    /// The clock-free window underneath
    pub fn window(&self) -> &SampleWindow<S> {
        &self.window
    }

    /// Clock used for eviction
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Mutable access to the clock, e.g. to advance a [`FixedClock`](crate::time::FixedClock)
    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }
}
