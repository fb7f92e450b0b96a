//! Time management for rain history windows
//!
//! Eviction needs "now". Rather than reading the system clock directly, every
//! history is generic over a [`TimeSource`] so hosts can plug in:
//! - System clock (when available)
//! - A clock pushed in by the host (e.g. the timestamp of the last poll)
//! - A fixed, manually advanced clock for deterministic tests
//!
//! All timestamps are whole seconds. Sensor reports carry second resolution,
//! so finer clocks are truncated.

/// Timestamp in seconds since the Unix epoch
///
/// Signed so that `now - window` never wraps for small `now` values.
pub type Timestamp = i64;

/// Source of "now" for window eviction
///
/// ## Implementation Requirements
///
/// - `now()` must be cheap; it runs on every ingestion
/// - Wall-clock sources may jump (NTP). Histories tolerate that: a backwards
///   jump retains more samples, a forward jump evicts more
pub trait TimeSource {
    /// Current time in seconds since the Unix epoch
    fn now(&self) -> Timestamp;
}

impl<T: TimeSource + ?Sized> TimeSource for &mut T {
    fn now(&self) -> Timestamp {
        (**self).now()
    }
}

impl<T: TimeSource + ?Sized> TimeSource for alloc::boxed::Box<T> {
    fn now(&self) -> Timestamp {
        (**self).now()
    }
}

/// System time source (requires std)
#[cfg(feature = "std")]
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

#[cfg(feature = "std")]
impl TimeSource for SystemClock {
    fn now(&self) -> Timestamp {
        use std::time::{SystemTime, UNIX_EPOCH};

        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs() as Timestamp)
            .unwrap_or_default()
    }
}

/// Manually driven time source
///
/// Used in tests, and on targets without an RTC where the host sets the time
/// from each sensor report before feeding the history.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FixedClock {
    timestamp: Timestamp,
}

impl FixedClock {
    /// Create a clock frozen at `timestamp`
    pub const fn new(timestamp: Timestamp) -> Self {
        Self { timestamp }
    }

    /// Jump to an absolute time
    pub fn set(&mut self, timestamp: Timestamp) {
        self.timestamp = timestamp;
    }

    /// Move forward by `secs` seconds
    pub fn advance(&mut self, secs: i64) {
        self.timestamp = self.timestamp.saturating_add(secs);
    }
}

impl TimeSource for FixedClock {
    fn now(&self) -> Timestamp {
        self.timestamp
    }
}
