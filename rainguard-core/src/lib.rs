//! Sliding-window rain accumulation for RainGuard
//!
//! Turns the absolute tip counter of a rain gauge into "rain over the last N
//! minutes", even when the counter overflows or the station resets it.
//! Designed for edge devices with limited resources.
//!
//! Key constraints:
//! - `no_std` + `alloc`, with a heap-free fixed-capacity store
//! - Infallible ingestion: no `Result` on the hot path
//! - Injectable clock for deterministic tests
//!
//! ```no_run
//! use rainguard_core::{SensorHistory, SystemClock};
//!
//! let mut history = SensorHistory::new(60, SystemClock);
//!
//! // Counter readings as reported by the station
//! history.add_measurement(125.4, 1_700_000_000);
//! history.add_measurement(126.0, 1_700_000_060);
//!
//! println!("last hour: {} mm", history.rain_amount());
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

extern crate alloc;

#[macro_use]
mod macros;

pub mod config;
pub mod constants;
pub mod errors;
pub mod gauge;
pub mod history;
pub mod store;
pub mod time;

// Public API
pub use config::{GaugeConfig, HistoryConfig};
pub use errors::{ConfigError, ConfigResult};
pub use gauge::RainGauge;
pub use history::{DuplicatePolicy, Sample, SampleWindow, SensorHistory};
pub use store::{FixedStore, SampleStore};
pub use time::{FixedClock, TimeSource, Timestamp};

#[cfg(feature = "std")]
pub use time::SystemClock;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_exists() {
        assert!(!VERSION.is_empty());
    }
}
