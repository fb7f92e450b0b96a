//! Error Types for Window Configuration
//!
//! ## Design Philosophy
//!
//! The history itself never fails: ingestion, eviction and reduction accept
//! whatever the caller supplies. Errors exist only for the optional
//! caller-side checks on configuration, run before a history is built.
//!
//! Like the rest of the crate the error type is small and `Copy`, with no heap
//! data, so it can be returned from `no_std` code without an allocator.
//!
//! ```rust
//! use rainguard_core::{ConfigError, HistoryConfig};
//!
//! let config = HistoryConfig::default().with_max_age_minutes(0);
//! match config.validate() {
//!     Ok(()) => {}
//!     Err(ConfigError::NonPositiveWindow { minutes, .. }) => {
//!         assert_eq!(minutes, 0);
//!     }
//!     Err(other) => panic!("unexpected: {other}"),
//! }
//! ```

use thiserror_no_std::Error;

/// Result type for configuration checks
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Configuration errors - kept small for embedded use
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// Window length is zero or negative, so every sample would be evicted
    #[error("{window} window must be positive, got {minutes} minutes")]
    NonPositiveWindow {
        /// Which window was rejected
        window: &'static str,
        /// The configured length
        minutes: i64,
    },

    /// Window length does not fit in seconds
    #[error("{window} window of {minutes} minutes overflows seconds")]
    WindowOverflow {
        /// Which window was rejected
        window: &'static str,
        /// The configured length
        minutes: i64,
    },

    /// Daily window shorter than the hourly one
    #[error("daily window ({daily} min) is shorter than hourly window ({hourly} min)")]
    WindowOrder {
        /// Configured hourly window length
        hourly: i64,
        /// Configured daily window length
        daily: i64,
    },
}

#[cfg(feature = "defmt")]
impl defmt::Format for ConfigError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::NonPositiveWindow { window, minutes } =>
                defmt::write!(fmt, "{} window must be positive, got {}", window, minutes),
            Self::WindowOverflow { window, minutes } =>
                defmt::write!(fmt, "{} window of {} min overflows", window, minutes),
            Self::WindowOrder { hourly, daily } =>
                defmt::write!(fmt, "daily {} < hourly {}", daily, hourly),
        }
    }
}
