//! Constants for RainGuard Core
//!
//! Centralized numeric values used throughout the crate. Constants are grouped
//! by domain:
//! - **Time**: unit conversions
//! - **Windows**: default window lengths, rounding precision and storage sizes
//!
//! Always use these constants instead of magic numbers, and include units in
//! new names.

/// Time unit conversions.
pub mod time;

/// Window lengths, rounding precision and storage sizing.
pub mod windows;

// Re-export commonly used constants for convenience
pub use time::{SECONDS_PER_MINUTE, SECONDS_PER_HOUR, MINUTES_PER_HOUR, MINUTES_PER_DAY};

pub use windows::{
    DEFAULT_MAX_AGE_MINUTES, HOURLY_WINDOW_MINUTES, DAILY_WINDOW_MINUTES,
    RAIN_AMOUNT_DECIMALS, MIN_SAMPLES_FOR_AMOUNT, DAILY_FIXED_CAPACITY,
};
