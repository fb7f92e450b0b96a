//! Window and Reduction Constants
//!
//! Defaults for rain accumulation windows and the precision of reported
//! amounts.

use super::time::{MINUTES_PER_DAY, MINUTES_PER_HOUR};

// ===== WINDOW LENGTHS =====

/// Default history window (minutes).
///
/// One hour is the shortest period weather services report rainfall for.
pub const DEFAULT_MAX_AGE_MINUTES: i64 = MINUTES_PER_HOUR;

/// Hourly rain window (minutes).
pub const HOURLY_WINDOW_MINUTES: i64 = MINUTES_PER_HOUR;

/// Daily rain window (minutes).
///
/// A rolling 24 hours, not a calendar day.
pub const DAILY_WINDOW_MINUTES: i64 = MINUTES_PER_DAY;

// ===== REDUCTION =====

/// Decimal places kept in reported rain amounts.
///
/// Tipping-bucket gauges resolve roughly 0.1 - 0.3 mm per tip, so two places
/// are already below sensor resolution.
pub const RAIN_AMOUNT_DECIMALS: u32 = 2;

/// Minimum number of samples needed to form one counter transition.
pub const MIN_SAMPLES_FOR_AMOUNT: usize = 2;

// ===== STORAGE =====

/// Suggested capacity for [`FixedStore`](crate::store::FixedStore) on a
/// daily window.
///
/// 24 hours at one report per minute, rounded up to a power of two.
pub const DAILY_FIXED_CAPACITY: usize = 2048;
