//! Window configuration
//!
//! Plain data describing how a history is built. Hosts usually embed these in
//! their own configuration files (they derive serde traits with the `serde`
//! feature) and hand them to [`SensorHistory::from_config`] or
//! [`RainGauge::from_config`].
//!
//! Constructors never validate. Call `validate()` first when the values come
//! from user input.
//!
//! [`SensorHistory::from_config`]: crate::history::SensorHistory::from_config
//! [`RainGauge::from_config`]: crate::gauge::RainGauge::from_config

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::constants::{
    DAILY_WINDOW_MINUTES, DEFAULT_MAX_AGE_MINUTES, HOURLY_WINDOW_MINUTES, SECONDS_PER_MINUTE,
};
use crate::errors::{ConfigError, ConfigResult};
use crate::history::DuplicatePolicy;

/// Configuration for a single history window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HistoryConfig {
    /// Window length in minutes
    pub max_age_minutes: i64,
    /// Rule for dropping repeated readings
    pub duplicate_policy: DuplicatePolicy,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_age_minutes: DEFAULT_MAX_AGE_MINUTES,
            duplicate_policy: DuplicatePolicy::default(),
        }
    }
}

impl HistoryConfig {
    /// Set the window length
    pub fn with_max_age_minutes(mut self, minutes: i64) -> Self {
        self.max_age_minutes = minutes;
        self
    }

    /// Set the duplicate policy
    pub fn with_duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicate_policy = policy;
        self
    }

    /// Check that the window is positive and representable in seconds
    pub fn validate(&self) -> ConfigResult<()> {
        check_window("history", self.max_age_minutes)
    }
}

/// Configuration for the hourly and daily windows of a [`RainGauge`](crate::gauge::RainGauge)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GaugeConfig {
    /// Short window length in minutes
    pub hourly_minutes: i64,
    /// Long window length in minutes
    pub daily_minutes: i64,
    /// Rule for dropping repeated readings, shared by both windows
    pub duplicate_policy: DuplicatePolicy,
}

impl Default for GaugeConfig {
    fn default() -> Self {
        Self {
            hourly_minutes: HOURLY_WINDOW_MINUTES,
            daily_minutes: DAILY_WINDOW_MINUTES,
            duplicate_policy: DuplicatePolicy::default(),
        }
    }
}

impl GaugeConfig {
    /// Set the short window length
    pub fn with_hourly_minutes(mut self, minutes: i64) -> Self {
        self.hourly_minutes = minutes;
        self
    }

    /// Set the long window length
    pub fn with_daily_minutes(mut self, minutes: i64) -> Self {
        self.daily_minutes = minutes;
        self
    }

    /// Set the duplicate policy
    pub fn with_duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicate_policy = policy;
        self
    }

    /// Check both windows, and that the daily one is at least as long
    pub fn validate(&self) -> ConfigResult<()> {
        check_window("hourly", self.hourly_minutes)?;
        check_window("daily", self.daily_minutes)?;

        if self.daily_minutes < self.hourly_minutes {
            return Err(ConfigError::WindowOrder {
                hourly: self.hourly_minutes,
                daily: self.daily_minutes,
            });
        }
        Ok(())
    }

    /// Configuration of the short window
    pub fn hourly(&self) -> HistoryConfig {
        HistoryConfig {
            max_age_minutes: self.hourly_minutes,
            duplicate_policy: self.duplicate_policy,
        }
    }

    /// Configuration of the long window
    pub fn daily(&self) -> HistoryConfig {
        HistoryConfig {
            max_age_minutes: self.daily_minutes,
            duplicate_policy: self.duplicate_policy,
        }
    }
}

fn check_window(window: &'static str, minutes: i64) -> ConfigResult<()> {
    if minutes <= 0 {
        return Err(ConfigError::NonPositiveWindow { window, minutes });
    }
    if minutes.checked_mul(SECONDS_PER_MINUTE).is_none() {
        return Err(ConfigError::WindowOverflow { window, minutes });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let history = HistoryConfig::default();
        assert_eq!(history.max_age_minutes, 60);
        assert!(history.validate().is_ok());

        let gauge = GaugeConfig::default();
        assert_eq!((gauge.hourly_minutes, gauge.daily_minutes), (60, 1440));
        assert!(gauge.validate().is_ok());
    }

    #[test]
    fn rejects_non_positive_window() {
        let err = HistoryConfig::default().with_max_age_minutes(0).validate();
        assert_eq!(
            err,
            Err(ConfigError::NonPositiveWindow { window: "history", minutes: 0 })
        );

        let err = GaugeConfig::default().with_hourly_minutes(-10).validate();
        assert!(matches!(err, Err(ConfigError::NonPositiveWindow { window: "hourly", .. })));
    }

    #[test]
    fn rejects_overflowing_window() {
        let err = HistoryConfig::default().with_max_age_minutes(i64::MAX).validate();
        assert!(matches!(err, Err(ConfigError::WindowOverflow { .. })));
    }

    #[test]
    fn rejects_daily_shorter_than_hourly() {
        let err = GaugeConfig::default()
            .with_hourly_minutes(120)
            .with_daily_minutes(60)
            .validate();
        assert_eq!(err, Err(ConfigError::WindowOrder { hourly: 120, daily: 60 }));
    }

    #[test]
    fn gauge_splits_into_window_configs() {
        let gauge = GaugeConfig::default()
            .with_daily_minutes(720)
            .with_duplicate_policy(DuplicatePolicy::RejectExactRepeat);

        assert_eq!(gauge.hourly().max_age_minutes, 60);
        assert_eq!(gauge.daily().max_age_minutes, 720);
        assert_eq!(gauge.daily().duplicate_policy, DuplicatePolicy::RejectExactRepeat);
    }
}
