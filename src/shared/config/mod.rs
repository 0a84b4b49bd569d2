//! Archival configuration module
//!
//! Provides the schedule settings for archival and orphan reclaiming.

use chrono::NaiveTime;
use std::time::Duration;
use thiserror::Error;

/// Default archival trigger: 15:00 UTC, which is midnight in UTC+9
pub const DEFAULT_ARCHIVE_HOUR_UTC: u32 = 15;
pub const DEFAULT_ARCHIVE_MINUTE_UTC: u32 = 0;
pub const DEFAULT_RECLAIM_INTERVAL: Duration = Duration::from_secs(3600);

/// Archival schedule configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveConfig {
    /// Wall-clock time (UTC) the daily archival fires at
    pub fire_at_utc: NaiveTime,
    /// How often the orphan reclaimer sweeps the registry
    pub reclaim_interval: Duration,
}

impl ArchiveConfig {
    /// Create a new ArchiveConfigBuilder
    pub fn builder() -> ArchiveConfigBuilder {
        ArchiveConfigBuilder::default()
    }
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            fire_at_utc: NaiveTime::from_hms_opt(DEFAULT_ARCHIVE_HOUR_UTC, DEFAULT_ARCHIVE_MINUTE_UTC, 0)
                .unwrap_or(NaiveTime::MIN),
            reclaim_interval: DEFAULT_RECLAIM_INTERVAL,
        }
    }
}

/// Builder for ArchiveConfig
#[derive(Debug, Default)]
pub struct ArchiveConfigBuilder {
    hour: Option<u32>,
    minute: Option<u32>,
    reclaim_interval: Option<Duration>,
}

impl ArchiveConfigBuilder {
    /// Set the UTC hour the archival fires at
    pub fn archive_hour_utc(mut self, hour: u32) -> Self {
        self.hour = Some(hour);
        self
    }

    /// Set the UTC minute the archival fires at
    pub fn archive_minute_utc(mut self, minute: u32) -> Self {
        self.minute = Some(minute);
        self
    }

    /// Set the orphan sweep interval
    pub fn reclaim_interval(mut self, interval: Duration) -> Self {
        self.reclaim_interval = Some(interval);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<ArchiveConfig, ConfigError> {
        let hour = self.hour.unwrap_or(DEFAULT_ARCHIVE_HOUR_UTC);
        let minute = self.minute.unwrap_or(DEFAULT_ARCHIVE_MINUTE_UTC);
        let fire_at_utc = NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(|| {
            ConfigError::OutOfRange {
                field: "archive time",
                value: format!("{hour:02}:{minute:02}"),
            }
        })?;

        let reclaim_interval = self.reclaim_interval.unwrap_or(DEFAULT_RECLAIM_INTERVAL);
        if reclaim_interval.is_zero() {
            return Err(ConfigError::OutOfRange {
                field: "reclaim interval",
                value: "0s".to_string(),
            });
        }

        Ok(ArchiveConfig {
            fire_at_utc,
            reclaim_interval,
        })
    }
}

/// Configuration errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {var}: {value:?}")]
    InvalidValue { var: &'static str, value: String },
    #[error("{field} out of range: {value}")]
    OutOfRange { field: &'static str, value: String },
}
