//! Configuration loading and representation.

use std::net::SocketAddr;

use chrono::{FixedOffset, Offset, Utc};
use thiserror::Error;

pub const BIND_ADDR_VAR: &str = "STOCKPULSE_BIND_ADDR";
pub const UTC_OFFSET_VAR: &str = "STOCKPULSE_UTC_OFFSET_MINUTES";
pub const SEED_DEMO_VAR: &str = "STOCKPULSE_SEED_DEMO";

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Largest accepted offset magnitude, one minute short of a day.
pub const MAX_OFFSET_MINUTES: i32 = 23 * 60 + 59;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{var}: invalid socket address '{value}'")]
    InvalidBindAddr { var: &'static str, value: String },

    #[error("{var}: expected whole minutes within ±1439, got '{value}'")]
    InvalidUtcOffset { var: &'static str, value: String },

    #[error("{var}: expected a boolean, got '{value}'")]
    InvalidBool { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    /// Reporting time zone for hour buckets, calendar days and report ranges.
    pub utc_offset: FixedOffset,
    /// Populate the in-memory store with demo data at startup.
    pub seed_demo: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            utc_offset: Utc.fix(),
            seed_demo: false,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build from an arbitrary variable source; unset or blank variables
    /// take their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |var: &str| lookup(var).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let defaults = Self::default();

        let bind_addr = match get(BIND_ADDR_VAR) {
            Some(value) => value.parse::<SocketAddr>().map_err(|_| ConfigError::InvalidBindAddr {
                var: BIND_ADDR_VAR,
                value,
            })?,
            None => defaults.bind_addr,
        };

        let utc_offset = match get(UTC_OFFSET_VAR) {
            Some(value) => parse_offset(&value).ok_or(ConfigError::InvalidUtcOffset {
                var: UTC_OFFSET_VAR,
                value,
            })?,
            None => defaults.utc_offset,
        };

        let seed_demo = match get(SEED_DEMO_VAR) {
            Some(value) => parse_bool(&value).ok_or(ConfigError::InvalidBool {
                var: SEED_DEMO_VAR,
                value,
            })?,
            None => defaults.seed_demo,
        };

        Ok(Self {
            bind_addr,
            utc_offset,
            seed_demo,
        })
    }
}

fn parse_offset(value: &str) -> Option<FixedOffset> {
    let minutes: i32 = value.parse().ok()?;
    if minutes.abs() > MAX_OFFSET_MINUTES {
        return None;
    }
    FixedOffset::east_opt(minutes * 60)
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
