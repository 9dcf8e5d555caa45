//! Configuration for the branding client
//!
//! Values come from the environment with defaults for local development:
//!
//! | Variable | Default | Meaning |
//! |---|---|---|
//! | `BRANDKIT_API_URL` | `http://localhost:8000/api` | API base URL |
//! | `BRANDKIT_DATA_DIR` | `./.brandkit` | Directory for persisted session files |
//! | `BRANDKIT_TRACKING` | `per-request` | In-flight tracking policy (`shared` or `per-request`) |
//! | `BRANDKIT_POLL_INTERVAL_MS` | `2000` | Delay between status polls of a pending generation |
//!
//! # Example
//!
//! ```no_run
//! use branding::config::BrandingConfig;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = BrandingConfig::from_env()?;
//! println!("API: {}", config.api.base_url);
//! # Ok(())
//! # }
//! ```

use crate::reducer::DEFAULT_POLL_INTERVAL;
use crate::state::TrackingPolicy;
use brandkit_api::{ApiConfig, BASE_URL_ENV};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Environment variable for the data directory
pub const DATA_DIR_ENV: &str = "BRANDKIT_DATA_DIR";

/// Environment variable for the tracking policy
pub const TRACKING_ENV: &str = "BRANDKIT_TRACKING";

/// Environment variable for the status poll interval, in milliseconds
pub const POLL_INTERVAL_ENV: &str = "BRANDKIT_POLL_INTERVAL_MS";

/// Data directory used when none is configured
pub const DEFAULT_DATA_DIR: &str = ".brandkit";

/// Configuration error
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable holds a value that cannot be used
    #[error("invalid value for {var}: {value:?} ({reason})")]
    InvalidValue {
        /// Variable name
        var: &'static str,
        /// Offending value
        value: String,
        /// What was expected
        reason: String,
    },
}

/// Branding client configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrandingConfig {
    /// API client configuration
    pub api: ApiConfig,
    /// Directory for persisted session files
    pub data_dir: PathBuf,
    /// In-flight tracking policy
    pub tracking: TrackingPolicy,
    /// Delay between status polls of a pending generation
    pub poll_interval: Duration,
}

impl Default for BrandingConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            tracking: TrackingPolicy::default(),
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

impl BrandingConfig {
    /// Load configuration from the process environment
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if a variable is set to an
    /// unusable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    ///
    /// Blank values are treated as unset.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if a variable is set to an
    /// unusable value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |var: &str| lookup(var).filter(|value| !value.trim().is_empty());
        let mut config = Self::default();

        if let Some(url) = get(BASE_URL_ENV) {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ConfigError::InvalidValue {
                    var: BASE_URL_ENV,
                    value: url,
                    reason: "expected an http(s) URL".to_string(),
                });
            }
            config.api = ApiConfig::new(url);
        }

        if let Some(dir) = get(DATA_DIR_ENV) {
            config.data_dir = PathBuf::from(dir);
        }

        if let Some(policy) = get(TRACKING_ENV) {
            config.tracking = policy.parse().map_err(|reason| ConfigError::InvalidValue {
                var: TRACKING_ENV,
                value: policy.clone(),
                reason,
            })?;
        }

        if let Some(millis) = get(POLL_INTERVAL_ENV) {
            config.poll_interval = match millis.trim().parse::<u64>() {
                Ok(millis) if millis > 0 => Duration::from_millis(millis),
                _ => {
                    return Err(ConfigError::InvalidValue {
                        var: POLL_INTERVAL_ENV,
                        value: millis,
                        reason: "expected a positive number of milliseconds".to_string(),
                    });
                },
            };
        }

        Ok(config)
    }
}
