//! Service configuration.
//!
//! Loaded from JSON with serde defaults, then overridden from `TESTLOG_*`
//! environment variables.

use std::env;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default upper bound on a decoded report document - 10MB.
pub const DEFAULT_MAX_REPORT_BYTES: usize = 10_000_000;

pub const ENV_MAX_REPORT_BYTES: &str = "TESTLOG_MAX_REPORT_BYTES";
pub const ENV_SCAN_REPORT_CONTENT: &str = "TESTLOG_SCAN_REPORT_CONTENT";
pub const ENV_ENABLE_USER_AUTH: &str = "TESTLOG_ENABLE_USER_AUTH";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid value for {name}: {value:?}")]
    InvalidEnv { name: &'static str, value: String },

    #[error("invalid configuration: {0}")]
    Validation(String),
}

/// Runtime settings for [`crate::pipeline::TestLogService`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Largest decoded report document accepted, in bytes.
    pub max_report_bytes: usize,

    /// Scan decoded report text for injection patterns and log detections.
    pub scan_report_content: bool,

    /// Whether the host authenticates users. Reported in startup logs only;
    /// the access gate never relaxes when this is off.
    pub enable_user_auth: bool,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            max_report_bytes: DEFAULT_MAX_REPORT_BYTES,
            scan_report_content: true,
            enable_user_auth: false,
        }
    }
}

impl ServiceConfig {
    /// Parse configuration from a JSON document. Missing fields take defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is invalid or a value fails validation.
    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults overridden by the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if a `TESTLOG_*` variable holds an unparsable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().with_overrides(|name| env::var(name).ok())
    }

    /// Apply overrides from a variable lookup.
    ///
    /// # Errors
    ///
    /// Returns an error if a looked-up value cannot be parsed.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        if let Some(value) = lookup(ENV_MAX_REPORT_BYTES) {
            self.max_report_bytes = value.trim().parse().map_err(|_| ConfigError::InvalidEnv {
                name: ENV_MAX_REPORT_BYTES,
                value: value.clone(),
            })?;
        }
        if let Some(value) = lookup(ENV_SCAN_REPORT_CONTENT) {
            self.scan_report_content = parse_flag(ENV_SCAN_REPORT_CONTENT, &value)?;
        }
        if let Some(value) = lookup(ENV_ENABLE_USER_AUTH) {
            self.enable_user_auth = parse_flag(ENV_ENABLE_USER_AUTH, &value)?;
        }
        self.validate()?;
        Ok(self)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.max_report_bytes == 0 {
            return Err(ConfigError::Validation(
                "max_report_bytes must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

fn parse_flag(name: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidEnv {
            name,
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServiceConfig::default();
        assert_eq!(config.max_report_bytes, DEFAULT_MAX_REPORT_BYTES);
        assert!(config.scan_report_content);
        assert!(!config.enable_user_auth);
    }

    #[test]
    fn test_from_json_partial() {
        let config = ServiceConfig::from_json(r#"{"max_report_bytes": 2048}"#).unwrap();
        assert_eq!(config.max_report_bytes, 2048);
        assert!(config.scan_report_content);
    }

    #[test]
    fn test_from_json_rejects_zero_limit() {
        let err = ServiceConfig::from_json(r#"{"max_report_bytes": 0}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        let err = ServiceConfig::from_json("not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_env_overrides() {
        let config = ServiceConfig::default()
            .with_overrides(|name| match name {
                ENV_MAX_REPORT_BYTES => Some("4096".to_string()),
                ENV_SCAN_REPORT_CONTENT => Some("off".to_string()),
                ENV_ENABLE_USER_AUTH => Some("TRUE".to_string()),
                _ => None,
            })
            .unwrap();
        assert_eq!(config.max_report_bytes, 4096);
        assert!(!config.scan_report_content);
        assert!(config.enable_user_auth);
    }

    #[test]
    fn test_env_override_invalid() {
        let err = ServiceConfig::default()
            .with_overrides(|name| (name == ENV_SCAN_REPORT_CONTENT).then(|| "maybe".to_string()))
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidEnv {
                name: ENV_SCAN_REPORT_CONTENT,
                ..
            }
        ));
    }
}
