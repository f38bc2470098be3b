//! Backend endpoint configuration.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

fn default_base_url() -> String {
    String::from("http://localhost:5000")
}

fn default_rows_path() -> String {
    String::from("/rows")
}

fn default_update_path() -> String {
    String::from("/update_status")
}

/// Default request timeout in seconds.
const fn default_timeout_secs() -> u64 {
    10
}

fn default_user_agent() -> String {
    format!("tracknfix/{}", env!("CARGO_PKG_VERSION"))
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BackendConfig {
    /// Scheme, host and port of the backend, without a trailing path.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Path of the read endpoint returning every row.
    #[serde(default = "default_rows_path")]
    pub rows_path: String,

    /// Path of the status-update endpoint.
    #[serde(default = "default_update_path")]
    pub update_path: String,

    /// Per-request timeout.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            rows_path: default_rows_path(),
            update_path: default_update_path(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

impl BackendConfig {
    #[must_use]
    pub fn rows_url(&self) -> String {
        join_url(&self.base_url, &self.rows_path)
    }

    #[must_use]
    pub fn update_url(&self) -> String {
        join_url(&self.base_url, &self.update_path)
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |field: &str, reason: &str| ConfigError::InvalidValue {
            field: format!("backend.{field}"),
            reason: reason.to_string(),
        };

        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(invalid("base_url", "must start with http:// or https://"));
        }
        if self.rows_path.trim().is_empty() {
            return Err(invalid("rows_path", "must not be empty"));
        }
        if self.update_path.trim().is_empty() {
            return Err(invalid("update_path", "must not be empty"));
        }
        if self.timeout_secs == 0 {
            return Err(invalid("timeout_secs", "must be greater than zero"));
        }
        Ok(())
    }
}

fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_local_backend() {
        let config = BackendConfig::default();
        assert_eq!(config.rows_url(), "http://localhost:5000/rows");
        assert_eq!(config.update_url(), "http://localhost:5000/update_status");
        assert_eq!(config.timeout_secs, 10);
        assert!(config.user_agent.starts_with("tracknfix/"));
    }

    #[test]
    fn join_tolerates_slashes() {
        let config = BackendConfig {
            base_url: "https://tnf.example.com/".into(),
            rows_path: "api/rows".into(),
            ..Default::default()
        };
        assert_eq!(config.rows_url(), "https://tnf.example.com/api/rows");
    }

    #[test]
    fn rejects_non_http_base_url() {
        let config = BackendConfig {
            base_url: "ftp://example.com".into(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_zero_timeout() {
        let config = BackendConfig {
            timeout_secs: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
