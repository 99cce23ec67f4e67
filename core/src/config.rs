use crate::prelude::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Immutable settings shared by the series buffers, loops and HTTP client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Prefix every endpoint path is appended to.
    pub base_url: String,
    /// Samples kept per category.
    pub window_len: usize,
    /// Spacing used when stamping buffered samples for the chart.
    pub sample_interval_ms: u64,
    /// Look-back window the backend counts over before division to a rate.
    pub interpolation_secs: u64,
    pub graph_interval_ms: u64,
    pub table_interval_ms: u64,
    pub request_timeout_ms: u64,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:9000".into(),
            window_len: 300,
            sample_interval_ms: 1000,
            interpolation_secs: 10,
            graph_interval_ms: 1000,
            table_interval_ms: 5000,
            request_timeout_ms: 1000,
        }
    }
}

impl DashboardConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref).map_err(|source| ConfigError::Read {
            path: path_ref.display().to_string(),
            source,
        })?;
        let config: DashboardConfig =
            serde_yaml::from_str(&contents).map_err(|source| ConfigError::Parse {
                path: path_ref.display().to_string(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_url.trim().is_empty() {
            return Err(ConfigError::Invalid("base_url must not be empty".into()));
        }
        let nonzero = [
            ("window_len", self.window_len as u64),
            ("sample_interval_ms", self.sample_interval_ms),
            ("interpolation_secs", self.interpolation_secs),
            ("graph_interval_ms", self.graph_interval_ms),
            ("table_interval_ms", self.table_interval_ms),
            ("request_timeout_ms", self.request_timeout_ms),
        ];
        for (name, value) in nonzero {
            if value == 0 {
                return Err(ConfigError::Invalid(format!("{name} must be greater than zero")));
            }
        }
        Ok(())
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Joins `path` onto the base URL, trimming any trailing slash first.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }

    pub fn graph_interval(&self) -> Duration {
        Duration::from_millis(self.graph_interval_ms)
    }

    pub fn table_interval(&self) -> Duration {
        Duration::from_millis(self.table_interval_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}
