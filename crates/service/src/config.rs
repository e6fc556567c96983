//! Service configuration

use anyhow::Result;
use serde::Deserialize;

/// Service configuration, read from `ESTIMATOR_*` environment variables
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    /// Port for the API, health and metrics endpoints
    #[serde(default = "default_api_port")]
    pub api_port: u16,

    /// Cluster name attached to log events
    #[serde(default = "default_cluster_name")]
    pub cluster_name: String,

    /// Industry used when a request does not name one
    #[serde(default = "default_industry")]
    pub default_industry: String,
}

fn default_api_port() -> u16 {
    8080
}

fn default_cluster_name() -> String {
    "unknown".to_string()
}

fn default_industry() -> String {
    "generic".to_string()
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            api_port: default_api_port(),
            cluster_name: default_cluster_name(),
            default_industry: default_industry(),
        }
    }
}

impl ServiceConfig {
    /// Load configuration from the environment
    pub fn load() -> Result<Self> {
        let config = config::Config::builder()
            .add_source(config::Environment::with_prefix("ESTIMATOR"))
            .build()?;

        Ok(config.try_deserialize().unwrap_or_else(|err| {
            tracing::warn!(error = %err, "Invalid service configuration, using defaults");
            ServiceConfig::default()
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServiceConfig::default();
        assert_eq!(config.api_port, 8080);
        assert_eq!(config.cluster_name, "unknown");
        assert_eq!(config.default_industry, "generic");
    }

    #[test]
    fn test_missing_fields_fall_back_to_defaults() {
        let config: ServiceConfig =
            serde_json::from_str(r#"{"cluster_name": "prod-aks"}"#).unwrap();
        assert_eq!(config.cluster_name, "prod-aks");
        assert_eq!(config.api_port, 8080);
    }
}
