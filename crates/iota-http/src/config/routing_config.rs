//! Routing configuration
//!
//! Integrates with the iota-core configuration system.

use super::defaults::RoutingDefaults;
use iota_core::config::PathPrefixValidator;
use iota_core::{AppConfigTrait, ConfigError, ConfigSource, ConfigValidator};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::path::PathBuf;

/// Routing specific configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutingConfig {
    /// Path prefix the application is mounted under (`""` or e.g. `/app`)
    pub base_url: String,
    /// Route file read by [`Router::from_config`](crate::routing::Router::from_config)
    pub routes_file: Option<PathBuf>,
    /// Force the scheme of absolute URLs (`Some(true)` for https)
    pub default_https: Option<bool>,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            base_url: RoutingDefaults::BASE_URL.to_string(),
            routes_file: None,
            default_https: RoutingDefaults::FORCE_HTTPS,
        }
    }
}

impl RoutingConfig {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_routes_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.routes_file = Some(path.into());
        self
    }

    pub fn with_default_https(mut self, https: bool) -> Self {
        self.default_https = Some(https);
        self
    }
}

impl AppConfigTrait for RoutingConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let base_url =
            env::var("IOTA_BASE_URL").unwrap_or_else(|_| RoutingDefaults::BASE_URL.to_string());

        let routes_file = env::var("IOTA_ROUTES_FILE").ok().map(PathBuf::from);

        let default_https = match env::var("IOTA_FORCE_HTTPS") {
            Ok(value) => Some(value.parse::<bool>().map_err(|_| ConfigError::InvalidValue {
                field: "default_https".to_string(),
                value,
                expected: "true or false".to_string(),
            })?),
            Err(_) => RoutingDefaults::FORCE_HTTPS,
        };

        let config = RoutingConfig {
            base_url,
            routes_file,
            default_https,
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        PathPrefixValidator { field: "base_url" }.validate(&self.base_url)?;

        if let Some(path) = &self.routes_file {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::validation_failed(
                    "Routes file path must not be empty",
                ));
            }
        }

        Ok(())
    }

    fn config_sources(&self) -> HashMap<String, ConfigSource> {
        let mut sources = HashMap::new();
        sources.insert(
            "base_url".to_string(),
            ConfigSource::env_or_default("IOTA_BASE_URL", RoutingDefaults::BASE_URL),
        );
        sources.insert(
            "routes_file".to_string(),
            ConfigSource::env_or_default("IOTA_ROUTES_FILE", "none"),
        );
        sources.insert(
            "default_https".to_string(),
            ConfigSource::env_or_default("IOTA_FORCE_HTTPS", "follow request"),
        );
        sources
    }
}
