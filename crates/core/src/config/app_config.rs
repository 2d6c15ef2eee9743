use crate::config::{ConfigError, ConfigSource, ConfigValidator, LogLevelValidator};
use serde::Deserialize;
use std::collections::HashMap;
use std::env;
use std::path::Path;
use std::str::FromStr;

/// Configuration trait for application configuration
pub trait AppConfigTrait: Sized {
    /// Load configuration from environment variables
    fn from_env() -> Result<Self, ConfigError>;

    /// Validate the configuration
    fn validate(&self) -> Result<(), ConfigError>;

    /// Get configuration source information for debugging
    fn config_sources(&self) -> HashMap<String, ConfigSource>;
}

/// Environment enumeration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Testing,
    Production,
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "testing" | "test" => Ok(Environment::Testing),
            "production" | "prod" => Ok(Environment::Production),
            _ => Err(ConfigError::InvalidValue {
                field: "environment".to_string(),
                value: s.to_string(),
                expected: "development, testing, or production".to_string(),
            }),
        }
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let env_str = match self {
            Environment::Development => "development",
            Environment::Testing => "testing",
            Environment::Production => "production",
        };
        write!(f, "{}", env_str)
    }
}

impl Environment {
    /// Check if environment is development
    pub fn is_development(&self) -> bool {
        matches!(self, Environment::Development)
    }

    /// Check if environment is testing
    pub fn is_testing(&self) -> bool {
        matches!(self, Environment::Testing)
    }

    /// Check if environment is production
    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }

    /// Get debug mode status based on environment
    pub fn debug_mode(&self) -> bool {
        !self.is_production()
    }
}

/// Base application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: Environment,
    pub debug: bool,
    pub log_level: String,
}

/// On-disk shape of [`AppConfig`]; every key is optional
#[derive(Debug, Default, Deserialize)]
struct AppConfigFile {
    environment: Option<String>,
    debug: Option<bool>,
    log_level: Option<String>,
}

impl AppConfig {
    /// Create a new default configuration
    pub fn new() -> Self {
        Self {
            environment: Environment::Development,
            debug: true,
            log_level: "info".to_string(),
        }
    }

    /// Create configuration for development
    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            debug: true,
            log_level: "debug".to_string(),
        }
    }

    /// Create configuration for testing
    pub fn testing() -> Self {
        Self {
            environment: Environment::Testing,
            debug: true,
            log_level: "warn".to_string(),
        }
    }

    /// Create configuration for production
    pub fn production() -> Self {
        Self {
            environment: Environment::Production,
            debug: false,
            log_level: "info".to_string(),
        }
    }

    /// Load configuration from a YAML file. Missing keys keep their defaults.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_yaml_str(&content)?;
        tracing::debug!(
            "Loaded application config from {} ({})",
            path.as_ref().display(),
            config.environment
        );
        Ok(config)
    }

    /// Load configuration from YAML text
    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        let file: AppConfigFile = serde_yaml::from_str(content)?;
        let mut config = Self::new();

        if let Some(environment) = file.environment {
            config.environment = environment.parse()?;
        }
        config.debug = file.debug.unwrap_or(config.environment.debug_mode());
        if let Some(log_level) = file.log_level {
            config.log_level = log_level;
        }

        config.validate()?;
        Ok(config)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AppConfigTrait for AppConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::new();

        if let Ok(env_str) = env::var("IOTA_ENV") {
            config.environment = env_str.parse()?;
        }

        // Debug mode defaults based on environment if not set
        if let Ok(debug_str) = env::var("IOTA_DEBUG") {
            config.debug = debug_str
                .parse()
                .unwrap_or(config.environment.debug_mode());
        } else {
            config.debug = config.environment.debug_mode();
        }

        if let Ok(log_level) = env::var("IOTA_LOG_LEVEL") {
            config.log_level = log_level;
        }

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        LogLevelValidator.validate(&self.log_level)?;

        if self.environment.is_production() && self.debug {
            return Err(ConfigError::InvalidValue {
                field: "debug".to_string(),
                value: "true".to_string(),
                expected: "false in production environment".to_string(),
            });
        }

        Ok(())
    }

    fn config_sources(&self) -> HashMap<String, ConfigSource> {
        let mut sources = HashMap::new();

        sources.insert(
            "environment".to_string(),
            ConfigSource::env_or_default("IOTA_ENV", "development"),
        );
        sources.insert(
            "debug".to_string(),
            ConfigSource::env_or_default("IOTA_DEBUG", "based on environment"),
        );
        sources.insert(
            "log_level".to_string(),
            ConfigSource::env_or_default("IOTA_LOG_LEVEL", "info"),
        );

        sources
    }
}
