use std::fmt;

/// Where a configuration value came from, reported by
/// [`AppConfigTrait::config_sources`](crate::AppConfigTrait::config_sources)
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigSource {
    /// Read from the named environment variable
    EnvVar(String),
    /// Built-in default, described for humans
    Default(String),
}

impl ConfigSource {
    /// `EnvVar(var)` when `var` is set in the process environment, otherwise
    /// `Default(default)`
    pub fn env_or_default(var: &str, default: impl Into<String>) -> Self {
        match std::env::var_os(var) {
            Some(_) => ConfigSource::EnvVar(var.to_string()),
            None => ConfigSource::Default(default.into()),
        }
    }

    pub fn is_env_var(&self) -> bool {
        matches!(self, ConfigSource::EnvVar(_))
    }

    pub fn is_default(&self) -> bool {
        matches!(self, ConfigSource::Default(_))
    }
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigSource::EnvVar(var) => write!(f, "environment variable {}", var),
            ConfigSource::Default(value) => write!(f, "default ({})", value),
        }
    }
}
