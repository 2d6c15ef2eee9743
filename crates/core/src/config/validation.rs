use thiserror::Error;

/// Configuration error type
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required field: {field}. {hint}")]
    MissingRequired { field: String, hint: String },

    #[error("Invalid value for field '{field}': '{value}'. Expected: {expected}")]
    InvalidValue {
        field: String,
        value: String,
        expected: String,
    },

    #[error("Configuration validation failed: {message}")]
    ValidationFailed { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl ConfigError {
    /// Create a missing required field error
    pub fn missing_required(field: impl Into<String>, hint: impl Into<String>) -> Self {
        Self::MissingRequired {
            field: field.into(),
            hint: hint.into(),
        }
    }

    /// Create an invalid value error
    pub fn invalid_value(
        field: impl Into<String>,
        value: impl Into<String>,
        expected: impl Into<String>,
    ) -> Self {
        Self::InvalidValue {
            field: field.into(),
            value: value.into(),
            expected: expected.into(),
        }
    }

    /// Create a validation failed error
    pub fn validation_failed(message: impl Into<String>) -> Self {
        Self::ValidationFailed {
            message: message.into(),
        }
    }
}

/// Trait for validating configuration values
pub trait ConfigValidator<T> {
    /// Validate a configuration value
    fn validate(&self, value: &T) -> Result<(), ConfigError>;
}

/// Accepts URL path prefixes such as `/app` (or no prefix at all)
pub struct PathPrefixValidator {
    pub field: &'static str,
}

impl ConfigValidator<String> for PathPrefixValidator {
    fn validate(&self, value: &String) -> Result<(), ConfigError> {
        if value.is_empty() {
            return Ok(());
        }
        if !value.starts_with('/') || value.ends_with('/') {
            return Err(ConfigError::invalid_value(
                self.field,
                value.clone(),
                "a path starting with '/' and without a trailing '/'",
            ));
        }
        Ok(())
    }
}

/// Accepts the level names understood by the tracing filter
pub struct LogLevelValidator;

impl LogLevelValidator {
    pub const LEVELS: [&'static str; 5] = ["error", "warn", "info", "debug", "trace"];
}

impl ConfigValidator<String> for LogLevelValidator {
    fn validate(&self, value: &String) -> Result<(), ConfigError> {
        if Self::LEVELS.contains(&value.as_str()) {
            Ok(())
        } else {
            Err(ConfigError::invalid_value(
                "log_level",
                value.clone(),
                format!("one of: {}", Self::LEVELS.join(", ")),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_prefix_validation() {
        let validator = PathPrefixValidator { field: "base_url" };

        assert!(validator.validate(&String::new()).is_ok());
        assert!(validator.validate(&"/app".to_string()).is_ok());
        assert!(validator.validate(&"/app/v1".to_string()).is_ok());

        assert!(validator.validate(&"app".to_string()).is_err());
        assert!(validator.validate(&"/app/".to_string()).is_err());
        assert!(validator.validate(&"/".to_string()).is_err());
    }

    #[test]
    fn test_log_level_validation() {
        assert!(LogLevelValidator.validate(&"debug".to_string()).is_ok());

        match LogLevelValidator.validate(&"loud".to_string()) {
            Err(ConfigError::InvalidValue { field, value, .. }) => {
                assert_eq!(field, "log_level");
                assert_eq!(value, "loud");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
