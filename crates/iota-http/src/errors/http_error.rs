//! Error types for routing, dispatch and view rendering
//!
//! Expected per-request outcomes (no matching route, unsupported verb) are
//! modelled as values elsewhere; everything here is a configuration or
//! integrity fault that is propagated to the caller.

use iota_core::ConfigError;
use thiserror::Error;

/// Result type for Iota HTTP operations
pub type HttpResult<T> = Result<T, HttpError>;

/// Routing, dispatch and view errors
#[derive(Error, Debug)]
pub enum HttpError {
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("No route found named or targeting '{target}'")]
    RouteNotFound { target: String },

    #[error("Route index {index} out of range for '{target}' ({available} route(s) available)")]
    RouteIndexOutOfRange {
        target: String,
        index: usize,
        available: usize,
    },

    #[error("Invalid {status} fallback: {message}")]
    InvalidFallback { status: u16, message: String },

    #[error("Controller '{controller}' is not registered")]
    ControllerNotRegistered { controller: String },

    #[error("Controller '{controller}' is already registered")]
    ControllerAlreadyRegistered { controller: String },

    #[error("Route source '{source_name}' could not be read: {source}")]
    RouteSource {
        source_name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Template error: {message}")]
    TemplateError { message: String },

    #[error("Handler error: {message}")]
    HandlerError { message: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl HttpError {
    /// Create a configuration error
    pub fn config<T: Into<String>>(message: T) -> Self {
        HttpError::ConfigError {
            message: message.into(),
        }
    }

    /// Create an unknown route error
    pub fn route_not_found<T: Into<String>>(target: T) -> Self {
        HttpError::RouteNotFound {
            target: target.into(),
        }
    }

    /// Create an invalid fallback error for the given status code
    pub fn invalid_fallback<T: Into<String>>(status: u16, message: T) -> Self {
        HttpError::InvalidFallback {
            status,
            message: message.into(),
        }
    }

    /// Create an unregistered controller error
    pub fn controller_not_registered<T: Into<String>>(controller: T) -> Self {
        HttpError::ControllerNotRegistered {
            controller: controller.into(),
        }
    }

    /// Create a route source error
    pub fn route_source<T: Into<String>>(source_name: T, source: std::io::Error) -> Self {
        HttpError::RouteSource {
            source_name: source_name.into(),
            source,
        }
    }

    /// Create a template error
    pub fn template<T: Into<String>>(message: T) -> Self {
        HttpError::TemplateError {
            message: message.into(),
        }
    }

    /// Create an error raised by a controller action
    pub fn handler<T: Into<String>>(message: T) -> Self {
        HttpError::HandlerError {
            message: message.into(),
        }
    }

    /// Whether this error points at a programming or configuration mistake
    /// rather than a runtime failure inside a handler
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            HttpError::ConfigError { .. }
                | HttpError::RouteNotFound { .. }
                | HttpError::RouteIndexOutOfRange { .. }
                | HttpError::InvalidFallback { .. }
                | HttpError::ControllerNotRegistered { .. }
                | HttpError::ControllerAlreadyRegistered { .. }
                | HttpError::Config(_)
        )
    }
}

impl From<tinytemplate::error::Error> for HttpError {
    fn from(err: tinytemplate::error::Error) -> Self {
        HttpError::template(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = HttpError::route_not_found("user.show");
        assert_eq!(err.to_string(), "No route found named or targeting 'user.show'");

        let err = HttpError::invalid_fallback(404, "controller 'Missing' is not registered");
        assert_eq!(
            err.to_string(),
            "Invalid 404 fallback: controller 'Missing' is not registered"
        );
    }

    #[test]
    fn test_configuration_classification() {
        assert!(HttpError::config("bad").is_configuration());
        assert!(HttpError::controller_not_registered("Home").is_configuration());
        assert!(!HttpError::handler("boom").is_configuration());
        assert!(!HttpError::template("bad syntax").is_configuration());
    }

    #[test]
    fn test_config_error_conversion() {
        let err: HttpError = ConfigError::validation_failed("nope").into();
        assert!(matches!(err, HttpError::Config(_)));
        assert!(err.is_configuration());
    }
}
