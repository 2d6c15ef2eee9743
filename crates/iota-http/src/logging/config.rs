//! # Structured Logging Integration
//!
//! Logging setup for Iota applications built on `tracing-subscriber`, with
//! JSON output for production and readable output for development.

use crate::request::RequestContext;
use iota_core::{AppConfig, Environment};
use serde_json::{json, Value};
use std::io;
use tracing_subscriber::{fmt::Layer, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "warn")
    pub level: String,
    /// Enable JSON structured logging (vs plain text)
    pub json_format: bool,
    /// Enable pretty printing for development
    pub pretty_print: bool,
    /// Include file and line number information
    pub include_location: bool,
    /// Custom fields logged once at initialization
    pub global_fields: serde_json::Map<String, Value>,
    /// Environment filter (supports directives like "iota_http=debug,iota_criteria=warn")
    pub env_filter: Option<String>,
    /// Service name logged at initialization
    pub service_name: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
            pretty_print: true,
            include_location: false,
            global_fields: serde_json::Map::new(),
            env_filter: None,
            service_name: None,
        }
    }
}

impl LoggingConfig {
    /// Create production logging configuration
    pub fn production() -> Self {
        Self {
            level: "info".to_string(),
            json_format: true,
            pretty_print: false,
            include_location: false,
            global_fields: env_field("production"),
            env_filter: Some("iota_http=info,iota_criteria=warn".to_string()),
            service_name: None,
        }
    }

    /// Create development logging configuration
    pub fn development() -> Self {
        Self {
            level: "debug".to_string(),
            json_format: false,
            pretty_print: true,
            include_location: true,
            global_fields: env_field("development"),
            env_filter: Some("iota_http=debug,iota_criteria=debug".to_string()),
            service_name: None,
        }
    }

    /// Create test logging configuration (minimal output)
    pub fn test() -> Self {
        Self {
            level: "error".to_string(),
            json_format: false,
            pretty_print: false,
            include_location: false,
            global_fields: env_field("test"),
            env_filter: Some("iota_http=error".to_string()),
            service_name: None,
        }
    }

    /// Preset for the application environment, with the configured level
    pub fn from_app_config(config: &AppConfig) -> Self {
        let preset = match config.environment {
            Environment::Development => Self::development(),
            Environment::Testing => Self::test(),
            Environment::Production => Self::production(),
        };

        Self {
            level: config.log_level.clone(),
            env_filter: Some(format!(
                "iota_http={level},iota_criteria={level}",
                level = config.log_level
            )),
            ..preset
        }
    }

    /// Add a global field logged at initialization
    pub fn with_global_field<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        self.global_fields.insert(key.into(), value.into());
        self
    }

    pub fn with_service(mut self, name: &str) -> Self {
        self.service_name = Some(name.to_string());
        self
    }

    /// Set environment filter
    pub fn with_env_filter<S: Into<String>>(mut self, filter: S) -> Self {
        self.env_filter = Some(filter.into());
        self
    }
}

fn env_field(environment: &str) -> serde_json::Map<String, Value> {
    let mut fields = serde_json::Map::new();
    fields.insert("env".to_string(), json!(environment));
    fields
}

/// Initialize logging. `RUST_LOG`, when set, overrides the configured filter.
pub fn init_logging(config: LoggingConfig) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let env_filter = config.env_filter.as_deref().unwrap_or(&config.level);

    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(env_filter))?;

    if config.json_format {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                Layer::new()
                    .with_writer(io::stdout)
                    .with_file(config.include_location)
                    .with_line_number(config.include_location)
                    .json(),
            )
            .try_init()?;
    } else if config.pretty_print {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                Layer::new()
                    .with_writer(io::stdout)
                    .with_file(config.include_location)
                    .with_line_number(config.include_location)
                    .pretty(),
            )
            .try_init()?;
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(Layer::new().with_writer(io::stdout))
            .try_init()?;
    }

    let format = if config.json_format { "json" } else { "text" };
    let mut init_msg = json!({
        "message": "Logging initialized",
        "level": config.level,
        "format": format,
    });
    if let Some(name) = config.service_name {
        init_msg["service_name"] = json!(name);
    }
    for (key, value) in config.global_fields {
        init_msg[key] = value;
    }
    tracing::info!("{}", init_msg);

    Ok(())
}

/// Log the result of handling a request, at a level matching its status
pub fn log_request(request: &RequestContext) {
    let status = request.status().map(|status| status.as_u16()).unwrap_or(200);
    let log_data = json!({
        "event": "request",
        "method": request.method(),
        "path": request.path(),
        "route": request.matched_route(),
        "status": status,
    });

    if status >= 500 {
        tracing::error!("{}", log_data);
    } else if status >= 400 {
        tracing::warn!("{}", log_data);
    } else {
        tracing::info!("{}", log_data);
    }
}
