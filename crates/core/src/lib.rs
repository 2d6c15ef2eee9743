//! # iota-core
//!
//! Configuration foundation shared by the Iota crates: the configuration
//! trait every component config implements, the environment enumeration and
//! the base application settings.

pub mod config;

pub use config::validation::{ConfigError, ConfigValidator};
pub use config::{AppConfig, AppConfigTrait, ConfigSource, Environment};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Framework information
pub const FRAMEWORK_NAME: &str = "iota";

/// Get framework version
pub fn version() -> &'static str {
    VERSION
}

/// Get framework name
pub fn name() -> &'static str {
    FRAMEWORK_NAME
}
