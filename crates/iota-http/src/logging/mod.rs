//! Logging setup and request logging

pub mod config;

pub use config::{init_logging, log_request, LoggingConfig};
