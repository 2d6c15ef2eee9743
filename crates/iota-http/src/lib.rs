//! # iota-http
//!
//! Routing, dispatch and views for the Iota MVC framework.
//!
//! This crate provides:
//! - Declarative route tables with static and `:variable` segments
//! - Most-specific-match routing and reverse routing (`url`, `abs_url`)
//! - A dispatcher running controller handlers with before/after hooks
//! - 404/405 fallback handling
//! - An HTML view layer with automatic escaping and shared page assets

pub mod config;
pub mod controller;
pub mod dispatch;
pub mod errors;
pub mod logging;
pub mod request;
pub mod routing;
pub mod view;

pub use config::{RoutingConfig, RoutingDefaults};
pub use errors::{HttpError, HttpResult};

// Re-export routing types
pub use routing::{
    FileRouteSource, HttpMethod, Route, RouteMatch, RouteSource, RouteTable, Router,
    UnsupportedMethod,
};

// Re-export controller and dispatch types
pub use controller::{
    Action, Controller, ControllerActions, ControllerRegistry, ControllerResolver,
    DispatchableController,
};
pub use dispatch::{DispatchOutcome, Dispatcher, FallbackHandler};
pub use request::RequestContext;

// Re-export view types
pub use view::{PageAssets, TemplateRenderer, TinyTemplateRenderer, View};

pub use logging::{init_logging, LoggingConfig};

/// Re-export of the status codes signalled on [`RequestContext`]
pub use http::StatusCode;
