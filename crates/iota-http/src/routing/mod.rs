//! URL routing for Iota
//!
//! This module provides:
//! - An ordered, immutable table of named routes
//! - Colon-variable pattern matching with most-specific-match selection
//! - A router that resolves requests and reverses routes into URLs
//! - Route sources (static tables and route files)

pub mod matcher;
pub mod pattern;
pub mod router;
pub mod source;
pub mod table;

pub use matcher::{resolve_in, MatcherStats, RouteMatcher};
pub use pattern::{match_segments, split_path, PathSegment, PatternMatch, RoutePattern};
pub use router::{RouteMatch, Router};
pub use source::{FileRouteSource, RouteSource};
pub use table::{Route, RouteTable};

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// HTTP methods a controller can handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HttpMethod {
    GET,
    POST,
    PUT,
    DELETE,
    PATCH,
    HEAD,
    OPTIONS,
    TRACE,
}

impl HttpMethod {
    /// Every supported method, in declaration order
    pub const ALL: [HttpMethod; 8] = [
        HttpMethod::GET,
        HttpMethod::POST,
        HttpMethod::PUT,
        HttpMethod::DELETE,
        HttpMethod::PATCH,
        HttpMethod::HEAD,
        HttpMethod::OPTIONS,
        HttpMethod::TRACE,
    ];

    /// Name of the controller action handling this method (`"get"`)
    pub fn handler_name(&self) -> &'static str {
        match self {
            HttpMethod::GET => "get",
            HttpMethod::POST => "post",
            HttpMethod::PUT => "put",
            HttpMethod::DELETE => "delete",
            HttpMethod::PATCH => "patch",
            HttpMethod::HEAD => "head",
            HttpMethod::OPTIONS => "options",
            HttpMethod::TRACE => "trace",
        }
    }

    /// Capitalized suffix used by the method-specific hooks (`"Get"` as in
    /// `beforeGet`/`afterGet`)
    pub fn hook_suffix(&self) -> &'static str {
        match self {
            HttpMethod::GET => "Get",
            HttpMethod::POST => "Post",
            HttpMethod::PUT => "Put",
            HttpMethod::DELETE => "Delete",
            HttpMethod::PATCH => "Patch",
            HttpMethod::HEAD => "Head",
            HttpMethod::OPTIONS => "Options",
            HttpMethod::TRACE => "Trace",
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HttpMethod::GET => write!(f, "GET"),
            HttpMethod::POST => write!(f, "POST"),
            HttpMethod::PUT => write!(f, "PUT"),
            HttpMethod::DELETE => write!(f, "DELETE"),
            HttpMethod::PATCH => write!(f, "PATCH"),
            HttpMethod::HEAD => write!(f, "HEAD"),
            HttpMethod::OPTIONS => write!(f, "OPTIONS"),
            HttpMethod::TRACE => write!(f, "TRACE"),
        }
    }
}

/// Error returned when a verb is not one of the supported methods
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unsupported HTTP method: {0}")]
pub struct UnsupportedMethod(pub String);

impl FromStr for HttpMethod {
    type Err = UnsupportedMethod;

    /// Verbs are matched case-insensitively
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HttpMethod::ALL
            .iter()
            .find(|method| method.handler_name().eq_ignore_ascii_case(s))
            .copied()
            .ok_or_else(|| UnsupportedMethod(s.to_string()))
    }
}

impl TryFrom<&http::Method> for HttpMethod {
    type Error = UnsupportedMethod;

    fn try_from(method: &http::Method) -> Result<Self, Self::Error> {
        match *method {
            http::Method::GET => Ok(HttpMethod::GET),
            http::Method::POST => Ok(HttpMethod::POST),
            http::Method::PUT => Ok(HttpMethod::PUT),
            http::Method::DELETE => Ok(HttpMethod::DELETE),
            http::Method::PATCH => Ok(HttpMethod::PATCH),
            http::Method::HEAD => Ok(HttpMethod::HEAD),
            http::Method::OPTIONS => Ok(HttpMethod::OPTIONS),
            http::Method::TRACE => Ok(HttpMethod::TRACE),
            _ => Err(UnsupportedMethod(method.to_string())),
        }
    }
}

impl From<HttpMethod> for http::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::GET => http::Method::GET,
            HttpMethod::POST => http::Method::POST,
            HttpMethod::PUT => http::Method::PUT,
            HttpMethod::DELETE => http::Method::DELETE,
            HttpMethod::PATCH => http::Method::PATCH,
            HttpMethod::HEAD => http::Method::HEAD,
            HttpMethod::OPTIONS => http::Method::OPTIONS,
            HttpMethod::TRACE => http::Method::TRACE,
        }
    }
}
