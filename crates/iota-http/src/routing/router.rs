//! Request routing and URL generation
//!
//! The router owns an immutable [`RouteTable`] and its compiled
//! [`RouteMatcher`]. It is `Send + Sync` and meant to be shared behind an
//! `Arc` between the dispatcher, controllers and views.

use super::matcher::{MatcherStats, RouteMatcher};
use super::pattern::RoutePattern;
use super::source::{FileRouteSource, RouteSource};
use super::table::{Route, RouteTable};
use crate::config::RoutingConfig;
use crate::errors::{HttpError, HttpResult};
use crate::request::RequestContext;
use std::collections::HashMap;

/// Result of routing a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch {
    /// Identifier of the controller handling the route
    pub controller: String,
    /// Path variables captured by the route pattern
    pub variables: HashMap<String, String>,
    /// Name of the matched route
    pub route_name: String,
}

/// Matches requests against routes and reverses routes into URLs
#[derive(Debug, Clone)]
pub struct Router {
    table: RouteTable,
    matcher: RouteMatcher,
    base_url: String,
    default_https: Option<bool>,
}

impl Router {
    /// Create a router over a route table
    pub fn new(table: RouteTable) -> Self {
        let matcher = RouteMatcher::new(&table);
        let stats = matcher.stats();
        tracing::debug!(
            "Router created with {} routes ({} static, {} dynamic)",
            stats.total_routes,
            stats.static_routes,
            stats.dynamic_routes
        );

        Self {
            table,
            matcher,
            base_url: String::new(),
            default_https: None,
        }
    }

    /// Create a router from any route source
    pub fn from_source(source: &dyn RouteSource) -> HttpResult<Self> {
        Ok(Self::new(source.load_routes()?))
    }

    /// Create a router from routing configuration. The configured routes
    /// file is required.
    pub fn from_config(config: &RoutingConfig) -> HttpResult<Self> {
        let routes_file = config
            .routes_file
            .as_ref()
            .ok_or_else(|| HttpError::config("No routes file configured"))?;

        let router = Self::from_source(&FileRouteSource::new(routes_file))?
            .with_base_url(&config.base_url);

        Ok(match config.default_https {
            Some(https) => router.with_default_https(https),
            None => router,
        })
    }

    /// Mount the application under a path prefix such as `/app`. A trailing
    /// slash is ignored.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Scheme used by [`Router::abs_url`] when the caller does not force one
    pub fn with_default_https(mut self, https: bool) -> Self {
        self.default_https = Some(https);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    pub fn stats(&self) -> MatcherStats {
        self.matcher.stats()
    }

    /// Route a request. On a match the captured variables are merged into
    /// the request parameters (overriding query parameters of the same name)
    /// and the matched route name is recorded on the request.
    pub fn route(&self, request: &mut RequestContext) -> Option<RouteMatch> {
        let Some(path) = self.strip_base(request.path()) else {
            tracing::debug!(
                "Path '{}' is outside base url '{}'",
                request.path(),
                self.base_url
            );
            return None;
        };

        let Some((index, matched)) = self.matcher.resolve(path) else {
            tracing::debug!("No route matches '{}'", path);
            return None;
        };
        let route = self.table.at(index)?;

        tracing::debug!(
            "Route '{}' ({}) matched '{}' -> {}",
            route.name,
            route.pattern,
            path,
            route.controller
        );

        request.params_mut().extend(
            matched
                .variables
                .iter()
                .map(|(name, value)| (name.clone(), value.clone())),
        );
        request.set_matched_route(route.name.clone());

        Some(RouteMatch {
            controller: route.controller.clone(),
            variables: matched.variables,
            route_name: route.name.clone(),
        })
    }

    /// Build the URL of a route name or of the first route targeting a
    /// controller id
    pub fn url<I, K, V>(&self, target: &str, params: I) -> HttpResult<String>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.url_at(target, params, 0)
    }

    /// Build the URL of the `index`-th route targeting a controller id (in
    /// declaration order). For a route name only index 0 is valid.
    ///
    /// Parameters naming a `:variable` of the pattern are substituted into
    /// the path; the rest are appended as a query string in the order given.
    pub fn url_at<I, K, V>(&self, target: &str, params: I, index: usize) -> HttpResult<String>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let route = self.resolve_target(target, index)?;
        let mut params: Vec<(String, String)> = params
            .into_iter()
            .map(|(name, value)| (name.into(), value.into()))
            .collect();

        let path = RoutePattern::parse(&route.pattern).fill(&mut params);
        let mut url = format!("{}{}", self.base_url, path);

        if !params.is_empty() {
            let query = url::form_urlencoded::Serializer::new(String::new())
                .extend_pairs(params.iter())
                .finish();
            url.push('?');
            url.push_str(&query);
        }

        Ok(url)
    }

    /// Absolute URL for a route. The scheme is `https` when forced, else the
    /// router default, else the request's own TLS flag. The host is taken
    /// from the request.
    pub fn abs_url<I, K, V>(
        &self,
        request: &RequestContext,
        target: &str,
        params: I,
        https: Option<bool>,
    ) -> HttpResult<String>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let host = request
            .host()
            .ok_or_else(|| HttpError::config("Cannot build an absolute URL without a request host"))?;
        let secure = https.or(self.default_https).unwrap_or(request.is_https());
        let scheme = if secure { "https" } else { "http" };

        Ok(format!("{}://{}{}", scheme, host, self.url(target, params)?))
    }

    fn resolve_target(&self, target: &str, index: usize) -> HttpResult<&Route> {
        if let Some(route) = self.table.get(target) {
            return match index {
                0 => Ok(route),
                _ => Err(HttpError::RouteIndexOutOfRange {
                    target: target.to_string(),
                    index,
                    available: 1,
                }),
            };
        }

        let candidates: Vec<&Route> = self.table.routes_for_controller(target).collect();
        if candidates.is_empty() {
            return Err(HttpError::route_not_found(target));
        }

        candidates
            .get(index)
            .copied()
            .ok_or_else(|| HttpError::RouteIndexOutOfRange {
                target: target.to_string(),
                index,
                available: candidates.len(),
            })
    }

    fn strip_base<'a>(&self, path: &'a str) -> Option<&'a str> {
        if self.base_url.is_empty() {
            return Some(path);
        }

        match path.strip_prefix(self.base_url.as_str())? {
            "" => Some("/"),
            rest if rest.starts_with('/') => Some(rest),
            _ => None,
        }
    }
}
