//! Per-request context passed through routing and dispatch

use crate::routing::{HttpMethod, UnsupportedMethod};
use http::StatusCode;
use std::collections::HashMap;

/// Everything the router and dispatcher need to know about one request,
/// plus the outcome they signal back to the transport.
///
/// The incoming side is the raw request URI (query string included), the
/// verb, the host and the TLS flag. Routing adds the matched route name and
/// merges path variables into `params`; dispatch records the status code it
/// signalled for unmatched requests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    method: String,
    uri: String,
    host: Option<String>,
    https: bool,
    params: HashMap<String, String>,
    matched_route: Option<String>,
    status: Option<StatusCode>,
}

impl RequestContext {
    /// Create a context for `method` on `uri`. The query string, if any, is
    /// decoded into the parameter set.
    pub fn new(method: impl Into<String>, uri: impl Into<String>) -> Self {
        let uri = uri.into();
        let params = match uri.split_once('?') {
            Some((_, query)) => parse_query(query),
            None => HashMap::new(),
        };

        Self {
            method: method.into(),
            uri,
            params,
            ..Self::default()
        }
    }

    /// Convenience constructor for a GET request
    pub fn get(uri: impl Into<String>) -> Self {
        Self::new("GET", uri)
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    pub fn with_https(mut self, https: bool) -> Self {
        self.https = https;
        self
    }

    /// Add or replace a request parameter
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    /// Raw request verb as received
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Parsed request verb
    pub fn http_method(&self) -> Result<HttpMethod, UnsupportedMethod> {
        self.method.parse()
    }

    /// Raw request URI including the query string
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Request path with the query string removed
    pub fn path(&self) -> &str {
        match self.uri.split_once('?') {
            Some((path, _)) => path,
            None => &self.uri,
        }
    }

    /// Raw query string, without the leading `?`
    pub fn query(&self) -> Option<&str> {
        self.uri.split_once('?').map(|(_, query)| query)
    }

    pub fn host(&self) -> Option<&str> {
        self.host.as_deref()
    }

    pub fn is_https(&self) -> bool {
        self.https
    }

    pub fn params(&self) -> &HashMap<String, String> {
        &self.params
    }

    pub fn params_mut(&mut self) -> &mut HashMap<String, String> {
        &mut self.params
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    /// Name of the route selected by the router, if any
    pub fn matched_route(&self) -> Option<&str> {
        self.matched_route.as_deref()
    }

    /// Status code signalled by the dispatcher (404 or 405), if any
    pub fn status(&self) -> Option<StatusCode> {
        self.status
    }

    pub(crate) fn set_matched_route(&mut self, name: impl Into<String>) {
        self.matched_route = Some(name.into());
    }

    pub(crate) fn set_status(&mut self, status: StatusCode) {
        self.status = Some(status);
    }
}

impl<B> From<&http::Request<B>> for RequestContext {
    fn from(request: &http::Request<B>) -> Self {
        let uri = request.uri();
        let target = uri
            .path_and_query()
            .map(|pq| pq.as_str().to_string())
            .unwrap_or_else(|| uri.path().to_string());

        let host = uri.host().map(str::to_string).or_else(|| {
            request
                .headers()
                .get(http::header::HOST)
                .and_then(|value| value.to_str().ok())
                .map(str::to_string)
        });
        let https = uri.scheme() == Some(&http::uri::Scheme::HTTPS);

        let mut context = RequestContext::new(request.method().as_str(), target).with_https(https);
        context.host = host;
        context
    }
}

fn parse_query(query: &str) -> HashMap<String, String> {
    match serde_urlencoded::from_str::<Vec<(String, String)>>(query) {
        Ok(pairs) => pairs.into_iter().collect(),
        Err(err) => {
            tracing::warn!("Ignoring malformed query string '{}': {}", query, err);
            HashMap::new()
        }
    }
}
