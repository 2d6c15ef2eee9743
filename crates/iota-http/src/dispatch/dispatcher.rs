//! Request dispatcher
//!
//! Routes a request, resolves the matched controller, and runs its hook
//! sequence for the request verb. Unmatched requests and unhandled verbs are
//! answered with a 404 or 405 status on the request context and an optional
//! fallback handler.

use crate::controller::{ControllerResolver, DispatchableController};
use crate::errors::{HttpError, HttpResult};
use crate::request::RequestContext;
use crate::routing::{HttpMethod, Router};
use http::StatusCode;
use std::sync::Arc;

/// Handler invoked for 404 and 405 responses
#[derive(Clone)]
pub enum FallbackHandler {
    /// A closure receiving the request context
    Callback(Arc<dyn Fn(&RequestContext) + Send + Sync>),
    /// A registered controller whose GET action renders the response
    Controller(String),
}

impl FallbackHandler {
    pub fn callback<F>(callback: F) -> Self
    where
        F: Fn(&RequestContext) + Send + Sync + 'static,
    {
        FallbackHandler::Callback(Arc::new(callback))
    }

    pub fn controller(id: impl Into<String>) -> Self {
        FallbackHandler::Controller(id.into())
    }
}

impl std::fmt::Debug for FallbackHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FallbackHandler::Callback(_) => f.write_str("Callback(..)"),
            FallbackHandler::Controller(id) => f.debug_tuple("Controller").field(id).finish(),
        }
    }
}

/// What happened to a dispatched request
#[derive(Debug)]
pub enum DispatchOutcome {
    /// A controller handled the request; it is returned for inspection
    Dispatched(Box<dyn DispatchableController>),
    /// No route matched (404 signalled)
    NotFound,
    /// The matched controller has no handler for the verb (405 signalled)
    MethodNotAllowed,
}

impl DispatchOutcome {
    pub fn is_dispatched(&self) -> bool {
        matches!(self, DispatchOutcome::Dispatched(_))
    }

    /// Status signalled for this outcome, if any
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            DispatchOutcome::Dispatched(_) => None,
            DispatchOutcome::NotFound => Some(StatusCode::NOT_FOUND),
            DispatchOutcome::MethodNotAllowed => Some(StatusCode::METHOD_NOT_ALLOWED),
        }
    }

    /// Take the dispatched controller as its concrete type
    pub fn into_controller<C: crate::controller::Controller>(self) -> Option<C> {
        match self {
            DispatchOutcome::Dispatched(controller) => controller.downcast::<C>().map(|c| *c),
            _ => None,
        }
    }
}

/// Dispatches requests to controllers
pub struct Dispatcher {
    router: Arc<Router>,
    resolver: Arc<dyn ControllerResolver>,
    not_found: Option<FallbackHandler>,
    method_not_allowed: Option<FallbackHandler>,
}

impl Dispatcher {
    pub fn new(router: Arc<Router>, resolver: Arc<dyn ControllerResolver>) -> Self {
        Self {
            router,
            resolver,
            not_found: None,
            method_not_allowed: None,
        }
    }

    pub fn router(&self) -> &Arc<Router> {
        &self.router
    }

    /// Replace the router used for subsequent dispatches
    pub fn set_router(&mut self, router: Arc<Router>) {
        self.router = router;
    }

    /// Handler for requests no route matches. A controller handler must be
    /// registered and handle GET.
    pub fn handle_404_with(&mut self, handler: FallbackHandler) -> HttpResult<()> {
        self.validate_fallback(StatusCode::NOT_FOUND, &handler)?;
        self.not_found = Some(handler);
        Ok(())
    }

    /// Handler for verbs the matched controller does not handle. A controller
    /// handler must be registered and handle GET.
    pub fn handle_405_with(&mut self, handler: FallbackHandler) -> HttpResult<()> {
        self.validate_fallback(StatusCode::METHOD_NOT_ALLOWED, &handler)?;
        self.method_not_allowed = Some(handler);
        Ok(())
    }

    pub fn not_found_handler(&self) -> Option<&FallbackHandler> {
        self.not_found.as_ref()
    }

    pub fn method_not_allowed_handler(&self) -> Option<&FallbackHandler> {
        self.method_not_allowed.as_ref()
    }

    /// Dispatch a request.
    ///
    /// Errors are reserved for configuration faults (a route naming an
    /// unregistered controller) and for errors returned by controller
    /// actions; 404 and 405 are reported through the outcome.
    pub fn dispatch(&self, request: &mut RequestContext) -> HttpResult<DispatchOutcome> {
        let Some(matched) = self.router.route(request) else {
            self.dispatch_404(request)?;
            return Ok(DispatchOutcome::NotFound);
        };

        let mut controller = self.resolver.resolve(&matched.controller)?;
        controller.attach_router(Arc::clone(&self.router));

        let method = match request.http_method() {
            Ok(method) if controller.supports(method) => method,
            _ => {
                tracing::debug!(
                    "Controller '{}' does not handle {}",
                    matched.controller,
                    request.method()
                );
                self.dispatch_405(request)?;
                return Ok(DispatchOutcome::MethodNotAllowed);
            }
        };

        tracing::debug!(
            "Dispatching {} {} to '{}'",
            method,
            request.path(),
            matched.controller
        );
        controller.dispatch(method, request)?;

        Ok(DispatchOutcome::Dispatched(controller))
    }

    /// Signal 404 on the request and run the configured handler, if any
    pub fn dispatch_404(&self, request: &mut RequestContext) -> HttpResult<()> {
        request.set_status(StatusCode::NOT_FOUND);
        self.run_fallback(self.not_found.as_ref(), request)
    }

    /// Signal 405 on the request and run the configured handler, if any
    pub fn dispatch_405(&self, request: &mut RequestContext) -> HttpResult<()> {
        request.set_status(StatusCode::METHOD_NOT_ALLOWED);
        self.run_fallback(self.method_not_allowed.as_ref(), request)
    }

    fn run_fallback(
        &self,
        handler: Option<&FallbackHandler>,
        request: &mut RequestContext,
    ) -> HttpResult<()> {
        match handler {
            None => Ok(()),
            Some(FallbackHandler::Callback(callback)) => {
                callback(request);
                Ok(())
            }
            Some(FallbackHandler::Controller(id)) => {
                let mut controller = self.resolver.resolve(id)?;
                controller.attach_router(Arc::clone(&self.router));
                controller.dispatch(HttpMethod::GET, request)
            }
        }
    }

    fn validate_fallback(&self, status: StatusCode, handler: &FallbackHandler) -> HttpResult<()> {
        let FallbackHandler::Controller(id) = handler else {
            return Ok(());
        };

        match self.resolver.supports(id, HttpMethod::GET) {
            Ok(true) => Ok(()),
            Ok(false) => Err(HttpError::invalid_fallback(
                status.as_u16(),
                format!("controller '{}' does not handle GET", id),
            )),
            Err(_) => Err(HttpError::invalid_fallback(
                status.as_u16(),
                format!("controller '{}' is not registered", id),
            )),
        }
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("router", &self.router)
            .field("not_found", &self.not_found)
            .field("method_not_allowed", &self.method_not_allowed)
            .finish_non_exhaustive()
    }
}
