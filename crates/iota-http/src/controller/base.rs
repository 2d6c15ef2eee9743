//! Controller capability tables
//!
//! A controller declares, once per type, which verbs it handles and which
//! lifecycle hooks it provides. The dispatcher never probes for method names
//! at runtime; it consults the table built by [`Controller::actions`].

use crate::errors::HttpResult;
use crate::request::RequestContext;
use crate::routing::{HttpMethod, Router};
use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

/// A controller action or hook
pub type Action<C> = fn(&mut C, &mut RequestContext) -> HttpResult<()>;

/// Verb handlers and lifecycle hooks of a controller type
pub struct ControllerActions<C> {
    handlers: HashMap<HttpMethod, Action<C>>,
    before: HashMap<HttpMethod, Action<C>>,
    after: HashMap<HttpMethod, Action<C>>,
    before_all: Option<Action<C>>,
    after_all: Option<Action<C>>,
}

impl<C> ControllerActions<C> {
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
            before: HashMap::new(),
            after: HashMap::new(),
            before_all: None,
            after_all: None,
        }
    }

    /// Handle `method` with `action`
    pub fn on(mut self, method: HttpMethod, action: Action<C>) -> Self {
        self.handlers.insert(method, action);
        self
    }

    pub fn get(self, action: Action<C>) -> Self {
        self.on(HttpMethod::GET, action)
    }

    pub fn post(self, action: Action<C>) -> Self {
        self.on(HttpMethod::POST, action)
    }

    pub fn put(self, action: Action<C>) -> Self {
        self.on(HttpMethod::PUT, action)
    }

    pub fn delete(self, action: Action<C>) -> Self {
        self.on(HttpMethod::DELETE, action)
    }

    pub fn patch(self, action: Action<C>) -> Self {
        self.on(HttpMethod::PATCH, action)
    }

    pub fn head(self, action: Action<C>) -> Self {
        self.on(HttpMethod::HEAD, action)
    }

    pub fn options(self, action: Action<C>) -> Self {
        self.on(HttpMethod::OPTIONS, action)
    }

    /// Hook run right before the `method` handler
    pub fn before(mut self, method: HttpMethod, hook: Action<C>) -> Self {
        self.before.insert(method, hook);
        self
    }

    /// Hook run right after the `method` handler
    pub fn after(mut self, method: HttpMethod, hook: Action<C>) -> Self {
        self.after.insert(method, hook);
        self
    }

    /// Hook run first for every handled verb
    pub fn before_all(mut self, hook: Action<C>) -> Self {
        self.before_all = Some(hook);
        self
    }

    /// Hook run last for every handled verb
    pub fn after_all(mut self, hook: Action<C>) -> Self {
        self.after_all = Some(hook);
        self
    }

    pub fn supports(&self, method: HttpMethod) -> bool {
        self.handlers.contains_key(&method)
    }

    /// Handled verbs, in [`HttpMethod::ALL`] order
    pub fn methods(&self) -> Vec<HttpMethod> {
        HttpMethod::ALL
            .iter()
            .copied()
            .filter(|method| self.supports(*method))
            .collect()
    }

    /// Run `before_all`, the verb's before hook, the handler, the verb's
    /// after hook and `after_all`, in that order. The first error aborts the
    /// rest of the sequence. Verbs without a handler run nothing.
    pub fn run(
        &self,
        controller: &mut C,
        method: HttpMethod,
        request: &mut RequestContext,
    ) -> HttpResult<bool> {
        let Some(handler) = self.handlers.get(&method) else {
            return Ok(false);
        };

        let sequence = [
            self.before_all,
            self.before.get(&method).copied(),
            Some(*handler),
            self.after.get(&method).copied(),
            self.after_all,
        ];
        for action in sequence.into_iter().flatten() {
            action(controller, request)?;
        }

        Ok(true)
    }
}

impl<C> Default for ControllerActions<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> Clone for ControllerActions<C> {
    fn clone(&self) -> Self {
        Self {
            handlers: self.handlers.clone(),
            before: self.before.clone(),
            after: self.after.clone(),
            before_all: self.before_all,
            after_all: self.after_all,
        }
    }
}

impl<C> std::fmt::Debug for ControllerActions<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ControllerActions")
            .field("methods", &self.methods())
            .field("before", &self.before.keys().collect::<Vec<_>>())
            .field("after", &self.after.keys().collect::<Vec<_>>())
            .field("before_all", &self.before_all.is_some())
            .field("after_all", &self.after_all.is_some())
            .finish()
    }
}

/// A request handler type
pub trait Controller: Send + 'static {
    /// Capability table for this controller type; built once at registration
    fn actions() -> ControllerActions<Self>
    where
        Self: Sized;

    /// Receives the router before any hook runs, so actions can build URLs
    fn attach_router(&mut self, _router: Arc<Router>) {}
}

/// Object-safe view of a controller instance bound to its capability table
pub trait DispatchableController: Send {
    fn supports(&self, method: HttpMethod) -> bool;

    /// Run the hook sequence for `method`
    fn dispatch(&mut self, method: HttpMethod, request: &mut RequestContext) -> HttpResult<()>;

    fn attach_router(&mut self, router: Arc<Router>);

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;

    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

impl dyn DispatchableController {
    /// Borrow the concrete controller
    pub fn downcast_ref<C: Controller>(&self) -> Option<&C> {
        self.as_any().downcast_ref()
    }

    pub fn downcast_mut<C: Controller>(&mut self) -> Option<&mut C> {
        self.as_any_mut().downcast_mut()
    }

    /// Take ownership of the concrete controller
    pub fn downcast<C: Controller>(self: Box<Self>) -> Option<Box<C>> {
        self.into_any().downcast().ok()
    }
}

impl std::fmt::Debug for dyn DispatchableController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DispatchableController").finish_non_exhaustive()
    }
}

/// A controller instance paired with its shared capability table
pub struct BoundController<C> {
    controller: C,
    actions: Arc<ControllerActions<C>>,
}

impl<C: Controller> BoundController<C> {
    pub fn new(controller: C, actions: Arc<ControllerActions<C>>) -> Self {
        Self {
            controller,
            actions,
        }
    }
}

impl<C: Controller> DispatchableController for BoundController<C> {
    fn supports(&self, method: HttpMethod) -> bool {
        self.actions.supports(method)
    }

    fn dispatch(&mut self, method: HttpMethod, request: &mut RequestContext) -> HttpResult<()> {
        self.actions.run(&mut self.controller, method, request)?;
        Ok(())
    }

    fn attach_router(&mut self, router: Arc<Router>) {
        self.controller.attach_router(router);
    }

    fn as_any(&self) -> &dyn Any {
        &self.controller
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        &mut self.controller
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        Box::new(self.controller)
    }
}
