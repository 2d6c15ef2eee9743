//! Controller registry
//!
//! Maps controller identifiers (as they appear in route tables) to factories
//! producing fresh controller instances. The capability table of each type is
//! built once, at registration.

use super::base::{BoundController, Controller, DispatchableController};
use crate::errors::{HttpError, HttpResult};
use crate::routing::HttpMethod;
use std::collections::HashMap;
use std::sync::Arc;

/// Resolves controller identifiers to controller instances
pub trait ControllerResolver: Send + Sync {
    /// Create a fresh instance of the controller registered under `id`
    fn resolve(&self, id: &str) -> HttpResult<Box<dyn DispatchableController>>;

    /// Whether the controller registered under `id` handles `method`
    fn supports(&self, id: &str, method: HttpMethod) -> HttpResult<bool>;

    fn contains(&self, id: &str) -> bool;
}

type ControllerFactory = Box<dyn Fn() -> Box<dyn DispatchableController> + Send + Sync>;

struct Registration {
    factory: ControllerFactory,
    methods: Vec<HttpMethod>,
}

/// Registry of controller factories keyed by controller identifier
#[derive(Default)]
pub struct ControllerRegistry {
    registrations: HashMap<String, Registration>,
}

impl ControllerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a controller type constructed with `Default`
    pub fn register<C>(&mut self, id: impl Into<String>) -> HttpResult<()>
    where
        C: Controller + Default,
    {
        self.register_with(id, C::default)
    }

    /// Register a controller type with a custom factory, for controllers that
    /// carry their own dependencies
    pub fn register_with<C, F>(&mut self, id: impl Into<String>, factory: F) -> HttpResult<()>
    where
        C: Controller,
        F: Fn() -> C + Send + Sync + 'static,
    {
        let id = id.into();
        if self.registrations.contains_key(&id) {
            return Err(HttpError::ControllerAlreadyRegistered { controller: id });
        }

        let actions = Arc::new(C::actions());
        let methods = actions.methods();
        tracing::debug!("Registered controller '{}' handling {:?}", id, methods);

        let factory: ControllerFactory = Box::new(move || -> Box<dyn DispatchableController> {
            Box::new(BoundController::new(factory(), Arc::clone(&actions)))
        });
        self.registrations
            .insert(id, Registration { factory, methods });
        Ok(())
    }

    /// Registered controller identifiers, sorted
    pub fn controller_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.registrations.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// Verbs handled by a registered controller
    pub fn methods(&self, id: &str) -> Option<&[HttpMethod]> {
        self.registrations
            .get(id)
            .map(|registration| registration.methods.as_slice())
    }

    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }

    fn registration(&self, id: &str) -> HttpResult<&Registration> {
        self.registrations
            .get(id)
            .ok_or_else(|| HttpError::controller_not_registered(id))
    }
}

impl ControllerResolver for ControllerRegistry {
    fn resolve(&self, id: &str) -> HttpResult<Box<dyn DispatchableController>> {
        Ok((self.registration(id)?.factory)())
    }

    fn supports(&self, id: &str, method: HttpMethod) -> HttpResult<bool> {
        Ok(self.registration(id)?.methods.contains(&method))
    }

    fn contains(&self, id: &str) -> bool {
        self.registrations.contains_key(id)
    }
}

impl std::fmt::Debug for ControllerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ControllerRegistry")
            .field("controllers", &self.controller_ids())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::ControllerActions;
    use crate::request::RequestContext;

    #[derive(Default)]
    struct Greeter {
        greeting: String,
        greeted: bool,
    }

    impl Greeter {
        fn get(&mut self, _: &mut RequestContext) -> HttpResult<()> {
            self.greeted = true;
            Ok(())
        }
    }

    impl Controller for Greeter {
        fn actions() -> ControllerActions<Self> {
            ControllerActions::new().get(Self::get)
        }
    }

    #[test]
    fn test_register_and_resolve() {
        let mut registry = ControllerRegistry::new();
        registry.register::<Greeter>("Greeter").unwrap();

        assert!(registry.contains("Greeter"));
        assert!(registry.supports("Greeter", HttpMethod::GET).unwrap());
        assert!(!registry.supports("Greeter", HttpMethod::POST).unwrap());
        assert_eq!(registry.methods("Greeter"), Some(&[HttpMethod::GET][..]));

        let mut controller = registry.resolve("Greeter").unwrap();
        let mut request = RequestContext::get("/");
        controller.dispatch(HttpMethod::GET, &mut request).unwrap();
        assert!(controller.downcast_ref::<Greeter>().unwrap().greeted);
    }

    #[test]
    fn test_each_resolution_is_a_fresh_instance() {
        let mut registry = ControllerRegistry::new();
        registry
            .register_with("Greeter", || Greeter {
                greeting: "hello".to_string(),
                greeted: false,
            })
            .unwrap();

        let mut first = registry.resolve("Greeter").unwrap();
        first
            .dispatch(HttpMethod::GET, &mut RequestContext::get("/"))
            .unwrap();

        let second = registry.resolve("Greeter").unwrap();
        let second = second.downcast_ref::<Greeter>().unwrap();
        assert!(!second.greeted);
        assert_eq!(second.greeting, "hello");
    }

    #[test]
    fn test_unknown_and_duplicate_ids() {
        let mut registry = ControllerRegistry::new();
        registry.register::<Greeter>("Greeter").unwrap();

        assert!(matches!(
            registry.register::<Greeter>("Greeter"),
            Err(HttpError::ControllerAlreadyRegistered { .. })
        ));
        assert!(matches!(
            registry.resolve("Missing"),
            Err(HttpError::ControllerNotRegistered { .. })
        ));
        assert!(registry.supports("Missing", HttpMethod::GET).is_err());
        assert_eq!(registry.controller_ids(), vec!["Greeter"]);
    }
}
