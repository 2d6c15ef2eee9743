//! Ordered table of named routes
//!
//! A route table is built once (from a literal or a [`RouteSource`]) and is
//! read-only afterwards. Declaration order is preserved because reverse
//! routing by controller id and the tie-break between equally specific
//! routes both depend on it.
//!
//! [`RouteSource`]: super::source::RouteSource

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A named association between a URL pattern and a controller identifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    pub name: String,
    pub pattern: String,
    pub controller: String,
}

impl Route {
    pub fn new(
        name: impl Into<String>,
        pattern: impl Into<String>,
        controller: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            pattern: pattern.into(),
            controller: controller.into(),
        }
    }

    /// A route named by its own pattern
    pub fn unnamed(pattern: impl Into<String>, controller: impl Into<String>) -> Self {
        let pattern = pattern.into();
        Self {
            name: pattern.clone(),
            pattern,
            controller: controller.into(),
        }
    }
}

/// Ordered mapping of route name to (pattern, controller)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteTable {
    routes: Vec<Route>,
    by_name: HashMap<String, usize>,
}

impl RouteTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table keyed by pattern, where each route is named by its pattern
    pub fn from_patterns<I, P, C>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (P, C)>,
        P: Into<String>,
        C: Into<String>,
    {
        pairs
            .into_iter()
            .map(|(pattern, controller)| Route::unnamed(pattern, controller))
            .collect()
    }

    /// Add a named route, builder style
    pub fn route(
        mut self,
        name: impl Into<String>,
        pattern: impl Into<String>,
        controller: impl Into<String>,
    ) -> Self {
        self.insert(Route::new(name, pattern, controller));
        self
    }

    /// Insert a route. A route with an existing name replaces the earlier
    /// definition but keeps its declaration position.
    pub fn insert(&mut self, route: Route) {
        match self.by_name.get(&route.name) {
            Some(&index) => self.routes[index] = route,
            None => {
                self.by_name.insert(route.name.clone(), self.routes.len());
                self.routes.push(route);
            }
        }
    }

    /// Look up a route by name
    pub fn get(&self, name: &str) -> Option<&Route> {
        self.by_name.get(name).map(|&index| &self.routes[index])
    }

    /// Route at a declaration position
    pub fn at(&self, index: usize) -> Option<&Route> {
        self.routes.get(index)
    }

    /// Routes targeting the given controller, in declaration order
    pub fn routes_for_controller<'a, 'b>(
        &'a self,
        controller: &'b str,
    ) -> impl Iterator<Item = &'a Route> + 'b
    where
        'a: 'b,
    {
        self.routes
            .iter()
            .filter(move |route| route.controller == controller)
    }

    /// All routes in declaration order
    pub fn iter(&self) -> std::slice::Iter<'_, Route> {
        self.routes.iter()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl FromIterator<Route> for RouteTable {
    fn from_iter<T: IntoIterator<Item = Route>>(iter: T) -> Self {
        let mut table = RouteTable::new();
        for route in iter {
            table.insert(route);
        }
        table
    }
}

impl<'a> IntoIterator for &'a RouteTable {
    type Item = &'a Route;
    type IntoIter = std::slice::Iter<'a, Route>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
