//! Route matching engine
//!
//! Resolves a request path to the most specific route of a [`RouteTable`].
//! Static patterns are indexed by their slash-trimmed text for an O(1)
//! lookup; everything else is matched segment by segment and the candidate
//! with the fewest captured variables wins. Among equally specific
//! candidates the first declared route wins, including between static
//! patterns that differ only in leading or trailing slashes.

use super::pattern::{split_path, PatternMatch, RoutePattern};
use super::table::{Route, RouteTable};
use std::collections::HashMap;

/// Compiled, read-only index over a route table
#[derive(Debug, Clone)]
pub struct RouteMatcher {
    /// Slash-trimmed static pattern -> index of the first route declaring it
    static_routes: HashMap<String, usize>,
    /// Every route, compiled, in declaration order
    compiled: Vec<RoutePattern>,
}

impl RouteMatcher {
    /// Compile all routes of a table
    pub fn new(table: &RouteTable) -> Self {
        let mut static_routes = HashMap::new();
        let mut compiled = Vec::with_capacity(table.len());

        for (index, route) in table.iter().enumerate() {
            let pattern = RoutePattern::parse(&route.pattern);
            if let Some(key) = pattern.static_key() {
                static_routes.entry(key).or_insert(index);
            }
            compiled.push(pattern);
        }

        Self {
            static_routes,
            compiled,
        }
    }

    /// Resolve a path (query string and base prefix already removed) to the
    /// index of the winning route and its captured variables
    pub fn resolve(&self, path: &str) -> Option<(usize, PatternMatch)> {
        if let Some(&index) = self.static_routes.get(path.trim_matches('/')) {
            return Some((index, PatternMatch::default()));
        }

        let segments = split_path(path);
        let mut best: Option<(usize, PatternMatch)> = None;

        for (index, pattern) in self.compiled.iter().enumerate() {
            let Some(candidate) = pattern.match_segments(&segments) else {
                continue;
            };
            tracing::trace!(
                pattern = %pattern.original,
                variables = candidate.variable_count,
                "Route candidate matched"
            );

            let more_specific = best
                .as_ref()
                .map_or(true, |(_, current)| candidate.variable_count < current.variable_count);
            if more_specific {
                best = Some((index, candidate));
            }
        }

        best
    }

    /// Statistics about the compiled routes
    pub fn stats(&self) -> MatcherStats {
        let static_routes = self
            .compiled
            .iter()
            .filter(|pattern| pattern.is_static())
            .count();

        MatcherStats {
            static_routes,
            dynamic_routes: self.compiled.len() - static_routes,
            total_routes: self.compiled.len(),
        }
    }

    /// Parsed pattern for the route at `index`
    pub fn pattern(&self, index: usize) -> Option<&RoutePattern> {
        self.compiled.get(index)
    }
}

/// Statistics about the route matcher
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatcherStats {
    pub static_routes: usize,
    pub dynamic_routes: usize,
    pub total_routes: usize,
}

/// Resolve directly against a table, without keeping the compiled index
pub fn resolve_in<'a>(table: &'a RouteTable, path: &str) -> Option<(&'a Route, PatternMatch)> {
    let (index, matched) = RouteMatcher::new(table).resolve(path)?;
    table.at(index).map(|route| (route, matched))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller_for(table: &RouteTable, path: &str) -> Option<String> {
        resolve_in(table, path).map(|(route, _)| route.controller.clone())
    }

    #[test]
    fn test_static_route_lookup() {
        let table = RouteTable::from_patterns([("/test", "TestController")]);

        assert_eq!(controller_for(&table, "/test").as_deref(), Some("TestController"));
        assert_eq!(controller_for(&table, "/foobar"), None);
    }

    #[test]
    fn test_most_specific_route_wins() {
        let table = RouteTable::from_patterns([
            ("/test/:var1/:var2", "TestController1"),
            ("/test/static/:var1", "TestController2"),
        ]);

        let (route, matched) = resolve_in(&table, "/test/static/foo").unwrap();
        assert_eq!(route.controller, "TestController2");
        assert_eq!(matched.variables.get("var1").map(String::as_str), Some("foo"));
        assert_eq!(matched.variable_count, 1);
    }

    #[test]
    fn test_specificity_is_independent_of_declaration_order() {
        let table = RouteTable::from_patterns([
            ("/test/static/:var1", "TestController2"),
            ("/test/:var1/:var2", "TestController1"),
        ]);

        assert_eq!(
            controller_for(&table, "/test/static/foo").as_deref(),
            Some("TestController2")
        );
        assert_eq!(
            controller_for(&table, "/test/dynamic/foo").as_deref(),
            Some("TestController1")
        );
    }

    #[test]
    fn test_tie_goes_to_first_declared_route() {
        let table = RouteTable::from_patterns([
            ("/items/:id", "First"),
            ("/:section/42", "Second"),
            ("/:section/:id", "Third"),
        ]);

        assert_eq!(controller_for(&table, "/items/42").as_deref(), Some("First"));

        let reversed = RouteTable::from_patterns([
            ("/:section/42", "Second"),
            ("/items/:id", "First"),
        ]);
        assert_eq!(controller_for(&reversed, "/items/42").as_deref(), Some("Second"));
    }

    #[test]
    fn test_duplicate_static_pattern_first_wins() {
        let table = RouteTable::new()
            .route("one", "/same", "One")
            .route("two", "/same", "Two");

        assert_eq!(controller_for(&table, "/same").as_deref(), Some("One"));
    }

    #[test]
    fn test_static_routes_differing_in_slashes_keep_declaration_order() {
        let table = RouteTable::new()
            .route("a", "/x/", "A")
            .route("b", "/x", "B");

        let (route, _) = resolve_in(&table, "/x").unwrap();
        assert_eq!(route.name, "a");
        let (route, _) = resolve_in(&table, "/x/").unwrap();
        assert_eq!(route.name, "a");
    }

    #[test]
    fn test_static_pattern_with_empty_segment_is_not_indexed() {
        let table = RouteTable::from_patterns([("/a//b", "Broken")]);
        assert_eq!(controller_for(&table, "/a//b"), None);
    }

    #[test]
    fn test_stats() {
        let table = RouteTable::from_patterns([
            ("/", "Home"),
            ("/users/:id", "User"),
            ("/about", "About"),
        ]);

        let stats = RouteMatcher::new(&table).stats();
        assert_eq!(
            stats,
            MatcherStats {
                static_routes: 2,
                dynamic_routes: 1,
                total_routes: 3,
            }
        );
    }
}
