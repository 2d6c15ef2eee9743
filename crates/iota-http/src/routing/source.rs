//! Route sources
//!
//! Anything that can produce a [`RouteTable`] before the router is built: a
//! literal table or a plain-text route file.

use super::table::{Route, RouteTable};
use crate::errors::{HttpError, HttpResult};
use std::path::{Path, PathBuf};

/// Supplies the route table a router is built from
pub trait RouteSource {
    fn load_routes(&self) -> HttpResult<RouteTable>;
}

impl RouteSource for RouteTable {
    fn load_routes(&self) -> HttpResult<RouteTable> {
        Ok(self.clone())
    }
}

/// Reads routes from a whitespace-separated text file.
///
/// Each line is either `name pattern controller` or `pattern controller`
/// (the route is then named by its pattern). Lines starting with `#`, blank
/// lines and lines with the wrong number of columns are skipped.
///
/// ```text
/// # name        pattern          controller
/// home          /                HomeController
/// user.show     /users/:id       UserController
/// /about                         PageController
/// ```
#[derive(Debug, Clone)]
pub struct FileRouteSource {
    path: PathBuf,
}

impl FileRouteSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parse route file content
    pub fn parse(content: &str) -> RouteTable {
        let mut table = RouteTable::new();

        for (number, line) in content.lines().enumerate() {
            let columns: Vec<&str> = line.split_whitespace().collect();
            let route = match columns.as_slice() {
                [] => continue,
                [first, ..] if first.starts_with('#') => continue,
                [pattern, controller] => Route::unnamed(*pattern, *controller),
                [name, pattern, controller] => Route::new(*name, *pattern, *controller),
                _ => {
                    tracing::warn!(
                        "Skipping malformed route on line {}: '{}'",
                        number + 1,
                        line.trim()
                    );
                    continue;
                }
            };
            table.insert(route);
        }

        table
    }
}

impl RouteSource for FileRouteSource {
    fn load_routes(&self) -> HttpResult<RouteTable> {
        let content = std::fs::read_to_string(&self.path)
            .map_err(|err| HttpError::route_source(self.path.display().to_string(), err))?;

        let table = Self::parse(&content);
        tracing::debug!(
            "Loaded {} routes from {}",
            table.len(),
            self.path.display()
        );
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_named_and_unnamed_lines() {
        let table = FileRouteSource::parse(
            "# comment line\n\
             home   /            HomeController\n\
             \n\
             /this/is/a/valid/route\tMapsToThisController\n\
             lonely\n\
             too many columns here\n",
        );

        assert_eq!(table.len(), 2);
        assert_eq!(table.get("home").unwrap().pattern, "/");
        assert_eq!(
            table.get("/this/is/a/valid/route").unwrap().controller,
            "MapsToThisController"
        );
    }

    #[test]
    fn test_later_duplicate_name_replaces_earlier() {
        let table = FileRouteSource::parse("a /one One\nb /two Two\na /uno Uno\n");

        let routes: Vec<&str> = table.iter().map(|r| r.pattern.as_str()).collect();
        assert_eq!(routes, vec!["/uno", "/two"]);
    }

    #[test]
    fn test_static_table_is_its_own_source() {
        let table = RouteTable::from_patterns([("/test", "TestController")]);
        assert_eq!(table.load_routes().unwrap(), table);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = FileRouteSource::new(dir.path().join("nonExistent"));

        match source.load_routes() {
            Err(HttpError::RouteSource { source_name, .. }) => {
                assert!(source_name.ends_with("nonExistent"))
            }
            other => panic!("expected route source error, got {:?}", other),
        }
    }
}
