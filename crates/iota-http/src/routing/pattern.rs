//! Route pattern parsing and matching
//!
//! Patterns are slash-delimited; each segment is either a literal or a
//! colon-variable (`/users/:id/posts/:slug`). Matching is positional: the
//! request path must have exactly as many segments as the pattern, every
//! literal must be equal byte for byte, and every variable captures its path
//! segment percent-decoded. Decoding happens after splitting, so an encoded
//! `%2F` stays inside its segment.

use std::collections::HashMap;

/// A single segment of a route pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    /// Literal text, compared case-sensitively
    Static(String),
    /// `:name` variable capturing one path segment
    Variable(String),
}

impl PathSegment {
    fn parse(segment: &str) -> Self {
        match segment.strip_prefix(':') {
            Some(name) => PathSegment::Variable(name.to_string()),
            None => PathSegment::Static(segment.to_string()),
        }
    }
}

/// Variables captured by a successful match
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatternMatch {
    pub variables: HashMap<String, String>,
    /// Number of variable segments matched; lower means more specific
    pub variable_count: usize,
}

/// Split a path into segments after trimming leading and trailing slashes.
/// An empty or all-slash path yields a single empty segment.
pub fn split_path(path: &str) -> Vec<&str> {
    path.trim_matches('/').split('/').collect()
}

/// Parsed route pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePattern {
    /// The pattern as declared
    pub original: String,
    /// Parsed segments
    pub segments: Vec<PathSegment>,
}

impl RoutePattern {
    /// Parse a pattern. Parsing never fails: malformed segments (such as the
    /// empty segment in `/a//b`) simply never match.
    pub fn parse(pattern: &str) -> Self {
        let segments = split_path(pattern)
            .into_iter()
            .map(PathSegment::parse)
            .collect();

        Self {
            original: pattern.to_string(),
            segments,
        }
    }

    /// True when the pattern has no variable segments
    pub fn is_static(&self) -> bool {
        self.segments
            .iter()
            .all(|segment| matches!(segment, PathSegment::Static(_)))
    }

    /// Names of the variable segments, in order
    pub fn variable_names(&self) -> Vec<&str> {
        self.segments
            .iter()
            .filter_map(|segment| match segment {
                PathSegment::Variable(name) => Some(name.as_str()),
                PathSegment::Static(_) => None,
            })
            .collect()
    }

    /// Number of variable segments
    pub fn variable_count(&self) -> usize {
        self.segments
            .iter()
            .filter(|segment| matches!(segment, PathSegment::Variable(_)))
            .count()
    }

    /// Match already-split path segments against this pattern
    pub fn match_segments(&self, path: &[&str]) -> Option<PatternMatch> {
        if self.segments.len() != path.len() {
            return None;
        }

        // The root pattern is the one place an empty segment is legitimate
        if self.is_root() && path == [""] {
            return Some(PatternMatch::default());
        }

        let mut matched = PatternMatch::default();
        for (segment, value) in self.segments.iter().zip(path) {
            match segment {
                PathSegment::Static(literal) if literal.is_empty() => return None,
                PathSegment::Static(literal) => {
                    if literal != value {
                        return None;
                    }
                }
                PathSegment::Variable(name) => {
                    matched.variables.insert(name.clone(), decode_segment(value));
                    matched.variable_count += 1;
                }
            }
        }

        Some(matched)
    }

    /// Match a raw path (query string already removed)
    pub fn match_path(&self, path: &str) -> Option<PatternMatch> {
        if self.static_key().as_deref() == Some(path.trim_matches('/')) {
            return Some(PatternMatch::default());
        }
        self.match_segments(&split_path(path))
    }

    /// Substitute variables into the pattern. Each variable found in `params`
    /// is percent-encoded as a path segment and removed from `params`;
    /// variables without a value are left in place.
    pub fn fill(&self, params: &mut Vec<(String, String)>) -> String {
        self.original
            .split('/')
            .map(|segment| match segment.strip_prefix(':') {
                Some(name) => match params.iter().position(|(key, _)| key == name) {
                    Some(index) => {
                        let (_, value) = params.remove(index);
                        urlencoding::encode(&value).into_owned()
                    }
                    None => segment.to_string(),
                },
                None => segment.to_string(),
            })
            .collect::<Vec<String>>()
            .join("/")
    }

    /// Lookup key for the exact-match index: the slash-trimmed pattern.
    /// `None` for patterns with variables or with an empty segment, which
    /// never match anything.
    pub fn static_key(&self) -> Option<String> {
        if !self.is_static() {
            return None;
        }
        if self.is_root() {
            return Some(String::new());
        }

        let mut key = Vec::with_capacity(self.segments.len());
        for segment in &self.segments {
            match segment {
                PathSegment::Static(literal) if !literal.is_empty() => key.push(literal.as_str()),
                _ => return None,
            }
        }
        Some(key.join("/"))
    }

    fn is_root(&self) -> bool {
        matches!(self.segments.as_slice(), [PathSegment::Static(s)] if s.is_empty())
    }
}

/// Percent-decode a captured segment. `+` is kept literally; invalid UTF-8
/// is replaced rather than rejected.
fn decode_segment(value: &str) -> String {
    match urlencoding::decode(value) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => String::from_utf8_lossy(&urlencoding::decode_binary(value.as_bytes())).into_owned(),
    }
}

/// Match `path` against `pattern` in one call
pub fn match_segments(pattern: &str, path: &str) -> Option<PatternMatch> {
    RoutePattern::parse(pattern).match_path(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(m: &PatternMatch) -> Vec<(&str, &str)> {
        let mut pairs: Vec<(&str, &str)> = m
            .variables
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        pairs.sort();
        pairs
    }

    #[test]
    fn test_parse_segments() {
        let pattern = RoutePattern::parse("/users/:id/posts/:slug");
        assert_eq!(
            pattern.segments,
            vec![
                PathSegment::Static("users".to_string()),
                PathSegment::Variable("id".to_string()),
                PathSegment::Static("posts".to_string()),
                PathSegment::Variable("slug".to_string()),
            ]
        );
        assert_eq!(pattern.variable_names(), vec!["id", "slug"]);
        assert_eq!(pattern.variable_count(), 2);
        assert!(!pattern.is_static());
        assert!(RoutePattern::parse("/about/team").is_static());
    }

    #[test]
    fn test_split_path() {
        assert_eq!(split_path("/a/b/"), vec!["a", "b"]);
        assert_eq!(split_path(""), vec![""]);
        assert_eq!(split_path("///"), vec![""]);
    }

    #[test]
    fn test_static_match() {
        assert_eq!(match_segments("/test", "/test"), Some(PatternMatch::default()));
        assert_eq!(match_segments("/test", "/test/"), Some(PatternMatch::default()));
        assert!(match_segments("/test", "/Test").is_none());
        assert!(match_segments("/test", "/foobar").is_none());
    }

    #[test]
    fn test_variables_are_percent_decoded() {
        let m = match_segments("/test/:var1/:var2", "/test/a+b/a%20b").unwrap();
        assert_eq!(m.variable_count, 2);
        assert_eq!(vars(&m), vec![("var1", "a+b"), ("var2", "a b")]);

        let m = match_segments("/files/:name", "/files/a%2Fb").unwrap();
        assert_eq!(vars(&m), vec![("name", "a/b")]);

        let m = match_segments("/files/:name", "/files/caf%C3%A9").unwrap();
        assert_eq!(vars(&m), vec![("name", "café")]);

        let m = match_segments("/files/:name", "/files/%FF").unwrap();
        assert_eq!(vars(&m), vec![("name", "\u{FFFD}")]);
    }

    #[test]
    fn test_static_key() {
        assert_eq!(RoutePattern::parse("/x/").static_key().as_deref(), Some("x"));
        assert_eq!(RoutePattern::parse("/a/b").static_key().as_deref(), Some("a/b"));
        assert_eq!(RoutePattern::parse("/").static_key().as_deref(), Some(""));
        assert_eq!(RoutePattern::parse("/a//b").static_key(), None);
        assert_eq!(RoutePattern::parse("/a/:b").static_key(), None);
    }

    #[test]
    fn test_segment_count_must_match() {
        assert!(match_segments("/test/:var1/:var2", "/test").is_none());
        assert!(match_segments("/test/:var1/:var2", "/test/a/b/c").is_none());
        assert!(match_segments("/:a", "/x/y").is_none());
    }

    #[test]
    fn test_empty_pattern_segment_never_matches() {
        let pattern = RoutePattern::parse("/a//b");
        assert!(pattern.match_segments(&["a", "", "b"]).is_none());
        assert!(pattern.match_segments(&["a", "x", "b"]).is_none());
    }

    #[test]
    fn test_root_pattern() {
        assert!(match_segments("/", "/").is_some());
        assert!(match_segments("/", "").is_some());
        assert!(match_segments("/", "/x").is_none());
    }

    #[test]
    fn test_fill_consumes_params() {
        let pattern = RoutePattern::parse("/test/:var1/:var2");
        let mut params = vec![
            ("var1".to_string(), "a path".to_string()),
            ("q".to_string(), "p".to_string()),
            ("var2".to_string(), "a=\"b\"".to_string()),
        ];

        assert_eq!(pattern.fill(&mut params), "/test/a%20path/a%3D%22b%22");
        assert_eq!(params, vec![("q".to_string(), "p".to_string())]);
    }

    #[test]
    fn test_fill_leaves_missing_variables() {
        let pattern = RoutePattern::parse("/users/:id/");
        let mut params = Vec::new();
        assert_eq!(pattern.fill(&mut params), "/users/:id/");
    }
}
