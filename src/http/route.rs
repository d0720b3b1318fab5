//! # Route Table
//!
//! Holds `(method, pattern, handler, user-data)` tuples and answers
//! whether a request matches one, binding path parameters in the
//! process. Patterns are immutable once registered; the table is
//! append-only while the server runs — there is no `unregister`.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::info;

use crate::http::message::{Request, Response};
use crate::http::method::Method;

pub type Handler = Arc<dyn Fn(&Request) -> Response + Send + Sync>;

struct Route {
    method: Method,
    pattern: String,
    handler: Handler,
}

/// First-match-wins table of registered routes.
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self { routes: Vec::new() }
    }

    pub fn register<F>(&mut self, method: Method, pattern: impl Into<String>, handler: F)
    where
        F: Fn(&Request) -> Response + Send + Sync + 'static,
    {
        let pattern = pattern.into();
        info!("route registered: {} {}", method, pattern);
        self.routes.push(Route {
            method,
            pattern,
            handler: Arc::new(handler),
        });
    }

    /// Finds the first registered route matching `method`/`path`, returning
    /// its handler and the path parameters bound from the match.
    pub fn find(&self, method: Method, path: &str) -> Option<(Handler, HashMap<String, String>)> {
        self.routes
            .iter()
            .find(|route| route.method == method && pattern_matches(&route.pattern, path))
            .map(|route| (Arc::clone(&route.handler), extract_params(&route.pattern, path)))
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::new()
    }
}

fn strip_leading_slash(s: &str) -> &str {
    s.strip_prefix('/').unwrap_or(s)
}

/// Exact match is tried first as a fast path; only patterns containing a
/// `:` segment fall through to segment-wise comparison.
fn pattern_matches(pattern: &str, path: &str) -> bool {
    if pattern == path {
        return true;
    }

    if !pattern.contains(':') {
        return false;
    }

    let mut pattern_segments = strip_leading_slash(pattern).split('/');
    let mut path_segments = strip_leading_slash(path).split('/');

    loop {
        match (pattern_segments.next(), path_segments.next()) {
            (Some(p), Some(s)) => {
                if !p.starts_with(':') && p != s {
                    return false;
                }
                if p.starts_with(':') && s.is_empty() {
                    return false;
                }
            }
            (None, None) => return true,
            _ => return false,
        }
    }
}

fn extract_params(pattern: &str, path: &str) -> HashMap<String, String> {
    let mut params = HashMap::new();

    let pattern_segments = strip_leading_slash(pattern).split('/');
    let path_segments = strip_leading_slash(path).split('/');

    for (p, s) in pattern_segments.zip(path_segments) {
        if let Some(name) = p.strip_prefix(':') {
            params.insert(name.to_string(), s.to_string());
        }
    }

    params
}

#[cfg(test)]
mod tests {
    use super::*;

    fn handler(_: &Request) -> Response {
        Response::ok()
    }

    #[test]
    fn exact_pattern_matches_exact_path() {
        assert!(pattern_matches("/api/status", "/api/status"));
        assert!(!pattern_matches("/api/status", "/api/other"));
    }

    #[test]
    fn parameterized_pattern_matches_and_binds() {
        assert!(pattern_matches("/api/users/:id", "/api/users/42"));
        let params = extract_params("/api/users/:id", "/api/users/42");
        assert_eq!(params.get("id").map(String::as_str), Some("42"));
    }

    #[test]
    fn multiple_params_bind_independently() {
        let params = extract_params("/a/:x/b/:y", "/a/u/b/v");
        assert_eq!(params.get("x").map(String::as_str), Some("u"));
        assert_eq!(params.get("y").map(String::as_str), Some("v"));
    }

    #[test]
    fn mismatched_segment_count_does_not_match() {
        assert!(!pattern_matches("/a/:x", "/a/x/y"));
        assert!(!pattern_matches("/a/:x/b", "/a/x"));
    }

    #[test]
    fn empty_segment_does_not_satisfy_a_param() {
        assert!(!pattern_matches("/api/users/:id", "/api/users/"));
    }

    #[test]
    fn first_registered_match_wins() {
        let mut table = RouteTable::new();
        table.register(Method::Get, "/api/:anything", handler);
        table.register(Method::Get, "/api/status", handler);

        let (_, params) = table.find(Method::Get, "/api/status").unwrap();
        assert_eq!(params.get("anything").map(String::as_str), Some("status"));
    }

    #[test]
    fn method_mismatch_is_a_miss() {
        let mut table = RouteTable::new();
        table.register(Method::Get, "/api/status", handler);
        assert!(table.find(Method::Post, "/api/status").is_none());
    }
}
