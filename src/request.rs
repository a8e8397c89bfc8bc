//! Incoming HTTP request type.

use std::collections::HashMap;

use http::HeaderMap;

use crate::method::Method;

/// An incoming HTTP request, reduced to what page handlers and middleware
/// actually consume: method, path, query string, headers, and the route
/// parameters filled in after routing.
///
/// Request bodies are never read — every route on this site is a read.
pub struct Request {
    method: Method,
    path: String,
    query: Option<String>,
    headers: HeaderMap,
    params: HashMap<String, String>,
}

impl Request {
    pub(crate) fn new(
        method: Method,
        path: String,
        query: Option<String>,
        headers: HeaderMap,
    ) -> Self {
        Self { method, path, query, headers, params: HashMap::new() }
    }

    pub fn method(&self) -> Method { self.method }

    pub fn path(&self) -> &str { &self.path }

    /// Replaces the routing path. Used by middleware rewrites; the
    /// client-visible URL is untouched.
    pub(crate) fn set_path(&mut self, path: String) {
        self.path = path;
    }

    pub(crate) fn set_params(&mut self, params: HashMap<String, String>) {
        self.params = params;
    }

    /// Case-insensitive header lookup. Values that are not valid UTF-8
    /// read as absent.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Returns a named path parameter.
    ///
    /// For a route `/blog/{slug}`, `req.param("slug")` on `/blog/hello`
    /// returns `Some("hello")`.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// Returns a query-string value: `?page=2` → `req.query("page") ==
    /// Some("2")`. A key without `=` reads as the empty string.
    pub fn query(&self, key: &str) -> Option<&str> {
        self.query.as_deref()?.split('&').find_map(|pair| {
            let (k, v) = pair.split_once('=').unwrap_or((pair, ""));
            (k == key).then_some(v)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(path: &str, query: Option<&str>) -> Request {
        Request::new(
            Method::Get,
            path.to_owned(),
            query.map(str::to_owned),
            HeaderMap::new(),
        )
    }

    #[test]
    fn query_lookup() {
        let req = request("/blog", Some("page=2&tag=rust"));
        assert_eq!(req.query("page"), Some("2"));
        assert_eq!(req.query("tag"), Some("rust"));
        assert_eq!(req.query("missing"), None);
    }

    #[test]
    fn query_without_value_reads_empty() {
        let req = request("/blog", Some("page"));
        assert_eq!(req.query("page"), Some(""));
    }

    #[test]
    fn no_query_string() {
        let req = request("/blog", None);
        assert_eq!(req.query("page"), None);
    }
}
