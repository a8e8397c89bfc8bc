//! Radix-tree request router.
//!
//! One tree per HTTP method, O(path-length) lookup. Middleware layers
//! registered with [`Router::layer`] run before the lookup and may rewrite
//! the routing path; the optional fallback handler answers anything no
//! route matched.

use std::collections::HashMap;
use std::sync::Arc;

use matchit::Router as MatchitRouter;

use crate::handler::{BoxedHandler, Handler};
use crate::method::Method;
use crate::middleware::Middleware;
use crate::request::Request;

/// The application router.
///
/// Build it once at startup; pass it to [`Server::serve`](crate::Server::serve).
/// Each registration method returns `self` so calls chain naturally.
pub struct Router {
    routes: HashMap<Method, MatchitRouter<BoxedHandler>>,
    layers: Vec<Box<dyn Middleware>>,
    fallback: Option<BoxedHandler>,
}

impl Router {
    pub fn new() -> Self {
        Self { routes: HashMap::new(), layers: Vec::new(), fallback: None }
    }

    /// Register a `GET` handler. Path parameters use `{name}` syntax —
    /// `req.param("name")` retrieves them:
    ///
    /// ```rust,no_run
    /// # use stanza::{Request, Response, Router};
    /// # async fn post_page(_: Request) -> Response { Response::text("") }
    /// Router::new().get("/blog/{slug}", post_page);
    /// ```
    pub fn get(self, path: &str, handler: impl Handler) -> Self {
        self.on(Method::Get, path, handler)
    }

    /// Register a handler for an arbitrary method + path pair.
    ///
    /// # Panics
    ///
    /// Panics on a malformed or conflicting path. Routes are registered
    /// once at startup, so this fails the boot, not a request.
    pub fn on(mut self, method: Method, path: &str, handler: impl Handler) -> Self {
        self.routes
            .entry(method)
            .or_default()
            .insert(path, handler.into_boxed_handler())
            .unwrap_or_else(|e| panic!("invalid route `{path}`: {e}"));
        self
    }

    /// Attach a middleware layer. Layers run in registration order before
    /// routing; each may rewrite the routing path for the layers and the
    /// lookup that follow.
    pub fn layer(mut self, middleware: impl Middleware) -> Self {
        self.layers.push(Box::new(middleware));
        self
    }

    /// Handler invoked when no route matches. Without one, unmatched
    /// requests get an empty `404`.
    pub fn fallback(mut self, handler: impl Handler) -> Self {
        self.fallback = Some(handler.into_boxed_handler());
        self
    }

    /// Runs every layer over the request, applying rewrites in order.
    pub(crate) fn apply_layers(&self, req: &mut Request) {
        for layer in &self.layers {
            if let Some(path) = layer.rewrite(req) {
                tracing::debug!(from = %req.path(), to = %path, "request rewritten");
                req.set_path(path);
            }
        }
    }

    pub(crate) fn lookup(
        &self,
        method: Method,
        path: &str,
    ) -> Option<(BoxedHandler, HashMap<String, String>)> {
        let tree = self.routes.get(&method)?;
        let matched = tree.at(path).ok()?;
        let handler = Arc::clone(matched.value);
        let params = matched
            .params
            .iter()
            .map(|(k, v)| (k.to_owned(), v.to_owned()))
            .collect();
        Some((handler, params))
    }

    pub(crate) fn fallback_handler(&self) -> Option<BoxedHandler> {
        self.fallback.as_ref().map(Arc::clone)
    }
}

impl Default for Router {
    fn default() -> Self { Self::new() }
}
