//! Middleware layer.
//!
//! Middleware inspects every request before routing and is the right place
//! for cross-cutting concerns that must see the request regardless of which
//! page it targets. The only hook offered is the one the site needs:
//! deciding, per request, whether to *rewrite* the routing path — an
//! internal substitution of the handler, invisible to the client (no
//! redirect, no extra round trip).
//!
//! Middleware runs before any page handler, cannot fail (the hook returns
//! an `Option`, not a `Result`), and holds no per-request state.

mod cli;

pub use cli::{BANNER_PATH, CliBanner};

use crate::request::Request;

/// A pre-routing request inspector.
///
/// Returning `Some(path)` reroutes the request to `path`; returning `None`
/// passes it through untouched. Later layers see the rewritten path.
pub trait Middleware: Send + Sync + 'static {
    fn rewrite(&self, req: &Request) -> Option<String>;
}
