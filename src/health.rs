//! Liveness probe handler.
//!
//! The reverse proxy in front of the site polls `/healthz` to decide
//! whether to keep routing traffic here. Register it on the router:
//!
//! ```rust,no_run
//! use stanza::{Router, health};
//!
//! let app = Router::new().get("/healthz", health::liveness);
//! ```

use crate::{Request, Response};

/// Always returns `200 OK` with body `"ok"`. Content is loaded before the
/// server binds, so if the process answers HTTP at all it can serve pages —
/// this handler intentionally has no dependencies.
pub async fn liveness(_req: Request) -> Response {
    Response::text("ok")
}
