//! # stanza
//!
//! A personal blog and portfolio server. Nothing more. Nothing less.
//!
//! ## The shape of it
//!
//! Content is Markdown with YAML frontmatter, loaded once at boot. Pages
//! are built per request from pure views over those collections — sorted
//! listings, tag buckets, paginated slices ([`catalog`]). The HTTP side
//! is deliberately small: a radix-tree router over typed async handlers,
//! middleware that runs before routing, graceful shutdown. TLS,
//! compression, and caching belong to the reverse proxy in front.
//!
//! The one piece of personality: requests from command-line HTTP clients
//! (`curl`, `wget`, `httpie`) are detected by [`middleware::CliBanner`]
//! and internally rerouted to a plain-text ASCII banner instead of HTML —
//! same URL, different answer.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use std::path::Path;
//! use std::sync::Arc;
//! use stanza::catalog::Catalog;
//! use stanza::config::SiteConfig;
//! use stanza::middleware::CliBanner;
//! use stanza::pages::{self, Site};
//! use stanza::Server;
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = SiteConfig::load(Path::new("stanza.yaml")).unwrap();
//!     let posts = stanza::content::load_posts(&config.content_dir.join("posts")).unwrap();
//!     let projects = stanza::content::load_projects(&config.content_dir.join("projects")).unwrap();
//!
//!     let cli = CliBanner::new(&config.cli_clients);
//!     let addr = config.addr.clone();
//!     let site = Arc::new(Site { config, catalog: Catalog::new(posts, projects) });
//!
//!     let app = pages::router(Arc::clone(&site)).layer(cli);
//!     Server::bind(&addr).serve(app).await.unwrap();
//! }
//! ```

mod error;
mod handler;
mod method;
mod request;
mod response;
mod router;
mod server;
mod status;

pub mod banner;
pub mod catalog;
pub mod config;
pub mod content;
pub mod health;
pub mod middleware;
pub mod pages;

pub use error::Error;
pub use handler::Handler;
pub use method::Method;
pub use request::Request;
pub use response::{IntoResponse, Response};
pub use router::Router;
pub use server::Server;
pub use status::Status;
