//! Site configuration.
//!
//! One YAML file (`stanza.yaml` by default) describes the whole site: who
//! it belongs to, where it binds, where the content lives, and which
//! User-Agent tokens count as command-line clients. Everything except the
//! site identity has a sensible default, so a minimal file is four lines.

use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Number of items per listing page. Newtype so serde can default it.
#[derive(Clone, Copy, Debug, Deserialize)]
pub struct PageSize(pub usize);

impl Default for PageSize {
    fn default() -> Self {
        PageSize(6)
    }
}

/// An external link shown in the page footer, the About page, and the
/// CLI banner. Order in the config file is display order.
#[derive(Clone, Debug, Deserialize)]
pub struct Link {
    pub label: String,
    pub url: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct SiteConfig {
    /// Site title, shown in the header and the banner art.
    pub name: String,

    /// Canonical base URL of the deployed site.
    pub url: String,

    #[serde(default)]
    pub description: String,

    pub author: String,

    /// Short author blurb for the About page.
    #[serde(default)]
    pub bio: String,

    #[serde(default)]
    pub links: Vec<Link>,

    #[serde(default = "default_addr")]
    pub addr: String,

    /// Directory holding `posts/` and `projects/` subdirectories.
    #[serde(default = "default_content_dir")]
    pub content_dir: PathBuf,

    #[serde(default)]
    pub page_size: PageSize,

    /// User-Agent tokens classified as command-line clients.
    #[serde(default = "default_cli_clients")]
    pub cli_clients: Vec<String>,
}

fn default_addr() -> String {
    "127.0.0.1:3000".to_owned()
}

fn default_content_dir() -> PathBuf {
    PathBuf::from("content")
}

fn default_cli_clients() -> Vec<String> {
    crate::middleware::CliBanner::DEFAULT_CLIENTS
        .iter()
        .map(|t| (*t).to_owned())
        .collect()
}

impl SiteConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("opening site config `{}`", path.display()))?;
        serde_yaml::from_reader(file)
            .with_context(|| format!("parsing site config `{}`", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_config_gets_defaults() {
        let cfg: SiteConfig = serde_yaml::from_str(
            "name: example\nurl: https://example.com\nauthor: someone\n",
        )
        .unwrap();
        assert_eq!(cfg.addr, "127.0.0.1:3000");
        assert_eq!(cfg.content_dir, PathBuf::from("content"));
        assert_eq!(cfg.page_size.0, 6);
        assert_eq!(cfg.cli_clients, vec!["curl", "wget", "httpie"]);
        assert!(cfg.links.is_empty());
    }

    #[test]
    fn full_config_round_trip() {
        let cfg: SiteConfig = serde_yaml::from_str(
            r#"
name: example
url: https://example.com
description: a blog
author: someone
bio: writes code
addr: 0.0.0.0:8080
content_dir: data
page_size: 10
cli_clients: [curl, xh]
links:
  - label: github
    url: https://github.com/someone
"#,
        )
        .unwrap();
        assert_eq!(cfg.addr, "0.0.0.0:8080");
        assert_eq!(cfg.page_size.0, 10);
        assert_eq!(cfg.cli_clients, vec!["curl", "xh"]);
        assert_eq!(cfg.links[0].label, "github");
    }
}
