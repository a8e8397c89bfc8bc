//! Content model and loading.
//!
//! Posts and projects are Markdown files with a YAML frontmatter block
//! fenced by `---`. Each item's slug is the file stem — stable for as long
//! as the file keeps its name, which is what makes it safe to use as the
//! URL path. Loading happens once at startup and fails fast: a malformed
//! file stops the boot with a message naming it, rather than surfacing as
//! a broken page later.
//!
//! ```text
//! content/posts/hello-world.md
//! ---
//! title: Hello, world
//! date: 2024-01-05
//! tags: [meta]
//! ---
//! First post.
//! ```

use std::fs::read_dir;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use chrono::NaiveDate;
use pulldown_cmark::{Parser, html};
use serde::Deserialize;
use serde::de::DeserializeOwned;

/// Shared metadata surface of posts and projects. The aggregation
/// utilities in [`crate::catalog`] are written against this trait so they
/// serve both collections.
pub trait ContentItem {
    fn slug(&self) -> &str;
    fn title(&self) -> &str;
    fn description(&self) -> Option<&str>;
    /// ISO-8601 date string. Ordering is plain string comparison.
    fn date(&self) -> &str;
    fn tags(&self) -> &[String];
    fn published(&self) -> bool;
}

/// A blog post.
#[derive(Clone, Debug, Deserialize)]
pub struct Post {
    #[serde(skip)]
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub date: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default = "default_published")]
    pub published: bool,
    /// Body rendered to HTML at load time.
    #[serde(skip)]
    pub body: String,
}

/// A portfolio project.
#[derive(Clone, Debug, Deserialize)]
pub struct Project {
    #[serde(skip)]
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub date: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default = "default_published")]
    pub published: bool,
    pub status: ProjectStatus,
    #[serde(default)]
    pub featured: bool,
    #[serde(default, rename = "liveUrl")]
    pub live_url: Option<String>,
    #[serde(default, rename = "githubUrl")]
    pub github_url: Option<String>,
    #[serde(skip)]
    pub body: String,
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectStatus {
    Completed,
    InProgress,
    Archived,
}

impl ProjectStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Completed => "Completed",
            Self::InProgress => "In Progress",
            Self::Archived => "Archived",
        }
    }
}

fn default_published() -> bool {
    true
}

impl ContentItem for Post {
    fn slug(&self) -> &str { &self.slug }
    fn title(&self) -> &str { &self.title }
    fn description(&self) -> Option<&str> { self.description.as_deref() }
    fn date(&self) -> &str { &self.date }
    fn tags(&self) -> &[String] { &self.tags }
    fn published(&self) -> bool { self.published }
}

impl ContentItem for Project {
    fn slug(&self) -> &str { &self.slug }
    fn title(&self) -> &str { &self.title }
    fn description(&self) -> Option<&str> { self.description.as_deref() }
    fn date(&self) -> &str { &self.date }
    fn tags(&self) -> &[String] { &self.tags }
    fn published(&self) -> bool { self.published }
}

impl Post {
    pub fn from_source(slug: &str, input: &str) -> Result<Self> {
        let (mut post, body): (Self, String) = parse_document(input)?;
        post.slug = slug.to_owned();
        post.body = body;
        Ok(post)
    }
}

impl Project {
    pub fn from_source(slug: &str, input: &str) -> Result<Self> {
        let (mut project, body): (Self, String) = parse_document(input)?;
        project.slug = slug.to_owned();
        project.body = body;
        Ok(project)
    }
}

// ── Frontmatter parsing ───────────────────────────────────────────────────────

const FENCE: &str = "---";

/// Splits a source file into its YAML frontmatter and Markdown body.
fn split_frontmatter(input: &str) -> Result<(&str, &str)> {
    let rest = input
        .strip_prefix(FENCE)
        .ok_or_else(|| anyhow!("document must begin with `---`"))?;
    let close = rest
        .find("\n---")
        .ok_or_else(|| anyhow!("missing closing `---`"))?;
    let body_start = close + 1 + FENCE.len();
    Ok((&rest[..close], &rest[body_start..]))
}

fn parse_document<T: DeserializeOwned>(input: &str) -> Result<(T, String)> {
    let (frontmatter, body) = split_frontmatter(input)?;
    let item = serde_yaml::from_str(frontmatter)?;
    let mut rendered = String::new();
    html::push_html(&mut rendered, Parser::new(body));
    Ok((item, rendered))
}

// ── Directory loading ─────────────────────────────────────────────────────────

const MARKDOWN_EXTENSION: &str = ".md";

pub fn load_posts(dir: &Path) -> Result<Vec<Post>> {
    load_dir(dir, Post::from_source)
}

pub fn load_projects(dir: &Path) -> Result<Vec<Project>> {
    load_dir(dir, Project::from_source)
}

fn load_dir<T>(dir: &Path, parse: impl Fn(&str, &str) -> Result<T>) -> Result<Vec<T>> {
    let mut items = Vec::new();
    let entries =
        read_dir(dir).with_context(|| format!("reading content directory `{}`", dir.display()))?;
    for entry in entries {
        let entry = entry?;
        let os_name = entry.file_name();
        let name = os_name.to_string_lossy();
        let Some(stem) = name.strip_suffix(MARKDOWN_EXTENSION) else {
            continue;
        };
        let input = std::fs::read_to_string(entry.path())
            .with_context(|| format!("reading `{}`", entry.path().display()))?;
        let item = parse(stem, &input)
            .with_context(|| format!("parsing `{}`", entry.path().display()))?;
        items.push(item);
    }
    Ok(items)
}

// ── Display dates ─────────────────────────────────────────────────────────────

/// Renders an ISO-8601 date as e.g. `January 5, 2024`. Datetime strings
/// are accepted (everything past the date is ignored); anything that
/// fails to parse renders verbatim.
pub fn format_date(date: &str) -> String {
    let day = date.get(..10).unwrap_or(date);
    match NaiveDate::parse_from_str(day, "%Y-%m-%d") {
        Ok(parsed) => parsed.format("%B %-d, %Y").to_string(),
        Err(_) => date.to_owned(),
    }
}
