//! Page handlers and the site route table.
//!
//! Every handler builds plain semantic HTML through the shared
//! [`layout`] chrome — no template engine, no stylesheet. The interesting
//! work (ordering, tag buckets, pagination) all lives in
//! [`crate::catalog`]; handlers just pick views and print them.

use std::fmt::Write as _;
use std::future::Future;
use std::sync::Arc;

use crate::banner;
use crate::catalog::{self, Catalog, TagCounts};
use crate::config::SiteConfig;
use crate::content::{Post, Project, format_date};
use crate::health;
use crate::middleware::BANNER_PATH;
use crate::request::Request;
use crate::response::Response;
use crate::router::Router;
use crate::status::Status;

/// Everything a handler needs, shared read-only across requests.
pub struct Site {
    pub config: SiteConfig,
    pub catalog: Catalog,
}

/// Builds the full route table. Middleware layers are attached by the
/// caller, after this.
pub fn router(site: Arc<Site>) -> Router {
    Router::new()
        .get("/", with_site(&site, home))
        .get("/about", with_site(&site, about))
        .get("/blog", with_site(&site, blog_index))
        .get("/blog/{slug}", with_site(&site, post_page))
        .get("/projects", with_site(&site, projects_index))
        .get("/projects/{slug}", with_site(&site, project_page))
        .get("/tags", with_site(&site, tags_index))
        .get("/tags/{tag}", with_site(&site, tag_page))
        .get(BANNER_PATH, with_site(&site, cli_banner))
        .get("/healthz", health::liveness)
        .fallback(with_site(&site, not_found))
}

/// Adapts a two-argument page function into the `Fn(Request)` shape the
/// router stores, closing over the shared site state.
fn with_site<F, Fut>(
    site: &Arc<Site>,
    page: F,
) -> impl Fn(Request) -> Fut + Send + Sync + 'static
where
    F: Fn(Request, Arc<Site>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Response> + Send + 'static,
{
    let site = Arc::clone(site);
    move |req| page(req, Arc::clone(&site))
}

// ── Handlers ──────────────────────────────────────────────────────────────────

const HOME_RECENT: usize = 5;

async fn home(_req: Request, site: Arc<Site>) -> Response {
    let posts = catalog::by_date_desc(site.catalog.published_posts());
    let recent = catalog::paginate(&posts, HOME_RECENT, 1);

    let mut body = String::new();
    let _ = writeln!(body, "<p>{}</p>", esc(&site.config.description));
    body.push_str("<h2>Recent posts</h2>\n");
    if recent.is_empty() {
        body.push_str("<p>Nothing here yet.</p>\n");
    } else {
        body.push_str("<ul>\n");
        for post in recent {
            let _ = writeln!(
                body,
                r#"<li><a href="/blog/{}">{}</a> <time>{}</time></li>"#,
                post.slug,
                esc(&post.title),
                format_date(&post.date),
            );
        }
        body.push_str("</ul>\n");
    }
    layout(&site, &site.config.name, &body)
}

async fn about(_req: Request, site: Arc<Site>) -> Response {
    let mut body = String::new();
    let _ = writeln!(body, "<h1>About</h1>");
    let _ = writeln!(body, "<p><strong>{}</strong></p>", esc(&site.config.author));
    if !site.config.bio.is_empty() {
        let _ = writeln!(body, "<p>{}</p>", esc(&site.config.bio));
    }
    if !site.config.links.is_empty() {
        body.push_str("<ul>\n");
        for link in &site.config.links {
            let _ = writeln!(
                body,
                r#"<li><a href="{}">{}</a></li>"#,
                esc(&link.url),
                esc(&link.label),
            );
        }
        body.push_str("</ul>\n");
    }
    layout(&site, "About", &body)
}

async fn blog_index(req: Request, site: Arc<Site>) -> Response {
    let posts = catalog::by_date_desc(site.catalog.published_posts());
    let page = catalog::parse_page(req.query("page"));
    let page_size = site.config.page_size.0;
    let shown = catalog::paginate(&posts, page_size, page);

    let mut body = String::new();
    body.push_str("<h1>Blog</h1>\n");
    if shown.is_empty() {
        body.push_str("<p>No posts to show yet.</p>\n");
    } else {
        for &post in shown {
            body.push_str(&post_list_item(post));
        }
    }
    body.push_str(&pagination_nav(
        "/blog",
        page,
        catalog::page_count(posts.len(), page_size),
    ));
    body.push_str(&tag_sidebar(&catalog::tag_counts(&posts)));
    layout(&site, "Blog", &body)
}

async fn post_page(req: Request, site: Arc<Site>) -> Response {
    let Some(post) = req.param("slug").and_then(|slug| site.catalog.post(slug)) else {
        return not_found(req, Arc::clone(&site)).await;
    };

    let mut body = String::new();
    let _ = writeln!(body, "<article>");
    let _ = writeln!(body, "<h1>{}</h1>", esc(&post.title));
    let _ = writeln!(body, "<time>{}</time>", format_date(&post.date));
    body.push_str(&tag_line(&post.tags));
    if let Some(description) = &post.description {
        let _ = writeln!(body, "<p><em>{}</em></p>", esc(description));
    }
    body.push_str(&post.body);
    body.push_str("</article>\n");
    layout(&site, &post.title, &body)
}

async fn projects_index(req: Request, site: Arc<Site>) -> Response {
    let projects = catalog::projects_display_order(site.catalog.published_projects());
    let page = catalog::parse_page(req.query("page"));
    let page_size = site.config.page_size.0;
    let shown = catalog::paginate(&projects, page_size, page);

    let mut body = String::new();
    body.push_str("<h1>Projects</h1>\n");
    if shown.is_empty() {
        body.push_str("<p>No projects to show yet.</p>\n");
    } else {
        for &project in shown {
            body.push_str(&project_list_item(project));
        }
    }
    body.push_str(&pagination_nav(
        "/projects",
        page,
        catalog::page_count(projects.len(), page_size),
    ));
    body.push_str(&tag_sidebar(&catalog::tag_counts(&projects)));
    layout(&site, "Projects", &body)
}

async fn project_page(req: Request, site: Arc<Site>) -> Response {
    let Some(project) = req.param("slug").and_then(|slug| site.catalog.project(slug)) else {
        return not_found(req, Arc::clone(&site)).await;
    };

    let mut body = String::new();
    let _ = writeln!(body, "<article>");
    let _ = writeln!(
        body,
        "<h1>{}{}</h1>",
        esc(&project.title),
        if project.featured { " ★" } else { "" },
    );
    let _ = writeln!(
        body,
        "<p>{} · <time>{}</time></p>",
        project.status.label(),
        format_date(&project.date),
    );
    body.push_str(&tag_line(&project.tags));
    if let Some(description) = &project.description {
        let _ = writeln!(body, "<p><em>{}</em></p>", esc(description));
    }
    let mut links = String::new();
    if let Some(url) = &project.live_url {
        let _ = write!(links, r#"<a href="{}">Live demo</a> "#, esc(url));
    }
    if let Some(url) = &project.github_url {
        let _ = write!(links, r#"<a href="{}">View code</a>"#, esc(url));
    }
    if !links.is_empty() {
        let _ = writeln!(body, "<p>{}</p>", links.trim_end());
    }
    body.push_str(&project.body);
    body.push_str("</article>\n");
    layout(&site, &project.title, &body)
}

async fn tags_index(_req: Request, site: Arc<Site>) -> Response {
    let mut counts = catalog::tag_counts(&site.catalog.published_posts());
    for (tag, n) in catalog::tag_counts(&site.catalog.published_projects()) {
        *counts.entry(tag).or_insert(0) += n;
    }

    let mut body = String::new();
    body.push_str("<h1>Tags</h1>\n");
    if counts.is_empty() {
        body.push_str("<p>Nothing has been tagged yet.</p>\n");
    } else {
        body.push_str("<ul>\n");
        for tag in catalog::tags_by_count(&counts) {
            let _ = writeln!(
                body,
                r#"<li><a href="/tags/{}">{}</a> ({})</li>"#,
                catalog::tag_slug(&tag),
                esc(&tag),
                counts[&tag],
            );
        }
        body.push_str("</ul>\n");
    }
    layout(&site, "Tags", &body)
}

async fn tag_page(req: Request, site: Arc<Site>) -> Response {
    let target = req.param("tag").unwrap_or_default().to_owned();
    let posts = catalog::with_tag_slug(
        catalog::by_date_desc(site.catalog.published_posts()),
        &target,
    );
    let projects = catalog::with_tag_slug(
        catalog::projects_display_order(site.catalog.published_projects()),
        &target,
    );

    let mut body = String::new();
    let _ = writeln!(body, "<h1>Tagged: {}</h1>", esc(&target));
    if posts.is_empty() && projects.is_empty() {
        body.push_str("<p>Nothing found for this tag.</p>\n");
    }
    if !posts.is_empty() {
        body.push_str("<h2>Posts</h2>\n");
        for post in posts {
            body.push_str(&post_list_item(post));
        }
    }
    if !projects.is_empty() {
        body.push_str("<h2>Projects</h2>\n");
        for project in projects {
            body.push_str(&project_list_item(project));
        }
    }
    layout(&site, &target, &body)
}

async fn cli_banner(_req: Request, site: Arc<Site>) -> Response {
    Response::text(banner::render(&site.config))
}

async fn not_found(_req: Request, site: Arc<Site>) -> Response {
    let code = Status::NotFound;
    let body = format!(
        "<h1>{} {}</h1>\n<p>That page doesn't exist. <a href=\"/\">Back home.</a></p>\n",
        code.as_u16(),
        code.reason(),
    );
    layout_with_status(&site, code.reason(), &body, code)
}

// ── HTML chrome ───────────────────────────────────────────────────────────────

fn layout(site: &Site, title: &str, body: &str) -> Response {
    layout_with_status(site, title, body, Status::Ok)
}

fn layout_with_status(site: &Site, title: &str, body: &str, status: Status) -> Response {
    let mut page = String::with_capacity(body.len() + 1024);
    page.push_str("<!doctype html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    let _ = writeln!(
        page,
        "<title>{} · {}</title>",
        esc(title),
        esc(&site.config.name),
    );
    page.push_str("</head>\n<body>\n<header>\n");
    let _ = writeln!(page, "<strong>{}</strong>", esc(&site.config.name));
    page.push_str(
        "<nav><a href=\"/\">Home</a> <a href=\"/blog\">Blog</a> \
         <a href=\"/projects\">Projects</a> <a href=\"/tags\">Tags</a> \
         <a href=\"/about\">About</a></nav>\n",
    );
    page.push_str("</header>\n<main>\n");
    page.push_str(body);
    page.push_str("</main>\n<footer>\n");
    for link in &site.config.links {
        let _ = write!(page, "<a href=\"{}\">{}</a> ", esc(&link.url), esc(&link.label));
    }
    page.push_str("\n</footer>\n</body>\n</html>\n");
    Response::builder().status(status).html(page)
}

fn post_list_item(post: &Post) -> String {
    let mut item = String::new();
    let _ = writeln!(
        item,
        r#"<section><h2><a href="/blog/{}">{}</a></h2>"#,
        post.slug,
        esc(&post.title),
    );
    let _ = writeln!(item, "<time>{}</time>", format_date(&post.date));
    if let Some(description) = &post.description {
        let _ = writeln!(item, "<p>{}</p>", esc(description));
    }
    item.push_str(&tag_line(&post.tags));
    item.push_str("</section>\n");
    item
}

fn project_list_item(project: &Project) -> String {
    let mut item = String::new();
    let _ = writeln!(
        item,
        r#"<section><h2><a href="/projects/{}">{}</a>{}</h2>"#,
        project.slug,
        esc(&project.title),
        if project.featured { " ★" } else { "" },
    );
    let _ = writeln!(
        item,
        "<p>{} · <time>{}</time></p>",
        project.status.label(),
        format_date(&project.date),
    );
    if let Some(description) = &project.description {
        let _ = writeln!(item, "<p>{}</p>", esc(description));
    }
    item.push_str(&tag_line(&project.tags));
    item.push_str("</section>\n");
    item
}

/// Inline list of tag links, empty string for untagged items.
fn tag_line(tags: &[String]) -> String {
    if tags.is_empty() {
        return String::new();
    }
    let mut line = String::from("<p>");
    for tag in tags {
        let _ = write!(
            line,
            r#"<a href="/tags/{}">#{}</a> "#,
            catalog::tag_slug(tag),
            esc(tag),
        );
    }
    let trimmed = line.trim_end().len();
    line.truncate(trimmed);
    line.push_str("</p>\n");
    line
}

/// The tag cloud shown next to listings, most used first.
fn tag_sidebar(counts: &TagCounts) -> String {
    if counts.is_empty() {
        return String::new();
    }
    let mut aside = String::from("<aside><h2>Tags</h2>\n<ul>\n");
    for tag in catalog::tags_by_count(counts) {
        let _ = writeln!(
            aside,
            r#"<li><a href="/tags/{}">{}</a> ({})</li>"#,
            catalog::tag_slug(&tag),
            esc(&tag),
            counts[&tag],
        );
    }
    aside.push_str("</ul>\n</aside>\n");
    aside
}

fn pagination_nav(base: &str, page: usize, total_pages: usize) -> String {
    if total_pages <= 1 {
        return String::new();
    }
    let mut nav = String::from("<nav>");
    if page > 1 {
        let _ = write!(nav, r#"<a href="{base}?page={}">Newer</a> "#, page - 1);
    }
    let _ = write!(nav, "page {page} of {total_pages}");
    if page < total_pages {
        let _ = write!(nav, r#" <a href="{base}?page={}">Older</a>"#, page + 1);
    }
    nav.push_str("</nav>\n");
    nav
}

fn esc(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ProjectStatus;
    use http::HeaderMap;
    use std::collections::HashMap;

    fn request(path: &str, query: Option<&str>, params: &[(&str, &str)]) -> Request {
        let mut req = Request::new(
            crate::Method::Get,
            path.to_owned(),
            query.map(str::to_owned),
            HeaderMap::new(),
        );
        let params: HashMap<String, String> = params
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        req.set_params(params);
        req
    }

    fn site() -> Arc<Site> {
        let config: SiteConfig = serde_yaml::from_str(
            "name: example\nurl: https://example.com\ndescription: a blog\nauthor: someone\n",
        )
        .unwrap();
        let posts = vec![
            Post {
                slug: "hello".to_owned(),
                title: "Hello, world".to_owned(),
                description: Some("first".to_owned()),
                date: "2024-01-05".to_owned(),
                tags: vec!["Meta".to_owned()],
                published: true,
                body: "<p>hi</p>".to_owned(),
            },
            Post {
                slug: "draft".to_owned(),
                title: "Unfinished".to_owned(),
                description: None,
                date: "2024-02-01".to_owned(),
                tags: Vec::new(),
                published: false,
                body: String::new(),
            },
        ];
        let projects = vec![Project {
            slug: "widget".to_owned(),
            title: "Widget".to_owned(),
            description: None,
            date: "2023-06-01".to_owned(),
            tags: vec!["Rust".to_owned()],
            published: true,
            status: ProjectStatus::Completed,
            featured: true,
            live_url: Some("https://widget.example".to_owned()),
            github_url: None,
            body: String::new(),
        }];
        Arc::new(Site { config, catalog: Catalog::new(posts, projects) })
    }

    fn body_text(res: &Response) -> String {
        String::from_utf8(res.body.clone()).unwrap()
    }

    #[tokio::test]
    async fn blog_index_lists_published_only() {
        let res = blog_index(request("/blog", None, &[]), site()).await;
        let html = body_text(&res);
        assert!(html.contains("Hello, world"));
        assert!(!html.contains("Unfinished"));
    }

    #[tokio::test]
    async fn post_detail_renders_body() {
        let res = post_page(request("/blog/hello", None, &[("slug", "hello")]), site()).await;
        assert_eq!(res.status, Status::Ok);
        assert!(body_text(&res).contains("<p>hi</p>"));
    }

    #[tokio::test]
    async fn draft_detail_is_not_found() {
        let res = post_page(request("/blog/draft", None, &[("slug", "draft")]), site()).await;
        assert_eq!(res.status, Status::NotFound);
    }

    #[tokio::test]
    async fn unknown_tag_renders_empty_state() {
        let res = tag_page(request("/tags/zig", None, &[("tag", "zig")]), site()).await;
        assert_eq!(res.status, Status::Ok);
        assert!(body_text(&res).contains("Nothing found"));
    }

    #[tokio::test]
    async fn tag_page_spans_posts_and_projects() {
        let res = tag_page(request("/tags/rust", None, &[("tag", "rust")]), site()).await;
        let html = body_text(&res);
        assert!(html.contains("Widget"));
        assert!(!html.contains("Hello, world"));
    }

    #[tokio::test]
    async fn banner_is_plain_text() {
        let res = cli_banner(request("/curl-response", None, &[]), site()).await;
        assert!(res
            .headers
            .iter()
            .any(|(k, v)| k == "content-type" && v.starts_with("text/plain")));
        assert!(body_text(&res).contains("example"));
    }

    #[tokio::test]
    async fn project_detail_shows_status_and_star() {
        let res =
            project_page(request("/projects/widget", None, &[("slug", "widget")]), site()).await;
        let html = body_text(&res);
        assert!(html.contains("Completed"));
        assert!(html.contains("★"));
        assert!(html.contains("Live demo"));
    }
}
