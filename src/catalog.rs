//! Listing and tag aggregation.
//!
//! Pure views over the loaded content: nothing here mutates the catalog or
//! holds state between requests. Every listing page builds what it needs
//! from these functions per request — with a couple hundred content items
//! that is cheaper than any caching scheme would be to get right.
//!
//! Tags are free-text in frontmatter (`Go`, `go`, `Go!` are all valid
//! spellings). Aggregation lower-cases them; routing and filtering compare
//! *slugified* forms, so spellings that collapse to the same slug land in
//! the same bucket instead of silently splitting.

use std::collections::HashMap;

use crate::content::{ContentItem, Post, Project};

/// Lower-cased tag → number of occurrences across a collection.
pub type TagCounts = HashMap<String, usize>;

/// The loaded content collections, shared read-only across requests.
pub struct Catalog {
    posts: Vec<Post>,
    projects: Vec<Project>,
}

impl Catalog {
    pub fn new(posts: Vec<Post>, projects: Vec<Project>) -> Self {
        Self { posts, projects }
    }

    /// Published posts, unordered. Drafts never leave this module.
    pub fn published_posts(&self) -> Vec<&Post> {
        self.posts.iter().filter(|p| p.published).collect()
    }

    pub fn published_projects(&self) -> Vec<&Project> {
        self.projects.iter().filter(|p| p.published).collect()
    }

    /// Looks up a published post by slug. Drafts read as absent.
    pub fn post(&self, slug: &str) -> Option<&Post> {
        self.posts.iter().find(|p| p.published && p.slug == slug)
    }

    pub fn project(&self, slug: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.published && p.slug == slug)
    }
}

// ── Ordering ──────────────────────────────────────────────────────────────────

/// Most recent first. ISO-8601 dates order correctly under plain string
/// comparison; a malformed date sorts wherever the comparison puts it.
pub fn by_date_desc<'a, T: ContentItem>(mut items: Vec<&'a T>) -> Vec<&'a T> {
    items.sort_by(|a, b| b.date().cmp(a.date()));
    items
}

/// Display order for the projects page: featured work first as a block,
/// then everything else, each block most recent first. Featured-ness
/// always beats recency.
pub fn projects_display_order(mut projects: Vec<&Project>) -> Vec<&Project> {
    projects.sort_by(|a, b| {
        b.featured
            .cmp(&a.featured)
            .then_with(|| b.date.cmp(&a.date))
    });
    projects
}

// ── Tags ──────────────────────────────────────────────────────────────────────

/// Counts tag occurrences across a collection, lower-casing each spelling.
/// Items without tags contribute nothing.
pub fn tag_counts<T: ContentItem>(items: &[&T]) -> TagCounts {
    let mut counts = TagCounts::new();
    for item in items {
        for tag in item.tags() {
            *counts.entry(tag.to_lowercase()).or_insert(0) += 1;
        }
    }
    counts
}

/// Tag keys ordered by descending count. The relative order of equal
/// counts is unspecified.
pub fn tags_by_count(counts: &TagCounts) -> Vec<String> {
    let mut tags: Vec<String> = counts.keys().cloned().collect();
    tags.sort_by(|a, b| counts[b].cmp(&counts[a]));
    tags
}

/// URL-safe form of a tag: normalise case, then slugify. Two explicit
/// steps so each is testable on its own.
pub fn tag_slug(tag: &str) -> String {
    let normalized = tag.to_lowercase();
    slug::slugify(normalized)
}

/// Items where at least one tag slugifies to `target`. Comparison is on
/// slugs, not raw strings, so `Go!` and `go` match the same bucket.
pub fn with_tag_slug<'a, T: ContentItem>(items: Vec<&'a T>, target: &str) -> Vec<&'a T> {
    items
        .into_iter()
        .filter(|item| item.tags().iter().any(|tag| tag_slug(tag) == target))
        .collect()
}

// ── Pagination ────────────────────────────────────────────────────────────────

/// The 1-based `page`-th slice of `page_size` items. Page 0 reads as page
/// 1; a page past the end yields an empty slice, not an error.
pub fn paginate<T>(items: &[T], page_size: usize, page: usize) -> &[T] {
    let start = page_size.saturating_mul(page.saturating_sub(1));
    if start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(page_size).min(items.len());
    &items[start..end]
}

pub fn page_count(total: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    total.div_ceil(page_size)
}

/// Parses a `?page=` query value. Missing, non-numeric, or zero values
/// all default to the first page.
pub fn parse_page(raw: Option<&str>) -> usize {
    raw.and_then(|s| s.parse::<usize>().ok())
        .filter(|&page| page >= 1)
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ProjectStatus;

    fn post(slug: &str, date: &str, tags: &[&str], published: bool) -> Post {
        Post {
            slug: slug.to_owned(),
            title: slug.to_owned(),
            description: None,
            date: date.to_owned(),
            tags: tags.iter().map(|t| (*t).to_owned()).collect(),
            published,
            body: String::new(),
        }
    }

    fn project(slug: &str, date: &str, featured: bool) -> Project {
        Project {
            slug: slug.to_owned(),
            title: slug.to_owned(),
            description: None,
            date: date.to_owned(),
            tags: Vec::new(),
            published: true,
            status: ProjectStatus::Completed,
            featured,
            live_url: None,
            github_url: None,
            body: String::new(),
        }
    }

    #[test]
    fn newest_first() {
        let a = post("a", "2023-01-01", &[], true);
        let b = post("b", "2024-06-01", &[], true);
        let c = post("c", "2024-01-01", &[], true);
        let sorted = by_date_desc(vec![&a, &b, &c]);
        let slugs: Vec<&str> = sorted.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, ["b", "c", "a"]);
    }

    #[test]
    fn sorting_is_idempotent() {
        let a = post("a", "2023-01-01", &[], true);
        let b = post("b", "2024-06-01", &[], true);
        let once = by_date_desc(vec![&a, &b]);
        let twice = by_date_desc(once.clone());
        let order = |v: &[&Post]| v.iter().map(|p| p.slug.clone()).collect::<Vec<_>>();
        assert_eq!(order(&once), order(&twice));
    }

    #[test]
    fn featured_beats_recency() {
        let old_featured = project("old", "2023-01-01", true);
        let new_plain = project("new", "2024-01-01", false);
        let sorted = projects_display_order(vec![&new_plain, &old_featured]);
        let slugs: Vec<&str> = sorted.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, ["old", "new"]);
    }

    #[test]
    fn tag_counts_merge_case_variants() {
        let a = post("a", "2024-01-01", &["Go", "go"], true);
        let b = post("b", "2024-01-02", &["Rust"], true);
        let counts = tag_counts(&[&a, &b]);
        assert_eq!(counts.get("go"), Some(&2));
        assert_eq!(counts.get("rust"), Some(&1));
        assert_eq!(counts.len(), 2);
    }

    #[test]
    fn untagged_items_contribute_nothing() {
        let a = post("a", "2024-01-01", &[], true);
        assert!(tag_counts(&[&a]).is_empty());
    }

    #[test]
    fn tags_order_by_descending_count() {
        let a = post("a", "2024-01-01", &["rust", "web"], true);
        let b = post("b", "2024-01-02", &["rust", "web"], true);
        let c = post("c", "2024-01-03", &["rust"], true);
        let counts = tag_counts(&[&a, &b, &c]);
        assert_eq!(tags_by_count(&counts), ["rust", "web"]);
    }

    #[test]
    fn slug_matching_survives_punctuation_and_case() {
        let a = post("a", "2024-01-01", &["Go!"], true);
        let b = post("b", "2024-01-02", &["C++"], true);
        let matched = with_tag_slug(vec![&a, &b], "go");
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].slug, "a");
    }

    #[test]
    fn pagination_slices_and_clamps() {
        let items: Vec<u32> = (1..=10).collect();
        assert_eq!(paginate(&items, 6, 1), [1, 2, 3, 4, 5, 6]);
        assert_eq!(paginate(&items, 6, 2), [7, 8, 9, 10]);
        assert!(paginate(&items, 6, 3).is_empty());
        assert_eq!(paginate(&items, 6, 0), [1, 2, 3, 4, 5, 6]);
        assert_eq!(page_count(10, 6), 2);
        assert_eq!(page_count(12, 6), 2);
        assert_eq!(page_count(0, 6), 0);
    }

    #[test]
    fn page_parameter_defaults() {
        assert_eq!(parse_page(None), 1);
        assert_eq!(parse_page(Some("")), 1);
        assert_eq!(parse_page(Some("abc")), 1);
        assert_eq!(parse_page(Some("0")), 1);
        assert_eq!(parse_page(Some("3")), 3);
    }

    #[test]
    fn drafts_are_invisible() {
        let live = post("live", "2024-01-01", &[], true);
        let draft = post("draft", "2024-01-02", &[], false);
        let catalog = Catalog::new(vec![live, draft], Vec::new());
        assert_eq!(catalog.published_posts().len(), 1);
        assert!(catalog.post("live").is_some());
        assert!(catalog.post("draft").is_none());
        assert!(catalog.post("missing").is_none());
    }
}
