//! The plain-text banner served to command-line clients.
//!
//! When the middleware reroutes a `curl` request, this is what comes back:
//! the site name in a frame, the author's tagline, and the links that
//! matter, aligned for a terminal. The output is deterministic — same
//! config, same bytes — so scripts that hit the site repeatedly see a
//! stable response.

use std::fmt::Write as _;

use crate::config::SiteConfig;

const PADDING: usize = 6;

pub fn render(config: &SiteConfig) -> String {
    let name_width = config.name.chars().count();
    let inner = name_width + 2 * PADDING;

    let mut out = String::new();
    let rule = format!("+{}+\n", "=".repeat(inner));
    out.push_str(&rule);
    let _ = writeln!(out, "|{:^inner$}|", config.name);
    out.push_str(&rule);
    out.push('\n');

    if !config.description.is_empty() {
        let _ = writeln!(out, "  {}", config.description);
        out.push('\n');
    }

    let label_width = config
        .links
        .iter()
        .map(|l| l.label.chars().count())
        .chain(std::iter::once("site".len()))
        .max()
        .unwrap_or(0);
    let _ = writeln!(out, "  {:label_width$}  {}", "site", config.url);
    for link in &config.links {
        let _ = writeln!(out, "  {:label_width$}  {}", link.label, link.url);
    }
    out.push('\n');

    out.push_str("  You're seeing this because you asked with a command-line client.\n");
    out.push_str("  Point a browser at the site for the full thing.\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Link;

    fn config() -> SiteConfig {
        serde_yaml::from_str(
            r#"
name: example
url: https://example.com
description: a blog
author: someone
links:
  - label: github
    url: https://github.com/someone
  - label: linkedin
    url: https://linkedin.com/in/someone
"#,
        )
        .unwrap()
    }

    #[test]
    fn banner_names_the_site_and_links() {
        let text = render(&config());
        assert!(text.contains("example"));
        assert!(text.contains("https://example.com"));
        assert!(text.contains("https://github.com/someone"));
        assert!(text.contains("https://linkedin.com/in/someone"));
    }

    #[test]
    fn frame_lines_are_equal_width() {
        let text = render(&config());
        let frame: Vec<&str> = text.lines().take(3).collect();
        assert!(frame[0].starts_with('+') && frame[0].ends_with('+'));
        assert_eq!(frame[0].len(), frame[1].len());
        assert_eq!(frame[0], frame[2]);
    }

    #[test]
    fn output_is_deterministic() {
        let cfg = config();
        assert_eq!(render(&cfg), render(&cfg));
    }

    #[test]
    fn no_links_still_renders() {
        let mut cfg = config();
        cfg.links = Vec::<Link>::new();
        let text = render(&cfg);
        assert!(text.contains("https://example.com"));
    }
}
