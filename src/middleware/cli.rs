//! Command-line client detection.
//!
//! Browsers get HTML; `curl` gets ASCII art. This middleware classifies the
//! caller from its `User-Agent` and, when it looks like a command-line HTTP
//! tool, reroutes the request to the plain-text banner page — on every
//! path, for every method.
//!
//! Classification alone is not enough: browser extensions and proxies
//! sometimes spoof CLI-looking User-Agents on real navigations. Real
//! browser fetches always carry `Sec-Fetch-Site`, raw command-line clients
//! never do, so the rewrite fires only when the User-Agent matches *and*
//! that header is absent. A missing or unreadable User-Agent is treated as
//! a browser and passed through.

use regex::{Regex, RegexBuilder};

use crate::middleware::Middleware;
use crate::request::Request;

/// The internal path the banner page is served from.
pub const BANNER_PATH: &str = "/curl-response";

/// Header sent by browser fetch machinery, absent on raw CLI requests.
const FETCH_SITE_HEADER: &str = "sec-fetch-site";

/// Reroutes command-line HTTP clients to the plain-text banner.
pub struct CliBanner {
    pattern: Option<Regex>,
}

impl CliBanner {
    /// User-Agent tokens recognised out of the box.
    pub const DEFAULT_CLIENTS: &'static [&'static str] = &["curl", "wget", "httpie"];

    /// Builds the detector for a set of User-Agent tokens. Tokens match
    /// case-insensitively and only as whole words, so `curl/8.5` matches
    /// but `curlycue/1.0` does not. An empty set never matches.
    ///
    /// # Panics
    ///
    /// Panics if the token set produces an uncompilable pattern. Tokens
    /// are escaped first, so this only fires on pathological input (e.g.
    /// a token set blowing the regex size limit).
    pub fn new<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let escaped: Vec<String> = tokens
            .into_iter()
            .map(|t| regex::escape(t.as_ref()))
            .collect();
        if escaped.is_empty() {
            return Self { pattern: None };
        }
        let pattern = format!(r"\b(?:{})\b", escaped.join("|"));
        let regex = RegexBuilder::new(&pattern)
            .case_insensitive(true)
            .build()
            .unwrap_or_else(|e| panic!("invalid client token pattern `{pattern}`: {e}"));
        Self { pattern: Some(regex) }
    }

    /// Whether a User-Agent string names a known command-line client.
    pub fn is_cli(&self, user_agent: &str) -> bool {
        self.pattern
            .as_ref()
            .is_some_and(|re| re.is_match(user_agent))
    }
}

impl Default for CliBanner {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CLIENTS)
    }
}

impl Middleware for CliBanner {
    fn rewrite(&self, req: &Request) -> Option<String> {
        let user_agent = req.header("user-agent")?;
        let browser_fetch = req.header(FETCH_SITE_HEADER).is_some();
        (self.is_cli(user_agent) && !browser_fetch).then(|| BANNER_PATH.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::method::Method;
    use http::HeaderMap;

    fn request(headers: &[(&str, &str)]) -> Request {
        let mut map = HeaderMap::new();
        for (name, value) in headers {
            map.insert(
                http::header::HeaderName::from_bytes(name.as_bytes()).unwrap(),
                value.parse().unwrap(),
            );
        }
        Request::new(Method::Get, "/blog".to_owned(), None, map)
    }

    #[test]
    fn curl_without_fetch_header_is_rewritten() {
        let mw = CliBanner::default();
        let req = request(&[("user-agent", "curl/7.88.1")]);
        assert_eq!(mw.rewrite(&req), Some(BANNER_PATH.to_owned()));
    }

    #[test]
    fn fetch_header_always_passes_through() {
        let mw = CliBanner::default();
        let req = request(&[
            ("user-agent", "curl/7.88"),
            ("sec-fetch-site", "none"),
        ]);
        assert_eq!(mw.rewrite(&req), None);
    }

    #[test]
    fn whole_word_match_only() {
        let mw = CliBanner::default();
        assert!(!mw.is_cli("curlycue/1.0"));
        assert!(!mw.is_cli("Mozilla/5.0 (compatible; wgetter)"));
        assert!(mw.is_cli("curl/8.5.0"));
    }

    #[test]
    fn match_is_case_insensitive() {
        let mw = CliBanner::default();
        assert!(mw.is_cli("Wget/1.21.4"));
        assert!(mw.is_cli("HTTPie/3.2.2"));
        assert!(mw.is_cli("CURL/7.64"));
    }

    #[test]
    fn missing_user_agent_passes_through() {
        let mw = CliBanner::default();
        let req = request(&[]);
        assert_eq!(mw.rewrite(&req), None);
    }

    #[test]
    fn browser_user_agent_passes_through() {
        let mw = CliBanner::default();
        let req = request(&[(
            "user-agent",
            "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36",
        )]);
        assert_eq!(mw.rewrite(&req), None);
    }

    #[test]
    fn token_set_is_configurable() {
        let mw = CliBanner::new(["xh", "aria2"]);
        assert!(mw.is_cli("xh/0.21"));
        assert!(!mw.is_cli("curl/8.5"));
    }

    #[test]
    fn empty_token_set_never_matches() {
        let mw = CliBanner::new(std::iter::empty::<&str>());
        assert!(!mw.is_cli("curl/8.5"));
        assert!(!mw.is_cli(""));
    }
}
