//! Client configuration: tracker host and the fixed request headers.
//!
//! The configuration is built once and moved into the client; nothing in it
//! changes after login.

use std::fmt::Display;

/// Tracker host used when no other base URL is configured.
pub const DEFAULT_BASE_URL: &str = "https://redacted.ch";

/// `User-Agent` sent with every request.
pub const USER_AGENT: &str = "red-origin";

const DEFAULT_HEADERS: [(&str, &str); 7] = [
    ("Connection", "keep-alive"),
    ("Cache-Control", "max-age=0"),
    ("User-Agent", USER_AGENT),
    (
        "Accept",
        "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
    ),
    ("Accept-Encoding", "gzip,deflate,sdch"),
    ("Accept-Language", "en-US,en;q=0.8"),
    ("Accept-Charset", "ISO-8859-1,utf-8;q=0.7,*;q=0.3"),
];

/// Immutable settings shared by the transport and the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    base_url: String,
    headers: Vec<(String, String)>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }
}

impl ClientConfig {
    /// Point the client at another host (e.g. a local mirror). A trailing
    /// `/` is ignored.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        let headers = DEFAULT_HEADERS
            .iter()
            .map(|&(k, v)| (k.to_owned(), v.to_owned()))
            .collect();
        Self { base_url, headers }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Headers attached to every request, in the order they are sent.
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// Landing page fetched once during login.
    pub fn landing_url(&self) -> String {
        format!("{}/", self.base_url)
    }

    /// JSON API endpoint.
    pub fn ajax_url(&self) -> String {
        format!("{}/ajax.php", self.base_url)
    }

    /// Torrent view URL for a torrent id.
    pub fn permalink(&self, torrent_id: impl Display) -> String {
        format!("{}/torrents.php?torrentid={torrent_id}", self.base_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_urls() {
        let config = ClientConfig::default();
        assert_eq!(config.landing_url(), "https://redacted.ch/");
        assert_eq!(config.ajax_url(), "https://redacted.ch/ajax.php");
        assert_eq!(
            config.permalink(1234),
            "https://redacted.ch/torrents.php?torrentid=1234"
        );
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        let config = ClientConfig::with_base_url("http://localhost:8080/");
        assert_eq!(config.ajax_url(), "http://localhost:8080/ajax.php");
    }

    #[test]
    fn headers_identify_tool() {
        let config = ClientConfig::default();
        assert_eq!(config.headers().len(), 7);
        assert!(
            config
                .headers()
                .iter()
                .any(|(k, v)| k == "User-Agent" && v == "red-origin")
        );
    }
}
