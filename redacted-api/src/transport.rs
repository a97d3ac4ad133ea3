//! HTTP transport used by [`RedactedClient`](crate::RedactedClient).
//!
//! The client only ever issues plain GET requests with a query string, so the
//! seam is a single method. [`HttpTransport`] is the real implementation: a
//! blocking `reqwest` client carrying the session cookie, the fixed header set
//! from [`ClientConfig`], and a redirect policy that never follows redirects.

use crate::config::ClientConfig;
use crate::error::{RedactedError, Result, TransportError};
use reqwest::blocking::Client;
use reqwest::cookie::Jar;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::redirect::Policy;
use std::sync::Arc;

/// Status and raw body of a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

/// Something that can perform a GET request.
pub trait Transport {
    /// GET `url` with `query` appended as URL-encoded parameters.
    ///
    /// Redirects must be returned as-is, not followed.
    fn get(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> std::result::Result<HttpResponse, TransportError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn get(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> std::result::Result<HttpResponse, TransportError> {
        (**self).get(url, query)
    }
}

/// Blocking `reqwest` transport with a `session` cookie for the tracker host.
pub struct HttpTransport {
    http: Client,
}

impl HttpTransport {
    /// Build the HTTP client. `cookie` must already be normalized (see
    /// [`normalize_cookie`](crate::auth::normalize_cookie)).
    pub fn new(config: &ClientConfig, cookie: &str) -> Result<Self> {
        let base: reqwest::Url = config
            .base_url()
            .parse()
            .map_err(|e| RedactedError::InvalidConfig(format!("invalid base URL: {e}")))?;

        let jar = Jar::default();
        jar.add_cookie_str(&format!("session={cookie}"), &base);

        let http = Client::builder()
            .default_headers(header_map(config)?)
            .cookie_provider(Arc::new(jar))
            .redirect(Policy::none())
            .build()?;
        Ok(Self { http })
    }
}

impl Transport for HttpTransport {
    fn get(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> std::result::Result<HttpResponse, TransportError> {
        let resp = self.http.get(url).query(query).send()?;
        let status = resp.status().as_u16();
        let body = resp.bytes()?.to_vec();
        Ok(HttpResponse { status, body })
    }
}

fn header_map(config: &ClientConfig) -> Result<HeaderMap> {
    let mut map = HeaderMap::new();
    for (name, value) in config.headers() {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| RedactedError::InvalidConfig(format!("invalid header name {name}: {e}")))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| RedactedError::InvalidConfig(format!("invalid header value {value}: {e}")))?;
        map.insert(name, value);
    }
    Ok(map)
}
