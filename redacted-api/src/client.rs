//! Authenticated client for the RED JSON API (`/ajax.php`).
//!
//! Construction logs in: the landing page is fetched once to check
//! connectivity, then `action=index` is called to obtain the account's
//! `authkey`, which is appended to every later request as `auth`.
//!
//! # Response format
//!
//! All API responses share this envelope:
//!
//! ```json
//! {
//!   "status": "success",
//!   "response": { ...action-specific fields... }
//! }
//! ```
//!
//! Anything other than HTTP 200 maps to
//! [`RedactedError::TransportFailure`]; a 200 whose body is not JSON or whose
//! `status` is not `"success"` maps to [`RedactedError::RequestRejected`].

use crate::auth::normalize_cookie;
use crate::config::ClientConfig;
use crate::error::{RedactedError, Result};
use crate::transport::{HttpTransport, Transport};
use serde_json::Value;
use tracing::{debug, info};

/// Blocking client holding one logged-in RED session.
///
/// Not meant to be shared between threads; each instance performs at most one
/// request at a time.
pub struct RedactedClient<T: Transport = HttpTransport> {
    transport: T,
    config: ClientConfig,
    authkey: String,
}

impl RedactedClient {
    /// Log in to `redacted.ch` with a session cookie (`session=` prefix
    /// optional).
    pub fn new(cookie: &str) -> Result<Self> {
        Self::with_config(ClientConfig::default(), cookie)
    }

    /// Log in against the host described by `config`.
    pub fn with_config(config: ClientConfig, cookie: &str) -> Result<Self> {
        let transport = HttpTransport::new(&config, normalize_cookie(cookie))?;
        Self::with_transport(config, transport)
    }
}

impl<T: Transport> RedactedClient<T> {
    /// Log in over an explicit transport. The transport is expected to carry
    /// the session cookie itself.
    pub fn with_transport(config: ClientConfig, transport: T) -> Result<Self> {
        transport
            .get(&config.landing_url(), &[])
            .map_err(RedactedError::LoginFailure)?;

        let mut client = Self {
            transport,
            config,
            authkey: String::new(),
        };
        let account = client.request("index", &[])?;
        let authkey = account["authkey"]
            .as_str()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| RedactedError::MalformedResponse("index response has no authkey".into()))?;
        client.authkey = authkey.to_owned();
        info!(
            user = account["username"].as_str().unwrap_or_default(),
            "logged in to RED"
        );
        Ok(client)
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// The `authkey` obtained at login.
    pub fn authkey(&self) -> &str {
        &self.authkey
    }

    /// Call `ajax.php?action={action}` with `auth` and `params` appended.
    ///
    /// Returns the `response` object of a successful answer, untouched.
    /// Callers must not pass `action` or `auth` in `params`.
    pub fn request(&self, action: &str, params: &[(&str, String)]) -> Result<Value> {
        let mut query: Vec<(&str, &str)> = Vec::with_capacity(params.len() + 2);
        query.push(("action", action));
        if !self.authkey.is_empty() {
            query.push(("auth", self.authkey.as_str()));
        }
        query.extend(params.iter().map(|(k, v)| (*k, v.as_str())));

        let url = self.config.ajax_url();
        debug!(action, %url, "API request");
        let resp = self
            .transport
            .get(&url, &query)
            .map_err(|e| RedactedError::TransportFailure {
                status: None,
                source: Some(e),
            })?;

        if resp.status != 200 {
            return Err(RedactedError::TransportFailure {
                status: Some(resp.status),
                source: None,
            });
        }

        let mut json: Value =
            serde_json::from_slice(&resp.body).map_err(|_| RedactedError::RequestRejected)?;
        if json["status"] != "success" {
            return Err(RedactedError::RequestRejected);
        }

        match json.get_mut("response") {
            Some(response) => Ok(response.take()),
            None => Err(RedactedError::MalformedResponse(format!(
                "{action} response has no `response` field"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::transport::fake::FakeTransport;
    use serde_json::json;

    fn config() -> ClientConfig {
        ClientConfig::default()
    }

    #[test]
    fn login_fetches_landing_page_then_authkey() {
        let fake = FakeTransport::logged_in("KEY123");
        let client = RedactedClient::with_transport(config(), &fake).unwrap();
        assert_eq!(client.authkey(), "KEY123");

        let requests = fake.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].url, "https://redacted.ch/");
        assert!(requests[0].query.is_empty());
        assert_eq!(requests[1].url, "https://redacted.ch/ajax.php");
        assert_eq!(requests[1].param("action"), Some("index"));
        assert_eq!(requests[1].param("auth"), None);
    }

    #[test]
    fn unreachable_landing_page_is_login_failure() {
        let fake = FakeTransport::default();
        fake.unreachable();
        let err = RedactedClient::with_transport(config(), &fake).err().unwrap();
        assert_eq!(err.kind(), ErrorKind::LoginFailure);
        assert_eq!(fake.requests().len(), 1);
    }

    #[test]
    fn missing_authkey_is_malformed() {
        let fake = FakeTransport::default();
        fake.reply(200, "").reply_success(json!({ "username": "x" }));
        let err = RedactedClient::with_transport(config(), &fake).err().unwrap();
        assert_eq!(err.kind(), ErrorKind::MalformedResponse);
    }

    #[test]
    fn empty_authkey_is_malformed() {
        let fake = FakeTransport::default();
        fake.reply(200, "").reply_success(json!({ "authkey": "" }));
        let err = RedactedClient::with_transport(config(), &fake).err().unwrap();
        assert_eq!(err.kind(), ErrorKind::MalformedResponse);
    }

    #[test]
    fn authkey_is_attached_to_every_request() {
        let fake = FakeTransport::logged_in("KEY123");
        let client = RedactedClient::with_transport(config(), &fake).unwrap();
        fake.reply_success(json!({ "a": 1 }))
            .reply_success(json!({ "b": 2 }));

        client.request("torrent", &[("id", "7".into())]).unwrap();
        client.request("user", &[]).unwrap();

        let requests = fake.requests();
        for req in &requests[2..] {
            assert_eq!(req.param("auth"), Some("KEY123"));
        }
        assert_eq!(
            requests[2].query,
            vec![
                ("action".to_owned(), "torrent".to_owned()),
                ("auth".to_owned(), "KEY123".to_owned()),
                ("id".to_owned(), "7".to_owned()),
            ]
        );
    }

    #[test]
    fn returns_response_object_unmodified() {
        let fake = FakeTransport::logged_in("k");
        let client = RedactedClient::with_transport(config(), &fake).unwrap();
        let payload = json!({ "group": { "name": "X" }, "list": [1, 2, 3] });
        fake.reply_success(payload.clone());
        assert_eq!(client.request("torrent", &[]).unwrap(), payload);
    }

    #[test]
    fn redirect_is_transport_failure() {
        let fake = FakeTransport::logged_in("k");
        let client = RedactedClient::with_transport(config(), &fake).unwrap();
        fake.reply(302, "");
        let err = client.request("torrent", &[]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TransportFailure);
        assert!(matches!(
            err,
            RedactedError::TransportFailure {
                status: Some(302),
                ..
            }
        ));
    }

    #[test]
    fn server_error_is_transport_failure() {
        let fake = FakeTransport::logged_in("k");
        let client = RedactedClient::with_transport(config(), &fake).unwrap();
        fake.reply(502, "bad gateway");
        let err = client.request("torrent", &[]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TransportFailure);
    }

    #[test]
    fn connection_error_is_transport_failure() {
        let fake = FakeTransport::logged_in("k");
        let client = RedactedClient::with_transport(config(), &fake).unwrap();
        fake.unreachable();
        let err = client.request("torrent", &[]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TransportFailure);
    }

    #[test]
    fn failure_status_is_rejected() {
        let fake = FakeTransport::logged_in("k");
        let client = RedactedClient::with_transport(config(), &fake).unwrap();
        fake.reply(200, r#"{"status":"failure","error":"bad id parameter"}"#);
        let err = client.request("torrent", &[]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RequestRejected);
    }

    #[test]
    fn non_json_body_is_rejected() {
        let fake = FakeTransport::logged_in("k");
        let client = RedactedClient::with_transport(config(), &fake).unwrap();
        fake.reply(200, "<html>login</html>");
        let err = client.request("torrent", &[]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RequestRejected);
    }

    #[test]
    fn rejected_index_fails_construction() {
        let fake = FakeTransport::default();
        fake.reply(200, "").reply(200, r#"{"status":"failure"}"#);
        let err = RedactedClient::with_transport(config(), &fake).err().unwrap();
        assert_eq!(err.kind(), ErrorKind::RequestRejected);
    }
}
