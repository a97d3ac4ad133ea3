//! Error types for the RED API client.

use thiserror::Error;

/// Boxed error produced by a [`Transport`](crate::transport::Transport).
pub type TransportError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that can occur when talking to RED or building a report.
#[derive(Debug, Error)]
pub enum RedactedError {
    /// The landing page could not be fetched while logging in.
    #[error("could not log in to RED; check your session cookie or try again later")]
    LoginFailure(#[source] TransportError),

    /// The API endpoint answered with a non-200 status (redirects included)
    /// or could not be reached at all.
    #[error("could not retrieve origin data; try again later")]
    TransportFailure {
        /// HTTP status, when a response was received.
        status: Option<u16>,
        #[source]
        source: Option<TransportError>,
    },

    /// The API answered 200 but the body was not JSON or its `status`
    /// was not `"success"`.
    #[error("could not retrieve origin data; check the torrent ID/hash or try again later")]
    RequestRejected,

    /// The torrent belongs to a category other than `Music`.
    #[error("not a music torrent (category: {category})")]
    NotMusic {
        /// Category name reported by the API.
        category: String,
    },

    /// A successful response lacked a field this client relies on.
    #[error("malformed API response: {0}")]
    MalformedResponse(String),

    /// Torrent reference given by the user was neither an id, a hash,
    /// nor a permalink.
    #[error("not a torrent id, info hash or permalink: {0}")]
    InvalidTorrentRef(String),

    /// Session file read/write error.
    #[error("session file error: {0}")]
    Io(#[from] std::io::Error),

    /// Session file JSON error.
    #[error("session file JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The HTTP client could not be built.
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// The client configuration holds a bad base URL or header.
    #[error("invalid client configuration: {0}")]
    InvalidConfig(String),

    /// Session path problems (e.g. missing config directory).
    #[error("{0}")]
    Other(String),
}

/// Machine-readable classification of a [`RedactedError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Landing page unreachable during login.
    LoginFailure,
    /// API call failed in transit or returned a non-200 status.
    TransportFailure,
    /// API answered but refused the request or sent non-JSON.
    RequestRejected,
    /// Torrent is outside the Music category.
    NotMusic,
    /// Successful answer missing a required field.
    MalformedResponse,
    /// User-supplied torrent reference could not be parsed.
    InvalidInput,
    /// Session file could not be read or written.
    Session,
    /// HTTP client could not be built from the configuration.
    Client,
}

impl RedactedError {
    /// Return the flat kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::LoginFailure(_) => ErrorKind::LoginFailure,
            Self::TransportFailure { .. } => ErrorKind::TransportFailure,
            Self::RequestRejected => ErrorKind::RequestRejected,
            Self::NotMusic { .. } => ErrorKind::NotMusic,
            Self::MalformedResponse(_) => ErrorKind::MalformedResponse,
            Self::InvalidTorrentRef(_) => ErrorKind::InvalidInput,
            Self::Io(_) | Self::Json(_) | Self::Other(_) => ErrorKind::Session,
            Self::Http(_) | Self::InvalidConfig(_) => ErrorKind::Client,
        }
    }
}

/// Convenience alias for `Result<T, RedactedError>`.
pub type Result<T> = std::result::Result<T, RedactedError>;
