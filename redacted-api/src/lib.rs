//! RED (redacted.ch) JSON API client and torrent origin reports.
//!
//! Logs in with a browser `session` cookie, looks up one torrent and renders
//! its metadata as a fixed-width text report: a key/value header block, the
//! torrent's folder and file list, then the description.
//!
//! # Authentication
//!
//! Construction performs the whole login: the landing page is fetched, then
//! `action=index` returns the account `authkey`, which is attached to every
//! later call. The cookie can be persisted to
//! `~/.config/red-origin/session.json`.
//!
//! ```no_run
//! use redacted_api::auth::Session;
//! use redacted_api::RedactedClient;
//!
//! // Save cookie
//! let session = Session::from_cookie("session=YOUR_COOKIE");
//! session.save().unwrap();
//!
//! // Log in and build a report
//! let client = RedactedClient::new("session=YOUR_COOKIE").unwrap();
//! let report = client.torrent_report(None, Some("1234567")).unwrap();
//! print!("{report}");
//! ```
//!
//! # API endpoint mapping
//!
//! | Method                                | Action    | Description               |
//! |---------------------------------------|-----------|---------------------------|
//! | [`RedactedClient::new`]               | `index`   | Login, fetches `authkey`  |
//! | [`RedactedClient::request`]           | any       | Raw authenticated call    |
//! | [`RedactedClient::torrent_info`]      | `torrent` | Torrent + group metadata  |
//! | [`RedactedClient::torrent_report`]    | `torrent` | Rendered origin report    |

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod table;
mod torrent;
pub mod transport;
pub mod types;

pub use client::RedactedClient;
pub use config::ClientConfig;
pub use error::{ErrorKind, RedactedError, Result};
pub use table::{Cell, Justify, make_table};
pub use torrent::{display_artist, parse_file_list, parse_torrent};
pub use types::{FileEntry, TorrentRecord, TorrentRef};
