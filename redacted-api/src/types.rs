//! Data types built from RED API responses.
//!
//! Scalar fields copied straight from the JSON keep their JSON shape as a
//! [`Cell`] (the API is loose about strings vs. numbers, e.g. `remasterYear`
//! is `0` when unknown). Derived fields are plain strings.

use crate::error::RedactedError;
use crate::table::Cell;
use std::str::FromStr;

/// One torrent plus its group, ready to be rendered as an origin report.
///
/// Built by [`RedactedClient::torrent_info`](crate::RedactedClient::torrent_info)
/// from `action=torrent`; only music torrents are ever represented.
#[derive(Debug, Clone, PartialEq)]
pub struct TorrentRecord {
    /// `"A"`, `"A & B"`, or `"Various Artists"`, still HTML-escaped.
    pub artist: String,
    /// `group.name`
    pub name: Cell,
    /// `torrent.remasterTitle`
    pub edition: Cell,
    /// `torrent.remasterYear`
    pub edition_year: Cell,
    /// `torrent.media` (CD, WEB, Vinyl, ...).
    pub media: Cell,
    /// `torrent.remasterCatalogueNumber`
    pub catalog_number: Cell,
    /// `torrent.remasterRecordLabel`
    pub record_label: Cell,
    /// `group.year`
    pub original_year: Cell,
    /// `torrent.format` (FLAC, MP3, ...).
    pub format: Cell,
    /// `torrent.encoding` (Lossless, 24bit Lossless, V0, ...).
    pub encoding: Cell,
    /// `"{logScore}%"` when the torrent has a rip log, else empty.
    pub log: String,
    /// `torrent.fileCount`
    pub file_count: Cell,
    /// `torrent.size` in bytes.
    pub size: Cell,
    /// `torrent.infoHash`
    pub info_hash: Cell,
    /// `torrent.time`, as sent by the API.
    pub uploaded: Cell,
    /// Torrent view URL.
    pub permalink: String,
    /// Unescaped `torrent.filePath` (the torrent's top-level folder).
    pub file_path: String,
    /// Entries of `torrent.fileList`, in API order.
    pub files: Vec<FileEntry>,
    /// Unescaped `torrent.description` with surrounding line breaks removed.
    pub description: String,
}

/// One `name{{{size}}}` entry of a torrent file list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub name: String,
    /// Text after `{{{`, normally the size in bytes.
    pub size: String,
}

/// A torrent given by the user: numeric id or info hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TorrentRef {
    Id(u64),
    /// 40 hex digits, uppercased.
    Hash(String),
}

impl FromStr for TorrentRef {
    type Err = RedactedError;

    /// Accepts `123456`, a 40-character hex info hash, or a permalink such as
    /// `https://redacted.ch/torrents.php?id=1&torrentid=123456`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let invalid = || RedactedError::InvalidTorrentRef(s.to_owned());

        if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) {
            return s.parse().map(Self::Id).map_err(|_| invalid());
        }
        if s.len() == 40 && s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Ok(Self::Hash(s.to_ascii_uppercase()));
        }
        if let Some((_, rest)) = s.split_once("torrentid=") {
            let digits: String = rest.chars().take_while(char::is_ascii_digit).collect();
            return digits.parse().map(Self::Id).map_err(|_| invalid());
        }
        Err(invalid())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_id() {
        assert_eq!("1234567".parse::<TorrentRef>().unwrap(), TorrentRef::Id(1_234_567));
    }

    #[test]
    fn parses_hash() {
        let hash = "0123456789abcdef0123456789abcdef01234567";
        assert_eq!(
            hash.parse::<TorrentRef>().unwrap(),
            TorrentRef::Hash("0123456789ABCDEF0123456789ABCDEF01234567".into())
        );
    }

    #[test]
    fn parses_permalink() {
        let url = "https://redacted.ch/torrents.php?id=99&torrentid=4242#torrent4242";
        assert_eq!(url.parse::<TorrentRef>().unwrap(), TorrentRef::Id(4242));
    }

    #[test]
    fn rejects_garbage() {
        for input in ["", "abc", "https://redacted.ch/torrents.php?id=99", "12ab"] {
            let err = input.parse::<TorrentRef>().unwrap_err();
            assert_eq!(err.kind(), crate::error::ErrorKind::InvalidInput, "{input}");
        }
    }
}
