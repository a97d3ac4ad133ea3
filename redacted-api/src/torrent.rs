//! Torrent lookup and origin report.
//!
//! # Endpoint
//!
//! `GET /ajax.php?action=torrent&hash={hash}&id={id}`
//!
//! Response (fields used here):
//! ```json
//! {
//!   "group": {
//!     "name": "Album", "year": 1997, "categoryName": "Music",
//!     "musicInfo": { "artists": [{ "id": 1, "name": "Artist" }] }
//!   },
//!   "torrent": {
//!     "id": 123, "media": "CD", "format": "FLAC", "encoding": "Lossless",
//!     "remasterTitle": "", "remasterYear": 0,
//!     "remasterRecordLabel": "", "remasterCatalogueNumber": "",
//!     "hasLog": true, "logScore": 100, "fileCount": 12, "size": 312345678,
//!     "infoHash": "ABCD...", "time": "2019-01-01 12:00:00",
//!     "filePath": "Artist - Album (1997) [FLAC]",
//!     "fileList": "01 Track.flac{{{23456789}}}|||folder.jpg{{{12345}}}",
//!     "description": "Ripped with EAC &amp; checked"
//!   }
//! }
//! ```
//!
//! # Report layout
//!
//! ```text
//! Artist          Artist
//! Name            Album
//! ...
//! Permalink       https://redacted.ch/torrents.php?torrentid=123
//!
//! Artist - Album (1997) [FLAC]/
//! 23456789    01 Track.flac
//!    12345    folder.jpg
//!
//! Ripped with EAC & checked
//! ```

use crate::client::RedactedClient;
use crate::config::ClientConfig;
use crate::error::{RedactedError, Result};
use crate::table::{Cell, Justify, make_table};
use crate::transport::Transport;
use crate::types::{FileEntry, TorrentRecord, TorrentRef};
use html_escape::decode_html_entities;
use serde_json::Value;

const MUSIC_CATEGORY: &str = "Music";
const VARIOUS_ARTISTS: &str = "Various Artists";

impl<T: Transport> RedactedClient<T> {
    /// Fetch a torrent by info hash and/or id.
    ///
    /// Both are forwarded as given; the API decides which combinations it
    /// accepts.
    ///
    /// # Errors
    ///
    /// - errors from [`request`](Self::request), unchanged
    /// - [`RedactedError::NotMusic`] if the group is not in the Music category
    /// - [`RedactedError::MalformedResponse`] if `group`/`torrent` are missing
    ///   or the file list cannot be split
    pub fn torrent_info(&self, hash: Option<&str>, id: Option<&str>) -> Result<TorrentRecord> {
        let mut params = Vec::with_capacity(2);
        if let Some(hash) = hash {
            params.push(("hash", hash.to_owned()));
        }
        if let Some(id) = id {
            params.push(("id", id.to_owned()));
        }
        let resp = self.request("torrent", &params)?;
        parse_torrent(&resp, self.config())
    }

    /// Fetch a torrent and render its origin report.
    pub fn torrent_report(&self, hash: Option<&str>, id: Option<&str>) -> Result<String> {
        Ok(self.torrent_info(hash, id)?.render())
    }

    /// [`torrent_report`](Self::torrent_report) for a parsed [`TorrentRef`].
    pub fn origin(&self, torrent: &TorrentRef) -> Result<String> {
        match torrent {
            TorrentRef::Id(id) => self.torrent_report(None, Some(id.to_string().as_str())),
            TorrentRef::Hash(hash) => self.torrent_report(Some(hash.as_str()), None),
        }
    }
}

impl TorrentRecord {
    /// Header rows in report order.
    pub fn rows(&self) -> Vec<(&'static str, Cell)> {
        vec![
            ("Artist", self.artist.as_str().into()),
            ("Name", self.name.clone()),
            ("Edition", self.edition.clone()),
            ("Edition year", self.edition_year.clone()),
            ("Media", self.media.clone()),
            ("Catalog number", self.catalog_number.clone()),
            ("Record label", self.record_label.clone()),
            ("Original year", self.original_year.clone()),
            ("Format", self.format.clone()),
            ("Encoding", self.encoding.clone()),
            ("Log", self.log.as_str().into()),
            ("File count", self.file_count.clone()),
            ("Size", self.size.clone()),
            ("Info hash", self.info_hash.clone()),
            ("Uploaded", self.uploaded.clone()),
            ("Permalink", self.permalink.as_str().into()),
        ]
    }

    /// Render header table, folder line, file table and description.
    pub fn render(&self) -> String {
        let files: Vec<(&str, Cell)> = self
            .files
            .iter()
            .map(|f| (f.size.as_str(), Cell::from(f.name.as_str())))
            .collect();

        let mut out = make_table(&self.rows(), Justify::Left);
        out.push('\n');
        out.push_str(&self.file_path);
        out.push_str("/\n");
        out.push_str(&make_table(&files, Justify::Right));
        if !self.description.is_empty() {
            out.push('\n');
            out.push_str(&self.description);
            out.push('\n');
        }
        out
    }
}

/// Join artist names: one name, `"A & B"` for two, else `"Various Artists"`.
///
/// Names stay HTML-escaped; [`make_table`] unescapes them on render.
pub fn display_artist(names: &[&str]) -> String {
    match names {
        [one] => (*one).to_owned(),
        [first, second] => format!("{first} & {second}"),
        _ => VARIOUS_ARTISTS.to_owned(),
    }
}

/// Split a `fileList` string into entries.
///
/// Entries are separated by `|||`; each is `name{{{size}}}`. `}}}` is removed
/// everywhere before splitting. An empty string has no entries.
pub fn parse_file_list(raw: &str) -> Result<Vec<FileEntry>> {
    let cleaned = raw.replace("}}}", "");
    if cleaned.is_empty() {
        return Ok(Vec::new());
    }
    cleaned
        .split("|||")
        .map(|entry| {
            let mut parts = entry.split("{{{");
            match (parts.next(), parts.next(), parts.next()) {
                (Some(name), Some(size), None) => Ok(FileEntry {
                    name: name.to_owned(),
                    size: size.to_owned(),
                }),
                _ => Err(RedactedError::MalformedResponse(format!(
                    "bad file list entry: {entry:?}"
                ))),
            }
        })
        .collect()
}

/// Build a [`TorrentRecord`] from an `action=torrent` response.
pub fn parse_torrent(resp: &Value, config: &ClientConfig) -> Result<TorrentRecord> {
    let group = &resp["group"];
    let torrent = &resp["torrent"];
    if !group.is_object() || !torrent.is_object() {
        return Err(RedactedError::MalformedResponse(
            "torrent response lacks group or torrent".into(),
        ));
    }

    let category = group["categoryName"].as_str().unwrap_or_default();
    if category != MUSIC_CATEGORY {
        return Err(RedactedError::NotMusic {
            category: category.to_owned(),
        });
    }

    let names: Vec<&str> = group["musicInfo"]["artists"]
        .as_array()
        .map(|arr| {
            arr.iter()
                .map(|a| a["name"].as_str().unwrap_or_default())
                .collect()
        })
        .unwrap_or_default();

    let log = if torrent["hasLog"].as_bool().unwrap_or(false) {
        format!("{}%", Cell::from(&torrent["logScore"]))
    } else {
        String::new()
    };

    let description = unescape(torrent["description"].as_str().unwrap_or_default());

    Ok(TorrentRecord {
        artist: display_artist(&names),
        name: Cell::from(&group["name"]),
        edition: Cell::from(&torrent["remasterTitle"]),
        edition_year: Cell::from(&torrent["remasterYear"]),
        media: Cell::from(&torrent["media"]),
        catalog_number: Cell::from(&torrent["remasterCatalogueNumber"]),
        record_label: Cell::from(&torrent["remasterRecordLabel"]),
        original_year: Cell::from(&group["year"]),
        format: Cell::from(&torrent["format"]),
        encoding: Cell::from(&torrent["encoding"]),
        log,
        file_count: Cell::from(&torrent["fileCount"]),
        size: Cell::from(&torrent["size"]),
        info_hash: Cell::from(&torrent["infoHash"]),
        uploaded: Cell::from(&torrent["time"]),
        permalink: config.permalink(Cell::from(&torrent["id"])),
        file_path: unescape(torrent["filePath"].as_str().unwrap_or_default()),
        files: parse_file_list(torrent["fileList"].as_str().unwrap_or_default())?,
        description: description.trim_matches(['\r', '\n']).to_owned(),
    })
}

fn unescape(s: &str) -> String {
    decode_html_entities(s).into_owned()
}
