//! Session management: normalizes and persists the `session` cookie.
//!
//! The session file is stored at `~/.config/red-origin/session.json` and
//! contains:
//!
//! ```json
//! { "session": "abcDEF123..." }
//! ```
//!
//! The cookie can be copied from browser developer tools → Application →
//! Cookies on `redacted.ch`. Values pasted as `session=...` are accepted.

use crate::error::{RedactedError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const COOKIE_PREFIX: &str = "session=";

/// Strip surrounding whitespace and an optional `session=` marker.
pub fn normalize_cookie(raw: &str) -> &str {
    let raw = raw.trim();
    raw.strip_prefix(COOKIE_PREFIX).unwrap_or(raw)
}

/// Persistent login session backed by a JSON file on disk.
#[derive(Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Session {
    /// The `session` cookie value, without the `session=` marker.
    #[serde(rename = "session")]
    pub cookie: Option<String>,
}

impl Session {
    /// Build a session from a raw cookie string.
    pub fn from_cookie(raw: &str) -> Self {
        Self {
            cookie: Some(normalize_cookie(raw).to_owned()),
        }
    }

    /// Load session from `~/.config/red-origin/session.json`.
    ///
    /// Returns a default (empty) session if the file does not exist.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    /// Save session to disk, creating parent directories if needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }

    /// Delete the session file from disk.
    pub fn clear() -> Result<()> {
        let path = Self::path()?;
        if path.exists() {
            fs::remove_file(&path)?;
        }
        Ok(())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let data = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&data)?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_string_pretty(self)?;
        fs::write(path, data)?;
        Ok(())
    }

    /// The stored cookie, if one is set and non-empty.
    pub fn cookie(&self) -> Option<&str> {
        self.cookie.as_deref().filter(|c| !c.is_empty())
    }

    fn path() -> Result<PathBuf> {
        let config = dirs::config_dir()
            .ok_or_else(|| RedactedError::Other("cannot determine config directory".into()))?;
        Ok(config.join("red-origin").join("session.json"))
    }
}
