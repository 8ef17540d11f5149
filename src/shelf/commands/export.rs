//! Backup export.
//!
//! A backup is one pretty-printed JSON document:
//!
//! ```json
//! { "version": 1, "exportedAt": "2024-03-01T10:00:00Z", "bookmarks": [], "categories": [] }
//! ```
//!
//! It holds every bookmark, private ones included, and every category. Settings and
//! the PIN are not part of a backup. With `compress` the document is gzipped.

use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, ShelfError};
use crate::model::{AppState, Bookmark, Category};
use chrono::{DateTime, Utc};
use flate2::write::GzEncoder;
use flate2::Compression;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

pub const BACKUP_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupDocument {
    pub version: u32,
    pub exported_at: DateTime<Utc>,
    pub bookmarks: Vec<Bookmark>,
    pub categories: Vec<Category>,
}

impl BackupDocument {
    pub fn from_state(state: &AppState) -> Self {
        Self {
            version: BACKUP_VERSION,
            exported_at: Utc::now(),
            bookmarks: state.bookmarks.clone(),
            categories: state.categories.clone(),
        }
    }
}

/// Serializes `document`, gzipped when `compress` is set.
pub fn encode(document: &BackupDocument, compress: bool) -> Result<Vec<u8>> {
    let json = serde_json::to_string_pretty(document).map_err(ShelfError::Serialization)?;
    if !compress {
        return Ok(json.into_bytes());
    }
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(json.as_bytes()).map_err(ShelfError::Io)?;
    encoder.finish().map_err(ShelfError::Io)
}

/// `shelf-backup-<date>.json`, with `.gz` appended for compressed backups.
pub fn default_filename(now: DateTime<Utc>, compress: bool) -> String {
    let ext = if compress { ".json.gz" } else { ".json" };
    format!("shelf-backup-{}{}", now.format("%Y-%m-%d"), ext)
}

/// Writes a backup to `target`. A directory (or no target, meaning the current
/// directory) gets the default file name.
pub fn run(state: &AppState, target: Option<&Path>, compress: bool) -> Result<CmdResult> {
    let document = BackupDocument::from_state(state);
    let bytes = encode(&document, compress)?;

    let filename = default_filename(document.exported_at, compress);
    let path: PathBuf = match target {
        Some(dir) if dir.is_dir() => dir.join(filename),
        Some(file) => file.to_path_buf(),
        None => PathBuf::from(filename),
    };
    fs::write(&path, bytes).map_err(ShelfError::Io)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Backup exported successfully: {} items and {} categories to {}",
        document.bookmarks.len(),
        document.categories.len(),
        path.display()
    )));
    result.paths.push(path);
    Ok(result)
}
