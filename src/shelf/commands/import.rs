//! Backup import.
//!
//! Import replaces both bookmarks and categories with the backup's contents. The
//! backup is fully parsed before anything is written, so a bad file has no effect,
//! and both collections are committed together.
//! Gzipped backups are recognized by their magic bytes.

use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, ShelfError};
use crate::model::{AppState, Bookmark, Category};
use crate::store::DataStore;
use flate2::read::GzDecoder;
use serde_json::Value;
use std::fs;
use std::io::Read;
use std::path::Path;
use tracing::debug;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Collections read from a backup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Backup {
    pub bookmarks: Vec<Bookmark>,
    pub categories: Vec<Category>,
}

fn invalid_format() -> ShelfError {
    ShelfError::InvalidBackup("Invalid backup file format".to_string())
}

/// Parses raw backup bytes, plain JSON or gzipped JSON.
pub fn decode(bytes: &[u8]) -> Result<Backup> {
    let text = if bytes.starts_with(&GZIP_MAGIC) {
        debug!("backup is gzip compressed");
        let mut text = String::new();
        GzDecoder::new(bytes)
            .read_to_string(&mut text)
            .map_err(|e| ShelfError::InvalidBackup(format!("Failed to decompress: {}", e)))?;
        text
    } else {
        String::from_utf8(bytes.to_vec())
            .map_err(|_| ShelfError::InvalidBackup("Backup is not UTF-8 text".to_string()))?
    };

    let mut value: Value = serde_json::from_str(&text)
        .map_err(|e| ShelfError::InvalidBackup(format!("Failed to import backup: {}", e)))?;
    let bookmarks = take_array(&mut value, "bookmarks")?;
    let categories = take_array(&mut value, "categories")?;

    Ok(Backup {
        bookmarks: serde_json::from_value(bookmarks)
            .map_err(|e| ShelfError::InvalidBackup(format!("Bad bookmark record: {}", e)))?,
        categories: serde_json::from_value(categories)
            .map_err(|e| ShelfError::InvalidBackup(format!("Bad category record: {}", e)))?,
    })
}

fn take_array(document: &mut Value, key: &str) -> Result<Value> {
    match document.get_mut(key).map(Value::take) {
        Some(array @ Value::Array(_)) => Ok(array),
        _ => Err(invalid_format()),
    }
}

/// Replaces the collections with `backup`.
pub fn apply<S: DataStore>(store: &mut S, state: &mut AppState, backup: Backup) -> Result<CmdResult> {
    store.save_collections(&backup.bookmarks, &backup.categories)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Restored {} items and {} categories",
        backup.bookmarks.len(),
        backup.categories.len()
    )));
    state.categories = backup.categories;
    state.bookmarks = backup.bookmarks;
    Ok(result)
}

pub fn run<S: DataStore>(store: &mut S, state: &mut AppState, path: &Path) -> Result<CmdResult> {
    let bytes = fs::read(path).map_err(ShelfError::Io)?;
    let backup = decode(&bytes)?;
    apply(store, state, backup)
}
