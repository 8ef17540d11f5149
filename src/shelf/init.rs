//! # Data Directory
//!
//! Shelf keeps one data directory per user. It is resolved in this order:
//!
//! 1. An explicit override passed by the caller (the CLI's `--data-dir`)
//! 2. The `SHELF_HOME` environment variable (used by tests to isolate state)
//! 3. The OS data directory from the `directories` crate, e.g.
//!    `~/.local/share/shelf` on Linux
//!
//! The directory is created on first write, not here.

use crate::api::ShelfApi;
use crate::error::{Result, ShelfError};
use crate::store::fs_backend::FsBackend;
use crate::store::kv_store::KvStore;
use directories::ProjectDirs;
use std::path::PathBuf;
use tracing::debug;

pub const HOME_ENV: &str = "SHELF_HOME";

pub type FsApi = ShelfApi<KvStore<FsBackend>>;

pub fn data_dir(data_override: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = data_override {
        return Ok(path);
    }
    if let Some(path) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(path));
    }
    ProjectDirs::from("com", "shelf", "shelf")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| ShelfError::Store("Could not determine data directory".to_string()))
}

/// Opens the filesystem-backed API on the resolved data directory.
pub fn initialize(data_override: Option<PathBuf>) -> Result<FsApi> {
    let root = data_dir(data_override)?;
    debug!(path = %root.display(), "using data directory");
    ShelfApi::new(KvStore::with_backend(FsBackend::new(root)))
}
