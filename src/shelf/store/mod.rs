//! # Storage Layer
//!
//! Shelf persists four independent values, each under its own key:
//!
//! | key                 | value                     | default            |
//! |---------------------|---------------------------|--------------------|
//! | `bookmarks`         | array of bookmarks        | `[]`               |
//! | `categories`        | array of categories       | the seed list      |
//! | `app-settings`      | settings object           | all defaults       |
//! | `private-space-pin` | string or `null`          | `null`             |
//!
//! Values are read once when the API is built and written back whole on every change.
//! Operations that touch both collections go through [`DataStore::save_collections`],
//! which restores the previous bookmarks if the categories write fails.
//!
//! ## Layers
//!
//! - [`DataStore`]: the typed interface the command layer talks to.
//! - [`backend::StorageBackend`]: raw string I/O per key. It knows nothing about
//!   bookmarks.
//! - [`kv_store::KvStore`]: the one `DataStore` implementation, generic over the
//!   backend. It owns (de)serialization and the fall-back-to-default rules.
//!
//! ## Backends
//!
//! - [`fs_backend::FsBackend`]: `<dir>/<key>.json`, written atomically.
//! - [`mem_backend::MemBackend`]: in-memory, for tests.
//!
//! A stored value that cannot be parsed is logged and treated like a missing key. It
//! is left on disk until the next write replaces it.

use crate::access::PrivateSpace;
use crate::error::Result;
use crate::model::{AppState, Bookmark, Category};
use crate::settings::AppSettings;

pub mod backend;
pub mod fs_backend;
pub mod kv_store;
pub mod mem_backend;

pub const BOOKMARKS_KEY: &str = "bookmarks";
pub const CATEGORIES_KEY: &str = "categories";
pub const SETTINGS_KEY: &str = "app-settings";
pub const PIN_KEY: &str = "private-space-pin";

/// Typed persistence for the application collections.
pub trait DataStore {
    fn load_bookmarks(&self) -> Result<Vec<Bookmark>>;
    fn save_bookmarks(&mut self, bookmarks: &[Bookmark]) -> Result<()>;

    fn load_categories(&self) -> Result<Vec<Category>>;
    fn save_categories(&mut self, categories: &[Category]) -> Result<()>;

    /// Replaces bookmarks and categories together: both are written or neither is.
    fn save_collections(&mut self, bookmarks: &[Bookmark], categories: &[Category])
        -> Result<()>;

    fn load_settings(&self) -> Result<AppSettings>;
    fn save_settings(&mut self, settings: &AppSettings) -> Result<()>;

    fn load_pin(&self) -> Result<Option<String>>;
    fn save_pin(&mut self, pin: Option<&str>) -> Result<()>;

    /// Reads every key into a fresh state. The Private Space always starts locked.
    fn load_state(&self) -> Result<AppState> {
        Ok(AppState {
            bookmarks: self.load_bookmarks()?,
            categories: self.load_categories()?,
            settings: self.load_settings()?,
            private_space: PrivateSpace::new(self.load_pin()?),
        })
    }
}
