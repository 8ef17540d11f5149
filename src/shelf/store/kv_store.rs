use super::backend::StorageBackend;
use super::{DataStore, BOOKMARKS_KEY, CATEGORIES_KEY, PIN_KEY, SETTINGS_KEY};
use crate::error::{Result, ShelfError};
use crate::model::{default_categories, Bookmark, Category};
use crate::settings::AppSettings;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

pub struct KvStore<B: StorageBackend> {
    /// The underlying storage backend.
    /// Exposed as pub(crate) for testing and internal access only.
    pub(crate) backend: B,
}

impl<B: StorageBackend> KvStore<B> {
    pub fn with_backend(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Reads `key`, falling back to `default` when it is missing or unparsable.
    fn load_or<T, F>(&self, key: &str, default: F) -> Result<T>
    where
        T: DeserializeOwned,
        F: FnOnce() -> T,
    {
        let Some(raw) = self.backend.read(key)? else {
            debug!(key, "no stored value, using default");
            return Ok(default());
        };
        match serde_json::from_str(&raw) {
            Ok(value) => {
                debug!(key, bytes = raw.len(), "loaded stored value");
                Ok(value)
            }
            Err(err) => {
                warn!(key, error = %err, "stored value is corrupted, using default");
                Ok(default())
            }
        }
    }

    fn put<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let raw = serde_json::to_string_pretty(value).map_err(ShelfError::Serialization)?;
        self.backend.write(key, &raw)?;
        debug!(key, bytes = raw.len(), "saved value");
        Ok(())
    }
}

impl<B: StorageBackend> DataStore for KvStore<B> {
    fn load_bookmarks(&self) -> Result<Vec<Bookmark>> {
        self.load_or(BOOKMARKS_KEY, Vec::new)
    }

    fn save_bookmarks(&mut self, bookmarks: &[Bookmark]) -> Result<()> {
        self.put(BOOKMARKS_KEY, bookmarks)
    }

    fn load_categories(&self) -> Result<Vec<Category>> {
        self.load_or(CATEGORIES_KEY, default_categories)
    }

    fn save_categories(&mut self, categories: &[Category]) -> Result<()> {
        self.put(CATEGORIES_KEY, categories)
    }

    fn save_collections(&mut self, bookmarks: &[Bookmark], categories: &[Category]) -> Result<()> {
        let previous = self.backend.read(BOOKMARKS_KEY)?;
        self.put(BOOKMARKS_KEY, bookmarks)?;
        if let Err(err) = self.put(CATEGORIES_KEY, categories) {
            warn!(error = %err, "categories write failed, restoring bookmarks");
            match previous {
                Some(raw) => self.backend.write(BOOKMARKS_KEY, &raw)?,
                None => self.backend.remove(BOOKMARKS_KEY)?,
            }
            return Err(err);
        }
        Ok(())
    }

    fn load_settings(&self) -> Result<AppSettings> {
        self.load_or(SETTINGS_KEY, AppSettings::default)
    }

    fn save_settings(&mut self, settings: &AppSettings) -> Result<()> {
        self.put(SETTINGS_KEY, settings)
    }

    fn load_pin(&self) -> Result<Option<String>> {
        self.load_or(PIN_KEY, || None)
    }

    fn save_pin(&mut self, pin: Option<&str>) -> Result<()> {
        self.put(PIN_KEY, &pin)
    }
}
