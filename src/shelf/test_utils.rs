use crate::api::ShelfApi;
use crate::model::{AppState, Bookmark, BookmarkDraft, BookmarkKind};
use crate::store::fs_backend::FsBackend;
use crate::store::kv_store::KvStore;
use crate::store::mem_backend::MemBackend;
use chrono::{DateTime, Duration, Utc};
use std::path::PathBuf;
use tempfile::TempDir;

pub type MemApi = ShelfApi<KvStore<MemBackend>>;

/// Fixed reference time so `minutes_ago` orderings are deterministic.
fn base_time() -> DateTime<Utc> {
    DateTime::from_timestamp(1_704_110_400, 0).unwrap_or_default()
}

/// Builds bookmarks directly, bypassing validation. Defaults to category "1".
pub struct BookmarkBuilder {
    bookmark: Bookmark,
}

impl BookmarkBuilder {
    pub fn new(name: &str) -> Self {
        let mut bookmark = Bookmark::new(BookmarkDraft::new(
            name,
            format!("https://{}.example", name.to_lowercase()),
            vec!["1".to_string()],
        ));
        bookmark.created_at = base_time();
        Self { bookmark }
    }

    pub fn id(mut self, id: &str) -> Self {
        self.bookmark.id = id.to_string();
        self
    }

    pub fn url(mut self, url: &str) -> Self {
        self.bookmark.url = url.to_string();
        self
    }

    pub fn categories(mut self, ids: &[&str]) -> Self {
        self.bookmark.category_ids = ids.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn rating(mut self, rating: u8) -> Self {
        self.bookmark.rating = rating;
        self
    }

    pub fn minutes_ago(mut self, minutes: i64) -> Self {
        self.bookmark.created_at = base_time() - Duration::minutes(minutes);
        self
    }

    pub fn app(mut self) -> Self {
        self.bookmark.kind = BookmarkKind::App;
        self
    }

    pub fn pinned(mut self) -> Self {
        self.bookmark.pinned = true;
        self
    }

    pub fn favorite(mut self) -> Self {
        self.bookmark.favorite = true;
        self
    }

    pub fn private(mut self) -> Self {
        self.bookmark.private = true;
        self
    }

    pub fn build(self) -> Bookmark {
        self.bookmark
    }
}

/// Default state (seed categories, no PIN) holding `bookmarks`.
pub fn state_with(bookmarks: Vec<Bookmark>) -> AppState {
    AppState {
        bookmarks,
        ..Default::default()
    }
}

pub fn draft(name: &str, categories: &[&str]) -> BookmarkDraft {
    BookmarkDraft::new(
        name,
        format!("https://{}.example", name.to_lowercase()),
        categories.iter().map(|s| s.to_string()).collect(),
    )
}

pub fn mem_api() -> MemApi {
    ShelfApi::new(KvStore::with_backend(MemBackend::new())).expect("empty store always loads")
}

/// A filesystem-backed API in a temporary data directory.
pub struct TestEnv {
    // We keep _temp_dir to ensure the directory is not dropped until the test is done
    pub _temp_dir: TempDir,
    pub root: PathBuf,
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

impl TestEnv {
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("failed to create temp dir");
        let root = temp_dir.path().to_path_buf();
        Self {
            _temp_dir: temp_dir,
            root,
        }
    }

    /// Opens a new session on the directory, as a fresh process would.
    pub fn open(&self) -> ShelfApi<KvStore<FsBackend>> {
        ShelfApi::new(KvStore::with_backend(FsBackend::new(self.root.clone())))
            .expect("failed to open test store")
    }
}
