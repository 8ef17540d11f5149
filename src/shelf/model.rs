//! Core data types: [`Bookmark`], [`Category`] and the owned [`AppState`].
//!
//! Older records store a single `categoryId` instead of the `categoryIds` set. That
//! fallback is resolved exactly once, when a record is deserialized, so the rest of
//! the crate only ever sees the canonical `category_ids` field. Writing a bookmark
//! emits both fields, keeping the first id in `categoryId` for older readers.

use crate::access::PrivateSpace;
use crate::settings::AppSettings;
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Name of the category that the "hide Links from All" setting refers to.
pub const LINKS_CATEGORY_NAME: &str = "Links";

pub static DEFAULT_CATEGORIES: Lazy<Vec<Category>> = Lazy::new(|| {
    vec![
        Category::with_id("1", "Development", CategoryColor::Blue),
        Category::with_id("2", "Design", CategoryColor::Purple),
        Category::with_id("3", "Productivity", CategoryColor::Green),
        Category::with_id("4", "Entertainment", CategoryColor::Pink),
        Category::with_id("links", LINKS_CATEGORY_NAME, CategoryColor::Orange),
    ]
});

pub fn default_categories() -> Vec<Category> {
    DEFAULT_CATEGORIES.clone()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookmarkKind {
    #[default]
    Website,
    App,
}

impl fmt::Display for BookmarkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BookmarkKind::Website => write!(f, "website"),
            BookmarkKind::App => write!(f, "app"),
        }
    }
}

impl FromStr for BookmarkKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "website" | "web" => Ok(BookmarkKind::Website),
            "app" | "application" => Ok(BookmarkKind::App),
            other => Err(format!("Unknown bookmark type: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "StoredBookmark", into = "StoredBookmark")]
pub struct Bookmark {
    pub id: String,
    pub name: String,
    pub url: String,
    pub category_ids: Vec<String>,
    pub description: String,
    pub notes: String,
    /// 0 means unrated, otherwise 1-5.
    pub rating: u8,
    pub kind: BookmarkKind,
    pub play_store_url: Option<String>,
    pub pinned: bool,
    pub favorite: bool,
    pub private: bool,
    pub created_at: DateTime<Utc>,
}

impl Bookmark {
    pub fn new(draft: BookmarkDraft) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: draft.name,
            url: draft.url,
            category_ids: draft.category_ids,
            description: draft.description,
            notes: draft.notes,
            rating: draft.rating,
            kind: draft.kind,
            play_store_url: draft.play_store_url,
            pinned: draft.pinned,
            favorite: draft.favorite,
            private: draft.private,
            created_at: Utc::now(),
        }
    }

    /// Replaces every mutable field, keeping `id` and `created_at`.
    pub fn apply(&mut self, draft: BookmarkDraft) {
        self.name = draft.name;
        self.url = draft.url;
        self.category_ids = draft.category_ids;
        self.description = draft.description;
        self.notes = draft.notes;
        self.rating = draft.rating;
        self.kind = draft.kind;
        self.play_store_url = draft.play_store_url;
        self.pinned = draft.pinned;
        self.favorite = draft.favorite;
        self.private = draft.private;
    }

    /// The editable fields of this bookmark, e.g. to pre-fill an edit.
    pub fn to_draft(&self) -> BookmarkDraft {
        BookmarkDraft {
            name: self.name.clone(),
            url: self.url.clone(),
            category_ids: self.category_ids.clone(),
            description: self.description.clone(),
            notes: self.notes.clone(),
            rating: self.rating,
            kind: self.kind,
            play_store_url: self.play_store_url.clone(),
            pinned: self.pinned,
            favorite: self.favorite,
            private: self.private,
        }
    }

    pub fn in_category(&self, category_id: &str) -> bool {
        self.category_ids.iter().any(|id| id == category_id)
    }
}

/// Wire shape of a bookmark. Accepts both the legacy `categoryId` and `categoryIds`.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredBookmark {
    id: String,
    name: String,
    url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    category_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    category_ids: Option<Vec<String>>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    rating: u8,
    #[serde(default)]
    notes: Option<String>,
    created_at: DateTime<Utc>,
    #[serde(rename = "type", default)]
    kind: BookmarkKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    play_store_url: Option<String>,
    #[serde(default)]
    pinned: bool,
    #[serde(default)]
    favorite: bool,
    #[serde(default)]
    private: bool,
}

impl From<StoredBookmark> for Bookmark {
    fn from(stored: StoredBookmark) -> Self {
        let category_ids = stored
            .category_ids
            .unwrap_or_else(|| stored.category_id.into_iter().collect());

        Self {
            id: stored.id,
            name: stored.name,
            url: stored.url,
            category_ids,
            description: stored.description.unwrap_or_default(),
            notes: stored.notes.unwrap_or_default(),
            rating: stored.rating,
            kind: stored.kind,
            play_store_url: stored.play_store_url.filter(|u| !u.is_empty()),
            pinned: stored.pinned,
            favorite: stored.favorite,
            private: stored.private,
            created_at: stored.created_at,
        }
    }
}

impl From<Bookmark> for StoredBookmark {
    fn from(bookmark: Bookmark) -> Self {
        Self {
            id: bookmark.id,
            name: bookmark.name,
            url: bookmark.url,
            category_id: bookmark.category_ids.first().cloned(),
            category_ids: Some(bookmark.category_ids),
            description: Some(bookmark.description),
            rating: bookmark.rating,
            notes: Some(bookmark.notes),
            created_at: bookmark.created_at,
            kind: bookmark.kind,
            play_store_url: bookmark.play_store_url,
            pinned: bookmark.pinned,
            favorite: bookmark.favorite,
            private: bookmark.private,
        }
    }
}

/// The user-editable part of a bookmark, as submitted by a create or edit form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookmarkDraft {
    pub name: String,
    pub url: String,
    pub category_ids: Vec<String>,
    pub description: String,
    pub notes: String,
    pub rating: u8,
    pub kind: BookmarkKind,
    pub play_store_url: Option<String>,
    pub pinned: bool,
    pub favorite: bool,
    pub private: bool,
}

impl BookmarkDraft {
    pub fn new(name: impl Into<String>, url: impl Into<String>, category_ids: Vec<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            category_ids,
            ..Default::default()
        }
    }
}

/// Palette tokens for categories. Unknown stored values read back as `Blue`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CategoryColor {
    #[default]
    Blue,
    Green,
    Purple,
    Pink,
    Teal,
    Orange,
}

impl CategoryColor {
    pub const ALL: [CategoryColor; 6] = [
        CategoryColor::Blue,
        CategoryColor::Green,
        CategoryColor::Purple,
        CategoryColor::Pink,
        CategoryColor::Teal,
        CategoryColor::Orange,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryColor::Blue => "blue",
            CategoryColor::Green => "green",
            CategoryColor::Purple => "purple",
            CategoryColor::Pink => "pink",
            CategoryColor::Teal => "teal",
            CategoryColor::Orange => "orange",
        }
    }
}

impl fmt::Display for CategoryColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CategoryColor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CategoryColor::ALL
            .iter()
            .copied()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("Unknown color: {}", s))
    }
}

impl From<String> for CategoryColor {
    fn from(value: String) -> Self {
        value.parse().unwrap_or_default()
    }
}

impl From<CategoryColor> for String {
    fn from(color: CategoryColor) -> Self {
        color.as_str().to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub color: CategoryColor,
}

impl Category {
    pub fn new(name: impl Into<String>, color: CategoryColor) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), name, color)
    }

    pub fn with_id(id: impl Into<String>, name: impl Into<String>, color: CategoryColor) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            color,
        }
    }
}

/// Everything the application holds in memory: the persisted collections plus the
/// session state of the Private Space. Owned by the API and passed to commands.
#[derive(Debug, Clone)]
pub struct AppState {
    pub bookmarks: Vec<Bookmark>,
    pub categories: Vec<Category>,
    pub settings: AppSettings,
    pub private_space: PrivateSpace,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            bookmarks: Vec::new(),
            categories: default_categories(),
            settings: AppSettings::default(),
            private_space: PrivateSpace::default(),
        }
    }
}

impl AppState {
    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    pub fn bookmark(&self, id: &str) -> Option<&Bookmark> {
        self.bookmarks.iter().find(|b| b.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn legacy_category_id_becomes_category_set() {
        let raw = json!({
            "id": "a1",
            "name": "GitHub",
            "url": "https://github.com",
            "categoryId": "1",
            "description": "",
            "rating": 4,
            "notes": "",
            "createdAt": "2024-03-01T10:00:00.000Z",
            "type": "website"
        });
        let bookmark: Bookmark = serde_json::from_value(raw).unwrap();
        assert_eq!(bookmark.category_ids, vec!["1".to_string()]);
        assert!(!bookmark.pinned);
        assert!(!bookmark.private);
    }

    #[test]
    fn category_ids_take_precedence_over_legacy_field() {
        let raw = json!({
            "id": "a1",
            "name": "GitHub",
            "url": "https://github.com",
            "categoryId": "1",
            "categoryIds": ["2", "3"],
            "createdAt": "2024-03-01T10:00:00Z"
        });
        let bookmark: Bookmark = serde_json::from_value(raw).unwrap();
        assert_eq!(bookmark.category_ids, vec!["2".to_string(), "3".to_string()]);
        assert_eq!(bookmark.kind, BookmarkKind::Website);
        assert_eq!(bookmark.rating, 0);
    }

    #[test]
    fn serialized_bookmark_keeps_legacy_field_for_old_readers() {
        let bookmark = Bookmark::new(BookmarkDraft::new(
            "Docs",
            "https://docs.rs",
            vec!["2".into(), "1".into()],
        ));
        let value = serde_json::to_value(&bookmark).unwrap();
        assert_eq!(value["categoryId"], "2");
        assert_eq!(value["categoryIds"], json!(["2", "1"]));
        assert_eq!(value["type"], "website");
        assert!(value.get("createdAt").is_some());
    }

    #[test]
    fn unknown_color_falls_back_to_blue() {
        let category: Category =
            serde_json::from_value(json!({"id": "x", "name": "X", "color": "magenta"})).unwrap();
        assert_eq!(category.color, CategoryColor::Blue);
    }

    #[test]
    fn color_parse_is_strict() {
        assert_eq!("Teal".parse::<CategoryColor>(), Ok(CategoryColor::Teal));
        assert!("magenta".parse::<CategoryColor>().is_err());
    }

    #[test]
    fn apply_keeps_identity() {
        let mut bookmark = Bookmark::new(BookmarkDraft::new("Old", "https://a", vec!["1".into()]));
        let id = bookmark.id.clone();
        let created = bookmark.created_at;

        let mut draft = bookmark.to_draft();
        draft.name = "New".into();
        draft.pinned = true;
        bookmark.apply(draft);

        assert_eq!(bookmark.id, id);
        assert_eq!(bookmark.created_at, created);
        assert_eq!(bookmark.name, "New");
        assert!(bookmark.pinned);
    }

    #[test]
    fn default_state_seeds_links_category() {
        let state = AppState::default();
        assert_eq!(state.categories.len(), 5);
        assert_eq!(
            state.category("links").map(|c| c.name.as_str()),
            Some(LINKS_CATEGORY_NAME)
        );
    }
}
