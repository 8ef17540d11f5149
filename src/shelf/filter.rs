//! # View Derivation
//!
//! Turns the full bookmark collection into the ordered list a client renders. The
//! derivation is a pure function of its inputs and is recomputed on every call; no
//! intermediate state is kept.
//!
//! ## Pipeline
//!
//! 1. **Partition**: the main view keeps non-private bookmarks, the private view keeps
//!    private ones. No bookmark is in both.
//! 2. **Links suppression** (main view, no category filter): when the settings ask
//!    for it, bookmarks in the category named "Links" are dropped.
//! 3. **Search**: case-insensitive substring match on the name only.
//! 4. **Category**: favorites-only, one category id, or nothing. Never combined.
//! 5. **Type**: website or app, or both.
//! 6. **Primary sort**: by name, rating or recency. Stable.
//! 7. **Pin override**: a second stable pass floats pinned bookmarks above unpinned
//!    ones while keeping the primary order inside each group. This pass always runs,
//!    whatever the category filter.
//!
//! [`category_counts`] and [`view_total`] feed the category board next to the list.

use crate::model::{Bookmark, BookmarkKind, Category, LINKS_CATEGORY_NAME};
use crate::settings::AppSettings;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Category filter value that selects favorites instead of a category.
pub const FAVORITES_SENTINEL: &str = "_favorite_";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum View {
    #[default]
    Main,
    Private,
}

impl View {
    pub fn contains(&self, bookmark: &Bookmark) -> bool {
        match self {
            View::Main => !bookmark.private,
            View::Private => bookmark.private,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Favorites,
    Category(String),
}

impl CategoryFilter {
    /// Maps the single-select control value: `None` is no filter, the sentinel is
    /// favorites, anything else a category id.
    pub fn from_selection(selected: Option<&str>) -> Self {
        match selected {
            None => CategoryFilter::All,
            Some(FAVORITES_SENTINEL) => CategoryFilter::Favorites,
            Some(id) => CategoryFilter::Category(id.to_string()),
        }
    }

    fn matches(&self, bookmark: &Bookmark) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Favorites => bookmark.favorite,
            CategoryFilter::Category(id) => bookmark.in_category(id),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TypeFilter {
    #[default]
    All,
    Website,
    App,
}

impl TypeFilter {
    fn matches(&self, bookmark: &Bookmark) -> bool {
        match self {
            TypeFilter::All => true,
            TypeFilter::Website => bookmark.kind == BookmarkKind::Website,
            TypeFilter::App => bookmark.kind == BookmarkKind::App,
        }
    }
}

impl FromStr for TypeFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "all" => Ok(TypeFilter::All),
            "website" | "web" => Ok(TypeFilter::Website),
            "app" | "application" => Ok(TypeFilter::App),
            other => Err(format!("Unknown type filter: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    Name,
    Rating,
    #[default]
    Recent,
}

impl SortKey {
    fn compare(&self, a: &Bookmark, b: &Bookmark) -> Ordering {
        match self {
            SortKey::Name => compare_names(&a.name, &b.name),
            SortKey::Rating => b.rating.cmp(&a.rating),
            SortKey::Recent => b.created_at.cmp(&a.created_at),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortKey::Name => write!(f, "name"),
            SortKey::Rating => write!(f, "rating"),
            SortKey::Recent => write!(f, "recent"),
        }
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "name" => Ok(SortKey::Name),
            "rating" => Ok(SortKey::Rating),
            "recent" => Ok(SortKey::Recent),
            other => Err(format!("Unknown sort key: {}", other)),
        }
    }
}

/// Dictionary-style name order. Base letters decide first; accents and then case
/// only break ties, with lowercase before uppercase.
fn compare_names(a: &str, b: &str) -> Ordering {
    base_letters(a)
        .cmp(&base_letters(b))
        .then_with(|| a.to_lowercase().nfd().cmp(b.to_lowercase().nfd()))
        .then_with(|| b.cmp(a))
}

/// Lowercased name with diacritics stripped, so "Éclair" sorts with "eclair".
fn base_letters(name: &str) -> String {
    name.nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
}

/// Everything the user chose in the filter bar.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookmarkQuery {
    pub view: View,
    pub search: String,
    pub category: CategoryFilter,
    pub kind: TypeFilter,
    pub sort: SortKey,
    /// Category dropped from the unfiltered main view, see [`links_category_to_hide`].
    pub hidden_category: Option<String>,
}

/// The Links category id, when settings ask to keep it out of the unfiltered view.
pub fn links_category_to_hide(settings: &AppSettings, categories: &[Category]) -> Option<String> {
    if !settings.hide_links_from_all {
        return None;
    }
    categories
        .iter()
        .find(|c| c.name == LINKS_CATEGORY_NAME)
        .map(|c| c.id.clone())
}

pub fn filter_bookmarks(bookmarks: &[Bookmark], query: &BookmarkQuery) -> Vec<Bookmark> {
    let hidden = match (query.view, &query.category, &query.hidden_category) {
        (View::Main, CategoryFilter::All, Some(id)) => Some(id.as_str()),
        _ => None,
    };
    let needle = query.search.to_lowercase();

    let mut result: Vec<Bookmark> = bookmarks
        .iter()
        .filter(|b| query.view.contains(b))
        .filter(|b| hidden.map_or(true, |id| !b.in_category(id)))
        .filter(|b| needle.is_empty() || b.name.to_lowercase().contains(&needle))
        .filter(|b| query.category.matches(b))
        .filter(|b| query.kind.matches(b))
        .cloned()
        .collect();

    result.sort_by(|a, b| query.sort.compare(a, b));
    result.sort_by_key(|b| !b.pinned);
    result
}

/// Bookmarks per category id within one view. A bookmark counts once for every
/// category in its set.
pub fn category_counts(bookmarks: &[Bookmark], view: View) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for bookmark in bookmarks.iter().filter(|b| view.contains(b)) {
        for id in &bookmark.category_ids {
            *counts.entry(id.clone()).or_insert(0) += 1;
        }
    }
    counts
}

pub fn view_total(bookmarks: &[Bookmark], view: View) -> usize {
    bookmarks.iter().filter(|b| view.contains(b)).count()
}
