//! Category management and the category board.
//!
//! Deleting a category removes its id from every bookmark. A bookmark filed only under
//! the deleted category has nowhere left to live and is deleted with it. This runs over
//! private bookmarks too, whatever the lock state; it never reveals them.

use crate::commands::helpers::{require_unlocked, resolve_category};
use crate::commands::{CategoryCount, CmdMessage, CmdResult};
use crate::error::Result;
use crate::filter::{category_counts, view_total, View};
use crate::model::{AppState, Bookmark, Category, CategoryColor};
use crate::store::DataStore;
use crate::validation::validate_category_name;

/// Every category with its bookmark count in `view`, plus the view total.
///
/// The private board only lists categories that hold at least one private bookmark.
pub fn list(state: &AppState, view: View) -> Result<CmdResult> {
    if view == View::Private {
        require_unlocked(state)?;
    }
    let counts = category_counts(&state.bookmarks, view);
    let mut result = CmdResult::default();
    result.categories = state
        .categories
        .iter()
        .map(|category| CategoryCount {
            category: category.clone(),
            count: counts.get(&category.id).copied().unwrap_or(0),
        })
        .filter(|entry| view == View::Main || entry.count > 0)
        .collect();
    result.view_total = Some(view_total(&state.bookmarks, view));
    Ok(result)
}

pub fn add<S: DataStore>(
    store: &mut S,
    state: &mut AppState,
    name: &str,
    color: CategoryColor,
) -> Result<CmdResult> {
    let name = validate_category_name(name)?;
    let category = Category::new(name, color);

    let mut next = state.categories.clone();
    next.push(category.clone());
    store.save_categories(&next)?;
    state.categories = next;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Category added: {}",
        category.name
    )));
    result.categories.push(CategoryCount { category, count: 0 });
    Ok(result)
}

/// Renames and/or recolors a category. `None` keeps the current value.
pub fn update<S: DataStore>(
    store: &mut S,
    state: &mut AppState,
    selector: &str,
    name: Option<&str>,
    color: Option<CategoryColor>,
) -> Result<CmdResult> {
    let id = resolve_category(state, selector)?;
    let name = name.map(validate_category_name).transpose()?;

    let mut next = state.categories.clone();
    let mut updated = None;
    for category in next.iter_mut().filter(|c| c.id == id) {
        if let Some(name) = &name {
            category.name = name.clone();
        }
        if let Some(color) = color {
            category.color = color;
        }
        updated = Some(category.clone());
    }
    store.save_categories(&next)?;
    state.categories = next;

    let mut result = CmdResult::default();
    if let Some(category) = updated {
        result.add_message(CmdMessage::success(format!(
            "Category updated: {}",
            category.name
        )));
        result.categories.push(CategoryCount { category, count: 0 });
    }
    Ok(result)
}

pub fn delete<S: DataStore>(store: &mut S, state: &mut AppState, selector: &str) -> Result<CmdResult> {
    let id = resolve_category(state, selector)?;

    let categories: Vec<Category> = state
        .categories
        .iter()
        .filter(|c| c.id != id)
        .cloned()
        .collect();
    let removed_category = state.categories.iter().find(|c| c.id == id).cloned();

    let (bookmarks, orphaned) = detach_category(&state.bookmarks, &id);

    store.save_collections(&bookmarks, &categories)?;
    state.categories = categories;
    state.bookmarks = bookmarks;

    let mut result = CmdResult::default();
    if let Some(category) = removed_category {
        result.add_message(CmdMessage::success(format!(
            "Category deleted: {}",
            category.name
        )));
    }
    let visible_orphans = orphaned
        .iter()
        .filter(|b| !b.private || state.private_space.is_unlocked())
        .count();
    if visible_orphans > 0 {
        result.add_message(CmdMessage::warning(format!(
            "Deleted {} bookmark(s) that had no other category",
            visible_orphans
        )));
    }
    Ok(result)
}

/// Removes `id` from every bookmark's set. Returns the bookmarks that remain and the
/// ones dropped because the set became empty.
fn detach_category(bookmarks: &[Bookmark], id: &str) -> (Vec<Bookmark>, Vec<Bookmark>) {
    let mut kept = Vec::with_capacity(bookmarks.len());
    let mut dropped = Vec::new();
    for bookmark in bookmarks {
        if !bookmark.in_category(id) {
            kept.push(bookmark.clone());
            continue;
        }
        let mut bookmark = bookmark.clone();
        bookmark.category_ids.retain(|c| c != id);
        if bookmark.category_ids.is_empty() {
            dropped.push(bookmark);
        } else {
            kept.push(bookmark);
        }
    }
    (kept, dropped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::kv_store::KvStore;
    use crate::store::mem_backend::MemBackend;
    use crate::test_utils::{state_with, BookmarkBuilder};

    #[test]
    fn board_counts_main_view() {
        let state = state_with(vec![
            BookmarkBuilder::new("a").categories(&["1", "2"]).build(),
            BookmarkBuilder::new("b").categories(&["1"]).build(),
            BookmarkBuilder::new("c").categories(&["1"]).private().build(),
        ]);
        let result = list(&state, View::Main).unwrap();
        let count_of = |id: &str| {
            result
                .categories
                .iter()
                .find(|e| e.category.id == id)
                .map(|e| e.count)
        };
        assert_eq!(count_of("1"), Some(2));
        assert_eq!(count_of("2"), Some(1));
        assert_eq!(count_of("3"), Some(0));
        assert_eq!(result.view_total, Some(2));
    }

    #[test]
    fn private_board_lists_only_used_categories() {
        let mut state = state_with(vec![
            BookmarkBuilder::new("c").categories(&["3"]).private().build(),
            BookmarkBuilder::new("d").categories(&["1"]).build(),
        ]);
        assert!(list(&state, View::Private).is_err());

        state.private_space.set_pin("1234");
        let result = list(&state, View::Private).unwrap();
        assert_eq!(result.categories.len(), 1);
        assert_eq!(result.categories[0].category.id, "3");
        assert_eq!(result.view_total, Some(1));
    }

    #[test]
    fn add_and_rename() {
        let mut store = KvStore::with_backend(MemBackend::new());
        let mut state = AppState::default();

        let added = add(&mut store, &mut state, " Music ", CategoryColor::Teal).unwrap();
        let id = added.categories[0].category.id.clone();
        assert_eq!(state.categories.len(), 6);
        assert_eq!(state.category(&id).map(|c| c.name.as_str()), Some("Music"));

        update(&mut store, &mut state, &id, Some("Audio"), None).unwrap();
        let category = state.category(&id).cloned().unwrap();
        assert_eq!(category.name, "Audio");
        assert_eq!(category.color, CategoryColor::Teal);
        assert_eq!(store.load_categories().unwrap(), state.categories);
    }

    #[test]
    fn blank_name_is_rejected() {
        let mut store = KvStore::with_backend(MemBackend::new());
        let mut state = AppState::default();
        assert!(add(&mut store, &mut state, "  ", CategoryColor::Blue).is_err());
        assert!(update(&mut store, &mut state, "1", Some(""), None).is_err());
    }

    #[test]
    fn delete_cascades_to_bookmarks() {
        let mut store = KvStore::with_backend(MemBackend::new());
        let mut state = state_with(vec![
            BookmarkBuilder::new("shared").id("s").categories(&["1", "2"]).build(),
            BookmarkBuilder::new("only").id("o").categories(&["2"]).build(),
            BookmarkBuilder::new("other").id("x").categories(&["3"]).build(),
        ]);

        let result = delete(&mut store, &mut state, "2").unwrap();

        assert!(state.category("2").is_none());
        let ids: Vec<&str> = state.bookmarks.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["s", "x"]);
        assert_eq!(state.bookmarks[0].category_ids, vec!["1".to_string()]);
        assert!(state
            .bookmarks
            .iter()
            .all(|b| !b.category_ids.is_empty() && !b.in_category("2")));
        assert_eq!(store.load_bookmarks().unwrap(), state.bookmarks);
        assert!(result.messages.iter().any(|m| m.content.contains("1 bookmark")));
    }

    #[test]
    fn failed_delete_leaves_storage_consistent() {
        use crate::store::{BOOKMARKS_KEY, CATEGORIES_KEY};

        for key in [BOOKMARKS_KEY, CATEGORIES_KEY] {
            let mut store = KvStore::with_backend(MemBackend::new());
            let mut state = state_with(vec![BookmarkBuilder::new("only2")
                .categories(&["2"])
                .build()]);
            store
                .save_collections(&state.bookmarks, &state.categories)
                .unwrap();
            store.backend.fail_writes_to(key);

            assert!(delete(&mut store, &mut state, "2").is_err());

            let stored = store.load_state().unwrap();
            assert!(stored.category("2").is_some());
            assert_eq!(stored.bookmarks, state.bookmarks);
            assert_eq!(stored.categories, state.categories);
        }
    }

    #[test]
    fn delete_reaches_private_bookmarks_when_locked() {
        let mut store = KvStore::with_backend(MemBackend::new());
        let mut state = state_with(vec![BookmarkBuilder::new("p")
            .categories(&["4"])
            .private()
            .build()]);

        let result = delete(&mut store, &mut state, "4").unwrap();

        assert!(state.bookmarks.is_empty());
        assert_eq!(result.messages.len(), 1);
    }
}
