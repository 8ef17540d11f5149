use crate::commands::helpers::resolve_bookmarks;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::{AppState, Bookmark};
use crate::store::DataStore;

pub fn pin<S: DataStore, I: AsRef<str>>(
    store: &mut S,
    state: &mut AppState,
    selectors: &[I],
) -> Result<CmdResult> {
    set_flag(store, state, selectors, |b| b.pinned = true, "Pinned")
}

pub fn unpin<S: DataStore, I: AsRef<str>>(
    store: &mut S,
    state: &mut AppState,
    selectors: &[I],
) -> Result<CmdResult> {
    set_flag(store, state, selectors, |b| b.pinned = false, "Unpinned")
}

/// Flips the favorite flag of each selected bookmark independently.
pub fn toggle_favorite<S: DataStore, I: AsRef<str>>(
    store: &mut S,
    state: &mut AppState,
    selectors: &[I],
) -> Result<CmdResult> {
    let positions = resolve_bookmarks(state, selectors)?;

    let mut next = state.bookmarks.clone();
    let mut affected = Vec::with_capacity(positions.len());
    let mut result = CmdResult::default();
    for pos in positions {
        let bookmark = &mut next[pos];
        bookmark.favorite = !bookmark.favorite;
        let verb = if bookmark.favorite {
            "Added to favorites"
        } else {
            "Removed from favorites"
        };
        result.add_message(CmdMessage::success(format!("{}: {}", verb, bookmark.name)));
        affected.push(bookmark.clone());
    }

    store.save_bookmarks(&next)?;
    state.bookmarks = next;
    Ok(result.with_affected_bookmarks(affected))
}

fn set_flag<S, I, F>(
    store: &mut S,
    state: &mut AppState,
    selectors: &[I],
    change: F,
    verb: &str,
) -> Result<CmdResult>
where
    S: DataStore,
    I: AsRef<str>,
    F: Fn(&mut Bookmark),
{
    let positions = resolve_bookmarks(state, selectors)?;

    let mut next = state.bookmarks.clone();
    let mut affected = Vec::with_capacity(positions.len());
    let mut result = CmdResult::default();
    for pos in positions {
        change(&mut next[pos]);
        result.add_message(CmdMessage::success(format!("{}: {}", verb, next[pos].name)));
        affected.push(next[pos].clone());
    }

    store.save_bookmarks(&next)?;
    state.bookmarks = next;
    Ok(result.with_affected_bookmarks(affected))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::kv_store::KvStore;
    use crate::store::mem_backend::MemBackend;
    use crate::test_utils::{state_with, BookmarkBuilder};

    #[test]
    fn pin_and_unpin() {
        let mut store = KvStore::with_backend(MemBackend::new());
        let mut state = state_with(vec![BookmarkBuilder::new("a").id("a1").build()]);

        pin(&mut store, &mut state, &["a1"]).unwrap();
        assert!(state.bookmarks[0].pinned);
        assert!(store.load_bookmarks().unwrap()[0].pinned);

        unpin(&mut store, &mut state, &["a1"]).unwrap();
        assert!(!state.bookmarks[0].pinned);
    }

    #[test]
    fn pinning_twice_is_harmless() {
        let mut store = KvStore::with_backend(MemBackend::new());
        let mut state = state_with(vec![BookmarkBuilder::new("a").id("a1").pinned().build()]);
        let result = pin(&mut store, &mut state, &["a1"]).unwrap();
        assert!(result.affected_bookmarks[0].pinned);
    }

    #[test]
    fn favorite_toggles_independently_of_pin() {
        let mut store = KvStore::with_backend(MemBackend::new());
        let mut state = state_with(vec![
            BookmarkBuilder::new("a").id("a1").pinned().build(),
            BookmarkBuilder::new("b").id("b1").favorite().build(),
        ]);

        let result = toggle_favorite(&mut store, &mut state, &["a1", "b1"]).unwrap();

        assert!(state.bookmarks[0].favorite);
        assert!(state.bookmarks[0].pinned);
        assert!(!state.bookmarks[1].favorite);
        assert_eq!(result.messages[0].content, "Added to favorites: a");
        assert_eq!(result.messages[1].content, "Removed from favorites: b");
    }
}
