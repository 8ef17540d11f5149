use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::{AppState, Bookmark, BookmarkDraft};
use crate::store::DataStore;
use crate::validation::validate_draft;

/// Adds a bookmark built from `draft`. A private bookmark may be added while the
/// Private Space is locked; it simply does not show up until unlocked.
pub fn run<S: DataStore>(store: &mut S, state: &mut AppState, draft: BookmarkDraft) -> Result<CmdResult> {
    let draft = validate_draft(state, draft)?;
    let bookmark = Bookmark::new(draft);

    let mut next = state.bookmarks.clone();
    next.push(bookmark.clone());
    store.save_bookmarks(&next)?;
    state.bookmarks = next;

    let mut result = CmdResult::default();
    let place = if bookmark.private { " to Private Space" } else { "" };
    result.add_message(CmdMessage::success(format!(
        "Added{}: {}",
        place, bookmark.name
    )));
    Ok(result.with_affected_bookmarks(vec![bookmark]))
}
