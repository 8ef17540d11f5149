use crate::commands::helpers::resolve_bookmarks;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::{AppState, Bookmark};
use crate::store::DataStore;

/// Permanently removes the selected bookmarks. All selectors are resolved before
/// anything is removed, so one bad selector deletes nothing.
pub fn run<S: DataStore, I: AsRef<str>>(
    store: &mut S,
    state: &mut AppState,
    selectors: &[I],
) -> Result<CmdResult> {
    let positions = resolve_bookmarks(state, selectors)?;

    let (removed, kept): (Vec<(usize, Bookmark)>, Vec<(usize, Bookmark)>) = state
        .bookmarks
        .iter()
        .cloned()
        .enumerate()
        .partition(|(pos, _)| positions.contains(pos));
    let removed: Vec<Bookmark> = removed.into_iter().map(|(_, b)| b).collect();
    let kept: Vec<Bookmark> = kept.into_iter().map(|(_, b)| b).collect();

    store.save_bookmarks(&kept)?;
    state.bookmarks = kept;

    let mut result = CmdResult::default();
    for bookmark in &removed {
        result.add_message(CmdMessage::success(format!("Deleted: {}", bookmark.name)));
    }
    Ok(result.with_affected_bookmarks(removed))
}
