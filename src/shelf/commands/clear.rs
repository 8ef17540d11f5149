use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::AppState;
use crate::store::DataStore;

/// Deletes every bookmark, private ones included. Categories, settings and the PIN
/// are kept.
pub fn run<S: DataStore>(store: &mut S, state: &mut AppState) -> Result<CmdResult> {
    store.save_bookmarks(&[])?;
    let removed = std::mem::take(&mut state.bookmarks);

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "All items deleted ({})",
        removed.len()
    )));
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::kv_store::KvStore;
    use crate::store::mem_backend::MemBackend;
    use crate::test_utils::{state_with, BookmarkBuilder};

    #[test]
    fn clears_everything_but_categories() {
        let mut store = KvStore::with_backend(MemBackend::new());
        let mut state = state_with(vec![
            BookmarkBuilder::new("a").build(),
            BookmarkBuilder::new("b").private().build(),
        ]);
        state.private_space.set_pin("1234");

        let result = run(&mut store, &mut state).unwrap();

        assert!(state.bookmarks.is_empty());
        assert_eq!(state.categories.len(), 5);
        assert!(state.private_space.has_pin());
        assert!(store.load_bookmarks().unwrap().is_empty());
        assert_eq!(result.messages[0].content, "All items deleted (2)");
    }
}
