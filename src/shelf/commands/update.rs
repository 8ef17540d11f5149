use crate::commands::helpers::resolve_bookmark;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::{AppState, BookmarkDraft, BookmarkKind};
use crate::store::DataStore;
use crate::validation::validate_draft;

/// Field-by-field changes for an edit. `None` keeps the current value.
#[derive(Debug, Clone, Default)]
pub struct BookmarkPatch {
    pub name: Option<String>,
    pub url: Option<String>,
    pub category_ids: Option<Vec<String>>,
    pub description: Option<String>,
    pub notes: Option<String>,
    pub rating: Option<u8>,
    pub kind: Option<BookmarkKind>,
    /// `Some(None)` clears the Play Store link.
    pub play_store_url: Option<Option<String>>,
    pub pinned: Option<bool>,
    pub favorite: Option<bool>,
    pub private: Option<bool>,
}

impl BookmarkPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.url.is_none()
            && self.category_ids.is_none()
            && self.description.is_none()
            && self.notes.is_none()
            && self.rating.is_none()
            && self.kind.is_none()
            && self.play_store_url.is_none()
            && self.pinned.is_none()
            && self.favorite.is_none()
            && self.private.is_none()
    }

    pub fn apply_to(self, mut draft: BookmarkDraft) -> BookmarkDraft {
        if let Some(v) = self.name {
            draft.name = v;
        }
        if let Some(v) = self.url {
            draft.url = v;
        }
        if let Some(v) = self.category_ids {
            draft.category_ids = v;
        }
        if let Some(v) = self.description {
            draft.description = v;
        }
        if let Some(v) = self.notes {
            draft.notes = v;
        }
        if let Some(v) = self.rating {
            draft.rating = v;
        }
        if let Some(v) = self.kind {
            draft.kind = v;
        }
        if let Some(v) = self.play_store_url {
            draft.play_store_url = v;
        }
        if let Some(v) = self.pinned {
            draft.pinned = v;
        }
        if let Some(v) = self.favorite {
            draft.favorite = v;
        }
        if let Some(v) = self.private {
            draft.private = v;
        }
        draft
    }
}

/// Replaces every editable field of one bookmark with `draft`. Id and creation time
/// are kept.
pub fn run<S: DataStore>(
    store: &mut S,
    state: &mut AppState,
    selector: &str,
    draft: BookmarkDraft,
) -> Result<CmdResult> {
    let pos = resolve_bookmark(state, selector)?;
    let draft = validate_draft(state, draft)?;

    let mut next = state.bookmarks.clone();
    next[pos].apply(draft);
    let updated = next[pos].clone();
    store.save_bookmarks(&next)?;
    state.bookmarks = next;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!("Updated: {}", updated.name)));
    Ok(result.with_affected_bookmarks(vec![updated]))
}

/// Applies `patch` on top of the bookmark's current fields.
pub fn patch<S: DataStore>(
    store: &mut S,
    state: &mut AppState,
    selector: &str,
    patch: BookmarkPatch,
) -> Result<CmdResult> {
    let pos = resolve_bookmark(state, selector)?;
    if patch.is_empty() {
        let mut result = CmdResult::default();
        result.add_message(CmdMessage::info("Nothing to change"));
        return Ok(result.with_affected_bookmarks(vec![state.bookmarks[pos].clone()]));
    }
    let draft = patch.apply_to(state.bookmarks[pos].to_draft());
    let id = state.bookmarks[pos].id.clone();
    run(store, state, &id, draft)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ShelfError;
    use crate::store::kv_store::KvStore;
    use crate::store::mem_backend::MemBackend;
    use crate::test_utils::{state_with, BookmarkBuilder};

    #[test]
    fn replaces_fields_and_keeps_identity() {
        let mut store = KvStore::with_backend(MemBackend::new());
        let original = BookmarkBuilder::new("Old").id("b1").minutes_ago(30).build();
        let mut state = state_with(vec![original.clone()]);

        let mut draft = BookmarkDraft::new("New", "https://new", vec!["2".into(), "3".into()]);
        draft.rating = 4;
        run(&mut store, &mut state, "b1", draft).unwrap();

        let edited = &state.bookmarks[0];
        assert_eq!(edited.id, "b1");
        assert_eq!(edited.created_at, original.created_at);
        assert_eq!(edited.name, "New");
        assert_eq!(edited.category_ids, vec!["2".to_string(), "3".to_string()]);
        assert_eq!(store.load_bookmarks().unwrap()[0].rating, 4);
    }

    #[test]
    fn edit_rejects_empty_category_set() {
        let mut store = KvStore::with_backend(MemBackend::new());
        let mut state = state_with(vec![BookmarkBuilder::new("A").id("b1").build()]);
        let draft = BookmarkDraft::new("A", "https://a", vec![]);
        assert!(run(&mut store, &mut state, "b1", draft).is_err());
        assert_eq!(state.bookmarks[0].category_ids, vec!["1".to_string()]);
    }

    #[test]
    fn patch_changes_only_given_fields() {
        let mut store = KvStore::with_backend(MemBackend::new());
        let mut state = state_with(vec![BookmarkBuilder::new("Keep")
            .id("b1")
            .rating(3)
            .favorite()
            .build()]);

        let changes = BookmarkPatch {
            notes: Some("read later".into()),
            ..Default::default()
        };
        patch(&mut store, &mut state, "b1", changes).unwrap();

        let edited = &state.bookmarks[0];
        assert_eq!(edited.name, "Keep");
        assert_eq!(edited.rating, 3);
        assert!(edited.favorite);
        assert_eq!(edited.notes, "read later");
    }

    #[test]
    fn editing_private_bookmark_while_locked_fails() {
        let mut store = KvStore::with_backend(MemBackend::new());
        let mut state = state_with(vec![BookmarkBuilder::new("S").id("s1").private().build()]);
        let changes = BookmarkPatch {
            private: Some(false),
            ..Default::default()
        };
        assert!(matches!(
            patch(&mut store, &mut state, "s1", changes),
            Err(ShelfError::PrivateSpaceLocked)
        ));
        assert!(state.bookmarks[0].private);
    }
}
