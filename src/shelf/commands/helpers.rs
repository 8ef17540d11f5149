use crate::error::{Result, ShelfError};
use crate::model::{AppState, Bookmark};

/// Finds the position of the single item whose id is `selector` or starts with it.
/// An exact id match wins over prefix matches.
fn resolve_position<'a, I>(ids: I, selector: &str) -> std::result::Result<Option<usize>, ()>
where
    I: Iterator<Item = &'a str> + Clone,
{
    if let Some(pos) = ids.clone().position(|id| id == selector) {
        return Ok(Some(pos));
    }
    let mut matches = ids
        .enumerate()
        .filter(|(_, id)| id.starts_with(selector))
        .map(|(pos, _)| pos);
    match (matches.next(), matches.next()) {
        (None, _) => Ok(None),
        (Some(pos), None) => Ok(Some(pos)),
        (Some(_), Some(_)) => Err(()),
    }
}

/// Resolves a bookmark id or unique id prefix to its index in `state.bookmarks`.
///
/// Private bookmarks resolve only while the Private Space is unlocked.
pub fn resolve_bookmark(state: &AppState, selector: &str) -> Result<usize> {
    let selector = selector.trim();
    if selector.is_empty() {
        return Err(ShelfError::Api("No bookmark id given".to_string()));
    }
    let ids = state.bookmarks.iter().map(|b| b.id.as_str());
    let pos = resolve_position(ids, selector)
        .map_err(|_| ShelfError::AmbiguousId(selector.to_string()))?
        .ok_or_else(|| ShelfError::BookmarkNotFound(selector.to_string()))?;

    if state.bookmarks[pos].private {
        require_unlocked(state)?;
    }
    Ok(pos)
}

/// Resolves every selector, failing on the first one that does not resolve.
/// Duplicates are dropped, keeping first-seen order.
pub fn resolve_bookmarks<I: AsRef<str>>(state: &AppState, selectors: &[I]) -> Result<Vec<usize>> {
    let mut positions = Vec::with_capacity(selectors.len());
    for selector in selectors {
        let pos = resolve_bookmark(state, selector.as_ref())?;
        if !positions.contains(&pos) {
            positions.push(pos);
        }
    }
    Ok(positions)
}

/// Resolves a category id or unique id prefix to its id. A category name matches too
/// (case-insensitive) when no id does.
pub fn resolve_category(state: &AppState, selector: &str) -> Result<String> {
    let selector = selector.trim();
    let ids = state.categories.iter().map(|c| c.id.as_str());
    match resolve_position(ids, selector) {
        Ok(Some(pos)) => return Ok(state.categories[pos].id.clone()),
        Err(()) => return Err(ShelfError::AmbiguousId(selector.to_string())),
        Ok(None) => {}
    }

    let mut by_name = state
        .categories
        .iter()
        .filter(|c| c.name.eq_ignore_ascii_case(selector));
    match (by_name.next(), by_name.next()) {
        (Some(category), None) => Ok(category.id.clone()),
        (Some(_), Some(_)) => Err(ShelfError::AmbiguousId(selector.to_string())),
        (None, _) => Err(ShelfError::CategoryNotFound(selector.to_string())),
    }
}

pub fn resolve_categories<I: AsRef<str>>(state: &AppState, selectors: &[I]) -> Result<Vec<String>> {
    selectors
        .iter()
        .map(|s| resolve_category(state, s.as_ref()))
        .collect()
}

pub fn require_unlocked(state: &AppState) -> Result<()> {
    if state.private_space.is_unlocked() {
        Ok(())
    } else {
        Err(ShelfError::PrivateSpaceLocked)
    }
}

/// Display names of a bookmark's categories, skipping ids with no category.
pub fn category_names(state: &AppState, bookmark: &Bookmark) -> Vec<String> {
    bookmark
        .category_ids
        .iter()
        .filter_map(|id| state.category(id))
        .map(|c| c.name.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::BookmarkBuilder;

    fn state_with(ids: &[&str]) -> AppState {
        let mut state = AppState::default();
        state.bookmarks = ids
            .iter()
            .map(|id| BookmarkBuilder::new(id).id(id).build())
            .collect();
        state
    }

    #[test]
    fn resolves_unique_prefix() {
        let state = state_with(&["abc123", "def456"]);
        assert_eq!(resolve_bookmark(&state, "de").unwrap(), 1);
    }

    #[test]
    fn exact_match_beats_prefix() {
        let state = state_with(&["ab", "abc"]);
        assert_eq!(resolve_bookmark(&state, "ab").unwrap(), 0);
    }

    #[test]
    fn ambiguous_prefix_is_an_error() {
        let state = state_with(&["abc1", "abc2"]);
        assert!(matches!(
            resolve_bookmark(&state, "abc"),
            Err(ShelfError::AmbiguousId(_))
        ));
    }

    #[test]
    fn unknown_id_is_not_found() {
        let state = state_with(&["abc"]);
        assert!(matches!(
            resolve_bookmark(&state, "zzz"),
            Err(ShelfError::BookmarkNotFound(_))
        ));
    }

    #[test]
    fn private_bookmark_needs_unlocked_space() {
        let mut state = AppState::default();
        state.bookmarks = vec![BookmarkBuilder::new("s").id("secret").private().build()];
        state.private_space.set_pin("1234");
        state.private_space.lock();
        assert!(matches!(
            resolve_bookmark(&state, "secret"),
            Err(ShelfError::PrivateSpaceLocked)
        ));

        state.private_space.unlock("1234");
        assert_eq!(resolve_bookmark(&state, "secret").unwrap(), 0);
    }

    #[test]
    fn duplicates_collapse() {
        let state = state_with(&["a1", "b2"]);
        assert_eq!(resolve_bookmarks(&state, &["b", "a1", "b2"]).unwrap(), vec![1, 0]);
    }

    #[test]
    fn category_by_id_prefix_or_name() {
        let state = AppState::default();
        assert_eq!(resolve_category(&state, "lin").unwrap(), "links");
        assert_eq!(resolve_category(&state, "design").unwrap(), "2");
        assert!(matches!(
            resolve_category(&state, "Music"),
            Err(ShelfError::CategoryNotFound(_))
        ));
    }
}
