use crate::commands::helpers::{require_unlocked, resolve_bookmarks, resolve_category};
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::filter::{
    filter_bookmarks, links_category_to_hide, view_total, BookmarkQuery, CategoryFilter, SortKey,
    TypeFilter, View, FAVORITES_SENTINEL,
};
use crate::model::AppState;

/// What the user picked in the filter bar, before category selectors are resolved.
#[derive(Debug, Clone, Default)]
pub struct ListOptions {
    pub view: View,
    pub search: String,
    /// A category id, id prefix or name, or the favorites sentinel.
    pub category: Option<String>,
    pub kind: TypeFilter,
    pub sort: SortKey,
}

impl ListOptions {
    pub fn favorites() -> Self {
        Self {
            category: Some(FAVORITES_SENTINEL.to_string()),
            ..Default::default()
        }
    }
}

/// Builds the engine query for `options`, resolving the category selector.
pub fn build_query(state: &AppState, options: &ListOptions) -> Result<BookmarkQuery> {
    let category = match options.category.as_deref() {
        None => CategoryFilter::All,
        Some(FAVORITES_SENTINEL) => CategoryFilter::Favorites,
        Some(selector) => CategoryFilter::Category(resolve_category(state, selector)?),
    };
    Ok(BookmarkQuery {
        view: options.view,
        search: options.search.clone(),
        category,
        kind: options.kind,
        sort: options.sort,
        hidden_category: links_category_to_hide(&state.settings, &state.categories),
    })
}

pub fn run(state: &AppState, options: &ListOptions) -> Result<CmdResult> {
    if options.view == View::Private {
        require_unlocked(state)?;
    }

    let query = build_query(state, options)?;
    let listed = filter_bookmarks(&state.bookmarks, &query);
    let total = view_total(&state.bookmarks, options.view);

    let mut result = CmdResult::default();
    if listed.is_empty() {
        result.add_message(empty_state_message(options.view, total));
    }
    result.view_total = Some(total);
    Ok(result.with_listed_bookmarks(listed))
}

/// The selected bookmarks in selector order, for a detail view.
pub fn view<I: AsRef<str>>(state: &AppState, selectors: &[I]) -> Result<CmdResult> {
    let listed = resolve_bookmarks(state, selectors)?
        .into_iter()
        .map(|pos| state.bookmarks[pos].clone())
        .collect();
    Ok(CmdResult::default().with_listed_bookmarks(listed))
}

fn empty_state_message(view: View, total: usize) -> CmdMessage {
    match (view, total) {
        (View::Main, 0) => CmdMessage::info("Empty. Add one now"),
        (View::Private, 0) => CmdMessage::info("Empty. Mark as private to see them here"),
        _ => CmdMessage::info("No matches found. Try adjusting your search or filters"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ShelfError;
    use crate::test_utils::{state_with, BookmarkBuilder};

    #[test]
    fn lists_main_view_by_default() {
        let state = state_with(vec![
            BookmarkBuilder::new("Public").build(),
            BookmarkBuilder::new("Hidden").private().build(),
        ]);
        let result = run(&state, &ListOptions::default()).unwrap();
        assert_eq!(result.listed_bookmarks.len(), 1);
        assert_eq!(result.view_total, Some(1));
        assert!(result.messages.is_empty());
    }

    #[test]
    fn private_view_requires_unlock() {
        let mut state = state_with(vec![BookmarkBuilder::new("Hidden").private().build()]);
        let options = ListOptions {
            view: View::Private,
            ..Default::default()
        };
        assert!(matches!(
            run(&state, &options),
            Err(ShelfError::PrivateSpaceLocked)
        ));

        state.private_space.set_pin("1234");
        let result = run(&state, &options).unwrap();
        assert_eq!(result.listed_bookmarks[0].name, "Hidden");
    }

    #[test]
    fn empty_collection_says_add_one() {
        let state = state_with(vec![]);
        let result = run(&state, &ListOptions::default()).unwrap();
        assert_eq!(result.messages[0].content, "Empty. Add one now");
    }

    #[test]
    fn no_match_suggests_adjusting_filters() {
        let state = state_with(vec![BookmarkBuilder::new("GitHub").build()]);
        let options = ListOptions {
            search: "reddit".into(),
            ..Default::default()
        };
        let result = run(&state, &options).unwrap();
        assert!(result.listed_bookmarks.is_empty());
        assert!(result.messages[0].content.starts_with("No matches found"));
    }

    #[test]
    fn category_selector_accepts_names() {
        let state = state_with(vec![
            BookmarkBuilder::new("Figma").categories(&["2"]).build(),
            BookmarkBuilder::new("GitHub").categories(&["1"]).build(),
        ]);
        let options = ListOptions {
            category: Some("Design".into()),
            ..Default::default()
        };
        let result = run(&state, &options).unwrap();
        assert_eq!(result.listed_bookmarks.len(), 1);
        assert_eq!(result.listed_bookmarks[0].name, "Figma");
    }

    #[test]
    fn hide_links_setting_applies() {
        let mut state = state_with(vec![
            BookmarkBuilder::new("Link").categories(&["links"]).build(),
            BookmarkBuilder::new("Tool").categories(&["1"]).build(),
        ]);
        state.settings.hide_links_from_all = true;

        let result = run(&state, &ListOptions::default()).unwrap();
        assert_eq!(result.listed_bookmarks.len(), 1);
        assert_eq!(result.view_total, Some(2));

        let links = ListOptions {
            category: Some("links".into()),
            ..Default::default()
        };
        assert_eq!(run(&state, &links).unwrap().listed_bookmarks.len(), 1);
    }

    #[test]
    fn view_returns_selected_in_order() {
        let state = state_with(vec![
            BookmarkBuilder::new("a").id("a1").build(),
            BookmarkBuilder::new("b").id("b1").build(),
        ]);
        let result = view(&state, &["b1", "a"]).unwrap();
        let names: Vec<&str> = result
            .listed_bookmarks
            .iter()
            .map(|b| b.name.as_str())
            .collect();
        assert_eq!(names, vec!["b", "a"]);
    }

    #[test]
    fn favorites_option() {
        let state = state_with(vec![
            BookmarkBuilder::new("a").favorite().build(),
            BookmarkBuilder::new("b").build(),
        ]);
        let result = run(&state, &ListOptions::favorites()).unwrap();
        assert_eq!(result.listed_bookmarks.len(), 1);
        assert_eq!(result.listed_bookmarks[0].name, "a");
    }
}
