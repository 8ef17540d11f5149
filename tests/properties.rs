//! Property-based tests for the filter engine and collection-wide operations.

use chrono::{Duration, TimeZone, Utc};
use proptest::prelude::*;
use shelf::api::ShelfApi;
use shelf::commands::export::{encode, BackupDocument};
use shelf::commands::import::decode;
use shelf::filter::{
    category_counts, filter_bookmarks, view_total, BookmarkQuery, CategoryFilter, SortKey,
    TypeFilter, View,
};
use shelf::model::{AppState, Bookmark, BookmarkDraft, BookmarkKind};
use shelf::store::kv_store::KvStore;
use shelf::store::mem_backend::MemBackend;
use shelf::store::BOOKMARKS_KEY;

const CATEGORY_IDS: [&str; 4] = ["1", "2", "3", "links"];

fn arb_bookmark() -> impl Strategy<Value = Bookmark> {
    (
        "[a-zA-Z]{1,8}",
        proptest::sample::subsequence(CATEGORY_IDS.to_vec(), 1..=3),
        0u8..=5,
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
        0i64..10_000,
    )
        .prop_map(
            |(name, categories, rating, is_app, pinned, favorite, private, minutes)| {
                let mut draft = BookmarkDraft::new(
                    name.clone(),
                    format!("https://{}.example", name.to_lowercase()),
                    categories.into_iter().map(String::from).collect(),
                );
                draft.rating = rating;
                draft.kind = if is_app {
                    BookmarkKind::App
                } else {
                    BookmarkKind::Website
                };
                draft.pinned = pinned;
                draft.favorite = favorite;
                draft.private = private;
                let mut bookmark = Bookmark::new(draft);
                bookmark.created_at =
                    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + Duration::minutes(minutes);
                bookmark
            },
        )
}

fn arb_bookmarks() -> impl Strategy<Value = Vec<Bookmark>> {
    proptest::collection::vec(arb_bookmark(), 0..30)
}

fn arb_query() -> impl Strategy<Value = BookmarkQuery> {
    (
        prop_oneof![Just(View::Main), Just(View::Private)],
        prop_oneof![Just(String::new()), "[a-z]{1,2}"],
        prop_oneof![
            Just(CategoryFilter::All),
            Just(CategoryFilter::Favorites),
            proptest::sample::select(CATEGORY_IDS.to_vec())
                .prop_map(|id| CategoryFilter::Category(id.to_string())),
        ],
        prop_oneof![
            Just(TypeFilter::All),
            Just(TypeFilter::Website),
            Just(TypeFilter::App)
        ],
        prop_oneof![
            Just(SortKey::Name),
            Just(SortKey::Rating),
            Just(SortKey::Recent)
        ],
        proptest::option::of(Just("links".to_string())),
    )
        .prop_map(|(view, search, category, kind, sort, hidden_category)| BookmarkQuery {
            view,
            search,
            category,
            kind,
            sort,
            hidden_category,
        })
}

fn mem_api(bookmarks: &[Bookmark]) -> ShelfApi<KvStore<MemBackend>> {
    let backend = MemBackend::new();
    backend.insert_raw(BOOKMARKS_KEY, &serde_json::to_string(bookmarks).unwrap());
    ShelfApi::new(KvStore::with_backend(backend)).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn results_never_cross_the_privacy_boundary(
        bookmarks in arb_bookmarks(),
        query in arb_query(),
    ) {
        let listed = filter_bookmarks(&bookmarks, &query);
        let want_private = query.view == View::Private;
        prop_assert!(listed.iter().all(|b| b.private == want_private));
        prop_assert!(listed.len() <= view_total(&bookmarks, query.view));
    }

    #[test]
    fn unfiltered_views_partition_the_collection(bookmarks in arb_bookmarks()) {
        let main = filter_bookmarks(&bookmarks, &BookmarkQuery::default());
        let private = filter_bookmarks(
            &bookmarks,
            &BookmarkQuery { view: View::Private, ..Default::default() },
        );
        prop_assert_eq!(main.len() + private.len(), bookmarks.len());
    }

    #[test]
    fn pinned_come_first_and_each_group_stays_sorted(
        bookmarks in arb_bookmarks(),
        query in arb_query(),
    ) {
        let listed = filter_bookmarks(&bookmarks, &query);
        let first_unpinned = listed.iter().position(|b| !b.pinned).unwrap_or(listed.len());
        prop_assert!(listed[first_unpinned..].iter().all(|b| !b.pinned));

        let (pinned, rest) = listed.split_at(first_unpinned);
        for group in [pinned, rest] {
            for pair in group.windows(2) {
                let in_order = match query.sort {
                    SortKey::Name => pair[0].name.to_lowercase() <= pair[1].name.to_lowercase(),
                    SortKey::Rating => pair[0].rating >= pair[1].rating,
                    SortKey::Recent => pair[0].created_at >= pair[1].created_at,
                };
                prop_assert!(in_order, "{:?} before {:?}", pair[0].name, pair[1].name);
            }
        }
    }

    #[test]
    fn category_counts_add_up(bookmarks in arb_bookmarks()) {
        for view in [View::Main, View::Private] {
            let counted: usize = category_counts(&bookmarks, view).values().sum();
            let expected: usize = bookmarks
                .iter()
                .filter(|b| view.contains(b))
                .map(|b| b.category_ids.len())
                .sum();
            prop_assert_eq!(counted, expected);
        }
    }

    #[test]
    fn category_delete_leaves_no_dangling_ids(
        bookmarks in arb_bookmarks(),
        victim in proptest::sample::select(CATEGORY_IDS.to_vec()),
    ) {
        let mut api = mem_api(&bookmarks);
        api.delete_category(victim).unwrap();

        let state: &AppState = api.state();
        prop_assert!(state.category(victim).is_none());
        prop_assert!(state.bookmarks.iter().all(|b| !b.in_category(victim)));
        prop_assert!(state.bookmarks.iter().all(|b| !b.category_ids.is_empty()));

        let survivors = bookmarks
            .iter()
            .filter(|b| b.category_ids.iter().any(|id| id != victim))
            .count();
        prop_assert_eq!(state.bookmarks.len(), survivors);
    }

    #[test]
    fn backups_restore_the_same_collections(
        bookmarks in arb_bookmarks(),
        compress in any::<bool>(),
    ) {
        let mut state = AppState::default();
        state.bookmarks = bookmarks;
        let bytes = encode(&BackupDocument::from_state(&state), compress).unwrap();

        let backup = decode(&bytes).unwrap();
        prop_assert_eq!(backup.bookmarks, state.bookmarks);
        prop_assert_eq!(backup.categories, state.categories);
    }
}
