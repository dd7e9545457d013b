use std::sync::Once;

use popcorn_core::{
    update, AppState, Effect, Msg, SearchFailure, SearchResult, SearchStatus, NOT_FOUND_MESSAGE,
    TRANSPORT_FAILURE_MESSAGE,
};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(popcorn_logging::initialize_for_tests);
}

fn result(id: &str, title: &str) -> SearchResult {
    SearchResult {
        id: id.to_string(),
        title: title.to_string(),
        release_year: "1997".to_string(),
        poster_url: "p.jpg".to_string(),
    }
}

fn type_query(state: AppState, query: &str) -> (AppState, Vec<Effect>) {
    update(state, Msg::QueryChanged(query.to_string()))
}

fn search_request_id(effects: &[Effect]) -> u64 {
    effects
        .iter()
        .find_map(|effect| match effect {
            Effect::SearchMovies { request_id, .. } => Some(*request_id),
            _ => None,
        })
        .expect("search effect")
}

#[test]
fn short_queries_never_fetch() {
    init_logging();
    for query in ["", "T", "Ti", "ab", "éé"] {
        let (state, effects) = type_query(AppState::new(), query);
        let view = state.view();
        assert!(effects.is_empty(), "query {query:?} emitted {effects:?}");
        assert!(view.search.results.is_empty());
        assert_eq!(view.search.error, None);
        assert!(!view.search.is_loading);
    }
}

#[test]
fn three_chars_start_loading() {
    init_logging();
    let (state, effects) = type_query(AppState::new(), "Tit");

    assert_eq!(
        effects,
        vec![Effect::SearchMovies {
            request_id: 1,
            query: "Tit".to_string(),
        }]
    );
    assert_eq!(*state.search(), SearchStatus::Loading);
    assert!(state.view().search.is_loading);
}

#[test]
fn successful_search_populates_results_in_order() {
    init_logging();
    let (state, effects) = type_query(AppState::new(), "Titanic");
    let request_id = search_request_id(&effects);
    let payload = vec![
        result("tt0120338", "Titanic"),
        result("tt0046435", "Titanic"),
        result("tt1869152", "Titanic II"),
    ];

    let (mut state, effects) = update(
        state,
        Msg::SearchCompleted {
            request_id,
            outcome: Ok(payload.clone()),
        },
    );

    let view = state.view();
    assert!(effects.is_empty());
    assert_eq!(view.search.results, payload);
    assert_eq!(view.search.result_count(), 3);
    assert!(!view.search.is_loading);
    assert_eq!(view.search.error, None);
    assert!(state.consume_dirty());
}

#[test]
fn not_found_and_transport_failures_surface_messages() {
    init_logging();
    let cases = [
        (SearchFailure::NotFound, NOT_FOUND_MESSAGE),
        (SearchFailure::Transport, TRANSPORT_FAILURE_MESSAGE),
    ];
    for (failure, message) in cases {
        let (state, effects) = type_query(AppState::new(), "zzzzzz");
        let request_id = search_request_id(&effects);
        let (state, _) = update(
            state,
            Msg::SearchCompleted {
                request_id,
                outcome: Err(failure),
            },
        );
        let view = state.view();
        assert_eq!(view.search.error.as_deref(), Some(message));
        assert!(view.search.results.is_empty());
        assert!(!view.search.is_loading);
    }
}

#[test]
fn cancelled_completion_is_silent() {
    init_logging();
    let (state, effects) = type_query(AppState::new(), "Titanic");
    let request_id = search_request_id(&effects);

    let (mut state, effects) = update(
        state,
        Msg::SearchCompleted {
            request_id,
            outcome: Err(SearchFailure::Cancelled),
        },
    );

    assert!(effects.is_empty());
    assert_eq!(state.view().search.error, None);
    assert!(state.view().search.is_loading);
    assert!(state.consume_dirty());
    let (mut state, _) = update(
        state,
        Msg::SearchCompleted {
            request_id,
            outcome: Err(SearchFailure::Cancelled),
        },
    );
    assert!(!state.consume_dirty());
}

#[test]
fn new_query_cancels_previous_request() {
    init_logging();
    let (state, first) = type_query(AppState::new(), "Titanic");
    let first_id = search_request_id(&first);
    let (_state, second) = type_query(state, "Titan");

    assert_eq!(
        second,
        vec![
            Effect::CancelRequest {
                request_id: first_id
            },
            Effect::SearchMovies {
                request_id: first_id + 1,
                query: "Titan".to_string(),
            },
        ]
    );
}

#[test]
fn superseded_query_outcome_is_discarded_in_either_order() {
    init_logging();
    let first_payload = vec![result("tt0120338", "Titanic")];
    let second_payload = vec![result("tt0079501", "Alien")];

    for first_resolves_first in [true, false] {
        let (state, first) = type_query(AppState::new(), "Titanic");
        let first_id = search_request_id(&first);
        let (state, second) = type_query(state, "Alien");
        let second_id = search_request_id(&second);

        let stale = Msg::SearchCompleted {
            request_id: first_id,
            outcome: Ok(first_payload.clone()),
        };
        let fresh = Msg::SearchCompleted {
            request_id: second_id,
            outcome: Ok(second_payload.clone()),
        };
        let order = if first_resolves_first {
            [stale, fresh]
        } else {
            [fresh, stale]
        };

        let mut state = state;
        for msg in order {
            state = update(state, msg).0;
        }
        assert_eq!(state.view().search.results, second_payload);
        assert_eq!(state.view().search.error, None);
    }
}

#[test]
fn stale_failure_does_not_overwrite_newer_results() {
    init_logging();
    let (state, first) = type_query(AppState::new(), "Titanic");
    let first_id = search_request_id(&first);
    let (state, second) = type_query(state, "Alien");
    let second_id = search_request_id(&second);

    let (state, _) = update(
        state,
        Msg::SearchCompleted {
            request_id: second_id,
            outcome: Ok(vec![result("tt0079501", "Alien")]),
        },
    );
    let (state, _) = update(
        state,
        Msg::SearchCompleted {
            request_id: first_id,
            outcome: Err(SearchFailure::Transport),
        },
    );

    assert_eq!(state.view().search.error, None);
    assert_eq!(state.view().search.result_count(), 1);
}

#[test]
fn shortening_query_clears_results_and_cancels_in_flight() {
    init_logging();
    let (state, effects) = type_query(AppState::new(), "Titanic");
    let request_id = search_request_id(&effects);
    let (state, _) = update(
        state,
        Msg::SearchCompleted {
            request_id,
            outcome: Ok(vec![result("tt0120338", "Titanic")]),
        },
    );

    let (state, effects) = type_query(state, "Tita");
    let pending = search_request_id(&effects);
    let (state, effects) = type_query(state, "Ti");

    assert_eq!(
        effects,
        vec![Effect::CancelRequest {
            request_id: pending
        }]
    );
    assert_eq!(*state.search(), SearchStatus::Idle);

    // The aborted request's late answer must not resurrect results.
    let (state, _) = update(
        state,
        Msg::SearchCompleted {
            request_id: pending,
            outcome: Ok(vec![result("tt0120338", "Titanic")]),
        },
    );
    assert!(state.view().search.results.is_empty());
}
