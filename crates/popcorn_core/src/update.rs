use popcorn_logging::{popcorn_debug, popcorn_info};

use crate::{AppState, Effect, Msg, RequestId, Selection, UserRating, Watchlist, MIN_QUERY_CHARS};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::QueryChanged(query) => {
            if !state.set_query(query) {
                return (state, Vec::new());
            }
            if state.query().chars().count() < MIN_QUERY_CHARS {
                cancel(state.reset_search())
            } else {
                let (request_id, superseded) = state.begin_search();
                let mut effects = cancel(superseded);
                effects.push(Effect::SearchMovies {
                    request_id,
                    query: state.query().to_string(),
                });
                effects
            }
        }
        Msg::SearchCompleted {
            request_id,
            outcome,
        } => {
            if state.is_current_search(request_id) {
                state.finish_search(outcome);
            } else {
                popcorn_debug!("Discarding stale search completion request_id={}", request_id);
            }
            Vec::new()
        }
        Msg::MovieClicked(movie_id) => {
            if *state.selection() == Selection::Selected(movie_id.clone()) {
                cancel(state.clear_selection())
            } else {
                let (request_id, superseded) = state.select(movie_id.clone());
                let mut effects = cancel(superseded);
                effects.push(Effect::LoadDetail {
                    request_id,
                    movie_id,
                });
                effects
            }
        }
        Msg::CloseDetail => cancel(state.clear_selection()),
        Msg::DetailCompleted {
            request_id,
            outcome,
        } => {
            if state.is_current_detail(request_id) {
                state.finish_detail(outcome);
            } else {
                popcorn_debug!("Discarding stale detail completion request_id={}", request_id);
            }
            Vec::new()
        }
        Msg::RatingChosen(value) => {
            if state.selection() != &Selection::None {
                if let Some(rating) = UserRating::new(value) {
                    state.set_pending_rating(rating);
                }
            }
            Vec::new()
        }
        Msg::AddToWatchlistClicked => match state.entry_to_add() {
            Some(entry) => {
                popcorn_info!(
                    "Adding {} to watched list with rating {}",
                    entry.id,
                    entry.user_rating.value()
                );
                match state.watchlist_mut().append(entry) {
                    Ok(()) => {
                        let mut effects = cancel(state.clear_selection());
                        effects.push(persist(&state));
                        effects
                    }
                    Err(_) => Vec::new(),
                }
            }
            None => Vec::new(),
        },
        Msg::DeleteWatched(movie_id) => {
            if state.watchlist().contains(&movie_id) {
                state.watchlist_mut().remove(&movie_id);
                vec![persist(&state)]
            } else {
                Vec::new()
            }
        }
        Msg::RestoreWatchlist(entries) => {
            state.replace_watchlist(Watchlist::from_entries(entries));
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn cancel(request_id: Option<RequestId>) -> Vec<Effect> {
    request_id
        .map(|request_id| Effect::CancelRequest { request_id })
        .into_iter()
        .collect()
}

fn persist(state: &AppState) -> Effect {
    Effect::PersistWatchlist {
        entries: state.watchlist_snapshot(),
    }
}
