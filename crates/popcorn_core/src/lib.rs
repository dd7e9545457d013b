//! Popcorn core: pure state machine, watchlist store and view-model helpers.
mod effect;
mod movie;
mod msg;
mod state;
mod update;
mod view_model;
mod watchlist;

pub use effect::Effect;
pub use movie::{MovieDetail, MovieId, RequestId, SearchResult, UserRating, MAX_USER_RATING};
pub use msg::{DetailFailure, Msg, SearchFailure};
pub use state::{
    AppState, DetailStatus, SearchStatus, Selection, MIN_QUERY_CHARS, NOT_FOUND_MESSAGE,
    TRANSPORT_FAILURE_MESSAGE,
};
pub use update::update;
pub use view_model::{AppViewModel, DetailView, SearchView, DEFAULT_HEADING};
pub use watchlist::{WatchedEntry, Watchlist, WatchlistError, WatchlistSummary};
