use crate::{MovieDetail, MovieId, RequestId, SearchResult, WatchedEntry};

/// Why a search produced no result list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchFailure {
    /// The API answered but reported no matching titles.
    NotFound,
    /// Non-success status, timeout, network or payload problem.
    Transport,
    /// The request was superseded and aborted.
    Cancelled,
}

/// Why a detail lookup produced no record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailFailure {
    Unavailable,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// User edited the search box.
    QueryChanged(String),
    /// Engine finished a search request.
    SearchCompleted {
        request_id: RequestId,
        outcome: Result<Vec<SearchResult>, SearchFailure>,
    },
    /// User clicked a result row; clicking the selected row again deselects it.
    MovieClicked(MovieId),
    /// User pressed back in the detail panel.
    CloseDetail,
    /// Engine finished a detail request.
    DetailCompleted {
        request_id: RequestId,
        outcome: Result<MovieDetail, DetailFailure>,
    },
    /// Star-rating control reported a value.
    RatingChosen(u8),
    /// User confirmed adding the selected movie to the watched list.
    AddToWatchlistClicked,
    /// User deleted a watched entry.
    DeleteWatched(MovieId),
    /// Restore the watched list loaded at startup.
    RestoreWatchlist(Vec<WatchedEntry>),
    /// Fallback for placeholder wiring.
    NoOp,
}
