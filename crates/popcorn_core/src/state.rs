use crate::view_model::{AppViewModel, DetailView, SearchView, DEFAULT_HEADING};
use crate::{
    DetailFailure, MovieDetail, MovieId, RequestId, SearchFailure, SearchResult, UserRating,
    WatchedEntry, Watchlist,
};

/// Queries shorter than this (in chars) never reach the network.
pub const MIN_QUERY_CHARS: usize = 3;
pub const NOT_FOUND_MESSAGE: &str = "Movie not found!";
pub const TRANSPORT_FAILURE_MESSAGE: &str = "Something went wrong while fetching movies";

#[derive(Debug, Clone, PartialEq, Default)]
pub enum SearchStatus {
    #[default]
    Idle,
    Loading,
    Success(Vec<SearchResult>),
    Error(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    None,
    Selected(MovieId),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum DetailStatus {
    #[default]
    Empty,
    Loading,
    Loaded(MovieDetail),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    query: String,
    search: SearchStatus,
    pending_search: Option<RequestId>,
    selection: Selection,
    detail: DetailStatus,
    pending_detail: Option<RequestId>,
    pending_rating: Option<UserRating>,
    watchlist: Watchlist,
    next_request_id: RequestId,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn search(&self) -> &SearchStatus {
        &self.search
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn detail(&self) -> &DetailStatus {
        &self.detail
    }

    pub fn watchlist(&self) -> &Watchlist {
        &self.watchlist
    }

    pub fn pending_rating(&self) -> Option<UserRating> {
        self.pending_rating
    }

    /// Owned copy of the watched list, in insertion order, for persistence.
    pub fn watchlist_snapshot(&self) -> Vec<WatchedEntry> {
        self.watchlist.entries().to_vec()
    }

    /// Returns true (and clears the flag) if the state changed since the last call.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Stores the new query. Returns false when the value did not change.
    pub(crate) fn set_query(&mut self, query: String) -> bool {
        if self.query == query {
            return false;
        }
        self.query = query;
        self.mark_dirty();
        true
    }

    fn allocate_request_id(&mut self) -> RequestId {
        self.next_request_id += 1;
        self.next_request_id
    }

    /// Enters `Loading` for the current query. Returns the new request id and
    /// the id of the search it supersedes, if any.
    pub(crate) fn begin_search(&mut self) -> (RequestId, Option<RequestId>) {
        let request_id = self.allocate_request_id();
        let superseded = self.pending_search.replace(request_id);
        self.search = SearchStatus::Loading;
        self.mark_dirty();
        (request_id, superseded)
    }

    /// Back to `Idle` with no results or error. Returns an outstanding search to cancel.
    pub(crate) fn reset_search(&mut self) -> Option<RequestId> {
        if self.search != SearchStatus::Idle {
            self.search = SearchStatus::Idle;
            self.mark_dirty();
        }
        self.pending_search.take()
    }

    pub(crate) fn is_current_search(&self, request_id: RequestId) -> bool {
        self.pending_search == Some(request_id)
    }

    pub(crate) fn finish_search(&mut self, outcome: Result<Vec<SearchResult>, SearchFailure>) {
        self.search = match outcome {
            Ok(results) => SearchStatus::Success(results),
            Err(SearchFailure::NotFound) => SearchStatus::Error(NOT_FOUND_MESSAGE.to_string()),
            Err(SearchFailure::Transport) => {
                SearchStatus::Error(TRANSPORT_FAILURE_MESSAGE.to_string())
            }
            Err(SearchFailure::Cancelled) => return,
        };
        self.pending_search = None;
        self.mark_dirty();
    }

    /// Selects `movie_id` and starts loading its detail. Returns the new
    /// request id and a superseded detail request, if any.
    pub(crate) fn select(&mut self, movie_id: MovieId) -> (RequestId, Option<RequestId>) {
        let request_id = self.allocate_request_id();
        let superseded = self.pending_detail.replace(request_id);
        self.selection = Selection::Selected(movie_id);
        self.detail = DetailStatus::Loading;
        self.pending_rating = None;
        self.mark_dirty();
        (request_id, superseded)
    }

    /// Returns to `NoSelection`. Returns an outstanding detail request to cancel.
    pub(crate) fn clear_selection(&mut self) -> Option<RequestId> {
        if self.selection != Selection::None {
            self.mark_dirty();
        }
        self.selection = Selection::None;
        self.detail = DetailStatus::Empty;
        self.pending_rating = None;
        self.pending_detail.take()
    }

    pub(crate) fn is_current_detail(&self, request_id: RequestId) -> bool {
        self.pending_detail == Some(request_id)
    }

    pub(crate) fn finish_detail(&mut self, outcome: Result<MovieDetail, DetailFailure>) {
        self.detail = match outcome {
            Ok(detail) => DetailStatus::Loaded(detail),
            Err(DetailFailure::Unavailable) => DetailStatus::Empty,
            Err(DetailFailure::Cancelled) => return,
        };
        self.pending_detail = None;
        self.mark_dirty();
    }

    pub(crate) fn set_pending_rating(&mut self, rating: UserRating) {
        if self.pending_rating != Some(rating) {
            self.pending_rating = Some(rating);
            self.mark_dirty();
        }
    }

    /// The entry that confirming now would add, if the detail panel allows it.
    pub(crate) fn entry_to_add(&self) -> Option<WatchedEntry> {
        let DetailStatus::Loaded(detail) = &self.detail else {
            return None;
        };
        let rating = self.pending_rating?;
        if self.watchlist.contains(&detail.id) {
            return None;
        }
        Some(WatchedEntry {
            id: detail.id.clone(),
            title: detail.title.clone(),
            poster_url: detail.poster_url.clone(),
            critic_rating: detail.critic_rating,
            runtime_minutes: detail.runtime_minutes,
            user_rating: rating,
        })
    }

    pub(crate) fn watchlist_mut(&mut self) -> &mut Watchlist {
        self.mark_dirty();
        &mut self.watchlist
    }

    pub(crate) fn replace_watchlist(&mut self, watchlist: Watchlist) {
        self.watchlist = watchlist;
        self.mark_dirty();
    }

    pub fn view(&self) -> AppViewModel {
        let search = match &self.search {
            SearchStatus::Idle => SearchView::default(),
            SearchStatus::Loading => SearchView {
                is_loading: true,
                ..SearchView::default()
            },
            SearchStatus::Success(results) => SearchView {
                results: results.clone(),
                ..SearchView::default()
            },
            SearchStatus::Error(message) => SearchView {
                error: Some(message.clone()),
                ..SearchView::default()
            },
        };

        let detail = match &self.selection {
            Selection::None => None,
            Selection::Selected(movie_id) => {
                let movie = match &self.detail {
                    DetailStatus::Loaded(detail) => Some(detail.clone()),
                    DetailStatus::Empty | DetailStatus::Loading => None,
                };
                Some(DetailView {
                    movie_id: movie_id.clone(),
                    is_loading: self.detail == DetailStatus::Loading,
                    movie,
                    pending_rating: self.pending_rating.map(UserRating::value),
                    already_rated: self
                        .watchlist
                        .get(movie_id)
                        .map(|entry| entry.user_rating.value()),
                    can_add: self.entry_to_add().is_some(),
                })
            }
        };

        let heading = match &self.detail {
            DetailStatus::Loaded(detail) if self.selection != Selection::None => {
                format!("Movie | {}", detail.title)
            }
            _ => DEFAULT_HEADING.to_string(),
        };

        AppViewModel {
            heading,
            query: self.query.clone(),
            search,
            detail,
            watched: self.watchlist.entries().to_vec(),
            summary: self.watchlist.aggregate(),
            dirty: self.dirty,
        }
    }
}
