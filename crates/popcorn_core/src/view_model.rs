use crate::{MovieDetail, MovieId, SearchResult, WatchedEntry, WatchlistSummary};

pub const DEFAULT_HEADING: &str = "Popcorn";

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppViewModel {
    /// Window or terminal title; names the open movie when one is loaded.
    pub heading: String,
    pub query: String,
    pub search: SearchView,
    /// Present while a movie is selected; the watched list is shown otherwise.
    pub detail: Option<DetailView>,
    pub watched: Vec<WatchedEntry>,
    pub summary: WatchlistSummary,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchView {
    pub is_loading: bool,
    pub error: Option<String>,
    pub results: Vec<SearchResult>,
}

impl SearchView {
    pub fn result_count(&self) -> usize {
        self.results.len()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DetailView {
    pub movie_id: MovieId,
    pub is_loading: bool,
    pub movie: Option<MovieDetail>,
    pub pending_rating: Option<u8>,
    /// The user's earlier rating when the movie is already watched.
    pub already_rated: Option<u8>,
    pub can_add: bool,
}
