use crate::{MovieId, RequestId, WatchedEntry};

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    SearchMovies { request_id: RequestId, query: String },
    LoadDetail { request_id: RequestId, movie_id: MovieId },
    /// Abort an outstanding request; its completion will be ignored anyway.
    CancelRequest { request_id: RequestId },
    /// Write the full watched list to durable storage.
    PersistWatchlist { entries: Vec<WatchedEntry> },
}
