//! Popcorn engine: movie-database client, request execution and storage.
mod api;
mod engine;
mod omdb;
mod persist;
mod types;

pub use api::{ApiSettings, MovieApi, ReqwestMovieApi, DEFAULT_API_BASE_URL};
pub use engine::{EngineError, EngineHandle};
pub use omdb::{decode_detail, decode_search, parse_rating, parse_runtime_minutes};
pub use persist::{ensure_data_dir, BlobStore, FileBlobStore, PersistError};
pub use types::{EngineEvent, FailureKind, FetchError, MovieRecord, RequestId, SearchHit};
