use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use popcorn_core::{DetailFailure, Effect, MovieDetail, Msg, SearchFailure, SearchResult};
use popcorn_engine::{
    BlobStore, EngineEvent, EngineHandle, FailureKind, FetchError, FileBlobStore, MovieRecord,
    SearchHit,
};
use popcorn_logging::popcorn_info;

use super::app::AppInput;
use super::persistence;

pub struct EffectRunner {
    engine: EngineHandle,
    store: FileBlobStore,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle, store: FileBlobStore, input_tx: mpsc::Sender<AppInput>) -> Self {
        let runner = Self { engine, store };
        runner.spawn_event_loop(input_tx);
        runner
    }

    pub fn store(&self) -> &dyn BlobStore {
        &self.store
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::SearchMovies { request_id, query } => {
                    popcorn_info!("SearchMovies request_id={} query={:?}", request_id, query);
                    self.engine.search(request_id, query);
                }
                Effect::LoadDetail {
                    request_id,
                    movie_id,
                } => {
                    popcorn_info!("LoadDetail request_id={} movie_id={}", request_id, movie_id);
                    self.engine.load_detail(request_id, movie_id);
                }
                Effect::CancelRequest { request_id } => {
                    self.engine.cancel(request_id);
                }
                Effect::PersistWatchlist { entries } => {
                    persistence::save_watchlist(&self.store, &entries);
                }
            }
        }
    }

    fn spawn_event_loop(&self, input_tx: mpsc::Sender<AppInput>) {
        let engine = self.engine.clone();
        thread::spawn(move || loop {
            if let Some(event) = engine.recv_timeout(Duration::from_millis(100)) {
                if input_tx.send(AppInput::Engine(map_event(event))).is_err() {
                    break;
                }
            }
        });
    }
}

pub(crate) fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::SearchCompleted { request_id, result } => Msg::SearchCompleted {
            request_id,
            outcome: result
                .map(|hits| hits.into_iter().map(map_hit).collect())
                .map_err(map_search_failure),
        },
        EngineEvent::DetailCompleted {
            request_id,
            movie_id,
            result,
        } => Msg::DetailCompleted {
            request_id,
            outcome: result
                .map(|record| map_record(movie_id, record))
                .map_err(|err| {
                    if err.is_cancelled() {
                        DetailFailure::Cancelled
                    } else {
                        DetailFailure::Unavailable
                    }
                }),
        },
    }
}

fn map_hit(hit: SearchHit) -> SearchResult {
    SearchResult {
        id: hit.imdb_id,
        title: hit.title,
        release_year: hit.year,
        poster_url: hit.poster,
    }
}

fn map_search_failure(err: FetchError) -> SearchFailure {
    match err.kind {
        FailureKind::NotFound => SearchFailure::NotFound,
        FailureKind::Cancelled => SearchFailure::Cancelled,
        _ => SearchFailure::Transport,
    }
}

fn map_record(movie_id: String, record: MovieRecord) -> MovieDetail {
    MovieDetail {
        id: movie_id,
        title: record.title,
        poster_url: record.poster,
        runtime_label: record.runtime,
        runtime_minutes: record.runtime_minutes,
        critic_rating: record.imdb_rating,
        plot_summary: record.plot,
        release_date: record.released,
        cast: record.actors,
        director: record.director,
        genre: record.genre,
    }
}
