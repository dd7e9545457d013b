use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use popcorn_engine::{
    EngineEvent, EngineHandle, FailureKind, FetchError, MovieApi, MovieRecord, SearchHit,
};

const HANG: &str = "hang";

/// Answers instantly, except for queries or ids equal to `HANG`, which never resolve.
#[derive(Default)]
struct FakeApi {
    calls: AtomicUsize,
}

#[async_trait::async_trait]
impl MovieApi for FakeApi {
    async fn search(&self, query: &str) -> Result<Vec<SearchHit>, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if query == HANG {
            std::future::pending::<()>().await;
        }
        Ok(vec![SearchHit {
            imdb_id: format!("id-{query}"),
            title: query.to_string(),
            year: "2000".to_string(),
            poster: String::new(),
        }])
    }

    async fn detail(&self, movie_id: &str) -> Result<MovieRecord, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if movie_id == HANG {
            std::future::pending::<()>().await;
        }
        Ok(MovieRecord {
            title: format!("Title of {movie_id}"),
            poster: String::new(),
            runtime: "90 min".to_string(),
            runtime_minutes: Some(90),
            imdb_rating: Some(6.5),
            plot: String::new(),
            released: String::new(),
            actors: String::new(),
            director: String::new(),
            genre: String::new(),
        })
    }
}

fn collect(engine: &EngineHandle, count: usize) -> Vec<EngineEvent> {
    let deadline = Instant::now() + Duration::from_secs(5);
    let mut events = Vec::new();
    while events.len() < count && Instant::now() < deadline {
        if let Some(event) = engine.recv_timeout(Duration::from_millis(50)) {
            events.push(event);
        }
    }
    events
}

fn search_result(events: &[EngineEvent], id: u64) -> &Result<Vec<SearchHit>, FetchError> {
    events
        .iter()
        .find_map(|event| match event {
            EngineEvent::SearchCompleted { request_id, result } if *request_id == id => {
                Some(result)
            }
            _ => None,
        })
        .expect("search completion")
}

#[test]
fn search_completes_with_hits() {
    popcorn_logging::initialize_for_tests();
    let api = Arc::new(FakeApi::default());
    let engine = EngineHandle::with_api(api.clone()).expect("engine");
    engine.search(1, "Titanic");

    let events = collect(&engine, 1);
    let hits = search_result(&events, 1).as_ref().expect("hits");
    assert_eq!(hits[0].imdb_id, "id-Titanic");
    assert_eq!(api.calls.load(Ordering::SeqCst), 1);
}

#[test]
fn cancelled_search_reports_cancelled_and_later_search_succeeds() {
    let engine = EngineHandle::with_api(Arc::new(FakeApi::default())).expect("engine");

    engine.search(1, HANG);
    engine.search(2, "Titanic");
    engine.cancel(1);

    let events = collect(&engine, 2);
    assert_eq!(events.len(), 2);
    let err = search_result(&events, 1).as_ref().unwrap_err();
    assert_eq!(err.kind, FailureKind::Cancelled);
    assert!(search_result(&events, 2).is_ok());
}

#[test]
fn detail_completion_echoes_movie_id() {
    let engine = EngineHandle::with_api(Arc::new(FakeApi::default())).expect("engine");
    engine.load_detail(7, "tt0120338");

    let events = collect(&engine, 1);
    match &events[..] {
        [EngineEvent::DetailCompleted {
            request_id,
            movie_id,
            result,
        }] => {
            assert_eq!(*request_id, 7);
            assert_eq!(movie_id, "tt0120338");
            assert_eq!(result.as_ref().unwrap().runtime_minutes, Some(90));
        }
        other => panic!("unexpected events {other:?}"),
    }
}

#[test]
fn cancelling_detail_aborts_hanging_request() {
    let engine = EngineHandle::with_api(Arc::new(FakeApi::default())).expect("engine");
    engine.load_detail(3, HANG);
    engine.cancel(3);

    let events = collect(&engine, 1);
    match &events[..] {
        [EngineEvent::DetailCompleted { result, .. }] => {
            assert!(result.as_ref().unwrap_err().is_cancelled());
        }
        other => panic!("unexpected events {other:?}"),
    }
}

#[test]
fn cancelling_unknown_or_finished_request_is_harmless() {
    let engine = EngineHandle::with_api(Arc::new(FakeApi::default())).expect("engine");
    engine.cancel(99);
    engine.search(1, "Alien");
    let events = collect(&engine, 1);
    assert!(search_result(&events, 1).is_ok());

    engine.cancel(1);
    assert!(engine.recv_timeout(Duration::from_millis(100)).is_none());
}
