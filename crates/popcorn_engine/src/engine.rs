use std::collections::HashMap;
use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::Duration;

use popcorn_logging::{popcorn_debug, popcorn_info, popcorn_warn};
use tokio_util::sync::CancellationToken;

use crate::api::{ApiSettings, MovieApi, ReqwestMovieApi};
use crate::{EngineEvent, FetchError, RequestId};

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("failed to start async runtime: {0}")]
    Runtime(#[from] std::io::Error),
    #[error("failed to build http client: {0}")]
    Client(#[from] FetchError),
}

enum EngineCommand {
    Search { request_id: RequestId, query: String },
    Detail { request_id: RequestId, movie_id: String },
    Cancel { request_id: RequestId },
}

/// Tokens of requests that have not completed yet.
#[derive(Clone, Default)]
struct InFlight {
    tokens: Arc<Mutex<HashMap<RequestId, CancellationToken>>>,
}

impl InFlight {
    fn register(&self, request_id: RequestId) -> CancellationToken {
        let token = CancellationToken::new();
        if let Ok(mut tokens) = self.tokens.lock() {
            tokens.insert(request_id, token.clone());
        }
        token
    }

    fn cancel(&self, request_id: RequestId) -> bool {
        let token = self
            .tokens
            .lock()
            .ok()
            .and_then(|mut tokens| tokens.remove(&request_id));
        match token {
            Some(token) => {
                token.cancel();
                true
            }
            None => false,
        }
    }

    fn finish(&self, request_id: RequestId) {
        if let Ok(mut tokens) = self.tokens.lock() {
            tokens.remove(&request_id);
        }
    }
}

/// Runs movie lookups on a background runtime and reports completions as
/// [`EngineEvent`]s. Every request can be cancelled by id; a cancelled
/// request still completes, with a [`FailureKind::Cancelled`](crate::FailureKind) error.
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: Arc<Mutex<mpsc::Receiver<EngineEvent>>>,
}

impl EngineHandle {
    pub fn new(settings: ApiSettings) -> Result<Self, EngineError> {
        let api = ReqwestMovieApi::new(settings)?;
        Self::with_api(Arc::new(api))
    }

    pub fn with_api(api: Arc<dyn MovieApi>) -> Result<Self, EngineError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()?;
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            let in_flight = InFlight::default();
            while let Ok(command) = cmd_rx.recv() {
                match command {
                    EngineCommand::Cancel { request_id } => {
                        if in_flight.cancel(request_id) {
                            popcorn_info!("Cancelled request_id={}", request_id);
                        }
                    }
                    EngineCommand::Search { request_id, .. }
                    | EngineCommand::Detail { request_id, .. } => {
                        // Registered before spawning so a Cancel queued right
                        // behind this command always finds the token.
                        let token = in_flight.register(request_id);
                        let api = api.clone();
                        let event_tx = event_tx.clone();
                        let in_flight = in_flight.clone();
                        runtime.spawn(async move {
                            let event = handle_request(api.as_ref(), command, token).await;
                            if let Some(event) = event {
                                in_flight.finish(event.request_id());
                                let _ = event_tx.send(event);
                            }
                        });
                    }
                }
            }
        });

        Ok(Self {
            cmd_tx,
            event_rx: Arc::new(Mutex::new(event_rx)),
        })
    }

    pub fn search(&self, request_id: RequestId, query: impl Into<String>) {
        let _ = self.cmd_tx.send(EngineCommand::Search {
            request_id,
            query: query.into(),
        });
    }

    pub fn load_detail(&self, request_id: RequestId, movie_id: impl Into<String>) {
        let _ = self.cmd_tx.send(EngineCommand::Detail {
            request_id,
            movie_id: movie_id.into(),
        });
    }

    pub fn cancel(&self, request_id: RequestId) {
        let _ = self.cmd_tx.send(EngineCommand::Cancel { request_id });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.lock().ok()?.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.lock().ok()?.recv_timeout(timeout).ok()
    }
}

async fn handle_request(
    api: &dyn MovieApi,
    command: EngineCommand,
    token: CancellationToken,
) -> Option<EngineEvent> {
    match command {
        EngineCommand::Search { request_id, query } => {
            popcorn_debug!("Search request_id={} query={:?}", request_id, query);
            let result = tokio::select! {
                biased;
                _ = token.cancelled() => Err(FetchError::cancelled()),
                result = api.search(&query) => result,
            };
            log_failure(request_id, &result);
            Some(EngineEvent::SearchCompleted { request_id, result })
        }
        EngineCommand::Detail {
            request_id,
            movie_id,
        } => {
            popcorn_debug!("Detail request_id={} movie_id={}", request_id, movie_id);
            let result = tokio::select! {
                biased;
                _ = token.cancelled() => Err(FetchError::cancelled()),
                result = api.detail(&movie_id) => result,
            };
            log_failure(request_id, &result);
            Some(EngineEvent::DetailCompleted {
                request_id,
                movie_id,
                result,
            })
        }
        EngineCommand::Cancel { .. } => None,
    }
}

fn log_failure<T>(request_id: RequestId, result: &Result<T, FetchError>) {
    if let Err(err) = result {
        if !err.is_cancelled() {
            popcorn_warn!("Request {} failed: {}", request_id, err);
        }
    }
}
