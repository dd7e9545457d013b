use std::time::Duration;

use futures_util::StreamExt;
use popcorn_logging::popcorn_debug;

use crate::omdb::{decode_detail, decode_search};
use crate::{FailureKind, FetchError, MovieRecord, SearchHit};

pub const DEFAULT_API_BASE_URL: &str = "https://www.omdbapi.com/";

#[derive(Debug, Clone)]
pub struct ApiSettings {
    pub base_url: String,
    pub api_key: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_bytes: u64,
}

impl ApiSettings {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            api_key: api_key.into(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            max_bytes: 1024 * 1024,
        }
    }
}

/// The two lookups the app needs from the movie database.
#[async_trait::async_trait]
pub trait MovieApi: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<SearchHit>, FetchError>;

    async fn detail(&self, movie_id: &str) -> Result<MovieRecord, FetchError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestMovieApi {
    settings: ApiSettings,
    client: reqwest::Client,
}

impl ReqwestMovieApi {
    pub fn new(settings: ApiSettings) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| FetchError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { settings, client })
    }

    async fn get_json(&self, param: &str, value: &str) -> Result<Vec<u8>, FetchError> {
        let url = reqwest::Url::parse_with_params(
            &self.settings.base_url,
            [("apikey", self.settings.api_key.as_str()), (param, value)],
        )
        .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))?;
        popcorn_debug!("GET {} {}={}", self.settings.base_url, param, value);

        let response = self.client.get(url).send().await.map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        let max_bytes = self.settings.max_bytes;
        if let Some(content_len) = response.content_length() {
            if content_len > max_bytes {
                return Err(too_large(max_bytes, content_len));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > max_bytes {
                return Err(too_large(max_bytes, next_len));
            }
            bytes.extend_from_slice(&chunk);
        }
        Ok(bytes)
    }
}

#[async_trait::async_trait]
impl MovieApi for ReqwestMovieApi {
    async fn search(&self, query: &str) -> Result<Vec<SearchHit>, FetchError> {
        let body = self.get_json("s", query).await?;
        decode_search(&body)
    }

    async fn detail(&self, movie_id: &str) -> Result<MovieRecord, FetchError> {
        let body = self.get_json("i", movie_id).await?;
        decode_detail(&body)
    }
}

fn too_large(max_bytes: u64, actual: u64) -> FetchError {
    FetchError::new(
        FailureKind::TooLarge {
            max_bytes,
            actual: Some(actual),
        },
        "response too large",
    )
}

fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        return FetchError::new(FailureKind::Timeout, err.to_string());
    }
    FetchError::new(FailureKind::Network, err.to_string())
}
