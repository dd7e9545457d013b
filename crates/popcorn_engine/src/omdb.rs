//! Wire format of the OMDb search and detail endpoints.
//!
//! Both endpoints answer HTTP 200 with `"Response": "False"` and an `Error`
//! string when nothing matches; that case maps to [`FailureKind::NotFound`].

use serde::Deserialize;

use crate::{FailureKind, FetchError, MovieRecord, SearchHit};

const NOT_AVAILABLE: &str = "N/A";

#[derive(Debug, Deserialize)]
struct SearchEnvelope {
    #[serde(rename = "Response", default)]
    response: Option<String>,
    #[serde(rename = "Error", default)]
    error: Option<String>,
    #[serde(rename = "Search", default)]
    search: Option<Vec<WireSearchItem>>,
}

#[derive(Debug, Deserialize)]
struct WireSearchItem {
    #[serde(rename = "Title", default)]
    title: String,
    #[serde(rename = "Year", default)]
    year: String,
    #[serde(rename = "imdbID")]
    imdb_id: String,
    #[serde(rename = "Poster", default)]
    poster: String,
}

#[derive(Debug, Deserialize)]
struct WireDetail {
    #[serde(rename = "Response", default)]
    response: Option<String>,
    #[serde(rename = "Error", default)]
    error: Option<String>,
    #[serde(rename = "Title", default)]
    title: String,
    #[serde(rename = "Poster", default)]
    poster: String,
    #[serde(rename = "Runtime", default)]
    runtime: String,
    #[serde(rename = "imdbRating", default)]
    imdb_rating: String,
    #[serde(rename = "Plot", default)]
    plot: String,
    #[serde(rename = "Released", default)]
    released: String,
    #[serde(rename = "Actors", default)]
    actors: String,
    #[serde(rename = "Director", default)]
    director: String,
    #[serde(rename = "Genre", default)]
    genre: String,
}

fn is_false(response: Option<&str>) -> bool {
    response.is_some_and(|r| r.eq_ignore_ascii_case("false"))
}

fn not_found(error: Option<String>) -> FetchError {
    FetchError::new(
        FailureKind::NotFound,
        error.unwrap_or_else(|| "no results".to_string()),
    )
}

pub fn decode_search(body: &[u8]) -> Result<Vec<SearchHit>, FetchError> {
    let envelope: SearchEnvelope = serde_json::from_slice(body)
        .map_err(|err| FetchError::new(FailureKind::Decode, err.to_string()))?;
    if is_false(envelope.response.as_deref()) {
        return Err(not_found(envelope.error));
    }
    let items = envelope
        .search
        .ok_or_else(|| FetchError::new(FailureKind::Decode, "missing Search array"))?;
    Ok(items
        .into_iter()
        .map(|item| SearchHit {
            imdb_id: item.imdb_id,
            title: item.title,
            year: item.year,
            poster: item.poster,
        })
        .collect())
}

pub fn decode_detail(body: &[u8]) -> Result<MovieRecord, FetchError> {
    let wire: WireDetail = serde_json::from_slice(body)
        .map_err(|err| FetchError::new(FailureKind::Decode, err.to_string()))?;
    if is_false(wire.response.as_deref()) {
        return Err(not_found(wire.error));
    }
    Ok(MovieRecord {
        runtime_minutes: parse_runtime_minutes(&wire.runtime),
        imdb_rating: parse_rating(&wire.imdb_rating),
        title: wire.title,
        poster: wire.poster,
        runtime: wire.runtime,
        plot: wire.plot,
        released: wire.released,
        actors: wire.actors,
        director: wire.director,
        genre: wire.genre,
    })
}

/// Leading integer of a runtime label: `"194 min"` -> `Some(194)`.
pub fn parse_runtime_minutes(runtime: &str) -> Option<u32> {
    runtime.split_whitespace().next()?.parse().ok()
}

/// Critic rating on the 0-10 scale; `"N/A"` and garbage are `None`.
pub fn parse_rating(rating: &str) -> Option<f64> {
    let rating = rating.trim();
    if rating.is_empty() || rating == NOT_AVAILABLE {
        return None;
    }
    rating
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite() && (0.0..=10.0).contains(value))
}
