use popcorn_core::{UserRating, WatchedEntry};
use popcorn_engine::BlobStore;
use popcorn_logging::{popcorn_error, popcorn_info, popcorn_warn};
use serde::{Deserialize, Serialize};

/// Storage key of the watched list.
pub(crate) const WATCHED_KEY: &str = "watched";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct PersistedEntry {
    id: String,
    title: String,
    #[serde(default)]
    poster_url: String,
    #[serde(default)]
    critic_rating: Option<f64>,
    #[serde(default)]
    runtime_minutes: Option<u32>,
    user_rating: u8,
}

/// Reads the watched list. Missing, unreadable or malformed blobs yield an empty list.
pub(crate) fn load_watchlist(store: &dyn BlobStore) -> Vec<WatchedEntry> {
    let content = match store.get(WATCHED_KEY) {
        Ok(Some(text)) => text,
        Ok(None) => return Vec::new(),
        Err(err) => {
            popcorn_warn!("Failed to read watched list: {}", err);
            return Vec::new();
        }
    };

    let persisted: Vec<PersistedEntry> = match serde_json::from_str(&content) {
        Ok(entries) => entries,
        Err(err) => {
            popcorn_warn!("Failed to parse watched list: {}", err);
            return Vec::new();
        }
    };

    let entries: Vec<WatchedEntry> = persisted
        .into_iter()
        .filter_map(|entry| {
            let Some(user_rating) = UserRating::new(entry.user_rating) else {
                popcorn_warn!(
                    "Skipping watched entry {} with rating {}",
                    entry.id,
                    entry.user_rating
                );
                return None;
            };
            Some(WatchedEntry {
                id: entry.id,
                title: entry.title,
                poster_url: entry.poster_url,
                critic_rating: entry.critic_rating,
                runtime_minutes: entry.runtime_minutes,
                user_rating,
            })
        })
        .collect();

    popcorn_info!("Loaded {} watched entries", entries.len());
    entries
}

pub(crate) fn save_watchlist(store: &dyn BlobStore, entries: &[WatchedEntry]) {
    let persisted: Vec<PersistedEntry> = entries
        .iter()
        .map(|entry| PersistedEntry {
            id: entry.id.clone(),
            title: entry.title.clone(),
            poster_url: entry.poster_url.clone(),
            critic_rating: entry.critic_rating,
            runtime_minutes: entry.runtime_minutes,
            user_rating: entry.user_rating.value(),
        })
        .collect();

    let content = match serde_json::to_string_pretty(&persisted) {
        Ok(text) => text,
        Err(err) => {
            popcorn_error!("Failed to serialize watched list: {}", err);
            return;
        }
    };

    if let Err(err) = store.set(WATCHED_KEY, &content) {
        popcorn_error!("Failed to write watched list: {}", err);
    }
}
