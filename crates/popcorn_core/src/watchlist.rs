use thiserror::Error;

use crate::{MovieId, UserRating};

/// A movie the user has rated and added to their watched list.
#[derive(Debug, Clone, PartialEq)]
pub struct WatchedEntry {
    pub id: MovieId,
    pub title: String,
    pub poster_url: String,
    pub critic_rating: Option<f64>,
    pub runtime_minutes: Option<u32>,
    pub user_rating: UserRating,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WatchlistError {
    #[error("movie {0} is already in the watched list")]
    AlreadyWatched(MovieId),
}

/// Aggregate statistics over the watched list.
///
/// Means are `0.0` when nothing contributes to them. Entries with an unknown
/// critic rating or runtime are left out of that particular mean.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WatchlistSummary {
    pub count: usize,
    pub mean_critic_rating: f64,
    pub mean_user_rating: f64,
    pub mean_runtime_minutes: f64,
}

/// Insertion-ordered collection holding at most one entry per movie id.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Watchlist {
    entries: Vec<WatchedEntry>,
}

impl Watchlist {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a list from persisted entries, keeping the first of any duplicate ids.
    pub fn from_entries(entries: impl IntoIterator<Item = WatchedEntry>) -> Self {
        let mut list = Self::new();
        for entry in entries {
            let _ = list.append(entry);
        }
        list
    }

    pub fn append(&mut self, entry: WatchedEntry) -> Result<(), WatchlistError> {
        if self.contains(&entry.id) {
            return Err(WatchlistError::AlreadyWatched(entry.id));
        }
        self.entries.push(entry);
        Ok(())
    }

    /// Removes the entry with `id`. Returns `false` if there was none.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != id);
        self.entries.len() != before
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn get(&self, id: &str) -> Option<&WatchedEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    pub fn entries(&self) -> &[WatchedEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn aggregate(&self) -> WatchlistSummary {
        WatchlistSummary {
            count: self.entries.len(),
            mean_critic_rating: mean(self.entries.iter().filter_map(|e| e.critic_rating)),
            mean_user_rating: mean(
                self.entries
                    .iter()
                    .map(|e| f64::from(e.user_rating.value())),
            ),
            mean_runtime_minutes: mean(
                self.entries
                    .iter()
                    .filter_map(|e| e.runtime_minutes.map(f64::from)),
            ),
        }
    }
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}
