/// External movie identifier (an IMDb id such as `tt0120338`).
pub type MovieId = String;

/// Identifier the core allocates for every network request it asks for.
pub type RequestId = u64;

/// Highest rating the user can give.
pub const MAX_USER_RATING: u8 = 10;

/// One row of the current search result set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub id: MovieId,
    pub title: String,
    pub release_year: String,
    pub poster_url: String,
}

/// Full record shown in the detail panel.
#[derive(Debug, Clone, PartialEq)]
pub struct MovieDetail {
    pub id: MovieId,
    pub title: String,
    pub poster_url: String,
    /// Runtime as reported by the API, e.g. `"194 min"`.
    pub runtime_label: String,
    pub runtime_minutes: Option<u32>,
    /// Critic rating on a 0-10 scale, `None` when the API has none.
    pub critic_rating: Option<f64>,
    pub plot_summary: String,
    pub release_date: String,
    pub cast: String,
    pub director: String,
    pub genre: String,
}

/// A rating chosen by the user, always within `1..=MAX_USER_RATING`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct UserRating(u8);

impl UserRating {
    pub fn new(value: u8) -> Option<Self> {
        (1..=MAX_USER_RATING).contains(&value).then_some(Self(value))
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_rating_bounds() {
        assert_eq!(UserRating::new(0), None);
        assert_eq!(UserRating::new(1).map(UserRating::value), Some(1));
        assert_eq!(UserRating::new(10).map(UserRating::value), Some(10));
        assert_eq!(UserRating::new(11), None);
    }
}
