use crate::constants::MIN_SEARCH_QUERY_LEN;
use crate::models::{Club, ClubId};

/// State of the search box
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchState {
    active: bool,
    query: String,
    /// Matching clubs in dataset order; `None` while the query is too short
    results: Option<Vec<ClubId>>,
}

impl SearchState {
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// The case-folded query
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Clubs matching the current query, when it is long enough to search
    #[must_use]
    pub fn results(&self) -> Option<&[ClubId]> {
        self.results.as_deref()
    }

    pub fn activate(&mut self) {
        self.active = true;
    }

    /// Store a new query and recompute the matches against `clubs`
    pub fn update(&mut self, query: &str, clubs: &[Club]) {
        self.active = true;
        self.query = normalize_query(query);
        self.results = is_searchable(&self.query).then(|| matching_clubs(clubs, &self.query));
    }

    /// Close the search and forget the query
    pub fn deactivate(&mut self) {
        *self = Self::default();
    }
}

#[must_use]
pub fn normalize_query(query: &str) -> String {
    query.to_lowercase()
}

/// Whether a normalised query is long enough to narrow the map
#[must_use]
pub fn is_searchable(query: &str) -> bool {
    query.chars().count() >= MIN_SEARCH_QUERY_LEN
}

/// Ids of the clubs whose search key contains `query`, in dataset order
#[must_use]
pub fn matching_clubs(clubs: &[Club], query: &str) -> Vec<ClubId> {
    clubs
        .iter()
        .filter(|club| club.matches_query(query))
        .map(|club| club.id.clone())
        .collect()
}
