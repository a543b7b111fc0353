use crate::models::{Accolade, AccoladeSet, Club, ClubId, LeagueRanking};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// League selection of the filter panel
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LeagueFilter {
    #[default]
    All,
    League(String),
}

impl LeagueFilter {
    /// Parse the value of the league `<select>`; `"all"` means no restriction
    #[must_use]
    pub fn from_value(value: &str) -> Self {
        if value == "all" {
            LeagueFilter::All
        } else {
            LeagueFilter::League(value.to_string())
        }
    }

    #[must_use]
    pub fn matches(&self, league: &str) -> bool {
        match self {
            LeagueFilter::All => true,
            LeagueFilter::League(selected) => selected == league,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterState {
    #[serde(default)]
    pub league: LeagueFilter,
    #[serde(default)]
    pub accolades: AccoladeSet,
}

impl FilterState {
    /// League must match, and with any accolades selected the club must hold
    /// at least one of them. Stadium resolution is checked separately.
    #[must_use]
    pub fn matches(&self, club: &Club) -> bool {
        if !self.league.matches(&club.league) {
            return false;
        }
        self.accolades.is_empty() || self.accolades.accolades().any(|a| club.has_accolade(a))
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.league != LeagueFilter::All || !self.accolades.is_empty()
    }

    pub fn toggle_accolade(&mut self, accolade: Accolade) {
        self.accolades.toggle(accolade.flag());
    }
}

/// Which clubs a render pass draws
#[derive(Debug, Clone, Copy)]
pub enum ClubSource<'a> {
    /// Every stadium-resolved club passing the filter
    Filtered(&'a FilterState),
    /// Exactly these clubs (search results), with no filtering
    Explicit(&'a [ClubId]),
}

/// Pick the clubs to draw, preserving dataset order
#[must_use]
pub fn select_clubs<'a>(clubs: &'a [Club], source: ClubSource<'_>) -> Vec<&'a Club> {
    match source {
        ClubSource::Filtered(filter) => clubs
            .iter()
            .filter(|club| club.stadium.is_some() && filter.matches(club))
            .collect(),
        ClubSource::Explicit(ids) => {
            let wanted: HashSet<&str> = ids.iter().map(String::as_str).collect();
            clubs.iter().filter(|club| wanted.contains(club.id.as_str())).collect()
        }
    }
}

/// An entry of the league dropdown
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeagueOption {
    pub league: String,
    pub club_count: usize,
}

/// Leagues in rank order with their club counts, leaving out empty leagues
#[must_use]
pub fn league_options(ranking: &LeagueRanking, clubs: &[Club]) -> Vec<LeagueOption> {
    ranking
        .leagues()
        .filter_map(|league| {
            let club_count = clubs.iter().filter(|c| c.league == league).count();
            (club_count > 0).then(|| LeagueOption { league: league.to_string(), club_count })
        })
        .collect()
}

/// Accolade categories that at least one club has entries for
#[must_use]
pub fn available_accolades(clubs: &[Club]) -> AccoladeSet {
    Accolade::ALL
        .into_iter()
        .filter(|&a| clubs.iter().any(|c| c.has_accolade(a)))
        .collect()
}

/// Other clubs playing at the same stadium as `club`
#[must_use]
pub fn clubs_sharing_stadium<'a>(clubs: &'a [Club], club: &Club) -> Vec<&'a Club> {
    let Some(stadium_id) = club.stadium_id.as_deref() else {
        return Vec::new();
    };
    clubs
        .iter()
        .filter(|c| c.id != club.id && c.stadium_id.as_deref() == Some(stadium_id))
        .collect()
}
