use super::accolade::{Accolade, AccoladeToken};
use super::stadium::{Stadium, StadiumId};
use crate::geometry::LatLng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub type ClubId = String;

/// A club as rendered on the map.
///
/// Deserialised from the country's `clubs.json`; `stadium` and `search_slug`
/// are filled in by [`Club::join`] once the stadium dataset is available.
/// Clubs are replaced wholesale when the country changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Club {
    pub id: ClubId,
    pub name: String,
    #[serde(default)]
    pub fullname: String,
    #[serde(default)]
    pub nickname: String,
    #[serde(default)]
    pub town: String,
    pub league: String,
    #[serde(default)]
    pub stadium_id: Option<StadiumId>,
    #[serde(default)]
    pub primary_color: Option<String>,
    #[serde(default)]
    pub secondary_color: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub founded: Option<i32>,
    #[serde(default)]
    pub championships: Vec<AccoladeToken>,
    #[serde(default)]
    pub national_cup: Vec<AccoladeToken>,
    #[serde(default)]
    pub league_cup: Vec<AccoladeToken>,

    #[serde(skip)]
    pub stadium: Option<Stadium>,
    /// Lower-cased `name|fullname|nickname|town`, empty parts left out
    #[serde(skip)]
    pub search_slug: String,
}

impl Club {
    /// Resolve the stadium reference and build the search key
    #[must_use]
    pub fn join(mut self, stadiums: &HashMap<StadiumId, Stadium>) -> Self {
        self.stadium = self.stadium_id.as_ref().and_then(|id| stadiums.get(id)).cloned();
        self.search_slug = [&self.name, &self.fullname, &self.nickname, &self.town]
            .into_iter()
            .filter(|part| !part.is_empty())
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join("|")
            .to_lowercase();
        self
    }

    /// Map position of the club's stadium, if both are known
    #[must_use]
    pub fn position(&self) -> Option<LatLng> {
        self.stadium.as_ref().and_then(|s| s.position)
    }

    #[must_use]
    pub fn accolade(&self, accolade: Accolade) -> &[AccoladeToken] {
        match accolade {
            Accolade::Championships => &self.championships,
            Accolade::NationalCup => &self.national_cup,
            Accolade::LeagueCup => &self.league_cup,
        }
    }

    #[must_use]
    pub fn has_accolade(&self, accolade: Accolade) -> bool {
        !self.accolade(accolade).is_empty()
    }

    /// Whether the club's search key contains an already lower-cased query
    #[must_use]
    pub fn matches_query(&self, query: &str) -> bool {
        self.search_slug.contains(query)
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    /// Minimal club with a stadium at `position`, for tests across the crate
    pub fn club_at(id: &str, league: &str, stadium_id: &str, position: LatLng) -> Club {
        let mut club = bare_club(id, league);
        club.stadium_id = Some(stadium_id.to_string());
        club.stadium = Some(Stadium {
            id: stadium_id.to_string(),
            name: format!("{stadium_id} Stadium"),
            real_name: None,
            town: String::new(),
            position: Some(position),
            capacity: None,
            built: None,
            image_count: None,
        });
        club
    }

    pub fn bare_club(id: &str, league: &str) -> Club {
        Club {
            id: id.to_string(),
            name: id.to_uppercase(),
            fullname: String::new(),
            nickname: String::new(),
            town: String::new(),
            league: league.to_string(),
            stadium_id: None,
            primary_color: None,
            secondary_color: None,
            website: None,
            founded: None,
            championships: Vec::new(),
            national_cup: Vec::new(),
            league_cup: Vec::new(),
            stadium: None,
            search_slug: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stadiums() -> HashMap<StadiumId, Stadium> {
        let parken: Stadium = serde_json::from_str(
            r#"{"id": "parken", "name": "Parken", "town": "København", "position": [55.7025, 12.5722]}"#,
        )
        .expect("valid stadium");
        HashMap::from([(parken.id.clone(), parken)])
    }

    #[test]
    fn test_join_resolves_stadium_and_slug() {
        let club: Club = serde_json::from_str(
            r##"{
                "id": "fck",
                "name": "FC København",
                "fullname": "Football Club København",
                "nickname": "Løverne",
                "town": "København",
                "league": "superliga",
                "stadiumId": "parken",
                "primaryColor": "#FFFFFF",
                "founded": 1992,
                "championships": [2001, 2003]
            }"##,
        )
        .expect("valid club");

        let club = club.join(&stadiums());
        assert_eq!(club.position(), Some(LatLng::new(55.7025, 12.5722)));
        assert_eq!(
            club.search_slug,
            "fc københavn|football club københavn|løverne|københavn"
        );
        assert!(club.has_accolade(Accolade::Championships));
        assert!(!club.has_accolade(Accolade::NationalCup));
    }

    #[test]
    fn test_join_skips_empty_slug_parts() {
        let mut club = test_support::bare_club("b93", "2div");
        club.name = "B.93".to_string();
        club.town = "Østerbro".to_string();
        let club = club.join(&HashMap::new());
        assert_eq!(club.search_slug, "b.93|østerbro");
    }

    #[test]
    fn test_unknown_stadium_stays_unresolved() {
        let mut club = test_support::bare_club("ghost", "superliga");
        club.stadium_id = Some("nowhere".to_string());
        let club = club.join(&stadiums());
        assert!(club.stadium.is_none());
        assert!(club.position().is_none());
    }

    #[test]
    fn test_matches_query() {
        let mut club = test_support::bare_club("agf", "superliga");
        club.nickname = "De Hvide".to_string();
        let club = club.join(&HashMap::new());
        assert!(club.matches_query("hvide"));
        assert!(!club.matches_query("løverne"));
    }
}
