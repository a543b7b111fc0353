use crate::models::{Club, Country, LeagueRanking, Stadium, StadiumId};
use serde::Deserialize;
use std::collections::HashMap;

/// One country's datasets as loaded, before clubs are joined to stadiums
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CountryPayload {
    pub clubs: Vec<Club>,
    pub stadiums: Vec<Stadium>,
    pub ranking: LeagueRanking,
}

impl CountryPayload {
    /// Parse the three per-country documents (`clubs.json`, `stadiums.json`, `leagues.json`)
    ///
    /// # Errors
    ///
    /// Returns an error naming the document that failed to parse
    pub fn from_json(clubs: &str, stadiums: &str, leagues: &str) -> Result<Self, String> {
        Ok(Self {
            clubs: serde_json::from_str(clubs).map_err(|e| format!("Failed to parse clubs: {e}"))?,
            stadiums: serde_json::from_str(stadiums).map_err(|e| format!("Failed to parse stadiums: {e}"))?,
            ranking: serde_json::from_str(leagues).map_err(|e| format!("Failed to parse leagues: {e}"))?,
        })
    }

    /// Resolve every club's stadium. Clubs pointing at an unknown stadium keep
    /// `stadium = None` and are left off the map.
    #[must_use]
    pub fn join(self) -> (Vec<Club>, LeagueRanking) {
        let stadiums: HashMap<StadiumId, Stadium> =
            self.stadiums.into_iter().map(|s| (s.id.clone(), s)).collect();
        let clubs = self.clubs.into_iter().map(|club| club.join(&stadiums)).collect();
        (clubs, self.ranking)
    }
}

/// Parse the country dock, marking the countries listed in `available_data.json`
///
/// # Errors
///
/// Returns an error if either document is malformed
pub fn parse_countries(countries: &str, available: &str) -> Result<Vec<Country>, String> {
    let mut countries: Vec<Country> =
        serde_json::from_str(countries).map_err(|e| format!("Failed to parse countries: {e}"))?;
    let available: Vec<String> =
        serde_json::from_str(available).map_err(|e| format!("Failed to parse available data: {e}"))?;
    for country in &mut countries {
        country.has_data = available.contains(&country.id);
    }
    Ok(countries)
}

/// Where country datasets come from
pub trait PayloadSource {
    /// Every country of the dock, with `has_data` set
    ///
    /// # Errors
    ///
    /// Returns an error if the country list cannot be read
    fn countries(&self) -> Result<Vec<Country>, String>;

    /// Datasets for one country
    ///
    /// # Errors
    ///
    /// Returns an error if the country has no data or it cannot be read
    fn load(&self, country_id: &str) -> Result<CountryPayload, String>;
}

/// Datasets compiled into the binary
#[derive(Debug, Clone, Copy, Default)]
pub struct BundledData;

impl PayloadSource for BundledData {
    fn countries(&self) -> Result<Vec<Country>, String> {
        parse_countries(
            include_str!("../data/countries.json"),
            include_str!("../data/available_data.json"),
        )
    }

    fn load(&self, country_id: &str) -> Result<CountryPayload, String> {
        match country_id {
            "da" => CountryPayload::from_json(
                include_str!("../data/da/clubs.json"),
                include_str!("../data/da/stadiums.json"),
                include_str!("../data/da/leagues.json"),
            ),
            other => Err(format!("Could not fetch data for {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::league_options;

    #[test]
    fn test_bundled_countries() {
        let countries = BundledData.countries().expect("bundled countries parse");
        assert_eq!(countries.len(), 3);
        let with_data: Vec<&str> = countries.iter().filter(|c| c.has_data).map(|c| c.id.as_str()).collect();
        assert_eq!(with_data, vec!["da"]);
    }

    #[test]
    fn test_bundled_denmark_joins() {
        let (clubs, ranking) = BundledData.load("da").expect("bundled data parses").join();
        assert_eq!(ranking.tier_count(), 4);

        let fck = clubs.iter().find(|c| c.id == "fck").expect("fck is bundled");
        assert_eq!(fck.stadium.as_ref().map(|s| s.name.as_str()), Some("Parken"));
        assert!(fck.search_slug.contains("løverne"));

        // KB points at a stadium that is not in the dataset
        let kb = clubs.iter().find(|c| c.id == "kb").expect("kb is bundled");
        assert!(kb.stadium.is_none());

        let options = league_options(&ranking, &clubs);
        assert_eq!(options.first().map(|o| o.league.as_str()), Some("Superliga"));
    }

    #[test]
    fn test_unknown_country_fails() {
        let err = BundledData.load("se").expect_err("no bundled data for se");
        assert!(err.contains("se"));
    }

    #[test]
    fn test_bad_document_is_named() {
        let err = CountryPayload::from_json("[]", "{", "[]").expect_err("stadiums are malformed");
        assert!(err.starts_with("Failed to parse stadiums"));
    }

    #[test]
    fn test_unknown_stadium_id_leaves_club_unresolved() {
        let payload = CountryPayload::from_json(
            r#"[{"id": "x", "name": "X", "league": "L", "stadiumId": "gone"}]"#,
            "[]",
            r#"[["L"]]"#,
        )
        .expect("valid payload");
        let (clubs, _) = payload.join();
        assert_eq!(clubs.len(), 1);
        assert!(clubs[0].stadium.is_none());
    }
}
