use serde::{Deserialize, Serialize};

/// League identifiers grouped into tiers, best tier first.
///
/// A tier's index is its rank: it decides draw order, the default pin colour
/// and the pane a marker lands in. Leagues missing from every tier rank
/// below all of them, at `tier_count()`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LeagueRanking {
    tiers: Vec<Vec<String>>,
}

impl LeagueRanking {
    #[must_use]
    pub fn new(tiers: Vec<Vec<String>>) -> Self {
        Self { tiers }
    }

    #[must_use]
    pub fn tier_count(&self) -> usize {
        self.tiers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }

    /// Index of the first tier listing `league`, or `tier_count()` when unranked
    #[must_use]
    pub fn rank_of(&self, league: &str) -> usize {
        self.tiers
            .iter()
            .position(|tier| tier.iter().any(|l| l == league))
            .unwrap_or(self.tiers.len())
    }

    /// All league identifiers in rank order
    pub fn leagues(&self) -> impl Iterator<Item = &str> {
        self.tiers.iter().flatten().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn five_tiers() -> LeagueRanking {
        serde_json::from_str(
            r#"[["superliga"], ["1div"], ["2div-east", "2div-west"], ["3div"], ["dm-series"]]"#,
        )
        .expect("valid ranking")
    }

    #[test]
    fn test_rank_of_listed_league() {
        let ranking = five_tiers();
        assert_eq!(ranking.rank_of("superliga"), 0);
        assert_eq!(ranking.rank_of("2div-west"), 2);
        assert_eq!(ranking.rank_of("dm-series"), 4);
    }

    #[test]
    fn test_rank_of_unlisted_league_is_tier_count() {
        let ranking = five_tiers();
        assert_eq!(ranking.rank_of("amateur"), 5);
        assert_eq!(LeagueRanking::default().rank_of("superliga"), 0);
    }

    #[test]
    fn test_first_match_wins() {
        let ranking = LeagueRanking::new(vec![vec!["a".into()], vec!["a".into(), "b".into()]]);
        assert_eq!(ranking.rank_of("a"), 0);
        assert_eq!(ranking.rank_of("b"), 1);
    }

    #[test]
    fn test_leagues_in_rank_order() {
        let ranking = five_tiers();
        let leagues: Vec<_> = ranking.leagues().collect();
        assert_eq!(leagues, vec!["superliga", "1div", "2div-east", "2div-west", "3div", "dm-series"]);
    }
}
