use serde::{Deserialize, Serialize};
use std::fmt;

/// Award category a club can have won
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Accolade {
    Championships,
    NationalCup,
    LeagueCup,
}

impl Accolade {
    pub const ALL: [Accolade; 3] = [Accolade::Championships, Accolade::NationalCup, Accolade::LeagueCup];

    /// Key used by the datasets and the translation files
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Accolade::Championships => "championships",
            Accolade::NationalCup => "nationalCup",
            Accolade::LeagueCup => "leagueCup",
        }
    }

    #[must_use]
    pub const fn flag(self) -> AccoladeSet {
        match self {
            Accolade::Championships => AccoladeSet::CHAMPIONSHIPS,
            Accolade::NationalCup => AccoladeSet::NATIONAL_CUP,
            Accolade::LeagueCup => AccoladeSet::LEAGUE_CUP,
        }
    }
}

impl fmt::Display for Accolade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

bitflags::bitflags! {
    /// Set of accolade categories, used by the filter
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct AccoladeSet: u8 {
        const CHAMPIONSHIPS = 0b0000_0001;
        const NATIONAL_CUP  = 0b0000_0010;
        const LEAGUE_CUP    = 0b0000_0100;
    }
}

impl Default for AccoladeSet {
    fn default() -> Self {
        Self::empty()
    }
}

impl AccoladeSet {
    /// Iterate the categories in the set, in display order
    pub fn accolades(self) -> impl Iterator<Item = Accolade> {
        Accolade::ALL.into_iter().filter(move |a| self.contains(a.flag()))
    }
}

impl FromIterator<Accolade> for AccoladeSet {
    fn from_iter<I: IntoIterator<Item = Accolade>>(iter: I) -> Self {
        iter.into_iter().fold(Self::empty(), |set, a| set | a.flag())
    }
}

/// One entry of an accolade list; the datasets use bare years and occasional labels
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AccoladeToken {
    Year(i32),
    Label(String),
}

impl fmt::Display for AccoladeToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccoladeToken::Year(year) => write!(f, "{year}"),
            AccoladeToken::Label(label) => f.write_str(label),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_match_dataset_fields() {
        for accolade in Accolade::ALL {
            let json = serde_json::to_string(&accolade).expect("serializes");
            assert_eq!(json, format!("\"{}\"", accolade.key()));
        }
        assert_eq!(Accolade::NationalCup.to_string(), "nationalCup");
    }

    #[test]
    fn test_set_iterates_in_display_order() {
        let set: AccoladeSet = [Accolade::LeagueCup, Accolade::Championships].into_iter().collect();
        let listed: Vec<_> = set.accolades().collect();
        assert_eq!(listed, vec![Accolade::Championships, Accolade::LeagueCup]);
    }

    #[test]
    fn test_tokens_accept_years_and_labels() {
        let tokens: Vec<AccoladeToken> =
            serde_json::from_str(r#"[1998, "2001/02"]"#).expect("mixed tokens");
        assert_eq!(tokens[0], AccoladeToken::Year(1998));
        assert_eq!(tokens[1].to_string(), "2001/02");
    }
}
