mod accolade;
mod club;
mod country;
mod league_ranking;
mod stadium;
mod user_settings;

pub use accolade::{Accolade, AccoladeSet, AccoladeToken};
pub use club::{Club, ClubId};
pub use country::{initial_country, Country, CountryContext};
pub use league_ranking::LeagueRanking;
pub use stadium::{Stadium, StadiumId};
pub use user_settings::{MarkerSettings, StyleFlags};

#[cfg(test)]
pub(crate) use club::test_support;
