use crate::models::Club;
use indexmap::IndexMap;

/// Clubs sharing each stadium, in order of first appearance
pub type StadiumGroups<'a> = IndexMap<&'a str, Vec<&'a Club>>;

/// Partition clubs by stadium id.
///
/// Group order follows each stadium's first appearance and members keep their
/// input order. Clubs without a stadium id are left out.
#[must_use]
pub fn group_by_stadium<'a>(clubs: &[&'a Club]) -> StadiumGroups<'a> {
    let mut groups: StadiumGroups<'a> = IndexMap::new();
    for &club in clubs {
        let Some(stadium_id) = club.stadium_id.as_deref() else { continue };
        groups.entry(stadium_id).or_default().push(club);
    }
    groups
}
