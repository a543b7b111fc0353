use crate::filter::{select_clubs, ClubSource};
use crate::grouping::group_by_stadium;
use crate::logging::log;
use crate::markers::{build_club_marker, build_group_marker, MarkerContext, MarkerDescriptor};
use crate::models::Club;

/// Build the marker layer for one render pass.
///
/// Clubs are selected from `source`, grouped by stadium, and each group
/// becomes one marker: a lone club gets its own pin, shared stadiums get a
/// group pin. Clubs whose stadium cannot be resolved are never drawn.
/// Markers come out in group order, so the same inputs always produce the
/// same layer.
#[must_use]
pub fn render(clubs: &[Club], source: ClubSource<'_>, ctx: &MarkerContext<'_>) -> Vec<MarkerDescriptor> {
    let selected: Vec<&Club> = select_clubs(clubs, source)
        .into_iter()
        .filter(|club| club.stadium.is_some())
        .collect();
    let groups = group_by_stadium(&selected);

    let markers: Vec<MarkerDescriptor> = groups
        .values()
        .filter_map(|members| match members.as_slice() {
            [club] => build_club_marker(club, ctx, false, None),
            members => build_group_marker(members, ctx),
        })
        .collect();

    log!(
        "Rendered {} markers for {} clubs at {} stadiums",
        markers.len(),
        selected.len(),
        groups.len()
    );
    markers
}
