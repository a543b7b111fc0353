//! Session state of the map view.
//!
//! `MapViewState` owns everything that changes while the map is open: the
//! loaded country, the filter and search state, the two marker layers and
//! the current selection. It never touches the browser; the Leaflet bridge
//! mirrors the layers it exposes, using the layer generations to tell when a
//! layer must be remounted.

use crate::data::CountryPayload;
use crate::fan_out::expand_group;
use crate::filter::{available_accolades, ClubSource, FilterState, LeagueFilter};
use crate::geometry::{LatLng, Projection};
use crate::logging::{log, warning};
use crate::markers::{MarkerContext, MarkerDescriptor, MarkerKind, MarkerLayer, MarkerRef};
use crate::models::{Accolade, Club, ClubId, CountryContext, LeagueRanking, MarkerSettings};
use crate::panes::{PaneHost, TierPanes};
use crate::render::render;
use crate::search::SearchState;

/// Markers of one layer, tagged with the build that produced them
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayerState {
    generation: u64,
    markers: Vec<MarkerDescriptor>,
}

impl LayerState {
    /// Bumped every time the layer contents are replaced
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn markers(&self) -> &[MarkerDescriptor] {
        &self.markers
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    fn replace(&mut self, markers: Vec<MarkerDescriptor>) {
        self.generation += 1;
        self.markers = markers;
    }

    fn clear(&mut self) {
        if !self.markers.is_empty() {
            self.replace(Vec::new());
        }
    }

    fn get(&self, generation: u64, index: usize) -> Option<&MarkerDescriptor> {
        if generation == self.generation {
            self.markers.get(index)
        } else {
            None
        }
    }
}

/// What a marker click did. The click is always consumed by the marker and
/// must not reach the map's background handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    /// A group was fanned out into this many markers
    Expanded { members: usize },
    /// A club was selected
    Selected(ClubId),
    /// The marker belonged to a layer that has since been rebuilt
    Ignored,
}

/// Proof that a country load was started, checked when its data arrives
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    pub country_id: String,
    generation: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadResult {
    /// Data applied and markers rendered
    Loaded { clubs: usize },
    /// The load failed; the map is left empty for this country
    Failed,
    /// Another country switch started after this one; nothing was applied
    Stale,
}

/// The map session
#[derive(Debug, Default)]
pub struct MapViewState {
    country: CountryContext,
    clubs: Vec<Club>,
    ranking: LeagueRanking,
    filter: FilterState,
    settings: MarkerSettings,
    search: SearchState,
    main: LayerState,
    fan_out: LayerState,
    active: Option<MarkerRef>,
    selected_club: Option<ClubId>,
    tier_panes: TierPanes,
    load_generation: u64,
}

impl MapViewState {
    #[must_use]
    pub fn new(settings: MarkerSettings) -> Self {
        Self { settings, ..Self::default() }
    }

    #[must_use]
    pub fn country(&self) -> &CountryContext {
        &self.country
    }

    #[must_use]
    pub fn clubs(&self) -> &[Club] {
        &self.clubs
    }

    #[must_use]
    pub fn club(&self, id: &str) -> Option<&Club> {
        self.clubs.iter().find(|club| club.id == id)
    }

    #[must_use]
    pub fn ranking(&self) -> &LeagueRanking {
        &self.ranking
    }

    #[must_use]
    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    #[must_use]
    pub fn settings(&self) -> MarkerSettings {
        self.settings
    }

    #[must_use]
    pub fn search(&self) -> &SearchState {
        &self.search
    }

    #[must_use]
    pub fn layer(&self, layer: MarkerLayer) -> &LayerState {
        match layer {
            MarkerLayer::Main => &self.main,
            MarkerLayer::FanOut => &self.fan_out,
        }
    }

    /// The highlighted marker, if it is still on the map
    #[must_use]
    pub fn active(&self) -> Option<MarkerRef> {
        self.active.filter(|marker| self.descriptor(*marker).is_some())
    }

    /// Look a marker up, failing when its layer has been rebuilt since
    #[must_use]
    pub fn descriptor(&self, marker: MarkerRef) -> Option<&MarkerDescriptor> {
        self.layer(marker.layer).get(marker.generation, marker.index)
    }

    /// Handle of the main-layer marker drawing `club_id` on its own
    #[must_use]
    pub fn find_club_marker(&self, club_id: &str) -> Option<MarkerRef> {
        self.main
            .markers
            .iter()
            .position(|marker| marker.shows_club(club_id))
            .map(|index| MarkerRef { layer: MarkerLayer::Main, generation: self.main.generation, index })
    }

    fn marker_context(&self) -> MarkerContext<'_> {
        MarkerContext { ranking: &self.ranking, country: &self.country, flags: self.settings.style }
    }

    /// Rebuild the main layer from the current data, filter and search.
    ///
    /// The fan-out overlay is emptied and the active marker dropped; the
    /// selected club is kept so it can be re-activated.
    pub fn rerender(&mut self) {
        let markers = {
            let ctx = self.marker_context();
            let source = match self.search.results() {
                Some(ids) => ClubSource::Explicit(ids),
                None => ClubSource::Filtered(&self.filter),
            };
            render(&self.clubs, source, &ctx)
        };
        self.main.replace(markers);
        self.fan_out.clear();
        self.active = None;
    }

    /// React to a click on a marker
    pub fn click_marker(
        &mut self,
        marker: MarkerRef,
        projection: &impl Projection,
        on_select: impl FnOnce(&Club),
    ) -> ClickOutcome {
        let Some(descriptor) = self.descriptor(marker) else {
            log!("Ignoring click on a marker from a replaced layer");
            return ClickOutcome::Ignored;
        };

        match descriptor.kind.clone() {
            MarkerKind::Group(ids) => {
                let fanned = {
                    let members: Vec<&Club> = ids.iter().filter_map(|id| self.club(id)).collect();
                    expand_group(&members, descriptor.position, projection, &self.marker_context())
                };
                let members = fanned.len();
                self.fan_out.replace(fanned);
                ClickOutcome::Expanded { members }
            }
            MarkerKind::Individual(id) | MarkerKind::FanOutChild(id) => {
                self.fan_out.clear();
                // A fanned child disappears with the overlay it was part of
                let still_drawn = self.descriptor(marker).is_some().then_some(marker);
                self.activate(still_drawn, &id, on_select)
            }
        }
    }

    fn activate(&mut self, marker: Option<MarkerRef>, club_id: &str, on_select: impl FnOnce(&Club)) -> ClickOutcome {
        let Some(club) = self.club(club_id) else {
            warning!("Club {club_id} is not in the current dataset");
            return ClickOutcome::Ignored;
        };
        on_select(club);
        self.active = marker;
        self.selected_club = Some(club_id.to_string());
        ClickOutcome::Selected(club_id.to_string())
    }

    /// Clear selection, active marker and fan-out. Returns whether search was open.
    fn reset_selection(&mut self) -> bool {
        self.active = None;
        self.selected_club = None;
        self.fan_out.clear();
        let searching = self.search.is_active();
        self.search.deactivate();
        searching
    }

    /// A click that reached the map background
    pub fn click_background(&mut self) {
        if self.reset_selection() {
            self.rerender();
        }
    }

    /// Re-activate the selected club's marker after the layer was rebuilt.
    ///
    /// The selection is dropped when the club is no longer in the dataset.
    /// Returns whether a marker was activated.
    pub fn reapply_selection(&mut self, on_select: impl FnOnce(&Club)) -> bool {
        let Some(club_id) = self.selected_club.clone() else {
            return false;
        };
        if self.club(&club_id).is_none() {
            self.reset_selection();
            return false;
        }
        match self.find_club_marker(&club_id) {
            Some(marker) => {
                self.activate(Some(marker), &club_id, on_select);
                true
            }
            None => false,
        }
    }

    pub fn set_clustered(&mut self, clustered: bool) {
        self.settings.clustered = clustered;
        self.rerender();
    }

    pub fn set_simple_markers(&mut self, simple: bool) {
        self.settings.style.use_simple_markers = simple;
        self.rerender();
    }

    pub fn set_show_tooltips(&mut self, show: bool) {
        self.settings.style.show_tooltips = show;
        self.rerender();
    }

    pub fn set_league_filter(&mut self, league: LeagueFilter) {
        self.filter.league = league;
        self.reset_selection();
        self.rerender();
    }

    pub fn toggle_accolade(&mut self, accolade: Accolade) {
        self.filter.toggle_accolade(accolade);
        self.reset_selection();
        self.rerender();
    }

    pub fn reset_filter(&mut self) {
        self.filter = FilterState::default();
        self.reset_selection();
        self.rerender();
    }

    /// Start switching to another country.
    ///
    /// Returns `None` when `country_id` is already shown with data. Otherwise
    /// the league filter, search and selection are reset, the map is emptied
    /// and a ticket for the new load is issued; any earlier ticket goes stale.
    pub fn begin_country_switch(&mut self, country_id: &str) -> Option<LoadTicket> {
        if self.country.id == country_id && !self.clubs.is_empty() {
            return None;
        }

        self.country = CountryContext::new(country_id);
        self.filter.league = LeagueFilter::All;
        self.reset_selection();
        self.main.clear();
        self.load_generation += 1;
        log!("Switching to country {country_id} (load {})", self.load_generation);

        Some(LoadTicket { country_id: country_id.to_string(), generation: self.load_generation })
    }

    fn is_current(&self, ticket: &LoadTicket) -> bool {
        if ticket.generation == self.load_generation {
            true
        } else {
            warning!(
                "Discarding data for {} (load {}); load {} is current",
                ticket.country_id,
                ticket.generation,
                self.load_generation
            );
            false
        }
    }

    /// Apply the datasets of a started load.
    ///
    /// Tier panes are rebuilt for the new ranking before any marker is built.
    pub fn finish_country_load(
        &mut self,
        ticket: &LoadTicket,
        payload: CountryPayload,
        panes: &mut impl PaneHost,
    ) -> LoadResult {
        if !self.is_current(ticket) {
            return LoadResult::Stale;
        }

        let (clubs, ranking) = payload.join();
        self.clubs = clubs;
        self.ranking = ranking;
        self.filter.accolades &= available_accolades(&self.clubs);
        self.tier_panes.rebuild(panes, &self.ranking);
        self.rerender();
        self.reapply_selection(|_| {});

        log!("Loaded {} clubs for {}", self.clubs.len(), ticket.country_id);
        LoadResult::Loaded { clubs: self.clubs.len() }
    }

    /// Record that a started load could not fetch its data
    pub fn fail_country_load(&mut self, ticket: &LoadTicket, error: &str) -> LoadResult {
        if !self.is_current(ticket) {
            return LoadResult::Stale;
        }

        warning!("Failed to load country data for {}: {error}", ticket.country_id);
        self.clubs.clear();
        self.ranking = LeagueRanking::default();
        self.rerender();
        LoadResult::Failed
    }

    pub fn activate_search(&mut self) {
        self.search.activate();
    }

    /// Store the query and narrow the map to its matches, or show the
    /// filtered set again when the query is too short. Returns the matches.
    pub fn update_search(&mut self, query: &str) -> &[ClubId] {
        self.search.update(query, &self.clubs);
        self.rerender();
        self.search.results().unwrap_or_default()
    }

    pub fn deactivate_search(&mut self) {
        self.search.deactivate();
        self.rerender();
    }

    /// Close the search for a picked result. Returns where to fly to.
    pub fn select_search_result(&mut self, club_id: &str) -> Option<LatLng> {
        self.deactivate_search();
        self.club(club_id).and_then(Club::position)
    }

    /// Select a club by id, highlighting its marker when one is drawn.
    ///
    /// Used once the map has settled on a search result.
    pub fn activate_club(&mut self, club_id: &str, on_select: impl FnOnce(&Club)) -> ClickOutcome {
        self.fan_out.clear();
        let marker = self.find_club_marker(club_id);
        self.activate(marker, club_id, on_select)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::BundledData;
    use crate::data::PayloadSource;
    use crate::geometry::SphericalMercator;
    use crate::markers::MarkerStyle;
    use crate::panes::test_support::RecordingPaneHost;
    use crate::panes::Pane;
    use crate::models::{Stadium, StyleFlags};

    const PARKEN: LatLng = LatLng::new(55.7025, 12.5722);

    fn stadium(id: &str, position: LatLng) -> Stadium {
        Stadium {
            id: id.to_string(),
            name: id.to_string(),
            real_name: None,
            town: String::new(),
            position: Some(position),
            capacity: None,
            built: None,
            image_count: None,
        }
    }

    fn pair_payload() -> CountryPayload {
        CountryPayload::from_json(
            r#"[
                {"id": "a", "name": "Alpha", "league": "L0", "stadiumId": "s"},
                {"id": "b", "name": "Beta", "league": "L0", "stadiumId": "s"},
                {"id": "c", "name": "Gamma", "league": "L1", "stadiumId": "t", "championships": [2001]}
            ]"#,
            "[]",
            r#"[["L0"], ["L1"]]"#,
        )
        .map(|mut payload| {
            payload.stadiums = vec![stadium("s", PARKEN), stadium("t", LatLng::new(56.13, 10.19))];
            payload
        })
        .expect("valid payload")
    }

    fn loaded() -> (MapViewState, RecordingPaneHost) {
        let mut state = MapViewState::default();
        let mut host = RecordingPaneHost::default();
        let ticket = state.begin_country_switch("da").expect("first switch loads");
        assert_eq!(state.finish_country_load(&ticket, pair_payload(), &mut host), LoadResult::Loaded { clubs: 3 });
        (state, host)
    }

    fn main_ref(state: &MapViewState, index: usize) -> MarkerRef {
        MarkerRef { layer: MarkerLayer::Main, generation: state.layer(MarkerLayer::Main).generation(), index }
    }

    fn projection() -> SphericalMercator {
        SphericalMercator::new(12.0)
    }

    #[test]
    fn test_load_builds_panes_and_markers() {
        let (state, host) = loaded();
        let names: Vec<_> = host.panes.keys().cloned().collect();
        assert_eq!(names, vec!["tier-0", "tier-1", "tier-2"]);

        let markers = state.layer(MarkerLayer::Main).markers();
        assert_eq!(markers.len(), 2);
        assert_eq!(markers[0].pane, Pane::Tier(0));
        assert_eq!(markers[0].icon.style(), MarkerStyle::Split);
        assert_eq!(markers[0].kind, MarkerKind::Group(vec!["a".into(), "b".into()]));
    }

    #[test]
    fn test_group_click_fans_out() {
        let (mut state, _) = loaded();
        let group = main_ref(&state, 0);

        let outcome = state.click_marker(group, &projection(), |_| panic!("groups do not select"));
        assert_eq!(outcome, ClickOutcome::Expanded { members: 2 });

        let fanned = state.layer(MarkerLayer::FanOut).markers();
        assert_eq!(fanned.len(), 2);
        assert!(fanned.iter().all(|m| m.pane == Pane::FanOut));
        assert_eq!(fanned[0].kind, MarkerKind::FanOutChild("a".into()));
        assert!(state.selected_club.is_none());
    }

    #[test]
    fn test_selecting_fanned_child_closes_overlay() {
        let (mut state, _) = loaded();
        state.click_marker(main_ref(&state, 0), &projection(), |_| {});
        let child = MarkerRef {
            layer: MarkerLayer::FanOut,
            generation: state.layer(MarkerLayer::FanOut).generation(),
            index: 1,
        };

        let mut selected = None;
        let outcome = state.click_marker(child, &projection(), |club| selected = Some(club.id.clone()));
        assert_eq!(outcome, ClickOutcome::Selected("b".into()));
        assert_eq!(selected.as_deref(), Some("b"));
        assert!(state.layer(MarkerLayer::FanOut).is_empty());
        assert_eq!(state.selected_club.as_deref(), Some("b"));
        // The child left the map with the overlay
        assert_eq!(state.active(), None);
    }

    #[test]
    fn test_individual_click_activates_and_replaces_previous() {
        let (mut state, _) = loaded();
        let single = main_ref(&state, 1);

        let outcome = state.click_marker(single, &projection(), |_| {});
        assert_eq!(outcome, ClickOutcome::Selected("c".into()));
        assert_eq!(state.active(), Some(single));

        state.click_background();
        assert_eq!(state.active(), None);
        assert!(state.selected_club.is_none());
    }

    #[test]
    fn test_stale_marker_click_is_ignored() {
        let (mut state, _) = loaded();
        let old = main_ref(&state, 1);
        state.set_show_tooltips(true);

        assert_eq!(state.click_marker(old, &projection(), |_| {}), ClickOutcome::Ignored);
        assert!(state.selected_club.is_none());
    }

    #[test]
    fn test_rerender_drops_active_and_reapply_restores_it() {
        let (mut state, _) = loaded();
        state.click_marker(main_ref(&state, 1), &projection(), |_| {});

        state.set_simple_markers(true);
        assert_eq!(state.active(), None);
        assert_eq!(state.selected_club.as_deref(), Some("c"));

        assert!(state.reapply_selection(|_| {}));
        assert_eq!(state.active(), Some(main_ref(&state, 1)));
        assert_eq!(state.settings().style, StyleFlags { use_simple_markers: true, show_tooltips: false });
    }

    #[test]
    fn test_filter_change_clears_selection() {
        let (mut state, _) = loaded();
        state.click_marker(main_ref(&state, 1), &projection(), |_| {});
        state.set_league_filter(LeagueFilter::League("L1".into()));

        assert!(state.selected_club.is_none());
        let markers = state.layer(MarkerLayer::Main).markers();
        assert_eq!(markers.len(), 1);
        assert_eq!(markers[0].kind, MarkerKind::Individual("c".into()));

        state.toggle_accolade(Accolade::NationalCup);
        assert!(state.layer(MarkerLayer::Main).is_empty());

        state.reset_filter();
        assert_eq!(state.layer(MarkerLayer::Main).markers().len(), 2);
    }

    #[test]
    fn test_same_country_with_data_does_not_reload() {
        let (mut state, _) = loaded();
        assert!(state.begin_country_switch("da").is_none());
    }

    #[test]
    fn test_stale_ticket_is_discarded() {
        let mut state = MapViewState::default();
        let mut host = RecordingPaneHost::default();
        let first = state.begin_country_switch("da").expect("switch starts");
        let second = state.begin_country_switch("se").expect("switch starts");

        assert_eq!(state.finish_country_load(&first, pair_payload(), &mut host), LoadResult::Stale);
        assert!(state.clubs().is_empty());
        assert!(host.panes.is_empty());

        assert_eq!(state.fail_country_load(&second, "Could not fetch data for se"), LoadResult::Failed);
        assert_eq!(state.country().id, "se");
        assert!(state.layer(MarkerLayer::Main).is_empty());
    }

    #[test]
    fn test_country_switch_resets_league_and_search() {
        let (mut state, _) = loaded();
        state.set_league_filter(LeagueFilter::League("L1".into()));
        state.update_search("al");

        let ticket = state.begin_country_switch("se").expect("different country");
        assert_eq!(state.filter().league, LeagueFilter::All);
        assert!(!state.search().is_active());
        assert!(state.layer(MarkerLayer::Main).is_empty());
        assert_eq!(ticket.country_id, "se");
    }

    #[test]
    fn test_search_narrows_and_restores() {
        let (mut state, _) = loaded();
        state.activate_search();
        assert_eq!(state.update_search("ALP"), &["a".to_string()]);

        let markers = state.layer(MarkerLayer::Main).markers();
        assert_eq!(markers.len(), 1);
        assert_eq!(markers[0].kind, MarkerKind::Individual("a".into()));

        assert!(state.update_search("a").is_empty());
        assert_eq!(state.layer(MarkerLayer::Main).markers().len(), 2);

        state.update_search("gam");
        state.click_background();
        assert!(!state.search().is_active());
        assert_eq!(state.layer(MarkerLayer::Main).markers().len(), 2);
    }

    #[test]
    fn test_search_result_flies_then_activates() {
        let (mut state, _) = loaded();
        state.update_search("gamma");

        assert_eq!(state.select_search_result("c"), Some(LatLng::new(56.13, 10.19)));
        assert!(!state.search().is_active());

        let outcome = state.activate_club("c", |_| {});
        assert_eq!(outcome, ClickOutcome::Selected("c".into()));
        assert_eq!(state.active(), Some(main_ref(&state, 1)));

        // Clubs inside a group have no marker of their own
        assert_eq!(state.activate_club("a", |_| {}), ClickOutcome::Selected("a".into()));
        assert_eq!(state.active(), None);
    }

    #[test]
    fn test_bundled_country_loads() {
        let mut state = MapViewState::new(MarkerSettings::default());
        let mut host = RecordingPaneHost::default();
        let ticket = state.begin_country_switch("da").expect("switch starts");
        let payload = BundledData.load("da").expect("bundled data");

        assert!(matches!(state.finish_country_load(&ticket, payload, &mut host), LoadResult::Loaded { .. }));
        // B.93 and Skjold share Østerbro Stadion
        assert!(state
            .layer(MarkerLayer::Main)
            .markers()
            .iter()
            .any(|m| m.kind == MarkerKind::Group(vec!["b93".into(), "skjold".into()])));
    }
}
