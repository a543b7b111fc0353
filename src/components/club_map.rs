use crate::components::country_dock::CountryDock;
use crate::components::filter_panel::FilterPanel;
use crate::components::info_panel::ClubDetails;
use crate::components::search_box::SearchBox;
use crate::config::MapConfig;
use crate::constants::{SEARCH_RESULT_ACTIVATION_DELAY_MS, SEARCH_RESULT_ZOOM};
use crate::data::PayloadSource;
use crate::leaflet::{LeafletMap, MarkerClickHandler};
use crate::logging::log;
use crate::markers::MarkerRef;
use crate::models::{initial_country, Club, Country, MarkerSettings};
use crate::theme::Theme;
use crate::view_state::{LoadResult, LoadTicket, MapViewState};
use gloo_timers::callback::Timeout;
use leptos::{
    component, create_effect, create_node_ref, create_signal, provide_context, view, Callable, Callback,
    IntoView, MaybeSignal, ReadSignal, SignalGet, SignalGetUntracked, SignalSet, SignalUpdate, WriteSignal,
};
use std::cell::RefCell;
use std::rc::Rc;

const FLY_TO_DURATION_SECS: f64 = 1.5;

/// Shared handle to the map session, provided to the map's child components.
///
/// The session is not reactive itself; every mutation goes through
/// [`MapController::update`], which mirrors it onto Leaflet and bumps
/// `revision` so views reading the session re-run.
#[derive(Clone)]
pub struct MapController {
    state: Rc<RefCell<MapViewState>>,
    leaflet: Rc<RefCell<Option<LeafletMap>>>,
    source: Rc<dyn PayloadSource>,
    config: Rc<MapConfig>,
    pub revision: ReadSignal<u64>,
    set_revision: WriteSignal<u64>,
    pub countries: ReadSignal<Vec<Country>>,
    set_countries: WriteSignal<Vec<Country>>,
    pub loading: ReadSignal<bool>,
    set_loading: WriteSignal<bool>,
    on_select: Callback<Option<ClubDetails>>,
}

impl MapController {
    /// Read the session; reactive through `revision`
    pub fn with<T>(&self, f: impl FnOnce(&MapViewState) -> T) -> T {
        let _ = self.revision.get();
        f(&self.state.borrow())
    }

    /// Mutate the session, then mirror it onto the map
    pub fn update(&self, f: impl FnOnce(&mut MapViewState)) {
        f(&mut self.state.borrow_mut());
        self.sync();
    }

    fn sync(&self) {
        let handler: MarkerClickHandler = {
            let controller = self.clone();
            Rc::new(move |marker| controller.click_marker(marker))
        };
        if let Some(map) = self.leaflet.borrow_mut().as_mut() {
            if let Err(e) = map.sync(&self.state.borrow(), &handler) {
                leptos::logging::error!("Failed to update map markers: {:?}", e);
            }
        }
        self.set_revision.update(|revision| *revision += 1);
    }

    fn publish(&self, club: Option<Club>) {
        let details = club.map(|club| {
            let state = self.state.borrow();
            ClubDetails::new(&club, state.clubs(), state.country())
        });
        self.on_select.call(details);
    }

    fn click_marker(&self, marker: MarkerRef) {
        let mut selected = None;
        let outcome = {
            let leaflet = self.leaflet.borrow();
            let Some(map) = leaflet.as_ref() else { return };
            self.state
                .borrow_mut()
                .click_marker(marker, map, |club| selected = Some(club.clone()))
        };
        log!("Marker click: {:?}", outcome);
        self.sync();
        if selected.is_some() {
            self.publish(selected);
        }
    }

    fn click_background(&self) {
        self.update(MapViewState::click_background);
        self.publish(None);
    }

    /// Clear the selection after a filter or search change closed it
    pub fn clear_selection(&self) {
        self.publish(None);
    }

    /// Dock button: switch to `country_id`, or recentre when it is already shown
    pub fn choose_country(&self, country_id: &str) {
        let current = self.state.borrow().country().id == country_id;
        if current && self.reset_country_view(country_id) {
            return;
        }
        self.switch_country(country_id);
    }

    fn find_country(&self, country_id: &str) -> Option<Country> {
        self.countries.get_untracked().into_iter().find(|c| c.id == country_id)
    }

    fn reset_country_view(&self, country_id: &str) -> bool {
        let Some(country) = self.find_country(country_id) else { return false };
        if self.state.borrow().clubs().is_empty() {
            return false;
        }
        if let Some(map) = self.leaflet.borrow().as_ref() {
            let _ = map.set_view(country.map_center, country.map_zoom);
        }
        true
    }

    fn switch_country(&self, country_id: &str) {
        let Some(ticket) = self.state.borrow_mut().begin_country_switch(country_id) else { return };
        self.sync();
        self.publish(None);

        let Some(country) = self.find_country(country_id) else {
            leptos::logging::error!("Country '{}' not found.", country_id);
            return;
        };

        self.set_loading.set(true);
        let leaflet = self.leaflet.borrow();
        let Some(map) = leaflet.as_ref() else { return };
        let controller = self.clone();
        // Data is applied once the pan has settled; the timeout moves it out of
        // Leaflet's event dispatch, which may run inside `set_view`.
        let registered = map.once_moveend(move || {
            Timeout::new(0, move || controller.finish_country_load(&ticket)).forget();
        });
        let moved = registered.and_then(|()| map.set_view(country.map_center, country.map_zoom));
        if let Err(e) = moved {
            leptos::logging::error!("Failed to move map to {}: {:?}", country_id, e);
        }
    }

    fn finish_country_load(&self, ticket: &LoadTicket) {
        let payload = self.source.load(&ticket.country_id);
        let result = {
            let mut leaflet = self.leaflet.borrow_mut();
            let Some(map) = leaflet.as_mut() else { return };
            let mut state = self.state.borrow_mut();
            match payload {
                Ok(payload) => state.finish_country_load(ticket, payload, map),
                Err(e) => state.fail_country_load(ticket, &e),
            }
        };
        if result != LoadResult::Stale {
            self.set_loading.set(false);
        }
        self.sync();
    }

    pub fn select_search_result(&self, club_id: &str) {
        let target = self.state.borrow_mut().select_search_result(club_id);
        self.sync();

        if let (Some(position), Some(map)) = (target, self.leaflet.borrow().as_ref()) {
            if let Err(e) = map.fly_to(position, SEARCH_RESULT_ZOOM, FLY_TO_DURATION_SECS) {
                leptos::logging::error!("Failed to fly to search result: {:?}", e);
            }
        }

        let controller = self.clone();
        let club_id = club_id.to_string();
        Timeout::new(SEARCH_RESULT_ACTIVATION_DELAY_MS, move || {
            let mut selected = None;
            controller
                .state
                .borrow_mut()
                .activate_club(&club_id, |club| selected = Some(club.clone()));
            controller.sync();
            controller.publish(selected);
        })
        .forget();
    }

    /// Apply marker settings chosen by the host page
    pub fn apply_settings(&self, settings: MarkerSettings) {
        if self.state.borrow().settings() == settings {
            return;
        }
        self.update(|state| {
            let current = state.settings();
            if current.clustered != settings.clustered {
                state.set_clustered(settings.clustered);
            }
            if current.style.use_simple_markers != settings.style.use_simple_markers {
                state.set_simple_markers(settings.style.use_simple_markers);
            }
            if current.style.show_tooltips != settings.style.show_tooltips {
                state.set_show_tooltips(settings.style.show_tooltips);
            }
        });
    }

    fn apply_theme(&self, theme: Theme) {
        if let Some(map) = self.leaflet.borrow_mut().as_mut() {
            if let Err(e) = map.set_tiles(self.config.tiles(theme), self.config.max_zoom) {
                leptos::logging::error!("Failed to set tile layer: {:?}", e);
            }
        }
        let body = web_sys::window().and_then(|w| w.document()).and_then(|d| d.body());
        if let Some(body) = body {
            let _ = body.class_list().toggle_with_force("dark-mode", theme.body_class().is_some());
        }
    }
}

#[component]
#[must_use]
pub fn ClubMap(
    config: MapConfig,
    source: Rc<dyn PayloadSource>,
    #[prop(into)] settings: MaybeSignal<MarkerSettings>,
    theme: ReadSignal<Theme>,
    on_select: Callback<Option<ClubDetails>>,
) -> impl IntoView {
    let map_container_ref = create_node_ref::<leptos::html::Div>();
    let (revision, set_revision) = create_signal(0_u64);
    let (countries, set_countries) = create_signal(Vec::<Country>::new());
    let (loading, set_loading) = create_signal(false);

    let controller = MapController {
        state: Rc::new(RefCell::new(MapViewState::new(settings.get_untracked()))),
        leaflet: Rc::new(RefCell::new(None)),
        source,
        config: Rc::new(config),
        revision,
        set_revision,
        countries,
        set_countries,
        loading,
        set_loading,
        on_select,
    };
    provide_context(controller.clone());

    // Initialize Leaflet once the container is mounted
    let init = controller.clone();
    create_effect(move |_| {
        let Some(container) = map_container_ref.get() else { return };
        if init.leaflet.borrow().is_some() {
            return;
        }
        let container_element: &web_sys::HtmlElement = &container;

        let mut map = match LeafletMap::new(container_element) {
            Ok(map) => map,
            Err(e) => {
                leptos::logging::error!("Failed to initialize Leaflet map: {:?}", e);
                return;
            }
        };
        let background = init.clone();
        if let Err(e) = map.on_background_click(move || background.click_background()) {
            leptos::logging::error!("Failed to register map click handler: {:?}", e);
        }
        *init.leaflet.borrow_mut() = Some(map);
        init.apply_theme(theme.get_untracked());

        match init.source.countries() {
            Ok(countries) => {
                let first = initial_country(&countries, &init.config.default_country).map(|c| c.id.clone());
                let fallback = countries.first().map(|c| (c.map_center, c.map_zoom));
                init.set_countries.set(countries);
                if let Some(country_id) = first {
                    init.switch_country(&country_id);
                } else {
                    leptos::logging::warn!("No data is available for any country.");
                    if let (Some((center, zoom)), Some(map)) = (fallback, init.leaflet.borrow().as_ref()) {
                        let _ = map.set_view(center, zoom);
                    }
                }
            }
            Err(e) => leptos::logging::error!("FATAL: Could not initialize map. {}", e),
        }
    });

    let configured = controller.clone();
    create_effect(move |_| {
        let settings = settings.get();
        configured.apply_settings(settings);
    });

    let themed = controller.clone();
    create_effect(move |_| {
        let theme = theme.get();
        themed.apply_theme(theme);
    });

    view! {
        <div class="club-map">
            <div class="map-container" id="map" node_ref=map_container_ref></div>
            <div class="loading-overlay" class:visible=move || loading.get()>
                <div class="spinner"></div>
            </div>
            <SearchBox />
            <FilterPanel />
            <CountryDock />
        </div>
    }
}
