use crate::components::club_map::MapController;
use leptos::{
    component, create_node_ref, ev, event_target_value, expect_context, html, on_cleanup, view, IntoView,
};
use wasm_bindgen::JsCast;

/// One row of the result list
#[derive(Debug, Clone, PartialEq)]
struct SearchHit {
    club_id: String,
    name: String,
    league: String,
    logo_path: String,
}

/// Club search: typing narrows the map to the matches, picking a result flies to it
#[component]
#[must_use]
pub fn SearchBox() -> impl IntoView {
    let controller = expect_context::<MapController>();
    let container_ref = create_node_ref::<html::Div>();
    let input_ref = create_node_ref::<html::Input>();

    // Clicks anywhere outside the search close it
    let outside = controller.clone();
    let handle = leptos::leptos_dom::helpers::window_event_listener(ev::click, move |ev| {
        if !outside.with(|state| state.search().is_active()) {
            return;
        }
        let Some(container) = container_ref.get_untracked() else { return };
        let target = ev.target().and_then(|t| t.dyn_into::<web_sys::Node>().ok());
        if container.contains(target.as_ref()) {
            return;
        }
        outside.update(|state| state.deactivate_search());
    });
    on_cleanup(move || handle.remove());

    let is_active = {
        let controller = controller.clone();
        move || controller.with(|state| state.search().is_active())
    };
    let query = {
        let controller = controller.clone();
        move || controller.with(|state| state.search().query().to_string())
    };
    let has_query = query.clone();
    let hits = {
        let controller = controller.clone();
        move || {
            controller.with(|state| {
                let Some(ids) = state.search().results() else { return Vec::new() };
                ids.iter()
                    .filter_map(|id| state.club(id))
                    .map(|club| SearchHit {
                        club_id: club.id.clone(),
                        name: club.name.clone(),
                        league: club.league.clone(),
                        logo_path: state.country().club_icon_path(&club.id),
                    })
                    .collect::<Vec<_>>()
            })
        }
    };
    let has_hits = hits.clone();

    let activate = controller.clone();
    let on_open = move || {
        if !activate.with(|state| state.search().is_active()) {
            activate.update(|state| state.activate_search());
        }
        if let Some(input) = input_ref.get_untracked() {
            let _ = input.focus();
        }
    };
    let on_button = on_open.clone();
    let on_input = controller.clone();
    let on_clear = controller.clone();

    view! {
        <div class="search-container" class:active=is_active node_ref=container_ref>
            <button class="search-button" title="Search clubs" on:click=move |_| on_button()>
                <i class="fa-solid fa-magnifying-glass"></i>
            </button>
            <input
                type="text"
                class="search-input"
                placeholder="Search for a club"
                node_ref=input_ref
                prop:value=query
                on:focus=move |_| on_open()
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    on_input.update(|state| {
                        state.update_search(&value);
                    });
                }
            />
            <button
                class="search-clear"
                class:hidden=move || has_query().is_empty()
                on:click=move |_| {
                    on_clear.update(|state| {
                        state.update_search("");
                    });
                    if let Some(input) = input_ref.get_untracked() {
                        let _ = input.focus();
                    }
                }
            >
                <i class="fa-solid fa-xmark"></i>
            </button>
            <div class="search-results" class:visible=move || !has_hits().is_empty()>
                {move || hits().into_iter().map(|hit| {
                    let controller = controller.clone();
                    let club_id = hit.club_id.clone();
                    view! {
                        <div class="search-result-item" on:click=move |_| controller.select_search_result(&club_id)>
                            <img src=hit.logo_path alt=hit.name.clone() />
                            <div class="search-result-text">
                                <div class="name">{hit.name}</div>
                                <div class="league">{hit.league}</div>
                            </div>
                        </div>
                    }
                }).collect::<Vec<_>>()}
            </div>
        </div>
    }
}
