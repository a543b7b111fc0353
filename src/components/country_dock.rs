use crate::components::club_map::MapController;
use leptos::{component, expect_context, view, IntoView, SignalGet};

/// Row of country buttons; countries without data are shown disabled
#[component]
#[must_use]
pub fn CountryDock() -> impl IntoView {
    let controller = expect_context::<MapController>();
    let faded = {
        let controller = controller.clone();
        move || controller.with(|state| state.search().is_active())
    };

    view! {
        <div class="country-dock" class:faded=faded>
            {move || {
                let current = controller.with(|state| state.country().id.clone());
                controller.countries.get().into_iter().map(|country| {
                    let controller = controller.clone();
                    let country_id = country.id.clone();
                    let is_active = country.id == current;
                    view! {
                        <button
                            class="country-button"
                            class:active=is_active
                            prop:disabled=!country.has_data
                            title=country.name.clone()
                            on:click=move |_| controller.choose_country(&country_id)
                        >
                            <img
                                class="country-flag"
                                src=format!("graphics/flags/{}.svg", country.id)
                                alt=country.name.clone()
                            />
                        </button>
                    }
                }).collect::<Vec<_>>()
            }}
        </div>
    }
}
