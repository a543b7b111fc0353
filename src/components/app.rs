use leptos::*;
use leptos_meta::*;
use crate::components::club_map::ClubMap;
use crate::components::info_panel::{ClubDetails, InfoPanel};
use crate::config::MapConfig;
use crate::data::{BundledData, PayloadSource};
use crate::theme::use_theme;
use std::rc::Rc;

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let theme = use_theme();
    let (selected, set_selected) = create_signal(None::<ClubDetails>);
    let source: Rc<dyn PayloadSource> = Rc::new(BundledData);
    let config = MapConfig::bundled();
    let settings = config.markers;

    view! {
        <Title text="Stadium Map"/>

        <div class="app">
            <ClubMap
                config=config
                source=source
                settings=settings
                theme=theme
                on_select=Callback::new(move |details| set_selected.set(details))
            />
            <InfoPanel selected=selected />
        </div>
    }
}
