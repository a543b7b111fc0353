use crate::components::club_map::MapController;
use crate::filter::{available_accolades, league_options, LeagueFilter};
use crate::models::Accolade;
use leptos::{component, event_target_checked, event_target_value, expect_context, view, IntoView};

fn accolade_label(accolade: Accolade) -> &'static str {
    match accolade {
        Accolade::Championships => "Championships",
        Accolade::NationalCup => "National cup",
        Accolade::LeagueCup => "League cup",
    }
}

/// League dropdown and accolade checkboxes narrowing the drawn clubs
#[component]
#[must_use]
pub fn FilterPanel() -> impl IntoView {
    let controller = expect_context::<MapController>();

    let options = {
        let controller = controller.clone();
        move || controller.with(|state| (league_options(state.ranking(), state.clubs()), state.clubs().len()))
    };
    let selected_league = {
        let controller = controller.clone();
        move || {
            controller.with(|state| match &state.filter().league {
                LeagueFilter::All => "all".to_string(),
                LeagueFilter::League(league) => league.clone(),
            })
        }
    };
    let accolades = {
        let controller = controller.clone();
        move || controller.with(|state| (available_accolades(state.clubs()), state.filter().accolades))
    };
    let filter_active = {
        let controller = controller.clone();
        move || controller.with(|state| state.filter().is_active())
    };
    let on_league = controller.clone();
    let on_reset = controller.clone();

    view! {
        <div class="filter-panel">
            <select
                class="league-select"
                prop:value=selected_league
                on:change=move |ev| {
                    let value = event_target_value(&ev);
                    on_league.update(|state| state.set_league_filter(LeagueFilter::from_value(&value)));
                    on_league.clear_selection();
                }
            >
                {move || {
                    let (options, total) = options();
                    let all = view! { <option value="all">{format!("All leagues ({total})")}</option> };
                    std::iter::once(all)
                        .chain(options.into_iter().map(|option| view! {
                            <option value=option.league.clone()>
                                {format!("{} ({})", option.league, option.club_count)}
                            </option>
                        }))
                        .collect::<Vec<_>>()
                }}
            </select>
            <div class="accolade-filters">
                {move || {
                    let (available, selected) = accolades();
                    available.accolades().map(|accolade| {
                        let controller = controller.clone();
                        view! {
                            <label class="accolade-filter">
                                <input
                                    type="checkbox"
                                    prop:checked=selected.contains(accolade.flag())
                                    on:change=move |ev| {
                                        let checked = event_target_checked(&ev);
                                        controller.update(|state| {
                                            if state.filter().accolades.contains(accolade.flag()) != checked {
                                                state.toggle_accolade(accolade);
                                            }
                                        });
                                        controller.clear_selection();
                                    }
                                />
                                <span>{accolade_label(accolade)}</span>
                            </label>
                        }
                    }).collect::<Vec<_>>()
                }}
            </div>
            <button
                class="filter-reset"
                prop:disabled=move || !filter_active()
                on:click=move |_| {
                    on_reset.update(|state| state.reset_filter());
                    on_reset.clear_selection();
                }
            >
                "Reset filters"
            </button>
        </div>
    }
}
