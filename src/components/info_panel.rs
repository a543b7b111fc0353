use crate::filter::clubs_sharing_stadium;
use crate::models::{Accolade, Club, CountryContext};
use leptos::{component, view, IntoView, ReadSignal, SignalGet};

/// What the info panel shows for the selected club
#[derive(Debug, Clone, PartialEq)]
pub struct ClubDetails {
    pub club: Club,
    /// Names of the other clubs playing at the same stadium
    pub stadium_mates: Vec<String>,
    pub logo_path: String,
}

impl ClubDetails {
    #[must_use]
    pub fn new(club: &Club, clubs: &[Club], country: &CountryContext) -> Self {
        Self {
            club: club.clone(),
            stadium_mates: clubs_sharing_stadium(clubs, club).into_iter().map(|c| c.name.clone()).collect(),
            logo_path: country.club_icon_path(&club.id),
        }
    }

    /// Accolade categories with entries, each with its tokens joined for display
    #[must_use]
    pub fn accolade_lines(&self) -> Vec<(Accolade, String)> {
        Accolade::ALL
            .into_iter()
            .filter(|&a| self.club.has_accolade(a))
            .map(|a| {
                let tokens = self.club.accolade(a).iter().map(ToString::to_string).collect::<Vec<_>>();
                (a, tokens.join(", "))
            })
            .collect()
    }
}

fn accolade_title(accolade: Accolade) -> &'static str {
    match accolade {
        Accolade::Championships => "Championships",
        Accolade::NationalCup => "National cup",
        Accolade::LeagueCup => "League cup",
    }
}

#[component]
#[must_use]
pub fn InfoPanel(selected: ReadSignal<Option<ClubDetails>>) -> impl IntoView {
    view! {
        {move || selected.get().map(|details| {
                let accolades = details.accolade_lines();
                let club = details.club;
                let stadium = club.stadium.clone();
                view! {
                    <div class="info-panel">
                        <div class="info-header">
                            <img class="info-logo" src=details.logo_path alt=club.name.clone() />
                            <div>
                                <h2>{club.name.clone()}</h2>
                                {(!club.fullname.is_empty()).then(|| view! { <div class="fullname">{club.fullname.clone()}</div> })}
                                {(!club.nickname.is_empty()).then(|| view! { <div class="nickname">{format!("\u{201c}{}\u{201d}", club.nickname)}</div> })}
                            </div>
                        </div>
                        <dl class="info-facts">
                            <dt>"League"</dt>
                            <dd>{club.league.clone()}</dd>
                            {club.founded.map(|year| view! { <dt>"Founded"</dt><dd>{year}</dd> })}
                            {stadium.map(|stadium| view! {
                                <dt>"Stadium"</dt>
                                <dd>
                                    {stadium.real_name.clone().unwrap_or_else(|| stadium.name.clone())}
                                    {stadium.capacity.map(|capacity| format!(" ({capacity})"))}
                                </dd>
                            })}
                        </dl>
                        {(!details.stadium_mates.is_empty()).then(|| view! {
                            <div class="stadium-mates">
                                {format!("Shares the stadium with {}", details.stadium_mates.join(", "))}
                            </div>
                        })}
                        <div class="accolades">
                            {accolades.into_iter().map(|(accolade, years)| view! {
                                <div class="accolade-row">
                                    <span class="accolade-title">{accolade_title(accolade)}</span>
                                    <span class="accolade-years">{years}</span>
                                </div>
                            }).collect::<Vec<_>>()}
                        </div>
                        {club.website.clone().map(|url| view! {
                            <a class="website" href=url target="_blank" rel="noopener">"Website"</a>
                        })}
                    </div>
                }
            })}
    }
}
