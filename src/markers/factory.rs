use super::icon::{MarkerIcon, SplitHalf};
use super::{MarkerDescriptor, MarkerKind, Tooltip};
use crate::color::contrasting_text_color;
use crate::constants::{
    DEFAULT_COLOR, FALLBACK_BORDER_COLOR, FALLBACK_PIN_COLOR, FALLBACK_SPLIT_BORDER_COLOR,
    FALLBACK_SPLIT_COLOR, RANK_COLORS,
};
use crate::geometry::LatLng;
use crate::logging::warning;
use crate::models::{Club, CountryContext, LeagueRanking, StyleFlags};
use crate::panes::Pane;

/// Inputs shared by every marker of one render pass
#[derive(Debug, Clone, Copy)]
pub struct MarkerContext<'a> {
    pub ranking: &'a LeagueRanking,
    pub country: &'a CountryContext,
    pub flags: StyleFlags,
}

impl MarkerContext<'_> {
    #[must_use]
    pub fn rank_of(&self, club: &Club) -> usize {
        self.ranking.rank_of(&club.league)
    }
}

/// Default simple-pin colour for a rank
#[must_use]
pub fn rank_pin_color(rank: usize) -> &'static str {
    RANK_COLORS.get(rank).copied().unwrap_or(DEFAULT_COLOR)
}

/// Clubs ordered best rank first; equal ranks keep their input order
#[must_use]
pub fn sort_by_rank<'a>(clubs: &[&'a Club], ranking: &LeagueRanking) -> Vec<&'a Club> {
    let mut sorted = clubs.to_vec();
    sorted.sort_by_key(|club| ranking.rank_of(&club.league));
    sorted
}

/// Build the marker for one club.
///
/// `position_override` places the marker somewhere other than the stadium
/// (used by fan-out). Returns `None` and logs a warning when the club has
/// no position to use.
#[must_use]
pub fn build_club_marker(
    club: &Club,
    ctx: &MarkerContext<'_>,
    is_fanned: bool,
    position_override: Option<LatLng>,
) -> Option<MarkerDescriptor> {
    let Some(position) = position_override.or_else(|| club.position()) else {
        warning!("Club \"{}\" (ID: {}) is missing stadium data. Cannot create marker.", club.name, club.id);
        return None;
    };

    let rank = ctx.rank_of(club);
    let pane = if is_fanned { Pane::FanOut } else { Pane::Tier(rank) };

    let icon = if ctx.flags.use_simple_markers {
        let background = club
            .primary_color
            .clone()
            .unwrap_or_else(|| rank_pin_color(rank).to_string());
        let glyph_color = club
            .secondary_color
            .clone()
            .unwrap_or_else(|| contrasting_text_color(Some(&background)).to_string());
        MarkerIcon::SimplePin { background, glyph_color }
    } else {
        MarkerIcon::LogoPin {
            background: club.primary_color.clone().unwrap_or_else(|| FALLBACK_PIN_COLOR.to_string()),
            border: club.secondary_color.clone().unwrap_or_else(|| FALLBACK_BORDER_COLOR.to_string()),
            logo_path: ctx.country.club_icon_path(&club.id),
            alt: club.name.clone(),
            glyph_color: contrasting_text_color(club.primary_color.as_deref()).to_string(),
        }
    };

    let tooltip = ctx.flags.show_tooltips.then(|| tooltip_above(&icon, club.name.clone()));
    let kind = if is_fanned {
        MarkerKind::FanOutChild(club.id.clone())
    } else {
        MarkerKind::Individual(club.id.clone())
    };

    Some(MarkerDescriptor { kind, position, pane, icon, tooltip })
}

/// Build the marker for two or more clubs sharing a stadium.
///
/// Members are ordered best rank first; the first one decides position, pane
/// and colours. Two clubs in detailed style get a split pin, every other
/// group a pin showing the member count.
#[must_use]
pub fn build_group_marker(clubs: &[&Club], ctx: &MarkerContext<'_>) -> Option<MarkerDescriptor> {
    let sorted = sort_by_rank(clubs, ctx.ranking);
    let primary = *sorted.first()?;
    let Some(position) = primary.position() else {
        warning!("Stadium group led by \"{}\" has no position. Cannot create marker.", primary.name);
        return None;
    };

    let rank = ctx.rank_of(primary);
    let count = sorted.len();

    let icon = match (sorted.as_slice(), ctx.flags.use_simple_markers) {
        ([first, second], false) => MarkerIcon::SplitPin {
            halves: Box::new([
                split_half(first, ctx.country, FALLBACK_PIN_COLOR, FALLBACK_BORDER_COLOR),
                split_half(second, ctx.country, FALLBACK_SPLIT_COLOR, FALLBACK_SPLIT_BORDER_COLOR),
            ]),
        },
        (_, true) => {
            let background = primary
                .primary_color
                .clone()
                .unwrap_or_else(|| rank_pin_color(rank).to_string());
            let text_color = contrasting_text_color(Some(&background)).to_string();
            MarkerIcon::SimpleCountPin { background, text_color, count }
        }
        (_, false) => {
            let background = primary.primary_color.clone().unwrap_or_else(|| FALLBACK_PIN_COLOR.to_string());
            let text_color = contrasting_text_color(Some(&background)).to_string();
            MarkerIcon::CountPin {
                border: primary.secondary_color.clone().unwrap_or_else(|| FALLBACK_BORDER_COLOR.to_string()),
                background,
                text_color,
                count,
            }
        }
    };

    let tooltip = ctx.flags.show_tooltips.then(|| {
        let names: Vec<&str> = sorted.iter().map(|c| c.name.as_str()).collect();
        tooltip_above(&icon, names.join("<br>"))
    });

    Some(MarkerDescriptor {
        kind: MarkerKind::Group(sorted.iter().map(|c| c.id.clone()).collect()),
        position,
        pane: Pane::Tier(rank),
        icon,
        tooltip,
    })
}

fn split_half(club: &Club, country: &CountryContext, background: &str, border: &str) -> SplitHalf {
    SplitHalf {
        background: club.primary_color.clone().unwrap_or_else(|| background.to_string()),
        border: club.secondary_color.clone().unwrap_or_else(|| border.to_string()),
        logo_path: country.club_icon_path(&club.id),
        alt: club.name.clone(),
    }
}

/// Tooltip lifted by the icon's anchor height so it never covers the pin
fn tooltip_above(icon: &MarkerIcon, text: String) -> Tooltip {
    let anchor_y = icon.geometry().anchor.1;
    Tooltip { text, offset: (0.0, -f64::from(anchor_y)) }
}
