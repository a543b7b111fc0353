pub mod factory;
pub mod icon;

pub use factory::{build_club_marker, build_group_marker, MarkerContext};
pub use icon::{IconGeometry, MarkerIcon, MarkerStyle, SplitHalf};

use crate::geometry::LatLng;
use crate::models::ClubId;
use crate::panes::Pane;

/// What a marker stands for, which decides what a click on it does
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkerKind {
    /// One club at its stadium
    Individual(ClubId),
    /// Several clubs sharing a stadium, best-ranked first
    Group(Vec<ClubId>),
    /// One club of an expanded group, placed around the group position
    FanOutChild(ClubId),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tooltip {
    pub text: String,
    /// Offset from the marker position, lifting the tooltip above the pin
    pub offset: (f64, f64),
}

/// Everything needed to put one marker on the map.
///
/// Descriptors are rebuilt on every render; nothing about them is patched in place.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerDescriptor {
    pub kind: MarkerKind,
    pub position: LatLng,
    pub pane: Pane,
    pub icon: MarkerIcon,
    pub tooltip: Option<Tooltip>,
}

impl MarkerDescriptor {
    /// Whether this marker draws `club_id` on its own (not as part of a group)
    #[must_use]
    pub fn shows_club(&self, club_id: &str) -> bool {
        match &self.kind {
            MarkerKind::Individual(id) | MarkerKind::FanOutChild(id) => id == club_id,
            MarkerKind::Group(_) => false,
        }
    }
}

/// The two marker layers of the map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerLayer {
    Main,
    FanOut,
}

/// Handle to a marker of one specific build of a layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MarkerRef {
    pub layer: MarkerLayer,
    pub generation: u64,
    pub index: usize,
}
