use crate::constants::{FAN_OUT_PANE_Z_INDEX, TIER_PANE_BASE_Z_INDEX};
use crate::logging::log;
use crate::models::LeagueRanking;
use std::fmt;

/// Named drawing layer a marker is placed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pane {
    /// One pane per league rank; lower ranks draw above higher ones
    Tier(usize),
    /// Fanned-out markers, above every tier
    FanOut,
}

impl Pane {
    #[must_use]
    pub fn name(self) -> String {
        match self {
            Pane::Tier(rank) => format!("tier-{rank}"),
            Pane::FanOut => "fan-out".to_string(),
        }
    }

    #[must_use]
    pub fn z_index(self) -> i32 {
        match self {
            Pane::Tier(rank) => {
                let rank = i32::try_from(rank).unwrap_or(i32::MAX);
                TIER_PANE_BASE_Z_INDEX.saturating_sub(rank)
            }
            Pane::FanOut => FAN_OUT_PANE_Z_INDEX,
        }
    }
}

impl fmt::Display for Pane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

/// The map side of pane management
pub trait PaneHost {
    fn create_pane(&mut self, name: &str, z_index: i32);
    fn remove_pane(&mut self, name: &str);
}

/// Tier panes currently present on the map
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TierPanes {
    panes: Vec<Pane>,
}

impl TierPanes {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the fan-out pane; done once when the map is set up
    pub fn install_fan_out(host: &mut impl PaneHost) {
        host.create_pane(&Pane::FanOut.name(), Pane::FanOut.z_index());
    }

    /// Replace every tier pane with one per tier of `ranking`.
    ///
    /// An extra bottom pane (`tier-{tier_count}`) holds clubs whose league is
    /// unranked. Must run before markers are built for a new country.
    pub fn rebuild(&mut self, host: &mut impl PaneHost, ranking: &LeagueRanking) {
        for pane in self.panes.drain(..) {
            host.remove_pane(&pane.name());
        }

        self.panes = (0..=ranking.tier_count()).map(Pane::Tier).collect();
        for pane in &self.panes {
            host.create_pane(&pane.name(), pane.z_index());
        }
        log!("Created {} tier panes", self.panes.len());
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::PaneHost;
    use std::collections::BTreeMap;

    /// Records pane calls instead of touching a map
    #[derive(Debug, Default)]
    pub struct RecordingPaneHost {
        pub panes: BTreeMap<String, i32>,
        pub removed: Vec<String>,
    }

    impl PaneHost for RecordingPaneHost {
        fn create_pane(&mut self, name: &str, z_index: i32) {
            self.panes.insert(name.to_string(), z_index);
        }

        fn remove_pane(&mut self, name: &str) {
            self.panes.remove(name);
            self.removed.push(name.to_string());
        }
    }
}
