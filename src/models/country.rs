use crate::constants::CLUB_LOGO_ROOT;
use crate::geometry::LatLng;
use serde::{Deserialize, Serialize};

/// The active country, used to address per-country assets
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CountryContext {
    pub id: String,
}

impl CountryContext {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    /// Marker logo for a club. The file may not exist; pins fall back to a glyph.
    #[must_use]
    pub fn club_icon_path(&self, club_id: &str) -> String {
        format!("{CLUB_LOGO_ROOT}/{}/icons/{club_id}.png", self.id)
    }
}

/// An entry of the country dock
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Country {
    pub id: String,
    pub name: String,
    pub map_center: LatLng,
    pub map_zoom: f64,
    /// Set from `available_data.json`; countries without data are shown disabled
    #[serde(default)]
    pub has_data: bool,
}

/// Country to open first: the preferred one if it has data, else the first with data
#[must_use]
pub fn initial_country<'a>(countries: &'a [Country], preferred: &str) -> Option<&'a Country> {
    countries
        .iter()
        .find(|c| c.id == preferred && c.has_data)
        .or_else(|| countries.iter().find(|c| c.has_data))
}
