use crate::models::MarkerSettings;
use crate::theme::Theme;
use serde::{Deserialize, Serialize};

const BUNDLED_CONFIG: &str = include_str!("../data/config.json");

const CARTO_ATTRIBUTION: &str = "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors &copy; <a href=\"https://carto.com/attributions\">CARTO</a>";

/// Basemap tiles for one theme
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TileSource {
    pub url: String,
    pub attribution: String,
}

/// Static configuration of the map view.
///
/// Every field has a default, so a JSON override only needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MapConfig {
    pub light_tiles: TileSource,
    pub dark_tiles: TileSource,
    pub max_zoom: f64,
    /// Country opened when nothing else is requested
    pub default_country: String,
    /// Marker settings the map starts with
    pub markers: MarkerSettings,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            light_tiles: TileSource {
                url: "https://{s}.basemaps.cartocdn.com/light_all/{z}/{x}/{y}{r}.png".to_string(),
                attribution: CARTO_ATTRIBUTION.to_string(),
            },
            dark_tiles: TileSource {
                url: "https://{s}.basemaps.cartocdn.com/dark_all/{z}/{x}/{y}{r}.png".to_string(),
                attribution: CARTO_ATTRIBUTION.to_string(),
            },
            max_zoom: 18.0,
            default_country: "da".to_string(),
            markers: MarkerSettings::default(),
        }
    }
}

impl MapConfig {
    /// Parse a configuration override
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed
    pub fn from_json(json: &str) -> Result<Self, String> {
        serde_json::from_str(json).map_err(|e| format!("Failed to parse map config: {e}"))
    }

    /// The configuration shipped in `data/config.json`, or the defaults when it is malformed
    #[must_use]
    pub fn bundled() -> Self {
        Self::from_json(BUNDLED_CONFIG).unwrap_or_else(|e| {
            leptos::logging::error!("{}", e);
            Self::default()
        })
    }

    #[must_use]
    pub fn tiles(&self, theme: Theme) -> &TileSource {
        match theme {
            Theme::Light => &self.light_tiles,
            Theme::Dark => &self.dark_tiles,
        }
    }
}
