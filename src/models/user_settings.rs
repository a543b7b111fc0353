use serde::{Deserialize, Serialize};

/// Flags that change how individual markers are drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleFlags {
    /// Plain coloured pins instead of logo pins
    #[serde(default)]
    pub use_simple_markers: bool,
    /// Attach a name tooltip above each pin
    #[serde(default)]
    pub show_tooltips: bool,
}

/// Marker rendering settings toggled from the settings panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkerSettings {
    /// Hold markers in a cluster layer instead of a flat layer group
    #[serde(default)]
    pub clustered: bool,
    #[serde(flatten)]
    pub style: StyleFlags,
}
