use crate::geometry::LatLng;
use serde::{Deserialize, Serialize};

pub type StadiumId = String;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stadium {
    pub id: StadiumId,
    pub name: String,
    #[serde(default)]
    pub real_name: Option<String>,
    #[serde(default)]
    pub town: String,
    /// Missing positions leave the stadium unplaceable; clubs there are skipped at render
    #[serde(default)]
    pub position: Option<LatLng>,
    #[serde(default)]
    pub capacity: Option<u32>,
    #[serde(default)]
    pub built: Option<u16>,
    /// Number of gallery images under `graphics/stadiums/{country}/{id}_{n}.jpg`
    #[serde(default)]
    pub image_count: Option<u32>,
}
