//! Map page configuration and persisted view state.

use serde::{Deserialize, Serialize};

use crate::GpsPoint;

/// Configuration of a walk map page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapOptions {
    /// Heading shown above the summary.
    /// Default: "Walks"
    pub title: String,

    /// URL template of the vector tiles containing the tracks.
    pub track_url: String,

    /// URL of the walk index JSON.
    pub index_url: String,

    /// Base tile layers; the first one is shown initially.
    pub tile_layers: Vec<TileLayerOptions>,

    /// Highest zoom level the track tiles are generated for.
    /// Default: 13
    pub max_native_zoom: u8,

    /// Year assigned the first colour of the year palette.
    /// Default: 2011
    pub first_year: i32,

    /// Fraction of the walks' extent added on every side to limit panning.
    /// Default: 0.05
    pub bounds_padding: f64,
}

impl Default for MapOptions {
    fn default() -> Self {
        Self {
            title: "Walks".to_string(),
            track_url: String::new(),
            index_url: String::new(),
            tile_layers: vec![TileLayerOptions::default()],
            max_native_zoom: 13,
            first_year: 2011,
            bounds_padding: 0.05,
        }
    }
}

impl MapOptions {
    /// Parse options from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// A base map tile layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TileLayerOptions {
    pub name: String,
    pub url: String,
    pub attribution: String,
    pub max_zoom: u8,
}

impl Default for TileLayerOptions {
    fn default() -> Self {
        Self {
            name: "OpenStreetMap".to_string(),
            url: "https://tile.openstreetmap.org/{z}/{x}/{y}.png".to_string(),
            attribution: "© OpenStreetMap contributors".to_string(),
            max_zoom: 19,
        }
    }
}

/// Map view kept in the browser history between visits.
///
/// Serialized with the keys `"@"` (`[lat, lng]`) and `"z"`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewState {
    #[serde(rename = "@")]
    center: [f64; 2],
    #[serde(rename = "z")]
    pub zoom: u8,
}

impl ViewState {
    /// Coordinates are rounded to six decimals (about 0.1 m).
    pub fn new(center: GpsPoint, zoom: u8) -> Self {
        let round = |f: f64| (f * 1e6).round() / 1e6;
        Self {
            center: [round(center.latitude), round(center.longitude)],
            zoom,
        }
    }

    pub fn center(&self) -> GpsPoint {
        GpsPoint::new(self.center[0], self.center[1])
    }

    /// Restore a saved view, `None` if it is missing or unusable.
    pub fn restore(json: &str) -> Option<Self> {
        serde_json::from_str::<ViewState>(json)
            .ok()
            .filter(|v| v.center().is_valid())
    }
}
