//! # Walk Map
//!
//! Summaries and date lookups for a personal walking-log map.
//!
//! This library provides:
//! - Loading and validating the walk index produced by the data-preparation scripts
//! - Binary search from a track's date to its walk record and per-date distance
//! - A running summary of walks over the years currently shown on the map
//! - Per-year track styling, walk details and selection handling for the map shell
//!
//! ## Quick Start
//!
//! ```rust
//! use walk_map::{SummaryPane, WalkIndex};
//!
//! let index = WalkIndex::from_json(r#"[
//!     {"dates": ["2020-01-01", "2021-01-01"], "distances": [1000, 2000], "title": "Ridge"},
//!     {"dates": ["2021-06-05"], "distances": [8250], "title": "Coast"}
//! ]"#).unwrap();
//!
//! let mut pane = SummaryPane::new(index.walks());
//! for year in index.years() {
//!     pane.toggle_visibility(&year, true);
//! }
//! assert_eq!(pane.render().as_deref(), Some("3 walks — 11.3km"));
//!
//! let entry = index.walk_entry("2021-06-05").unwrap();
//! assert_eq!(entry.walk.title, "Coast");
//! assert_eq!(entry.distance, 8250.0);
//! ```

use serde::{Deserialize, Serialize};

pub mod error;
pub use error::{IndexError, LookupError};

// Ordered lookups over walks and dates
pub mod search;

// Year-filtered summary
pub mod summary;
pub use summary::{ChangeListener, Handler, LayerEvent, LayerEvents, Summary, SummaryPane};

// Walk index loading and spatial queries
pub mod index;
pub use index::{TrackBoxes, TrackRef, WalkEntry, WalkIndex};

pub mod geo_utils;

pub mod config;
pub use config::{MapOptions, TileLayerOptions, ViewState};

pub mod style;
pub use style::{year_colour, FeatureProperties, StyleSpec, TrackStyle, TrackStyler};

pub mod details;
pub use details::WalkDetails;

pub mod interaction;
pub use interaction::{Click, HoverStyle, Interaction};

// ============================================================================
// Core Types
// ============================================================================

/// A GPS coordinate with latitude and longitude.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GpsPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GpsPoint {
    /// Create a new GPS point.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Check if the point has valid coordinates.
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && self.latitude >= -90.0
            && self.latitude <= 90.0
            && self.longitude >= -180.0
            && self.longitude <= 180.0
    }
}

/// Bounding box in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
}

impl Bounds {
    /// Smallest bounds containing both `self` and `other`.
    pub fn union(&self, other: &Bounds) -> Bounds {
        Bounds {
            min_lat: self.min_lat.min(other.min_lat),
            max_lat: self.max_lat.max(other.max_lat),
            min_lng: self.min_lng.min(other.min_lng),
            max_lng: self.max_lng.max(other.max_lng),
        }
    }

    /// Extend each side by `ratio` times the span along that axis.
    pub fn pad(&self, ratio: f64) -> Bounds {
        let lat_buffer = (self.max_lat - self.min_lat) * ratio;
        let lng_buffer = (self.max_lng - self.min_lng) * ratio;
        Bounds {
            min_lat: self.min_lat - lat_buffer,
            max_lat: self.max_lat + lat_buffer,
            min_lng: self.min_lng - lng_buffer,
            max_lng: self.max_lng + lng_buffer,
        }
    }
}

/// One logged outing, possibly covering several dates.
///
/// `dates` are ISO dates in ascending order and `distances[i]` is the
/// distance in meters walked on `dates[i]`. The remaining fields are
/// descriptive and only used for display.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WalkRecord {
    pub dates: Vec<String>,
    pub distances: Vec<f64>,
    /// One bounding box per date, `[lng, lat, .., lng, lat, ..]`
    pub bboxes: Vec<Vec<f64>>,
    pub title: String,
    pub link: String,
    pub people: Vec<String>,
    pub categories: Vec<String>,
    pub walkers: u32,
    /// Publication time of the blog post
    pub time: Option<String>,
}

impl WalkRecord {
    /// The first date of this walk, or `""` for a walk with no dates.
    pub fn first_date(&self) -> &str {
        self.dates.first().map(String::as_str).unwrap_or("")
    }

    /// Distance walked on `date`.
    pub fn distance_on(&self, date: &str) -> Result<f64, LookupError> {
        let idx = search::date_position(self, date)?;
        self.distances
            .get(idx)
            .copied()
            .ok_or_else(|| LookupError::DateNotInWalk { date: date.to_string() })
    }
}

/// The year a date belongs to: its first four characters.
///
/// Dates are expected to be ISO formatted. Shorter strings are returned whole.
pub fn year_key(date: &str) -> &str {
    date.get(..4).unwrap_or(date)
}

/// Meters as kilometres to one decimal, dropping a trailing `.0` ("12km", "12.3km").
///
/// Rounds the binary value of `meters / 1000`, so 350 m is "0.3km" because
/// 0.35 is stored slightly below the half. Exact halves round away from zero.
pub fn format_km(meters: f64) -> String {
    let km = meters / 1000.0;
    // Only quarters are exact halves at one decimal; `{:.1}` sends those to even
    let quarters = km * 4.0;
    let text = if quarters.fract() == 0.0 && quarters % 2.0 != 0.0 {
        format!("{:.1}", (km * 10.0).round() / 10.0)
    } else {
        format!("{:.1}", km)
    };
    match text.strip_suffix(".0") {
        Some("-0") => "0km".to_string(),
        Some(whole) => format!("{}km", whole),
        None => format!("{}km", text),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_year_key() {
        assert_eq!(year_key("2020-06-01"), "2020");
        assert_eq!(year_key("2020-06-01T10:00:00+01:00"), "2020");
        assert_eq!(year_key("20"), "20");
    }

    #[test]
    fn test_format_km() {
        assert_eq!(format_km(0.0), "0km");
        assert_eq!(format_km(1000.0), "1km");
        assert_eq!(format_km(12_340.0), "12.3km");
        assert_eq!(format_km(12_360.0), "12.4km");
        assert_eq!(format_km(999.0), "1km");
        assert_eq!(format_km(40.0), "0km");
    }

    #[test]
    fn test_format_km_near_half() {
        // Stored just below the half, so they round down
        assert_eq!(format_km(350.0), "0.3km");
        assert_eq!(format_km(1450.0), "1.4km");
        assert_eq!(format_km(8450.0), "8.4km");
        // Exact halves round up
        assert_eq!(format_km(8250.0), "8.3km");
        assert_eq!(format_km(750.0), "0.8km");
        assert_eq!(format_km(11_250.0), "11.3km");
    }

    #[test]
    fn test_walk_record_defaults_from_json() {
        let walk: WalkRecord =
            serde_json::from_str(r#"{"dates": ["2020-01-01"], "distances": [1234]}"#).unwrap();
        assert_eq!(walk.first_date(), "2020-01-01");
        assert!(walk.title.is_empty());
        assert!(walk.people.is_empty());
        assert_eq!(walk.walkers, 0);
        assert_eq!(walk.time, None);
    }

    #[test]
    fn test_distance_on() {
        let walk = WalkRecord {
            dates: vec!["2020-06-01".into(), "2020-06-02".into()],
            distances: vec![5000.0, 7500.0],
            ..WalkRecord::default()
        };
        assert_eq!(walk.distance_on("2020-06-02"), Ok(7500.0));
        assert!(walk.distance_on("2020-06-03").is_err());
    }

    #[test]
    fn test_bounds_pad_and_union() {
        let a = Bounds { min_lat: 51.0, max_lat: 52.0, min_lng: -1.0, max_lng: 0.0 };
        let b = Bounds { min_lat: 51.5, max_lat: 53.0, min_lng: -0.5, max_lng: 1.0 };

        let u = a.union(&b);
        assert_eq!(u, Bounds { min_lat: 51.0, max_lat: 53.0, min_lng: -1.0, max_lng: 1.0 });

        let p = a.pad(0.1);
        assert!((p.min_lat - 50.9).abs() < 1e-9);
        assert!((p.max_lat - 52.1).abs() < 1e-9);
        assert!((p.min_lng + 1.1).abs() < 1e-9);
        assert!((p.max_lng - 0.1).abs() < 1e-9);
    }
}
