//! # Geographic Utilities
//!
//! Extent calculations over the bounding boxes stored in the walk index.
//!
//! | Function | Description |
//! |----------|-------------|
//! | [`bounds_from_bbox`] | Parse a GeoJSON style `bbox` array |
//! | [`combined_bounds`] | Union of many bounding boxes |
//!
//! ## Bounding box layout
//!
//! A GeoJSON `bbox` lists all coordinates of the south-west corner followed by
//! all coordinates of the north-east corner, longitude first. A 2D box is
//! `[min_lng, min_lat, max_lng, max_lat]`; a box with altitude is
//! `[min_lng, min_lat, min_alt, max_lng, max_lat, max_alt]`. The second corner
//! therefore starts at half the array length.
//!
//! ```rust
//! use walk_map::geo_utils;
//!
//! let bounds = geo_utils::bounds_from_bbox(&[-0.13, 51.50, -0.12, 51.51]).unwrap();
//! assert_eq!(bounds.min_lat, 51.50);
//! assert_eq!(bounds.max_lng, -0.12);
//! ```

use geo::{coord, Rect};

use crate::Bounds;

// =============================================================================
// Conversion Functions
// =============================================================================

impl From<Rect<f64>> for Bounds {
    fn from(rect: Rect<f64>) -> Self {
        Bounds {
            min_lat: rect.min().y,
            max_lat: rect.max().y,
            min_lng: rect.min().x,
            max_lng: rect.max().x,
        }
    }
}

impl From<Bounds> for Rect<f64> {
    fn from(b: Bounds) -> Self {
        Rect::new(
            coord! { x: b.min_lng, y: b.min_lat },
            coord! { x: b.max_lng, y: b.max_lat },
        )
    }
}

/// Parse a GeoJSON `bbox` array into [`Bounds`].
///
/// Returns `None` for arrays with fewer than four values, an odd number of
/// values, or non-finite coordinates. Swapped corners are normalised.
pub fn bounds_from_bbox(bbox: &[f64]) -> Option<Bounds> {
    if bbox.len() < 4 || bbox.len() % 2 != 0 {
        return None;
    }
    let half = bbox.len() >> 1;
    let corners = [bbox[0], bbox[1], bbox[half], bbox[half + 1]];
    if !corners.iter().all(|c| c.is_finite()) {
        return None;
    }

    // Rect::new orders the corners
    let rect = Rect::new(
        coord! { x: corners[0], y: corners[1] },
        coord! { x: corners[2], y: corners[3] },
    );
    Some(rect.into())
}

/// Union of all given bounding boxes, `None` if there are none.
pub fn combined_bounds<I>(bounds: I) -> Option<Bounds>
where
    I: IntoIterator<Item = Bounds>,
{
    bounds.into_iter().reduce(|acc, b| acc.union(&b))
}

// =============================================================================
// Unit Tests
// =============================================================================
