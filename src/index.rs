//! The walk index: every logged walk, ordered by date.
//!
//! The index is loaded once from the JSON produced by the data-preparation
//! scripts and is read-only afterwards. Construction checks the ordering the
//! binary searches in [`crate::search`] depend on.

use std::collections::BTreeSet;
use std::collections::HashSet;

use log::{info, warn};
use rstar::{RTree, RTreeObject, AABB};

use crate::error::{IndexError, LookupError};
use crate::geo_utils::{bounds_from_bbox, combined_bounds};
use crate::search::{date_position, walk_position};
use crate::{year_key, Bounds, WalkRecord};

/// A date resolved against the index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WalkEntry<'a> {
    /// Position of the walk in the index
    pub walk_index: usize,
    /// Position of the date within the walk
    pub date_index: usize,
    pub walk: &'a WalkRecord,
    /// Distance in meters walked on this date
    pub distance: f64,
}

/// Walk records sorted by first date, with non-overlapping date spans.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WalkIndex {
    walks: Vec<WalkRecord>,
}

impl WalkIndex {
    /// Build an index, checking that every walk has matching dates and
    /// distances and that the walks are in strictly ascending date order.
    pub fn new(walks: Vec<WalkRecord>) -> Result<Self, IndexError> {
        for (position, walk) in walks.iter().enumerate() {
            if walk.dates.is_empty() {
                return Err(IndexError::EmptyWalk { position });
            }
            if walk.dates.len() != walk.distances.len() {
                return Err(IndexError::MismatchedDistances {
                    position,
                    dates: walk.dates.len(),
                    distances: walk.distances.len(),
                });
            }
            if walk.dates.windows(2).any(|w| w[0] >= w[1]) {
                return Err(IndexError::UnsortedDates { position });
            }
        }

        for (i, pair) in walks.windows(2).enumerate() {
            let last = pair[0].dates.last().map(String::as_str).unwrap_or("");
            if last >= pair[1].first_date() {
                return Err(IndexError::OverlappingWalks { position: i + 1 });
            }
        }

        Ok(Self { walks })
    }

    /// Parse and validate a JSON array of walk records.
    pub fn from_json(json: &str) -> Result<Self, IndexError> {
        let walks: Vec<WalkRecord> = serde_json::from_str(json)?;
        let index = Self::new(walks)?;
        info!(
            "Loaded walk index: {} walks, {} dates, {} years",
            index.walks.len(),
            index.date_count(),
            index.years().len()
        );
        Ok(index)
    }

    pub fn walks(&self) -> &[WalkRecord] {
        &self.walks
    }

    pub fn len(&self) -> usize {
        self.walks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.walks.is_empty()
    }

    /// Total number of walked dates across all walks.
    pub fn date_count(&self) -> usize {
        self.walks.iter().map(|w| w.dates.len()).sum()
    }

    /// Every year with at least one walked date, ascending.
    pub fn years(&self) -> Vec<String> {
        let years: BTreeSet<&str> = self
            .walks
            .iter()
            .flat_map(|w| w.dates.iter())
            .map(|d| year_key(d))
            .collect();
        years.into_iter().map(str::to_string).collect()
    }

    /// The walk whose span of dates contains `date`.
    pub fn find_walk(&self, date: &str) -> Result<(usize, &WalkRecord), LookupError> {
        let idx = walk_position(&self.walks, date)?;
        Ok((idx, &self.walks[idx]))
    }

    /// Resolve `date` to its walk, its position in that walk and its distance.
    pub fn walk_entry(&self, date: &str) -> Result<WalkEntry<'_>, LookupError> {
        let (walk_index, walk) = self.find_walk(date)?;
        let date_index = date_position(walk, date)?;
        Ok(WalkEntry {
            walk_index,
            date_index,
            walk,
            distance: walk.distances[date_index],
        })
    }

    /// Union of every track's bounding box.
    ///
    /// Malformed boxes are skipped with a warning.
    pub fn bounds(&self) -> Option<Bounds> {
        combined_bounds(self.walks.iter().flat_map(|walk| {
            walk.bboxes.iter().filter_map(move |bbox| {
                let bounds = bounds_from_bbox(bbox);
                if bounds.is_none() {
                    warn!("Skipping malformed bbox {:?} of walk {}", bbox, walk.first_date());
                }
                bounds
            })
        }))
    }

    /// Spatial index over the tracks of this index.
    pub fn track_boxes(&self) -> TrackBoxes {
        TrackBoxes::new(self)
    }
}

// ============================================================================
// Spatial index
// ============================================================================

/// A single day's track: its walk, its date and its bounding box.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackRef {
    pub walk_index: usize,
    pub date_index: usize,
    pub date: String,
    pub bounds: Bounds,
}

impl RTreeObject for TrackRef {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners(
            [self.bounds.min_lng, self.bounds.min_lat],
            [self.bounds.max_lng, self.bounds.max_lat],
        )
    }
}

/// R-tree over the per-date track boxes, for finding the tracks in view.
pub struct TrackBoxes {
    rtree: RTree<TrackRef>,
}

impl TrackBoxes {
    /// Index the tracks of `index`.
    ///
    /// `bboxes[i]` is the box of `dates[i]`. Dates without a usable box are
    /// left out.
    pub fn new(index: &WalkIndex) -> Self {
        let mut tracks = Vec::with_capacity(index.date_count());
        for (walk_index, walk) in index.walks().iter().enumerate() {
            for (date_index, date) in walk.dates.iter().enumerate() {
                match walk.bboxes.get(date_index).and_then(|b| bounds_from_bbox(b)) {
                    Some(bounds) => tracks.push(TrackRef {
                        walk_index,
                        date_index,
                        date: date.clone(),
                        bounds,
                    }),
                    None => warn!("No bounding box for track {}", date),
                }
            }
        }
        Self {
            rtree: RTree::bulk_load(tracks),
        }
    }

    pub fn len(&self) -> usize {
        self.rtree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.rtree.size() == 0
    }

    /// Tracks whose box intersects `view`, in date order.
    pub fn in_view(&self, view: &Bounds) -> Vec<&TrackRef> {
        let envelope = AABB::from_corners(
            [view.min_lng, view.min_lat],
            [view.max_lng, view.max_lat],
        );
        let mut found: Vec<&TrackRef> =
            self.rtree.locate_in_envelope_intersecting(&envelope).collect();
        found.sort_by(|a, b| a.date.cmp(&b.date));
        found
    }

    /// Tracks in view whose year is one of `years`.
    pub fn visible_in_view(&self, view: &Bounds, years: &HashSet<String>) -> Vec<&TrackRef> {
        self.in_view(view)
            .into_iter()
            .filter(|t| years.contains(year_key(&t.date)))
            .collect()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn walk(dates: &[&str], distances: &[f64]) -> WalkRecord {
        WalkRecord {
            dates: dates.iter().map(|d| d.to_string()).collect(),
            distances: distances.to_vec(),
            ..WalkRecord::default()
        }
    }

    fn sample_index() -> WalkIndex {
        WalkIndex::new(vec![
            walk(&["2020-01-01"], &[4000.0]),
            walk(&["2020-06-01", "2020-06-02"], &[10_000.0, 12_500.0]),
            walk(&["2021-03-01"], &[8000.0]),
        ])
        .unwrap()
    }

    const SAMPLE_JSON: &str = r#"[
        {
            "bboxes": [[-3.10, 54.40, -3.00, 54.50]],
            "categories": ["Lakes"],
            "dates": ["2019-08-10"],
            "distances": [14200],
            "link": "https://example.org/2019/08/10/helvellyn",
            "people": ["Sam", "Alex"],
            "time": "2019-08-12T20:15:00+01:00",
            "title": "Helvellyn",
            "walkers": 2
        },
        {
            "bboxes": [[-0.20, 51.40, -0.10, 51.45], [-0.25, 51.38, -0.15, 51.42]],
            "categories": [],
            "dates": ["2020-05-02", "2020-05-03"],
            "distances": [9000, 11000],
            "link": "https://example.org/2020/05/04/commons",
            "people": [],
            "title": "Commons",
            "walkers": 1
        }
    ]"#;

    #[test]
    fn test_from_json() {
        let index = WalkIndex::from_json(SAMPLE_JSON).unwrap();
        assert_eq!(index.len(), 2);
        assert_eq!(index.date_count(), 3);
        assert_eq!(index.years(), vec!["2019".to_string(), "2020".to_string()]);
        assert_eq!(index.walks()[0].walkers, 2);
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(matches!(WalkIndex::from_json("{"), Err(IndexError::Json(_))));
    }

    #[test]
    fn test_rejects_empty_walk() {
        let err = WalkIndex::new(vec![walk(&[], &[])]).unwrap_err();
        assert!(matches!(err, IndexError::EmptyWalk { position: 0 }));
    }

    #[test]
    fn test_rejects_mismatched_distances() {
        let err = WalkIndex::new(vec![walk(&["2020-01-01", "2020-01-02"], &[1.0])]).unwrap_err();
        assert!(matches!(
            err,
            IndexError::MismatchedDistances { position: 0, dates: 2, distances: 1 }
        ));
    }

    #[test]
    fn test_rejects_unsorted_dates() {
        let err = WalkIndex::new(vec![walk(&["2020-01-02", "2020-01-01"], &[1.0, 2.0])]).unwrap_err();
        assert!(matches!(err, IndexError::UnsortedDates { position: 0 }));
    }

    #[test]
    fn test_rejects_overlapping_walks() {
        let err = WalkIndex::new(vec![
            walk(&["2020-01-01", "2020-01-05"], &[1.0, 2.0]),
            walk(&["2020-01-03"], &[3.0]),
        ])
        .unwrap_err();
        assert!(matches!(err, IndexError::OverlappingWalks { position: 1 }));
    }

    #[test]
    fn test_find_walk() {
        let index = sample_index();
        assert_eq!(index.find_walk("2020-07-15").unwrap().0, 1);
        assert_eq!(index.find_walk("2021-03-01").unwrap().0, 2);
        assert!(matches!(
            index.find_walk("2019-12-31"),
            Err(LookupError::DateBeforeIndex { .. })
        ));
    }

    #[test]
    fn test_walk_entry() {
        let index = sample_index();
        let entry = index.walk_entry("2020-06-02").unwrap();
        assert_eq!(entry.walk_index, 1);
        assert_eq!(entry.date_index, 1);
        assert_eq!(entry.distance, 12_500.0);

        // Inside the walk's span but not one of its dates
        assert!(matches!(
            index.walk_entry("2020-06-03"),
            Err(LookupError::DateNotInWalk { .. })
        ));
    }

    #[test]
    fn test_years_empty_index() {
        let index = WalkIndex::default();
        assert!(index.is_empty());
        assert!(index.years().is_empty());
        assert!(index.bounds().is_none());
    }

    #[test]
    fn test_bounds() {
        let index = WalkIndex::from_json(SAMPLE_JSON).unwrap();
        let b = index.bounds().unwrap();
        assert_eq!(b.min_lat, 51.38);
        assert_eq!(b.max_lat, 54.50);
        assert_eq!(b.min_lng, -3.10);
        assert_eq!(b.max_lng, -0.10);
    }

    #[test]
    fn test_track_boxes_in_view() {
        let index = WalkIndex::from_json(SAMPLE_JSON).unwrap();
        let boxes = index.track_boxes();
        assert_eq!(boxes.len(), 3);

        let london = Bounds { min_lat: 51.39, max_lat: 51.41, min_lng: -0.22, max_lng: -0.18 };
        let dates: Vec<&str> = boxes.in_view(&london).iter().map(|t| t.date.as_str()).collect();
        assert_eq!(dates, vec!["2020-05-02", "2020-05-03"]);

        let lakes = Bounds { min_lat: 54.0, max_lat: 55.0, min_lng: -4.0, max_lng: -2.0 };
        let found = boxes.in_view(&lakes);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].walk_index, 0);
    }

    #[test]
    fn test_track_boxes_visible_years() {
        let index = WalkIndex::from_json(SAMPLE_JSON).unwrap();
        let boxes = index.track_boxes();
        let everywhere = Bounds { min_lat: -90.0, max_lat: 90.0, min_lng: -180.0, max_lng: 180.0 };

        let years: HashSet<String> = ["2019".to_string()].into_iter().collect();
        let found = boxes.visible_in_view(&everywhere, &years);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].date, "2019-08-10");

        assert!(boxes.visible_in_view(&everywhere, &HashSet::new()).is_empty());
    }

    #[test]
    fn test_track_boxes_skip_missing_bbox() {
        let index = sample_index();
        assert!(index.track_boxes().is_empty());
    }
}
