//! Binary search over ordered sequences.
//!
//! [`search`] is the single primitive; [`walk_position`] and [`date_position`]
//! are the two queries the map needs to correlate a track's date with the
//! walk index.

use crate::error::LookupError;
use crate::WalkRecord;

/// Find `0 <= i <= items.len()` such that `!pred(items[i - 1]) && pred(items[i])`.
///
/// The predicate must be monotone: false for a prefix of `items` and true
/// for the rest. Positions `-1` and `len` are taken to be false and true,
/// so `items.len()` means no element satisfies `pred`.
///
/// # Example
/// ```
/// use walk_map::search::search;
///
/// let xs = [1, 3, 5, 7];
/// assert_eq!(search(&xs, |&x| 5 <= x), 2);
/// assert_eq!(search(&xs, |&x| 8 <= x), 4);
/// assert_eq!(search(&xs, |&x| 0 <= x), 0);
/// ```
pub fn search<T, P>(items: &[T], mut pred: P) -> usize
where
    P: FnMut(&T) -> bool,
{
    // `lo` is one past the last known-false slot, so `lo - 1` is the
    // conceptual -1 when `lo == 0`.
    let mut lo = 0usize;
    let mut hi = items.len();
    while lo < hi {
        let mid = lo + ((hi - lo) >> 1);
        if pred(&items[mid]) {
            hi = mid;
        } else {
            lo = mid + 1;
        }
    }
    hi
}

/// Index of the walk whose span of dates contains `date`.
///
/// Each walk owns every date from its first date up to the next walk's
/// first date. Fails if `date` precedes the first walk.
pub fn walk_position(walks: &[WalkRecord], date: &str) -> Result<usize, LookupError> {
    let after = search(walks, |walk| date < walk.first_date());
    after.checked_sub(1).ok_or_else(|| LookupError::DateBeforeIndex {
        date: date.to_string(),
    })
}

/// Index of `date` within `walk.dates`. Fails unless the date is listed exactly.
pub fn date_position(walk: &WalkRecord, date: &str) -> Result<usize, LookupError> {
    let idx = search(&walk.dates, |d| date <= d.as_str());
    match walk.dates.get(idx) {
        Some(found) if found == date => Ok(idx),
        _ => Err(LookupError::DateNotInWalk {
            date: date.to_string(),
        }),
    }
}
