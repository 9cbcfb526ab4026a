//! Error types for walk lookups and index loading.

use thiserror::Error;

/// A date could not be matched against the walk index.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// The date is earlier than the first date of the first walk.
    #[error("date {date} precedes every walk in the index")]
    DateBeforeIndex { date: String },
    /// The owning walk was found but does not list this exact date.
    #[error("date {date} is not recorded in the matching walk")]
    DateNotInWalk { date: String },
}

/// The walk index violates the ordering contract the lookups rely on.
#[derive(Error, Debug)]
pub enum IndexError {
    /// The index is not a valid JSON array of walks.
    #[error("failed to parse walk index: {0}")]
    Json(#[from] serde_json::Error),
    /// A walk lists no dates.
    #[error("walk {position} has no dates")]
    EmptyWalk { position: usize },
    /// A walk has a different number of dates and distances.
    #[error("walk {position} has {dates} dates but {distances} distances")]
    MismatchedDistances {
        position: usize,
        dates: usize,
        distances: usize,
    },
    /// A walk repeats a date or lists its dates out of order.
    #[error("dates of walk {position} are not strictly ascending")]
    UnsortedDates { position: usize },
    /// A walk does not start after the previous walk's last date.
    #[error("walk {position} starts before the previous walk ends")]
    OverlappingWalks { position: usize },
}
