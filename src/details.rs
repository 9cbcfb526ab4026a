//! Details shown for a clicked track.

use crate::error::LookupError;
use crate::search::date_position;
use crate::{format_km, WalkRecord};

/// What the details pane shows for one day of a walk.
#[derive(Debug, Clone, PartialEq)]
pub struct WalkDetails {
    pub title: String,
    /// `D/M/YYYY — distance — walkers — categories — `, followed by the link
    pub line: String,
    pub link: String,
    /// Everyone on the walk, sorted, separated by " • "
    pub people: String,
}

impl WalkDetails {
    /// Details for `date` of `walk`.
    ///
    /// ```
    /// use walk_map::{WalkDetails, WalkRecord};
    ///
    /// let walk = WalkRecord {
    ///     dates: vec!["2020-07-04".into()],
    ///     distances: vec![12_340.0],
    ///     title: "Ridge".into(),
    ///     walkers: 2,
    ///     people: vec!["Sam".into(), "Alex".into()],
    ///     categories: vec!["Hills".into()],
    ///     ..WalkRecord::default()
    /// };
    ///
    /// let details = WalkDetails::for_date("2020-07-04", &walk).unwrap();
    /// assert_eq!(details.line, "4/7/2020 — 12.3km — 2 walkers — Hills — ");
    /// assert_eq!(details.people, "Alex • Sam");
    /// ```
    pub fn for_date(date: &str, walk: &WalkRecord) -> Result<Self, LookupError> {
        let idx = date_position(walk, date)?;
        let distance = walk
            .distances
            .get(idx)
            .copied()
            .ok_or_else(|| LookupError::DateNotInWalk { date: date.to_string() })?;

        let mut parts = vec![
            display_date(date),
            format_km(distance),
            format!("{} walkers", walk.walkers),
            walk.categories.join(" — "),
        ];
        // Leaves a trailing separator in front of the link
        parts.push(String::new());

        let mut people = walk.people.clone();
        people.sort();

        Ok(Self {
            title: walk.title.clone(),
            line: parts.join(" — "),
            link: walk.link.clone(),
            people: people.join(" • "),
        })
    }
}

/// `YYYY-MM-DD` as day/month/year without leading zeros.
fn display_date(date: &str) -> String {
    let field = |range: std::ops::Range<usize>| -> String {
        date.get(range)
            .and_then(|s| s.parse::<u32>().ok())
            .map(|n| n.to_string())
            .unwrap_or_default()
    };
    format!("{}/{}/{}", field(8..10), field(5..7), field(0..4))
}
