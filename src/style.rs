//! Track styling for the year layers.
//!
//! Each year gets its own colour. Hidden years resolve to an empty style
//! list, which the tile renderer treats as "do not draw".

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::year_key;

/// CSS class added to every drawn track.
pub const TRACK_CLASS: &str = "gpxmap-track";

/// Properties attached to each track feature in the vector tiles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureProperties {
    /// ISO date of the track, also its feature id
    pub date: String,
    /// Track length in meters
    #[serde(default)]
    pub distance: f64,
}

/// Path options for drawing one track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    #[serde(rename = "color", skip_serializing_if = "Option::is_none")]
    pub colour: Option<String>,
    pub opacity: f64,
    pub weight: f64,
    pub interactive: bool,
}

/// Style for a feature: a fixed style, several strokes, or computed per feature.
#[derive(Clone)]
pub enum StyleSpec {
    Single(TrackStyle),
    List(Vec<TrackStyle>),
    Dynamic(Rc<dyn Fn(&FeatureProperties) -> StyleSpec>),
}

impl StyleSpec {
    /// The strokes to draw for `props`. Empty means the feature is not drawn.
    pub fn resolve(&self, props: &FeatureProperties) -> Vec<TrackStyle> {
        match self {
            StyleSpec::Single(style) => vec![style.clone()],
            StyleSpec::List(styles) => styles.clone(),
            StyleSpec::Dynamic(f) => f(props).resolve(props),
        }
    }

    pub fn hidden() -> Self {
        StyleSpec::List(Vec::new())
    }
}

impl fmt::Debug for StyleSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StyleSpec::Single(style) => f.debug_tuple("Single").field(style).finish(),
            StyleSpec::List(styles) => f.debug_tuple("List").field(styles).finish(),
            StyleSpec::Dynamic(_) => f.write_str("Dynamic(..)"),
        }
    }
}

/// Colour of the `idx`-th year of the palette.
///
/// Consecutive pairs of years share a hue and alternate between a dark and a
/// light shade.
///
/// ```
/// use walk_map::year_colour;
///
/// assert_eq!(year_colour(0), "hsl(170,100%,27%)");
/// assert_eq!(year_colour(1), "hsl(170,100%,54%)");
/// assert_eq!(year_colour(2), "hsl(215,100%,27%)");
/// ```
pub fn year_colour(idx: i32) -> String {
    format!("hsl({},{}%,{}%)", 170 + 45 * (idx >> 1), 100, 27 * (1 + idx % 2))
}

/// Styles the track layers and keeps track of which years are hidden.
#[derive(Debug, Clone)]
pub struct TrackStyler {
    first_year: i32,
    hidden_years: HashMap<String, bool>,
}

impl TrackStyler {
    pub fn new(first_year: i32) -> Self {
        Self {
            first_year,
            hidden_years: HashMap::new(),
        }
    }

    pub fn is_hidden(&self, year: &str) -> bool {
        self.hidden_years.get(year).copied().unwrap_or(false)
    }

    /// Hide or show a year's tracks. Returns `true` if the layers need a redraw.
    pub fn set_hidden(&mut self, year: &str, hidden: bool) -> bool {
        if self.is_hidden(year) == hidden {
            return false;
        }
        self.hidden_years.insert(year.to_string(), hidden);
        true
    }

    /// Colour of the year a date falls in.
    pub fn colour_for(&self, date: &str) -> String {
        let year: i32 = year_key(date).parse().unwrap_or(self.first_year);
        year_colour(year - self.first_year)
    }

    /// Style of a visible track.
    ///
    /// Hovered tracks are drawn opaque and widest, selected ones slightly
    /// wider than the rest.
    pub fn walk_style(&self, props: &FeatureProperties, hover: bool, selected: bool) -> StyleSpec {
        if self.is_hidden(year_key(&props.date)) {
            return StyleSpec::hidden();
        }
        StyleSpec::Single(TrackStyle {
            class_name: Some(TRACK_CLASS.to_string()),
            colour: Some(self.colour_for(&props.date)),
            opacity: if hover { 1.0 } else { 0.8 },
            weight: if hover {
                4.0
            } else if selected {
                3.5
            } else {
                2.0
            },
            interactive: false,
        })
    }

    /// Style of the invisible, wide track that receives mouse events.
    pub fn mouse_style(&self, props: &FeatureProperties) -> StyleSpec {
        if self.is_hidden(year_key(&props.date)) {
            return StyleSpec::hidden();
        }
        StyleSpec::Single(TrackStyle {
            class_name: None,
            colour: None,
            opacity: 0.0,
            weight: 20.0,
            interactive: true,
        })
    }

    /// A per-feature style function over a snapshot of this styler.
    pub fn layer_style(&self, hover: bool, selected: bool) -> StyleSpec {
        let styler = self.clone();
        StyleSpec::Dynamic(Rc::new(move |props: &FeatureProperties| {
            styler.walk_style(props, hover, selected)
        }))
    }
}
