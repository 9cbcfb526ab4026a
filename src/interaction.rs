//! Hover and click handling for tracks on the map.
//!
//! At most one track is selected at a time. Clicking a track selects it and
//! produces its [`WalkDetails`]; clicking the map elsewhere deselects it.
//! Showing or hiding years leaves the selection alone.

use log::warn;

use crate::details::WalkDetails;
use crate::error::LookupError;
use crate::index::WalkIndex;

/// How to draw a track after a mouse event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoverStyle {
    /// Draw with the hover style.
    Highlight,
    /// Draw with the selected style.
    Selected,
    /// Restore the layer's default style.
    Reset,
}

/// Outcome of clicking a track.
#[derive(Debug, Clone, PartialEq)]
pub enum Click {
    /// The track was already selected; nothing changes.
    AlreadySelected,
    /// The track is now selected.
    Selected {
        details: WalkDetails,
        /// Previously selected track, whose style must be reset
        deselected: Option<String>,
    },
    /// No walk in the index records this date. The previous selection is
    /// still cleared.
    NotFound {
        error: LookupError,
        deselected: Option<String>,
    },
}

/// Selection state of the map.
#[derive(Debug, Clone)]
pub struct Interaction<'a> {
    index: &'a WalkIndex,
    selected: Option<String>,
}

impl<'a> Interaction<'a> {
    pub fn new(index: &'a WalkIndex) -> Self {
        Self { index, selected: None }
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Hovering always highlights, whether or not the track is selected.
    pub fn mouse_over(&self) -> HoverStyle {
        HoverStyle::Highlight
    }

    pub fn mouse_out(&self, date: &str) -> HoverStyle {
        if self.selected.as_deref() == Some(date) {
            HoverStyle::Selected
        } else {
            HoverStyle::Reset
        }
    }

    /// Select the track recorded on `date`.
    pub fn click(&mut self, date: &str) -> Click {
        if self.selected.as_deref() == Some(date) {
            return Click::AlreadySelected;
        }
        let deselected = self.deselect();

        let details = self
            .index
            .find_walk(date)
            .and_then(|(_, walk)| WalkDetails::for_date(date, walk));

        match details {
            Ok(details) => {
                self.selected = Some(date.to_string());
                Click::Selected { details, deselected }
            }
            Err(error) => {
                warn!("No walk details for clicked track: {}", error);
                Click::NotFound { error, deselected }
            }
        }
    }

    /// Clear the selection, returning the track that was selected.
    pub fn deselect(&mut self) -> Option<String> {
        self.selected.take()
    }
}
