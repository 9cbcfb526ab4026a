//! Running walk summary over the currently visible years.
//!
//! [`Summary`] is an immutable `(count, distance)` value. [`SummaryPane`]
//! owns the visibility of each year, recomputes its summary from the walk
//! records whenever a year is shown or hidden, and notifies a listener.
//!
//! ```
//! use walk_map::{SummaryPane, WalkRecord};
//!
//! let walks = vec![WalkRecord {
//!     dates: vec!["2020-01-01".into(), "2021-01-01".into()],
//!     distances: vec![1000.0, 2000.0],
//!     ..WalkRecord::default()
//! }];
//!
//! let mut pane = SummaryPane::new(&walks);
//! assert_eq!(pane.render(), None);
//!
//! pane.toggle_visibility("2020", true);
//! pane.toggle_visibility("2021", true);
//! assert_eq!(pane.render().as_deref(), Some("2 walks — 3km"));
//! ```

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use log::debug;

use crate::{format_km, year_key, WalkRecord};

/// Count and total distance (meters) of a set of walked dates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Summary {
    walks: usize,
    distance: f64,
}

impl Summary {
    /// The summary of nothing.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of (date, distance) pairs accumulated.
    pub fn walks(&self) -> usize {
        self.walks
    }

    /// Total distance in meters.
    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// A new summary with one more walk of `distance` meters.
    #[must_use]
    pub fn accumulate(self, distance: f64) -> Self {
        Self {
            walks: self.walks + 1,
            distance: self.distance + distance,
        }
    }

    /// Display text, or `None` for a summary with no walks.
    pub fn render(&self) -> Option<String> {
        (self.walks > 0).then(|| self.to_string())
    }
}

impl fmt::Display for Summary {
    // Always "walks", even for a single walk.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} walks — {}", self.walks, format_km(self.distance))
    }
}

/// Layer events a [`SummaryPane`] listens to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerEvent {
    /// The layer was added to the map (shown).
    Add,
    /// The layer was removed from the map (hidden).
    Remove,
}

impl LayerEvent {
    pub fn name(&self) -> &'static str {
        match self {
            LayerEvent::Add => "add",
            LayerEvent::Remove => "remove",
        }
    }
}

/// Handler registered on a layer event.
pub type Handler<'a> = Box<dyn FnMut() + 'a>;

/// An event source such as a year layer on the map.
pub trait LayerEvents<'a> {
    /// Register `handler` to run whenever `event` fires.
    fn on(&mut self, event: LayerEvent, handler: Handler<'a>);
    /// Drop every handler registered for `event`.
    fn off(&mut self, event: LayerEvent);
}

/// Listener notified after each effective visibility change.
pub type ChangeListener<'a> = Box<dyn FnMut(&SummaryPane<'a>) + 'a>;

/// Summary of all walked dates whose year is visible.
///
/// Years start out hidden. Every change of a year's visibility rescans all
/// walks, so the summary never drifts from the records.
pub struct SummaryPane<'a> {
    walks: &'a [WalkRecord],
    visible_years: HashMap<String, bool>,
    summary: Summary,
    on_change: Option<ChangeListener<'a>>,
}

impl<'a> SummaryPane<'a> {
    pub fn new(walks: &'a [WalkRecord]) -> Self {
        Self {
            walks,
            visible_years: HashMap::new(),
            summary: Summary::empty(),
            on_change: None,
        }
    }

    /// Create a pane that calls `on_change` after every effective toggle.
    pub fn with_listener<F>(walks: &'a [WalkRecord], on_change: F) -> Self
    where
        F: FnMut(&SummaryPane<'a>) + 'a,
    {
        Self {
            on_change: Some(Box::new(on_change)),
            ..Self::new(walks)
        }
    }

    pub fn summary(&self) -> Summary {
        self.summary
    }

    pub fn is_visible(&self, year: &str) -> bool {
        self.visible_years.get(year).copied().unwrap_or(false)
    }

    /// Show or hide a year.
    ///
    /// Returns `false` without recomputing or notifying when the year already
    /// has the requested visibility.
    pub fn toggle_visibility(&mut self, year: &str, visible: bool) -> bool {
        if self.is_visible(year) == visible {
            return false;
        }
        self.visible_years.insert(year.to_string(), visible);
        self.summary = self.recompute();

        debug!(
            "year {} {}: {} walks, {:.0}m",
            year,
            if visible { "shown" } else { "hidden" },
            self.summary.walks(),
            self.summary.distance()
        );

        // The listener is taken out for the call so it can borrow the pane.
        if let Some(mut on_change) = self.on_change.take() {
            on_change(&*self);
            self.on_change = Some(on_change);
        }
        true
    }

    fn recompute(&self) -> Summary {
        self.walks
            .iter()
            .flat_map(|walk| walk.dates.iter().zip(walk.distances.iter()))
            .filter(|(date, _)| self.is_visible(year_key(date)))
            .fold(Summary::empty(), |sum, (_, &distance)| sum.accumulate(distance))
    }

    /// Display text for the current summary, `None` while nothing is visible.
    pub fn render(&self) -> Option<String> {
        self.summary.render()
    }

    /// Bind a layer's add/remove events to showing/hiding `year`.
    ///
    /// The handlers hold a weak reference, so a dropped pane turns them into
    /// no-ops. Handlers must not fire while the pane is already borrowed.
    pub fn attach<L>(pane: &Rc<RefCell<Self>>, layer: &mut L, year: &str)
    where
        L: LayerEvents<'a> + ?Sized,
    {
        for (event, visible) in [(LayerEvent::Add, true), (LayerEvent::Remove, false)] {
            let pane = Rc::downgrade(pane);
            let year = year.to_string();
            layer.on(
                event,
                Box::new(move || {
                    if let Some(pane) = pane.upgrade() {
                        pane.borrow_mut().toggle_visibility(&year, visible);
                    }
                }),
            );
        }
    }

    /// Unsubscribe `layer`'s add/remove handlers.
    pub fn detach<L>(layer: &mut L)
    where
        L: LayerEvents<'a> + ?Sized,
    {
        layer.off(LayerEvent::Add);
        layer.off(LayerEvent::Remove);
    }
}

impl fmt::Debug for SummaryPane<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SummaryPane")
            .field("walks", &self.walks.len())
            .field("visible_years", &self.visible_years)
            .field("summary", &self.summary)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn sample_walks() -> Vec<WalkRecord> {
        vec![WalkRecord {
            dates: vec!["2020-01-01".into(), "2021-01-01".into()],
            distances: vec![1000.0, 2000.0],
            ..WalkRecord::default()
        }]
    }

    /// A layer that records handlers and fires them on demand.
    #[derive(Default)]
    struct FakeLayer<'a> {
        handlers: HashMap<LayerEvent, Vec<Handler<'a>>>,
    }

    impl<'a> FakeLayer<'a> {
        fn fire(&mut self, event: LayerEvent) {
            if let Some(handlers) = self.handlers.get_mut(&event) {
                for handler in handlers.iter_mut() {
                    handler();
                }
            }
        }
    }

    impl<'a> LayerEvents<'a> for FakeLayer<'a> {
        fn on(&mut self, event: LayerEvent, handler: Handler<'a>) {
            self.handlers.entry(event).or_default().push(handler);
        }

        fn off(&mut self, event: LayerEvent) {
            self.handlers.remove(&event);
        }
    }

    #[test]
    fn test_layer_event_names() {
        assert_eq!(LayerEvent::Add.name(), "add");
        assert_eq!(LayerEvent::Remove.name(), "remove");
    }

    #[test]
    fn test_summary_empty() {
        let s = Summary::empty();
        assert_eq!(s.walks(), 0);
        assert_eq!(s.distance(), 0.0);
        assert_eq!(s.render(), None);
    }

    #[test]
    fn test_accumulate_leaves_original_untouched() {
        let first = Summary::empty().accumulate(1500.0);
        let second = first.accumulate(2500.0);

        assert_eq!(first.walks(), 1);
        assert_eq!(first.distance(), 1500.0);
        assert_eq!(second.walks(), 2);
        assert_eq!(second.distance(), 4000.0);
    }

    #[test]
    fn test_summary_display() {
        let s = Summary::empty().accumulate(12_340.0).accumulate(1_000.0);
        assert_eq!(s.to_string(), "2 walks — 13.3km");

        let whole = Summary::empty().accumulate(12_000.0);
        assert_eq!(whole.to_string(), "1 walks — 12km");
    }

    #[test]
    fn test_toggle_sequence() {
        let walks = sample_walks();
        let mut pane = SummaryPane::new(&walks);

        assert!(pane.toggle_visibility("2020", true));
        assert_eq!(pane.summary(), Summary::empty().accumulate(1000.0));

        assert!(pane.toggle_visibility("2021", true));
        assert_eq!(pane.summary().walks(), 2);
        assert_eq!(pane.summary().distance(), 3000.0);

        assert!(pane.toggle_visibility("2020", false));
        assert_eq!(pane.summary().walks(), 1);
        assert_eq!(pane.summary().distance(), 2000.0);
        assert_eq!(pane.render().as_deref(), Some("1 walks — 2km"));
    }

    #[test]
    fn test_repeated_toggle_is_noop() {
        let walks = sample_walks();
        let calls = Cell::new(0);
        let mut pane = SummaryPane::with_listener(&walks, |_| calls.set(calls.get() + 1));

        assert!(pane.toggle_visibility("2020", true));
        assert!(!pane.toggle_visibility("2020", true));
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_hiding_unset_year_is_noop() {
        let walks = sample_walks();
        let calls = Cell::new(0);
        let mut pane = SummaryPane::with_listener(&walks, |_| calls.set(calls.get() + 1));

        assert!(!pane.toggle_visibility("2020", false));
        assert_eq!(calls.get(), 0);
        assert_eq!(pane.render(), None);
    }

    #[test]
    fn test_every_toggle_notifies() {
        let walks = sample_walks();
        let seen = RefCell::new(Vec::new());
        let mut pane =
            SummaryPane::with_listener(&walks, |p| seen.borrow_mut().push(p.summary().walks()));

        pane.toggle_visibility("2020", true);
        pane.toggle_visibility("2021", true);
        pane.toggle_visibility("2020", false);
        pane.toggle_visibility("2021", false);

        assert_eq!(*seen.borrow(), vec![1, 2, 1, 0]);
    }

    #[test]
    fn test_unknown_year_counts_nothing() {
        let walks = sample_walks();
        let mut pane = SummaryPane::new(&walks);

        assert!(pane.toggle_visibility("1999", true));
        assert_eq!(pane.summary(), Summary::empty());
        assert_eq!(pane.render(), None);
    }

    #[test]
    fn test_attach_and_detach_layer() {
        let walks = sample_walks();
        let pane = Rc::new(RefCell::new(SummaryPane::new(&walks)));
        let mut layer = FakeLayer::default();

        SummaryPane::attach(&pane, &mut layer, "2021");
        assert_eq!(layer.handlers.len(), 2);
        layer.fire(LayerEvent::Add);
        assert_eq!(pane.borrow().summary().distance(), 2000.0);

        layer.fire(LayerEvent::Remove);
        assert_eq!(pane.borrow().summary().walks(), 0);

        SummaryPane::detach(&mut layer);
        assert!(layer.handlers.is_empty());
        layer.fire(LayerEvent::Add);
        assert_eq!(pane.borrow().summary().walks(), 0);
    }

    #[test]
    fn test_handlers_outliving_pane_do_nothing() {
        let walks = sample_walks();
        let mut layer = FakeLayer::default();
        {
            let pane = Rc::new(RefCell::new(SummaryPane::new(&walks)));
            SummaryPane::attach(&pane, &mut layer, "2020");
        }
        layer.fire(LayerEvent::Add);
    }
}
