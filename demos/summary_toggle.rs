//! Toggle year layers on and off and watch the summary follow.
//!
//! Run with: cargo run --example summary_toggle

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use walk_map::{Handler, LayerEvent, LayerEvents, SummaryPane, WalkIndex};

const WALKS: &str = r#"[
    {"dates": ["2019-04-20"], "distances": [14200], "title": "Easter ridge", "walkers": 4},
    {"dates": ["2019-08-10", "2019-08-11"], "distances": [21000, 17800], "title": "Two-day traverse", "walkers": 2},
    {"dates": ["2020-02-15"], "distances": [9600], "title": "Frosty commons", "walkers": 5},
    {"dates": ["2021-05-01"], "distances": [12340], "title": "Bluebells", "walkers": 3}
]"#;

/// Stand-in for a map layer: remembers handlers and fires them on request.
#[derive(Default)]
struct YearLayer<'a> {
    handlers: HashMap<LayerEvent, Vec<Handler<'a>>>,
}

impl<'a> YearLayer<'a> {
    fn fire(&mut self, event: LayerEvent) {
        if let Some(handlers) = self.handlers.get_mut(&event) {
            for handler in handlers.iter_mut() {
                handler();
            }
        }
    }
}

impl<'a> LayerEvents<'a> for YearLayer<'a> {
    fn on(&mut self, event: LayerEvent, handler: Handler<'a>) {
        self.handlers.entry(event).or_default().push(handler);
    }

    fn off(&mut self, event: LayerEvent) {
        self.handlers.remove(&event);
    }
}

fn main() {
    env_logger::init();

    let index = match WalkIndex::from_json(WALKS) {
        Ok(index) => index,
        Err(e) => {
            eprintln!("Bad walk index: {}", e);
            return;
        }
    };

    let pane = Rc::new(RefCell::new(SummaryPane::with_listener(index.walks(), |pane| {
        println!("   summary: {}", pane.render().unwrap_or_else(|| "(nothing shown)".into()));
    })));

    let mut layers: Vec<(String, YearLayer)> = index
        .years()
        .into_iter()
        .map(|year| (year, YearLayer::default()))
        .collect();
    for (year, layer) in layers.iter_mut() {
        SummaryPane::attach(&pane, layer, year);
    }

    println!("Showing every year:");
    for (year, layer) in layers.iter_mut() {
        println!(" + {}", year);
        layer.fire(LayerEvent::Add);
    }

    println!("\nHiding 2019:");
    if let Some((_, layer)) = layers.iter_mut().find(|(y, _)| y == "2019") {
        layer.fire(LayerEvent::Remove);
        // Already hidden: no recompute, no output
        layer.fire(LayerEvent::Remove);
    }

    println!("\nDetaching every layer:");
    for (_, layer) in layers.iter_mut() {
        SummaryPane::detach(layer);
        layer.fire(LayerEvent::Remove);
    }
    println!("   summary still: {:?}", pane.borrow().summary());
}
