//! Resolve clicked track dates to walk details.
//!
//! Run with: cargo run --example walk_lookup

use walk_map::{Click, Interaction, MapOptions, TrackStyler, WalkIndex};

const WALKS: &str = r#"[
    {
        "dates": ["2018-09-01", "2018-09-02"],
        "distances": [18250, 15100],
        "bboxes": [[-3.2, 54.4, -3.0, 54.6], [-3.1, 54.3, -2.9, 54.5]],
        "title": "Lakes weekend",
        "link": "https://example.org/2018/09/lakes",
        "people": ["Sam", "Alex", "Jo"],
        "categories": ["Lakes", "Weekend"],
        "walkers": 3
    },
    {
        "dates": ["2019-01-12"],
        "distances": [11900],
        "bboxes": [[-0.3, 51.3, -0.1, 51.4]],
        "title": "Winter downs",
        "link": "https://example.org/2019/01/downs",
        "people": ["Kim"],
        "categories": ["Downs"],
        "walkers": 1
    }
]"#;

fn main() {
    env_logger::init();

    let options = MapOptions::default();
    let index = match WalkIndex::from_json(WALKS) {
        Ok(index) => index,
        Err(e) => {
            eprintln!("Bad walk index: {}", e);
            return;
        }
    };

    if let Some(bounds) = index.bounds() {
        let max_bounds = bounds.pad(options.bounds_padding);
        println!("Fit to {:?}\nLimit panning to {:?}\n", bounds, max_bounds);
    }

    let styler = TrackStyler::new(options.first_year);
    for year in index.years() {
        println!("Layer {} drawn in {}", year, styler.colour_for(&year));
    }
    println!();

    let mut ui = Interaction::new(&index);
    for date in ["2018-09-02", "2018-09-02", "2018-09-05", "2017-12-31", "2019-01-12"] {
        println!("Click on {}:", date);
        match ui.click(date) {
            Click::AlreadySelected => println!("   already selected"),
            Click::Selected { details, deselected } => {
                if let Some(previous) = deselected {
                    println!("   reset style of {}", previous);
                }
                println!("   {}", details.title);
                println!("   {}blog <{}>", details.line, details.link);
                println!("   {}", details.people);
            }
            Click::NotFound { error, deselected } => {
                if let Some(previous) = deselected {
                    println!("   reset style of {}", previous);
                }
                println!("   no details: {}", error);
            }
        }
    }
}
