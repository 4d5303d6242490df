#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use std::collections::BTreeSet;
use tagsieve::engine::{SearchEngine, Session};
use tagsieve::events::{Event, EventBus, Topic};
use tagsieve::index::types::{Ingredient, Item};
use tagsieve::query::MatchTarget;
use std::cell::RefCell;
use std::rc::Rc;

const VALUES: [&str; 6] = ["sel", "sucre", "Four", "fouet", "", "Sel"];
const FACETS: [&str; 4] = ["ingredients", "appliances", "utensils", "tools"];

#[derive(Arbitrary, Debug)]
enum Step {
    Text(String),
    Add { facet: u8, value: u8 },
    Remove { facet: u8, value: u8 },
}

#[derive(Arbitrary, Debug)]
struct Input {
    items: Vec<(u8, u8, u8)>,
    batch_size: u8,
    streaming: bool,
    steps: Vec<Step>,
}

fn pick<'a>(values: &[&'a str], n: u8) -> &'a str {
    values[n as usize % values.len()]
}

fuzz_target!(|input: Input| {
    // Unique ids in input order
    let mut seen = BTreeSet::new();
    let items: Vec<Item> = input
        .items
        .iter()
        .filter(|(id, _, _)| seen.insert(*id))
        .map(|&(id, a, b)| Item {
            id: id as u32,
            name: format!("item {}", pick(&VALUES, a)),
            description: String::new(),
            time: 0,
            ingredients: vec![Ingredient::new(pick(&VALUES, a)), Ingredient::new(pick(&VALUES, b))],
            appliance: pick(&VALUES, b).to_string(),
            utensils: vec![pick(&VALUES, a ^ b).to_string()],
            servings: None,
            image: None,
        })
        .collect();

    let config = tagsieve::index::types::EngineConfig {
        partial_batch_size: input.batch_size as usize % 8,
        streaming: input.streaming,
    };
    let Ok(engine) = SearchEngine::with_config(items, config) else {
        return;
    };

    let bus = EventBus::new();
    let emitted = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&emitted);
    bus.subscribe(Topic::ResultChanged, move |event| {
        if let Event::ResultChanged(batch) = event {
            sink.borrow_mut().extend(batch.items.iter().copied());
        }
    });
    let session = Session::attach(engine, &bus);

    for step in input.steps {
        let event = match step {
            Step::Text(query) => Event::text_search(query),
            Step::Add { facet, value } => Event::add_tag(pick(&FACETS, facet), pick(&VALUES, value)),
            Step::Remove { facet, value } => {
                Event::remove_tag(pick(&FACETS, facet), pick(&VALUES, value))
            }
        };
        emitted.borrow_mut().clear();
        let applied = session.dispatch(&event).is_ok();

        let engine = session.engine().expect("session idle between events");
        if applied {
            // Batches of one transaction concatenate to the full result
            assert_eq!(*emitted.borrow(), engine.result_ids());
        }
        let mut result = engine.result_ids();
        for target in MatchTarget::ALL {
            let set: BTreeSet<u32> = engine.match_ids(target).into_iter().collect();
            result.retain(|id| set.contains(id));
        }
        assert_eq!(result, engine.result_ids());
    }
});
