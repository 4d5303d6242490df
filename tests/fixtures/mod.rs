//! Shared builders for integration tests.
#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;
use tagsieve::events::{Event, EventBus, Topic};
use tagsieve::index::types::{Ingredient, Item, ItemId};
use tagsieve::query::ResultBatch;

/// Build an item with no description or timing
pub fn item(
    id: ItemId,
    name: &str,
    ingredients: &[&str],
    appliance: &str,
    utensils: &[&str],
) -> Item {
    Item {
        id,
        name: name.to_string(),
        description: String::new(),
        time: 0,
        ingredients: ingredients.iter().map(|name| Ingredient::new(*name)).collect(),
        appliance: appliance.to_string(),
        utensils: utensils.iter().map(|u| u.to_string()).collect(),
        servings: None,
        image: None,
    }
}

pub fn described(mut item: Item, description: &str) -> Item {
    item.description = description.to_string();
    item
}

/// A small recipe collection with overlapping facet values
pub fn recipes() -> Vec<Item> {
    vec![
        described(
            item(1, "Limonade de coco", &["coco", "citron", "sucre", "glace"], "Blender", &["cuillere", "verres"]),
            "Mettre les glacons a votre gout dans le blender",
        ),
        described(
            item(2, "Poisson cru a la tahitienne", &["thon", "concombre", "tomate", "citron", "coco"], "Saladier", &["couteau", "saladier"]),
            "Decouper le thon en des, melanger avec le citron",
        ),
        described(
            item(3, "Poulet coco reunionnais", &["poulet", "coco", "tomate", "oignon", "curry"], "Cocotte", &["couteau"]),
            "Decouper le poulet et faire dorer dans la cocotte",
        ),
        described(
            item(4, "Salade de riz", &["riz", "thon", "tomate", "oeuf", "olives"], "Cuiseur de riz", &["saladier", "passoire"]),
            "Faire cuire le riz, ajouter le thon et les tomates",
        ),
        described(
            item(5, "Tarte au thon", &["pate feuilletee", "thon", "tomate", "gruyere", "moutarde"], "Four", &["moule a tarte", "rouleau a patisserie", "fourchette"]),
            "Etaler la pate, ajouter la moutarde et le thon",
        ),
        described(
            item(6, "Tarte aux pommes", &["pate brisee", "pommes", "oeuf", "creme", "sucre"], "Four", &["moule a tarte", "rouleau a patisserie", "couteau"]),
            "Disposer les pommes sur la pate",
        ),
        described(
            item(7, "Tartelettes au chocolat", &["pate sablee", "chocolat", "beurre", "sucre", "creme"], "Four", &["moule a tartelettes", "casserole"]),
            "Faire fondre le chocolat avec le beurre",
        ),
        described(
            item(8, "Mousse au chocolat", &["oeuf", "chocolat", "sucre"], "Casserole", &["fouet", "spatule"]),
            "Battre les blancs en neige et incorporer le chocolat",
        ),
    ]
}

/// Records every outbound event published on a bus
pub struct Recorder {
    events: Rc<RefCell<Vec<Event>>>,
}

impl Recorder {
    pub fn attach(bus: &EventBus) -> Self {
        let events = Rc::new(RefCell::new(Vec::new()));
        for topic in Topic::OUTPUTS {
            let events = Rc::clone(&events);
            bus.subscribe(topic, move |event| events.borrow_mut().push(event.clone()));
        }
        Self { events }
    }

    /// Drain the events recorded so far
    pub fn take(&self) -> Vec<Event> {
        std::mem::take(&mut *self.events.borrow_mut())
    }
}

pub fn topics(events: &[Event]) -> Vec<Topic> {
    events.iter().map(Event::topic).collect()
}

pub fn batches(events: &[Event]) -> Vec<ResultBatch> {
    events
        .iter()
        .filter_map(|event| match event {
            Event::ResultChanged(batch) => Some(batch.clone()),
            _ => None,
        })
        .collect()
}

pub fn batch(items: &[ItemId], partial: bool, preceded_by_partial: bool) -> ResultBatch {
    ResultBatch {
        items: items.to_vec(),
        partial,
        preceded_by_partial,
    }
}
