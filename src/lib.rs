//! # tagsieve - Faceted Tag Filtering Engine
//!
//! tagsieve narrows a collection of recipe-like items by a free-text query and
//! by tags selected in three facets (ingredients, appliances, utensils). Every
//! filter change recomposes the result and reports it over a synchronous
//! event bus, flushing the first few matches early on large scans.
//!
//! ## Architecture
//!
//! The crate is organized into these main modules:
//!
//! - [`index`] - Item model, loading, and the immutable per-facet index
//! - [`query`] - Filter state, match sets, scan planning and composition
//! - [`engine`] - Filter-change transactions and the bus session
//! - [`events`] - Event payloads and the publish/subscribe bus
//! - [`output`] - Terminal and JSON-lines rendering of events
//! - [`bench`] - Text-search timing
//! - [`utils`] - Configuration and progress bars
//!
//! ## Quick Start
//!
//! ```no_run
//! use tagsieve::engine::{SearchEngine, Session};
//! use tagsieve::events::{Event, EventBus, Topic};
//! use tagsieve::index::load_items;
//! use std::path::Path;
//!
//! let items = load_items(Path::new("recipes.json")).unwrap();
//! let bus = EventBus::new();
//! bus.subscribe(Topic::CountChanged, |event| println!("{:?}", event));
//!
//! let _session = Session::attach(SearchEngine::new(items).unwrap(), &bus);
//! bus.publish(&Event::add_tag("appliances", "Four"));
//! bus.publish(&Event::text_search("choc"));
//! ```
//!
//! ## Matching
//!
//! Each active filter owns a match set held as a roaring bitmap of item
//! slots. A change recomputes only the affected set; the result is the
//! intersection of the active sets, scanned from the smallest one.

pub mod bench;
pub mod engine;
pub mod error;
pub mod events;
pub mod index;
pub mod output;
pub mod query;
pub mod utils;

pub use engine::{SearchEngine, Session};
pub use error::{EngineError, Result};
