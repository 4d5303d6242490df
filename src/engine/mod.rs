//! The faceted search engine.
//!
//! A [`SearchEngine`] owns one dataset session: the immutable [`DataIndex`],
//! the user's [`FilterState`] and one match set per filter. Every mutation is
//! a complete synchronous transaction:
//!
//! 1. update the filter state
//! 2. recompute the match set of the changed filter only
//! 3. compose the intersection of the active sets, emitting result batches
//! 4. emit the recalculated facet options, then the result count
//!
//! Emitted events are handed to a caller-supplied sink as they are produced.
//! [`Session`] connects an engine to an [`EventBus`](crate::events::EventBus).

pub mod session;

pub use session::Session;

use crate::error::{EngineError, Result};
use crate::events::{CountUpdate, Event, TagRequest};
use crate::index::build::DataIndex;
use crate::index::types::{EngineConfig, Facet, Item, ItemId};
use crate::query::composer::ResultComposer;
use crate::query::filter::{FilterState, MatchTarget};
use crate::query::matcher::{MatchSets, RecomputeStats};
use crate::query::options;
use crate::query::planner::ScanPlan;
use roaring::RoaringBitmap;

pub struct SearchEngine {
    index: DataIndex,
    filters: FilterState,
    sets: MatchSets,
    config: EngineConfig,
    /// Slots of the last composed result
    result: RoaringBitmap,
}

impl SearchEngine {
    /// Build an engine over `items` with the default configuration
    pub fn new(items: Vec<Item>) -> Result<Self> {
        Self::with_config(items, EngineConfig::default())
    }

    pub fn with_config(items: Vec<Item>, config: EngineConfig) -> Result<Self> {
        Ok(Self::from_index(DataIndex::build(items)?, config))
    }

    pub fn from_index(index: DataIndex, config: EngineConfig) -> Self {
        let sets = MatchSets::new(&index);
        let result = index.universe().clone();
        Self {
            index,
            filters: FilterState::new(),
            sets,
            config,
            result,
        }
    }

    pub fn index(&self) -> &DataIndex {
        &self.index
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn stats(&self) -> &RecomputeStats {
        self.sets.stats()
    }

    /// Slots currently matching `target` on its own
    pub fn match_set(&self, target: MatchTarget) -> &RoaringBitmap {
        self.sets.get(target)
    }

    /// Identifiers currently matching `target` on its own, in slot order
    pub fn match_ids(&self, target: MatchTarget) -> Vec<ItemId> {
        self.index.ids(self.sets.get(target))
    }

    /// Identifiers of the last composed result, in slot order
    pub fn result_ids(&self) -> Vec<ItemId> {
        self.index.ids(&self.result)
    }

    /// Replace the free-text query
    pub fn set_text<F>(&mut self, query: &str, emit: &mut F)
    where
        F: FnMut(Event) + ?Sized,
    {
        self.filters.set_text(query);
        self.sets.recompute(MatchTarget::Text, &self.index, &self.filters);
        self.refresh(emit);
    }

    /// Select `tag` in `facet`
    pub fn add_tag<F>(&mut self, facet: Facet, tag: &str, emit: &mut F)
    where
        F: FnMut(Event) + ?Sized,
    {
        self.filters.add_tag(facet, tag);
        self.sets.recompute(MatchTarget::Facet(facet), &self.index, &self.filters);
        self.refresh(emit);
    }

    /// Deselect `tag` in `facet`
    pub fn remove_tag<F>(&mut self, facet: Facet, tag: &str, emit: &mut F)
    where
        F: FnMut(Event) + ?Sized,
    {
        self.filters.remove_tag(facet, tag);
        self.sets.recompute(MatchTarget::Facet(facet), &self.index, &self.filters);
        self.refresh(emit);
    }

    /// Apply an inbound event.
    ///
    /// An unknown facet is logged and ignored without mutating anything.
    /// Outbound events are not inputs and are refused.
    pub fn handle<F>(&mut self, event: &Event, emit: &mut F) -> Result<()>
    where
        F: FnMut(Event) + ?Sized,
    {
        match event {
            Event::TextSearch(search) => self.set_text(&search.query, emit),
            Event::AddTag(request) => {
                let facet = parse_facet(request)?;
                self.add_tag(facet, &request.tag, emit);
            }
            Event::RemoveTag(request) => {
                let facet = parse_facet(request)?;
                self.remove_tag(facet, &request.tag, emit);
            }
            other => return Err(EngineError::NotAnInput(other.topic().as_str())),
        }
        Ok(())
    }

    /// Emit the options and count of the current result without recomputing
    pub fn snapshot<F>(&self, emit: &mut F)
    where
        F: FnMut(Event) + ?Sized,
    {
        emit(Event::OptionsChanged(options::recalculate(
            &self.index,
            &self.filters,
            &self.result,
        )));
        emit(Event::CountChanged(CountUpdate {
            count: self.result.len() as usize,
        }));
    }

    /// Recompose the result from the current match sets
    fn refresh<F>(&mut self, emit: &mut F)
    where
        F: FnMut(Event) + ?Sized,
    {
        let plan = ScanPlan::new(&self.filters, &self.sets);
        log::debug!("Scan plan: {:?}", plan);

        let composer = ResultComposer::new(&self.index, &self.sets, &self.config);
        self.result = composer.compose(&plan, &mut |batch| emit(Event::ResultChanged(batch)));

        self.snapshot(emit);
    }
}

fn parse_facet(request: &TagRequest) -> Result<Facet> {
    request.facet.parse::<Facet>().map_err(|err| {
        log::warn!("Ignoring tag '{}': {}", request.tag, err);
        EngineError::from(err)
    })
}
