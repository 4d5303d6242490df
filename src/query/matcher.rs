//! Per-filter match sets.
//!
//! Each active filter is evaluated in isolation against the whole collection.
//! A filter with no selection matches the full universe, so an inactive
//! filter never excludes anything.
//!
//! | Facet       | Selection semantics                                  |
//! |-------------|------------------------------------------------------|
//! | ingredients | item carries **every** selected tag (AND)            |
//! | utensils    | item carries **every** selected tag (AND)            |
//! | appliances  | item's single appliance is **one of** the tags (OR)  |
//!
//! The appliance facet is single-valued: an item can never carry two
//! distinct appliances, so AND across several selections would always be
//! empty.

use crate::index::build::DataIndex;
use crate::index::types::{Facet, TagSet};
use crate::query::filter::{FilterState, MatchTarget};
use roaring::RoaringBitmap;

/// Number of recomputations performed per match target
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecomputeStats {
    counts: [u64; 4],
}

impl RecomputeStats {
    pub fn get(&self, target: MatchTarget) -> u64 {
        self.counts[target.index()]
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }
}

/// Slots matching each filter on its own
#[derive(Debug, Clone)]
pub struct MatchSets {
    sets: [RoaringBitmap; 4],
    stats: RecomputeStats,
}

impl MatchSets {
    /// Every set starts as the full universe
    pub fn new(index: &DataIndex) -> Self {
        let universe = index.universe();
        Self {
            sets: [
                universe.clone(),
                universe.clone(),
                universe.clone(),
                universe.clone(),
            ],
            stats: RecomputeStats::default(),
        }
    }

    pub fn get(&self, target: MatchTarget) -> &RoaringBitmap {
        &self.sets[target.index()]
    }

    pub fn stats(&self) -> &RecomputeStats {
        &self.stats
    }

    /// Recompute the set of `target` only; other sets are left untouched
    pub fn recompute(&mut self, target: MatchTarget, index: &DataIndex, filters: &FilterState) {
        let matches = match target {
            MatchTarget::Text => text_matches(index, filters.text()),
            MatchTarget::Facet(facet) => facet_matches(index, facet, filters.selected(facet)),
        };

        log::debug!("Recomputed {} match set: {} items", target, matches.len());

        self.sets[target.index()] = matches;
        self.stats.counts[target.index()] += 1;
    }
}

/// Items whose name, description or any ingredient contains `query`,
/// ignoring case
pub fn text_matches(index: &DataIndex, query: &str) -> RoaringBitmap {
    if query.is_empty() {
        return index.universe().clone();
    }

    let needle = query.to_lowercase();
    index
        .universe()
        .iter()
        .filter(|&slot| index.haystack(slot).contains(&needle))
        .collect()
}

/// Items satisfying the selection of `facet`
pub fn facet_matches(index: &DataIndex, facet: Facet, selected: &TagSet) -> RoaringBitmap {
    if selected.is_empty() {
        return index.universe().clone();
    }

    if facet.is_single_valued() {
        let mut union = RoaringBitmap::new();
        for tag in selected {
            if let Some(postings) = index.postings(facet, tag) {
                union |= postings;
            }
        }
        return union;
    }

    let mut lists = Vec::with_capacity(selected.len());
    for tag in selected {
        match index.postings(facet, tag) {
            Some(postings) => lists.push(postings),
            // A tag no item carries can never be satisfied
            None => return RoaringBitmap::new(),
        }
    }

    // Sort by size for efficient intersection
    lists.sort_by_key(|postings| postings.len());

    let mut result = lists[0].clone();
    for postings in &lists[1..] {
        result &= *postings;
    }
    result
}
