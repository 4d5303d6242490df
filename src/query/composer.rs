//! Result composition with early partial emission.
//!
//! The composer walks the base set of a [`ScanPlan`] in slot order and probes
//! every other active set. When the base holds more items than the partial
//! batch size, the first `partial_batch_size` confirmed matches are emitted
//! immediately as a partial batch; everything found afterwards is emitted as
//! one final batch flagged `preceded_by_partial`.
//!
//! Concatenating the emitted batches always yields the full intersection, in
//! slot order, without duplicates.

use crate::index::build::DataIndex;
use crate::index::types::{EngineConfig, ItemId};
use crate::query::matcher::MatchSets;
use crate::query::planner::{Base, ScanPlan};
use roaring::RoaringBitmap;
use serde::{Deserialize, Serialize};
use std::mem;

/// One batch of composed results
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultBatch {
    pub items: Vec<ItemId>,
    /// Emitted early, before the scan completed
    pub partial: bool,
    /// A partial batch of the same composition was emitted before this one
    pub preceded_by_partial: bool,
}

/// Composes the final result of the active filters
pub struct ResultComposer<'a> {
    index: &'a DataIndex,
    sets: &'a MatchSets,
    config: &'a EngineConfig,
}

impl<'a> ResultComposer<'a> {
    pub fn new(index: &'a DataIndex, sets: &'a MatchSets, config: &'a EngineConfig) -> Self {
        Self {
            index,
            sets,
            config,
        }
    }

    /// Run `plan`, handing each batch to `emit` as soon as it is complete.
    ///
    /// Returns the slots of the full result.
    pub fn compose<F>(&self, plan: &ScanPlan, emit: &mut F) -> RoaringBitmap
    where
        F: FnMut(ResultBatch),
    {
        let base = match plan.base {
            Base::Universe => self.index.universe(),
            Base::Set(target) => self.sets.get(target),
        };
        let probes: Vec<&RoaringBitmap> = plan.probes.iter().map(|t| self.sets.get(*t)).collect();

        let threshold = self.config.partial_batch_size;
        let stream = self.config.streaming && threshold > 0 && base.len() > threshold as u64;

        let mut result = RoaringBitmap::new();
        let mut pending = Vec::new();
        let mut flushed_partial = false;

        for slot in base.iter() {
            if !probes.iter().all(|set| set.contains(slot)) {
                continue;
            }

            result.insert(slot);
            pending.push(self.index.id_of(slot));

            if stream && !flushed_partial && pending.len() == threshold {
                emit(ResultBatch {
                    items: mem::take(&mut pending),
                    partial: true,
                    preceded_by_partial: false,
                });
                flushed_partial = true;
            }
        }

        // A partial batch that turned out to hold everything needs no follow-up
        if !flushed_partial || !pending.is_empty() {
            emit(ResultBatch {
                items: pending,
                partial: false,
                preceded_by_partial: flushed_partial,
            });
        }

        log::debug!(
            "Composed {} results from base of {} with {} probes",
            result.len(),
            base.len(),
            probes.len()
        );

        result
    }
}
