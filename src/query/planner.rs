use crate::query::filter::{FilterState, MatchTarget};
use crate::query::matcher::MatchSets;

/// Where the composition scan starts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Base {
    /// No active filter: every item is a result
    Universe,
    /// Scan this set and probe the others
    Set(MatchTarget),
}

/// Scan plan for one composition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanPlan {
    pub base: Base,
    /// Active sets each base member must also belong to
    pub probes: Vec<MatchTarget>,
}

impl ScanPlan {
    /// Plan a composition over the currently active filters.
    ///
    /// The smallest active set becomes the base so the fewest membership
    /// probes are made. Equal sizes keep [`MatchTarget::ALL`] order: text,
    /// then ingredients, appliances and utensils.
    pub fn new(filters: &FilterState, sets: &MatchSets) -> Self {
        let mut active: Vec<MatchTarget> = filters.active_targets().collect();
        if active.is_empty() {
            return Self {
                base: Base::Universe,
                probes: Vec::new(),
            };
        }

        // Stable sort: ties stay in priority order
        active.sort_by_key(|target| sets.get(*target).len());
        let base = active.remove(0);

        Self {
            base: Base::Set(base),
            probes: active,
        }
    }
}
