use crate::index::types::{Facet, TagSet};
use std::fmt;

/// A filter whose matches are tracked as one match set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchTarget {
    Text,
    Facet(Facet),
}

impl MatchTarget {
    /// All targets in tie-break priority order
    pub const ALL: [MatchTarget; 4] = [
        MatchTarget::Text,
        MatchTarget::Facet(Facet::Ingredients),
        MatchTarget::Facet(Facet::Appliances),
        MatchTarget::Facet(Facet::Utensils),
    ];

    #[inline]
    pub fn index(&self) -> usize {
        match self {
            MatchTarget::Text => 0,
            MatchTarget::Facet(facet) => facet.index() + 1,
        }
    }
}

impl fmt::Display for MatchTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchTarget::Text => f.write_str("text"),
            MatchTarget::Facet(facet) => write!(f, "{}", facet),
        }
    }
}

/// The user's current free-text query and selected tags per facet
#[derive(Debug, Clone, Default)]
pub struct FilterState {
    text: String,
    tags: [TagSet; 3],
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the text query, returning whether it changed
    pub fn set_text(&mut self, query: &str) -> bool {
        if self.text == query {
            return false;
        }
        self.text.clear();
        self.text.push_str(query);
        true
    }

    /// Tags currently selected for `facet`, in selection order
    pub fn selected(&self, facet: Facet) -> &TagSet {
        &self.tags[facet.index()]
    }

    /// Select a tag, returning false if it was already selected
    pub fn add_tag(&mut self, facet: Facet, tag: &str) -> bool {
        let tags = &mut self.tags[facet.index()];
        if tags.contains(tag) {
            return false;
        }
        tags.insert(tag.to_string())
    }

    /// Deselect a tag, returning false if it was not selected
    pub fn remove_tag(&mut self, facet: Facet, tag: &str) -> bool {
        // shift_remove keeps the remaining tags in selection order
        self.tags[facet.index()].shift_remove(tag)
    }

    /// Whether `target` currently restricts the result
    pub fn is_active(&self, target: MatchTarget) -> bool {
        match target {
            MatchTarget::Text => !self.text.is_empty(),
            MatchTarget::Facet(facet) => !self.selected(facet).is_empty(),
        }
    }

    /// Active targets in tie-break priority order
    pub fn active_targets(&self) -> impl Iterator<Item = MatchTarget> + '_ {
        MatchTarget::ALL
            .into_iter()
            .filter(move |target| self.is_active(*target))
    }

    /// True if no filter is active
    pub fn is_empty(&self) -> bool {
        self.active_targets().next().is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state_has_no_active_filter() {
        let state = FilterState::new();
        assert!(state.is_empty());
        assert_eq!(state.text(), "");
        for facet in Facet::ALL {
            assert!(state.selected(facet).is_empty());
        }
    }

    #[test]
    fn test_add_tag_is_idempotent() {
        let mut state = FilterState::new();
        assert!(state.add_tag(Facet::Ingredients, "Lait"));
        assert!(!state.add_tag(Facet::Ingredients, "Lait"));
        assert_eq!(state.selected(Facet::Ingredients).len(), 1);
        assert!(state.selected(Facet::Utensils).is_empty());
    }

    #[test]
    fn test_remove_tag_keeps_selection_order() {
        let mut state = FilterState::new();
        state.add_tag(Facet::Utensils, "a");
        state.add_tag(Facet::Utensils, "b");
        state.add_tag(Facet::Utensils, "c");

        assert!(state.remove_tag(Facet::Utensils, "a"));
        assert!(!state.remove_tag(Facet::Utensils, "a"));
        let tags: Vec<_> = state.selected(Facet::Utensils).iter().collect();
        assert_eq!(tags, ["b", "c"]);
    }

    #[test]
    fn test_active_targets_in_priority_order() {
        let mut state = FilterState::new();
        state.add_tag(Facet::Utensils, "fouet");
        state.set_text("choc");
        state.add_tag(Facet::Appliances, "Four");

        let active: Vec<_> = state.active_targets().collect();
        assert_eq!(
            active,
            vec![
                MatchTarget::Text,
                MatchTarget::Facet(Facet::Appliances),
                MatchTarget::Facet(Facet::Utensils),
            ]
        );
    }

    #[test]
    fn test_set_text_reports_change() {
        let mut state = FilterState::new();
        assert!(state.set_text("tarte"));
        assert!(!state.set_text("tarte"));
        assert!(state.is_active(MatchTarget::Text));
        assert!(state.set_text(""));
        assert!(state.is_empty());
    }
}
