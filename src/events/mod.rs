//! Events exchanged with the engine over the [`EventBus`].
//!
//! Inbound topics (`text-search`, `add-tag`, `remove-tag`) drive the engine;
//! outbound topics (`options-changed`, `result-changed`, `count-changed`)
//! report every recomposition. Events serialize as
//! `{"topic": "...", "payload": {...}}` so scripts and transcripts can be
//! kept as JSON lines.

pub mod bus;

pub use bus::{EventBus, Subscription, WeakEventBus};

use crate::query::composer::ResultBatch;
use crate::query::options::OptionsUpdate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Event channel topic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    TextSearch,
    AddTag,
    RemoveTag,
    OptionsChanged,
    ResultChanged,
    CountChanged,
}

impl Topic {
    pub const INPUTS: [Topic; 3] = [Topic::TextSearch, Topic::AddTag, Topic::RemoveTag];
    pub const OUTPUTS: [Topic; 3] = [
        Topic::ResultChanged,
        Topic::OptionsChanged,
        Topic::CountChanged,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Topic::TextSearch => "text-search",
            Topic::AddTag => "add-tag",
            Topic::RemoveTag => "remove-tag",
            Topic::OptionsChanged => "options-changed",
            Topic::ResultChanged => "result-changed",
            Topic::CountChanged => "count-changed",
        }
    }

    /// Whether the engine consumes this topic
    pub fn is_input(&self) -> bool {
        Topic::INPUTS.contains(self)
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payload of `text-search`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextSearch {
    pub query: String,
}

/// Payload of `add-tag` and `remove-tag`.
///
/// The facet is kept as received; the engine rejects unknown names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagRequest {
    pub facet: String,
    pub tag: String,
}

/// Payload of `count-changed`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountUpdate {
    pub count: usize,
}

/// A message on the event channel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "topic", content = "payload", rename_all = "kebab-case")]
pub enum Event {
    TextSearch(TextSearch),
    AddTag(TagRequest),
    RemoveTag(TagRequest),
    OptionsChanged(OptionsUpdate),
    ResultChanged(ResultBatch),
    CountChanged(CountUpdate),
}

impl Event {
    pub fn topic(&self) -> Topic {
        match self {
            Event::TextSearch(_) => Topic::TextSearch,
            Event::AddTag(_) => Topic::AddTag,
            Event::RemoveTag(_) => Topic::RemoveTag,
            Event::OptionsChanged(_) => Topic::OptionsChanged,
            Event::ResultChanged(_) => Topic::ResultChanged,
            Event::CountChanged(_) => Topic::CountChanged,
        }
    }

    pub fn text_search(query: impl Into<String>) -> Self {
        Event::TextSearch(TextSearch {
            query: query.into(),
        })
    }

    pub fn add_tag(facet: impl Into<String>, tag: impl Into<String>) -> Self {
        Event::AddTag(TagRequest {
            facet: facet.into(),
            tag: tag.into(),
        })
    }

    pub fn remove_tag(facet: impl Into<String>, tag: impl Into<String>) -> Self {
        Event::RemoveTag(TagRequest {
            facet: facet.into(),
            tag: tag.into(),
        })
    }
}
