use crate::index::types::ItemId;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, EngineError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Duplicate item identifier: {0}")]
    DuplicateItem(ItemId),

    #[error("Unknown facet: {0}")]
    UnknownFacet(String),

    #[error("Engine is busy handling another event")]
    Busy,

    #[error("Topic '{0}' is not an engine input")]
    NotAnInput(&'static str),
}

impl From<crate::index::types::UnknownFacet> for EngineError {
    fn from(err: crate::index::types::UnknownFacet) -> Self {
        EngineError::UnknownFacet(err.0)
    }
}
