pub mod composer;
pub mod filter;
pub mod matcher;
pub mod options;
pub mod planner;

pub use composer::{ResultBatch, ResultComposer};
pub use filter::{FilterState, MatchTarget};
pub use matcher::{MatchSets, RecomputeStats};
pub use options::{FacetOptions, OptionsUpdate};
pub use planner::{Base, ScanPlan};
