pub mod build;
pub mod load;
pub mod stats;
pub mod types;

pub use build::DataIndex;
pub use load::load_items;
pub use types::*;
