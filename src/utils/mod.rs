//! Shared utilities.
//!
//! - [`app_data`] - Configuration file location and loading
//! - [`progress`] - Progress bars that compile away without the `progress` feature

pub mod app_data;
pub mod progress;

pub use app_data::*;
