//! IO modules - dataset input and ranking output
//!
//! - `dataset` - JSON dataset of shelters and other locations
//! - `report` - ranked list as a text table or JSON lines

pub mod dataset;
pub mod report;

pub use dataset::{load_locations, parse_locations};
pub use report::render;
