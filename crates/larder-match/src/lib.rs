//! Selection handling and recipe matching over an indexed catalog.

pub mod engine;
pub mod featured;
pub mod selection;

pub use engine::{mark_favorites, DietaryFilter, MatchEngine, MatchResult};
pub use featured::featured;
pub use selection::Selection;
