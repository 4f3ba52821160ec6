//! Core of the larder recipe finder: domain types, ingredient normalization,
//! catalog indexing, deterministic images, favorites and configuration.

pub mod catalog;
pub mod config;
pub mod error;
pub mod favorites;
pub mod images;
pub mod normalize;
pub mod source;
pub mod traits;
pub mod types;

pub use catalog::{Catalog, CatalogIndexer, Vocabulary};
pub use error::{Error, MalformedRecipe, Result};
pub use normalize::normalize;
pub use types::{DietaryTag, Difficulty, MatchMode, Nutrition, RawRecipe, Recipe, RecipeId, Strategy};
