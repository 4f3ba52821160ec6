use thiserror::Error;

use crate::types::RecipeId;

/// A single catalog record that could not be indexed.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("malformed recipe at position {position}{}: {reason}", .id.map(|id| format!(" (id {id})")).unwrap_or_default())]
pub struct MalformedRecipe {
    pub position: usize,
    pub id: Option<RecipeId>,
    pub reason: String,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid catalog: {0}")]
    InvalidCatalog(String),

    #[error(transparent)]
    MalformedRecipe(#[from] MalformedRecipe),

    #[error("Search needs at least one selected ingredient")]
    EmptySelection,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
