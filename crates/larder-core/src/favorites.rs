//! Local favorites list: full recipe snapshots keyed by id, stored as JSON.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::traits::FavoriteSet;
use crate::types::{Recipe, RecipeId};

#[derive(Debug, Clone)]
pub struct FavoritesStore {
    path: PathBuf,
    recipes: Vec<Recipe>,
}

impl FavoritesStore {
    /// Open the store at `path`. A missing file is an empty list.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let recipes = if path.exists() {
            let content = fs::read_to_string(&path)?;
            if content.trim().is_empty() { Vec::new() } else { serde_json::from_str(&content)? }
        } else {
            Vec::new()
        };
        tracing::debug!(path = %path.display(), favorites = recipes.len(), "opened favorites");
        Ok(Self { path, recipes })
    }

    pub fn path(&self) -> &Path { &self.path }

    pub fn recipes(&self) -> &[Recipe] { &self.recipes }

    pub fn len(&self) -> usize { self.recipes.len() }

    pub fn is_empty(&self) -> bool { self.recipes.is_empty() }

    /// Add the recipe if absent, remove it if present. Returns true when it is now a favorite.
    pub fn toggle(&mut self, recipe: &Recipe) -> bool {
        if let Some(pos) = self.recipes.iter().position(|r| r.id == recipe.id) {
            self.recipes.remove(pos);
            false
        } else {
            self.recipes.push(recipe.clone());
            true
        }
    }

    /// Write the list next to its destination, then rename over it.
    pub fn save(&self) -> Result<()> {
        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir)?;
        let mut tmp = tempfile::NamedTempFile::new_in(&dir)?;
        tmp.write_all(serde_json::to_string_pretty(&self.recipes)?.as_bytes())?;
        tmp.flush()?;
        tmp.persist(&self.path).map_err(|e| e.error)?;
        tracing::debug!(path = %self.path.display(), favorites = self.recipes.len(), "saved favorites");
        Ok(())
    }
}

impl FavoriteSet for FavoritesStore {
    fn is_favorite(&self, id: RecipeId) -> bool { self.recipes.iter().any(|r| r.id == id) }
}
