//! Reading catalog records from disk.

use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

use crate::catalog::{Catalog, CatalogIndexer};
use crate::error::{Error, Result};

/// A catalog on disk: one JSON file, or a directory of them.
#[derive(Debug, Clone)]
pub struct CatalogSource {
    root: PathBuf,
}

impl CatalogSource {
    pub fn new(root: impl Into<PathBuf>) -> Self { Self { root: root.into() } }

    pub fn root(&self) -> &Path { &self.root }

    /// Files that make up the catalog, sorted by path.
    pub fn files(&self) -> Result<Vec<PathBuf>> {
        if self.root.is_file() {
            return Ok(vec![self.root.clone()]);
        }
        if !self.root.is_dir() {
            return Err(Error::NotFound(format!("catalog at {}", self.root.display())));
        }
        Ok(list_json_files(&self.root))
    }

    /// Records of a single file, which must hold a JSON array.
    pub fn read_file(&self, path: &Path) -> Result<Vec<Value>> {
        let content = fs::read_to_string(path)?;
        match serde_json::from_str::<Value>(&content)? {
            Value::Array(items) => {
                tracing::debug!(file = %path.display(), records = items.len(), "read catalog file");
                Ok(items)
            }
            _ => Err(Error::InvalidCatalog(format!("{} does not contain a JSON array", path.display()))),
        }
    }

    /// All records, concatenated in file order.
    pub fn read_all(&self) -> Result<Vec<Value>> {
        let mut records = Vec::new();
        for file in self.files()? {
            records.extend(self.read_file(&file)?);
        }
        Ok(records)
    }

    pub fn load(&self, indexer: &CatalogIndexer) -> Result<Catalog> {
        let records = self.read_all()?;
        tracing::info!(root = %self.root.display(), records = records.len(), "loading catalog");
        indexer.index_values(records)
    }
}

/// List all .json files under `root` recursively.
fn list_json_files(root: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = walkdir::WalkDir::new(root)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| p.extension().and_then(|s| s.to_str()) == Some("json"))
        .collect();
    files.sort();
    files
}
