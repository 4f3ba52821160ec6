//! Catalog indexing: raw records in, enriched recipes and an ingredient vocabulary out.

use serde_json::Value;
use std::collections::HashSet;
use std::hash::{Hash, Hasher};
use twox_hash::XxHash64;

use crate::error::{Error, MalformedRecipe, Result};
use crate::images::assign_image;
use crate::normalize::normalize;
use crate::types::{RawRecipe, Recipe, RecipeId};

/// Distinct canonical ingredients across a catalog.
///
/// Built by the indexer only. Iteration follows first appearance in the
/// catalog; `sorted()` gives the display order.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    ordered: Vec<String>,
    members: HashSet<String>,
}

impl Vocabulary {
    fn insert(&mut self, ingredient: &str) {
        if ingredient.is_empty() || self.members.contains(ingredient) { return; }
        self.members.insert(ingredient.to_string());
        self.ordered.push(ingredient.to_string());
    }

    pub fn len(&self) -> usize { self.ordered.len() }

    pub fn is_empty(&self) -> bool { self.ordered.is_empty() }

    /// Membership after trimming and lowercasing, the way typed input is compared.
    pub fn contains(&self, ingredient: &str) -> bool { self.members.contains(ingredient.trim().to_lowercase().as_str()) }

    pub fn iter(&self) -> impl Iterator<Item = &str> { self.ordered.iter().map(String::as_str) }

    pub fn sorted(&self) -> Vec<&str> {
        let mut out: Vec<&str> = self.iter().collect();
        out.sort_unstable();
        out
    }

    /// Autocomplete: entries containing `query` that `is_selected` rejects, first `limit` in catalog order.
    pub fn suggest<F>(&self, query: &str, is_selected: F, limit: usize) -> Vec<&str>
    where
        F: Fn(&str) -> bool,
    {
        let query = query.trim().to_lowercase();
        if query.is_empty() { return Vec::new(); }
        self.iter().filter(|ing| ing.contains(&query) && !is_selected(*ing)).take(limit).collect()
    }
}

/// An indexed catalog. Owns its recipes and the vocabulary derived from them.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    recipes: Vec<Recipe>,
    vocabulary: Vocabulary,
    skipped: Vec<MalformedRecipe>,
}

impl Catalog {
    pub fn recipes(&self) -> &[Recipe] { &self.recipes }

    pub fn vocabulary(&self) -> &Vocabulary { &self.vocabulary }

    /// Records dropped during indexing, in input order.
    pub fn skipped(&self) -> &[MalformedRecipe] { &self.skipped }

    pub fn len(&self) -> usize { self.recipes.len() }

    pub fn is_empty(&self) -> bool { self.recipes.is_empty() }

    pub fn get(&self, id: RecipeId) -> Option<&Recipe> { self.recipes.iter().find(|r| r.id == id) }

    /// Content hash over ids, names, ingredients and images. Equal catalogs hash equal.
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = XxHash64::with_seed(0);
        for r in &self.recipes {
            r.id.hash(&mut hasher);
            r.name.hash(&mut hasher);
            r.ingredients.hash(&mut hasher);
            r.image.hash(&mut hasher);
        }
        hasher.finish()
    }
}

/// Builds a [`Catalog`] from raw records.
///
/// By default malformed records are skipped and kept on the catalog for
/// reporting; `strict` turns the first one into an error.
#[derive(Debug, Clone, Default)]
pub struct CatalogIndexer {
    strict: bool,
}

impl CatalogIndexer {
    pub fn new() -> Self { Self::default() }

    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Index a JSON document that must be a non-empty array of recipe records.
    pub fn index_json(&self, json: &str) -> Result<Catalog> {
        let value: Value = serde_json::from_str(json)?;
        match value {
            Value::Array(items) => self.index_values(items),
            other => Err(Error::InvalidCatalog(format!("expected an array of recipes, found {}", json_kind(&other)))),
        }
    }

    /// Index loosely-typed records; each one is validated on its own.
    pub fn index_values(&self, items: Vec<Value>) -> Result<Catalog> {
        if items.is_empty() {
            return Err(Error::InvalidCatalog("catalog is empty".to_string()));
        }
        let mut parsed = Vec::with_capacity(items.len());
        let mut skipped = Vec::new();
        for (position, item) in items.into_iter().enumerate() {
            let id = item.get("id").and_then(Value::as_u64);
            match serde_json::from_value::<RawRecipe>(item) {
                Ok(raw) => parsed.push((position, raw)),
                Err(e) => self.reject(&mut skipped, MalformedRecipe { position, id, reason: e.to_string() })?,
            }
        }
        self.build(parsed, skipped)
    }

    /// Index already-typed records.
    pub fn index(&self, raw: Vec<RawRecipe>) -> Result<Catalog> {
        if raw.is_empty() {
            return Err(Error::InvalidCatalog("catalog is empty".to_string()));
        }
        self.build(raw.into_iter().enumerate().collect(), Vec::new())
    }

    fn build(&self, parsed: Vec<(usize, RawRecipe)>, mut skipped: Vec<MalformedRecipe>) -> Result<Catalog> {
        let mut recipes = Vec::with_capacity(parsed.len());
        let mut vocabulary = Vocabulary::default();
        let mut seen_ids = HashSet::new();

        for (position, raw) in parsed {
            let recipe = match enrich(&raw) {
                Ok(recipe) => recipe,
                Err(reason) => {
                    self.reject(&mut skipped, MalformedRecipe { position, id: Some(raw.id), reason })?;
                    continue;
                }
            };
            if !seen_ids.insert(recipe.id) {
                let reason = format!("duplicate id {}", recipe.id);
                self.reject(&mut skipped, MalformedRecipe { position, id: Some(recipe.id), reason })?;
                continue;
            }
            for tag in recipe.dietary.iter().filter(|t| !t.is_known()) {
                tracing::warn!(recipe = recipe.id, tag = %tag, "unknown dietary tag kept as-is");
            }
            for ingredient in &recipe.ingredients { vocabulary.insert(ingredient); }
            tracing::debug!(recipe = recipe.id, ingredients = recipe.ingredients.len(), image = %recipe.image, "indexed recipe");
            recipes.push(recipe);
        }

        skipped.sort_by_key(|m| m.position);
        if recipes.is_empty() {
            return Err(Error::InvalidCatalog(format!("none of the {} records could be indexed", skipped.len())));
        }
        tracing::info!(recipes = recipes.len(), vocabulary = vocabulary.len(), skipped = skipped.len(), "catalog indexed");
        Ok(Catalog { recipes, vocabulary, skipped })
    }

    fn reject(&self, skipped: &mut Vec<MalformedRecipe>, malformed: MalformedRecipe) -> Result<()> {
        if self.strict { return Err(malformed.into()); }
        tracing::warn!("{malformed}; skipping");
        skipped.push(malformed);
        Ok(())
    }
}

/// Turn one raw record into a recipe, or say why it cannot be one.
fn enrich(raw: &RawRecipe) -> std::result::Result<Recipe, String> {
    if let Some(field) = raw.nutrition.first_negative() {
        return Err(format!("negative nutrition value for {field}"));
    }
    let ingredients: Vec<String> = raw
        .ingredients
        .iter()
        .filter_map(|ingredient| {
            let lowered = ingredient.to_lowercase();
            let cleaned = normalize(&lowered);
            let canonical = if cleaned.is_empty() { lowered.trim().to_string() } else { cleaned };
            (!canonical.is_empty()).then_some(canonical)
        })
        .collect();
    if ingredients.is_empty() {
        return Err("no ingredients".to_string());
    }

    let (image, source) = assign_image(raw.id, &raw.name, &raw.ingredients);
    tracing::debug!(recipe = raw.id, ?source, "image assigned");

    Ok(Recipe {
        id: raw.id,
        name: clean_name(&raw.name),
        ingredients,
        steps: raw.steps.clone(),
        time_minutes: raw.time,
        servings: raw.servings,
        difficulty: raw.difficulty,
        dietary: raw.dietary.clone(),
        nutrition: raw.nutrition,
        image,
    })
}

/// Names authored as "3 Bean Chili" lose their leading number.
fn clean_name(name: &str) -> String {
    if name.starts_with(|c: char| c.is_ascii_digit()) {
        name.trim_start_matches(|c: char| c.is_ascii_digit()).trim().to_string()
    } else {
        name.to_string()
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leading_digits_removed_from_names() {
        assert_eq!(clean_name("3 Bean Chili"), "Bean Chili");
        assert_eq!(clean_name("Chili 3 Ways"), "Chili 3 Ways");
    }

    #[test]
    fn suggestions_respect_selection_and_limit() {
        let mut v = Vocabulary::default();
        for i in ["chicken", "chickpeas", "rice", "chicken stock"] { v.insert(i); }
        let picked = v.suggest(" CHICK", |i| i == "chickpeas", 10);
        assert_eq!(picked, vec!["chicken", "chicken stock"]);
        assert_eq!(v.suggest("chick", |_| false, 1), vec!["chicken"]);
        assert!(v.suggest("   ", |_| false, 10).is_empty());
    }
}
