//! Scoring recipes against a selection.

use larder_core::config::SearchSettings;
use larder_core::traits::FavoriteSet;
use larder_core::{Catalog, DietaryTag, Error, MatchMode, Recipe, Result, Strategy};

use crate::selection::Selection;

/// Tags a recipe must all carry to be returned.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DietaryFilter {
    required: Vec<DietaryTag>,
}

impl DietaryFilter {
    pub fn none() -> Self { Self::default() }

    pub fn is_empty(&self) -> bool { self.required.is_empty() }

    pub fn tags(&self) -> &[DietaryTag] { &self.required }

    pub fn accepts(&self, recipe: &Recipe) -> bool { self.required.iter().all(|tag| recipe.has_tag(tag)) }
}

impl<S: AsRef<str>> FromIterator<S> for DietaryFilter {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut required: Vec<DietaryTag> = Vec::new();
        for raw in iter {
            let tag = DietaryTag::new(raw.as_ref());
            if !tag.as_str().is_empty() && !required.contains(&tag) {
                required.push(tag);
            }
        }
        Self { required }
    }
}

/// A recipe paired with how well it covers the selection.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult<'a> {
    pub recipe: &'a Recipe,
    /// Selected ingredients found in the recipe.
    pub matched: usize,
    /// `100 * matched / selection size`.
    pub accuracy: f64,
    pub favorite: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchEngine {
    mode: MatchMode,
    strategy: Strategy,
    min_accuracy: f64,
}

impl Default for MatchEngine {
    fn default() -> Self { Self { mode: MatchMode::Containment, strategy: Strategy::Threshold, min_accuracy: 50.0 } }
}

impl MatchEngine {
    pub fn new() -> Self { Self::default() }

    pub fn from_settings(settings: &SearchSettings) -> Result<Self> {
        Self::new().with_mode(settings.match_mode).with_strategy(settings.strategy).with_min_accuracy(settings.min_accuracy)
    }

    pub fn with_mode(mut self, mode: MatchMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_min_accuracy(mut self, min_accuracy: f64) -> Result<Self> {
        if !(0.0..=100.0).contains(&min_accuracy) {
            return Err(Error::InvalidConfig(format!("min_accuracy must be within 0..=100, got {min_accuracy}")));
        }
        self.min_accuracy = min_accuracy;
        Ok(self)
    }

    pub fn mode(&self) -> MatchMode { self.mode }

    pub fn strategy(&self) -> Strategy { self.strategy }

    pub fn min_accuracy(&self) -> f64 { self.min_accuracy }

    /// Whether a selected ingredient is satisfied by one recipe ingredient.
    pub fn ingredient_matches(&self, selected: &str, recipe_ingredient: &str) -> bool {
        let selected = selected.to_lowercase();
        let recipe_ingredient = recipe_ingredient.to_lowercase();
        match self.mode {
            MatchMode::Exact => selected == recipe_ingredient,
            MatchMode::Containment => recipe_ingredient.contains(&selected) || selected.contains(&recipe_ingredient),
        }
    }

    /// `(matched, accuracy)` of `recipe` for `selection`. An empty selection scores zero.
    pub fn score(&self, recipe: &Recipe, selection: &Selection) -> (usize, f64) {
        if selection.is_empty() {
            return (0, 0.0);
        }
        let matched = selection
            .iter()
            .filter(|s| recipe.ingredients.iter().any(|r| self.ingredient_matches(s, r)))
            .count();
        (matched, 100.0 * matched as f64 / selection.len() as f64)
    }

    /// Recipes for `selection` that pass `filter`.
    ///
    /// Threshold keeps catalog order; Ranked sorts by `matched`, ties in
    /// catalog order.
    pub fn search<'a>(&self, catalog: &'a Catalog, selection: &Selection, filter: &DietaryFilter) -> Result<Vec<MatchResult<'a>>> {
        if selection.is_empty() {
            return Err(Error::EmptySelection);
        }
        let mut results: Vec<MatchResult<'a>> = catalog
            .recipes()
            .iter()
            .filter(|recipe| filter.accepts(recipe))
            .filter_map(|recipe| {
                let (matched, accuracy) = self.score(recipe, selection);
                let keep = match self.strategy {
                    Strategy::Threshold => accuracy >= self.min_accuracy,
                    Strategy::Ranked => matched > 0,
                };
                keep.then_some(MatchResult { recipe, matched, accuracy, favorite: false })
            })
            .collect();
        if self.strategy == Strategy::Ranked {
            results.sort_by(|a, b| b.matched.cmp(&a.matched));
        }
        tracing::debug!(
            selected = selection.len(),
            diet = filter.tags().len(),
            strategy = ?self.strategy,
            mode = ?self.mode,
            results = results.len(),
            "search complete"
        );
        Ok(results)
    }
}

/// Flag results whose recipe is in `favorites`.
pub fn mark_favorites<F: FavoriteSet + ?Sized>(results: &mut [MatchResult<'_>], favorites: &F) {
    for result in results {
        result.favorite = favorites.is_favorite(result.recipe.id);
    }
}
