//! Domain types shared by the indexer, the match engine and the recognition boundary.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

pub type RecipeId = u64;

/// Dietary tags the catalog is expected to use. Anything else is kept but logged.
pub const KNOWN_DIETARY_TAGS: &[&str] = &[
    "vegan",
    "vegetarian",
    "gluten-free",
    "dairy-free",
    "nut-free",
    "low-carb",
    "keto",
    "paleo",
    "pescatarian",
    "halal",
    "kosher",
];

/// A dietary tag in canonical form: lowercase, words joined by `-`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct DietaryTag(String);

impl DietaryTag {
    pub fn new(raw: &str) -> Self {
        let folded: String = raw
            .trim()
            .to_lowercase()
            .chars()
            .map(|c| if c == '_' || c.is_whitespace() { '-' } else { c })
            .collect();
        Self(folded)
    }

    pub fn as_str(&self) -> &str { &self.0 }

    pub fn is_known(&self) -> bool { KNOWN_DIETARY_TAGS.contains(&self.0.as_str()) }
}

impl<'de> Deserialize<'de> for DietaryTag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::new(&raw))
    }
}

impl fmt::Display for DietaryTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
}

impl From<&str> for DietaryTag {
    fn from(raw: &str) -> Self { Self::new(raw) }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl<'de> Deserialize<'de> for Difficulty {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        match raw.trim().to_lowercase().as_str() {
            "easy" => Ok(Self::Easy),
            "medium" => Ok(Self::Medium),
            "hard" => Ok(Self::Hard),
            other => Err(serde::de::Error::custom(format!("unknown difficulty '{other}'"))),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self { Self::Easy => "easy", Self::Medium => "medium", Self::Hard => "hard" };
        f.write_str(s)
    }
}

/// Pre-supplied nutrition values. Negative values make a record malformed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Nutrition {
    #[serde(default)]
    pub calories: f64,
    #[serde(default)]
    pub protein: f64,
    #[serde(default)]
    pub fat: f64,
    #[serde(default)]
    pub carbs: f64,
}

impl Nutrition {
    /// Name of the first negative field, if any.
    pub fn first_negative(&self) -> Option<&'static str> {
        [("calories", self.calories), ("protein", self.protein), ("fat", self.fat), ("carbs", self.carbs)]
            .into_iter()
            .find(|(_, v)| *v < 0.0 || v.is_nan())
            .map(|(name, _)| name)
    }
}

/// A catalog record as authored, before indexing.
///
/// Only `id` and `ingredients` are required; the rest default so that a sparse
/// record is still searchable. Optional fields accept an explicit `null` as well as being absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawRecipe {
    pub id: RecipeId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    pub ingredients: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub steps: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub time: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub servings: u32,
    #[serde(default)]
    pub difficulty: Option<Difficulty>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub dietary: Vec<DietaryTag>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub nutrition: Nutrition,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// An indexed recipe. Immutable once the catalog is built.
///
/// - `ingredients`: canonical (normalized) ingredient strings, never empty
/// - `image`: deterministic illustrative image reference
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: RecipeId,
    pub name: String,
    pub ingredients: Vec<String>,
    pub steps: Vec<String>,
    #[serde(rename = "time")]
    pub time_minutes: u32,
    pub servings: u32,
    pub difficulty: Option<Difficulty>,
    pub dietary: Vec<DietaryTag>,
    pub nutrition: Nutrition,
    pub image: String,
}

impl Recipe {
    pub fn has_tag(&self, tag: &DietaryTag) -> bool { self.dietary.iter().any(|t| t == tag) }
}

/// How a selected ingredient is compared against a recipe's ingredients.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Either string contains the other.
    #[default]
    Containment,
    /// Equal strings only.
    Exact,
}

/// What the match engine returns for a search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Recipes at or above `search.min_accuracy`, in catalog order.
    #[default]
    Threshold,
    /// Every recipe with at least one match, most matches first.
    Ranked,
}
