use serde::{Deserialize, Serialize};

/// Ingredients the user has picked, in pick order, without duplicates.
///
/// Entries are stored trimmed and lowercased; searching never clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    items: Vec<String>,
}

impl Selection {
    pub fn new() -> Self { Self::default() }

    /// Returns false when the ingredient was blank or already selected.
    pub fn add(&mut self, ingredient: &str) -> bool {
        let canonical = ingredient.trim().to_lowercase();
        if canonical.is_empty() || self.items.contains(&canonical) {
            return false;
        }
        self.items.push(canonical);
        true
    }

    pub fn remove(&mut self, ingredient: &str) -> bool {
        let canonical = ingredient.trim().to_lowercase();
        let before = self.items.len();
        self.items.retain(|i| *i != canonical);
        self.items.len() != before
    }

    /// Add when absent, remove when present. Returns true when now selected.
    pub fn toggle(&mut self, ingredient: &str) -> bool {
        if self.contains(ingredient) {
            self.remove(ingredient);
            false
        } else {
            self.add(ingredient)
        }
    }

    pub fn clear(&mut self) { self.items.clear(); }

    pub fn contains(&self, ingredient: &str) -> bool {
        let canonical = ingredient.trim().to_lowercase();
        self.items.iter().any(|i| *i == canonical)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> { self.items.iter().map(String::as_str) }

    pub fn len(&self) -> usize { self.items.len() }

    pub fn is_empty(&self) -> bool { self.items.is_empty() }
}

impl<S: AsRef<str>> FromIterator<S> for Selection {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut selection = Self::new();
        for ingredient in iter {
            selection.add(ingredient.as_ref());
        }
        selection
    }
}
