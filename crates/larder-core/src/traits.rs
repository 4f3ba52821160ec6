use crate::types::RecipeId;

/// Membership predicate for favorited recipes.
pub trait FavoriteSet: Send + Sync {
    fn is_favorite(&self, id: RecipeId) -> bool;
}

impl FavoriteSet for std::collections::HashSet<RecipeId> {
    fn is_favorite(&self, id: RecipeId) -> bool { self.contains(&id) }
}
