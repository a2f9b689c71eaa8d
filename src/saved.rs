use std::collections::HashSet;

use crate::errors::InvariantViolation;
use crate::recipe::{Recipe, RecipeId};

/// User-curated recipes, unique by [`RecipeId`] and kept in insertion order.
#[derive(Debug, Clone, Default)]
pub struct SavedRecipeSet {
    recipes: Vec<Recipe>,
    ids: HashSet<RecipeId>,
}

impl SavedRecipeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts every recipe whose id is not yet saved. A later copy of an
    /// already-saved id is skipped even if its fields differ.
    pub fn add_all(&mut self, recipes: impl IntoIterator<Item = Recipe>) -> usize {
        let mut added = 0;
        for recipe in recipes {
            if self.ids.insert(recipe.id()) {
                self.recipes.push(recipe);
                added += 1;
            }
        }
        added
    }

    pub fn remove(&mut self, id: RecipeId) -> bool {
        if !self.ids.remove(&id) {
            return false;
        }
        self.recipes.retain(|r| r.id() != id);
        true
    }

    pub fn clear(&mut self) {
        self.recipes.clear();
        self.ids.clear();
    }

    pub fn as_slice(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    /// Ingredients missing from the pantry across all saved recipes,
    /// deduplicated case-insensitively in first-seen order.
    pub fn shopping_list(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.recipes
            .iter()
            .flat_map(|r| r.missed_ingredients())
            .filter(|item| seen.insert(item.trim().to_lowercase()))
            .cloned()
            .collect()
    }

    pub fn check_unique(&self) -> Result<(), InvariantViolation> {
        let mut seen = HashSet::with_capacity(self.recipes.len());
        for recipe in &self.recipes {
            if !seen.insert(recipe.id()) {
                return Err(InvariantViolation::DuplicateSavedRecipe(recipe.id()));
            }
        }
        Ok(())
    }
}
