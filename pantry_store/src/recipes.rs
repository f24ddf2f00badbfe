//! Recipe repository.
//!
//! Recipes are owned by exactly one user; `find_by_owner` returns the
//! complete ownership set because capability derivation depends on it.

use std::sync::Arc;

use dashmap::DashMap;

use pantry_core::error::{RecipeError, Result};
use pantry_core::{Recipe, RecipeId, RecipeStatus, UserId};

/// Trait for recipe storage.
pub trait RecipeRepository: Send + Sync {
    /// Look up a recipe by id.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(Recipe))` - The recipe, if present.
    /// * `Ok(None)` - If no recipe has the given id.
    /// * `Err` - If the repository could not be queried.
    fn find_by_id(&self, id: &RecipeId) -> Result<Option<Recipe>>;

    /// List every recipe owned by the given user.
    ///
    /// The full set is returned without pagination; callers deriving
    /// capabilities require all of it.
    fn find_by_owner(&self, owner: &UserId) -> Result<Vec<Recipe>>;

    /// Insert a new recipe.
    fn insert(&self, recipe: Recipe) -> Result<()>;

    /// Replace an existing recipe.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - If the recipe was replaced.
    /// * `Err` - If no recipe with that id exists.
    fn update(&self, recipe: Recipe) -> Result<()>;

    /// Delete a recipe by id.
    fn delete(&self, id: &RecipeId) -> Result<()>;

    /// List published recipes, newest filing date first.
    fn list_published(&self) -> Result<Vec<Recipe>>;
}

/// An in-memory recipe repository.
#[derive(Clone, Default)]
pub struct InMemoryRecipeRepository {
    recipes: Arc<DashMap<RecipeId, Recipe>>,
}

impl InMemoryRecipeRepository {
    /// Create a new in-memory recipe repository.
    pub fn new() -> Self {
        Self {
            recipes: Arc::new(DashMap::new()),
        }
    }
}

fn newest_first(recipes: &mut [Recipe]) {
    recipes.sort_by(|a, b| b.date.cmp(&a.date).then(b.created_at.cmp(&a.created_at)));
}

impl RecipeRepository for InMemoryRecipeRepository {
    fn find_by_id(&self, id: &RecipeId) -> Result<Option<Recipe>> {
        Ok(self.recipes.get(id).map(|entry| entry.value().clone()))
    }

    fn find_by_owner(&self, owner: &UserId) -> Result<Vec<Recipe>> {
        let owned = self
            .recipes
            .iter()
            .filter(|entry| &entry.owner == owner)
            .map(|entry| entry.value().clone())
            .collect();
        Ok(owned)
    }

    fn insert(&self, recipe: Recipe) -> Result<()> {
        self.recipes.insert(recipe.id, recipe);
        Ok(())
    }

    fn update(&self, recipe: Recipe) -> Result<()> {
        if !self.recipes.contains_key(&recipe.id) {
            return Err(RecipeError::NotFound(recipe.id).into());
        }
        self.recipes.insert(recipe.id, recipe);
        Ok(())
    }

    fn delete(&self, id: &RecipeId) -> Result<()> {
        if self.recipes.remove(id).is_none() {
            return Err(RecipeError::NotFound(*id).into());
        }
        Ok(())
    }

    fn list_published(&self) -> Result<Vec<Recipe>> {
        let mut published: Vec<Recipe> = self
            .recipes
            .iter()
            .filter(|entry| entry.status == RecipeStatus::Published)
            .map(|entry| entry.value().clone())
            .collect();
        newest_first(&mut published);
        Ok(published)
    }
}
