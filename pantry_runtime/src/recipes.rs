//! Recipe operations.
//!
//! Reads are public; every mutation is gated on the request's derived
//! capability set before anything is written. The edit capability is
//! always constructed from the id of the target recipe, never from
//! anything the client claims about itself.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use tracing::{debug, info};

use pantry_capability::{Capability, RequestContext, Role};
use pantry_core::error::{RecipeError, Result};
use pantry_core::{Category, ImageId, Recipe, RecipeId, RecipeStatus};
use pantry_store::{ImageStore, RecipeRepository};

use crate::account::principal_owner;

/// Fields a caller supplies when creating or editing a recipe.
#[derive(Debug, Clone)]
pub struct RecipeDraft {
    pub title: String,
    pub description: String,
    pub ingredients: String,
    pub instructions: String,
    pub category: Category,
    pub prep_time_minutes: Option<u32>,
    /// Filing date; defaults to today.
    pub date: Option<NaiveDate>,
    pub status: RecipeStatus,
    pub tags: Vec<String>,
}

/// Recipe CRUD behind the authorization gate.
pub struct RecipeService {
    recipes: Arc<dyn RecipeRepository>,
    images: Arc<dyn ImageStore>,
}

impl RecipeService {
    /// Create the recipe service.
    pub fn new(recipes: Arc<dyn RecipeRepository>, images: Arc<dyn ImageStore>) -> Self {
        Self { recipes, images }
    }

    /// Create a recipe owned by the current principal.
    pub fn create(&self, ctx: &RequestContext, draft: RecipeDraft) -> Result<Recipe> {
        ctx.require(&Capability::Role(Role::Author))?;
        let owner = principal_owner(ctx.principal())?;

        let recipe = Recipe {
            id: RecipeId::new(),
            title: draft.title,
            description: draft.description,
            ingredients: draft.ingredients,
            instructions: draft.instructions,
            category: draft.category,
            prep_time_minutes: draft.prep_time_minutes,
            date: draft.date.unwrap_or_else(|| Utc::now().date_naive()),
            status: draft.status,
            tags: draft.tags,
            owner,
            image_id: None,
            created_at: Utc::now(),
            updated_at: None,
        };
        self.recipes.insert(recipe.clone())?;
        info!(recipe = %recipe.id, owner = %recipe.owner, "recipe created");
        Ok(recipe)
    }

    /// Fetch a recipe by id.
    pub fn get(&self, id: &RecipeId) -> Result<Recipe> {
        self.recipes
            .find_by_id(id)?
            .ok_or_else(|| RecipeError::NotFound(*id).into())
    }

    /// List published recipes, newest filing date first.
    pub fn list_published(&self) -> Result<Vec<Recipe>> {
        self.recipes.list_published()
    }

    /// List the current principal's recipes, newest filing date first.
    pub fn list_mine(&self, ctx: &RequestContext) -> Result<Vec<Recipe>> {
        ctx.require(&Capability::Role(Role::Author))?;
        let owner = principal_owner(ctx.principal())?;
        let mut mine = self.recipes.find_by_owner(&owner)?;
        mine.sort_by(|a, b| b.date.cmp(&a.date).then(b.created_at.cmp(&a.created_at)));
        Ok(mine)
    }

    /// Replace a recipe's editable fields.
    ///
    /// Ownership, creation time, and the attached image survive the
    /// update untouched.
    pub fn update(&self, ctx: &RequestContext, id: &RecipeId, draft: RecipeDraft) -> Result<Recipe> {
        let existing = self.get(id)?;
        ctx.require(&Capability::EditRecipe(*id))?;

        let updated = Recipe {
            id: existing.id,
            title: draft.title,
            description: draft.description,
            ingredients: draft.ingredients,
            instructions: draft.instructions,
            category: draft.category,
            prep_time_minutes: draft.prep_time_minutes,
            date: draft.date.unwrap_or(existing.date),
            status: draft.status,
            tags: draft.tags,
            owner: existing.owner,
            image_id: existing.image_id,
            created_at: existing.created_at,
            updated_at: Some(Utc::now()),
        };
        self.recipes.update(updated.clone())?;
        info!(recipe = %id, "recipe updated");
        Ok(updated)
    }

    /// Delete a recipe and its attached image.
    pub fn delete(&self, ctx: &RequestContext, id: &RecipeId) -> Result<()> {
        ctx.require(&Capability::EditRecipe(*id))?;

        let image = self.recipes.find_by_id(id)?.and_then(|r| r.image_id);
        self.recipes.delete(id)?;
        if let Some(image) = image {
            if let Err(err) = self.images.delete(&image) {
                debug!(image = %image, error = %err, "attached image already gone");
            }
        }
        info!(recipe = %id, "recipe deleted");
        Ok(())
    }

    /// Attach a photo to a recipe, replacing any previous one.
    pub fn attach_image(
        &self,
        ctx: &RequestContext,
        id: &RecipeId,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<ImageId> {
        let existing = self.get(id)?;
        ctx.require(&Capability::EditRecipe(*id))?;

        let image_id = self.images.put(bytes, content_type)?;
        let previous = existing.image_id;
        let updated = Recipe {
            image_id: Some(image_id),
            updated_at: Some(Utc::now()),
            ..existing
        };
        self.recipes.update(updated)?;
        if let Some(previous) = previous {
            if let Err(err) = self.images.delete(&previous) {
                debug!(image = %previous, error = %err, "previous image already gone");
            }
        }
        info!(recipe = %id, image = %image_id, "image attached");
        Ok(image_id)
    }
}
