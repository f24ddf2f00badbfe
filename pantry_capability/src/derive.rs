//! Capability derivation.
//!
//! On each request the deriver rebuilds the principal's full capability
//! set from persisted ground truth: role flags on the user record and
//! ownership facts in the recipe repository. Nothing is cached across
//! requests, so the set always matches the repository at derivation time.

use std::sync::Arc;

use tracing::warn;

use pantry_store::RecipeRepository;

use crate::model::{Capability, Role};
use crate::principal::Principal;
use crate::set::CapabilitySet;

/// Derives the capability set for a principal.
pub struct CapabilityDeriver {
    repository: Arc<dyn RecipeRepository>,
}

impl CapabilityDeriver {
    /// Create a new deriver over the given recipe repository.
    pub fn new(repository: Arc<dyn RecipeRepository>) -> Self {
        Self { repository }
    }

    /// Compute the full capability set for a principal.
    ///
    /// Rules:
    ///
    /// 1. An anonymous principal holds nothing.
    /// 2. Every authenticated principal holds `role:author`.
    /// 3. An admin additionally holds `role:admin`.
    /// 4. For each recipe the principal owns, they hold
    ///    `edit-recipe:<id>`.
    ///
    /// A recipe record carrying a nil id is skipped with a warning; a
    /// repository failure collapses the whole derivation to the empty set.
    /// Given unchanged repository state the result is a pure function of
    /// the principal.
    pub fn derive(&self, principal: &Principal) -> CapabilitySet {
        let user = match principal {
            Principal::Anonymous => return CapabilitySet::empty(),
            Principal::Authenticated(user) => user,
        };

        let mut capabilities = CapabilitySet::empty();
        capabilities.insert(Capability::Role(Role::Author));
        if user.is_admin {
            capabilities.insert(Capability::Role(Role::Admin));
        }

        let owned = match self.repository.find_by_owner(&user.id) {
            Ok(owned) => owned,
            Err(err) => {
                warn!(
                    principal = %user.id,
                    error = %err,
                    "recipe repository unavailable during derivation, granting nothing"
                );
                return CapabilitySet::empty();
            }
        };

        for recipe in owned {
            if recipe.id.is_nil() {
                warn!(
                    principal = %user.id,
                    title = %recipe.title,
                    "recipe record without an id, skipping"
                );
                continue;
            }
            capabilities.insert(Capability::EditRecipe(recipe.id));
        }

        capabilities
    }
}
