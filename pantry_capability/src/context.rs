//! Per-request context.
//!
//! A request context carries the resolved principal and derives the
//! capability set at most once. Every check within the request reads the
//! same derived set, so a concurrent repository change cannot make two
//! checks in one request disagree.

use std::sync::{Arc, OnceLock};

use pantry_core::error::Result;

use crate::derive::CapabilityDeriver;
use crate::gate::AuthorizationGate;
use crate::model::Capability;
use crate::principal::Principal;
use crate::set::CapabilitySet;

/// The state a single request acts under.
pub struct RequestContext {
    principal: Principal,
    deriver: Arc<CapabilityDeriver>,
    derived: OnceLock<CapabilitySet>,
}

impl RequestContext {
    /// Create a context for a resolved principal.
    pub fn new(principal: Principal, deriver: Arc<CapabilityDeriver>) -> Self {
        Self {
            principal,
            deriver,
            derived: OnceLock::new(),
        }
    }

    /// The principal this request acts under.
    pub fn principal(&self) -> &Principal {
        &self.principal
    }

    /// The request's capability set, derived on first use.
    pub fn capabilities(&self) -> &CapabilitySet {
        self.derived
            .get_or_init(|| self.deriver.derive(&self.principal))
    }

    /// Require a capability for the operation in progress.
    pub fn require(&self, capability: &Capability) -> Result<()> {
        AuthorizationGate::require(self.capabilities(), capability)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, Utc};
    use pantry_core::{Category, Recipe, RecipeId, RecipeStatus, UserId};
    use pantry_store::{InMemoryRecipeRepository, RecipeRepository};

    use super::*;
    use crate::model::Role;

    fn recipe_owned_by(owner: &str) -> Recipe {
        Recipe {
            id: RecipeId::new(),
            title: "Gulaš".to_string(),
            description: String::new(),
            ingredients: "beef, onions, paprika".to_string(),
            instructions: "stew slowly".to_string(),
            category: Category::MainCourse,
            prep_time_minutes: Some(180),
            date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            status: RecipeStatus::Published,
            tags: vec![],
            owner: UserId::new(owner),
            image_id: None,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    #[test]
    fn test_derivation_happens_once_per_request() {
        let repo = Arc::new(InMemoryRecipeRepository::new());
        let recipe = recipe_owned_by("u1@example.com");
        let id = recipe.id;
        repo.insert(recipe).unwrap();

        let deriver = Arc::new(CapabilityDeriver::new(repo.clone()));
        let principal = Principal::authenticated(UserId::new("u1@example.com"), false, None);
        let ctx = RequestContext::new(principal, deriver);

        assert!(ctx.require(&Capability::EditRecipe(id)).is_ok());

        // The repository changes mid-request; the derived set does not.
        repo.delete(&id).unwrap();
        assert!(ctx.require(&Capability::EditRecipe(id)).is_ok());

        // A fresh request sees the new ownership facts.
        let principal = Principal::authenticated(UserId::new("u1@example.com"), false, None);
        let fresh = RequestContext::new(
            principal,
            Arc::new(CapabilityDeriver::new(repo)),
        );
        assert!(fresh.require(&Capability::EditRecipe(id)).is_err());
    }

    #[test]
    fn test_anonymous_context_denies() {
        let deriver = Arc::new(CapabilityDeriver::new(Arc::new(
            InMemoryRecipeRepository::new(),
        )));
        let ctx = RequestContext::new(Principal::Anonymous, deriver);

        assert!(ctx.capabilities().is_empty());
        assert!(ctx.require(&Capability::Role(Role::Author)).is_err());
    }
}
