//! The capability model.
//!
//! A capability is a (kind, scope) pair: either a role that applies
//! globally, or the right to edit one identified recipe. The universe is
//! closed, so capabilities are a plain enum rather than trait objects.

use std::fmt;

use serde::{Deserialize, Serialize};

use pantry_core::RecipeId;

/// Coarse role granted to a principal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Every authenticated user is an author.
    Author,

    /// Administrators; may manage users and bypass ownership checks.
    Admin,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Author => write!(f, "author"),
            Self::Admin => write!(f, "admin"),
        }
    }
}

/// An atomic granted permission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Capability {
    /// A global role.
    Role(Role),

    /// The right to edit (and delete) one specific recipe.
    EditRecipe(RecipeId),
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Role(role) => write!(f, "role:{}", role),
            Self::EditRecipe(id) => write!(f, "edit-recipe:{}", id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Capability::Role(Role::Admin).to_string(), "role:admin");
        assert_eq!(Capability::Role(Role::Author).to_string(), "role:author");

        let id = RecipeId::new();
        assert_eq!(
            Capability::EditRecipe(id).to_string(),
            format!("edit-recipe:{}", id)
        );
    }

    #[test]
    fn test_scoped_capabilities_are_distinct() {
        let a = Capability::EditRecipe(RecipeId::new());
        let b = Capability::EditRecipe(RecipeId::new());
        assert_ne!(a, b);
    }
}
