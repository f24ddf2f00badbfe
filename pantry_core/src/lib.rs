//! # Pantry Core
//!
//! `pantry_core` provides the shared vocabulary of the Pantry recipe
//! service: strongly-typed identifiers, the domain records held by the
//! credential store and the recipe repository, and the error hierarchy
//! used across the workspace.
//!
//! Key concepts:
//!
//! 1. **UserId**: users are keyed by their email address; the principal's
//!    identity is the address itself.
//!
//! 2. **Typed ids**: recipes, images, and sessions use UUID-backed ids
//!    that cannot be confused with one another.
//!
//! 3. **Ownership**: every recipe records the user that created it;
//!    ownership never changes after creation.

pub mod error;
pub mod id;
pub mod types;

pub use error::{Error, Result};
pub use id::{ImageId, RecipeId, SessionId, UserId};
pub use types::{Category, ProfileUpdate, Recipe, RecipeStatus, UserRecord};
