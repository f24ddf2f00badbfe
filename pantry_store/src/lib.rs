//! # Pantry Store
//!
//! `pantry_store` provides the storage seams of the Pantry service: the
//! credential store, the recipe repository, and the image store, each as
//! a trait with an in-memory implementation.
//!
//! The traits are deliberately narrow: they are the only interfaces the
//! capability core depends on, so a database-backed implementation can be
//! swapped in without touching derivation or enforcement.

pub mod credentials;
pub mod images;
pub mod recipes;

pub use credentials::{CredentialStore, InMemoryCredentialStore};
pub use images::{ImageStore, InMemoryImageStore, StoredImage};
pub use recipes::{InMemoryRecipeRepository, RecipeRepository};
