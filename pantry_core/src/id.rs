//! Strongly-typed identifiers for the Pantry service.
//!
//! This module provides a set of identifier types that are used throughout
//! the system, ensuring type safety and clear semantics.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A type-safe identifier based on UUID.
///
/// The marker parameter only distinguishes id types from one another, so
/// the usual traits are implemented by hand rather than derived; derives
/// would demand the marker itself implement them.
#[derive(Serialize, Deserialize)]
#[serde(transparent, bound = "")]
pub struct Id<T> {
    uuid: Uuid,
    #[serde(skip)]
    _marker: PhantomData<T>,
}

impl<T> Id<T> {
    /// Create a new random identifier.
    pub fn new() -> Self {
        Self {
            uuid: Uuid::new_v4(),
            _marker: PhantomData,
        }
    }

    /// Create an identifier from a specific UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self {
            uuid,
            _marker: PhantomData,
        }
    }

    /// Get the underlying UUID.
    pub fn uuid(&self) -> Uuid {
        self.uuid
    }

    /// Create a nil (all zeros) identifier.
    ///
    /// A nil id marks a record that lost its identifier somewhere along
    /// the way; readers are expected to treat such records as damaged.
    pub fn nil() -> Self {
        Self {
            uuid: Uuid::nil(),
            _marker: PhantomData,
        }
    }

    /// Whether this is the nil identifier.
    pub fn is_nil(&self) -> bool {
        self.uuid.is_nil()
    }
}

impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Id<T> {}

impl<T> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.uuid == other.uuid
    }
}

impl<T> Eq for Id<T> {}

impl<T> Hash for Id<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.uuid.hash(state);
    }
}

impl<T> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.uuid)
    }
}

impl<T> Default for Id<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.uuid)
    }
}

impl<T> FromStr for Id<T> {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self {
            uuid: Uuid::parse_str(s)?,
            _marker: PhantomData,
        })
    }
}

/// Marker type for recipes.
pub struct RecipeMarker;
/// Identifier for a recipe.
pub type RecipeId = Id<RecipeMarker>;

/// Marker type for stored images.
pub struct ImageMarker;
/// Identifier for a stored image.
pub type ImageId = Id<ImageMarker>;

/// Marker type for sessions.
pub struct SessionMarker;
/// Identifier for a login session; doubles as the opaque session token.
pub type SessionId = Id<SessionMarker>;

/// Identifier for a user: their email address.
///
/// The credential store keys users by address, and recipe ownership is
/// recorded against it, so the address is the identity.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Create a user id from an email address.
    pub fn new(email: impl Into<String>) -> Self {
        Self(email.into())
    }

    /// The email address as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for UserId {
    fn from(email: &str) -> Self {
        Self(email.to_string())
    }
}

impl From<String> for UserId {
    fn from(email: String) -> Self {
        Self(email)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_new() {
        let id1 = RecipeId::new();
        let id2 = RecipeId::new();
        assert_ne!(id1, id2, "Generated IDs should be unique");
    }

    #[test]
    fn test_id_display_roundtrip() {
        let id = RecipeId::new();
        let display = id.to_string();
        assert_eq!(display.len(), 36, "UUID string should be 36 characters");
        assert_eq!(RecipeId::from_str(&display).unwrap(), id);
    }

    #[test]
    fn test_id_from_str_rejects_garbage() {
        assert!(RecipeId::from_str("not-a-uuid").is_err());
        assert!(RecipeId::from_str("").is_err());
    }

    #[test]
    fn test_nil_id() {
        let id = RecipeId::nil();
        assert!(id.is_nil());
        assert!(!RecipeId::new().is_nil());
    }

    #[test]
    fn test_id_serializes_as_bare_uuid() {
        let id = RecipeId::new();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", id));
        let back: RecipeId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_user_id_is_the_address() {
        let id = UserId::new("cook@example.com");
        assert_eq!(id.as_str(), "cook@example.com");
        assert_eq!(id.to_string(), "cook@example.com");
        assert_eq!(id, UserId::from("cook@example.com"));
    }
}
