//! Principals.
//!
//! A principal is the identity a request acts under. It is constructed
//! once, when the session is resolved, and is immutable for the duration
//! of the request.

use serde::{Deserialize, Serialize};

use pantry_core::UserId;

/// An authenticated user, as seen by the permission core.
///
/// Carries only what derivation and display need; the full record stays
/// in the credential store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    /// The user's identity.
    pub id: UserId,

    /// Whether the user holds the admin role.
    pub is_admin: bool,

    /// Display theme preference.
    pub theme: Option<String>,
}

/// The identity of the actor behind a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Principal {
    /// No authenticated user.
    Anonymous,

    /// An authenticated user.
    Authenticated(AuthenticatedUser),
}

impl Principal {
    /// Create an authenticated principal.
    pub fn authenticated(id: UserId, is_admin: bool, theme: Option<String>) -> Self {
        Self::Authenticated(AuthenticatedUser { id, is_admin, theme })
    }

    /// Whether this principal is authenticated.
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    /// The user id, if authenticated.
    pub fn user_id(&self) -> Option<&UserId> {
        match self {
            Self::Anonymous => None,
            Self::Authenticated(user) => Some(&user.id),
        }
    }
}
