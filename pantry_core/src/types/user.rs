//! User records as held by the credential store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::{ImageId, UserId};

/// A user record.
///
/// The password is stored only as a salted digest; role and confirmation
/// state are the persisted ground truth that capabilities are derived
/// from on each request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    /// Email address, the user's identity.
    pub email: UserId,

    /// Salted password digest.
    pub password_digest: String,

    /// Whether this user holds the admin role.
    pub is_admin: bool,

    /// Whether the email address has been confirmed.
    pub is_confirmed: bool,

    /// Given name.
    #[serde(default)]
    pub first_name: Option<String>,

    /// Family name.
    #[serde(default)]
    pub last_name: Option<String>,

    /// Free-form profile text.
    #[serde(default)]
    pub bio: Option<String>,

    /// Display theme preference.
    #[serde(default)]
    pub theme: Option<String>,

    /// Avatar image, if one has been uploaded.
    #[serde(default)]
    pub image_id: Option<ImageId>,

    /// When the account was created.
    pub created_at: DateTime<Utc>,
}

impl UserRecord {
    /// Create a fresh, unconfirmed, non-admin record.
    pub fn new(email: UserId, password_digest: String) -> Self {
        Self {
            email,
            password_digest,
            is_admin: false,
            is_confirmed: false,
            first_name: None,
            last_name: None,
            bio: None,
            theme: None,
            image_id: None,
            created_at: Utc::now(),
        }
    }
}

/// Editable profile fields, applied as a unit.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub bio: Option<String>,
    pub theme: Option<String>,
}
