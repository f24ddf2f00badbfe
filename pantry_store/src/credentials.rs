//! Credential store.
//!
//! Holds user records keyed by email address. Role flags and confirmation
//! state live here; they are the persisted ground truth that request-time
//! capabilities are derived from.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use pantry_core::error::{CredentialError, Result};
use pantry_core::{ImageId, ProfileUpdate, UserId, UserRecord};

/// Trait for credential storage.
pub trait CredentialStore: Send + Sync {
    /// Look up a user by email address.
    fn find_by_email(&self, email: &UserId) -> Result<Option<UserRecord>>;

    /// Insert a new user record.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - If the record was inserted.
    /// * `Err` - If a record with the same address already exists.
    fn insert(&self, record: UserRecord) -> Result<()>;

    /// Replace a user's password digest.
    fn update_password(&self, email: &UserId, password_digest: String) -> Result<()>;

    /// Apply a profile update to a user record.
    fn update_profile(&self, email: &UserId, update: ProfileUpdate) -> Result<()>;

    /// Set the confirmation flag on a user record.
    fn set_confirmed(&self, email: &UserId, confirmed: bool) -> Result<()>;

    /// Attach an avatar image, returning the previous image id if any.
    fn set_avatar(&self, email: &UserId, image_id: ImageId) -> Result<Option<ImageId>>;

    /// List every user record, sorted by email address.
    fn list_all(&self) -> Result<Vec<UserRecord>>;
}

/// An in-memory credential store.
#[derive(Clone, Default)]
pub struct InMemoryCredentialStore {
    users: Arc<RwLock<HashMap<UserId, UserRecord>>>,
}

impl InMemoryCredentialStore {
    /// Create a new in-memory credential store.
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    fn with_user<T>(
        &self,
        email: &UserId,
        apply: impl FnOnce(&mut UserRecord) -> T,
    ) -> Result<T> {
        let mut users = self.users.write();
        let record = users
            .get_mut(email)
            .ok_or_else(|| CredentialError::UserNotFound(email.clone()))?;
        Ok(apply(record))
    }
}

impl CredentialStore for InMemoryCredentialStore {
    fn find_by_email(&self, email: &UserId) -> Result<Option<UserRecord>> {
        Ok(self.users.read().get(email).cloned())
    }

    fn insert(&self, record: UserRecord) -> Result<()> {
        let mut users = self.users.write();
        if users.contains_key(&record.email) {
            return Err(CredentialError::DuplicateUser(record.email).into());
        }
        users.insert(record.email.clone(), record);
        Ok(())
    }

    fn update_password(&self, email: &UserId, password_digest: String) -> Result<()> {
        self.with_user(email, |record| {
            record.password_digest = password_digest;
        })
    }

    fn update_profile(&self, email: &UserId, update: ProfileUpdate) -> Result<()> {
        self.with_user(email, |record| {
            record.first_name = update.first_name;
            record.last_name = update.last_name;
            record.bio = update.bio;
            record.theme = update.theme;
        })
    }

    fn set_confirmed(&self, email: &UserId, confirmed: bool) -> Result<()> {
        self.with_user(email, |record| {
            record.is_confirmed = confirmed;
        })
    }

    fn set_avatar(&self, email: &UserId, image_id: ImageId) -> Result<Option<ImageId>> {
        self.with_user(email, |record| record.image_id.replace(image_id))
    }

    fn list_all(&self) -> Result<Vec<UserRecord>> {
        let mut records: Vec<UserRecord> = self.users.read().values().cloned().collect();
        records.sort_by(|a, b| a.email.cmp(&b.email));
        Ok(records)
    }
}
