//! Account flows.
//!
//! Registration, login, email confirmation, profile updates, and the
//! admin-only user management operations. Protected operations check the
//! request's derived capability set before touching any store.

use std::sync::Arc;

use tracing::{debug, info};

use pantry_capability::{Capability, Principal, RequestContext, Role};
use pantry_core::error::{AccountError, CapabilityError, CredentialError, Result};
use pantry_core::{ProfileUpdate, SessionId, UserId, UserRecord};
use pantry_store::{CredentialStore, ImageStore};

use crate::mail::{send_or_log, MailSender};
use crate::password::{hash_password, verify_password};
use crate::session::SessionManager;
use crate::token::ConfirmationTokens;

/// Outcome of an email confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmOutcome {
    /// The address was confirmed just now.
    Confirmed,

    /// The address had already been confirmed.
    AlreadyConfirmed,
}

/// Account and user management service.
pub struct AccountService {
    credentials: Arc<dyn CredentialStore>,
    images: Arc<dyn ImageStore>,
    sessions: Arc<SessionManager>,
    mail: Arc<dyn MailSender>,
    tokens: ConfirmationTokens,
    admins: Vec<UserId>,
}

impl AccountService {
    /// Create the account service.
    ///
    /// `admins` lists addresses that receive the admin role on
    /// registration.
    pub fn new(
        credentials: Arc<dyn CredentialStore>,
        images: Arc<dyn ImageStore>,
        sessions: Arc<SessionManager>,
        mail: Arc<dyn MailSender>,
        tokens: ConfirmationTokens,
        admins: Vec<UserId>,
    ) -> Self {
        Self {
            credentials,
            images,
            sessions,
            mail,
            tokens,
            admins,
        }
    }

    /// Register a new account and send the confirmation mail.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - The account was created.
    /// * `Err` - If the address is already registered.
    pub fn register(&self, email: UserId, password: &str) -> Result<()> {
        let mut record = UserRecord::new(email.clone(), hash_password(password));
        record.is_admin = self.admins.contains(&email);
        self.credentials.insert(record)?;
        info!(user = %email, "account registered");

        let token = self.tokens.generate(&email);
        send_or_log(
            self.mail.as_ref(),
            &email,
            "Please confirm your email address",
            &format!("Visit /confirm/{} to confirm your account.", token),
        );
        Ok(())
    }

    /// Log in and mint a session.
    ///
    /// Unknown addresses and wrong passwords collapse into one error so
    /// the response does not reveal which half failed.
    pub fn login(&self, email: &UserId, password: &str, remember: bool) -> Result<SessionId> {
        let record = self
            .credentials
            .find_by_email(email)?
            .ok_or(AccountError::InvalidCredentials)?;
        if !verify_password(password, &record.password_digest) {
            debug!(user = %email, "password verification failed");
            return Err(AccountError::InvalidCredentials.into());
        }
        info!(user = %email, "login");
        Ok(self.sessions.create(record.email, remember))
    }

    /// Log out, dropping the session.
    pub fn logout(&self, token: &SessionId) {
        self.sessions.revoke(token);
    }

    /// Confirm an email address from a signed token.
    pub fn confirm(&self, token: &str) -> Result<ConfirmOutcome> {
        let email = self.tokens.verify(token)?;
        let record = self
            .credentials
            .find_by_email(&email)?
            .ok_or(AccountError::InvalidToken)?;
        if record.is_confirmed {
            return Ok(ConfirmOutcome::AlreadyConfirmed);
        }
        self.credentials.set_confirmed(&email, true)?;
        info!(user = %email, "email confirmed");
        Ok(ConfirmOutcome::Confirmed)
    }

    /// Fetch the current user's record.
    pub fn profile(&self, ctx: &RequestContext) -> Result<UserRecord> {
        ctx.require(&Capability::Role(Role::Author))?;
        let owner = principal_owner(ctx.principal())?;
        self.credentials
            .find_by_email(&owner)?
            .ok_or_else(|| CredentialError::UserNotFound(owner).into())
    }

    /// Update the current user's own profile.
    pub fn update_profile(
        &self,
        ctx: &RequestContext,
        update: ProfileUpdate,
        avatar: Option<(Vec<u8>, String)>,
    ) -> Result<()> {
        ctx.require(&Capability::Role(Role::Author))?;
        let owner = principal_owner(ctx.principal())?;
        self.apply_user_update(&owner, update, None, avatar)
    }

    /// Update an arbitrary user's profile. Admin only.
    pub fn update_user(
        &self,
        ctx: &RequestContext,
        email: &UserId,
        update: ProfileUpdate,
        confirmed: Option<bool>,
        avatar: Option<(Vec<u8>, String)>,
    ) -> Result<()> {
        ctx.require(&Capability::Role(Role::Admin))?;
        self.apply_user_update(email, update, confirmed, avatar)
    }

    /// List every user, sorted by address. Admin only.
    pub fn list_users(&self, ctx: &RequestContext) -> Result<Vec<UserRecord>> {
        ctx.require(&Capability::Role(Role::Admin))?;
        self.credentials.list_all()
    }

    fn apply_user_update(
        &self,
        email: &UserId,
        update: ProfileUpdate,
        confirmed: Option<bool>,
        avatar: Option<(Vec<u8>, String)>,
    ) -> Result<()> {
        self.credentials.update_profile(email, update)?;
        if let Some(confirmed) = confirmed {
            self.credentials.set_confirmed(email, confirmed)?;
        }
        if let Some((bytes, content_type)) = avatar {
            let image_id = self.images.put(bytes, &content_type)?;
            if let Some(previous) = self.credentials.set_avatar(email, image_id)? {
                if let Err(err) = self.images.delete(&previous) {
                    debug!(image = %previous, error = %err, "stale avatar already gone");
                }
            }
        }
        info!(user = %email, "profile updated");
        Ok(())
    }
}

/// The authenticated owner behind a context, or a uniform denial.
pub(crate) fn principal_owner(principal: &Principal) -> Result<UserId> {
    match principal {
        Principal::Authenticated(user) => Ok(user.id.clone()),
        Principal::Anonymous => Err(CapabilityError::PermissionDenied(
            pantry_capability::DENIAL_REASON.to_string(),
        )
        .into()),
    }
}
