//! Login sessions and identity resolution.
//!
//! A session maps an opaque token to a user id with an expiry. Resolution
//! fails closed: an unknown token, an expired session, or a user that has
//! vanished from the credential store all resolve to the anonymous
//! principal, never an error.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use tracing::{debug, warn};

use pantry_capability::Principal;
use pantry_core::{SessionId, UserId};
use pantry_store::CredentialStore;

#[derive(Debug, Clone)]
struct Session {
    user: UserId,
    expires_at: DateTime<Utc>,
}

/// Creates, revokes, and resolves login sessions.
pub struct SessionManager {
    credentials: Arc<dyn CredentialStore>,
    sessions: DashMap<SessionId, Session>,
    ttl: Duration,
    remember_ttl: Duration,
}

impl SessionManager {
    /// Create a session manager.
    ///
    /// `ttl_secs` bounds ordinary sessions; `remember_ttl_secs` applies
    /// when the user asks to stay signed in.
    pub fn new(credentials: Arc<dyn CredentialStore>, ttl_secs: i64, remember_ttl_secs: i64) -> Self {
        Self {
            credentials,
            sessions: DashMap::new(),
            ttl: Duration::seconds(ttl_secs),
            remember_ttl: Duration::seconds(remember_ttl_secs),
        }
    }

    /// Mint a session for a user and return its token.
    pub fn create(&self, user: UserId, remember: bool) -> SessionId {
        let token = SessionId::new();
        let ttl = if remember { self.remember_ttl } else { self.ttl };
        self.sessions.insert(
            token,
            Session {
                user,
                expires_at: Utc::now() + ttl,
            },
        );
        token
    }

    /// Drop a session; unknown tokens are ignored.
    pub fn revoke(&self, token: &SessionId) {
        self.sessions.remove(token);
    }

    /// Resolve a session token to a principal.
    ///
    /// Always returns a principal; every failure mode resolves to
    /// [`Principal::Anonymous`].
    pub fn resolve(&self, token: Option<&SessionId>) -> Principal {
        let Some(token) = token else {
            return Principal::Anonymous;
        };

        let session = match self.sessions.get(token) {
            Some(entry) => entry.value().clone(),
            None => return Principal::Anonymous,
        };

        if session.expires_at <= Utc::now() {
            self.sessions.remove(token);
            debug!(%token, "session expired");
            return Principal::Anonymous;
        }

        match self.credentials.find_by_email(&session.user) {
            Ok(Some(user)) => Principal::authenticated(user.email, user.is_admin, user.theme),
            Ok(None) => {
                debug!(user = %session.user, "session references a user no longer present");
                Principal::Anonymous
            }
            Err(err) => {
                warn!(user = %session.user, error = %err, "credential store unavailable during resolution");
                Principal::Anonymous
            }
        }
    }
}
