//! Runtime configuration.
//!
//! Configuration is read from the environment under the `PANTRY_` prefix
//! (`PANTRY_BIND_ADDR`, `PANTRY_SECRET_KEY`, ...); every field has a
//! development default.

use anyhow::Context;
use serde::Deserialize;

use pantry_core::UserId;

/// Service configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct RuntimeConfig {
    /// Address the HTTP server binds to.
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Secret used to sign confirmation tokens.
    #[serde(default = "default_secret_key")]
    pub secret_key: String,

    /// Ordinary session lifetime, seconds.
    #[serde(default = "default_session_ttl")]
    pub session_ttl_secs: i64,

    /// "Stay signed in" session lifetime, seconds.
    #[serde(default = "default_remember_ttl")]
    pub remember_session_ttl_secs: i64,

    /// Confirmation token lifetime, seconds.
    #[serde(default = "default_confirmation_ttl")]
    pub confirmation_token_ttl_secs: i64,

    /// Comma-separated addresses that register as admins.
    #[serde(default)]
    pub admins: String,

    /// From-address on outbound mail.
    #[serde(default = "default_mail_sender")]
    pub mail_sender: String,
}

fn default_bind_addr() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_secret_key() -> String {
    "change-me-in-production".to_string()
}

fn default_session_ttl() -> i64 {
    3600
}

fn default_remember_ttl() -> i64 {
    30 * 24 * 3600
}

fn default_confirmation_ttl() -> i64 {
    3600
}

fn default_mail_sender() -> String {
    "no-reply@pantry.local".to_string()
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            secret_key: default_secret_key(),
            session_ttl_secs: default_session_ttl(),
            remember_session_ttl_secs: default_remember_ttl(),
            confirmation_token_ttl_secs: default_confirmation_ttl(),
            admins: String::new(),
            mail_sender: default_mail_sender(),
        }
    }
}

impl RuntimeConfig {
    /// Load configuration from the environment.
    pub fn load() -> anyhow::Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::Environment::with_prefix("PANTRY"))
            .build()
            .context("failed to read configuration from the environment")?;
        settings
            .try_deserialize()
            .context("invalid configuration value")
    }

    /// The configured admin addresses.
    pub fn admin_emails(&self) -> Vec<UserId> {
        self.admins
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(UserId::new)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RuntimeConfig::default();
        assert_eq!(config.bind_addr, "0.0.0.0:8080");
        assert_eq!(config.confirmation_token_ttl_secs, 3600);
        assert!(config.admin_emails().is_empty());
    }

    #[test]
    fn test_admin_emails_parsing() {
        let config = RuntimeConfig {
            admins: "admin@example.com, chef@example.com ,".to_string(),
            ..RuntimeConfig::default()
        };
        let admins = config.admin_emails();
        assert_eq!(admins.len(), 2);
        assert_eq!(admins[0].as_str(), "admin@example.com");
        assert_eq!(admins[1].as_str(), "chef@example.com");
    }
}
