//! Signed confirmation tokens.
//!
//! A confirmation token carries the email address and an issue timestamp,
//! signed with HMAC-SHA256 under the runtime secret:
//! `base64url(email:timestamp).hex(signature)`. Tokens expire after a
//! configurable age and any tampering invalidates the signature.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;

use pantry_core::error::{AccountError, Result};
use pantry_core::UserId;

type HmacSha256 = Hmac<Sha256>;

/// Issues and verifies email confirmation tokens.
pub struct ConfirmationTokens {
    secret: Vec<u8>,
    max_age_secs: i64,
}

impl ConfirmationTokens {
    /// Create a token issuer with the given signing secret and maximum
    /// token age in seconds.
    pub fn new(secret: impl AsRef<[u8]>, max_age_secs: i64) -> Self {
        Self {
            secret: secret.as_ref().to_vec(),
            max_age_secs,
        }
    }

    fn sign(&self, payload: &[u8]) -> Vec<u8> {
        let mut mac = HmacSha256::new_from_slice(&self.secret)
            .expect("HMAC accepts keys of any length");
        mac.update(payload);
        mac.finalize().into_bytes().to_vec()
    }

    fn generate_at(&self, email: &UserId, issued_at: DateTime<Utc>) -> String {
        let payload = format!("{}:{}", email, issued_at.timestamp());
        let signature = self.sign(payload.as_bytes());
        format!(
            "{}.{}",
            URL_SAFE_NO_PAD.encode(payload.as_bytes()),
            hex::encode(signature)
        )
    }

    /// Issue a confirmation token for an email address.
    pub fn generate(&self, email: &UserId) -> String {
        self.generate_at(email, Utc::now())
    }

    /// Verify a token and return the confirmed address.
    ///
    /// # Returns
    ///
    /// * `Ok(UserId)` - The address the token was issued for.
    /// * `Err` - If the token is malformed, forged, or expired.
    pub fn verify(&self, token: &str) -> Result<UserId> {
        let (payload_b64, signature_hex) = token
            .split_once('.')
            .ok_or(AccountError::InvalidToken)?;
        let payload = URL_SAFE_NO_PAD
            .decode(payload_b64)
            .map_err(|_| AccountError::InvalidToken)?;
        let signature = hex::decode(signature_hex).map_err(|_| AccountError::InvalidToken)?;

        let mut mac = HmacSha256::new_from_slice(&self.secret)
            .expect("HMAC accepts keys of any length");
        mac.update(&payload);
        mac.verify_slice(&signature)
            .map_err(|_| AccountError::InvalidToken)?;

        let payload = String::from_utf8(payload).map_err(|_| AccountError::InvalidToken)?;
        let (email, timestamp) = payload
            .rsplit_once(':')
            .ok_or(AccountError::InvalidToken)?;
        let issued_at = timestamp
            .parse::<i64>()
            .map_err(|_| AccountError::InvalidToken)?;

        let age = Utc::now().timestamp() - issued_at;
        if age > self.max_age_secs {
            return Err(AccountError::TokenExpired.into());
        }

        Ok(UserId::new(email))
    }
}
