//! Password digests.
//!
//! Passwords are stored as salted, iterated SHA-256 digests in the form
//! `sha256$<rounds>$<salt hex>$<digest hex>`. Verification recomputes the
//! digest with the stored salt and round count, so the parameters can be
//! raised without invalidating existing records.

use rand::RngCore;
use sha2::{Digest, Sha256};

const SALT_LEN: usize = 16;
const DEFAULT_ROUNDS: u32 = 50_000;

fn iterate(salt: &[u8], password: &str, rounds: u32) -> Vec<u8> {
    let mut digest = Sha256::new()
        .chain_update(salt)
        .chain_update(password.as_bytes())
        .finalize();
    for _ in 1..rounds {
        digest = Sha256::new()
            .chain_update(digest)
            .chain_update(password.as_bytes())
            .finalize();
    }
    digest.to_vec()
}

/// Digest a password with a fresh random salt.
pub fn hash_password(password: &str) -> String {
    let mut salt = [0u8; SALT_LEN];
    rand::thread_rng().fill_bytes(&mut salt);
    let digest = iterate(&salt, password, DEFAULT_ROUNDS);
    format!(
        "sha256${}${}${}",
        DEFAULT_ROUNDS,
        hex::encode(salt),
        hex::encode(digest)
    )
}

/// Check a password against a stored digest.
///
/// Any malformed stored value verifies as false rather than erroring.
pub fn verify_password(password: &str, stored: &str) -> bool {
    let mut parts = stored.split('$');
    let (scheme, rounds, salt_hex, digest_hex) = match (
        parts.next(),
        parts.next(),
        parts.next(),
        parts.next(),
        parts.next(),
    ) {
        (Some(scheme), Some(rounds), Some(salt), Some(digest), None) => {
            (scheme, rounds, salt, digest)
        }
        _ => return false,
    };
    if scheme != "sha256" {
        return false;
    }
    let Ok(rounds) = rounds.parse::<u32>() else {
        return false;
    };
    if rounds == 0 {
        return false;
    }
    let Ok(salt) = hex::decode(salt_hex) else {
        return false;
    };
    let Ok(expected) = hex::decode(digest_hex) else {
        return false;
    };

    iterate(&salt, password, rounds) == expected
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip() {
        let stored = hash_password("correct horse battery staple");
        assert!(verify_password("correct horse battery staple", &stored));
        assert!(!verify_password("incorrect horse", &stored));
    }

    #[test]
    fn test_salts_differ() {
        let a = hash_password("same password");
        let b = hash_password("same password");
        assert_ne!(a, b);
        assert!(verify_password("same password", &a));
        assert!(verify_password("same password", &b));
    }

    #[test]
    fn test_malformed_stored_digest_rejected() {
        assert!(!verify_password("anything", ""));
        assert!(!verify_password("anything", "plaintext"));
        assert!(!verify_password("anything", "sha256$notanumber$aa$bb"));
        assert!(!verify_password("anything", "md5$1000$aa$bb"));
        assert!(!verify_password("anything", "sha256$0$aa$bb"));
    }
}
