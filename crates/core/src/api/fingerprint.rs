//! Cache key derivation

use sha2::{Digest, Sha256};

/// SHA-256 hex digest of the access token followed by the lowercased URL.
///
/// Including the token keeps one user's cached bodies invisible to another
/// client holding a different credential.
#[must_use]
pub fn fingerprint(access_token: &str, url: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(access_token.as_bytes());
    hasher.update(url.to_lowercase().as_bytes());
    hex::encode(hasher.finalize())
}
