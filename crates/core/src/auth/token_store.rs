//! Holder of the current bearer credential

use campline_domain::Credential;
use parking_lot::RwLock;
use tracing::debug;

/// Current [`Credential`], shared by the executor and the token manager.
///
/// The credential is only ever swapped as a whole. Concurrent refreshes are
/// not coordinated here; callers running requests in parallel must
/// serialize their refresh calls.
#[derive(Debug, Default)]
pub struct TokenStore {
    credential: RwLock<Option<Credential>>,
}

impl TokenStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with a credential obtained elsewhere (e.g. persisted by
    /// the caller between runs).
    #[must_use]
    pub fn with_credential(credential: Credential) -> Self {
        Self { credential: RwLock::new(Some(credential)) }
    }

    #[must_use]
    pub fn credential(&self) -> Option<Credential> {
        self.credential.read().clone()
    }

    /// Access token for signing, only when the credential is authenticated.
    #[must_use]
    pub fn access_token(&self) -> Option<String> {
        self.credential
            .read()
            .as_ref()
            .filter(|credential| credential.is_authenticated())
            .map(|credential| credential.access_token.clone())
    }

    #[must_use]
    pub fn refresh_token(&self) -> Option<String> {
        self.credential
            .read()
            .as_ref()
            .filter(|credential| credential.has_refresh_token())
            .map(|credential| credential.refresh_token.clone())
    }

    /// `false` when no credential is held or its access token is blank.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.credential.read().as_ref().is_some_and(Credential::is_authenticated)
    }

    pub fn replace(&self, credential: Credential) {
        debug!(expires_in = ?credential.expires_in, "Replacing stored credential");
        *self.credential.write() = Some(credential);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_store_is_unauthenticated() {
        let store = TokenStore::new();
        assert!(!store.is_authenticated());
        assert_eq!(store.access_token(), None);
        assert_eq!(store.refresh_token(), None);
    }

    #[test]
    fn test_empty_access_token_is_unauthenticated() {
        let store = TokenStore::with_credential(Credential::new("", "refresh", None));
        assert!(!store.is_authenticated());
        assert_eq!(store.access_token(), None);
        assert_eq!(store.refresh_token().as_deref(), Some("refresh"));
    }

    #[test]
    fn test_replace_swaps_whole_credential() {
        let store = TokenStore::new();
        store.replace(Credential::new("access-1", "refresh-1", Some(3600)));
        assert!(store.is_authenticated());
        assert_eq!(store.access_token().as_deref(), Some("access-1"));

        store.replace(Credential::new("access-2", "", None));
        assert_eq!(store.access_token().as_deref(), Some("access-2"));
        assert_eq!(store.refresh_token(), None);
    }
}
