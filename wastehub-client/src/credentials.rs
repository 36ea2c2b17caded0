use std::sync::RwLock;

use wastehub_core::TokenPair;

/// Where the client looks for bearer credentials.
///
/// The pipeline consults the store on every call that was not given an
/// explicit token. Login and refresh write the issued pair back through
/// [`store`](CredentialStore::store); logout wipes it with
/// [`clear`](CredentialStore::clear).
///
/// Implementations must be safe to share across tasks; the client holds the
/// store behind an `Arc`.
pub trait CredentialStore: Send + Sync {
    /// Current access token, if one is held.
    fn access_token(&self) -> Option<String>;

    /// Current refresh token, if one is held.
    fn refresh_token(&self) -> Option<String>;

    /// Replaces the held pair.
    fn store(&self, pair: &TokenPair);

    /// Drops the held pair.
    fn clear(&self);
}

/// In-memory credential store.
///
/// Good enough for services and tests; anything that must survive a restart
/// wants its own [`CredentialStore`] over the keychain of the platform.
#[derive(Debug, Default)]
pub struct MemoryCredentials {
    inner: RwLock<Option<TokenPair>>,
}

impl MemoryCredentials {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-loaded with a pair, for picking up an existing session.
    pub fn with_tokens<S: Into<String>>(access_token: S, refresh_token: S) -> Self {
        Self {
            inner: RwLock::new(Some(TokenPair {
                access_token: access_token.into(),
                refresh_token: refresh_token.into(),
            })),
        }
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Option<TokenPair>> {
        self.inner.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Option<TokenPair>> {
        self.inner.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl CredentialStore for MemoryCredentials {
    fn access_token(&self) -> Option<String> {
        self.read().as_ref().map(|pair| pair.access_token.clone())
    }

    fn refresh_token(&self) -> Option<String> {
        self.read().as_ref().map(|pair| pair.refresh_token.clone())
    }

    fn store(&self, pair: &TokenPair) {
        *self.write() = Some(pair.clone());
    }

    fn clear(&self) {
        *self.write() = None;
    }
}

/// Store that never holds anything. The default for clients built without
/// credentials; calls go out unauthenticated unless given a token directly.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoCredentials;

impl CredentialStore for NoCredentials {
    fn access_token(&self) -> Option<String> {
        None
    }

    fn refresh_token(&self) -> Option<String> {
        None
    }

    fn store(&self, _pair: &TokenPair) {}

    fn clear(&self) {}
}
