//! Typed accessors for the persisted bearer token and identity cache.
//!
//! The two entries are written as a pair: `persist` serializes the identity
//! before touching storage, so a serialization failure leaves both keys as
//! they were.

#[cfg(test)]
#[path = "credentials_test.rs"]
mod credentials_test;

use std::rc::Rc;

use super::backend::{BrowserStorage, KeyValueStore};
use crate::net::types::User;

/// Storage key of the opaque bearer token.
pub const TOKEN_KEY: &str = "auth_token";
/// Storage key of the serialized identity.
pub const USER_KEY: &str = "user_data";

/// Cheap-to-clone handle over a shared [`KeyValueStore`].
#[derive(Clone)]
pub struct CredentialStore {
    backend: Rc<dyn KeyValueStore>,
}

impl Default for CredentialStore {
    fn default() -> Self {
        Self::browser()
    }
}

impl std::fmt::Debug for CredentialStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialStore")
            .field("has_token", &self.has_token())
            .finish()
    }
}

impl CredentialStore {
    pub fn new(backend: Rc<dyn KeyValueStore>) -> Self {
        Self { backend }
    }

    /// Store backed by `localStorage` (inert outside the browser).
    #[must_use]
    pub fn browser() -> Self {
        Self::new(Rc::new(BrowserStorage))
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.backend.get(key)
    }

    pub fn set(&self, key: &str, value: &str) {
        self.backend.set(key, value);
    }

    pub fn remove(&self, key: &str) {
        self.backend.remove(key);
    }

    /// Wipe every entry in the backing store, not just the credential pair.
    pub fn clear_all(&self) {
        self.backend.clear();
    }

    /// The bearer token, read straight from storage. Empty strings count as
    /// absent.
    pub fn token(&self) -> Option<String> {
        self.backend.get(TOKEN_KEY).filter(|t| !t.is_empty())
    }

    pub fn has_token(&self) -> bool {
        self.token().is_some()
    }

    /// The raw cached identity. Untrusted: callers deserialize and must
    /// ignore it when no token is present.
    pub fn cached_user_raw(&self) -> Option<String> {
        self.backend.get(USER_KEY)
    }

    /// The cached identity, deserialized. `Ok(None)` when nothing is cached.
    ///
    /// # Errors
    ///
    /// Returns the deserialization error for a corrupt cache entry.
    pub fn cached_user(&self) -> Result<Option<User>, serde_json::Error> {
        self.cached_user_raw().map(|raw| serde_json::from_str(&raw)).transpose()
    }

    /// Write the token and identity cache together.
    ///
    /// # Errors
    ///
    /// Returns the serialization error without writing either key.
    pub fn persist(&self, token: &str, user: &User) -> Result<(), serde_json::Error> {
        let raw = serde_json::to_string(user)?;
        self.backend.set(TOKEN_KEY, token);
        self.backend.set(USER_KEY, &raw);
        Ok(())
    }

    /// Remove the token and identity cache.
    pub fn evict(&self) {
        self.backend.remove(TOKEN_KEY);
        self.backend.remove(USER_KEY);
    }
}
