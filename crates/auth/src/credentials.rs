//! Persisted credential capability.
//!
//! The credential store is the durable source of truth for "is someone
//! signed in": it is read once at startup and rewritten on every login and
//! logout. Everything else the session holds is derived from it.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use thiserror::Error;

use crate::BearerToken;

/// What gets persisted for a signed-in user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredCredential {
    /// E-mail or CPF the user typed on the login screen.
    pub identifier: String,
    pub token: BearerToken,
}

impl StoredCredential {
    pub fn new(identifier: impl Into<String>, token: BearerToken) -> Self {
        Self {
            identifier: identifier.into(),
            token,
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CredentialStoreError {
    #[error("credential backend error: {0}")]
    Backend(String),

    #[error("stored credential is unreadable: {0}")]
    Corrupt(String),

    #[error("lock poisoned")]
    LockPoisoned,
}

/// Secure key/value storage for one credential per service key.
///
/// Implementations must keep the secret out of reach of other applications
/// (OS keychain or equivalent). Clearing a missing entry is not an error.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn get(&self, service: &str) -> Result<Option<StoredCredential>, CredentialStoreError>;

    async fn set(
        &self,
        service: &str,
        credential: &StoredCredential,
    ) -> Result<(), CredentialStoreError>;

    async fn clear(&self, service: &str) -> Result<(), CredentialStoreError>;
}

#[async_trait]
impl<T> CredentialStore for std::sync::Arc<T>
where
    T: CredentialStore + ?Sized,
{
    async fn get(&self, service: &str) -> Result<Option<StoredCredential>, CredentialStoreError> {
        (**self).get(service).await
    }

    async fn set(
        &self,
        service: &str,
        credential: &StoredCredential,
    ) -> Result<(), CredentialStoreError> {
        (**self).set(service, credential).await
    }

    async fn clear(&self, service: &str) -> Result<(), CredentialStoreError> {
        (**self).clear(service).await
    }
}

/// In-memory credential store.
///
/// Intended for tests/dev. Nothing survives the process.
#[derive(Debug, Default)]
pub struct InMemoryCredentialStore {
    entries: RwLock<HashMap<String, StoredCredential>>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seed a credential, as if a previous run had logged in.
    pub fn with_credential(service: &str, credential: StoredCredential) -> Self {
        let store = Self::new();
        if let Ok(mut entries) = store.entries.write() {
            entries.insert(service.to_string(), credential);
        }
        store
    }

    pub fn contains(&self, service: &str) -> bool {
        self.entries
            .read()
            .map(|entries| entries.contains_key(service))
            .unwrap_or(false)
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn get(&self, service: &str) -> Result<Option<StoredCredential>, CredentialStoreError> {
        let entries = self
            .entries
            .read()
            .map_err(|_| CredentialStoreError::LockPoisoned)?;
        Ok(entries.get(service).cloned())
    }

    async fn set(
        &self,
        service: &str,
        credential: &StoredCredential,
    ) -> Result<(), CredentialStoreError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| CredentialStoreError::LockPoisoned)?;
        entries.insert(service.to_string(), credential.clone());
        Ok(())
    }

    async fn clear(&self, service: &str) -> Result<(), CredentialStoreError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| CredentialStoreError::LockPoisoned)?;
        entries.remove(service);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn set_get_clear_roundtrip() {
        let store = InMemoryCredentialStore::new();
        assert_eq!(store.get("authToken").await.unwrap(), None);

        let cred = StoredCredential::new("ana@example.com", BearerToken::new("t1"));
        store.set("authToken", &cred).await.unwrap();
        assert_eq!(store.get("authToken").await.unwrap(), Some(cred));
        assert!(!store.contains("other"));

        store.clear("authToken").await.unwrap();
        assert!(!store.contains("authToken"));
    }

    #[tokio::test]
    async fn clearing_missing_entry_succeeds() {
        let store = InMemoryCredentialStore::new();
        store.clear("authToken").await.unwrap();
    }
}
