//! Credential storage in the OS keychain.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use orderlink_auth::{BearerToken, CredentialStore, CredentialStoreError, StoredCredential};

/// Account name of the keychain entry; the service key selects the entry.
const ENTRY_USER: &str = "session";

#[derive(Serialize)]
struct SecretBlobRef<'a> {
    identifier: &'a str,
    token: &'a str,
}

#[derive(Deserialize)]
struct SecretBlob {
    identifier: String,
    token: String,
}

/// [`CredentialStore`] backed by the platform keychain (Keychain on macOS,
/// Credential Manager on Windows, Secret Service on Linux).
///
/// Keychain calls block, so each one runs on the blocking thread pool.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyringCredentialStore;

impl KeyringCredentialStore {
    pub fn new() -> Self {
        Self
    }
}

fn entry(service: &str) -> Result<keyring::Entry, CredentialStoreError> {
    keyring::Entry::new(service, ENTRY_USER).map_err(|e| CredentialStoreError::Backend(e.to_string()))
}

fn encode(credential: &StoredCredential) -> Result<String, CredentialStoreError> {
    let blob = SecretBlobRef {
        identifier: &credential.identifier,
        token: credential.token.expose(),
    };
    serde_json::to_string(&blob).map_err(|e| CredentialStoreError::Corrupt(e.to_string()))
}

fn decode(data: &str) -> Result<StoredCredential, CredentialStoreError> {
    let blob: SecretBlob =
        serde_json::from_str(data).map_err(|e| CredentialStoreError::Corrupt(e.to_string()))?;
    if blob.token.is_empty() {
        return Err(CredentialStoreError::Corrupt("empty token".to_string()));
    }
    Ok(StoredCredential::new(blob.identifier, BearerToken::new(blob.token)))
}

async fn blocking<T, F>(op: F) -> Result<T, CredentialStoreError>
where
    F: FnOnce() -> Result<T, CredentialStoreError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(op)
        .await
        .map_err(|e| CredentialStoreError::Backend(format!("keychain task failed: {e}")))?
}

#[async_trait]
impl CredentialStore for KeyringCredentialStore {
    async fn get(&self, service: &str) -> Result<Option<StoredCredential>, CredentialStoreError> {
        let service = service.to_string();
        blocking(move || match entry(&service)?.get_password() {
            Ok(data) => decode(&data).map(Some),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(CredentialStoreError::Backend(e.to_string())),
        })
        .await
    }

    async fn set(
        &self,
        service: &str,
        credential: &StoredCredential,
    ) -> Result<(), CredentialStoreError> {
        let service = service.to_string();
        let data = encode(credential)?;
        blocking(move || {
            entry(&service)?
                .set_password(&data)
                .map_err(|e| CredentialStoreError::Backend(e.to_string()))
        })
        .await
    }

    async fn clear(&self, service: &str) -> Result<(), CredentialStoreError> {
        let service = service.to_string();
        blocking(move || match entry(&service)?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(CredentialStoreError::Backend(e.to_string())),
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    // These tests exercise the blob format only; the real keychain is not touched.
    use super::*;

    #[test]
    fn blob_roundtrip_keeps_identifier_and_token() {
        let credential = StoredCredential::new("12345678909", BearerToken::new("tok-1"));
        let data = encode(&credential).unwrap();
        assert_eq!(decode(&data).unwrap(), credential);
    }

    #[test]
    fn unreadable_blob_is_corrupt() {
        assert!(matches!(decode("not json"), Err(CredentialStoreError::Corrupt(_))));
        assert!(matches!(
            decode(r#"{"identifier":"a@b.c","token":""}"#),
            Err(CredentialStoreError::Corrupt(_))
        ));
    }
}
