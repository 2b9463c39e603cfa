use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};

/// Opaque bearer credential issued by `POST /auth/login`.
///
/// The secret is never printed; `Debug` is redacted. Clones share the same
/// allocation.
#[derive(Clone)]
pub struct BearerToken(Arc<SecretString>);

impl BearerToken {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(Arc::new(SecretString::from(secret.into())))
    }

    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }

    /// Value of the `Authorization` header for this token.
    pub fn header_value(&self) -> String {
        format!("Bearer {}", self.expose())
    }
}

impl From<String> for BearerToken {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&str> for BearerToken {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<SecretString> for BearerToken {
    fn from(value: SecretString) -> Self {
        Self(Arc::new(value))
    }
}

impl PartialEq for BearerToken {
    fn eq(&self, other: &Self) -> bool {
        self.expose() == other.expose()
    }
}

impl Eq for BearerToken {}

impl core::fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("BearerToken([REDACTED])")
    }
}
