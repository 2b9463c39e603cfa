use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::BearerToken;

/// Capabilities granted to the signed-in user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    CreateItems,
    ManageCompany,
    ManageItems,
}

impl core::fmt::Display for Capability {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            Capability::CreateItems => "create_items",
            Capability::ManageCompany => "manage_company",
            Capability::ManageItems => "manage_items",
        })
    }
}

/// Permission set returned with the profile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permissions {
    #[serde(rename = "cadastrarItem", default)]
    pub create_items: bool,
    #[serde(rename = "minhaEmpresa", default)]
    pub manage_company: bool,
    #[serde(rename = "gerenciarItens", default)]
    pub manage_items: bool,
}

impl Permissions {
    pub fn grants(&self, capability: Capability) -> bool {
        match capability {
            Capability::CreateItems => self.create_items,
            Capability::ManageCompany => self.manage_company,
            Capability::ManageItems => self.manage_items,
        }
    }
}

/// The current user as reported by `GET /profile/me`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(rename = "nomeUsuario", alias = "displayName")]
    pub display_name: String,

    /// Avatar payload (URL or inline image), when the user has one.
    #[serde(rename = "imagemUsuario", alias = "avatar", default)]
    pub avatar: Option<String>,

    #[serde(rename = "permissoes", alias = "permissions", default)]
    pub permissions: Permissions,
}

impl UserProfile {
    pub fn can(&self, capability: Capability) -> bool {
        self.permissions.grants(capability)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProfileFetchError {
    #[error("token rejected by the server")]
    Unauthorized,

    #[error("profile request failed with status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("network error: {0}")]
    Network(String),

    #[error("malformed profile response: {0}")]
    Decode(String),
}

/// Remote lookup of the user behind a bearer token.
#[async_trait]
pub trait ProfileApi: Send + Sync {
    async fn fetch_profile(&self, token: &BearerToken) -> Result<UserProfile, ProfileFetchError>;
}

#[async_trait]
impl<T> ProfileApi for std::sync::Arc<T>
where
    T: ProfileApi + ?Sized,
{
    async fn fetch_profile(&self, token: &BearerToken) -> Result<UserProfile, ProfileFetchError> {
        (**self).fetch_profile(token).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_backend_field_names() {
        let profile: UserProfile = serde_json::from_value(json!({
            "nomeUsuario": "Ana",
            "imagemUsuario": null,
            "permissoes": { "cadastrarItem": true, "minhaEmpresa": false, "gerenciarItens": true }
        }))
        .unwrap();

        assert_eq!(profile.display_name, "Ana");
        assert_eq!(profile.avatar, None);
        assert!(profile.can(Capability::CreateItems));
        assert!(!profile.can(Capability::ManageCompany));
        assert!(profile.can(Capability::ManageItems));
    }

    #[test]
    fn accepts_descriptive_aliases() {
        let profile: UserProfile = serde_json::from_value(json!({
            "displayName": "Bruno",
            "avatar": "https://cdn.example/b.png",
            "permissions": { "minhaEmpresa": true }
        }))
        .unwrap();

        assert_eq!(profile.avatar.as_deref(), Some("https://cdn.example/b.png"));
        assert!(profile.permissions.manage_company);
        assert!(!profile.permissions.create_items);
    }
}
