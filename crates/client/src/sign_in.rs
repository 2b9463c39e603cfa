//! Login screen flow: credentials in, authenticated session out.

use thiserror::Error;

use orderlink_auth::{CredentialStore, ProfileApi, SessionError, SessionManager, UserProfile};

use crate::api::ApiClient;
use crate::error::ApiError;

/// Why signing in failed, classified the way the login screen reports it.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SignInError {
    #[error("identifier and password are required")]
    MissingCredentials,

    #[error("invalid identifier or password")]
    InvalidCredentials,

    #[error("could not reach the server: {0}")]
    Network(ApiError),

    #[error(transparent)]
    Api(ApiError),

    /// The backend accepted the credentials but the session could not be
    /// established afterwards.
    #[error("signed in, but the session could not be started: {0}")]
    Session(SessionError),
}

impl From<ApiError> for SignInError {
    fn from(err: ApiError) -> Self {
        if err.is_unauthorized() {
            SignInError::InvalidCredentials
        } else if err.is_network() {
            SignInError::Network(err)
        } else {
            SignInError::Api(err)
        }
    }
}

/// Exchange `identifier`/`password` for a token and hand it to `session`.
///
/// The identifier is trimmed; the password is sent as typed.
pub async fn sign_in<S, P>(
    api: &ApiClient,
    session: &SessionManager<S, P>,
    identifier: &str,
    password: &str,
) -> Result<UserProfile, SignInError>
where
    S: CredentialStore,
    P: ProfileApi,
{
    let identifier = identifier.trim();
    if identifier.is_empty() || password.is_empty() {
        return Err(SignInError::MissingCredentials);
    }

    let token = api.login(identifier, password).await.map_err(|err| {
        tracing::warn!(error = %err, "login request failed");
        SignInError::from(err)
    })?;

    session
        .login(identifier, token)
        .await
        .map_err(SignInError::Session)
}
