//! Session lifecycle: startup check, login, logout, profile refresh.
//!
//! ```text
//!              check_status / login ok
//!   Unknown ───────────────────────────► Authenticated
//!      │                                    │   ▲
//!      │ no credential / any failure        │   │ login ok
//!      ▼                                    ▼   │
//!   Unauthenticated ◄──────── logout / profile fetch failure
//! ```
//!
//! The manager owns the bearer token used for outbound requests. It is
//! installed before the profile is fetched and removed on every path that
//! ends unauthenticated, so a half-finished login never leaves a usable
//! authorization behind.
//!
//! Transitions are serialized: each operation holds the transition lock
//! for its whole duration, so a logout issued during a login runs after the
//! login has settled.

use std::sync::RwLock;

use thiserror::Error;
use tokio::sync::{Mutex, watch};

use crate::credentials::{CredentialStore, CredentialStoreError, StoredCredential};
use crate::profile::{ProfileApi, ProfileFetchError, UserProfile};
use crate::BearerToken;

/// Service key the credential is stored under unless configured otherwise.
pub const DEFAULT_SERVICE_KEY: &str = "authToken";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    /// Startup check has not finished yet.
    Unknown,
    Authenticated,
    Unauthenticated,
}

/// Snapshot of the session as seen by the UI layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    pub status: SessionStatus,
    pub token: Option<BearerToken>,
    pub profile: Option<UserProfile>,
    pub is_loading: bool,
}

impl SessionState {
    fn initial() -> Self {
        Self {
            status: SessionStatus::Unknown,
            token: None,
            profile: None,
            is_loading: true,
        }
    }

    fn authenticated(token: BearerToken, profile: UserProfile) -> Self {
        Self {
            status: SessionStatus::Authenticated,
            token: Some(token),
            profile: Some(profile),
            is_loading: false,
        }
    }

    fn unauthenticated() -> Self {
        Self {
            status: SessionStatus::Unauthenticated,
            token: None,
            profile: None,
            is_loading: false,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.status == SessionStatus::Authenticated && self.token.is_some() && self.profile.is_some()
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error(transparent)]
    CredentialStore(#[from] CredentialStoreError),

    #[error(transparent)]
    ProfileFetch(#[from] ProfileFetchError),

    #[error("no authenticated session")]
    NotAuthenticated,
}

/// Owner of the authentication state.
pub struct SessionManager<S, P> {
    store: S,
    profiles: P,
    service_key: String,
    state: watch::Sender<SessionState>,
    authorization: RwLock<Option<BearerToken>>,
    transitions: Mutex<()>,
}

impl<S, P> SessionManager<S, P>
where
    S: CredentialStore,
    P: ProfileApi,
{
    pub fn new(store: S, profiles: P) -> Self {
        Self::with_service_key(store, profiles, DEFAULT_SERVICE_KEY)
    }

    pub fn with_service_key(store: S, profiles: P, service_key: impl Into<String>) -> Self {
        let (state, _) = watch::channel(SessionState::initial());
        Self {
            store,
            profiles,
            service_key: service_key.into(),
            state,
            authorization: RwLock::new(None),
            transitions: Mutex::new(()),
        }
    }

    pub fn service_key(&self) -> &str {
        &self.service_key
    }

    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    pub fn status(&self) -> SessionStatus {
        self.state.borrow().status
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_authenticated()
    }

    pub fn profile(&self) -> Option<UserProfile> {
        self.state.borrow().profile.clone()
    }

    /// Watch every state change (loading flags included).
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    /// Token to attach to outbound requests, if one is installed.
    pub fn authorization(&self) -> Option<BearerToken> {
        match self.authorization.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Startup check: restore the session from the persisted credential.
    ///
    /// Never fails; any problem ends in `Unauthenticated` and is only logged.
    /// Running it again repeats the same procedure.
    pub async fn check_status(&self) -> SessionStatus {
        let _guard = self.transitions.lock().await;
        self.mark_loading();
        tracing::debug!("checking stored credential");

        let credential = match self.store.get(&self.service_key).await {
            Ok(Some(credential)) => credential,
            Ok(None) => {
                tracing::info!("no stored credential");
                self.install(None);
                self.state.send_replace(SessionState::unauthenticated());
                return SessionStatus::Unauthenticated;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to read stored credential");
                self.install(None);
                self.state.send_replace(SessionState::unauthenticated());
                return SessionStatus::Unauthenticated;
            }
        };

        let token = credential.token;
        self.install(Some(token.clone()));

        match self.profiles.fetch_profile(&token).await {
            Ok(profile) => {
                tracing::info!(user = %profile.display_name, "session restored");
                self.state.send_replace(SessionState::authenticated(token, profile));
                SessionStatus::Authenticated
            }
            Err(err) => {
                tracing::warn!(error = %err, "stored token no longer valid; signing out");
                self.invalidate().await;
                SessionStatus::Unauthenticated
            }
        }
    }

    /// Adopt a token obtained from `POST /auth/login`.
    ///
    /// Persists the credential, installs the token and confirms it by
    /// fetching the profile. On any failure the session is invalidated and
    /// the error is returned for the caller to present.
    pub async fn login(
        &self,
        identifier: &str,
        token: impl Into<BearerToken>,
    ) -> Result<UserProfile, SessionError> {
        let _guard = self.transitions.lock().await;
        self.mark_loading();
        let token = token.into();

        match self.confirm_login(identifier, &token).await {
            Ok(profile) => {
                tracing::info!(user = %profile.display_name, "login complete");
                self.state
                    .send_replace(SessionState::authenticated(token, profile.clone()));
                Ok(profile)
            }
            Err(err) => {
                tracing::warn!(error = %err, "login could not be completed; signing out");
                self.invalidate().await;
                Err(err)
            }
        }
    }

    async fn confirm_login(
        &self,
        identifier: &str,
        token: &BearerToken,
    ) -> Result<UserProfile, SessionError> {
        let credential = StoredCredential::new(identifier, token.clone());
        self.store.set(&self.service_key, &credential).await?;
        self.install(Some(token.clone()));
        Ok(self.profiles.fetch_profile(token).await?)
    }

    /// Sign out. Best effort on the store side; the in-memory session is
    /// always cleared.
    pub async fn logout(&self) {
        let _guard = self.transitions.lock().await;
        self.mark_loading();
        if let Err(err) = self.store.clear(&self.service_key).await {
            tracing::error!(error = %err, "failed to erase stored credential during logout");
        }
        self.install(None);
        self.state.send_replace(SessionState::unauthenticated());
        tracing::info!("logged out");
    }

    /// Re-fetch the profile of the current session.
    ///
    /// A failure is treated like an invalid session: it is invalidated and
    /// the error returned.
    pub async fn refresh_profile(&self) -> Result<UserProfile, SessionError> {
        let _guard = self.transitions.lock().await;
        let token = match (self.is_authenticated(), self.authorization()) {
            (true, Some(token)) => token,
            _ => return Err(SessionError::NotAuthenticated),
        };

        match self.profiles.fetch_profile(&token).await {
            Ok(profile) => {
                self.state.send_modify(|state| state.profile = Some(profile.clone()));
                Ok(profile)
            }
            Err(err) => {
                tracing::warn!(error = %err, "profile refresh failed; signing out");
                self.invalidate().await;
                Err(err.into())
            }
        }
    }

    fn mark_loading(&self) {
        self.state.send_modify(|state| state.is_loading = true);
    }

    fn install(&self, token: Option<BearerToken>) {
        match self.authorization.write() {
            Ok(mut guard) => *guard = token,
            Err(poisoned) => *poisoned.into_inner() = token,
        }
    }

    /// Forget everything: stored credential, installed token, profile.
    async fn invalidate(&self) {
        if let Err(err) = self.store.clear(&self.service_key).await {
            tracing::error!(error = %err, "failed to erase stored credential");
        }
        self.install(None);
        self.state.send_replace(SessionState::unauthenticated());
    }
}
