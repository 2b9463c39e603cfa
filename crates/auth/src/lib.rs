//! `orderlink-auth`: client-side session lifecycle.
//!
//! This crate is intentionally decoupled from HTTP and storage: the
//! credential store and the profile endpoint are capabilities supplied by the
//! caller (`orderlink-client` provides the keychain and REST versions).

pub mod credentials;
pub mod profile;
pub mod session;
pub mod token;

pub use credentials::{CredentialStore, CredentialStoreError, InMemoryCredentialStore, StoredCredential};
pub use profile::{Capability, Permissions, ProfileApi, ProfileFetchError, UserProfile};
pub use session::{DEFAULT_SERVICE_KEY, SessionError, SessionManager, SessionState, SessionStatus};
pub use token::BearerToken;
