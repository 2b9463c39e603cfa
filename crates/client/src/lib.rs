//! OrderLink backend client.
//!
//! - `api`: HTTP plumbing and the [`ProfileApi`](orderlink_auth::ProfileApi) implementation
//! - `account`: login, sign-up and password reset
//! - `catalog` / `orders`: restaurant data behind the bearer token
//! - `sign_in`: login-screen flow on top of the session manager
//! - `keychain`: OS keychain credential store
//! - `cep`: postal code address lookup

pub mod account;
pub mod api;
pub mod catalog;
pub mod cep;
pub mod config;
pub mod error;
pub mod keychain;
pub mod orders;
pub mod sign_in;
pub mod types;

pub use api::{ApiClient, AuthorizedClient};
pub use cep::CepClient;
pub use config::ClientConfig;
pub use error::ApiError;
pub use keychain::KeyringCredentialStore;
pub use orders::count_by_status;
pub use sign_in::{SignInError, sign_in};
pub use types::{
    Category, CategoryInput, CepAddress, Item, ItemInput, Order, OrderLine, OrderStatus,
    PasswordResetToken,
};
