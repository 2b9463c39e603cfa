//! `orderlink-core`: client-side domain rules.
//!
//! Pure functions and value objects only (no I/O): tax-document checksums,
//! sign-up and password-reset form validation, resource identifiers.

pub mod document;
pub mod error;
pub mod id;
pub mod password_reset;
pub mod registration;
pub mod value_object;

pub use document::{DocumentKind, TaxDocument, is_valid_cnpj, is_valid_cpf, only_digits};
pub use error::{DomainError, DomainResult};
pub use id::{CategoryId, ItemId, OrderId};
pub use password_reset::{EmailAddress, NewPassword, ResetCode};
pub use registration::{AddressForm, Cep, CompanyDetails, RegisterRequest, RegistrationForm};
pub use value_object::ValueObject;
