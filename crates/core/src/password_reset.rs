//! Inputs of the forgot-password flow.
//!
//! The flow is: request a code for an e-mail address, verify the 6-digit
//! code (the backend answers with a one-time reset token), then submit the
//! new password with that token.

use crate::error::{DomainError, DomainResult};
use crate::value_object::ValueObject;

pub const RESET_CODE_LEN: usize = 6;
pub const MIN_PASSWORD_LEN: usize = 6;

/// Loosely checked e-mail address: trimmed, non-empty, contains `@`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl ValueObject for EmailAddress {}

impl EmailAddress {
    pub fn parse(raw: &str) -> DomainResult<Self> {
        let email = raw.trim();
        if email.is_empty() || !email.contains('@') {
            return Err(DomainError::validation("invalid e-mail address"));
        }
        Ok(Self(email.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// The numeric code mailed to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResetCode(String);

impl ValueObject for ResetCode {}

impl ResetCode {
    pub fn parse(raw: &str) -> DomainResult<Self> {
        let code = raw.trim();
        if code.len() != RESET_CODE_LEN || !code.bytes().all(|b| b.is_ascii_digit()) {
            return Err(DomainError::validation(format!(
                "reset code must be {RESET_CODE_LEN} digits"
            )));
        }
        Ok(Self(code.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A password that passed the confirmation and length rules.
#[derive(Clone, PartialEq, Eq)]
pub struct NewPassword(String);

impl NewPassword {
    pub fn new(password: &str, confirmation: &str) -> DomainResult<Self> {
        if password.is_empty() || confirmation.is_empty() {
            return Err(DomainError::MissingField("password"));
        }
        if password != confirmation {
            return Err(DomainError::validation("passwords do not match"));
        }
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(DomainError::validation(format!(
                "password must have at least {MIN_PASSWORD_LEN} characters"
            )));
        }
        Ok(Self(password.to_string()))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl core::fmt::Debug for NewPassword {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("NewPassword([REDACTED])")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_requires_at_sign() {
        assert_eq!(EmailAddress::parse("  ana@example.com ").unwrap().as_str(), "ana@example.com");
        assert!(EmailAddress::parse("ana.example.com").is_err());
        assert!(EmailAddress::parse("   ").is_err());
    }

    #[test]
    fn reset_code_is_exactly_six_digits() {
        assert_eq!(ResetCode::parse("012345").unwrap().as_str(), "012345");
        assert!(ResetCode::parse("12345").is_err());
        assert!(ResetCode::parse("1234567").is_err());
        assert!(ResetCode::parse("12a456").is_err());
    }

    #[test]
    fn new_password_rules() {
        assert_eq!(
            NewPassword::new("", "").unwrap_err(),
            DomainError::MissingField("password")
        );
        assert!(matches!(
            NewPassword::new("abcdef", "abcdeg"),
            Err(DomainError::Validation(_))
        ));
        assert!(matches!(
            NewPassword::new("abcde", "abcde"),
            Err(DomainError::Validation(_))
        ));
        assert_eq!(NewPassword::new("abcdef", "abcdef").unwrap().expose(), "abcdef");
    }

    #[test]
    fn new_password_debug_is_redacted() {
        let password = NewPassword::new("hunter22", "hunter22").unwrap();
        assert!(!format!("{password:?}").contains("hunter22"));
    }
}
