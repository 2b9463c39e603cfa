//! Strongly-typed identifiers for backend resources.
//!
//! The backend assigns identifiers and hands them out as opaque strings; the
//! client never mints them. Wrapping them keeps a category id from being
//! passed where an item id is expected.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Identifier of a menu category.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(String);

/// Identifier of a menu item.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

/// Identifier of an order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(String);

macro_rules! impl_string_newtype {
    ($t:ty, $name:literal) => {
        impl $t {
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<$t> for String {
            fn from(value: $t) -> Self {
                value.0
            }
        }

        impl FromStr for $t {
            type Err = DomainError;

            /// Identifiers end up in URL paths, so blanks and `/` are refused.
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.trim();
                if s.is_empty() {
                    return Err(DomainError::invalid_id(format!("{}: empty", $name)));
                }
                if s.contains('/') {
                    return Err(DomainError::invalid_id(format!(
                        "{}: contains '/'",
                        $name
                    )));
                }
                Ok(Self(s.to_string()))
            }
        }
    };
}

impl_string_newtype!(CategoryId, "CategoryId");
impl_string_newtype!(ItemId, "ItemId");
impl_string_newtype!(OrderId, "OrderId");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_trims_and_rejects_blank() {
        let id: CategoryId = "  abc-1 ".parse().unwrap();
        assert_eq!(id.as_str(), "abc-1");

        assert!("   ".parse::<ItemId>().is_err());
    }

    #[test]
    fn parse_rejects_path_separators() {
        let err = "a/b".parse::<OrderId>().unwrap_err();
        assert!(matches!(err, DomainError::InvalidId(_)));
    }

    #[test]
    fn serde_is_transparent() {
        let id: ItemId = serde_json::from_str("\"item-7\"").unwrap();
        assert_eq!(id.to_string(), "item-7");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"item-7\"");
    }
}
