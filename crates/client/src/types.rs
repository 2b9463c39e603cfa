//! Request and response shapes of the OrderLink REST API.

use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use orderlink_core::{CategoryId, DomainError, DomainResult, ItemId, OrderId};

/// Menu category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Inactive categories stay on file but are hidden from the menu.
    #[serde(default = "default_true")]
    pub active: bool,
}

impl Category {
    /// Full record for `PUT /categories/{id}`, starting from what is on file.
    pub fn to_input(&self) -> CategoryInput {
        CategoryInput {
            name: self.name.clone(),
            description: self.description.clone(),
            active: self.active,
        }
    }
}

/// Body of category create/update calls.
///
/// The name is required and both text fields are trimmed; a blank
/// description is left out of the payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryInput {
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    active: bool,
}

impl CategoryInput {
    pub fn new(name: &str) -> DomainResult<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::MissingField("name"));
        }
        Ok(Self {
            name: name.to_string(),
            description: None,
            active: true,
        })
    }

    pub fn with_description(mut self, description: &str) -> Self {
        let description = description.trim();
        self.description = (!description.is_empty()).then(|| description.to_string());
        self
    }

    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct CategoryList {
    pub categories: Vec<Category>,
}

/// Menu item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<CategoryId>,
    #[serde(default = "default_true")]
    pub available: bool,
}

fn default_true() -> bool {
    true
}

/// Body of item create/update calls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemInput {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<CategoryId>,
    pub available: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ItemList {
    pub items: Vec<Item>,
}

/// Kitchen progress of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Pending,
    Preparing,
    Ready,
    Delivered,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "PENDING",
            OrderStatus::Preparing => "PREPARING",
            OrderStatus::Ready => "READY",
            OrderStatus::Delivered => "DELIVERED",
        }
    }

    /// Still needs attention from the kitchen or the floor.
    pub fn is_open(&self) -> bool {
        !matches!(self, OrderStatus::Delivered)
    }
}

impl core::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    pub id: String,
    pub quantity: u32,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl OrderLine {
    pub fn subtotal(&self) -> f64 {
        self.price * f64::from(self.quantity)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub table: String,
    pub status: OrderStatus,
    pub items: Vec<OrderLine>,
    pub total: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct OrderList {
    pub orders: Vec<Order>,
}

#[derive(Debug, Serialize)]
pub(crate) struct LoginRequest<'a> {
    pub identifier: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LoginResponse {
    #[serde(default)]
    pub token: Option<String>,
}

/// One-time token proving the reset code was verified.
pub struct PasswordResetToken(SecretString);

impl PasswordResetToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(SecretString::from(token.into()))
    }

    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl core::fmt::Debug for PasswordResetToken {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("PasswordResetToken([REDACTED])")
    }
}

/// Address returned by the CEP lookup service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CepAddress {
    #[serde(rename = "logradouro", default)]
    pub street: String,
    #[serde(rename = "bairro", default)]
    pub neighborhood: String,
    #[serde(rename = "localidade", default)]
    pub city: String,
    #[serde(rename = "uf", default)]
    pub state: String,
}
