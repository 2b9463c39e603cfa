//! Sign-up form validation.
//!
//! `RegistrationForm` mirrors what a user types on the sign-up screen;
//! `validate` turns it into the `RegisterRequest` payload sent to
//! `POST /auth/register`, or reports the first problem found.

use serde::{Deserialize, Serialize};

use crate::document::{DocumentKind, TaxDocument, only_digits};
use crate::error::{DomainError, DomainResult};
use crate::password_reset::NewPassword;
use crate::value_object::ValueObject;

pub const CEP_LEN: usize = 8;

/// Brazilian postal code, stored as 8 bare digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Cep(String);

impl ValueObject for Cep {}

impl Cep {
    pub fn parse(raw: &str) -> DomainResult<Self> {
        let digits = only_digits(raw);
        if digits.len() != CEP_LEN {
            return Err(DomainError::validation(format!(
                "CEP must have {CEP_LEN} digits"
            )));
        }
        Ok(Self(digits))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for Cep {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}-{}", &self.0[..5], &self.0[5..])
    }
}

/// Who is signing up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompanyDetails {
    /// Sole proprietor identified by a CPF.
    Individual { cpf: String },
    /// Company identified by a CNPJ, with its trade and legal names.
    Corporate {
        cnpj: String,
        trade_name: String,
        legal_name: String,
    },
}

impl CompanyDetails {
    pub fn kind(&self) -> DocumentKind {
        match self {
            CompanyDetails::Individual { .. } => DocumentKind::Cpf,
            CompanyDetails::Corporate { .. } => DocumentKind::Cnpj,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressForm {
    pub cep: String,
    pub street: String,
    pub number: String,
    pub complement: String,
}

/// Raw sign-up input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub company: CompanyDetails,
    pub address: AddressForm,
}

/// Payload of `POST /auth/register`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub tipo_empresa: DocumentKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cnpj: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nome_fantasia: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub razao_social: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpf: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cep: Option<String>,
    #[serde(rename = "endereco", skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    #[serde(rename = "numero", skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
    #[serde(rename = "complemento", skip_serializing_if = "Option::is_none")]
    pub complement: Option<String>,
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

impl RegistrationForm {
    /// Check the form and build the request payload.
    ///
    /// Checks run in the order the sign-up screen reports them: required
    /// fields, password, document, company names, CEP, address.
    pub fn validate(&self) -> DomainResult<RegisterRequest> {
        let name = non_empty(&self.name).ok_or(DomainError::MissingField("name"))?;
        let email = non_empty(&self.email).ok_or(DomainError::MissingField("email"))?;
        if self.password.is_empty() {
            return Err(DomainError::MissingField("password"));
        }
        if self.confirm_password.is_empty() {
            return Err(DomainError::MissingField("confirm_password"));
        }
        let password = NewPassword::new(&self.password, &self.confirm_password)?;

        let (document, names) = match &self.company {
            CompanyDetails::Individual { cpf } => (TaxDocument::cpf(cpf)?, None),
            CompanyDetails::Corporate {
                cnpj,
                trade_name,
                legal_name,
            } => {
                let document = TaxDocument::cnpj(cnpj)?;
                let trade = non_empty(trade_name).ok_or(DomainError::MissingField("trade_name"))?;
                let legal = non_empty(legal_name).ok_or(DomainError::MissingField("legal_name"))?;
                (document, Some((trade, legal)))
            }
        };

        let cep = match non_empty(&self.address.cep) {
            Some(raw) => Some(Cep::parse(&raw)?),
            None => None,
        };
        let street = non_empty(&self.address.street).ok_or(DomainError::MissingField("street"))?;
        let number = non_empty(&self.address.number).ok_or(DomainError::MissingField("number"))?;

        let (cpf, cnpj) = match document.kind() {
            DocumentKind::Cpf => (Some(document.digits().to_string()), None),
            DocumentKind::Cnpj => (None, Some(document.digits().to_string())),
        };
        let (nome_fantasia, razao_social) = names.unzip();

        Ok(RegisterRequest {
            name,
            email,
            password: password.into_inner(),
            tipo_empresa: document.kind(),
            cnpj,
            nome_fantasia,
            razao_social,
            cpf,
            cep: cep.map(|c| c.as_str().to_string()),
            street: Some(street),
            number: Some(number),
            complement: non_empty(&self.address.complement),
        })
    }
}
