//! Customer entity.

use serde::{Deserialize, Serialize};

use crate::error::{Result, ValidationError};
use crate::serde_util::{from_object, null_as_default, unknown_as_none};

/// Legal nature of a customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PersonType {
    /// Individual, identified by a CPF.
    Fisica,
    /// Company, identified by a CNPJ.
    Juridica,
}

/// A customer registered with Asaas.
///
/// Field names follow the Asaas wire format. Unset strings are empty; the
/// server sends `null` for them, which decodes to `""`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    /// Server-assigned identifier (`cus_...`); empty before creation.
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,

    /// Full name.
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,

    /// CPF or CNPJ document number.
    #[serde(default, deserialize_with = "null_as_default")]
    pub cpf_cnpj: String,

    /// Mobile phone number.
    #[serde(default, deserialize_with = "null_as_default")]
    pub mobile_phone: String,

    /// Email address.
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,

    /// Individual or company; `None` when absent, empty or unrecognized.
    #[serde(default, deserialize_with = "unknown_as_none")]
    pub person_type: Option<PersonType>,

    /// Caller-side reference stored alongside the customer.
    #[serde(default, deserialize_with = "null_as_default")]
    pub external_reference: String,
}

/// Request body for creating a customer.
///
/// Only `name` and `cpfCnpj` are always sent; every other field is omitted
/// while empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerRequest<'a> {
    /// Full name.
    pub name: &'a str,
    /// CPF or CNPJ.
    pub cpf_cnpj: &'a str,
    /// Mobile phone, if any.
    #[serde(skip_serializing_if = "str::is_empty")]
    pub mobile_phone: &'a str,
    /// Email, if any.
    #[serde(skip_serializing_if = "str::is_empty")]
    pub email: &'a str,
    /// Person type, if known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub person_type: Option<PersonType>,
    /// External reference, if any.
    #[serde(skip_serializing_if = "str::is_empty")]
    pub external_reference: &'a str,
}

impl Customer {
    /// Create an empty customer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the CPF/CNPJ document.
    #[must_use]
    pub fn with_cpf_cnpj(mut self, cpf_cnpj: impl Into<String>) -> Self {
        self.cpf_cnpj = cpf_cnpj.into();
        self
    }

    /// Set the mobile phone.
    #[must_use]
    pub fn with_mobile_phone(mut self, mobile_phone: impl Into<String>) -> Self {
        self.mobile_phone = mobile_phone.into();
        self
    }

    /// Set the email.
    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    /// Set the person type.
    #[must_use]
    pub fn with_person_type(mut self, person_type: PersonType) -> Self {
        self.person_type = Some(person_type);
        self
    }

    /// Set the external reference.
    #[must_use]
    pub fn with_external_reference(mut self, reference: impl Into<String>) -> Self {
        self.external_reference = reference.into();
        self
    }

    /// Check name, document and contact information, in that order.
    ///
    /// # Errors
    ///
    /// Returns the first rule the customer breaks.
    pub fn validate(&self) -> std::result::Result<(), ValidationError> {
        if self.name.is_empty() {
            return Err(ValidationError::NameRequired);
        }
        if self.cpf_cnpj.is_empty() {
            return Err(ValidationError::DocumentRequired);
        }
        if self.mobile_phone.is_empty() && self.email.is_empty() {
            return Err(ValidationError::NoContactInfo);
        }
        Ok(())
    }

    /// Project the fields sent when creating the customer.
    #[must_use]
    pub fn to_request_body(&self) -> CustomerRequest<'_> {
        CustomerRequest {
            name: &self.name,
            cpf_cnpj: &self.cpf_cnpj,
            mobile_phone: &self.mobile_phone,
            email: &self.email,
            person_type: self.person_type,
            external_reference: &self.external_reference,
        }
    }

    /// Decode a customer from JSON and validate it.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or the customer is invalid.
    pub fn from_bytes(raw: &[u8]) -> Result<Self> {
        let customer: Self = from_object(raw)?;
        customer.validate()?;
        Ok(customer)
    }
}
