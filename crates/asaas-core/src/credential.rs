//! API credentials.

use std::fmt;

use serde::Deserialize;

use crate::error::{Result, ValidationError};
use crate::serde_util::{from_object, null_as_default};

/// Access token and base URL for an Asaas account.
///
/// Read once from the credentials file (`{"access_token": ..., "link": ...}`)
/// and never mutated afterwards. `Debug` output redacts the token.
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Credential {
    /// API access token, sent as the `access_token` header.
    #[serde(default, deserialize_with = "null_as_default")]
    pub access_token: String,

    /// Base URL of the API, e.g. `https://sandbox.asaas.com/api`.
    #[serde(default, deserialize_with = "null_as_default")]
    pub link: String,
}

impl Credential {
    /// Create an empty credential.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the access token.
    #[must_use]
    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = token.into();
        self
    }

    /// Set the base link.
    #[must_use]
    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = link.into();
        self
    }

    /// Whether neither field has been provided.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.access_token.is_empty() && self.link.is_empty()
    }

    /// Check that both the token and the link are present.
    ///
    /// # Errors
    ///
    /// Returns the first missing field.
    pub fn validate(&self) -> std::result::Result<(), ValidationError> {
        if self.access_token.is_empty() {
            return Err(ValidationError::AccessTokenRequired);
        }
        if self.link.is_empty() {
            return Err(ValidationError::LinkRequired);
        }
        Ok(())
    }

    /// Decode and validate a credential from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or a field is missing.
    pub fn from_bytes(raw: &[u8]) -> Result<Self> {
        let credential: Self = from_object(raw)?;
        credential.validate()?;
        Ok(credential)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("access_token", &"<redacted>")
            .field("link", &self.link)
            .finish()
    }
}
