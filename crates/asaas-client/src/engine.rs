//! Transport capability consumed by [`AsaasClient`](crate::AsaasClient).
//!
//! An engine sends header-carrying requests and owns the token slot. The
//! `*_no_auth` methods never attach the token themselves: the caller passes the
//! `access_token` header explicitly.

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::error::ClientError;
use crate::token::Token;

/// Request headers as `(name, value)` pairs.
pub type Headers = [(&'static str, String)];

/// Status code and raw body of a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body as text.
    pub body: String,
}

impl RawResponse {
    /// Create a response.
    #[must_use]
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Whether the status is `200 OK`, the only status Asaas uses for success.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}

/// HTTP transport plus the token slot.
#[async_trait]
pub trait Engine: Send + Sync {
    /// POST a JSON body.
    async fn post_no_auth(
        &self,
        body: &Value,
        url: &str,
        headers: &Headers,
    ) -> Result<RawResponse, ClientError>;

    /// GET with the given query parameters (see [`encode_query`]).
    async fn get_no_auth(
        &self,
        query: &Map<String, Value>,
        url: &str,
        headers: &Headers,
    ) -> Result<RawResponse, ClientError>;

    /// DELETE.
    async fn delete_no_auth(&self, url: &str, headers: &Headers)
        -> Result<RawResponse, ClientError>;

    /// Install a token.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidToken`] if the token is not currently valid.
    fn set_token(&mut self, token: Token) -> Result<(), ClientError>;

    /// Whether a valid token is missing.
    ///
    /// An expired token is dropped from the slot as a side effect, so the next
    /// call sees an empty slot.
    fn needs_authentication(&mut self) -> bool;
}

/// Token slot shared by engine implementations.
#[derive(Debug, Default)]
pub(crate) struct TokenSlot(Option<Token>);

impl TokenSlot {
    pub(crate) fn set(&mut self, token: Token) -> Result<(), ClientError> {
        if !token.is_valid() {
            return Err(ClientError::InvalidToken);
        }
        self.0 = Some(token);
        Ok(())
    }

    pub(crate) fn needs_authentication(&mut self) -> bool {
        let Some(token) = &self.0 else {
            return true;
        };
        if token.is_valid() {
            return false;
        }
        tracing::debug!("Held token expired, evicting");
        self.0 = None;
        true
    }

    #[cfg(test)]
    pub(crate) fn get(&self) -> Option<&Token> {
        self.0.as_ref()
    }

    /// Store a token without checking it.
    #[cfg(test)]
    pub(crate) fn force(&mut self, token: Token) {
        self.0 = Some(token);
    }
}

/// Flatten filter values into query-string pairs.
///
/// Strings pass through, booleans become `true` / `false`, numbers use their
/// default formatting, arrays and objects are sent as compact JSON and `null`
/// entries are dropped.
#[must_use]
pub fn encode_query(params: &Map<String, Value>) -> Vec<(String, String)> {
    params
        .iter()
        .filter_map(|(key, value)| {
            let encoded = match value {
                Value::Null => return None,
                Value::String(s) => s.clone(),
                Value::Bool(b) => b.to_string(),
                Value::Number(n) => n.to_string(),
                Value::Array(_) | Value::Object(_) => value.to_string(),
            };
            Some((key.clone(), encoded))
        })
        .collect()
}
