//! reqwest-backed [`Engine`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, Method, RequestBuilder};
use serde_json::{Map, Value};

use crate::config::EngineOptions;
use crate::engine::{encode_query, Engine, Headers, RawResponse, TokenSlot};
use crate::error::ClientError;
use crate::token::Token;

/// Production engine: a pooled `reqwest::Client` plus the token slot.
#[derive(Debug)]
pub struct HttpEngine {
    client: Client,
    token: TokenSlot,
}

impl HttpEngine {
    /// Build an engine from options.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Configuration`] if the HTTP client cannot be built.
    pub fn new(options: &EngineOptions) -> Result<Self, ClientError> {
        let mut default_headers = HeaderMap::new();
        default_headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let mut builder = Client::builder()
            .timeout(Duration::from_secs(options.timeout_seconds))
            .default_headers(default_headers);

        if options.insecure_skip_verify {
            tracing::warn!("TLS certificate verification is disabled");
            builder = builder.danger_accept_invalid_certs(true);
        }

        let client = builder
            .build()
            .map_err(|e| ClientError::Configuration(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            token: TokenSlot::default(),
        })
    }

    fn request(&self, method: Method, url: &str, headers: &Headers) -> RequestBuilder {
        headers
            .iter()
            .fold(self.client.request(method, url), |request, (name, value)| {
                request.header(*name, value)
            })
    }

    async fn execute(request: RequestBuilder) -> Result<RawResponse, ClientError> {
        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        Ok(RawResponse { status, body })
    }
}

#[async_trait]
impl Engine for HttpEngine {
    async fn post_no_auth(
        &self,
        body: &Value,
        url: &str,
        headers: &Headers,
    ) -> Result<RawResponse, ClientError> {
        tracing::debug!(%url, "POST");
        Self::execute(self.request(Method::POST, url, headers).json(body)).await
    }

    async fn get_no_auth(
        &self,
        query: &Map<String, Value>,
        url: &str,
        headers: &Headers,
    ) -> Result<RawResponse, ClientError> {
        tracing::debug!(%url, params = query.len(), "GET");
        let request = self
            .request(Method::GET, url, headers)
            .query(&encode_query(query));
        Self::execute(request).await
    }

    async fn delete_no_auth(
        &self,
        url: &str,
        headers: &Headers,
    ) -> Result<RawResponse, ClientError> {
        tracing::debug!(%url, "DELETE");
        Self::execute(self.request(Method::DELETE, url, headers)).await
    }

    fn set_token(&mut self, token: Token) -> Result<(), ClientError> {
        self.token.set(token)
    }

    fn needs_authentication(&mut self) -> bool {
        self.token.needs_authentication()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_engine_needs_authentication() {
        let mut engine = HttpEngine::new(&EngineOptions::default()).unwrap();
        assert!(engine.needs_authentication());
    }

    #[test]
    fn engine_keeps_valid_token() {
        let mut engine = HttpEngine::new(&EngineOptions::default()).unwrap();
        engine.set_token(Token::new("key", 60)).unwrap();
        assert!(!engine.needs_authentication());
    }

    #[test]
    fn engine_rejects_expired_token() {
        let mut engine = HttpEngine::new(&EngineOptions::default()).unwrap();
        let mut token = Token::new("key", 60);
        token.set_expires_in(-10);
        assert!(matches!(
            engine.set_token(token),
            Err(ClientError::InvalidToken)
        ));
        assert!(engine.needs_authentication());
    }

    #[test]
    fn insecure_engine_builds() {
        let options = EngineOptions::default().with_insecure_skip_verify(true);
        assert!(HttpEngine::new(&options).is_ok());
    }
}
