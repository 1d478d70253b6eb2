//! Asaas REST client implementation.

use std::path::Path;

use asaas_core::{Credential, Customer, CustomerList, Subscription, ValidationError};
use serde_json::{Map, Value};

use crate::config::{load_credential_env, load_credential_file, EngineOptions};
use crate::engine::{Engine, RawResponse};
use crate::error::ClientError;
use crate::error_response::ErrorResponse;
use crate::http::HttpEngine;
use crate::token::{Token, TOKEN_LIFETIME_MINUTES};

const CUSTOMERS_PATH: &str = "/v3/customers";
const SUBSCRIPTIONS_PATH: &str = "/v3/subscriptions";

/// Asaas API client.
///
/// Every operation authenticates on demand, validates its input locally,
/// performs exactly one HTTP call and decodes the reply. Operations take
/// `&mut self` because authentication may replace the engine's token; share a
/// client between tasks behind a mutex, or create one per worker.
#[derive(Debug)]
pub struct AsaasClient<E: Engine = HttpEngine> {
    engine: E,
    credential: Credential,
    base_link: String,
}

impl AsaasClient<HttpEngine> {
    /// Create a client from a JSON credentials file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing or malformed, or if the HTTP
    /// client cannot be built.
    pub fn from_credentials_file(
        path: impl AsRef<Path>,
        options: &EngineOptions,
    ) -> Result<Self, ClientError> {
        let credential = load_credential_file(path)?;
        Ok(Self::new(HttpEngine::new(options)?, credential))
    }

    /// Create a client from `ASAAS_ACCESS_TOKEN` and `ASAAS_LINK`.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is missing or the HTTP client cannot be
    /// built.
    pub fn from_env(options: &EngineOptions) -> Result<Self, ClientError> {
        let credential = load_credential_env()?;
        Ok(Self::new(HttpEngine::new(options)?, credential))
    }
}

impl<E: Engine> AsaasClient<E> {
    /// Create a client over an engine.
    ///
    /// The credential is not checked here; `authenticate()` reports a missing or
    /// incomplete credential on first use.
    pub fn new(engine: E, credential: Credential) -> Self {
        let base_link = credential.link.trim_end_matches('/').to_string();
        Self {
            engine,
            credential,
            base_link,
        }
    }

    /// Override the base URL taken from the credential.
    pub fn set_base_link(&mut self, base_link: impl Into<String>) {
        self.base_link = base_link.into().trim_end_matches('/').to_string();
    }

    /// Base URL every path is appended to.
    #[must_use]
    pub fn base_link(&self) -> &str {
        &self.base_link
    }

    /// Install a token directly.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidToken`] if the token is not valid.
    pub fn set_token(&mut self, token: Token) -> Result<(), ClientError> {
        self.engine.set_token(token)
    }

    /// The underlying engine.
    #[must_use]
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// The underlying engine, mutably.
    #[must_use]
    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    /// Make sure the engine holds a valid token.
    ///
    /// Does nothing while the current token is valid; otherwise mints a new
    /// token from the credential's access token, valid for 60 minutes.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::MissingAuthenticationData`] for an empty
    /// credential, the credential's validation error for an incomplete one, or
    /// [`ClientError::InvalidToken`] if the engine refuses the token.
    pub fn authenticate(&mut self) -> Result<(), ClientError> {
        if !self.engine.needs_authentication() {
            return Ok(());
        }
        if self.credential.is_empty() {
            return Err(ClientError::MissingAuthenticationData);
        }
        self.credential.validate()?;

        tracing::debug!("Minting Asaas token");
        let token = Token::new(self.credential.access_token.clone(), TOKEN_LIFETIME_MINUTES);
        self.engine.set_token(token)
    }

    /// Create a customer.
    ///
    /// # Errors
    ///
    /// Returns a validation error before sending an invalid customer, the API's
    /// error envelope on refusal, or [`ClientError::CustomerCreationFailed`]
    /// when the refusal carries no usable envelope.
    pub async fn create_customer(&mut self, customer: &Customer) -> Result<Customer, ClientError> {
        self.authenticate()?;
        customer.validate()?;
        self.ensure_authenticated()?;

        let body = serde_json::to_value(customer.to_request_body())?;
        let response = self
            .engine
            .post_no_auth(&body, &self.link(CUSTOMERS_PATH), &self.write_headers())
            .await?;

        if !response.is_ok() {
            return Err(failure(
                "create_customer",
                &response,
                ClientError::CustomerCreationFailed,
            ));
        }
        Ok(Customer::from_bytes(response.body.as_bytes())?)
    }

    /// Fetch a customer by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::CustomerIdRequired`] for an empty id, the API's
    /// error envelope on refusal, or [`ClientError::CustomerNotFound`].
    pub async fn get_customer(&mut self, customer_id: &str) -> Result<Customer, ClientError> {
        self.authenticate()?;
        if customer_id.is_empty() {
            return Err(ValidationError::CustomerIdRequired.into());
        }
        self.ensure_authenticated()?;

        let url = self.link(&format!("{CUSTOMERS_PATH}/{customer_id}"));
        let response = self
            .engine
            .get_no_auth(&Map::new(), &url, &self.read_headers())
            .await?;

        if !response.is_ok() {
            return Err(failure(
                "get_customer",
                &response,
                ClientError::CustomerNotFound,
            ));
        }
        Ok(Customer::from_bytes(response.body.as_bytes())?)
    }

    /// List one page of customers matching `filter` (e.g. `{"name": "John"}`).
    ///
    /// # Errors
    ///
    /// Returns the API's error envelope on refusal, or
    /// [`ClientError::CustomerNotFound`].
    pub async fn list_customers(
        &mut self,
        filter: &Map<String, Value>,
    ) -> Result<CustomerList, ClientError> {
        self.authenticate()?;
        self.ensure_authenticated()?;

        let response = self
            .engine
            .get_no_auth(filter, &self.link(CUSTOMERS_PATH), &self.read_headers())
            .await?;

        if !response.is_ok() {
            return Err(failure(
                "list_customers",
                &response,
                ClientError::CustomerNotFound,
            ));
        }
        Ok(CustomerList::from_bytes(response.body.as_bytes())?)
    }

    /// Create a boleto subscription.
    ///
    /// # Errors
    ///
    /// Returns a validation error before sending an invalid subscription, the
    /// API's error envelope on refusal, or [`ClientError::SubscriptionFailed`].
    pub async fn subscribe(
        &mut self,
        subscription: &Subscription,
    ) -> Result<Subscription, ClientError> {
        self.authenticate()?;
        subscription.validate()?;
        self.ensure_authenticated()?;

        let body = serde_json::to_value(subscription.to_request_body())?;
        let response = self
            .engine
            .post_no_auth(&body, &self.link(SUBSCRIPTIONS_PATH), &self.write_headers())
            .await?;

        if !response.is_ok() {
            return Err(failure(
                "subscribe",
                &response,
                ClientError::SubscriptionFailed,
            ));
        }
        Ok(Subscription::from_bytes(response.body.as_bytes())?)
    }

    /// Fetch a subscription by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::SubscriptionIdRequired`] for an empty id, the API's
    /// error envelope on refusal, or [`ClientError::SubscriptionFailed`].
    pub async fn get_subscription(
        &mut self,
        subscription_id: &str,
    ) -> Result<Subscription, ClientError> {
        self.authenticate()?;
        if subscription_id.is_empty() {
            return Err(ClientError::SubscriptionIdRequired);
        }
        self.ensure_authenticated()?;

        let url = self.link(&format!("{SUBSCRIPTIONS_PATH}/{subscription_id}"));
        let response = self
            .engine
            .get_no_auth(&Map::new(), &url, &self.read_headers())
            .await?;

        if !response.is_ok() {
            return Err(failure(
                "get_subscription",
                &response,
                ClientError::SubscriptionFailed,
            ));
        }
        Ok(Subscription::from_bytes(response.body.as_bytes())?)
    }

    /// Cancel a subscription. The response body is not decoded.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::SubscriptionIdRequired`] for an empty id, or
    /// [`ClientError::SubscriptionFailed`] for any status other than 200.
    pub async fn unsubscribe(&mut self, subscription_id: &str) -> Result<(), ClientError> {
        self.authenticate()?;
        if subscription_id.is_empty() {
            return Err(ClientError::SubscriptionIdRequired);
        }
        self.ensure_authenticated()?;

        let url = self.link(&format!("{SUBSCRIPTIONS_PATH}/{subscription_id}"));
        let response = self
            .engine
            .delete_no_auth(&url, &self.read_headers())
            .await?;

        if !response.is_ok() {
            tracing::warn!(
                operation = "unsubscribe",
                status = response.status,
                "Asaas request failed"
            );
            return Err(ClientError::SubscriptionFailed);
        }
        Ok(())
    }

    /// Guard against the engine losing its token between `authenticate()` and
    /// dispatch.
    fn ensure_authenticated(&mut self) -> Result<(), ClientError> {
        if self.engine.needs_authentication() {
            return Err(ClientError::AuthenticationRequired);
        }
        Ok(())
    }

    fn link(&self, path: &str) -> String {
        format!("{}{path}", self.base_link)
    }

    fn read_headers(&self) -> [(&'static str, String); 2] {
        [
            ("access_token", self.credential.access_token.clone()),
            ("accept", "application/json".to_string()),
        ]
    }

    fn write_headers(&self) -> [(&'static str, String); 3] {
        [
            ("access_token", self.credential.access_token.clone()),
            ("accept", "application/json".to_string()),
            ("content-type", "application/json".to_string()),
        ]
    }
}

/// Turn a non-200 response into an error, preferring the API's own envelope.
fn failure(operation: &'static str, response: &RawResponse, fallback: ClientError) -> ClientError {
    tracing::warn!(operation, status = response.status, "Asaas request failed");
    match ErrorResponse::decode(&response.body) {
        Ok(envelope) => envelope.to_error(response.status).unwrap_or(fallback),
        Err(_) => fallback,
    }
}
