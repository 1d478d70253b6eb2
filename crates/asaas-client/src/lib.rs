//! Asaas Client SDK.
//!
//! This crate provides an authenticated client for the Asaas payments REST API:
//! customers and boleto subscriptions.
//!
//! # Example
//!
//! ```no_run
//! use asaas_client::{AsaasClient, Customer, EngineOptions, PersonType};
//!
//! # async fn example() -> Result<(), asaas_client::ClientError> {
//! let mut client =
//!     AsaasClient::from_credentials_file("asaas.json", &EngineOptions::default())?;
//!
//! let customer = client
//!     .create_customer(
//!         &Customer::new()
//!             .with_name("John Doe")
//!             .with_cpf_cnpj("00000000191")
//!             .with_email("john@example.com")
//!             .with_person_type(PersonType::Fisica),
//!     )
//!     .await?;
//!
//! println!("Created customer {}", customer.id);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod client;
pub mod config;
pub mod engine;
mod error;
pub mod error_response;
#[cfg(test)]
mod fake;
mod http;
pub mod token;

pub use client::AsaasClient;
pub use config::{load_credential_env, load_credential_file, EngineOptions};
pub use engine::{encode_query, Engine, Headers, RawResponse};
pub use error::ClientError;
pub use error_response::{ApiErrorDetail, ErrorResponse};
pub use http::HttpEngine;
pub use token::{Token, TOKEN_LIFETIME_MINUTES};

pub use asaas_core::{
    Credential, Customer, CustomerList, ModelError, PaymentEvent, PersonType, Subscription,
    ValidationError, WebhookPayment, BILLING_TYPE_BOLETO, CYCLE_MONTHLY,
};
