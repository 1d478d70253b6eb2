//! Core types for the Asaas payments API.
//!
//! This crate provides the entities exchanged with Asaas and the rules they must
//! satisfy before they are sent over the wire:
//!
//! - **Credentials**: `Credential`
//! - **Customers**: `Customer`, `CustomerList`, `PersonType`
//! - **Subscriptions**: `Subscription`
//! - **Webhooks**: `WebhookPayment`, `PaymentEvent`
//!
//! # Validation
//!
//! Every writable entity exposes `validate()`, which reports the *first* rule
//! that is violated, in field order. Decoding with `from_bytes()` runs the same
//! check, so a successfully decoded `Customer` or `Subscription` is always valid.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod credential;
pub mod customer;
pub mod customer_list;
pub mod error;
mod serde_util;
pub mod subscription;
pub mod webhook;

pub use credential::Credential;
pub use customer::{Customer, CustomerRequest, PersonType};
pub use customer_list::CustomerList;
pub use error::{ModelError, Result, ValidationError};
pub use subscription::{Subscription, SubscriptionRequest, BILLING_TYPE_BOLETO, CYCLE_MONTHLY};
pub use webhook::{PaymentEvent, WebhookPayment};
