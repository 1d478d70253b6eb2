//! Inbound payment webhook notifications.
//!
//! Asaas posts one of these for every payment state change. They are read-only:
//! the client never sends them, so nothing here is validated beyond JSON shape.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::serde_util::{from_object, null_as_default};

/// Event sent when a payment is confirmed.
pub const EVENT_PAYMENT_RECEIVED: &str = "PAYMENT_RECEIVED";
/// Event sent when a payment is removed.
pub const EVENT_PAYMENT_DELETED: &str = "PAYMENT_DELETED";
/// Event sent when a payment is issued.
pub const EVENT_PAYMENT_CREATED: &str = "PAYMENT_CREATED";
/// Event sent when a payment passes its due date.
pub const EVENT_PAYMENT_OVERDUE: &str = "PAYMENT_OVERDUE";

/// Classification of a webhook by its `event` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaymentEvent {
    /// `PAYMENT_RECEIVED`.
    Paid,
    /// `PAYMENT_DELETED`.
    Cancelled,
    /// `PAYMENT_CREATED`.
    Open,
    /// `PAYMENT_OVERDUE`.
    Overdue,
    /// Any other event.
    Other,
}

impl PaymentEvent {
    /// Classify a raw event name.
    #[must_use]
    pub fn from_event(event: &str) -> Self {
        match event {
            EVENT_PAYMENT_RECEIVED => Self::Paid,
            EVENT_PAYMENT_DELETED => Self::Cancelled,
            EVENT_PAYMENT_CREATED => Self::Open,
            EVENT_PAYMENT_OVERDUE => Self::Overdue,
            _ => Self::Other,
        }
    }
}

/// A payment webhook: `{id, event, dateCreated, payment}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookPayment {
    /// Event identifier, unique per delivery.
    #[serde(rename = "id", default, deserialize_with = "null_as_default")]
    pub event_id: String,

    /// Event name, e.g. `PAYMENT_RECEIVED`.
    #[serde(default, deserialize_with = "null_as_default")]
    pub event: String,

    /// When the event was generated (`YYYY-MM-DD HH:MM:SS`).
    #[serde(default, deserialize_with = "null_as_default")]
    pub date_created: String,

    /// The payment the event refers to.
    #[serde(default)]
    pub payment: Payment,
}

/// The Asaas payment object embedded in a webhook.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Payment {
    /// Object type, always `payment`.
    pub object: Option<String>,
    /// Payment identifier (`pay_...`).
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    /// Creation date.
    pub date_created: Option<String>,
    /// Customer identifier.
    pub customer: Option<String>,
    /// Subscription identifier, when the payment belongs to one.
    pub subscription: Option<String>,
    /// Installment identifier, when the payment belongs to one.
    pub installment: Option<String>,
    /// Payment link identifier.
    pub payment_link: Option<String>,
    /// Current due date.
    pub due_date: Option<String>,
    /// Due date at creation.
    pub original_due_date: Option<String>,
    /// Charged amount, in reais.
    #[serde(deserialize_with = "null_as_default")]
    pub value: f64,
    /// Amount after fees.
    #[serde(deserialize_with = "null_as_default")]
    pub net_value: f64,
    /// Original amount, when the paid amount differs.
    pub original_value: Option<f64>,
    /// Interest charged.
    pub interest_value: Option<f64>,
    /// Bank slip "nosso número".
    pub nosso_numero: Option<String>,
    /// Free-text description.
    pub description: Option<String>,
    /// Caller-side reference.
    pub external_reference: Option<String>,
    /// Billing type (`BOLETO`, `CREDIT_CARD`, `PIX`, ...).
    pub billing_type: Option<String>,
    /// Payment status.
    pub status: Option<String>,
    /// PIX transaction identifier.
    pub pix_transaction: Option<String>,
    /// Confirmation date.
    pub confirmed_date: Option<String>,
    /// Settlement date.
    pub payment_date: Option<String>,
    /// Date the customer paid.
    pub client_payment_date: Option<String>,
    /// Installment number.
    pub installment_number: Option<u32>,
    /// Credit date.
    pub credit_date: Option<String>,
    /// Custody identifier.
    pub custody: Option<String>,
    /// Estimated credit date.
    pub estimated_credit_date: Option<String>,
    /// Invoice URL.
    pub invoice_url: Option<String>,
    /// Bank slip URL.
    pub bank_slip_url: Option<String>,
    /// Receipt URL.
    pub transaction_receipt_url: Option<String>,
    /// Invoice number.
    pub invoice_number: Option<String>,
    /// Whether the payment was deleted.
    #[serde(deserialize_with = "null_as_default")]
    pub deleted: bool,
    /// Whether the payment was anticipated.
    #[serde(deserialize_with = "null_as_default")]
    pub anticipated: bool,
    /// Whether the payment can be anticipated.
    #[serde(deserialize_with = "null_as_default")]
    pub anticipable: bool,
    /// Last time the invoice was viewed.
    pub last_invoice_viewed_date: Option<String>,
    /// Last time the bank slip was viewed.
    pub last_bank_slip_viewed_date: Option<String>,
    /// Whether the slip is sent by post.
    #[serde(deserialize_with = "null_as_default")]
    pub postal_service: bool,
    /// Card details, for card payments.
    pub credit_card: Option<CreditCard>,
    /// Discount rule.
    pub discount: Option<Discount>,
    /// Late fine rule.
    pub fine: Option<Charge>,
    /// Late interest rule.
    pub interest: Option<Charge>,
    /// Split between wallets.
    #[serde(deserialize_with = "null_as_default")]
    pub split: Vec<Split>,
    /// Chargeback in progress, if any.
    pub chargeback: Option<Chargeback>,
    /// Refunds issued.
    #[serde(deserialize_with = "null_as_default")]
    pub refunds: Vec<Refund>,
}

/// Masked card data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreditCard {
    /// Last digits of the card.
    pub credit_card_number: Option<String>,
    /// Card brand.
    pub credit_card_brand: Option<String>,
    /// Tokenized card.
    pub credit_card_token: Option<String>,
}

/// Early-payment discount.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Discount {
    /// Discount amount or percentage.
    #[serde(deserialize_with = "null_as_default")]
    pub value: f64,
    /// Days before the due date the discount applies.
    #[serde(deserialize_with = "null_as_default")]
    pub due_date_limit_days: i32,
    /// Last day the discount applies.
    pub limited_date: Option<String>,
    /// `FIXED` or `PERCENTAGE`.
    pub r#type: Option<String>,
}

/// Fine or interest rule.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Charge {
    /// Amount or percentage.
    #[serde(deserialize_with = "null_as_default")]
    pub value: f64,
    /// `FIXED` or `PERCENTAGE`.
    pub r#type: Option<String>,
}

/// One leg of a payment split.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Split {
    /// Split identifier.
    pub id: Option<String>,
    /// Receiving wallet.
    pub wallet_id: Option<String>,
    /// Fixed amount sent to the wallet.
    pub fixed_value: Option<f64>,
    /// Percentage sent to the wallet.
    pub percentual_value: Option<f64>,
    /// Split status.
    pub status: Option<String>,
    /// Reason the split was refused.
    pub refusal_reason: Option<String>,
    /// Caller-side reference.
    pub external_reference: Option<String>,
    /// Description.
    pub description: Option<String>,
}

/// Chargeback state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Chargeback {
    /// Chargeback status.
    pub status: Option<String>,
    /// Chargeback reason.
    pub reason: Option<String>,
}

/// A refund of the payment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Refund {
    /// Refund identifier.
    pub id: Option<String>,
    /// Refunded amount.
    #[serde(deserialize_with = "null_as_default")]
    pub value: f64,
    /// Description.
    pub description: Option<String>,
    /// Refund status.
    pub status: Option<String>,
    /// When the refund was created.
    pub date_created: Option<String>,
}

impl WebhookPayment {
    /// Decode a webhook delivery.
    ///
    /// # Errors
    ///
    /// Returns an error if the body is not a webhook JSON object.
    pub fn from_bytes(raw: &[u8]) -> Result<Self> {
        Ok(from_object(raw)?)
    }

    /// Classify the event.
    #[must_use]
    pub fn kind(&self) -> PaymentEvent {
        PaymentEvent::from_event(&self.event)
    }

    /// Whether the payment was received.
    #[must_use]
    pub fn is_paid(&self) -> bool {
        self.kind() == PaymentEvent::Paid
    }

    /// Whether the payment was deleted.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.kind() == PaymentEvent::Cancelled
    }

    /// Whether the payment was just issued.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.kind() == PaymentEvent::Open
    }

    /// Whether the payment is overdue.
    #[must_use]
    pub fn is_overdue(&self) -> bool {
        self.kind() == PaymentEvent::Overdue
    }

    /// Payment value in centavos, truncating fractions of a centavo.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn value_as_int(&self) -> i64 {
        (self.payment.value * 100.0) as i64
    }

    /// Alias of [`value_as_int`](Self::value_as_int).
    #[must_use]
    pub fn amount(&self) -> i64 {
        self.value_as_int()
    }

    /// Identifier of the payment (not of the event).
    #[must_use]
    pub fn payment_id(&self) -> &str {
        &self.payment.id
    }

    /// Settlement date, falling back to the date the customer paid.
    #[must_use]
    pub fn payment_date(&self) -> Option<&str> {
        self.payment
            .payment_date
            .as_deref()
            .filter(|d| !d.is_empty())
            .or(self.payment.client_payment_date.as_deref())
    }

    /// Subscription the payment belongs to, if any.
    #[must_use]
    pub fn subscription_id(&self) -> Option<&str> {
        self.payment.subscription.as_deref()
    }
}
