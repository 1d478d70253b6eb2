//! Recurring subscription entity.
//!
//! This client only creates boleto subscriptions: `validate()` rejects any other
//! billing type even when every field is present.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ValidationError};
use crate::serde_util::{
    date_string, from_object, lenient_date, null_as_default, parse_date,
};

/// The only billing type accepted for subscriptions.
pub const BILLING_TYPE_BOLETO: &str = "BOLETO";

/// Monthly billing cycle.
pub const CYCLE_MONTHLY: &str = "MONTHLY";

/// A recurring charge attached to a customer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    /// Server-assigned identifier (`sub_...`); empty before creation.
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,

    /// Identifier of the customer being billed.
    #[serde(rename = "customer", default, deserialize_with = "null_as_default")]
    pub customer_id: String,

    /// Billing type; must be `BOLETO`.
    #[serde(default, deserialize_with = "null_as_default")]
    pub billing_type: String,

    /// Due date of the next charge.
    ///
    /// `None` when absent or when the wire value was not a valid date.
    #[serde(
        default,
        deserialize_with = "lenient_date",
        serialize_with = "date_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub next_due_date: Option<NaiveDate>,

    /// Amount charged every cycle, in reais.
    #[serde(default, deserialize_with = "null_as_default")]
    pub value: f64,

    /// Billing cycle, e.g. `MONTHLY`.
    #[serde(default, deserialize_with = "null_as_default")]
    pub cycle: String,

    /// Description shown on the boleto; optional.
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
}

/// Request body for creating a subscription.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionRequest<'a> {
    /// Identifier, only sent when already assigned.
    #[serde(skip_serializing_if = "str::is_empty")]
    pub id: &'a str,
    /// Customer identifier.
    pub customer: &'a str,
    /// Billing type.
    pub billing_type: &'a str,
    /// Next due date.
    #[serde(serialize_with = "date_string")]
    pub next_due_date: Option<NaiveDate>,
    /// Amount per cycle.
    pub value: f64,
    /// Billing cycle.
    pub cycle: &'a str,
    /// Description, omitted when empty.
    #[serde(skip_serializing_if = "str::is_empty")]
    pub description: &'a str,
}

impl Subscription {
    /// Create an empty subscription.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the identifier.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Set the customer being billed.
    #[must_use]
    pub fn with_customer_id(mut self, customer_id: impl Into<String>) -> Self {
        self.customer_id = customer_id.into();
        self
    }

    /// Set the billing type.
    #[must_use]
    pub fn with_billing_type(mut self, billing_type: impl Into<String>) -> Self {
        self.billing_type = billing_type.into();
        self
    }

    /// Set the next due date from a `YYYY-MM-DD` string.
    ///
    /// An unparseable string leaves the date unset; `validate()` then reports
    /// it as missing.
    #[must_use]
    pub fn with_next_due_date(mut self, date: &str) -> Self {
        self.next_due_date = parse_date(date);
        self
    }

    /// Set the next due date.
    #[must_use]
    pub fn with_next_due_on(mut self, date: NaiveDate) -> Self {
        self.next_due_date = Some(date);
        self
    }

    /// Set the amount per cycle.
    #[must_use]
    pub fn with_value(mut self, value: f64) -> Self {
        self.value = value;
        self
    }

    /// Set the billing cycle.
    #[must_use]
    pub fn with_cycle(mut self, cycle: impl Into<String>) -> Self {
        self.cycle = cycle.into();
        self
    }

    /// Set the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Whether the subscription is billed by boleto.
    #[must_use]
    pub fn is_boleto(&self) -> bool {
        self.billing_type == BILLING_TYPE_BOLETO
    }

    /// Check the subscription fields in wire order, then the boleto rule.
    ///
    /// # Errors
    ///
    /// Returns the first rule the subscription breaks.
    pub fn validate(&self) -> std::result::Result<(), ValidationError> {
        if self.customer_id.is_empty() {
            return Err(ValidationError::CustomerIdRequired);
        }
        if self.billing_type.is_empty() {
            return Err(ValidationError::BillingTypeRequired);
        }
        if self.next_due_date.is_none() {
            return Err(ValidationError::NextDueDateRequired);
        }
        if self.value <= 0.0 || self.value.is_nan() {
            return Err(ValidationError::ValueMustBePositive);
        }
        if self.cycle.is_empty() {
            return Err(ValidationError::CycleRequired);
        }
        if !self.is_boleto() {
            return Err(ValidationError::OnlyBoletoAllowed);
        }
        Ok(())
    }

    /// Project the fields sent when creating the subscription.
    #[must_use]
    pub fn to_request_body(&self) -> SubscriptionRequest<'_> {
        SubscriptionRequest {
            id: &self.id,
            customer: &self.customer_id,
            billing_type: &self.billing_type,
            next_due_date: self.next_due_date,
            value: self.value,
            cycle: &self.cycle,
            description: &self.description,
        }
    }

    /// Decode a subscription from JSON and validate it.
    ///
    /// A malformed `nextDueDate` is reported as
    /// [`ValidationError::NextDueDateRequired`], not as a JSON error.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or the subscription is invalid.
    pub fn from_bytes(raw: &[u8]) -> Result<Self> {
        let subscription: Self = from_object(raw)?;
        subscription.validate()?;
        Ok(subscription)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ModelError;

    fn monthly() -> Subscription {
        Subscription::new()
            .with_customer_id("12345")
            .with_billing_type(BILLING_TYPE_BOLETO)
            .with_next_due_date("2023-10-01")
            .with_value(100.0)
            .with_cycle(CYCLE_MONTHLY)
            .with_description("Test Subscription")
    }

    #[test]
    fn subscription_is_valid() {
        assert!(monthly().validate().is_ok());
    }

    #[test]
    fn subscription_requires_customer_id() {
        let subscription = monthly().with_customer_id("");
        assert_eq!(
            subscription.validate(),
            Err(ValidationError::CustomerIdRequired)
        );
    }

    #[test]
    fn subscription_requires_billing_type() {
        let subscription = monthly().with_billing_type("");
        assert_eq!(
            subscription.validate(),
            Err(ValidationError::BillingTypeRequired)
        );
    }

    #[test]
    fn subscription_requires_next_due_date() {
        let mut subscription = monthly();
        subscription.next_due_date = None;
        assert_eq!(
            subscription.validate(),
            Err(ValidationError::NextDueDateRequired)
        );
    }

    #[test]
    fn invalid_date_reads_as_missing() {
        let subscription = monthly().with_next_due_date("invalid-date");
        assert!(subscription.next_due_date.is_none());
        assert_eq!(
            subscription.validate(),
            Err(ValidationError::NextDueDateRequired)
        );
    }

    #[test]
    fn subscription_rejects_zero_value() {
        let subscription = monthly().with_value(0.0);
        assert_eq!(
            subscription.validate(),
            Err(ValidationError::ValueMustBePositive)
        );
    }

    #[test]
    fn subscription_rejects_negative_value() {
        let subscription = monthly().with_value(-50.0);
        assert_eq!(
            subscription.validate(),
            Err(ValidationError::ValueMustBePositive)
        );
    }

    #[test]
    fn subscription_requires_cycle() {
        let subscription = monthly().with_cycle("");
        assert_eq!(subscription.validate(), Err(ValidationError::CycleRequired));
    }

    #[test]
    fn description_is_optional() {
        let subscription = monthly().with_description("");
        assert!(subscription.validate().is_ok());

        let body = serde_json::to_value(subscription.to_request_body()).unwrap();
        assert!(body.get("description").is_none());
    }

    #[test]
    fn null_description_decodes() {
        let raw = br#"{"id":"sub_1","customer":"cus_1","billingType":"BOLETO","nextDueDate":"2025-07-24","value":100.0,"cycle":"MONTHLY","description":null}"#;
        let subscription = Subscription::from_bytes(raw).unwrap();
        assert_eq!(subscription.id, "sub_1");
        assert!(subscription.description.is_empty());
    }

    #[test]
    fn subscription_must_be_boleto() {
        let subscription = monthly().with_billing_type("INVALID_TYPE");
        assert_eq!(
            subscription.validate(),
            Err(ValidationError::OnlyBoletoAllowed)
        );
    }

    #[test]
    fn first_violation_wins() {
        let subscription = Subscription::new()
            .with_billing_type("PIX")
            .with_next_due_date("nope")
            .with_value(-1.0);
        assert_eq!(
            subscription.validate(),
            Err(ValidationError::CustomerIdRequired)
        );

        let subscription = subscription.with_customer_id("cus_1");
        assert_eq!(
            subscription.validate(),
            Err(ValidationError::NextDueDateRequired)
        );

        let subscription = subscription.with_next_due_date("2025-01-10");
        assert_eq!(
            subscription.validate(),
            Err(ValidationError::ValueMustBePositive)
        );

        let subscription = subscription.with_value(10.0);
        assert_eq!(
            subscription.validate(),
            Err(ValidationError::CycleRequired)
        );

        let subscription = subscription.with_cycle(CYCLE_MONTHLY);
        assert_eq!(
            subscription.validate(),
            Err(ValidationError::OnlyBoletoAllowed)
        );
    }

    #[test]
    fn subscription_unmarshal() {
        let raw = br#"{"object":"subscription","id":"sub_1ifrhps9m8mwficw","dateCreated":"2025-05-24","customer":"cus_000006724433","paymentLink":null,"value":100.00,"nextDueDate":"2025-07-24","cycle":"MONTHLY","description":"Monthly Subscription for John Doe","billingType":"BOLETO","deleted":false,"status":"ACTIVE","externalReference":null,"checkoutSession":null,"sendPaymentByPostalService":false,"fine":{"value":0,"type":"FIXED"},"interest":{"value":0,"type":"PERCENTAGE"},"split":null}"#;
        let subscription = Subscription::from_bytes(raw).unwrap();
        assert_eq!(subscription.id, "sub_1ifrhps9m8mwficw");
        assert_eq!(subscription.customer_id, "cus_000006724433");
        assert_eq!(subscription.billing_type, "BOLETO");
        assert!((subscription.value - 100.0).abs() < f64::EPSILON);
        assert_eq!(
            subscription
                .next_due_date
                .unwrap()
                .format("%Y-%m-%d")
                .to_string(),
            "2025-07-24"
        );
        assert_eq!(subscription.cycle, "MONTHLY");
        assert_eq!(subscription.description, "Monthly Subscription for John Doe");
    }

    #[test]
    fn unparseable_wire_date_is_a_validation_error() {
        let raw = br#"{"customer":"cus_1","billingType":"BOLETO","nextDueDate":"invalid-date","value":100.0,"cycle":"MONTHLY","description":"x"}"#;
        let err = Subscription::from_bytes(raw).unwrap_err();
        assert!(matches!(
            err,
            ModelError::Validation(ValidationError::NextDueDateRequired)
        ));
    }

    #[test]
    fn request_body_uses_wire_names() {
        let body = serde_json::to_value(monthly().to_request_body()).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "customer": "12345",
                "billingType": "BOLETO",
                "nextDueDate": "2023-10-01",
                "value": 100.0,
                "cycle": "MONTHLY",
                "description": "Test Subscription",
            })
        );
    }

    #[test]
    fn request_body_carries_assigned_id() {
        let body = serde_json::to_value(monthly().with_id("sub_9").to_request_body()).unwrap();
        assert_eq!(body["id"], "sub_9");
    }

    #[test]
    fn request_body_decodes_back_to_same_fields() {
        let subscription = monthly();
        let raw = serde_json::to_vec(&subscription.to_request_body()).unwrap();
        let back = Subscription::from_bytes(&raw).unwrap();
        assert_eq!(back, subscription);
    }
}
