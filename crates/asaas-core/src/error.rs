//! Error types for Asaas entities.

/// Result type for entity decoding.
pub type Result<T> = std::result::Result<T, ModelError>;

/// A violated entity invariant.
///
/// Variants are reported in the field order of the entity that produced them;
/// `validate()` always returns the first one it finds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Credential has an empty access token.
    #[error("access token is required")]
    AccessTokenRequired,

    /// Credential has an empty base link.
    #[error("link is required")]
    LinkRequired,

    /// Customer has an empty name.
    #[error("name is required")]
    NameRequired,

    /// Customer has an empty CPF/CNPJ.
    #[error("document is required")]
    DocumentRequired,

    /// Customer has neither a mobile phone nor an email.
    #[error("at least one contact info (mobile phone or email) is required")]
    NoContactInfo,

    /// A customer identifier is missing.
    #[error("customer ID is required")]
    CustomerIdRequired,

    /// Subscription has an empty billing type.
    #[error("billing type is required")]
    BillingTypeRequired,

    /// Subscription due date is absent or not a `YYYY-MM-DD` date.
    #[error("next due date is required")]
    NextDueDateRequired,

    /// Subscription value is zero or negative.
    #[error("value must be positive")]
    ValueMustBePositive,

    /// Subscription has an empty cycle.
    #[error("cycle is required")]
    CycleRequired,

    /// Subscription billing type is not `BOLETO`.
    #[error("only boleto billing type is allowed for subscriptions")]
    OnlyBoletoAllowed,
}

/// Errors produced when decoding an entity from raw JSON.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// The payload is not well-formed JSON of the expected shape.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The payload decoded but the entity is invalid.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}
