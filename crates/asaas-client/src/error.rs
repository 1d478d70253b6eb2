//! Client error types.

use asaas_core::{ModelError, ValidationError};

/// Errors that can occur when using the Asaas client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// HTTP request failed (connection, TLS, timeout).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A response body could not be decoded.
    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// An entity or argument failed local validation; nothing was sent.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Asaas answered with an error envelope.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// One `Code: ..., Description: ...` line per reported error.
        message: String,
    },

    /// A token was rejected because it is already invalid.
    #[error("token is invalid")]
    InvalidToken,

    /// The engine still had no valid token when the request was about to go out.
    #[error("authentication required")]
    AuthenticationRequired,

    /// No credential was provided.
    #[error("missing authentication data")]
    MissingAuthenticationData,

    /// Customer creation was refused without a usable error envelope.
    #[error("customer creation failed")]
    CustomerCreationFailed,

    /// Customer lookup was refused without a usable error envelope.
    #[error("customer not found")]
    CustomerNotFound,

    /// A subscription call was refused without a usable error envelope.
    #[error("subscription failed")]
    SubscriptionFailed,

    /// A subscription identifier is missing.
    #[error("subscription id is required")]
    SubscriptionIdRequired,

    /// Invalid configuration (credentials file, environment, HTTP client).
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl From<ModelError> for ClientError {
    fn from(err: ModelError) -> Self {
        match err {
            ModelError::Json(e) => Self::Decode(e),
            ModelError::Validation(e) => Self::Validation(e),
        }
    }
}
