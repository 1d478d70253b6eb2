//! Client configuration and credential loading.

use std::path::Path;

use asaas_core::Credential;

use crate::error::ClientError;

/// Environment variable holding the access token.
pub const ENV_ACCESS_TOKEN: &str = "ASAAS_ACCESS_TOKEN";

/// Environment variable holding the API base link.
pub const ENV_LINK: &str = "ASAAS_LINK";

/// Options for [`HttpEngine`](crate::HttpEngine).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineOptions {
    /// Request timeout in seconds (default: 60).
    pub timeout_seconds: u64,

    /// Skip TLS certificate verification (default: false).
    ///
    /// Only meant for sandbox hosts with broken certificates.
    pub insecure_skip_verify: bool,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            timeout_seconds: 60,
            insecure_skip_verify: false,
        }
    }
}

impl EngineOptions {
    /// Set the request timeout.
    #[must_use]
    pub fn with_timeout_seconds(mut self, seconds: u64) -> Self {
        self.timeout_seconds = seconds;
        self
    }

    /// Enable or disable TLS certificate verification bypass.
    #[must_use]
    pub fn with_insecure_skip_verify(mut self, skip: bool) -> Self {
        self.insecure_skip_verify = skip;
        self
    }
}

/// Load and validate a credentials file (`{"access_token": ..., "link": ...}`).
///
/// # Errors
///
/// Returns [`ClientError::Configuration`] if the file cannot be read, and a
/// decode or validation error if its content is malformed.
pub fn load_credential_file(path: impl AsRef<Path>) -> Result<Credential, ClientError> {
    let path = path.as_ref();
    let contents = std::fs::read(path).map_err(|e| {
        ClientError::Configuration(format!("cannot read {}: {e}", path.display()))
    })?;
    let credential = Credential::from_bytes(&contents)?;
    tracing::info!(path = %path.display(), "Loaded Asaas credentials from file");
    Ok(credential)
}

/// Load and validate credentials from `ASAAS_ACCESS_TOKEN` and `ASAAS_LINK`.
///
/// # Errors
///
/// Returns a validation error naming the first missing variable's field.
pub fn load_credential_env() -> Result<Credential, ClientError> {
    let credential = Credential::new()
        .with_access_token(std::env::var(ENV_ACCESS_TOKEN).unwrap_or_default())
        .with_link(std::env::var(ENV_LINK).unwrap_or_default());
    credential.validate()?;
    tracing::debug!("Loaded Asaas credentials from environment");
    Ok(credential)
}
