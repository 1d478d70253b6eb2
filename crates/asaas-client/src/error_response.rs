//! Asaas error envelope: `{"errors": [{"code": ..., "description": ...}]}`.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ClientError;

/// One entry of the error envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorDetail {
    /// Machine-readable code, e.g. `invalid_action`.
    #[serde(default)]
    pub code: String,
    /// Human-readable description.
    #[serde(default)]
    pub description: String,
}

/// Body of a non-success Asaas response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Reported errors, in server order.
    #[serde(default)]
    pub errors: Vec<ApiErrorDetail>,
}

impl ErrorResponse {
    /// Decode an envelope from a raw body.
    ///
    /// # Errors
    ///
    /// Returns an error if the body is not a JSON object of the envelope shape.
    pub fn decode(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Whether any error was reported.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// One `Code: X, Description: Y` line per error.
    #[must_use]
    pub fn format(&self) -> String {
        self.to_string()
    }

    /// Convert into a [`ClientError::Api`], or `None` if no error was reported.
    #[must_use]
    pub fn to_error(&self, status: u16) -> Option<ClientError> {
        self.has_errors().then(|| ClientError::Api {
            status,
            message: self.format(),
        })
    }
}

impl fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.errors.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "Code: {}, Description: {}", error.code, error.description)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_envelope() {
        let raw = r#"{"errors":[{"code":"invalid_action","description":"Não é permitido"}]}"#;
        let response = ErrorResponse::decode(raw).unwrap();
        assert!(response.has_errors());
        assert_eq!(response.errors[0].code, "invalid_action");
        assert_eq!(
            response.format(),
            "Code: invalid_action, Description: Não é permitido"
        );
    }

    #[test]
    fn entries_are_newline_separated() {
        let raw = r#"{"errors":[{"code":"a","description":"first"},{"code":"b","description":"second"}]}"#;
        let response = ErrorResponse::decode(raw).unwrap();
        assert_eq!(
            response.format(),
            "Code: a, Description: first\nCode: b, Description: second"
        );
    }

    #[test]
    fn empty_envelope_has_no_error() {
        let response = ErrorResponse::decode(r#"{"errors":[]}"#).unwrap();
        assert!(!response.has_errors());
        assert!(response.format().is_empty());
        assert!(response.to_error(400).is_none());
    }

    #[test]
    fn to_error_carries_status_and_text() {
        let response = ErrorResponse::decode(
            r#"{"errors":[{"code":"invalid_cpfCnpj","description":"CPF inválido"}]}"#,
        )
        .unwrap();
        let err = response.to_error(400).unwrap();
        assert!(matches!(err, ClientError::Api { status: 400, .. }));
        assert!(err.to_string().contains("invalid_cpfCnpj"));
    }

    #[test]
    fn non_json_body_fails_to_decode() {
        assert!(ErrorResponse::decode("<html>Bad Gateway</html>").is_err());
        assert!(ErrorResponse::decode("").is_err());
    }
}
