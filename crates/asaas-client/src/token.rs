//! Bearer token with a wall-clock expiry.

use std::fmt;

use chrono::{DateTime, Duration, NaiveDateTime, Utc};

/// Lifetime of a token minted by `authenticate()`, in minutes.
pub const TOKEN_LIFETIME_MINUTES: i64 = 60;

/// Format of `set_expires_at` / `expires_at_string`.
pub const EXPIRY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// An access key and the instant it stops being usable.
///
/// Tokens are never refreshed in place; a new one replaces the old. `Debug`
/// output redacts the key.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Token {
    key: String,
    expires_at: Option<DateTime<Utc>>,
}

impl Token {
    /// Create a token for `key` that expires `minutes` from now.
    #[must_use]
    pub fn new(key: impl Into<String>, minutes: i64) -> Self {
        let mut token = Self {
            key: key.into(),
            expires_at: None,
        };
        token.set_expires_in(minutes.saturating_mul(60));
        token
    }

    /// Replace the key.
    pub fn set_key(&mut self, key: impl Into<String>) {
        self.key = key.into();
    }

    /// Expire `seconds` from now. Negative values yield an already-expired token.
    pub fn set_expires_in(&mut self, seconds: i64) {
        self.expires_at =
            Duration::try_seconds(seconds).and_then(|d| Utc::now().checked_add_signed(d));
    }

    /// Set the expiry from a UTC `YYYY-MM-DD HH:MM:SS` literal.
    ///
    /// # Errors
    ///
    /// Returns the parse error and keeps the previous expiry if the literal is
    /// malformed.
    pub fn set_expires_at(&mut self, literal: &str) -> Result<(), chrono::ParseError> {
        let naive = NaiveDateTime::parse_from_str(literal, EXPIRY_FORMAT)?;
        self.expires_at = Some(naive.and_utc());
        Ok(())
    }

    /// Whether the token is usable right now.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.is_valid_at(Utc::now())
    }

    /// Whether the token is usable at `now`.
    #[must_use]
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        if self.key.is_empty() {
            return false;
        }
        self.expires_at.is_some_and(|expires_at| now < expires_at)
    }

    /// The access key.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The expiry instant, if set.
    #[must_use]
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires_at
    }

    /// The expiry formatted as `YYYY-MM-DD HH:MM:SS`, if set.
    #[must_use]
    pub fn expires_at_string(&self) -> Option<String> {
        self.expires_at
            .map(|at| at.format(EXPIRY_FORMAT).to_string())
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Token")
            .field("key", &"<redacted>")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}
