use std::fmt::{Debug, Formatter};

use crate::{AppResult, NonEmptyString};

/// Bearer token presented to the REST backend.
///
/// The value is never printed by `Debug` so tokens do not end up in logs.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(NonEmptyString);

impl AccessToken {
    /// Creates a validated access token.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        let value: String = value.into();
        NonEmptyString::new(value.trim()).map(Self)
    }

    /// Returns the raw token value.
    #[must_use]
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }

    /// Returns the `Authorization` header value for this token.
    #[must_use]
    pub fn bearer_header(&self) -> String {
        format!("Bearer {}", self.0.as_str())
    }
}

impl Debug for AccessToken {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str("AccessToken(<redacted>)")
    }
}
