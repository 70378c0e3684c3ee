//! Opaque session credential bundle passed into every upstream call.
//!
//! Acquisition and refresh happen elsewhere; this type only carries the
//! values and renders them as request headers.

use std::fmt;

/// Session cookie plus optional CSRF token
#[derive(Clone, Default, PartialEq, Eq)]
pub struct SessionCredentials {
    cookie: Option<String>,
    csrf_token: Option<String>,
}

impl SessionCredentials {
    /// Credentials with no cookie; only anonymous endpoints will succeed
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Wrap a session cookie value. Blank values are treated as absent.
    pub fn new(cookie: impl Into<String>) -> Self {
        let cookie = cookie.into();
        let cookie = cookie.trim();
        Self {
            cookie: (!cookie.is_empty()).then(|| cookie.to_string()),
            csrf_token: None,
        }
    }

    pub fn with_csrf_token(mut self, token: impl Into<String>) -> Self {
        let token = token.into();
        self.csrf_token = (!token.trim().is_empty()).then_some(token);
        self
    }

    /// Whether a session cookie is available for authenticated endpoints
    pub fn is_authenticated(&self) -> bool {
        self.cookie.is_some()
    }

    pub fn csrf_token(&self) -> Option<&str> {
        self.csrf_token.as_deref()
    }

    pub(crate) fn cookie_header(&self) -> Option<String> {
        self.cookie
            .as_ref()
            .map(|cookie| format!(".ROBLOSECURITY={}", cookie))
    }
}

// Never print the secret values.
impl fmt::Debug for SessionCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionCredentials")
            .field("cookie", &self.cookie.as_ref().map(|_| "<redacted>"))
            .field("csrf_token", &self.csrf_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}
