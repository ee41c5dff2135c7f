//! # Credentials
//!
//! Credential acquisition lives outside this crate; the runtime only carries
//! an opaque credential through to the transport, which attaches it as an
//! `authorization` metadata entry. Token refresh, service-account flows, and
//! ADC discovery are the caller's concern.

use std::fmt;

/// Default OAuth2 scope requested for all calls.
pub const DEFAULT_SCOPE: &str = "https://www.googleapis.com/auth/cloud-platform";

/// Opaque credential passed through to the channel or session.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials(Inner);

#[derive(Clone, PartialEq, Eq)]
enum Inner {
    Anonymous,
    Bearer(String),
}

impl Credentials {
    /// No credential; calls are sent unauthenticated.
    pub fn anonymous() -> Self {
        Credentials(Inner::Anonymous)
    }

    /// A pre-acquired bearer token.
    pub fn bearer(token: impl Into<String>) -> Self {
        Credentials(Inner::Bearer(token.into()))
    }

    /// The `authorization` header value, when one applies.
    pub fn authorization_value(&self) -> Option<String> {
        match &self.0 {
            Inner::Anonymous => None,
            Inner::Bearer(token) => Some(format!("Bearer {token}")),
        }
    }
}

// Tokens must not end up in logs.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Inner::Anonymous => f.write_str("Credentials(anonymous)"),
            Inner::Bearer(_) => f.write_str("Credentials(bearer <redacted>)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bearer_tokens_render_an_authorization_value() {
        let credentials = Credentials::bearer("abc123");
        assert_eq!(
            credentials.authorization_value().as_deref(),
            Some("Bearer abc123")
        );
        assert_eq!(Credentials::anonymous().authorization_value(), None);
    }

    #[test]
    fn debug_never_prints_the_token() {
        let rendered = format!("{:?}", Credentials::bearer("secret"));
        assert!(!rendered.contains("secret"));
    }
}
