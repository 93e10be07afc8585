//! Bearer credential resolution.

use crate::security::Session;

/// Supplies the bearer token attached to upstream calls.
pub trait CredentialSource: Send + Sync {
    fn bearer_token(&self, session: &Session) -> Option<String>;
}

/// Uses the visitor's own session token as the upstream access token.
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionCredentials;

impl CredentialSource for SessionCredentials {
    fn bearer_token(&self, session: &Session) -> Option<String> {
        session.token().map(str::to_string)
    }
}
