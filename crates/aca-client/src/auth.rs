//! Authentication collaborator.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;

use crate::config::ClientSettings;
use crate::error::{Result, RpcError};

/// Sign-in state and the login prompt used as a recovery action.
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Whether a user is currently signed in.
    fn signed_in(&self) -> bool;

    /// Signs in and returns the account email.
    async fn sign_in(&self) -> Result<String>;

    fn sign_out(&self);

    /// Asks the user to sign in. Resolves once sign-in completed.
    async fn show_login_modal(&self) -> Result<()>;
}

/// Authenticator backed by a pre-issued access token.
///
/// There is nobody to prompt, so the login modal succeeds only when a token
/// is configured.
#[derive(Debug, Default)]
pub struct StaticAuthenticator {
    token: Option<String>,
    email: Option<String>,
    signed_in: AtomicBool,
}

impl StaticAuthenticator {
    pub fn new(token: Option<String>, email: Option<String>) -> Self {
        let signed_in = token.is_some();
        Self {
            token,
            email,
            signed_in: AtomicBool::new(signed_in),
        }
    }

    pub fn from_settings(settings: &ClientSettings) -> Self {
        Self::new(settings.access_token.clone(), settings.email.clone())
    }

    fn has_token(&self) -> bool {
        self.token.is_some()
    }
}

#[async_trait]
impl Authenticator for StaticAuthenticator {
    fn signed_in(&self) -> bool {
        self.signed_in.load(Ordering::Acquire)
    }

    async fn sign_in(&self) -> Result<String> {
        if !self.has_token() {
            return Err(RpcError::Unauthorized(
                "no access token configured".to_string(),
            ));
        }
        self.signed_in.store(true, Ordering::Release);
        let email = self.email.clone().unwrap_or_else(|| "unknown account".to_string());
        tracing::info!("Signed in as {}", email);
        Ok(email)
    }

    fn sign_out(&self) {
        self.signed_in.store(false, Ordering::Release);
        tracing::info!("Signed out");
    }

    async fn show_login_modal(&self) -> Result<()> {
        self.sign_in().await.map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn token_allows_sign_in() {
        let auth = StaticAuthenticator::new(
            Some("t0k3n".to_string()),
            Some("dan@example.org".to_string()),
        );
        assert!(auth.signed_in());
        auth.sign_out();
        assert!(!auth.signed_in());
        assert_eq!(auth.sign_in().await.unwrap(), "dan@example.org");
        assert!(auth.signed_in());
    }

    #[tokio::test]
    async fn without_token_login_fails() {
        let auth = StaticAuthenticator::default();
        assert!(!auth.signed_in());
        let err = auth.show_login_modal().await.unwrap_err();
        assert!(err.is_unauthorized());
        assert!(!auth.signed_in());
    }
}
