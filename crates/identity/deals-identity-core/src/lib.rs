//! Identity provider trait and types.
//!
//! The external identity provider is a black box to this system: it receives
//! an assertion token and either returns the verified identity behind it or
//! rejects it. All trust decisions about the assertion itself live on the
//! provider side.

use async_trait::async_trait;
use deals_auth_core::VerifiedIdentity;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;

#[derive(Debug, Error)]
pub enum IdentityError {
    /// The provider examined the assertion and rejected it (expired,
    /// malformed, wrong signer, revoked).
    #[error("Invalid identity assertion")]
    InvalidAssertion,

    /// The provider could not be reached or failed internally.
    #[error("Provider error: {0}")]
    ProviderError(String),

    /// The provider did not answer within the allowed time.
    #[error("Provider timed out")]
    Timeout,
}

pub type IdentityResult<T> = Result<T, IdentityError>;

/// The external collaborator that validates identity assertions.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Validates an assertion token and returns the identity it proves.
    async fn verify_assertion(&self, token: &str) -> IdentityResult<VerifiedIdentity>;
}

/// An in-memory provider mapping known assertion tokens to identities.
///
/// Stands in for the real provider in tests and local development; unknown
/// tokens are rejected exactly like invalid ones.
#[derive(Clone, Default)]
pub struct StaticAssertionProvider {
    assertions: Arc<RwLock<HashMap<String, String>>>,
}

impl StaticAssertionProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add_assertion(&self, token: impl Into<String>, email: impl Into<String>) {
        let mut assertions = self.assertions.write().await;
        assertions.insert(token.into(), email.into());
    }

    pub async fn revoke_assertion(&self, token: &str) -> Option<String> {
        let mut assertions = self.assertions.write().await;
        assertions.remove(token)
    }
}

#[async_trait]
impl IdentityProvider for StaticAssertionProvider {
    async fn verify_assertion(&self, token: &str) -> IdentityResult<VerifiedIdentity> {
        let assertions = self.assertions.read().await;
        assertions
            .get(token)
            .map(|email| VerifiedIdentity::new(email.clone()))
            .ok_or(IdentityError::InvalidAssertion)
    }
}
