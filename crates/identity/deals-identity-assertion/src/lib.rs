//! Verification of externally-issued identity assertions.
//!
//! Parses the `Authorization` header, delegates the token to the identity
//! provider, and collapses every failure mode into a single unauthenticated
//! outcome so callers cannot probe which check rejected them.

use deals_auth_core::{AuthError, AuthResult, VerifiedIdentity};
use deals_identity_core::{IdentityError, IdentityProvider};
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

const DEFAULT_PROVIDER_TIMEOUT: Duration = Duration::from_secs(10);

/// Verifies bearer assertions against the identity provider.
///
/// Holds no per-request state and caches nothing: each call is delegated to
/// the provider afresh.
#[derive(Clone)]
pub struct AssertionVerifier {
    provider: Arc<dyn IdentityProvider>,
    provider_timeout: Duration,
}

impl AssertionVerifier {
    pub fn new(provider: Arc<dyn IdentityProvider>) -> Self {
        Self {
            provider,
            provider_timeout: DEFAULT_PROVIDER_TIMEOUT,
        }
    }

    pub fn with_provider_timeout(mut self, timeout: Duration) -> Self {
        self.provider_timeout = timeout;
        self
    }

    /// Verifies a raw `Authorization` header value.
    ///
    /// The header must look like `"<scheme> <token>"` with a non-empty token
    /// segment. A missing header, a missing token, a provider rejection, and
    /// a provider timeout all map to [`AuthError::Unauthenticated`].
    pub async fn verify_header(&self, raw: Option<&str>) -> AuthResult<VerifiedIdentity> {
        let Some(raw) = raw else {
            warn!("missing authorization header");
            return Err(AuthError::Unauthenticated);
        };

        let mut segments = raw.split(' ');
        let _scheme = segments.next();
        let token = match segments.next() {
            Some(token) if !token.is_empty() => token,
            _ => {
                warn!("authorization header has no token segment");
                return Err(AuthError::Unauthenticated);
            }
        };

        self.verify_token(token).await
    }

    /// Verifies a bare assertion token.
    pub async fn verify_token(&self, token: &str) -> AuthResult<VerifiedIdentity> {
        let verified = tokio::time::timeout(
            self.provider_timeout,
            self.provider.verify_assertion(token),
        )
        .await
        .map_err(|_| IdentityError::Timeout)
        .and_then(|result| result);

        match verified {
            Ok(identity) => Ok(identity),
            Err(err) => {
                warn!(error = %err, "identity assertion rejected");
                Err(AuthError::Unauthenticated)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use deals_identity_core::{IdentityResult, StaticAssertionProvider};

    struct HangingProvider;

    #[async_trait]
    impl IdentityProvider for HangingProvider {
        async fn verify_assertion(&self, _token: &str) -> IdentityResult<VerifiedIdentity> {
            std::future::pending().await
        }
    }

    async fn verifier_with(token: &str, email: &str) -> AssertionVerifier {
        let provider = StaticAssertionProvider::new();
        provider.add_assertion(token, email).await;
        AssertionVerifier::new(Arc::new(provider))
    }

    #[tokio::test]
    async fn valid_bearer_header_yields_identity() {
        let verifier = verifier_with("tok-1", "buyer@x.com").await;

        let identity = verifier
            .verify_header(Some("Bearer tok-1"))
            .await
            .unwrap();
        assert_eq!(identity.email, "buyer@x.com");
    }

    #[tokio::test]
    async fn missing_header_is_unauthenticated() {
        let verifier = verifier_with("tok-1", "buyer@x.com").await;

        let err = verifier.verify_header(None).await.unwrap_err();
        assert_eq!(err, AuthError::Unauthenticated);
    }

    #[tokio::test]
    async fn header_without_token_segment_is_unauthenticated() {
        let verifier = verifier_with("tok-1", "buyer@x.com").await;

        assert_eq!(
            verifier.verify_header(Some("Bearer")).await.unwrap_err(),
            AuthError::Unauthenticated
        );
        assert_eq!(
            verifier.verify_header(Some("Bearer ")).await.unwrap_err(),
            AuthError::Unauthenticated
        );
    }

    #[tokio::test]
    async fn rejected_assertion_is_unauthenticated() {
        let verifier = verifier_with("tok-1", "buyer@x.com").await;

        let err = verifier
            .verify_header(Some("Bearer forged"))
            .await
            .unwrap_err();
        assert_eq!(err, AuthError::Unauthenticated);
    }

    #[tokio::test]
    async fn provider_timeout_is_unauthenticated() {
        let verifier = AssertionVerifier::new(Arc::new(HangingProvider))
            .with_provider_timeout(Duration::from_millis(20));

        let err = verifier
            .verify_header(Some("Bearer tok-1"))
            .await
            .unwrap_err();
        assert_eq!(err, AuthError::Unauthenticated);
    }

    #[tokio::test]
    async fn repeated_verification_yields_same_identity() {
        let verifier = verifier_with("tok-1", "buyer@x.com").await;

        let first = verifier.verify_header(Some("Bearer tok-1")).await.unwrap();
        let second = verifier.verify_header(Some("Bearer tok-1")).await.unwrap();
        assert_eq!(first, second);
    }
}
