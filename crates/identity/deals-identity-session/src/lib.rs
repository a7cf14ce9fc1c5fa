//! Internally-signed session credentials.
//!
//! These are low-trust convenience tokens: issuance takes whatever claims the
//! caller supplies and signs them with the process-wide secret, without
//! verifying the caller's identity first. They are a parallel mechanism to
//! the externally-verified assertion, never reconciled with it.

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    /// The signing secret was not configured.
    #[error("Session signing secret is not configured")]
    MissingSecret,

    /// The credential is expired. Downstream checks must treat this the same
    /// as an absent credential.
    #[error("Session credential expired")]
    Expired,

    /// The credential is malformed or its signature does not verify.
    #[error("Invalid session credential")]
    InvalidCredential,

    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),
}

/// Claims carried by a session credential: whatever payload the caller
/// supplied at issuance, plus the expiry window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    pub exp: i64,
    pub iat: i64,
    #[serde(flatten)]
    pub payload: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub secret: String,
    pub ttl: Duration,
    pub algorithm: Algorithm,
}

impl SessionConfig {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ttl: Duration::hours(1),
            algorithm: Algorithm::HS256,
        }
    }
}

/// Mints and verifies session credentials.
///
/// Validity is signature plus expiry only; there is no server-side session
/// registry and no revocation.
#[derive(Debug, Clone)]
pub struct SessionCredentialIssuer {
    config: SessionConfig,
}

impl SessionCredentialIssuer {
    pub fn new(config: SessionConfig) -> Result<Self, SessionError> {
        if config.secret.is_empty() {
            return Err(SessionError::MissingSecret);
        }
        Ok(Self { config })
    }

    /// Signs the supplied claims payload into a credential expiring one ttl
    /// from now.
    pub fn issue(
        &self,
        payload: serde_json::Map<String, serde_json::Value>,
    ) -> Result<String, SessionError> {
        let now = Utc::now();
        let claims = SessionClaims {
            exp: (now + self.config.ttl).timestamp(),
            iat: now.timestamp(),
            payload,
        };

        let token = encode(
            &Header::new(self.config.algorithm),
            &claims,
            &EncodingKey::from_secret(self.config.secret.as_bytes()),
        )?;
        Ok(token)
    }

    /// Verifies a presented credential.
    ///
    /// Expired and tampered credentials both fail; callers map either to the
    /// same unauthenticated outcome as a missing credential.
    pub fn verify(&self, token: &str) -> Result<SessionClaims, SessionError> {
        let mut validation = Validation::new(self.config.algorithm);
        validation.leeway = 0;

        let data = decode::<SessionClaims>(
            token,
            &DecodingKey::from_secret(self.config.secret.as_bytes()),
            &validation,
        )
        .map_err(|err| match err.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => SessionError::Expired,
            _ => SessionError::InvalidCredential,
        })?;

        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn issuer() -> SessionCredentialIssuer {
        SessionCredentialIssuer::new(SessionConfig::new("test-secret")).unwrap()
    }

    fn payload_for(email: &str) -> serde_json::Map<String, serde_json::Value> {
        let mut payload = serde_json::Map::new();
        payload.insert("email".to_string(), json!(email));
        payload
    }

    // Encodes claims directly so tests can place iat/exp anywhere in time.
    fn token_with_window(issued_offset: Duration) -> String {
        let issued_at = Utc::now() + issued_offset;
        let claims = SessionClaims {
            exp: (issued_at + Duration::hours(1)).timestamp(),
            iat: issued_at.timestamp(),
            payload: payload_for("buyer@x.com"),
        };
        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret("test-secret".as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn issued_credential_round_trips() {
        let issuer = issuer();
        let token = issuer.issue(payload_for("buyer@x.com")).unwrap();

        let claims = issuer.verify(&token).unwrap();
        assert_eq!(claims.payload["email"], json!("buyer@x.com"));
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn empty_secret_is_a_configuration_error() {
        let err = SessionCredentialIssuer::new(SessionConfig::new("")).unwrap_err();
        assert!(matches!(err, SessionError::MissingSecret));
    }

    #[test]
    fn credential_is_valid_just_before_expiry() {
        // Issued 59 minutes ago, expires at the 60-minute mark.
        let token = token_with_window(Duration::minutes(-59));
        assert!(issuer().verify(&token).is_ok());
    }

    #[test]
    fn credential_is_invalid_just_after_expiry() {
        let token = token_with_window(Duration::minutes(-61));
        let err = issuer().verify(&token).unwrap_err();
        assert!(matches!(err, SessionError::Expired));
    }

    #[test]
    fn tampered_credential_is_invalid() {
        let issuer = issuer();
        let token = issuer.issue(payload_for("buyer@x.com")).unwrap();
        let forged_claims = issuer.issue(payload_for("mallory@z.com")).unwrap();

        // Claims from one credential stitched onto the signature of another.
        let signature = token.rsplit('.').next().unwrap();
        let mut forged_parts = forged_claims.split('.');
        let header = forged_parts.next().unwrap();
        let payload = forged_parts.next().unwrap();
        let forged = format!("{header}.{payload}.{signature}");

        let err = issuer.verify(&forged).unwrap_err();
        assert!(matches!(err, SessionError::InvalidCredential));
    }

    #[test]
    fn wrong_secret_is_invalid() {
        let token = issuer().issue(payload_for("buyer@x.com")).unwrap();

        let other = SessionCredentialIssuer::new(SessionConfig::new("other-secret")).unwrap();
        let err = other.verify(&token).unwrap_err();
        assert!(matches!(err, SessionError::InvalidCredential));
    }
}
