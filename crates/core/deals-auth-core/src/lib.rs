//! Authentication and authorization types shared across the deals stack.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while gating a request.
///
/// Both variants deliberately carry no detail: external callers must not be
/// able to distinguish which check rejected them. Internal logs hold the
/// specifics.
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuthError {
    /// No verified identity could be established for the request.
    /// Covers a missing header, a malformed header, and an assertion the
    /// identity provider rejected.
    #[error("Unauthorized access")]
    Unauthenticated,

    /// A verified identity exists but does not own the requested scope.
    #[error("Forbidden access")]
    Forbidden,
}

/// Result type for authentication and authorization checks.
pub type AuthResult<T> = Result<T, AuthError>;

/// An identity established from a verified assertion.
///
/// Only ever constructed from a successful identity-provider verification,
/// never from unauthenticated request fields. Valid for the lifetime of a
/// single request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifiedIdentity {
    /// The principal's verified email address.
    pub email: String,
}

impl VerifiedIdentity {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
        }
    }
}
