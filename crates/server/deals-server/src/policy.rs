//! Ownership checks over owner-scoped queries.

use deals_auth_core::{AuthError, AuthResult, VerifiedIdentity};
use tracing::warn;

/// Decides whether a caller may query resources scoped to an owner.
///
/// A request that names a target owner is allowed only when that owner is the
/// caller's own verified identity. A request with no owner filter is scoped
/// to "all" rather than "mine" and passes unconditionally; that permissive
/// default is deliberate and mirrors the observed behavior of the system this
/// replaces.
pub struct OwnershipPolicy;

impl OwnershipPolicy {
    pub fn authorize(identity: &VerifiedIdentity, owner_filter: Option<&str>) -> AuthResult<()> {
        match owner_filter {
            Some(owner) if owner != identity.email => {
                warn!(
                    requested = owner,
                    verified = %identity.email,
                    "owner filter does not match verified identity"
                );
                Err(AuthError::Forbidden)
            }
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matching_owner_filter_is_allowed() {
        let identity = VerifiedIdentity::new("buyer@x.com");
        assert!(OwnershipPolicy::authorize(&identity, Some("buyer@x.com")).is_ok());
    }

    #[test]
    fn foreign_owner_filter_is_forbidden() {
        let identity = VerifiedIdentity::new("buyer@x.com");
        assert_eq!(
            OwnershipPolicy::authorize(&identity, Some("seller@y.com")).unwrap_err(),
            AuthError::Forbidden
        );
    }

    #[test]
    fn absent_owner_filter_is_allowed() {
        let identity = VerifiedIdentity::new("buyer@x.com");
        assert!(OwnershipPolicy::authorize(&identity, None).is_ok());
    }
}
