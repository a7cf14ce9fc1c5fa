//! Shared application state, immutable after startup.

use deals_identity_assertion::AssertionVerifier;
use deals_identity_session::SessionCredentialIssuer;
use std::sync::Arc;

use crate::store::DocumentStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
    pub verifier: AssertionVerifier,
    pub sessions: Arc<SessionCredentialIssuer>,
}
