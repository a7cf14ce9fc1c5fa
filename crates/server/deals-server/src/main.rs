use anyhow::{Context, Result};
use deals_identity_assertion::AssertionVerifier;
use deals_identity_core::StaticAssertionProvider;
use deals_identity_session::{SessionConfig, SessionCredentialIssuer};
use deals_server::config::AppConfig;
use deals_server::store::InMemoryStore;
use deals_server::{AppState, app};
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = AppConfig::from_env()?;

    // Stands in for the external identity-provider client; known assertions
    // are seeded from configuration at startup.
    let provider = StaticAssertionProvider::new();
    for (token, email) in &config.identity_assertions {
        provider.add_assertion(token.clone(), email.clone()).await;
    }

    let sessions = SessionCredentialIssuer::new(SessionConfig::new(config.jwt_secret.clone()))
        .context("session signing secret was rejected")?;

    let state = AppState {
        store: Arc::new(InMemoryStore::new()),
        verifier: AssertionVerifier::new(Arc::new(provider)),
        sessions: Arc::new(sessions),
    };

    let addr = format!("{}:{}", config.server_host, config.server_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("Smart deals server running on {addr}");

    axum::serve(listener, app(state)).await?;
    Ok(())
}
