//! Process configuration, read once at startup.

use anyhow::{Context, Result};

/// Configuration for the deals server.
///
/// The signing secret and identity-provider assertions are required; their
/// absence aborts startup rather than surfacing per-request.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub jwt_secret: String,
    pub identity_assertions: Vec<(String, String)>,
    pub server_host: String,
    pub server_port: u16,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            jwt_secret: std::env::var("JWT_SECRET")
                .context("JWT_SECRET environment variable is required")?,
            identity_assertions: std::env::var("IDENTITY_ASSERTIONS")
                .context("IDENTITY_ASSERTIONS environment variable is required")
                .and_then(parse_assertions)?,
            server_host: std::env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            server_port: std::env::var("SERVER_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .context("SERVER_PORT must be a valid port number")?,
        })
    }
}

/// Parses `token:email` pairs, comma separated. These seed the in-process
/// stand-in for the external identity provider.
fn parse_assertions(raw: String) -> Result<Vec<(String, String)>> {
    raw.split(',')
        .filter(|entry| !entry.trim().is_empty())
        .map(|entry| {
            entry
                .split_once(':')
                .map(|(token, email)| (token.trim().to_string(), email.trim().to_string()))
                .context("IDENTITY_ASSERTIONS entries must look like token:email")
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_token_email_pairs() {
        let parsed = parse_assertions("t1:buyer@x.com, t2:seller@y.com".to_string()).unwrap();
        assert_eq!(
            parsed,
            vec![
                ("t1".to_string(), "buyer@x.com".to_string()),
                ("t2".to_string(), "seller@y.com".to_string()),
            ]
        );
    }

    #[test]
    fn rejects_entries_without_separator() {
        assert!(parse_assertions("not-a-pair".to_string()).is_err());
    }
}
