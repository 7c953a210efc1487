use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use chrono::Duration;

/// Placeholder JWT secrets that MUST NOT be used.
const PLACEHOLDER_SECRETS: &[&str] = &[
    "change-me-to-a-random-string",
    "your-secret-key-change-in-production",
    "dev-secret-change-me",
];

#[derive(Debug, Clone)]
pub struct Config {
    pub jwt_secret: String,
    pub db_path: PathBuf,
    pub addr: SocketAddr,
    pub token_ttl: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let jwt_secret = get("EVENTURE_JWT_SECRET").unwrap_or_default();
        if jwt_secret.is_empty() || PLACEHOLDER_SECRETS.contains(&jwt_secret.as_str()) {
            bail!("EVENTURE_JWT_SECRET is unset or still a placeholder");
        }

        let db_path = get("EVENTURE_DB_PATH").unwrap_or_else(|| "eventure.db".into());
        let host = get("EVENTURE_HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port: u16 = get("EVENTURE_PORT")
            .unwrap_or_else(|| "5001".into())
            .parse()
            .context("EVENTURE_PORT must be a port number")?;
        let ttl_days: i64 = get("EVENTURE_TOKEN_TTL_DAYS")
            .unwrap_or_else(|| "30".into())
            .parse()
            .context("EVENTURE_TOKEN_TTL_DAYS must be a whole number of days")?;
        if ttl_days <= 0 {
            bail!("EVENTURE_TOKEN_TTL_DAYS must be at least 1, got {}", ttl_days);
        }

        let token_ttl = Duration::try_days(ttl_days)
            .context("EVENTURE_TOKEN_TTL_DAYS is out of range")?;

        let addr: SocketAddr = format!("{}:{}", host, port)
            .parse()
            .with_context(|| format!("invalid listen address {}:{}", host, port))?;

        Ok(Self {
            jwt_secret,
            db_path: db_path.into(),
            addr,
            token_ttl,
        })
    }
}
