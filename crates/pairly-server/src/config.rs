use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result, bail};

/// Placeholder tokens copied from docs that must never reach the Bot API.
const PLACEHOLDER_TOKENS: &[&str] = &["change-me", "your-telegram-token"];

pub struct Config {
    pub telegram_token: String,
    pub api_base: String,
    pub db_path: PathBuf,
    pub addr: SocketAddr,
    pub poll_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup, so tests do not touch the process env.
    pub fn from_lookup<F>(get: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let telegram_token = get("PAIRLY_TELEGRAM_TOKEN")
            .or_else(|| get("TELEGRAM_TOKEN"))
            .unwrap_or_default();
        if telegram_token.is_empty() || PLACEHOLDER_TOKENS.contains(&telegram_token.as_str()) {
            bail!("PAIRLY_TELEGRAM_TOKEN is unset or still a placeholder");
        }

        let api_base = get("PAIRLY_API_BASE").unwrap_or_else(|| "https://api.telegram.org".into());
        let db_path = get("PAIRLY_DB_PATH")
            .or_else(|| get("DATABASE_URL"))
            .unwrap_or_else(|| "pairly.db".into());
        // Server URLs may carry credentials, so the value is not echoed
        if db_path.contains("://") {
            bail!("Database setting looks like a connection URL; set PAIRLY_DB_PATH to a SQLite file path");
        }
        let db_path = PathBuf::from(db_path);

        let host = get("PAIRLY_HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port: u16 = get("PAIRLY_PORT")
            .unwrap_or_else(|| "3000".into())
            .parse()
            .context("PAIRLY_PORT must be a port number")?;
        let addr: SocketAddr = format!("{}:{}", host, port)
            .parse()
            .context("PAIRLY_HOST must be an IP address")?;

        let poll_timeout = get("PAIRLY_POLL_TIMEOUT_SECS")
            .map(|v| v.parse::<u64>())
            .transpose()
            .context("PAIRLY_POLL_TIMEOUT_SECS must be a whole number of seconds")?
            .unwrap_or(30);

        Ok(Self {
            telegram_token,
            api_base,
            db_path,
            addr,
            poll_timeout: Duration::from_secs(poll_timeout),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply() {
        let config = Config::from_lookup(lookup(&[("PAIRLY_TELEGRAM_TOKEN", "123:abc")])).unwrap();
        assert_eq!(config.telegram_token, "123:abc");
        assert_eq!(config.api_base, "https://api.telegram.org");
        assert_eq!(config.db_path, PathBuf::from("pairly.db"));
        assert_eq!(config.addr, "0.0.0.0:3000".parse::<SocketAddr>().unwrap());
        assert_eq!(config.poll_timeout, Duration::from_secs(30));
    }

    #[test]
    fn legacy_names_are_accepted() {
        let config = Config::from_lookup(lookup(&[
            ("TELEGRAM_TOKEN", "123:abc"),
            ("DATABASE_URL", "/data/bot.db"),
        ]))
        .unwrap();
        assert_eq!(config.telegram_token, "123:abc");
        assert_eq!(config.db_path, PathBuf::from("/data/bot.db"));
    }

    #[test]
    fn server_database_url_is_rejected() {
        let token = ("PAIRLY_TELEGRAM_TOKEN", "123:abc");
        let err = Config::from_lookup(lookup(&[token, ("DATABASE_URL", "postgres://user:pw@host/db")]))
            .err()
            .unwrap();
        let shown = format!("{:#}", err);
        assert!(shown.contains("PAIRLY_DB_PATH"), "{shown}");
        assert!(!shown.contains("pw@host"), "{shown}");

        assert!(Config::from_lookup(lookup(&[token, ("PAIRLY_DB_PATH", "sqlite:///data/bot.db")])).is_err());
    }

    #[test]
    fn missing_or_placeholder_token_is_fatal() {
        assert!(Config::from_lookup(lookup(&[])).is_err());
        assert!(Config::from_lookup(lookup(&[("PAIRLY_TELEGRAM_TOKEN", "change-me")])).is_err());
    }

    #[test]
    fn bad_numbers_are_rejected() {
        let token = ("PAIRLY_TELEGRAM_TOKEN", "123:abc");
        assert!(Config::from_lookup(lookup(&[token, ("PAIRLY_PORT", "http")])).is_err());
        assert!(Config::from_lookup(lookup(&[token, ("PAIRLY_POLL_TIMEOUT_SECS", "-1")])).is_err());
    }
}
