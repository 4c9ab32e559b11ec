//! Runtime configuration, read from the environment (and `.env` when present).

use anyhow::{Context, Result};
use std::{env, str::FromStr};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_PAGE_SIZE: usize = 10;
const DEFAULT_LOGIN_URL: &str = "/auth/login/";
const DEFAULT_MAX_CONCURRENT_REQUESTS: usize = 1024;

#[derive(Debug, Clone)]
pub struct Config {
    /// HMAC secret shared with the identity provider that issues tokens.
    pub jwt_secret: String,
    pub bind_addr: String,
    /// Posts per page for the feed, profile and index listings.
    pub page_size: usize,
    /// Where unauthenticated callers are sent; `?next=` is appended.
    pub login_url: String,
    pub max_concurrent_requests: usize,
}

impl Config {
    pub fn new(jwt_secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            login_url: DEFAULT_LOGIN_URL.to_string(),
            max_concurrent_requests: DEFAULT_MAX_CONCURRENT_REQUESTS,
        }
    }

    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let jwt_secret = env::var("JWT_SECRET").context("JWT_SECRET must be set")?;
        let mut config = Self::new(jwt_secret);

        if let Ok(addr) = env::var("BIND_ADDR") {
            config.bind_addr = addr;
        }
        if let Ok(url) = env::var("LOGIN_URL") {
            config.login_url = url;
        }
        config.page_size = parse_var("FEED_PAGE_SIZE", config.page_size)?;
        config.max_concurrent_requests =
            parse_var("MAX_CONCURRENT_REQUESTS", config.max_concurrent_requests)?;

        if config.page_size == 0 {
            anyhow::bail!("FEED_PAGE_SIZE must be greater than zero");
        }

        Ok(config)
    }
}

fn parse_var<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) => raw
            .parse()
            .with_context(|| format!("{name} has an invalid value: {raw:?}")),
        Err(_) => Ok(default),
    }
}
