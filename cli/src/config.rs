//! Environment-driven configuration

use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;

/// Runtime settings, read once at startup
#[derive(Debug, Clone)]
pub struct Config {
    /// Backend origin, e.g. `http://localhost:3000`
    pub api_url: String,
    /// Bearer token sent with every request
    pub token: String,
    /// Default user id for wallet, buy, and history commands
    pub user_id: Option<String>,
}

pub fn load() -> Result<Config> {
    dotenv().ok();

    let api_url =
        env::var("COINTRACK_API_URL").unwrap_or_else(|_| "http://localhost:3000".to_string());

    let token = env::var("COINTRACK_TOKEN")
        .context("COINTRACK_TOKEN must be set (bearer token for the backend)")?;

    let user_id = env::var("COINTRACK_USER").ok();

    Ok(Config {
        api_url,
        token,
        user_id,
    })
}
