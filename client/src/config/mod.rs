//! Central module for application-wide configuration settings.
//!
//! This module handles loading and managing configuration parameters such as
//! the API base URL, request timeouts, the chat poll interval, and the path
//! of the durable token store.

use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: String,
    pub request_timeout_seconds: u64,
    pub chat_poll_interval_seconds: u64,
    pub token_store_path: PathBuf,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let api_base_url = env::var("PAWHAVEN_API_URL").context("PAWHAVEN_API_URL not set")?;

        let request_timeout_seconds = env::var("REQUEST_TIMEOUT_SECONDS")
            .unwrap_or_else(|_| "10".to_string())
            .parse::<u64>()
            .context("REQUEST_TIMEOUT_SECONDS must be a valid number")?;

        let chat_poll_interval_seconds = env::var("CHAT_POLL_INTERVAL_SECONDS")
            .unwrap_or_else(|_| "5".to_string())
            .parse::<u64>()
            .context("CHAT_POLL_INTERVAL_SECONDS must be a valid number")?;

        let raw_store_path = env::var("TOKEN_STORE_PATH")
            .unwrap_or_else(|_| "~/.pawhaven/session.json".to_string());
        let token_store_path = expanduser::expanduser(&raw_store_path)
            .context("TOKEN_STORE_PATH could not be expanded")?;

        Ok(Config {
            api_base_url,
            request_timeout_seconds,
            chat_poll_interval_seconds,
            token_store_path,
        })
    }
}
