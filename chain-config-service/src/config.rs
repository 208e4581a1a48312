use eyre::Result;
use serde::Deserialize;
use std::env;

use crate::representation::DEFAULT_MEDIA_BASE_URL;

/// Upper bound for the `limit` query parameter of list endpoints
pub const MAX_PAGE_LIMIT: usize = 100;

/// Service configuration structure
///
/// This structure contains all the configuration parameters for the chain
/// configuration service. It handles loading values from environment variables
/// with appropriate defaults.
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Host address to bind the server to (default: 127.0.0.1)
    pub host: String,

    /// Port to listen on (default: 8080)
    pub port: u16,

    /// Number of HTTP worker threads (default: 4)
    pub workers: usize,

    /// JSON file holding chains, gas prices, wallets and features
    pub chains_fixture: String,

    /// Prefix under which uploaded files such as currency logos are served
    pub media_base_url: String,

    /// Page size used when a list request carries no `limit`
    pub default_page_limit: usize,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// This method reads configuration from environment variables,
    /// using default values when variables are not defined.
    ///
    /// # Environment Variables
    ///
    /// * `HOST` - Server host address (default: "127.0.0.1")
    /// * `PORT` - Server port (default: 8080)
    /// * `WORKERS` - HTTP worker threads (default: 4)
    /// * `CHAINS_FIXTURE` - Path of the chain fixture (default: "chains.json")
    /// * `MEDIA_BASE_URL` - Media URL prefix (default: "/media/")
    /// * `DEFAULT_PAGE_LIMIT` - Default page size, capped at 100 (default: 20)
    pub fn from_env() -> Result<Self> {
        // Load .env file if it exists (useful for development)
        let _ = dotenv::dotenv();

        let default_page_limit = env::var("DEFAULT_PAGE_LIMIT")
            .unwrap_or_else(|_| "20".to_string())
            .parse::<usize>()?;
        if default_page_limit == 0 {
            eyre::bail!("DEFAULT_PAGE_LIMIT must be greater than zero");
        }

        Ok(Config {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()?,
            workers: env::var("WORKERS")
                .unwrap_or_else(|_| "4".to_string())
                .parse::<usize>()?,
            chains_fixture: env::var("CHAINS_FIXTURE")
                .unwrap_or_else(|_| "chains.json".to_string()),
            media_base_url: env::var("MEDIA_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_MEDIA_BASE_URL.to_string()),
            default_page_limit: default_page_limit.min(MAX_PAGE_LIMIT),
        })
    }
}
