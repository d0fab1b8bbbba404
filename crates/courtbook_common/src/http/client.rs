// --- File: crates/courtbook_common/src/http/client.rs ---
use courtbook_config::ApiConfig;
use reqwest::{Client, Error as ReqwestError};
use std::time::Duration;

/// User agent sent when the configuration does not name one.
pub const DEFAULT_USER_AGENT: &str = concat!("courtbook/", env!("CARGO_PKG_VERSION"));

/// Creates a new HTTP client with custom configuration.
///
/// # Arguments
///
/// * `timeout_secs` - The timeout in seconds for the client
/// * `user_agent` - The value of the `User-Agent` header
///
/// # Returns
///
/// A new reqwest::Client instance with the specified configuration
pub fn create_client(timeout_secs: u64, user_agent: &str) -> Result<Client, ReqwestError> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .user_agent(user_agent)
        .build()
}

/// Creates the HTTP client described by the `[api]` configuration section.
pub fn client_from_config(config: &ApiConfig) -> Result<Client, ReqwestError> {
    create_client(
        config.timeout_secs,
        config.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT),
    )
}
