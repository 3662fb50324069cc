//! Database configuration module.
//!
//! Handles loading Data API credentials from environment variables.

use crate::error::ConnectionError;
use validator::Validate;

/// Environment variable holding the application token.
pub const TOKEN_ENV: &str = "ASTRA_DB_APPLICATION_TOKEN";
/// Environment variable holding the API endpoint URL.
pub const API_ENDPOINT_ENV: &str = "ASTRA_DB_API_ENDPOINT";
/// Environment variable holding the keyspace name.
pub const KEYSPACE_ENV: &str = "ASTRA_DB_KEYSPACE";
/// Keyspace used when none is configured.
pub const DEFAULT_KEYSPACE: &str = "default_keyspace";

/// Data API connection settings.
///
/// Configuration values can be set via environment variables:
/// - `ASTRA_DB_APPLICATION_TOKEN`: application token sent with every request
/// - `ASTRA_DB_API_ENDPOINT`: database API endpoint URL
/// - `ASTRA_DB_KEYSPACE`: keyspace holding the collection (default: "`default_keyspace`")
#[derive(Clone, Validate)]
pub struct DatabaseConfig {
    /// Application token.
    #[validate(length(min = 1, message = "Application token cannot be empty"))]
    pub token: String,

    /// Base URL of the database API.
    #[validate(url(message = "API endpoint must be a valid URL"))]
    pub api_endpoint: String,

    /// Keyspace holding the collection.
    #[validate(length(min = 1, message = "Keyspace cannot be empty"))]
    pub keyspace: String,
}

impl DatabaseConfig {
    /// Creates a configuration for the default keyspace.
    #[must_use]
    pub fn new(token: impl Into<String>, api_endpoint: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            api_endpoint: api_endpoint.into(),
            keyspace: DEFAULT_KEYSPACE.to_string(),
        }
    }

    /// Sets the keyspace.
    #[must_use]
    pub fn with_keyspace(mut self, keyspace: impl Into<String>) -> Self {
        self.keyspace = keyspace.into();
        self
    }

    /// Loads the configuration from environment variables and validates it.
    ///
    /// Missing credentials are read as empty strings, so they surface as
    /// validation errors rather than lookup errors.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is empty or the endpoint is not a URL.
    pub fn from_env() -> Result<Self, ConnectionError> {
        let config = Self {
            token: std::env::var(TOKEN_ENV).unwrap_or_default(),
            api_endpoint: std::env::var(API_ENDPOINT_ENV).unwrap_or_default(),
            keyspace: std::env::var(KEYSPACE_ENV)
                .ok()
                .filter(|k| !k.is_empty())
                .unwrap_or_else(|| DEFAULT_KEYSPACE.to_string()),
        };
        config.validate()?;
        Ok(config)
    }

    /// Root URL for keyspace-level commands.
    #[must_use]
    pub fn keyspace_url(&self) -> String {
        format!(
            "{}/api/json/v1/{}",
            self.api_endpoint.trim_end_matches('/'),
            self.keyspace
        )
    }
}

impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("token", &"<redacted>")
            .field("api_endpoint", &self.api_endpoint)
            .field("keyspace", &self.keyspace)
            .finish()
    }
}
