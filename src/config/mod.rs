use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub provider: ProviderConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connection_timeout_seconds: u64,
    pub idle_timeout_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub api_rate_limit: u64,
    pub max_request_body_size: usize,
}

/// External recipe search provider (Edamam-compatible)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub api_url: String,
    pub app_id: String,
    pub app_key: String,
    pub timeout_seconds: u64,
    pub user_agent: String,
}

impl ProviderConfig {
    pub fn has_credentials(&self) -> bool {
        !self.app_id.is_empty() && !self.app_key.is_empty()
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.edamam.com/search".to_string(),
            app_id: String::new(),
            app_key: String::new(),
            timeout_seconds: 10,
            user_agent: format!("Recipebox/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Requests per second above which rate limiting is meaningless
pub const MAX_API_RATE_LIMIT: u64 = 100_000;

fn env_or<T: FromStr>(key: &str, default: &str) -> Result<T> {
    std::env::var(key)
        .unwrap_or_else(|_| default.to_string())
        .parse()
        .map_err(|_| Error::Config(format!("Invalid {key} value")))
}

impl Settings {
    /// Load settings from environment variables
    pub fn from_env() -> Result<Self> {
        let defaults = ProviderConfig::default();

        Ok(Settings {
            database: DatabaseConfig {
                url: std::env::var("DATABASE_URL")
                    .unwrap_or_else(|_| "sqlite:./data/recipes.db".to_string()),
                max_connections: env_or("DATABASE_MAX_CONNECTIONS", "10")?,
                min_connections: env_or("DATABASE_MIN_CONNECTIONS", "1")?,
                connection_timeout_seconds: env_or("DATABASE_CONNECTION_TIMEOUT", "30")?,
                idle_timeout_seconds: env_or("DATABASE_IDLE_TIMEOUT", "600")?,
            },
            server: ServerConfig {
                host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: env_or("PORT", "5000")?,
                api_rate_limit: env_or("API_RATE_LIMIT", "50")?,
                max_request_body_size: env_or("MAX_REQUEST_BODY_SIZE", "1048576")?,
            },
            provider: ProviderConfig {
                api_url: std::env::var("PROVIDER_API_URL").unwrap_or(defaults.api_url),
                app_id: std::env::var("API_ID").unwrap_or_default(),
                app_key: std::env::var("API_KEY").unwrap_or_default(),
                timeout_seconds: env_or("PROVIDER_TIMEOUT", "10")?,
                user_agent: defaults.user_agent,
            },
        })
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(Error::Config("Port must be non-zero".to_string()));
        }

        if self.server.api_rate_limit == 0 {
            return Err(Error::Config("API rate limit must be non-zero".to_string()));
        }

        if self.server.api_rate_limit > MAX_API_RATE_LIMIT {
            return Err(Error::Config(format!(
                "API rate limit must be at most {MAX_API_RATE_LIMIT}"
            )));
        }

        if self.database.max_connections == 0 {
            return Err(Error::Config(
                "Database pool needs at least one connection".to_string(),
            ));
        }

        if self.provider.timeout_seconds == 0 {
            return Err(Error::Config(
                "Provider timeout must be non-zero".to_string(),
            ));
        }

        url::Url::parse(&self.provider.api_url)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_settings() -> Settings {
        Settings {
            database: DatabaseConfig {
                url: "sqlite::memory:".to_string(),
                max_connections: 5,
                min_connections: 1,
                connection_timeout_seconds: 30,
                idle_timeout_seconds: 600,
            },
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 5000,
                api_rate_limit: 50,
                max_request_body_size: 1048576,
            },
            provider: ProviderConfig::default(),
        }
    }

    #[test]
    fn test_settings_validation() {
        let mut settings = test_settings();
        assert!(settings.validate().is_ok());

        settings.server.port = 0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_rate_limit_bounds() {
        let mut settings = test_settings();
        settings.server.api_rate_limit = MAX_API_RATE_LIMIT;
        assert!(settings.validate().is_ok());

        settings.server.api_rate_limit = u64::from(u32::MAX) + 1;
        assert!(matches!(settings.validate(), Err(Error::Config(_))));

        settings.server.api_rate_limit = 0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_provider_validation() {
        let mut settings = test_settings();
        settings.provider.timeout_seconds = 0;
        assert!(settings.validate().is_err());

        let mut settings = test_settings();
        settings.provider.api_url = "not a url".to_string();
        assert!(matches!(settings.validate(), Err(Error::InvalidUrl(_))));
    }

    #[test]
    fn test_provider_credentials() {
        let mut provider = ProviderConfig::default();
        assert!(!provider.has_credentials());

        provider.app_id = "id".to_string();
        provider.app_key = "key".to_string();
        assert!(provider.has_credentials());
    }
}
