//! Configuration for the catalog client.
//!
//! Supports environment-based configuration with sensible defaults.

use crate::error::{FetchError, FetchResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

/// Default production API base URL
const DEFAULT_API_URL: &str = "https://api.wclook.app/v1";

/// Environment types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development (typically a localhost backend)
    Development,
    /// Staging environment
    Staging,
    /// Production environment
    Production,
}

impl Default for Environment {
    fn default() -> Self {
        Self::Production
    }
}

impl Environment {
    /// Parse from the `WCLOOK_ENV` environment variable
    #[must_use]
    pub fn from_env() -> Self {
        match env::var("WCLOOK_ENV").unwrap_or_default().to_lowercase().as_str() {
            "development" | "dev" | "local" => Self::Development,
            "staging" | "stage" => Self::Staging,
            _ => Self::Production,
        }
    }
}

/// Client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL for the catalog API
    pub base_url: String,
    /// Request timeout
    #[serde(with = "duration_secs")]
    pub timeout: Duration,
    /// Current environment
    pub environment: Environment,
}

mod duration_secs {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        duration.as_secs().serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout: Duration::from_secs(30),
            environment: Environment::default(),
        }
    }
}

impl ClientConfig {
    /// Create configuration from environment variables
    ///
    /// Reads the following environment variables:
    /// - `WCLOOK_API_URL`: Base URL for the catalog API
    /// - `WCLOOK_ENV`: Environment (development/staging/production)
    /// - `WCLOOK_TIMEOUT_SECS`: Request timeout in seconds
    pub fn from_env() -> FetchResult<Self> {
        let environment = Environment::from_env();

        let base_url = env::var("WCLOOK_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        let timeout = env::var("WCLOOK_TIMEOUT_SECS")
            .ok()
            .map(|raw| {
                raw.parse::<u64>().map_err(|_| {
                    FetchError::Unknown(format!("invalid WCLOOK_TIMEOUT_SECS value: {raw}"))
                })
            })
            .transpose()?
            .map_or_else(|| Duration::from_secs(30), Duration::from_secs);

        let config = Self {
            base_url,
            timeout,
            environment,
        };
        config.validate()?;
        Ok(config)
    }

    /// Development configuration pointing at a localhost backend
    #[must_use]
    pub fn development() -> Self {
        Self {
            base_url: "http://localhost:8080/v1".to_string(),
            timeout: Duration::from_secs(10),
            environment: Environment::Development,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> FetchResult<()> {
        if self.base_url.is_empty() {
            return Err(FetchError::Unknown("base URL must not be empty".to_string()));
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(FetchError::Unknown(format!(
                "base URL must be http(s): {}",
                self.base_url
            )));
        }
        if self.timeout.is_zero() {
            return Err(FetchError::Unknown("timeout must be non-zero".to_string()));
        }
        Ok(())
    }
}
