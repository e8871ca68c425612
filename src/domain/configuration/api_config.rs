//! Registration API configuration (`api` section).

use serde::{Deserialize, Serialize};
use url::Url;

use crate::domain::AppError;

/// Registration API configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegistrationApiConfig {
    /// Base URL of the orchestration service API.
    #[serde(default = "default_api_url")]
    pub url: Url,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// Maximum attempts per registration, including the first.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    /// Base delay between attempts in milliseconds.
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
}

impl Default for RegistrationApiConfig {
    fn default() -> Self {
        Self {
            url: default_api_url(),
            timeout_secs: default_timeout(),
            max_attempts: default_max_attempts(),
            retry_delay_ms: default_retry_delay_ms(),
        }
    }
}

impl RegistrationApiConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.url.cannot_be_a_base() {
            return Err(AppError::InvalidConfig(format!(
                "api.url '{}' is not a base URL",
                self.url
            )));
        }
        if self.timeout_secs == 0 {
            return Err(AppError::InvalidConfig(
                "api.timeout_secs must be greater than 0".to_string(),
            ));
        }
        if self.max_attempts == 0 {
            return Err(AppError::InvalidConfig(
                "api.max_attempts must be greater than 0".to_string(),
            ));
        }
        if self.retry_delay_ms == 0 {
            return Err(AppError::InvalidConfig(
                "api.retry_delay_ms must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

fn default_api_url() -> Url {
    Url::parse("http://127.0.0.1:4200/api").expect("Default API URL must be valid")
}

fn default_timeout() -> u64 {
    30
}

fn default_max_attempts() -> u32 {
    3
}

fn default_retry_delay_ms() -> u64 {
    500
}
