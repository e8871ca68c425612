//! Registration API client implementation using reqwest.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{CONTENT_TYPE, HeaderValue, RETRY_AFTER};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;
use url::Url;

use crate::domain::{
    AppError, DeploymentSpec, RegistrationApiConfig, RegistrationReceipt, ScheduleSpec,
};
use crate::ports::DeploymentRegistry;

/// Bearer token for the registration API. Optional.
pub const API_KEY_ENV: &str = "FLOWDEPLOY_API_KEY";
/// Overrides `api.url` from the config document.
pub const API_URL_ENV: &str = "FLOWDEPLOY_API_URL";

const DEFAULT_STATUS_MESSAGE: &str = "Registration API request failed";

/// HTTP transport for the registration API.
///
/// This client performs a single request per call. Retry behavior is implemented
/// by a dedicated retry wrapper adapter.
#[derive(Clone)]
pub struct HttpDeploymentRegistry {
    api_key: Option<String>,
    api_url: Url,
    timeout_secs: u64,
    client: Client,
}

impl std::fmt::Debug for HttpDeploymentRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpDeploymentRegistry")
            .field("api_url", &self.api_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl HttpDeploymentRegistry {
    /// Create a new HTTP client with the given API key and configuration.
    pub fn new(api_key: Option<String>, config: &RegistrationApiConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::config_error(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            api_key,
            api_url: config.url.clone(),
            timeout_secs: config.timeout_secs,
            client,
        })
    }

    /// Create from configuration, applying `FLOWDEPLOY_API_URL` and `FLOWDEPLOY_API_KEY`.
    pub fn from_env_with_config(config: &RegistrationApiConfig) -> Result<Self, AppError> {
        let api_key = std::env::var(API_KEY_ENV).ok().filter(|key| !key.trim().is_empty());

        let mut config = config.clone();
        if let Some(raw) = std::env::var(API_URL_ENV).ok().filter(|url| !url.trim().is_empty()) {
            config.url = Url::parse(raw.trim()).map_err(|e| {
                AppError::config_error(format!("{} is not a valid URL: {}", API_URL_ENV, e))
            })?;
            config.validate()?;
        }

        Self::new(api_key, &config)
    }

    /// `{api_url}/deployments/{name}`, with `name` percent-encoded as one segment.
    fn endpoint(&self, name: &str) -> Result<Url, AppError> {
        let mut url = self.api_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                AppError::config_error(format!("API URL is not a base URL: {}", self.api_url))
            })?
            .pop_if_empty()
            .push("deployments")
            .push(name);
        Ok(url)
    }

    fn send_request(
        &self,
        name: &str,
        request: &ApiRequest<'_>,
    ) -> Result<RegistrationReceipt, AppError> {
        let url = self.endpoint(name)?;
        debug!(%url, deployment = name, "sending registration request");

        let mut builder =
            self.client.put(url).header(CONTENT_TYPE, "application/json").json(request);
        if let Some(api_key) = &self.api_key {
            builder = builder.bearer_auth(api_key);
        }

        let response = builder.send().map_err(|e| self.transport_error(name, e))?;

        let status = response.status();
        let retry_after_ms = response.headers().get(RETRY_AFTER).and_then(parse_retry_after_ms);
        let body_text = response.text().unwrap_or_default();
        debug!(deployment = name, status = status.as_u16(), "registration response received");

        if status.is_success() {
            // The service may answer with an empty body; an id is informational only.
            let deployment_id = serde_json::from_str::<ApiResponse>(&body_text)
                .ok()
                .and_then(|response| response.id);
            return Ok(RegistrationReceipt { name: name.to_string(), deployment_id });
        }

        let message = extract_error_message(&body_text).unwrap_or_else(|| {
            if !body_text.trim().is_empty() {
                body_text.trim().to_string()
            } else if status.as_u16() == 429 {
                "Rate limited".to_string()
            } else if status.is_server_error() {
                "Server error".to_string()
            } else {
                DEFAULT_STATUS_MESSAGE.to_string()
            }
        });

        Err(AppError::RegistrationFailed {
            name: name.to_string(),
            message,
            status: Some(status.as_u16()),
            retry_after_ms,
        })
    }

    fn transport_error(&self, name: &str, error: reqwest::Error) -> AppError {
        if error.is_timeout() {
            return AppError::RegistrationTimeout {
                name: name.to_string(),
                timeout_secs: self.timeout_secs,
            };
        }

        if error.is_connect() {
            return AppError::RegistrationUnreachable {
                name: name.to_string(),
                message: error.to_string(),
            };
        }

        AppError::RegistrationFailed {
            name: name.to_string(),
            message: format!("HTTP request failed: {}", error),
            status: None,
            retry_after_ms: None,
        }
    }
}

#[derive(Debug, Serialize)]
struct ApiRequest<'a> {
    name: &'a str,
    entrypoint: &'a str,
    work_pool: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    schedule: Option<ApiSchedule<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    parameters: Option<&'a Map<String, Value>>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum ApiSchedule<'a> {
    Cron { cron: &'a str, timezone: &'a str },
    Interval { interval: u64, timezone: &'a str },
}

impl<'a> From<&'a ScheduleSpec> for ApiSchedule<'a> {
    fn from(schedule: &'a ScheduleSpec) -> Self {
        match schedule {
            ScheduleSpec::Cron { expression, timezone } => {
                ApiSchedule::Cron { cron: expression, timezone }
            }
            ScheduleSpec::Interval { period, timezone } => {
                ApiSchedule::Interval { interval: period.as_secs(), timezone }
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    #[serde(default)]
    id: Option<String>,
}

fn extract_error_message(body: &str) -> Option<String> {
    if body.trim().is_empty() {
        return None;
    }

    let parsed = serde_json::from_str::<Value>(body).ok()?;

    if let Some(msg) = parsed
        .get("error")
        .and_then(|error| error.get("message"))
        .and_then(|message| message.as_str())
    {
        return Some(msg.to_string());
    }

    ["detail", "message"]
        .iter()
        .find_map(|key| parsed.get(*key).and_then(|message| message.as_str()))
        .map(ToOwned::to_owned)
}

fn parse_retry_after_ms(value: &HeaderValue) -> Option<u64> {
    let raw = value.to_str().ok()?.trim();
    let seconds = raw.parse::<u64>().ok()?;
    Some(seconds.saturating_mul(1000))
}

impl DeploymentRegistry for HttpDeploymentRegistry {
    fn register(&self, spec: &DeploymentSpec) -> Result<RegistrationReceipt, AppError> {
        let request = ApiRequest {
            name: &spec.name,
            entrypoint: &spec.entrypoint,
            work_pool: &spec.work_pool,
            schedule: spec.schedule.as_ref().map(ApiSchedule::from),
            parameters: spec.parameters.as_ref(),
        };

        self.send_request(&spec.name, &request)
    }
}
