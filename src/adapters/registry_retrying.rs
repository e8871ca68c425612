//! Retry wrapper for registration API operations.

use std::thread;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use tracing::warn;

use crate::domain::{AppError, DeploymentSpec, RegistrationApiConfig, RegistrationReceipt};
use crate::ports::DeploymentRegistry;

const DEFAULT_MAX_DELAY_MS: u64 = 30_000;
const MAX_LOG_ERROR_CHARS: usize = 512;

/// Bounded exponential backoff for transient registration failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    base_delay_ms: u64,
    max_delay_ms: u64,
}

impl RetryPolicy {
    pub fn from_config(config: &RegistrationApiConfig) -> Self {
        Self {
            max_attempts: config.max_attempts.max(1),
            base_delay_ms: config.retry_delay_ms.max(1),
            max_delay_ms: DEFAULT_MAX_DELAY_MS.max(config.retry_delay_ms),
        }
    }

    fn delay_for_retry(&self, failed_attempt: u32, error: &AppError) -> Duration {
        if let AppError::RegistrationFailed { retry_after_ms: Some(retry_after_ms), .. } = error {
            return Duration::from_millis((*retry_after_ms).min(self.max_delay_ms));
        }

        // attempt=1 -> base, attempt=2 -> base*2, attempt=3 -> base*4, capped.
        let exponent = failed_attempt.saturating_sub(1).min(6);
        let multiplier = 1_u64 << exponent;
        let backoff_ms = self.base_delay_ms.saturating_mul(multiplier).min(self.max_delay_ms);
        let jitter_ms = compute_jitter_ms(backoff_ms);
        Duration::from_millis(backoff_ms.saturating_add(jitter_ms).min(self.max_delay_ms))
    }
}

/// Re-submits transient failures. Safe because registration is idempotent on `name`.
pub struct RetryingDeploymentRegistry {
    inner: Box<dyn DeploymentRegistry>,
    policy: RetryPolicy,
}

impl RetryingDeploymentRegistry {
    pub fn new(inner: Box<dyn DeploymentRegistry>, policy: RetryPolicy) -> Self {
        Self { inner, policy }
    }
}

impl DeploymentRegistry for RetryingDeploymentRegistry {
    fn register(&self, spec: &DeploymentSpec) -> Result<RegistrationReceipt, AppError> {
        let mut attempt = 1;
        loop {
            let error = match self.inner.register(spec) {
                Ok(receipt) => return Ok(receipt),
                Err(error) => error,
            };

            if !is_retryable_error(&error) || attempt >= self.policy.max_attempts {
                return Err(error);
            }

            let delay = self.policy.delay_for_retry(attempt, &error);
            warn!(
                deployment = %spec.name,
                attempt,
                max_attempts = self.policy.max_attempts,
                delay_ms = delay.as_millis() as u64,
                "registration failed: {}; retrying",
                format_error_for_log(&error)
            );
            thread::sleep(delay);
            attempt += 1;
        }
    }
}

fn is_retryable_error(error: &AppError) -> bool {
    match error {
        AppError::RegistrationTimeout { .. } | AppError::RegistrationUnreachable { .. } => true,
        AppError::RegistrationFailed { status: Some(code), .. } => {
            *code == 408 || *code == 429 || *code >= 500
        }
        _ => false,
    }
}

fn compute_jitter_ms(backoff_ms: u64) -> u64 {
    if backoff_ms <= 1 {
        return 0;
    }

    let jitter_cap = backoff_ms / 4; // 25% jitter upper bound
    if jitter_cap == 0 {
        return 0;
    }

    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|duration| duration.subsec_nanos() as u64)
        .unwrap_or(0);

    nanos % jitter_cap
}

fn format_error_for_log(error: &AppError) -> String {
    let message = error.to_string();
    let sanitized: String = message
        .chars()
        .take(MAX_LOG_ERROR_CHARS)
        .map(|ch| if ch.is_control() { ' ' } else { ch })
        .collect();

    let mut compact = sanitized.split_whitespace().collect::<Vec<_>>().join(" ");
    if message.chars().count() > MAX_LOG_ERROR_CHARS {
        compact.push_str(" [truncated]");
    }
    compact
}
