//! Top-level `defaults` section.

use serde::{Deserialize, Serialize};

use super::non_blank;

pub const DEFAULT_WORK_POOL: &str = "process-pool";
pub const DEFAULT_TIMEZONE: &str = "UTC";

/// `defaults` as written in the config document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawDefaults {
    pub work_pool: Option<String>,
    pub timezone: Option<String>,
}

/// Defaults resolved once per run and shared read-only by every entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedDefaults {
    pub work_pool: String,
    pub timezone: String,
}

impl Default for ResolvedDefaults {
    fn default() -> Self {
        Self { work_pool: DEFAULT_WORK_POOL.to_string(), timezone: DEFAULT_TIMEZONE.to_string() }
    }
}

impl ResolvedDefaults {
    /// Apply literal fallbacks to absent or blank values. No other validation happens here;
    /// an unknown pool or timezone is only caught by the registration API.
    pub fn resolve(raw: Option<&RawDefaults>) -> Self {
        let raw = raw.cloned().unwrap_or_default();
        Self {
            work_pool: non_blank(raw.work_pool.as_deref()).unwrap_or(DEFAULT_WORK_POOL).to_string(),
            timezone: non_blank(raw.timezone.as_deref()).unwrap_or(DEFAULT_TIMEZONE).to_string(),
        }
    }
}
