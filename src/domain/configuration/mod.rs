pub mod api_config;
pub mod defaults;
pub mod entry;
pub mod error;
pub mod loader;

pub use api_config::RegistrationApiConfig;
pub use defaults::{DEFAULT_TIMEZONE, DEFAULT_WORK_POOL, RawDefaults, ResolvedDefaults};
pub use entry::{EntryIdentity, FlowEntry, RawFlowEntry};
pub use error::EntryError;
pub use loader::{DeployConfig, RawConfig, load_config, parse_config_content};

/// Trimmed value, or `None` when absent or blank.
pub(crate) fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}
