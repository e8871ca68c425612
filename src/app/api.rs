//! API facade for the application.
//!
//! Glues config loading, adapter construction and command execution together.

use std::path::Path;

use tracing::info;

use crate::adapters::{HttpDeploymentRegistry, RetryPolicy, RetryingDeploymentRegistry};
use crate::app::commands::{deploy, plan};
use crate::domain::configuration::load_config;
use crate::ports::DryRunRegistry;

pub use crate::app::commands::deploy::{DeployOptions, DeployReport, EntryOutcome};
pub use crate::app::commands::plan::{PlanReport, PlannedEntry};
pub use crate::domain::AppError;

/// Load `config_path` and register every flow entry it declares.
///
/// Fatal configuration problems are returned as `Err`; per-entry failures are
/// recorded in the report and do not stop the batch.
pub fn deploy(config_path: &Path, options: DeployOptions) -> Result<DeployReport, AppError> {
    let config = load_config(config_path)?;
    info!(path = %config_path.display(), flows = config.flows.len(), "loaded config");

    if options.dry_run {
        return Ok(deploy::execute(&config, &DryRunRegistry));
    }

    let http = HttpDeploymentRegistry::from_env_with_config(&config.api)?;
    let registry =
        RetryingDeploymentRegistry::new(Box::new(http), RetryPolicy::from_config(&config.api));
    Ok(deploy::execute(&config, &registry))
}

/// Load `config_path` and resolve every entry without contacting the API.
pub fn plan(config_path: &Path) -> Result<PlanReport, AppError> {
    let config = load_config(config_path)?;
    Ok(plan::execute(&config))
}
