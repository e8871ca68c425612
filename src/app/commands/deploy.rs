//! Register every flow entry with the orchestration service.

use tracing::{error, info};

use super::plan;
use crate::domain::{AppError, DeployConfig, DeploymentSpec, EntryIdentity, RegistrationReceipt};
use crate::ports::DeploymentRegistry;

/// Options for the deploy command.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeployOptions {
    /// Resolve and print deployments without calling the API.
    pub dry_run: bool,
}

/// Outcome for one entry.
#[derive(Debug)]
pub struct EntryOutcome {
    pub identity: EntryIdentity,
    /// The resolved spec, when the entry got far enough to build one.
    pub spec: Option<DeploymentSpec>,
    pub result: Result<RegistrationReceipt, AppError>,
}

/// Per-entry outcomes in document order.
#[derive(Debug, Default)]
pub struct DeployReport {
    pub outcomes: Vec<EntryOutcome>,
}

impl DeployReport {
    pub fn has_failures(&self) -> bool {
        self.outcomes.iter().any(|outcome| outcome.result.is_err())
    }

    pub fn succeeded(&self) -> impl Iterator<Item = &EntryOutcome> {
        self.outcomes.iter().filter(|outcome| outcome.result.is_ok())
    }

    pub fn failed(&self) -> impl Iterator<Item = &EntryOutcome> {
        self.outcomes.iter().filter(|outcome| outcome.result.is_err())
    }
}

/// Register each entry in document order.
///
/// A failing entry, whether it fails to build or is rejected by the registry, is logged and
/// recorded; processing continues with the next entry.
pub fn execute<R: DeploymentRegistry + ?Sized>(
    config: &DeployConfig,
    registry: &R,
) -> DeployReport {
    let plan = plan::execute(config);
    let total = plan.entries.len();

    let outcomes = plan
        .entries
        .into_iter()
        .map(|planned| {
            let (spec, result) = match planned.result {
                Ok(spec) => {
                    info!(
                        deployment = %spec.name,
                        entrypoint = %spec.entrypoint,
                        work_pool = %spec.work_pool,
                        "registering deployment"
                    );
                    let result = registry.register(&spec);
                    (Some(spec), result)
                }
                Err(err) => (None, Err(AppError::from(err))),
            };

            match &result {
                Ok(receipt) => info!(
                    deployment = %receipt.name,
                    deployment_id = receipt.deployment_id.as_deref().unwrap_or("-"),
                    "deployment registered"
                ),
                Err(err) => error!(
                    entry = %planned.identity,
                    position = planned.identity.index + 1,
                    total,
                    "entry failed: {}",
                    err
                ),
            }

            EntryOutcome { identity: planned.identity, spec, result }
        })
        .collect();

    DeployReport { outcomes }
}
