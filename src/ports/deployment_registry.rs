//! Registration API port definition.

use tracing::info;

use crate::domain::{AppError, DeploymentSpec, RegistrationReceipt};

/// Port for the orchestration service's create-or-update deployment operation.
///
/// Implementations must treat `spec.name` as the identity key so that registering the
/// same deployment twice updates it instead of creating a duplicate.
pub trait DeploymentRegistry {
    fn register(&self, spec: &DeploymentSpec) -> Result<RegistrationReceipt, AppError>;
}

/// Registry that accepts every spec without contacting the API. Used by `deploy --dry-run`.
#[derive(Debug, Clone, Default)]
pub struct DryRunRegistry;

impl DeploymentRegistry for DryRunRegistry {
    fn register(&self, spec: &DeploymentSpec) -> Result<RegistrationReceipt, AppError> {
        info!(
            deployment = %spec.name,
            schedule = spec.schedule.as_ref().map(|schedule| schedule.describe()).as_deref(),
            "dry run: skipping registration"
        );
        Ok(RegistrationReceipt { name: spec.name.clone(), deployment_id: None })
    }
}
