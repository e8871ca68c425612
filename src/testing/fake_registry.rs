use crate::domain::{AppError, DeploymentSpec, RegistrationReceipt};
use crate::ports::DeploymentRegistry;
use std::sync::{Arc, Mutex};

/// In-memory registry that records every submitted spec.
#[derive(Clone, Default)]
pub struct FakeRegistry {
    pub registered: Arc<Mutex<Vec<DeploymentSpec>>>,
    pub rejected_names: Vec<String>,
}

impl FakeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer registrations of `name` with a 422 rejection.
    pub fn rejecting(mut self, name: impl Into<String>) -> Self {
        self.rejected_names.push(name.into());
        self
    }

    pub fn registered_specs(&self) -> Vec<DeploymentSpec> {
        self.registered.lock().unwrap().clone()
    }
}

impl DeploymentRegistry for FakeRegistry {
    fn register(&self, spec: &DeploymentSpec) -> Result<RegistrationReceipt, AppError> {
        if self.rejected_names.contains(&spec.name) {
            return Err(AppError::RegistrationFailed {
                name: spec.name.clone(),
                message: "rejected by fake registry".to_string(),
                status: Some(422),
                retry_after_ms: None,
            });
        }

        let mut registered = self.registered.lock().unwrap();
        registered.push(spec.clone());
        Ok(RegistrationReceipt {
            name: spec.name.clone(),
            deployment_id: Some(format!("dep-{}", registered.len())),
        })
    }
}
