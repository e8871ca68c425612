mod deployment_registry;

pub use deployment_registry::{DeploymentRegistry, DryRunRegistry};
