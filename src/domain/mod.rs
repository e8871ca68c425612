pub mod configuration;
pub mod deployment;
pub mod error;
pub mod schedule;

pub use configuration::{
    DeployConfig, EntryError, EntryIdentity, FlowEntry, RegistrationApiConfig, ResolvedDefaults,
};
pub use deployment::{DeploymentSpec, RegistrationReceipt};
pub use error::{AppError, exit_code};
pub use schedule::{ScheduleError, ScheduleSpec};
