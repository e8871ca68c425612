//! flowdeploy: register flow deployments and their schedules with an orchestration service.
//!
//! A YAML config document lists flow entries. Each entry is resolved into a
//! [`DeploymentSpec`] (entrypoint, name, work pool, optional schedule and
//! parameters) and submitted to the registration API. Registration is keyed by
//! deployment name, so re-running the same config updates deployments in place.

pub mod adapters;
pub mod app;
pub mod domain;
pub mod ports;

#[cfg(test)]
pub(crate) mod testing;

pub use app::api::{
    AppError, DeployOptions, DeployReport, EntryOutcome, PlanReport, PlannedEntry, deploy, plan,
};
pub use domain::{
    DeployConfig, DeploymentSpec, EntryError, EntryIdentity, RegistrationReceipt, ScheduleError,
    ScheduleSpec, exit_code,
};
pub use domain::configuration::{load_config, parse_config_content};
pub use domain::schedule::{RawSchedule, build_schedule, parse_every};
pub use ports::{DeploymentRegistry, DryRunRegistry};
