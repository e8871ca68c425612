//! Fully resolved deployment records.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::domain::configuration::{EntryError, FlowEntry, ResolvedDefaults};
use crate::domain::schedule::{ScheduleSpec, build_schedule};

/// The record submitted to the registration API. `name` is the identity key: registering
/// the same name again updates the existing deployment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeploymentSpec {
    pub name: String,
    pub entrypoint: String,
    pub work_pool: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule: Option<ScheduleSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Map<String, Value>>,
}

impl DeploymentSpec {
    /// Merge shared defaults with one entry's own settings.
    pub fn build(entry: &FlowEntry, defaults: &ResolvedDefaults) -> Result<Self, EntryError> {
        let schedule = build_schedule(entry.schedule.as_ref(), &defaults.timezone)?;
        let parameters = entry.parameters.clone().filter(|parameters| !parameters.is_empty());

        Ok(Self {
            name: entry.name.clone(),
            entrypoint: entry.entrypoint.clone(),
            work_pool: defaults.work_pool.clone(),
            schedule,
            parameters,
        })
    }

    /// Type and build one untyped `flows` item.
    pub fn from_value(
        value: &serde_yaml::Value,
        defaults: &ResolvedDefaults,
    ) -> Result<Self, EntryError> {
        Self::build(&FlowEntry::from_value(value)?, defaults)
    }
}

/// Acknowledgement returned by a successful registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationReceipt {
    pub name: String,
    /// Identifier assigned by the orchestration service, when it reports one.
    pub deployment_id: Option<String>,
}
