//! Resolve every flow entry into a deployment spec without contacting the API.

use std::collections::HashMap;

use crate::domain::{DeployConfig, DeploymentSpec, EntryError, EntryIdentity};

/// One entry's resolution result.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedEntry {
    pub identity: EntryIdentity,
    pub result: Result<DeploymentSpec, EntryError>,
}

/// Resolution results in document order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlanReport {
    pub entries: Vec<PlannedEntry>,
}

impl PlanReport {
    pub fn has_failures(&self) -> bool {
        self.entries.iter().any(|entry| entry.result.is_err())
    }

    pub fn specs(&self) -> impl Iterator<Item = &DeploymentSpec> {
        self.entries.iter().filter_map(|entry| entry.result.as_ref().ok())
    }

    pub fn failures(&self) -> impl Iterator<Item = (&EntryIdentity, &EntryError)> {
        self.entries
            .iter()
            .filter_map(|entry| entry.result.as_ref().err().map(|err| (&entry.identity, err)))
    }
}

/// Build one spec per entry. A bad entry is recorded and the rest are still built.
///
/// Deployment names are unique per document: the first entry to resolve a name keeps it
/// and any later entry with the same name fails with `DuplicateName`.
pub fn execute(config: &DeployConfig) -> PlanReport {
    let mut claimed: HashMap<String, usize> = HashMap::new();

    let entries = config
        .flows
        .iter()
        .enumerate()
        .map(|(index, value)| {
            let result = DeploymentSpec::from_value(value, &config.defaults).and_then(|spec| {
                if let Some(&first_index) = claimed.get(&spec.name) {
                    return Err(EntryError::DuplicateName { name: spec.name, first_index });
                }
                claimed.insert(spec.name.clone(), index);
                Ok(spec)
            });
            PlannedEntry { identity: EntryIdentity::from_value(index, value), result }
        })
        .collect();

    PlanReport { entries }
}
