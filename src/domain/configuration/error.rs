use crate::domain::schedule::ScheduleError;

/// Problems scoped to a single flow entry. They never abort the batch.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EntryError {
    /// `entrypoint` or `name` is absent or blank.
    #[error("entry is missing required field '{field}'")]
    MissingField { field: &'static str },

    /// Entry is not a mapping, has an unknown key, or a value of the wrong type.
    #[error("entry is malformed: {0}")]
    Malformed(String),

    #[error("invalid entrypoint '{0}': expected <path>:<callable>, e.g. flows/etl.py:nightly")]
    InvalidEntrypoint(String),

    /// An earlier entry in the document already resolved to this deployment name.
    #[error("duplicate deployment name '{name}': already used by flows[{first_index}]")]
    DuplicateName { name: String, first_index: usize },

    #[error("invalid schedule: {0}")]
    Schedule(#[from] ScheduleError),
}
