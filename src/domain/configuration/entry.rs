//! Flow entries under `flows`.

use std::fmt;

use serde::Deserialize;
use serde_json::{Map, Value as JsonValue};
use serde_yaml::Value;

use super::error::EntryError;
use super::non_blank;
use crate::domain::schedule::RawSchedule;

/// One item of `flows`, typed but not yet validated.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawFlowEntry {
    pub entrypoint: Option<String>,
    pub name: Option<String>,
    pub parameters: Option<Map<String, JsonValue>>,
    pub schedule: Option<RawSchedule>,
}

/// A flow entry whose required fields are present and well-formed.
#[derive(Debug, Clone, PartialEq)]
pub struct FlowEntry {
    pub entrypoint: String,
    pub name: String,
    pub parameters: Option<Map<String, JsonValue>>,
    pub schedule: Option<RawSchedule>,
}

impl FlowEntry {
    /// Type one untyped `flows` item.
    pub fn from_value(value: &Value) -> Result<Self, EntryError> {
        let raw: RawFlowEntry = serde_yaml::from_value(value.clone())
            .map_err(|err| EntryError::Malformed(err.to_string()))?;
        raw.validate()
    }
}

impl RawFlowEntry {
    pub fn validate(self) -> Result<FlowEntry, EntryError> {
        let entrypoint = non_blank(self.entrypoint.as_deref())
            .ok_or(EntryError::MissingField { field: "entrypoint" })?;
        let name =
            non_blank(self.name.as_deref()).ok_or(EntryError::MissingField { field: "name" })?;
        validate_entrypoint(entrypoint)?;

        Ok(FlowEntry {
            entrypoint: entrypoint.to_string(),
            name: name.to_string(),
            parameters: self.parameters,
            schedule: self.schedule,
        })
    }
}

/// `<path>:<callable>`, split on the last colon so drive letters survive.
fn validate_entrypoint(entrypoint: &str) -> Result<(), EntryError> {
    match entrypoint.rsplit_once(':') {
        Some((path, callable)) if !path.trim().is_empty() && !callable.trim().is_empty() => Ok(()),
        _ => Err(EntryError::InvalidEntrypoint(entrypoint.to_string())),
    }
}

/// Whatever identifies an entry in reports, read leniently so that malformed entries
/// can still be named.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryIdentity {
    /// Zero-based position in `flows`.
    pub index: usize,
    pub name: Option<String>,
    pub entrypoint: Option<String>,
}

impl EntryIdentity {
    pub fn from_value(index: usize, value: &Value) -> Self {
        let field = |key: &str| {
            non_blank(value.get(key).and_then(Value::as_str)).map(ToOwned::to_owned)
        };
        Self { index, name: field("name"), entrypoint: field("entrypoint") }
    }
}

impl fmt::Display for EntryIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.name, &self.entrypoint) {
            (Some(name), Some(entrypoint)) => {
                write!(f, "flows[{}] '{}' ({})", self.index, name, entrypoint)
            }
            (Some(name), None) => write!(f, "flows[{}] '{}'", self.index, name),
            (None, Some(entrypoint)) => write!(f, "flows[{}] ({})", self.index, entrypoint),
            (None, None) => write!(f, "flows[{}]", self.index),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn yaml(text: &str) -> Value {
        serde_yaml::from_str(text).unwrap()
    }

    #[test]
    fn types_a_complete_entry() {
        let value = yaml(
            r#"
entrypoint: flows/etl.py:nightly
name: etl-nightly
parameters:
  region: eu
  retries: 3
schedule:
  cron: "0 2 * * *"
"#,
        );
        let entry = FlowEntry::from_value(&value).unwrap();
        assert_eq!(entry.entrypoint, "flows/etl.py:nightly");
        assert_eq!(entry.name, "etl-nightly");
        let parameters = entry.parameters.unwrap();
        assert_eq!(parameters["region"], JsonValue::from("eu"));
        assert_eq!(parameters["retries"], JsonValue::from(3));
        assert_eq!(entry.schedule.unwrap().cron.as_deref(), Some("0 2 * * *"));
    }

    #[test]
    fn missing_name_is_reported() {
        let value = yaml("entrypoint: flows/etl.py:nightly\n");
        assert_eq!(FlowEntry::from_value(&value), Err(EntryError::MissingField { field: "name" }));
    }

    #[test]
    fn blank_entrypoint_is_reported_as_missing() {
        let value = yaml("entrypoint: '  '\nname: etl\n");
        assert_eq!(
            FlowEntry::from_value(&value),
            Err(EntryError::MissingField { field: "entrypoint" })
        );
    }

    #[test]
    fn entrypoint_must_name_a_callable() {
        for entrypoint in ["flows/etl.py", "flows/etl.py:", ":nightly"] {
            let value = yaml(&format!("entrypoint: '{entrypoint}'\nname: etl\n"));
            assert_eq!(
                FlowEntry::from_value(&value),
                Err(EntryError::InvalidEntrypoint(entrypoint.to_string()))
            );
        }
    }

    #[test]
    fn windows_style_paths_are_accepted() {
        let value = yaml("entrypoint: 'C:\\flows\\etl.py:nightly'\nname: etl\n");
        assert!(FlowEntry::from_value(&value).is_ok());
    }

    #[test]
    fn wrong_value_types_are_malformed() {
        let value = yaml("entrypoint: flows/etl.py:nightly\nname: etl\nparameters: [1, 2]\n");
        assert!(matches!(FlowEntry::from_value(&value), Err(EntryError::Malformed(_))));

        let value = yaml("entrypoint: flows/etl.py:nightly\nname: etl\nschedule:\n  every: 15\n");
        assert!(matches!(FlowEntry::from_value(&value), Err(EntryError::Malformed(_))));
    }

    #[test]
    fn unknown_keys_are_malformed() {
        let value = yaml("entrypoint: flows/etl.py:nightly\nname: etl\nschedule:\n  evrey: 15m\n");
        let err = FlowEntry::from_value(&value).unwrap_err();
        assert!(matches!(&err, EntryError::Malformed(msg) if msg.contains("evrey")));
    }

    #[test]
    fn non_mapping_entry_is_malformed() {
        assert!(matches!(
            FlowEntry::from_value(&yaml("just-a-string")),
            Err(EntryError::Malformed(_))
        ));
    }

    #[test]
    fn identity_is_read_from_malformed_entries() {
        let value = yaml("name: etl\nentrypoint: 42\nparameters: nope\n");
        let identity = EntryIdentity::from_value(4, &value);
        assert_eq!(identity.name.as_deref(), Some("etl"));
        assert_eq!(identity.entrypoint, None);
        assert_eq!(identity.to_string(), "flows[4] 'etl'");

        let identity = EntryIdentity::from_value(0, &yaml("[]"));
        assert_eq!(identity.to_string(), "flows[0]");
    }
}
