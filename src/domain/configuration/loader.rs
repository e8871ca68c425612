//! Config document loading.

use std::fs;
use std::io;
use std::path::Path;

use serde::Deserialize;
use serde_yaml::Value;

use super::api_config::RegistrationApiConfig;
use super::defaults::{RawDefaults, ResolvedDefaults};
use crate::domain::AppError;

/// The config document as parsed. Flow entries stay untyped so that one malformed
/// entry cannot fail the whole document.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawConfig {
    pub defaults: Option<RawDefaults>,
    pub api: Option<RegistrationApiConfig>,
    pub flows: Option<Vec<Value>>,
}

/// Loaded configuration with defaults resolved. Read-only for the rest of the run.
#[derive(Debug, Clone)]
pub struct DeployConfig {
    pub defaults: ResolvedDefaults,
    pub api: RegistrationApiConfig,
    /// Non-empty, in document order.
    pub flows: Vec<Value>,
}

/// Load and parse the config document at `path`.
pub fn load_config(path: &Path) -> Result<DeployConfig, AppError> {
    let content = fs::read_to_string(path).map_err(|err| {
        if err.kind() == io::ErrorKind::NotFound {
            AppError::ConfigNotFound(path.to_path_buf())
        } else {
            AppError::Io(err)
        }
    })?;

    parse_config_content(&content, path)
}

/// Parse configuration from string content. `path` is only used in diagnostics.
pub fn parse_config_content(content: &str, path: &Path) -> Result<DeployConfig, AppError> {
    let parse_error = |err: serde_yaml::Error| AppError::ConfigParse {
        path: path.to_path_buf(),
        details: err.to_string(),
    };

    // Only the first YAML document is read; a stream with none is empty.
    let document = match serde_yaml::Deserializer::from_str(content).next() {
        Some(document) => Value::deserialize(document).map_err(parse_error)?,
        None => Value::Null,
    };
    if is_empty_document(&document) {
        return Err(AppError::ConfigEmpty(path.to_path_buf()));
    }

    let raw: RawConfig = serde_yaml::from_value(document).map_err(parse_error)?;
    let flows = raw.flows.filter(|flows| !flows.is_empty()).ok_or(AppError::NoFlowsDefined)?;

    let api = raw.api.unwrap_or_default();
    api.validate()?;

    Ok(DeployConfig { defaults: ResolvedDefaults::resolve(raw.defaults.as_ref()), api, flows })
}

fn is_empty_document(document: &Value) -> bool {
    match document {
        Value::Null => true,
        Value::Mapping(mapping) => mapping.is_empty(),
        _ => false,
    }
}
