use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::domain::configuration::EntryError;

/// Process exit statuses reported by the `flowdeploy` binary.
pub mod exit_code {
    /// One or more entries failed after the whole batch was attempted.
    pub const ENTRY_FAILURES: i32 = 1;
    /// Invalid command-line usage (reported by clap).
    pub const USAGE: i32 = 2;
    pub const CONFIG_NOT_FOUND: i32 = 3;
    pub const CONFIG_EMPTY: i32 = 4;
    pub const NO_FLOWS_DEFINED: i32 = 5;
    /// Any other fatal configuration or I/O problem.
    pub const CONFIG_INVALID: i32 = 6;
}

/// Library-wide error type for flowdeploy operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Config document does not exist at the given path.
    #[error("Config file not found: {}", .0.display())]
    ConfigNotFound(PathBuf),

    /// Config document parsed to nothing.
    #[error("Config file is empty: {}", .0.display())]
    ConfigEmpty(PathBuf),

    /// `flows` is absent or an empty sequence.
    #[error("No flows defined: add at least one entry under 'flows'")]
    NoFlowsDefined,

    /// Config document is not valid YAML or has the wrong top-level shape.
    #[error("Failed to parse {}: {details}", .path.display())]
    ConfigParse { path: PathBuf, details: String },

    /// Config values are present but unusable.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A single flow entry could not be turned into a deployment.
    #[error(transparent)]
    Entry(#[from] EntryError),

    /// The registration API rejected the deployment or could not be reached.
    #[error("{}", registration_failed_message(.name, .message, .status))]
    RegistrationFailed {
        name: String,
        message: String,
        status: Option<u16>,
        retry_after_ms: Option<u64>,
    },

    /// The registration API could not be reached (connection refused, reset, DNS).
    #[error("Registration of '{name}' failed: could not reach the API: {message}")]
    RegistrationUnreachable { name: String, message: String },

    /// The registration call did not complete within the configured timeout.
    #[error("Registration of '{name}' timed out after {timeout_secs}s")]
    RegistrationTimeout { name: String, timeout_secs: u64 },
}

impl AppError {
    pub fn config_error<S: Into<String>>(message: S) -> Self {
        AppError::InvalidConfig(message.into())
    }

    /// Exit status the binary reports for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::ConfigNotFound(_) => exit_code::CONFIG_NOT_FOUND,
            AppError::ConfigEmpty(_) => exit_code::CONFIG_EMPTY,
            AppError::NoFlowsDefined => exit_code::NO_FLOWS_DEFINED,
            AppError::Io(_) | AppError::ConfigParse { .. } | AppError::InvalidConfig(_) => {
                exit_code::CONFIG_INVALID
            }
            AppError::Entry(_)
            | AppError::RegistrationFailed { .. }
            | AppError::RegistrationUnreachable { .. }
            | AppError::RegistrationTimeout { .. } => exit_code::ENTRY_FAILURES,
        }
    }
}

fn registration_failed_message(name: &str, message: &str, status: &Option<u16>) -> String {
    match status {
        Some(code) => format!("Registration of '{}' failed (HTTP {}): {}", name, code, message),
        None => format!("Registration of '{}' failed: {}", name, message),
    }
}
