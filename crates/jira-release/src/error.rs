//! Error types for the release workflow.

use std::path::PathBuf;

use reqwest::StatusCode;
use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors that can occur while ensuring a Jira version exists.
///
/// Every variant is fatal to a run; nothing here is retried.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid configuration.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// The tracker base URL could not be parsed.
    #[error("Invalid Jira URL '{url}'")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// The HTTP client could not be constructed.
    #[error("Failed to build HTTP client")]
    ClientBuild(#[source] reqwest::Error),

    /// The request never produced a response.
    #[error("{operation} request failed")]
    Http {
        operation: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// Jira answered with a non-success status.
    #[error("{operation} failed: {status} - {message}")]
    Api {
        operation: &'static str,
        status: StatusCode,
        message: String,
    },

    /// The response body did not have the expected shape.
    #[error("Failed to decode {operation} response")]
    Decode {
        operation: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// Jira returned a project id that is not a positive base-10 integer.
    #[error("Failed to convert project ID '{value}' to a positive integer")]
    InvalidProjectId { value: String },

    /// The CI environment file could not be opened or written.
    #[error("Failed to write environment file {}", .path.display())]
    EnvFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A value would not survive the single-line `KEY=VALUE` format.
    #[error("Cannot export {key}: key or value would break the KEY=VALUE line format")]
    InvalidEnvValue { key: String },
}

impl Error {
    /// HTTP status for errors that came back from Jira.
    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Http { source, .. } => source.status(),
            _ => None,
        }
    }
}
