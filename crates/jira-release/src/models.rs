//! Jira REST API request and response models.
//!
//! Only the fields this tool reads are modelled; Jira returns many more.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

// ============================================================================
// Project types
// ============================================================================

/// Project details from `GET /rest/api/2/project/{key}`.
#[derive(Debug, Clone, Deserialize)]
pub struct Project {
    /// Numeric project id, serialized by Jira as a string.
    pub id: String,
    /// Project key (e.g. "ABC").
    #[serde(default)]
    pub key: String,
    /// Display name.
    #[serde(default)]
    pub name: Option<String>,
}

impl Project {
    /// Parse the string id into the numeric form the version API expects.
    ///
    /// Only plain ASCII digits are accepted and the result must be non-zero.
    pub fn numeric_id(&self) -> Result<u64> {
        let invalid = || Error::InvalidProjectId {
            value: self.id.clone(),
        };

        if self.id.is_empty() || !self.id.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }

        match self.id.parse::<u64>() {
            Ok(0) | Err(_) => Err(invalid()),
            Ok(id) => Ok(id),
        }
    }
}

// ============================================================================
// Version types
// ============================================================================

/// A version record as listed by `GET /rest/api/3/project/{key}/versions`
/// or returned by `POST /rest/api/2/version`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Version {
    /// Version id assigned by Jira.
    pub id: String,
    /// Version name, unique within a project.
    pub name: String,
    /// Free-form description.
    #[serde(default)]
    pub description: Option<String>,
    /// Whether the version has been released.
    #[serde(default)]
    pub released: bool,
    /// Whether the version has been archived.
    #[serde(default)]
    pub archived: bool,
    /// Owning project.
    #[serde(default)]
    pub project_id: Option<u64>,
    /// Planned or actual release date (`YYYY-MM-DD`).
    #[serde(default)]
    pub release_date: Option<String>,
}

/// Body for `POST /rest/api/2/version`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewVersion {
    /// Version name.
    pub name: String,
    /// Owning project id.
    pub project_id: u64,
    /// Always false for versions created by this tool.
    pub released: bool,
}

impl NewVersion {
    /// An unreleased version under `project_id`.
    #[must_use]
    pub fn unreleased(name: impl Into<String>, project_id: u64) -> Self {
        Self {
            name: name.into(),
            project_id,
            released: false,
        }
    }
}
