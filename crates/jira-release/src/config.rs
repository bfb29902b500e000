//! Configuration for a release run.
//!
//! Values arrive from the CLI (which falls back to the CI environment) and are
//! validated here before any network traffic happens.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use url::Url;

use crate::error::{Error, Result};

/// Connection settings for the Jira instance.
#[derive(Clone)]
pub struct JiraSettings {
    base_url: String,
    /// Basic-auth username (usually an account email).
    pub user: String,
    /// Basic-auth secret (API token).
    pub token: String,
    /// Per-request timeout. `None` leaves requests unbounded.
    pub timeout: Option<Duration>,
}

impl JiraSettings {
    /// Validate the base URL and bundle the credentials.
    ///
    /// The URL must be an absolute `http` or `https` URL. A trailing `/` is
    /// dropped so joined paths never contain `//`.
    pub fn new(
        base_url: impl AsRef<str>,
        user: impl Into<String>,
        token: impl Into<String>,
    ) -> Result<Self> {
        let raw = base_url.as_ref().trim();
        let parsed = Url::parse(raw).map_err(|source| Error::InvalidBaseUrl {
            url: raw.to_string(),
            source,
        })?;

        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(Error::Config(format!(
                "Jira URL must use http or https, got '{}'",
                parsed.scheme()
            )));
        }

        Ok(Self {
            base_url: raw.trim_end_matches('/').to_string(),
            user: user.into(),
            token: token.into(),
            timeout: None,
        })
    }

    /// Set a per-request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Base URL without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl fmt::Debug for JiraSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JiraSettings")
            .field("base_url", &self.base_url)
            .field("user", &self.user)
            .field("token", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// What to ensure exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseRequest {
    /// Project key (e.g. "ABC").
    pub project_key: String,
    /// Version name, matched case-sensitively.
    pub version_name: String,
}

impl ReleaseRequest {
    /// Build a request, rejecting blank inputs.
    pub fn new(project_key: impl Into<String>, version_name: impl Into<String>) -> Result<Self> {
        let project_key = project_key.into();
        let version_name = version_name.into();

        if project_key.trim().is_empty() {
            return Err(Error::Config("project key must not be empty".to_string()));
        }
        if version_name.trim().is_empty() {
            return Err(Error::Config("version name must not be empty".to_string()));
        }

        Ok(Self {
            project_key,
            version_name,
        })
    }
}

/// Everything a run needs.
#[derive(Debug, Clone)]
pub struct Config {
    /// Jira connection and credentials.
    pub jira: JiraSettings,
    /// Project and version to ensure.
    pub release: ReleaseRequest,
    /// File the CI system scans for `KEY=VALUE` exports.
    pub github_env: PathBuf,
}
