//! Jira REST API client.
//!
//! Covers the three calls the release workflow needs: project lookup,
//! version listing and version creation.
//! API Documentation: <https://developer.atlassian.com/cloud/jira/platform/rest/v3/>

use std::fmt;

use reqwest::{Client, Response};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, instrument, warn};

use crate::config::JiraSettings;
use crate::error::{Error, Result};
use crate::models::{NewVersion, Project, Version};

/// User agent sent with every request.
const USER_AGENT: &str = concat!("jira-release/", env!("CARGO_PKG_VERSION"));

/// Authenticated Jira client.
#[derive(Clone)]
pub struct JiraClient {
    /// HTTP client.
    client: Client,
    /// Base URL without trailing slash.
    base_url: String,
    /// Basic-auth username.
    user: String,
    /// Basic-auth token.
    token: String,
}

impl JiraClient {
    /// Create a new client from validated settings.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created.
    pub fn new(settings: &JiraSettings) -> Result<Self> {
        let mut builder = Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = settings.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(Error::ClientBuild)?;

        Ok(Self {
            client,
            base_url: settings.base_url().to_string(),
            user: settings.user.clone(),
            token: settings.token.clone(),
        })
    }

    /// Base URL the client talks to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Human-facing URL of a version: `{base}/projects/{project_id}/versions/{version_id}`.
    ///
    /// The project segment is the numeric id, not the key.
    #[must_use]
    pub fn browse_url(&self, project_id: u64, version_id: &str) -> String {
        format!("{}/projects/{project_id}/versions/{version_id}", self.base_url)
    }

    /// Fetch project details by key.
    #[instrument(skip(self))]
    pub async fn get_project(&self, project_key: &str) -> Result<Project> {
        let path = format!("/rest/api/2/project/{}", urlencoding::encode(project_key));
        self.get("get project", &path).await
    }

    /// List every version of a project.
    ///
    /// Jira answers this endpoint with the full, unpaginated list.
    #[instrument(skip(self))]
    pub async fn list_versions(&self, project_key: &str) -> Result<Vec<Version>> {
        let path = format!(
            "/rest/api/3/project/{}/versions",
            urlencoding::encode(project_key)
        );
        self.get("list versions", &path).await
    }

    /// Create a version and return Jira's record of it.
    #[instrument(skip(self, version), fields(name = %version.name, project_id = version.project_id))]
    pub async fn create_version(&self, version: &NewVersion) -> Result<Version> {
        self.post("create version", "/rest/api/2/version", version)
            .await
    }

    /// Make an authenticated GET request.
    async fn get<T: DeserializeOwned>(&self, operation: &'static str, path: &str) -> Result<T> {
        let url = format!("{}{path}", self.base_url);
        debug!(url = %url, "GET request");

        let response = self
            .client
            .get(&url)
            .basic_auth(&self.user, Some(&self.token))
            .send()
            .await
            .map_err(|source| Error::Http { operation, source })?;

        Self::handle_response(operation, response).await
    }

    /// Make an authenticated POST request with a JSON body.
    async fn post<T, B>(&self, operation: &'static str, path: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = format!("{}{path}", self.base_url);
        debug!(url = %url, "POST request");

        let response = self
            .client
            .post(&url)
            .basic_auth(&self.user, Some(&self.token))
            .json(body)
            .send()
            .await
            .map_err(|source| Error::Http { operation, source })?;

        Self::handle_response(operation, response).await
    }

    /// Handle API response, parsing JSON or error.
    async fn handle_response<T: DeserializeOwned>(
        operation: &'static str,
        response: Response,
    ) -> Result<T> {
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|source| Error::Http { operation, source })?;

        if !status.is_success() {
            return Err(Error::Api {
                operation,
                status,
                message: text,
            });
        }

        serde_json::from_str(&text).map_err(|source| {
            warn!(error = %source, body = %text, "Failed to parse response");
            Error::Decode { operation, source }
        })
    }
}

impl fmt::Debug for JiraClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JiraClient")
            .field("base_url", &self.base_url)
            .field("user", &self.user)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> JiraClient {
        JiraClient::new(&JiraSettings::new(base, "bot", "secret").unwrap()).unwrap()
    }

    #[test]
    fn test_browse_url_uses_numeric_project_id() {
        let client = client("https://tracker.example");
        assert_eq!(
            client.browse_url(10001, "30042"),
            "https://tracker.example/projects/10001/versions/30042"
        );
    }

    #[test]
    fn test_browse_url_ignores_trailing_slash() {
        let client = client("https://tracker.example/jira/");
        assert_eq!(client.base_url(), "https://tracker.example/jira");
        assert_eq!(
            client.browse_url(7, "1"),
            "https://tracker.example/jira/projects/7/versions/1"
        );
    }

    #[test]
    fn test_debug_hides_token() {
        let rendered = format!("{:?}", client("https://tracker.example"));
        assert!(!rendered.contains("secret"));
    }
}
