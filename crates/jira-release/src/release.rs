//! The release workflow: resolve the project, check for the version, create it
//! if missing and export the result.
//!
//! Every step runs in order and any error aborts the run before the
//! environment file is touched.

use tracing::info;

use crate::client::JiraClient;
use crate::config::ReleaseRequest;
use crate::error::Result;
use crate::github_env::GithubEnv;
use crate::models::{NewVersion, Version};

/// A version created by this run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedVersion {
    /// Version name.
    pub name: String,
    /// Id assigned by Jira.
    pub id: String,
    /// Numeric id of the owning project.
    pub project_id: u64,
    /// Browse URL exported as `VERSION_URL`.
    pub url: String,
}

/// How a run ended successfully.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReleaseOutcome {
    /// The version was created and exported.
    Created(CreatedVersion),
    /// A version with this name already existed; nothing was changed.
    AlreadyExists { name: String },
}

/// Resolve a project key to Jira's numeric project id.
pub async fn resolve_project_id(client: &JiraClient, project_key: &str) -> Result<u64> {
    let project = client.get_project(project_key).await?;
    let project_id = project.numeric_id()?;
    info!(project_key, project_id, "Resolved project");
    Ok(project_id)
}

/// True if `versions` contains one named exactly `name`.
#[must_use]
pub fn contains_version(versions: &[Version], name: &str) -> bool {
    versions.iter().any(|v| v.name == name)
}

/// Check whether the project already has a version named `version_name`.
pub async fn version_exists(
    client: &JiraClient,
    project_key: &str,
    version_name: &str,
) -> Result<bool> {
    let versions = client.list_versions(project_key).await?;
    let exists = contains_version(&versions, version_name);
    info!(
        project_key,
        version_name,
        checked = versions.len(),
        exists,
        "Checked existing versions"
    );
    Ok(exists)
}

/// Create an unreleased version and build its browse URL.
pub async fn create_version(
    client: &JiraClient,
    version_name: &str,
    project_id: u64,
) -> Result<CreatedVersion> {
    let created = client
        .create_version(&NewVersion::unreleased(version_name, project_id))
        .await?;
    let url = client.browse_url(project_id, &created.id);
    info!(version_id = %created.id, url = %url, "Created version");

    Ok(CreatedVersion {
        name: version_name.to_string(),
        id: created.id,
        project_id,
        url,
    })
}

/// Run the whole workflow once.
pub async fn run(
    client: &JiraClient,
    request: &ReleaseRequest,
    github_env: &GithubEnv,
) -> Result<ReleaseOutcome> {
    let project_id = resolve_project_id(client, &request.project_key).await?;

    if version_exists(client, &request.project_key, &request.version_name).await? {
        return Ok(ReleaseOutcome::AlreadyExists {
            name: request.version_name.clone(),
        });
    }

    let created = create_version(client, &request.version_name, project_id).await?;
    github_env.publish_version(&created.id, &created.url).await?;

    Ok(ReleaseOutcome::Created(created))
}
