//! Jira release version automation for GitHub Actions.
//!
//! Given a project key and a version name, ensures the version exists in Jira.
//! When it has to create it, the new version's id and browse URL are appended
//! to the `GITHUB_ENV` file as `VERSION_ID` and `VERSION_URL`.
//!
//! # Example
//!
//! ```no_run
//! use jira_release::{run, GithubEnv, JiraClient, JiraSettings, ReleaseOutcome, ReleaseRequest};
//!
//! # async fn example() -> jira_release::Result<()> {
//! let settings = JiraSettings::new("https://your-domain.atlassian.net", "bot@example.com", "token")?;
//! let client = JiraClient::new(&settings)?;
//! let request = ReleaseRequest::new("ABC", "v1.2")?;
//!
//! match run(&client, &request, &GithubEnv::new("/tmp/github_env")).await? {
//!     ReleaseOutcome::Created(version) => println!("created {}", version.url),
//!     ReleaseOutcome::AlreadyExists { name } => println!("{name} already exists"),
//! }
//! # Ok(())
//! # }
//! ```

#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

pub mod client;
pub mod config;
pub mod error;
pub mod github_env;
pub mod models;
pub mod release;

pub use client::JiraClient;
pub use config::{Config, JiraSettings, ReleaseRequest};
pub use error::{Error, Result};
pub use github_env::GithubEnv;
pub use models::{NewVersion, Project, Version};
pub use release::{run, CreatedVersion, ReleaseOutcome};
