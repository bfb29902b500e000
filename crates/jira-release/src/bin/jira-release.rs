//! jira-release - ensure a Jira version exists and export it to later CI steps.
//!
//! Designed to run as a GitHub Actions step. Every option falls back to an
//! environment variable, so the usual invocation takes no arguments.
//!
//! # Environment Variables
//!
//! - `VERSION_NAME` - version to ensure (required)
//! - `PROJECT_KEY` - Jira project key (required)
//! - `JIRA_URL` - Jira base URL (required)
//! - `JIRA_USER` / `JIRA_TOKEN` - basic-auth credentials (required)
//! - `GITHUB_ENV` - file receiving `VERSION_ID` and `VERSION_URL` (required)
//! - `JIRA_TIMEOUT_SECS` - per-request timeout (optional)

// CLI binaries legitimately need println! for user output
#![allow(clippy::disallowed_macros)]

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use jira_release::{Config, GithubEnv, JiraClient, JiraSettings, ReleaseOutcome, ReleaseRequest};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Ensure a Jira release version exists and export its id and URL.
#[derive(Parser)]
#[command(name = "jira-release")]
#[command(about = "Ensure a Jira release version exists and export its id and URL")]
#[command(version)]
struct Cli {
    /// Version name to ensure (or set `VERSION_NAME` env var)
    #[arg(long, env = "VERSION_NAME")]
    version_name: String,

    /// Jira project key (or set `PROJECT_KEY` env var)
    #[arg(long, env = "PROJECT_KEY")]
    project_key: String,

    /// Jira base URL (or set `JIRA_URL` env var)
    #[arg(long, env = "JIRA_URL")]
    jira_url: String,

    /// Jira username (or set `JIRA_USER` env var)
    #[arg(long, env = "JIRA_USER")]
    jira_user: String,

    /// Jira API token (or set `JIRA_TOKEN` env var)
    #[arg(long, env = "JIRA_TOKEN", hide_env_values = true)]
    jira_token: String,

    /// File to append `VERSION_ID`/`VERSION_URL` to (or set `GITHUB_ENV` env var)
    #[arg(long, env = "GITHUB_ENV")]
    github_env: PathBuf,

    /// Per-request timeout in seconds (unbounded when unset)
    #[arg(long, env = "JIRA_TIMEOUT_SECS")]
    timeout_secs: Option<u64>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn into_config(self) -> jira_release::Result<Config> {
        let jira = JiraSettings::new(&self.jira_url, self.jira_user, self.jira_token)?
            .with_timeout(self.timeout_secs.map(Duration::from_secs));

        Ok(Config {
            jira,
            release: ReleaseRequest::new(self.project_key, self.version_name)?,
            github_env: self.github_env,
        })
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let config = cli.into_config().context("Invalid configuration")?;
    info!(
        jira_url = %config.jira.base_url(),
        project_key = %config.release.project_key,
        version_name = %config.release.version_name,
        "Ensuring Jira version"
    );

    let client = JiraClient::new(&config.jira).context("Error setting up Jira client")?;
    let github_env = GithubEnv::new(&config.github_env);

    match jira_release::run(&client, &config.release, &github_env).await? {
        ReleaseOutcome::Created(version) => {
            println!(
                "Created Jira version {} ({}): {}",
                version.name, version.id, version.url
            );
        }
        ReleaseOutcome::AlreadyExists { name } => {
            println!("The Jira version: {name} already exists.");
        }
    }

    Ok(())
}
