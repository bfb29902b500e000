//! Export values to later GitHub Actions steps via the `GITHUB_ENV` file.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

use crate::error::{Error, Result};

/// Key holding the created version id.
pub const VERSION_ID_KEY: &str = "VERSION_ID";
/// Key holding the version browse URL.
pub const VERSION_URL_KEY: &str = "VERSION_URL";

/// Handle on the CI environment file.
#[derive(Debug, Clone)]
pub struct GithubEnv {
    path: PathBuf,
}

impl GithubEnv {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append `KEY=VALUE` lines, in order.
    ///
    /// The file must already exist; it is never created or truncated. All
    /// lines are validated and rendered before the file is opened, then
    /// written in one call.
    pub async fn append(&self, vars: &[(&str, &str)]) -> Result<()> {
        let rendered = render(vars)?;

        let mut file = OpenOptions::new()
            .append(true)
            .open(&self.path)
            .await
            .map_err(|source| self.io_error(source))?;

        file.write_all(rendered.as_bytes())
            .await
            .map_err(|source| self.io_error(source))?;
        file.flush().await.map_err(|source| self.io_error(source))?;

        debug!(path = %self.path.display(), lines = vars.len(), "Appended to environment file");
        Ok(())
    }

    /// Export the created version's id and URL.
    pub async fn publish_version(&self, version_id: &str, version_url: &str) -> Result<()> {
        self.append(&[(VERSION_ID_KEY, version_id), (VERSION_URL_KEY, version_url)])
            .await?;
        info!(
            path = %self.path.display(),
            version_id,
            "Exported {VERSION_ID_KEY} and {VERSION_URL_KEY}"
        );
        Ok(())
    }

    fn io_error(&self, source: std::io::Error) -> Error {
        Error::EnvFile {
            path: self.path.clone(),
            source,
        }
    }
}

/// Render lines as `KEY=VALUE\n`, rejecting anything that would split a line.
fn render(vars: &[(&str, &str)]) -> Result<String> {
    let mut out = String::new();
    for (key, value) in vars {
        if key.contains(&['\n', '\r', '='][..]) || value.contains(&['\n', '\r'][..]) {
            return Err(Error::InvalidEnvValue {
                key: (*key).to_string(),
            });
        }
        let _ = writeln!(out, "{key}={value}");
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_in_order() {
        let out = render(&[("A", "1"), ("B", "x=y")]).unwrap();
        assert_eq!(out, "A=1\nB=x=y\n");
    }

    #[test]
    fn test_render_rejects_line_breaks() {
        let err = render(&[("A", "1"), ("B", "two\nlines")]).unwrap_err();
        assert!(matches!(err, Error::InvalidEnvValue { ref key } if key == "B"));

        assert!(render(&[("A", "carriage\rreturn")]).is_err());
        assert!(render(&[("BAD=KEY", "1")]).is_err());
    }

    #[tokio::test]
    async fn test_append_keeps_existing_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("github_env");
        std::fs::write(&path, "EXISTING=1\n").unwrap();

        let env = GithubEnv::new(&path);
        env.publish_version("30042", "https://tracker.example/projects/10001/versions/30042")
            .await
            .unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        pretty_assertions::assert_eq!(
            contents,
            "EXISTING=1\n\
             VERSION_ID=30042\n\
             VERSION_URL=https://tracker.example/projects/10001/versions/30042\n"
        );
    }

    #[tokio::test]
    async fn test_missing_file_is_not_created() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing");

        let err = GithubEnv::new(&path)
            .publish_version("1", "https://tracker.example/projects/1/versions/1")
            .await
            .unwrap_err();

        assert!(matches!(err, Error::EnvFile { .. }), "{err:?}");
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_invalid_value_leaves_file_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("github_env");
        std::fs::write(&path, "").unwrap();

        let err = GithubEnv::new(&path)
            .append(&[("VERSION_ID", "1"), ("VERSION_URL", "bad\nvalue")])
            .await
            .unwrap_err();

        assert!(matches!(err, Error::InvalidEnvValue { .. }));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "");
    }
}
