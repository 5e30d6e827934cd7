//! Deployment configuration loaded from `webdeploy.toml`.
//!
//! Every field is optional in the file and falls back to the values used by
//! the mesh viewer's CI pipeline, so a missing file yields a working default
//! configuration. Unknown keys are rejected to catch typos early. Directory
//! settings can be overridden again from the command line.

use crate::error::{DeployError, Result};
use crate::manifest::{ArtifactManifest, DEFAULT_ARTIFACTS};
use camino::{Utf8Path, Utf8PathBuf};
use log::debug;
use serde::Deserialize;

/// Name of the configuration file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "webdeploy.toml";

/// Git repository that serves the deployed viewer.
pub const DEFAULT_DEPLOY_URL: &str = "https://github.com/mdh81/3dviewer.git";

/// Repository the viewer is built from, quoted in deployment commits.
pub const DEFAULT_SOURCE_URL: &str = "https://github.com/mdh81/meshviewer.git";

/// Environment variable holding the deployment access token.
pub const DEFAULT_TOKEN_ENV: &str = "DEPLOY_TOKEN";

/// Identity recorded on deployment commits.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct CommitAuthor {
    /// Value for `user.name`.
    pub name: String,
    /// Value for `user.email`.
    pub email: String,
}

/// Settings shared by the `assemble` and `deploy` commands.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct DeployConfig {
    /// Directory the web build writes its outputs to.
    pub build_dir: Utf8PathBuf,
    /// Staging area populated by `assemble` and read by `deploy`.
    pub artifact_dir: Utf8PathBuf,
    /// Working copy of the deployment repository, recreated on each deploy.
    pub deployment_dir: Utf8PathBuf,
    /// Remote URL of the deployment repository.
    pub deploy_url: String,
    /// Branch cloned from and pushed to.
    pub deploy_branch: String,
    /// Source repository URL quoted in the commit message.
    pub source_url: String,
    /// Manifest entries, relative to `build_dir`.
    pub artifacts: Vec<String>,
    /// Manifest file renamed to `landing_page` on deploy.
    pub entry_file: String,
    /// File name the site serves as its landing page.
    pub landing_page: String,
    /// Environment variable holding the access token.
    pub token_env: String,
    /// Optional commit identity; git's own configuration is used otherwise.
    pub commit_author: Option<CommitAuthor>,
}

impl Default for DeployConfig {
    fn default() -> Self {
        Self {
            build_dir: Utf8PathBuf::from("build_web"),
            artifact_dir: Utf8PathBuf::from("artifacts"),
            deployment_dir: Utf8PathBuf::from("deployment"),
            deploy_url: DEFAULT_DEPLOY_URL.to_owned(),
            deploy_branch: "main".to_owned(),
            source_url: DEFAULT_SOURCE_URL.to_owned(),
            artifacts: DEFAULT_ARTIFACTS.iter().map(|&entry| entry.to_owned()).collect(),
            entry_file: "meshViewer.html".to_owned(),
            landing_page: "index.html".to_owned(),
            token_env: DEFAULT_TOKEN_ENV.to_owned(),
            commit_author: None,
        }
    }
}

impl DeployConfig {
    /// Loads the configuration for a run.
    ///
    /// An explicit path must exist. Without one, [`CONFIG_FILE_NAME`] is read
    /// from `search_dir` when present, and the defaults apply otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`DeployError::ConfigNotFound`] when an explicit file is
    /// missing, and [`DeployError::InvalidConfig`] when the file cannot be
    /// parsed or fails validation.
    pub fn load(explicit: Option<&Utf8Path>, search_dir: &Utf8Path) -> Result<Self> {
        let path = match explicit {
            Some(path) if !path.is_file() => {
                return Err(DeployError::ConfigNotFound {
                    path: path.to_owned(),
                });
            }
            Some(path) => path.to_owned(),
            None => {
                let candidate = search_dir.join(CONFIG_FILE_NAME);
                if !candidate.is_file() {
                    debug!("no {CONFIG_FILE_NAME} in {search_dir}; using defaults");
                    let config = Self::default();
                    config.validate(Utf8Path::new("<defaults>"))?;
                    return Ok(config);
                }
                candidate
            }
        };

        debug!("loading configuration from {path}");
        let contents = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&contents, &path)
    }

    /// Parses and validates configuration text.
    ///
    /// `origin` names the source in error messages.
    ///
    /// # Errors
    ///
    /// Returns [`DeployError::InvalidConfig`] on malformed TOML, unknown
    /// keys, or failed validation.
    ///
    /// # Examples
    ///
    /// ```
    /// use camino::Utf8Path;
    /// use meshviewer_webdeploy::config::DeployConfig;
    ///
    /// let config = DeployConfig::from_toml_str(
    ///     "build_dir = \"out/web\"\ndeploy_branch = \"gh-pages\"\n",
    ///     Utf8Path::new("webdeploy.toml"),
    /// )
    /// .unwrap();
    /// assert_eq!(config.build_dir.as_str(), "out/web");
    /// assert_eq!(config.entry_file, "meshViewer.html");
    /// ```
    pub fn from_toml_str(contents: &str, origin: &Utf8Path) -> Result<Self> {
        let config: Self = toml::from_str(contents).map_err(|e| DeployError::InvalidConfig {
            path: origin.to_owned(),
            reason: e.to_string(),
        })?;
        config.validate(origin)?;
        Ok(config)
    }

    /// Builds the validated artifact manifest.
    ///
    /// # Errors
    ///
    /// Returns [`DeployError::InvalidArtifactPath`] for a malformed entry.
    pub fn manifest(&self) -> Result<ArtifactManifest> {
        ArtifactManifest::new(&self.artifacts)
    }

    fn validate(&self, origin: &Utf8Path) -> Result<()> {
        let invalid = |reason: String| DeployError::InvalidConfig {
            path: origin.to_owned(),
            reason,
        };

        let manifest = self.manifest().map_err(|e| invalid(e.to_string()))?;
        if manifest.is_empty() {
            return Err(invalid("artifacts must list at least one entry".to_owned()));
        }
        if !manifest.has_root_file(&self.entry_file) {
            return Err(invalid(format!(
                "entry_file {:?} must be a root-level file listed in artifacts",
                self.entry_file
            )));
        }
        if self.landing_page.is_empty() || self.landing_page.contains(['/', '\\']) {
            return Err(invalid(format!(
                "landing_page {:?} must be a plain file name",
                self.landing_page
            )));
        }
        for (key, value) in [
            ("deploy_url", &self.deploy_url),
            ("deploy_branch", &self.deploy_branch),
            ("token_env", &self.token_env),
        ] {
            if value.trim().is_empty() {
                return Err(invalid(format!("{key} must not be empty")));
            }
        }
        Ok(())
    }
}
