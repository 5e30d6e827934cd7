//! Deployment of the staged viewer to its hosting repository.
//!
//! A deploy clones the hosting branch into a freshly recreated directory,
//! overlays the staging area, renames the entry page to the landing page,
//! and pushes a single commit. Nothing is rolled back on failure; the next
//! run starts from a clean clone again.

use crate::config::{CommitAuthor, DeployConfig};
use crate::credentials::AccessToken;
use crate::error::{DeployError, Result};
use crate::git::{CommandExecutor, Git};
use camino::{Utf8Path, Utf8PathBuf};
use log::{debug, info};
use meshviewer_common::{copy_directory, copy_file_into, recreate_directory};
use std::fs;

/// Build the commit message recorded for a deployment.
///
/// # Examples
///
/// ```
/// use meshviewer_webdeploy::deployer::commit_message;
///
/// assert_eq!(
///     commit_message("a1b2c3d", "https://github.com/mdh81/meshviewer.git"),
///     "Updating viewer to a1b2c3d from the master branch of https://github.com/mdh81/meshviewer.git"
/// );
/// ```
#[must_use]
pub fn commit_message(revision: &str, source_url: &str) -> String {
    format!("Updating viewer to {revision} from the master branch of {source_url}")
}

/// Everything a single deployment needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployRequest {
    /// Staging area produced by `assemble`.
    pub staging_dir: Utf8PathBuf,
    /// Working copy, recreated on every deploy.
    pub deployment_dir: Utf8PathBuf,
    /// Remote URL of the hosting repository.
    pub remote_url: String,
    /// Branch cloned from and pushed to.
    pub branch: String,
    /// Staged file renamed to the landing page.
    pub entry_file: String,
    /// Name the entry file is given in the deployment.
    pub landing_page: String,
    /// Message for the deployment commit.
    pub commit_message: String,
    /// Optional identity for the deployment commit.
    pub author: Option<CommitAuthor>,
    /// Environment variable holding the access token.
    pub token_env: String,
}

impl DeployRequest {
    /// Build a request for `revision` from the loaded configuration.
    #[must_use]
    pub fn from_config(config: &DeployConfig, revision: &str) -> Self {
        Self {
            staging_dir: config.artifact_dir.clone(),
            deployment_dir: config.deployment_dir.clone(),
            remote_url: config.deploy_url.clone(),
            branch: config.deploy_branch.clone(),
            entry_file: config.entry_file.clone(),
            landing_page: config.landing_page.clone(),
            commit_message: commit_message(revision, &config.source_url),
            author: config.commit_author.clone(),
            token_env: config.token_env.clone(),
        }
    }
}

/// Result of a completed deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployOutcome {
    /// The working copy that was pushed.
    pub deployment_dir: Utf8PathBuf,
    /// Top-level staging entries copied into the working copy.
    pub copied: Vec<Utf8PathBuf>,
    /// Path of the landing page inside the working copy.
    pub landing_page: Utf8PathBuf,
    /// Branch that was pushed.
    pub branch: String,
}

/// Description of a deployment that has not been performed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployPlan {
    /// The request being described.
    pub request: DeployRequest,
    /// Top-level staging entries, or `None` when the staging area is absent.
    pub staged_entries: Option<Vec<String>>,
    /// Whether the token variable currently holds a value.
    pub token_present: bool,
}

impl DeployPlan {
    /// Format the plan for display.
    #[must_use]
    pub fn display_text(&self) -> String {
        let request = &self.request;
        let token_state = if self.token_present { "set" } else { "NOT set" };
        let mut lines = vec![
            "Dry run - no files will be modified".to_owned(),
            String::new(),
            format!("Staging directory: {}", request.staging_dir),
            format!("Deployment directory: {}", request.deployment_dir),
            format!("Remote: {}", request.remote_url),
            format!("Branch: {}", request.branch),
            format!("Landing page: {} -> {}", request.entry_file, request.landing_page),
            format!("Access token: ${} is {token_state}", request.token_env),
            format!("Commit message: {}", request.commit_message),
        ];
        if let Some(author) = &request.author {
            lines.push(format!("Commit author: {} <{}>", author.name, author.email));
        }

        lines.push(String::new());
        match &self.staged_entries {
            Some(entries) => {
                lines.push("Entries to deploy:".to_owned());
                for entry in entries {
                    lines.push(format!("  - {entry}"));
                }
            }
            None => lines.push("Staging directory does not exist yet".to_owned()),
        }

        lines.join("\n")
    }
}

/// Publishes a staging area through git.
pub struct Deployer<'a> {
    executor: &'a dyn CommandExecutor,
}

impl<'a> Deployer<'a> {
    /// Create a deployer that runs git through `executor`.
    #[must_use]
    pub fn new(executor: &'a dyn CommandExecutor) -> Self {
        Self { executor }
    }

    /// Describe `request` without touching the filesystem or the remote.
    ///
    /// # Errors
    ///
    /// Returns [`DeployError::Io`] if an existing staging area cannot be
    /// listed.
    pub fn plan(&self, request: &DeployRequest) -> Result<DeployPlan> {
        let entries = if request.staging_dir.is_dir() {
            Some(
                staged_entries(&request.staging_dir)?
                    .iter()
                    .filter_map(|path| path.file_name().map(str::to_owned))
                    .collect(),
            )
        } else {
            None
        };
        let token_present = AccessToken::from_env(&request.token_env).is_ok();

        Ok(DeployPlan {
            request: request.clone(),
            staged_entries: entries,
            token_present,
        })
    }

    /// Deploy `request`, reading the token from `request.token_env`.
    ///
    /// # Errors
    ///
    /// Returns [`DeployError::MissingCredential`] before anything else when
    /// the token is unset, and otherwise any error from
    /// [`Self::deploy_with_token`].
    pub fn deploy(&self, request: &DeployRequest) -> Result<DeployOutcome> {
        let token = AccessToken::from_env(&request.token_env)?;
        self.deploy_with_token(request, &token)
    }

    /// Deploy `request` using an already resolved token.
    ///
    /// # Errors
    ///
    /// Returns [`DeployError::MissingStagingDir`] before the working copy is
    /// touched, [`DeployError::CopyFailed`] when overlaying the staging area
    /// fails, [`DeployError::MissingEntryFile`] when the entry page is absent
    /// after copying, and [`DeployError::Git`] for any failed git step.
    pub fn deploy_with_token(
        &self,
        request: &DeployRequest,
        token: &AccessToken,
    ) -> Result<DeployOutcome> {
        if !request.staging_dir.is_dir() {
            return Err(DeployError::MissingStagingDir {
                path: request.staging_dir.clone(),
            });
        }

        let workdir = &request.deployment_dir;
        recreate_directory(workdir)?;

        let git = Git::new(self.executor, Some(token));
        info!("cloning {} ({}) into {workdir}", request.remote_url, request.branch);
        git.clone_branch(&request.remote_url, &request.branch, workdir)?;

        let copied = overlay(&request.staging_dir, workdir)?;
        let landing_page = rename_entry(workdir, &request.entry_file, &request.landing_page)?;

        git.add_all(workdir)?;
        git.commit(workdir, &request.commit_message, request.author.as_ref())?;
        info!("pushing {} to {}", request.branch, request.remote_url);
        git.push(workdir, &request.remote_url, &request.branch)?;

        Ok(DeployOutcome {
            deployment_dir: workdir.clone(),
            copied,
            landing_page,
            branch: request.branch.clone(),
        })
    }
}

fn staged_entries(staging_dir: &Utf8Path) -> Result<Vec<Utf8PathBuf>> {
    let mut entries = staging_dir
        .read_dir_utf8()?
        .map(|entry| entry.map(|entry| entry.path().to_owned()))
        .collect::<std::io::Result<Vec<_>>>()?;
    entries.sort();
    Ok(entries)
}

fn overlay(staging_dir: &Utf8Path, workdir: &Utf8Path) -> Result<Vec<Utf8PathBuf>> {
    let entries = staged_entries(staging_dir)?;
    for entry in &entries {
        let copy_failed = |source| DeployError::CopyFailed {
            from: entry.clone(),
            to: workdir.to_owned(),
            source,
        };
        if entry.is_dir() {
            let name = entry.file_name().unwrap_or_default();
            copy_directory(entry, &workdir.join(name)).map_err(copy_failed)?;
        } else {
            copy_file_into(entry, workdir).map_err(copy_failed)?;
        }
        debug!("deployed {entry}");
    }
    Ok(entries)
}

fn rename_entry(workdir: &Utf8Path, entry_file: &str, landing_page: &str) -> Result<Utf8PathBuf> {
    let entry = workdir.join(entry_file);
    if !entry.is_file() {
        return Err(DeployError::MissingEntryFile {
            entry: entry_file.to_owned(),
            deployment_dir: workdir.to_owned(),
        });
    }
    let landing = workdir.join(landing_page);
    fs::rename(&entry, &landing)?;
    debug!("renamed {entry} to {landing}");
    Ok(landing)
}
