//! Artifact assembly: copying the web build outputs into the staging area.
//!
//! Every manifest entry is checked before anything is copied, so a missing
//! output aborts the run with the staging area untouched.

use crate::error::{DeployError, Result};
use crate::manifest::{ArtifactManifest, ArtifactPath, Placement};
use camino::{Utf8Path, Utf8PathBuf};
use log::{debug, info};
use meshviewer_common::{copy_directory, copy_file_into};
use std::fs;
use std::io::Write;

/// One manifest entry after it has been copied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedArtifact {
    /// The manifest entry.
    pub artifact: ArtifactPath,
    /// How the entry was laid out.
    pub placement: Placement,
    /// Where the copy landed.
    pub destination: Utf8PathBuf,
}

/// Copies the artifact manifest from a build root into a staging area.
#[derive(Debug, Clone)]
pub struct Assembler {
    build_root: Utf8PathBuf,
    staging_dir: Utf8PathBuf,
    manifest: ArtifactManifest,
}

impl Assembler {
    /// Create an assembler for `manifest`.
    #[must_use]
    pub fn new(
        build_root: Utf8PathBuf,
        staging_dir: Utf8PathBuf,
        manifest: ArtifactManifest,
    ) -> Self {
        Self {
            build_root,
            staging_dir,
            manifest,
        }
    }

    /// Check that the build root and every manifest entry exist.
    ///
    /// # Errors
    ///
    /// Returns [`DeployError::MissingBuildRoot`] when the build root is
    /// absent, or [`DeployError::MissingArtifact`] for the first entry in
    /// manifest order that the build did not produce.
    pub fn verify(&self) -> Result<()> {
        if !self.build_root.is_dir() {
            return Err(DeployError::MissingBuildRoot {
                path: self.build_root.clone(),
            });
        }

        if let Some(missing) = self
            .manifest
            .entries()
            .iter()
            .find(|entry| !self.build_root.join(entry.relative()).exists())
        {
            return Err(DeployError::MissingArtifact {
                artifact: missing.as_str().to_owned(),
                build_root: self.build_root.clone(),
            });
        }

        debug!(
            "all {} manifest entries present under {}",
            self.manifest.len(),
            self.build_root
        );
        Ok(())
    }

    /// Copy every manifest entry into the staging area, in manifest order.
    ///
    /// The staging directory is created when absent and reused otherwise.
    /// Directories merge into existing copies; files overwrite. One line per
    /// entry and a closing summary are written to `progress`.
    ///
    /// Callers are expected to have run [`Self::verify`] first.
    ///
    /// # Errors
    ///
    /// Returns [`DeployError::CopyFailed`] when a copy fails, or
    /// [`DeployError::WriteFailed`] when progress cannot be written.
    pub fn assemble(&self, progress: &mut dyn Write) -> Result<Vec<StagedArtifact>> {
        fs::create_dir_all(&self.staging_dir).map_err(|source| DeployError::CopyFailed {
            from: self.build_root.clone(),
            to: self.staging_dir.clone(),
            source,
        })?;

        let mut staged = Vec::with_capacity(self.manifest.len());
        for artifact in self.manifest.entries() {
            let source = self.build_root.join(artifact.relative());
            writeln!(progress, "Copying {source} to {}", self.staging_dir)
                .map_err(|source| DeployError::WriteFailed { source })?;
            staged.push(self.stage(artifact, &source)?);
        }

        writeln!(
            progress,
            "All web viewer artifacts copied to {}",
            self.staging_dir
        )
        .map_err(|source| DeployError::WriteFailed { source })?;
        info!("staged {} artifacts in {}", staged.len(), self.staging_dir);
        Ok(staged)
    }

    /// Verify the manifest, then assemble it.
    ///
    /// # Errors
    ///
    /// Returns any error from [`Self::verify`] or [`Self::assemble`].
    pub fn run(&self, progress: &mut dyn Write) -> Result<Vec<StagedArtifact>> {
        self.verify()?;
        self.assemble(progress)
    }

    fn stage(&self, artifact: &ArtifactPath, source: &Utf8Path) -> Result<StagedArtifact> {
        let placement = artifact.placement(&self.build_root);
        let copy_failed = |to: &Utf8Path, err| DeployError::CopyFailed {
            from: source.to_owned(),
            to: to.to_owned(),
            source: err,
        };

        let destination = match &placement {
            Placement::Directory => {
                let target = self.staging_dir.join(artifact.relative());
                copy_directory(source, &target).map_err(|err| copy_failed(&target, err))?;
                target
            }
            Placement::RootFile => copy_file_into(source, &self.staging_dir)
                .map_err(|err| copy_failed(&self.staging_dir, err))?,
            Placement::NestedFile { subdir } => {
                let target_dir = self.staging_dir.join(subdir);
                fs::create_dir_all(&target_dir).map_err(|err| copy_failed(&target_dir, err))?;
                copy_file_into(source, &target_dir).map_err(|err| copy_failed(&target_dir, err))?
            }
        };

        Ok(StagedArtifact {
            artifact: artifact.clone(),
            placement,
            destination,
        })
    }
}
