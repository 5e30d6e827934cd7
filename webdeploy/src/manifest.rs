//! The artifact manifest: relative paths the web build must produce.
//!
//! Paths are validated once when the manifest is built, so the assembler
//! can join them onto the build root and the staging area without further
//! checks.

use crate::error::{DeployError, Result};
use camino::{Utf8Component, Utf8Path, Utf8PathBuf};
use std::fmt;

/// Manifest entries produced by the Emscripten build of the viewer.
pub const DEFAULT_ARTIFACTS: &[&str] = &[
    "meshViewer.html",
    "meshViewer.data",
    "meshViewer.js",
    "meshViewer.wasm",
    "meshViewer.worker.js",
    "shaders/shaders.html",
    "js/",
];

/// A validated manifest entry, relative to the build root.
///
/// # Examples
///
/// ```
/// use meshviewer_webdeploy::manifest::ArtifactPath;
///
/// let path = ArtifactPath::try_from("shaders/shaders.html").unwrap();
/// assert_eq!(path.as_str(), "shaders/shaders.html");
/// assert_eq!(path.parent().map(|p| p.as_str()), Some("shaders"));
///
/// assert!(ArtifactPath::try_from("../secrets.txt").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArtifactPath {
    raw: String,
    relative: Utf8PathBuf,
}

impl ArtifactPath {
    /// Return the entry as written in the manifest.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Return the normalised relative path.
    #[must_use]
    pub fn relative(&self) -> &Utf8Path {
        &self.relative
    }

    /// Return the enclosing subdirectory, or `None` for root-level entries.
    #[must_use]
    pub fn parent(&self) -> Option<&Utf8Path> {
        self.relative
            .parent()
            .filter(|parent| !parent.as_str().is_empty())
    }

    /// Return true when the entry was written with a trailing separator.
    #[must_use]
    pub fn is_marked_directory(&self) -> bool {
        self.raw.ends_with('/')
    }

    /// Work out how this entry is laid out under `build_root`.
    #[must_use]
    pub fn placement(&self, build_root: &Utf8Path) -> Placement {
        if build_root.join(&self.relative).is_dir() {
            return Placement::Directory;
        }
        match self.parent() {
            None => Placement::RootFile,
            Some(subdir) => Placement::NestedFile {
                subdir: subdir.to_owned(),
            },
        }
    }
}

impl TryFrom<&str> for ArtifactPath {
    type Error = DeployError;

    fn try_from(value: &str) -> Result<Self> {
        let invalid = |reason| DeployError::InvalidArtifactPath {
            path: value.to_owned(),
            reason,
        };

        if value.trim().is_empty() {
            return Err(invalid("path is empty"));
        }

        let mut relative = Utf8PathBuf::new();
        for component in Utf8Path::new(value).components() {
            match component {
                Utf8Component::Normal(part) => relative.push(part),
                Utf8Component::CurDir => {}
                Utf8Component::ParentDir => {
                    return Err(invalid("path must not leave the build directory"));
                }
                Utf8Component::RootDir | Utf8Component::Prefix(_) => {
                    return Err(invalid("path must be relative"));
                }
            }
        }

        if relative.as_str().is_empty() {
            return Err(invalid("path names the build directory itself"));
        }

        Ok(Self {
            raw: value.to_owned(),
            relative,
        })
    }
}

impl TryFrom<String> for ArtifactPath {
    type Error = DeployError;

    fn try_from(value: String) -> Result<Self> {
        Self::try_from(value.as_str())
    }
}

impl fmt::Display for ArtifactPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// How a manifest entry is copied into the staging area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Placement {
    /// A directory, copied recursively and merged into the destination.
    Directory,
    /// A file directly under the build root, copied flat into staging.
    RootFile,
    /// A file below a subdirectory, whose path is recreated under staging.
    NestedFile {
        /// The subdirectory relative to the build root.
        subdir: Utf8PathBuf,
    },
}

/// Ordered list of artifacts expected under the build root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactManifest {
    entries: Vec<ArtifactPath>,
}

impl ArtifactManifest {
    /// Build a manifest from raw entries, validating each one.
    ///
    /// # Errors
    ///
    /// Returns [`DeployError::InvalidArtifactPath`] for the first entry that
    /// is not a relative path inside the build root.
    pub fn new<I, S>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let entries = entries
            .into_iter()
            .map(|entry| ArtifactPath::try_from(entry.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { entries })
    }

    /// Return the manifest entries in order.
    #[must_use]
    pub fn entries(&self) -> &[ArtifactPath] {
        &self.entries
    }

    /// Return the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Return true when the manifest lists nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Return true when `name` is listed as a file at the build root.
    #[must_use]
    pub fn has_root_file(&self, name: &str) -> bool {
        self.entries.iter().any(|entry| {
            !entry.is_marked_directory()
                && entry.parent().is_none()
                && entry.relative().as_str() == name
        })
    }
}

impl Default for ArtifactManifest {
    fn default() -> Self {
        Self {
            entries: DEFAULT_ARTIFACTS
                .iter()
                .filter_map(|entry| ArtifactPath::try_from(*entry).ok())
                .collect(),
        }
    }
}
