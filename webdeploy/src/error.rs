//! Error types for the mesh viewer web tooling.
//!
//! Each variant names one way an assembly, deployment, or shader packaging
//! run can abort. Every error is fatal for the run; the binaries report it
//! once and exit nonzero.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors that can occur while assembling, deploying, or packaging shaders.
#[derive(Debug, Error)]
pub enum DeployError {
    /// The build output root does not exist.
    #[error("build directory {path} does not exist")]
    MissingBuildRoot {
        /// Path where the build output was expected.
        path: Utf8PathBuf,
    },

    /// A manifest entry was not produced by the build.
    #[error("{artifact} not found in {build_root}")]
    MissingArtifact {
        /// The manifest entry, relative to the build root.
        artifact: String,
        /// The build root that was searched.
        build_root: Utf8PathBuf,
    },

    /// The staging area to deploy from does not exist.
    #[error("staging directory {path} does not exist; run `assemble` first")]
    MissingStagingDir {
        /// Path where the staging area was expected.
        path: Utf8PathBuf,
    },

    /// The access token for the deployment remote is not set.
    #[error("environment variable {variable} must hold the deployment access token")]
    MissingCredential {
        /// Name of the environment variable that was consulted.
        variable: String,
    },

    /// The entry artifact was absent from the deployment tree after copying.
    #[error("expected artifact {entry} was not found in deployment directory {deployment_dir}")]
    MissingEntryFile {
        /// File name of the entry artifact.
        entry: String,
        /// The deployment working copy that was inspected.
        deployment_dir: Utf8PathBuf,
    },

    /// A git command failed or timed out.
    #[error("git {operation} failed: {message}")]
    Git {
        /// The git operation that failed (clone, add, commit, push).
        operation: &'static str,
        /// Description of the failure, with credentials redacted.
        message: String,
    },

    /// An external command did not finish within its time limit.
    #[error("{command} timed out after {seconds} seconds")]
    TimedOut {
        /// The program that was killed.
        command: String,
        /// The limit that was exceeded.
        seconds: u64,
    },

    /// Copying an artifact failed.
    #[error("failed to copy {from} to {to}")]
    CopyFailed {
        /// Source of the copy.
        from: Utf8PathBuf,
        /// Destination of the copy.
        to: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A manifest entry is not a usable relative path.
    #[error("invalid artifact path {path:?}: {reason}")]
    InvalidArtifactPath {
        /// The rejected path as written in the configuration.
        path: String,
        /// Why the path was rejected.
        reason: &'static str,
    },

    /// The configuration file could not be parsed or failed validation.
    #[error("invalid configuration in {path}: {reason}")]
    InvalidConfig {
        /// Path to the configuration file, or `<defaults>`.
        path: Utf8PathBuf,
        /// Description of the problem.
        reason: String,
    },

    /// An explicitly requested configuration file does not exist.
    #[error("configuration file {path} not found")]
    ConfigNotFound {
        /// The requested path.
        path: Utf8PathBuf,
    },

    /// The shader source file does not exist.
    #[error("shader source {path} does not exist")]
    ShaderNotFound {
        /// The requested shader path.
        path: Utf8PathBuf,
    },

    /// The shader path has no usable file name.
    #[error("cannot derive a shader identifier from {path}")]
    InvalidShaderName {
        /// The offending shader path.
        path: Utf8PathBuf,
    },

    /// Failed to write output.
    #[error("failed to write output")]
    WriteFailed {
        /// The underlying error that caused the write to fail.
        #[source]
        source: std::io::Error,
    },

    /// An I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Test stub received an unexpected or mismatched command invocation.
    #[cfg(any(test, feature = "test-support"))]
    #[error("stub mismatch: {message}")]
    StubMismatch {
        /// Description of what was expected versus what was received.
        message: String,
    },
}

/// Result type alias using [`DeployError`].
pub type Result<T> = std::result::Result<T, DeployError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_artifact_names_entry_and_root() {
        let err = DeployError::MissingArtifact {
            artifact: "meshViewer.wasm".to_owned(),
            build_root: Utf8PathBuf::from("./build_web"),
        };
        let msg = err.to_string();
        assert!(msg.contains("meshViewer.wasm"));
        assert!(msg.contains("build_web"));
    }

    #[test]
    fn missing_credential_names_variable() {
        let err = DeployError::MissingCredential {
            variable: "DEPLOY_TOKEN".to_owned(),
        };
        assert!(err.to_string().contains("DEPLOY_TOKEN"));
    }

    #[test]
    fn git_error_includes_operation_and_message() {
        let err = DeployError::Git {
            operation: "push",
            message: "rejected".to_owned(),
        };
        let msg = err.to_string();
        assert!(msg.contains("push"));
        assert!(msg.contains("rejected"));
    }

    #[test]
    fn copy_failed_preserves_source() {
        let err = DeployError::CopyFailed {
            from: Utf8PathBuf::from("build_web/js"),
            to: Utf8PathBuf::from("artifacts/js"),
            source: std::io::Error::other("disk full"),
        };
        assert!(err.to_string().contains("build_web/js"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn write_failed_includes_reason() {
        let err = DeployError::WriteFailed {
            source: std::io::Error::other("permission denied"),
        };
        assert!(err.to_string().contains("write"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
