//! Output helpers shared by the command-line binaries.
//!
//! Progress and errors go to stderr; diagnostics go through the `log`
//! facade instead.

use crate::deployer::DeployOutcome;
use crate::error::Result;
use std::error::Error;
use std::fmt::Display;
use std::io::Write;

/// Write one line to `stderr`, ignoring write failures.
pub fn write_stderr_line(stderr: &mut dyn Write, message: impl Display) {
    if writeln!(stderr, "{message}").is_err() {
        // Best-effort output; ignore write failures.
    }
}

/// Report `err` and each error in its source chain, one per line.
///
/// # Examples
///
/// ```
/// use camino::Utf8PathBuf;
/// use meshviewer_webdeploy::error::DeployError;
/// use meshviewer_webdeploy::output::report_error;
///
/// let err = DeployError::CopyFailed {
///     from: Utf8PathBuf::from("build_web/js"),
///     to: Utf8PathBuf::from("artifacts/js"),
///     source: std::io::Error::other("disk full"),
/// };
/// let mut stderr = Vec::new();
/// report_error(&mut stderr, &err);
/// let text = String::from_utf8(stderr).unwrap();
/// assert!(text.starts_with("error: failed to copy"));
/// assert!(text.contains("caused by: disk full"));
/// ```
pub fn report_error(stderr: &mut dyn Write, err: &dyn Error) {
    write_stderr_line(stderr, format_args!("error: {err}"));
    let mut source = err.source();
    while let Some(cause) = source {
        write_stderr_line(stderr, format_args!("  caused by: {cause}"));
        source = cause.source();
    }
}

/// Map a run result onto the process exit code, reporting any error.
pub fn exit_code_for_run_result(result: Result<()>, stderr: &mut dyn Write) -> i32 {
    match result {
        Ok(()) => 0,
        Err(err) => {
            report_error(stderr, &err);
            1
        }
    }
}

/// Format a success message after a deployment.
#[must_use]
pub fn deploy_success_message(outcome: &DeployOutcome, remote_url: &str) -> String {
    let count = outcome.copied.len();
    let plural = if count == 1 { "entry" } else { "entries" };
    format!(
        "Deployed {count} {plural} to branch {} of {remote_url}",
        outcome.branch
    )
}
