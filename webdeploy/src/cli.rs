//! CLI argument definitions for the mesh viewer web tooling.
//!
//! Both binaries parse their arguments through the types here so the
//! entrypoints stay focused on orchestration.

use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand};

/// Assemble and deploy the mesh viewer's WebAssembly build.
#[derive(Parser, Debug)]
#[command(name = "meshviewer-artifacts")]
#[command(version, about)]
#[command(long_about = concat!(
    "Assemble and deploy the mesh viewer's WebAssembly build.\n\n",
    "`assemble` copies the outputs of the web build into a staging directory. ",
    "`deploy` clones the hosting repository, overlays the staging directory, ",
    "renames the entry page to the landing page, and pushes one commit.\n\n",
    "Settings are read from webdeploy.toml in the working directory when present.",
))]
#[command(after_help = concat!(
    "ENVIRONMENT:\n",
    "  DEPLOY_TOKEN    Access token for the hosting repository (deploy only)\n",
    "  RUST_LOG        Log filter, overrides -v and -q\n\n",
    "EXAMPLES:\n",
    "  Stage the build outputs:\n",
    "    $ meshviewer-artifacts assemble\n\n",
    "  Preview a deployment:\n",
    "    $ meshviewer-artifacts deploy \"$(git rev-parse HEAD)\" --dry-run\n",
))]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,

    /// Configuration file [default: ./webdeploy.toml when present].
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<Utf8PathBuf>,

    /// Increase log verbosity (repeatable: -v, -vv, -vvv).
    #[arg(
        short,
        long = "verbose",
        action = clap::ArgAction::Count,
        conflicts_with = "quiet",
        global = true
    )]
    pub verbosity: u8,

    /// Suppress progress output (errors still shown).
    #[arg(short, long, conflicts_with = "verbosity", global = true)]
    pub quiet: bool,
}

/// Available subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Copy the web build outputs into the staging directory.
    Assemble(AssembleArgs),

    /// Publish the staging directory to the hosting repository.
    Deploy(DeployArgs),
}

/// Arguments for the assemble command.
#[derive(Args, Debug, Clone, Default)]
pub struct AssembleArgs {
    /// Directory holding the web build outputs.
    #[arg(short, long, value_name = "DIR")]
    pub build_dir: Option<Utf8PathBuf>,

    /// Staging directory to copy the outputs into.
    #[arg(short, long, value_name = "DIR")]
    pub artifact_dir: Option<Utf8PathBuf>,
}

/// Arguments for the deploy command.
#[derive(Args, Debug, Clone)]
pub struct DeployArgs {
    /// Source revision recorded in the deployment commit message.
    #[arg(value_name = "REVISION")]
    pub revision: String,

    /// Staging directory to deploy from.
    #[arg(short, long, value_name = "DIR")]
    pub artifact_dir: Option<Utf8PathBuf>,

    /// Working directory for the deployment clone (recreated on each run).
    #[arg(short, long, value_name = "DIR")]
    pub deployment_dir: Option<Utf8PathBuf>,

    /// Show the deployment plan and exit without cloning or pushing.
    #[arg(long)]
    pub dry_run: bool,
}

/// Append a GLSL shader to an HTML file as an inline script block.
#[derive(Parser, Debug)]
#[command(name = "meshviewer-shader-html")]
#[command(version, about)]
pub struct ShaderCli {
    /// GLSL source file.
    #[arg(value_name = "SHADER")]
    pub shader: Utf8PathBuf,

    /// HTML file to append to (created when missing).
    #[arg(value_name = "HTML_OUTPUT")]
    pub html_output: Utf8PathBuf,

    /// Increase log verbosity (repeatable: -v, -vv, -vvv).
    #[arg(short, long = "verbose", action = clap::ArgAction::Count)]
    pub verbosity: u8,
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
