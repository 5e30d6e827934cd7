//! Mesh viewer artifact CLI entrypoint.
//!
//! Orchestrates staging the web build (`assemble`) and publishing the staged
//! site to its hosting repository (`deploy`).

use camino::Utf8Path;
use clap::Parser;
use meshviewer_common::init_logging;
use meshviewer_webdeploy::assembler::Assembler;
use meshviewer_webdeploy::cli::{AssembleArgs, Cli, Command, DeployArgs};
use meshviewer_webdeploy::config::DeployConfig;
use meshviewer_webdeploy::deployer::{DeployRequest, Deployer};
use meshviewer_webdeploy::error::Result;
use meshviewer_webdeploy::git::SystemCommandExecutor;
use meshviewer_webdeploy::output::{
    deploy_success_message, exit_code_for_run_result, write_stderr_line,
};
use std::io::Write;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbosity, cli.quiet);

    let mut stderr = std::io::stderr();
    let run_result = run(&cli, &mut stderr);
    let exit_code = exit_code_for_run_result(run_result, &mut stderr);
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
}

fn run(cli: &Cli, stderr: &mut dyn Write) -> Result<()> {
    let config = DeployConfig::load(cli.config.as_deref(), Utf8Path::new("."))?;
    match &cli.command {
        Command::Assemble(args) => run_assemble(config, args, cli.quiet, stderr),
        Command::Deploy(args) => run_deploy(config, args, cli.quiet, stderr),
    }
}

fn run_assemble(
    config: DeployConfig,
    args: &AssembleArgs,
    quiet: bool,
    stderr: &mut dyn Write,
) -> Result<()> {
    let manifest = config.manifest()?;
    let build_dir = args.build_dir.clone().unwrap_or(config.build_dir);
    let artifact_dir = args.artifact_dir.clone().unwrap_or(config.artifact_dir);

    let mut sink = std::io::sink();
    let progress: &mut dyn Write = if quiet { &mut sink } else { stderr };
    Assembler::new(build_dir, artifact_dir, manifest).run(progress)?;
    Ok(())
}

fn run_deploy(
    mut config: DeployConfig,
    args: &DeployArgs,
    quiet: bool,
    stderr: &mut dyn Write,
) -> Result<()> {
    if let Some(dir) = &args.artifact_dir {
        config.artifact_dir.clone_from(dir);
    }
    if let Some(dir) = &args.deployment_dir {
        config.deployment_dir.clone_from(dir);
    }

    let request = DeployRequest::from_config(&config, &args.revision);
    let executor = SystemCommandExecutor::default();
    let deployer = Deployer::new(&executor);

    if args.dry_run {
        let plan = deployer.plan(&request)?;
        write_stderr_line(stderr, plan.display_text());
        return Ok(());
    }

    if !quiet {
        write_stderr_line(
            stderr,
            format_args!(
                "Deploying {} to {} ({})",
                request.staging_dir, request.remote_url, request.branch
            ),
        );
    }
    let outcome = deployer.deploy(&request)?;
    if !quiet {
        write_stderr_line(stderr, deploy_success_message(&outcome, &request.remote_url));
    }
    Ok(())
}
