//! End-to-end CLI behaviour tests for `meshviewer-artifacts`.
//!
//! These scenarios run the binary in an empty scratch directory, so the
//! built-in configuration defaults apply, and check exit codes and stderr.

use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use std::process::{Command, Output};
use tempfile::TempDir;

#[derive(Default)]
struct CliWorld {
    project: Option<TempDir>,
    output: Option<Output>,
}

impl CliWorld {
    fn run(&mut self, args: &[&str]) {
        let project = self.project.as_ref().expect("project directory set");
        let output = Command::new(env!("CARGO_BIN_EXE_meshviewer-artifacts"))
            .args(args)
            .current_dir(project.path())
            .env_remove("RUST_LOG")
            .output()
            .expect("run meshviewer-artifacts");
        self.output = Some(output);
    }

    fn stderr(&self) -> String {
        let output = self.output.as_ref().expect("tool ran");
        String::from_utf8_lossy(&output.stderr).into_owned()
    }
}

#[fixture]
fn cli_world() -> CliWorld {
    CliWorld::default()
}

#[given("an empty project directory")]
fn given_empty_project(cli_world: &mut CliWorld) {
    cli_world.project = Some(TempDir::new().expect("temp dir"));
}

#[when("the artifacts tool runs without arguments")]
fn when_runs_without_arguments(cli_world: &mut CliWorld) {
    cli_world.run(&[]);
}

#[when("the artifacts tool runs with \"{args}\"")]
fn when_runs_with(cli_world: &mut CliWorld, args: String) {
    let args: Vec<&str> = args.split_whitespace().collect();
    cli_world.run(&args);
}

#[then("the tool exits with status {code}")]
fn then_exit_status(cli_world: &mut CliWorld, code: i32) {
    let output = cli_world.output.as_ref().expect("tool ran");
    assert_eq!(
        output.status.code(),
        Some(code),
        "stderr: {}",
        cli_world.stderr()
    );
}

#[then("stderr contains \"{text}\"")]
fn then_stderr_contains(cli_world: &mut CliWorld, text: String) {
    let stderr = cli_world.stderr();
    assert!(stderr.contains(&text), "stderr: {stderr}");
}

#[then("the project directory holds no \"{name}\" directory")]
fn then_no_directory(cli_world: &mut CliWorld, name: String) {
    let project = cli_world.project.as_ref().expect("project directory set");
    assert!(!project.path().join(name).exists());
}

// ---------------------------------------------------------------------------
// Scenario bindings
// ---------------------------------------------------------------------------

#[scenario(path = "tests/features/cli.feature", name = "A subcommand is required")]
fn scenario_subcommand_required(cli_world: CliWorld) {
    let _ = cli_world;
}

#[scenario(
    path = "tests/features/cli.feature",
    name = "Assembling without a build reports the missing directory"
)]
fn scenario_assemble_without_build(cli_world: CliWorld) {
    let _ = cli_world;
}

#[scenario(
    path = "tests/features/cli.feature",
    name = "A dry-run deploy only prints the plan"
)]
fn scenario_dry_run_deploy(cli_world: CliWorld) {
    let _ = cli_world;
}

#[scenario(
    path = "tests/features/cli.feature",
    name = "An explicit configuration file must exist"
)]
fn scenario_missing_explicit_config(cli_world: CliWorld) {
    let _ = cli_world;
}
