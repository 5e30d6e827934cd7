//! Tests for CLI parsing of both binaries.

use super::*;
use clap::CommandFactory;
use clap::error::ErrorKind;
use rstest::rstest;

#[test]
fn cli_definitions_are_consistent() {
    Cli::command().debug_assert();
    ShaderCli::command().debug_assert();
}

#[test]
fn assemble_parses_defaults() {
    let cli = Cli::parse_from(["meshviewer-artifacts", "assemble"]);
    assert!(cli.config.is_none());
    assert_eq!(cli.verbosity, 0);
    assert!(!cli.quiet);
    match cli.command {
        Command::Assemble(args) => {
            assert!(args.build_dir.is_none());
            assert!(args.artifact_dir.is_none());
        }
        Command::Deploy(_) => panic!("expected Assemble command"),
    }
}

#[test]
fn assemble_parses_directory_overrides() {
    let cli = Cli::parse_from([
        "meshviewer-artifacts",
        "assemble",
        "--build-dir",
        "out/web",
        "-a",
        "staged",
    ]);
    match cli.command {
        Command::Assemble(args) => {
            assert_eq!(args.build_dir, Some(Utf8PathBuf::from("out/web")));
            assert_eq!(args.artifact_dir, Some(Utf8PathBuf::from("staged")));
        }
        Command::Deploy(_) => panic!("expected Assemble command"),
    }
}

#[test]
fn deploy_parses_revision_and_dry_run() {
    let cli = Cli::parse_from([
        "meshviewer-artifacts",
        "deploy",
        "abc123",
        "--deployment-dir",
        "/tmp/site",
        "--dry-run",
    ]);
    match cli.command {
        Command::Deploy(args) => {
            assert_eq!(args.revision, "abc123");
            assert_eq!(args.deployment_dir, Some(Utf8PathBuf::from("/tmp/site")));
            assert!(args.artifact_dir.is_none());
            assert!(args.dry_run);
        }
        Command::Assemble(_) => panic!("expected Deploy command"),
    }
}

#[rstest]
#[case::before_subcommand(&["meshviewer-artifacts", "-vv", "--config", "ci.toml", "assemble"])]
#[case::after_subcommand(&["meshviewer-artifacts", "assemble", "-vv", "--config", "ci.toml"])]
fn global_flags_parse_anywhere(#[case] args: &[&str]) {
    let cli = Cli::parse_from(args.iter().copied());
    assert_eq!(cli.verbosity, 2);
    assert_eq!(cli.config, Some(Utf8PathBuf::from("ci.toml")));
}

#[rstest]
#[case::missing_subcommand(&["meshviewer-artifacts"])]
#[case::missing_revision(&["meshviewer-artifacts", "deploy"])]
#[case::quiet_and_verbose(&["meshviewer-artifacts", "-q", "-v", "assemble"])]
#[case::unknown_subcommand(&["meshviewer-artifacts", "publish"])]
fn invalid_invocations_are_rejected(#[case] args: &[&str]) {
    assert!(Cli::try_parse_from(args.iter().copied()).is_err());
}

#[test]
fn shader_cli_parses_positionals() {
    let cli = ShaderCli::parse_from([
        "meshviewer-shader-html",
        "shaders/flatVertex.glsl",
        "build_web/shaders/shaders.html",
    ]);
    assert_eq!(cli.shader, Utf8PathBuf::from("shaders/flatVertex.glsl"));
    assert_eq!(
        cli.html_output,
        Utf8PathBuf::from("build_web/shaders/shaders.html")
    );
}

#[test]
fn shader_cli_requires_both_paths() {
    let err = ShaderCli::try_parse_from(["meshviewer-shader-html", "only.glsl"])
        .expect_err("output path missing");
    assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
}
