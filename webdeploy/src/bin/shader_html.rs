//! Shader packaging binary.
//!
//! Appends one GLSL source to the HTML file the web viewer loads its shaders
//! from. The web build runs it once per shader.

use clap::Parser;
use meshviewer_common::init_logging;
use meshviewer_webdeploy::cli::ShaderCli;
use meshviewer_webdeploy::output::exit_code_for_run_result;
use meshviewer_webdeploy::shader::package_shader;

fn main() {
    let cli = ShaderCli::parse();
    init_logging(cli.verbosity, false);

    let result = package_shader(&cli.shader, &cli.html_output).map(|_| ());
    let exit_code = exit_code_for_run_result(result, &mut std::io::stderr());
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
}
