//! Mesh viewer web tooling library.
//!
//! This crate stages the outputs of the viewer's WebAssembly build, publishes
//! them to the hosting repository, and packages GLSL shaders as inline HTML.
//! It backs the `meshviewer-artifacts` and `meshviewer-shader-html` binaries.
//!
//! # Modules
//!
//! - [`assembler`] - Copying the build outputs into the staging area
//! - [`cli`] - Command-line argument definitions
//! - [`config`] - `webdeploy.toml` loading and validation
//! - [`credentials`] - Access token lookup, injection, and redaction
//! - [`deployer`] - Cloning, overlaying, committing, and pushing the site
//! - [`error`] - Error types shared by every operation
//! - [`git`] - Git invocations behind a command executor
//! - [`manifest`] - The list of artifacts the build must produce
//! - [`output`] - Progress and error reporting for the binaries
//! - [`shader`] - GLSL to HTML script block packaging

pub mod assembler;
pub mod cli;
pub mod config;
pub mod credentials;
pub mod deployer;
pub mod error;
pub mod git;
pub mod manifest;
pub mod output;
pub mod shader;

#[cfg(any(test, feature = "test-support"))]
pub mod test_utils;
