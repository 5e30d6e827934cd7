//! Shared infrastructure for the mesh viewer web tooling: filesystem copy
//! helpers and logger initialisation.

pub mod fs;
pub mod logging;

pub use fs::{MAX_DIRECTORY_DEPTH, copy_directory, copy_file_into, recreate_directory};
pub use logging::{init_logging, level_for};
