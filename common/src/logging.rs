//! Logger initialisation for the command-line tools.
//!
//! The binaries log through the `log` facade with `env_logger` as the
//! backend. `RUST_LOG` always wins; otherwise the filter follows the `-v`
//! count and `-q` flag.

use env_logger::{Builder, Env};
use log::LevelFilter;

/// Maps the CLI verbosity flags onto a default log level.
///
/// # Examples
///
/// ```
/// use log::LevelFilter;
/// use meshviewer_common::logging::level_for;
///
/// assert_eq!(level_for(0, false), LevelFilter::Warn);
/// assert_eq!(level_for(2, false), LevelFilter::Debug);
/// assert_eq!(level_for(0, true), LevelFilter::Error);
/// ```
#[must_use]
pub fn level_for(verbosity: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::Error;
    }
    match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Installs the global logger.
///
/// Calling this more than once is harmless; later calls leave the first
/// logger in place.
pub fn init_logging(verbosity: u8, quiet: bool) {
    let default_filter = level_for(verbosity, quiet).to_string();
    let _ = Builder::from_env(Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .try_init();
}
