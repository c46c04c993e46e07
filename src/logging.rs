// Logger setup plus conditional logging macros that are only active in debug builds

use std::fs::File;
use std::io;
use std::path::Path;

/// Level used when `RUST_LOG` is not set.
pub const DEFAULT_FILTER: &str = "warn";

/// Installs `env_logger`, writing to `log_file` when given and to stderr
/// otherwise. The full-screen interface owns stderr's terminal, so it should
/// be paired with a log file.
pub fn init_logging(log_file: Option<&Path>) -> io::Result<()> {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(DEFAULT_FILTER));
    if let Some(path) = log_file {
        let file = File::create(path)?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    // A second init (e.g. from tests) keeps the first logger
    let _ = builder.try_init();
    Ok(())
}

#[cfg(debug_assertions)]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        log::debug!($($arg)*);
    };
}

#[cfg(not(debug_assertions))]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {{}};
}

#[cfg(debug_assertions)]
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {
        log::info!($($arg)*);
    };
}

#[cfg(not(debug_assertions))]
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {{}};
}
