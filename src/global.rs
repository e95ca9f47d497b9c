//! Optional process-wide logger handle
//!
//! Most programs keep the [`Logger`] returned by [`crate::init_log`] and pass
//! clones where they are needed. For code that cannot be reached that way,
//! the logger can be installed once here and fetched from anywhere.

use crate::core::{Logger, LoggerError, Result};
use std::path::Path;
use std::sync::OnceLock;

static GLOBAL_LOGGER: OnceLock<Logger> = OnceLock::new();

/// Store `logger` as the process-wide handle.
///
/// # Errors
///
/// [`LoggerError::AlreadyInitialized`] if a logger was installed before; the
/// existing one stays in place.
pub fn install(logger: Logger) -> Result<()> {
    GLOBAL_LOGGER
        .set(logger)
        .map_err(|_| LoggerError::AlreadyInitialized)
}

/// The installed logger, if any.
pub fn logger() -> Option<&'static Logger> {
    GLOBAL_LOGGER.get()
}

/// [`crate::init_log`] followed by [`install`].
pub fn init_global<P: AsRef<Path>>(config_path: P) -> Result<&'static Logger> {
    if GLOBAL_LOGGER.get().is_some() {
        return Err(LoggerError::AlreadyInitialized);
    }
    install(crate::init_log(config_path)?)?;
    GLOBAL_LOGGER.get().ok_or(LoggerError::AlreadyInitialized)
}
