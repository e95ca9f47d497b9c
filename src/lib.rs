//! # Profile Logger
//!
//! Process logging set up from named profiles in an XML file.
//!
//! One call, [`init_log`], reads the configuration, picks the profile called
//! `"Logger"` and returns a [`Logger`] that writes every accepted record to
//! standard output and to a size-rotated log file.
//!
//! ## Features
//!
//! - **Forgiving startup**: a missing or malformed configuration falls back
//!   to a built-in profile instead of failing
//! - **Rotation**: size-based rotation with bounded backups, age expiry and
//!   gzip compression
//! - **Development mode**: caller location on every record, stack traces
//!   from `warn` up, panicking `dpanic`
//! - **Thread Safe**: a `Logger` and all its clones can be shared freely
//!
//! ## Example
//!
//! ```no_run
//! use profile_logger::{info, init_log};
//!
//! let logger = init_log("./config/zap.xml").unwrap();
//! info!(logger, "listening on port {}", 8080);
//! ```

pub mod appenders;
pub mod config;
pub mod core;
pub mod factory;
pub mod global;
pub mod macros;

use std::io::{self, Write};
use std::path::Path;

pub mod prelude {
    pub use crate::appenders::{ConsoleAppender, RotatingFileAppender, RotationPolicy};
    pub use crate::config::{ConfigStore, LoggerProfile};
    pub use crate::core::{
        Appender, FieldValue, LogContext, LogEntry, LogLevel, Logger, LoggerBuilder, LoggerError,
        Result,
    };
    pub use crate::factory::LoggerFactory;
    pub use crate::init_log;
}

pub use appenders::{ConsoleAppender, RotatingFileAppender, RotationPolicy};
pub use config::{ConfigStore, LoggerProfile, DEFAULT_PROFILE_NAME};
pub use crate::core::{
    Appender, Caller, ConsoleEncoder, EncoderConfig, FieldValue, LogContext, LogEntry, LogLevel,
    Logger, LoggerBuilder, LoggerError, LoggerOptions, Result,
};
pub use factory::LoggerFactory;

/// Initialize logging from the XML file at `config_path`.
///
/// The file is optional: when it is missing or cannot be parsed, a notice is
/// printed to stdout and the built-in profile is used (`./logs/zap.log`,
/// `info`, 512 MB per file, 30 backups, 10 days, compressed).
///
/// # Errors
///
/// - [`LoggerError::ProfileNotFound`] if the file declares profiles but none
///   is named `"Logger"`; the error is also printed to stderr
/// - file sink errors from [`LoggerFactory::build`]
pub fn init_log<P: AsRef<Path>>(config_path: P) -> Result<Logger> {
    let store = ConfigStore::load(config_path);

    let profile = store.resolve(DEFAULT_PROFILE_NAME).map_err(|e| {
        report_init_error(&mut io::stderr(), &e);
        e
    })?;

    LoggerFactory::new().build(&profile)
}

fn report_init_error<W: Write>(out: &mut W, error: &LoggerError) {
    let _ = writeln!(out, "[LOGGER ERROR] {}", error);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_error_report_line() {
        let mut out = Vec::new();
        report_init_error(&mut out, &LoggerError::profile_not_found("Logger"));

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "[LOGGER ERROR] Logger profile 'Logger' not found in configuration\n"
        );
    }

    #[test]
    fn test_missing_profile_is_returned() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("zap.xml");
        std::fs::write(&path, r#"<Loggers><Logger name="Audit"/></Loggers>"#).unwrap();

        assert!(matches!(
            init_log(&path),
            Err(LoggerError::ProfileNotFound { ref name }) if name == DEFAULT_PROFILE_NAME
        ));
    }
}
