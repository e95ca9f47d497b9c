//! `format!`-style logging macros
//!
//! Each macro takes the logger first, then format arguments. The record's
//! caller is the macro's call site.
//!
//! ```
//! use profile_logger::prelude::*;
//! use profile_logger::{info, warn};
//!
//! let logger = Logger::new();
//! info!(logger, "Server listening on port {}", 8080);
//! warn!(logger, "{} of {} workers busy", 7, 8);
//! ```

/// Log a message with automatic formatting.
///
/// # Examples
///
/// ```
/// # use profile_logger::prelude::*;
/// # let logger = Logger::new();
/// use profile_logger::log;
/// log!(logger, LogLevel::Info, "Simple message");
/// log!(logger, LogLevel::Error, "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.log($level, format!($($arg)+))
    };
}

/// Log a debug-level message.
///
/// # Examples
///
/// ```
/// # use profile_logger::prelude::*;
/// # let logger = Logger::new();
/// use profile_logger::debug;
/// debug!(logger, "Debug information");
/// debug!(logger, "Counter value: {}", 10);
/// ```
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Debug, $($arg)+)
    };
}

/// Log an info-level message.
///
/// # Examples
///
/// ```
/// # use profile_logger::prelude::*;
/// # let logger = Logger::new();
/// use profile_logger::info;
/// info!(logger, "Application started");
/// info!(logger, "Processing {} items", 100);
/// ```
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Info, $($arg)+)
    };
}

/// Log a warning-level message.
///
/// # Examples
///
/// ```
/// # use profile_logger::prelude::*;
/// # let logger = Logger::new();
/// use profile_logger::warn;
/// warn!(logger, "Low disk space");
/// warn!(logger, "Retry attempt {} of {}", 3, 5);
/// ```
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warn, $($arg)+)
    };
}

/// Log an error-level message.
///
/// # Examples
///
/// ```
/// # use profile_logger::prelude::*;
/// # let logger = Logger::new();
/// use profile_logger::error;
/// error!(logger, "Failed to connect to database");
/// error!(logger, "Error code: {}, message: {}", 500, "Internal error");
/// ```
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, $($arg)+)
    };
}

/// Log a dpanic-level message.
///
/// In development mode the logger panics after writing the record.
///
/// ```should_panic
/// # use profile_logger::prelude::*;
/// # let logger = Logger::builder().development(true).build();
/// use profile_logger::dpanic;
/// dpanic!(logger, "invariant broken: {} < 0", -1);
/// ```
#[macro_export]
macro_rules! dpanic {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::DPanic, $($arg)+)
    };
}

/// Log a fatal-level message, flush, and exit the process with status 1.
///
/// ```no_run
/// # use profile_logger::prelude::*;
/// # let logger = Logger::new();
/// use profile_logger::fatal;
/// fatal!(logger, "Unable to recover from error: {}", "disk full");
/// ```
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Fatal, $($arg)+)
    };
}

#[cfg(test)]
mod tests {
    use crate::core::{Appender, LogEntry, LogLevel, Logger, Result};
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[derive(Clone, Default)]
    struct Collect(Arc<Mutex<Vec<LogEntry>>>);

    impl Appender for Collect {
        fn append(&mut self, entry: &LogEntry) -> Result<()> {
            self.0.lock().push(entry.clone());
            Ok(())
        }

        fn flush(&mut self) -> Result<()> {
            Ok(())
        }

        fn name(&self) -> &str {
            "collect"
        }
    }

    fn logger_with(level: LogLevel) -> (Logger, Collect) {
        let sink = Collect::default();
        let logger = Logger::builder()
            .min_level(level)
            .appender(sink.clone())
            .add_caller(true)
            .build();
        (logger, sink)
    }

    #[test]
    fn test_log_macro() {
        let (logger, sink) = logger_with(LogLevel::Debug);
        log!(logger, LogLevel::Info, "Test message");
        log!(logger, LogLevel::Warn, "Formatted: {}", 42);

        let entries = sink.0.lock();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].level, LogLevel::Warn);
        assert_eq!(entries[1].message, "Formatted: 42");
    }

    #[test]
    fn test_level_macros() {
        let (logger, sink) = logger_with(LogLevel::Debug);
        debug!(logger, "Count: {}", 5);
        info!(logger, "Items: {}", 100);
        warn!(logger, "Retry {} of {}", 1, 3);
        error!(logger, "Code: {}", 500);

        let levels: Vec<LogLevel> = sink.0.lock().iter().map(|e| e.level).collect();
        assert_eq!(
            levels,
            vec![LogLevel::Debug, LogLevel::Info, LogLevel::Warn, LogLevel::Error]
        );
    }

    #[test]
    fn test_macros_respect_threshold() {
        let (logger, sink) = logger_with(LogLevel::Error);
        debug!(logger, "dropped");
        warn!(logger, "dropped too");
        error!(logger, "kept");

        assert_eq!(sink.0.lock().len(), 1);
    }

    #[test]
    fn test_macro_caller_is_call_site() {
        let (logger, sink) = logger_with(LogLevel::Info);
        let line = line!() + 1;
        info!(logger, "here");

        let entries = sink.0.lock();
        let caller = entries[0].caller.as_ref().unwrap();
        assert!(caller.file.ends_with("macros.rs"));
        assert_eq!(caller.line, line);
    }

    #[test]
    fn test_dpanic_outside_development() {
        let (logger, sink) = logger_with(LogLevel::Info);
        dpanic!(logger, "tolerated: {}", 1);
        assert_eq!(sink.0.lock()[0].level, LogLevel::DPanic);
    }
}
