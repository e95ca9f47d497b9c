//! Main logger implementation

use super::{
    appender::Appender,
    error::Result,
    log_context::LogContext,
    log_entry::{Caller, LogEntry},
    log_level::LogLevel,
};
use parking_lot::RwLock;
use std::backtrace::Backtrace;
use std::panic::Location;
use std::sync::Arc;

/// Behavior switches fixed at build time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoggerOptions {
    /// Attach the call site to every record
    pub add_caller: bool,
    /// `DPanic` records panic after being written
    pub development: bool,
    /// Records at or above this level carry a stack trace
    pub stacktrace_level: Option<LogLevel>,
}

/// Level-gated fan-out of records to a set of appenders.
///
/// Cloning is cheap: clones, [`Logger::named`] children and
/// [`Logger::with_fields`] children share the same appenders and minimum
/// level. All methods take `&self` for logging, so a `Logger` can be shared
/// across threads without extra locking.
#[derive(Clone)]
pub struct Logger {
    min_level: Arc<RwLock<LogLevel>>,
    appenders: Arc<RwLock<Vec<Box<dyn Appender>>>>,
    options: LoggerOptions,
    name: Option<String>,
    fields: LogContext,
}

impl Logger {
    #[must_use]
    pub fn new() -> Self {
        Self {
            min_level: Arc::new(RwLock::new(LogLevel::Info)),
            appenders: Arc::new(RwLock::new(Vec::new())),
            options: LoggerOptions::default(),
            name: None,
            fields: LogContext::new(),
        }
    }

    /// Process log entry synchronously with per-appender panic isolation
    ///
    /// One failing appender doesn't prevent the others from receiving the
    /// entry. Failures are reported on stderr.
    fn process_sync(appenders: &mut [Box<dyn Appender>], entry: &LogEntry) {
        for (idx, appender) in appenders.iter_mut().enumerate() {
            let append_result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                appender.append(entry)
            }));

            match append_result {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    eprintln!(
                        "[LOGGER ERROR] Appender #{} ({}) failed: {}",
                        idx,
                        appender.name(),
                        e
                    );
                }
                Err(panic_info) => {
                    let panic_msg = if let Some(s) = panic_info.downcast_ref::<&str>() {
                        s.to_string()
                    } else if let Some(s) = panic_info.downcast_ref::<String>() {
                        s.clone()
                    } else {
                        "Unknown panic".to_string()
                    };
                    eprintln!(
                        "[LOGGER CRITICAL] Appender #{} panicked: {}. \
                         Other appenders continue to function.",
                        idx, panic_msg
                    );
                }
            }
        }
    }

    pub fn add_appender(&mut self, appender: Box<dyn Appender>) {
        self.appenders.write().push(appender);
    }

    pub fn appender_count(&self) -> usize {
        self.appenders.read().len()
    }

    pub fn set_min_level(&mut self, level: LogLevel) {
        *self.min_level.write() = level;
    }

    pub fn min_level(&self) -> LogLevel {
        *self.min_level.read()
    }

    pub fn options(&self) -> LoggerOptions {
        self.options
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Whether a record at `level` would reach the appenders.
    pub fn enabled(&self, level: LogLevel) -> bool {
        level >= *self.min_level.read()
    }

    /// Child logger whose name is `parent.name` (or `name` at the root).
    #[must_use]
    pub fn named(&self, name: &str) -> Logger {
        let mut child = self.clone();
        if name.is_empty() {
            return child;
        }
        child.name = Some(match self.name {
            Some(ref parent) => format!("{}.{}", parent, name),
            None => name.to_string(),
        });
        child
    }

    /// Child logger that adds `fields` to every record.
    ///
    /// On key collisions the new fields replace the inherited ones.
    #[must_use]
    pub fn with_fields(&self, fields: LogContext) -> Logger {
        let mut child = self.clone();
        let mut merged = fields;
        merged.merge_missing(&self.fields);
        child.fields = merged;
        child
    }

    #[track_caller]
    pub fn log(&self, level: LogLevel, message: impl Into<String>) {
        self.dispatch(level, message.into(), None, Location::caller());
    }

    /// Log with structured context fields
    #[track_caller]
    pub fn log_with_context(&self, level: LogLevel, message: impl Into<String>, context: LogContext) {
        self.dispatch(level, message.into(), Some(context), Location::caller());
    }

    fn dispatch(
        &self,
        level: LogLevel,
        message: String,
        context: Option<LogContext>,
        location: &'static Location<'static>,
    ) {
        if self.enabled(level) {
            let entry = self.build_entry(level, &message, context, location);
            let mut appenders = self.appenders.write();
            Self::process_sync(&mut appenders, &entry);
        }

        // Terminal levels act even when the record itself was filtered out.
        match level {
            LogLevel::DPanic if self.options.development => {
                self.flush_quietly();
                panic!("{}", message);
            }
            LogLevel::Panic => {
                self.flush_quietly();
                panic!("{}", message);
            }
            LogLevel::Fatal => {
                self.flush_quietly();
                std::process::exit(1);
            }
            _ => {}
        }
    }

    fn build_entry(
        &self,
        level: LogLevel,
        message: &str,
        context: Option<LogContext>,
        location: &'static Location<'static>,
    ) -> LogEntry {
        let mut entry = LogEntry::new(level, message.to_string());

        if let Some(ref name) = self.name {
            entry = entry.with_logger_name(name.clone());
        }
        if self.options.add_caller {
            entry = entry.with_caller(Caller::from_location(location));
        }
        if matches!(self.options.stacktrace_level, Some(min) if level >= min) {
            entry = entry.with_stacktrace(Backtrace::force_capture().to_string());
        }

        let mut fields = context.unwrap_or_default();
        fields.merge_missing(&self.fields);
        if !fields.is_empty() {
            entry = entry.with_context(fields);
        }

        entry
    }

    fn flush_quietly(&self) {
        if let Err(e) = self.flush() {
            eprintln!("[LOGGER ERROR] Failed to flush: {}", e);
        }
    }

    pub fn flush(&self) -> Result<()> {
        let mut appenders = self.appenders.write();
        for appender in appenders.iter_mut() {
            appender.flush()?;
        }
        Ok(())
    }

    #[inline]
    #[track_caller]
    pub fn debug(&self, message: impl Into<String>) {
        self.log(LogLevel::Debug, message);
    }

    #[inline]
    #[track_caller]
    pub fn info(&self, message: impl Into<String>) {
        self.log(LogLevel::Info, message);
    }

    #[inline]
    #[track_caller]
    pub fn warn(&self, message: impl Into<String>) {
        self.log(LogLevel::Warn, message);
    }

    #[inline]
    #[track_caller]
    pub fn error(&self, message: impl Into<String>) {
        self.log(LogLevel::Error, message);
    }

    /// Logs at `DPanic`; panics afterwards in development mode.
    #[inline]
    #[track_caller]
    pub fn dpanic(&self, message: impl Into<String>) {
        self.log(LogLevel::DPanic, message);
    }

    /// Logs at `Panic`, then panics with the message.
    #[inline]
    #[track_caller]
    pub fn panic(&self, message: impl Into<String>) {
        self.log(LogLevel::Panic, message);
    }

    /// Logs at `Fatal`, flushes, then exits the process with status 1.
    #[inline]
    #[track_caller]
    pub fn fatal(&self, message: impl Into<String>) {
        self.log(LogLevel::Fatal, message);
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for constructing Logger with a fluent API
///
/// # Example
/// ```
/// use profile_logger::prelude::*;
///
/// let logger = Logger::builder()
///     .min_level(LogLevel::Debug)
///     .appender(ConsoleAppender::new())
///     .add_caller(true)
///     .build();
/// assert!(logger.enabled(LogLevel::Debug));
/// ```
pub struct LoggerBuilder {
    min_level: LogLevel,
    appenders: Vec<Box<dyn Appender>>,
    options: LoggerOptions,
    name: Option<String>,
    fields: LogContext,
}

impl LoggerBuilder {
    pub fn new() -> Self {
        Self {
            min_level: LogLevel::Info,
            appenders: Vec::new(),
            options: LoggerOptions::default(),
            name: None,
            fields: LogContext::new(),
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn appender<A: Appender + 'static>(mut self, appender: A) -> Self {
        self.appenders.push(Box::new(appender));
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn boxed_appender(mut self, appender: Box<dyn Appender>) -> Self {
        self.appenders.push(appender);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Field attached to every record
    #[must_use = "builder methods return a new value"]
    pub fn field<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<super::log_context::FieldValue>,
    {
        self.fields.add_field(key, value);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn add_caller(mut self, enabled: bool) -> Self {
        self.options.add_caller = enabled;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn development(mut self, enabled: bool) -> Self {
        self.options.development = enabled;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn add_stacktrace(mut self, level: LogLevel) -> Self {
        self.options.stacktrace_level = Some(level);
        self
    }

    pub fn build(self) -> Logger {
        let mut logger = Logger::new();
        logger.set_min_level(self.min_level);
        logger.options = self.options;
        logger.name = self.name;
        logger.fields = self.fields;
        for appender in self.appenders {
            logger.add_appender(appender);
        }
        logger
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger {
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }
}
