//! Building a ready logger from a resolved profile

use crate::appenders::{ConsoleAppender, RotatingFileAppender, RotationPolicy};
use crate::config::LoggerProfile;
use crate::core::{EncoderConfig, LogLevel, Logger, Result};

/// Turns a [`LoggerProfile`] into a [`Logger`] that writes every accepted
/// record to the console and to the profile's rotating file.
///
/// # Example
///
/// ```no_run
/// use profile_logger::config::LoggerProfile;
/// use profile_logger::factory::LoggerFactory;
///
/// let logger = LoggerFactory::new().build(&LoggerProfile::default()).unwrap();
/// logger.info("ready");
/// ```
pub struct LoggerFactory {
    encoder: EncoderConfig,
    development: bool,
    console: Option<ConsoleAppender>,
}

impl LoggerFactory {
    pub fn new() -> Self {
        Self {
            encoder: EncoderConfig::default(),
            development: true,
            console: Some(ConsoleAppender::new()),
        }
    }

    /// Replace the stdout sink.
    #[must_use]
    pub fn with_console(mut self, console: ConsoleAppender) -> Self {
        self.console = Some(console);
        self
    }

    /// Write to the file sink only.
    #[must_use]
    pub fn without_console(mut self) -> Self {
        self.console = None;
        self
    }

    #[must_use]
    pub fn with_encoder(mut self, config: EncoderConfig) -> Self {
        self.encoder = config;
        self
    }

    /// Turn off development mode, so `DPanic` records no longer panic.
    #[must_use]
    pub fn production(mut self) -> Self {
        self.development = false;
        self
    }

    /// # Errors
    ///
    /// Fails when the log file cannot be created, opened or locked.
    pub fn build(self, profile: &LoggerProfile) -> Result<Logger> {
        let policy = RotationPolicy::new()
            .with_max_size_mb(profile.max_size_mb)
            .with_max_backups(profile.max_backups)
            .with_max_age_days(profile.max_age_days)
            .with_compression(profile.compress);

        let file = RotatingFileAppender::with_policy(&profile.file_path, policy)?
            .with_encoder(self.encoder.clone());

        let mut builder = Logger::builder()
            .min_level(profile.level)
            .add_caller(true)
            .development(self.development)
            .add_stacktrace(LogLevel::Warn);

        if let Some(console) = self.console {
            builder = builder.appender(console.with_encoder(self.encoder));
        }

        Ok(builder.appender(file).build())
    }
}

impl Default for LoggerFactory {
    fn default() -> Self {
        Self::new()
    }
}
