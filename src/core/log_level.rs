//! Log level definitions

use std::fmt;

/// Record severity, ordered from least to most severe.
///
/// `DPanic` sits between `Error` and `Panic`: it panics only when the logger
/// runs in development mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum LogLevel {
    Debug = 0,
    #[default]
    Info = 1,
    Warn = 2,
    Error = 3,
    DPanic = 4,
    Panic = 5,
    Fatal = 6,
}

impl LogLevel {
    /// Every level, in ascending severity.
    pub const ALL: [LogLevel; 7] = [
        LogLevel::Debug,
        LogLevel::Info,
        LogLevel::Warn,
        LogLevel::Error,
        LogLevel::DPanic,
        LogLevel::Panic,
        LogLevel::Fatal,
    ];

    /// Lowercase name used in encoded records.
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
            LogLevel::DPanic => "dpanic",
            LogLevel::Panic => "panic",
            LogLevel::Fatal => "fatal",
        }
    }

    /// Literal accepted in the `<Level>` element of a profile.
    pub fn config_name(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DebugLevel",
            LogLevel::Info => "InfoLevel",
            LogLevel::Warn => "WarnLevel",
            LogLevel::Error => "ErrorLevel",
            LogLevel::DPanic => "DPanicLevel",
            LogLevel::Panic => "PanicLevel",
            LogLevel::Fatal => "FatalLevel",
        }
    }

    /// Map a configuration literal to a level.
    ///
    /// The match is exact and case-sensitive. Anything that is not one of the
    /// seven literals (including the empty string) maps to `Info`.
    pub fn from_config(value: &str) -> Self {
        match value {
            "DebugLevel" => LogLevel::Debug,
            "InfoLevel" => LogLevel::Info,
            "WarnLevel" => LogLevel::Warn,
            "ErrorLevel" => LogLevel::Error,
            "DPanicLevel" => LogLevel::DPanic,
            "PanicLevel" => LogLevel::Panic,
            "FatalLevel" => LogLevel::Fatal,
            _ => LogLevel::Info,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_literals_map_to_distinct_levels() {
        for level in LogLevel::ALL {
            assert_eq!(LogLevel::from_config(level.config_name()), level);
        }
    }

    #[test]
    fn test_unrecognized_literal_defaults_to_info() {
        assert_eq!(LogLevel::from_config(""), LogLevel::Info);
        assert_eq!(LogLevel::from_config("debuglevel"), LogLevel::Info);
        assert_eq!(LogLevel::from_config("Debug"), LogLevel::Info);
        assert_eq!(LogLevel::from_config("TRACE"), LogLevel::Info);
        assert_eq!(LogLevel::from_config(" ErrorLevel"), LogLevel::Info);
    }

    #[test]
    fn test_ordering() {
        assert!(LogLevel::Debug < LogLevel::Info);
        assert!(LogLevel::Error < LogLevel::DPanic);
        assert!(LogLevel::DPanic < LogLevel::Panic);
        assert!(LogLevel::Panic < LogLevel::Fatal);
    }

    #[test]
    fn test_display_is_lowercase() {
        assert_eq!(LogLevel::DPanic.to_string(), "dpanic");
        assert_eq!(LogLevel::Warn.to_string(), "warn");
    }
}
