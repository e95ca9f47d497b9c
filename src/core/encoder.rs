//! Record encoding
//!
//! Every sink renders records with the same human-readable layout: one
//! tab-separated line per record, with an optional stack trace on the
//! following lines.
//!
//! ```text
//! 2025-01-08T10:30:45.123Z	info	api.http	core/server.rs:42	listening	{"port":8080}
//! ```

use super::log_entry::LogEntry;
use chrono::{DateTime, Utc};

/// ISO 8601, UTC, millisecond precision: `2025-01-08T10:30:45.123Z`
pub const ISO8601_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

/// Key names for each element of a record.
///
/// An empty key drops that element from the output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncoderConfig {
    pub time_key: String,
    pub level_key: String,
    pub name_key: String,
    pub caller_key: String,
    pub message_key: String,
    pub stacktrace_key: String,
    pub line_ending: String,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            time_key: "time".to_string(),
            level_key: "level".to_string(),
            name_key: "logger".to_string(),
            caller_key: "linenum".to_string(),
            message_key: "msg".to_string(),
            stacktrace_key: "stacktrace".to_string(),
            line_ending: "\n".to_string(),
        }
    }
}

/// Human-readable, tab-separated encoder.
#[derive(Debug, Clone, Default)]
pub struct ConsoleEncoder {
    config: EncoderConfig,
}

impl ConsoleEncoder {
    pub fn new(config: EncoderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EncoderConfig {
        &self.config
    }

    pub fn format_time(timestamp: &DateTime<Utc>) -> String {
        timestamp.format(ISO8601_FORMAT).to_string()
    }

    /// Encode one record, including the trailing line ending.
    pub fn encode(&self, entry: &LogEntry) -> String {
        let cfg = &self.config;
        let mut elements: Vec<String> = Vec::with_capacity(6);

        if !cfg.time_key.is_empty() {
            elements.push(Self::format_time(&entry.timestamp));
        }
        if !cfg.level_key.is_empty() {
            elements.push(entry.level.as_str().to_string());
        }
        if !cfg.name_key.is_empty() {
            if let Some(ref name) = entry.logger_name {
                elements.push(name.clone());
            }
        }
        if !cfg.caller_key.is_empty() {
            if let Some(ref caller) = entry.caller {
                elements.push(caller.short());
            }
        }
        if !cfg.message_key.is_empty() {
            elements.push(entry.message.clone());
        }
        if let Some(ref context) = entry.context {
            if !context.is_empty() {
                elements.push(context.to_json());
            }
        }

        let mut line = elements.join("\t");

        if !cfg.stacktrace_key.is_empty() {
            if let Some(ref stack) = entry.stacktrace {
                line.push_str(&cfg.line_ending);
                line.push_str(stack.trim_end());
            }
        }

        line.push_str(&cfg.line_ending);
        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::log_context::LogContext;
    use crate::core::log_entry::Caller;
    use crate::core::log_level::LogLevel;
    use chrono::TimeZone;

    fn fixed_entry(level: LogLevel, message: &str) -> LogEntry {
        let mut entry = LogEntry::new(level, message.to_string());
        entry.timestamp = Utc
            .with_ymd_and_hms(2025, 1, 8, 10, 30, 45)
            .single()
            .expect("valid datetime")
            + chrono::Duration::milliseconds(123);
        entry
    }

    #[test]
    fn test_minimal_record() {
        let encoder = ConsoleEncoder::default();
        let line = encoder.encode(&fixed_entry(LogLevel::Info, "started"));
        assert_eq!(line, "2025-01-08T10:30:45.123Z\tinfo\tstarted\n");
    }

    #[test]
    fn test_full_record() {
        let encoder = ConsoleEncoder::default();
        let entry = fixed_entry(LogLevel::Warn, "slow request")
            .with_logger_name("api.http")
            .with_caller(Caller::new("src/http/server.rs", 42))
            .with_context(LogContext::new().with_field("ms", 1500));

        let line = encoder.encode(&entry);
        assert_eq!(
            line,
            "2025-01-08T10:30:45.123Z\twarn\tapi.http\thttp/server.rs:42\tslow request\t{\"ms\":1500}\n"
        );
    }

    #[test]
    fn test_stacktrace_on_following_lines() {
        let encoder = ConsoleEncoder::default();
        let entry = fixed_entry(LogLevel::Error, "boom").with_stacktrace("frame 0\nframe 1\n");

        let line = encoder.encode(&entry);
        assert_eq!(line, "2025-01-08T10:30:45.123Z\terror\tboom\nframe 0\nframe 1\n");
    }

    #[test]
    fn test_empty_key_omits_element() {
        let config = EncoderConfig {
            time_key: String::new(),
            caller_key: String::new(),
            stacktrace_key: String::new(),
            ..EncoderConfig::default()
        };
        let encoder = ConsoleEncoder::new(config);
        let entry = fixed_entry(LogLevel::DPanic, "x")
            .with_caller(Caller::new("a/b.rs", 1))
            .with_stacktrace("frame");

        assert_eq!(encoder.encode(&entry), "dpanic\tx\n");
    }
}
