//! Core logger types and traits

pub mod appender;
pub mod encoder;
pub mod error;
pub mod log_context;
pub mod log_entry;
pub mod log_level;
pub mod logger;

pub use appender::Appender;
pub use encoder::{ConsoleEncoder, EncoderConfig};
pub use error::{LoggerError, Result};
pub use log_context::{FieldValue, LogContext};
pub use log_entry::{Caller, LogEntry};
pub use log_level::LogLevel;
pub use logger::{Logger, LoggerBuilder, LoggerOptions};
