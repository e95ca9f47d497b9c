//! Errors raised while loading profiles and writing records

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// IO failure, with what was being attempted
    #[error("IO error while {operation}: {message}")]
    IoOperation {
        operation: String,
        message: String,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// No configuration file at the given path
    #[error("Logger configuration '{path}' not found")]
    ConfigMissing { path: String },

    /// Configuration file present but not a valid profile document
    #[error("Logger configuration '{path}' could not be parsed: {message}")]
    ConfigParse { path: String, message: String },

    /// Configuration loaded but the requested profile is not declared
    #[error("Logger profile '{name}' not found in configuration")]
    ProfileNotFound { name: String },

    /// Log file could not be opened or written
    #[error("File appender error for '{path}': {message}")]
    FileAppenderError { path: String, message: String },

    #[error("File rotation failed for '{path}': {message}")]
    FileRotationError { path: String, message: String },

    /// Another appender holds the log file
    #[error("Failed to acquire file lock on '{path}'")]
    FileLockError { path: String },

    /// The process-wide logger was already installed
    #[error("Global logger already initialized")]
    AlreadyInitialized,
}

impl LoggerError {
    pub fn io_operation(
        operation: impl Into<String>,
        message: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        LoggerError::IoOperation {
            operation: operation.into(),
            message: message.into(),
            source,
        }
    }

    pub fn config_missing(path: impl Into<String>) -> Self {
        LoggerError::ConfigMissing { path: path.into() }
    }

    pub fn config_parse(path: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::ConfigParse {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn profile_not_found(name: impl Into<String>) -> Self {
        LoggerError::ProfileNotFound { name: name.into() }
    }

    pub fn file_appender(path: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::FileAppenderError {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn file_rotation(path: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::FileRotationError {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn file_lock(path: impl Into<String>) -> Self {
        LoggerError::FileLockError { path: path.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = LoggerError::config_missing("zap.xml");
        assert!(matches!(err, LoggerError::ConfigMissing { .. }));

        let err = LoggerError::profile_not_found("Audit");
        assert!(matches!(err, LoggerError::ProfileNotFound { ref name } if name == "Audit"));

        let err = LoggerError::file_appender("/var/log/app.log", "Permission denied");
        assert!(matches!(err, LoggerError::FileAppenderError { .. }));
    }

    #[test]
    fn test_error_display() {
        let err = LoggerError::profile_not_found("Audit");
        assert_eq!(
            err.to_string(),
            "Logger profile 'Audit' not found in configuration"
        );

        let err = LoggerError::config_parse("zap.xml", "unexpected end of input");
        assert_eq!(
            err.to_string(),
            "Logger configuration 'zap.xml' could not be parsed: unexpected end of input"
        );

        let err = LoggerError::file_rotation("/var/log/app.log", "Disk full");
        assert_eq!(
            err.to_string(),
            "File rotation failed for '/var/log/app.log': Disk full"
        );
    }

    #[test]
    fn test_io_operation_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = LoggerError::io_operation("reading logger config", "cannot read file", io_err);

        assert!(matches!(err, LoggerError::IoOperation { .. }));
        assert!(err.to_string().contains("reading logger config"));
        assert!(err.to_string().contains("cannot read file"));
    }
}
