//! Named logger profiles as declared in the XML configuration

use crate::core::LogLevel;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};

/// Profile looked up by [`crate::init_log`].
pub const DEFAULT_PROFILE_NAME: &str = "Logger";
pub const DEFAULT_FILE_PATH: &str = "./logs/zap.log";
pub const DEFAULT_MAX_SIZE_MB: u64 = 512;
pub const DEFAULT_MAX_BACKUPS: usize = 30;
pub const DEFAULT_MAX_AGE_DAYS: u64 = 10;

/// Profiles in declaration order.
pub type ProfileList = Vec<LoggerProfile>;

/// One `<Logger name="...">` entry.
///
/// Elements missing from the document take their zero value (empty path,
/// 0, `false`); a missing or unrecognized `<Level>` becomes `Info`. Limits
/// are read as signed integers and anything at or below zero means 0.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggerProfile {
    #[serde(rename = "@name", default)]
    pub name: String,
    #[serde(rename = "FilePath", default)]
    pub file_path: String,
    #[serde(rename = "Level", default, deserialize_with = "level_from_config")]
    pub level: LogLevel,
    #[serde(rename = "MaxSize", default, deserialize_with = "limit_from_config")]
    pub max_size_mb: u64,
    #[serde(rename = "MaxBackups", default, deserialize_with = "limit_from_config")]
    pub max_backups: usize,
    #[serde(rename = "MaxAge", default, deserialize_with = "limit_from_config")]
    pub max_age_days: u64,
    #[serde(rename = "Compress", default, deserialize_with = "flag_from_config")]
    pub compress: bool,
}

impl Default for LoggerProfile {
    /// The built-in profile used when no configuration is available.
    fn default() -> Self {
        Self {
            name: DEFAULT_PROFILE_NAME.to_string(),
            file_path: DEFAULT_FILE_PATH.to_string(),
            level: LogLevel::Info,
            max_size_mb: DEFAULT_MAX_SIZE_MB,
            max_backups: DEFAULT_MAX_BACKUPS,
            max_age_days: DEFAULT_MAX_AGE_DAYS,
            compress: true,
        }
    }
}

fn level_from_config<'de, D>(deserializer: D) -> std::result::Result<LogLevel, D::Error>
where
    D: Deserializer<'de>,
{
    let literal = String::deserialize(deserializer)?;
    Ok(LogLevel::from_config(&literal))
}

/// Signed integer limit, with zero or negative values clamped to 0.
fn limit_from_config<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: TryFrom<i64> + Default,
{
    let literal = String::deserialize(deserializer)?;
    let literal = literal.trim();
    if literal.is_empty() {
        return Ok(T::default());
    }

    let value: i64 = literal
        .parse()
        .map_err(|_| D::Error::custom(format!("invalid integer limit '{}'", literal)))?;
    if value <= 0 {
        return Ok(T::default());
    }
    T::try_from(value).map_err(|_| D::Error::custom(format!("limit {} out of range", value)))
}

/// Boolean in any of the spellings `1 t T TRUE true True` and
/// `0 f F FALSE false False`.
fn flag_from_config<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let literal = String::deserialize(deserializer)?;
    match literal.trim() {
        "" => Ok(false),
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
        other => Err(D::Error::custom(format!("invalid boolean '{}'", other))),
    }
}

/// Document root, `<Loggers>`.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ProfileDocument {
    #[serde(rename = "Logger", default)]
    pub(crate) profiles: ProfileList,
}
