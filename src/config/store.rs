//! Loading logger profiles from an XML document
//!
//! ```xml
//! <Loggers>
//!   <Logger name="Logger">
//!     <FilePath>./logs/zap.log</FilePath>
//!     <Level>InfoLevel</Level>
//!     <MaxSize>512</MaxSize>
//!     <MaxBackups>30</MaxBackups>
//!     <MaxAge>10</MaxAge>
//!     <Compress>true</Compress>
//!   </Logger>
//! </Loggers>
//! ```

use super::profile::{LoggerProfile, ProfileDocument, ProfileList};
use super::resolver;
use crate::core::{LoggerError, Result};
use quick_xml::events::Event;
use quick_xml::Reader;
use std::fs;
use std::path::Path;

const ROOT_ELEMENT: &[u8] = b"Loggers";

/// Profiles loaded at startup, plus the built-in default.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigStore {
    profiles: ProfileList,
}

impl ConfigStore {
    pub fn from_profiles(profiles: ProfileList) -> Self {
        Self { profiles }
    }

    /// Load profiles from `path`, never failing.
    ///
    /// A missing file is reported as information and an unreadable or
    /// malformed one as a warning, both on stdout; either way the store is
    /// left empty so that resolution falls back to the built-in default.
    pub fn load<P: AsRef<Path>>(path: P) -> Self {
        match Self::read_profiles(path) {
            Ok(profiles) => Self { profiles },
            Err(LoggerError::ConfigMissing { path }) => {
                println!("[LOGGER INFO] {} not found, using default config", path);
                Self::default()
            }
            Err(e) => {
                println!("[LOGGER WARNING] {}", e);
                Self::default()
            }
        }
    }

    /// Strict form of [`ConfigStore::load`].
    ///
    /// # Errors
    ///
    /// - [`LoggerError::ConfigMissing`] if nothing exists at `path`
    /// - [`LoggerError::IoOperation`] if the file cannot be read
    /// - [`LoggerError::ConfigParse`] if it is not a `<Loggers>` document
    pub fn read_profiles<P: AsRef<Path>>(path: P) -> Result<ProfileList> {
        let path = path.as_ref();
        let display = path.display().to_string();

        if fs::metadata(path).is_err() {
            return Err(LoggerError::config_missing(display));
        }

        let content = fs::read_to_string(path).map_err(|e| {
            LoggerError::io_operation(
                "reading logger config",
                format!("Failed to read '{}'", display),
                e,
            )
        })?;

        Self::parse_profiles(&content).map_err(|e| match e {
            LoggerError::ConfigParse { message, .. } => LoggerError::config_parse(display, message),
            other => other,
        })
    }

    /// Parse a `<Loggers>` document held in memory.
    ///
    /// # Errors
    ///
    /// [`LoggerError::ConfigParse`] for malformed XML, a root element other
    /// than `<Loggers>`, or values of the wrong type.
    pub fn parse_profiles(xml: &str) -> Result<ProfileList> {
        check_root(xml)?;
        let document: ProfileDocument = quick_xml::de::from_str(xml)
            .map_err(|e| LoggerError::config_parse("<memory>", e.to_string()))?;
        Ok(document.profiles)
    }

    pub fn profiles(&self) -> &[LoggerProfile] {
        &self.profiles
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// See [`resolver::resolve`].
    pub fn resolve(&self, name: &str) -> Result<LoggerProfile> {
        resolver::resolve(&self.profiles, name)
    }
}

/// The first element of the document must be `<Loggers>`.
fn check_root(xml: &str) -> Result<()> {
    let mut reader = Reader::from_str(xml);

    loop {
        match reader.read_event() {
            Ok(Event::Start(element)) | Ok(Event::Empty(element)) => {
                return if element.name().as_ref() == ROOT_ELEMENT {
                    Ok(())
                } else {
                    Err(LoggerError::config_parse(
                        "<memory>",
                        format!(
                            "expected root element <Loggers>, found <{}>",
                            String::from_utf8_lossy(element.name().as_ref())
                        ),
                    ))
                };
            }
            Ok(Event::Eof) => {
                return Err(LoggerError::config_parse("<memory>", "missing root element <Loggers>"));
            }
            Ok(_) => continue,
            Err(e) => return Err(LoggerError::config_parse("<memory>", e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::LogLevel;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<Loggers>
  <!-- primary -->
  <Logger name="Logger">
    <FilePath>./logs/zap.log</FilePath>
    <Level>DebugLevel</Level>
    <MaxSize>64</MaxSize>
    <MaxBackups>5</MaxBackups>
    <MaxAge>7</MaxAge>
    <Compress>false</Compress>
  </Logger>
  <Logger name="Audit">
    <FilePath>./logs/audit.log</FilePath>
    <Level>WarnLevel</Level>
    <MaxSize>128</MaxSize>
    <MaxBackups>10</MaxBackups>
    <MaxAge>90</MaxAge>
    <Compress>true</Compress>
  </Logger>
</Loggers>"#;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_parse_keeps_declaration_order_and_fields() {
        let profiles = ConfigStore::parse_profiles(SAMPLE).unwrap();

        assert_eq!(profiles.len(), 2);
        assert_eq!(
            profiles[0],
            LoggerProfile {
                name: "Logger".to_string(),
                file_path: "./logs/zap.log".to_string(),
                level: LogLevel::Debug,
                max_size_mb: 64,
                max_backups: 5,
                max_age_days: 7,
                compress: false,
            }
        );
        assert_eq!(profiles[1].name, "Audit");
        assert_eq!(profiles[1].level, LogLevel::Warn);
        assert!(profiles[1].compress);
    }

    #[test]
    fn test_unknown_elements_are_ignored() {
        let xml = r#"<Loggers>
            <Logger name="Logger"><Color>blue</Color><MaxSize>1</MaxSize></Logger>
            <Comment>not a logger</Comment>
            <Logger name="Second"/>
        </Loggers>"#;

        let profiles = ConfigStore::parse_profiles(xml).unwrap();
        assert_eq!(profiles.len(), 2);
        assert_eq!(profiles[0].max_size_mb, 1);
        assert_eq!(profiles[1].name, "Second");
    }

    fn single_profile(body: &str) -> LoggerProfile {
        let xml = format!(
            "<Loggers><Logger name=\"Logger\"><FilePath>app.log</FilePath>{}</Logger></Loggers>",
            body
        );
        let mut profiles = ConfigStore::parse_profiles(&xml).unwrap();
        assert_eq!(profiles.len(), 1);
        profiles.remove(0)
    }

    #[test]
    fn test_negative_limits_mean_zero() {
        let profile = single_profile(
            "<MaxSize>-1</MaxSize><MaxBackups>-5</MaxBackups><MaxAge> -30 </MaxAge>",
        );

        assert_eq!(profile.file_path, "app.log");
        assert_eq!(profile.max_size_mb, 0);
        assert_eq!(profile.max_backups, 0);
        assert_eq!(profile.max_age_days, 0);
    }

    #[test]
    fn test_positive_limits_are_kept() {
        let profile = single_profile("<MaxSize> 64 </MaxSize><MaxBackups>3</MaxBackups><MaxAge/>");

        assert_eq!(profile.max_size_mb, 64);
        assert_eq!(profile.max_backups, 3);
        assert_eq!(profile.max_age_days, 0);
    }

    #[test]
    fn test_compress_spellings() {
        for literal in ["1", "t", "T", "TRUE", "true", "True"] {
            let profile = single_profile(&format!("<Compress>{}</Compress>", literal));
            assert!(profile.compress, "{literal} should enable compression");
        }
        for literal in ["0", "f", "F", "FALSE", "false", "False"] {
            let profile = single_profile(&format!("<Compress>{}</Compress>", literal));
            assert!(!profile.compress, "{literal} should disable compression");
        }
    }

    #[test]
    fn test_invalid_compress_is_a_parse_error() {
        let xml = "<Loggers><Logger name=\"Logger\"><Compress>yes</Compress></Logger></Loggers>";
        assert!(matches!(
            ConfigStore::parse_profiles(xml),
            Err(LoggerError::ConfigParse { .. })
        ));
    }

    #[test]
    fn test_negative_limits_keep_configured_profile() {
        let file = write_config(
            r#"<Loggers>
  <Logger name="Logger">
    <FilePath>./custom/app.log</FilePath>
    <Level>ErrorLevel</Level>
    <MaxSize>-1</MaxSize>
    <MaxBackups>-1</MaxBackups>
    <MaxAge>-1</MaxAge>
    <Compress>True</Compress>
  </Logger>
</Loggers>"#,
        );

        let profile = ConfigStore::load(file.path()).resolve("Logger").unwrap();
        assert_eq!(profile.file_path, "./custom/app.log");
        assert_eq!(profile.level, LogLevel::Error);
        assert!(profile.compress);
    }

    #[test]
    fn test_empty_root_yields_empty_list() {
        assert!(ConfigStore::parse_profiles("<Loggers></Loggers>").unwrap().is_empty());
        assert!(ConfigStore::parse_profiles("<Loggers/>").unwrap().is_empty());
    }

    #[test]
    fn test_wrong_root_is_a_parse_error() {
        let err = ConfigStore::parse_profiles("<Appenders><Logger name=\"x\"/></Appenders>").unwrap_err();
        assert!(matches!(err, LoggerError::ConfigParse { .. }));
        assert!(err.to_string().contains("Appenders"));
    }

    #[test]
    fn test_malformed_documents_are_parse_errors() {
        for xml in [
            "",
            "this is not xml",
            "<Loggers><Logger name=\"Logger\"><FilePath>x</Level></Logger></Loggers>",
            "<Loggers><Logger name=\"Logger\">",
            "<Loggers><Logger name=\"Logger\"><MaxSize>lots</MaxSize></Logger></Loggers>",
        ] {
            let result = ConfigStore::parse_profiles(xml);
            assert!(
                matches!(result, Err(LoggerError::ConfigParse { .. })),
                "expected parse error for {:?}, got {:?}",
                xml,
                result
            );
        }
    }

    #[test]
    fn test_read_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = ConfigStore::read_profiles(dir.path().join("zap.xml")).unwrap_err();
        assert!(matches!(err, LoggerError::ConfigMissing { .. }));
    }

    #[test]
    fn test_read_parse_error_names_the_file() {
        let file = write_config("<Loggers><Logger>");
        let err = ConfigStore::read_profiles(file.path()).unwrap_err();

        match err {
            LoggerError::ConfigParse { path, .. } => {
                assert_eq!(path, file.path().display().to_string())
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_load_falls_back_to_empty() {
        let dir = TempDir::new().unwrap();
        assert!(ConfigStore::load(dir.path().join("missing.xml")).is_empty());

        let broken = write_config("<<<");
        assert!(ConfigStore::load(broken.path()).is_empty());
    }

    #[test]
    fn test_load_and_resolve() {
        let file = write_config(SAMPLE);
        let store = ConfigStore::load(file.path());

        assert_eq!(store.profiles().len(), 2);
        assert_eq!(store.resolve("Audit").unwrap().file_path, "./logs/audit.log");
        assert!(matches!(
            store.resolve("X"),
            Err(LoggerError::ProfileNotFound { .. })
        ));
    }

    #[test]
    fn test_empty_store_resolves_to_default() {
        let store = ConfigStore::default();
        assert_eq!(store.resolve("X").unwrap(), LoggerProfile::default());
    }
}
