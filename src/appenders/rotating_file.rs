//! Rotating file appender with automatic log rotation
//!
//! The active file is rotated once the next record would push it past the
//! configured size. Rotated files are named `<file>.1`, `<file>.2`, ... with
//! `.1` the most recent, and become `<file>.N.gz` when compression is on.

use crate::core::{Appender, ConsoleEncoder, EncoderConfig, LogEntry, LoggerError, Result};
use fs2::FileExt;
use std::fs::{self, File, OpenOptions};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

/// Size used when a profile leaves the limit at zero.
pub const DEFAULT_MAX_SIZE_MB: u64 = 100;

const BYTES_PER_MB: u64 = 1024 * 1024;
const SECONDS_PER_DAY: u64 = 24 * 60 * 60;

/// Configuration for rotating file appender
///
/// # Examples
///
/// ```
/// use profile_logger::appenders::RotationPolicy;
///
/// // 512 MB per file, 30 backups, expire after 10 days, gzip rotated files
/// let policy = RotationPolicy::new()
///     .with_max_size_mb(512)
///     .with_max_backups(30)
///     .with_max_age_days(10)
///     .with_compression(true);
/// assert_eq!(policy.max_bytes, 512 * 1024 * 1024);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RotationPolicy {
    /// Maximum size of the active file in bytes
    pub max_bytes: u64,
    /// Maximum number of rotated files to keep; 0 keeps all
    pub max_backups: usize,
    /// Rotated files older than this are deleted; `None` never expires
    pub max_age: Option<Duration>,
    /// Whether to gzip rotated files
    pub compress: bool,
}

impl Default for RotationPolicy {
    fn default() -> Self {
        Self {
            max_bytes: DEFAULT_MAX_SIZE_MB * BYTES_PER_MB,
            max_backups: 0,
            max_age: None,
            compress: false,
        }
    }
}

impl RotationPolicy {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set maximum file size in bytes
    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_max_size(mut self, bytes: u64) -> Self {
        self.max_bytes = bytes;
        self
    }

    /// Set maximum file size in megabytes; 0 selects [`DEFAULT_MAX_SIZE_MB`]
    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_max_size_mb(mut self, megabytes: u64) -> Self {
        let megabytes = if megabytes == 0 {
            DEFAULT_MAX_SIZE_MB
        } else {
            megabytes
        };
        self.max_bytes = megabytes.saturating_mul(BYTES_PER_MB);
        self
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_max_backups(mut self, count: usize) -> Self {
        self.max_backups = count;
        self
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_max_age(mut self, age: Duration) -> Self {
        self.max_age = Some(age);
        self
    }

    /// Set the expiry age in days; 0 disables expiry
    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_max_age_days(mut self, days: u64) -> Self {
        self.max_age = if days == 0 {
            None
        } else {
            Some(Duration::from_secs(days.saturating_mul(SECONDS_PER_DAY)))
        };
        self
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_compression(mut self, enabled: bool) -> Self {
        self.compress = enabled;
        self
    }
}

/// Size-rotated file appender.
///
/// Holds an exclusive advisory lock on the active file for as long as it
/// is open, so two appenders cannot share a path.
///
/// # Examples
///
/// ```no_run
/// use profile_logger::appenders::{RotatingFileAppender, RotationPolicy};
///
/// let policy = RotationPolicy::new()
///     .with_max_size_mb(50)
///     .with_max_backups(7)
///     .with_compression(true);
/// let appender = RotatingFileAppender::with_policy("./logs/app.log", policy).unwrap();
/// ```
pub struct RotatingFileAppender {
    base_path: PathBuf,
    policy: RotationPolicy,
    writer: Option<BufWriter<File>>,
    current_size: u64,
    encoder: ConsoleEncoder,
}

impl RotatingFileAppender {
    /// Create a new rotating file appender with the default policy
    ///
    /// # Errors
    ///
    /// Returns error if file cannot be created, opened or locked
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::with_policy(path, RotationPolicy::default())
    }

    /// Create a new rotating file appender with custom policy
    ///
    /// # Errors
    ///
    /// Returns error if file cannot be created, opened or locked
    pub fn with_policy<P: AsRef<Path>>(path: P, policy: RotationPolicy) -> Result<Self> {
        let base_path = path.as_ref().to_path_buf();

        if let Some(parent) = base_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| {
                    LoggerError::io_operation(
                        "create log directory",
                        format!("Failed to create directory '{}'", parent.display()),
                        e,
                    )
                })?;
            }
        }

        let (file, current_size) = Self::open_locked(&base_path)?;

        let appender = Self {
            base_path,
            policy,
            writer: Some(BufWriter::new(file)),
            current_size,
            encoder: ConsoleEncoder::default(),
        };
        appender.remove_expired_backups();
        Ok(appender)
    }

    #[must_use]
    pub fn with_encoder(mut self, config: EncoderConfig) -> Self {
        self.encoder = ConsoleEncoder::new(config);
        self
    }

    /// Open `path` for appending and take the exclusive lock.
    fn open_locked(path: &Path) -> Result<(File, u64)> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| {
                LoggerError::file_appender(
                    path.display().to_string(),
                    format!("Failed to open: {}", e),
                )
            })?;

        FileExt::try_lock_exclusive(&file)
            .map_err(|_| LoggerError::file_lock(path.display().to_string()))?;

        let size = file
            .metadata()
            .map_err(|e| {
                LoggerError::file_appender(
                    path.display().to_string(),
                    format!("Cannot access file metadata: {}", e),
                )
            })?
            .len();

        Ok((file, size))
    }

    fn should_rotate(&self, incoming: u64) -> bool {
        self.current_size > 0 && self.current_size.saturating_add(incoming) > self.policy.max_bytes
    }

    /// Perform log rotation
    fn rotate(&mut self) -> Result<()> {
        // Dropping the writer closes the file and releases the lock.
        if let Some(mut writer) = self.writer.take() {
            writer.flush().map_err(|e| {
                LoggerError::file_rotation(
                    self.base_path.display().to_string(),
                    format!("Failed to flush before rotation: {}", e),
                )
            })?;
        }

        // Shift every backup up one index; nothing is pruned until the
        // shift and the rename of the active file have succeeded.
        let highest = self.highest_backup_index();
        for index in (1..=highest).rev() {
            self.rename_backup(index, index + 1)?;
        }

        let first_backup = self.backup_path(1);
        if self.base_path.exists() {
            fs::rename(&self.base_path, &first_backup).map_err(|e| {
                LoggerError::file_rotation(
                    self.base_path.display().to_string(),
                    format!("Failed to rotate current log file: {}", e),
                )
            })?;

            if self.policy.compress {
                self.compress_file(&first_backup)?;
            }
        }

        self.remove_excess_backups();

        let (file, size) = Self::open_locked(&self.base_path)?;
        self.writer = Some(BufWriter::new(file));
        self.current_size = size;

        self.remove_expired_backups();
        Ok(())
    }

    /// Get backup file path for given index
    fn backup_path(&self, index: usize) -> PathBuf {
        let mut path = self.base_path.clone();
        path.set_file_name(format!("{}.{}", self.file_name(), index));
        path
    }

    fn compressed_backup_path(&self, index: usize) -> PathBuf {
        let mut path = self.base_path.clone();
        path.set_file_name(format!("{}.{}.gz", self.file_name(), index));
        path
    }

    fn file_name(&self) -> &str {
        self.base_path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("app.log")
    }

    fn log_dir(&self) -> &Path {
        match self.base_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }

    /// Highest `N` among existing `<file>.N` / `<file>.N.gz`, or 0.
    fn highest_backup_index(&self) -> usize {
        let prefix = format!("{}.", self.file_name());
        let entries = match fs::read_dir(self.log_dir()) {
            Ok(entries) => entries,
            Err(_) => return 0,
        };

        entries
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| {
                let name = entry.file_name().to_str()?.to_string();
                let rest = name.strip_prefix(&prefix)?;
                let digits = rest.strip_suffix(".gz").unwrap_or(rest);
                digits.parse::<usize>().ok()
            })
            .max()
            .unwrap_or(0)
    }

    fn rename_backup(&self, from: usize, to: usize) -> Result<()> {
        let pairs = [
            (self.backup_path(from), self.backup_path(to)),
            (self.compressed_backup_path(from), self.compressed_backup_path(to)),
        ];

        for (old_path, new_path) in pairs {
            if !old_path.exists() {
                continue;
            }
            if let Err(first) = fs::rename(&old_path, &new_path) {
                // Some platforms refuse to rename over an existing file.
                if new_path.exists() {
                    let _ = fs::remove_file(&new_path);
                }
                fs::rename(&old_path, &new_path).map_err(|e| {
                    LoggerError::file_rotation(
                        old_path.display().to_string(),
                        format!("Failed to rotate backup file: {} (first attempt: {})", e, first),
                    )
                })?;
            }
        }
        Ok(())
    }

    fn remove_backup(&self, index: usize) {
        for path in [self.backup_path(index), self.compressed_backup_path(index)] {
            if path.exists() {
                if let Err(e) = fs::remove_file(&path) {
                    eprintln!("[LOGGER WARNING] Failed to remove old backup {}: {}", path.display(), e);
                }
            }
        }
    }

    /// Drop backups with an index past `max_backups`.
    fn remove_excess_backups(&self) {
        let max_backups = self.policy.max_backups;
        if max_backups == 0 {
            return;
        }
        for index in (max_backups + 1)..=self.highest_backup_index() {
            self.remove_backup(index);
        }
    }

    fn remove_expired_backups(&self) {
        let cutoff = match self
            .policy
            .max_age
            .and_then(|age| SystemTime::now().checked_sub(age))
        {
            Some(cutoff) => cutoff,
            None => return,
        };

        for index in 1..=self.highest_backup_index() {
            for path in [self.backup_path(index), self.compressed_backup_path(index)] {
                let expired = fs::metadata(&path)
                    .and_then(|meta| meta.modified())
                    .map(|modified| modified < cutoff)
                    .unwrap_or(false);

                if expired {
                    if let Err(e) = fs::remove_file(&path) {
                        eprintln!("[LOGGER WARNING] Failed to remove expired backup {}: {}", path.display(), e);
                    }
                }
            }
        }
    }

    /// Gzip `path` to `path.gz`, removing the original only once the
    /// compressed file is complete.
    fn compress_file(&self, path: &Path) -> Result<()> {
        let mut gz_path = path.as_os_str().to_owned();
        gz_path.push(".gz");
        let gz_path = PathBuf::from(gz_path);
        let mut temp_path = gz_path.as_os_str().to_owned();
        temp_path.push(".tmp");
        let temp_path = PathBuf::from(temp_path);

        let input = File::open(path).map_err(|e| {
            LoggerError::io_operation(
                "compress log file",
                format!("Failed to open file for compression: {}", path.display()),
                e,
            )
        })?;
        let mut reader = BufReader::with_capacity(64 * 1024, input);

        let output = File::create(&temp_path).map_err(|e| {
            LoggerError::io_operation(
                "compress log file",
                format!("Failed to create temporary compressed file: {}", temp_path.display()),
                e,
            )
        })?;
        let mut encoder = flate2::write::GzEncoder::new(
            BufWriter::with_capacity(64 * 1024, output),
            flate2::Compression::default(),
        );

        let finished = std::io::copy(&mut reader, &mut encoder)
            .and_then(|_| encoder.finish())
            .and_then(|mut inner| inner.flush());
        if let Err(e) = finished {
            let _ = fs::remove_file(&temp_path);
            return Err(LoggerError::io_operation(
                "compress log file",
                format!("Failed to compress {}", path.display()),
                e,
            ));
        }

        fs::rename(&temp_path, &gz_path).map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            LoggerError::io_operation(
                "compress log file",
                format!("Failed to rename compressed file to: {}", gz_path.display()),
                e,
            )
        })?;

        if let Err(e) = fs::remove_file(path) {
            eprintln!(
                "[LOGGER WARNING] Compression succeeded but failed to remove original file {}: {}",
                path.display(),
                e
            );
        }

        Ok(())
    }

    #[must_use]
    pub fn current_size(&self) -> u64 {
        self.current_size
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.base_path
    }

    #[must_use]
    pub fn policy(&self) -> &RotationPolicy {
        &self.policy
    }
}

impl Appender for RotatingFileAppender {
    fn name(&self) -> &str {
        "rotating_file"
    }

    fn append(&mut self, entry: &LogEntry) -> Result<()> {
        let formatted = self.encoder.encode(entry);
        let bytes = formatted.len() as u64;

        if self.should_rotate(bytes) {
            if let Err(e) = self.rotate() {
                eprintln!(
                    "[LOGGER WARNING] Log rotation failed: {}. Continuing with current file.",
                    e
                );

                if self.writer.is_none() {
                    let (file, size) = Self::open_locked(&self.base_path).map_err(|reopen_err| {
                        eprintln!(
                            "[LOGGER ERROR] Failed to reopen log file after rotation failure: {}",
                            reopen_err
                        );
                        e
                    })?;
                    self.writer = Some(BufWriter::new(file));
                    self.current_size = size;
                }

                // Let the file grow past the limit rather than retry on every record.
                self.current_size = 0;
            }
        }

        let writer = self
            .writer
            .as_mut()
            .ok_or_else(|| LoggerError::file_appender(self.base_path.display().to_string(), "Writer not initialized"))?;

        // Records go out synchronously; nothing waits in the buffer.
        writer
            .write_all(formatted.as_bytes())
            .and_then(|_| writer.flush())
            .map_err(|e| {
                LoggerError::file_appender(
                    self.base_path.display().to_string(),
                    format!("Failed to write log entry: {}", e),
                )
            })?;
        self.current_size += bytes;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        if let Some(ref mut writer) = self.writer {
            writer.flush().map_err(|e| {
                LoggerError::file_appender(
                    self.base_path.display().to_string(),
                    format!("Failed to flush: {}", e),
                )
            })?;
        }
        Ok(())
    }
}

impl Drop for RotatingFileAppender {
    fn drop(&mut self) {
        if let Some(mut writer) = self.writer.take() {
            let _ = writer.flush();
        }
    }
}
