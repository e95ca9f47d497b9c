//! Console appender implementation

use crate::core::{Appender, ConsoleEncoder, EncoderConfig, LogEntry, Result};
use std::io::{self, Write};

/// Writes encoded records to standard output, or to any writer supplied
/// with [`ConsoleAppender::with_writer`].
pub struct ConsoleAppender {
    writer: Box<dyn Write + Send + Sync>,
    encoder: ConsoleEncoder,
}

impl ConsoleAppender {
    pub fn new() -> Self {
        Self::with_writer(io::stdout())
    }

    /// Send records to `writer` instead of stdout.
    ///
    /// # Example
    ///
    /// ```
    /// use profile_logger::appenders::ConsoleAppender;
    ///
    /// let appender = ConsoleAppender::with_writer(std::io::sink());
    /// ```
    pub fn with_writer<W>(writer: W) -> Self
    where
        W: Write + Send + Sync + 'static,
    {
        Self {
            writer: Box::new(writer),
            encoder: ConsoleEncoder::default(),
        }
    }

    #[must_use]
    pub fn with_encoder(mut self, config: EncoderConfig) -> Self {
        self.encoder = ConsoleEncoder::new(config);
        self
    }
}

impl Default for ConsoleAppender {
    fn default() -> Self {
        Self::new()
    }
}

impl Appender for ConsoleAppender {
    fn append(&mut self, entry: &LogEntry) -> Result<()> {
        let output = self.encoder.encode(entry);
        self.writer.write_all(output.as_bytes())?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}
