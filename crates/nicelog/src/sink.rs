//! Record destinations.
//!
//! A [`Sink`] receives the tokens of one record (time, bracketed title,
//! messages) as separate strings and decides how to join them.

use std::fmt;
use std::io::{self, Write};
use std::sync::{Arc, Mutex, PoisonError};

use crate::error::LogResult;
use crate::gate::DebugGate;

/// Destination for formatted records.
pub trait Sink: Send + Sync {
    /// Emit one record.
    fn emit(&self, tokens: &[String]) -> LogResult<()>;
}

impl<F> Sink for F
where
    F: Fn(&[String]) -> LogResult<()> + Send + Sync,
{
    fn emit(&self, tokens: &[String]) -> LogResult<()> {
        self(tokens)
    }
}

/// Writes each record as one space-joined, newline-terminated line.
pub struct WriterSink {
    writer: Mutex<Box<dyn Write + Send>>,
}

impl WriterSink {
    /// Wrap any writer.
    pub fn new<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
        }
    }

    /// Line writer on standard output.
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }

    /// Line writer on standard error.
    #[must_use]
    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }
}

impl fmt::Debug for WriterSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WriterSink").finish_non_exhaustive()
    }
}

impl Sink for WriterSink {
    fn emit(&self, tokens: &[String]) -> LogResult<()> {
        let line = tokens.join(" ");
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        writeln!(writer, "{line}")?;
        writer.flush()?;
        Ok(())
    }
}

/// Forwards records only while its channel is enabled.
pub struct GatedSink {
    channel: String,
    gate: Arc<dyn DebugGate>,
    inner: Arc<dyn Sink>,
}

impl GatedSink {
    pub fn new(channel: impl Into<String>, gate: Arc<dyn DebugGate>, inner: Arc<dyn Sink>) -> Self {
        Self {
            channel: channel.into(),
            gate,
            inner,
        }
    }

    #[must_use]
    pub fn channel(&self) -> &str {
        &self.channel
    }

    /// Whether records would currently pass.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.gate.is_channel_enabled(&self.channel)
    }
}

impl fmt::Debug for GatedSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GatedSink")
            .field("channel", &self.channel)
            .field("open", &self.is_open())
            .finish()
    }
}

impl Sink for GatedSink {
    fn emit(&self, tokens: &[String]) -> LogResult<()> {
        if !self.is_open() {
            return Ok(());
        }
        self.inner.emit(tokens)
    }
}
