//! Titled loggers.
//!
//! A [`Logger`] binds a title to two sinks and exposes one method per
//! level. Every method decorates the title for its level and formats a
//! single record:
//!
//! | Method | Title | Color | Sink |
//! |--------|-------|-------|------|
//! | `debug` | `DEBUG <title>` | warning | debug |
//! | `info` | `<title>` | info | general |
//! | `warn` | `WARNING <title>` | warning | general |
//! | `error` | `ERROR <title>` | error | general |
//! | `fatal` | `========= FATAL <title> =========` | error | general |
//! | `trace` | `TRACE <title>` | error | general |
//!
//! # Usage
//!
//! ```ignore
//! use nicelog::{create_logger, messages};
//! use serde_json::json;
//!
//! let log = create_logger("DB");
//! log.info(messages!["connected", json!({"port": 5432})])?;
//! log.debug(["only when DEBUG matches DB"])?;
//! ```

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::config::LoggerConfig;
use crate::error::LogResult;
use crate::gate::EnvDebugGate;
use crate::message::Message;
use crate::record::RecordFormatter;
use crate::sink::{GatedSink, Sink, WriterSink};
use crate::theme::{ColorName, NiceTheme};

/// Log level: selects the title decoration and the sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
    Debug,
    Info,
    Warn,
    Error,
    Fatal,
    Trace,
}

impl Level {
    pub const ALL: [Level; 6] = [
        Level::Debug,
        Level::Info,
        Level::Warn,
        Level::Error,
        Level::Fatal,
        Level::Trace,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
            Self::Fatal => "fatal",
            Self::Trace => "trace",
        }
    }

    /// Decorate `title` for this level (uncolored).
    #[must_use]
    pub fn decorate(self, title: &str) -> String {
        match self {
            Self::Debug => format!("DEBUG {title}"),
            Self::Info => title.to_string(),
            Self::Warn => format!("WARNING {title}"),
            Self::Error => format!("ERROR {title}"),
            Self::Fatal => format!("========= FATAL {title} ========="),
            Self::Trace => format!("TRACE {title}"),
        }
    }

    /// Title color for this level.
    #[must_use]
    pub fn color(self, theme: &NiceTheme) -> ColorName {
        match self {
            Self::Info => theme.info,
            Self::Debug | Self::Warn => theme.warning,
            Self::Error | Self::Fatal | Self::Trace => theme.error,
        }
    }

    /// Whether records of this level go to the debug sink.
    #[must_use]
    pub fn uses_debug_sink(self) -> bool {
        matches!(self, Self::Debug)
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a level name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseLevelError(String);

impl fmt::Display for ParseLevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown level '{}' (expected debug, info, warn, error, fatal or trace)",
            self.0
        )
    }
}

impl std::error::Error for ParseLevelError {}

impl FromStr for Level {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            "fatal" => Ok(Self::Fatal),
            "trace" => Ok(Self::Trace),
            _ => Err(ParseLevelError(s.to_string())),
        }
    }
}

/// A named logger.
///
/// Immutable once built; clones share sinks.
#[derive(Clone)]
pub struct Logger {
    title: Arc<str>,
    debug_sink: Arc<dyn Sink>,
    general_sink: Arc<dyn Sink>,
    formatter: RecordFormatter,
}

impl Logger {
    /// Build a logger from an explicit configuration.
    ///
    /// Unset sinks fall back to stdout (general) and to stderr gated by the
    /// debug channel named after `title` (debug).
    pub fn new(title: impl Into<String>, config: LoggerConfig) -> Self {
        let title: Arc<str> = Arc::from(title.into());
        let mode = config.resolve_color_mode();
        let formatter = RecordFormatter::new(mode)
            .with_compact(config.compact)
            .with_max_depth(config.max_depth);

        let general_sink = config
            .general_sink
            .unwrap_or_else(|| Arc::new(WriterSink::stdout()));
        let debug_sink = config.debug_sink.unwrap_or_else(|| {
            let gate = config
                .gate
                .unwrap_or_else(|| Arc::new(EnvDebugGate::from_var(&config.debug_env)));
            Arc::new(GatedSink::new(
                title.to_string(),
                gate,
                Arc::new(WriterSink::stderr()),
            ))
        });

        Self {
            title,
            debug_sink,
            general_sink,
            formatter,
        }
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn formatter(&self) -> &RecordFormatter {
        &self.formatter
    }

    /// The level-decorated, colored title for `level`.
    #[must_use]
    pub fn styled_title(&self, level: Level) -> String {
        let color = level.color(self.formatter.theme());
        self.formatter
            .mode()
            .paint(color, &level.decorate(&self.title))
    }

    /// Emit one record at `level`.
    pub fn log<I>(&self, level: Level, messages: I) -> LogResult<()>
    where
        I: IntoIterator,
        I::Item: Into<Message>,
    {
        let messages: Vec<Message> = messages.into_iter().map(Into::into).collect();
        let sink = if level.uses_debug_sink() {
            &self.debug_sink
        } else {
            &self.general_sink
        };
        self.formatter
            .format_and_emit(&self.styled_title(level), &messages, &**sink)
    }

    pub fn debug<I>(&self, messages: I) -> LogResult<()>
    where
        I: IntoIterator,
        I::Item: Into<Message>,
    {
        self.log(Level::Debug, messages)
    }

    pub fn info<I>(&self, messages: I) -> LogResult<()>
    where
        I: IntoIterator,
        I::Item: Into<Message>,
    {
        self.log(Level::Info, messages)
    }

    pub fn warn<I>(&self, messages: I) -> LogResult<()>
    where
        I: IntoIterator,
        I::Item: Into<Message>,
    {
        self.log(Level::Warn, messages)
    }

    pub fn error<I>(&self, messages: I) -> LogResult<()>
    where
        I: IntoIterator,
        I::Item: Into<Message>,
    {
        self.log(Level::Error, messages)
    }

    pub fn fatal<I>(&self, messages: I) -> LogResult<()>
    where
        I: IntoIterator,
        I::Item: Into<Message>,
    {
        self.log(Level::Fatal, messages)
    }

    pub fn trace<I>(&self, messages: I) -> LogResult<()>
    where
        I: IntoIterator,
        I::Item: Into<Message>,
    {
        self.log(Level::Trace, messages)
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("title", &self.title)
            .field("formatter", &self.formatter)
            .finish_non_exhaustive()
    }
}

/// Create a logger configured from the process environment.
///
/// `info`/`warn`/`error`/`fatal`/`trace` print to stdout; `debug` prints to
/// stderr only when the `DEBUG` patterns enable `title`.
pub fn create_logger(title: impl Into<String>) -> Logger {
    Logger::new(title, LoggerConfig::from_env())
}
