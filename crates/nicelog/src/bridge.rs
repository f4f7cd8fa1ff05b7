//! Facade integration.
//!
//! Routes records from the `log` and `tracing` facades through a
//! [`Logger`], so libraries that log through a facade share its output:
//!
//! - [`LogBridge`] - a `log` crate logger implementation
//! - [`NiceLayer`] - a `tracing_subscriber` layer
//!
//! Facade levels map onto the logger methods of the same name; facade
//! `debug` records therefore go through the debug channel gate.
//!
//! # Usage
//!
//! ```ignore
//! use nicelog::bridge::{LogBridge, NiceLayer};
//! use nicelog::create_logger;
//!
//! LogBridge::new(create_logger("app"), log::LevelFilter::Info).init()?;
//! // or
//! NiceLayer::new(create_logger("app")).init()?;
//! ```

use std::fmt;

use log::{LevelFilter, Log, Metadata, Record};
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, Layer};
use tracing_subscriber::prelude::*;
use tracing_subscriber::registry::LookupSpan;

use crate::error::{LogError, LogResult};
use crate::logger::{Level, Logger};
use crate::message::Message;
use crate::pretty::Value;

impl From<log::Level> for Level {
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Error => Self::Error,
            log::Level::Warn => Self::Warn,
            log::Level::Info => Self::Info,
            log::Level::Debug => Self::Debug,
            log::Level::Trace => Self::Trace,
        }
    }
}

impl From<tracing::Level> for Level {
    fn from(level: tracing::Level) -> Self {
        if level == tracing::Level::ERROR {
            Self::Error
        } else if level == tracing::Level::WARN {
            Self::Warn
        } else if level == tracing::Level::INFO {
            Self::Info
        } else if level == tracing::Level::DEBUG {
            Self::Debug
        } else {
            Self::Trace
        }
    }
}

/// A `log` crate logger that writes through a [`Logger`].
pub struct LogBridge {
    logger: Logger,
    max_level: LevelFilter,
}

impl LogBridge {
    #[must_use]
    pub fn new(logger: Logger, max_level: LevelFilter) -> Self {
        Self { logger, max_level }
    }

    /// Install as the global `log` logger.
    ///
    /// Returns an error if a logger has already been set.
    pub fn init(self) -> LogResult<()> {
        let level = self.max_level;
        log::set_boxed_logger(Box::new(self)).map_err(LogError::install)?;
        log::set_max_level(level);
        Ok(())
    }
}

impl fmt::Debug for LogBridge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogBridge")
            .field("title", &self.logger.title())
            .field("max_level", &self.max_level)
            .finish()
    }
}

impl Log for LogBridge {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.max_level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let message = record.args().to_string();
        // Log::log has no error channel
        if let Err(err) = self.logger.log(record.level().into(), [message]) {
            eprintln!("nicelog: {err}");
        }
    }

    fn flush(&self) {}
}

/// A tracing layer that writes events through a [`Logger`].
///
/// The event message becomes the first message argument; the remaining
/// fields (plus the span path, when inside spans) follow as one structured
/// object.
pub struct NiceLayer {
    logger: Logger,
}

impl NiceLayer {
    #[must_use]
    pub fn new(logger: Logger) -> Self {
        Self { logger }
    }

    /// Install a registry with this layer as the global default subscriber.
    pub fn init(self) -> LogResult<()> {
        tracing::subscriber::set_global_default(tracing_subscriber::registry().with(self))
            .map_err(LogError::install)
    }
}

impl fmt::Debug for NiceLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NiceLayer")
            .field("title", &self.logger.title())
            .finish()
    }
}

#[derive(Default)]
struct FieldCollector {
    message: Option<String>,
    fields: Vec<(String, Value)>,
}

impl FieldCollector {
    fn record_value(&mut self, field: &Field, value: Value) {
        if field.name() == "message" && self.message.is_none() {
            self.message = Some(match value {
                Value::String(text) => text,
                other => format!("{other:?}"),
            });
        } else {
            self.fields.push((field.name().to_string(), value));
        }
    }
}

impl Visit for FieldCollector {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.record_value(field, Value::String(format!("{value:?}")));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.record_value(field, Value::from(value));
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.record_value(field, Value::Bool(value));
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record_value(field, Value::from(value));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.record_value(field, Value::from(value));
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        self.record_value(field, Value::from(value));
    }

    fn record_error(&mut self, field: &Field, value: &(dyn std::error::Error + 'static)) {
        self.record_value(field, Value::from_error(value));
    }
}

impl<S> Layer<S> for NiceLayer
where
    S: Subscriber + for<'lookup> LookupSpan<'lookup>,
{
    fn on_event(&self, event: &Event<'_>, ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let mut collector = FieldCollector::default();
        event.record(&mut collector);

        if let Some(scope) = ctx.event_scope(event) {
            let spans: Vec<String> = scope.from_root().map(|span| span.name().to_string()).collect();
            if !spans.is_empty() {
                collector
                    .fields
                    .push(("span".to_string(), Value::String(spans.join("::"))));
            }
        }

        let mut messages = vec![Message::Text(
            collector
                .message
                .unwrap_or_else(|| metadata.name().to_string()),
        )];
        if !collector.fields.is_empty() {
            messages.push(Message::Structured(Value::Object(collector.fields)));
        }

        if let Err(err) = self.logger.log((*metadata.level()).into(), messages) {
            eprintln!("nicelog: {err}");
        }
    }
}
