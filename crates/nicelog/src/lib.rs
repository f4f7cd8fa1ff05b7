#![forbid(unsafe_code)]
#![doc = include_str!("../README.md")]

pub mod bridge; // log / tracing facade adapters
pub mod config;
pub mod detection;
pub mod error;
pub mod gate; // Debug channel gate
pub mod logger;
pub mod message;
pub mod pretty; // Structured value rendering
pub mod record; // Record formatting
pub mod sink;
pub mod testing; // Test utilities
pub mod theme;
pub mod timestamp;

pub use bridge::{LogBridge, NiceLayer};
pub use config::LoggerConfig;
pub use detection::{ColorMode, should_enable_color};
pub use error::{LogError, LogResult};
pub use gate::{DebugGate, EnvDebugGate, FixedGate};
pub use logger::{Level, Logger, ParseLevelError, create_logger};
pub use message::Message;
pub use pretty::{PrettyOptions, PrettyPrinter, Value};
pub use record::{CONTINUATION_INDENT, RecordFormatter, format_and_emit, indent_text};
pub use sink::{GatedSink, Sink, WriterSink};
pub use theme::{ColorName, NiceTheme, PrettyTheme, theme};
pub use timestamp::now_local_time;
