//! Centralized configuration for nicelog loggers.
//!
//! `LoggerConfig` provides a single point of configuration for a logger:
//! where records go, how the debug channel is gated, and how values are
//! rendered. It supports both programmatic and environment variable-based
//! configuration.

use std::env;
use std::fmt;
use std::sync::Arc;

use crate::detection::{self, ColorMode};
use crate::gate::{DEFAULT_DEBUG_ENV, DebugGate};
use crate::sink::Sink;

/// Configuration for a [`Logger`](crate::Logger)
#[derive(Clone)]
pub struct LoggerConfig {
    // Sinks
    /// Sink for `debug` records (None = stderr gated by the debug channel)
    pub debug_sink: Option<Arc<dyn Sink>>,
    /// Sink for every other level (None = stdout)
    pub general_sink: Option<Arc<dyn Sink>>,
    /// Gate for the default debug sink (None = patterns from `debug_env`)
    pub gate: Option<Arc<dyn DebugGate>>,
    /// Variable holding debug channel patterns
    pub debug_env: String,

    // Display mode
    /// Override color mode (None = auto-detect)
    pub color_mode: Option<ColorMode>,
    /// Force color output even in non-TTY
    pub force_color: Option<bool>,
    /// Force plain text mode (no styling)
    pub force_plain: bool,

    // Values
    /// Render structured values on one line
    pub compact: bool,
    /// Collapse structured values nested this deep
    pub max_depth: Option<usize>,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            debug_sink: None,
            general_sink: None,
            gate: None,
            debug_env: DEFAULT_DEBUG_ENV.to_string(),
            color_mode: None,
            force_color: None,
            force_plain: false,
            compact: true,
            max_depth: None,
        }
    }
}

impl fmt::Debug for LoggerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggerConfig")
            .field("debug_sink", &self.debug_sink.is_some())
            .field("general_sink", &self.general_sink.is_some())
            .field("gate", &self.gate.is_some())
            .field("debug_env", &self.debug_env)
            .field("color_mode", &self.color_mode)
            .field("force_color", &self.force_color)
            .field("force_plain", &self.force_plain)
            .field("compact", &self.compact)
            .field("max_depth", &self.max_depth)
            .finish()
    }
}

impl LoggerConfig {
    /// Create config with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create config from environment variables
    ///
    /// # Environment Variables
    ///
    /// | Variable | Values | Description |
    /// |----------|--------|-------------|
    /// | `NICELOG_FORCE_COLOR` / `FORCE_COLOR` | (set) | Force colored output |
    /// | `NICELOG_PLAIN` / `NO_COLOR` | (set) | Force plain output |
    /// | `NICELOG_DEBUG_ENV` | variable name | Where debug patterns live (default `DEBUG`) |
    /// | `NICELOG_EXPANDED` | 0/1 | Multi-line structured values |
    /// | `NICELOG_MAX_DEPTH` | integer | Collapse deeper values |
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();

        // Display mode
        if detection::is_color_forced() {
            config.force_color = Some(true);
        } else if detection::is_plain_requested() {
            config.force_plain = true;
        }

        // Debug channel
        if let Ok(name) = env::var("NICELOG_DEBUG_ENV") {
            if !name.is_empty() {
                config.debug_env = name;
            }
        }

        // Values
        if env::var("NICELOG_EXPANDED")
            .map(|v| v != "0" && !v.eq_ignore_ascii_case("false"))
            .unwrap_or(false)
        {
            config.compact = false;
        }
        if let Ok(depth) = env::var("NICELOG_MAX_DEPTH") {
            config.max_depth = depth.trim().parse().ok();
        }

        config
    }

    // ─────────────────────────────────────────────────
    // Builder Methods
    // ─────────────────────────────────────────────────

    /// Send `debug` records to `sink` directly, bypassing the debug gate
    #[must_use]
    pub fn with_debug_sink(mut self, sink: impl Sink + 'static) -> Self {
        self.debug_sink = Some(Arc::new(sink));
        self
    }

    /// Send non-debug records to `sink`
    #[must_use]
    pub fn with_general_sink(mut self, sink: impl Sink + 'static) -> Self {
        self.general_sink = Some(Arc::new(sink));
        self
    }

    /// Gate the default debug sink with `gate`
    #[must_use]
    pub fn with_gate(mut self, gate: impl DebugGate + 'static) -> Self {
        self.gate = Some(Arc::new(gate));
        self
    }

    /// Read debug patterns from a different variable
    #[must_use]
    pub fn with_debug_env(mut self, name: impl Into<String>) -> Self {
        self.debug_env = name.into();
        self
    }

    /// Force color output
    #[must_use]
    pub fn force_color(mut self, force: bool) -> Self {
        self.force_color = Some(force);
        self
    }

    /// Enable plain text mode (no styling)
    #[must_use]
    pub fn plain_mode(mut self) -> Self {
        self.force_plain = true;
        self
    }

    /// Set color mode explicitly
    #[must_use]
    pub fn with_color_mode(mut self, mode: ColorMode) -> Self {
        self.color_mode = Some(mode);
        self
    }

    /// Render structured values on one line (default) or expanded
    #[must_use]
    pub fn with_compact(mut self, compact: bool) -> Self {
        self.compact = compact;
        self
    }

    /// Set maximum structured value depth
    #[must_use]
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    // ─────────────────────────────────────────────────
    // Resolution Methods
    // ─────────────────────────────────────────────────

    /// Resolve the color mode based on config and environment
    #[must_use]
    pub fn resolve_color_mode(&self) -> ColorMode {
        if self.force_plain {
            return ColorMode::Plain;
        }
        if let Some(true) = self.force_color {
            return ColorMode::Styled;
        }
        self.color_mode.unwrap_or_else(ColorMode::detect)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gate::FixedGate;
    use crate::testing::CaptureSink;

    #[test]
    fn test_default_config() {
        let config = LoggerConfig::new();
        assert!(config.debug_sink.is_none());
        assert!(config.general_sink.is_none());
        assert!(config.gate.is_none());
        assert_eq!(config.debug_env, "DEBUG");
        assert!(config.compact);
        assert!(!config.force_plain);
        assert_eq!(config.max_depth, None);
    }

    #[test]
    fn test_builder_pattern() {
        let config = LoggerConfig::new()
            .with_general_sink(CaptureSink::new())
            .with_debug_sink(CaptureSink::new())
            .with_gate(FixedGate::enabled())
            .with_debug_env("APP_DEBUG")
            .with_compact(false)
            .with_max_depth(3);

        assert!(config.general_sink.is_some());
        assert!(config.debug_sink.is_some());
        assert!(config.gate.is_some());
        assert_eq!(config.debug_env, "APP_DEBUG");
        assert!(!config.compact);
        assert_eq!(config.max_depth, Some(3));
    }

    #[test]
    fn test_plain_mode_wins() {
        let config = LoggerConfig::new().force_color(true).plain_mode();
        assert_eq!(config.resolve_color_mode(), ColorMode::Plain);
    }

    #[test]
    fn test_force_color() {
        let config = LoggerConfig::new()
            .with_color_mode(ColorMode::Plain)
            .force_color(true);
        assert_eq!(config.resolve_color_mode(), ColorMode::Styled);
    }

    #[test]
    fn test_explicit_color_mode() {
        let config = LoggerConfig::new().with_color_mode(ColorMode::Plain);
        assert_eq!(config.resolve_color_mode(), ColorMode::Plain);
    }

    #[test]
    fn test_debug_output_hides_sinks() {
        let config = LoggerConfig::new().with_general_sink(CaptureSink::new());
        let debug = format!("{:?}", config);
        assert!(debug.contains("general_sink: true"));
        assert!(debug.contains("debug_sink: false"));
    }
}
