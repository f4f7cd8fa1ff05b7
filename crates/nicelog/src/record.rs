//! Record formatting.
//!
//! Turns a title and a list of [`Message`]s into the tokens of one record:
//!
//! ```text
//! <gray time> [<title>] <message 1> <message 2> ...
//! ```
//!
//! Multi-line messages are indented so continuation lines sit under the
//! first line when the record is printed.

use crate::detection::ColorMode;
use crate::error::LogResult;
use crate::message::Message;
use crate::pretty::{PrettyOptions, PrettyPrinter};
use crate::sink::Sink;
use crate::theme::{NiceTheme, theme};
use crate::timestamp::now_local_time;

/// Spaces prefixed to every continuation line of a message.
pub const CONTINUATION_INDENT: usize = 13;

/// Indent continuation lines and trim the result.
///
/// A line gets [`CONTINUATION_INDENT`] spaces unless the whitespace run
/// starting at it reaches a line end: whitespace-only lines, and empty
/// lines followed by another blank line, stay as they are. An empty line
/// directly before content is indented. The final trim strips the prefix
/// (and any other surrounding whitespace) from the first line again.
#[must_use]
pub fn indent_text(text: &str) -> String {
    let pad = " ".repeat(CONTINUATION_INDENT);
    let mut out = String::with_capacity(text.len());
    let mut start = 0;
    for (i, line) in text.split('\n').enumerate() {
        if i > 0 {
            out.push('\n');
        }
        if !blank_run_at(&text[start..]) {
            out.push_str(&pad);
        }
        out.push_str(line);
        start += line.len() + 1;
    }
    out.trim().to_string()
}

/// Whether one or more whitespace characters starting at the head of `rest`
/// end at a line boundary.
fn blank_run_at(rest: &str) -> bool {
    let mut chars = rest.chars();
    match chars.next() {
        Some(c) if c.is_whitespace() => {}
        _ => return false,
    }
    for c in chars {
        if c == '\n' {
            return true;
        }
        if !c.is_whitespace() {
            return false;
        }
    }
    true
}

/// Formats records and hands them to sinks.
#[derive(Debug, Clone)]
pub struct RecordFormatter {
    theme: NiceTheme,
    mode: ColorMode,
    printer: PrettyPrinter,
}

impl RecordFormatter {
    /// Formatter with the global theme, compact highlighted values.
    #[must_use]
    pub fn new(mode: ColorMode) -> Self {
        Self::with_theme(*theme(), mode)
    }

    #[must_use]
    pub fn with_theme(theme: NiceTheme, mode: ColorMode) -> Self {
        Self {
            printer: PrettyPrinter::new(PrettyOptions::default(), theme.pretty, mode),
            theme,
            mode,
        }
    }

    /// Auto-detect color support.
    #[must_use]
    pub fn detect() -> Self {
        Self::new(ColorMode::detect())
    }

    /// Render structured values on one line (`true`, the default) or
    /// expanded over several.
    #[must_use]
    pub fn with_compact(mut self, compact: bool) -> Self {
        let options = PrettyOptions {
            min: compact,
            ..*self.printer.options()
        };
        self.printer = self.printer.with_options(options);
        self
    }

    /// Collapse structured values nested deeper than `depth`.
    #[must_use]
    pub fn with_max_depth(mut self, depth: Option<usize>) -> Self {
        let options = PrettyOptions {
            max_depth: depth,
            ..*self.printer.options()
        };
        self.printer = self.printer.with_options(options);
        self
    }

    #[must_use]
    pub fn mode(&self) -> ColorMode {
        self.mode
    }

    #[must_use]
    pub fn theme(&self) -> &NiceTheme {
        &self.theme
    }

    /// Display text of one message, before indentation.
    #[must_use]
    pub fn display_text(&self, message: &Message) -> String {
        match message {
            Message::Text(text) => text.clone(),
            Message::Structured(value) => self.printer.render(value),
        }
    }

    /// Build the record tokens for an already styled title.
    #[must_use]
    pub fn format_record(&self, title: &str, messages: &[Message]) -> Vec<String> {
        let mut tokens = Vec::with_capacity(messages.len() + 2);
        tokens.push(self.mode.paint(self.theme.time, &now_local_time()));
        tokens.push(format!("[{title}]"));
        tokens.extend(messages.iter().map(|m| indent_text(&self.display_text(m))));
        tokens
    }

    /// Format one record and emit it to `sink`.
    pub fn format_and_emit(
        &self,
        title: &str,
        messages: &[Message],
        sink: &dyn Sink,
    ) -> LogResult<()> {
        sink.emit(&self.format_record(title, messages))
    }
}

impl Default for RecordFormatter {
    fn default() -> Self {
        Self::detect()
    }
}

/// Format one record with a detected formatter and emit it to `sink`.
pub fn format_and_emit(title: &str, messages: &[Message], sink: &dyn Sink) -> LogResult<()> {
    RecordFormatter::detect().format_and_emit(title, messages, sink)
}
