//! Structured value model and its pretty-printer.
//!
//! [`Value`] is the display model for anything that is not plain text in a
//! log call. [`PrettyPrinter`] renders it either compactly on one line
//! (`{"port": 5432}`) or expanded with labels and indentation:
//!
//! ```text
//! Object {
//!   "port": 5432,
//! }
//! ```
//!
//! Each token is colored by its category in the [`PrettyTheme`].

use std::fmt::Display;

use chrono::{DateTime, FixedOffset, SecondsFormat, TimeZone, Utc};
use serde::Serialize;

use crate::detection::ColorMode;
use crate::error::LogResult;
use crate::theme::{ColorName, PrettyTheme};

/// A structured value as shown in a log record.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Number(serde_json::Number),
    String(String),
    Array(Vec<Value>),
    /// Key/value pairs. Stored in insertion order, rendered sorted by key.
    Object(Vec<(String, Value)>),
    /// Rendered in UTC as `2024-03-01T12:30:00.005Z`.
    Date(DateTime<FixedOffset>),
    /// An error rendered as `[name: message]`.
    Error { name: String, message: String },
    /// A regular expression pattern rendered as `/pattern/`.
    Regex(String),
    /// A symbolic constant rendered as `Symbol(description)`.
    Symbol(String),
    /// A callable rendered as `[Function name]`.
    Function(Option<String>),
}

impl Value {
    /// Convert any serializable value.
    ///
    /// Fails when serde_json rejects the value, e.g. a map with non-string
    /// keys.
    pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> LogResult<Self> {
        Ok(serde_json::to_value(value)?.into())
    }

    /// Build an error value from a name and message.
    pub fn error(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Error {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Build an error value from a Rust error, folding in its source chain.
    pub fn from_error(err: &(dyn std::error::Error + 'static)) -> Self {
        let mut message = err.to_string();
        let mut source = err.source();
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }
        Self::error("Error", message)
    }

    pub fn symbol(description: impl Into<String>) -> Self {
        Self::Symbol(description.into())
    }

    pub fn function(name: Option<&str>) -> Self {
        Self::Function(name.map(str::to_string))
    }

    /// Build an object from key/value pairs.
    pub fn object<K, V, I>(entries: I) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self::Object(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => Self::Number(n),
            serde_json::Value::String(s) => Self::String(s),
            serde_json::Value::Array(items) => {
                Self::Array(items.into_iter().map(Self::from).collect())
            }
            serde_json::Value::Object(map) => {
                Self::Object(map.into_iter().map(|(k, v)| (k, Self::from(v))).collect())
            }
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

macro_rules! impl_from_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(n: $ty) -> Self {
                    Self::Number(serde_json::Number::from(n))
                }
            }
        )*
    };
}

impl_from_integer!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl From<f64> for Value {
    /// Non-finite floats have no JSON number form and become `null`.
    fn from(n: f64) -> Self {
        serde_json::Number::from_f64(n).map_or(Self::Null, Self::Number)
    }
}

impl From<f32> for Value {
    fn from(n: f32) -> Self {
        Self::from(f64::from(n))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Self::Array(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for Value {
    fn from(at: DateTime<Tz>) -> Self {
        Self::Date(at.fixed_offset())
    }
}

impl From<&regex::Regex> for Value {
    fn from(re: &regex::Regex) -> Self {
        Self::Regex(re.as_str().to_string())
    }
}

/// Rendering options for [`PrettyPrinter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrettyOptions {
    /// Color tokens by category.
    pub highlight: bool,
    /// Single-line rendering without type labels.
    pub min: bool,
    /// Spaces per nesting level in expanded rendering.
    pub indent: usize,
    /// Containers nested this deep collapse to `[Array]` / `[Object]`.
    pub max_depth: Option<usize>,
}

impl Default for PrettyOptions {
    fn default() -> Self {
        Self {
            highlight: true,
            min: true,
            indent: 2,
            max_depth: None,
        }
    }
}

/// Renders [`Value`]s into (optionally colored) text.
#[derive(Debug, Clone)]
pub struct PrettyPrinter {
    options: PrettyOptions,
    theme: PrettyTheme,
    mode: ColorMode,
}

impl PrettyPrinter {
    #[must_use]
    pub fn new(options: PrettyOptions, theme: PrettyTheme, mode: ColorMode) -> Self {
        Self {
            options,
            theme,
            mode,
        }
    }

    #[must_use]
    pub fn options(&self) -> &PrettyOptions {
        &self.options
    }

    #[must_use]
    pub fn with_options(mut self, options: PrettyOptions) -> Self {
        self.options = options;
        self
    }

    /// Render a value to text.
    #[must_use]
    pub fn render(&self, value: &Value) -> String {
        let mut out = String::new();
        self.write_value(&mut out, value, 0);
        out
    }

    fn paint(&self, color: ColorName, text: &str) -> String {
        if self.options.highlight {
            self.mode.paint(color, text)
        } else {
            text.to_string()
        }
    }

    fn push(&self, out: &mut String, color: ColorName, text: impl Display) {
        out.push_str(&self.paint(color, &text.to_string()));
    }

    fn write_value(&self, out: &mut String, value: &Value, depth: usize) {
        let t = &self.theme;
        match value {
            Value::Null => self.push(out, t.misc, "null"),
            Value::Bool(b) => self.push(out, t.boolean, b),
            Value::Number(n) => self.push(out, t.number, n),
            Value::String(s) => self.push(out, t.string, quote(s)),
            Value::Date(at) => {
                let utc = at.with_timezone(&Utc);
                self.push(out, t.date, utc.to_rfc3339_opts(SecondsFormat::Millis, true));
            }
            Value::Error { name, message } if message.is_empty() => {
                self.push(out, t.error, format_args!("[{name}]"));
            }
            Value::Error { name, message } => {
                self.push(out, t.error, format_args!("[{name}: {message}]"));
            }
            Value::Regex(pattern) => self.push(out, t.regex, format_args!("/{pattern}/")),
            Value::Symbol(description) => {
                self.push(out, t.symbol, format_args!("Symbol({description})"));
            }
            Value::Function(name) => self.push(
                out,
                t.function,
                format_args!("[Function {}]", name.as_deref().unwrap_or("anonymous")),
            ),
            Value::Array(items) => {
                let entries: Vec<(Option<&str>, &Value)> = items.iter().map(|v| (None, v)).collect();
                self.write_container(out, Container::ARRAY, &entries, depth);
            }
            Value::Object(pairs) => {
                let mut entries: Vec<(Option<&str>, &Value)> =
                    pairs.iter().map(|(k, v)| (Some(k.as_str()), v)).collect();
                entries.sort_by(|a, b| a.0.cmp(&b.0));
                self.write_container(out, Container::OBJECT, &entries, depth);
            }
        }
    }

    fn write_container(
        &self,
        out: &mut String,
        kind: Container,
        entries: &[(Option<&str>, &Value)],
        depth: usize,
    ) {
        let t = &self.theme;

        if self.options.max_depth.is_some_and(|max| depth >= max) {
            self.push(out, t.label, format_args!("[{}]", kind.label));
            return;
        }

        if !self.options.min {
            self.push(out, t.label, kind.label);
            out.push(' ');
        }
        self.push(out, t.bracket, kind.open);

        if entries.is_empty() {
            self.push(out, t.bracket, kind.close);
            return;
        }

        if self.options.min {
            for (i, (key, value)) in entries.iter().enumerate() {
                if i > 0 {
                    self.push(out, t.comma, ",");
                    out.push(' ');
                }
                self.write_entry(out, *key, value, depth);
            }
        } else {
            let inner = " ".repeat(self.options.indent * (depth + 1));
            out.push('\n');
            for (key, value) in entries {
                out.push_str(&inner);
                self.write_entry(out, *key, value, depth);
                self.push(out, t.comma, ",");
                out.push('\n');
            }
            out.push_str(&" ".repeat(self.options.indent * depth));
        }

        self.push(out, t.bracket, kind.close);
    }

    fn write_entry(&self, out: &mut String, key: Option<&str>, value: &Value, depth: usize) {
        if let Some(key) = key {
            self.push(out, self.theme.key, quote(key));
            out.push_str(": ");
        }
        self.write_value(out, value, depth + 1);
    }
}

#[derive(Clone, Copy)]
struct Container {
    label: &'static str,
    open: &'static str,
    close: &'static str,
}

impl Container {
    const ARRAY: Self = Self {
        label: "Array",
        open: "[",
        close: "]",
    };
    const OBJECT: Self = Self {
        label: "Object",
        open: "{",
        close: "}",
    };
}

fn quote(s: &str) -> String {
    format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\""))
}
