//! Color theme for nicelog records.
//!
//! Colors are referred to by semantic name ([`ColorName`]) and turned into
//! ANSI escapes by the `console` crate only at paint time, so the same theme
//! serves both styled and plain output.

use std::str::FromStr;
use std::sync::OnceLock;

use console::Style;

/// A named terminal color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorName {
    /// No styling at all.
    Reset,
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    /// Bright black, spelled `gray` or `grey`.
    Gray,
}

impl ColorName {
    /// The `console` style for this color, or `None` for [`ColorName::Reset`].
    #[must_use]
    pub fn style(self) -> Option<Style> {
        let style = Style::new();
        let style = match self {
            Self::Reset => return None,
            Self::Black => style.black(),
            Self::Red => style.red(),
            Self::Green => style.green(),
            Self::Yellow => style.yellow(),
            Self::Blue => style.blue(),
            Self::Magenta => style.magenta(),
            Self::Cyan => style.cyan(),
            Self::White => style.white(),
            Self::Gray => style.black().bright(),
        };
        Some(style)
    }

    /// Wrap `text` in this color's ANSI escapes.
    ///
    /// Styling is forced regardless of terminal detection; callers decide
    /// whether to paint at all (see [`ColorMode`](crate::ColorMode)).
    #[must_use]
    pub fn paint(self, text: &str) -> String {
        match self.style() {
            Some(style) => style.force_styling(true).apply_to(text).to_string(),
            None => text.to_string(),
        }
    }
}

/// Error returned when a color name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownColor(pub String);

impl std::fmt::Display for UnknownColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown color name '{}'", self.0)
    }
}

impl std::error::Error for UnknownColor {}

impl FromStr for ColorName {
    type Err = UnknownColor;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name.to_ascii_lowercase().as_str() {
            "reset" | "none" => Ok(Self::Reset),
            "black" => Ok(Self::Black),
            "red" => Ok(Self::Red),
            "green" => Ok(Self::Green),
            "yellow" => Ok(Self::Yellow),
            "blue" => Ok(Self::Blue),
            "magenta" => Ok(Self::Magenta),
            "cyan" => Ok(Self::Cyan),
            "white" => Ok(Self::White),
            "gray" | "grey" => Ok(Self::Gray),
            _ => Err(UnknownColor(name.to_string())),
        }
    }
}

/// Colors used by the pretty-printer, one per rendering category.
///
/// `tag`, `property` and `value` color markup-like values; the remaining
/// categories map onto [`Value`](crate::Value) variants and punctuation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrettyTheme {
    pub tag: ColorName,
    pub property: ColorName,
    pub value: ColorName,
    pub number: ColorName,
    pub string: ColorName,
    pub date: ColorName,
    pub symbol: ColorName,
    pub regex: ColorName,
    pub function: ColorName,
    pub error: ColorName,
    pub boolean: ColorName,
    pub label: ColorName,
    pub bracket: ColorName,
    pub comma: ColorName,
    pub misc: ColorName,
    pub key: ColorName,
}

impl Default for PrettyTheme {
    fn default() -> Self {
        Self {
            tag: ColorName::Cyan,
            property: ColorName::Yellow,
            value: ColorName::Green,
            number: ColorName::Green,
            string: ColorName::Reset,
            date: ColorName::Green,
            symbol: ColorName::Red,
            regex: ColorName::Red,
            function: ColorName::Blue,
            error: ColorName::Red,
            boolean: ColorName::Yellow,
            label: ColorName::Blue,
            bracket: ColorName::Gray,
            comma: ColorName::Gray,
            misc: ColorName::Gray,
            key: ColorName::Cyan,
        }
    }
}

/// The full nicelog theme: record chrome plus the pretty-printer palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NiceTheme {
    /// Time-of-day token.
    pub time: ColorName,
    /// `info` titles.
    pub info: ColorName,
    /// `debug` and `warn` titles.
    pub warning: ColorName,
    /// `error`, `fatal` and `trace` titles.
    pub error: ColorName,
    /// Structured value rendering.
    pub pretty: PrettyTheme,
}

impl Default for NiceTheme {
    fn default() -> Self {
        Self {
            time: ColorName::Gray,
            info: ColorName::Blue,
            warning: ColorName::Yellow,
            error: ColorName::Red,
            pretty: PrettyTheme::default(),
        }
    }
}

static THEME: OnceLock<NiceTheme> = OnceLock::new();

/// Get the global nicelog theme.
#[must_use]
pub fn theme() -> &'static NiceTheme {
    THEME.get_or_init(NiceTheme::default)
}
