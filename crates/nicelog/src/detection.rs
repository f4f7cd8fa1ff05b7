//! Styled/plain output detection
//!
//! Determines whether records should carry ANSI colors based on the
//! environment and the terminal attached to stdout.

use crate::theme::ColorName;

/// Whether output is colorized
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    /// Plain text, no escape sequences
    Plain,
    /// ANSI-colored text
    #[default]
    Styled,
}

impl ColorMode {
    /// Auto-detect the color mode from environment
    #[must_use]
    pub fn detect() -> Self {
        if should_enable_color() {
            Self::Styled
        } else {
            Self::Plain
        }
    }

    #[must_use]
    pub fn is_styled(&self) -> bool {
        matches!(self, Self::Styled)
    }

    #[must_use]
    pub fn is_plain(&self) -> bool {
        matches!(self, Self::Plain)
    }

    /// Paint `text` with `color` when styled, pass it through when plain.
    #[must_use]
    pub fn paint(&self, color: ColorName, text: &str) -> String {
        match self {
            Self::Styled => color.paint(text),
            Self::Plain => text.to_string(),
        }
    }
}

/// Determine if plain output was explicitly requested
#[must_use]
pub fn is_plain_requested() -> bool {
    std::env::var_os("NO_COLOR").is_some() || std::env::var_os("NICELOG_PLAIN").is_some()
}

/// Determine if colors were explicitly forced on
#[must_use]
pub fn is_color_forced() -> bool {
    if std::env::var_os("NICELOG_FORCE_COLOR").is_some() {
        return true;
    }
    // FORCE_COLOR=0 is the conventional way of turning the override off
    std::env::var("FORCE_COLOR")
        .map(|v| v != "0" && !v.eq_ignore_ascii_case("false"))
        .unwrap_or(false)
}

/// Determine if colored output should be enabled
#[must_use]
pub fn should_enable_color() -> bool {
    // Explicit enable always wins
    if is_color_forced() {
        return true;
    }

    if is_plain_requested() {
        return false;
    }

    // Otherwise follow the terminal attached to stdout
    console::colors_enabled()
}
