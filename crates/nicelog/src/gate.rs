//! Debug-channel gate.
//!
//! `debug` records are only emitted when the logger's channel (its title) is
//! enabled. [`EnvDebugGate`] reads the conventional `DEBUG` pattern list:
//!
//! | Pattern | Meaning |
//! |---------|---------|
//! | `db` | enable the `db` channel |
//! | `db,http` or `db http` | enable several channels |
//! | `app:*` | `*` matches any run of characters |
//! | `*,-noisy` | a leading `-` excludes; exclusions win |

use std::env;

use regex::Regex;

/// Environment variable read by [`EnvDebugGate::from_env`].
pub const DEFAULT_DEBUG_ENV: &str = "DEBUG";

/// Decides whether a debug channel is enabled.
pub trait DebugGate: Send + Sync {
    fn is_channel_enabled(&self, channel: &str) -> bool;
}

impl<F> DebugGate for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn is_channel_enabled(&self, channel: &str) -> bool {
        self(channel)
    }
}

/// A gate that answers the same for every channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedGate(bool);

impl FixedGate {
    #[must_use]
    pub fn enabled() -> Self {
        Self(true)
    }

    #[must_use]
    pub fn disabled() -> Self {
        Self(false)
    }
}

impl DebugGate for FixedGate {
    fn is_channel_enabled(&self, _channel: &str) -> bool {
        self.0
    }
}

/// Gate driven by a `DEBUG`-style pattern list.
#[derive(Debug, Clone)]
pub struct EnvDebugGate {
    patterns: String,
    names: Vec<Regex>,
    skips: Vec<Regex>,
}

impl EnvDebugGate {
    /// Parse a pattern list.
    #[must_use]
    pub fn parse(patterns: &str) -> Self {
        let mut names = Vec::new();
        let mut skips = Vec::new();

        for entry in patterns.split(|c: char| c == ',' || c.is_whitespace()) {
            if entry.is_empty() {
                continue;
            }
            match entry.strip_prefix('-') {
                Some(excluded) => skips.extend(pattern_regex(excluded)),
                None => names.extend(pattern_regex(entry)),
            }
        }

        Self {
            patterns: patterns.to_string(),
            names,
            skips,
        }
    }

    /// Read patterns from `DEBUG`.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_var(DEFAULT_DEBUG_ENV)
    }

    /// Read patterns from the named variable; unset means nothing is enabled.
    #[must_use]
    pub fn from_var(name: &str) -> Self {
        Self::parse(&env::var(name).unwrap_or_default())
    }

    /// The pattern list this gate was built from.
    #[must_use]
    pub fn patterns(&self) -> &str {
        &self.patterns
    }
}

impl DebugGate for EnvDebugGate {
    fn is_channel_enabled(&self, channel: &str) -> bool {
        if self.skips.iter().any(|re| re.is_match(channel)) {
            return false;
        }
        self.names.iter().any(|re| re.is_match(channel))
    }
}

fn pattern_regex(pattern: &str) -> Option<Regex> {
    let body = regex::escape(pattern).replace(r"\*", ".*?");
    Regex::new(&format!("^{body}$")).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_patterns_enable_nothing() {
        let gate = EnvDebugGate::parse("");
        assert!(!gate.is_channel_enabled("db"));
        assert!(!gate.is_channel_enabled(""));
    }

    #[test]
    fn test_exact_names() {
        let gate = EnvDebugGate::parse("db,http");
        assert!(gate.is_channel_enabled("db"));
        assert!(gate.is_channel_enabled("http"));
        assert!(!gate.is_channel_enabled("dbx"));
        assert!(!gate.is_channel_enabled("cache"));
    }

    #[test]
    fn test_whitespace_separators() {
        let gate = EnvDebugGate::parse("  db   http ,, cache ");
        assert!(gate.is_channel_enabled("db"));
        assert!(gate.is_channel_enabled("http"));
        assert!(gate.is_channel_enabled("cache"));
    }

    #[test]
    fn test_wildcards() {
        let gate = EnvDebugGate::parse("app:*");
        assert!(gate.is_channel_enabled("app:db"));
        assert!(gate.is_channel_enabled("app:"));
        assert!(!gate.is_channel_enabled("web:app:db"));

        let all = EnvDebugGate::parse("*");
        assert!(all.is_channel_enabled("anything at all"));
    }

    #[test]
    fn test_exclusions_win() {
        let gate = EnvDebugGate::parse("*,-noisy,-app:trace*");
        assert!(gate.is_channel_enabled("db"));
        assert!(!gate.is_channel_enabled("noisy"));
        assert!(!gate.is_channel_enabled("app:trace:io"));
        assert!(gate.is_channel_enabled("app:db"));
    }

    #[test]
    fn test_regex_metacharacters_are_literal() {
        let gate = EnvDebugGate::parse("a.b");
        assert!(gate.is_channel_enabled("a.b"));
        assert!(!gate.is_channel_enabled("axb"));
    }

    #[test]
    fn test_from_var_unset_disables() {
        let gate = EnvDebugGate::from_var("NICELOG_TEST_SURELY_UNSET_VARIABLE");
        assert_eq!(gate.patterns(), "");
        assert!(!gate.is_channel_enabled("db"));
    }

    #[test]
    fn test_fixed_and_closure_gates() {
        assert!(FixedGate::enabled().is_channel_enabled("x"));
        assert!(!FixedGate::disabled().is_channel_enabled("x"));

        let only_db = |channel: &str| channel == "db";
        assert!(only_db.is_channel_enabled("db"));
        assert!(!only_db.is_channel_enabled("http"));
    }
}
