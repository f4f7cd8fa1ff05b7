//! Testing utilities for nicelog output
//!
//! [`CaptureSink`] records every emitted record so tests can assert on the
//! tokens a logger produced, with or without ANSI escapes.

use std::sync::{Arc, Mutex, PoisonError};

use strip_ansi_escapes::strip;

use crate::error::LogResult;
use crate::sink::Sink;

/// A sink that captures records for assertions.
///
/// Clones share the same buffer, so one clone can be handed to a logger
/// while the test keeps another for inspection.
#[derive(Debug, Clone, Default)]
pub struct CaptureSink {
    records: Arc<Mutex<Vec<Vec<String>>>>,
}

impl CaptureSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Captured records, tokens exactly as emitted (ANSI preserved).
    #[must_use]
    pub fn records(&self) -> Vec<Vec<String>> {
        self.records
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }

    /// Captured records with ANSI escapes stripped from every token.
    #[must_use]
    pub fn plain_records(&self) -> Vec<Vec<String>> {
        self.records()
            .into_iter()
            .map(|tokens| tokens.iter().map(|t| strip_ansi(t)).collect())
            .collect()
    }

    /// Each record joined with spaces, ANSI stripped.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.plain_records()
            .into_iter()
            .map(|tokens| tokens.join(" "))
            .collect()
    }

    /// The most recent record, ANSI preserved.
    #[must_use]
    pub fn last(&self) -> Option<Vec<String>> {
        self.records
            .lock()
            .ok()
            .and_then(|r| r.last().cloned())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.lock().map(|r| r.len()).unwrap_or_default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Check if any record contains a string (ANSI stripped).
    #[must_use]
    pub fn contains(&self, needle: &str) -> bool {
        self.lines().iter().any(|line| line.contains(needle))
    }

    /// Assert that some record contains a string
    ///
    /// # Panics
    ///
    /// Panics if no captured record contains the needle.
    pub fn assert_contains(&self, needle: &str) {
        assert!(
            self.contains(needle),
            "No record contained '{}'. Captured:\n{}",
            needle,
            self.lines().join("\n")
        );
    }

    /// Assert that no record contains a string
    ///
    /// # Panics
    ///
    /// Panics if a captured record contains the needle.
    pub fn assert_not_contains(&self, needle: &str) {
        assert!(
            !self.contains(needle),
            "A record unexpectedly contained '{}'. Captured:\n{}",
            needle,
            self.lines().join("\n")
        );
    }

    /// Assert the number of captured records
    ///
    /// # Panics
    ///
    /// Panics if the count doesn't match expected.
    pub fn assert_record_count(&self, expected: usize) {
        let actual = self.len();
        assert_eq!(
            actual,
            expected,
            "Expected {} records but got {}. Captured:\n{}",
            expected,
            actual,
            self.lines().join("\n")
        );
    }

    pub fn clear(&self) {
        if let Ok(mut records) = self.records.lock() {
            records.clear();
        }
    }
}

impl Sink for CaptureSink {
    fn emit(&self, tokens: &[String]) -> LogResult<()> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(tokens.to_vec());
        Ok(())
    }
}

/// Remove ANSI escape sequences from text.
#[must_use]
pub fn strip_ansi(text: &str) -> String {
    String::from_utf8_lossy(&strip(text.as_bytes())).into_owned()
}
