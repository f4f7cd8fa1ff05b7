//! Integration tests for nicelog component interoperability.
//!
//! These tests drive loggers end to end through their public API:
//! - Logger + CaptureSink record shape
//! - Debug gate + sink selection
//! - Pretty-printer + continuation indentation
//! - Config affecting color mode and value rendering

use std::sync::Arc;

use nicelog::testing::{CaptureSink, strip_ansi};
use nicelog::{
    ColorMode, ColorName, EnvDebugGate, GatedSink, Level, LogError, Logger, LoggerConfig, Message,
    Value, messages,
};
use regex::Regex;
use serde::Serialize;
use serde_json::json;

const PAD: &str = "             ";

struct Captured {
    logger: Logger,
    general: CaptureSink,
    debug: CaptureSink,
}

fn captured(title: &str, config: LoggerConfig) -> Captured {
    let general = CaptureSink::new();
    let debug = CaptureSink::new();
    let config = config
        .with_general_sink(general.clone())
        .with_debug_sink(debug.clone());
    Captured {
        logger: Logger::new(title, config),
        general,
        debug,
    }
}

fn plain(title: &str) -> Captured {
    captured(title, LoggerConfig::new().with_color_mode(ColorMode::Plain))
}

fn styled(title: &str) -> Captured {
    captured(title, LoggerConfig::new().with_color_mode(ColorMode::Styled))
}

// ============================================================================
// Record shape
// ============================================================================

#[test]
fn test_info_with_structured_value() {
    let c = plain("DB");
    c.logger
        .info(messages!["connected", json!({"port": 5432})])
        .unwrap();

    c.general.assert_record_count(1);
    let record = &c.general.records()[0];
    assert_eq!(record.len(), 4);
    assert!(Regex::new(r"^\d{2}:\d{2}:\d{2}\.\d{3}$").unwrap().is_match(&record[0]));
    assert_eq!(record[1], "[DB]");
    assert_eq!(record[2], "connected");
    assert!(record[3].contains("port"));
    assert!(record[3].contains("5432"));
}

#[test]
fn test_fatal_title_and_message() {
    let c = styled("X");
    c.logger.fatal(["boom"]).unwrap();

    let record = c.general.last().unwrap();
    assert_eq!(strip_ansi(&record[1]), "[========= FATAL X =========]");
    assert_eq!(
        record[1],
        format!("[{}]", ColorName::Red.paint("========= FATAL X ========="))
    );
    assert_eq!(record[2], "boom");
}

#[test]
fn test_styled_titles_per_level() {
    let c = styled("svc");
    for level in Level::ALL {
        c.logger.log(level, ["x"]).unwrap();
    }

    let expect = |color: ColorName, text: &str| format!("[{}]", color.paint(text));
    let debug_titles: Vec<String> = c.debug.records().iter().map(|r| r[1].clone()).collect();
    let general_titles: Vec<String> = c.general.records().iter().map(|r| r[1].clone()).collect();

    assert_eq!(debug_titles, vec![expect(ColorName::Yellow, "DEBUG svc")]);
    assert_eq!(
        general_titles,
        vec![
            expect(ColorName::Blue, "svc"),
            expect(ColorName::Yellow, "WARNING svc"),
            expect(ColorName::Red, "ERROR svc"),
            expect(ColorName::Red, "========= FATAL svc ========="),
            expect(ColorName::Red, "TRACE svc"),
        ]
    );
}

#[test]
fn test_text_passes_through_unchanged() {
    let c = styled("T");
    let text = "quotes \"kept\", [brackets] and {braces}";
    c.logger.info([text]).unwrap();
    assert_eq!(c.general.records()[0][2], text);
}

#[test]
fn test_message_order_preserved() {
    let c = plain("T");
    c.logger
        .warn(messages!["first", 2, json!(["third"]), "fourth"])
        .unwrap();
    assert_eq!(
        c.general.records()[0][2..],
        ["first", "2", r#"["third"]"#, "fourth"]
    );
}

#[test]
fn test_structured_rendering_is_deterministic() {
    let c = styled("T");
    let value = json!({"nested": {"list": [1, 2.5, null, "s"]}, "ok": true});
    c.logger.info([value.clone()]).unwrap();
    c.logger.info([value]).unwrap();
    let records = c.general.records();
    assert_eq!(records[0][2], records[1][2]);
}

// ============================================================================
// Indentation
// ============================================================================

#[test]
fn test_multiline_text_is_indented() {
    let c = plain("T");
    c.logger.error(["line one\nline two\nline three"]).unwrap();
    let message = &c.general.records()[0][2];
    assert_eq!(message, &format!("line one\n{PAD}line two\n{PAD}line three"));
}

#[test]
fn test_multiline_structured_rendering() {
    let c = captured(
        "T",
        LoggerConfig::new()
            .with_color_mode(ColorMode::Plain)
            .with_compact(false),
    );
    c.logger
        .info([json!({"user": {"id": 7, "roles": ["admin"]}})])
        .unwrap();

    let message = &c.general.records()[0][2];
    let mut lines = message.lines();
    let first = lines.next().unwrap();
    assert_eq!(first, first.trim());
    assert_eq!(first, "Object {");
    for line in lines {
        assert!(line.starts_with(PAD), "continuation line not indented: {line:?}");
    }
}

#[test]
fn test_single_line_messages_are_trimmed() {
    let c = plain("T");
    c.logger.info(["   padded   "]).unwrap();
    assert_eq!(c.general.records()[0][2], "padded");
}

// ============================================================================
// Debug channel
// ============================================================================

#[test]
fn test_debug_never_reaches_general_sink() {
    let c = plain("T");
    c.logger.debug(["secret"]).unwrap();
    assert!(c.general.is_empty());
    c.debug.assert_contains("secret");
}

#[test]
fn test_disabled_debug_channel_emits_nothing() {
    let out = CaptureSink::new();
    let gate = Arc::new(EnvDebugGate::parse("http,-DB"));
    let config = LoggerConfig::new()
        .with_color_mode(ColorMode::Plain)
        .with_general_sink(out.clone())
        .with_debug_sink(GatedSink::new("DB", gate, Arc::new(out.clone())));
    let logger = Logger::new("DB", config);

    logger.debug(["should not appear"]).unwrap();
    assert!(out.is_empty());

    logger.info(["visible"]).unwrap();
    out.assert_record_count(1);
}

#[test]
fn test_enabled_debug_channel_emits() {
    let out = CaptureSink::new();
    let gate = Arc::new(EnvDebugGate::parse("app:*"));
    let config = LoggerConfig::new()
        .with_color_mode(ColorMode::Plain)
        .with_debug_sink(GatedSink::new("app:db", gate, Arc::new(out.clone())));
    let logger = Logger::new("app:db", config);

    logger.debug(messages!["pool", json!({"idle": 3})]).unwrap();
    assert_eq!(out.lines().len(), 1);
    assert!(out.lines()[0].ends_with(r#"[DEBUG app:db] pool {"idle": 3}"#));
}

// ============================================================================
// Config
// ============================================================================

#[test]
fn test_plain_mode_has_no_escapes() {
    let c = captured("T", LoggerConfig::new().force_color(true).plain_mode());
    c.logger
        .error(messages!["failed", json!({"code": 1, "retry": false})])
        .unwrap();
    for token in &c.general.records()[0] {
        assert!(!token.contains('\u{1b}'), "escape in {token:?}");
    }
}

#[test]
fn test_max_depth_from_config() {
    let c = captured(
        "T",
        LoggerConfig::new()
            .with_color_mode(ColorMode::Plain)
            .with_max_depth(1),
    );
    c.logger.info([json!({"a": {"b": {"c": 1}}})]).unwrap();
    assert_eq!(c.general.records()[0][2], r#"{"a": [Object]}"#);
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_sink_failure_propagates() {
    let failing = |_: &[String]| -> Result<(), LogError> {
        Err(LogError::from(std::io::Error::other("stdout closed")))
    };
    let config = LoggerConfig::new()
        .with_color_mode(ColorMode::Plain)
        .with_general_sink(failing);
    let logger = Logger::new("T", config);

    let err = logger.info(["x"]).unwrap_err();
    assert!(matches!(err, LogError::Io(_)));
}

#[test]
fn test_serialization_failure_propagates_before_emission() {
    let c = plain("T");

    let mut bad = std::collections::BTreeMap::new();
    bad.insert((1, 2), "tuple keys are not strings");

    let result = Message::structured(&bad).and_then(|m| c.logger.info([m]));
    assert!(matches!(result, Err(LogError::Serialize(_))));
    assert!(c.general.is_empty());
}

#[test]
fn test_serialize_structs() {
    #[derive(Serialize)]
    struct Query<'a> {
        table: &'a str,
        rows: u32,
    }

    let c = plain("T");
    let message = Message::structured(&Query {
        table: "users",
        rows: 12,
    })
    .unwrap();
    c.logger.info(messages!["done", message]).unwrap();
    assert_eq!(c.general.records()[0][3], r#"{"rows": 12, "table": "users"}"#);
}

#[test]
fn test_error_values() {
    let c = plain("T");
    let err = std::io::Error::new(std::io::ErrorKind::NotFound, "config.toml missing");
    c.logger.error(messages!["load failed", Message::error(&err)]).unwrap();
    assert_eq!(c.general.records()[0][3], "[Error: config.toml missing]");

    c.logger
        .error([Value::error("TimeoutError", "after 30s")])
        .unwrap();
    assert_eq!(c.general.records()[1][2], "[TimeoutError: after 30s]");
}
