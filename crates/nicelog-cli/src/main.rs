//! nicelog CLI - emit one titled log record from the command line.
//!
//! ```text
//! nicelog --title deploy --json info "rolled out" '{"replicas": 3}'
//! DEBUG=deploy nicelog -t deploy debug "diff computed"
//! ```

#![forbid(unsafe_code)]

use std::process::ExitCode;

use clap::Parser;

use nicelog::{Level, Logger, LoggerConfig, Message};

/// Emit a titled, colorized log record.
#[derive(Parser)]
#[command(name = "nicelog")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Logger title (also the debug channel name).
    #[arg(long, short = 't', env = "NICELOG_TITLE", default_value = "nicelog")]
    title: String,

    /// Level: debug, info, warn, error, fatal or trace.
    level: Level,

    /// Message arguments, printed in order.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    messages: Vec<String>,

    /// Treat arguments that parse as JSON as structured values.
    #[arg(long, short = 'j')]
    json: bool,

    /// Render structured values over several lines.
    #[arg(long, short = 'x')]
    expanded: bool,

    /// Disable colors.
    #[arg(long, conflicts_with = "color")]
    plain: bool,

    /// Force colors even when stdout is not a terminal.
    #[arg(long)]
    color: bool,
}

impl Cli {
    fn config(&self) -> LoggerConfig {
        let mut config = LoggerConfig::from_env();
        if self.plain {
            config = config.plain_mode();
        } else if self.color {
            // The flag outranks NO_COLOR / NICELOG_PLAIN from the environment
            config.force_plain = false;
            config = config.force_color(true);
        }
        if self.expanded {
            config = config.with_compact(false);
        }
        config
    }

    fn message_args(&self) -> Vec<Message> {
        self.messages
            .iter()
            .map(|arg| {
                if self.json {
                    parse_json_arg(arg)
                } else {
                    Message::from(arg)
                }
            })
            .collect()
    }
}

/// JSON strings stay text so quoting a word does not change its rendering.
fn parse_json_arg(arg: &str) -> Message {
    match serde_json::from_str::<serde_json::Value>(arg) {
        Ok(serde_json::Value::String(text)) => Message::Text(text),
        Ok(value) => Message::from(value),
        Err(_) => Message::from(arg),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let logger = Logger::new(cli.title.clone(), cli.config());
    match logger.log(cli.level, cli.message_args()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("nicelog: {err}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nicelog::{ColorMode, Value};

    #[test]
    fn test_cli_parses_level_and_messages() {
        let cli = Cli::try_parse_from(["nicelog", "-t", "db", "warn", "slow", "-1"]).unwrap();
        assert_eq!(cli.title, "db");
        assert_eq!(cli.level, Level::Warn);
        assert_eq!(cli.messages, ["slow", "-1"]);
    }

    #[test]
    fn test_cli_rejects_unknown_level() {
        assert!(Cli::try_parse_from(["nicelog", "loud", "x"]).is_err());
    }

    #[test]
    fn test_plain_conflicts_with_color() {
        assert!(Cli::try_parse_from(["nicelog", "--plain", "--color", "info"]).is_err());
    }

    #[test]
    fn test_json_args() {
        assert_eq!(parse_json_arg("5432"), Message::Structured(Value::from(5432)));
        assert_eq!(parse_json_arg("\"quoted\""), Message::Text("quoted".into()));
        assert_eq!(parse_json_arg("connected"), Message::Text("connected".into()));
        assert_eq!(
            parse_json_arg(r#"{"port": 5432}"#),
            Message::Structured(Value::object([("port", 5432)]))
        );
    }

    #[test]
    fn test_without_json_everything_is_text() {
        let cli = Cli::try_parse_from(["nicelog", "info", "42", "{}"]).unwrap();
        assert!(cli.message_args().iter().all(Message::is_text));
    }

    #[test]
    fn test_plain_flag_resolves_plain() {
        let cli = Cli::try_parse_from(["nicelog", "--plain", "info"]).unwrap();
        assert_eq!(cli.config().resolve_color_mode(), ColorMode::Plain);
    }
}
