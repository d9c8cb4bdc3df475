//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use trendtab_core::TableStyle;

#[derive(Parser)]
#[command(
    name = "trendtab",
    version,
    about = "Live-updating metric tables with trend highlighting",
    long_about = "Render a stream of metric records as a table that redraws in place.\n\n\
                  Columns are colored by whether a value improved or worsened, judged\n\
                  from the column name (accuracy goes up, loss goes down)."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Read JSON Lines records and draw the table after every record.
    Watch(WatchArgs),

    /// Print the predicted direction of column names.
    Classify(ClassifyArgs),
}

#[derive(Args)]
pub struct WatchArgs {
    /// JSON Lines input (reads stdin when omitted or "-").
    #[arg(value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// TOML table configuration; flags below override it.
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Table border style.
    #[arg(long = "style", value_enum)]
    pub style: Option<StyleArg>,

    /// strftime pattern of the timestamp column.
    #[arg(long = "timestamp-format", value_name = "PATTERN")]
    pub timestamp_format: Option<String>,

    /// Do not add a timestamp column.
    #[arg(long = "no-timestamp", conflicts_with = "timestamp_format")]
    pub no_timestamp: bool,

    /// Show the percentage change against the previous value.
    #[arg(long = "show-delta")]
    pub show_delta: bool,

    /// Do not highlight running minimum and maximum.
    #[arg(long = "no-highlight")]
    pub no_highlight: bool,

    /// Per-column format, e.g. --format 'loss={:.2e}'.
    #[arg(long = "format", value_name = "NAME=FMT", value_parser = parse_assignment)]
    pub formats: Vec<(String, String)>,

    /// Per-column direction, e.g. --direction lr=desc.
    #[arg(long = "direction", value_name = "NAME=KEYWORD", value_parser = parse_assignment)]
    pub directions: Vec<(String, String)>,

    /// Add a moving-average column for NAME (repeatable).
    #[arg(long = "avg", value_name = "NAME")]
    pub averages: Vec<String>,

    /// Moving-average window size.
    #[arg(long = "avg-window", value_name = "N")]
    pub average_window: Option<usize>,

    /// Export the final table as CSV.
    #[arg(long = "csv", value_name = "PATH")]
    pub csv: Option<PathBuf>,

    /// Export the final table as plain text.
    #[arg(long = "txt", value_name = "PATH")]
    pub txt: Option<PathBuf>,
}

#[derive(Args)]
pub struct ClassifyArgs {
    /// Column names to classify.
    #[arg(value_name = "NAME", required = true)]
    pub names: Vec<String>,

    /// Also list every vocabulary term that matched.
    #[arg(long = "explain")]
    pub explain: bool,
}

/// CLI table style choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum StyleArg {
    Rounded,
    Full,
    Condensed,
    Ascii,
    Markdown,
    Plain,
}

impl From<StyleArg> for TableStyle {
    fn from(style: StyleArg) -> Self {
        match style {
            StyleArg::Rounded => TableStyle::Rounded,
            StyleArg::Full => TableStyle::Full,
            StyleArg::Condensed => TableStyle::Condensed,
            StyleArg::Ascii => TableStyle::Ascii,
            StyleArg::Markdown => TableStyle::Markdown,
            StyleArg::Plain => TableStyle::Plain,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

fn parse_assignment(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected NAME=VALUE, got '{raw}'")),
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_watch_flags() {
        let cli = Cli::try_parse_from([
            "trendtab",
            "watch",
            "run.jsonl",
            "--no-timestamp",
            "--format",
            "loss={:.2e}",
            "--direction",
            "lr=desc",
            "--avg",
            "loss",
            "--style",
            "markdown",
        ])
        .expect("parse");
        let Command::Watch(args) = cli.command else {
            panic!("expected watch");
        };
        assert!(args.no_timestamp);
        assert_eq!(args.formats, vec![("loss".to_string(), "{:.2e}".to_string())]);
        assert_eq!(args.directions, vec![("lr".to_string(), "desc".to_string())]);
        assert_eq!(args.averages, vec!["loss".to_string()]);
        assert!(matches!(args.style, Some(StyleArg::Markdown)));
    }

    #[test]
    fn test_parse_assignment_rejects_missing_name() {
        assert!(parse_assignment("=desc").is_err());
        assert!(parse_assignment("lr").is_err());
        assert_eq!(
            parse_assignment("a=b=c"),
            Ok(("a".to_string(), "b=c".to_string()))
        );
    }
}
