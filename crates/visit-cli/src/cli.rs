//! CLI argument definitions for the visit records tool.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "visit-records",
    version,
    about = "Sort, filter and rewrite medical visit tables",
    long_about = "Interactively pick a `;`-delimited visit table from a directory,\n\
                  sort or filter its records, and optionally write the result back.\n\n\
                  The session asks for a directory, a file, a transform and a save\n\
                  decision. Any invalid answer ends the session."
)]
pub struct Cli {
    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(long = "log-format", value_enum, default_value = "pretty")]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Allow patient values in log output.
    #[arg(long = "log-data")]
    pub log_data: bool,

    /// Encoding used when a file's encoding cannot be determined.
    #[arg(
        long = "fallback-encoding",
        value_name = "LABEL",
        default_value = "UTF-8"
    )]
    pub fallback_encoding: String,

    /// Refuse to load files whose encoding cannot be determined.
    #[arg(long = "strict-encoding", conflicts_with = "fallback_encoding")]
    pub strict_encoding: bool,
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

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults() {
        let cli = Cli::try_parse_from(["visit-records"]).unwrap();
        assert_eq!(cli.fallback_encoding, "UTF-8");
        assert!(!cli.strict_encoding);
        assert!(!cli.log_data);
        assert!(cli.log_file.is_none());
    }

    #[test]
    fn strict_encoding_conflicts_with_fallback() {
        let result = Cli::try_parse_from([
            "visit-records",
            "--strict-encoding",
            "--fallback-encoding",
            "cp1251",
        ]);
        assert!(result.is_err());
    }
}
