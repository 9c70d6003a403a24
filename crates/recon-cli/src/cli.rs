//! CLI argument definitions for the reconciliation tool.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use recon_map::DEFAULT_MIN_SIMILARITY;

#[derive(Parser)]
#[command(
    name = "recon",
    version,
    about = "Map equivalent fields across data repositories and reconcile their values",
    long_about = "Map equivalent fields across two or three data repositories and \n\
                  compare the values they report for the same org unit and period.\n\n\
                  Input is a JSON snapshot of the repositories' fields and values."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
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

    /// Include reported values in log output.
    ///
    /// Values may be sensitive health data and are redacted unless this
    /// flag is set.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Suggest field mappings between two repositories.
    Map(MapArgs),

    /// Reconcile the values every field group reports for one org unit and period.
    Compare(CompareArgs),
}

#[derive(Parser)]
pub struct MapArgs {
    /// Path to the repository snapshot (JSON).
    #[arg(value_name = "SNAPSHOT")]
    pub snapshot: PathBuf,

    /// Repository whose fields are mapped (default: the first).
    #[arg(long = "source", value_name = "REPO")]
    pub source: Option<String>,

    /// Repository whose fields are claimed (default: the second).
    #[arg(long = "target", value_name = "REPO")]
    pub target: Option<String>,

    /// Minimum overall similarity for a suggestion.
    #[arg(long = "min-similarity", value_name = "SCORE", default_value_t = DEFAULT_MIN_SIMILARITY)]
    pub min_similarity: f64,

    /// Print the result as JSON instead of a table.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Parser)]
pub struct CompareArgs {
    /// Path to the repository snapshot (JSON).
    #[arg(value_name = "SNAPSHOT")]
    pub snapshot: PathBuf,

    /// Org unit to compare.
    #[arg(long = "org-unit", value_name = "OU")]
    pub org_unit: String,

    /// Reporting period to compare.
    #[arg(long = "period", value_name = "PE")]
    pub period: String,

    /// Minimum overall similarity used when groups are built by auto-mapping.
    #[arg(long = "min-similarity", value_name = "SCORE", default_value_t = DEFAULT_MIN_SIMILARITY)]
    pub min_similarity: f64,

    /// Print the result as JSON instead of a table.
    #[arg(long = "json")]
    pub json: bool,

    /// Exit with status 1 when any row is not valid.
    #[arg(long = "fail-on-mismatch")]
    pub fail_on_mismatch: bool,
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
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn compare_requires_org_unit_and_period() {
        let result = Cli::try_parse_from(["recon", "compare", "snap.json"]);
        assert!(result.is_err());

        let cli = Cli::try_parse_from([
            "recon",
            "compare",
            "snap.json",
            "--org-unit",
            "OU1",
            "--period",
            "202403",
            "--fail-on-mismatch",
        ])
        .unwrap();
        let Command::Compare(args) = cli.command else {
            panic!("expected compare");
        };
        assert_eq!(args.org_unit, "OU1");
        assert!(args.fail_on_mismatch);
        assert_eq!(args.min_similarity, DEFAULT_MIN_SIMILARITY);
    }
}
