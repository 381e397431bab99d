//! CLI argument definitions using clap derive

use clap::{Parser, Subcommand, ValueEnum};

use crate::cli::commands::{
    derate::DerateArgs, dist::DistCommands, limits::LimitsCommands, predict::PredictCommands,
};

#[derive(Parser)]
#[command(name = "relk")]
#[command(author, version, about = "Reliability Kit")]
#[command(
    long_about = "MIL-HDBK-217F hazard rate prediction, stress derating analysis and life distribution calculations."
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOpts,
}

#[derive(clap::Args, Clone, Debug)]
pub struct GlobalOpts {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "auto")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Enable verbose output (debug logging unless RUST_LOG is set)
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Hazard rate prediction (parts count or part stress)
    #[command(subcommand)]
    Predict(PredictCommands),

    /// Check a part's operating stresses against the derating limits
    Derate(DerateArgs),

    /// Life distribution hazard rate, MTBF and survival
    #[command(subcommand)]
    Dist(DistCommands),

    /// Inspect the stress limit table
    #[command(subcommand)]
    Limits(LimitsCommands),
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Table for terminals, unless the config file says otherwise
    #[default]
    Auto,
    /// YAML format (full fidelity)
    Yaml,
    /// JSON format (for programming)
    Json,
    /// Human-readable table
    Table,
}

impl OutputFormat {
    /// Resolve `Auto` against the configured default format
    ///
    /// Unrecognised configured values fall back to a table.
    pub fn resolve(self, configured: Option<&str>) -> OutputFormat {
        match self {
            OutputFormat::Auto => configured
                .and_then(|name| OutputFormat::from_str(name, true).ok())
                .filter(|format| *format != OutputFormat::Auto)
                .unwrap_or(OutputFormat::Table),
            explicit => explicit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_explicit_wins() {
        assert_eq!(OutputFormat::Json.resolve(Some("yaml")), OutputFormat::Json);
    }

    #[test]
    fn test_resolve_auto() {
        assert_eq!(OutputFormat::Auto.resolve(None), OutputFormat::Table);
        assert_eq!(OutputFormat::Auto.resolve(Some("YAML")), OutputFormat::Yaml);
        assert_eq!(OutputFormat::Auto.resolve(Some("csv")), OutputFormat::Table);
        assert_eq!(OutputFormat::Auto.resolve(Some("auto")), OutputFormat::Table);
    }

    #[test]
    fn test_cli_parses() {
        let cli = Cli::try_parse_from(["relk", "--format", "json", "dist", "mtbf", "--type", "weibull"]);
        assert!(cli.is_ok());
    }
}
