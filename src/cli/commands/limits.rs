//! `relk limits` command - Stress limit table inspection

use clap::Subcommand;
use miette::Result;
use std::path::PathBuf;
use tabled::{builder::Builder, settings::Style};

use crate::cli::helpers::{load_limits, print_serialized};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::{Config, StressLimits};

#[derive(Subcommand, Debug)]
pub enum LimitsCommands {
    /// Print the effective stress limit table
    Show(ShowArgs),
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Stress limit table (default: configured table, else built-in)
    #[arg(long, short = 'l')]
    pub limits: Option<PathBuf>,

    /// Only show entries whose path starts with this prefix (e.g. `resistor.fixed_film`)
    #[arg(long, short = 'p')]
    pub prefix: Option<String>,
}

pub fn run(cmd: LimitsCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        LimitsCommands::Show(args) => run_show(args, global),
    }
}

fn run_show(args: ShowArgs, global: &GlobalOpts) -> Result<()> {
    let config = Config::load();
    let limits = load_limits(args.limits.as_deref(), &config)?;

    match global.format.resolve(config.default_format.as_deref()) {
        OutputFormat::Table | OutputFormat::Auto => {
            println!("{}", limits_table(&limits, args.prefix.as_deref()));
            Ok(())
        }
        format => print_serialized(&limits, format),
    }
}

/// One row per leaf: dotted path, then the protected/normal/severe limits
fn limits_table(limits: &StressLimits, prefix: Option<&str>) -> String {
    let mut builder = Builder::default();
    builder.push_record(["Path", "Protected", "Normal", "Severe"]);
    for (path, tiers) in limits.entries() {
        if prefix.is_some_and(|p| !path.starts_with(p)) {
            continue;
        }
        let mut row = vec![path];
        row.extend(tiers.iter().map(|t| format!("{:?}", t)));
        builder.push_record(row);
    }
    builder.build().with(Style::rounded()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limits_table_prefix_filter() {
        let limits = StressLimits::builtin().unwrap();
        let table = limits_table(&limits, Some("miscellaneous"));
        assert!(table.contains("miscellaneous.lamp.current"));
        assert!(table.contains("0.2"));
        assert!(!table.contains("relay."));
    }
}
