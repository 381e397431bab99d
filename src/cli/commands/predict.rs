//! `relk predict` command - Hazard rate prediction

use clap::Subcommand;
use console::style;
use miette::Result;
use std::path::PathBuf;

use crate::analysis::prediction::calculate_reliability_metrics;
use crate::analysis::stress::calculate_stress_ratios;
use crate::cli::helpers::{attributes_table, print_serialized, read_attributes};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::{Attributes, Config};
use crate::families;

#[derive(Subcommand, Debug)]
pub enum PredictCommands {
    /// Parts count prediction (λb by environment times πQ)
    Count(PredictArgs),

    /// Part stress prediction from operating conditions
    Stress(PredictArgs),
}

#[derive(clap::Args, Debug)]
pub struct PredictArgs {
    /// Attribute file (YAML or JSON)
    pub file: PathBuf,

    /// Also roll up logistics/mission hazard rates, MTBF and reliability
    #[arg(long, short = 'm')]
    pub metrics: bool,

    /// Mission time in hours for the reliability roll-up
    #[arg(long, requires = "metrics")]
    pub mission_time: Option<f64>,
}

pub fn run(cmd: PredictCommands, global: &GlobalOpts) -> Result<()> {
    let config = Config::load();
    let (args, part_stress) = match cmd {
        PredictCommands::Count(args) => (args, false),
        PredictCommands::Stress(args) => (args, true),
    };

    let attributes = read_attributes(&args.file)?;
    let mut result = if part_stress {
        families::calculate_part_stress(&calculate_stress_ratios(&attributes)?)?
    } else {
        families::calculate_part_count(&attributes)?
    };
    if args.metrics {
        if let Some(hours) = args.mission_time {
            result.insert("mission_time", hours);
        }
        result = calculate_reliability_metrics(&result, config.hr_multiplier())?;
    }

    let method = if part_stress { "Part stress" } else { "Parts count" };
    match global.format.resolve(config.default_format.as_deref()) {
        OutputFormat::Table | OutputFormat::Auto => print_table(method, &result, &config, global),
        format => print_serialized(&result, format),
    }
}

fn print_table(method: &str, result: &Attributes, config: &Config, global: &GlobalOpts) -> Result<()> {
    let hazard_rate = result.get_f64("hazard_rate_active")?;
    if global.quiet {
        println!("{:?}", hazard_rate);
        return Ok(());
    }

    println!(
        "{} {} prediction: {} failures per {:e} hours",
        style("✓").green(),
        method,
        style(format!("{:?}", hazard_rate)).cyan(),
        config.hr_multiplier()
    );
    println!("{}", attributes_table(result));
    Ok(())
}
