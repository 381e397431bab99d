//! `relk derate` command - Stress derating analysis

use console::style;
use miette::Result;
use serde::Serialize;
use std::path::PathBuf;

use crate::analysis::stress::calculate_stress_ratios;
use crate::analysis::OverstressResult;
use crate::cli::helpers::{load_limits, print_serialized, read_attributes};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::environment::Environment;
use crate::core::Config;
use crate::families;

#[derive(clap::Args, Debug)]
pub struct DerateArgs {
    /// Attribute file (YAML or JSON)
    pub file: PathBuf,

    /// Stress limit table (default: configured table, else built-in)
    #[arg(long, short = 'l')]
    pub limits: Option<PathBuf>,
}

#[derive(Serialize)]
struct DerateReport {
    environment: String,
    severity_tier: u32,
    #[serde(flatten)]
    result: OverstressResult,
}

pub fn run(args: DerateArgs, global: &GlobalOpts) -> Result<()> {
    let config = Config::load();
    let limits = load_limits(args.limits.as_deref(), &config)?;
    let attributes = calculate_stress_ratios(&read_attributes(&args.file)?)?;

    let result = families::do_derating_analysis(&attributes, &limits)?;
    let environment = Environment::from_id(attributes.get_id("environment_active_id")?)?;
    let report = DerateReport {
        environment: environment.abbreviation().to_string(),
        severity_tier: environment.severity_tier(),
        result,
    };

    match global.format.resolve(config.default_format.as_deref()) {
        OutputFormat::Table | OutputFormat::Auto => {
            print_report(&report, global);
            Ok(())
        }
        format => print_serialized(&report, format),
    }
}

fn print_report(report: &DerateReport, global: &GlobalOpts) {
    if global.quiet {
        println!("{}", report.result.flag());
        return;
    }

    let context = format!(
        "({}, severity tier {})",
        report.environment, report.severity_tier
    );
    if report.result.overstress {
        println!("{} Overstressed {}", style("✗").red(), style(context).dim());
        for reason in report.result.reason.lines() {
            println!("   {}", style(reason).yellow());
        }
    } else {
        println!("{} Within derating limits {}", style("✓").green(), style(context).dim());
    }
}
