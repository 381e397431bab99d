//! `relk dist` command - Life distribution calculations

use clap::Subcommand;
use console::style;
use miette::Result;
use serde::Serialize;

use crate::analysis::statistics::{
    calculate_hazard_rate, calculate_mtbf, calculate_survival, DistributionParams,
};
use crate::cli::helpers::print_serialized;
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::Config;

#[derive(Subcommand, Debug)]
pub enum DistCommands {
    /// Instantaneous hazard rate h(t) = f(t) / R(t)
    Hazard(DistArgs),

    /// Mean time between failures (distribution mean)
    Mtbf(DistArgs),

    /// Survival probability R(t)
    Survival(DistArgs),
}

#[derive(clap::Args, Debug)]
pub struct DistArgs {
    /// Distribution: exponential, lognormal, normal or weibull
    #[arg(long = "type", short = 't')]
    pub dist_type: String,

    /// Shape (lognormal σ, weibull β)
    #[arg(long, default_value_t = 1.0)]
    pub shape: f64,

    /// Location (normal μ, otherwise the failure-free time)
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub location: f64,

    /// Scale (exponential 1/λ, lognormal e^μ, normal σ, weibull η)
    #[arg(long, default_value_t = 1.0)]
    pub scale: f64,

    /// Time at which to evaluate hazard or survival
    #[arg(long, default_value_t = 0.0)]
    pub time: f64,
}

#[derive(Serialize)]
struct DistReport<'a> {
    distribution: &'a str,
    quantity: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    time: Option<f64>,
    value: f64,
}

pub fn run(cmd: DistCommands, global: &GlobalOpts) -> Result<()> {
    let (quantity, args) = match &cmd {
        DistCommands::Hazard(args) => ("hazard_rate", args),
        DistCommands::Mtbf(args) => ("mtbf", args),
        DistCommands::Survival(args) => ("survival", args),
    };
    let params = DistributionParams {
        shape: args.shape,
        location: args.location,
        scale: args.scale,
    };

    let (value, time) = match &cmd {
        DistCommands::Hazard(_) => (calculate_hazard_rate(&args.dist_type, &params, args.time)?, Some(args.time)),
        DistCommands::Mtbf(_) => (calculate_mtbf(&args.dist_type, &params)?, None),
        DistCommands::Survival(_) => (calculate_survival(&args.dist_type, &params, args.time)?, Some(args.time)),
    };
    tracing::debug!(dist_type = %args.dist_type, quantity, value, "distribution");

    let report = DistReport {
        distribution: &args.dist_type,
        quantity,
        time,
        value,
    };

    let config = Config::load();
    match global.format.resolve(config.default_format.as_deref()) {
        OutputFormat::Table | OutputFormat::Auto => {
            if global.quiet {
                println!("{:?}", value);
            } else {
                let at = time.map(|t| format!(" at t = {:?}", t)).unwrap_or_default();
                println!(
                    "{} {} {}{}: {}",
                    style("✓").green(),
                    style(&args.dist_type).cyan(),
                    quantity,
                    at,
                    style(format!("{:?}", value)).bold()
                );
            }
            Ok(())
        }
        format => print_serialized(&report, format),
    }
}
