use clap::Parser;
use miette::Result;
use relk::cli::{Cli, Commands};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    // Reset SIGPIPE to default behavior (terminate silently) for proper Unix piping.
    // Without this, piping to `head`, `grep -q`, etc. causes a panic on broken pipe.
    #[cfg(unix)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))?;

    let cli = Cli::parse();
    let global = cli.global;
    init_tracing(global.verbose);

    match cli.command {
        Commands::Predict(cmd) => relk::cli::commands::predict::run(cmd, &global),
        Commands::Derate(args) => relk::cli::commands::derate::run(args, &global),
        Commands::Dist(cmd) => relk::cli::commands::dist::run(cmd, &global),
        Commands::Limits(cmd) => relk::cli::commands::limits::run(cmd, &global),
    }
}

/// Logs go to stderr; RELK_LOG_FORMAT=json switches to one JSON object per event
fn init_tracing(verbose: bool) {
    let fallback = if verbose { "relk=debug" } else { "relk=warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| fallback.into());
    let log_format = std::env::var("RELK_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }
}
