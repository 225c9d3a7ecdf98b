use clap::Parser;
use dns_sentinel_domain::{CliOverrides, Config};
use dns_sentinel_infrastructure::{compile, Checker};
use tracing::{error, info};

mod bootstrap;
mod report;

#[derive(Parser)]
#[command(name = "dns-sentinel")]
#[command(version)]
#[command(about = "DNS monitoring probe - runs declarative checks against resolvers")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// Directory to write error reports to
    #[arg(short = 'e', long = "error-reports", value_name = "DIR")]
    error_reports: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        log_level: cli.log_level.clone(),
        reports_directory: cli.error_reports.clone(),
    };

    // Configuration or compilation failures abort the whole run before any
    // check executes; per-check failures never affect the exit code.
    let config = Config::load(cli.config.as_deref(), cli_overrides)?;

    bootstrap::init_logging(&config);

    info!(
        checks = config.checks.len(),
        "starting dns-sentinel v{}",
        env!("CARGO_PKG_VERSION")
    );

    let checks = compile(&config.checks)?;
    let checker = Checker::new(checks);

    let results = checker.run().await;

    for result in &results {
        println!("{}", result.summary_line());

        if !result.ok() {
            if let Some(directory) = &config.reports.directory {
                match report::write_error_report(result, directory) {
                    Ok(path) => info!(check = %result.name, path = %path.display(), "error report written"),
                    Err(e) => error!(check = %result.name, error = %e, "failed to write error report"),
                }
            }
        }
    }

    Ok(())
}
