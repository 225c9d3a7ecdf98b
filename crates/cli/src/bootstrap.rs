use dns_sentinel_domain::Config;
use tracing_subscriber::EnvFilter;

/// Initialize tracing. Logs go to stderr so stdout carries only the
/// machine-parsable summary lines.
pub fn init_logging(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
