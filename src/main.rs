use clap::Parser;
use tracing_subscriber::EnvFilter;

use finproj::api::{Cli, run};

#[tokio::main]
async fn main() {
    // Logs go to stderr so CLI results on stdout stay machine-readable.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        tracing::error!(error = %e, "command failed");
        eprintln!("{e}");
        std::process::exit(1);
    }
}
