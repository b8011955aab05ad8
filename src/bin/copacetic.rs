//! Copacetic CLI - classify a repository and index it for semantic search
//!
//! # Examples
//!
//! ```bash
//! # Clone, classify and index the source bucket
//! copacetic grok https://github.com/acme/widgets.git --ref main
//!
//! # Index a local checkout, documentation included
//! copacetic grok --path . --bucket source,documentation
//!
//! # Classify only, as JSON
//! copacetic classify ./widgets --format json
//!
//! # Show configuration
//! copacetic show-config
//! ```

use clap::Parser;
use copacetic::cli::{output, run, Cli, LogFormat};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_tracing(format: LogFormat) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("copacetic=info"));
    let registry = tracing_subscriber::registry().with(filter);

    // Logs go to stderr so stdout stays clean for --format json
    match format {
        LogFormat::Text => registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .init(),
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init(),
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.log_format);

    if let Err(e) = run(cli).await {
        output::print_error(&e.to_string());
        std::process::exit(1);
    }
}
