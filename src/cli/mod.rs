//! CLI adapter for copacetic
//!
//! Thin clap front end over `core/`. Commands load configuration,
//! apply flag overrides, build [`Services`] and print results in
//! human or JSON form.
//!
//! [`Services`]: crate::core::services::Services

pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};

/// Copacetic - classify a repository and index it for semantic search
///
/// Walks a repository, tags every file with a language and a category
/// bucket, then chunks and embeds the selected buckets into a vector
/// index.
#[derive(Parser, Debug)]
#[command(name = "copacetic")]
#[command(author = "RHOBIMD HEALTH")]
#[command(version)]
#[command(about = "Repository classification and vector indexing", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(long, global = true, default_value = "human")]
    pub format: OutputFormat,

    /// Log line format (logs go to stderr)
    #[arg(long, global = true, default_value = "text")]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output for scripting
    Json,
}

/// Log format for the tracing subscriber
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch, classify and index a repository
    Grok(commands::GrokArgs),

    /// Classify a local directory without indexing it
    Classify(commands::ClassifyArgs),

    /// Show current configuration
    #[command(name = "show-config")]
    ShowConfig(commands::ConfigArgs),

    /// Generate shell completion scripts
    ///
    /// Output completion script to stdout. To install:
    ///
    ///   bash:  copacetic completions bash > ~/.local/share/bash-completion/completions/copacetic
    ///   zsh:   copacetic completions zsh > ~/.zfunc/_copacetic
    ///   fish:  copacetic completions fish > ~/.config/fish/completions/copacetic.fish
    Completions(commands::CompletionsArgs),
}

/// Run the CLI with the provided arguments
pub async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    use crate::core::config::Config;
    use crate::core::xdg::XdgDirs;

    let xdg = XdgDirs::new();
    xdg.log_paths();

    match cli.command {
        Commands::Completions(args) => commands::completions::execute(args),
        Commands::ShowConfig(args) => {
            let config = Config::load_with_xdg(&xdg)?;
            config.validate()?;
            commands::config::execute(args, &config, &xdg, cli.format)
        }
        Commands::Grok(args) => {
            let mut config = Config::load_with_xdg(&xdg)?;
            args.pipeline.apply(&mut config);
            commands::grok::execute(args, config, cli.format).await
        }
        Commands::Classify(args) => {
            let mut config = Config::load_with_xdg(&xdg)?;
            args.pipeline.apply(&mut config);
            commands::classify::execute(args, config, cli.format).await
        }
    }
}
