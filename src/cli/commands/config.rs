//! Config command - show current configuration

use crate::cli::output;
use crate::cli::OutputFormat;
use crate::core::config::Config;
use crate::core::xdg::XdgDirs;
use clap::Args;
use serde::Serialize;

/// Arguments for the config command
#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Print only the config file location
    #[arg(long)]
    pub path: bool,
}

/// Configuration response
#[derive(Debug, Serialize)]
pub struct ConfigResponse<'a> {
    pub config_file: String,
    pub config_file_exists: bool,
    pub config: &'a Config,
}

/// Execute the config command
pub fn execute(
    args: ConfigArgs,
    config: &Config,
    xdg: &XdgDirs,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let config_file = std::env::var("COPACETIC_CONFIG")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|_| xdg.config_file());

    if args.path {
        println!("{}", config_file.display());
        return Ok(());
    }

    let response = ConfigResponse {
        config_file: config_file.to_string_lossy().into_owned(),
        config_file_exists: config_file.exists(),
        config,
    };

    match format {
        OutputFormat::Human => {
            let origin = if response.config_file_exists {
                response.config_file.clone()
            } else {
                format!("{} (not found, using defaults)", response.config_file)
            };
            output::print_header(&format!("Configuration: {origin}"));
            print!("{}", toml::to_string_pretty(config)?);
        }
        OutputFormat::Json => output::print_json(&response)?,
    }

    Ok(())
}
