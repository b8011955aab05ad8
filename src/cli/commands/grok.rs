//! Grok command - fetch, classify and index a repository

use crate::cli::commands::PipelineArgs;
use crate::cli::output::{self, colors};
use crate::cli::OutputFormat;
use crate::core::config::Config;
use crate::core::services::{Location, RunReport, Services};
use clap::Args;
use std::path::PathBuf;

/// Arguments for the grok command
#[derive(Args, Debug)]
pub struct GrokArgs {
    /// Repository URL to clone
    #[arg(required_unless_present = "path", conflicts_with = "path")]
    pub repo: Option<String>,

    /// Use a local directory instead of cloning
    #[arg(long, short = 'p')]
    pub path: Option<PathBuf>,

    /// Branch or tag to clone (defaults to git.default_ref)
    #[arg(long = "ref", short = 'r')]
    pub git_ref: Option<String>,

    #[command(flatten)]
    pub pipeline: PipelineArgs,

    /// Suppress progress output
    #[arg(long, short = 'q')]
    pub quiet: bool,
}

impl GrokArgs {
    /// Resolve where the repository comes from
    pub fn location(&self, config: &Config) -> Result<Location, Box<dyn std::error::Error>> {
        if let Some(path) = &self.path {
            let path = path.canonicalize().map_err(|e| {
                format!(
                    "Invalid path '{}': {}. Make sure the path exists and is accessible.",
                    path.display(),
                    e
                )
            })?;
            if !path.is_dir() {
                return Err(format!("Path '{}' is not a directory.", path.display()).into());
            }
            return Ok(Location::Local(path));
        }

        match &self.repo {
            Some(url) if !url.trim().is_empty() => Ok(Location::Remote {
                url: url.clone(),
                git_ref: self
                    .git_ref
                    .clone()
                    .unwrap_or_else(|| config.git.default_ref.clone()),
            }),
            _ => Err("Provide a repository URL or --path <DIR>.".into()),
        }
    }
}

/// Execute the grok command
pub async fn execute(
    args: GrokArgs,
    config: Config,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let location = args.location(&config)?;
    config.log_config();
    let services = Services::new(config)?;

    if output::show_progress(format, args.quiet) {
        eprintln!(
            "Grokking {}...",
            colors::file_path(&location.describe())
        );
    }

    let report = services.grok(&location).await?;

    match format {
        OutputFormat::Human => print_report(&report),
        OutputFormat::Json => output::print_json(&report)?,
    }

    Ok(())
}

fn print_report(report: &RunReport) {
    output::print_header(&format!("Repository: {}", report.location));
    println!(
        "{} files walked, {} classified, {} excluded (binary or image)",
        colors::number(&report.files_walked.to_string()),
        colors::number(&report.classified.to_string()),
        colors::number(&report.excluded.to_string()),
    );

    println!();
    output::print_header("Languages");
    output::print_languages(&report.languages);

    println!();
    output::print_header("Buckets");
    for (bucket, count) in &report.buckets {
        println!(
            "  {:<14} {}",
            colors::bucket(bucket),
            colors::number(&count.to_string())
        );
    }

    if report.indexed.is_empty() {
        println!();
        output::print_warning("No buckets configured for indexing");
    } else {
        println!();
        output::print_header("Indexed");
        for stats in &report.indexed {
            println!(
                "  {:<14} {} files ({} chunks) in {}",
                colors::bucket(&stats.bucket),
                colors::number(&stats.files_indexed.to_string()),
                colors::number(&stats.chunks_created.to_string()),
                output::format_millis_colored(stats.duration_ms),
            );
        }
    }

    println!();
    output::print_success(&format!(
        "Done in {}",
        output::format_duration(report.duration_ms as f64 / 1000.0)
    ));
}
