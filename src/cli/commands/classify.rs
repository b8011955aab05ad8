//! Classify command - walk and classify a local directory

use crate::cli::commands::PipelineArgs;
use crate::cli::output::{self, colors};
use crate::cli::OutputFormat;
use crate::core::config::Config;
use crate::core::services::Services;
use crate::core::types::{Category, LanguageSet, Source};
use clap::Args;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Arguments for the classify command
#[derive(Args, Debug)]
pub struct ClassifyArgs {
    /// Directory to classify
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// List the files in each bucket
    #[arg(long, short = 'l')]
    pub list: bool,

    #[command(flatten)]
    pub pipeline: PipelineArgs,
}

/// Classification result response
#[derive(Debug, Serialize)]
pub struct ClassifyResponse {
    pub root: String,
    pub files_walked: usize,
    pub classified: usize,
    pub excluded: Vec<String>,
    pub languages: LanguageSet,
    /// Bucket name to relative file paths, in walk order
    pub buckets: BTreeMap<String, Vec<String>>,
}

impl ClassifyResponse {
    pub fn from_source(source: &Source) -> Self {
        let display = |p: &std::path::Path| p.to_string_lossy().replace('\\', "/");
        Self {
            root: source.root.to_string_lossy().into_owned(),
            files_walked: source.files.len(),
            classified: source.classified_count(),
            excluded: source.excluded.iter().map(|p| display(p.as_path())).collect(),
            languages: source.languages.clone(),
            buckets: Category::ALL
                .iter()
                .map(|c| {
                    let files = source
                        .bucket(*c)
                        .iter()
                        .map(|f| display(f.path.as_path()))
                        .collect();
                    (c.as_str().to_string(), files)
                })
                .collect(),
        }
    }
}

/// Execute the classify command
pub async fn execute(
    args: ClassifyArgs,
    config: Config,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let root = args.path.canonicalize().map_err(|e| {
        format!(
            "Invalid path '{}': {}. Make sure the path exists and is accessible.",
            args.path.display(),
            e
        )
    })?;

    let services = Services::new(config)?;
    let source = services.classify(&root).await?;
    let response = ClassifyResponse::from_source(&source);

    match format {
        OutputFormat::Human => {
            output::print_header(&format!("Repository: {}", response.root));
            println!(
                "{} files walked, {} classified, {} excluded",
                colors::number(&response.files_walked.to_string()),
                colors::number(&response.classified.to_string()),
                colors::number(&response.excluded.len().to_string()),
            );
            println!();
            output::print_header("Languages");
            output::print_languages(&response.languages);
            println!();
            output::print_header("Buckets");
            for (bucket, files) in &response.buckets {
                println!(
                    "  {:<14} {}",
                    colors::bucket(bucket),
                    colors::number(&files.len().to_string())
                );
                if args.list {
                    for file in files {
                        println!("    {}", colors::file_path(file));
                    }
                }
            }
        }
        OutputFormat::Json => output::print_json(&response)?,
    }

    Ok(())
}
