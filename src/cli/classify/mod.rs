//! Classify command - batch classification without the HTTP server

use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Args;
use tracing::info;

use crate::config::AppConfig;
use crate::domain::{BatchResult, SentimentPipeline};
use crate::infrastructure::artifacts::ArtifactLoader;
use crate::infrastructure::logging::init_cli_logging;

/// Arguments for the classify command
#[derive(Args, Clone, Debug)]
pub struct ClassifyArgs {
    /// File with one comment per line; stdin when omitted
    #[arg(long, short)]
    pub input: Option<PathBuf>,

    /// Models directory (overrides config)
    #[arg(long)]
    pub models_dir: Option<PathBuf>,
}

/// Classify every non-empty input line and print the result as JSON
pub async fn run(args: ClassifyArgs) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let mut config = AppConfig::load().unwrap_or_default();
    init_cli_logging(&config.logging);

    if let Some(dir) = args.models_dir.clone() {
        config.models.dir = dir;
    }

    let text = read_input(args.input.as_deref())?;
    let comments = parse_lines(&text);
    info!(count = comments.len(), "Classifying comments");

    let loader = ArtifactLoader::new(config.models.clone());
    let result = tokio::task::spawn_blocking(move || classify(&loader, &comments)).await??;

    println!("{}", serde_json::to_string_pretty(&result)?);

    Ok(())
}

fn classify(loader: &ArtifactLoader, comments: &[String]) -> anyhow::Result<BatchResult> {
    if comments.is_empty() {
        return Ok(BatchResult::empty());
    }

    let pipeline = SentimentPipeline::new(Arc::new(loader.load()));
    pipeline.analyze(comments).with_context(|| {
        format!(
            "classification failed using models in {}",
            loader.config().dir.display()
        )
    })
}

fn read_input(path: Option<&std::path::Path>) -> anyhow::Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("failed to read stdin")?;
            Ok(text)
        }
    }
}

fn parse_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
