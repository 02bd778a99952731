//! Scholar message host - Main entry point

use anyhow::Context;
use clap::Parser;
use scholar_analyzer::{Analyzer, AnalyzerConfig};
use scholar_host::Host;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Serve analysis requests as newline-delimited JSON on stdin/stdout
#[derive(Parser, Debug)]
#[command(name = "scholar-host", version)]
struct Args {
    /// Analyzer configuration file (TOML)
    #[arg(long, env = "SCHOLAR_CONFIG")]
    config: Option<PathBuf>,

    /// Gemini API key; defaults to the variable named by `provider.api_key_env`
    #[arg(long)]
    api_key: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Log to stderr; stdout carries replies
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => AnalyzerConfig::from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => AnalyzerConfig::default(),
    };

    let provider = config
        .provider
        .build_provider(args.api_key)
        .context("Failed to create Gemini provider")?;
    tracing::info!("Using model {}", provider.model());

    let host = Host::new(Analyzer::new(provider, config));
    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    host.serve(stdin, tokio::io::stdout())
        .await
        .context("Message stream failed")?;

    Ok(())
}
