//! Analyze command implementation.

use crate::cli::AnalyzeArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::export::{default_filename, share_text, AnalysisExport};
use crate::output::Formatter;
use crate::source::{FileSource, InlineSource, StdinSource};
use crate::stats::Stats;
use chrono::Utc;
use scholar_analyzer::{AnalysisReport, Analyzer};
use scholar_domain::traits::{TextGenerator, TextSource};
use scholar_domain::SourceDocument;
use scholar_llm::LlmError;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Result of a successful analysis run.
#[derive(Debug)]
pub struct AnalyzeOutcome {
    /// The report
    pub report: AnalysisReport,
    /// Counter value after this analysis
    pub papers_analyzed: u64,
    /// Where the export was written, if requested
    pub export_path: Option<PathBuf>,
}

/// Execute the analyze command.
pub async fn execute_analyze(
    args: AnalyzeArgs,
    config: &Config,
    formatter: &Formatter,
) -> Result<()> {
    let doc = read_source(&args)?;
    if doc.is_empty() {
        eprintln!("{}", formatter.warning("No text found in the source; analyzing anyway"));
    }

    let mut analyzer_config = config.analyzer.clone();
    if let Some(model) = args.model {
        analyzer_config.provider.model = model;
    }
    let provider = analyzer_config.provider.build_provider(args.api_key)?;
    let analyzer = Analyzer::new(provider, analyzer_config);

    let export = match (args.output, args.export) {
        (Some(path), _) => Some(path),
        (None, true) => Some(PathBuf::from(default_filename(Utc::now()))),
        (None, false) => None,
    };

    eprintln!(
        "{}",
        formatter.info(&format!(
            "Analyzing \"{}\" ({}, {} chars)...",
            doc.title,
            doc.kind,
            doc.text.chars().count()
        ))
    );

    let outcome = analyze_document(&analyzer, &doc, export.as_deref(), &Stats::path()?).await?;

    println!("{}", formatter.format_report(&outcome.report, &doc)?);
    eprintln!(
        "{}",
        formatter.success(&format!(
            "Analysis complete in {:.1}s with {} confidence ({} papers analyzed)",
            outcome.report.processing_secs(),
            formatter.confidence(outcome.report.analysis.confidence),
            outcome.papers_analyzed
        ))
    );

    if let Some(path) = &outcome.export_path {
        eprintln!("{}", formatter.success(&format!("Exported to {}", path.display())));
    }
    if args.share {
        println!("{}", share_text(outcome.report.analysis.confidence));
    }

    Ok(())
}

/// Run one analysis, then count it and write the export.
///
/// The counter only moves when the analysis succeeds.
pub async fn analyze_document<G>(
    analyzer: &Analyzer<G>,
    doc: &SourceDocument,
    export: Option<&Path>,
    stats_path: &Path,
) -> Result<AnalyzeOutcome>
where
    G: TextGenerator<Error = LlmError> + Send + Sync + 'static,
{
    let report = analyzer.analyze_report(&doc.text).await;
    if let Some(message) = &report.error {
        return Err(CliError::AnalysisFailed(message.clone()));
    }
    debug!("Report {} ready", report.id);

    let papers_analyzed = Stats::record_analysis(stats_path)?;

    let export_path = match export {
        Some(path) => {
            AnalysisExport::new(&report.analysis, report.processing_time_ms, Utc::now())
                .write_to(path)?;
            info!("Export written to {}", path.display());
            Some(path.to_path_buf())
        }
        None => None,
    };

    Ok(AnalyzeOutcome {
        report,
        papers_analyzed,
        export_path,
    })
}

fn read_source(args: &AnalyzeArgs) -> Result<SourceDocument> {
    let title = args.title.clone();
    let url = args.url.clone();

    let doc = if args.stdin {
        StdinSource::new(title, url).extract()?
    } else if let Some(text) = &args.text {
        InlineSource::new(text.as_str(), title, url).extract()?
    } else if let Some(path) = &args.file {
        FileSource::new(path).with_title(title).with_url(url).extract()?
    } else {
        return Err(CliError::InvalidInput(
            "Must specify a file, --text or --stdin".to_string(),
        ));
    };
    Ok(doc)
}
