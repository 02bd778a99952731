//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use crate::export::format_processing_time;
use colored::*;
use scholar_analyzer::AnalysisReport;
use scholar_domain::SourceDocument;
use tabled::{
    builder::Builder,
    settings::{object::Columns, object::Rows, Alignment, Modify, Style, Width},
};

/// Width of the value column in table output.
const VALUE_WIDTH: usize = 80;

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format an analysis report.
    pub fn format_report(&self, report: &AnalysisReport, doc: &SourceDocument) -> Result<String> {
        match self.format {
            OutputFormat::Json => self.format_report_json(report, doc),
            OutputFormat::Table => Ok(self.format_report_table(report, doc)),
            OutputFormat::Quiet => Ok(report.analysis.confidence.to_string()),
        }
    }

    fn format_report_json(&self, report: &AnalysisReport, doc: &SourceDocument) -> Result<String> {
        let analysis = &report.analysis;
        let value = serde_json::json!({
            "id": report.id.to_string(),
            "title": doc.title,
            "source": doc.kind.as_str(),
            "url": doc.url,
            "summary": analysis.summary(),
            "methodology": analysis.methodology(),
            "biasDetection": analysis.bias(),
            "researchGaps": analysis.gaps(),
            "confidence": analysis.confidence,
            "processingTimeMs": report.processing_time_ms,
        });
        Ok(serde_json::to_string_pretty(&value)?)
    }

    fn format_report_table(&self, report: &AnalysisReport, doc: &SourceDocument) -> String {
        let mut builder = Builder::default();
        builder.push_record(["Field", "Value"]);
        builder.push_record(["Title", doc.title.as_str()]);
        builder.push_record(["Source", doc.kind.label()]);

        for (label, value) in report.analysis.parsed.fields() {
            let value = if value.trim().is_empty() { "-" } else { value };
            builder.push_record([label, value]);
        }

        let confidence = format!("{}%", report.analysis.confidence);
        let time = format_processing_time(report.processing_time_ms);
        builder.push_record(["Confidence", confidence.as_str()]);
        builder.push_record(["Processing Time", time.as_str()]);

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()))
            .with(Modify::new(Columns::single(1)).with(Width::wrap(VALUE_WIDTH)));

        table.to_string()
    }

    /// Format the papers-analyzed counter.
    pub fn format_stats(&self, papers_analyzed: u64) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(
                &serde_json::json!({ "papersAnalyzed": papers_analyzed }),
            )?),
            OutputFormat::Quiet => Ok(papers_analyzed.to_string()),
            OutputFormat::Table => Ok(format!(
                "{} {}",
                self.colorize("Papers analyzed:", "cyan"),
                papers_analyzed
            )),
        }
    }

    /// Format a confidence score, colored by band.
    pub fn confidence(&self, confidence: u8) -> String {
        let text = format!("{}%", confidence);
        match confidence {
            95.. => self.colorize(&text, "green"),
            90.. => self.colorize(&text, "cyan"),
            _ => self.colorize(&text, "yellow"),
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            _ => text.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scholar_domain::{ParsedAnalysis, ScoredAnalysis, SourceKind};

    fn report(parsed: ParsedAnalysis) -> AnalysisReport {
        AnalysisReport {
            id: uuid::Uuid::now_v7(),
            analysis: ScoredAnalysis::from_parsed(parsed),
            error: None,
            processing_time_ms: 2_300,
        }
    }

    fn doc() -> SourceDocument {
        SourceDocument::new("Attention", "text").with_url("https://arxiv.org/abs/1706.03762")
    }

    #[test]
    fn test_json_format() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let output = formatter
            .format_report(&report(ParsedAnalysis::new("s", "m", "b", "g")), &doc())
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["biasDetection"], "b");
        assert_eq!(value["researchGaps"], "g");
        assert_eq!(value["confidence"], 95);
        assert_eq!(value["source"], SourceKind::Arxiv.as_str());
    }

    #[test]
    fn test_quiet_format() {
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        let output = formatter
            .format_report(&report(ParsedAnalysis::new("s", "m", "", "")), &doc())
            .unwrap();
        assert_eq!(output, "90");
    }

    #[test]
    fn test_table_format() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter
            .format_report(&report(ParsedAnalysis::new("s", "", "", "")), &doc())
            .unwrap();
        assert!(output.contains("Research Gaps"));
        assert!(output.contains("arXiv"));
        assert!(output.contains("80%"));
        assert!(output.contains("2.3s"));
    }

    #[test]
    fn test_stats_format() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        assert_eq!(formatter.format_stats(3).unwrap(), "Papers analyzed: 3");
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        assert_eq!(formatter.format_stats(3).unwrap(), "3");
    }

    #[test]
    fn test_colorize_disabled() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        assert_eq!(formatter.success("test"), "✓ test");
        assert_eq!(formatter.confidence(95), "95%");
    }
}
