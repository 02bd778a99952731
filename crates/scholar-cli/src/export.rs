//! Export, citation and share text.

use crate::error::Result;
use chrono::{DateTime, Datelike, NaiveDate, SecondsFormat, Utc};
use scholar_domain::ScoredAnalysis;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Exported analysis, as written to disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisExport {
    /// Concise summary
    pub summary: String,
    /// Methodology and datasets
    pub methodology: String,
    /// Biases and limitations
    pub bias_detection: String,
    /// Research gaps
    pub research_gaps: String,
    /// Confidence, e.g. `"95%"`
    pub confidence: String,
    /// Processing time, e.g. `"2.3s"`
    pub processing_time: String,
    /// RFC 3339 export time
    pub timestamp: String,
}

impl AnalysisExport {
    /// Build an export of `analysis` taken at `at`.
    pub fn new(analysis: &ScoredAnalysis, processing_time_ms: u64, at: DateTime<Utc>) -> Self {
        Self {
            summary: analysis.summary().to_string(),
            methodology: analysis.methodology().to_string(),
            bias_detection: analysis.bias().to_string(),
            research_gaps: analysis.gaps().to_string(),
            confidence: format!("{}%", analysis.confidence),
            processing_time: format_processing_time(processing_time_ms),
            timestamp: at.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }

    /// Write as pretty JSON.
    pub fn write_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}

/// Export file name for an export taken at `at`.
pub fn default_filename(at: DateTime<Utc>) -> String {
    format!("scholar_ai_analysis_{}.json", at.timestamp_millis())
}

/// Seconds with one decimal, e.g. `2.3s`.
pub fn format_processing_time(ms: u64) -> String {
    format!("{:.1}s", ms as f64 / 1000.0)
}

/// Citation line for an analysis generated on `date`.
pub fn citation(date: NaiveDate) -> String {
    format!(
        "ScholarAI Analysis. ({}). AI-Powered Research Paper Analysis. Generated on {}.",
        date.year(),
        date.format("%m/%d/%Y")
    )
}

/// Text for sharing a result.
pub fn share_text(confidence: u8) -> String {
    format!(
        "Check out this AI-powered research analysis with {}% confidence score!",
        confidence
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use scholar_domain::ParsedAnalysis;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 5, 14, 30, 0).unwrap()
    }

    #[test]
    fn test_export_field_names() {
        let analysis = ScoredAnalysis::from_parsed(ParsedAnalysis::new("s", "m", "b", "g"));
        let export = AnalysisExport::new(&analysis, 2_340, at());
        let value = serde_json::to_value(&export).unwrap();

        assert_eq!(
            value,
            serde_json::json!({
                "summary": "s",
                "methodology": "m",
                "biasDetection": "b",
                "researchGaps": "g",
                "confidence": "95%",
                "processingTime": "2.3s",
                "timestamp": "2024-03-05T14:30:00.000Z"
            })
        );
    }

    #[test]
    fn test_write_export() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(default_filename(at()));
        let export = AnalysisExport::new(&ScoredAnalysis::failed(), 0, at());
        export.write_to(&path).unwrap();

        let read: AnalysisExport = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(read, export);
        assert_eq!(read.confidence, "0%");
    }

    #[test]
    fn test_default_filename() {
        assert_eq!(default_filename(at()), "scholar_ai_analysis_1709649000000.json");
    }

    #[test]
    fn test_citation() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        assert_eq!(
            citation(date),
            "ScholarAI Analysis. (2024). AI-Powered Research Paper Analysis. Generated on 03/05/2024."
        );
    }

    #[test]
    fn test_share_text() {
        assert_eq!(
            share_text(90),
            "Check out this AI-powered research analysis with 90% confidence score!"
        );
    }

    #[test]
    fn test_processing_time() {
        assert_eq!(format_processing_time(0), "0.0s");
        assert_eq!(format_processing_time(12_049), "12.0s");
    }
}
