//! Message contract between a host and the analyzer

use scholar_domain::ScoredAnalysis;
use serde::{Deserialize, Serialize};

/// Inbound request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum Message {
    /// Run an analysis of `text` and reply with its outcome
    StartAnalysis {
        /// Paper text; a missing field is treated as empty
        #[serde(default)]
        text: String,
    },
    /// Report the current status without starting anything
    GetAnalysisResult,
}

/// Analysis fields as they appear on the wire
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisPayload {
    /// Concise summary
    pub summary: String,
    /// Methodology and datasets
    pub methodology: String,
    /// Biases and limitations
    pub bias_detection: String,
    /// Research gaps
    pub research_gaps: String,
    /// Confidence score in `[0, 100]`
    pub confidence: u8,
}

impl From<&ScoredAnalysis> for AnalysisPayload {
    fn from(analysis: &ScoredAnalysis) -> Self {
        Self {
            summary: analysis.summary().to_string(),
            methodology: analysis.methodology().to_string(),
            bias_detection: analysis.bias().to_string(),
            research_gaps: analysis.gaps().to_string(),
            confidence: analysis.confidence,
        }
    }
}

/// Reply to `startAnalysis`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum AnalysisReply {
    /// The analysis completed
    Done {
        /// Scored fields
        result: AnalysisPayload,
    },
    /// The analysis failed
    Error {
        /// Human-readable message
        error: String,
    },
}

/// Reply to `getAnalysisResult`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusReply {
    /// An analysis is in flight
    pub running: bool,
    /// Last completed result, `null` when there is none
    pub result: Option<AnalysisPayload>,
}

/// Any reply
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Reply {
    /// Outcome of an analysis
    Analysis(AnalysisReply),
    /// Status snapshot
    Status(StatusReply),
}

impl Reply {
    /// Successful analysis reply
    pub fn done(analysis: &ScoredAnalysis) -> Self {
        Reply::Analysis(AnalysisReply::Done {
            result: analysis.into(),
        })
    }

    /// Error reply
    pub fn error(message: impl Into<String>) -> Self {
        Reply::Analysis(AnalysisReply::Error {
            error: message.into(),
        })
    }
}
