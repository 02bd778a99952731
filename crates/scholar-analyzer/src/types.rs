//! Analysis report types

use scholar_domain::ScoredAnalysis;
use std::time::Duration;
use uuid::Uuid;

/// Outcome of one analysis that never fails
///
/// On error `analysis` is the failed placeholder and `error` carries the
/// human-readable message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisReport {
    /// Identifier for this run (UUIDv7, time-ordered)
    pub id: Uuid,

    /// The scored analysis or the failed placeholder
    pub analysis: ScoredAnalysis,

    /// Human-readable error message
    pub error: Option<String>,

    /// Wall time from dispatch to result
    pub processing_time_ms: u64,
}

impl AnalysisReport {
    /// True when the analysis completed without error
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }

    /// Processing time in seconds
    pub fn processing_secs(&self) -> f64 {
        self.processing_time_ms as f64 / 1000.0
    }
}

/// Whole milliseconds in `elapsed`, saturating at `u64::MAX`
pub(crate) fn millis(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
}
