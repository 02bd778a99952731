//! Confidence scoring
//!
//! The score is a completeness proxy: it counts which fields the model
//! filled in and never inspects what they say. A fully populated but wrong
//! answer still scores 95. Treat it as a weak signal.

use crate::analysis::ParsedAnalysis;

/// All four fields present
pub const FULL_CONFIDENCE: u8 = 95;

/// One complete pair present (summary + methodology, or bias + gaps)
pub const PAIR_CONFIDENCE: u8 = 90;

/// Anything less
pub const BASELINE_CONFIDENCE: u8 = 80;

/// Reported with the failure placeholder
pub const FAILED_CONFIDENCE: u8 = 0;

/// Score a parsed analysis
///
/// Rules, first match wins:
/// 1. all four fields non-empty → 95
/// 2. summary and methodology non-empty, or bias and gaps non-empty → 90
/// 3. otherwise → 80
///
/// "Non-empty" means the trimmed field has length > 0.
pub fn score(parsed: &ParsedAnalysis) -> u8 {
    let summary = has_content(&parsed.summary);
    let methodology = has_content(&parsed.methodology);
    let bias = has_content(&parsed.bias);
    let gaps = has_content(&parsed.gaps);

    if summary && methodology && bias && gaps {
        FULL_CONFIDENCE
    } else if (summary && methodology) || (bias && gaps) {
        PAIR_CONFIDENCE
    } else {
        BASELINE_CONFIDENCE
    }
}

/// True if the value has any non-whitespace content
pub fn has_content(value: &str) -> bool {
    !value.trim().is_empty()
}
