//! Analysis value types

use crate::confidence::{self, FAILED_CONFIDENCE};

/// The four fields extracted from a model response
///
/// Every field is always present. A field the model did not fill is an
/// empty string, never missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ParsedAnalysis {
    /// Concise summary of the paper
    pub summary: String,

    /// Methodology and datasets used
    pub methodology: String,

    /// Potential biases or limitations
    pub bias: String,

    /// Unexplored research areas or literature gaps
    pub gaps: String,
}

impl ParsedAnalysis {
    /// Create a parsed analysis from its four fields
    pub fn new(
        summary: impl Into<String>,
        methodology: impl Into<String>,
        bias: impl Into<String>,
        gaps: impl Into<String>,
    ) -> Self {
        Self {
            summary: summary.into(),
            methodology: methodology.into(),
            bias: bias.into(),
            gaps: gaps.into(),
        }
    }

    /// Fields in display order, paired with their labels
    pub fn fields(&self) -> [(&'static str, &str); 4] {
        [
            ("Summary", &self.summary),
            ("Methodology", &self.methodology),
            ("Bias", &self.bias),
            ("Research Gaps", &self.gaps),
        ]
    }

    /// Number of fields with non-whitespace content
    pub fn filled_count(&self) -> usize {
        self.fields()
            .iter()
            .filter(|(_, value)| confidence::has_content(value))
            .count()
    }

    /// True when no field has any content
    pub fn is_empty(&self) -> bool {
        self.filled_count() == 0
    }
}

/// A parsed analysis together with its confidence score
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ScoredAnalysis {
    /// The extracted fields
    pub parsed: ParsedAnalysis,

    /// Completeness heuristic in `[0, 100]`
    pub confidence: u8,
}

impl ScoredAnalysis {
    /// Score a parsed analysis
    pub fn from_parsed(parsed: ParsedAnalysis) -> Self {
        let confidence = confidence::score(&parsed);
        Self { parsed, confidence }
    }

    /// Placeholder reported when an analysis aborts on a hard error
    ///
    /// All fields are empty and the confidence is 0.
    pub fn failed() -> Self {
        Self {
            parsed: ParsedAnalysis::default(),
            confidence: FAILED_CONFIDENCE,
        }
    }

    /// True for the failure placeholder
    pub fn is_failed(&self) -> bool {
        self.confidence == FAILED_CONFIDENCE && self.parsed.is_empty()
    }

    /// Summary field
    pub fn summary(&self) -> &str {
        &self.parsed.summary
    }

    /// Methodology field
    pub fn methodology(&self) -> &str {
        &self.parsed.methodology
    }

    /// Bias field
    pub fn bias(&self) -> &str {
        &self.parsed.bias
    }

    /// Research gaps field
    pub fn gaps(&self) -> &str {
        &self.parsed.gaps
    }
}

impl From<ParsedAnalysis> for ScoredAnalysis {
    fn from(parsed: ParsedAnalysis) -> Self {
        Self::from_parsed(parsed)
    }
}
