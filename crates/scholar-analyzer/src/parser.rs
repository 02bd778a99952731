//! Parse model output into the four analysis fields

use regex::Regex;
use scholar_domain::ParsedAnalysis;
use std::sync::LazyLock;
use tracing::{debug, warn};

/// Numbered-section pattern; the first marker may appear anywhere
static SECTIONS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?s)1\.?\s*(?:Summary:)?\s*(.*?)\n2\.?\s*(?:Methodology:)?\s*(.*?)\n3\.?\s*(?:Bias:)?\s*(.*?)\n4\.?\s*(?:Gaps:)?\s*(.*)",
    )
    .expect("section pattern is valid")
});

/// How a response was turned into fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseStrategy {
    /// The numbered-section format was found
    Structured,
    /// Raw lines were assigned to fields in order
    Positional,
}

/// Parse a model response; never fails
pub fn parse_response(raw: &str) -> ParsedAnalysis {
    parse_with_strategy(raw).0
}

/// Parse a model response and report which strategy produced the fields
pub fn parse_with_strategy(raw: &str) -> (ParsedAnalysis, ParseStrategy) {
    if let Some(caps) = SECTIONS.captures(raw) {
        let field = |i: usize| caps.get(i).map_or("", |m| m.as_str().trim()).to_string();
        let parsed = ParsedAnalysis::new(field(1), field(2), field(3), field(4));
        debug!("Parsed structured response: {} of 4 fields filled", parsed.filled_count());
        return (parsed, ParseStrategy::Structured);
    }

    warn!("Response did not match the numbered format, falling back to line order");
    (parse_positional(raw), ParseStrategy::Positional)
}

/// Assign the first four lines to summary, methodology, bias and gaps
fn parse_positional(raw: &str) -> ParsedAnalysis {
    let mut lines = raw.lines().map(str::to_string);
    let mut next = || lines.next().unwrap_or_default();
    let summary = next();
    let methodology = next();
    let bias = next();
    let gaps = next();
    ParsedAnalysis::new(summary, methodology, bias, gaps)
}
