//! Scholar Domain Layer
//!
//! Core value types and trait interfaces for the Scholar paper analysis engine.
//! Like the rest of the domain layer it has no external dependencies and does
//! no I/O: network dispatch lives in `scholar-llm`, orchestration in
//! `scholar-analyzer`.
//!
//! ## Key Concepts
//!
//! - **ParsedAnalysis**: The four analysis fields extracted from model output
//! - **ScoredAnalysis**: A parsed analysis plus its confidence score
//! - **Confidence**: A field-completeness heuristic in `[0, 100]`
//! - **SourceKind**: Where a paper came from, chosen by URL pattern
//!
//! ## Example
//!
//! ```
//! use scholar_domain::{ParsedAnalysis, ScoredAnalysis};
//!
//! let parsed = ParsedAnalysis::new("A short summary", "Survey data", "", "");
//! let scored = ScoredAnalysis::from_parsed(parsed);
//! assert_eq!(scored.confidence, 90);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod analysis;
pub mod confidence;
pub mod source;
pub mod traits;

// Re-exports for convenience
pub use analysis::{ParsedAnalysis, ScoredAnalysis};
pub use confidence::score;
pub use source::{SourceDocument, SourceKind};
