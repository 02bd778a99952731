//! Scholar Analyzer
//!
//! Turns paper text into a scored four-part analysis using an LLM.
//!
//! # Overview
//!
//! The Analyzer builds the review prompt, dispatches it through a
//! `TextGenerator`, parses the reply into summary, methodology, bias and
//! research gaps, and scores how complete the reply was.
//!
//! # Architecture
//!
//! ```text
//! Text → PromptBuilder → TextGenerator → parser → score → AnalysisSlot
//! ```
//!
//! # Key Features
//!
//! - **Single flight**: one analysis at a time per shared slot; a second
//!   request is rejected with `AnalyzerError::Busy`
//! - **Tolerant parsing**: numbered sections first, line order as a fallback
//! - **Status polling**: running flag and last result are observable while an
//!   analysis is in flight
//! - **Message contract**: `startAnalysis` / `getAnalysisResult` JSON messages
//!
//! # Example Usage
//!
//! ```
//! use scholar_analyzer::{Analyzer, AnalyzerConfig};
//! use scholar_llm::MockProvider;
//!
//! # let rt = tokio::runtime::Runtime::new().unwrap();
//! # rt.block_on(async {
//! let llm = MockProvider::new("1. Summary: S\n2. Methodology: M\n3. Bias: B\n4. Gaps: G");
//! let analyzer = Analyzer::new(llm, AnalyzerConfig::default());
//!
//! let analysis = analyzer.analyze("A paper about graphs.").await.unwrap();
//! assert_eq!(analysis.summary(), "S");
//! assert_eq!(analysis.confidence, 95);
//! # });
//! ```

#![warn(missing_docs)]

mod analyzer;
mod config;
mod error;
mod parser;
mod prompt;
pub mod protocol;
mod slot;
mod types;


pub use analyzer::{AnalysisHandle, Analyzer};
pub use config::{AnalyzerConfig, ProviderConfig, DEFAULT_API_KEY_ENV};
pub use error::AnalyzerError;
pub use parser::{parse_response, parse_with_strategy, ParseStrategy};
pub use prompt::PromptBuilder;
pub use protocol::{Message, Reply};
pub use slot::{AnalysisSlot, AnalysisStatus, FlightGuard};
pub use types::AnalysisReport;
