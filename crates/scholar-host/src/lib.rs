//! Scholar Message Host
//!
//! Serves the analyzer's message contract over newline-delimited JSON, so a
//! browser extension native-messaging bridge or any other process can drive
//! analyses through stdin/stdout.
//!
//! Two actions are understood:
//! - `startAnalysis` - analyze `text` and reply `done` or `error`
//! - `getAnalysisResult` - reply with the running flag and last result
//!
//! # Example
//!
//! ```no_run
//! use scholar_analyzer::{Analyzer, AnalyzerConfig};
//! use scholar_host::Host;
//! use scholar_llm::MockProvider;
//!
//! # async fn example() -> Result<(), scholar_host::HostError> {
//! let analyzer = Analyzer::new(MockProvider::default(), AnalyzerConfig::default());
//! let host = Host::new(analyzer);
//! let stdin = tokio::io::BufReader::new(tokio::io::stdin());
//! host.serve(stdin, tokio::io::stdout()).await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod error;
pub mod protocol;
mod server;

pub use error::HostError;
pub use server::Host;
