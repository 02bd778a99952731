//! Trait definitions for external interactions
//!
//! These traits define the boundaries between domain logic and infrastructure.
//! Implementations live in other crates.

use crate::SourceDocument;
use std::future::Future;

/// Trait for remote text generation
///
/// Implemented by the infrastructure layer (scholar-llm). One call is one
/// attempt; implementations must not retry on their own.
pub trait TextGenerator {
    /// Error type for generation
    type Error;

    /// Send a prompt and return the raw model output
    fn generate(&self, prompt: &str)
        -> impl Future<Output = Result<String, Self::Error>> + Send;
}

/// Trait for producing raw text from a document source
///
/// Implemented by front ends (scholar-cli). Each variant knows one kind of
/// source: a file, stdin, an inline string.
pub trait TextSource {
    /// Error type for extraction
    type Error;

    /// Extract the document text
    fn extract(&self) -> Result<SourceDocument, Self::Error>;
}
