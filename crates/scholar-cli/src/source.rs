//! Paper sources: file, stdin and inline text.

use scholar_domain::traits::TextSource;
use scholar_domain::SourceDocument;
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use thiserror::Error;

/// Extensions accepted as plain text.
pub const PLAIN_TEXT_EXTENSIONS: [&str; 4] = ["txt", "text", "md", "markdown"];

/// Errors producing paper text.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Not a plain-text document
    #[error("Unsupported file type: {0}. Please provide a plain-text document (.txt or .md)")]
    UnsupportedFileType(String),

    /// Reading failed
    #[error("Failed to read {origin}: {source}")]
    Read {
        /// What was being read
        origin: String,
        /// Underlying error
        source: io::Error,
    },
}

/// A plain-text file on disk.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
    title: Option<String>,
    url: Option<String>,
}

impl FileSource {
    /// Read `path`; the title defaults to the file stem.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            title: None,
            url: None,
        }
    }

    /// Override the title.
    pub fn with_title(mut self, title: Option<String>) -> Self {
        self.title = title;
        self
    }

    /// Attach the page URL.
    pub fn with_url(mut self, url: Option<String>) -> Self {
        self.url = url;
        self
    }

    fn check_type(&self) -> Result<(), SourceError> {
        match self.path.extension().and_then(|ext| ext.to_str()) {
            None => Ok(()),
            Some(ext) if PLAIN_TEXT_EXTENSIONS.contains(&ext.to_lowercase().as_str()) => Ok(()),
            Some(ext) => Err(SourceError::UnsupportedFileType(format!(".{}", ext))),
        }
    }
}

impl TextSource for FileSource {
    type Error = SourceError;

    fn extract(&self) -> Result<SourceDocument, SourceError> {
        self.check_type()?;
        let text = fs::read_to_string(&self.path).map_err(|source| SourceError::Read {
            origin: self.path.display().to_string(),
            source,
        })?;

        let title = self.title.clone().unwrap_or_else(|| {
            self.path
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_else(|| "Uploaded Document".to_string())
        });
        Ok(document(title, text, self.url.clone()))
    }
}

/// Text piped on stdin.
#[derive(Debug, Clone, Default)]
pub struct StdinSource {
    title: Option<String>,
    url: Option<String>,
}

impl StdinSource {
    /// Read stdin with an optional title and URL.
    pub fn new(title: Option<String>, url: Option<String>) -> Self {
        Self { title, url }
    }
}

impl TextSource for StdinSource {
    type Error = SourceError;

    fn extract(&self) -> Result<SourceDocument, SourceError> {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .map_err(|source| SourceError::Read {
                origin: "stdin".to_string(),
                source,
            })?;
        let title = self.title.clone().unwrap_or_else(|| "Standard Input".to_string());
        Ok(document(title, text, self.url.clone()))
    }
}

/// Text given on the command line.
#[derive(Debug, Clone)]
pub struct InlineSource {
    text: String,
    title: Option<String>,
    url: Option<String>,
}

impl InlineSource {
    /// Wrap `text`.
    pub fn new(text: impl Into<String>, title: Option<String>, url: Option<String>) -> Self {
        Self {
            text: text.into(),
            title,
            url,
        }
    }
}

impl TextSource for InlineSource {
    type Error = SourceError;

    fn extract(&self) -> Result<SourceDocument, SourceError> {
        let title = self.title.clone().unwrap_or_else(|| "Untitled Paper".to_string());
        Ok(document(title, self.text.clone(), self.url.clone()))
    }
}

fn document(title: String, text: String, url: Option<String>) -> SourceDocument {
    let doc = SourceDocument::new(title, text);
    match url {
        Some(url) => doc.with_url(url),
        None => doc,
    }
}
