//! Source documents and their origin
//!
//! Pages are classified by URL pattern into a [`SourceKind`]. The kind only
//! labels where text came from; site-specific scraping is not part of the
//! domain layer.

/// Where a paper came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SourceKind {
    /// arxiv.org
    Arxiv,
    /// pubmed.ncbi.nlm.nih.gov
    PubMed,
    /// scholar.google.com
    GoogleScholar,
    /// researchgate.net
    ResearchGate,
    /// ieee.org
    Ieee,
    /// acm.org
    Acm,
    /// springer.com
    Springer,
    /// nature.com
    Nature,
    /// sciencedirect.com
    ScienceDirect,
    /// Anything else, including local files
    #[default]
    Generic,
}

/// URL fragment → kind, checked in order. First match wins.
const URL_PATTERNS: &[(&str, SourceKind)] = &[
    ("arxiv.org", SourceKind::Arxiv),
    ("pubmed.ncbi.nlm.nih.gov", SourceKind::PubMed),
    ("scholar.google.com", SourceKind::GoogleScholar),
    ("researchgate.net", SourceKind::ResearchGate),
    ("ieee.org", SourceKind::Ieee),
    ("acm.org", SourceKind::Acm),
    ("springer.com", SourceKind::Springer),
    ("nature.com", SourceKind::Nature),
    ("sciencedirect.com", SourceKind::ScienceDirect),
];

impl SourceKind {
    /// Classify a URL
    pub fn from_url(url: &str) -> Self {
        let url = url.to_lowercase();
        URL_PATTERNS
            .iter()
            .find(|(pattern, _)| url.contains(pattern))
            .map(|(_, kind)| *kind)
            .unwrap_or(SourceKind::Generic)
    }

    /// Stable identifier
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::Arxiv => "arxiv",
            SourceKind::PubMed => "pubmed",
            SourceKind::GoogleScholar => "scholar",
            SourceKind::ResearchGate => "researchgate",
            SourceKind::Ieee => "ieee",
            SourceKind::Acm => "acm",
            SourceKind::Springer => "springer",
            SourceKind::Nature => "nature",
            SourceKind::ScienceDirect => "sciencedirect",
            SourceKind::Generic => "generic",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            SourceKind::Arxiv => "arXiv",
            SourceKind::PubMed => "PubMed",
            SourceKind::GoogleScholar => "Google Scholar",
            SourceKind::ResearchGate => "ResearchGate",
            SourceKind::Ieee => "IEEE",
            SourceKind::Acm => "ACM",
            SourceKind::Springer => "Springer",
            SourceKind::Nature => "Nature",
            SourceKind::ScienceDirect => "ScienceDirect",
            SourceKind::Generic => "Web Page",
        }
    }
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Raw text produced by a source adapter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDocument {
    /// Document title
    pub title: String,

    /// Extracted UTF-8 text
    pub text: String,

    /// Origin URL, if the text came from a page
    pub url: Option<String>,

    /// Classified origin
    pub kind: SourceKind,
}

impl SourceDocument {
    /// Create a document with no URL
    pub fn new(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            text: text.into(),
            url: None,
            kind: SourceKind::Generic,
        }
    }

    /// Attach a URL and classify it
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        let url = url.into();
        self.kind = SourceKind::from_url(&url);
        self.url = Some(url);
        self
    }

    /// True when no text was extracted
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}
