use std::fmt;

/// Where a document came from
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DocumentSource {
    EpaAirNow,
    EpaAqs,
    OpenAq,
    PurpleAir,
    /// One page of a PDF report (1-based page number)
    Pdf { file_name: String, page: u32 },
}

impl DocumentSource {
    /// Provenance tag stored with each document
    pub fn tag(&self) -> &'static str {
        match self {
            DocumentSource::EpaAirNow => "epa_airnow",
            DocumentSource::EpaAqs => "epa_aqs",
            DocumentSource::OpenAq => "openaq",
            DocumentSource::PurpleAir => "purpleair",
            DocumentSource::Pdf { .. } => "pdf",
        }
    }
}

impl fmt::Display for DocumentSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentSource::Pdf { file_name, page } => {
                write!(f, "pdf: {} (page {})", file_name, page)
            }
            other => f.write_str(other.tag()),
        }
    }
}

/// A unit of retrievable text with its provenance
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    source: DocumentSource,
    text: String,
}

impl Document {
    pub fn new(source: DocumentSource, text: impl Into<String>) -> Self {
        Self {
            source,
            text: text.into(),
        }
    }

    pub fn source(&self) -> &DocumentSource {
        &self.source
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}
