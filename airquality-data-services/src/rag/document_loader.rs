use airquality_core::{Document, DocumentSource};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::DocumentError;
use crate::providers::airnow::AIRNOW_OUTPUT_FILE;
use crate::providers::aqs::AQS_OUTPUT_FILE;
use crate::providers::openaq::OPENAQ_OUTPUT_FILE;
use crate::providers::purpleair::PURPLEAIR_OUTPUT_FILE;

/// Default location of the Mon Valley master plan report
pub const DEFAULT_PDF_PATH: &str = "../Mon Valley Pollution Tracking System Master Plan .pdf";

/// Turns ingestion artifacts and an optional PDF report into documents
///
/// Artifacts are read as they are on disk; a missing artifact is skipped.
#[derive(Debug, Clone)]
pub struct DocumentLoader {
    data_dir: PathBuf,
    pdf_path: Option<PathBuf>,
}

impl DocumentLoader {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            pdf_path: None,
        }
    }

    pub fn with_pdf(mut self, pdf_path: impl Into<PathBuf>) -> Self {
        self.pdf_path = Some(pdf_path.into());
        self
    }

    /// Load every available source: AQS, PurpleAir, AirNow, OpenAQ, then the PDF
    pub fn load_all(&self) -> Result<Vec<Document>, DocumentError> {
        let mut documents = Vec::new();

        documents.extend(self.load_if_present(AQS_OUTPUT_FILE, load_aqs_documents)?);

        let csv_sources = [
            (PURPLEAIR_OUTPUT_FILE, DocumentSource::PurpleAir),
            (AIRNOW_OUTPUT_FILE, DocumentSource::EpaAirNow),
            (OPENAQ_OUTPUT_FILE, DocumentSource::OpenAq),
        ];
        for (file, source) in csv_sources {
            documents.extend(self.load_if_present(file, |path| load_csv_documents(path, source))?);
        }

        if let Some(pdf_path) = &self.pdf_path {
            documents.extend(load_pdf_documents(pdf_path)?);
        }

        tracing::info!("Loaded {} documents from {}", documents.len(), self.data_dir.display());
        Ok(documents)
    }

    fn load_if_present<F>(&self, file: &str, load: F) -> Result<Vec<Document>, DocumentError>
    where
        F: FnOnce(&Path) -> Result<Vec<Document>, DocumentError>,
    {
        let path = self.data_dir.join(file);
        if !path.exists() {
            tracing::warn!("Artifact {} not found, skipping", path.display());
            return Ok(Vec::new());
        }

        let documents = load(&path)?;
        tracing::debug!("{}: {} documents", path.display(), documents.len());
        Ok(documents)
    }
}

/// One document per element of the AQS response's `Data` array
pub fn load_aqs_documents(path: &Path) -> Result<Vec<Document>, DocumentError> {
    let raw = fs::read_to_string(path).map_err(|source| DocumentError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let body: Value = serde_json::from_str(&raw).map_err(|source| DocumentError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    let documents = body
        .get("Data")
        .and_then(Value::as_array)
        .map(|rows| {
            rows.iter()
                .map(|row| Document::new(DocumentSource::EpaAqs, row.to_string()))
                .collect()
        })
        .unwrap_or_default();

    Ok(documents)
}

/// One document per CSV data row, rendered as a JSON object keyed by header
pub fn load_csv_documents(
    path: &Path,
    source: DocumentSource,
) -> Result<Vec<Document>, DocumentError> {
    let csv_error = |source| DocumentError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(csv_error)?;
    let header = reader.headers().map_err(csv_error)?.clone();

    let mut documents = Vec::new();
    for record in reader.records() {
        let record = record.map_err(csv_error)?;

        let mut row = Map::new();
        for (i, column) in header.iter().enumerate() {
            let value = record.get(i).map(cell_to_json).unwrap_or(Value::Null);
            row.insert(column.to_string(), value);
        }

        documents.push(Document::new(source.clone(), Value::Object(row).to_string()));
    }

    Ok(documents)
}

/// Numeric cells become numbers and empty cells `null`
fn cell_to_json(cell: &str) -> Value {
    if cell.is_empty() {
        return Value::Null;
    }
    if let Ok(i) = cell.parse::<i64>() {
        return Value::from(i);
    }
    if let Ok(f) = cell.parse::<f64>() {
        if f.is_finite() {
            return Value::from(f);
        }
    }
    Value::String(cell.to_string())
}

/// One document per PDF page that has extractable text
///
/// A missing file yields no documents.
pub fn load_pdf_documents(path: &Path) -> Result<Vec<Document>, DocumentError> {
    if !path.exists() {
        tracing::info!("No PDF report at {}, continuing without it", path.display());
        return Ok(Vec::new());
    }

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    let pdf = lopdf::Document::load(path).map_err(|e| DocumentError::Pdf(e.to_string()))?;

    let mut documents = Vec::new();
    for page in pdf.get_pages().keys().copied() {
        match pdf.extract_text(&[page]) {
            Ok(text) if !text.trim().is_empty() => {
                documents.push(Document::new(
                    DocumentSource::Pdf {
                        file_name: file_name.clone(),
                        page,
                    },
                    text,
                ));
            }
            Ok(_) => tracing::debug!("{} page {} has no text", file_name, page),
            Err(e) => tracing::warn!("Could not extract text from {} page {}: {}", file_name, page, e),
        }
    }

    tracing::info!("Loaded {} pages from {}", documents.len(), file_name);
    Ok(documents)
}
