pub mod airnow;
pub mod aqs;
pub mod openaq;
pub mod purpleair;

use airquality_core::types::artifact::{lookup, render_cell};
use airquality_core::{Artifact, CsvTable};
use serde_json::Value;
use std::path::PathBuf;

use crate::artifact_writer::write_artifact;
use crate::error::IngestError;

// Re-export commonly used items
pub use airnow::AirNowProvider;
pub use aqs::AqsProvider;
pub use openaq::OpenAqProvider;
pub use purpleair::PurpleAirProvider;

/// What a provider run does with a failed fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// Return the error to the caller, which terminates the process
    Propagate,
    /// Log the error and finish normally without writing the artifact
    Report,
}

/// One air-quality API: how to call it and how to shape its response
pub trait Provider {
    /// Human-readable name used in user-facing messages
    fn label(&self) -> &'static str;

    fn endpoint(&self) -> &str;

    /// File name of the artifact inside the data directory
    fn output_file(&self) -> &'static str;

    fn error_policy(&self) -> ErrorPolicy {
        ErrorPolicy::Propagate
    }

    /// Query string, in the order it is sent
    fn query_params(&self) -> Vec<(&'static str, String)>;

    fn headers(&self) -> Vec<(&'static str, String)> {
        Vec::new()
    }

    /// Project the decoded response body onto the output schema
    fn extract(&self, body: Value) -> Result<Artifact, IngestError>;
}

/// Result of a provider run that did not terminate with an error
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    Saved {
        label: &'static str,
        path: PathBuf,
        records: usize,
    },
    Reported {
        label: &'static str,
        message: String,
    },
}

impl FetchOutcome {
    /// Message shown to the user at the end of a run
    pub fn message(&self) -> String {
        match self {
            FetchOutcome::Saved { label, path, .. } => {
                format!("{} data saved to {}", label, path.display())
            }
            FetchOutcome::Reported { label, message } => {
                format!("Error fetching {} data: {}", label, message)
            }
        }
    }
}

/// Executes providers: one GET, status check, JSON decode, extract, write
pub struct FetchRunner {
    client: reqwest::Client,
    data_dir: PathBuf,
}

impl FetchRunner {
    pub fn new(data_dir: impl Into<PathBuf>) -> Result<Self, IngestError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("airquality-rag-ingest/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self::with_client(client, data_dir))
    }

    pub fn with_client(client: reqwest::Client, data_dir: impl Into<PathBuf>) -> Self {
        Self {
            client,
            data_dir: data_dir.into(),
        }
    }

    pub fn output_path<P: Provider + ?Sized>(&self, provider: &P) -> PathBuf {
        self.data_dir.join(provider.output_file())
    }

    /// Call the provider's endpoint and extract its artifact without writing it
    pub async fn fetch<P: Provider + ?Sized>(&self, provider: &P) -> Result<Artifact, IngestError> {
        tracing::info!("Fetching {} data from {}", provider.label(), provider.endpoint());

        let mut request = self
            .client
            .get(provider.endpoint())
            .query(&provider.query_params());

        for (name, value) in provider.headers() {
            request = request.header(name, value);
        }

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let url = response.url().path().to_string();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            tracing::warn!("{} returned HTTP {}", provider.label(), status);
            return Err(IngestError::Status { status, url, body });
        }

        let bytes = response.bytes().await?;
        let body: Value = serde_json::from_slice(&bytes)?;

        let artifact = provider.extract(body)?;
        tracing::info!(
            "Extracted {} record(s) from {} response",
            artifact.record_count(),
            provider.label()
        );

        Ok(artifact)
    }

    /// Fetch and write, applying the provider's error policy
    pub async fn run<P: Provider + ?Sized>(&self, provider: &P) -> Result<FetchOutcome, IngestError> {
        let path = self.output_path(provider);

        let result = match self.fetch(provider).await {
            Ok(artifact) => write_artifact(&path, &artifact).map(|_| artifact.record_count()),
            Err(e) => Err(e),
        };

        match result {
            Ok(records) => Ok(FetchOutcome::Saved {
                label: provider.label(),
                path,
                records,
            }),
            Err(e) if provider.error_policy() == ErrorPolicy::Report => {
                tracing::error!("{} fetch failed: {}", provider.label(), e);
                Ok(FetchOutcome::Reported {
                    label: provider.label(),
                    message: e.to_string(),
                })
            }
            Err(e) => Err(e),
        }
    }
}

/// Output column and the JSON path its value is read from
pub type FieldMapping = (&'static str, &'static [&'static str]);

/// Build a CSV table from an array of JSON objects
///
/// Lookups are permissive: a missing or `null` step yields an empty cell.
pub fn project_rows(rows: &[Value], fields: &[FieldMapping]) -> CsvTable {
    let mut table = CsvTable::new(fields.iter().map(|(column, _)| *column));

    for row in rows {
        let cells = fields
            .iter()
            .map(|(_, path)| render_cell(lookup(row, path)))
            .collect();
        table.push_row(cells);
    }

    table
}

/// Borrow `body[key]` as an array or fail with a decode error
pub(crate) fn required_array<'a>(body: &'a Value, key: &str) -> Result<&'a Vec<Value>, IngestError> {
    body.get(key)
        .and_then(Value::as_array)
        .ok_or_else(|| IngestError::Decode(format!("missing `{}` array in response", key)))
}
