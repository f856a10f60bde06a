use std::path::PathBuf;

/// Ingestion configuration
#[derive(Debug, Clone)]
pub struct IngestConfig {
    /// Directory the provider artifacts are written to
    pub data_dir: PathBuf,
    /// Level applied to the workspace crates when `RUST_LOG` is unset
    pub log_level: String,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("../rag_data"),
            log_level: "info".to_string(),
        }
    }
}

impl IngestConfig {
    /// Filter directive used when `RUST_LOG` is unset
    pub fn log_directive(&self) -> String {
        ["rag_ingest", "airquality_data_services", "airquality_core"]
            .iter()
            .map(|target| format!("{}={}", target, self.log_level))
            .collect::<Vec<_>>()
            .join(",")
    }
}
