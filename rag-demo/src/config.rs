use std::path::PathBuf;

use airquality_data_services::DEFAULT_PDF_PATH;
use airquality_rag::{LlmConfig, QueryEngineConfig};

/// Demo configuration
#[derive(Debug, Clone)]
pub struct DemoConfig {
    /// Directory holding the ingested artifacts
    pub data_dir: PathBuf,
    /// Planning document indexed page by page; skipped when absent
    pub pdf_path: PathBuf,
    pub llm: LlmConfig,
    pub engine: QueryEngineConfig,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("../rag_data"),
            pdf_path: PathBuf::from(DEFAULT_PDF_PATH),
            llm: LlmConfig::default(),
            engine: QueryEngineConfig::default(),
        }
    }
}
