mod config;

use std::path::PathBuf;

use airquality_data_services::{DocumentLoader, FastEmbedder, VectorIndex, DEFAULT_PDF_PATH};
use airquality_rag::{run_query_loop, LlmClient, QueryEngine};
use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::DemoConfig;

#[derive(Parser, Debug)]
#[command(name = "rag-demo")]
#[command(about = "Ask questions about Mon Valley air quality using a local LLM")]
struct Cli {
    /// Directory holding the ingested artifacts
    #[arg(long, default_value = "../rag_data")]
    data_dir: PathBuf,

    /// Planning document to index alongside the sensor data
    #[arg(long, default_value = DEFAULT_PDF_PATH)]
    pdf: PathBuf,

    /// OpenAI-compatible base URL of the local model server
    #[arg(long, default_value = "http://127.0.0.1:11434/v1")]
    llm_url: String,

    /// Model name
    #[arg(long, default_value = "llama3")]
    model: String,

    /// Documents retrieved per question
    #[arg(long, default_value = "2")]
    top_k: usize,

    /// Seconds to wait for the model before giving up
    #[arg(long, default_value = "120")]
    timeout_seconds: u64,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Only check that the model server answers, then exit
    #[arg(long)]
    check: bool,
}

impl Cli {
    fn into_config(self) -> DemoConfig {
        let mut config = DemoConfig {
            data_dir: self.data_dir,
            pdf_path: self.pdf,
            ..DemoConfig::default()
        };
        config.llm.base_url = self.llm_url;
        config.llm.model = self.model;
        config.llm.timeout_seconds = self.timeout_seconds;
        config.engine.top_k = self.top_k;
        config
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging; stdout is kept for the conversation itself
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "rag_demo={},airquality_rag={},airquality_data_services={}",
                cli.log_level, cli.log_level, cli.log_level
            ))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let check_only = cli.check;
    let config = cli.into_config();

    tracing::info!("Configuration:");
    tracing::info!("  Data dir: {}", config.data_dir.display());
    tracing::info!("  PDF: {}", config.pdf_path.display());
    tracing::info!("  LLM: {} ({})", config.llm.model, config.llm.base_url);
    tracing::info!("  Top K: {}", config.engine.top_k);

    let llm = LlmClient::new(config.llm.clone());

    if check_only {
        let reply = llm
            .check_connection()
            .await
            .context("Could not reach the local model server")?;
        println!("Connected to {}: {}", reply.model, reply.text);
        return Ok(());
    }

    let documents = DocumentLoader::new(&config.data_dir)
        .with_pdf(&config.pdf_path)
        .load_all()?;
    println!("Indexing {} documents...", documents.len());

    let embedder = FastEmbedder::new()?;
    let index = VectorIndex::build(documents, &embedder)?;
    let engine = QueryEngine::new(index, Box::new(embedder), llm, config.engine);

    let stdin = std::io::stdin();
    run_query_loop(&engine, stdin.lock(), std::io::stdout()).await?;

    Ok(())
}
