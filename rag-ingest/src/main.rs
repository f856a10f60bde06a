mod config;

use airquality_data_services::{
    AirNowProvider, AqsProvider, FetchOutcome, FetchRunner, OpenAqProvider, PurpleAirProvider,
};
use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::IngestConfig;

/// Air-quality ingestion CLI
///
/// Fetches one provider's observations around Clairton, PA and writes them
/// to the shared RAG data directory, replacing the previous file.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory the artifacts are written to
    #[arg(short = 'd', long, default_value = "../rag_data")]
    data_dir: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short = 'l', long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    provider: ProviderCommand,
}

#[derive(Subcommand, Debug, PartialEq)]
enum ProviderCommand {
    /// EPA AirNow observations (needs AIRNOW_API_KEY) -> epa_airnow.csv
    Airnow {
        /// Observation date (YYYY-MM-DD), defaults to yesterday UTC
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// EPA AQS daily PM2.5 for Allegheny County (needs AQS_EMAIL, AQS_KEY) -> epa_aqs.json
    Aqs,
    /// OpenAQ latest measurements -> openaq.csv
    Openaq,
    /// PurpleAir sensors in the Clairton box (needs PURPLEAIR_API_KEY) -> purpleair.csv
    Purpleair,
}

impl Args {
    fn config(&self) -> IngestConfig {
        IngestConfig {
            data_dir: self.data_dir.clone(),
            log_level: self.log_level.to_lowercase(),
        }
    }
}

/// Build the provider (credentials are checked here, before any request) and run it
async fn ingest(command: ProviderCommand, runner: &FetchRunner) -> Result<FetchOutcome> {
    let outcome = match command {
        ProviderCommand::Airnow { date } => {
            let mut provider = AirNowProvider::from_env()?;
            if let Some(date) = date {
                provider = provider.with_date(date);
            }
            info!("AirNow observation date: {}", provider.date());
            runner.run(&provider).await?
        }
        ProviderCommand::Aqs => runner.run(&AqsProvider::from_env()?).await?,
        ProviderCommand::Openaq => runner.run(&OpenAqProvider::new()).await?,
        ProviderCommand::Purpleair => runner.run(&PurpleAirProvider::from_env()?).await?,
    };

    Ok(outcome)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = args.config();

    // Initialize logging; stdout only carries the final status line
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.log_directive())))
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();

    info!("Data directory: {}", config.data_dir.display());

    let runner = FetchRunner::new(&config.data_dir)?;
    let outcome = ingest(args.provider, &runner).await?;

    if let FetchOutcome::Saved { records, .. } = &outcome {
        info!("{} record(s) written", records);
    }
    println!("{}", outcome.message());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_subcommands() {
        let args = Args::try_parse_from(["rag-ingest", "openaq"]).unwrap();
        assert_eq!(args.provider, ProviderCommand::Openaq);
        assert_eq!(args.config().data_dir, IngestConfig::default().data_dir);

        let args = Args::try_parse_from(["rag-ingest", "--data-dir", "/tmp/aq", "purpleair"]).unwrap();
        assert_eq!(args.provider, ProviderCommand::Purpleair);
        assert_eq!(args.config().data_dir, PathBuf::from("/tmp/aq"));
    }

    #[test]
    fn test_parse_airnow_date() {
        let args = Args::try_parse_from(["rag-ingest", "airnow", "--date", "2024-01-01"]).unwrap();
        assert_eq!(
            args.provider,
            ProviderCommand::Airnow {
                date: NaiveDate::from_ymd_opt(2024, 1, 1)
            }
        );

        assert!(Args::try_parse_from(["rag-ingest", "airnow", "--date", "yesterday"]).is_err());
    }

    #[test]
    fn test_provider_required() {
        assert!(Args::try_parse_from(["rag-ingest"]).is_err());
    }

    #[test]
    fn test_log_level_is_lowercased() {
        let args = Args::try_parse_from(["rag-ingest", "-l", "DEBUG", "aqs"]).unwrap();
        assert_eq!(args.config().log_level, "debug");
    }
}
