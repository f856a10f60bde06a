//! Ingested artifacts on disk through retrieval and prompting to the printed answer

use airquality_core::{Artifact, CsvTable};
use airquality_data_services::artifact_writer::write_artifact;
use airquality_data_services::{DocumentError, DocumentLoader, Embedder, VectorIndex};
use airquality_rag::{
    run_query_loop, Completion, LanguageModel, LlmError, QueryEngine, QueryEngineConfig,
};
use async_trait::async_trait;
use serde_json::json;
use tempfile::TempDir;

/// [ozone, pm2.5, sensor] keyword counts
struct KeywordEmbedder;

impl Embedder for KeywordEmbedder {
    fn dimension(&self) -> usize {
        3
    }

    fn embed(&self, texts: Vec<String>) -> Result<Vec<Vec<f32>>, DocumentError> {
        Ok(texts
            .iter()
            .map(|t| {
                let t = t.to_lowercase();
                vec![
                    t.matches("ozone").count() as f32,
                    t.matches("pm2.5").count() as f32,
                    t.matches("sensor").count() as f32,
                ]
            })
            .collect())
    }
}

struct CannedModel;

#[async_trait(?Send)]
impl LanguageModel for CannedModel {
    async fn complete(&self, prompt: String) -> Result<Completion, LlmError> {
        assert!(prompt.contains("Context information is below."));
        Ok(Completion {
            text: "Ozone was moderate near Liberty.".to_string(),
            model: "llama3".to_string(),
            tokens_used: None,
        })
    }
}

fn seed_data_dir() -> TempDir {
    let dir = TempDir::new().unwrap();

    let aqs = json!({
        "Header": [{"status": "Success"}],
        "Data": [
            {"parameter": "PM2.5 - Local Conditions", "arithmetic_mean": 7.2, "local_site_name": "Clairton"},
            {"parameter": "PM2.5 - Local Conditions", "arithmetic_mean": 9.8, "local_site_name": "Liberty"}
        ]
    });
    write_artifact(&dir.path().join("epa_aqs.json"), &Artifact::Json(aqs)).unwrap();

    let mut openaq = CsvTable::new(["location", "parameter", "value", "unit"]);
    openaq.push_row(vec![
        "Liberty".into(),
        "ozone".into(),
        "0.041".into(),
        "ppm".into(),
    ]);
    write_artifact(&dir.path().join("openaq.csv"), &Artifact::Csv(openaq)).unwrap();

    dir
}

#[tokio::test]
async fn test_question_answered_from_ingested_artifacts() {
    let dir = seed_data_dir();

    let documents = DocumentLoader::new(dir.path())
        .with_pdf(dir.path().join("missing.pdf"))
        .load_all()
        .unwrap();
    // Two AQS rows, one OpenAQ row, no PDF
    assert_eq!(documents.len(), 3);

    let index = VectorIndex::build(documents, &KeywordEmbedder).unwrap();
    let engine = QueryEngine::new(
        index,
        Box::new(KeywordEmbedder),
        CannedModel,
        QueryEngineConfig { top_k: 1 },
    );

    let input = "How was ozone in Liberty?\nexit\n".as_bytes();
    let mut output = Vec::new();
    let answered = run_query_loop(&engine, input, &mut output).await.unwrap();
    assert_eq!(answered, 1);

    let printed = String::from_utf8(output).unwrap();
    assert!(printed.contains("\nAnswer:\nOzone was moderate near Liberty.\n"));

    let answer = engine.query("ozone?").await.unwrap();
    assert_eq!(answer.sources.len(), 1);
    assert_eq!(answer.sources[0].document.source().tag(), "openaq");
}

#[tokio::test]
async fn test_pm25_question_retrieves_aqs_rows() {
    let dir = seed_data_dir();

    let documents = DocumentLoader::new(dir.path())
        .with_pdf(dir.path().join("missing.pdf"))
        .load_all()
        .unwrap();
    let index = VectorIndex::build(documents, &KeywordEmbedder).unwrap();
    let engine = QueryEngine::new(
        index,
        Box::new(KeywordEmbedder),
        CannedModel,
        QueryEngineConfig::default(),
    );

    let answer = engine.query("What was the PM2.5 mean?").await.unwrap();
    assert_eq!(answer.sources.len(), 2);
    assert!(answer
        .sources
        .iter()
        .all(|s| s.document.source().tag() == "epa_aqs"));
    assert_eq!(answer.metrics.num_matches(), 2);
}
