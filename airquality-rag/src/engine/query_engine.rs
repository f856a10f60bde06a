use airquality_data_services::{Embedder, ScoredDocument, VectorIndex};
use anyhow::{anyhow, Result};
use async_trait::async_trait;

use super::query_loop::Responder;
use crate::llm::{LanguageModel, QaPromptFormatter, QueryMetrics, Stage, StageTimer};

/// Configuration for the query engine
#[derive(Debug, Clone)]
pub struct QueryEngineConfig {
    /// Number of documents retrieved per question
    pub top_k: usize,
}

impl Default for QueryEngineConfig {
    fn default() -> Self {
        Self { top_k: 2 }
    }
}

/// An answered question
#[derive(Debug, Clone)]
pub struct Answer {
    pub text: String,
    pub sources: Vec<ScoredDocument>,
    pub metrics: QueryMetrics,
}

/// Query engine
///
/// For each question it:
/// 1. Embeds the question
/// 2. Retrieves the closest documents from the index
/// 3. Formats a prompt with those documents as context
/// 4. Asks the language model and returns its answer
///
/// Questions are independent; nothing is remembered between them.
pub struct QueryEngine<M> {
    index: VectorIndex,
    embedder: Box<dyn Embedder>,
    model: M,
    config: QueryEngineConfig,
}

impl<M: LanguageModel> QueryEngine<M> {
    pub fn new(
        index: VectorIndex,
        embedder: Box<dyn Embedder>,
        model: M,
        config: QueryEngineConfig,
    ) -> Self {
        tracing::info!(
            "Initializing query engine: documents={}, top_k={}",
            index.len(),
            config.top_k
        );

        Self {
            index,
            embedder,
            model,
            config,
        }
    }

    pub async fn query(&self, question: &str) -> Result<Answer> {
        let mut metrics = QueryMetrics::new();

        let timer = StageTimer::start(Stage::Embed);
        let query_embedding = self
            .embedder
            .embed(vec![question.to_string()])?
            .into_iter()
            .next()
            .ok_or_else(|| anyhow!("Embedder returned nothing for the question"))?;
        timer.finish(&mut metrics);

        let timer = StageTimer::start(Stage::Search);
        let sources = self.index.search(&query_embedding, self.config.top_k);
        timer.finish(&mut metrics);
        metrics.similarities = sources.iter().map(|s| s.similarity).collect();

        tracing::debug!(
            "Retrieved {:?}",
            sources
                .iter()
                .map(|s| s.document.source().to_string())
                .collect::<Vec<_>>()
        );

        let prompt = QaPromptFormatter::format(question, &sources);

        let timer = StageTimer::start(Stage::Generate);
        let response = self.model.complete(prompt).await?;
        timer.finish(&mut metrics);
        metrics.tokens_used = response.tokens_used;

        metrics.log();

        Ok(Answer {
            text: response.text,
            sources,
            metrics,
        })
    }
}

#[async_trait(?Send)]
impl<M: LanguageModel> Responder for QueryEngine<M> {
    async fn respond(&self, question: &str) -> Result<String> {
        Ok(self.query(question).await?.text)
    }
}
