//! Timing and retrieval quality for one answered question

use std::time::{Duration, Instant};

/// Stages of answering a question
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Embedding the question
    Embed,
    /// Searching the in-memory index
    Search,
    /// Waiting for the language model
    Generate,
}

#[derive(Debug, Clone, Default)]
pub struct QueryMetrics {
    embed: Duration,
    search: Duration,
    generate: Duration,
    /// Cosine similarity of each retrieved document, best first
    pub similarities: Vec<f32>,
    /// Tokens reported by the model, if any
    pub tokens_used: Option<u32>,
}

impl QueryMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, stage: Stage, elapsed: Duration) {
        match stage {
            Stage::Embed => self.embed += elapsed,
            Stage::Search => self.search += elapsed,
            Stage::Generate => self.generate += elapsed,
        }
    }

    pub fn stage(&self, stage: Stage) -> Duration {
        match stage {
            Stage::Embed => self.embed,
            Stage::Search => self.search,
            Stage::Generate => self.generate,
        }
    }

    pub fn total(&self) -> Duration {
        self.embed + self.search + self.generate
    }

    /// Number of documents placed in the prompt
    pub fn num_matches(&self) -> usize {
        self.similarities.len()
    }

    pub fn best_similarity(&self) -> Option<f32> {
        self.similarities.first().copied()
    }

    pub fn mean_similarity(&self) -> Option<f32> {
        if self.similarities.is_empty() {
            return None;
        }
        Some(self.similarities.iter().sum::<f32>() / self.similarities.len() as f32)
    }

    pub fn log(&self) {
        tracing::info!(
            embed_ms = self.stage(Stage::Embed).as_millis() as u64,
            search_ms = self.stage(Stage::Search).as_millis() as u64,
            generate_ms = self.stage(Stage::Generate).as_millis() as u64,
            matches = self.num_matches(),
            best_similarity = ?self.best_similarity(),
            mean_similarity = ?self.mean_similarity(),
            tokens = ?self.tokens_used,
            "Question answered in {}ms",
            self.total().as_millis()
        );
    }
}

/// Measures one stage and adds it to a [`QueryMetrics`]
pub struct StageTimer {
    stage: Stage,
    started: Instant,
}

impl StageTimer {
    pub fn start(stage: Stage) -> Self {
        Self {
            stage,
            started: Instant::now(),
        }
    }

    pub fn finish(self, metrics: &mut QueryMetrics) {
        metrics.record(self.stage, self.started.elapsed());
    }
}
