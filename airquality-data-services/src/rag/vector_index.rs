use airquality_core::Document;
use std::cmp::Ordering;

use super::embedder::Embedder;
use crate::error::DocumentError;

/// Texts sent to the embedder per call
const EMBED_BATCH_SIZE: usize = 100;

/// A search hit
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredDocument {
    pub document: Document,
    /// Cosine similarity, -1.0 to 1.0
    pub similarity: f32,
}

#[derive(Debug)]
struct IndexEntry {
    document: Document,
    embedding: Vec<f32>,
    magnitude: f32,
}

/// In-memory exact cosine-similarity index, built once and then only read
#[derive(Debug)]
pub struct VectorIndex {
    entries: Vec<IndexEntry>,
}

impl VectorIndex {
    /// Embed all documents in batches and index them
    pub fn build<E: Embedder + ?Sized>(
        documents: Vec<Document>,
        embedder: &E,
    ) -> Result<Self, DocumentError> {
        let mut pairs = Vec::with_capacity(documents.len());
        let mut remaining = documents.into_iter().peekable();

        while remaining.peek().is_some() {
            let batch: Vec<Document> = remaining.by_ref().take(EMBED_BATCH_SIZE).collect();
            let texts: Vec<String> = batch.iter().map(|d| d.text().to_string()).collect();

            tracing::debug!("Embedding batch of {} documents...", texts.len());
            let embeddings = embedder.embed(texts)?;

            if embeddings.len() != batch.len() {
                return Err(DocumentError::Embedding(format!(
                    "expected {} embeddings, got {}",
                    batch.len(),
                    embeddings.len()
                )));
            }
            if let Some(bad) = embeddings.iter().find(|e| e.len() != embedder.dimension()) {
                return Err(DocumentError::Embedding(format!(
                    "expected {}-dimensional embeddings, got {}",
                    embedder.dimension(),
                    bad.len()
                )));
            }

            pairs.extend(batch.into_iter().zip(embeddings));
        }

        tracing::info!("Indexed {} documents", pairs.len());
        Ok(Self::from_embeddings(pairs))
    }

    pub fn from_embeddings(pairs: Vec<(Document, Vec<f32>)>) -> Self {
        let entries = pairs
            .into_iter()
            .map(|(document, embedding)| IndexEntry {
                magnitude: magnitude(&embedding),
                document,
                embedding,
            })
            .collect();

        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The `top_k` most similar documents, best first; ties keep index order
    pub fn search(&self, query: &[f32], top_k: usize) -> Vec<ScoredDocument> {
        if top_k == 0 || self.entries.is_empty() {
            return Vec::new();
        }

        let query_magnitude = magnitude(query);
        let mut scored: Vec<(usize, f32)> = self
            .entries
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                let sim = cosine_similarity(query, &entry.embedding, query_magnitude, entry.magnitude);
                (i, sim)
            })
            .collect();

        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
        scored.truncate(top_k);

        scored
            .into_iter()
            .map(|(i, similarity)| ScoredDocument {
                document: self.entries[i].document.clone(),
                similarity,
            })
            .collect()
    }
}

fn magnitude(v: &[f32]) -> f32 {
    v.iter().map(|x| x * x).sum::<f32>().sqrt()
}

/// Cosine similarity given precomputed magnitudes; 0.0 when either is zero
pub fn cosine_similarity(a: &[f32], b: &[f32], mag_a: f32, mag_b: f32) -> f32 {
    if mag_a == 0.0 || mag_b == 0.0 {
        return 0.0;
    }

    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    dot / (mag_a * mag_b)
}
