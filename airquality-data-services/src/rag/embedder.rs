use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};

use crate::error::DocumentError;

/// BGE-small-en-v1.5 output size
pub const EMBEDDING_DIMENSION: usize = 384;

/// Turns texts into dense vectors
pub trait Embedder {
    fn dimension(&self) -> usize;

    /// One embedding per input text, in input order
    fn embed(&self, texts: Vec<String>) -> Result<Vec<Vec<f32>>, DocumentError>;
}

/// Local ONNX embedder (downloads BGE-small-en-v1.5 on first use)
pub struct FastEmbedder {
    model: TextEmbedding,
}

impl FastEmbedder {
    pub fn new() -> Result<Self, DocumentError> {
        tracing::info!("Loading embedding model (BGE-small-en-v1.5)...");

        let model = TextEmbedding::try_new(
            InitOptions::new(EmbeddingModel::BGESmallENV15).with_show_download_progress(true),
        )
        .map_err(|e| DocumentError::Embedding(e.to_string()))?;

        tracing::info!("Embedding model ready");
        Ok(Self { model })
    }
}

impl Embedder for FastEmbedder {
    fn dimension(&self) -> usize {
        EMBEDDING_DIMENSION
    }

    fn embed(&self, texts: Vec<String>) -> Result<Vec<Vec<f32>>, DocumentError> {
        self.model
            .embed(texts, None)
            .map_err(|e| DocumentError::Embedding(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[ignore] // Downloads the embedding model
    fn test_fastembed_dimension() {
        let embedder = FastEmbedder::new().unwrap();
        let vectors = embedder
            .embed(vec!["PM2.5 in Clairton was elevated".to_string()])
            .unwrap();
        assert_eq!(vectors.len(), 1);
        assert_eq!(vectors[0].len(), EMBEDDING_DIMENSION);
    }
}
