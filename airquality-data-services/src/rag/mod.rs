pub mod document_loader;
pub mod embedder;
pub mod vector_index;

// Re-export commonly used items
pub use document_loader::{DocumentLoader, DEFAULT_PDF_PATH};
pub use embedder::{Embedder, FastEmbedder, EMBEDDING_DIMENSION};
pub use vector_index::{ScoredDocument, VectorIndex};
