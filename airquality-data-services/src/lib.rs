pub mod artifact_writer;
pub mod error;
pub mod providers;
pub mod rag;

// Re-export commonly used items
pub use error::{DocumentError, IngestError};
pub use providers::{
    AirNowProvider, AqsProvider, ErrorPolicy, FetchOutcome, FetchRunner, OpenAqProvider,
    Provider, PurpleAirProvider,
};
pub use rag::{
    DocumentLoader, Embedder, FastEmbedder, ScoredDocument, VectorIndex, DEFAULT_PDF_PATH,
    EMBEDDING_DIMENSION,
};
