pub mod types;

// Re-export commonly used items
pub use types::{
    Artifact, BoundingBox, Credential, CredentialError, CsvTable, Document, DocumentSource,
    GeoPoint,
};
