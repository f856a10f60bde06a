pub mod artifact;
pub mod credential;
pub mod document;
pub mod region;

// Re-export common types
pub use artifact::{Artifact, CsvTable};
pub use credential::{Credential, CredentialError};
pub use document::{Document, DocumentSource};
pub use region::{BoundingBox, GeoPoint};
