/// Retrieval-augmented question answering over the in-memory index
pub mod query_engine;
pub mod query_loop;

pub use query_engine::{Answer, QueryEngine, QueryEngineConfig};
pub use query_loop::{is_exit, run_query_loop, Responder, EXIT_SENTINEL};
