pub mod engine;
pub mod llm;

// Re-export commonly used items from llm module
pub use llm::{
    Completion, LanguageModel, LlmClient, LlmConfig, LlmError, QaPromptFormatter, QueryMetrics,
};

// Re-export commonly used items from engine module
pub use engine::{is_exit, run_query_loop, Answer, QueryEngine, QueryEngineConfig, Responder};
