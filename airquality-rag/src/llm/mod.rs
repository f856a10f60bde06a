pub mod llm_client;
pub mod metrics;
pub mod prompt_formatter;

// Re-export commonly used items
pub use llm_client::{Completion, LanguageModel, LlmClient, LlmConfig, LlmError};
pub use metrics::{QueryMetrics, Stage, StageTimer};
pub use prompt_formatter::QaPromptFormatter;
