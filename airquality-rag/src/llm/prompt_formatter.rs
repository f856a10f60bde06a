use airquality_data_services::ScoredDocument;

/// Assistant persona placed at the top of every prompt
pub const ASSISTANT_PREAMBLE: &str = "You are BreatheAI, an air quality assistant for the Mon Valley region of \
Pennsylvania (Clairton, the U.S. Steel Clairton Works and surrounding communities). \
You answer questions about local air quality readings, pollutants such as PM2.5, \
and their health effects.";

const CONTEXT_RULE: &str = "---------------------";

/// Formatter for question-answering prompts with or without retrieved context
pub struct QaPromptFormatter;

impl QaPromptFormatter {
    /// Prompt for a question with the retrieved documents as context
    ///
    /// Falls back to [`QaPromptFormatter::format_without_context`] when
    /// nothing was retrieved.
    pub fn format(question: &str, retrieved: &[ScoredDocument]) -> String {
        if retrieved.is_empty() {
            return Self::format_without_context(question);
        }

        let mut prompt = String::new();

        prompt.push_str(ASSISTANT_PREAMBLE);
        prompt.push_str("\n\n");
        prompt.push_str("Context information is below.\n");
        prompt.push_str(CONTEXT_RULE);
        prompt.push('\n');

        for (i, hit) in retrieved.iter().enumerate() {
            if i > 0 {
                prompt.push('\n');
            }
            prompt.push_str(&format!("[{}]\n", hit.document.source()));
            prompt.push_str(hit.document.text().trim_end());
            prompt.push('\n');
        }

        prompt.push_str(CONTEXT_RULE);
        prompt.push('\n');
        prompt.push_str("Given the context information and not prior knowledge, answer the query.\n");
        prompt.push_str(&format!("Query: {}\n", question));
        prompt.push_str("Answer: ");

        prompt
    }

    /// Prompt used when the index returned nothing
    pub fn format_without_context(question: &str) -> String {
        let mut prompt = String::new();

        prompt.push_str(ASSISTANT_PREAMBLE);
        prompt.push_str("\n\n");
        prompt.push_str("No local air quality documents are available for this question.\n");
        prompt.push_str("Answer the query, and say so if local data would be needed.\n");
        prompt.push_str(&format!("Query: {}\n", question));
        prompt.push_str("Answer: ");

        prompt
    }
}
