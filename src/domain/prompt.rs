/// The refusal string the model is instructed to emit when the retrieved
/// context does not contain the answer.
pub const REFUSAL: &str = "I don't know";

/// A fully assembled generation request. Constructed fresh per question
/// and never persisted.
#[derive(Debug, Clone)]
pub struct PromptRequest {
    pub history: String,
    pub context: String,
    pub question: String,
}

impl PromptRequest {
    pub fn new(
        history: impl Into<String>,
        context: impl Into<String>,
        question: impl Into<String>,
    ) -> Self {
        Self {
            history: history.into(),
            context: context.into(),
            question: question.into(),
        }
    }

    /// Render the final prompt text. The instruction binds the model to
    /// the transcript context and to the fixed refusal string.
    pub fn render(&self) -> String {
        format!(
            "You are a helpful assistant.\n\
             Use the conversation history and transcript context to answer the question.\n\
             Answer ONLY using the transcript context.\n\
             If the answer is not present, say \"{REFUSAL}\".\n\
             \n\
             Conversation History:\n\
             {history}\n\
             \n\
             Transcript Context:\n\
             {context}\n\
             \n\
             Current Question:\n\
             {question}",
            history = self.history,
            context = self.context,
            question = self.question,
        )
    }
}
