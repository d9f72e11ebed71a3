use crate::document_processor::{DocumentProcessor, ExtractionError};
use crate::inference::{BackendError, InferenceBackend};
use crate::prompt::build_prompt;
use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
pub enum AnswerError {
    #[error("Question is required.")]
    MissingQuestion,
    #[error(transparent)]
    Extraction(#[from] ExtractionError),
    #[error(transparent)]
    Backend(#[from] BackendError),
}

/// Validates a question, builds the prompt and asks the backend once.
pub struct AnswerService {
    backend: Arc<dyn InferenceBackend>,
    document_processor: DocumentProcessor,
}

impl AnswerService {
    pub fn new(backend: Arc<dyn InferenceBackend>) -> Self {
        Self {
            backend,
            document_processor: DocumentProcessor::new(),
        }
    }

    pub fn model_name(&self) -> &str {
        self.backend.model_name()
    }

    /// Answers `question` using context the caller already extracted.
    pub async fn answer(&self, question: &str, context: &str) -> Result<String, AnswerError> {
        validate_question(question)?;
        self.generate(question, context).await
    }

    /// Answers `question`, extracting context from an uploaded PDF first.
    /// A zero-length upload is treated the same as no upload.
    pub async fn answer_with_pdf(
        &self,
        question: &str,
        pdf: Option<Vec<u8>>,
    ) -> Result<String, AnswerError> {
        validate_question(question)?;

        let context = match pdf.filter(|bytes| !bytes.is_empty()) {
            Some(bytes) => self.document_processor.extract_text(bytes).await?,
            None => String::new(),
        };

        self.generate(question, &context).await
    }

    async fn generate(&self, question: &str, context: &str) -> Result<String, AnswerError> {
        let prompt = build_prompt(question, context);
        log::info!(
            "Asking {} (context: {} chars)",
            self.backend.model_name(),
            context_chars(context)
        );

        let start_time = std::time::Instant::now();
        let answer = self.backend.generate(&prompt).await?;
        log::info!("Answer generated in {}ms", start_time.elapsed().as_millis());

        Ok(answer)
    }
}

fn context_chars(context: &str) -> usize {
    context.trim().chars().count()
}

fn validate_question(question: &str) -> Result<(), AnswerError> {
    if question.trim().is_empty() {
        return Err(AnswerError::MissingQuestion);
    }
    Ok(())
}
