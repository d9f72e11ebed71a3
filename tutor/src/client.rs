use crate::document_processor::{DocumentProcessor, ExtractionError};
use crate::models::{AskRequest, AskResponse, SelectedFile};
use async_trait::async_trait;
use reqwest::Client;

pub const UNREADABLE_PDF_MESSAGE: &str = "Sorry, I couldn't read the content of that PDF.";
pub const FAILED_ANSWER_MESSAGE: &str =
    "Sorry, something went wrong. Please check the server and try again.";
pub const IDLE_ANSWER_MESSAGE: &str =
    "Select a PDF and ask a question, or just ask a general knowledge question.";

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("request to answer service failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("answer service returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
}

/// Transport used by [`TutorSession`] to reach the answer service.
#[async_trait]
pub trait AskApi: Send + Sync {
    async fn ask(&self, request: &AskRequest) -> Result<String, ClientError>;
}

/// Posts JSON to the answer service.
#[derive(Debug, Clone)]
pub struct HttpAskApi {
    client: Client,
    url: String,
}

impl HttpAskApi {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            url: url.into(),
        }
    }
}

#[async_trait]
impl AskApi for HttpAskApi {
    async fn ask(&self, request: &AskRequest) -> Result<String, ClientError> {
        let response = self.client.post(&self.url).json(request).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Status { status, body });
        }

        let body: AskResponse = response.json().await?;
        Ok(body.answer)
    }
}

/// Text extracted from the selected PDF, if any.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Context {
    #[default]
    Absent,
    Extracted(String),
    /// Extraction failed. Rendered as [`UNREADABLE_PDF_MESSAGE`].
    Unreadable,
}

impl Context {
    pub fn as_str(&self) -> &str {
        match self {
            Context::Absent => "",
            Context::Extracted(text) => text,
            Context::Unreadable => UNREADABLE_PDF_MESSAGE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum Answer {
    #[default]
    Idle,
    Received(String),
    /// The service call failed. Rendered as [`FAILED_ANSWER_MESSAGE`].
    Failed,
}

impl Answer {
    pub fn display(&self) -> &str {
        match self {
            Answer::Idle => IDLE_ANSWER_MESSAGE,
            Answer::Received(text) => text,
            Answer::Failed => FAILED_ANSWER_MESSAGE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Sent,
    BlankQuestion,
    Busy,
}

/// Client-side form state: one selected PDF, one question, one answer.
pub struct TutorSession<A: AskApi> {
    api: A,
    document_processor: DocumentProcessor,
    context: Context,
    file_name: Option<String>,
    question: String,
    answer: Answer,
    is_loading: bool,
}

impl<A: AskApi> TutorSession<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            document_processor: DocumentProcessor::new(),
            context: Context::Absent,
            file_name: None,
            question: String::new(),
            answer: Answer::Idle,
            is_loading: false,
        }
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn answer(&self) -> &Answer {
        &self.answer
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn set_question(&mut self, question: impl Into<String>) {
        self.question = question.into();
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Replaces the current selection. Anything other than a PDF clears it.
    pub async fn select_file(&mut self, file: Option<SelectedFile>) {
        if let Some(file) = self.begin_select(file) {
            let result = self.document_processor.extract_pages(file.bytes).await;
            self.finish_select(result);
        }
    }

    /// First half of [`select_file`](Self::select_file). Returns the file to
    /// extract and leaves the session loading, or clears the selection and
    /// returns `None` when the file is missing or not a PDF.
    pub fn begin_select(&mut self, file: Option<SelectedFile>) -> Option<SelectedFile> {
        let file = match file {
            Some(file) if file.is_pdf() => file,
            other => {
                if let Some(file) = other {
                    log::info!("Ignoring {} ({})", file.name, file.mime_type);
                }
                self.context = Context::Absent;
                self.file_name = None;
                return None;
            }
        };

        self.file_name = Some(file.name.clone());
        self.is_loading = true;
        Some(file)
    }

    pub fn finish_select(&mut self, result: Result<String, ExtractionError>) {
        self.context = match result {
            Ok(text) => Context::Extracted(text),
            Err(e) => {
                log::error!(
                    "Error reading PDF {}: {}",
                    self.file_name.as_deref().unwrap_or("<unnamed>"),
                    e
                );
                Context::Unreadable
            }
        };
        self.is_loading = false;
    }

    /// Sends the current question and context to the service.
    pub async fn submit(&mut self) -> SubmitOutcome {
        let request = match self.begin_submit() {
            Ok(request) => request,
            Err(outcome) => return outcome,
        };
        let result = self.api.ask(&request).await;
        self.finish_submit(result);
        SubmitOutcome::Sent
    }

    /// First half of [`submit`](Self::submit). Blank questions and in-flight
    /// operations are refused; otherwise the session is left loading with the
    /// previous answer cleared, and the request to send is returned.
    pub fn begin_submit(&mut self) -> Result<AskRequest, SubmitOutcome> {
        if self.question.trim().is_empty() {
            return Err(SubmitOutcome::BlankQuestion);
        }
        if self.is_loading {
            return Err(SubmitOutcome::Busy);
        }

        self.is_loading = true;
        self.answer = Answer::Idle;

        Ok(AskRequest {
            context: self.context.as_str().to_string(),
            question: self.question.clone(),
        })
    }

    pub fn finish_submit(&mut self, result: Result<String, ClientError>) {
        self.answer = match result {
            Ok(answer) => Answer::Received(answer),
            Err(e) => {
                log::error!("Error fetching the AI response: {}", e);
                Answer::Failed
            }
        };
        self.is_loading = false;
    }
}

/// Guesses a MIME type from a file name the way a browser file picker does.
pub fn mime_type_for(file_name: &str) -> &'static str {
    let lower = file_name.to_ascii_lowercase();
    if lower.ends_with(".pdf") {
        crate::models::PDF_MIME_TYPE
    } else if lower.ends_with(".txt") {
        "text/plain"
    } else {
        "application/octet-stream"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_failure_and_absence_differently() {
        assert_eq!(Context::Absent.as_str(), "");
        assert_eq!(Context::Unreadable.as_str(), UNREADABLE_PDF_MESSAGE);
        assert_eq!(Answer::Idle.display(), IDLE_ANSWER_MESSAGE);
        assert_eq!(Answer::Failed.display(), FAILED_ANSWER_MESSAGE);
        assert_eq!(Answer::Received("4".into()).display(), "4");
    }

    #[test]
    fn mime_from_extension() {
        assert_eq!(mime_type_for("notes.PDF"), "application/pdf");
        assert_eq!(mime_type_for("notes.txt"), "text/plain");
        assert_eq!(mime_type_for("notes"), "application/octet-stream");
    }
}
