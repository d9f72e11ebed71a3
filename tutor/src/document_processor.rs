use lopdf::Document;
use regex::Regex;
use std::sync::LazyLock;

static TRAILING_SPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t]+\n").expect("valid trailing-space pattern"));
static BLANK_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("valid blank-run pattern"));

/// PDF headers may be preceded by junk; readers look within the first KiB.
const HEADER_SEARCH_WINDOW: usize = 1024;

#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error("the uploaded file is empty")]
    Empty,
    #[error("the uploaded file is not a PDF document")]
    NotPdf,
    #[error("failed to parse PDF: {0}")]
    Parse(String),
    #[error("failed to extract text from page {page}: {reason}")]
    Page { page: u32, reason: String },
    #[error("PDF extraction task failed: {0}")]
    Task(String),
}

#[derive(Debug, Default, Clone, Copy)]
pub struct DocumentProcessor;

impl DocumentProcessor {
    pub fn new() -> Self {
        Self
    }

    /// Extracts the whole document in one pass. Used by the upload route.
    pub async fn extract_text(&self, bytes: Vec<u8>) -> Result<String, ExtractionError> {
        check_pdf_header(&bytes)?;
        log::info!("Extracting text from uploaded PDF ({} bytes)", bytes.len());

        let text = tokio::task::spawn_blocking(move || {
            pdf_extract::extract_text_from_mem(&bytes)
                .map_err(|e| ExtractionError::Parse(e.to_string()))
        })
        .await
        .map_err(|e| ExtractionError::Task(e.to_string()))??;

        Ok(self.clean_text(&text))
    }

    /// Extracts text one page at a time and concatenates it, each page
    /// terminated by a newline. Used by the client before submitting.
    pub async fn extract_pages(&self, bytes: Vec<u8>) -> Result<String, ExtractionError> {
        check_pdf_header(&bytes)?;

        let pages = tokio::task::spawn_blocking(move || page_texts(&bytes))
            .await
            .map_err(|e| ExtractionError::Task(e.to_string()))??;

        log::info!("Extracted {} pages", pages.len());
        let mut full_text = String::new();
        for page in pages {
            full_text.push_str(page.trim_end());
            full_text.push('\n');
        }
        Ok(full_text)
    }

    pub fn clean_text(&self, text: &str) -> String {
        let text = text.replace("\r\n", "\n");
        let text = TRAILING_SPACE.replace_all(&text, "\n");
        let text = BLANK_RUNS.replace_all(&text, "\n\n");
        text.trim().to_string()
    }
}

fn check_pdf_header(bytes: &[u8]) -> Result<(), ExtractionError> {
    if bytes.is_empty() {
        return Err(ExtractionError::Empty);
    }
    let window = &bytes[..bytes.len().min(HEADER_SEARCH_WINDOW)];
    if !window.windows(5).any(|w| w == b"%PDF-") {
        return Err(ExtractionError::NotPdf);
    }
    Ok(())
}

fn page_texts(bytes: &[u8]) -> Result<Vec<String>, ExtractionError> {
    let doc = Document::load_mem(bytes).map_err(|e| ExtractionError::Parse(e.to_string()))?;

    // get_pages is keyed by 1-based page number in document order.
    let mut texts = Vec::new();
    for page in doc.get_pages().keys() {
        let text = doc
            .extract_text(&[*page])
            .map_err(|e| ExtractionError::Page {
                page: *page,
                reason: e.to_string(),
            })?;
        texts.push(text);
    }
    Ok(texts)
}
