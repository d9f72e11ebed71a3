use async_trait::async_trait;

/// Anything that can turn a prompt into generated text.
#[async_trait]
pub trait InferenceBackend: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, BackendError>;

    fn model_name(&self) -> &str;
}

#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("failed to build HTTP client: {0}")]
    Client(String),
    #[error("inference request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("inference server returned HTTP {status}: {body}")]
    Status {
        status: u16,
        body: String,
    },
    #[error("invalid response from inference server: {0}")]
    InvalidResponse(String),
}
