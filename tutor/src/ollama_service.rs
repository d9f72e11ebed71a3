use crate::config::BackendConfig;
use crate::inference::{BackendError, InferenceBackend};
use crate::models::{GenerateRequest, GenerateResponse};
use async_trait::async_trait;
use reqwest::Client;

/// Talks to an Ollama server's `/api/generate` endpoint.
#[derive(Debug, Clone)]
pub struct OllamaService {
    client: Client,
    url: String,
    model: String,
}

impl OllamaService {
    pub fn new(config: &BackendConfig) -> Result<Self, BackendError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| BackendError::Client(e.to_string()))?;

        Ok(Self {
            client,
            url: config.generate_url(),
            model: config.model.clone(),
        })
    }
}

#[async_trait]
impl InferenceBackend for OllamaService {
    async fn generate(&self, prompt: &str) -> Result<String, BackendError> {
        log::debug!("Generating with model {} ({} prompt chars)", self.model, prompt.len());

        let request = GenerateRequest {
            model: self.model.clone(),
            prompt: prompt.to_string(),
            stream: false,
        };

        let response = self.client.post(&self.url).json(&request).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BackendError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        let generated: GenerateResponse = serde_json::from_str(&body)
            .map_err(|e| BackendError::InvalidResponse(e.to_string()))?;

        if let (Some(total), Some(tokens)) = (generated.total_duration, generated.eval_count) {
            log::debug!("Ollama finished in {}ms, {} tokens", total / 1_000_000, tokens);
        }

        Ok(generated.response)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
